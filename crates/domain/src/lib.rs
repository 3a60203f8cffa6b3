// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types for the Slate school scheduler.
//!
//! Identifiers, calendar enums, time ranges, and the weekly/exam slot
//! records with their validation rules. Everything here is plain data:
//! no I/O and no storage concerns.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod allocation;
mod error;
mod ids;
mod time_range;
mod types;

#[cfg(test)]
mod tests;

pub use allocation::{Allocation, DayKey, ExamSlot, WeeklySlot, parse_iso_date};
pub use error::DomainError;
pub use ids::{
    ClassId, ExamScheduleId, ScheduleId, SchoolId, SectionId, SubjectId, TeacherId,
};
pub use time_range::TimeRange;
pub use types::{DayOfWeek, ExamStatus, ExamType, SlotKind};
