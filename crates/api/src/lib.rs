// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service layer for the Slate school scheduler.
//!
//! This crate orchestrates the scheduling operations: it converts wire
//! requests into domain types, validates them against reference data,
//! runs conflict detection through the engine, and persists through the
//! persistence crate. Lower-layer errors are translated into the
//! [`ApiError`] taxonomy at this boundary and never leaked.
//!
//! Weekly schedule batches are all-or-nothing; exam batches report
//! per-item outcomes. Exam lifecycle events raise fire-and-forget
//! notices through the [`NotificationSink`] port.

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
#![allow(clippy::multiple_crate_versions)]

mod error;
mod exams;
mod notify;
mod request_response;
mod weekly;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_domain_error, translate_engine_error, translate_persistence_error,
};
pub use exams::{
    create_exam_schedules, delete_exam_schedule, list_exam_schedules, update_exam_schedule,
};
pub use notify::{LogNotifier, Notice, NoticeKind, NotificationSink, NotifyError, dispatch};
pub use request_response::{
    CreateExamSchedulesRequest, CreateExamSchedulesResponse, CreateSchedulesRequest,
    CreateSchedulesResponse, DeleteExamScheduleResponse, DeleteScheduleResponse, ExamInfo,
    ExamItemError, ExamScheduleItem, ListExamSchedulesRequest, ListExamSchedulesResponse,
    ListSchedulesRequest, ListSchedulesResponse, ScheduleInfo, UpdateExamScheduleRequest,
    UpdateExamScheduleResponse, UpdateScheduleRequest, UpdateScheduleResponse,
    WeeklyScheduleItem,
};
pub use weekly::{create_schedules, delete_schedule, list_schedules, update_schedule};
