// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The scheduling conflict engine.
//!
//! Pure interval algebra over allocations: no I/O, no clock, no storage.
//! Callers fetch the relevant pools (persisted rows sharing a resource
//! and day) and pass them in; the engine answers "does this candidate
//! collide, and with what".

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

mod batch;
mod conflict;
mod error;

#[cfg(test)]
mod tests;

pub use batch::{ExpandedCandidate, find_sibling_conflict};
pub use conflict::{ResourceKey, find_conflict, shares_resource};
pub use error::EngineError;
