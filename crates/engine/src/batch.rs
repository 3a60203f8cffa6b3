// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-batch conflict detection for fanned-out weekly requests.
//!
//! One logical request may target several sections of a class; the
//! service expands it into one candidate per (request, section) pair.
//! Candidates expanded from the same originating request are allowed to
//! coexist: one teacher covering sections A and B in the same period is
//! what such a request states. Sibling checks therefore only compare
//! candidates from *different* requests.

use crate::conflict::shares_resource;
use crate::error::EngineError;
use slate_domain::{Allocation, TimeRange, WeeklySlot};

/// A weekly slot candidate tagged with the index of the request that
/// produced it, so conflict reports can name both sides of an in-batch
/// collision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedCandidate {
    /// The zero-based index of the originating request in the submitted
    /// batch.
    pub request_index: usize,
    /// The expanded per-section slot.
    pub slot: WeeklySlot,
}

impl ExpandedCandidate {
    /// Tags a slot with its originating request index.
    #[must_use]
    pub const fn new(request_index: usize, slot: WeeklySlot) -> Self {
        Self {
            request_index,
            slot,
        }
    }
}

/// Finds the first pair of candidates from different requests that
/// conflict with each other.
///
/// Two candidates conflict when they are in the same school, fall on the
/// same day, share a teacher or a class+section, and their time ranges
/// overlap. Candidates expanded from the same request are never compared
/// against each other.
///
/// # Arguments
///
/// * `candidates` - All expanded candidates of the batch, in submission
///   order
///
/// # Returns
///
/// * `Ok(Some((a, b)))` - The first conflicting pair, in submission order
/// * `Ok(None)` - The batch is internally consistent
///
/// # Errors
///
/// Returns an error if any candidate's times do not parse into a valid
/// range.
pub fn find_sibling_conflict(
    candidates: &[ExpandedCandidate],
) -> Result<Option<(&ExpandedCandidate, &ExpandedCandidate)>, EngineError> {
    for (i, first) in candidates.iter().enumerate() {
        let first_range: TimeRange = first.slot.time_range()?;

        for second in &candidates[i + 1..] {
            if second.request_index == first.request_index {
                continue;
            }
            if second.slot.school != first.slot.school {
                continue;
            }
            if second.slot.day != first.slot.day {
                continue;
            }
            if !shares_resource(&first.slot, &second.slot) {
                continue;
            }

            let second_range: TimeRange = second.slot.time_range()?;
            if first_range.overlaps(&second_range) {
                return Ok(Some((first, second)));
            }
        }
    }

    Ok(None)
}
