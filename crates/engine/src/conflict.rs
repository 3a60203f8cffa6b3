// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conflict detection between a candidate allocation and a pool.
//!
//! The detector is deterministic and side-effect free: given the same
//! pool ordering it always reports the same first conflict, so callers
//! can surface "conflicts with X from HH:MM to HH:MM" without a
//! follow-up query.

use crate::error::EngineError;
use slate_domain::{Allocation, ClassId, TeacherId, TimeRange};

/// The grouping identity of a contended resource.
///
/// Allocations can only conflict when they share at least one resource
/// key on the same day: the same teacher's calendar, or the same
/// class+section's calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKey {
    /// A teacher's calendar.
    Teacher(TeacherId),
    /// A class section's calendar.
    ClassSection(ClassId, slate_domain::SectionId),
}

impl ResourceKey {
    /// Returns the resource keys an allocation occupies.
    ///
    /// Every allocation occupies its class+section calendar; subject and
    /// exam allocations additionally occupy their teacher's calendar.
    pub fn keys_of<A: Allocation + ?Sized>(allocation: &A) -> impl Iterator<Item = Self> {
        let teacher: Option<Self> = allocation.teacher().map(Self::Teacher);
        let class_section: Self = Self::ClassSection(allocation.class(), allocation.section());
        teacher.into_iter().chain(std::iter::once(class_section))
    }
}

impl std::fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Teacher(teacher) => write!(f, "teacher {teacher}"),
            Self::ClassSection(class, section) => {
                write!(f, "class {class} section {section}")
            }
        }
    }
}

/// Tests whether two allocations contend for at least one shared
/// resource.
#[must_use]
pub fn shares_resource<A, B>(a: &A, b: &B) -> bool
where
    A: Allocation + ?Sized,
    B: Allocation + ?Sized,
{
    ResourceKey::keys_of(a).any(|key| ResourceKey::keys_of(b).any(|other| key == other))
}

/// Finds the first allocation in `pool` that conflicts with `candidate`.
///
/// The pool is filtered to allocations in the same school, on the same
/// day key, sharing a resource key, currently in force, and distinct
/// from the candidate's own persisted row (so an update never conflicts
/// with itself). Remaining entries are compared with the half-open
/// overlap test in pool order; the first hit is returned.
///
/// # Arguments
///
/// * `candidate` - The allocation being proposed
/// * `pool` - Existing allocations that may contend with it
///
/// # Returns
///
/// * `Ok(Some(&allocation))` - The first conflicting pool entry
/// * `Ok(None)` - No conflict
///
/// # Errors
///
/// Returns an error if the candidate's or a pool entry's stored times do
/// not parse into a valid range.
pub fn find_conflict<'a, C, A>(candidate: &C, pool: &'a [A]) -> Result<Option<&'a A>, EngineError>
where
    C: Allocation + ?Sized,
    A: Allocation,
{
    let candidate_range: TimeRange = candidate.time_range()?;

    for existing in pool {
        if !existing.in_force() {
            continue;
        }
        if let (Some(candidate_id), Some(existing_id)) =
            (candidate.allocation_id(), existing.allocation_id())
            && candidate_id == existing_id
        {
            continue;
        }
        if existing.school() != candidate.school() {
            continue;
        }
        if existing.day_key() != candidate.day_key() {
            continue;
        }
        if !shares_resource(candidate, existing) {
            continue;
        }

        let existing_range: TimeRange = existing.time_range()?;
        if candidate_range.overlaps(&existing_range) {
            return Ok(Some(existing));
        }
    }

    Ok(None)
}
