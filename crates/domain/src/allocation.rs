// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Time-bound resource allocations.
//!
//! `WeeklySlot` (recurring class timetable rows) and `ExamSlot`
//! (date-specific exam timetable rows) are disjoint allocation families
//! that share the [`Allocation`] view so a single conflict-detection
//! path serves both. Times are stored verbatim as `HH:MM` strings and
//! parsed into [`TimeRange`] for comparison.

use crate::error::DomainError;
use crate::ids::{
    ClassId, ExamScheduleId, ScheduleId, SchoolId, SectionId, SubjectId, TeacherId,
};
use crate::time_range::TimeRange;
use crate::types::{DayOfWeek, ExamStatus, ExamType, SlotKind};
use serde::{Deserialize, Serialize};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Wire format for exam dates.
const ISO_DATE: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Parses an ISO `YYYY-MM-DD` date string.
///
/// # Arguments
///
/// * `value` - The date string
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid
/// calendar date.
pub fn parse_iso_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, ISO_DATE).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// The day dimension an allocation occupies.
///
/// Weekly slots recur on a day of week; exam slots occupy one concrete
/// calendar date. Two allocations can only conflict when their day keys
/// are equal, which also keeps the two families apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayKey {
    /// A recurring weekly day.
    Weekday(DayOfWeek),
    /// A concrete calendar date.
    Date(Date),
}

impl std::fmt::Display for DayKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Weekday(day) => write!(f, "{day}"),
            Self::Date(date) => write!(f, "{date}"),
        }
    }
}

/// The shared view of a time-bound allocation used for conflict
/// detection.
///
/// Implementations expose the resource dimensions (teacher, class +
/// section), the day key, and the parsed time range. `in_force` gates
/// soft-deleted weekly rows and cancelled exam rows out of comparisons.
pub trait Allocation {
    /// The persisted row id, if any. Used to exclude a row from its own
    /// conflict check during updates.
    fn allocation_id(&self) -> Option<i64>;

    /// The tenant scope.
    fn school(&self) -> SchoolId;

    /// The class dimension.
    fn class(&self) -> ClassId;

    /// The section dimension.
    fn section(&self) -> SectionId;

    /// The teacher dimension, if the allocation binds one.
    fn teacher(&self) -> Option<TeacherId>;

    /// The day dimension.
    fn day_key(&self) -> DayKey;

    /// The verbatim start time string.
    fn start_time(&self) -> &str;

    /// The verbatim end time string.
    fn end_time(&self) -> &str;

    /// Whether this allocation currently occupies its calendars.
    fn in_force(&self) -> bool;

    /// Parses the stored times into a normalized range.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored time strings are malformed or the
    /// range has zero length.
    fn time_range(&self) -> Result<TimeRange, DomainError> {
        TimeRange::from_wall_clock(self.start_time(), self.end_time())
    }
}

/// A recurring weekly class timetable row.
///
/// Soft-deleted rather than removed: `is_active = false` preserves
/// history while freeing the calendars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySlot {
    /// The persisted row id. `None` before first save.
    pub schedule_id: Option<ScheduleId>,
    /// The tenant scope.
    pub school: SchoolId,
    /// The class this slot belongs to.
    pub class: ClassId,
    /// The section this slot belongs to.
    pub section: SectionId,
    /// The activity kind.
    pub kind: SlotKind,
    /// The subject taught. Required when `kind` is `subject`.
    pub subject: Option<SubjectId>,
    /// The teacher assigned. Required when `kind` is `subject`.
    pub teacher: Option<TeacherId>,
    /// The recurring day of week.
    pub day: DayOfWeek,
    /// The start time, verbatim `HH:MM`.
    pub start_time: String,
    /// The end time, verbatim `HH:MM`.
    pub end_time: String,
    /// Soft-delete flag.
    pub is_active: bool,
}

impl WeeklySlot {
    /// Creates a new active slot without a persisted id.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        school: SchoolId,
        class: ClassId,
        section: SectionId,
        kind: SlotKind,
        subject: Option<SubjectId>,
        teacher: Option<TeacherId>,
        day: DayOfWeek,
        start_time: String,
        end_time: String,
    ) -> Self {
        Self {
            schedule_id: None,
            school,
            class,
            section,
            kind,
            subject,
            teacher,
            day,
            start_time,
            end_time,
            is_active: true,
        }
    }

    /// Validates the kind/assignment pairing and the time fields.
    ///
    /// # Errors
    ///
    /// Returns an error if a subject slot is missing its subject or
    /// teacher, if a break/holiday slot carries either assignment, or if
    /// the time strings do not form a valid range.
    pub fn validate(&self) -> Result<(), DomainError> {
        match self.kind {
            SlotKind::Subject => {
                if self.subject.is_none() {
                    return Err(DomainError::MissingSubject);
                }
                if self.teacher.is_none() {
                    return Err(DomainError::MissingTeacher);
                }
            }
            SlotKind::Break | SlotKind::Holiday => {
                if self.subject.is_some() || self.teacher.is_some() {
                    return Err(DomainError::UnexpectedAssignment(self.kind));
                }
            }
        }
        self.time_range().map(|_| ())
    }
}

impl Allocation for WeeklySlot {
    fn allocation_id(&self) -> Option<i64> {
        self.schedule_id.map(ScheduleId::raw)
    }

    fn school(&self) -> SchoolId {
        self.school
    }

    fn class(&self) -> ClassId {
        self.class
    }

    fn section(&self) -> SectionId {
        self.section
    }

    fn teacher(&self) -> Option<TeacherId> {
        self.teacher
    }

    fn day_key(&self) -> DayKey {
        DayKey::Weekday(self.day)
    }

    fn start_time(&self) -> &str {
        &self.start_time
    }

    fn end_time(&self) -> &str {
        &self.end_time
    }

    fn in_force(&self) -> bool {
        self.is_active
    }
}

/// A date-specific exam timetable row.
///
/// Hard-deleted on cancellation (after a cancellation notification);
/// rows with status `cancelled` no longer occupy calendars but remain
/// queryable until deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamSlot {
    /// The persisted row id. `None` before first save.
    pub exam_schedule_id: Option<ExamScheduleId>,
    /// The tenant scope.
    pub school: SchoolId,
    /// The class sitting the exam.
    pub class: ClassId,
    /// The section sitting the exam.
    pub section: SectionId,
    /// The subject examined.
    pub subject: SubjectId,
    /// The invigilating teacher.
    pub teacher: TeacherId,
    /// The exam cycle.
    pub exam_type: ExamType,
    /// The academic year, distinguishing repeating cycles.
    pub year: u16,
    /// The concrete exam date.
    pub exam_date: Date,
    /// The start time, verbatim `HH:MM`.
    pub start_time: String,
    /// The end time, verbatim `HH:MM`.
    pub end_time: String,
    /// The lifecycle status.
    pub status: ExamStatus,
}

impl ExamSlot {
    /// Creates a new scheduled exam slot without a persisted id.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        school: SchoolId,
        class: ClassId,
        section: SectionId,
        subject: SubjectId,
        teacher: TeacherId,
        exam_type: ExamType,
        year: u16,
        exam_date: Date,
        start_time: String,
        end_time: String,
    ) -> Self {
        Self {
            exam_schedule_id: None,
            school,
            class,
            section,
            subject,
            teacher,
            exam_type,
            year,
            exam_date,
            start_time,
            end_time,
            status: ExamStatus::Scheduled,
        }
    }

    /// Validates the time fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the time strings do not form a valid range.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.time_range().map(|_| ())
    }
}

impl Allocation for ExamSlot {
    fn allocation_id(&self) -> Option<i64> {
        self.exam_schedule_id.map(ExamScheduleId::raw)
    }

    fn school(&self) -> SchoolId {
        self.school
    }

    fn class(&self) -> ClassId {
        self.class
    }

    fn section(&self) -> SectionId {
        self.section
    }

    fn teacher(&self) -> Option<TeacherId> {
        Some(self.teacher)
    }

    fn day_key(&self) -> DayKey {
        DayKey::Date(self.exam_date)
    }

    fn start_time(&self) -> &str {
        &self.start_time
    }

    fn end_time(&self) -> &str {
        &self.end_time
    }

    fn in_force(&self) -> bool {
        self.status.occupies_calendar()
    }
}
