// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the scheduling API.
//!
//! Wire types carry raw identifiers and strings; the services convert
//! them into domain types and validate them.

use serde::{Deserialize, Serialize};

use slate_domain::{ExamSlot, WeeklySlot};

// ============================================================================
// Weekly schedules
// ============================================================================

/// One weekly schedule request, possibly fanning out over several
/// sections of the class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyScheduleItem {
    /// The class ID.
    pub class_id: i64,
    /// The sections of the class this slot applies to.
    pub section_ids: Vec<i64>,
    /// The slot kind: `subject`, `break`, or `holiday`.
    pub kind: String,
    /// The subject ID (required when kind is `subject`).
    pub subject_id: Option<i64>,
    /// The teacher ID (required when kind is `subject`).
    pub teacher_id: Option<i64>,
    /// The day of week, e.g. `Monday`.
    pub day: String,
    /// The start time as `HH:MM`.
    pub start_time: String,
    /// The end time as `HH:MM`.
    pub end_time: String,
}

/// Request to create a batch of weekly schedules, all-or-nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSchedulesRequest {
    /// The school scope.
    pub school_id: i64,
    /// The schedule requests.
    pub items: Vec<WeeklyScheduleItem>,
}

/// Response for a successful batch create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSchedulesResponse {
    /// The new schedule IDs, one per expanded (request, section) pair,
    /// in submission order.
    pub schedule_ids: Vec<i64>,
    /// A success message.
    pub message: String,
}

/// A weekly schedule row as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleInfo {
    pub schedule_id: i64,
    pub class_id: i64,
    pub section_id: i64,
    pub kind: String,
    pub subject_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

impl ScheduleInfo {
    /// Projects a domain slot into its wire form.
    #[must_use]
    pub fn from_slot(slot: &WeeklySlot) -> Self {
        Self {
            schedule_id: slot.schedule_id.map_or(0, slate_domain::ScheduleId::raw),
            class_id: slot.class.raw(),
            section_id: slot.section.raw(),
            kind: String::from(slot.kind.as_str()),
            subject_id: slot.subject.map(|s| s.raw()),
            teacher_id: slot.teacher.map(|t| t.raw()),
            day: String::from(slot.day.as_str()),
            start_time: slot.start_time.clone(),
            end_time: slot.end_time.clone(),
        }
    }
}

/// Query parameters for listing weekly schedules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListSchedulesRequest {
    /// The school scope.
    pub school_id: i64,
    pub class_id: Option<i64>,
    pub section_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub day: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Response for a weekly schedule listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSchedulesResponse {
    pub schedules: Vec<ScheduleInfo>,
}

/// Merge patch for one weekly schedule row. Absent fields keep their
/// current values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateScheduleRequest {
    /// The school scope.
    pub school_id: i64,
    pub class_id: Option<i64>,
    pub section_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub day: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Response for a successful schedule update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateScheduleResponse {
    pub schedule: ScheduleInfo,
    pub message: String,
}

/// Response for a schedule soft-delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteScheduleResponse {
    pub schedule_id: i64,
    /// True when the row was already inactive and nothing changed.
    pub already_inactive: bool,
    pub message: String,
}

// ============================================================================
// Exam schedules
// ============================================================================

/// One exam schedule item within a batch create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamScheduleItem {
    pub class_id: i64,
    pub section_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    /// The exam date as `YYYY-MM-DD`.
    pub exam_date: String,
    pub start_time: String,
    pub end_time: String,
}

/// Request to create a batch of exam schedules with per-item outcomes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExamSchedulesRequest {
    /// The school scope.
    pub school_id: i64,
    /// The exam type shared by the batch: `midterm`, `midterm2`, or
    /// `final`.
    pub exam_type: String,
    /// The academic year shared by the batch.
    pub year: u16,
    /// The exam items.
    pub items: Vec<ExamScheduleItem>,
}

/// An exam schedule row as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamInfo {
    pub exam_schedule_id: i64,
    pub class_id: i64,
    pub section_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub exam_type: String,
    pub year: u16,
    pub exam_date: String,
    pub start_time: String,
    pub end_time: String,
    pub status: String,
}

impl ExamInfo {
    /// Projects a domain exam slot into its wire form.
    #[must_use]
    pub fn from_slot(slot: &ExamSlot) -> Self {
        Self {
            exam_schedule_id: slot
                .exam_schedule_id
                .map_or(0, slate_domain::ExamScheduleId::raw),
            class_id: slot.class.raw(),
            section_id: slot.section.raw(),
            subject_id: slot.subject.raw(),
            teacher_id: slot.teacher.raw(),
            exam_type: String::from(slot.exam_type.as_str()),
            year: slot.year,
            exam_date: slot.exam_date.to_string(),
            start_time: slot.start_time.clone(),
            end_time: slot.end_time.clone(),
            status: String::from(slot.status.as_str()),
        }
    }
}

/// A structured per-item failure within an exam batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamItemError {
    /// The zero-based index of the failed item in the request.
    pub index: usize,
    /// A human-readable description of the failure.
    pub message: String,
}

/// Response for an exam batch create: partial success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExamSchedulesResponse {
    /// The items that were persisted.
    pub created: Vec<ExamInfo>,
    /// The items that failed, with their request indexes.
    pub errors: Vec<ExamItemError>,
}

/// Query parameters for listing exam schedules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListExamSchedulesRequest {
    /// The school scope.
    pub school_id: i64,
    pub class_id: Option<i64>,
    pub section_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub exam_type: Option<String>,
    pub year: Option<u16>,
}

/// Response for an exam schedule listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListExamSchedulesResponse {
    pub exams: Vec<ExamInfo>,
}

/// Merge patch for one exam schedule row. Absent fields keep their
/// current values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateExamScheduleRequest {
    /// The school scope.
    pub school_id: i64,
    pub class_id: Option<i64>,
    pub section_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub teacher_id: Option<i64>,
    /// The exam type: `midterm`, `midterm2`, or `final`. Changing it
    /// moves the row to a new uniqueness identity.
    pub exam_type: Option<String>,
    /// The academic year. Changing it moves the row to a new
    /// uniqueness identity.
    pub year: Option<u16>,
    pub exam_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub status: Option<String>,
}

/// Response for a successful exam schedule update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateExamScheduleResponse {
    pub exam: ExamInfo,
    /// Human-readable descriptions of what changed.
    pub changes: Vec<String>,
    pub message: String,
}

/// Response for an exam schedule delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteExamScheduleResponse {
    pub exam_schedule_id: i64,
    pub message: String,
}
