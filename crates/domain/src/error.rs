// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{ExamStatus, SlotKind};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A time string did not match the `HH:MM` 24-hour format.
    InvalidTimeFormat(String),
    /// A time range collapsed to zero length after overnight normalization.
    InvalidTimeRange {
        /// The start time as supplied.
        start: String,
        /// The end time as supplied.
        end: String,
    },
    /// A day-of-week string is not recognized.
    InvalidDay(String),
    /// A slot kind string is not recognized.
    InvalidSlotKind(String),
    /// An exam type string is not recognized.
    InvalidExamType(String),
    /// An exam status string is not recognized.
    InvalidExamStatus(String),
    /// An exam status transition is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: ExamStatus,
        /// The requested status.
        to: ExamStatus,
    },
    /// A subject slot is missing its subject assignment.
    MissingSubject,
    /// A subject slot is missing its teacher assignment.
    MissingTeacher,
    /// A break or holiday slot carries a subject or teacher assignment.
    UnexpectedAssignment(SlotKind),
    /// Failed to parse a calendar date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTimeFormat(value) => {
                write!(f, "Invalid time '{value}': expected HH:MM in 24-hour format")
            }
            Self::InvalidTimeRange { start, end } => {
                write!(
                    f,
                    "Invalid time range {start}-{end}: an allocation must have positive duration"
                )
            }
            Self::InvalidDay(value) => write!(f, "Invalid day of week: {value}"),
            Self::InvalidSlotKind(value) => write!(f, "Invalid slot kind: {value}"),
            Self::InvalidExamType(value) => write!(f, "Invalid exam type: {value}"),
            Self::InvalidExamStatus(value) => write!(f, "Invalid exam status: {value}"),
            Self::InvalidStatusTransition { from, to } => {
                write!(
                    f,
                    "Cannot transition exam schedule from '{}' to '{}'",
                    from.as_str(),
                    to.as_str()
                )
            }
            Self::MissingSubject => {
                write!(f, "A subject slot requires a subject assignment")
            }
            Self::MissingTeacher => {
                write!(f, "A subject slot requires a teacher assignment")
            }
            Self::UnexpectedAssignment(kind) => {
                write!(
                    f,
                    "A '{}' slot must not carry a subject or teacher assignment",
                    kind.as_str()
                )
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
