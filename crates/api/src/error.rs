// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use slate_domain::DomainError;
use slate_engine::EngineError;
use slate_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/persistence errors and represent the
/// API contract. Lower-layer errors are translated explicitly and never
/// leaked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The proposed allocation collides with an existing one.
    Conflict {
        /// The ID of the blocking allocation, if persisted.
        with_id: Option<i64>,
        /// The blocking allocation's start time.
        starts: String,
        /// The blocking allocation's end time.
        ends: String,
        /// A human-readable description of the collision.
        message: String,
    },
    /// An exam schedule with the same (class, section, subject, type,
    /// year) identity already exists.
    DuplicateSubject {
        /// The ID of the existing exam schedule row.
        existing_id: i64,
        /// A human-readable description of the duplicate.
        message: String,
    },
    /// The schedule row is already inactive.
    AlreadyInactive {
        /// The schedule ID.
        id: i64,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { message, .. } => write!(f, "{message}"),
            Self::DuplicateSubject { message, .. } => write!(f, "{message}"),
            Self::AlreadyInactive { id } => {
                write!(f, "Schedule {id} is already inactive")
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not
/// leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidTimeFormat(value) => ApiError::InvalidInput {
            field: String::from("time"),
            message: format!("'{value}' is not a valid HH:MM time"),
        },
        DomainError::InvalidTimeRange { start, end } => ApiError::InvalidInput {
            field: String::from("time"),
            message: format!("Time range {start}-{end} has no duration"),
        },
        DomainError::InvalidDay(value) => ApiError::InvalidInput {
            field: String::from("day"),
            message: format!("'{value}' is not a weekday name such as 'Monday'"),
        },
        DomainError::InvalidSlotKind(value) => ApiError::InvalidInput {
            field: String::from("kind"),
            message: format!("'{value}' is not one of 'subject', 'break', or 'holiday'"),
        },
        DomainError::InvalidExamType(value) => ApiError::InvalidInput {
            field: String::from("exam_type"),
            message: format!("'{value}' is not one of 'midterm', 'midterm2', or 'final'"),
        },
        DomainError::InvalidExamStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!(
                "'{value}' is not one of 'scheduled', 'ongoing', 'completed', or 'cancelled'"
            ),
        },
        DomainError::InvalidStatusTransition { from, to } => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!(
                "Cannot transition exam status from '{}' to '{}'",
                from.as_str(),
                to.as_str()
            ),
        },
        DomainError::MissingSubject => ApiError::InvalidInput {
            field: String::from("subject_id"),
            message: String::from("Subject slots require a subject and a teacher"),
        },
        DomainError::MissingTeacher => ApiError::InvalidInput {
            field: String::from("teacher_id"),
            message: String::from("Subject slots require a subject and a teacher"),
        },
        DomainError::UnexpectedAssignment(kind) => ApiError::InvalidInput {
            field: String::from("kind"),
            message: format!(
                "'{}' slots cannot carry a subject or teacher",
                kind.as_str()
            ),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("exam_date"),
            message: format!("'{date_string}' is not a valid ISO date: {error}"),
        },
    }
}

/// Translates an engine error into an API error.
#[must_use]
pub fn translate_engine_error(err: EngineError) -> ApiError {
    match err {
        EngineError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
///
/// Conflicts and duplicates detected by the write-transaction re-check
/// surface exactly like their service-level counterparts; everything
/// else is an internal error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::ScheduleNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Schedule"),
            message: format!("Schedule {id} does not exist"),
        },
        PersistenceError::ExamScheduleNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Exam schedule"),
            message: format!("Exam schedule {id} does not exist"),
        },
        PersistenceError::DuplicateExamSchedule { existing_id } => ApiError::DuplicateSubject {
            existing_id,
            message: format!(
                "An exam schedule for this class, section, subject, type and year already exists (id {existing_id})"
            ),
        },
        PersistenceError::ConflictDetected {
            with_id,
            starts,
            ends,
        } => ApiError::Conflict {
            with_id: Some(with_id),
            starts: starts.clone(),
            ends: ends.clone(),
            message: format!("Conflicts with allocation {with_id} from {starts} to {ends}"),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
