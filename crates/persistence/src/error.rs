// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use slate_engine::EngineError;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested schedule row was not found.
    ScheduleNotFound(i64),
    /// The requested exam schedule row was not found.
    ExamScheduleNotFound(i64),
    /// An exam schedule for the same (class, section, subject, type, year)
    /// already exists.
    DuplicateExamSchedule { existing_id: i64 },
    /// The write-transaction re-check found a conflicting allocation.
    ConflictDetected {
        with_id: i64,
        starts: String,
        ends: String,
    },
    /// A stored value could not be converted back into a domain type.
    InvalidStoredValue(String),
    /// The row passed to an update has no persisted ID.
    RowIdMissing,
    /// The requested resource was not found.
    NotFound(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::ScheduleNotFound(id) => write!(f, "Schedule not found: {id}"),
            Self::ExamScheduleNotFound(id) => write!(f, "Exam schedule not found: {id}"),
            Self::DuplicateExamSchedule { existing_id } => {
                write!(
                    f,
                    "Exam schedule already exists for this class, section, subject, type and year (id {existing_id})"
                )
            }
            Self::ConflictDetected {
                with_id,
                starts,
                ends,
            } => {
                write!(
                    f,
                    "Conflicts with allocation {with_id} from {starts} to {ends}"
                )
            }
            Self::InvalidStoredValue(msg) => write!(f, "Invalid stored value: {msg}"),
            Self::RowIdMissing => write!(f, "Row has not been persisted yet"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound(String::from("Record not found")),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<EngineError> for PersistenceError {
    fn from(err: EngineError) -> Self {
        Self::InvalidStoredValue(err.to_string())
    }
}
