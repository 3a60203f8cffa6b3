// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The day of week a recurring weekly slot occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl FromStr for DayOfWeek {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Monday" => Ok(Self::Monday),
            "Tuesday" => Ok(Self::Tuesday),
            "Wednesday" => Ok(Self::Wednesday),
            "Thursday" => Ok(Self::Thursday),
            "Friday" => Ok(Self::Friday),
            "Saturday" => Ok(Self::Saturday),
            "Sunday" => Ok(Self::Sunday),
            _ => Err(DomainError::InvalidDay(s.to_string())),
        }
    }
}

impl std::fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl DayOfWeek {
    /// Converts this day to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

/// The activity a weekly schedule slot represents.
///
/// Breaks and holidays block the class/section calendar without binding
/// a subject or teacher. Weekly slot kinds and exam types are disjoint
/// allocation families and are never compared against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    /// A taught period bound to a subject and a teacher.
    Subject,
    /// A recess period.
    Break,
    /// A holiday marker occupying the whole slot.
    Holiday,
}

impl FromStr for SlotKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "subject" => Ok(Self::Subject),
            "break" => Ok(Self::Break),
            "holiday" => Ok(Self::Holiday),
            _ => Err(DomainError::InvalidSlotKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for SlotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl SlotKind {
    /// Converts this kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Subject => "subject",
            Self::Break => "break",
            Self::Holiday => "holiday",
        }
    }
}

/// The exam cycle an exam schedule row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamType {
    Midterm,
    Midterm2,
    Final,
}

impl FromStr for ExamType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "midterm" => Ok(Self::Midterm),
            "midterm2" => Ok(Self::Midterm2),
            "final" => Ok(Self::Final),
            _ => Err(DomainError::InvalidExamType(s.to_string())),
        }
    }
}

impl std::fmt::Display for ExamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ExamType {
    /// Converts this exam type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Midterm => "midterm",
            Self::Midterm2 => "midterm2",
            Self::Final => "final",
        }
    }
}

/// The lifecycle status of an exam schedule row.
///
/// Cancelled rows are excluded from all conflict comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExamStatus {
    /// Initial status after creation.
    #[default]
    Scheduled,
    /// The exam is in progress.
    Ongoing,
    /// The exam has finished.
    Completed,
    /// The exam was called off. Terminal.
    Cancelled,
}

impl FromStr for ExamStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "ongoing" => Ok(Self::Ongoing),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidExamStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ExamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ExamStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - Scheduled → Ongoing
    /// - Ongoing → Completed
    /// - Scheduled → Cancelled
    /// - Ongoing → Cancelled
    ///
    /// Completed and Cancelled are terminal.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Scheduled, Self::Ongoing)
                | (Self::Ongoing, Self::Completed)
                | (Self::Scheduled | Self::Ongoing, Self::Cancelled)
        )
    }

    /// Returns whether this row still occupies its teacher and
    /// class/section calendars.
    #[must_use]
    pub const fn occupies_calendar(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}
