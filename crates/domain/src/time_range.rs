// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Half-open time intervals in minutes since midnight.
//!
//! A `TimeRange` spans `[start, end)` where both bounds live in
//! `[0, 2880)` so a range may wrap past midnight (e.g. a 22:00-02:00
//! night slot normalizes to `[1320, 1560)`). This is the ONLY overlap
//! formula in the codebase; every conflict check routes through
//! [`TimeRange::overlaps`].

use crate::error::DomainError;

/// Minutes in one day.
const MINUTES_PER_DAY: u16 = 1440;

/// A normalized half-open `[start, end)` minute interval.
///
/// Invariant: `end > start` after construction; zero-length ranges are
/// rejected. Immutable value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    start: u16,
    end: u16,
}

impl TimeRange {
    /// Parses an `HH:MM` 24-hour string into minutes since midnight.
    ///
    /// # Arguments
    ///
    /// * `value` - The time string (e.g. `"09:30"`)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimeFormat` if the string does not
    /// match the pattern or the hour/minute components are out of bounds.
    pub fn parse_hhmm(value: &str) -> Result<u16, DomainError> {
        let invalid = || DomainError::InvalidTimeFormat(value.to_string());

        let (hours_str, minutes_str) = value.split_once(':').ok_or_else(invalid)?;
        if hours_str.is_empty()
            || minutes_str.is_empty()
            || hours_str.len() > 2
            || minutes_str.len() != 2
            || !hours_str.bytes().all(|b| b.is_ascii_digit())
            || !minutes_str.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let hours: u16 = hours_str.parse().map_err(|_| invalid())?;
        let minutes: u16 = minutes_str.parse().map_err(|_| invalid())?;
        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }

        Ok(hours * 60 + minutes)
    }

    /// Builds a normalized range from wall-clock `HH:MM` strings.
    ///
    /// If the end does not come after the start, the range is treated as
    /// wrapping past midnight and the end gains one day. Equal start and
    /// end therefore normalize to a full 24-hour range only through the
    /// wrap rule being rejected first: a zero-length input is invalid.
    ///
    /// # Arguments
    ///
    /// * `start` - The start time string
    /// * `end` - The end time string
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimeFormat` for malformed inputs and
    /// `DomainError::InvalidTimeRange` when the normalized range has zero
    /// length.
    pub fn from_wall_clock(start: &str, end: &str) -> Result<Self, DomainError> {
        let start_minutes: u16 = Self::parse_hhmm(start)?;
        let mut end_minutes: u16 = Self::parse_hhmm(end)?;

        if start_minutes == end_minutes {
            return Err(DomainError::InvalidTimeRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        if end_minutes < start_minutes {
            // Overnight wrap: the slot runs past midnight.
            end_minutes += MINUTES_PER_DAY;
        }

        Ok(Self {
            start: start_minutes,
            end: end_minutes,
        })
    }

    /// Returns the start bound in minutes since midnight.
    #[must_use]
    pub const fn start_minutes(&self) -> u16 {
        self.start
    }

    /// Returns the end bound in minutes since midnight (may exceed 1440
    /// for overnight ranges).
    #[must_use]
    pub const fn end_minutes(&self) -> u16 {
        self.end
    }

    /// Returns the duration of this range in minutes.
    #[must_use]
    pub const fn duration_minutes(&self) -> u16 {
        self.end - self.start
    }

    /// Tests whether two ranges overlap.
    ///
    /// Half-open interval test: `a.start < b.end && b.start < a.end`.
    /// Touching endpoints (one range ending exactly where the other
    /// starts) do NOT overlap, so back-to-back periods are allowed.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let start_h = self.start / 60;
        let start_m = self.start % 60;
        let end_h = (self.end % MINUTES_PER_DAY) / 60;
        let end_m = self.end % 60;
        write!(f, "{start_h:02}:{start_m:02}-{end_h:02}:{end_m:02}")
    }
}
