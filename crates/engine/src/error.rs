// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use slate_domain::DomainError;

/// Errors that can occur during conflict evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A domain rule was violated (malformed stored times, zero-length
    /// ranges).
    DomainViolation(DomainError),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<DomainError> for EngineError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
