// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Opaque identifier newtypes.
//!
//! Every entity reference in the scheduler is a dedicated id type with
//! structural equality. Ids are assigned by the persistence layer and are
//! never compared across types.

use serde::{Deserialize, Serialize};

macro_rules! id_type {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw database identifier.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the raw database identifier.
            #[must_use]
            pub const fn raw(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type! {
    /// Identifies a school (the tenant scope for every query and write).
    SchoolId
}

id_type! {
    /// Identifies a class within a school.
    ClassId
}

id_type! {
    /// Identifies a section within a class.
    SectionId
}

id_type! {
    /// Identifies a subject within a school.
    SubjectId
}

id_type! {
    /// Identifies a teacher within a school.
    TeacherId
}

id_type! {
    /// Identifies a weekly schedule row.
    ScheduleId
}

id_type! {
    /// Identifies an exam schedule row.
    ExamScheduleId
}
