// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Data transfer structs for reference-data rows and list queries.

use slate_domain::{
    ClassId, DayOfWeek, ExamType, SchoolId, SectionId, SubjectId, TeacherId,
};

/// A class row together with its section rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassData {
    /// The class ID.
    pub class_id: ClassId,
    /// The school the class belongs to.
    pub school_id: SchoolId,
    /// The class name.
    pub name: String,
    /// The sections of the class.
    pub sections: Vec<SectionData>,
}

/// A section row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionData {
    /// The section ID.
    pub section_id: SectionId,
    /// The class the section belongs to.
    pub class_id: ClassId,
    /// The section name.
    pub name: String,
}

/// A teacher row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherData {
    /// The teacher ID.
    pub teacher_id: TeacherId,
    /// The school the teacher belongs to.
    pub school_id: SchoolId,
    /// The teacher's name.
    pub name: String,
}

/// Filters for listing weekly schedule rows.
///
/// All filters are optional; `school` scopes every listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleFilter {
    pub class: Option<ClassId>,
    pub section: Option<SectionId>,
    pub teacher: Option<TeacherId>,
    pub day: Option<DayOfWeek>,
}

/// Filters for listing exam schedule rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExamFilter {
    pub class: Option<ClassId>,
    pub section: Option<SectionId>,
    pub teacher: Option<TeacherId>,
    pub subject: Option<SubjectId>,
    pub exam_type: Option<ExamType>,
    pub year: Option<u16>,
}

/// Pagination window for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Maximum number of rows to return.
    pub limit: i64,
    /// Number of rows to skip.
    pub offset: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: 100,
            offset: 0,
        }
    }
}
