// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference-data queries.
//!
//! The schedule services validate requests against schools, classes,
//! sections, subjects, and teachers before any conflict checking. These
//! queries provide exactly that surface.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use slate_domain::{ClassId, SchoolId, SectionId, SubjectId, TeacherId};

use crate::data_models::{ClassData, SectionData, TeacherData};
use crate::diesel_schema::{classes, sections, subject_sections, subjects, teachers};
use crate::error::PersistenceError;

/// Retrieves a class in a school together with all of its sections.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `school` - The school scope
/// * `class` - The class ID
///
/// # Returns
///
/// `Ok(None)` if the class does not exist in the school.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_class_with_sections(
    conn: &mut SqliteConnection,
    school: SchoolId,
    class: ClassId,
) -> Result<Option<ClassData>, PersistenceError> {
    debug!("Looking up class {} in school {}", class, school);

    let row: Option<(i64, i64, String)> = classes::table
        .filter(classes::class_id.eq(class.raw()))
        .filter(classes::school_id.eq(school.raw()))
        .select((classes::class_id, classes::school_id, classes::name))
        .first(conn)
        .optional()?;

    let Some((class_id, school_id, name)) = row else {
        return Ok(None);
    };

    let section_rows: Vec<(i64, i64, String)> = sections::table
        .filter(sections::class_id.eq(class_id))
        .order(sections::section_id.asc())
        .select((sections::section_id, sections::class_id, sections::name))
        .load(conn)?;

    let section_data: Vec<SectionData> = section_rows
        .into_iter()
        .map(|(section_id, class_id, name)| SectionData {
            section_id: SectionId::new(section_id),
            class_id: ClassId::new(class_id),
            name,
        })
        .collect();

    Ok(Some(ClassData {
        class_id: ClassId::new(class_id),
        school_id: SchoolId::new(school_id),
        name,
        sections: section_data,
    }))
}

/// Checks that a subject exists in a school.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn subject_exists(
    conn: &mut SqliteConnection,
    school: SchoolId,
    subject: SubjectId,
) -> Result<bool, PersistenceError> {
    let found: Option<i64> = subjects::table
        .filter(subjects::subject_id.eq(subject.raw()))
        .filter(subjects::school_id.eq(school.raw()))
        .select(subjects::subject_id)
        .first(conn)
        .optional()?;

    Ok(found.is_some())
}

/// Checks that a subject is assigned to a class section.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn subject_assigned_to_section(
    conn: &mut SqliteConnection,
    subject: SubjectId,
    section: SectionId,
) -> Result<bool, PersistenceError> {
    let found: Option<i64> = subject_sections::table
        .filter(subject_sections::subject_id.eq(subject.raw()))
        .filter(subject_sections::section_id.eq(section.raw()))
        .select(subject_sections::id)
        .first(conn)
        .optional()?;

    Ok(found.is_some())
}

/// Retrieves a teacher in a school.
///
/// # Returns
///
/// `Ok(None)` if the teacher does not exist in the school.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_teacher(
    conn: &mut SqliteConnection,
    school: SchoolId,
    teacher: TeacherId,
) -> Result<Option<TeacherData>, PersistenceError> {
    let row: Option<(i64, i64, String)> = teachers::table
        .filter(teachers::teacher_id.eq(teacher.raw()))
        .filter(teachers::school_id.eq(school.raw()))
        .select((teachers::teacher_id, teachers::school_id, teachers::name))
        .first(conn)
        .optional()?;

    Ok(row.map(|(teacher_id, school_id, name)| TeacherData {
        teacher_id: TeacherId::new(teacher_id),
        school_id: SchoolId::new(school_id),
        name,
    }))
}
