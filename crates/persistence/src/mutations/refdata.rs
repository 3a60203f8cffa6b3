// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference-data mutations.
//!
//! Schools, classes, sections, subjects, and teachers are administered
//! out of band; these inserts exist for provisioning and for test
//! fixtures. There is deliberately no HTTP surface for them.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use slate_domain::{ClassId, SchoolId, SectionId, SubjectId, TeacherId};

use crate::diesel_schema::{classes, schools, sections, subject_sections, subjects, teachers};
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Creates a school.
///
/// # Errors
///
/// Returns an error if the insert fails (e.g., duplicate name).
pub fn create_school(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<SchoolId, PersistenceError> {
    info!("Creating school: {}", name);

    diesel::insert_into(schools::table)
        .values(schools::name.eq(name))
        .execute(conn)?;

    Ok(SchoolId::new(get_last_insert_rowid(conn)?))
}

/// Creates a class in a school.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_class(
    conn: &mut SqliteConnection,
    school: SchoolId,
    name: &str,
) -> Result<ClassId, PersistenceError> {
    diesel::insert_into(classes::table)
        .values((classes::school_id.eq(school.raw()), classes::name.eq(name)))
        .execute(conn)?;

    Ok(ClassId::new(get_last_insert_rowid(conn)?))
}

/// Creates a section of a class.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_section(
    conn: &mut SqliteConnection,
    class: ClassId,
    name: &str,
) -> Result<SectionId, PersistenceError> {
    diesel::insert_into(sections::table)
        .values((sections::class_id.eq(class.raw()), sections::name.eq(name)))
        .execute(conn)?;

    Ok(SectionId::new(get_last_insert_rowid(conn)?))
}

/// Creates a subject in a school.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_subject(
    conn: &mut SqliteConnection,
    school: SchoolId,
    name: &str,
) -> Result<SubjectId, PersistenceError> {
    diesel::insert_into(subjects::table)
        .values((
            subjects::school_id.eq(school.raw()),
            subjects::name.eq(name),
        ))
        .execute(conn)?;

    Ok(SubjectId::new(get_last_insert_rowid(conn)?))
}

/// Assigns a subject to a class section.
///
/// # Errors
///
/// Returns an error if the insert fails (e.g., duplicate assignment).
pub fn assign_subject_to_section(
    conn: &mut SqliteConnection,
    subject: SubjectId,
    section: SectionId,
) -> Result<(), PersistenceError> {
    diesel::insert_into(subject_sections::table)
        .values((
            subject_sections::subject_id.eq(subject.raw()),
            subject_sections::section_id.eq(section.raw()),
        ))
        .execute(conn)?;

    Ok(())
}

/// Creates a teacher in a school.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_teacher(
    conn: &mut SqliteConnection,
    school: SchoolId,
    name: &str,
) -> Result<TeacherId, PersistenceError> {
    diesel::insert_into(teachers::table)
        .values((
            teachers::school_id.eq(school.raw()),
            teachers::name.eq(name),
        ))
        .execute(conn)?;

    Ok(TeacherId::new(get_last_insert_rowid(conn)?))
}
