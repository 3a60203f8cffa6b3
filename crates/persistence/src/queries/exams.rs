// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Exam schedule queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use std::str::FromStr;
use time::Date;
use tracing::debug;

use slate_domain::{
    ClassId, ExamScheduleId, ExamSlot, ExamStatus, ExamType, SchoolId, SectionId, SubjectId,
    TeacherId, parse_iso_date,
};

use crate::data_models::ExamFilter;
use crate::diesel_schema::exam_schedules;
use crate::error::PersistenceError;

/// Diesel Queryable struct for exam schedule rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = exam_schedules)]
pub(crate) struct ExamRow {
    exam_schedule_id: i64,
    school_id: i64,
    class_id: i64,
    section_id: i64,
    subject_id: i64,
    teacher_id: i64,
    exam_type: String,
    year: i32,
    exam_date: String,
    start_time: String,
    end_time: String,
    status: String,
}

/// Converts an exam row back into a domain `ExamSlot`.
///
/// # Errors
///
/// Returns an error if a stored enum, year, or date value does not
/// parse.
pub(crate) fn row_to_exam(row: ExamRow) -> Result<ExamSlot, PersistenceError> {
    let exam_type: ExamType = ExamType::from_str(&row.exam_type)
        .map_err(|e| PersistenceError::InvalidStoredValue(e.to_string()))?;
    let status: ExamStatus = ExamStatus::from_str(&row.status)
        .map_err(|e| PersistenceError::InvalidStoredValue(e.to_string()))?;
    let year: u16 = u16::try_from(row.year)
        .map_err(|_| PersistenceError::InvalidStoredValue(format!("year {}", row.year)))?;
    let exam_date: Date = parse_iso_date(&row.exam_date)
        .map_err(|e| PersistenceError::InvalidStoredValue(e.to_string()))?;

    Ok(ExamSlot {
        exam_schedule_id: Some(ExamScheduleId::new(row.exam_schedule_id)),
        school: SchoolId::new(row.school_id),
        class: ClassId::new(row.class_id),
        section: SectionId::new(row.section_id),
        subject: SubjectId::new(row.subject_id),
        teacher: TeacherId::new(row.teacher_id),
        exam_type,
        year,
        exam_date,
        start_time: row.start_time,
        end_time: row.end_time,
        status,
    })
}

/// Retrieves an exam schedule row by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `exam_schedule_id` - The exam schedule ID
///
/// # Errors
///
/// Returns `ExamScheduleNotFound` if no row with the ID exists.
pub fn get_exam_schedule(
    conn: &mut SqliteConnection,
    exam_schedule_id: ExamScheduleId,
) -> Result<ExamSlot, PersistenceError> {
    debug!("Looking up exam schedule by ID: {}", exam_schedule_id);

    let result: Result<ExamRow, diesel::result::Error> = exam_schedules::table
        .filter(exam_schedules::exam_schedule_id.eq(exam_schedule_id.raw()))
        .select(ExamRow::as_select())
        .first(conn);

    match result {
        Ok(row) => row_to_exam(row),
        Err(diesel::result::Error::NotFound) => Err(PersistenceError::ExamScheduleNotFound(
            exam_schedule_id.raw(),
        )),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists exam schedule rows for a school, filtered.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `school` - The school scope
/// * `filter` - Optional class/section/teacher/subject/type/year filters
///
/// # Errors
///
/// Returns an error if the database query fails or a row does not
/// convert.
pub fn list_exam_schedules(
    conn: &mut SqliteConnection,
    school: SchoolId,
    filter: &ExamFilter,
) -> Result<Vec<ExamSlot>, PersistenceError> {
    let mut query = exam_schedules::table
        .filter(exam_schedules::school_id.eq(school.raw()))
        .into_boxed();

    if let Some(class) = filter.class {
        query = query.filter(exam_schedules::class_id.eq(class.raw()));
    }
    if let Some(section) = filter.section {
        query = query.filter(exam_schedules::section_id.eq(section.raw()));
    }
    if let Some(teacher) = filter.teacher {
        query = query.filter(exam_schedules::teacher_id.eq(teacher.raw()));
    }
    if let Some(subject) = filter.subject {
        query = query.filter(exam_schedules::subject_id.eq(subject.raw()));
    }
    if let Some(exam_type) = filter.exam_type {
        query = query.filter(exam_schedules::exam_type.eq(exam_type.as_str()));
    }
    if let Some(year) = filter.year {
        query = query.filter(exam_schedules::year.eq(i32::from(year)));
    }

    let rows: Vec<ExamRow> = query
        .order(exam_schedules::exam_schedule_id.asc())
        .select(ExamRow::as_select())
        .load(conn)?;

    rows.into_iter().map(row_to_exam).collect()
}

/// Retrieves the non-cancelled exam rows on a teacher's calendar for one
/// date, in insertion order.
///
/// # Errors
///
/// Returns an error if the database query fails or a row does not
/// convert.
pub fn exam_slots_for_teacher_date(
    conn: &mut SqliteConnection,
    school: SchoolId,
    teacher: TeacherId,
    date: Date,
) -> Result<Vec<ExamSlot>, PersistenceError> {
    let rows: Vec<ExamRow> = exam_schedules::table
        .filter(exam_schedules::school_id.eq(school.raw()))
        .filter(exam_schedules::teacher_id.eq(teacher.raw()))
        .filter(exam_schedules::exam_date.eq(date.to_string()))
        .filter(exam_schedules::status.ne("cancelled"))
        .order(exam_schedules::exam_schedule_id.asc())
        .select(ExamRow::as_select())
        .load(conn)?;

    rows.into_iter().map(row_to_exam).collect()
}

/// Retrieves the non-cancelled exam rows on a class section's calendar
/// for one date, in insertion order.
///
/// # Errors
///
/// Returns an error if the database query fails or a row does not
/// convert.
pub fn exam_slots_for_class_section_date(
    conn: &mut SqliteConnection,
    school: SchoolId,
    class: ClassId,
    section: SectionId,
    date: Date,
) -> Result<Vec<ExamSlot>, PersistenceError> {
    let rows: Vec<ExamRow> = exam_schedules::table
        .filter(exam_schedules::school_id.eq(school.raw()))
        .filter(exam_schedules::class_id.eq(class.raw()))
        .filter(exam_schedules::section_id.eq(section.raw()))
        .filter(exam_schedules::exam_date.eq(date.to_string()))
        .filter(exam_schedules::status.ne("cancelled"))
        .order(exam_schedules::exam_schedule_id.asc())
        .select(ExamRow::as_select())
        .load(conn)?;

    rows.into_iter().map(row_to_exam).collect()
}

/// Probes for an existing exam row with the same
/// (class, section, subject, type, year) identity.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `candidate` - The exam slot whose identity is being looked up
/// * `exclude` - A row ID to exclude (the row being updated, if any)
///
/// # Returns
///
/// The ID of the existing row, or `None` if the identity is free.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_duplicate_exam(
    conn: &mut SqliteConnection,
    candidate: &ExamSlot,
    exclude: Option<ExamScheduleId>,
) -> Result<Option<ExamScheduleId>, PersistenceError> {
    let mut query = exam_schedules::table
        .filter(exam_schedules::school_id.eq(candidate.school.raw()))
        .filter(exam_schedules::class_id.eq(candidate.class.raw()))
        .filter(exam_schedules::section_id.eq(candidate.section.raw()))
        .filter(exam_schedules::subject_id.eq(candidate.subject.raw()))
        .filter(exam_schedules::exam_type.eq(candidate.exam_type.as_str()))
        .filter(exam_schedules::year.eq(i32::from(candidate.year)))
        .into_boxed();

    if let Some(exclude_id) = exclude {
        query = query.filter(exam_schedules::exam_schedule_id.ne(exclude_id.raw()));
    }

    let existing: Option<i64> = query
        .select(exam_schedules::exam_schedule_id)
        .first(conn)
        .optional()?;

    Ok(existing.map(ExamScheduleId::new))
}
