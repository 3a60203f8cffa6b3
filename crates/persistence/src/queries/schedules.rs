// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weekly schedule queries.
//!
//! All queries use Diesel DSL against the `schedules` table and convert
//! rows back into domain `WeeklySlot` values.

use diesel::prelude::*;
use diesel::SqliteConnection;
use std::str::FromStr;
use tracing::debug;

use slate_domain::{
    ClassId, DayOfWeek, ScheduleId, SchoolId, SectionId, SlotKind, SubjectId, TeacherId,
    WeeklySlot,
};

use crate::data_models::{Page, ScheduleFilter};
use crate::diesel_schema::schedules;
use crate::error::PersistenceError;

/// Diesel Queryable struct for schedule rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = schedules)]
pub(crate) struct ScheduleRow {
    schedule_id: i64,
    school_id: i64,
    class_id: i64,
    section_id: i64,
    kind: String,
    subject_id: Option<i64>,
    teacher_id: Option<i64>,
    day_of_week: String,
    start_time: String,
    end_time: String,
    is_active: i32,
}

/// Converts a schedule row back into a domain `WeeklySlot`.
///
/// # Errors
///
/// Returns an error if a stored enum value does not parse.
pub(crate) fn row_to_slot(row: ScheduleRow) -> Result<WeeklySlot, PersistenceError> {
    let kind: SlotKind = SlotKind::from_str(&row.kind)
        .map_err(|e| PersistenceError::InvalidStoredValue(e.to_string()))?;
    let day: DayOfWeek = DayOfWeek::from_str(&row.day_of_week)
        .map_err(|e| PersistenceError::InvalidStoredValue(e.to_string()))?;

    Ok(WeeklySlot {
        schedule_id: Some(ScheduleId::new(row.schedule_id)),
        school: SchoolId::new(row.school_id),
        class: ClassId::new(row.class_id),
        section: SectionId::new(row.section_id),
        kind,
        subject: row.subject_id.map(SubjectId::new),
        teacher: row.teacher_id.map(TeacherId::new),
        day,
        start_time: row.start_time,
        end_time: row.end_time,
        is_active: row.is_active != 0,
    })
}

/// Retrieves a schedule row by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `schedule_id` - The schedule ID
///
/// # Errors
///
/// Returns `ScheduleNotFound` if no row with the ID exists.
pub fn get_schedule(
    conn: &mut SqliteConnection,
    schedule_id: ScheduleId,
) -> Result<WeeklySlot, PersistenceError> {
    debug!("Looking up schedule by ID: {}", schedule_id);

    let result: Result<ScheduleRow, diesel::result::Error> = schedules::table
        .filter(schedules::schedule_id.eq(schedule_id.raw()))
        .select(ScheduleRow::as_select())
        .first(conn);

    match result {
        Ok(row) => row_to_slot(row),
        Err(diesel::result::Error::NotFound) => {
            Err(PersistenceError::ScheduleNotFound(schedule_id.raw()))
        }
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists active schedule rows for a school, filtered and paginated.
///
/// Inactive (soft-deleted) rows are never returned.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `school` - The school scope
/// * `filter` - Optional class/section/teacher/day filters
/// * `page` - The pagination window
///
/// # Errors
///
/// Returns an error if the database query fails or a row does not
/// convert.
pub fn list_schedules(
    conn: &mut SqliteConnection,
    school: SchoolId,
    filter: &ScheduleFilter,
    page: Page,
) -> Result<Vec<WeeklySlot>, PersistenceError> {
    let mut query = schedules::table
        .filter(schedules::school_id.eq(school.raw()))
        .filter(schedules::is_active.eq(1))
        .into_boxed();

    if let Some(class) = filter.class {
        query = query.filter(schedules::class_id.eq(class.raw()));
    }
    if let Some(section) = filter.section {
        query = query.filter(schedules::section_id.eq(section.raw()));
    }
    if let Some(teacher) = filter.teacher {
        query = query.filter(schedules::teacher_id.eq(teacher.raw()));
    }
    if let Some(day) = filter.day {
        query = query.filter(schedules::day_of_week.eq(day.as_str()));
    }

    let rows: Vec<ScheduleRow> = query
        .order(schedules::schedule_id.asc())
        .limit(page.limit)
        .offset(page.offset)
        .select(ScheduleRow::as_select())
        .load(conn)?;

    rows.into_iter().map(row_to_slot).collect()
}

/// Retrieves the active schedule rows on a teacher's calendar for one
/// day, in insertion order.
///
/// # Errors
///
/// Returns an error if the database query fails or a row does not
/// convert.
pub fn active_slots_for_teacher_day(
    conn: &mut SqliteConnection,
    school: SchoolId,
    teacher: TeacherId,
    day: DayOfWeek,
) -> Result<Vec<WeeklySlot>, PersistenceError> {
    let rows: Vec<ScheduleRow> = schedules::table
        .filter(schedules::school_id.eq(school.raw()))
        .filter(schedules::teacher_id.eq(teacher.raw()))
        .filter(schedules::day_of_week.eq(day.as_str()))
        .filter(schedules::is_active.eq(1))
        .order(schedules::schedule_id.asc())
        .select(ScheduleRow::as_select())
        .load(conn)?;

    rows.into_iter().map(row_to_slot).collect()
}

/// Retrieves the active schedule rows on a class section's calendar for
/// one day, in insertion order.
///
/// # Errors
///
/// Returns an error if the database query fails or a row does not
/// convert.
pub fn active_slots_for_class_section_day(
    conn: &mut SqliteConnection,
    school: SchoolId,
    class: ClassId,
    section: SectionId,
    day: DayOfWeek,
) -> Result<Vec<WeeklySlot>, PersistenceError> {
    let rows: Vec<ScheduleRow> = schedules::table
        .filter(schedules::school_id.eq(school.raw()))
        .filter(schedules::class_id.eq(class.raw()))
        .filter(schedules::section_id.eq(section.raw()))
        .filter(schedules::day_of_week.eq(day.as_str()))
        .filter(schedules::is_active.eq(1))
        .order(schedules::schedule_id.asc())
        .select(ScheduleRow::as_select())
        .load(conn)?;

    rows.into_iter().map(row_to_slot).collect()
}
