// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Exam schedule mutations.
//!
//! As with weekly rows, the uniqueness lookup and conflict check are
//! re-run inside the write transaction. The UNIQUE index on
//! (school, class, section, subject, type, year) backs the lookup at
//! the storage level.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use slate_domain::{Allocation, ExamScheduleId, ExamSlot};
use slate_engine::find_conflict;

use crate::diesel_schema::exam_schedules;
use crate::error::PersistenceError;
use crate::queries;
use crate::sqlite::get_last_insert_rowid;

/// Builds the conflict pool for an exam slot: the teacher's rows and
/// the class section's rows for the exam date.
fn exam_conflict_pool(
    conn: &mut SqliteConnection,
    slot: &ExamSlot,
) -> Result<Vec<ExamSlot>, PersistenceError> {
    let mut pool: Vec<ExamSlot> = queries::exams::exam_slots_for_teacher_date(
        conn,
        slot.school,
        slot.teacher,
        slot.exam_date,
    )?;
    pool.extend(queries::exams::exam_slots_for_class_section_date(
        conn,
        slot.school,
        slot.class,
        slot.section,
        slot.exam_date,
    )?);
    Ok(pool)
}

/// Re-checks uniqueness and conflicts for one exam slot.
///
/// The uniqueness lookup always runs: cancelled exams keep their
/// (class, section, subject, type, year) identity. The window check only
/// applies to rows that occupy the calendar, so a cancelled or completed
/// row can be edited without colliding with whatever replaced it.
fn recheck_exam(
    conn: &mut SqliteConnection,
    slot: &ExamSlot,
    exclude: Option<ExamScheduleId>,
) -> Result<(), PersistenceError> {
    if let Some(existing_id) = queries::exams::find_duplicate_exam(conn, slot, exclude)? {
        return Err(PersistenceError::DuplicateExamSchedule {
            existing_id: existing_id.raw(),
        });
    }

    if !slot.in_force() {
        return Ok(());
    }

    let pool: Vec<ExamSlot> = exam_conflict_pool(conn, slot)?;
    if let Some(existing) = find_conflict(slot, &pool)? {
        return Err(PersistenceError::ConflictDetected {
            with_id: existing.allocation_id().unwrap_or_default(),
            starts: existing.start_time.clone(),
            ends: existing.end_time.clone(),
        });
    }
    Ok(())
}

/// Inserts one exam schedule row.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `slot` - The exam slot to persist
///
/// # Returns
///
/// The new exam schedule ID.
///
/// # Errors
///
/// Returns `DuplicateExamSchedule` if the (class, section, subject,
/// type, year) identity is taken, `ConflictDetected` on a calendar
/// collision, or a database error.
pub fn insert_exam_schedule(
    conn: &mut SqliteConnection,
    slot: &ExamSlot,
) -> Result<ExamScheduleId, PersistenceError> {
    info!(
        "Inserting exam schedule for class {} section {} subject {}",
        slot.class, slot.section, slot.subject
    );

    conn.immediate_transaction(|conn| {
        recheck_exam(conn, slot, None)?;

        diesel::insert_into(exam_schedules::table)
            .values((
                exam_schedules::school_id.eq(slot.school.raw()),
                exam_schedules::class_id.eq(slot.class.raw()),
                exam_schedules::section_id.eq(slot.section.raw()),
                exam_schedules::subject_id.eq(slot.subject.raw()),
                exam_schedules::teacher_id.eq(slot.teacher.raw()),
                exam_schedules::exam_type.eq(slot.exam_type.as_str()),
                exam_schedules::year.eq(i32::from(slot.year)),
                exam_schedules::exam_date.eq(slot.exam_date.to_string()),
                exam_schedules::start_time.eq(&slot.start_time),
                exam_schedules::end_time.eq(&slot.end_time),
                exam_schedules::status.eq(slot.status.as_str()),
            ))
            .execute(conn)?;

        Ok(ExamScheduleId::new(get_last_insert_rowid(conn)?))
    })
}

/// Updates a persisted exam schedule row in place.
///
/// The row's own ID is excluded from both the uniqueness lookup and the
/// conflict re-check.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `slot` - The full post-merge slot, carrying its exam schedule ID
///
/// # Errors
///
/// Returns `RowIdMissing` if the slot has no ID, `ExamScheduleNotFound`
/// if the row no longer exists, `DuplicateExamSchedule` or
/// `ConflictDetected` on a collision.
pub fn update_exam_schedule(
    conn: &mut SqliteConnection,
    slot: &ExamSlot,
) -> Result<(), PersistenceError> {
    let exam_schedule_id: ExamScheduleId =
        slot.exam_schedule_id.ok_or(PersistenceError::RowIdMissing)?;

    debug!("Updating exam schedule ID: {}", exam_schedule_id);

    conn.immediate_transaction(|conn| {
        recheck_exam(conn, slot, Some(exam_schedule_id))?;

        let affected: usize = diesel::update(exam_schedules::table)
            .filter(exam_schedules::exam_schedule_id.eq(exam_schedule_id.raw()))
            .set((
                exam_schedules::class_id.eq(slot.class.raw()),
                exam_schedules::section_id.eq(slot.section.raw()),
                exam_schedules::subject_id.eq(slot.subject.raw()),
                exam_schedules::teacher_id.eq(slot.teacher.raw()),
                exam_schedules::exam_type.eq(slot.exam_type.as_str()),
                exam_schedules::year.eq(i32::from(slot.year)),
                exam_schedules::exam_date.eq(slot.exam_date.to_string()),
                exam_schedules::start_time.eq(&slot.start_time),
                exam_schedules::end_time.eq(&slot.end_time),
                exam_schedules::status.eq(slot.status.as_str()),
            ))
            .execute(conn)?;

        if affected == 0 {
            return Err(PersistenceError::ExamScheduleNotFound(
                exam_schedule_id.raw(),
            ));
        }
        Ok(())
    })
}

/// Hard-deletes an exam schedule row.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `exam_schedule_id` - The row to delete
///
/// # Errors
///
/// Returns `ExamScheduleNotFound` if no row with the ID exists.
pub fn delete_exam_schedule(
    conn: &mut SqliteConnection,
    exam_schedule_id: ExamScheduleId,
) -> Result<(), PersistenceError> {
    info!("Deleting exam schedule ID: {}", exam_schedule_id);

    let affected: usize = diesel::delete(exam_schedules::table)
        .filter(exam_schedules::exam_schedule_id.eq(exam_schedule_id.raw()))
        .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::ExamScheduleNotFound(
            exam_schedule_id.raw(),
        ));
    }
    Ok(())
}
