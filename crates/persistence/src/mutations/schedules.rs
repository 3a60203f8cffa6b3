// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weekly schedule mutations.
//!
//! The service layer runs full validation and conflict detection before
//! calling in here, but the check-then-act window between its reads and
//! this write is real. Every write therefore re-runs the conflict check
//! against fresh pools inside the same immediate transaction that
//! performs the insert or update.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use slate_domain::{Allocation, ScheduleId, WeeklySlot};
use slate_engine::find_conflict;

use crate::diesel_schema::schedules;
use crate::error::PersistenceError;
use crate::queries;
use crate::sqlite::get_last_insert_rowid;

/// Builds the conflict pool for a weekly slot: the teacher's rows and
/// the class section's rows for the slot's day.
fn weekly_conflict_pool(
    conn: &mut SqliteConnection,
    slot: &WeeklySlot,
) -> Result<Vec<WeeklySlot>, PersistenceError> {
    let mut pool: Vec<WeeklySlot> = Vec::new();
    if let Some(teacher) = slot.teacher {
        pool.extend(queries::schedules::active_slots_for_teacher_day(
            conn,
            slot.school,
            teacher,
            slot.day,
        )?);
    }
    pool.extend(queries::schedules::active_slots_for_class_section_day(
        conn,
        slot.school,
        slot.class,
        slot.section,
        slot.day,
    )?);
    Ok(pool)
}

/// Re-checks one slot against the current table state and maps any hit
/// to a `ConflictDetected` error.
fn recheck_conflicts(
    conn: &mut SqliteConnection,
    slot: &WeeklySlot,
) -> Result<(), PersistenceError> {
    let pool: Vec<WeeklySlot> = weekly_conflict_pool(conn, slot)?;
    if let Some(existing) = find_conflict(slot, &pool)? {
        return Err(PersistenceError::ConflictDetected {
            with_id: existing.allocation_id().unwrap_or_default(),
            starts: existing.start_time.clone(),
            ends: existing.end_time.clone(),
        });
    }
    Ok(())
}

fn insert_slot(
    conn: &mut SqliteConnection,
    slot: &WeeklySlot,
) -> Result<ScheduleId, PersistenceError> {
    diesel::insert_into(schedules::table)
        .values((
            schedules::school_id.eq(slot.school.raw()),
            schedules::class_id.eq(slot.class.raw()),
            schedules::section_id.eq(slot.section.raw()),
            schedules::kind.eq(slot.kind.as_str()),
            schedules::subject_id.eq(slot.subject.map(|s| s.raw())),
            schedules::teacher_id.eq(slot.teacher.map(|t| t.raw())),
            schedules::day_of_week.eq(slot.day.as_str()),
            schedules::start_time.eq(&slot.start_time),
            schedules::end_time.eq(&slot.end_time),
            schedules::is_active.eq(i32::from(slot.is_active)),
        ))
        .execute(conn)?;

    Ok(ScheduleId::new(get_last_insert_rowid(conn)?))
}

/// Inserts a batch of weekly schedule rows, all-or-nothing.
///
/// Every slot is re-checked against the live tables inside one
/// immediate transaction before any row is written, so the checks see
/// only pre-batch state. A single request fanned out over several
/// sections shares a teacher and a window on purpose; the service has
/// already vetted the batch against itself, and letting later checks
/// see earlier inserts would reject exactly that fan-out. Any conflict
/// rolls the whole batch back.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `slots` - The expanded slots to insert, in submission order
///
/// # Returns
///
/// The new schedule IDs, in the order of `slots`.
///
/// # Errors
///
/// Returns `ConflictDetected` if a slot collides with a persisted row,
/// or a database error; in either case nothing is persisted.
pub fn insert_schedule_batch(
    conn: &mut SqliteConnection,
    slots: &[WeeklySlot],
) -> Result<Vec<ScheduleId>, PersistenceError> {
    info!("Inserting batch of {} schedule rows", slots.len());

    conn.immediate_transaction(|conn| {
        for slot in slots {
            recheck_conflicts(conn, slot)?;
        }

        let mut ids: Vec<ScheduleId> = Vec::with_capacity(slots.len());
        for slot in slots {
            ids.push(insert_slot(conn, slot)?);
        }
        Ok(ids)
    })
}

/// Updates a persisted weekly schedule row in place.
///
/// The row's own ID is excluded from the conflict re-check.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `slot` - The full post-merge slot, carrying its schedule ID
///
/// # Errors
///
/// Returns `RowIdMissing` if the slot has no ID, `ScheduleNotFound` if
/// the row no longer exists, or `ConflictDetected` on a collision.
pub fn update_schedule(
    conn: &mut SqliteConnection,
    slot: &WeeklySlot,
) -> Result<(), PersistenceError> {
    let schedule_id: ScheduleId = slot.schedule_id.ok_or(PersistenceError::RowIdMissing)?;

    debug!("Updating schedule ID: {}", schedule_id);

    conn.immediate_transaction(|conn| {
        recheck_conflicts(conn, slot)?;

        let affected: usize = diesel::update(schedules::table)
            .filter(schedules::schedule_id.eq(schedule_id.raw()))
            .set((
                schedules::class_id.eq(slot.class.raw()),
                schedules::section_id.eq(slot.section.raw()),
                schedules::kind.eq(slot.kind.as_str()),
                schedules::subject_id.eq(slot.subject.map(|s| s.raw())),
                schedules::teacher_id.eq(slot.teacher.map(|t| t.raw())),
                schedules::day_of_week.eq(slot.day.as_str()),
                schedules::start_time.eq(&slot.start_time),
                schedules::end_time.eq(&slot.end_time),
                schedules::is_active.eq(i32::from(slot.is_active)),
            ))
            .execute(conn)?;

        if affected == 0 {
            return Err(PersistenceError::ScheduleNotFound(schedule_id.raw()));
        }
        Ok(())
    })
}

/// Soft-deletes a weekly schedule row by clearing its active flag.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `schedule_id` - The row to deactivate
///
/// # Returns
///
/// * `Ok(true)` - The row was active and is now inactive
/// * `Ok(false)` - The row was already inactive
///
/// # Errors
///
/// Returns `ScheduleNotFound` if no row with the ID exists.
pub fn soft_delete_schedule(
    conn: &mut SqliteConnection,
    schedule_id: ScheduleId,
) -> Result<bool, PersistenceError> {
    info!("Soft-deleting schedule ID: {}", schedule_id);

    let affected: usize = diesel::update(schedules::table)
        .filter(schedules::schedule_id.eq(schedule_id.raw()))
        .filter(schedules::is_active.eq(1))
        .set(schedules::is_active.eq(0))
        .execute(conn)?;

    if affected == 1 {
        return Ok(true);
    }

    let exists: Option<i64> = schedules::table
        .filter(schedules::schedule_id.eq(schedule_id.raw()))
        .select(schedules::schedule_id)
        .first(conn)
        .optional()?;

    match exists {
        Some(_) => Ok(false),
        None => Err(PersistenceError::ScheduleNotFound(schedule_id.raw())),
    }
}
