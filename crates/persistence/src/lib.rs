// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Slate school scheduler.
//!
//! This crate provides Diesel/`SQLite` storage for weekly schedules,
//! exam schedules, and the reference data (schools, classes, sections,
//! subjects, teachers) the scheduling services validate against.
//!
//! ## Write discipline
//!
//! The service layer runs validation and conflict detection up front so
//! errors can name the blocking allocation. Between those reads and the
//! write, another request can commit. Every mutation that could create
//! a collision therefore re-runs the conflict check inside the same
//! immediate transaction that performs the write, and the exam
//! uniqueness rule is additionally backed by a UNIQUE index.
//!
//! ## Testing
//!
//! `new_in_memory()` hands out a unique shared in-memory database per
//! call via an atomic counter, so tests are isolated without any
//! time-based naming.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;

use slate_domain::{
    ClassId, DayOfWeek, ExamScheduleId, ExamSlot, ScheduleId, SchoolId, SectionId, SubjectId,
    TeacherId, WeeklySlot,
};

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::{ClassData, ExamFilter, Page, ScheduleFilter, SectionData, TeacherData};
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a `SQLite` connection.
///
/// All schedule, exam, and reference-data operations go through this
/// adapter; the server shares one instance behind a mutex.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// Each call receives a unique database instance via an atomic
    /// counter, ensuring deterministic test isolation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:memdb_slate_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError(String::from("Invalid database path"))
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;

        // WAL for better read concurrency on file databases
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Reference data
    // ========================================================================

    /// Creates a school.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_school(&mut self, name: &str) -> Result<SchoolId, PersistenceError> {
        mutations::refdata::create_school(&mut self.conn, name)
    }

    /// Creates a class in a school.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_class(
        &mut self,
        school: SchoolId,
        name: &str,
    ) -> Result<ClassId, PersistenceError> {
        mutations::refdata::create_class(&mut self.conn, school, name)
    }

    /// Creates a section of a class.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_section(
        &mut self,
        class: ClassId,
        name: &str,
    ) -> Result<SectionId, PersistenceError> {
        mutations::refdata::create_section(&mut self.conn, class, name)
    }

    /// Creates a subject in a school.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_subject(
        &mut self,
        school: SchoolId,
        name: &str,
    ) -> Result<SubjectId, PersistenceError> {
        mutations::refdata::create_subject(&mut self.conn, school, name)
    }

    /// Assigns a subject to a class section.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn assign_subject_to_section(
        &mut self,
        subject: SubjectId,
        section: SectionId,
    ) -> Result<(), PersistenceError> {
        mutations::refdata::assign_subject_to_section(&mut self.conn, subject, section)
    }

    /// Creates a teacher in a school.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_teacher(
        &mut self,
        school: SchoolId,
        name: &str,
    ) -> Result<TeacherId, PersistenceError> {
        mutations::refdata::create_teacher(&mut self.conn, school, name)
    }

    /// Retrieves a class in a school together with all of its sections.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn find_class_with_sections(
        &mut self,
        school: SchoolId,
        class: ClassId,
    ) -> Result<Option<ClassData>, PersistenceError> {
        queries::refdata::find_class_with_sections(&mut self.conn, school, class)
    }

    /// Checks that a subject exists in a school.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn subject_exists(
        &mut self,
        school: SchoolId,
        subject: SubjectId,
    ) -> Result<bool, PersistenceError> {
        queries::refdata::subject_exists(&mut self.conn, school, subject)
    }

    /// Checks that a subject is assigned to a class section.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn subject_assigned_to_section(
        &mut self,
        subject: SubjectId,
        section: SectionId,
    ) -> Result<bool, PersistenceError> {
        queries::refdata::subject_assigned_to_section(&mut self.conn, subject, section)
    }

    /// Retrieves a teacher in a school.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn find_teacher(
        &mut self,
        school: SchoolId,
        teacher: TeacherId,
    ) -> Result<Option<TeacherData>, PersistenceError> {
        queries::refdata::find_teacher(&mut self.conn, school, teacher)
    }

    // ========================================================================
    // Weekly schedules
    // ========================================================================

    /// Inserts a batch of weekly schedule rows, all-or-nothing.
    ///
    /// # Arguments
    ///
    /// * `slots` - The expanded slots to insert, in submission order
    ///
    /// # Returns
    ///
    /// The new schedule IDs, in the order of `slots`.
    ///
    /// # Errors
    ///
    /// Returns `ConflictDetected` if any slot collides with a persisted
    /// row; nothing is persisted in that case.
    pub fn insert_schedules(
        &mut self,
        slots: &[WeeklySlot],
    ) -> Result<Vec<ScheduleId>, PersistenceError> {
        mutations::schedules::insert_schedule_batch(&mut self.conn, slots)
    }

    /// Retrieves a schedule row by ID.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleNotFound` if no row with the ID exists.
    pub fn get_schedule(
        &mut self,
        schedule_id: ScheduleId,
    ) -> Result<WeeklySlot, PersistenceError> {
        queries::schedules::get_schedule(&mut self.conn, schedule_id)
    }

    /// Lists active schedule rows for a school, filtered and paginated.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_schedules(
        &mut self,
        school: SchoolId,
        filter: &ScheduleFilter,
        page: Page,
    ) -> Result<Vec<WeeklySlot>, PersistenceError> {
        queries::schedules::list_schedules(&mut self.conn, school, filter, page)
    }

    /// Retrieves the active schedule rows on a teacher's calendar for
    /// one day.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn active_slots_for_teacher_day(
        &mut self,
        school: SchoolId,
        teacher: TeacherId,
        day: DayOfWeek,
    ) -> Result<Vec<WeeklySlot>, PersistenceError> {
        queries::schedules::active_slots_for_teacher_day(&mut self.conn, school, teacher, day)
    }

    /// Retrieves the active schedule rows on a class section's calendar
    /// for one day.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn active_slots_for_class_section_day(
        &mut self,
        school: SchoolId,
        class: ClassId,
        section: SectionId,
        day: DayOfWeek,
    ) -> Result<Vec<WeeklySlot>, PersistenceError> {
        queries::schedules::active_slots_for_class_section_day(
            &mut self.conn,
            school,
            class,
            section,
            day,
        )
    }

    /// Updates a persisted weekly schedule row in place.
    ///
    /// # Errors
    ///
    /// Returns `RowIdMissing` if the slot has no ID, `ScheduleNotFound`
    /// if the row no longer exists, or `ConflictDetected` on a
    /// collision.
    pub fn update_schedule(&mut self, slot: &WeeklySlot) -> Result<(), PersistenceError> {
        mutations::schedules::update_schedule(&mut self.conn, slot)
    }

    /// Soft-deletes a weekly schedule row.
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
        &mut self,
        schedule_id: ScheduleId,
    ) -> Result<bool, PersistenceError> {
        mutations::schedules::soft_delete_schedule(&mut self.conn, schedule_id)
    }

    // ========================================================================
    // Exam schedules
    // ========================================================================

    /// Inserts one exam schedule row.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateExamSchedule` if the (class, section, subject,
    /// type, year) identity is taken, or `ConflictDetected` on a
    /// calendar collision.
    pub fn insert_exam_schedule(
        &mut self,
        slot: &ExamSlot,
    ) -> Result<ExamScheduleId, PersistenceError> {
        mutations::exams::insert_exam_schedule(&mut self.conn, slot)
    }

    /// Retrieves an exam schedule row by ID.
    ///
    /// # Errors
    ///
    /// Returns `ExamScheduleNotFound` if no row with the ID exists.
    pub fn get_exam_schedule(
        &mut self,
        exam_schedule_id: ExamScheduleId,
    ) -> Result<ExamSlot, PersistenceError> {
        queries::exams::get_exam_schedule(&mut self.conn, exam_schedule_id)
    }

    /// Lists exam schedule rows for a school, filtered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_exam_schedules(
        &mut self,
        school: SchoolId,
        filter: &ExamFilter,
    ) -> Result<Vec<ExamSlot>, PersistenceError> {
        queries::exams::list_exam_schedules(&mut self.conn, school, filter)
    }

    /// Retrieves the non-cancelled exam rows on a teacher's calendar
    /// for one date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn exam_slots_for_teacher_date(
        &mut self,
        school: SchoolId,
        teacher: TeacherId,
        date: Date,
    ) -> Result<Vec<ExamSlot>, PersistenceError> {
        queries::exams::exam_slots_for_teacher_date(&mut self.conn, school, teacher, date)
    }

    /// Retrieves the non-cancelled exam rows on a class section's
    /// calendar for one date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn exam_slots_for_class_section_date(
        &mut self,
        school: SchoolId,
        class: ClassId,
        section: SectionId,
        date: Date,
    ) -> Result<Vec<ExamSlot>, PersistenceError> {
        queries::exams::exam_slots_for_class_section_date(
            &mut self.conn,
            school,
            class,
            section,
            date,
        )
    }

    /// Probes for an existing exam row with the same
    /// (class, section, subject, type, year) identity.
    ///
    /// # Arguments
    ///
    /// * `candidate` - The exam slot whose identity is being looked up
    /// * `exclude` - A row ID to exclude (the row being updated, if any)
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn find_duplicate_exam(
        &mut self,
        candidate: &ExamSlot,
        exclude: Option<ExamScheduleId>,
    ) -> Result<Option<ExamScheduleId>, PersistenceError> {
        queries::exams::find_duplicate_exam(&mut self.conn, candidate, exclude)
    }

    /// Updates a persisted exam schedule row in place.
    ///
    /// # Errors
    ///
    /// Returns `RowIdMissing` if the slot has no ID,
    /// `ExamScheduleNotFound` if the row no longer exists,
    /// `DuplicateExamSchedule` or `ConflictDetected` on a collision.
    pub fn update_exam_schedule(&mut self, slot: &ExamSlot) -> Result<(), PersistenceError> {
        mutations::exams::update_exam_schedule(&mut self.conn, slot)
    }

    /// Hard-deletes an exam schedule row.
    ///
    /// # Errors
    ///
    /// Returns `ExamScheduleNotFound` if no row with the ID exists.
    pub fn delete_exam_schedule(
        &mut self,
        exam_schedule_id: ExamScheduleId,
    ) -> Result<(), PersistenceError> {
        mutations::exams::delete_exam_schedule(&mut self.conn, exam_schedule_id)
    }
}
