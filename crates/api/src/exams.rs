// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The exam schedule service.
//!
//! Exam batches are partial-success: each item is validated, checked
//! and persisted independently, and the response pairs the created
//! rows with the failures by request index. Every persisted lifecycle
//! event raises a fire-and-forget notice through the sink.

use std::str::FromStr;
use tracing::{debug, info};

use slate_domain::{
    Allocation, ClassId, ExamScheduleId, ExamSlot, ExamStatus, ExamType, SchoolId, SectionId,
    SubjectId, TeacherId, parse_iso_date,
};
use slate_engine::find_conflict;
use slate_persistence::{ExamFilter, Persistence};

use crate::error::{
    ApiError, translate_domain_error, translate_engine_error, translate_persistence_error,
};
use crate::notify::{Notice, NoticeKind, NotificationSink, dispatch};
use crate::request_response::{
    CreateExamSchedulesRequest, CreateExamSchedulesResponse, DeleteExamScheduleResponse,
    ExamInfo, ExamItemError, ExamScheduleItem, ListExamSchedulesRequest,
    ListExamSchedulesResponse, UpdateExamScheduleRequest, UpdateExamScheduleResponse,
};

/// Checks that the references an exam slot carries exist and belong
/// together within the school.
fn check_exam_references(persistence: &mut Persistence, slot: &ExamSlot) -> Result<(), ApiError> {
    let class_data = persistence
        .find_class_with_sections(slot.school, slot.class)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Class"),
            message: format!(
                "Class {} does not exist in school {}",
                slot.class, slot.school
            ),
        })?;

    if !class_data
        .sections
        .iter()
        .any(|s| s.section_id == slot.section)
    {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Section"),
            message: format!(
                "Section {} does not belong to class {}",
                slot.section, slot.class
            ),
        });
    }

    if !persistence
        .subject_exists(slot.school, slot.subject)
        .map_err(translate_persistence_error)?
    {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Subject"),
            message: format!(
                "Subject {} does not exist in school {}",
                slot.subject, slot.school
            ),
        });
    }
    if !persistence
        .subject_assigned_to_section(slot.subject, slot.section)
        .map_err(translate_persistence_error)?
    {
        return Err(ApiError::InvalidInput {
            field: String::from("subject_id"),
            message: format!(
                "Subject {} is not assigned to section {}",
                slot.subject, slot.section
            ),
        });
    }
    if persistence
        .find_teacher(slot.school, slot.teacher)
        .map_err(translate_persistence_error)?
        .is_none()
    {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Teacher"),
            message: format!(
                "Teacher {} does not exist in school {}",
                slot.teacher, slot.school
            ),
        });
    }

    Ok(())
}

/// Checks the (class, section, subject, type, year) identity.
///
/// Cancelled rows keep their identity until they are removed, so the
/// lookup is not filtered by status. `exclude` keeps a persisted row out
/// of its own check during an update.
fn check_exam_identity(
    persistence: &mut Persistence,
    slot: &ExamSlot,
    exclude: Option<ExamScheduleId>,
) -> Result<(), ApiError> {
    if let Some(existing_id) = persistence
        .find_duplicate_exam(slot, exclude)
        .map_err(translate_persistence_error)?
    {
        return Err(ApiError::DuplicateSubject {
            existing_id: existing_id.raw(),
            message: format!(
                "A {} exam for subject {} in class {} section {} year {} already exists (id {existing_id})",
                slot.exam_type.as_str(),
                slot.subject,
                slot.class,
                slot.section,
                slot.year
            ),
        });
    }

    Ok(())
}

/// Checks the teacher and class-section calendars for the exam's date.
fn check_exam_window(persistence: &mut Persistence, slot: &ExamSlot) -> Result<(), ApiError> {
    let mut pool: Vec<ExamSlot> = persistence
        .exam_slots_for_teacher_date(slot.school, slot.teacher, slot.exam_date)
        .map_err(translate_persistence_error)?;
    pool.extend(
        persistence
            .exam_slots_for_class_section_date(slot.school, slot.class, slot.section, slot.exam_date)
            .map_err(translate_persistence_error)?,
    );

    if let Some(existing) = find_conflict(slot, &pool).map_err(translate_engine_error)? {
        let with_id: Option<i64> = existing.exam_schedule_id.map(ExamScheduleId::raw);
        return Err(ApiError::Conflict {
            with_id,
            starts: existing.start_time.clone(),
            ends: existing.end_time.clone(),
            message: format!(
                "Conflicts with the {} exam of teacher {} on {} from {} to {}",
                existing.exam_type.as_str(),
                existing.teacher,
                existing.exam_date,
                existing.start_time,
                existing.end_time
            ),
        });
    }

    Ok(())
}

/// Builds, validates, checks and persists one exam item.
fn create_one_exam(
    persistence: &mut Persistence,
    school: SchoolId,
    exam_type: ExamType,
    year: u16,
    item: &ExamScheduleItem,
) -> Result<ExamSlot, ApiError> {
    let exam_date = parse_iso_date(&item.exam_date).map_err(translate_domain_error)?;

    let mut slot: ExamSlot = ExamSlot::new(
        school,
        ClassId::new(item.class_id),
        SectionId::new(item.section_id),
        SubjectId::new(item.subject_id),
        TeacherId::new(item.teacher_id),
        exam_type,
        year,
        exam_date,
        item.start_time.clone(),
        item.end_time.clone(),
    );
    slot.validate().map_err(translate_domain_error)?;

    check_exam_references(persistence, &slot)?;
    check_exam_identity(persistence, &slot, None)?;
    check_exam_window(persistence, &slot)?;

    let id: ExamScheduleId = persistence
        .insert_exam_schedule(&slot)
        .map_err(translate_persistence_error)?;
    slot.exam_schedule_id = Some(id);

    Ok(slot)
}

/// Creates a batch of exam schedules with per-item outcomes.
///
/// Items are processed in order; an earlier item that persisted stays
/// persisted even when a later one fails. Only a batch-level problem
/// (an unknown exam type, an empty batch) fails the whole request.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `sink` - The notification channel for created exams
/// * `request` - The batch request
///
/// # Returns
///
/// The created rows and the per-item failures.
///
/// # Errors
///
/// Returns `InvalidInput` when the batch itself is malformed.
pub fn create_exam_schedules(
    persistence: &mut Persistence,
    sink: &dyn NotificationSink,
    request: &CreateExamSchedulesRequest,
) -> Result<CreateExamSchedulesResponse, ApiError> {
    if request.items.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("items"),
            message: String::from("At least one exam item is required"),
        });
    }
    let exam_type: ExamType =
        ExamType::from_str(&request.exam_type).map_err(translate_domain_error)?;
    let school: SchoolId = SchoolId::new(request.school_id);

    info!(
        school = %school,
        exam_type = exam_type.as_str(),
        year = request.year,
        items = request.items.len(),
        "Creating exam schedule batch"
    );

    let mut created: Vec<ExamInfo> = Vec::new();
    let mut errors: Vec<ExamItemError> = Vec::new();
    for (index, item) in request.items.iter().enumerate() {
        match create_one_exam(persistence, school, exam_type, request.year, item) {
            Ok(slot) => {
                dispatch(
                    sink,
                    &Notice {
                        kind: NoticeKind::ExamCreated,
                        message: format!(
                            "A {} exam for subject {} has been scheduled on {} from {} to {}",
                            slot.exam_type.as_str(),
                            slot.subject,
                            slot.exam_date,
                            slot.start_time,
                            slot.end_time
                        ),
                        exam: slot.clone(),
                    },
                );
                created.push(ExamInfo::from_slot(&slot));
            }
            Err(e) => errors.push(ExamItemError {
                index,
                message: e.to_string(),
            }),
        }
    }

    Ok(CreateExamSchedulesResponse { created, errors })
}

/// Lists exam schedules with optional filters.
///
/// # Errors
///
/// Returns an error if a filter value is invalid or the query fails.
pub fn list_exam_schedules(
    persistence: &mut Persistence,
    request: &ListExamSchedulesRequest,
) -> Result<ListExamSchedulesResponse, ApiError> {
    let exam_type: Option<ExamType> = match &request.exam_type {
        Some(value) => Some(ExamType::from_str(value).map_err(translate_domain_error)?),
        None => None,
    };

    let filter: ExamFilter = ExamFilter {
        class: request.class_id.map(ClassId::new),
        section: request.section_id.map(SectionId::new),
        teacher: request.teacher_id.map(TeacherId::new),
        subject: request.subject_id.map(SubjectId::new),
        exam_type,
        year: request.year,
    };

    let slots: Vec<ExamSlot> = persistence
        .list_exam_schedules(SchoolId::new(request.school_id), &filter)
        .map_err(translate_persistence_error)?;

    Ok(ListExamSchedulesResponse {
        exams: slots.iter().map(ExamInfo::from_slot).collect(),
    })
}

/// Updates one exam schedule row with a merge patch.
///
/// Time, date, assignment, type, year and status changes all flow
/// through the same path: the merged row is validated and re-checked
/// for duplicates and conflicts with its own ID excluded, so changing
/// the type or year moves the row to a new uniqueness identity. A status change must follow the
/// lifecycle (`scheduled` to `ongoing` to `completed`, with `cancelled`
/// reachable from any non-terminal state). A cancelled exam stops
/// occupying its calendars, so no conflict check applies to it.
///
/// # Errors
///
/// Returns a not-found, validation, duplicate, or conflict error; the
/// stored row is untouched in every error case.
#[allow(clippy::too_many_lines)]
pub fn update_exam_schedule(
    persistence: &mut Persistence,
    sink: &dyn NotificationSink,
    exam_schedule_id: i64,
    request: &UpdateExamScheduleRequest,
) -> Result<UpdateExamScheduleResponse, ApiError> {
    let id: ExamScheduleId = ExamScheduleId::new(exam_schedule_id);
    let existing: ExamSlot = persistence
        .get_exam_schedule(id)
        .map_err(translate_persistence_error)?;

    let school: SchoolId = SchoolId::new(request.school_id);
    if existing.school != school {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Exam schedule"),
            message: format!("Exam schedule {exam_schedule_id} does not exist in school {school}"),
        });
    }

    debug!(exam_schedule_id, "Updating exam schedule");

    let mut merged: ExamSlot = existing.clone();
    let mut changes: Vec<String> = Vec::new();

    if let Some(class_id) = request.class_id {
        merged.class = ClassId::new(class_id);
    }
    if let Some(section_id) = request.section_id {
        merged.section = SectionId::new(section_id);
    }
    if let Some(subject_id) = request.subject_id {
        merged.subject = SubjectId::new(subject_id);
    }
    if let Some(teacher_id) = request.teacher_id {
        merged.teacher = TeacherId::new(teacher_id);
    }
    if let Some(exam_type) = &request.exam_type {
        merged.exam_type = ExamType::from_str(exam_type).map_err(translate_domain_error)?;
    }
    if let Some(year) = request.year {
        merged.year = year;
    }
    if let Some(exam_date) = &request.exam_date {
        merged.exam_date = parse_iso_date(exam_date).map_err(translate_domain_error)?;
    }
    if let Some(start_time) = &request.start_time {
        merged.start_time = start_time.clone();
    }
    if let Some(end_time) = &request.end_time {
        merged.end_time = end_time.clone();
    }
    if let Some(status) = &request.status {
        let target: ExamStatus = ExamStatus::from_str(status).map_err(translate_domain_error)?;
        if target != existing.status {
            if !existing.status.can_transition_to(target) {
                return Err(translate_domain_error(
                    slate_domain::DomainError::InvalidStatusTransition {
                        from: existing.status,
                        to: target,
                    },
                ));
            }
            merged.status = target;
        }
    }

    if merged.class != existing.class
        || merged.section != existing.section
        || merged.subject != existing.subject
        || merged.teacher != existing.teacher
    {
        check_exam_references(persistence, &merged)?;
    }

    merged.validate().map_err(translate_domain_error)?;
    check_exam_identity(persistence, &merged, Some(id))?;
    if merged.in_force() {
        check_exam_window(persistence, &merged)?;
    }

    if merged.class != existing.class {
        changes.push(format!(
            "class changed from {} to {}",
            existing.class, merged.class
        ));
    }
    if merged.section != existing.section {
        changes.push(format!(
            "section changed from {} to {}",
            existing.section, merged.section
        ));
    }
    if merged.subject != existing.subject {
        changes.push(format!(
            "subject changed from {} to {}",
            existing.subject, merged.subject
        ));
    }
    if merged.teacher != existing.teacher {
        changes.push(format!(
            "teacher changed from {} to {}",
            existing.teacher, merged.teacher
        ));
    }
    if merged.exam_type != existing.exam_type {
        changes.push(format!(
            "type changed from {} to {}",
            existing.exam_type.as_str(),
            merged.exam_type.as_str()
        ));
    }
    if merged.year != existing.year {
        changes.push(format!(
            "year changed from {} to {}",
            existing.year, merged.year
        ));
    }
    if merged.exam_date != existing.exam_date {
        changes.push(format!(
            "date changed from {} to {}",
            existing.exam_date, merged.exam_date
        ));
    }
    if merged.start_time != existing.start_time || merged.end_time != existing.end_time {
        changes.push(format!(
            "time changed from {}-{} to {}-{}",
            existing.start_time, existing.end_time, merged.start_time, merged.end_time
        ));
    }
    if merged.status != existing.status {
        changes.push(format!(
            "status changed from {} to {}",
            existing.status.as_str(),
            merged.status.as_str()
        ));
    }

    if changes.is_empty() {
        return Ok(UpdateExamScheduleResponse {
            exam: ExamInfo::from_slot(&merged),
            changes,
            message: format!("Exam schedule {exam_schedule_id} is unchanged"),
        });
    }

    persistence
        .update_exam_schedule(&merged)
        .map_err(translate_persistence_error)?;

    dispatch(
        sink,
        &Notice {
            kind: NoticeKind::ExamUpdated,
            message: format!(
                "The {} exam for subject {} on {} has been updated: {}",
                merged.exam_type.as_str(),
                merged.subject,
                merged.exam_date,
                changes.join(", ")
            ),
            exam: merged.clone(),
        },
    );

    Ok(UpdateExamScheduleResponse {
        exam: ExamInfo::from_slot(&merged),
        changes,
        message: format!("Updated exam schedule {exam_schedule_id}"),
    })
}

/// Deletes one exam schedule row within a school and notifies affected
/// parties.
///
/// The notice is built from the row as it stood before removal; its
/// delivery outcome never affects the delete. A row belonging to
/// another school is reported as missing, not as forbidden.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no row with the ID exists in the
/// school.
pub fn delete_exam_schedule(
    persistence: &mut Persistence,
    sink: &dyn NotificationSink,
    school_id: i64,
    exam_schedule_id: i64,
) -> Result<DeleteExamScheduleResponse, ApiError> {
    let id: ExamScheduleId = ExamScheduleId::new(exam_schedule_id);
    let existing: ExamSlot = persistence
        .get_exam_schedule(id)
        .map_err(translate_persistence_error)?;

    let school: SchoolId = SchoolId::new(school_id);
    if existing.school != school {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Exam schedule"),
            message: format!("Exam schedule {exam_schedule_id} does not exist in school {school}"),
        });
    }

    dispatch(
        sink,
        &Notice {
            kind: NoticeKind::ExamCancelled,
            message: format!(
                "The {} exam for subject {} on {} from {} to {} has been cancelled",
                existing.exam_type.as_str(),
                existing.subject,
                existing.exam_date,
                existing.start_time,
                existing.end_time
            ),
            exam: existing,
        },
    );

    persistence
        .delete_exam_schedule(id)
        .map_err(translate_persistence_error)?;
    info!(exam_schedule_id, "Deleted exam schedule");

    Ok(DeleteExamScheduleResponse {
        exam_schedule_id,
        message: format!("Deleted exam schedule {exam_schedule_id}"),
    })
}
