// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The weekly schedule service.
//!
//! Batch creation is all-or-nothing: referential validation fails fast
//! naming the first invalid request, every expanded candidate is
//! checked against the persisted calendars and against its batch
//! siblings, and only a fully clean batch is persisted - inside one
//! transaction at the persistence layer.

use std::str::FromStr;
use tracing::{debug, info};

use slate_domain::{
    ClassId, DayOfWeek, ScheduleId, SchoolId, SectionId, SlotKind, SubjectId, TeacherId,
    WeeklySlot,
};
use slate_engine::{ExpandedCandidate, find_conflict, find_sibling_conflict};
use slate_persistence::{Page, Persistence, ScheduleFilter};

use crate::error::{
    ApiError, translate_domain_error, translate_engine_error, translate_persistence_error,
};
use crate::request_response::{
    CreateSchedulesRequest, CreateSchedulesResponse, DeleteScheduleResponse,
    ListSchedulesRequest, ListSchedulesResponse, ScheduleInfo, UpdateScheduleRequest,
    UpdateScheduleResponse, WeeklyScheduleItem,
};

/// Validates one request item against reference data and expands it
/// into one candidate per target section.
fn expand_item(
    persistence: &mut Persistence,
    school: SchoolId,
    index: usize,
    item: &WeeklyScheduleItem,
) -> Result<Vec<ExpandedCandidate>, ApiError> {
    let day: DayOfWeek = DayOfWeek::from_str(&item.day).map_err(translate_domain_error)?;
    let kind: SlotKind = SlotKind::from_str(&item.kind).map_err(translate_domain_error)?;
    let class: ClassId = ClassId::new(item.class_id);

    let class_data = persistence
        .find_class_with_sections(school, class)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Class"),
            message: format!("Class {class} does not exist in school {school} (items[{index}])"),
        })?;

    if item.section_ids.is_empty() {
        return Err(ApiError::InvalidInput {
            field: format!("items[{index}].section_ids"),
            message: String::from("At least one section is required"),
        });
    }

    let sections: Vec<SectionId> = item.section_ids.iter().copied().map(SectionId::new).collect();
    for section in &sections {
        if !class_data.sections.iter().any(|s| s.section_id == *section) {
            return Err(ApiError::ResourceNotFound {
                resource_type: String::from("Section"),
                message: format!(
                    "Section {section} does not belong to class {class} (items[{index}])"
                ),
            });
        }
    }

    let subject: Option<SubjectId> = item.subject_id.map(SubjectId::new);
    let teacher: Option<TeacherId> = item.teacher_id.map(TeacherId::new);

    if kind == SlotKind::Subject {
        let subject_id: SubjectId = subject.ok_or_else(|| ApiError::InvalidInput {
            field: format!("items[{index}].subject_id"),
            message: String::from("Subject slots require a subject and a teacher"),
        })?;
        let teacher_id: TeacherId = teacher.ok_or_else(|| ApiError::InvalidInput {
            field: format!("items[{index}].teacher_id"),
            message: String::from("Subject slots require a subject and a teacher"),
        })?;

        if !persistence
            .subject_exists(school, subject_id)
            .map_err(translate_persistence_error)?
        {
            return Err(ApiError::ResourceNotFound {
                resource_type: String::from("Subject"),
                message: format!(
                    "Subject {subject_id} does not exist in school {school} (items[{index}])"
                ),
            });
        }
        if persistence
            .find_teacher(school, teacher_id)
            .map_err(translate_persistence_error)?
            .is_none()
        {
            return Err(ApiError::ResourceNotFound {
                resource_type: String::from("Teacher"),
                message: format!(
                    "Teacher {teacher_id} does not exist in school {school} (items[{index}])"
                ),
            });
        }
    }

    let mut candidates: Vec<ExpandedCandidate> = Vec::with_capacity(sections.len());
    for section in sections {
        let slot: WeeklySlot = WeeklySlot::new(
            school,
            class,
            section,
            kind,
            subject,
            teacher,
            day,
            item.start_time.clone(),
            item.end_time.clone(),
        );
        slot.validate().map_err(translate_domain_error)?;
        candidates.push(ExpandedCandidate::new(index, slot));
    }

    Ok(candidates)
}

/// Describes a blocking weekly allocation for a conflict error.
fn conflict_with(existing: &WeeklySlot) -> ApiError {
    let with_id: Option<i64> = existing.schedule_id.map(ScheduleId::raw);
    let who: String = existing.teacher.map_or_else(
        || format!("class {} section {}", existing.class, existing.section),
        |teacher| format!("teacher {teacher}"),
    );
    ApiError::Conflict {
        with_id,
        starts: existing.start_time.clone(),
        ends: existing.end_time.clone(),
        message: format!(
            "Conflicts with the schedule of {who} on {} from {} to {}",
            existing.day.as_str(),
            existing.start_time,
            existing.end_time
        ),
    }
}

/// Checks one candidate against the persisted calendars it touches.
fn check_against_persisted(
    persistence: &mut Persistence,
    slot: &WeeklySlot,
) -> Result<(), ApiError> {
    let mut pool: Vec<WeeklySlot> = Vec::new();
    if let Some(teacher) = slot.teacher {
        pool.extend(
            persistence
                .active_slots_for_teacher_day(slot.school, teacher, slot.day)
                .map_err(translate_persistence_error)?,
        );
    }
    pool.extend(
        persistence
            .active_slots_for_class_section_day(slot.school, slot.class, slot.section, slot.day)
            .map_err(translate_persistence_error)?,
    );

    if let Some(existing) = find_conflict(slot, &pool).map_err(translate_engine_error)? {
        return Err(conflict_with(existing));
    }
    Ok(())
}

/// Creates a batch of weekly schedules, all-or-nothing.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The batch request
///
/// # Returns
///
/// The new schedule IDs, one per expanded (request, section) pair.
///
/// # Errors
///
/// Returns the first validation or conflict error; in that case nothing
/// is persisted.
pub fn create_schedules(
    persistence: &mut Persistence,
    request: &CreateSchedulesRequest,
) -> Result<CreateSchedulesResponse, ApiError> {
    if request.items.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("items"),
            message: String::from("At least one schedule item is required"),
        });
    }

    let school: SchoolId = SchoolId::new(request.school_id);
    info!(
        school = %school,
        items = request.items.len(),
        "Creating weekly schedule batch"
    );

    let mut candidates: Vec<ExpandedCandidate> = Vec::new();
    for (index, item) in request.items.iter().enumerate() {
        candidates.extend(expand_item(persistence, school, index, item)?);
    }

    for candidate in &candidates {
        check_against_persisted(persistence, &candidate.slot)?;
    }

    if let Some((first, second)) =
        find_sibling_conflict(&candidates).map_err(translate_engine_error)?
    {
        return Err(ApiError::Conflict {
            with_id: None,
            starts: second.slot.start_time.clone(),
            ends: second.slot.end_time.clone(),
            message: format!(
                "Request items[{}] and items[{}] conflict with each other on {} from {} to {}",
                first.request_index,
                second.request_index,
                second.slot.day.as_str(),
                second.slot.start_time,
                second.slot.end_time
            ),
        });
    }

    let slots: Vec<WeeklySlot> = candidates.into_iter().map(|c| c.slot).collect();
    let ids: Vec<ScheduleId> = persistence
        .insert_schedules(&slots)
        .map_err(translate_persistence_error)?;

    Ok(CreateSchedulesResponse {
        schedule_ids: ids.iter().map(|id| id.raw()).collect(),
        message: format!("Created {} schedule rows", ids.len()),
    })
}

/// Lists active weekly schedules with optional filters and pagination.
///
/// # Errors
///
/// Returns an error if a filter value is invalid or the query fails.
pub fn list_schedules(
    persistence: &mut Persistence,
    request: &ListSchedulesRequest,
) -> Result<ListSchedulesResponse, ApiError> {
    let day: Option<DayOfWeek> = match &request.day {
        Some(value) => Some(DayOfWeek::from_str(value).map_err(translate_domain_error)?),
        None => None,
    };

    let filter: ScheduleFilter = ScheduleFilter {
        class: request.class_id.map(ClassId::new),
        section: request.section_id.map(SectionId::new),
        teacher: request.teacher_id.map(TeacherId::new),
        day,
    };
    let default_page: Page = Page::default();
    let page: Page = Page {
        limit: request.limit.unwrap_or(default_page.limit),
        offset: request.offset.unwrap_or(default_page.offset),
    };

    let slots: Vec<WeeklySlot> = persistence
        .list_schedules(SchoolId::new(request.school_id), &filter, page)
        .map_err(translate_persistence_error)?;

    Ok(ListSchedulesResponse {
        schedules: slots.iter().map(ScheduleInfo::from_slot).collect(),
    })
}

/// Updates one weekly schedule row with a merge patch.
///
/// Changed references are re-validated and the merged row is re-checked
/// for conflicts with its own ID excluded, so an unchanged window never
/// conflicts with itself.
///
/// # Errors
///
/// Returns a not-found, validation, or conflict error; the stored row
/// is untouched in every error case.
pub fn update_schedule(
    persistence: &mut Persistence,
    schedule_id: i64,
    request: &UpdateScheduleRequest,
) -> Result<UpdateScheduleResponse, ApiError> {
    let existing: WeeklySlot = persistence
        .get_schedule(ScheduleId::new(schedule_id))
        .map_err(translate_persistence_error)?;

    let school: SchoolId = SchoolId::new(request.school_id);
    if existing.school != school {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Schedule"),
            message: format!("Schedule {schedule_id} does not exist in school {school}"),
        });
    }

    debug!(schedule_id, "Updating weekly schedule");

    let mut merged: WeeklySlot = existing.clone();
    if let Some(class_id) = request.class_id {
        merged.class = ClassId::new(class_id);
    }
    if let Some(section_id) = request.section_id {
        merged.section = SectionId::new(section_id);
    }
    if let Some(subject_id) = request.subject_id {
        merged.subject = Some(SubjectId::new(subject_id));
    }
    if let Some(teacher_id) = request.teacher_id {
        merged.teacher = Some(TeacherId::new(teacher_id));
    }
    if let Some(day) = &request.day {
        merged.day = DayOfWeek::from_str(day).map_err(translate_domain_error)?;
    }
    if let Some(start_time) = &request.start_time {
        merged.start_time = start_time.clone();
    }
    if let Some(end_time) = &request.end_time {
        merged.end_time = end_time.clone();
    }

    if merged.class != existing.class || merged.section != existing.section {
        let class_data = persistence
            .find_class_with_sections(school, merged.class)
            .map_err(translate_persistence_error)?
            .ok_or_else(|| ApiError::ResourceNotFound {
                resource_type: String::from("Class"),
                message: format!(
                    "Class {} does not exist in school {school}",
                    merged.class
                ),
            })?;
        if !class_data
            .sections
            .iter()
            .any(|s| s.section_id == merged.section)
        {
            return Err(ApiError::ResourceNotFound {
                resource_type: String::from("Section"),
                message: format!(
                    "Section {} does not belong to class {}",
                    merged.section, merged.class
                ),
            });
        }
    }
    if merged.subject != existing.subject
        && let Some(subject_id) = merged.subject
        && !persistence
            .subject_exists(school, subject_id)
            .map_err(translate_persistence_error)?
    {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Subject"),
            message: format!("Subject {subject_id} does not exist in school {school}"),
        });
    }
    if merged.teacher != existing.teacher
        && let Some(teacher_id) = merged.teacher
        && persistence
            .find_teacher(school, teacher_id)
            .map_err(translate_persistence_error)?
            .is_none()
    {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Teacher"),
            message: format!("Teacher {teacher_id} does not exist in school {school}"),
        });
    }

    merged.validate().map_err(translate_domain_error)?;
    check_against_persisted(persistence, &merged)?;

    persistence
        .update_schedule(&merged)
        .map_err(translate_persistence_error)?;

    Ok(UpdateScheduleResponse {
        schedule: ScheduleInfo::from_slot(&merged),
        message: format!("Updated schedule {schedule_id}"),
    })
}

/// Soft-deletes one weekly schedule row within a school.
///
/// Deleting an already-inactive row succeeds and reports it; only a
/// missing row is an error. A row belonging to another school is
/// reported as missing, not as forbidden.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no row with the ID exists in the
/// school.
pub fn delete_schedule(
    persistence: &mut Persistence,
    school_id: i64,
    schedule_id: i64,
) -> Result<DeleteScheduleResponse, ApiError> {
    let existing: WeeklySlot = persistence
        .get_schedule(ScheduleId::new(schedule_id))
        .map_err(translate_persistence_error)?;

    let school: SchoolId = SchoolId::new(school_id);
    if existing.school != school {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Schedule"),
            message: format!("Schedule {schedule_id} does not exist in school {school}"),
        });
    }

    let deactivated: bool = persistence
        .soft_delete_schedule(ScheduleId::new(schedule_id))
        .map_err(translate_persistence_error)?;

    let message: String = if deactivated {
        info!(schedule_id, "Soft-deleted weekly schedule");
        format!("Deleted schedule {schedule_id}")
    } else {
        format!("Schedule {schedule_id} was already inactive")
    };

    Ok(DeleteScheduleResponse {
        schedule_id,
        already_inactive: !deactivated,
        message,
    })
}
