// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the exam schedule service.

use crate::error::ApiError;
use crate::exams::{
    create_exam_schedules, delete_exam_schedule, list_exam_schedules, update_exam_schedule,
};
use crate::notify::NoticeKind;
use crate::request_response::{
    CreateExamSchedulesRequest, CreateExamSchedulesResponse, ExamScheduleItem,
    ListExamSchedulesRequest, ListExamSchedulesResponse, UpdateExamScheduleRequest,
    UpdateExamScheduleResponse,
};
use crate::tests::helpers::{FailingSink, Fixture, RecordingSink, exam_item, fixture};

fn midterm_request(fix: &Fixture, items: Vec<ExamScheduleItem>) -> CreateExamSchedulesRequest {
    CreateExamSchedulesRequest {
        school_id: fix.school.raw(),
        exam_type: String::from("midterm"),
        year: 2026,
        items,
    }
}

fn list_request(fix: &Fixture) -> ListExamSchedulesRequest {
    ListExamSchedulesRequest {
        school_id: fix.school.raw(),
        ..ListExamSchedulesRequest::default()
    }
}

#[test]
fn test_create_batch_reports_per_item_outcomes() {
    let mut fix: Fixture = fixture();
    let sink: RecordingSink = RecordingSink::default();

    // Three clean items and one whose teacher is double-booked.
    let request: CreateExamSchedulesRequest = midterm_request(
        &fix,
        vec![
            exam_item(&fix, fix.math, fix.section_a, "2026-03-02", "09:00", "11:00"),
            exam_item(&fix, fix.science, fix.section_a, "2026-03-03", "09:00", "11:00"),
            exam_item(&fix, fix.math, fix.section_b, "2026-03-04", "09:00", "11:00"),
            exam_item(&fix, fix.science, fix.section_b, "2026-03-02", "10:00", "12:00"),
        ],
    );

    let response: CreateExamSchedulesResponse =
        create_exam_schedules(&mut fix.persistence, &sink, &request)
            .expect("batch should succeed");
    assert_eq!(response.created.len(), 3);
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].index, 3);

    let listing: ListExamSchedulesRequest = list_request(&fix);
    let listed: ListExamSchedulesResponse =
        list_exam_schedules(&mut fix.persistence, &listing).expect("list should succeed");
    assert_eq!(listed.exams.len(), 3, "the clean items stay persisted");

    let notices = sink.notices.borrow();
    assert_eq!(notices.len(), 3);
    assert!(notices.iter().all(|n| n.kind == NoticeKind::ExamCreated));
}

#[test]
fn test_create_rejects_duplicate_identity_within_batch() {
    let mut fix: Fixture = fixture();
    let sink: RecordingSink = RecordingSink::default();

    // Same (class, section, subject, type, year) on different dates.
    let request: CreateExamSchedulesRequest = midterm_request(
        &fix,
        vec![
            exam_item(&fix, fix.math, fix.section_a, "2026-03-02", "09:00", "11:00"),
            exam_item(&fix, fix.math, fix.section_a, "2026-03-09", "09:00", "11:00"),
        ],
    );

    let response: CreateExamSchedulesResponse =
        create_exam_schedules(&mut fix.persistence, &sink, &request)
            .expect("batch should succeed");
    assert_eq!(response.created.len(), 1);
    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].message.contains("already exists"));
}

#[test]
fn test_create_rejects_unknown_exam_type_for_whole_batch() {
    let mut fix: Fixture = fixture();
    let sink: RecordingSink = RecordingSink::default();

    let request: CreateExamSchedulesRequest = CreateExamSchedulesRequest {
        school_id: fix.school.raw(),
        exam_type: String::from("pop-quiz"),
        year: 2026,
        items: vec![exam_item(&fix, fix.math, fix.section_a, "2026-03-02", "09:00", "11:00")],
    };

    let error: ApiError = create_exam_schedules(&mut fix.persistence, &sink, &request)
        .expect_err("unknown exam type should fail the batch");
    assert!(matches!(
        error,
        ApiError::InvalidInput { ref field, .. } if field == "exam_type"
    ));
    assert!(sink.notices.borrow().is_empty());
}

#[test]
fn test_create_survives_failing_sink() {
    let mut fix: Fixture = fixture();

    let request: CreateExamSchedulesRequest = midterm_request(
        &fix,
        vec![exam_item(&fix, fix.math, fix.section_a, "2026-03-02", "09:00", "11:00")],
    );

    let response: CreateExamSchedulesResponse =
        create_exam_schedules(&mut fix.persistence, &FailingSink, &request)
            .expect("delivery failures must not fail the operation");
    assert_eq!(response.created.len(), 1);
    assert!(response.errors.is_empty());
}

#[test]
fn test_list_filters_by_subject() {
    let mut fix: Fixture = fixture();
    let sink: RecordingSink = RecordingSink::default();
    let request: CreateExamSchedulesRequest = midterm_request(
        &fix,
        vec![
            exam_item(&fix, fix.math, fix.section_a, "2026-03-02", "09:00", "11:00"),
            exam_item(&fix, fix.science, fix.section_a, "2026-03-03", "09:00", "11:00"),
        ],
    );
    create_exam_schedules(&mut fix.persistence, &sink, &request).expect("batch should succeed");

    let listing: ListExamSchedulesRequest = ListExamSchedulesRequest {
        school_id: fix.school.raw(),
        subject_id: Some(fix.science.raw()),
        ..ListExamSchedulesRequest::default()
    };
    let filtered: ListExamSchedulesResponse =
        list_exam_schedules(&mut fix.persistence, &listing).expect("list should succeed");
    assert_eq!(filtered.exams.len(), 1);
    assert_eq!(filtered.exams[0].subject_id, fix.science.raw());
}

#[test]
fn test_update_moves_exam_and_reports_changes() {
    let mut fix: Fixture = fixture();
    let sink: RecordingSink = RecordingSink::default();
    let request: CreateExamSchedulesRequest = midterm_request(
        &fix,
        vec![exam_item(&fix, fix.math, fix.section_a, "2026-03-02", "09:00", "11:00")],
    );
    let created: CreateExamSchedulesResponse =
        create_exam_schedules(&mut fix.persistence, &sink, &request)
            .expect("batch should succeed");
    let exam_id: i64 = created.created[0].exam_schedule_id;

    let patch: UpdateExamScheduleRequest = UpdateExamScheduleRequest {
        school_id: fix.school.raw(),
        exam_date: Some(String::from("2026-03-09")),
        start_time: Some(String::from("13:00")),
        end_time: Some(String::from("15:00")),
        ..UpdateExamScheduleRequest::default()
    };
    let updated: UpdateExamScheduleResponse =
        update_exam_schedule(&mut fix.persistence, &sink, exam_id, &patch)
            .expect("update should succeed");

    assert_eq!(updated.exam.exam_date, "2026-03-09");
    assert_eq!(updated.changes.len(), 2, "date and time changes reported");
    let notices = sink.notices.borrow();
    assert_eq!(notices.last().map(|n| n.kind), Some(NoticeKind::ExamUpdated));
}

#[test]
fn test_update_type_and_year_move_identity() {
    let mut fix: Fixture = fixture();
    let sink: RecordingSink = RecordingSink::default();
    let request: CreateExamSchedulesRequest = midterm_request(
        &fix,
        vec![exam_item(&fix, fix.math, fix.section_a, "2026-03-02", "09:00", "11:00")],
    );
    let created: CreateExamSchedulesResponse =
        create_exam_schedules(&mut fix.persistence, &sink, &request)
            .expect("batch should succeed");
    let exam_id: i64 = created.created[0].exam_schedule_id;

    let patch: UpdateExamScheduleRequest = UpdateExamScheduleRequest {
        school_id: fix.school.raw(),
        exam_type: Some(String::from("final")),
        year: Some(2027),
        ..UpdateExamScheduleRequest::default()
    };
    let updated: UpdateExamScheduleResponse =
        update_exam_schedule(&mut fix.persistence, &sink, exam_id, &patch)
            .expect("type and year change should succeed");
    assert_eq!(updated.exam.exam_type, "final");
    assert_eq!(updated.exam.year, 2027);
    assert_eq!(updated.changes.len(), 2, "type and year changes reported");

    // The old midterm identity is free again.
    let replacement: CreateExamSchedulesRequest = midterm_request(
        &fix,
        vec![exam_item(&fix, fix.math, fix.section_a, "2026-03-16", "09:00", "11:00")],
    );
    let response: CreateExamSchedulesResponse =
        create_exam_schedules(&mut fix.persistence, &sink, &replacement)
            .expect("batch should succeed");
    assert_eq!(response.created.len(), 1);
}

#[test]
fn test_update_type_into_taken_identity_rejected() {
    let mut fix: Fixture = fixture();
    let sink: RecordingSink = RecordingSink::default();
    let midterm: CreateExamSchedulesRequest = midterm_request(
        &fix,
        vec![exam_item(&fix, fix.math, fix.section_a, "2026-03-02", "09:00", "11:00")],
    );
    let first: CreateExamSchedulesResponse =
        create_exam_schedules(&mut fix.persistence, &sink, &midterm)
            .expect("batch should succeed");

    let mut final_exam: CreateExamSchedulesRequest = midterm_request(
        &fix,
        vec![exam_item(&fix, fix.math, fix.section_a, "2026-06-01", "09:00", "11:00")],
    );
    final_exam.exam_type = String::from("final");
    let second: CreateExamSchedulesResponse =
        create_exam_schedules(&mut fix.persistence, &sink, &final_exam)
            .expect("batch should succeed");

    let patch: UpdateExamScheduleRequest = UpdateExamScheduleRequest {
        school_id: fix.school.raw(),
        exam_type: Some(String::from("midterm")),
        ..UpdateExamScheduleRequest::default()
    };
    let error: ApiError = update_exam_schedule(
        &mut fix.persistence,
        &sink,
        second.created[0].exam_schedule_id,
        &patch,
    )
    .expect_err("moving onto a taken identity should be rejected");

    let ApiError::DuplicateSubject { existing_id, .. } = error else {
        panic!("expected a duplicate subject error");
    };
    assert_eq!(existing_id, first.created[0].exam_schedule_id);
}

#[test]
fn test_update_without_changes_sends_no_notice() {
    let mut fix: Fixture = fixture();
    let sink: RecordingSink = RecordingSink::default();
    let request: CreateExamSchedulesRequest = midterm_request(
        &fix,
        vec![exam_item(&fix, fix.math, fix.section_a, "2026-03-02", "09:00", "11:00")],
    );
    let created: CreateExamSchedulesResponse =
        create_exam_schedules(&mut fix.persistence, &sink, &request)
            .expect("batch should succeed");
    let before: usize = sink.notices.borrow().len();

    let patch: UpdateExamScheduleRequest = UpdateExamScheduleRequest {
        school_id: fix.school.raw(),
        ..UpdateExamScheduleRequest::default()
    };
    let updated: UpdateExamScheduleResponse = update_exam_schedule(
        &mut fix.persistence,
        &sink,
        created.created[0].exam_schedule_id,
        &patch,
    )
    .expect("empty patch should succeed");

    assert!(updated.changes.is_empty());
    assert_eq!(sink.notices.borrow().len(), before);
}

#[test]
fn test_update_into_duplicate_rejected() {
    let mut fix: Fixture = fixture();
    let sink: RecordingSink = RecordingSink::default();
    let request: CreateExamSchedulesRequest = midterm_request(
        &fix,
        vec![
            exam_item(&fix, fix.math, fix.section_a, "2026-03-02", "09:00", "11:00"),
            exam_item(&fix, fix.science, fix.section_a, "2026-03-03", "09:00", "11:00"),
        ],
    );
    let created: CreateExamSchedulesResponse =
        create_exam_schedules(&mut fix.persistence, &sink, &request)
            .expect("batch should succeed");
    assert_eq!(created.created.len(), 2);

    let patch: UpdateExamScheduleRequest = UpdateExamScheduleRequest {
        school_id: fix.school.raw(),
        subject_id: Some(fix.math.raw()),
        ..UpdateExamScheduleRequest::default()
    };
    let error: ApiError = update_exam_schedule(
        &mut fix.persistence,
        &sink,
        created.created[1].exam_schedule_id,
        &patch,
    )
    .expect_err("identity collision should be rejected");

    let ApiError::DuplicateSubject { existing_id, .. } = error else {
        panic!("expected a duplicate subject error");
    };
    assert_eq!(existing_id, created.created[0].exam_schedule_id);
}

#[test]
fn test_status_follows_lifecycle() {
    let mut fix: Fixture = fixture();
    let sink: RecordingSink = RecordingSink::default();
    let request: CreateExamSchedulesRequest = midterm_request(
        &fix,
        vec![exam_item(&fix, fix.math, fix.section_a, "2026-03-02", "09:00", "11:00")],
    );
    let created: CreateExamSchedulesResponse =
        create_exam_schedules(&mut fix.persistence, &sink, &request)
            .expect("batch should succeed");
    let exam_id: i64 = created.created[0].exam_schedule_id;

    for status in ["ongoing", "completed"] {
        let patch: UpdateExamScheduleRequest = UpdateExamScheduleRequest {
            school_id: fix.school.raw(),
            status: Some(String::from(status)),
            ..UpdateExamScheduleRequest::default()
        };
        let updated: UpdateExamScheduleResponse =
            update_exam_schedule(&mut fix.persistence, &sink, exam_id, &patch)
                .expect("forward transition should succeed");
        assert_eq!(updated.exam.status, status);
    }

    let patch: UpdateExamScheduleRequest = UpdateExamScheduleRequest {
        school_id: fix.school.raw(),
        status: Some(String::from("scheduled")),
        ..UpdateExamScheduleRequest::default()
    };
    let error: ApiError = update_exam_schedule(&mut fix.persistence, &sink, exam_id, &patch)
        .expect_err("backward transition should be rejected");
    assert!(matches!(
        error,
        ApiError::InvalidInput { ref field, .. } if field == "status"
    ));
}

#[test]
fn test_cancelled_exam_frees_calendar() {
    let mut fix: Fixture = fixture();
    let sink: RecordingSink = RecordingSink::default();
    let request: CreateExamSchedulesRequest = midterm_request(
        &fix,
        vec![exam_item(&fix, fix.math, fix.section_a, "2026-03-02", "09:00", "11:00")],
    );
    let created: CreateExamSchedulesResponse =
        create_exam_schedules(&mut fix.persistence, &sink, &request)
            .expect("batch should succeed");

    let cancel: UpdateExamScheduleRequest = UpdateExamScheduleRequest {
        school_id: fix.school.raw(),
        status: Some(String::from("cancelled")),
        ..UpdateExamScheduleRequest::default()
    };
    update_exam_schedule(
        &mut fix.persistence,
        &sink,
        created.created[0].exam_schedule_id,
        &cancel,
    )
    .expect("cancellation should succeed");

    // Same teacher and window: only the identity rule still applies, so
    // use the other subject.
    let replacement: CreateExamSchedulesRequest = midterm_request(
        &fix,
        vec![exam_item(&fix, fix.science, fix.section_a, "2026-03-02", "09:00", "11:00")],
    );
    let response: CreateExamSchedulesResponse =
        create_exam_schedules(&mut fix.persistence, &sink, &replacement)
            .expect("batch should succeed");
    assert_eq!(response.created.len(), 1);
    assert!(response.errors.is_empty());
}

#[test]
fn test_cancelled_exam_can_be_edited_over_occupied_window() {
    let mut fix: Fixture = fixture();
    let sink: RecordingSink = RecordingSink::default();
    let request: CreateExamSchedulesRequest = midterm_request(
        &fix,
        vec![exam_item(&fix, fix.math, fix.section_a, "2026-03-02", "09:00", "11:00")],
    );
    let created: CreateExamSchedulesResponse =
        create_exam_schedules(&mut fix.persistence, &sink, &request)
            .expect("batch should succeed");
    let cancelled_id: i64 = created.created[0].exam_schedule_id;

    let cancel: UpdateExamScheduleRequest = UpdateExamScheduleRequest {
        school_id: fix.school.raw(),
        status: Some(String::from("cancelled")),
        ..UpdateExamScheduleRequest::default()
    };
    update_exam_schedule(&mut fix.persistence, &sink, cancelled_id, &cancel)
        .expect("cancellation should succeed");

    // A replacement now occupies the freed window.
    let replacement: CreateExamSchedulesRequest = midterm_request(
        &fix,
        vec![exam_item(&fix, fix.science, fix.section_a, "2026-03-02", "09:00", "11:00")],
    );
    create_exam_schedules(&mut fix.persistence, &sink, &replacement)
        .expect("batch should succeed");

    // Editing the cancelled row must not collide with the replacement:
    // it no longer occupies the calendar.
    let patch: UpdateExamScheduleRequest = UpdateExamScheduleRequest {
        school_id: fix.school.raw(),
        start_time: Some(String::from("09:30")),
        end_time: Some(String::from("11:30")),
        ..UpdateExamScheduleRequest::default()
    };
    let updated: UpdateExamScheduleResponse =
        update_exam_schedule(&mut fix.persistence, &sink, cancelled_id, &patch)
            .expect("editing a cancelled row should succeed");
    assert_eq!(updated.exam.start_time, "09:30");
}

#[test]
fn test_delete_notifies_and_frees_identity() {
    let mut fix: Fixture = fixture();
    let sink: RecordingSink = RecordingSink::default();
    let request: CreateExamSchedulesRequest = midterm_request(
        &fix,
        vec![exam_item(&fix, fix.math, fix.section_a, "2026-03-02", "09:00", "11:00")],
    );
    let created: CreateExamSchedulesResponse =
        create_exam_schedules(&mut fix.persistence, &sink, &request)
            .expect("batch should succeed");
    let exam_id: i64 = created.created[0].exam_schedule_id;

    delete_exam_schedule(&mut fix.persistence, &sink, fix.school.raw(), exam_id)
        .expect("delete should succeed");

    let notices = sink.notices.borrow();
    let last = notices.last().expect("a cancellation notice should exist");
    assert_eq!(last.kind, NoticeKind::ExamCancelled);
    assert_eq!(last.exam.exam_schedule_id.map(|id| id.raw()), Some(exam_id));
    drop(notices);

    let error: ApiError =
        delete_exam_schedule(&mut fix.persistence, &sink, fix.school.raw(), exam_id)
            .expect_err("repeat delete should be rejected");
    assert!(matches!(error, ApiError::ResourceNotFound { .. }));

    // The identity is free again.
    let replacement: CreateExamSchedulesRequest = midterm_request(
        &fix,
        vec![exam_item(&fix, fix.math, fix.section_a, "2026-03-16", "09:00", "11:00")],
    );
    let response: CreateExamSchedulesResponse =
        create_exam_schedules(&mut fix.persistence, &sink, &replacement)
            .expect("batch should succeed");
    assert_eq!(response.created.len(), 1);
}

#[test]
fn test_delete_scoped_to_school() {
    let mut fix: Fixture = fixture();
    let sink: RecordingSink = RecordingSink::default();
    let request: CreateExamSchedulesRequest = midterm_request(
        &fix,
        vec![exam_item(&fix, fix.math, fix.section_a, "2026-03-02", "09:00", "11:00")],
    );
    let created: CreateExamSchedulesResponse =
        create_exam_schedules(&mut fix.persistence, &sink, &request)
            .expect("batch should succeed");
    let exam_id: i64 = created.created[0].exam_schedule_id;
    let other_school: i64 = fix
        .persistence
        .create_school("Other High")
        .expect("school should insert")
        .raw();
    let before: usize = sink.notices.borrow().len();

    let error: ApiError = delete_exam_schedule(&mut fix.persistence, &sink, other_school, exam_id)
        .expect_err("cross-school delete should be rejected");
    assert!(matches!(error, ApiError::ResourceNotFound { .. }));
    assert_eq!(
        sink.notices.borrow().len(),
        before,
        "no cancellation notice for a rejected delete"
    );

    delete_exam_schedule(&mut fix.persistence, &sink, fix.school.raw(), exam_id)
        .expect("in-school delete should succeed");
}
