// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for in-batch sibling conflict detection.

use crate::{ExpandedCandidate, find_sibling_conflict};
use slate_domain::DayOfWeek;

use super::helpers::{SECTION_A, SECTION_B, TEACHER_T, TEACHER_U, subject_slot};

#[test]
fn test_same_request_fan_out_never_conflicts() {
    // One request covering two sections with one teacher is legitimate.
    let candidates: Vec<ExpandedCandidate> = vec![
        ExpandedCandidate::new(
            0,
            subject_slot(TEACHER_T, SECTION_A, DayOfWeek::Monday, "09:00", "10:00"),
        ),
        ExpandedCandidate::new(
            0,
            subject_slot(TEACHER_T, SECTION_B, DayOfWeek::Monday, "09:00", "10:00"),
        ),
    ];

    let conflict = find_sibling_conflict(&candidates).expect("valid ranges");

    assert!(conflict.is_none());
}

#[test]
fn test_cross_request_teacher_overlap_is_a_conflict() {
    let candidates: Vec<ExpandedCandidate> = vec![
        ExpandedCandidate::new(
            0,
            subject_slot(TEACHER_T, SECTION_A, DayOfWeek::Monday, "09:00", "10:00"),
        ),
        ExpandedCandidate::new(
            1,
            subject_slot(TEACHER_T, SECTION_B, DayOfWeek::Monday, "09:30", "10:30"),
        ),
    ];

    let (first, second) = find_sibling_conflict(&candidates)
        .expect("valid ranges")
        .expect("conflicting pair");

    assert_eq!(first.request_index, 0);
    assert_eq!(second.request_index, 1);
}

#[test]
fn test_cross_request_section_overlap_is_a_conflict() {
    let candidates: Vec<ExpandedCandidate> = vec![
        ExpandedCandidate::new(
            0,
            subject_slot(TEACHER_T, SECTION_A, DayOfWeek::Monday, "09:00", "10:00"),
        ),
        ExpandedCandidate::new(
            1,
            subject_slot(TEACHER_U, SECTION_A, DayOfWeek::Monday, "09:30", "10:30"),
        ),
    ];

    assert!(
        find_sibling_conflict(&candidates)
            .expect("valid ranges")
            .is_some()
    );
}

#[test]
fn test_disjoint_requests_do_not_conflict() {
    let candidates: Vec<ExpandedCandidate> = vec![
        ExpandedCandidate::new(
            0,
            subject_slot(TEACHER_T, SECTION_A, DayOfWeek::Monday, "09:00", "10:00"),
        ),
        ExpandedCandidate::new(
            1,
            subject_slot(TEACHER_U, SECTION_B, DayOfWeek::Monday, "09:00", "10:00"),
        ),
        ExpandedCandidate::new(
            2,
            subject_slot(TEACHER_T, SECTION_A, DayOfWeek::Tuesday, "09:00", "10:00"),
        ),
    ];

    let conflict = find_sibling_conflict(&candidates).expect("valid ranges");

    assert!(conflict.is_none());
}

#[test]
fn test_first_pair_in_submission_order_is_reported() {
    // Both the (0, 2) and the (1, 2) pairs collide; the earliest first
    // element wins.
    let candidates: Vec<ExpandedCandidate> = vec![
        ExpandedCandidate::new(
            0,
            subject_slot(TEACHER_T, SECTION_A, DayOfWeek::Monday, "09:00", "10:00"),
        ),
        ExpandedCandidate::new(
            1,
            subject_slot(TEACHER_U, SECTION_B, DayOfWeek::Monday, "09:00", "10:00"),
        ),
        ExpandedCandidate::new(
            2,
            subject_slot(TEACHER_T, SECTION_B, DayOfWeek::Monday, "09:30", "10:30"),
        ),
    ];

    let (first, second) = find_sibling_conflict(&candidates)
        .expect("valid ranges")
        .expect("conflicting pair");

    assert_eq!(first.request_index, 0);
    assert_eq!(second.request_index, 2);
}

#[test]
fn test_touching_boundaries_across_requests_are_fine() {
    let candidates: Vec<ExpandedCandidate> = vec![
        ExpandedCandidate::new(
            0,
            subject_slot(TEACHER_T, SECTION_A, DayOfWeek::Monday, "09:00", "10:00"),
        ),
        ExpandedCandidate::new(
            1,
            subject_slot(TEACHER_T, SECTION_A, DayOfWeek::Monday, "10:00", "11:00"),
        ),
    ];

    let conflict = find_sibling_conflict(&candidates).expect("valid ranges");

    assert!(conflict.is_none());
}

#[test]
fn test_malformed_candidate_times_surface_as_errors() {
    let mut bad = subject_slot(TEACHER_T, SECTION_A, DayOfWeek::Monday, "09:00", "10:00");
    bad.start_time = String::from("nine");
    let candidates: Vec<ExpandedCandidate> = vec![ExpandedCandidate::new(0, bad)];

    assert!(find_sibling_conflict(&candidates).is_err());
}

#[test]
fn test_empty_batch_is_consistent() {
    let candidates: Vec<ExpandedCandidate> = Vec::new();

    assert!(
        find_sibling_conflict(&candidates)
            .expect("valid ranges")
            .is_none()
    );
}
