// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::cell::RefCell;

use slate_domain::{ClassId, SchoolId, SectionId, SubjectId, TeacherId};
use slate_persistence::Persistence;

use crate::notify::{Notice, NotificationSink, NotifyError};
use crate::request_response::{ExamScheduleItem, WeeklyScheduleItem};

/// A seeded in-memory database with one school, one class with two
/// sections, two subjects assigned to both sections, and two teachers.
pub struct Fixture {
    pub persistence: Persistence,
    pub school: SchoolId,
    pub class: ClassId,
    pub section_a: SectionId,
    pub section_b: SectionId,
    pub math: SubjectId,
    pub science: SubjectId,
    pub teacher_t: TeacherId,
    pub teacher_u: TeacherId,
}

pub fn fixture() -> Fixture {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("in-memory database should initialize");

    let school: SchoolId = persistence
        .create_school("Test High")
        .expect("school should insert");
    let class: ClassId = persistence
        .create_class(school, "Grade 9")
        .expect("class should insert");
    let section_a: SectionId = persistence
        .create_section(class, "A")
        .expect("section should insert");
    let section_b: SectionId = persistence
        .create_section(class, "B")
        .expect("section should insert");
    let math: SubjectId = persistence
        .create_subject(school, "Mathematics")
        .expect("subject should insert");
    let science: SubjectId = persistence
        .create_subject(school, "Science")
        .expect("subject should insert");
    for subject in [math, science] {
        for section in [section_a, section_b] {
            persistence
                .assign_subject_to_section(subject, section)
                .expect("assignment should insert");
        }
    }
    let teacher_t: TeacherId = persistence
        .create_teacher(school, "T. Turner")
        .expect("teacher should insert");
    let teacher_u: TeacherId = persistence
        .create_teacher(school, "U. Usmani")
        .expect("teacher should insert");

    Fixture {
        persistence,
        school,
        class,
        section_a,
        section_b,
        math,
        science,
        teacher_t,
        teacher_u,
    }
}

/// Builds a subject-kind weekly request item for the fixture's class.
pub fn weekly_item(
    fix: &Fixture,
    teacher: TeacherId,
    sections: &[SectionId],
    day: &str,
    start: &str,
    end: &str,
) -> WeeklyScheduleItem {
    WeeklyScheduleItem {
        class_id: fix.class.raw(),
        section_ids: sections.iter().map(|s| s.raw()).collect(),
        kind: String::from("subject"),
        subject_id: Some(fix.math.raw()),
        teacher_id: Some(teacher.raw()),
        day: String::from(day),
        start_time: String::from(start),
        end_time: String::from(end),
    }
}

/// Builds an exam request item for the fixture's class, taught by
/// `teacher_t`.
pub fn exam_item(
    fix: &Fixture,
    subject: SubjectId,
    section: SectionId,
    date: &str,
    start: &str,
    end: &str,
) -> ExamScheduleItem {
    ExamScheduleItem {
        class_id: fix.class.raw(),
        section_id: section.raw(),
        subject_id: subject.raw(),
        teacher_id: fix.teacher_t.raw(),
        exam_date: String::from(date),
        start_time: String::from(start),
        end_time: String::from(end),
    }
}

/// A sink that records every delivered notice for assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub notices: RefCell<Vec<Notice>>,
}

impl NotificationSink for RecordingSink {
    fn deliver(&self, notice: &Notice) -> Result<(), NotifyError> {
        self.notices.borrow_mut().push(notice.clone());
        Ok(())
    }
}

/// A sink whose every delivery fails.
#[derive(Debug, Default)]
pub struct FailingSink;

impl NotificationSink for FailingSink {
    fn deliver(&self, _notice: &Notice) -> Result<(), NotifyError> {
        Err(NotifyError::ChannelUnavailable(String::from(
            "recipient list is offline",
        )))
    }
}
