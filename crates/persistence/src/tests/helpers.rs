// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use slate_domain::{
    ClassId, DayOfWeek, ExamSlot, ExamType, SchoolId, SectionId, SlotKind, SubjectId, TeacherId,
    WeeklySlot, parse_iso_date,
};

use crate::Persistence;

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

pub fn weekly_slot(
    fix: &Fixture,
    teacher: TeacherId,
    section: SectionId,
    day: DayOfWeek,
    start: &str,
    end: &str,
) -> WeeklySlot {
    WeeklySlot::new(
        fix.school,
        fix.class,
        section,
        SlotKind::Subject,
        Some(fix.math),
        Some(teacher),
        day,
        String::from(start),
        String::from(end),
    )
}

pub fn exam(
    fix: &Fixture,
    subject: SubjectId,
    section: SectionId,
    date: &str,
    start: &str,
    end: &str,
) -> ExamSlot {
    ExamSlot::new(
        fix.school,
        fix.class,
        section,
        subject,
        fix.teacher_t,
        ExamType::Midterm,
        2026,
        parse_iso_date(date).expect("valid test date"),
        String::from(start),
        String::from(end),
    )
}
