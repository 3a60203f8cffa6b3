// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use slate_domain::{
    ClassId, DayOfWeek, ExamSlot, ExamType, ScheduleId, SchoolId, SectionId, SlotKind, SubjectId,
    TeacherId, WeeklySlot, parse_iso_date,
};

pub const SCHOOL: SchoolId = SchoolId::new(1);
pub const CLASS_ONE: ClassId = ClassId::new(10);
pub const SECTION_A: SectionId = SectionId::new(100);
pub const SECTION_B: SectionId = SectionId::new(101);
pub const MATH: SubjectId = SubjectId::new(7);
pub const TEACHER_T: TeacherId = TeacherId::new(42);
pub const TEACHER_U: TeacherId = TeacherId::new(43);

pub fn subject_slot(
    teacher: TeacherId,
    section: SectionId,
    day: DayOfWeek,
    start: &str,
    end: &str,
) -> WeeklySlot {
    WeeklySlot::new(
        SCHOOL,
        CLASS_ONE,
        section,
        SlotKind::Subject,
        Some(MATH),
        Some(teacher),
        day,
        String::from(start),
        String::from(end),
    )
}

pub fn persisted(mut slot: WeeklySlot, id: i64) -> WeeklySlot {
    slot.schedule_id = Some(ScheduleId::new(id));
    slot
}

pub fn exam_slot(teacher: TeacherId, section: SectionId, date: &str, start: &str, end: &str) -> ExamSlot {
    ExamSlot::new(
        SCHOOL,
        CLASS_ONE,
        section,
        MATH,
        teacher,
        ExamType::Midterm,
        2026,
        parse_iso_date(date).expect("valid test date"),
        String::from(start),
        String::from(end),
    )
}
