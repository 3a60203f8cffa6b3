// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations against the schedule, exam, and reference-data
//! tables.

pub mod exams;
pub mod refdata;
pub mod schedules;
