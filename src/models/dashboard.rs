use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::StudentCategory;

/// Per-student attendance totals over a date range.
#[derive(Debug, Serialize)]
pub struct FrequencyStat {
    pub student_id: Uuid,
    pub name: String,
    pub category: StudentCategory,
    pub total_records: i64,
    pub present: i64,
    pub absent: i64,
    pub attendance_rate: f64,
}

/// Attendance rate for a single day.
#[derive(Debug, Serialize)]
pub struct EvolutionPoint {
    pub date: NaiveDate,
    pub total: i64,
    pub present: i64,
    pub attendance_rate: f64,
}

#[derive(Debug, Deserialize)]
pub struct FrequencyQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub category: Option<StudentCategory>,
}

#[derive(Debug, Deserialize)]
pub struct EvolutionQuery {
    pub student_id: Option<Uuid>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
