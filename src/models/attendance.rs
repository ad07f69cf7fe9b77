use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub present: bool,
    pub justification: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Attendance row joined with the student name for listings.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AttendanceWithStudent {
    pub id: Uuid,
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub present: bool,
    pub justification: Option<String>,
    pub created_at: DateTime<Utc>,
    pub full_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordAttendance {
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub present: bool,
    pub justification: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AttendanceQuery {
    pub student_id: Option<Uuid>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// One active student plus whatever was recorded for the roster date.
#[derive(Debug, Serialize)]
pub struct RosterEntry {
    pub student: super::Student,
    pub attendance: Option<AttendanceRecord>,
}
