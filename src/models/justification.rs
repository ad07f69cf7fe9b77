use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "justification_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum JustificationStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AbsenceJustification {
    pub id: Uuid,
    pub student_id: Uuid,
    pub absence_date: NaiveDate,
    pub justification: String,
    pub status: JustificationStatus,
    pub read: bool,
    pub resolved: bool,
    pub reviewer_note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct JustificationWithStudent {
    pub id: Uuid,
    pub student_id: Uuid,
    pub absence_date: NaiveDate,
    pub justification: String,
    pub status: JustificationStatus,
    pub read: bool,
    pub resolved: bool,
    pub reviewer_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub full_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateJustification {
    /// Ignored for student callers; they always file for themselves.
    pub student_id: Option<Uuid>,
    pub absence_date: NaiveDate,
    pub justification: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewJustification {
    pub status: Option<JustificationStatus>,
    pub read: Option<bool>,
    pub resolved: Option<bool>,
    pub reviewer_note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JustificationQuery {
    pub student_id: Option<Uuid>,
    pub status: Option<JustificationStatus>,
}
