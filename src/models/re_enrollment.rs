use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "re_enrollment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReEnrollmentStatus {
    Pending,
    Confirmed,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReEnrollment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub token: String,
    pub enrollment_date: NaiveDate,
    pub amount_paid: f64,
    pub status: ReEnrollmentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateReEnrollment {
    pub student_id: Uuid,
    pub amount_paid: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ReEnrollmentLink {
    pub token: String,
    pub link: String,
}

/// Pending token details shown on the public confirmation page.
#[derive(Debug, Serialize)]
pub struct ReEnrollmentDetails {
    #[serde(flatten)]
    pub re_enrollment: ReEnrollment,
    pub student: super::Student,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmReEnrollment {
    pub token: String,
}
