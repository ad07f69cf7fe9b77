use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::auth::UserRole;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
    pub display_name: Option<String>,
    pub student_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// User as listed to admins: no hash, joined with the linked student name.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserWithStudent {
    pub id: Uuid,
    pub username: String,
    pub role: UserRole,
    pub display_name: Option<String>,
    pub student_id: Option<Uuid>,
    pub student_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub password: String,
    pub role: Option<UserRole>,
    pub display_name: Option<String>,
    pub student_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUser {
    pub username: String,
    /// Re-hashed only when supplied.
    pub password: Option<String>,
    pub role: UserRole,
    pub display_name: Option<String>,
    pub student_id: Option<Uuid>,
}
