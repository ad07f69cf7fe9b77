use anyhow::anyhow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::auth::UserRole;
use crate::errors::ApiError;
use crate::models::{CreateUser, Student, UpdateUser, UserWithStudent};

const USER_COLUMNS: &str = "u.id, u.username, u.role, u.display_name, u.student_id, \
     s.full_name AS student_name, u.created_at";

#[derive(Clone)]
pub struct UserService {
    db: PgPool,
}

impl UserService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<UserWithStudent>, ApiError> {
        Ok(sqlx::query_as::<_, UserWithStudent>(&format!(
            "SELECT {USER_COLUMNS} FROM users u
             LEFT JOIN students s ON u.student_id = s.id
             ORDER BY u.created_at DESC"
        ))
        .fetch_all(&self.db)
        .await?)
    }

    pub async fn get(&self, user_id: Uuid) -> Result<UserWithStudent, ApiError> {
        sqlx::query_as::<_, UserWithStudent>(&format!(
            "SELECT {USER_COLUMNS} FROM users u
             LEFT JOIN students s ON u.student_id = s.id
             WHERE u.id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ApiError::NotFound("User"))
    }

    /// Create a login. Usernames are unique, and a student record can
    /// carry at most one login.
    pub async fn create(&self, request: CreateUser) -> Result<UserWithStudent, ApiError> {
        if request.username.trim().is_empty() {
            return Err(ApiError::validation("Username cannot be empty"));
        }

        let password_hash =
            hash_password(&request.password).map_err(|e| ApiError::Internal(anyhow!(e)))?;
        let role = request.role.unwrap_or(UserRole::Student);

        let created: (Uuid,) = sqlx::query_as(
            "INSERT INTO users (username, password_hash, role, display_name, student_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(request.username.trim())
        .bind(&password_hash)
        .bind(role)
        .bind(&request.display_name)
        .bind(request.student_id)
        .fetch_one(&self.db)
        .await
        .map_err(|err| map_unique_violation(err, request.student_id.is_some()))?;

        self.get(created.0).await
    }

    pub async fn update(&self, user_id: Uuid, request: UpdateUser) -> Result<(), ApiError> {
        let result = if let Some(password) = request.password.filter(|p| !p.is_empty()) {
            let password_hash =
                hash_password(&password).map_err(|e| ApiError::Internal(anyhow!(e)))?;
            sqlx::query(
                "UPDATE users SET username = $2, password_hash = $3, role = $4, \
                 display_name = $5, student_id = $6
                 WHERE id = $1",
            )
            .bind(user_id)
            .bind(request.username.trim())
            .bind(&password_hash)
            .bind(request.role)
            .bind(&request.display_name)
            .bind(request.student_id)
            .execute(&self.db)
            .await
        } else {
            sqlx::query(
                "UPDATE users SET username = $2, role = $3, display_name = $4, student_id = $5
                 WHERE id = $1",
            )
            .bind(user_id)
            .bind(request.username.trim())
            .bind(request.role)
            .bind(&request.display_name)
            .bind(request.student_id)
            .execute(&self.db)
            .await
        };

        let result =
            result.map_err(|err| map_unique_violation(err, request.student_id.is_some()))?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("User"));
        }

        Ok(())
    }

    /// Delete a login. Admins cannot delete their own account.
    pub async fn delete(&self, caller_id: Uuid, user_id: Uuid) -> Result<(), ApiError> {
        if caller_id == user_id {
            return Err(ApiError::validation("Cannot delete your own account"));
        }

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("User"));
        }

        Ok(())
    }

    /// Active students that do not have a login yet, for the account
    /// creation form.
    pub async fn students_without_login(&self) -> Result<Vec<Student>, ApiError> {
        Ok(sqlx::query_as::<_, Student>(
            "SELECT s.id, s.full_name, s.category, s.birth_date, s.guardian_name, s.contact, \
             s.enrollment_date, s.status, s.notes, s.current_rank, s.modality, \
             s.eligible_to_promote, s.target_rank, s.weight_kg, s.height, s.created_at, \
             s.updated_at
             FROM students s
             LEFT JOIN users u ON s.id = u.student_id
             WHERE u.id IS NULL AND s.status = $1
             ORDER BY s.full_name",
        )
        .bind(crate::models::StudentStatus::Active)
        .fetch_all(&self.db)
        .await?)
    }
}

fn map_unique_violation(err: sqlx::Error, has_student: bool) -> ApiError {
    match &err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
            let constraint = db.constraint().unwrap_or_default();
            if has_student && constraint.contains("student") {
                ApiError::conflict("This student already has a login")
            } else {
                ApiError::conflict("Username already exists")
            }
        }
        _ => ApiError::Database(err),
    }
}
