use std::collections::HashMap;

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{UserRole, UserSession};
use crate::errors::ApiError;
use crate::models::{
    AttendanceQuery, AttendanceRecord, AttendanceWithStudent, RecordAttendance, RosterEntry,
    Student, StudentStatus,
};

#[derive(Clone)]
pub struct AttendanceService {
    db: PgPool,
}

impl AttendanceService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List attendance records. Students are always scoped to their own
    /// records; the student filter only applies to admins.
    pub async fn list(
        &self,
        session: &UserSession,
        query: AttendanceQuery,
    ) -> Result<Vec<AttendanceWithStudent>, ApiError> {
        let mut sql = String::from(
            "SELECT p.id, p.student_id, p.date, p.present, p.justification, p.created_at, \
             s.full_name
             FROM attendance p JOIN students s ON p.student_id = s.id WHERE 1=1",
        );
        let mut params: Vec<QueryParam> = Vec::new();

        match session.role {
            UserRole::Admin => {
                if let Some(student_id) = query.student_id {
                    params.push(QueryParam::Id(student_id));
                    sql.push_str(&format!(" AND p.student_id = ${}", params.len()));
                }
            }
            UserRole::Student => {
                let own = session.student_id.ok_or(ApiError::Forbidden)?;
                params.push(QueryParam::Id(own));
                sql.push_str(&format!(" AND p.student_id = ${}", params.len()));
            }
            UserRole::Guest => return Err(ApiError::Forbidden),
        }

        if let Some(from) = query.from {
            params.push(QueryParam::Date(from));
            sql.push_str(&format!(" AND p.date >= ${}", params.len()));
        }
        if let Some(to) = query.to {
            params.push(QueryParam::Date(to));
            sql.push_str(&format!(" AND p.date <= ${}", params.len()));
        }

        sql.push_str(" ORDER BY p.date DESC");

        let mut query_builder = sqlx::query_as::<_, AttendanceWithStudent>(&sql);
        for param in &params {
            query_builder = match param {
                QueryParam::Id(id) => query_builder.bind(*id),
                QueryParam::Date(date) => query_builder.bind(*date),
            };
        }

        Ok(query_builder.fetch_all(&self.db).await?)
    }

    /// Record presence or absence. Re-submitting for the same student and
    /// day replaces the prior record.
    pub async fn record(&self, entry: RecordAttendance) -> Result<AttendanceRecord, ApiError> {
        let record = sqlx::query_as::<_, AttendanceRecord>(
            "INSERT INTO attendance (student_id, date, present, justification)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (student_id, date)
             DO UPDATE SET present = EXCLUDED.present, justification = EXCLUDED.justification
             RETURNING id, student_id, date, present, justification, created_at",
        )
        .bind(entry.student_id)
        .bind(entry.date)
        .bind(entry.present)
        .bind(&entry.justification)
        .fetch_one(&self.db)
        .await
        .map_err(map_student_fk)?;

        Ok(record)
    }

    /// Roster for a given day: every active student plus whatever was
    /// already recorded for that date.
    pub async fn roster(&self, date: NaiveDate) -> Result<Vec<RosterEntry>, ApiError> {
        let students = sqlx::query_as::<_, Student>(
            "SELECT id, full_name, category, birth_date, guardian_name, contact, \
             enrollment_date, status, notes, current_rank, modality, eligible_to_promote, \
             target_rank, weight_kg, height, created_at, updated_at
             FROM students WHERE status = $1 ORDER BY full_name",
        )
        .bind(StudentStatus::Active)
        .fetch_all(&self.db)
        .await?;

        let records = sqlx::query_as::<_, AttendanceRecord>(
            "SELECT id, student_id, date, present, justification, created_at
             FROM attendance WHERE date = $1",
        )
        .bind(date)
        .fetch_all(&self.db)
        .await?;

        let mut by_student: HashMap<Uuid, AttendanceRecord> = records
            .into_iter()
            .map(|record| (record.student_id, record))
            .collect();

        Ok(students
            .into_iter()
            .map(|student| {
                let attendance = by_student.remove(&student.id);
                RosterEntry {
                    student,
                    attendance,
                }
            })
            .collect())
    }
}

enum QueryParam {
    Id(Uuid),
    Date(NaiveDate),
}

fn map_student_fk(err: sqlx::Error) -> ApiError {
    match &err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23503") => {
            ApiError::NotFound("Student")
        }
        _ => ApiError::Database(err),
    }
}
