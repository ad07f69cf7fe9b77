use chrono::{Duration, Utc};
use sqlx::{PgPool, Row};

use crate::auth::{UserRole, UserSession};
use crate::errors::ApiError;
use crate::models::{
    EvolutionPoint, EvolutionQuery, FrequencyQuery, FrequencyStat, StudentStatus,
};

#[derive(Clone)]
pub struct DashboardService {
    db: PgPool,
}

impl DashboardService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Attendance totals per active student over a date range (defaults to
    /// the last 30 days). Students only see their own row.
    pub async fn frequency(
        &self,
        session: &UserSession,
        query: FrequencyQuery,
    ) -> Result<Vec<FrequencyStat>, ApiError> {
        if session.role == UserRole::Guest {
            return Err(ApiError::Forbidden);
        }

        let today = Utc::now().date_naive();
        let from = query.from.unwrap_or(today - Duration::days(30));
        let to = query.to.unwrap_or(today);

        let mut sql = String::from(
            "SELECT s.id, s.full_name, s.category,
                    COUNT(p.id) AS total_records,
                    COALESCE(SUM(CASE WHEN p.present THEN 1 ELSE 0 END), 0) AS total_present,
                    COALESCE(SUM(CASE WHEN NOT p.present THEN 1 ELSE 0 END), 0) AS total_absent
             FROM students s
             LEFT JOIN attendance p ON s.id = p.student_id AND p.date BETWEEN $1 AND $2
             WHERE s.status = $3",
        );
        let mut param_count = 3;

        if query.category.is_some() {
            param_count += 1;
            sql.push_str(&format!(" AND s.category = ${param_count}"));
        }
        if session.role == UserRole::Student {
            param_count += 1;
            sql.push_str(&format!(" AND s.id = ${param_count}"));
        }

        sql.push_str(" GROUP BY s.id, s.full_name, s.category ORDER BY total_present DESC");

        let mut query_builder = sqlx::query(&sql)
            .bind(from)
            .bind(to)
            .bind(StudentStatus::Active);
        if let Some(category) = query.category {
            query_builder = query_builder.bind(category);
        }
        if session.role == UserRole::Student {
            let own = session.student_id.ok_or(ApiError::Forbidden)?;
            query_builder = query_builder.bind(own);
        }

        let rows = query_builder.fetch_all(&self.db).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let total: i64 = row.get("total_records");
                let present: i64 = row.get("total_present");
                FrequencyStat {
                    student_id: row.get("id"),
                    name: row.get("full_name"),
                    category: row.get("category"),
                    total_records: total,
                    present,
                    absent: row.get("total_absent"),
                    attendance_rate: rate(present, total),
                }
            })
            .collect())
    }

    /// Day-by-day attendance rate over a range (defaults to the last 90
    /// days), optionally narrowed to one student.
    pub async fn evolution(
        &self,
        session: &UserSession,
        query: EvolutionQuery,
    ) -> Result<Vec<EvolutionPoint>, ApiError> {
        if session.role == UserRole::Guest {
            return Err(ApiError::Forbidden);
        }

        let today = Utc::now().date_naive();
        let from = query.from.unwrap_or(today - Duration::days(90));
        let to = query.to.unwrap_or(today);

        // Students are pinned to their own records; the filter parameter
        // only matters for admins
        let student_filter = match session.role {
            UserRole::Student => Some(session.student_id.ok_or(ApiError::Forbidden)?),
            _ => query.student_id,
        };

        let mut sql = String::from(
            "SELECT p.date,
                    COUNT(*) AS total,
                    SUM(CASE WHEN p.present THEN 1 ELSE 0 END) AS total_present
             FROM attendance p
             WHERE p.date BETWEEN $1 AND $2",
        );
        if student_filter.is_some() {
            sql.push_str(" AND p.student_id = $3");
        }
        sql.push_str(" GROUP BY p.date ORDER BY p.date");

        let mut query_builder = sqlx::query(&sql).bind(from).bind(to);
        if let Some(student_id) = student_filter {
            query_builder = query_builder.bind(student_id);
        }

        let rows = query_builder.fetch_all(&self.db).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let total: i64 = row.get("total");
                let present: i64 = row.get("total_present");
                EvolutionPoint {
                    date: row.get("date"),
                    total,
                    present,
                    attendance_rate: rate(present, total),
                }
            })
            .collect())
    }
}

fn rate(present: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = present as f64 / total as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}
