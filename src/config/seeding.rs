use anyhow::Result;
use sqlx::PgPool;

use crate::auth::password::hash_password;
use crate::auth::UserRole;

/// Ensure a default administrator account exists so a fresh deployment is
/// reachable. The password must be changed after first login.
pub async fn ensure_default_admin(pool: &PgPool) -> Result<()> {
    let existing: Option<(uuid::Uuid,)> =
        sqlx::query_as("SELECT id FROM users WHERE username = $1")
            .bind("admin")
            .fetch_optional(pool)
            .await?;

    if existing.is_some() {
        return Ok(());
    }

    let password_hash = hash_password("admin123")?;
    sqlx::query(
        "INSERT INTO users (username, password_hash, role, display_name)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (username) DO NOTHING",
    )
    .bind("admin")
    .bind(&password_hash)
    .bind(UserRole::Admin)
    .bind("Administrator")
    .execute(pool)
    .await?;

    tracing::info!("default admin account created");

    Ok(())
}
