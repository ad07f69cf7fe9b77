use sqlx::PgPool;

use crate::auth::password::verify_password;
use crate::auth::{
    AuthError, JwtService, LoginRequest, LoginResponse, MessageResponse, UserInfo, UserSession,
};
use crate::models::User;

#[derive(Debug, Clone)]
pub struct AuthService {
    jwt_service: JwtService,
    db: PgPool,
}

impl AuthService {
    pub fn new(db: PgPool, jwt_secret: &str) -> Self {
        Self {
            jwt_service: JwtService::new(jwt_secret),
            db,
        }
    }

    /// Verify credentials and issue a session token
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, role, display_name, student_id, created_at
             FROM users WHERE username = $1",
        )
        .bind(&request.username)
        .fetch_optional(&self.db)
        .await
        .map_err(AuthError::Database)?
        .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.jwt_service.create_token(
            user.id,
            &user.username,
            user.role,
            user.student_id,
        )?;

        tracing::info!(username = %user.username, role = user.role.as_str(), "user logged in");

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_service.token_expires_in_seconds(),
            user: UserInfo {
                id: user.id,
                username: user.username,
                role: user.role,
                display_name: user.display_name,
                student_id: user.student_id,
            },
        })
    }

    /// Logout user (blacklist token)
    pub async fn logout(&self, token: &str) -> Result<MessageResponse, AuthError> {
        let claims = self.jwt_service.validate_token(token)?;
        self.blacklist_token(&claims.jti, claims.exp as i64).await?;

        Ok(MessageResponse {
            message: "Successfully logged out".to_string(),
        })
    }

    /// Validate user session from token
    pub async fn validate_session(&self, token: &str) -> Result<UserSession, AuthError> {
        let session = self.jwt_service.extract_user_session(token)?;

        if self.is_token_blacklisted(&session.jti).await? {
            return Err(AuthError::InvalidToken);
        }

        Ok(session)
    }

    /// Best-effort session lookup for the public auth check endpoint
    pub async fn session_from_header(&self, auth_header: Option<&str>) -> Option<UserSession> {
        let header = auth_header?;
        let token = crate::auth::extract_bearer_token(header).ok()?;
        self.validate_session(token).await.ok()
    }

    async fn is_token_blacklisted(&self, jti: &str) -> Result<bool, AuthError> {
        let result =
            sqlx::query("SELECT 1 FROM token_blacklist WHERE jti = $1 AND expires_at > NOW()")
                .bind(jti)
                .fetch_optional(&self.db)
                .await
                .map_err(AuthError::Database)?;

        Ok(result.is_some())
    }

    async fn blacklist_token(&self, jti: &str, exp: i64) -> Result<(), AuthError> {
        let expires_at =
            chrono::DateTime::from_timestamp(exp, 0).ok_or(AuthError::InvalidToken)?;

        sqlx::query(
            "INSERT INTO token_blacklist (jti, expires_at) VALUES ($1, $2)
             ON CONFLICT (jti) DO NOTHING",
        )
        .bind(jti)
        .bind(expires_at)
        .execute(&self.db)
        .await
        .map_err(AuthError::Database)?;

        Ok(())
    }
}
