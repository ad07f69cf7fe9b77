use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use crate::auth::{
    admin_only_middleware, cors_layer, jwt_auth_middleware, security_headers_layer, AuthService,
};

use super::{
    announcements, attendance, auth, dashboard, evaluations, health::health_check,
    justifications, notifications, re_enrollments, students, techniques, users,
};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub auth: AuthService,
}

pub fn create_routes(db: PgPool, jwt_secret: &str) -> Router {
    let auth_service = AuthService::new(db.clone(), jwt_secret);
    let state = AppState {
        db,
        auth: auth_service.clone(),
    };

    // Token-confirmed re-enrollment is deliberately public; the token is
    // the credential
    let public = Router::new()
        .route("/health", get(health_check))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/check", get(auth::check))
        .route(
            "/api/re-enrollments/token/:token",
            get(re_enrollments::get_by_token),
        )
        .route("/api/re-enrollments/confirm", post(re_enrollments::confirm));

    let authenticated = Router::new()
        .route("/api/students", get(students::list))
        .route("/api/students/:id", get(students::get))
        .route("/api/attendance", get(attendance::list))
        .route("/api/dashboard/frequency", get(dashboard::frequency))
        .route("/api/dashboard/evolution", get(dashboard::evolution))
        .route("/api/evaluations", get(evaluations::list))
        .route("/api/evaluations/:id", get(evaluations::get))
        .route(
            "/api/justifications",
            get(justifications::list).post(justifications::create),
        )
        .route("/api/notifications", get(notifications::list))
        .route(
            "/api/notifications/unread-count",
            get(notifications::unread_count),
        )
        .route(
            "/api/notifications/:id/read",
            post(notifications::mark_read),
        )
        .route(
            "/api/notifications/read-all",
            post(notifications::mark_all_read),
        )
        .route("/api/announcements", get(announcements::list))
        .route("/api/techniques", get(techniques::list))
        .route("/api/techniques/kinds", get(techniques::kinds))
        .route("/api/techniques/:id", get(techniques::get))
        .route_layer(middleware::from_fn_with_state(
            auth_service.clone(),
            jwt_auth_middleware,
        ));

    // Admin check runs inside the JWT layer so the session is present
    let admin = Router::new()
        .route("/api/students", post(students::create))
        .route(
            "/api/students/:id",
            put(students::update).delete(students::delete),
        )
        .route("/api/students/import", post(students::import))
        .route(
            "/api/students/import/template",
            get(students::import_template),
        )
        .route("/api/attendance", post(attendance::record))
        .route("/api/attendance/roster", get(attendance::roster))
        .route("/api/evaluations", post(evaluations::create))
        .route("/api/evaluations/:id", put(evaluations::update))
        .route("/api/evaluations/:id/release", post(evaluations::release))
        .route("/api/justifications/:id", put(justifications::review))
        .route(
            "/api/justifications/:id/read",
            post(justifications::mark_read),
        )
        .route("/api/announcements", post(announcements::create))
        .route("/api/announcements/:id", delete(announcements::delete))
        .route("/api/techniques", post(techniques::create))
        .route(
            "/api/techniques/:id",
            put(techniques::update).delete(techniques::delete),
        )
        .route("/api/users", get(users::list).post(users::create))
        .route(
            "/api/users/students-without-login",
            get(users::students_without_login),
        )
        .route(
            "/api/users/:id",
            get(users::get).put(users::update).delete(users::delete),
        )
        .route("/api/re-enrollments", post(re_enrollments::generate))
        .route_layer(middleware::from_fn(admin_only_middleware))
        .route_layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ));

    Router::new()
        .merge(public)
        .merge(authenticated)
        .merge(admin)
        .layer(TraceLayer::new_for_http())
        .layer(security_headers_layer())
        .layer(cors_layer())
        .with_state(state)
}
