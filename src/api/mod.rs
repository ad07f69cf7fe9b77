// API routes and handlers

pub mod announcements;
pub mod attendance;
pub mod auth;
pub mod dashboard;
pub mod evaluations;
pub mod health;
pub mod justifications;
pub mod notifications;
pub mod re_enrollments;
pub mod routes;
pub mod students;
pub mod techniques;
pub mod users;
