use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    Extension,
};
use serde_json::json;
use uuid::Uuid;

use crate::api::routes::AppState;
use crate::auth::UserSession;
use crate::domain::import::ImportSummary;
use crate::errors::ApiError;
use crate::models::{NewStudent, Student, StudentView, UpdateStudent};
use crate::services::{ImportService, StudentService};

#[tracing::instrument(skip(state, session))]
pub async fn list(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<Vec<StudentView>>, ApiError> {
    let students = StudentService::new(state.db.clone()).list(&session).await?;
    Ok(Json(students))
}

#[tracing::instrument(skip(state, session))]
pub async fn get(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<StudentView>, ApiError> {
    let student = StudentService::new(state.db.clone())
        .get(&session, student_id)
        .await?;
    Ok(Json(student))
}

#[tracing::instrument(skip(state, record))]
pub async fn create(
    State(state): State<AppState>,
    Json(record): Json<NewStudent>,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    let student = StudentService::new(state.db.clone()).create(record).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

#[tracing::instrument(skip(state, record))]
pub async fn update(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
    Json(record): Json<UpdateStudent>,
) -> Result<Json<Student>, ApiError> {
    let student = StudentService::new(state.db.clone())
        .update(student_id, record)
        .await?;
    Ok(Json(student))
}

#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    StudentService::new(state.db.clone()).delete(student_id).await?;
    Ok(Json(json!({ "success": true })))
}

/// Bulk import from an uploaded CSV. The multipart body must carry a
/// `file` part with a filename.
#[tracing::instrument(skip(state, multipart))]
pub async fn import(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportSummary>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::validation(format!("Invalid upload: {err}")))?
    {
        if field.name() == Some("file") {
            let filename = field
                .file_name()
                .ok_or_else(|| ApiError::validation("No file selected"))?
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|err| ApiError::validation(format!("Invalid upload: {err}")))?;
            upload = Some((filename, bytes.to_vec()));
            break;
        }
    }

    let (filename, bytes) = upload.ok_or_else(|| ApiError::validation("No file uploaded"))?;

    let summary = ImportService::new(state.db.clone())
        .import_students(&bytes, &filename)
        .await?;
    Ok(Json(summary))
}

/// Template CSV for the import sheet.
#[tracing::instrument(skip(state))]
pub async fn import_template(State(state): State<AppState>) -> Response {
    let body = ImportService::new(state.db.clone()).template_csv();

    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=student_import_template.csv",
            ),
        ],
        body,
    )
        .into_response()
}
