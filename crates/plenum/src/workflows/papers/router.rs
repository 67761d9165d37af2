use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::PaperId;
use super::repository::{PaperRepository, RepositoryError};
use super::service::{PaperService, PaperServiceError};

/// Router builder exposing HTTP endpoints for paper intake, versioning, and
/// review.
pub fn paper_router<R>(service: Arc<PaperService<R>>) -> Router
where
    R: PaperRepository + 'static,
{
    Router::new()
        .route("/api/v1/papers", post(submit_handler::<R>))
        .route("/api/v1/papers/:paper_id", get(status_handler::<R>))
        .route(
            "/api/v1/papers/:paper_id/versions",
            post(save_version_handler::<R>),
        )
        .route("/api/v1/papers/:paper_id/drift", post(drift_handler::<R>))
        .route("/api/v1/papers/:paper_id/review", post(review_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct VersionPayload {
    pub(crate) content: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DriftPayload {
    #[serde(default)]
    pub(crate) content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReviewPayload {
    pub(crate) author: String,
    pub(crate) body: String,
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<PaperService<R>>>,
    axum::Json(submission): axum::Json<super::domain::PaperSubmission>,
) -> Response
where
    R: PaperRepository + 'static,
{
    match service.submit(submission) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(PaperServiceError::Submission(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(PaperServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({ "error": "paper already exists" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<PaperService<R>>>,
    Path(paper_id): Path<String>,
) -> Response
where
    R: PaperRepository + 'static,
{
    let id = PaperId(paper_id);
    match service.get(&id) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => not_found_or_internal(error, &id),
    }
}

pub(crate) async fn save_version_handler<R>(
    State(service): State<Arc<PaperService<R>>>,
    Path(paper_id): Path<String>,
    axum::Json(payload): axum::Json<VersionPayload>,
) -> Response
where
    R: PaperRepository + 'static,
{
    let id = PaperId(paper_id);
    match service.save_version(&id, payload.content) {
        Ok(saved) => (StatusCode::OK, axum::Json(saved)).into_response(),
        Err(error) => not_found_or_internal(error, &id),
    }
}

pub(crate) async fn drift_handler<R>(
    State(service): State<Arc<PaperService<R>>>,
    Path(paper_id): Path<String>,
    axum::Json(payload): axum::Json<DriftPayload>,
) -> Response
where
    R: PaperRepository + 'static,
{
    let id = PaperId(paper_id);
    match service.check_drift(&id, payload.content.as_deref()) {
        Ok(matches) => {
            let payload = json!({ "paper_id": id.0, "matches": matches });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => not_found_or_internal(error, &id),
    }
}

pub(crate) async fn review_handler<R>(
    State(service): State<Arc<PaperService<R>>>,
    Path(paper_id): Path<String>,
    axum::Json(payload): axum::Json<ReviewPayload>,
) -> Response
where
    R: PaperRepository + 'static,
{
    let id = PaperId(paper_id);
    match service.add_review_comment(&id, payload.author, payload.body) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(error) => not_found_or_internal(error, &id),
    }
}

fn not_found_or_internal(error: PaperServiceError, id: &PaperId) -> Response {
    match error {
        PaperServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({ "error": "paper not found", "paper_id": id.0 });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        other => internal_error(other),
    }
}

fn internal_error(error: PaperServiceError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
