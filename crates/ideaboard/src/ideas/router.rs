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

use super::domain::{EngineerRef, IdeaId, IdeaSubmission, IdeaView, SubmissionError};
use super::repository::{IdeaRepository, RepositoryError};
use super::service::{IdeaReviewService, ReviewServiceError};

/// Body accepted by the submit route. Identity comes from the caller's session layer.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRequest {
    pub engineer: EngineerRef,
    pub submission: IdeaSubmission,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApproveRequest {
    pub reviewer_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RejectRequest {
    pub reviewer_id: String,
    #[serde(default)]
    pub rejection_reason: String,
}

/// Router builder exposing HTTP endpoints for submission, review, and ranking.
pub fn idea_router<R>(service: Arc<IdeaReviewService<R>>) -> Router
where
    R: IdeaRepository + 'static,
{
    Router::new()
        .route("/api/ideas/submit", post(submit_handler::<R>))
        .route("/api/ideas/approved/all", get(approved_handler::<R>))
        .route(
            "/api/ideas/worklist/:reviewer_id",
            get(worklist_handler::<R>),
        )
        .route(
            "/api/ideas/engineer/:engineer_id",
            get(engineer_handler::<R>),
        )
        .route("/api/ideas/:idea_id", get(idea_handler::<R>))
        .route("/api/ideas/:idea_id/approve", post(approve_handler::<R>))
        .route("/api/ideas/:idea_id/reject", post(reject_handler::<R>))
        .route(
            "/api/ideas/:idea_id/similarity",
            get(similarity_handler::<R>),
        )
        .route("/api/leaderboard", get(leaderboard_handler::<R>))
        .with_state(service)
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<IdeaReviewService<R>>>,
    axum::Json(request): axum::Json<SubmitRequest>,
) -> Response
where
    R: IdeaRepository + 'static,
{
    match service.submit(request.engineer, request.submission) {
        Ok(idea) => {
            let payload = json!({
                "message": "Idea submitted successfully",
                "idea": idea.view(),
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn idea_handler<R>(
    State(service): State<Arc<IdeaReviewService<R>>>,
    Path(idea_id): Path<String>,
) -> Response
where
    R: IdeaRepository + 'static,
{
    match service.get(&IdeaId(idea_id)) {
        Ok(idea) => (StatusCode::OK, axum::Json(json!({ "idea": idea.view() }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn approve_handler<R>(
    State(service): State<Arc<IdeaReviewService<R>>>,
    Path(idea_id): Path<String>,
    axum::Json(request): axum::Json<ApproveRequest>,
) -> Response
where
    R: IdeaRepository + 'static,
{
    match service.approve(&IdeaId(idea_id), &request.reviewer_id) {
        Ok(outcome) => {
            let payload = json!({
                "message": "Idea approved successfully",
                "points_awarded": outcome.points_awarded,
                "breakdown": outcome.breakdown.components,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reject_handler<R>(
    State(service): State<Arc<IdeaReviewService<R>>>,
    Path(idea_id): Path<String>,
    axum::Json(request): axum::Json<RejectRequest>,
) -> Response
where
    R: IdeaRepository + 'static,
{
    match service.reject(
        &IdeaId(idea_id),
        &request.reviewer_id,
        &request.rejection_reason,
    ) {
        Ok(_) => (
            StatusCode::OK,
            axum::Json(json!({ "message": "Idea rejected successfully" })),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn similarity_handler<R>(
    State(service): State<Arc<IdeaReviewService<R>>>,
    Path(idea_id): Path<String>,
) -> Response
where
    R: IdeaRepository + 'static,
{
    match service.similar(&IdeaId(idea_id)) {
        Ok(matches) => (
            StatusCode::OK,
            axum::Json(json!({ "similar_ideas": matches })),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn worklist_handler<R>(
    State(service): State<Arc<IdeaReviewService<R>>>,
    Path(reviewer_id): Path<String>,
) -> Response
where
    R: IdeaRepository + 'static,
{
    match service.worklist(&reviewer_id) {
        Ok(ideas) => ideas_response(ideas.iter().map(|idea| idea.view()).collect()),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn engineer_handler<R>(
    State(service): State<Arc<IdeaReviewService<R>>>,
    Path(engineer_id): Path<String>,
) -> Response
where
    R: IdeaRepository + 'static,
{
    match service.submitted_by(&engineer_id) {
        Ok(ideas) => ideas_response(ideas.iter().map(|idea| idea.view()).collect()),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn approved_handler<R>(
    State(service): State<Arc<IdeaReviewService<R>>>,
) -> Response
where
    R: IdeaRepository + 'static,
{
    match service.approved() {
        Ok(ideas) => ideas_response(ideas.iter().map(|idea| idea.view()).collect()),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn leaderboard_handler<R>(
    State(service): State<Arc<IdeaReviewService<R>>>,
) -> Response
where
    R: IdeaRepository + 'static,
{
    match service.leaderboard() {
        Ok(board) => (StatusCode::OK, axum::Json(board)).into_response(),
        Err(error) => error_response(error),
    }
}

fn ideas_response(ideas: Vec<IdeaView>) -> Response {
    (StatusCode::OK, axum::Json(json!({ "ideas": ideas }))).into_response()
}

fn error_response(error: ReviewServiceError) -> Response {
    let status = match &error {
        ReviewServiceError::Submission(SubmissionError::MissingField(_))
        | ReviewServiceError::MissingRejectionReason => StatusCode::BAD_REQUEST,
        ReviewServiceError::Submission(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ReviewServiceError::NotPending
        | ReviewServiceError::NotAssigned
        | ReviewServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ReviewServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ReviewServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
