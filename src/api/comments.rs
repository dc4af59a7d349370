use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::auth::ActingUser;
use super::validation::validate_text;
use super::{ApiError, ApiResponse, AppState, CommentDto, CreateCommentRequest};
use crate::constants::limits;
use crate::domain::SpotId;

async fn require_spot(state: &AppState, id: &SpotId) -> Result<(), ApiError> {
    match state.spot_service().get_spot(id).await? {
        Some(_) => Ok(()),
        None => Err(ApiError::not_found("Spot", id)),
    }
}

/// `GET /api/spots/{id}/comments`
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<CommentDto>>>, ApiError> {
    let id = SpotId::from(id);
    require_spot(&state, &id).await?;

    let comments = state.store().get_comments(&id).await?;
    Ok(Json(ApiResponse::success(comments)))
}

/// `POST /api/spots/{id}/comments`
pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    ActingUser(user): ActingUser,
    Path(id): Path<String>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CommentDto>>), ApiError> {
    let content = validate_text("Comment", &req.content, limits::COMMENT_MAX_CHARS)?;

    let id = SpotId::from(id);
    require_spot(&state, &id).await?;

    let comment = state.store().add_comment(&id, &user, &content).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(comment))))
}
