use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::auth::{ActingUser, MaybeUser};
use super::validation::{validate_optional_text, validate_text};
use super::{ApiError, ApiResponse, AppState, CreateListRequest, SavedListDto};
use crate::constants::limits;
use crate::db::NewSavedList;
use crate::domain::UserId;

/// `POST /api/lists`
pub async fn create_list(
    State(state): State<Arc<AppState>>,
    ActingUser(user): ActingUser,
    Json(req): Json<CreateListRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SavedListDto>>), ApiError> {
    let list = NewSavedList {
        user_id: user,
        name: validate_text("List name", &req.name, limits::NAME_MAX_CHARS)?,
        description: validate_optional_text(
            "List description",
            req.description.as_deref(),
            limits::DESCRIPTION_MAX_CHARS,
        )?,
        is_public: req.is_public,
    };

    let list = state.store().create_saved_list(list).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(SavedListDto {
            list,
            spot_ids: Vec::new(),
        })),
    ))
}

/// `GET /api/users/{id}/lists`
///
/// Other users only see public lists.
pub async fn user_lists(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    MaybeUser(viewer): MaybeUser,
) -> Result<Json<ApiResponse<Vec<SavedListDto>>>, ApiError> {
    let owner = UserId::from(user_id);
    let is_owner = viewer.as_ref() == Some(&owner);

    let lists = state
        .store()
        .get_saved_lists_for_user(&owner)
        .await?
        .into_iter()
        .filter(|(list, _)| is_owner || list.is_public)
        .map(|(list, spot_ids)| SavedListDto { list, spot_ids })
        .collect();

    Ok(Json(ApiResponse::success(lists)))
}
