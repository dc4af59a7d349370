//! Spot endpoints.
//!
//! Handlers validate input, translate it into [`SpotSearchParams`],
//! [`NewSpot`](crate::domain::NewSpot) or [`SpotChanges`](crate::domain::SpotChanges)
//! and delegate to the [`SpotService`](crate::services::SpotService).

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::auth::{ActingUser, MaybeUser};
use super::validation::{
    parse_category_list, validate_center, validate_coordinates, validate_create_spot,
    validate_page, validate_radius, validate_sort, validate_update_spot,
};
use super::{
    ApiError, ApiResponse, AppState, CreateSpotRequest, NearbyQuery, PageQuery, SaveSpotRequest,
    SearchResponse, SpotDto, SpotListQuery, SpotSearchInput, UpdateSpotRequest,
};
use crate::domain::{SpotId, SpotSearchParams, UserId};
use crate::services::SpotError;

impl From<SpotError> for ApiError {
    fn from(err: SpotError) -> Self {
        match err {
            SpotError::NotFound(id) => Self::not_found("Spot", id),
            SpotError::Forbidden { .. } => Self::Forbidden(err.to_string()),
            SpotError::Validation(msg) => Self::validation(msg),
            SpotError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

/// Shared tail of the search endpoints: runs the search and attaches
/// distances when a center was given.
async fn run_search(
    state: &AppState,
    params: SpotSearchParams,
) -> Result<Json<ApiResponse<SearchResponse>>, ApiError> {
    let center = params.center();
    let result = state.spot_service().search_spots(&params).await?;
    Ok(Json(ApiResponse::success(SearchResponse::new(
        result, center,
    ))))
}

/// `GET /api/spots`
pub async fn list_spots(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SpotListQuery>,
) -> Result<Json<ApiResponse<SearchResponse>>, ApiError> {
    let search = state.config().read().await.search.clone();

    let page = validate_page(query.limit, query.offset, &search)?;
    let sort_by = validate_sort(query.sort_by.as_deref())?;
    let center = validate_center(
        query.lat,
        query.lon,
        query.radius_km,
        search.default_radius_km,
    )?;

    let mut params = SpotSearchParams::new()
        .with_categories(parse_category_list(query.category_ids.as_deref()))
        .with_page(page)
        .sorted_by(sort_by);

    if let Some(q) = query.q {
        params = params.with_query(q);
    }
    if let Some((lat, lon, radius)) = center {
        params = params.near(lat, lon, radius);
    }

    run_search(&state, params).await
}

/// `POST /api/spots/search`
pub async fn search_spots(
    State(state): State<Arc<AppState>>,
    Json(input): Json<SpotSearchInput>,
) -> Result<Json<ApiResponse<SearchResponse>>, ApiError> {
    let search = state.config().read().await.search.clone();

    let page = validate_page(input.limit, input.offset, &search)?;
    let center = validate_center(
        input.nearby_latitude,
        input.nearby_longitude,
        input.radius_km,
        search.default_radius_km,
    )?;

    let mut params = SpotSearchParams::new()
        .with_categories(input.category_ids)
        .with_page(page)
        .sorted_by(input.sort_by.unwrap_or_default());

    if let Some(query) = input.query {
        params = params.with_query(query);
    }
    if let Some((lat, lon, radius)) = center {
        params = params.near(lat, lon, radius);
    }

    run_search(&state, params).await
}

/// `GET /api/spots/nearby`
pub async fn nearby_spots(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<ApiResponse<SearchResponse>>, ApiError> {
    let search = state.config().read().await.search.clone();

    let page = validate_page(query.limit, query.offset, &search)?;
    let (lat, lon) = validate_coordinates(query.lat, query.lon)?;
    let radius = validate_radius(query.radius_km.unwrap_or(search.default_radius_km))?;

    let result = state
        .spot_service()
        .nearby_spots(lat, lon, radius, page)
        .await?;

    Ok(Json(ApiResponse::success(SearchResponse::new(
        result,
        Some((lat, lon)),
    ))))
}

/// `GET /api/users/{id}/spots`
pub async fn user_spots(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<SearchResponse>>, ApiError> {
    let search = state.config().read().await.search.clone();
    let page = validate_page(query.limit, query.offset, &search)?;

    let result = state
        .spot_service()
        .spots_by_user(&UserId::from(user_id), page)
        .await?;

    Ok(Json(ApiResponse::success(SearchResponse::new(result, None))))
}

/// `GET /api/spots/{id}`
pub async fn get_spot(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<SpotDto>>, ApiError> {
    let id = SpotId::from(id);
    let spot = state
        .spot_service()
        .get_spot(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Spot", &id))?;

    Ok(Json(ApiResponse::success(SpotDto::new(spot, None))))
}

/// `POST /api/spots`
pub async fn create_spot(
    State(state): State<Arc<AppState>>,
    ActingUser(user): ActingUser,
    Json(req): Json<CreateSpotRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SpotDto>>), ApiError> {
    let new = validate_create_spot(req, user)?;
    let spot = state.spot_service().create_spot(new).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(SpotDto::new(spot, None))),
    ))
}

/// `PUT /api/spots/{id}`
pub async fn update_spot(
    State(state): State<Arc<AppState>>,
    ActingUser(user): ActingUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateSpotRequest>,
) -> Result<Json<ApiResponse<SpotDto>>, ApiError> {
    let changes = validate_update_spot(req)?;
    let spot = state
        .spot_service()
        .update_spot(&SpotId::from(id), &user, changes)
        .await?;

    Ok(Json(ApiResponse::success(SpotDto::new(spot, None))))
}

/// `DELETE /api/spots/{id}`
pub async fn delete_spot(
    State(state): State<Arc<AppState>>,
    ActingUser(user): ActingUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .spot_service()
        .delete_spot(&SpotId::from(id), &user)
        .await?;

    Ok(Json(ApiResponse::success(())))
}

/// `POST /api/spots/{id}/visit`
///
/// Anonymous visits only bump the counter; a known visitor is also recorded
/// in the visit history.
pub async fn visit_spot(
    State(state): State<Arc<AppState>>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<SpotDto>>, ApiError> {
    let spot = state
        .spot_service()
        .visit_spot(&SpotId::from(id), user.as_ref())
        .await?;

    Ok(Json(ApiResponse::success(SpotDto::new(spot, None))))
}

/// `POST /api/spots/{id}/save`
///
/// The body is optional; `{"listId": "..."}` also files the spot in one of
/// the caller's saved lists.
pub async fn save_spot(
    State(state): State<Arc<AppState>>,
    ActingUser(user): ActingUser,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<ApiResponse<SpotDto>>, ApiError> {
    let req: SaveSpotRequest = if body.iter().all(u8::is_ascii_whitespace) {
        SaveSpotRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::validation(format!("Invalid request body: {e}")))?
    };

    let spot = state
        .spot_service()
        .save_spot(&SpotId::from(id), &user, req.list_id.as_ref())
        .await?;

    Ok(Json(ApiResponse::success(SpotDto::new(spot, None))))
}
