use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::validation::validate_page;
use super::{ApiError, ApiResponse, AppState, PageQuery, SearchResponse};
use crate::db::Category;
use crate::domain::CategoryId;

/// `GET /api/categories`
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Category>>>, ApiError> {
    let categories = state.store().list_categories().await?;
    Ok(Json(ApiResponse::success(categories)))
}

/// `GET /api/categories/{id}/spots`
pub async fn category_spots(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<SearchResponse>>, ApiError> {
    let search = state.config().read().await.search.clone();
    let page = validate_page(query.limit, query.offset, &search)?;

    let id = CategoryId::from(id);
    if state.store().get_category(&id).await?.is_none() {
        return Err(ApiError::not_found("Category", &id));
    }

    let result = state.spot_service().spots_by_category(&id, page).await?;
    Ok(Json(ApiResponse::success(SearchResponse::new(result, None))))
}
