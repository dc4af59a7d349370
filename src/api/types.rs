use serde::{Deserialize, Deserializer, Serialize};

use crate::db::{Comment, SavedList};
use crate::domain::{SavedListId, SearchResult, Season, SortBy, Spot, SpotId, TimeOfDay};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// A spot as returned by the API. `distance_km` is only present when the
/// request supplied a center, and plays no part in filtering or ordering.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotDto {
    #[serde(flatten)]
    pub spot: Spot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl SpotDto {
    #[must_use]
    pub fn new(spot: Spot, center: Option<(f64, f64)>) -> Self {
        let distance_km = center.map(|(lat, lon)| spot.distance_to(lat, lon));
        Self { spot, distance_km }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub spots: Vec<SpotDto>,
    pub total_count: u64,
    pub has_more: bool,
}

impl SearchResponse {
    #[must_use]
    pub fn new(result: SearchResult, center: Option<(f64, f64)>) -> Self {
        Self {
            spots: result
                .spots
                .into_iter()
                .map(|spot| SpotDto::new(spot, center))
                .collect(),
            total_count: result.total_count,
            has_more: result.has_more,
        }
    }
}

/// Query string of `GET /spots`.
#[derive(Debug, Default, Deserialize)]
pub struct SpotListQuery {
    pub q: Option<String>,
    /// Comma separated category ids.
    pub category_ids: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub radius_km: Option<f64>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub sort_by: Option<String>,
}

/// JSON body of `POST /spots/search`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotSearchInput {
    pub query: Option<String>,
    #[serde(default)]
    pub category_ids: Vec<String>,
    pub nearby_latitude: Option<f64>,
    pub nearby_longitude: Option<f64>,
    pub radius_km: Option<f64>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub sort_by: Option<SortBy>,
}

#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lon: f64,
    pub radius_km: Option<f64>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpotRequest {
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub category_ids: Vec<String>,
    pub photos: Vec<String>,
    pub best_seasons: Option<Vec<Season>>,
    pub best_time_of_day: Option<Vec<TimeOfDay>>,
    pub hidden_gem_rating: i32,
    pub special_experience: Option<String>,
}

/// Partial update. For nullable fields an explicit `null` clears the value
/// while an absent key keeps it.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSpotRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub address: Option<Option<String>>,
    pub category_ids: Option<Vec<String>>,
    pub photos: Option<Vec<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub best_seasons: Option<Option<Vec<Season>>>,
    #[serde(default, deserialize_with = "nullable")]
    pub best_time_of_day: Option<Option<Vec<TimeOfDay>>>,
    pub hidden_gem_rating: Option<i32>,
    #[serde(default, deserialize_with = "nullable")]
    pub special_experience: Option<Option<String>>,
}

fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSpotRequest {
    pub list_id: Option<SavedListId>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedListDto {
    #[serde(flatten)]
    pub list: SavedList,
    pub spot_ids: Vec<SpotId>,
}

pub type CommentDto = Comment;
