//! Domain service for spot discovery.
//!
//! This module provides the [`SpotService`] trait: proximity and text search
//! with paging, plus the spot write paths (create, update, delete and the two
//! counters) that share its record store.

use crate::domain::{
    CategoryId, NewSpot, Page, SavedListId, SearchResult, Spot, SpotChanges, SpotId,
    SpotSearchParams, UserId,
};
use thiserror::Error;

/// Domain errors for spot operations.
///
/// Reads of a missing id are not errors (`Ok(None)`); writes against a
/// missing id are [`SpotError::NotFound`].
#[derive(Debug, Error)]
pub enum SpotError {
    #[error("Spot {0} not found")]
    NotFound(SpotId),

    #[error("User {user} cannot modify spot {spot}")]
    Forbidden { spot: SpotId, user: UserId },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl SpotError {
    /// Maps a store failure, keeping the name of the operation that failed.
    pub fn database(operation: &'static str) -> impl FnOnce(anyhow::Error) -> Self {
        move |err| Self::Database(format!("{operation}: {err:#}"))
    }
}

/// Drops spots farther than `radius_km` (haversine) from `center`.
///
/// The bounding box accepts its corners, which reach about 1.41 times the
/// radius; this is the optional tight-circle pass applied after it.
#[must_use]
pub fn within_radius(spots: Vec<Spot>, center: (f64, f64), radius_km: f64) -> Vec<Spot> {
    spots
        .into_iter()
        .filter(|spot| spot.distance_to(center.0, center.1) <= radius_km)
        .collect()
}

/// Domain service trait for spot operations.
#[async_trait::async_trait]
pub trait SpotService: Send + Sync {
    /// Fetches a single spot with its categories and photos.
    ///
    /// # Errors
    ///
    /// - Returns [`SpotError::Database`] on connection failures
    async fn get_spot(&self, id: &SpotId) -> Result<Option<Spot>, SpotError>;

    /// Runs a filtered, sorted and paged search together with the matching
    /// count, and derives `has_more`.
    ///
    /// # Errors
    ///
    /// - Returns [`SpotError::Database`] on connection failures
    async fn search_spots(&self, params: &SpotSearchParams) -> Result<SearchResult, SpotError>;

    /// Counts spots matching the filters of `params`, ignoring sort and page.
    ///
    /// # Errors
    ///
    /// - Returns [`SpotError::Database`] on connection failures
    async fn count_spots(&self, params: &SpotSearchParams) -> Result<u64, SpotError>;

    async fn spots_by_user(&self, user: &UserId, page: Page) -> Result<SearchResult, SpotError>;

    async fn spots_by_category(
        &self,
        category: &CategoryId,
        page: Page,
    ) -> Result<SearchResult, SpotError>;

    async fn nearby_spots(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
        page: Page,
    ) -> Result<SearchResult, SpotError>;

    /// Creates a spot. Callers validate the rating and text lengths first.
    ///
    /// # Errors
    ///
    /// - Returns [`SpotError::Validation`] if a category id is unknown
    /// - Returns [`SpotError::Database`] on connection failures
    async fn create_spot(&self, new: NewSpot) -> Result<Spot, SpotError>;

    /// Applies a change-set on behalf of the spot's owner.
    ///
    /// # Errors
    ///
    /// - Returns [`SpotError::NotFound`] if the spot does not exist
    /// - Returns [`SpotError::Forbidden`] if `acting_user` is not the owner
    /// - Returns [`SpotError::Validation`] if a category id is unknown
    /// - Returns [`SpotError::Database`] on connection failures
    async fn update_spot(
        &self,
        id: &SpotId,
        acting_user: &UserId,
        changes: SpotChanges,
    ) -> Result<Spot, SpotError>;

    /// Deletes a spot and every row that references it.
    ///
    /// # Errors
    ///
    /// - Returns [`SpotError::NotFound`] if the spot does not exist
    /// - Returns [`SpotError::Forbidden`] if `acting_user` is not the owner
    /// - Returns [`SpotError::Database`] on connection failures
    async fn delete_spot(&self, id: &SpotId, acting_user: &UserId) -> Result<(), SpotError>;

    /// Counts a visit and returns the refreshed spot.
    ///
    /// # Errors
    ///
    /// - Returns [`SpotError::NotFound`] if the spot does not exist
    /// - Returns [`SpotError::Database`] on connection failures
    async fn visit_spot(&self, id: &SpotId, visitor: Option<&UserId>) -> Result<Spot, SpotError>;

    /// Counts a save, optionally adding the spot to one of the user's lists.
    ///
    /// # Errors
    ///
    /// - Returns [`SpotError::NotFound`] if the spot does not exist
    /// - Returns [`SpotError::Validation`] if the list does not exist
    /// - Returns [`SpotError::Forbidden`] if the list belongs to another user
    /// - Returns [`SpotError::Database`] on connection failures
    async fn save_spot(
        &self,
        id: &SpotId,
        user: &UserId,
        list: Option<&SavedListId>,
    ) -> Result<Spot, SpotError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spot_at(id: &str, latitude: f64, longitude: f64) -> Spot {
        Spot::create(NewSpot {
            id: Some(SpotId::new(id)),
            latitude,
            longitude,
            ..Default::default()
        })
    }

    #[test]
    fn test_within_radius_drops_box_corners() {
        let center = (35.689, 139.692);
        let bbox = crate::geo::bounding_box(center.0, center.1, 10.0);

        let spots = vec![
            spot_at("center", center.0, center.1),
            spot_at("corner", bbox.max_lat, bbox.max_lon),
        ];

        let kept = within_radius(spots, center, 10.0);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id.as_str(), "center");
    }

    #[test]
    fn test_error_display() {
        let err = SpotError::NotFound(SpotId::new("abc"));
        assert_eq!(err.to_string(), "Spot abc not found");

        let err = SpotError::Forbidden {
            spot: SpotId::new("abc"),
            user: UserId::new("mallory"),
        };
        assert_eq!(err.to_string(), "User mallory cannot modify spot abc");
    }

    #[test]
    fn test_database_error_keeps_operation() {
        let err = SpotError::database("search spots")(anyhow::anyhow!("disk I/O error"));
        assert_eq!(err.to_string(), "Database error: search spots: disk I/O error");
    }
}
