//! `SeaORM` implementation of the `SpotService` trait.
//!
//! Search and count are issued concurrently against the [`Store`]; counters
//! are incremented by the database itself. Store failures are mapped to
//! [`SpotError::Database`] with the failing operation named.

use crate::config::Config;
use crate::db::Store;
use crate::domain::{
    CategoryId, NewSpot, Page, SavedListId, SearchResult, Spot, SpotChanges, SpotId,
    SpotSearchParams, UserId,
};
use crate::services::spot_service::{SpotError, SpotService, within_radius};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{debug, info};

pub struct SeaOrmSpotService {
    store: Arc<Store>,
    config: Arc<RwLock<Config>>,
}

impl SeaOrmSpotService {
    #[must_use]
    pub const fn new(store: Arc<Store>, config: Arc<RwLock<Config>>) -> Self {
        Self { store, config }
    }

    async fn exact_radius(&self) -> bool {
        self.config.read().await.search.exact_radius
    }

    async fn require_known_categories(&self, ids: &[CategoryId]) -> Result<(), SpotError> {
        let unknown = self
            .store
            .unknown_category_ids(ids)
            .await
            .map_err(SpotError::database("check categories"))?;

        if unknown.is_empty() {
            Ok(())
        } else {
            let names: Vec<&str> = unknown.iter().map(CategoryId::as_str).collect();
            Err(SpotError::Validation(format!(
                "Unknown category: {}",
                names.join(", ")
            )))
        }
    }

    /// Loads a spot that `user` is allowed to modify.
    async fn owned_spot(&self, id: &SpotId, user: &UserId) -> Result<Spot, SpotError> {
        let spot = self
            .store
            .get_spot(id)
            .await
            .map_err(SpotError::database("load spot"))?
            .ok_or_else(|| SpotError::NotFound(id.clone()))?;

        if !spot.is_owned_by(user) {
            return Err(SpotError::Forbidden {
                spot: id.clone(),
                user: user.clone(),
            });
        }

        Ok(spot)
    }

    async fn reload(&self, id: &SpotId) -> Result<Spot, SpotError> {
        self.store
            .get_spot(id)
            .await
            .map_err(SpotError::database("load spot"))?
            .ok_or_else(|| SpotError::NotFound(id.clone()))
    }
}

fn record_mutation(op: &'static str) {
    metrics::counter!("spot_mutations_total", "op" => op).increment(1);
}

#[async_trait::async_trait]
impl SpotService for SeaOrmSpotService {
    async fn get_spot(&self, id: &SpotId) -> Result<Option<Spot>, SpotError> {
        self.store
            .get_spot(id)
            .await
            .map_err(SpotError::database("get spot"))
    }

    /// With `exact_radius` the haversine pass trims the returned page only.
    /// `total_count` stays the bounding-box count and `has_more` is derived
    /// from the untrimmed page, so it still means "rows past this window".
    async fn search_spots(&self, params: &SpotSearchParams) -> Result<SearchResult, SpotError> {
        let start = Instant::now();

        let (spots, total) = tokio::join!(
            self.store.search_spots(params),
            self.store.count_spots(params)
        );

        let spots = spots.map_err(SpotError::database("search spots"))?;
        let total = total.map_err(SpotError::database("count spots"))?;
        let mut result = SearchResult::new(spots, total, params.page.offset);

        if params.spatial_filter().is_some()
            && self.exact_radius().await
            && let (Some(center), Some(radius)) = (params.center(), params.radius_km)
        {
            result.spots = within_radius(result.spots, center, radius);
        }

        metrics::counter!("spot_searches_total", "sort" => params.sort_by.as_str()).increment(1);
        metrics::histogram!("spot_search_duration_seconds").record(start.elapsed().as_secs_f64());

        debug!(
            returned = result.spots.len(),
            total,
            elapsed_ms = start.elapsed().as_millis(),
            "Spot search finished"
        );

        Ok(result)
    }

    async fn count_spots(&self, params: &SpotSearchParams) -> Result<u64, SpotError> {
        self.store
            .count_spots(params)
            .await
            .map_err(SpotError::database("count spots"))
    }

    async fn spots_by_user(&self, user: &UserId, page: Page) -> Result<SearchResult, SpotError> {
        let params = SpotSearchParams::new()
            .with_user(user.clone())
            .with_page(page);
        self.search_spots(&params).await
    }

    async fn spots_by_category(
        &self,
        category: &CategoryId,
        page: Page,
    ) -> Result<SearchResult, SpotError> {
        let params = SpotSearchParams::new()
            .with_categories([category.clone()])
            .with_page(page);
        self.search_spots(&params).await
    }

    async fn nearby_spots(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
        page: Page,
    ) -> Result<SearchResult, SpotError> {
        let params = SpotSearchParams::new()
            .near(latitude, longitude, radius_km)
            .with_page(page);
        self.search_spots(&params).await
    }

    async fn create_spot(&self, new: NewSpot) -> Result<Spot, SpotError> {
        self.require_known_categories(&new.category_ids).await?;

        let spot = Spot::create(new);
        self.store
            .create_spot(&spot)
            .await
            .map_err(SpotError::database("create spot"))?;

        record_mutation("create");
        Ok(spot)
    }

    async fn update_spot(
        &self,
        id: &SpotId,
        acting_user: &UserId,
        changes: SpotChanges,
    ) -> Result<Spot, SpotError> {
        let current = self.owned_spot(id, acting_user).await?;

        if let Some(category_ids) = &changes.category_ids {
            self.require_known_categories(category_ids).await?;
        }

        let replace_children = changes.touches_children();
        let updated = current.update(changes);

        let written = self
            .store
            .update_spot(&updated, replace_children)
            .await
            .map_err(SpotError::database("update spot"))?;

        if !written {
            return Err(SpotError::NotFound(id.clone()));
        }

        record_mutation("update");
        self.reload(id).await
    }

    async fn delete_spot(&self, id: &SpotId, acting_user: &UserId) -> Result<(), SpotError> {
        self.owned_spot(id, acting_user).await?;

        let removed = self
            .store
            .delete_spot(id)
            .await
            .map_err(SpotError::database("delete spot"))?;

        if !removed {
            return Err(SpotError::NotFound(id.clone()));
        }

        record_mutation("delete");
        info!(spot_id = %id, user_id = %acting_user, "Spot deleted by owner");
        Ok(())
    }

    async fn visit_spot(&self, id: &SpotId, visitor: Option<&UserId>) -> Result<Spot, SpotError> {
        let counted = self
            .store
            .record_visit(id, visitor)
            .await
            .map_err(SpotError::database("count visit"))?;

        if !counted {
            return Err(SpotError::NotFound(id.clone()));
        }

        record_mutation("visit");
        self.reload(id).await
    }

    async fn save_spot(
        &self,
        id: &SpotId,
        user: &UserId,
        list: Option<&SavedListId>,
    ) -> Result<Spot, SpotError> {
        if let Some(list_id) = list {
            let saved_list = self
                .store
                .get_saved_list(list_id)
                .await
                .map_err(SpotError::database("load saved list"))?
                .ok_or_else(|| {
                    SpotError::Validation(format!("Saved list {list_id} not found"))
                })?;

            if saved_list.user_id != user.as_str() {
                return Err(SpotError::Forbidden {
                    spot: id.clone(),
                    user: user.clone(),
                });
            }
        }

        let counted = self
            .store
            .record_save(id, list)
            .await
            .map_err(SpotError::database("count save"))?;

        if !counted {
            return Err(SpotError::NotFound(id.clone()));
        }

        record_mutation("save");
        self.reload(id).await
    }
}
