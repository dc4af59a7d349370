//! Search inputs and result pages.

use serde::Serialize;

use super::{CategoryId, SortBy, Spot, UserId};
use crate::constants::search::{DEFAULT_LIMIT, DEFAULT_OFFSET};
use crate::geo::{BoundingBox, bounding_box};

/// Limit/offset window applied after sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u64,
    pub offset: u64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl Page {
    #[must_use]
    pub const fn new(limit: u64, offset: u64) -> Self {
        Self { limit, offset }
    }
}

/// Filters for a spot search. Every filter that is present is AND-ed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpotSearchParams {
    /// Case-insensitive substring over name, description and address.
    pub query: Option<String>,
    /// "Any of" membership.
    pub category_ids: Vec<CategoryId>,
    pub user_id: Option<UserId>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_km: Option<f64>,
    pub page: Page,
    pub sort_by: SortBy,
}

impl SpotSearchParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    #[must_use]
    pub fn with_categories<I, C>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<CategoryId>,
    {
        self.category_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_user(mut self, user: UserId) -> Self {
        self.user_id = Some(user);
        self
    }

    #[must_use]
    pub const fn near(mut self, latitude: f64, longitude: f64, radius_km: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self.radius_km = Some(radius_km);
        self
    }

    #[must_use]
    pub const fn with_page(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    #[must_use]
    pub const fn sorted_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    /// The trimmed text query, or `None` when it is absent or blank.
    #[must_use]
    pub fn text_query(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }

    /// Center of the proximity search when both coordinates are present.
    #[must_use]
    pub fn center(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => Some((lat, lon)),
            _ => None,
        }
    }

    /// Box to filter on. A partial or unusable center/radius combination
    /// disables the spatial filter instead of failing the search.
    #[must_use]
    pub fn spatial_filter(&self) -> Option<BoundingBox> {
        let (lat, lon) = self.center()?;
        let radius = self.radius_km.filter(|r| r.is_finite() && *r >= 0.0)?;
        Some(bounding_box(lat, lon, radius))
    }

    /// Same filters without the page window, for counting.
    #[must_use]
    pub fn unpaged(&self) -> Self {
        Self {
            page: Page::new(u64::MAX, 0),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub spots: Vec<Spot>,
    pub total_count: u64,
    pub has_more: bool,
}

impl SearchResult {
    #[must_use]
    pub fn new(spots: Vec<Spot>, total_count: u64, offset: u64) -> Self {
        let seen = offset.saturating_add(spots.len() as u64);
        Self {
            has_more: total_count > seen,
            spots,
            total_count,
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewSpot, SpotId};

    fn spot(id: &str) -> Spot {
        Spot::create(NewSpot {
            id: Some(SpotId::new(id)),
            ..Default::default()
        })
    }

    #[test]
    fn test_defaults() {
        let params = SpotSearchParams::new();
        assert_eq!(params.page.limit, 20);
        assert_eq!(params.page.offset, 0);
        assert_eq!(params.sort_by, SortBy::Newest);
        assert!(params.spatial_filter().is_none());
        assert!(params.text_query().is_none());
    }

    #[test]
    fn test_blank_query_is_no_filter() {
        let params = SpotSearchParams::new().with_query("   ");
        assert!(params.text_query().is_none());

        let params = SpotSearchParams::new().with_query("  lane ");
        assert_eq!(params.text_query(), Some("lane"));
    }

    #[test]
    fn test_partial_geo_input_disables_spatial_filter() {
        let mut params = SpotSearchParams::new();
        params.latitude = Some(35.0);
        params.radius_km = Some(10.0);
        assert!(params.spatial_filter().is_none());

        let mut params = SpotSearchParams::new();
        params.latitude = Some(35.0);
        params.longitude = Some(139.0);
        assert!(params.spatial_filter().is_none());
        assert!(params.center().is_some());

        let params = SpotSearchParams::new().near(35.0, 139.0, 10.0);
        let bbox = params.spatial_filter().unwrap();
        assert!(bbox.contains(35.0, 139.0));
    }

    #[test]
    fn test_negative_radius_disables_spatial_filter() {
        let params = SpotSearchParams::new().near(35.0, 139.0, -1.0);
        assert!(params.spatial_filter().is_none());
    }

    #[test]
    fn test_has_more() {
        let page = vec![spot("a"), spot("b")];
        assert!(SearchResult::new(page.clone(), 5, 0).has_more);
        assert!(!SearchResult::new(page.clone(), 2, 0).has_more);
        assert!(!SearchResult::new(page, 4, 2).has_more);
        assert!(SearchResult::new(vec![], 4, 2).has_more);
        assert!(!SearchResult::empty().has_more);
    }

    #[test]
    fn test_unpaged_keeps_filters() {
        let params = SpotSearchParams::new()
            .with_query("cafe")
            .with_categories(["food"])
            .with_page(Page::new(1, 3));
        let unpaged = params.unpaged();

        assert_eq!(unpaged.query, params.query);
        assert_eq!(unpaged.category_ids, params.category_ids);
        assert_eq!(unpaged.page.offset, 0);
        assert_eq!(unpaged.page.limit, u64::MAX);
    }
}
