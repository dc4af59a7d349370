//! The `Spot` value type.
//!
//! A `Spot` is never mutated in place. [`Spot::create`] fixes the defaults of a
//! new record, [`Spot::update`] and the two `with_*_counted` methods return a
//! fresh value with `updated_at` refreshed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CategoryId, Season, SpotId, TimeOfDay, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spot {
    pub id: SpotId,
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    /// In display order.
    pub category_ids: Vec<CategoryId>,
    pub user_id: UserId,
    /// Photo URLs in display order.
    pub photos: Vec<String>,
    pub best_seasons: Option<Vec<Season>>,
    pub best_time_of_day: Option<Vec<TimeOfDay>>,
    pub hidden_gem_rating: i32,
    pub special_experience: Option<String>,
    pub visit_count: i64,
    pub save_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for [`Spot::create`].
///
/// Counters and timestamps are only supplied when rehydrating or seeding;
/// left empty they default to zero and now.
#[derive(Debug, Clone, Default)]
pub struct NewSpot {
    pub id: Option<SpotId>,
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub category_ids: Vec<CategoryId>,
    pub user_id: UserId,
    pub photos: Vec<String>,
    pub best_seasons: Option<Vec<Season>>,
    pub best_time_of_day: Option<Vec<TimeOfDay>>,
    pub hidden_gem_rating: i32,
    pub special_experience: Option<String>,
    pub visit_count: Option<i64>,
    pub save_count: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial change-set for [`Spot::update`].
///
/// `None` keeps the current value. For nullable fields `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpotChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<Option<String>>,
    pub category_ids: Option<Vec<CategoryId>>,
    pub photos: Option<Vec<String>>,
    pub best_seasons: Option<Option<Vec<Season>>>,
    pub best_time_of_day: Option<Option<Vec<TimeOfDay>>>,
    pub hidden_gem_rating: Option<i32>,
    pub special_experience: Option<Option<String>>,
}

impl SpotChanges {
    #[must_use]
    pub const fn touches_children(&self) -> bool {
        self.category_ids.is_some() || self.photos.is_some()
    }
}

fn empty_to_none(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl Spot {
    #[must_use]
    pub fn create(new: NewSpot) -> Self {
        let now = Utc::now();
        let created_at = new.created_at.unwrap_or(now);
        let updated_at = new.updated_at.unwrap_or(now).max(created_at);

        Self {
            id: new.id.unwrap_or_else(SpotId::generate),
            name: new.name,
            description: new.description,
            latitude: new.latitude,
            longitude: new.longitude,
            address: empty_to_none(new.address),
            category_ids: new.category_ids,
            user_id: new.user_id,
            photos: new.photos,
            best_seasons: new.best_seasons,
            best_time_of_day: new.best_time_of_day,
            hidden_gem_rating: new.hidden_gem_rating,
            special_experience: empty_to_none(new.special_experience),
            visit_count: new.visit_count.unwrap_or(0).max(0),
            save_count: new.save_count.unwrap_or(0).max(0),
            created_at,
            updated_at,
        }
    }

    /// Applies `changes` and returns the new value. Identity, owner,
    /// coordinates, counters and `created_at` are carried over untouched.
    #[must_use]
    pub fn update(&self, changes: SpotChanges) -> Self {
        let current = self.clone();

        Self {
            name: changes.name.unwrap_or(current.name),
            description: changes.description.unwrap_or(current.description),
            address: changes.address.unwrap_or(current.address),
            category_ids: changes.category_ids.unwrap_or(current.category_ids),
            photos: changes.photos.unwrap_or(current.photos),
            best_seasons: changes.best_seasons.unwrap_or(current.best_seasons),
            best_time_of_day: changes.best_time_of_day.unwrap_or(current.best_time_of_day),
            hidden_gem_rating: changes
                .hidden_gem_rating
                .unwrap_or(current.hidden_gem_rating),
            special_experience: changes
                .special_experience
                .unwrap_or(current.special_experience),
            updated_at: self.touched_at(),
            ..current
        }
    }

    #[must_use]
    pub fn with_visit_counted(&self) -> Self {
        Self {
            visit_count: self.visit_count + 1,
            updated_at: self.touched_at(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_save_counted(&self) -> Self {
        Self {
            save_count: self.save_count + 1,
            updated_at: self.touched_at(),
            ..self.clone()
        }
    }

    /// Kilometers from this spot to the given point.
    #[must_use]
    pub fn distance_to(&self, latitude: f64, longitude: f64) -> f64 {
        crate::geo::distance_km(self.latitude, self.longitude, latitude, longitude)
    }

    #[must_use]
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.user_id == user
    }

    // Clock skew must never move updated_at behind created_at.
    fn touched_at(&self) -> DateTime<Utc> {
        Utc::now().max(self.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample() -> Spot {
        Spot::create(NewSpot {
            name: "Cherry blossom lane".to_string(),
            description: "A quiet lane lined with old cherry trees".to_string(),
            latitude: 35.689,
            longitude: 139.692,
            category_ids: vec![CategoryId::new("nature"), CategoryId::new("photo")],
            user_id: UserId::new("user-1"),
            photos: vec!["https://example.com/lane.jpg".to_string()],
            hidden_gem_rating: 4,
            ..Default::default()
        })
    }

    #[test]
    fn test_create_applies_defaults() {
        let spot = sample();
        assert_eq!(spot.visit_count, 0);
        assert_eq!(spot.save_count, 0);
        assert!(spot.updated_at >= spot.created_at);
        assert!(!spot.id.as_str().is_empty());
        assert!(spot.address.is_none());
    }

    #[test]
    fn test_create_keeps_supplied_values() {
        let created = Utc::now() - Duration::days(3);
        let spot = Spot::create(NewSpot {
            id: Some(SpotId::new("fixed")),
            visit_count: Some(42),
            created_at: Some(created),
            updated_at: Some(created - Duration::days(1)),
            address: Some("  ".to_string()),
            ..Default::default()
        });

        assert_eq!(spot.id.as_str(), "fixed");
        assert_eq!(spot.visit_count, 42);
        assert_eq!(spot.created_at, created);
        assert_eq!(spot.updated_at, created);
        assert!(spot.address.is_none());
    }

    #[test]
    fn test_update_returns_new_value() {
        let an_hour_ago = Utc::now() - Duration::hours(1);
        let original = Spot::create(NewSpot {
            created_at: Some(an_hour_ago),
            updated_at: Some(an_hour_ago),
            address: Some("1-2-3 Shinjuku".to_string()),
            ..sample_new()
        });

        let updated = original.update(SpotChanges {
            name: Some("Renamed lane".to_string()),
            address: Some(None),
            hidden_gem_rating: Some(5),
            ..Default::default()
        });

        assert_eq!(original.name, "Cherry blossom lane");
        assert_eq!(updated.name, "Renamed lane");
        assert_eq!(updated.hidden_gem_rating, 5);
        assert!(updated.address.is_none());
        assert_eq!(updated.description, original.description);
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.user_id, original.user_id);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at > original.updated_at);
    }

    #[test]
    fn test_update_without_changes_keeps_fields() {
        let original = sample();
        let updated = original.update(SpotChanges::default());
        assert_eq!(updated.category_ids, original.category_ids);
        assert_eq!(updated.photos, original.photos);
        assert!(updated.updated_at >= original.updated_at);
    }

    #[test]
    fn test_counters_increment_by_one() {
        let spot = sample();
        let visited = spot.with_visit_counted().with_visit_counted();
        let saved = spot.with_save_counted();

        assert_eq!(visited.visit_count, 2);
        assert_eq!(visited.save_count, 0);
        assert_eq!(saved.save_count, 1);
        assert_eq!(spot.visit_count, 0);
    }

    #[test]
    fn test_touches_children() {
        assert!(!SpotChanges::default().touches_children());
        let changes = SpotChanges {
            photos: Some(vec![]),
            ..Default::default()
        };
        assert!(changes.touches_children());
    }

    fn sample_new() -> NewSpot {
        NewSpot {
            name: "Cherry blossom lane".to_string(),
            description: "A quiet lane lined with old cherry trees".to_string(),
            latitude: 35.689,
            longitude: 139.692,
            user_id: UserId::new("user-1"),
            hidden_gem_rating: 4,
            ..Default::default()
        }
    }
}
