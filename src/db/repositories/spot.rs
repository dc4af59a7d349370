use crate::domain::{CategoryId, SortBy, Spot, SpotId, SpotSearchParams, UserId};
use crate::entities::{
    comments, photos, prelude::*, saved_list_spots, spot_categories, spot_visits, spots,
};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, LikeExpr, OnConflict, Query};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

// SQLite binds LIMIT/OFFSET as signed 64-bit integers.
const MAX_ROWS: u64 = i64::MAX.unsigned_abs();

/// `%q%` with LIKE wildcards in `q` escaped, so the query matches literally.
fn contains_pattern(q: &str) -> String {
    let mut pattern = String::with_capacity(q.len() + 2);
    pattern.push('%');
    for c in q.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub struct SpotRepository {
    conn: DatabaseConnection,
}

fn encode_list<T: Serialize>(values: Option<&[T]>) -> Option<String> {
    values.and_then(|v| serde_json::to_string(v).ok())
}

fn decode_list<T: DeserializeOwned>(raw: Option<&str>) -> Option<Vec<T>> {
    raw.and_then(|s| serde_json::from_str(s).ok())
}

fn position(index: usize) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX)
}

impl SpotRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model_to_spot(
        model: spots::Model,
        category_ids: Vec<CategoryId>,
        photos: Vec<String>,
    ) -> Spot {
        Spot {
            id: SpotId::new(model.id),
            name: model.name,
            description: model.description,
            latitude: model.latitude,
            longitude: model.longitude,
            address: model.address,
            category_ids,
            user_id: UserId::new(model.user_id),
            photos,
            best_seasons: decode_list(model.best_seasons.as_deref()),
            best_time_of_day: decode_list(model.best_time_of_day.as_deref()),
            hidden_gem_rating: model.hidden_gem_rating,
            special_experience: model.special_experience,
            visit_count: model.visit_count,
            save_count: model.save_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }

    /// Every filter of `params` as one `SELECT`, without ordering or paging.
    fn filtered(params: &SpotSearchParams) -> Select<Spots> {
        let mut query = Spots::find();

        // SQLite LIKE folds ASCII case only: "cafe" finds "CAFE" but "café"
        // does not find "CAFÉ".
        if let Some(q) = params.text_query() {
            let pattern = contains_pattern(q);
            let like = |column: spots::Column| {
                Expr::col((Spots, column)).like(LikeExpr::new(pattern.clone()).escape('\\'))
            };
            query = query.filter(
                Condition::any()
                    .add(like(spots::Column::Name))
                    .add(like(spots::Column::Description))
                    .add(like(spots::Column::Address)),
            );
        }

        if let Some(user) = &params.user_id {
            query = query.filter(spots::Column::UserId.eq(user.as_str()));
        }

        // IN (subquery) instead of a join keeps one row per spot.
        if !params.category_ids.is_empty() {
            let ids: Vec<&str> = params.category_ids.iter().map(CategoryId::as_str).collect();
            query = query.filter(
                spots::Column::Id.in_subquery(
                    Query::select()
                        .column(spot_categories::Column::SpotId)
                        .from(SpotCategories)
                        .and_where(spot_categories::Column::CategoryId.is_in(ids))
                        .to_owned(),
                ),
            );
        }

        if let Some(bbox) = params.spatial_filter() {
            query = query
                .filter(spots::Column::Latitude.between(bbox.min_lat, bbox.max_lat))
                .filter(spots::Column::Longitude.between(bbox.min_lon, bbox.max_lon));
        }

        query
    }

    fn sorted(query: Select<Spots>, sort_by: SortBy) -> Select<Spots> {
        let query = match sort_by {
            SortBy::Newest => query.order_by_desc(spots::Column::CreatedAt),
            SortBy::Popular => query.order_by_desc(spots::Column::VisitCount),
            SortBy::HiddenGem => query.order_by_desc(spots::Column::HiddenGemRating),
        };
        query.order_by_asc(spots::Column::Id)
    }

    pub async fn search(&self, params: &SpotSearchParams) -> Result<Vec<Spot>> {
        debug!(
            query = ?params.text_query(),
            categories = params.category_ids.len(),
            spatial = params.spatial_filter().is_some(),
            sort = %params.sort_by,
            limit = params.page.limit,
            offset = params.page.offset,
            "Searching spots"
        );

        let models = Self::sorted(Self::filtered(params), params.sort_by)
            .offset(params.page.offset.min(MAX_ROWS))
            .limit(params.page.limit.min(MAX_ROWS))
            .all(&self.conn)
            .await?;

        self.hydrate(models).await
    }

    pub async fn count(&self, params: &SpotSearchParams) -> Result<u64> {
        let total = Self::filtered(params).count(&self.conn).await?;
        Ok(total)
    }

    pub async fn get(&self, id: &SpotId) -> Result<Option<Spot>> {
        let Some(model) = Spots::find_by_id(id.as_str()).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut spots = self.hydrate(vec![model]).await?;
        Ok(spots.pop())
    }

    /// Attaches category ids and photo URLs to a page of rows using one
    /// batched query per child table.
    async fn hydrate(&self, models: Vec<spots::Model>) -> Result<Vec<Spot>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = models.iter().map(|m| m.id.clone()).collect();

        let (category_rows, photo_rows) = tokio::try_join!(
            SpotCategories::find()
                .filter(spot_categories::Column::SpotId.is_in(ids.clone()))
                .order_by_asc(spot_categories::Column::Position)
                .all(&self.conn),
            Photos::find()
                .filter(photos::Column::SpotId.is_in(ids))
                .order_by_asc(photos::Column::Position)
                .all(&self.conn),
        )?;

        let mut categories: HashMap<String, Vec<CategoryId>> = HashMap::new();
        for row in category_rows {
            categories
                .entry(row.spot_id)
                .or_default()
                .push(CategoryId::new(row.category_id));
        }

        let mut photo_urls: HashMap<String, Vec<String>> = HashMap::new();
        for row in photo_rows {
            photo_urls.entry(row.spot_id).or_default().push(row.url);
        }

        Ok(models
            .into_iter()
            .map(|model| {
                let category_ids = categories.remove(&model.id).unwrap_or_default();
                let photos = photo_urls.remove(&model.id).unwrap_or_default();
                Self::map_model_to_spot(model, category_ids, photos)
            })
            .collect())
    }

    async fn insert_children<C: ConnectionTrait>(conn: &C, spot: &Spot) -> Result<()> {
        let mut seen = HashSet::new();
        let category_models: Vec<spot_categories::ActiveModel> = spot
            .category_ids
            .iter()
            .filter(|id| seen.insert(id.as_str()))
            .enumerate()
            .map(|(index, category_id)| spot_categories::ActiveModel {
                spot_id: Set(spot.id.to_string()),
                category_id: Set(category_id.to_string()),
                position: Set(position(index)),
            })
            .collect();

        if !category_models.is_empty() {
            SpotCategories::insert_many(category_models)
                .exec_without_returning(conn)
                .await?;
        }

        let photo_models: Vec<photos::ActiveModel> = spot
            .photos
            .iter()
            .enumerate()
            .map(|(index, url)| photos::ActiveModel {
                id: Set(uuid::Uuid::new_v4().to_string()),
                spot_id: Set(spot.id.to_string()),
                url: Set(url.clone()),
                caption: Set(None),
                position: Set(position(index)),
                created_at: Set(spot.updated_at),
            })
            .collect();

        if !photo_models.is_empty() {
            Photos::insert_many(photo_models)
                .exec_without_returning(conn)
                .await?;
        }

        Ok(())
    }

    async fn delete_children<C: ConnectionTrait>(conn: &C, id: &str) -> Result<()> {
        SpotCategories::delete_many()
            .filter(spot_categories::Column::SpotId.eq(id))
            .exec(conn)
            .await?;

        Photos::delete_many()
            .filter(photos::Column::SpotId.eq(id))
            .exec(conn)
            .await?;

        Ok(())
    }

    pub async fn create(&self, spot: &Spot) -> Result<()> {
        let txn = self.conn.begin().await?;

        Spots::insert(spots::ActiveModel {
            id: Set(spot.id.to_string()),
            name: Set(spot.name.clone()),
            description: Set(spot.description.clone()),
            latitude: Set(spot.latitude),
            longitude: Set(spot.longitude),
            address: Set(spot.address.clone()),
            user_id: Set(spot.user_id.to_string()),
            hidden_gem_rating: Set(spot.hidden_gem_rating),
            special_experience: Set(spot.special_experience.clone()),
            best_seasons: Set(encode_list(spot.best_seasons.as_deref())),
            best_time_of_day: Set(encode_list(spot.best_time_of_day.as_deref())),
            visit_count: Set(spot.visit_count),
            save_count: Set(spot.save_count),
            created_at: Set(spot.created_at),
            updated_at: Set(spot.updated_at),
        })
        .exec_without_returning(&txn)
        .await?;

        Self::insert_children(&txn, spot).await?;

        txn.commit().await?;
        info!(spot_id = %spot.id, name = %spot.name, "Created spot");
        Ok(())
    }

    /// Writes the descriptive fields of `spot`. Counters are left to the
    /// atomic increments. With `replace_children` the category and photo rows
    /// are deleted and re-inserted in the same transaction.
    pub async fn update(&self, spot: &Spot, replace_children: bool) -> Result<bool> {
        let txn = self.conn.begin().await?;

        let result = Spots::update_many()
            .set(spots::ActiveModel {
                name: Set(spot.name.clone()),
                description: Set(spot.description.clone()),
                address: Set(spot.address.clone()),
                hidden_gem_rating: Set(spot.hidden_gem_rating),
                special_experience: Set(spot.special_experience.clone()),
                best_seasons: Set(encode_list(spot.best_seasons.as_deref())),
                best_time_of_day: Set(encode_list(spot.best_time_of_day.as_deref())),
                updated_at: Set(spot.updated_at),
                ..Default::default()
            })
            .filter(spots::Column::Id.eq(spot.id.as_str()))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(false);
        }

        if replace_children {
            Self::delete_children(&txn, spot.id.as_str()).await?;
            Self::insert_children(&txn, spot).await?;
        }

        txn.commit().await?;
        info!(spot_id = %spot.id, replace_children, "Updated spot");
        Ok(true)
    }

    /// Removes a spot and everything that references it, children first.
    pub async fn delete(&self, id: &SpotId) -> Result<bool> {
        let txn = self.conn.begin().await?;
        let id = id.as_str();

        Self::delete_children(&txn, id).await?;

        Comments::delete_many()
            .filter(comments::Column::SpotId.eq(id))
            .exec(&txn)
            .await?;

        SavedListSpots::delete_many()
            .filter(saved_list_spots::Column::SpotId.eq(id))
            .exec(&txn)
            .await?;

        SpotVisits::delete_many()
            .filter(spot_visits::Column::SpotId.eq(id))
            .exec(&txn)
            .await?;

        let result = Spots::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        let removed = result.rows_affected > 0;
        if removed {
            info!(spot_id = %id, "Deleted spot");
        }
        Ok(removed)
    }

    async fn increment<C: ConnectionTrait>(
        conn: &C,
        id: &SpotId,
        column: spots::Column,
        at: DateTime<Utc>,
    ) -> Result<bool> {
        // Evaluated by the database, so concurrent increments never lose an update.
        let result = Spots::update_many()
            .col_expr(column, Expr::col(column).add(1))
            .col_expr(spots::Column::UpdatedAt, Expr::value(at))
            .filter(spots::Column::Id.eq(id.as_str()))
            .exec(conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn increment_visit_count(&self, id: &SpotId) -> Result<bool> {
        Self::increment(&self.conn, id, spots::Column::VisitCount, Utc::now()).await
    }

    pub async fn increment_save_count(&self, id: &SpotId) -> Result<bool> {
        Self::increment(&self.conn, id, spots::Column::SaveCount, Utc::now()).await
    }

    /// Counts a visit and, for a known visitor, appends a history row.
    pub async fn record_visit(&self, id: &SpotId, visitor: Option<&UserId>) -> Result<bool> {
        let Some(visitor) = visitor else {
            return self.increment_visit_count(id).await;
        };

        let txn = self.conn.begin().await?;
        let now = Utc::now();

        if !Self::increment(&txn, id, spots::Column::VisitCount, now).await? {
            txn.rollback().await?;
            return Ok(false);
        }

        SpotVisits::insert(spot_visits::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            spot_id: Set(id.to_string()),
            user_id: Set(visitor.to_string()),
            visited_at: Set(now),
        })
        .exec_without_returning(&txn)
        .await?;

        txn.commit().await?;
        Ok(true)
    }

    /// Counts a save and, when a list is given, adds the spot to it. Adding a
    /// spot that is already on the list is a no-op.
    pub async fn record_save(&self, id: &SpotId, list_id: Option<&str>) -> Result<bool> {
        let Some(list_id) = list_id else {
            return self.increment_save_count(id).await;
        };

        let txn = self.conn.begin().await?;
        let now = Utc::now();

        if !Self::increment(&txn, id, spots::Column::SaveCount, now).await? {
            txn.rollback().await?;
            return Ok(false);
        }

        SavedListSpots::insert(saved_list_spots::ActiveModel {
            saved_list_id: Set(list_id.to_string()),
            spot_id: Set(id.to_string()),
            added_at: Set(now),
        })
        .on_conflict(
            OnConflict::columns([
                saved_list_spots::Column::SavedListId,
                saved_list_spots::Column::SpotId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;

        txn.commit().await?;
        Ok(true)
    }

    pub async fn visit_history(&self, id: &SpotId) -> Result<Vec<spot_visits::Model>> {
        let rows = SpotVisits::find()
            .filter(spot_visits::Column::SpotId.eq(id.as_str()))
            .order_by_desc(spot_visits::Column::VisitedAt)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }
}
