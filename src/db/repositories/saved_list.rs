use crate::domain::{SavedListId, SpotId, UserId};
use crate::entities::{prelude::*, saved_list_spots, saved_lists};
use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

pub struct SavedListRepository {
    conn: DatabaseConnection,
}

pub struct NewSavedList {
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
}

impl SavedListRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, list: NewSavedList) -> Result<saved_lists::Model> {
        let now = Utc::now();
        let model = saved_lists::Model {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: list.user_id.into_inner(),
            name: list.name,
            description: list.description,
            is_public: list.is_public,
            created_at: now,
            updated_at: now,
        };

        SavedLists::insert(saved_lists::ActiveModel {
            id: Set(model.id.clone()),
            user_id: Set(model.user_id.clone()),
            name: Set(model.name.clone()),
            description: Set(model.description.clone()),
            is_public: Set(model.is_public),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .exec_without_returning(&self.conn)
        .await?;

        info!(list_id = %model.id, user_id = %model.user_id, "Created saved list");
        Ok(model)
    }

    pub async fn get(&self, id: &SavedListId) -> Result<Option<saved_lists::Model>> {
        let row = SavedLists::find_by_id(id.as_str()).one(&self.conn).await?;
        Ok(row)
    }

    /// Lists of a user with the ids of the spots on each, newest list first.
    pub async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<(saved_lists::Model, Vec<SpotId>)>> {
        let lists = SavedLists::find()
            .filter(saved_lists::Column::UserId.eq(user_id.as_str()))
            .order_by_desc(saved_lists::Column::CreatedAt)
            .order_by_asc(saved_lists::Column::Id)
            .all(&self.conn)
            .await?;

        let entries = lists.load_many(SavedListSpots, &self.conn).await?;

        Ok(lists
            .into_iter()
            .zip(entries)
            .map(|(list, mut spots)| {
                spots.sort_by(|a, b| a.added_at.cmp(&b.added_at));
                let ids = spots
                    .into_iter()
                    .map(|s: saved_list_spots::Model| SpotId::new(s.spot_id))
                    .collect();
                (list, ids)
            })
            .collect())
    }
}
