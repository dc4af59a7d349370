use crate::domain::{SpotId, UserId};
use crate::entities::{comments, prelude::*};
use anyhow::Result;
use chrono::Utc;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;

pub struct CommentRepository {
    conn: DatabaseConnection,
}

impl CommentRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(
        &self,
        spot_id: &SpotId,
        user_id: &UserId,
        content: &str,
    ) -> Result<comments::Model> {
        let now = Utc::now();
        let model = comments::Model {
            id: uuid::Uuid::new_v4().to_string(),
            spot_id: spot_id.to_string(),
            user_id: user_id.to_string(),
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        };

        Comments::insert(comments::ActiveModel {
            id: Set(model.id.clone()),
            spot_id: Set(model.spot_id.clone()),
            user_id: Set(model.user_id.clone()),
            content: Set(model.content.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .exec_without_returning(&self.conn)
        .await?;

        info!(comment_id = %model.id, spot_id = %spot_id, "Added comment");
        Ok(model)
    }

    /// Oldest first.
    pub async fn list_for_spot(&self, spot_id: &SpotId) -> Result<Vec<comments::Model>> {
        let rows = Comments::find()
            .filter(comments::Column::SpotId.eq(spot_id.as_str()))
            .order_by_asc(comments::Column::CreatedAt)
            .order_by_asc(comments::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }
}
