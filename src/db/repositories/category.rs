use crate::domain::CategoryId;
use crate::entities::{categories, prelude::*};
use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

pub struct CategoryRepository {
    conn: DatabaseConnection,
}

impl CategoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<categories::Model>> {
        let rows = Categories::find()
            .order_by_asc(categories::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: &CategoryId) -> Result<Option<categories::Model>> {
        let row = Categories::find_by_id(id.as_str()).one(&self.conn).await?;
        Ok(row)
    }

    /// Ids from `ids` that do not name a stored category.
    pub async fn unknown_ids(&self, ids: &[CategoryId]) -> Result<Vec<CategoryId>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let known: Vec<String> = Categories::find()
            .filter(categories::Column::Id.is_in(ids.iter().map(CategoryId::as_str)))
            .all(&self.conn)
            .await?
            .into_iter()
            .map(|c| c.id)
            .collect();

        Ok(ids
            .iter()
            .filter(|id| !known.iter().any(|k| k == id.as_str()))
            .cloned()
            .collect())
    }
}
