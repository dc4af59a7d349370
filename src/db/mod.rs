use crate::domain::{CategoryId, SavedListId, Spot, SpotId, SpotSearchParams, UserId};
use crate::entities::{categories, comments, saved_lists, spot_visits};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use crate::entities::categories::Model as Category;
pub use crate::entities::comments::Model as Comment;
pub use crate::entities::saved_lists::Model as SavedList;
pub use repositories::saved_list::NewSavedList;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

fn is_in_memory(db_url: &str) -> bool {
    let path = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
    path.starts_with(":memory:") || path.contains("mode=memory")
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !is_in_memory(db_url) {
            let path_str = db_url
                .trim_start_matches("sqlite:")
                .trim_start_matches("//")
                .split('?')
                .next()
                .unwrap_or_default();
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn spot_repo(&self) -> repositories::spot::SpotRepository {
        repositories::spot::SpotRepository::new(self.conn.clone())
    }

    fn category_repo(&self) -> repositories::category::CategoryRepository {
        repositories::category::CategoryRepository::new(self.conn.clone())
    }

    fn comment_repo(&self) -> repositories::comment::CommentRepository {
        repositories::comment::CommentRepository::new(self.conn.clone())
    }

    fn saved_list_repo(&self) -> repositories::saved_list::SavedListRepository {
        repositories::saved_list::SavedListRepository::new(self.conn.clone())
    }

    pub async fn search_spots(&self, params: &SpotSearchParams) -> Result<Vec<Spot>> {
        self.spot_repo().search(params).await
    }

    pub async fn count_spots(&self, params: &SpotSearchParams) -> Result<u64> {
        self.spot_repo().count(params).await
    }

    pub async fn get_spot(&self, id: &SpotId) -> Result<Option<Spot>> {
        self.spot_repo().get(id).await
    }

    pub async fn create_spot(&self, spot: &Spot) -> Result<()> {
        self.spot_repo().create(spot).await
    }

    pub async fn update_spot(&self, spot: &Spot, replace_children: bool) -> Result<bool> {
        self.spot_repo().update(spot, replace_children).await
    }

    pub async fn delete_spot(&self, id: &SpotId) -> Result<bool> {
        self.spot_repo().delete(id).await
    }

    pub async fn increment_visit_count(&self, id: &SpotId) -> Result<bool> {
        self.spot_repo().increment_visit_count(id).await
    }

    pub async fn increment_save_count(&self, id: &SpotId) -> Result<bool> {
        self.spot_repo().increment_save_count(id).await
    }

    pub async fn record_visit(&self, id: &SpotId, visitor: Option<&UserId>) -> Result<bool> {
        self.spot_repo().record_visit(id, visitor).await
    }

    pub async fn record_save(&self, id: &SpotId, list: Option<&SavedListId>) -> Result<bool> {
        self.spot_repo()
            .record_save(id, list.map(SavedListId::as_str))
            .await
    }

    pub async fn get_visit_history(&self, id: &SpotId) -> Result<Vec<spot_visits::Model>> {
        self.spot_repo().visit_history(id).await
    }

    pub async fn list_categories(&self) -> Result<Vec<categories::Model>> {
        self.category_repo().list().await
    }

    pub async fn get_category(&self, id: &CategoryId) -> Result<Option<categories::Model>> {
        self.category_repo().get(id).await
    }

    pub async fn unknown_category_ids(&self, ids: &[CategoryId]) -> Result<Vec<CategoryId>> {
        self.category_repo().unknown_ids(ids).await
    }

    pub async fn add_comment(
        &self,
        spot_id: &SpotId,
        user_id: &UserId,
        content: &str,
    ) -> Result<comments::Model> {
        self.comment_repo().add(spot_id, user_id, content).await
    }

    pub async fn get_comments(&self, spot_id: &SpotId) -> Result<Vec<comments::Model>> {
        self.comment_repo().list_for_spot(spot_id).await
    }

    pub async fn create_saved_list(&self, list: NewSavedList) -> Result<saved_lists::Model> {
        self.saved_list_repo().create(list).await
    }

    pub async fn get_saved_list(&self, id: &SavedListId) -> Result<Option<saved_lists::Model>> {
        self.saved_list_repo().get(id).await
    }

    pub async fn get_saved_lists_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<(saved_lists::Model, Vec<SpotId>)>> {
        self.saved_list_repo().list_for_user(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::is_in_memory;

    #[test]
    fn test_in_memory_detection() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory(":memory:"));
        assert!(is_in_memory("sqlite://file:db?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite:data/machipoke.db"));
        assert!(!is_in_memory("sqlite:///tmp/machipoke.db?mode=rwc"));
    }
}
