use sea_orm_migration::prelude::*;

mod m20250601_create_spots;
mod m20250602_add_spot_indexes;
mod m20250603_seed_categories;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_create_spots::Migration),
            Box::new(m20250602_add_spot_indexes::Migration),
            Box::new(m20250603_seed_categories::Migration),
        ]
    }
}
