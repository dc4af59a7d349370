use crate::constants::categories::CATALOG;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert
            .into_table(Categories::Table)
            .columns([
                Categories::Id,
                Categories::Name,
                Categories::Description,
                Categories::IconName,
            ])
            .on_conflict(OnConflict::column(Categories::Id).do_nothing().to_owned());

        for (id, name, description, icon) in CATALOG {
            insert
                .values([
                    (*id).into(),
                    (*name).into(),
                    (*description).into(),
                    (*icon).into(),
                ])
                .map_err(|e| DbErr::Migration(e.to_string()))?;
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let ids: Vec<&str> = CATALOG.iter().map(|(id, ..)| *id).collect();
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Categories::Table)
                    .and_where(Expr::col(Categories::Id).is_in(ids))
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
    Description,
    IconName,
}
