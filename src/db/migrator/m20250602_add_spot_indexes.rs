use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Latitude leads: the box filter is a range on both columns.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_spots_location")
                    .table(Spots::Table)
                    .col(Spots::Latitude)
                    .col(Spots::Longitude)
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_spots_created_at", Spots::CreatedAt),
            ("idx_spots_user_id", Spots::UserId),
            ("idx_spots_visit_count", Spots::VisitCount),
            ("idx_spots_hidden_gem_rating", Spots::HiddenGemRating),
        ] {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(Spots::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_spot_categories_category_id")
                    .table(SpotCategories::Table)
                    .col(SpotCategories::CategoryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_photos_spot_id")
                    .table(Photos::Table)
                    .col(Photos::SpotId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_comments_spot_id")
                    .table(Comments::Table)
                    .col(Comments::SpotId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_comments_spot_id",
            "idx_photos_spot_id",
            "idx_spot_categories_category_id",
            "idx_spots_hidden_gem_rating",
            "idx_spots_visit_count",
            "idx_spots_user_id",
            "idx_spots_created_at",
            "idx_spots_location",
        ] {
            manager
                .drop_index(Index::drop().if_exists().name(name).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Spots {
    Table,
    Latitude,
    Longitude,
    CreatedAt,
    UserId,
    VisitCount,
    HiddenGemRating,
}

#[derive(DeriveIden)]
enum SpotCategories {
    Table,
    CategoryId,
}

#[derive(DeriveIden)]
enum Photos {
    Table,
    SpotId,
}

#[derive(DeriveIden)]
enum Comments {
    Table,
    SpotId,
}
