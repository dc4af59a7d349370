use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "spots")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub user_id: String,
    pub hidden_gem_rating: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub special_experience: Option<String>,
    /// JSON array of season names
    pub best_seasons: Option<String>,
    /// JSON array of time-of-day names
    pub best_time_of_day: Option<String>,
    #[sea_orm(default_value = 0)]
    pub visit_count: i64,
    #[sea_orm(default_value = 0)]
    pub save_count: i64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::spot_categories::Entity")]
    SpotCategories,
    #[sea_orm(has_many = "super::photos::Entity")]
    Photos,
    #[sea_orm(has_many = "super::comments::Entity")]
    Comments,
    #[sea_orm(has_many = "super::saved_list_spots::Entity")]
    SavedListSpots,
    #[sea_orm(has_many = "super::spot_visits::Entity")]
    SpotVisits,
}

impl Related<super::spot_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SpotCategories.def()
    }
}

impl Related<super::photos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Photos.def()
    }
}

impl Related<super::comments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl Related<super::saved_list_spots::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SavedListSpots.def()
    }
}

impl Related<super::spot_visits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SpotVisits.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        super::spot_categories::Relation::Categories.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::spot_categories::Relation::Spots.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
