use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
    pub icon_name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::spot_categories::Entity")]
    SpotCategories,
}

impl Related<super::spot_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SpotCategories.def()
    }
}

impl Related<super::spots::Entity> for Entity {
    fn to() -> RelationDef {
        super::spot_categories::Relation::Spots.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::spot_categories::Relation::Categories.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
