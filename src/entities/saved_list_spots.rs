use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "saved_list_spots")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub saved_list_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub spot_id: String,
    pub added_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::saved_lists::Entity",
        from = "Column::SavedListId",
        to = "super::saved_lists::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    SavedLists,
    #[sea_orm(
        belongs_to = "super::spots::Entity",
        from = "Column::SpotId",
        to = "super::spots::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Spots,
}

impl Related<super::saved_lists::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SavedLists.def()
    }
}

impl Related<super::spots::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Spots.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
