use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hidden_gem_adventure_type")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub hidden_gem_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub adventure_type_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::hidden_gem::Entity",
        from = "Column::HiddenGemId",
        to = "super::hidden_gem::Column::Id"
    )]
    HiddenGem,
    #[sea_orm(
        belongs_to = "super::adventure_type::Entity",
        from = "Column::AdventureTypeId",
        to = "super::adventure_type::Column::Id"
    )]
    AdventureType,
}

impl Related<super::hidden_gem::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HiddenGem.def()
    }
}

impl Related<super::adventure_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdventureType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
