use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "adventure_type")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::hidden_gem_adventure_type::Entity")]
    GemLinks,
}

impl Related<super::hidden_gem_adventure_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GemLinks.def()
    }
}

impl Related<super::hidden_gem::Entity> for Entity {
    fn to() -> RelationDef {
        super::hidden_gem_adventure_type::Relation::HiddenGem.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::hidden_gem_adventure_type::Relation::AdventureType.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
