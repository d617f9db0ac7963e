use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "state")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::hidden_gem::Entity")]
    HiddenGems,
}

impl Related<super::hidden_gem::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HiddenGems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
