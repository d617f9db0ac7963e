use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hidden_gem_bookmark")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub hidden_gem_id: i32,
    pub bookmarked_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::hidden_gem::Entity",
        from = "Column::HiddenGemId",
        to = "super::hidden_gem::Column::Id"
    )]
    HiddenGem,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::hidden_gem::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HiddenGem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
