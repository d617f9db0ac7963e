use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Image url list stored as a JSON array column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ImageUrls(pub Vec<String>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hidden_gem")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: String,
    pub state_id: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub nearest_city: Option<String>,
    pub best_time_to_visit: Option<String>,
    pub difficulty_level: Option<String>,
    pub cost_range: Option<String>,
    pub image_urls: ImageUrls,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::state::Entity",
        from = "Column::StateId",
        to = "super::state::Column::Id"
    )]
    State,
    #[sea_orm(has_many = "super::hidden_gem_adventure_type::Entity")]
    AdventureTypeLinks,
    #[sea_orm(has_many = "super::hidden_gem_bookmark::Entity")]
    Bookmarks,
}

impl Related<super::state::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::State.def()
    }
}

impl Related<super::hidden_gem_bookmark::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookmarks.def()
    }
}

impl Related<super::adventure_type::Entity> for Entity {
    fn to() -> RelationDef {
        super::hidden_gem_adventure_type::Relation::AdventureType.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::hidden_gem_adventure_type::Relation::HiddenGem.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
