use sea_orm_migration::{prelude::*, schema::*};

use super::m20250310_000002_create_states::State;
use super::m20250310_000003_create_adventure_types::AdventureType;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HiddenGem::Table)
                    .if_not_exists()
                    .col(pk_auto(HiddenGem::Id))
                    .col(string_len(HiddenGem::Name, 200).not_null())
                    .col(string_len(HiddenGem::Description, 2000).not_null())
                    .col(integer(HiddenGem::StateId).not_null())
                    .col(double(HiddenGem::Latitude).not_null())
                    .col(double(HiddenGem::Longitude).not_null())
                    .col(string_len_null(HiddenGem::NearestCity, 100))
                    .col(string_len_null(HiddenGem::BestTimeToVisit, 100))
                    .col(string_len_null(HiddenGem::DifficultyLevel, 50))
                    .col(string_len_null(HiddenGem::CostRange, 100))
                    .col(json_binary(HiddenGem::ImageUrls).not_null())
                    .col(
                        timestamp_with_time_zone(HiddenGem::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(HiddenGem::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_hidden_gem_state")
                            .from(HiddenGem::Table, HiddenGem::StateId)
                            .to(State::Table, State::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Join table for the gem <-> adventure type many-to-many
        manager
            .create_table(
                Table::create()
                    .table(HiddenGemAdventureType::Table)
                    .if_not_exists()
                    .col(integer(HiddenGemAdventureType::HiddenGemId).not_null())
                    .col(integer(HiddenGemAdventureType::AdventureTypeId).not_null())
                    .primary_key(
                        Index::create()
                            .col(HiddenGemAdventureType::HiddenGemId)
                            .col(HiddenGemAdventureType::AdventureTypeId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gem_adventure_type_gem")
                            .from(
                                HiddenGemAdventureType::Table,
                                HiddenGemAdventureType::HiddenGemId,
                            )
                            .to(HiddenGem::Table, HiddenGem::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gem_adventure_type_type")
                            .from(
                                HiddenGemAdventureType::Table,
                                HiddenGemAdventureType::AdventureTypeId,
                            )
                            .to(AdventureType::Table, AdventureType::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HiddenGemAdventureType::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(HiddenGem::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum HiddenGem {
    Table,
    Id,
    Name,
    Description,
    StateId,
    Latitude,
    Longitude,
    NearestCity,
    BestTimeToVisit,
    DifficultyLevel,
    CostRange,
    ImageUrls,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum HiddenGemAdventureType {
    Table,
    HiddenGemId,
    AdventureTypeId,
}
