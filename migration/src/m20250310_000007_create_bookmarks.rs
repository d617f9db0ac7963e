use sea_orm_migration::{prelude::*, schema::*};

use super::m20250310_000001_create_users::User;
use super::m20250310_000005_create_hidden_gems::HiddenGem;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HiddenGemBookmark::Table)
                    .if_not_exists()
                    .col(integer(HiddenGemBookmark::UserId).not_null())
                    .col(integer(HiddenGemBookmark::HiddenGemId).not_null())
                    .col(
                        timestamp_with_time_zone(HiddenGemBookmark::BookmarkedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(HiddenGemBookmark::UserId)
                            .col(HiddenGemBookmark::HiddenGemId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookmark_user")
                            .from(HiddenGemBookmark::Table, HiddenGemBookmark::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookmark_hidden_gem")
                            .from(HiddenGemBookmark::Table, HiddenGemBookmark::HiddenGemId)
                            .to(HiddenGem::Table, HiddenGem::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HiddenGemBookmark::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum HiddenGemBookmark {
    Table,
    UserId,
    HiddenGemId,
    BookmarkedAt,
}
