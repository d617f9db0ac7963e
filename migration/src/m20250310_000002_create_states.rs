use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(State::Table)
                    .if_not_exists()
                    .col(pk_auto(State::Id))
                    .col(string_len(State::Name, 100).not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        // Seed states
        let names = [
            "Maharashtra",
            "Himachal Pradesh",
            "Uttarakhand",
            "Rajasthan",
            "Kerala",
            "Karnataka",
            "Tamil Nadu",
            "Goa",
            "Gujarat",
            "Madhya Pradesh",
            "Jammu and Kashmir",
            "Ladakh",
            "Sikkim",
            "Meghalaya",
            "Assam",
        ];

        let mut insert = Query::insert()
            .into_table(State::Table)
            .columns([State::Name])
            .to_owned();
        for name in names {
            insert.values_panic([name.into()]);
        }

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(State::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum State {
    Table,
    Id,
    Name,
}
