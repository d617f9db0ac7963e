use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdventureType::Table)
                    .if_not_exists()
                    .col(pk_auto(AdventureType::Id))
                    .col(string_len(AdventureType::Name, 100).not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        // Seed adventure types
        let names = [
            "Trekking",
            "Camping",
            "Water Sports",
            "Rock Climbing",
            "Paragliding",
            "River Rafting",
            "Scuba Diving",
            "Wildlife Safari",
            "Mountain Biking",
            "Skiing",
            "Snowboarding",
            "Bungee Jumping",
            "Zip Lining",
            "Cave Exploration",
            "Photography",
            "Bird Watching",
            "Backpacking",
            "Hiking",
        ];

        let mut insert = Query::insert()
            .into_table(AdventureType::Table)
            .columns([AdventureType::Name])
            .to_owned();
        for name in names {
            insert.values_panic([name.into()]);
        }

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdventureType::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AdventureType {
    Table,
    Id,
    Name,
}
