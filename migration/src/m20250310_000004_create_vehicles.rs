use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create vehicle category enum
        manager
            .create_type(
                Type::create()
                    .as_enum(VehicleCategory::Enum)
                    .values([VehicleCategory::Car, VehicleCategory::Bike])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Vehicle::Table)
                    .if_not_exists()
                    .col(pk_auto(Vehicle::Id))
                    .col(string_len(Vehicle::Model, 100).not_null())
                    .col(string_len(Vehicle::Brand, 100).not_null())
                    .col(
                        ColumnDef::new(Vehicle::Category)
                            .custom(VehicleCategory::Enum)
                            .not_null(),
                    )
                    .col(double(Vehicle::Latitude).not_null())
                    .col(double(Vehicle::Longitude).not_null())
                    .col(double(Vehicle::HourlyPrice).not_null())
                    .col(string_len_null(Vehicle::ImageUrl, 500))
                    .col(boolean(Vehicle::Availability).not_null().default(true))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vehicle::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(VehicleCategory::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Vehicle {
    Table,
    Id,
    Model,
    Brand,
    Category,
    Latitude,
    Longitude,
    HourlyPrice,
    ImageUrl,
    Availability,
}

#[derive(DeriveIden)]
pub enum VehicleCategory {
    #[sea_orm(iden = "vehicle_category")]
    Enum,
    #[sea_orm(iden = "car")]
    Car,
    #[sea_orm(iden = "bike")]
    Bike,
}
