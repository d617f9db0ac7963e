use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

use super::m20250310_000001_create_users::User;
use super::m20250310_000004_create_vehicles::Vehicle;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create booking status enum
        manager
            .create_type(
                Type::create()
                    .as_enum(BookingStatus::Enum)
                    .values([
                        BookingStatus::Pending,
                        BookingStatus::Confirmed,
                        BookingStatus::Completed,
                        BookingStatus::Cancelled,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(pk_auto(Booking::Id))
                    .col(integer(Booking::UserId).not_null())
                    .col(integer(Booking::VehicleId).not_null())
                    .col(timestamp_with_time_zone(Booking::StartTime).not_null())
                    .col(timestamp_with_time_zone(Booking::EndTime).not_null())
                    .col(double(Booking::TotalPrice).not_null())
                    .col(
                        ColumnDef::new(Booking::Status)
                            .custom(BookingStatus::Enum)
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Booking::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_user")
                            .from(Booking::Table, Booking::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_vehicle")
                            .from(Booking::Table, Booking::VehicleId)
                            .to(Vehicle::Table, Vehicle::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Booking::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(BookingStatus::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Booking {
    Table,
    Id,
    UserId,
    VehicleId,
    StartTime,
    EndTime,
    TotalPrice,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum BookingStatus {
    #[sea_orm(iden = "booking_status")]
    Enum,
    #[sea_orm(iden = "pending")]
    Pending,
    #[sea_orm(iden = "confirmed")]
    Confirmed,
    #[sea_orm(iden = "completed")]
    Completed,
    #[sea_orm(iden = "cancelled")]
    Cancelled,
}
