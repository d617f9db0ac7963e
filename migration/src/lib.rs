pub use sea_orm_migration::prelude::*;

mod m20250310_000001_create_users;
mod m20250310_000002_create_states;
mod m20250310_000003_create_adventure_types;
mod m20250310_000004_create_vehicles;
mod m20250310_000005_create_hidden_gems;
mod m20250310_000006_create_bookings;
mod m20250310_000007_create_bookmarks;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250310_000001_create_users::Migration),
            Box::new(m20250310_000002_create_states::Migration),
            Box::new(m20250310_000003_create_adventure_types::Migration),
            Box::new(m20250310_000004_create_vehicles::Migration),
            Box::new(m20250310_000005_create_hidden_gems::Migration),
            Box::new(m20250310_000006_create_bookings::Migration),
            Box::new(m20250310_000007_create_bookmarks::Migration),
        ]
    }
}
