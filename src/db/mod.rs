use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::Config;
use crate::error::{AppError, AppResult};

pub async fn connect(config: &Config) -> AppResult<DatabaseConnection> {
    let mut options = ConnectOptions::new(&config.database_url);
    options
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    Database::connect(options)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to connect to database: {}", e)))
}
