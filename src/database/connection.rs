use crate::config::DatabaseConfig;
use crate::error::AppResult;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

pub type DbPool = MySqlPool;

pub async fn create_pool(config: &DatabaseConfig) -> AppResult<DbPool> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    Ok(pool)
}

pub async fn run_migrations(pool: &DbPool) -> AppResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
