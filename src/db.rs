use sqlx::{Pool, Postgres};

use crate::config::AppConfig;

pub type DbPool = Pool<Postgres>;

pub async fn init_db(database_url: &str, max_connections: u32) -> anyhow::Result<DbPool> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    sqlx::migrate!().run(&pool).await?;

    Ok(pool)
}

pub async fn init_from_config(config: &AppConfig) -> anyhow::Result<DbPool> {
    init_db(&config.database_url, config.database_max_connections).await
}
