use sqlx::migrate::MigrateDatabase;
use sqlx_migrator::{Migrate, Plan};

/// Creates the database when missing and applies every pending migration.
pub async fn migrate(config: &runplan::config::Config) -> anyhow::Result<()> {
    tracing::info!(url = %config.database.url, "running database migrations");

    let pool = runplan::db::create_pool(&config.database.url, 1).await?;
    let mut conn = pool.acquire().await?;

    runplan_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;

    drop(conn);
    pool.close().await;

    tracing::info!("migrations completed");

    Ok(())
}

/// Drops the database if it exists, then migrates from scratch.
pub async fn reset(config: &runplan::config::Config) -> anyhow::Result<()> {
    if sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::warn!(url = %config.database.url, "dropping existing database");
        sqlx::Sqlite::drop_database(&config.database.url).await?;
    }

    migrate(config).await
}
