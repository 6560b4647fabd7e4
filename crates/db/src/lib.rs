use sqlx_migrator::{Info, Migrator};

mod m0_1;
pub mod table;

pub fn migrator() -> Result<Migrator<sqlx::Sqlite>, sqlx_migrator::Error> {
    let mut migrator = Migrator::default();
    migrator.add_migrations(vec![Box::new(m0_1::Migration)])?;

    Ok(migrator)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
    use sqlx_migrator::{Migrate, Plan};
    use temp_dir::TempDir;

    #[tokio::test]
    async fn test_migrations_apply_and_revert() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.child("db.sqlite3");
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(opts).await?;
        let mut conn = pool.acquire().await?;

        super::migrator()?
            .run(&mut *conn, &Plan::apply_all())
            .await?;

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('user', 'workout_plan', 'daily_training') ORDER BY name",
        )
        .fetch_all(&mut *conn)
        .await?;

        assert_eq!(
            tables.into_iter().map(|t| t.0).collect::<Vec<_>>(),
            vec!["daily_training", "user", "workout_plan"]
        );

        super::migrator()?
            .run(&mut *conn, &Plan::revert_all())
            .await?;

        let remaining: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'workout_plan'",
        )
        .fetch_one(&mut *conn)
        .await?;

        assert_eq!(remaining.0, 0);

        Ok(())
    }
}
