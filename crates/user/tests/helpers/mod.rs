use std::{path::PathBuf, str::FromStr};

use runplan_user::RegisterInput;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<runplan_shared::State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    runplan_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;

    Ok(runplan_shared::State::single(pool))
}

#[allow(dead_code)]
pub async fn create_user(
    cmd: &runplan_user::Command,
    name: impl Into<String>,
) -> anyhow::Result<String> {
    let name = name.into();

    Ok(cmd
        .register(RegisterInput {
            email: format!("{name}@runplan.localhost"),
            password: "my_password".to_owned(),
        })
        .await?)
}
