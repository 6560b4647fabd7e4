use std::{path::PathBuf, str::FromStr};

use runplan_plan::{CreatePlanInput, TrainingInput};
use runplan_user::RegisterInput;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};
use sqlx_migrator::{Migrate, Plan};
use time::Date;

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

/// Separate read pool and single-connection write pool in WAL mode, the way
/// the server opens the database.
#[allow(dead_code)]
pub async fn setup_server_state(path: PathBuf) -> anyhow::Result<runplan_shared::State> {
    let url = format!("sqlite:{}", path.to_str().unwrap());
    let opts = SqliteConnectOptions::from_str(&url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(5));

    let write_db = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(opts.clone())
        .await?;
    let mut conn = write_db.acquire().await?;
    runplan_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;
    drop(conn);

    let read_db = SqlitePoolOptions::new()
        .max_connections(4)
        .connect_with(opts.read_only(true))
        .await?;

    Ok(runplan_shared::State { read_db, write_db })
}

pub async fn create_user(
    state: &runplan_shared::State,
    name: impl Into<String>,
) -> anyhow::Result<String> {
    let name = name.into();
    let cmd = runplan_user::Command::new(state.clone());

    Ok(cmd
        .register(RegisterInput {
            email: format!("{name}@runplan.localhost"),
            password: "my_password".to_owned(),
        })
        .await?)
}

#[allow(dead_code)]
pub async fn create_plan(
    cmd: &runplan_plan::Command,
    owner_id: &str,
    start_date: Date,
    end_date: Date,
    is_active: bool,
) -> anyhow::Result<String> {
    Ok(cmd
        .create_plan(
            owner_id,
            CreatePlanInput {
                plan_name: "Spring marathon".to_owned(),
                description: None,
                start_date,
                end_date,
                is_active,
            },
        )
        .await?)
}

#[allow(dead_code)]
pub fn training(day: Date, name: &str, distance_km: Option<f64>) -> TrainingInput {
    TrainingInput {
        day,
        training: name.to_owned(),
        distance_km,
        comments: None,
    }
}
