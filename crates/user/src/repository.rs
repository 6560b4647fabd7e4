use runplan_db::table::User;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};
use time::OffsetDateTime;

#[derive(FromRow)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub password: String,
}

pub enum FindType {
    Id(String),
    Email(String),
}

pub(crate) async fn find(
    pool: &SqlitePool,
    arg_type: FindType,
) -> runplan_shared::Result<Option<UserRow>> {
    let mut statement = Query::select()
        .columns([User::Id, User::Email, User::Password])
        .from(User::Table)
        .limit(1)
        .to_owned();

    match arg_type {
        FindType::Id(id) => statement.and_where(Expr::col(User::Id).eq(id)),
        FindType::Email(email) => statement.and_where(Expr::col(User::Email).eq(email)),
    };

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, UserRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub(crate) async fn create(
    pool: &SqlitePool,
    id: String,
    email: String,
    password: String,
) -> runplan_shared::Result<()> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let statement = Query::insert()
        .into_table(User::Table)
        .columns([User::Id, User::Email, User::Password, User::CreatedAt])
        .values_panic([id.into(), email.into(), password.into(), now.into()])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

#[derive(FromRow)]
pub struct ProfileRow {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: i64,
}

pub(crate) async fn find_profile(
    pool: &SqlitePool,
    id: String,
) -> runplan_shared::Result<Option<ProfileRow>> {
    let statement = Query::select()
        .columns([
            User::Id,
            User::Email,
            User::FirstName,
            User::LastName,
            User::CreatedAt,
        ])
        .from(User::Table)
        .and_where(Expr::col(User::Id).eq(id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, ProfileRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub(crate) async fn update_profile(
    pool: &SqlitePool,
    id: String,
    email: String,
    first_name: Option<String>,
    last_name: Option<String>,
) -> runplan_shared::Result<()> {
    let statement = Query::update()
        .table(User::Table)
        .values([
            (User::Email, email.into()),
            (User::FirstName, first_name.into()),
            (User::LastName, last_name.into()),
        ])
        .and_where(Expr::col(User::Id).eq(id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

pub(crate) async fn update_password(
    pool: &SqlitePool,
    id: String,
    password: String,
) -> runplan_shared::Result<()> {
    let statement = Query::update()
        .table(User::Table)
        .value(User::Password, password)
        .and_where(Expr::col(User::Id).eq(id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}
