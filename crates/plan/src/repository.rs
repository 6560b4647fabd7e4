use async_trait::async_trait;
use runplan_db::table::{DailyTraining as TrainingTable, WorkoutPlan as PlanTable};
use runplan_shared::Result;
use sea_query::{Expr, ExprTrait, Func, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::{Date, Month, OffsetDateTime};

use crate::{
    DailyTraining, WorkoutPlan,
    types::{PlanRow, TrainingRow, day_value},
};

/// Storage of workout plans.
#[async_trait]
pub trait PlanRepository: Send + Sync {
    async fn find_plan(&self, id: &str) -> Result<Option<WorkoutPlan>>;

    async fn list_plans_by_owner(&self, owner_id: &str) -> Result<Vec<WorkoutPlan>>;

    async fn list_plans_by_owner_and_active(
        &self,
        owner_id: &str,
        is_active: bool,
    ) -> Result<Vec<WorkoutPlan>>;

    /// Inserts the plan. An active plan deactivates the other plans of its
    /// owner in the same transaction.
    async fn create_plan(&self, plan: &WorkoutPlan) -> Result<()>;

    /// Updates name, description and dates. The active flag is left as is.
    async fn update_plan(&self, plan: &WorkoutPlan) -> Result<()>;

    /// Deletes the plan together with its trainings.
    async fn delete_plan(&self, id: &str) -> Result<()>;

    /// Makes `id` the only active plan of `owner_id` in one transaction.
    /// Fails with `NotFound` when the plan does not exist for that owner.
    async fn activate_plan(&self, id: &str, owner_id: &str) -> Result<()>;
}

/// Storage of daily trainings.
#[async_trait]
pub trait TrainingRepository: Send + Sync {
    async fn find_training(&self, id: &str) -> Result<Option<DailyTraining>>;

    /// Trainings of the plan in the given month, ordered by day then by
    /// creation.
    async fn list_trainings_by_plan_and_month(
        &self,
        plan_id: &str,
        year: i32,
        month: Month,
    ) -> Result<Vec<DailyTraining>>;

    /// Number of trainings of the plan dated before `start` or after `end`.
    async fn count_trainings_outside(
        &self,
        plan_id: &str,
        start: Date,
        end: Date,
    ) -> Result<i64>;

    async fn create_training(&self, training: &DailyTraining) -> Result<()>;

    async fn update_training(&self, training: &DailyTraining) -> Result<()>;

    async fn delete_training(&self, id: &str) -> Result<()>;
}

#[derive(Clone)]
pub struct SqliteRepository(pub runplan_shared::State);

impl std::ops::Deref for SqliteRepository {
    type Target = runplan_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

const PLAN_COLUMNS: [PlanTable; 7] = [
    PlanTable::Id,
    PlanTable::OwnerId,
    PlanTable::PlanName,
    PlanTable::Description,
    PlanTable::StartDate,
    PlanTable::EndDate,
    PlanTable::IsActive,
];

const TRAINING_COLUMNS: [TrainingTable; 6] = [
    TrainingTable::Id,
    TrainingTable::PlanId,
    TrainingTable::Day,
    TrainingTable::Training,
    TrainingTable::DistanceKm,
    TrainingTable::Comments,
];

fn into_plans(rows: Vec<PlanRow>) -> Result<Vec<WorkoutPlan>> {
    Ok(rows
        .into_iter()
        .map(WorkoutPlan::try_from)
        .collect::<std::result::Result<Vec<_>, _>>()?)
}

/// First and last day of the month, both inclusive.
fn month_bounds(year: i32, month: Month) -> Result<(i64, i64)> {
    let first = Date::from_calendar_date(year, month, 1)?;
    let days = time::util::days_in_year_month(year, month);
    let last = Date::from_calendar_date(year, month, days)?;

    Ok((day_value(first), day_value(last)))
}

/// Sets `id` active and every other plan of `owner_id` inactive.
async fn set_only_active(
    conn: &mut sqlx::SqliteConnection,
    id: &str,
    owner_id: &str,
) -> Result<()> {
    let statement = Query::update()
        .table(PlanTable::Table)
        .value(PlanTable::IsActive, Expr::col(PlanTable::Id).eq(id))
        .and_where(Expr::col(PlanTable::OwnerId).eq(owner_id))
        .to_owned();
    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}

#[async_trait]
impl PlanRepository for SqliteRepository {
    async fn find_plan(&self, id: &str) -> Result<Option<WorkoutPlan>> {
        let statement = Query::select()
            .columns(PLAN_COLUMNS)
            .from(PlanTable::Table)
            .and_where(Expr::col(PlanTable::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, PlanRow, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?;

        Ok(row.map(WorkoutPlan::try_from).transpose()?)
    }

    async fn list_plans_by_owner(&self, owner_id: &str) -> Result<Vec<WorkoutPlan>> {
        let statement = Query::select()
            .columns(PLAN_COLUMNS)
            .from(PlanTable::Table)
            .and_where(Expr::col(PlanTable::OwnerId).eq(owner_id))
            .order_by(PlanTable::StartDate, Order::Desc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, PlanRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        into_plans(rows)
    }

    async fn list_plans_by_owner_and_active(
        &self,
        owner_id: &str,
        is_active: bool,
    ) -> Result<Vec<WorkoutPlan>> {
        let statement = Query::select()
            .columns(PLAN_COLUMNS)
            .from(PlanTable::Table)
            .and_where(Expr::col(PlanTable::OwnerId).eq(owner_id))
            .and_where(Expr::col(PlanTable::IsActive).eq(is_active))
            .order_by(PlanTable::StartDate, Order::Desc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, PlanRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        into_plans(rows)
    }

    async fn create_plan(&self, plan: &WorkoutPlan) -> Result<()> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let statement = Query::insert()
            .into_table(PlanTable::Table)
            .columns([
                PlanTable::Id,
                PlanTable::OwnerId,
                PlanTable::PlanName,
                PlanTable::Description,
                PlanTable::StartDate,
                PlanTable::EndDate,
                PlanTable::IsActive,
                PlanTable::CreatedAt,
            ])
            .values_panic([
                plan.id.to_owned().into(),
                plan.owner_id.to_owned().into(),
                plan.plan_name.to_owned().into(),
                plan.description.to_owned().into(),
                day_value(plan.start_date).into(),
                day_value(plan.end_date).into(),
                plan.is_active.into(),
                now.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let mut tx = self.write_db.begin().await?;
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        if plan.is_active {
            set_only_active(&mut tx, &plan.id, &plan.owner_id).await?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn update_plan(&self, plan: &WorkoutPlan) -> Result<()> {
        let statement = Query::update()
            .table(PlanTable::Table)
            .values([
                (PlanTable::PlanName, plan.plan_name.to_owned().into()),
                (PlanTable::Description, plan.description.to_owned().into()),
                (PlanTable::StartDate, day_value(plan.start_date).into()),
                (PlanTable::EndDate, day_value(plan.end_date).into()),
            ])
            .and_where(Expr::col(PlanTable::Id).eq(plan.id.to_owned()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        Ok(())
    }

    async fn delete_plan(&self, id: &str) -> Result<()> {
        let mut tx = self.write_db.begin().await?;

        let statement = Query::delete()
            .from_table(TrainingTable::Table)
            .and_where(Expr::col(TrainingTable::PlanId).eq(id))
            .to_owned();
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let statement = Query::delete()
            .from_table(PlanTable::Table)
            .and_where(Expr::col(PlanTable::Id).eq(id))
            .to_owned();
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn activate_plan(&self, id: &str, owner_id: &str) -> Result<()> {
        let mut tx = self.write_db.begin().await?;

        let statement = Query::select()
            .column(PlanTable::Id)
            .from(PlanTable::Table)
            .and_where(Expr::col(PlanTable::Id).eq(id))
            .and_where(Expr::col(PlanTable::OwnerId).eq(owner_id))
            .limit(1)
            .to_owned();
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let found = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_optional(&mut *tx)
            .await?;

        if found.is_none() {
            return Err(runplan_shared::Error::NotFound);
        }

        set_only_active(&mut tx, id, owner_id).await?;

        tx.commit().await?;

        Ok(())
    }
}

#[async_trait]
impl TrainingRepository for SqliteRepository {
    async fn find_training(&self, id: &str) -> Result<Option<DailyTraining>> {
        let statement = Query::select()
            .columns(TRAINING_COLUMNS)
            .from(TrainingTable::Table)
            .and_where(Expr::col(TrainingTable::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, TrainingRow, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?;

        Ok(row.map(DailyTraining::try_from).transpose()?)
    }

    async fn list_trainings_by_plan_and_month(
        &self,
        plan_id: &str,
        year: i32,
        month: Month,
    ) -> Result<Vec<DailyTraining>> {
        let (from, to) = month_bounds(year, month)?;
        let statement = Query::select()
            .columns(TRAINING_COLUMNS)
            .from(TrainingTable::Table)
            .and_where(Expr::col(TrainingTable::PlanId).eq(plan_id))
            .and_where(Expr::col(TrainingTable::Day).gte(from))
            .and_where(Expr::col(TrainingTable::Day).lte(to))
            .order_by(TrainingTable::Day, Order::Asc)
            .order_by(TrainingTable::CreatedAt, Order::Asc)
            .order_by_expr(Expr::cust("rowid"), Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, TrainingRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        Ok(rows
            .into_iter()
            .map(DailyTraining::try_from)
            .collect::<std::result::Result<Vec<_>, _>>()?)
    }

    async fn count_trainings_outside(
        &self,
        plan_id: &str,
        start: Date,
        end: Date,
    ) -> Result<i64> {
        let statement = Query::select()
            .expr(Func::count(Expr::col(TrainingTable::Id)))
            .from(TrainingTable::Table)
            .and_where(Expr::col(TrainingTable::PlanId).eq(plan_id))
            .and_where(
                Expr::col(TrainingTable::Day)
                    .lt(day_value(start))
                    .or(Expr::col(TrainingTable::Day).gt(day_value(end))),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let (count,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_one(&self.read_db)
            .await?;

        Ok(count)
    }

    async fn create_training(&self, training: &DailyTraining) -> Result<()> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let statement = Query::insert()
            .into_table(TrainingTable::Table)
            .columns([
                TrainingTable::Id,
                TrainingTable::PlanId,
                TrainingTable::Day,
                TrainingTable::Training,
                TrainingTable::DistanceKm,
                TrainingTable::Comments,
                TrainingTable::CreatedAt,
            ])
            .values_panic([
                training.id.to_owned().into(),
                training.plan_id.to_owned().into(),
                day_value(training.day).into(),
                training.training.to_owned().into(),
                training.distance_km.into(),
                training.comments.to_owned().into(),
                now.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        Ok(())
    }

    async fn update_training(&self, training: &DailyTraining) -> Result<()> {
        let statement = Query::update()
            .table(TrainingTable::Table)
            .values([
                (TrainingTable::Day, day_value(training.day).into()),
                (TrainingTable::Training, training.training.to_owned().into()),
                (TrainingTable::DistanceKm, training.distance_km.into()),
                (TrainingTable::Comments, training.comments.to_owned().into()),
            ])
            .and_where(Expr::col(TrainingTable::Id).eq(training.id.to_owned()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        Ok(())
    }

    async fn delete_training(&self, id: &str) -> Result<()> {
        let statement = Query::delete()
            .from_table(TrainingTable::Table)
            .and_where(Expr::col(TrainingTable::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        Ok(())
    }
}
