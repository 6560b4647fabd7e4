use time::Month;

use crate::{
    DailyTraining, MonthCalendar, PlanRepository, SqliteRepository, TrainingRepository,
    WorkoutPlan, ensure_owner,
};

/// Read side of plans and trainings.
#[derive(Clone)]
pub struct Query<R = SqliteRepository>(pub R);

impl Query<SqliteRepository> {
    pub fn new(state: runplan_shared::State) -> Self {
        Self(SqliteRepository(state))
    }
}

impl<R: PlanRepository + TrainingRepository> Query<R> {
    pub async fn find_plan(&self, owner_id: &str, id: &str) -> runplan_shared::Result<WorkoutPlan> {
        let Some(plan) = self.0.find_plan(id).await? else {
            return Err(runplan_shared::Error::NotFound);
        };

        ensure_owner(&plan, owner_id)?;

        Ok(plan)
    }

    pub async fn list_plans(&self, owner_id: &str) -> runplan_shared::Result<Vec<WorkoutPlan>> {
        self.0.list_plans_by_owner(owner_id).await
    }

    pub async fn find_active_plan(
        &self,
        owner_id: &str,
    ) -> runplan_shared::Result<Option<WorkoutPlan>> {
        let plans = self.0.list_plans_by_owner_and_active(owner_id, true).await?;

        if plans.len() > 1 {
            tracing::error!(user = owner_id, count = plans.len(), "more than one active plan");
        }

        Ok(plans.into_iter().next())
    }

    /// Training `id` of plan `plan_id`, checking the plan belongs to `owner_id`.
    pub async fn find_training(
        &self,
        owner_id: &str,
        plan_id: &str,
        id: &str,
    ) -> runplan_shared::Result<(WorkoutPlan, DailyTraining)> {
        let plan = self.find_plan(owner_id, plan_id).await?;

        let Some(training) = self.0.find_training(id).await? else {
            return Err(runplan_shared::Error::NotFound);
        };

        if training.plan_id != plan.id {
            return Err(runplan_shared::Error::NotFound);
        }

        Ok((plan, training))
    }

    pub async fn month_calendar(
        &self,
        plan: &WorkoutPlan,
        month: Month,
        year: i32,
    ) -> runplan_shared::Result<MonthCalendar> {
        let trainings = self
            .0
            .list_trainings_by_plan_and_month(&plan.id, year, month)
            .await?;

        Ok(MonthCalendar::build(plan, month, year, trainings)?)
    }
}
