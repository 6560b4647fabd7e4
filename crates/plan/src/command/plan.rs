use time::Date;
use ulid::Ulid;
use validator::Validate;

use crate::{PlanRepository, TrainingRepository, WorkoutPlan, ensure_owner};

#[derive(Validate)]
pub struct CreatePlanInput {
    #[validate(length(min = 1, max = 100))]
    pub plan_name: String,
    pub description: Option<String>,
    pub start_date: Date,
    pub end_date: Date,
    pub is_active: bool,
}

#[derive(Validate)]
pub struct UpdatePlanInput {
    #[validate(length(min = 1, max = 100))]
    pub plan_name: String,
    pub description: Option<String>,
    pub start_date: Date,
    pub end_date: Date,
}

fn check_range(start_date: Date, end_date: Date) -> runplan_shared::Result<()> {
    if end_date < start_date {
        runplan_shared::user!("End date must be on or after the start date");
    }

    Ok(())
}

fn description(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

impl<R: PlanRepository + TrainingRepository> super::Command<R> {
    #[tracing::instrument(skip(self, input), fields(plan_name = %input.plan_name))]
    pub async fn create_plan(
        &self,
        owner_id: &str,
        input: CreatePlanInput,
    ) -> runplan_shared::Result<String> {
        input.validate()?;
        check_range(input.start_date, input.end_date)?;

        let plan = WorkoutPlan {
            id: Ulid::new().to_string(),
            owner_id: owner_id.to_owned(),
            plan_name: input.plan_name.trim().to_owned(),
            description: description(input.description),
            start_date: input.start_date,
            end_date: input.end_date,
            is_active: input.is_active,
        };

        self.0.create_plan(&plan).await?;

        tracing::info!(plan = plan.id, "plan created");

        Ok(plan.id)
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update_plan(
        &self,
        owner_id: &str,
        id: &str,
        input: UpdatePlanInput,
    ) -> runplan_shared::Result<()> {
        input.validate()?;
        check_range(input.start_date, input.end_date)?;

        let Some(mut plan) = self.0.find_plan(id).await? else {
            return Err(runplan_shared::Error::NotFound);
        };

        ensure_owner(&plan, owner_id)?;

        let outside = self
            .0
            .count_trainings_outside(&plan.id, input.start_date, input.end_date)
            .await?;

        if outside > 0 {
            runplan_shared::user!("{outside} training(s) fall outside the new plan dates");
        }

        plan.plan_name = input.plan_name.trim().to_owned();
        plan.description = description(input.description);
        plan.start_date = input.start_date;
        plan.end_date = input.end_date;

        self.0.update_plan(&plan).await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_plan(&self, owner_id: &str, id: &str) -> runplan_shared::Result<()> {
        let Some(plan) = self.0.find_plan(id).await? else {
            return Err(runplan_shared::Error::NotFound);
        };

        ensure_owner(&plan, owner_id)?;

        self.0.delete_plan(&plan.id).await?;

        tracing::info!(plan = plan.id, "plan deleted");

        Ok(())
    }

    /// Makes `id` the only active plan of `owner_id`.
    #[tracing::instrument(skip(self))]
    pub async fn activate(&self, owner_id: &str, id: &str) -> runplan_shared::Result<()> {
        self.0.activate_plan(id, owner_id).await?;

        tracing::info!(plan = id, "plan activated");

        Ok(())
    }
}
