use time::Date;
use ulid::Ulid;
use validator::Validate;

use crate::{DailyTraining, PlanRepository, TrainingRepository, WorkoutPlan, ensure_owner};

#[derive(Validate)]
pub struct TrainingInput {
    pub day: Date,
    #[validate(length(min = 1, max = 255))]
    pub training: String,
    #[validate(range(min = 0.0))]
    pub distance_km: Option<f64>,
    pub comments: Option<String>,
}

impl TrainingInput {
    /// `range` accepts NaN and infinity.
    fn check(&self) -> runplan_shared::Result<()> {
        self.validate()?;

        if self.distance_km.is_some_and(|v| !v.is_finite()) {
            runplan_shared::user!("Distance must be a number of kilometers");
        }

        Ok(())
    }

    fn comments(&self) -> Option<String> {
        self.comments
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(ToOwned::to_owned)
    }
}

impl<R: PlanRepository + TrainingRepository> super::Command<R> {
    async fn owned_plan(&self, owner_id: &str, plan_id: &str) -> runplan_shared::Result<WorkoutPlan> {
        let Some(plan) = self.0.find_plan(plan_id).await? else {
            return Err(runplan_shared::Error::NotFound);
        };

        ensure_owner(&plan, owner_id)?;

        Ok(plan)
    }

    #[tracing::instrument(skip(self, input), fields(day = %input.day))]
    pub async fn create_training(
        &self,
        owner_id: &str,
        plan_id: &str,
        input: TrainingInput,
    ) -> runplan_shared::Result<String> {
        input.check()?;

        let plan = self.owned_plan(owner_id, plan_id).await?;

        if !plan.contains(input.day) {
            runplan_shared::user!("Training day must be within the plan dates");
        }

        let training = DailyTraining {
            id: Ulid::new().to_string(),
            plan_id: plan.id,
            day: input.day,
            training: input.training.trim().to_owned(),
            distance_km: input.distance_km,
            comments: input.comments(),
        };

        self.0.create_training(&training).await?;

        tracing::info!(training = training.id, "training created");

        Ok(training.id)
    }

    #[tracing::instrument(skip(self, input), fields(day = %input.day))]
    pub async fn update_training(
        &self,
        owner_id: &str,
        plan_id: &str,
        id: &str,
        input: TrainingInput,
    ) -> runplan_shared::Result<()> {
        input.check()?;

        let plan = self.owned_plan(owner_id, plan_id).await?;

        let Some(mut training) = self.0.find_training(id).await? else {
            return Err(runplan_shared::Error::NotFound);
        };

        if training.plan_id != plan.id {
            return Err(runplan_shared::Error::NotFound);
        }

        if !plan.contains(input.day) {
            runplan_shared::user!("Training day must be within the plan dates");
        }

        training.comments = input.comments();
        training.day = input.day;
        training.training = input.training.trim().to_owned();
        training.distance_km = input.distance_km;

        self.0.update_training(&training).await?;

        Ok(())
    }

    /// Deletes a training and returns the id of its plan.
    #[tracing::instrument(skip(self))]
    pub async fn delete_training(
        &self,
        owner_id: &str,
        id: &str,
    ) -> runplan_shared::Result<String> {
        let Some(training) = self.0.find_training(id).await? else {
            return Err(runplan_shared::Error::NotFound);
        };

        let plan = self.owned_plan(owner_id, &training.plan_id).await?;

        self.0.delete_training(&training.id).await?;

        tracing::info!(training = training.id, "training deleted");

        Ok(plan.id)
    }
}
