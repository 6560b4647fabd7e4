use runplan_shared::{date_from_timestamp, date_to_timestamp};
use serde::Serialize;
use sqlx::prelude::FromRow;
use time::Date;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutPlan {
    pub id: String,
    pub owner_id: String,
    pub plan_name: String,
    pub description: Option<String>,
    pub start_date: Date,
    pub end_date: Date,
    pub is_active: bool,
}

impl WorkoutPlan {
    /// Both bounds are inclusive.
    pub fn contains(&self, day: Date) -> bool {
        self.start_date <= day && day <= self.end_date
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTraining {
    pub id: String,
    pub plan_id: String,
    pub day: Date,
    pub training: String,
    pub distance_km: Option<f64>,
    pub comments: Option<String>,
}

impl DailyTraining {
    pub fn display_name(&self) -> String {
        match self.distance_km {
            Some(distance) => format!("{} ({distance} km)", self.training),
            _ => self.training.to_owned(),
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct PlanRow {
    pub id: String,
    pub owner_id: String,
    pub plan_name: String,
    pub description: Option<String>,
    pub start_date: i64,
    pub end_date: i64,
    pub is_active: bool,
}

impl TryFrom<PlanRow> for WorkoutPlan {
    type Error = time::error::ComponentRange;

    fn try_from(row: PlanRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            owner_id: row.owner_id,
            plan_name: row.plan_name,
            description: row.description,
            start_date: date_from_timestamp(row.start_date)?,
            end_date: date_from_timestamp(row.end_date)?,
            is_active: row.is_active,
        })
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct TrainingRow {
    pub id: String,
    pub plan_id: String,
    pub day: i64,
    pub training: String,
    pub distance_km: Option<f64>,
    pub comments: Option<String>,
}

impl TryFrom<TrainingRow> for DailyTraining {
    type Error = time::error::ComponentRange;

    fn try_from(row: TrainingRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            plan_id: row.plan_id,
            day: date_from_timestamp(row.day)?,
            training: row.training,
            distance_km: row.distance_km,
            comments: row.comments,
        })
    }
}

pub(crate) fn day_value(day: Date) -> i64 {
    date_to_timestamp(day)
}
