mod daily_training;
mod daily_training_plan_day_idx;
mod user;
mod user_email_idx;
mod workout_plan;
mod workout_plan_owner_idx;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "runplan",
    "m0_1",
    vec_box![],
    vec_box![
        user::CreateTable,
        user_email_idx::Operation,
        workout_plan::CreateTable,
        workout_plan_owner_idx::Operation,
        daily_training::CreateTable,
        daily_training_plan_day_idx::Operation
    ]
);
