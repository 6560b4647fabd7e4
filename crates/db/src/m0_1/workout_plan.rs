use sea_query::{ColumnDef, ForeignKey, ForeignKeyAction, Table, TableCreateStatement, TableDropStatement};

use crate::table::{User, WorkoutPlan};

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(WorkoutPlan::Table)
        .col(
            ColumnDef::new(WorkoutPlan::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(WorkoutPlan::OwnerId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(WorkoutPlan::PlanName)
                .string()
                .not_null()
                .string_len(100),
        )
        .col(ColumnDef::new(WorkoutPlan::Description).text().null())
        .col(
            ColumnDef::new(WorkoutPlan::StartDate)
                .big_integer()
                .not_null(),
        )
        .col(ColumnDef::new(WorkoutPlan::EndDate).big_integer().not_null())
        .col(
            ColumnDef::new(WorkoutPlan::IsActive)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(WorkoutPlan::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_workout_plan_owner")
                .from(WorkoutPlan::Table, WorkoutPlan::OwnerId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(WorkoutPlan::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
