use sea_query::{ColumnDef, ForeignKey, ForeignKeyAction, Table, TableCreateStatement, TableDropStatement};

use crate::table::{DailyTraining, WorkoutPlan};

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(DailyTraining::Table)
        .col(
            ColumnDef::new(DailyTraining::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(DailyTraining::PlanId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(ColumnDef::new(DailyTraining::Day).big_integer().not_null())
        .col(
            ColumnDef::new(DailyTraining::Training)
                .string()
                .not_null()
                .string_len(255),
        )
        .col(ColumnDef::new(DailyTraining::DistanceKm).double().null())
        .col(ColumnDef::new(DailyTraining::Comments).text().null())
        .col(
            ColumnDef::new(DailyTraining::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_daily_training_plan")
                .from(DailyTraining::Table, DailyTraining::PlanId)
                .to(WorkoutPlan::Table, WorkoutPlan::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(DailyTraining::Table).to_owned()
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
