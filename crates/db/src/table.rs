use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum User {
    Table,
    Id,
    Email,
    Password,
    FirstName,
    LastName,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum WorkoutPlan {
    Table,
    Id,
    OwnerId,
    PlanName,
    Description,
    StartDate,
    EndDate,
    IsActive,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum DailyTraining {
    Table,
    Id,
    PlanId,
    Day,
    Training,
    DistanceKm,
    Comments,
    CreatedAt,
}
