use std::ops::Deref;

use crate::SqliteRepository;

mod plan;
mod training;

pub use plan::{CreatePlanInput, UpdatePlanInput};
pub use training::TrainingInput;

/// Write side of plans and trainings.
#[derive(Clone)]
pub struct Command<R = SqliteRepository>(pub R);

impl<R> Deref for Command<R> {
    type Target = R;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Command<SqliteRepository> {
    pub fn new(state: runplan_shared::State) -> Self {
        Self(SqliteRepository(state))
    }
}
