pub mod calendar;
mod command;
pub mod month;
mod query;
mod repository;
mod types;

pub use calendar::{Cell, CellLink, DayCell, Highlight, MonthCalendar, TrainingEntry, Week};
pub use command::*;
pub use month::{MonthNavigation, month_and_year_at_offset, month_offset_of};
pub use query::*;
pub use repository::*;
pub use types::*;

/// Rejects access to a plan owned by someone else.
pub fn ensure_owner(plan: &WorkoutPlan, user_id: &str) -> runplan_shared::Result<()> {
    if plan.owner_id != user_id {
        tracing::warn!(plan = plan.id, user = user_id, "access to a plan of another user");

        return Err(runplan_shared::Error::Forbidden);
    }

    Ok(())
}
