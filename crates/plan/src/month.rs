//! Month offsets relative to the first month of a plan.
//!
//! Offset 0 is always the month of the plan start date. Offsets grow by one
//! per calendar month and cross year boundaries, so a plan starting in
//! November 2023 has January 2024 at offset 2.

use serde::Serialize;
use time::{Date, Month};

use crate::WorkoutPlan;

/// Number of calendar months between the month of `plan_start` and the month
/// of `reference`. Negative when `reference` precedes the plan start.
pub fn month_offset_of(reference: Date, plan_start: Date) -> i32 {
    (reference.year() - plan_start.year()) * 12 + reference.month() as i32
        - plan_start.month() as i32
}

/// Offset of the month containing `today`.
pub fn current_month_offset(plan_start: Date, today: Date) -> i32 {
    month_offset_of(today, plan_start)
}

/// Offset of the plan's last month.
pub fn last_month_offset(plan_start: Date, plan_end: Date) -> i32 {
    month_offset_of(plan_end, plan_start)
}

/// Calendar month and year found `offset` months after the plan start month.
///
/// A month sum that is a multiple of 12 lands on December of the previous
/// year, never on a month 0. Negative offsets walk back before the plan start
/// with the same arithmetic. `None` when the month falls outside the
/// representable calendar.
pub fn month_and_year_at_offset(offset: i32, plan_start: Date) -> Option<(Month, i32)> {
    let months = (plan_start.month() as i32 - 1).checked_add(offset)?;
    let year = plan_start.year().checked_add(months.div_euclid(12))?;
    let month = Month::January.nth_next(months.rem_euclid(12) as u8);

    Date::from_calendar_date(year, month, 1).ok()?;

    Some((month, year))
}

/// How many months a calendar can be browsed before the plan start or after
/// its last month.
pub const BROWSE_MARGIN: i32 = 1200;

/// Bounds for the month-by-month navigation of a plan calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthNavigation {
    pub requested: i32,
    pub current: i32,
    pub last: i32,
}

impl MonthNavigation {
    pub fn new(plan: &WorkoutPlan, requested: i32, today: Date) -> Self {
        Self {
            requested,
            current: current_month_offset(plan.start_date, today),
            last: last_month_offset(plan.start_date, plan.end_date),
        }
    }

    pub fn previous(&self) -> Option<i32> {
        (self.requested > 0).then(|| (self.requested - 1).min(self.last))
    }

    pub fn next(&self) -> Option<i32> {
        (self.requested < self.last).then(|| (self.requested + 1).max(0))
    }

    /// The requested offset stays within [`BROWSE_MARGIN`] months of the plan.
    pub fn is_browsable(&self) -> bool {
        (-BROWSE_MARGIN..=self.last.saturating_add(BROWSE_MARGIN)).contains(&self.requested)
    }

    /// Today falls inside the plan months, so a "today" link makes sense.
    pub fn has_current(&self) -> bool {
        (0..=self.last).contains(&self.current)
    }
}
