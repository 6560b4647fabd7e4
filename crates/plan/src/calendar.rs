//! One month of a workout plan laid out as calendar weeks.
//!
//! The grid is plain data: rows of cell descriptors carrying the day number,
//! the highlight, the link target and the label. HTML, JSON and text output
//! are produced from it by the caller (see [`MonthCalendar`]'s `Display`
//! implementation for the text form).

use std::{collections::BTreeMap, fmt};

use serde::Serialize;
use time::{Date, Month, Weekday};

use crate::{DailyTraining, WorkoutPlan};

pub const START_COLOR: &str = "greenyellow";
pub const END_COLOR: &str = "#ff6666";
pub const TRAINING_COLOR: &str = "#798EF6";

#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    #[error("invalid calendar date: {0}")]
    Date(#[from] time::error::ComponentRange),
}

impl From<CalendarError> for runplan_shared::Error {
    fn from(value: CalendarError) -> Self {
        Self::Unknown(value.into())
    }
}

/// Seven `(day, weekday)` pairs, Monday first. Day 0 pads the days that
/// belong to the previous or next month.
pub type WeekDays = Vec<(u8, Weekday)>;

/// Weeks of a month, Monday first, padded with day 0 on both ends.
pub fn month_weeks(year: i32, month: Month) -> Result<Vec<WeekDays>, CalendarError> {
    let first = Date::from_calendar_date(year, month, 1)?;
    let mut weeks = Vec::with_capacity(6);
    let mut week: WeekDays = Vec::with_capacity(7);

    let mut weekday = Weekday::Monday;
    while weekday != first.weekday() {
        week.push((0, weekday));
        weekday = weekday.next();
    }

    let mut current = Some(first);
    while let Some(date) = current.filter(|d| d.month() == month) {
        week.push((date.day(), date.weekday()));

        if week.len() == 7 {
            weeks.push(std::mem::replace(&mut week, Vec::with_capacity(7)));
        }

        current = date.next_day();
    }

    if let Some(&(_, last)) = week.last() {
        let mut weekday = last.next();
        while week.len() < 7 {
            week.push((0, weekday));
            weekday = weekday.next();
        }
        weeks.push(week);
    }

    Ok(weeks)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    None,
    Start,
    End,
    Training,
}

impl Highlight {
    pub fn color(&self) -> &'static str {
        match self {
            Highlight::None => "",
            Highlight::Start => START_COLOR,
            Highlight::End => END_COLOR,
            Highlight::Training => TRAINING_COLOR,
        }
    }

    fn marker(&self) -> char {
        match self {
            Highlight::None => ' ',
            Highlight::Start => 'S',
            Highlight::End => 'E',
            Highlight::Training => '*',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellLink {
    EditTraining { plan_id: String, training_id: String },
    NewTraining { plan_id: String, day: Date },
}

impl CellLink {
    pub fn href(&self) -> String {
        match self {
            CellLink::EditTraining {
                plan_id,
                training_id,
            } => format!("/plans/{plan_id}/trainings/{training_id}/edit"),
            CellLink::NewTraining { plan_id, day } => format!(
                "/plans/{plan_id}/trainings/new/{}",
                runplan_shared::format_date(*day)
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub day: u8,
    /// 0 for Monday through 6 for Sunday.
    pub weekday: u8,
    pub date: Date,
    pub highlight: Highlight,
    pub link: CellLink,
    pub label: Option<String>,
}

impl DayCell {
    pub fn color(&self) -> &'static str {
        self.highlight.color()
    }

    pub fn href(&self) -> String {
        self.link.href()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Cell {
    Padding { weekday: u8 },
    Day(DayCell),
}

impl Cell {
    pub fn as_day(&self) -> Option<&DayCell> {
        match self {
            Cell::Day(day) => Some(day),
            Cell::Padding { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Week {
    pub cells: Vec<Cell>,
}

/// The training shown on a calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainingEntry {
    pub id: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCalendar {
    pub plan_id: String,
    pub year: i32,
    pub month: u8,
    pub title: String,
    pub weeks: Vec<Week>,
}

impl MonthCalendar {
    /// Builds the grid of `month`/`year` for `plan`.
    ///
    /// Trainings outside the month are ignored. When several trainings share
    /// a day, the last one in date order is kept.
    pub fn build(
        plan: &WorkoutPlan,
        month: Month,
        year: i32,
        trainings: impl IntoIterator<Item = DailyTraining>,
    ) -> Result<Self, CalendarError> {
        let entries = training_entries(month, year, trainings);
        let mut weeks = Vec::with_capacity(6);

        for week in month_weeks(year, month)? {
            let mut cells = Vec::with_capacity(7);

            for (day, weekday) in week {
                cells.push(day_cell(plan, &entries, month, year, day, weekday)?);
            }

            weeks.push(Week { cells });
        }

        Ok(Self {
            plan_id: plan.id.to_owned(),
            year,
            month: month as u8,
            title: format!("{month} {year}"),
            weeks,
        })
    }

    pub fn weeks(&self) -> impl Iterator<Item = &Week> {
        self.weeks.iter()
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks
            .iter()
            .flat_map(|week| week.cells.iter())
            .filter_map(Cell::as_day)
    }

    pub fn day(&self, day: u8) -> Option<&DayCell> {
        self.days().find(|cell| cell.day == day)
    }
}

impl fmt::Display for MonthCalendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, " Mo  Tu  We  Th  Fr  Sa  Su")?;

        for week in self.weeks() {
            let row = week
                .cells
                .iter()
                .map(|cell| match cell {
                    Cell::Padding { .. } => "    ".to_owned(),
                    Cell::Day(day) => format!(" {:>2}{}", day.day, day.highlight.marker()),
                })
                .collect::<String>();

            writeln!(f, "{}", row.trim_end())?;
        }

        Ok(())
    }
}

fn training_entries(
    month: Month,
    year: i32,
    trainings: impl IntoIterator<Item = DailyTraining>,
) -> BTreeMap<u8, TrainingEntry> {
    let mut trainings = trainings
        .into_iter()
        .filter(|t| t.day.year() == year && t.day.month() == month)
        .collect::<Vec<_>>();

    trainings.sort_by_key(|t| t.day);

    let mut entries = BTreeMap::new();
    for training in trainings {
        entries.insert(
            training.day.day(),
            TrainingEntry {
                display_name: training.display_name(),
                id: training.id,
            },
        );
    }

    entries
}

fn day_cell(
    plan: &WorkoutPlan,
    entries: &BTreeMap<u8, TrainingEntry>,
    month: Month,
    year: i32,
    day: u8,
    weekday: Weekday,
) -> Result<Cell, CalendarError> {
    let weekday = weekday.number_days_from_monday();

    if day == 0 {
        return Ok(Cell::Padding { weekday });
    }

    let date = Date::from_calendar_date(year, month, day)?;
    let entry = entries.get(&day);

    let highlight = if date == plan.start_date {
        Highlight::Start
    } else if date == plan.end_date {
        Highlight::End
    } else if entry.is_some() {
        Highlight::Training
    } else {
        Highlight::None
    };

    let (link, label) = match entry {
        Some(entry) => (
            CellLink::EditTraining {
                plan_id: plan.id.to_owned(),
                training_id: entry.id.to_owned(),
            },
            Some(entry.display_name.to_owned()),
        ),
        _ => (
            CellLink::NewTraining {
                plan_id: plan.id.to_owned(),
                day: date,
            },
            None,
        ),
    };

    Ok(Cell::Day(DayCell {
        day,
        weekday,
        date,
        highlight,
        link,
        label,
    }))
}
