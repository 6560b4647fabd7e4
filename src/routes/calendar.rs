use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use runplan_plan::{MonthCalendar, MonthNavigation, WorkoutPlan, month_and_year_at_offset};
use serde::Serialize;
use serde_json::json;

use crate::auth::AuthUser;
use crate::routes::AppState;
use crate::template::{Template, filters};

pub const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Serialize)]
pub struct ActiveCalendar {
    pub plan: WorkoutPlan,
    pub navigation: MonthNavigation,
    pub calendar: MonthCalendar,
}

#[derive(askama::Template)]
#[template(path = "calendar.html")]
pub struct CalendarTemplate {
    pub active: Option<ActiveCalendar>,
    pub weekdays: [&'static str; 7],
}

async fn load(
    state: &AppState,
    user_id: &str,
    offset: i32,
) -> runplan_shared::Result<Option<ActiveCalendar>> {
    let Some(plan) = state.plan_query.find_active_plan(user_id).await? else {
        return Ok(None);
    };

    let navigation = MonthNavigation::new(&plan, offset, runplan_shared::today());
    if !navigation.is_browsable() {
        return Err(runplan_shared::Error::NotFound);
    }

    let Some((month, year)) = month_and_year_at_offset(offset, plan.start_date) else {
        return Err(runplan_shared::Error::NotFound);
    };
    let calendar = state.plan_query.month_calendar(&plan, month, year).await?;

    Ok(Some(ActiveCalendar {
        plan,
        navigation,
        calendar,
    }))
}

#[tracing::instrument(skip_all, fields(user = %user.id, month = offset))]
pub async fn page(
    template: Template,
    user: AuthUser,
    State(state): State<AppState>,
    Path(offset): Path<i32>,
) -> impl IntoResponse {
    let active = crate::try_page_response!(load(&state, &user.id, offset), template);

    template
        .render(CalendarTemplate {
            active,
            weekdays: WEEKDAYS,
        })
        .into_response()
}

#[tracing::instrument(skip_all, fields(user = %user.id, month = offset))]
pub async fn json(
    user: AuthUser,
    State(state): State<AppState>,
    Path(offset): Path<i32>,
) -> Response {
    match load(&state, &user.id, offset).await {
        Ok(Some(active)) => Json(active).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "no active plan"})),
        )
            .into_response(),
        Err(runplan_shared::Error::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "month out of range"})),
        )
            .into_response(),
        Err(err) => {
            tracing::error!("{err}");

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": crate::template::SERVER_ERROR_MESSAGE})),
            )
                .into_response()
        }
    }
}
