use axum::{extract::State, response::IntoResponse};
use runplan_plan::{MonthNavigation, WorkoutPlan};

use crate::auth::AuthUser;
use crate::routes::AppState;
use crate::template::{Template, filters};

#[derive(askama::Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub email: String,
    pub active_plan: Option<WorkoutPlan>,
    /// Calendar month to open: today's month when it is part of the plan.
    pub offset: i32,
}

pub async fn page(
    template: Template,
    user: AuthUser,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let active_plan =
        crate::try_page_response!(state.plan_query.find_active_plan(&user.id), template);
    let offset = active_plan
        .as_ref()
        .map(|plan| MonthNavigation::new(plan, 0, runplan_shared::today()))
        .filter(MonthNavigation::has_current)
        .map(|nav| nav.current)
        .unwrap_or_default();

    template
        .render(IndexTemplate {
            email: user.email.to_owned(),
            active_plan,
            offset,
        })
        .into_response()
}
