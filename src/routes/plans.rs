use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use runplan_plan::{CreatePlanInput, MonthNavigation, UpdatePlanInput, WorkoutPlan, month};
use serde::Deserialize;
use time::Date;

use crate::auth::AuthUser;
use crate::routes::AppState;
use crate::template::{Template, filters, form_error};

#[derive(askama::Template)]
#[template(path = "plans/list.html")]
pub struct ListTemplate {
    pub plans: Vec<WorkoutPlan>,
}

#[tracing::instrument(skip_all, fields(user = %user.id))]
pub async fn list(
    template: Template,
    user: AuthUser,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let plans = crate::try_page_response!(state.plan_query.list_plans(&user.id), template);

    template.render(ListTemplate { plans }).into_response()
}

#[derive(askama::Template)]
#[template(path = "plans/detail.html")]
pub struct DetailTemplate {
    pub plan: WorkoutPlan,
    pub nav: MonthNavigation,
}

#[tracing::instrument(skip_all, fields(user = %user.id, plan = %id))]
pub async fn detail(
    template: Template,
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let plan = crate::try_page_response!(state.plan_query.find_plan(&user.id, &id), template);
    let today = runplan_shared::today();
    let current = month::current_month_offset(plan.start_date, today);
    let nav = MonthNavigation::new(&plan, current, today);

    template.render(DetailTemplate { plan, nav }).into_response()
}

#[derive(Deserialize, Default, Clone)]
pub struct PlanForm {
    pub plan_name: String,
    #[serde(default)]
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub is_active: Option<String>,
}

impl PlanForm {
    fn from_plan(plan: &WorkoutPlan) -> Self {
        Self {
            plan_name: plan.plan_name.to_owned(),
            description: plan.description.to_owned().unwrap_or_default(),
            start_date: runplan_shared::format_date(plan.start_date),
            end_date: runplan_shared::format_date(plan.end_date),
            is_active: plan.is_active.then(|| "on".to_owned()),
        }
    }

    fn dates(&self) -> Result<(Date, Date), String> {
        let start_date = runplan_shared::parse_date(self.start_date.trim())
            .map_err(|_| "Invalid start date".to_owned())?;
        let end_date = runplan_shared::parse_date(self.end_date.trim())
            .map_err(|_| "Invalid end date".to_owned())?;

        Ok((start_date, end_date))
    }

    fn description(&self) -> Option<String> {
        Some(self.description.to_owned()).filter(|v| !v.trim().is_empty())
    }
}

#[derive(askama::Template)]
#[template(path = "plans/form.html")]
pub struct FormTemplate {
    pub title: &'static str,
    pub action: String,
    pub is_new: bool,
    pub form: PlanForm,
    pub error_message: Option<String>,
}

impl FormTemplate {
    fn new_plan(form: PlanForm, error_message: Option<String>) -> Self {
        Self {
            title: "New plan",
            action: "/plans/new".to_owned(),
            is_new: true,
            form,
            error_message,
        }
    }

    fn edit_plan(id: &str, form: PlanForm, error_message: Option<String>) -> Self {
        Self {
            title: "Edit plan",
            action: format!("/plans/{id}/edit"),
            is_new: false,
            form,
            error_message,
        }
    }
}

pub async fn new_page(template: Template, _user: AuthUser) -> impl IntoResponse {
    let today = runplan_shared::format_date(runplan_shared::today());

    template.render(FormTemplate::new_plan(
        PlanForm {
            start_date: today.to_owned(),
            end_date: today,
            ..Default::default()
        },
        None,
    ))
}

#[tracing::instrument(skip_all, fields(user = %user.id))]
pub async fn new_action(
    template: Template,
    user: AuthUser,
    State(state): State<AppState>,
    Form(form): Form<PlanForm>,
) -> Response {
    let (start_date, end_date) = match form.dates() {
        Ok(dates) => dates,
        Err(message) => {
            return template.render(FormTemplate::new_plan(form, Some(message)));
        }
    };

    let input = CreatePlanInput {
        plan_name: form.plan_name.to_owned(),
        description: form.description(),
        start_date,
        end_date,
        is_active: form.is_active.is_some(),
    };

    match state.plan_command.create_plan(&user.id, input).await {
        Ok(id) => Redirect::to(&format!("/plans/{id}")).into_response(),
        Err(err) if err.is_recoverable() => {
            template.render(FormTemplate::new_plan(form, Some(form_error(&err))))
        }
        Err(err) => template.error(err),
    }
}

#[tracing::instrument(skip_all, fields(user = %user.id, plan = %id))]
pub async fn edit_page(
    template: Template,
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let plan = crate::try_page_response!(state.plan_query.find_plan(&user.id, &id), template);

    template
        .render(FormTemplate::edit_plan(
            &plan.id,
            PlanForm::from_plan(&plan),
            None,
        ))
        .into_response()
}

#[tracing::instrument(skip_all, fields(user = %user.id, plan = %id))]
pub async fn edit_action(
    template: Template,
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<PlanForm>,
) -> Response {
    let (start_date, end_date) = match form.dates() {
        Ok(dates) => dates,
        Err(message) => {
            return template.render(FormTemplate::edit_plan(&id, form, Some(message)));
        }
    };

    let input = UpdatePlanInput {
        plan_name: form.plan_name.to_owned(),
        description: form.description(),
        start_date,
        end_date,
    };

    match state.plan_command.update_plan(&user.id, &id, input).await {
        Ok(_) => Redirect::to(&format!("/plans/{id}")).into_response(),
        Err(err) if err.is_recoverable() => {
            template.render(FormTemplate::edit_plan(&id, form, Some(form_error(&err))))
        }
        Err(err) => template.error(err),
    }
}

#[tracing::instrument(skip_all, fields(user = %user.id, plan = %id))]
pub async fn delete(
    template: Template,
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    crate::try_page_response!(state.plan_command.delete_plan(&user.id, &id), template);

    Redirect::to("/plans").into_response()
}

#[derive(askama::Template)]
#[template(path = "plans/select_active.html")]
pub struct SelectActiveTemplate {
    pub plans: Vec<WorkoutPlan>,
}

pub async fn select_active_page(
    template: Template,
    user: AuthUser,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let plans = crate::try_page_response!(state.plan_query.list_plans(&user.id), template);

    template.render(SelectActiveTemplate { plans }).into_response()
}

#[derive(Deserialize)]
pub struct SelectActiveForm {
    pub plan_id: String,
}

#[tracing::instrument(skip_all, fields(user = %user.id, plan = %form.plan_id))]
pub async fn select_active_action(
    template: Template,
    user: AuthUser,
    State(state): State<AppState>,
    Form(form): Form<SelectActiveForm>,
) -> impl IntoResponse {
    crate::try_page_response!(
        state.plan_command.activate(&user.id, &form.plan_id),
        template
    );

    Redirect::to("/plans").into_response()
}
