use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use runplan_plan::{DailyTraining, TrainingInput, WorkoutPlan, month_offset_of};
use serde::Deserialize;
use time::Date;

use crate::auth::AuthUser;
use crate::routes::AppState;
use crate::template::{Template, filters, form_error};

#[derive(Deserialize, Default, Clone)]
pub struct TrainingForm {
    pub day: String,
    pub training: String,
    #[serde(default)]
    pub distance_km: String,
    #[serde(default)]
    pub comments: String,
}

impl TrainingForm {
    fn from_training(training: &DailyTraining) -> Self {
        Self {
            day: runplan_shared::format_date(training.day),
            training: training.training.to_owned(),
            distance_km: training
                .distance_km
                .map(|v| v.to_string())
                .unwrap_or_default(),
            comments: training.comments.to_owned().unwrap_or_default(),
        }
    }

    fn input(&self) -> Result<TrainingInput, String> {
        let day = runplan_shared::parse_date(self.day.trim()).map_err(|_| "Invalid day".to_owned())?;

        let distance = self.distance_km.trim().replace(',', ".");
        let distance_km = if distance.is_empty() {
            None
        } else {
            Some(
                distance
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| "Invalid distance".to_owned())?,
            )
        };

        Ok(TrainingInput {
            day,
            training: self.training.to_owned(),
            distance_km,
            comments: Some(self.comments.to_owned()),
        })
    }
}

#[derive(askama::Template)]
#[template(path = "trainings/form.html")]
pub struct FormTemplate {
    pub plan: WorkoutPlan,
    pub training_id: Option<String>,
    pub action: String,
    pub form: TrainingForm,
    pub error_message: Option<String>,
}

impl FormTemplate {
    fn new_training(plan: WorkoutPlan, form: TrainingForm, error_message: Option<String>) -> Self {
        Self {
            action: format!("/plans/{}/trainings/new", plan.id),
            plan,
            training_id: None,
            form,
            error_message,
        }
    }

    fn edit_training(
        plan: WorkoutPlan,
        training_id: String,
        form: TrainingForm,
        error_message: Option<String>,
    ) -> Self {
        Self {
            action: format!("/plans/{}/trainings/{training_id}/edit", plan.id),
            plan,
            training_id: Some(training_id),
            form,
            error_message,
        }
    }
}

/// Calendar month of `day` when the plan is the active one, plan page otherwise.
fn redirect_after_save(plan: &WorkoutPlan, day: Date) -> Response {
    if plan.is_active {
        let offset = month_offset_of(day, plan.start_date);

        return Redirect::to(&format!("/calendar/{offset}")).into_response();
    }

    Redirect::to(&format!("/plans/{}", plan.id)).into_response()
}

fn default_day(plan: &WorkoutPlan) -> String {
    let today = runplan_shared::today();
    let day = if plan.contains(today) {
        today
    } else {
        plan.start_date
    };

    runplan_shared::format_date(day)
}

#[tracing::instrument(skip_all, fields(user = %user.id, plan = %id))]
pub async fn new_page(
    template: Template,
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let plan = crate::try_page_response!(state.plan_query.find_plan(&user.id, &id), template);
    let form = TrainingForm {
        day: default_day(&plan),
        ..Default::default()
    };

    template
        .render(FormTemplate::new_training(plan, form, None))
        .into_response()
}

#[tracing::instrument(skip_all, fields(user = %user.id, plan = %id, day = %day))]
pub async fn new_page_with_date(
    template: Template,
    user: AuthUser,
    State(state): State<AppState>,
    Path((id, day)): Path<(String, String)>,
) -> impl IntoResponse {
    let plan = crate::try_page_response!(state.plan_query.find_plan(&user.id, &id), template);
    let day = match runplan_shared::parse_date(&day) {
        Ok(day) => runplan_shared::format_date(day),
        _ => default_day(&plan),
    };
    let form = TrainingForm {
        day,
        ..Default::default()
    };

    template
        .render(FormTemplate::new_training(plan, form, None))
        .into_response()
}

async fn create(
    template: Template,
    user: AuthUser,
    state: AppState,
    id: String,
    form: TrainingForm,
) -> Response {
    let plan = crate::try_page_response!(state.plan_query.find_plan(&user.id, &id), template);

    let input = match form.input() {
        Ok(input) => input,
        Err(message) => {
            return template.render(FormTemplate::new_training(plan, form, Some(message)));
        }
    };
    let day = input.day;

    match state
        .plan_command
        .create_training(&user.id, &plan.id, input)
        .await
    {
        Ok(_) => redirect_after_save(&plan, day),
        Err(err) if err.is_recoverable() => template.render(FormTemplate::new_training(
            plan,
            form,
            Some(form_error(&err)),
        )),
        Err(err) => template.error(err),
    }
}

#[tracing::instrument(skip_all, fields(user = %user.id, plan = %id))]
pub async fn new_action(
    template: Template,
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<TrainingForm>,
) -> Response {
    create(template, user, state, id, form).await
}

#[tracing::instrument(skip_all, fields(user = %user.id, plan = %id))]
pub async fn new_action_with_date(
    template: Template,
    user: AuthUser,
    State(state): State<AppState>,
    Path((id, _day)): Path<(String, String)>,
    Form(form): Form<TrainingForm>,
) -> Response {
    create(template, user, state, id, form).await
}

#[tracing::instrument(skip_all, fields(user = %user.id, plan = %id, training = %training_id))]
pub async fn edit_page(
    template: Template,
    user: AuthUser,
    State(state): State<AppState>,
    Path((id, training_id)): Path<(String, String)>,
) -> impl IntoResponse {
    let (plan, training) = crate::try_page_response!(
        state.plan_query.find_training(&user.id, &id, &training_id),
        template
    );
    let form = TrainingForm::from_training(&training);

    template
        .render(FormTemplate::edit_training(plan, training.id, form, None))
        .into_response()
}

#[tracing::instrument(skip_all, fields(user = %user.id, plan = %id, training = %training_id))]
pub async fn edit_action(
    template: Template,
    user: AuthUser,
    State(state): State<AppState>,
    Path((id, training_id)): Path<(String, String)>,
    Form(form): Form<TrainingForm>,
) -> Response {
    let (plan, training) = crate::try_page_response!(
        state.plan_query.find_training(&user.id, &id, &training_id),
        template
    );

    let input = match form.input() {
        Ok(input) => input,
        Err(message) => {
            return template.render(FormTemplate::edit_training(
                plan,
                training.id,
                form,
                Some(message),
            ));
        }
    };
    let day = input.day;

    match state
        .plan_command
        .update_training(&user.id, &plan.id, &training.id, input)
        .await
    {
        Ok(_) => redirect_after_save(&plan, day),
        Err(err) if err.is_recoverable() => template.render(FormTemplate::edit_training(
            plan,
            training.id,
            form,
            Some(form_error(&err)),
        )),
        Err(err) => template.error(err),
    }
}

#[tracing::instrument(skip_all, fields(user = %user.id, training = %id))]
pub async fn delete(
    template: Template,
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let plan_id =
        crate::try_page_response!(state.plan_command.delete_training(&user.id, &id), template);

    Redirect::to(&format!("/plans/{plan_id}")).into_response()
}
