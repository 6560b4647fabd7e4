use axum::{
    Router,
    response::IntoResponse,
    routing::{get, post},
};
use sqlx::SqlitePool;

use crate::template::Template;

mod calendar;
mod health;
mod index;
mod login;
mod plans;
mod profile;
mod register;
mod trainings;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub user_command: runplan_user::Command,
    pub plan_command: runplan_plan::Command,
    pub plan_query: runplan_plan::Query,
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(config: crate::config::Config, state: runplan_shared::State) -> Self {
        Self {
            config,
            user_command: runplan_user::Command::new(state.clone()),
            plan_command: runplan_plan::Command::new(state.clone()),
            plan_query: runplan_plan::Query::new(state.clone()),
            pool: state.read_db,
        }
    }
}

pub async fn fallback(template: Template) -> impl IntoResponse {
    template.error(runplan_shared::Error::NotFound)
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/", get(index::page))
        .route("/register", get(register::page).post(register::action))
        .route("/login", get(login::page).post(login::action))
        .route("/logout", get(login::logout))
        .route("/profile", get(profile::page))
        .route(
            "/profile/edit",
            get(profile::edit_page).post(profile::edit_action),
        )
        .route(
            "/profile/password",
            get(profile::password_page).post(profile::password_action),
        )
        .route("/plans", get(plans::list))
        .route("/plans/new", get(plans::new_page).post(plans::new_action))
        .route(
            "/plans/select-active",
            get(plans::select_active_page).post(plans::select_active_action),
        )
        .route("/plans/{id}", get(plans::detail))
        .route(
            "/plans/{id}/edit",
            get(plans::edit_page).post(plans::edit_action),
        )
        .route("/plans/{id}/delete", post(plans::delete))
        .route(
            "/plans/{id}/trainings/new",
            get(trainings::new_page).post(trainings::new_action),
        )
        .route(
            "/plans/{id}/trainings/new/{date}",
            get(trainings::new_page_with_date).post(trainings::new_action_with_date),
        )
        .route(
            "/plans/{id}/trainings/{training_id}/edit",
            get(trainings::edit_page).post(trainings::edit_action),
        )
        .route("/trainings/{id}/delete", post(trainings::delete))
        .route("/calendar/{month}", get(calendar::page))
        .route("/calendar/{month}/json", get(calendar::json))
        .nest_service("/static", crate::assets::AssetsService::new())
        .fallback(fallback)
        .with_state(app_state)
}
