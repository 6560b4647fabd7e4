use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::{CookieJar, Query};
use runplan_user::LoginInput;
use serde::Deserialize;

use crate::routes::AppState;
use crate::template::{SERVER_ERROR_MESSAGE, Template, filters, form_error};

#[derive(askama::Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error_message: Option<String>,
    pub email: Option<String>,
    pub next: Option<String>,
}

#[derive(Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

pub async fn page(template: Template, Query(query): Query<NextQuery>) -> impl IntoResponse {
    template.render(LoginTemplate {
        error_message: None,
        email: None,
        next: query.next,
    })
}

#[derive(Deserialize)]
pub struct ActionInput {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub next: Option<String>,
}

#[tracing::instrument(skip_all)]
pub async fn action(
    template: Template,
    State(state): State<AppState>,
    jar: CookieJar,
    Form(input): Form<ActionInput>,
) -> impl IntoResponse {
    let id = match state
        .user_command
        .login(LoginInput {
            email: input.email.to_owned(),
            password: input.password,
        })
        .await
    {
        Ok(id) => id,
        Err(err) if err.is_recoverable() => {
            return template
                .render(LoginTemplate {
                    error_message: Some(form_error(&err)),
                    email: Some(input.email),
                    next: input.next,
                })
                .into_response();
        }
        Err(err) => return template.error(err),
    };

    match crate::auth::build_cookie(&state.config.jwt, id) {
        Ok(cookie) => {
            let next = crate::auth::safe_next(input.next.as_deref());

            (jar.add(cookie), Redirect::to(next)).into_response()
        }
        Err(err) => {
            tracing::error!("{err}");

            template
                .render(LoginTemplate {
                    error_message: Some(SERVER_ERROR_MESSAGE.to_owned()),
                    email: Some(input.email),
                    next: input.next,
                })
                .into_response()
        }
    }
}

pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (
        jar.remove(crate::auth::removal_cookie()),
        Redirect::to("/login"),
    )
}
