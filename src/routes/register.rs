use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::CookieJar;
use runplan_user::RegisterInput;
use serde::Deserialize;

use crate::routes::AppState;
use crate::template::{SERVER_ERROR_MESSAGE, Template, filters, form_error};

#[derive(askama::Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub error_message: Option<String>,
    pub email: Option<String>,
}

pub async fn page(template: Template) -> impl IntoResponse {
    template.render(RegisterTemplate {
        error_message: None,
        email: None,
    })
}

#[derive(Deserialize)]
pub struct ActionInput {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[tracing::instrument(skip_all)]
pub async fn action(
    template: Template,
    State(state): State<AppState>,
    jar: CookieJar,
    Form(input): Form<ActionInput>,
) -> impl IntoResponse {
    if input.password != input.confirm_password {
        return template
            .render(RegisterTemplate {
                error_message: Some("Passwords do not match".to_owned()),
                email: Some(input.email),
            })
            .into_response();
    }

    let id = match state
        .user_command
        .register(RegisterInput {
            email: input.email.to_owned(),
            password: input.password,
        })
        .await
    {
        Ok(id) => id,
        Err(err) if err.is_recoverable() => {
            return template
                .render(RegisterTemplate {
                    error_message: Some(form_error(&err)),
                    email: Some(input.email),
                })
                .into_response();
        }
        Err(err) => return template.error(err),
    };

    match crate::auth::build_cookie(&state.config.jwt, id) {
        Ok(cookie) => (jar.add(cookie), Redirect::to("/")).into_response(),
        Err(err) => {
            tracing::error!("{err}");

            template
                .render(RegisterTemplate {
                    error_message: Some(SERVER_ERROR_MESSAGE.to_owned()),
                    email: Some(input.email),
                })
                .into_response()
        }
    }
}
