use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use runplan_user::{ChangePasswordInput, Profile, UpdateProfileInput};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::routes::AppState;
use crate::template::{Template, filters, form_error};

#[derive(askama::Template)]
#[template(path = "profile/show.html")]
pub struct ProfileTemplate {
    pub profile: Profile,
}

#[tracing::instrument(skip_all, fields(user = %user.id))]
pub async fn page(
    template: Template,
    user: AuthUser,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let profile = crate::try_page_response!(state.user_command.profile(&user.id), template);

    template.render(ProfileTemplate { profile }).into_response()
}

#[derive(Deserialize, Default)]
pub struct EditForm {
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(askama::Template)]
#[template(path = "profile/edit.html")]
pub struct EditTemplate {
    pub form: EditForm,
    pub error_message: Option<String>,
}

#[tracing::instrument(skip_all, fields(user = %user.id))]
pub async fn edit_page(
    template: Template,
    user: AuthUser,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let profile = crate::try_page_response!(state.user_command.profile(&user.id), template);

    template
        .render(EditTemplate {
            form: EditForm {
                email: profile.email,
                first_name: profile.first_name.unwrap_or_default(),
                last_name: profile.last_name.unwrap_or_default(),
            },
            error_message: None,
        })
        .into_response()
}

#[tracing::instrument(skip_all, fields(user = %user.id))]
pub async fn edit_action(
    template: Template,
    user: AuthUser,
    State(state): State<AppState>,
    Form(form): Form<EditForm>,
) -> Response {
    let input = UpdateProfileInput {
        email: form.email.to_owned(),
        first_name: Some(form.first_name.to_owned()),
        last_name: Some(form.last_name.to_owned()),
    };

    match state.user_command.update_profile(&user.id, input).await {
        Ok(_) => Redirect::to("/profile").into_response(),
        Err(err) if err.is_recoverable() => template.render(EditTemplate {
            form,
            error_message: Some(form_error(&err)),
        }),
        Err(err) => template.error(err),
    }
}

#[derive(askama::Template)]
#[template(path = "profile/password.html")]
pub struct PasswordTemplate {
    pub error_message: Option<String>,
}

pub async fn password_page(template: Template, _user: AuthUser) -> impl IntoResponse {
    template.render(PasswordTemplate {
        error_message: None,
    })
}

#[derive(Deserialize)]
pub struct PasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Changes the password and ends the session, the user logs in again.
#[tracing::instrument(skip_all, fields(user = %user.id))]
pub async fn password_action(
    template: Template,
    user: AuthUser,
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<PasswordForm>,
) -> Response {
    if form.new_password != form.confirm_password {
        return template.render(PasswordTemplate {
            error_message: Some("Passwords do not match".to_owned()),
        });
    }

    let input = ChangePasswordInput {
        current_password: form.current_password,
        new_password: form.new_password,
    };

    match state.user_command.change_password(&user.id, input).await {
        Ok(_) => (
            jar.remove(crate::auth::removal_cookie()),
            Redirect::to("/login"),
        )
            .into_response(),
        Err(err) if err.is_recoverable() => template.render(PasswordTemplate {
            error_message: Some(form_error(&err)),
        }),
        Err(err) => template.error(err),
    }
}
