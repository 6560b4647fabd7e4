use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Response},
};
use std::{collections::HashMap, convert::Infallible};

use crate::routes::AppState;

pub const SERVER_ERROR_MESSAGE: &str = "Something went wrong, please retry later";

pub(crate) mod filters {
    /// Appends the release version to asset urls outside of dev builds.
    #[askama::filter_fn]
    pub fn asset(value: &str, values: &dyn askama::Values) -> askama::Result<String> {
        let is_dev = askama::get_value::<bool>(values, "is_dev")
            .copied()
            .unwrap_or(true);

        if is_dev {
            return Ok(value.to_owned());
        }

        let version = askama::get_value::<&'static str>(values, "version")
            .copied()
            .unwrap_or_default();

        Ok(format!("{value}?v={version}"))
    }

    #[askama::filter_fn]
    pub fn date(value: &time::Date, _values: &dyn askama::Values) -> askama::Result<String> {
        Ok(format!(
            "{} {} {} {}",
            &value.weekday().to_string()[..3],
            value.day(),
            value.month(),
            value.year()
        ))
    }

    #[askama::filter_fn]
    pub fn iso(value: &time::Date, _values: &dyn askama::Values) -> askama::Result<String> {
        Ok(runplan_shared::format_date(*value))
    }
}

pub struct Template {
    is_dev: bool,
}

impl Template {
    fn render_with_values<T: askama::Template>(
        &self,
        template: T,
    ) -> Result<String, askama::Error> {
        let mut values: HashMap<&str, Box<dyn std::any::Any>> = HashMap::new();
        values.insert("is_dev", Box::new(self.is_dev));
        values.insert("version", Box::new(env!("CARGO_PKG_VERSION")));

        template.render_with_values(&values)
    }

    pub fn render<T: askama::Template>(&self, template: T) -> Response {
        match self.render_with_values(template) {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!("failed to render template: {err}");

                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE).into_response()
            }
        }
    }

    /// Error page matching `err`: 404, 403 or 500.
    pub fn error(&self, err: runplan_shared::Error) -> Response {
        match err {
            runplan_shared::Error::NotFound => {
                (StatusCode::NOT_FOUND, self.render(NotFoundTemplate)).into_response()
            }
            runplan_shared::Error::Forbidden => {
                (StatusCode::FORBIDDEN, self.render(ForbiddenTemplate)).into_response()
            }
            err => {
                tracing::error!("{err}");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    self.render(ServerTemplate),
                )
                    .into_response()
            }
        }
    }
}

impl FromRequestParts<AppState> for Template {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Template {
            is_dev: cfg!(debug_assertions),
        })
    }
}

/// Message shown on a form for an error the user can fix.
pub fn form_error(err: &runplan_shared::Error) -> String {
    match err {
        runplan_shared::Error::Validate(errors) => {
            let mut fields = errors
                .field_errors()
                .into_keys()
                .map(|field| field.replace('_', " "))
                .collect::<Vec<_>>();
            fields.sort();

            format!("Invalid {}", fields.join(", "))
        }
        err => err.to_string(),
    }
}

#[derive(askama::Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate;

#[derive(askama::Template)]
#[template(path = "403.html")]
pub struct ForbiddenTemplate;

#[derive(askama::Template)]
#[template(path = "500.html")]
pub struct ServerTemplate;

#[macro_export]
macro_rules! try_page_response {
    ($result:expr, $template:expr) => {
        $crate::try_page_response!(sync: $result.await, $template)
    };

    (sync: $result:expr, $template:expr) => {
        match $result {
            Ok(r) => r,
            Err(err) => return $template.error(err),
        }
    };

    (opt: $result:expr, $template:expr) => {
        match $result.await {
            Ok(Some(r)) => r,
            Ok(_) => return $template.error(runplan_shared::Error::NotFound),
            Err(err) => return $template.error(err),
        }
    };
}
