use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::FromRequestParts,
    http::{Method, request::Parts},
    response::Redirect,
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;
use crate::routes::AppState;

pub const AUTH_COOKIE_NAME: &str = "auth_token";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    aud: String,
    exp: u64,
    iat: u64,
    iss: String,
    sub: String,
}

pub fn generate_token(config: &JwtConfig, sub: String) -> anyhow::Result<String> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let claims = Claims {
        aud: config.audience.to_owned(),
        exp: now + config.expiration_days * 24 * 60 * 60,
        iat: now,
        iss: config.issuer.to_owned(),
        sub,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok(token)
}

pub fn decode_token(config: &JwtConfig, token: &str) -> anyhow::Result<String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[config.issuer.to_owned()]);
    validation.set_audience(&[config.audience.to_owned()]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims.sub)
}

pub fn build_cookie<'a>(config: &JwtConfig, sub: String) -> anyhow::Result<Cookie<'a>> {
    let token = generate_token(config, sub)?;

    Ok(Cookie::build((AUTH_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .build())
}

pub fn removal_cookie<'a>() -> Cookie<'a> {
    Cookie::build((AUTH_COOKIE_NAME, "")).path("/").build()
}

/// Sends a page request back to login, remembering where it was going.
pub fn login_redirect(parts: &Parts) -> Redirect {
    let target = parts
        .uri
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or("/");

    if parts.method != Method::GET || target == "/" {
        return Redirect::to("/login");
    }

    match serde_urlencoded::to_string([("next", target)]) {
        Ok(query) => Redirect::to(&format!("/login?{query}")),
        Err(_) => Redirect::to("/login"),
    }
}

/// Only same-site paths are followed after login.
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(next)
            if next.starts_with('/') && !next.starts_with("//") && !next.contains('\\') =>
        {
            next
        }
        _ => "/",
    }
}

/// The signed-in user. Requests without a valid session are redirected to
/// the login page.
pub struct AuthUser(pub runplan_user::AuthUser);

impl std::ops::Deref for AuthUser {
    type Target = runplan_user::AuthUser;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| login_redirect(parts))?;

        let token = jar
            .get(AUTH_COOKIE_NAME)
            .map(|cookie| cookie.value().to_owned())
            .ok_or_else(|| login_redirect(parts))?;

        let sub = decode_token(&state.config.jwt, &token).map_err(|e| {
            tracing::debug!("invalid session token: {e}");
            login_redirect(parts)
        })?;

        let Some(user) = state.user_command.find(sub).await.map_err(|e| {
            tracing::error!("{e}");
            login_redirect(parts)
        })?
        else {
            return Err(login_redirect(parts));
        };

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_owned(),
            issuer: "runplan".to_owned(),
            audience: "runplan".to_owned(),
            expiration_days: 7,
        }
    }

    #[test]
    fn test_token_round_trip() {
        let token = generate_token(&config(), "01J0USER".to_owned()).unwrap();

        assert_eq!(decode_token(&config(), &token).unwrap(), "01J0USER");
    }

    #[test]
    fn test_token_rejected_with_other_secret() {
        let token = generate_token(&config(), "01J0USER".to_owned()).unwrap();
        let mut other = config();
        other.secret = "another_secret_key_minimum_32_characters".to_owned();

        assert!(decode_token(&other, &token).is_err());

        let mut other = config();
        other.audience = "someone-else".to_owned();

        assert!(decode_token(&other, &token).is_err());
    }

    #[test]
    fn test_safe_next() {
        assert_eq!(safe_next(Some("/plans/01J0PLAN?x=1")), "/plans/01J0PLAN?x=1");
        assert_eq!(safe_next(Some("/calendar/2")), "/calendar/2");
        assert_eq!(safe_next(None), "/");
        assert_eq!(safe_next(Some("")), "/");
        assert_eq!(safe_next(Some("//evil.com")), "/");
        assert_eq!(safe_next(Some("/\\evil.com")), "/");
        assert_eq!(safe_next(Some("https://evil.com")), "/");
        assert_eq!(safe_next(Some("plans")), "/");
    }
}
