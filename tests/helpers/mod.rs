//! Shared setup for the HTTP tests: a migrated SQLite file in a temp dir and
//! the full router on top of it.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use http_body_util::BodyExt;
use runplan::{
    AppState,
    config::{Config, DatabaseConfig, JwtConfig, ObservabilityConfig, ServerConfig},
};
use sqlx_migrator::{Migrate, Plan};
use temp_dir::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    _dir: TempDir,
}

pub fn test_config(url: String) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        },
        database: DatabaseConfig {
            url,
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_owned(),
            issuer: "runplan".to_owned(),
            audience: "runplan".to_owned(),
            expiration_days: 7,
        },
        observability: ObservabilityConfig::default(),
    }
}

pub async fn setup_test_app() -> anyhow::Result<TestApp> {
    let dir = TempDir::new()?;
    let url = format!("sqlite:{}", dir.child("db.sqlite3").to_str().unwrap());
    let pool = runplan::db::create_pool(&url, 1).await?;
    let mut conn = pool.acquire().await?;
    runplan_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;
    drop(conn);

    let state = AppState::new(test_config(url), runplan_shared::State::single(pool));

    Ok(TestApp {
        router: runplan::router(state.clone()),
        state,
        _dir: dir,
    })
}

impl TestApp {
    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut req = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }

        self.router
            .clone()
            .oneshot(req.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post<T: serde::Serialize>(
        &self,
        uri: &str,
        cookie: Option<&str>,
        form: &T,
    ) -> Response<Body> {
        let mut req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }

        let body = serde_urlencoded::to_string(form).unwrap();

        self.router
            .clone()
            .oneshot(req.body(Body::from(body)).unwrap())
            .await
            .unwrap()
    }

    /// Registers `name` and returns the session cookie header value.
    pub async fn register(&self, name: &str) -> String {
        let resp = self
            .post(
                "/register",
                None,
                &[
                    ("email", format!("{name}@runplan.localhost")),
                    ("password", "my_password".to_owned()),
                    ("confirm_password", "my_password".to_owned()),
                ],
            )
            .await;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        session_cookie(&resp).expect("register sets the session cookie")
    }

    pub async fn user_id(&self, name: &str) -> String {
        self.state
            .user_command
            .find_by_email(format!("{name}@runplan.localhost"))
            .await
            .unwrap()
            .unwrap()
            .id
    }
}

pub fn session_cookie(resp: &Response<Body>) -> Option<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(runplan::auth::AUTH_COOKIE_NAME))
        .and_then(|v| v.split(';').next())
        .map(ToOwned::to_owned)
}

pub fn location(resp: &Response<Body>) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

pub async fn body_string(resp: Response<Body>) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();

    String::from_utf8(bytes.to_vec()).unwrap()
}
