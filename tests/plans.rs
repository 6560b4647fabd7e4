use axum::http::StatusCode;

mod helpers;

fn plan_form<'a>(name: &'a str, start: &'a str, end: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("plan_name", name),
        ("description", ""),
        ("start_date", start),
        ("end_date", end),
    ]
}

#[tokio::test]
async fn create_plan_and_show_it() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;
    let cookie = app.register("john").await;

    let mut form = plan_form("Spring marathon", "2024-01-15", "2024-04-15");
    form.push(("is_active", "on"));

    let resp = app.post("/plans/new", Some(&cookie), &form).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let detail = helpers::location(&resp).to_owned();
    assert!(detail.starts_with("/plans/"));

    let resp = app.get(&detail, Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = helpers::body_string(resp).await;
    assert!(body.contains("Spring marathon"));
    assert!(body.contains("Mon 15 January 2024"));
    assert!(body.contains("active"));

    let resp = app.get("/plans", Some(&cookie)).await;
    assert!(helpers::body_string(resp).await.contains("Spring marathon"));

    let resp = app.get("/", Some(&cookie)).await;
    assert!(helpers::body_string(resp).await.contains("Open calendar"));

    Ok(())
}

#[tokio::test]
async fn invalid_plan_form_is_rendered_again() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;
    let cookie = app.register("john").await;

    let resp = app
        .post(
            "/plans/new",
            Some(&cookie),
            &plan_form("Backwards", "2024-04-15", "2024-01-15"),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = helpers::body_string(resp).await;
    assert!(body.contains("End date must be on or after the start date"));
    assert!(body.contains("Backwards"));

    let resp = app
        .post(
            "/plans/new",
            Some(&cookie),
            &plan_form("Bad date", "2024-02-30", "2024-04-15"),
        )
        .await;
    assert!(helpers::body_string(resp).await.contains("Invalid start date"));

    let resp = app
        .post(
            "/plans/new",
            Some(&cookie),
            &plan_form("", "2024-01-15", "2024-04-15"),
        )
        .await;
    assert!(helpers::body_string(resp).await.contains("Invalid plan name"));

    Ok(())
}

#[tokio::test]
async fn edit_and_delete_plan() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;
    let cookie = app.register("john").await;

    let resp = app
        .post(
            "/plans/new",
            Some(&cookie),
            &plan_form("Base", "2024-01-15", "2024-04-15"),
        )
        .await;
    let detail = helpers::location(&resp).to_owned();

    let resp = app.get(&format!("{detail}/edit"), Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(helpers::body_string(resp).await.contains("2024-01-15"));

    let resp = app
        .post(
            &format!("{detail}/edit"),
            Some(&cookie),
            &plan_form("Half marathon", "2024-02-01", "2024-05-19"),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(helpers::location(&resp), detail);

    let resp = app.get(&detail, Some(&cookie)).await;
    assert!(helpers::body_string(resp).await.contains("Half marathon"));

    let resp = app
        .post(&format!("{detail}/delete"), Some(&cookie), &[("", "")])
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(helpers::location(&resp), "/plans");

    let resp = app.get(&detail, Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn plans_of_other_users_are_forbidden() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;
    let john = app.register("john").await;
    let jane = app.register("jane").await;

    let resp = app
        .post(
            "/plans/new",
            Some(&john),
            &plan_form("Johns plan", "2024-01-15", "2024-04-15"),
        )
        .await;
    let detail = helpers::location(&resp).to_owned();

    let resp = app.get(&detail, Some(&jane)).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = app.get(&format!("{detail}/edit"), Some(&jane)).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = app
        .post(&format!("{detail}/delete"), Some(&jane), &[("", "")])
        .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let plan_id = detail.trim_start_matches("/plans/");
    let resp = app
        .post("/plans/select-active", Some(&jane), &[("plan_id", plan_id)])
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app.get("/plans/unknown", Some(&jane)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn select_active_plan() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;
    let cookie = app.register("john").await;

    let mut form = plan_form("First", "2024-01-15", "2024-04-15");
    form.push(("is_active", "on"));
    app.post("/plans/new", Some(&cookie), &form).await;

    let resp = app
        .post(
            "/plans/new",
            Some(&cookie),
            &plan_form("Second", "2024-05-01", "2024-08-31"),
        )
        .await;
    let second = helpers::location(&resp).trim_start_matches("/plans/").to_owned();

    let resp = app.get("/plans/select-active", Some(&cookie)).await;
    let body = helpers::body_string(resp).await;
    assert!(body.contains("First"));
    assert!(body.contains("Second"));

    let resp = app
        .post(
            "/plans/select-active",
            Some(&cookie),
            &[("plan_id", second.as_str())],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(helpers::location(&resp), "/plans");

    let user_id = app.user_id("john").await;
    let active = app
        .state
        .plan_query
        .list_plans(&user_id)
        .await?
        .into_iter()
        .filter(|p| p.is_active)
        .map(|p| p.id)
        .collect::<Vec<_>>();
    assert_eq!(active, vec![second]);

    Ok(())
}
