use axum::http::StatusCode;

mod helpers;

async fn active_plan(app: &helpers::TestApp, cookie: &str) -> String {
    let resp = app
        .post(
            "/plans/new",
            Some(cookie),
            &[
                ("plan_name", "Spring marathon"),
                ("start_date", "2024-01-15"),
                ("end_date", "2024-04-15"),
                ("is_active", "on"),
            ],
        )
        .await;

    helpers::location(&resp)
        .trim_start_matches("/plans/")
        .to_owned()
}

#[tokio::test]
async fn new_training_form_is_prefilled() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;
    let cookie = app.register("john").await;
    let plan_id = active_plan(&app, &cookie).await;

    let resp = app
        .get(
            &format!("/plans/{plan_id}/trainings/new/2024-02-03"),
            Some(&cookie),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = helpers::body_string(resp).await;
    assert!(body.contains(r#"value="2024-02-03""#));
    assert!(body.contains(r#"min="2024-01-15""#));
    assert!(body.contains(r#"max="2024-04-15""#));

    Ok(())
}

#[tokio::test]
async fn create_edit_and_delete_training() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;
    let cookie = app.register("john").await;
    let plan_id = active_plan(&app, &cookie).await;

    let resp = app
        .post(
            &format!("/plans/{plan_id}/trainings/new/2024-02-03"),
            Some(&cookie),
            &[
                ("day", "2024-02-03"),
                ("training", "Long run"),
                ("distance_km", "18"),
                ("comments", ""),
            ],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(helpers::location(&resp), "/calendar/1");

    let resp = app.get("/calendar/1/json", Some(&cookie)).await;
    let json: serde_json::Value = serde_json::from_str(&helpers::body_string(resp).await)?;
    let cell = json["calendar"]["weeks"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|w| w["cells"].as_array().unwrap())
        .find(|c| c["day"] == 3)
        .unwrap()
        .clone();
    assert_eq!(cell["label"], "Long run (18 km)");
    let training_id = cell["link"]["training_id"].as_str().unwrap().to_owned();
    let edit = format!("/plans/{plan_id}/trainings/{training_id}/edit");

    let resp = app.get(&edit, Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(helpers::body_string(resp).await.contains("Long run"));

    let resp = app
        .post(
            &edit,
            Some(&cookie),
            &[
                ("day", "2024-03-05"),
                ("training", "Tempo"),
                ("distance_km", "10,5"),
                ("comments", "4:50/km"),
            ],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(helpers::location(&resp), "/calendar/2");

    let resp = app.get(&edit, Some(&cookie)).await;
    let body = helpers::body_string(resp).await;
    assert!(body.contains("Tempo"));
    assert!(body.contains("10.5"));
    assert!(body.contains("4:50/km"));

    let resp = app
        .post(
            &format!("/trainings/{training_id}/delete"),
            Some(&cookie),
            &[("", "")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(helpers::location(&resp), format!("/plans/{plan_id}"));

    let resp = app.get(&edit, Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn training_outside_plan_is_rejected() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;
    let cookie = app.register("john").await;
    let plan_id = active_plan(&app, &cookie).await;

    let resp = app
        .post(
            &format!("/plans/{plan_id}/trainings/new"),
            Some(&cookie),
            &[("day", "2024-05-01"), ("training", "Too late")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = helpers::body_string(resp).await;
    assert!(body.contains("Training day must be within the plan dates"));
    assert!(body.contains("Too late"));

    let resp = app
        .post(
            &format!("/plans/{plan_id}/trainings/new"),
            Some(&cookie),
            &[("day", "2024-02-01"), ("training", "Run"), ("distance_km", "far")],
        )
        .await;
    assert!(helpers::body_string(resp).await.contains("Invalid distance"));

    for distance in ["NaN", "inf", "-infinity"] {
        let resp = app
            .post(
                &format!("/plans/{plan_id}/trainings/new"),
                Some(&cookie),
                &[("day", "2024-02-01"), ("training", "Run"), ("distance_km", distance)],
            )
            .await;
        assert_eq!(resp.status(), StatusCode::OK, "{distance}");
        assert!(helpers::body_string(resp).await.contains("Invalid distance"));
    }

    Ok(())
}

#[tokio::test]
async fn trainings_of_other_users_are_hidden() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;
    let john = app.register("john").await;
    let jane = app.register("jane").await;
    let johns_plan = active_plan(&app, &john).await;
    let janes_plan = active_plan(&app, &jane).await;

    let resp = app
        .post(
            &format!("/plans/{johns_plan}/trainings/new"),
            Some(&john),
            &[("day", "2024-02-01"), ("training", "Run")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let resp = app.get("/calendar/0/json", Some(&john)).await;
    let json: serde_json::Value = serde_json::from_str(&helpers::body_string(resp).await)?;
    assert_eq!(json["plan"]["id"], johns_plan.as_str());

    let user_id = app.user_id("john").await;
    let calendar = app
        .state
        .plan_query
        .month_calendar(
            &app.state.plan_query.find_plan(&user_id, &johns_plan).await?,
            time::Month::February,
            2024,
        )
        .await?;
    let training_id = match &calendar.day(1).unwrap().link {
        runplan_plan::CellLink::EditTraining { training_id, .. } => training_id.to_owned(),
        other => panic!("unexpected link {other:?}"),
    };

    let resp = app
        .get(
            &format!("/plans/{johns_plan}/trainings/{training_id}/edit"),
            Some(&jane),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = app
        .get(
            &format!("/plans/{janes_plan}/trainings/{training_id}/edit"),
            Some(&jane),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app
        .post(
            &format!("/trainings/{training_id}/delete"),
            Some(&jane),
            &[("", "")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = app
        .get(&format!("/plans/{johns_plan}/trainings/new"), Some(&jane))
        .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}
