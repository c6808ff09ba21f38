//! HTTP-level integration tests for the action catalog, including input
//! sanitization of administrator-supplied text.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, body_string, build_test_app, delete, get, post_form, test_pool};

async fn app() -> Router {
    build_test_app(test_pool().await)
}

async fn create_action(app: &Router, fields: &[(&str, &str)]) -> axum::response::Response {
    post_form(app.clone(), "/api/system/action", fields).await
}

async fn action(app: &Router, action_type: &str) -> Vec<serde_json::Value> {
    let response = get(app.clone(), &format!("/api/workflow/action/_{action_type}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await.as_array().unwrap().clone()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_action_sanitizes_input() {
    let app = app().await;

    let response = create_action(
        &app,
        &[
            ("actionText", "<script>alert(1)</script>"),
            ("actionTextPasttense", "<script>alerted(1)</script>"),
            ("actionIcon", r#""><img src="../files/test_file.png">"#),
            ("sort", "e3"),
            ("fillDependency", "invalid value"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "alert1");

    let found = action(&app, "alert1").await;
    assert_eq!(found.len(), 1);

    let created = &found[0];
    assert_eq!(created["actionType"], "alert1");
    assert_eq!(created["actionText"], "alert(1)");
    assert_eq!(created["actionTextPasttense"], "alerted(1)");
    assert_eq!(created["actionIcon"], "img src=..filestest_file.png");
    assert_eq!(created["sort"], 0);
    assert_eq!(created["fillDependency"], 0);
    assert_eq!(created["deleted"], 0);
}

#[tokio::test]
async fn test_create_action_keeps_valid_numbers() {
    let app = app().await;

    let response = create_action(
        &app,
        &[
            ("actionText", "Escalate Now"),
            ("actionTextPasttense", "Escalated"),
            ("actionIcon", "go-up.svg"),
            ("sort", "7"),
            ("fillDependency", "-1"),
        ],
    )
    .await;
    assert_eq!(body_string(response).await, "escalatenow");

    let created = &action(&app, "escalatenow").await[0];
    assert_eq!(created["sort"], 7);
    assert_eq!(created["fillDependency"], -1);
    assert_eq!(created["actionIcon"], "go-up.svg");
}

#[tokio::test]
async fn test_create_action_with_empty_type_returns_400() {
    let response = create_action(&app().await, &[("actionText", "<b>!!!</b>")]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_existing_action_returns_409() {
    let response = create_action(
        &app().await,
        &[("actionText", "Approve"), ("actionTextPasttense", "Approved")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn test_create_action_matching_note_in_other_case_returns_409() {
    let app = app().await;

    let response = create_action(
        &app,
        &[("actionText", "Note"), ("actionTextPasttense", "Noted")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(get(app.clone(), "/api/workflow/actions").await).await;
    let notes = json
        .as_array()
        .unwrap()
        .iter()
        .filter(|a| a["actionType"].as_str().unwrap().eq_ignore_ascii_case("note"))
        .count();
    assert_eq!(notes, 1);
    assert_eq!(action(&app, "note").await.len(), 1);
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_actions_ordered_by_sort() {
    let json = body_json(get(app().await, "/api/workflow/actions").await).await;
    let types: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["actionType"].as_str().unwrap())
        .collect();

    assert_eq!(
        types,
        vec!["approve", "concur", "defer", "disapprove", "sendback", "submit", "Note"]
    );
}

#[tokio::test]
async fn test_unknown_action_type_returns_empty_array() {
    let app = app().await;
    assert!(action(&app, "nonexistent").await.is_empty());
}

#[tokio::test]
async fn test_action_key_without_underscore_returns_400() {
    let response = get(app().await, "/api/workflow/action/approve").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Edit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_edit_action_overwrites_all_fields() {
    let app = app().await;

    let response = post_form(
        app.clone(),
        "/api/workflow/editAction/_concur",
        &[
            ("actionText", "<i>Agree</i>"),
            ("actionTextPasttense", "Agreed"),
            ("actionIcon", "dir/agree.svg"),
            ("sort", "not-a-number"),
            ("fillDependency", "1"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "1");

    let edited = &action(&app, "concur").await[0];
    assert_eq!(edited["actionText"], "Agree");
    assert_eq!(edited["actionTextPasttense"], "Agreed");
    assert_eq!(edited["actionIcon"], "diragree.svg");
    assert_eq!(edited["sort"], 0);
    assert_eq!(edited["fillDependency"], 1);
}

#[tokio::test]
async fn test_edit_unknown_action_returns_404() {
    let response = post_form(
        app().await,
        "/api/workflow/editAction/_nonexistent",
        &[("actionText", "Ghost")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_delete_action_is_soft_and_revivable() {
    let app = app().await;

    let response = delete(app.clone(), "/api/workflow/action/_defer").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "1");

    assert!(action(&app, "defer").await.is_empty());

    let response = delete(app.clone(), "/api/workflow/action/_defer").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_form(
        app.clone(),
        "/api/workflow/editAction/_defer",
        &[("actionText", "Defer")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = create_action(
        &app,
        &[("actionText", "Defer"), ("actionTextPasttense", "Put off")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "defer");

    let revived = &action(&app, "defer").await[0];
    assert_eq!(revived["actionTextPasttense"], "Put off");
    assert_eq!(revived["deleted"], 0);
}

#[tokio::test]
async fn test_deleted_action_disappears_from_step_actions() {
    let app = app().await;

    let workflow_id: i64 = body_string(
        post_form(app.clone(), "/api/workflow/new", &[("description", "Routing")]).await,
    )
    .await
    .parse()
    .unwrap();
    let step_id: i64 = body_string(
        post_form(
            app.clone(),
            &format!("/api/workflow/{workflow_id}/step"),
            &[("stepTitle", "Review")],
        )
        .await,
    )
    .await
    .parse()
    .unwrap();

    for action_type in ["approve", "disapprove"] {
        let response = post_form(
            app.clone(),
            &format!("/api/workflow/{workflow_id}/route"),
            &[
                ("stepID", step_id.to_string().as_str()),
                ("nextStepID", "0"),
                ("actionType", action_type),
            ],
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = delete(app.clone(), "/api/workflow/action/_disapprove").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(app, &format!("/api/workflow/step/{step_id}/actions")).await).await;
    assert_eq!(
        json,
        serde_json::json!([{"actionType": "approve", "actionText": "Approve"}])
    );
}
