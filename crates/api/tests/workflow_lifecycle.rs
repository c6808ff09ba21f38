//! End-to-end scenario: build a workflow step with every kind of dependency,
//! inspect the resolved view, then tear everything down again. Every
//! mutation is confirmed with HTTP 200 and the body `"1"` (or a new ID).

mod common;

use axum::http::StatusCode;
use axum::response::Response;
use common::{body_id, body_json, body_string, build_test_app, delete, get, post_form, test_pool};

async fn assert_confirmed(response: Response) {
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "1");
}

#[tokio::test]
async fn test_full_workflow_lifecycle() {
    let app = build_test_app(test_pool().await);

    // --- Create workflow and step ---
    let response = post_form(app.clone(), "/api/workflow/new", &[("description", "Purchase")]).await;
    assert_eq!(response.status(), StatusCode::OK);
    let workflow_id = body_id(response).await;

    let response = post_form(
        app.clone(),
        &format!("/api/workflow/{workflow_id}/step"),
        &[("stepTitle", "Approval")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let step_id = body_id(response).await;

    // --- Custom dependency with a group privilege ---
    let response = post_form(
        app.clone(),
        "/api/workflow/dependencies",
        &[("description", "Procurement Board")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let dependency_id = body_id(response).await;
    assert!(dependency_id > 8);

    assert_confirmed(
        post_form(
            app.clone(),
            &format!("/api/workflow/dependency/{dependency_id}/privileges"),
            &[("groupID", "206")],
        )
        .await,
    )
    .await;

    // --- Designator fields ---
    assert_confirmed(
        post_form(
            app.clone(),
            &format!("/api/workflow/step/{step_id}/indicatorID_for_assigned_empUID"),
            &[("indicatorID", "21")],
        )
        .await,
    )
    .await;
    assert_confirmed(
        post_form(
            app.clone(),
            &format!("/api/workflow/step/{step_id}/indicatorID_for_assigned_groupID"),
            &[("indicatorID", "22")],
        )
        .await,
    )
    .await;

    // --- Link everything ---
    let linked = [-3, -2, -1, 8, dependency_id];
    for id in linked {
        assert_confirmed(
            post_form(
                app.clone(),
                &format!("/api/workflow/step/{step_id}/dependencies"),
                &[
                    ("dependencyID", id.to_string().as_str()),
                    ("workflowID", workflow_id.to_string().as_str()),
                ],
            )
            .await,
        )
        .await;
    }

    // --- Inspect the resolved view ---
    let json = body_json(get(app.clone(), &format!("/api/workflow/step/{step_id}/dependencies")).await).await;
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), linked.len());

    let ids: Vec<i64> = entries.iter().map(|e| e["dependencyID"].as_i64().unwrap()).collect();
    assert_eq!(ids, linked.to_vec());

    assert_eq!(entries[0]["description"], "Group Designated by the Requestor");
    assert_eq!(entries[1]["description"], "Requestor Followup");
    assert_eq!(entries[2]["description"], "Person Designated by the Requestor");
    assert_eq!(entries[3]["description"], "Quadrad");
    assert_eq!(entries[4]["description"], "Procurement Board");
    assert_eq!(entries[4]["groupID"], 206);
    assert_eq!(entries[4]["name"], "Group A");

    for entry in entries {
        assert_eq!(entry["indicatorID_for_assigned_empUID"], 21);
        assert_eq!(entry["indicatorID_for_assigned_groupID"], 22);
    }

    // --- Unlink everything ---
    for id in linked {
        assert_confirmed(
            delete(
                app.clone(),
                &format!(
                    "/api/workflow/step/{step_id}/dependencies?dependencyID={id}&workflowID={workflow_id}"
                ),
            )
            .await,
        )
        .await;
    }

    let json = body_json(get(app.clone(), &format!("/api/workflow/step/{step_id}")).await).await;
    assert_eq!(json["indicatorID_for_assigned_empUID"], 0);
    assert_eq!(json["indicatorID_for_assigned_groupID"], 0);

    let json = body_json(get(app.clone(), &format!("/api/workflow/step/{step_id}/dependencies")).await).await;
    assert!(json.as_array().unwrap().is_empty());

    // --- Tear down ---
    assert_confirmed(delete(app.clone(), &format!("/api/workflow/step/{step_id}")).await).await;
    assert_confirmed(delete(app.clone(), &format!("/api/workflow/{workflow_id}")).await).await;

    let response = get(app, &format!("/api/workflow/{workflow_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
