//! Repository tests for workflows, steps and routes.

use waypoint_db::models::route::CreateRoute;
use waypoint_db::repositories::{RouteRepo, StepDependencyRepo, StepRepo, WorkflowRepo};
use waypoint_core::designator::DesignatorField;

async fn pool() -> waypoint_db::DbPool {
    let pool = waypoint_db::create_memory_pool().await.unwrap();
    waypoint_db::run_migrations(&pool).await.unwrap();
    pool
}

fn route(workflow_id: i64, step_id: i64, next_step_id: i64, action_type: &str) -> CreateRoute {
    CreateRoute {
        workflow_id,
        step_id,
        next_step_id,
        action_type: action_type.to_string(),
    }
}

#[tokio::test]
async fn test_create_workflow_assigns_positive_id() {
    let pool = pool().await;

    let first = WorkflowRepo::create(&pool, "First").await.unwrap();
    let second = WorkflowRepo::create(&pool, "Second").await.unwrap();

    assert!(first.id > 0);
    assert!(second.id > first.id);
    assert_eq!(first.initial_step_id, 0);
    assert_eq!(first.description, "First");
}

#[tokio::test]
async fn test_first_step_becomes_initial_step() {
    let pool = pool().await;
    let workflow = WorkflowRepo::create(&pool, "Routing").await.unwrap();

    let first = StepRepo::create(&pool, workflow.id, "Supervisor").await.unwrap();
    let second = StepRepo::create(&pool, workflow.id, "Director").await.unwrap();

    let workflow = WorkflowRepo::find_by_id(&pool, workflow.id).await.unwrap().unwrap();
    assert_eq!(workflow.initial_step_id, first.id);

    let steps = StepRepo::list_by_workflow(&pool, workflow.id).await.unwrap();
    let ids: Vec<i64> = steps.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[tokio::test]
async fn test_initial_step_assignment_touches_workflow() {
    let pool = pool().await;
    let workflow = WorkflowRepo::create(&pool, "Routing").await.unwrap();

    sqlx::query("UPDATE workflows SET updated_at = '2000-01-01T00:00:00.000Z' WHERE id = ?1")
        .bind(workflow.id)
        .execute(&pool)
        .await
        .unwrap();
    let stale = WorkflowRepo::find_by_id(&pool, workflow.id).await.unwrap().unwrap().updated_at;

    StepRepo::create(&pool, workflow.id, "Supervisor").await.unwrap();
    let touched = WorkflowRepo::find_by_id(&pool, workflow.id).await.unwrap().unwrap().updated_at;
    assert!(touched > stale);

    StepRepo::create(&pool, workflow.id, "Director").await.unwrap();
    let unchanged = WorkflowRepo::find_by_id(&pool, workflow.id).await.unwrap().unwrap().updated_at;
    assert_eq!(unchanged, touched);
}

#[tokio::test]
async fn test_set_position_is_scoped_to_workflow() {
    let pool = pool().await;
    let workflow = WorkflowRepo::create(&pool, "Layout").await.unwrap();
    let other = WorkflowRepo::create(&pool, "Other").await.unwrap();
    let step = StepRepo::create(&pool, workflow.id, "Step").await.unwrap();

    assert!(StepRepo::set_position(&pool, workflow.id, step.id, 200, 500).await.unwrap());
    assert!(!StepRepo::set_position(&pool, other.id, step.id, 1, 1).await.unwrap());

    let step = StepRepo::find_by_id(&pool, step.id).await.unwrap().unwrap();
    assert_eq!((step.pos_x, step.pos_y), (200, 500));
}

#[tokio::test]
async fn test_set_indicator_updates_one_field() {
    let pool = pool().await;
    let workflow = WorkflowRepo::create(&pool, "Designators").await.unwrap();
    let step = StepRepo::create(&pool, workflow.id, "Step").await.unwrap();

    StepRepo::set_indicator(&pool, step.id, DesignatorField::AssignedEmployee, 8)
        .await
        .unwrap();

    let step = StepRepo::find_by_id(&pool, step.id).await.unwrap().unwrap();
    assert_eq!(step.indicator_id_for_assigned_emp_uid, 8);
    assert_eq!(step.indicator_id_for_assigned_group_id, 0);
}

#[tokio::test]
async fn test_delete_step_cleans_links_routes_and_initial_step() {
    let pool = pool().await;
    let workflow = WorkflowRepo::create(&pool, "Cleanup").await.unwrap();
    let first = StepRepo::create(&pool, workflow.id, "First").await.unwrap();
    let second = StepRepo::create(&pool, workflow.id, "Second").await.unwrap();

    StepDependencyRepo::link(&pool, first.id, 1).await.unwrap();
    RouteRepo::upsert(&pool, &route(workflow.id, second.id, first.id, "sendback"))
        .await
        .unwrap();
    RouteRepo::upsert(&pool, &route(workflow.id, first.id, second.id, "approve"))
        .await
        .unwrap();

    assert!(StepRepo::delete(&pool, first.id).await.unwrap());

    assert!(StepRepo::find_by_id(&pool, first.id).await.unwrap().is_none());
    assert!(StepDependencyRepo::list_for_step(&pool, first.id).await.unwrap().is_empty());
    assert!(RouteRepo::list_by_workflow(&pool, workflow.id).await.unwrap().is_empty());

    let workflow = WorkflowRepo::find_by_id(&pool, workflow.id).await.unwrap().unwrap();
    assert_eq!(workflow.initial_step_id, 0);
}

#[tokio::test]
async fn test_delete_workflow_cascades_to_steps() {
    let pool = pool().await;
    let workflow = WorkflowRepo::create(&pool, "Doomed").await.unwrap();
    let step = StepRepo::create(&pool, workflow.id, "Step").await.unwrap();
    StepDependencyRepo::link(&pool, step.id, -2).await.unwrap();
    RouteRepo::upsert(&pool, &route(workflow.id, step.id, 0, "approve"))
        .await
        .unwrap();

    assert!(WorkflowRepo::delete(&pool, workflow.id).await.unwrap());

    assert!(WorkflowRepo::find_by_id(&pool, workflow.id).await.unwrap().is_none());
    assert!(StepRepo::find_by_id(&pool, step.id).await.unwrap().is_none());
    assert!(RouteRepo::list_by_workflow(&pool, workflow.id).await.unwrap().is_empty());
    assert!(!WorkflowRepo::delete(&pool, workflow.id).await.unwrap());
}

#[tokio::test]
async fn test_route_upsert_retargets_existing_route() {
    let pool = pool().await;
    let workflow = WorkflowRepo::create(&pool, "Routes").await.unwrap();
    let a = StepRepo::create(&pool, workflow.id, "A").await.unwrap();
    let b = StepRepo::create(&pool, workflow.id, "B").await.unwrap();

    RouteRepo::upsert(&pool, &route(workflow.id, a.id, b.id, "approve"))
        .await
        .unwrap();
    let updated = RouteRepo::upsert(&pool, &route(workflow.id, a.id, 0, "approve"))
        .await
        .unwrap();

    assert_eq!(updated.next_step_id, 0);
    assert_eq!(RouteRepo::list_by_workflow(&pool, workflow.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_step_actions_follow_sort_order() {
    let pool = pool().await;
    let workflow = WorkflowRepo::create(&pool, "Actions").await.unwrap();
    let step = StepRepo::create(&pool, workflow.id, "Review").await.unwrap();

    for action in ["Note", "approve"] {
        RouteRepo::upsert(&pool, &route(workflow.id, step.id, 0, action))
            .await
            .unwrap();
    }

    let actions = RouteRepo::step_actions(&pool, step.id).await.unwrap();
    let types: Vec<&str> = actions.iter().map(|a| a.action_type.as_str()).collect();
    assert_eq!(types, vec!["approve", "Note"]);
    assert_eq!(actions[0].action_text, "Approve");
}
