// ABOUTME: End-to-end workspace tests over a mocked backend
// ABOUTME: Covers bootstrap fan-out, refresh failure handling and policy gates

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use taskdeck_app::{AppError, Workspace};
use taskdeck_client::{ApiClient, ClientConfig, TaskCreateInput, TaskFilter};
use taskdeck_core::{Role, TaskStatus, User};
use taskdeck_session::SessionStore;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_user(role: Role) -> User {
    User {
        id: "u1".to_string(),
        email: "user@example.com".to_string(),
        name: "Test User".to_string(),
        role,
        org_id: "org1".to_string(),
    }
}

async fn anonymous_workspace(server: &MockServer, dir: &TempDir) -> Workspace {
    let session = SessionStore::with_dir(dir.path().to_path_buf());
    let client = ApiClient::new(&ClientConfig::new(server.uri()), session.clone()).unwrap();
    Workspace::new(client, session)
}

async fn signed_in_workspace(server: &MockServer, dir: &TempDir, role: Role) -> Workspace {
    let session = SessionStore::with_dir(dir.path().to_path_buf());
    session
        .set_session("test-token".to_string(), test_user(role))
        .await
        .unwrap();
    let client = ApiClient::new(&ClientConfig::new(server.uri()), session.clone()).unwrap();
    Workspace::new(client, session)
}

fn task_json(id: &str, status: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "title": id,
        "status": status,
        "dueDate": "2026-09-01",
        "isCompleted": false,
        "orgId": "org1"
    })
}

async fn mount_empty(server: &MockServer, route: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn bootstrap_populates_every_collection() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": [task_json("t1", "TODO")] })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/org"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_id": "j1",
            "email": "j1@example.com",
            "name": "Junior One",
            "role": "junior",
            "orgId": "org1",
            "managerId": "s1"
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/designations/org/org1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_id": "d1",
            "name": "Engineer",
            "role": "junior"
        }])))
        .mount(&server)
        .await;
    mount_empty(&server, "/targets").await;
    mount_empty(&server, "/chat").await;
    mount_empty(&server, "/reports").await;
    Mock::given(method("GET"))
        .and(path("/tasks/summary/org"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 5,
            "done": 2,
            "open": 3,
            "perUser": [{ "_id": "j1", "done": 2, "total": 4 }]
        })))
        .mount(&server)
        .await;

    let workspace = signed_in_workspace(&server, &dir, Role::Owner).await;
    workspace.bootstrap().await.unwrap();

    assert_eq!(workspace.tasks().await.len(), 1);
    assert_eq!(workspace.org_users().await.len(), 1);
    assert_eq!(workspace.designations().await.len(), 1);
    assert!(workspace.targets().await.is_empty());

    let summary = workspace.summary().await;
    assert_eq!(summary.total, 5);
    assert_eq!(summary.per_user.len(), 1);
    assert_eq!(summary.per_user[0].id.as_deref(), Some("j1"));
}

#[tokio::test]
async fn creating_a_task_refetches_the_collection() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([task_json("t1", "TODO")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let workspace = signed_in_workspace(&server, &dir, Role::Senior).await;
    workspace
        .create_task(TaskCreateInput {
            title: "Prepare sprint plan".to_string(),
            description: None,
            due_date: "2026-09-01".to_string(),
            priority: Some(3),
            status: TaskStatus::Todo,
            assigned_to: None,
            parent_task_id: None,
            estimated_hours: None,
        })
        .await
        .unwrap();

    assert_eq!(workspace.tasks().await.len(), 1);
    assert_eq!(workspace.banners().await.info(), Some("Task created"));
}

#[tokio::test]
async fn failed_secondary_refresh_keeps_previous_contents() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/targets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_id": "g1",
            "title": "Ship v2",
            "period": "month",
            "status": "open",
            "progress": 10
        }])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/targets"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let workspace = signed_in_workspace(&server, &dir, Role::Senior).await;
    workspace.refresh_targets().await.unwrap();
    assert_eq!(workspace.targets().await.len(), 1);

    // The 500 is non-blocking: the earlier snapshot stays usable
    workspace.refresh_targets().await.unwrap();
    assert_eq!(workspace.targets().await.len(), 1);
    assert!(workspace.is_authenticated().await);
}

#[tokio::test]
async fn forbidden_roster_read_notes_and_keeps_session() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/users/org"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let workspace = signed_in_workspace(&server, &dir, Role::Junior).await;
    workspace.refresh_org_users().await.unwrap();

    assert!(workspace.is_authenticated().await);
    assert_eq!(
        workspace.banners().await.info(),
        Some("Only owner or senior can load users.")
    );
}

#[tokio::test]
async fn unauthorized_refresh_terminates_the_session() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/targets"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let workspace = signed_in_workspace(&server, &dir, Role::Senior).await;
    let err = workspace.refresh_targets().await.unwrap_err();

    assert!(err.is_auth_error());
    assert!(!workspace.is_authenticated().await);
    assert!(!dir.path().join("session.toml").exists());
}

#[tokio::test]
async fn logout_empties_every_collection() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/targets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_id": "g1",
            "title": "Ship v2",
            "period": "month",
            "status": "open",
            "progress": 10
        }])))
        .mount(&server)
        .await;

    let workspace = signed_in_workspace(&server, &dir, Role::Senior).await;
    workspace.refresh_targets().await.unwrap();
    assert_eq!(workspace.targets().await.len(), 1);

    workspace.logout().await.unwrap();

    assert!(!workspace.is_authenticated().await);
    assert!(workspace.targets().await.is_empty());
    assert_eq!(workspace.banners().await.info(), Some("Logged out"));
}

#[tokio::test]
async fn slow_refresh_from_a_previous_session_is_discarded() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/targets"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{
                    "_id": "g1",
                    "title": "Ship v2",
                    "period": "month",
                    "status": "open",
                    "progress": 10
                }]))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let workspace = Arc::new(signed_in_workspace(&server, &dir, Role::Senior).await);
    let refresh = tokio::spawn({
        let workspace = workspace.clone();
        async move { workspace.refresh_targets().await }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    workspace.logout().await.unwrap();

    refresh.await.unwrap().unwrap();
    assert!(workspace.targets().await.is_empty());
}

#[tokio::test]
async fn junior_cannot_create_tasks() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let workspace = signed_in_workspace(&server, &dir, Role::Junior).await;
    let err = workspace
        .create_task(TaskCreateInput {
            title: "Sneaky".to_string(),
            description: None,
            due_date: "2026-09-01".to_string(),
            priority: None,
            status: TaskStatus::Todo,
            assigned_to: None,
            parent_task_id: None,
            estimated_hours: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotPermitted(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn out_of_range_priority_is_rejected_before_sending() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let workspace = signed_in_workspace(&server, &dir, Role::Senior).await;
    let err = workspace
        .create_task(TaskCreateInput {
            title: "Overeager".to_string(),
            description: None,
            due_date: "2026-09-01".to_string(),
            priority: Some(9),
            status: TaskStatus::Todo,
            assigned_to: None,
            parent_task_id: None,
            estimated_hours: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert!(workspace.banners().await.error().is_some());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn a_subtask_cannot_become_a_parent() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    // t1 is itself a subtask of t0
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            task_json("t0", "TODO"),
            {
                "_id": "t1",
                "title": "t1",
                "status": "TODO",
                "dueDate": "2026-09-01",
                "isCompleted": false,
                "orgId": "org1",
                "parentTaskId": "t0"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let workspace = signed_in_workspace(&server, &dir, Role::Senior).await;
    workspace.refresh_tasks(TaskFilter::default()).await.unwrap();

    let err = workspace
        .create_task(TaskCreateInput {
            title: "Too deep".to_string(),
            description: None,
            due_date: "2026-09-01".to_string(),
            priority: None,
            status: TaskStatus::Todo,
            assigned_to: None,
            parent_task_id: Some("t1".to_string()),
            estimated_hours: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    // Only the initial task fetch reached the backend
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn a_new_submission_clears_the_previous_error_banner() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let workspace = signed_in_workspace(&server, &dir, Role::Senior).await;
    // A rejected submission leaves an error banner behind
    let _ = workspace
        .create_task(TaskCreateInput {
            title: "Overeager".to_string(),
            description: None,
            due_date: "2026-09-01".to_string(),
            priority: Some(9),
            status: TaskStatus::Todo,
            assigned_to: None,
            parent_task_id: None,
            estimated_hours: None,
        })
        .await;
    assert!(workspace.banners().await.error().is_some());

    workspace.send_message("hello", None).await.unwrap();
    assert_eq!(workspace.banners().await.error(), None);
}

#[tokio::test]
async fn employee_creation_requires_a_designation() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let workspace = signed_in_workspace(&server, &dir, Role::Owner).await;
    let err = workspace
        .create_employee(taskdeck_client::EmployeeCreateInput {
            name: "New Hire".to_string(),
            email: "hire@example.com".to_string(),
            password: "secret".to_string(),
            role: Role::Junior,
            designation_id: None,
            manager_id: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(
        workspace.banners().await.error(),
        Some("Select a designation first")
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn new_employee_appears_in_the_roster_with_their_designation() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/designations"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/designations/org/org1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_id": "d1",
            "name": "Senior Engineer",
            "role": "senior"
        }])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/org"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_id": "s1",
            "email": "sam@example.com",
            "name": "Sam",
            "role": "senior",
            "orgId": "org1",
            "designationId": "d1"
        }])))
        .mount(&server)
        .await;

    let workspace = signed_in_workspace(&server, &dir, Role::Owner).await;
    workspace
        .create_designation(taskdeck_client::DesignationCreateInput {
            name: "Senior Engineer".to_string(),
            description: None,
            role: taskdeck_core::DesignationRole::Senior,
        })
        .await
        .unwrap();
    workspace
        .create_employee(taskdeck_client::EmployeeCreateInput {
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            password: "secret".to_string(),
            role: Role::Senior,
            designation_id: Some("d1".to_string()),
            manager_id: None,
        })
        .await
        .unwrap();

    let roster = workspace.org_users().await;
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].role, Role::Senior);
    assert_eq!(roster[0].designation_id.as_deref(), Some("d1"));
}

#[tokio::test]
async fn blank_chat_messages_are_not_sent() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let workspace = signed_in_workspace(&server, &dir, Role::Junior).await;
    workspace.send_message("   ", None).await.unwrap();

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn failed_login_sets_the_error_banner() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let workspace = anonymous_workspace(&server, &dir).await;
    let err = workspace.login("a@b.com", "wrong").await.unwrap_err();

    assert!(!workspace.is_authenticated().await);
    assert_eq!(err.to_string(), "API error: Invalid credentials");
    assert_eq!(
        workspace.banners().await.error(),
        Some("API error: Invalid credentials")
    );
}

#[tokio::test]
async fn refreshing_tasks_remembers_the_filter() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/tasks"))
        .and(wiremock::matchers::query_param("status", "IN_PROGRESS"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([task_json("t2", "IN_PROGRESS")])),
        )
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let workspace = signed_in_workspace(&server, &dir, Role::Senior).await;
    workspace
        .refresh_tasks(TaskFilter {
            status: Some(TaskStatus::InProgress),
            search: None,
        })
        .await
        .unwrap();

    // The re-fetch after a mutation reuses the active filter
    workspace
        .create_task(TaskCreateInput {
            title: "Another".to_string(),
            description: None,
            due_date: "2026-09-01".to_string(),
            priority: None,
            status: TaskStatus::Todo,
            assigned_to: None,
            parent_task_id: None,
            estimated_hours: None,
        })
        .await
        .unwrap();

    assert_eq!(workspace.tasks().await.len(), 1);
}
