//! Integration tests for the API server.

use std::sync::{Arc, OnceLock};

use api::AppState;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use data_store::{DataStore, Dataset, InMemoryStore, JsonFileStore};
use domain::Identity;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            api::telemetry::install_metrics().expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn goals_json() -> Value {
    json!([
        { "id": 1, "description": "run 5k", "categoryId": 2, "points": 30 },
        { "id": 2, "description": "read", "categoryId": 1, "points": 10 },
        { "id": 3, "description": "run a marathon", "categoryId": 2, "points": 20 }
    ])
}

fn categories_json() -> Value {
    json!([
        { "id": 1, "name": "Learning" },
        { "id": 2, "name": "Fitness" },
        { "id": 3, "name": "Travel" }
    ])
}

fn users_json() -> Value {
    json!([
        {
            "id": 1, "name": "Ada",
            "acceptedGoals": [], "achievedGoals": [], "challengedGoals": [], "giftedGoals": []
        },
        {
            "id": 2, "name": "Grace",
            "acceptedGoals": [], "achievedGoals": [], "challengedGoals": [], "giftedGoals": []
        }
    ])
}

fn dataset() -> Dataset {
    Dataset::new(
        serde_json::from_value(goals_json()).unwrap(),
        serde_json::from_value(categories_json()).unwrap(),
        serde_json::from_value(users_json()).unwrap(),
    )
}

async fn setup_with_store() -> (axum::Router, InMemoryStore) {
    let store = InMemoryStore::with_dataset(dataset());
    let state = AppState::load(store.clone(), Identity::FirstUser)
        .await
        .unwrap();
    let app = api::create_app(Arc::new(state), get_metrics_handle());
    (app, store)
}

async fn setup() -> axum::Router {
    setup_with_store().await.0
}

async fn send(app: &axum::Router, method: &str, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = send(app, "GET", uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

fn ids(value: &Value) -> Vec<i64> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let app = setup().await;

    let (status, json) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["goals"], 3);
    assert_eq!(json["users"], 2);
}

async fn get_metrics(app: &axum::Router) -> String {
    let (status, body) = send(app, "GET", "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    String::from_utf8(body).unwrap()
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = setup().await;

    let (status, _) = send(&app, "POST", "/v1/me/goals/1/accept").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "POST", "/v1/me/goals/99/accept").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let body = get_metrics(&app).await;

    assert!(body.contains(r#"goal_actions_total{action="accept"}"#));
    assert!(body.contains(r#"goal_actions_failed_total{action="accept"}"#));
    assert!(body.contains("catalog_goals"));
    assert!(body.contains("catalog_categories"));
}

mod goals {
    use super::*;

    #[tokio::test]
    async fn test_list_all_goals_in_stored_order() {
        let app = setup().await;

        let (status, json) = get_json(&app, "/v1/goals").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&json), [1, 2, 3]);
        assert_eq!(json[0]["points"], 30);
    }

    #[tokio::test]
    async fn test_query_filters_by_description() {
        let store = InMemoryStore::with_dataset(Dataset::new(
            serde_json::from_value(json!([
                { "id": 1, "description": "run 5k", "categoryId": 2 },
                { "id": 2, "description": "read", "categoryId": 1 }
            ]))
            .unwrap(),
            vec![],
            vec![],
        ));
        let state = AppState::load(store, Identity::FirstUser).await.unwrap();
        let app = api::create_app(Arc::new(state), get_metrics_handle());

        let (status, json) = get_json(&app, "/v1/goals?query=run").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!([{ "id": 1, "description": "run 5k", "categoryId": 2 }]));
    }

    #[tokio::test]
    async fn test_query_without_match_is_empty_array() {
        let app = setup().await;

        let (status, json) = get_json(&app, "/v1/goals?query=swim").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!([]));
    }

    #[tokio::test]
    async fn test_sort_orders_numerically() {
        let app = setup().await;

        let (_, json) = get_json(&app, "/v1/goals?sort=points").await;
        assert_eq!(ids(&json), [2, 3, 1]);

        let (_, json) = get_json(&app, "/v1/goals?query=run&sort=points").await;
        assert_eq!(ids(&json), [3, 1]);
    }

    #[tokio::test]
    async fn test_sort_does_not_reorder_stored_goals() {
        let app = setup().await;

        get_json(&app, "/v1/goals?sort=points").await;
        let (_, json) = get_json(&app, "/v1/goals").await;

        assert_eq!(ids(&json), [1, 2, 3]);
    }

    #[tokio::test]
    async fn test_sort_by_non_numeric_field_succeeds() {
        let app = setup().await;

        let (status, json) = get_json(&app, "/v1/goals?sort=description").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&json), [1, 2, 3]);
    }
}

mod me {
    use super::*;

    #[tokio::test]
    async fn test_get_current_user() {
        let app = setup().await;

        let (status, json) = get_json(&app, "/v1/me").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Ada");
    }

    #[tokio::test]
    async fn test_get_current_user_with_configured_identity() {
        let store = InMemoryStore::with_dataset(dataset());
        let state = AppState::load(store, Identity::from_config(Some("2")))
            .await
            .unwrap();
        let app = api::create_app(Arc::new(state), get_metrics_handle());

        let (_, json) = get_json(&app, "/v1/me").await;

        assert_eq!(json["name"], "Grace");
    }

    #[tokio::test]
    async fn test_missing_current_user_is_not_found() {
        let mut data = dataset();
        data.users.clear();
        let state = AppState::load(InMemoryStore::with_dataset(data), Identity::FirstUser)
            .await
            .unwrap();
        let app = api::create_app(Arc::new(state), get_metrics_handle());

        let (status, json) = get_json(&app, "/v1/me").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "That user does not exist");
    }

    #[tokio::test]
    async fn test_accept_goal() {
        let (app, store) = setup_with_store().await;

        let (status, body) = send(&app, "POST", "/v1/me/goals/1/accept").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());

        let (_, me) = get_json(&app, "/v1/me").await;
        assert_eq!(
            me["acceptedGoals"],
            json!([{ "id": 1, "description": "run 5k", "categoryId": 2, "points": 30 }])
        );
        assert_eq!(store.users().await[0].accepted_goals.len(), 1);
    }

    #[tokio::test]
    async fn test_achieve_goal() {
        let (app, store) = setup_with_store().await;

        let (status, _) = send(&app, "POST", "/v1/me/goals/2/achieve").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(store.users().await[0].achieved_goals[0].description(), "read");
    }

    #[tokio::test]
    async fn test_challenge_user() {
        let (app, store) = setup_with_store().await;

        let (status, _) = send(&app, "POST", "/v1/me/goals/3/challenge/2").await;

        assert_eq!(status, StatusCode::OK);
        let users = store.users().await;
        assert_eq!(users[1].challenged_goals.len(), 1);
        assert_eq!(users[0].extra["name"], json!("Ada"));
    }

    #[tokio::test]
    async fn test_gift_user() {
        let (app, store) = setup_with_store().await;

        let (status, _) = send(&app, "POST", "/v1/me/goals/1/gift/2").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(store.users().await[1].gifted_goals.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_goal_is_not_found_for_every_action() {
        let (app, store) = setup_with_store().await;

        for uri in [
            "/v1/me/goals/99/accept",
            "/v1/me/goals/99/achieve",
            "/v1/me/goals/99/challenge/2",
            "/v1/me/goals/99/gift/2",
        ] {
            let (status, body) = send(&app, "POST", uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            let json: Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(json["error"], "That goal does not exist");
        }

        assert_eq!(store.save_count(), 0);
        let (_, me) = get_json(&app, "/v1/me").await;
        assert_eq!(me["acceptedGoals"], json!([]));
    }

    #[tokio::test]
    async fn test_unknown_target_user_is_not_found() {
        let (app, store) = setup_with_store().await;

        for uri in ["/v1/me/goals/1/challenge/42", "/v1/me/goals/1/gift/42"] {
            let (status, body) = send(&app, "POST", uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            let json: Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(json["error"], "That user does not exist");
        }

        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_save_is_internal_error() {
        let (app, store) = setup_with_store().await;
        store.set_fail_saves(true);

        let (status, _) = send(&app, "POST", "/v1/me/goals/1/accept").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let (_, me) = get_json(&app, "/v1/me").await;
        assert_eq!(me["acceptedGoals"], json!([]));
    }

    #[tokio::test]
    async fn test_get_is_not_an_action_route() {
        let app = setup().await;

        let (status, _) = send(&app, "GET", "/v1/me/goals/1/accept").await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}

mod categories {
    use super::*;

    #[tokio::test]
    async fn test_list_categories() {
        let app = setup().await;

        let (status, json) = get_json(&app, "/v1/categories").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&json), [1, 2, 3]);
    }

    #[tokio::test]
    async fn test_query_filters_by_name() {
        let app = setup().await;

        let (_, json) = get_json(&app, "/v1/categories?query=Fit").await;

        assert_eq!(json, json!([{ "id": 2, "name": "Fitness" }]));
    }

    #[tokio::test]
    async fn test_sort_categories_by_id() {
        let app = setup().await;

        let (_, json) = get_json(&app, "/v1/categories?sort=id").await;

        assert_eq!(ids(&json), [1, 2, 3]);
    }

    #[tokio::test]
    async fn test_numeric_category_id_matches_path_parameter() {
        let app = setup().await;

        let (status, json) = get_json(&app, "/v1/categories/2/goals").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&json), [1, 3]);
    }

    #[tokio::test]
    async fn test_category_without_goals_is_empty() {
        let app = setup().await;

        let (status, json) = get_json(&app, "/v1/categories/3/goals").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!([]));
    }

    #[tokio::test]
    async fn test_unknown_category_is_not_found() {
        let app = setup().await;

        let (status, json) = get_json(&app, "/v1/categories/9/goals").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "That category does not exist");
    }
}

mod file_backed {
    use super::*;

    fn seed_dir() -> TempDir {
        let dir = TempDir::new().expect("failed to create temp dir");
        std::fs::write(dir.path().join("goals.json"), goals_json().to_string()).unwrap();
        std::fs::write(dir.path().join("categories.json"), categories_json().to_string()).unwrap();
        std::fs::write(dir.path().join("users.json"), users_json().to_string()).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_accept_persists_to_user_file() {
        let dir = seed_dir();
        let state = AppState::load(JsonFileStore::new(dir.path()), Identity::FirstUser)
            .await
            .unwrap();
        let app = api::create_app(Arc::new(state), get_metrics_handle());

        let (status, _) = send(&app, "POST", "/v1/me/goals/1/accept").await;
        assert_eq!(status, StatusCode::OK);

        let reloaded = JsonFileStore::new(dir.path()).load().await.unwrap();
        assert_eq!(reloaded.users[0].accepted_goals.len(), 1);
        assert_eq!(reloaded.users[0].accepted_goals[0].description(), "run 5k");
        assert_eq!(reloaded.users[0].extra["name"], json!("Ada"));
    }

    #[tokio::test]
    async fn test_successful_save_is_recorded_in_metrics() {
        let dir = seed_dir();
        let state = AppState::load(JsonFileStore::new(dir.path()), Identity::FirstUser)
            .await
            .unwrap();
        let app = api::create_app(Arc::new(state), get_metrics_handle());

        let (status, _) = send(&app, "POST", "/v1/me/goals/2/achieve").await;
        assert_eq!(status, StatusCode::OK);

        let body = get_metrics(&app).await;
        assert!(body.contains("user_saves_total"));
        assert!(body.contains("user_save_duration_seconds"));
        assert!(body.contains(r#"goal_actions_total{action="achieve"}"#));
    }

    #[tokio::test]
    async fn test_rejected_action_leaves_user_file_untouched() {
        let dir = seed_dir();
        let before = std::fs::read(dir.path().join("users.json")).unwrap();
        let state = AppState::load(JsonFileStore::new(dir.path()), Identity::FirstUser)
            .await
            .unwrap();
        let app = api::create_app(Arc::new(state), get_metrics_handle());

        let (status, _) = send(&app, "POST", "/v1/me/goals/99/accept").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(std::fs::read(dir.path().join("users.json")).unwrap(), before);
    }
}
