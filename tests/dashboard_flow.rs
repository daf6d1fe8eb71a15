//! Dashboard view-model against a mock backend: every accepted mutation
//! is followed by a full reload, and a rejected one leaves the cache alone.

mod support;

use serde_json::json;
use tokio::task::spawn_blocking;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use td::api::ApiClient;
use td::dashboard::Dashboard;
use td::error::Error;
use td::task::TaskStatus;

use support::task_json;

fn board(server_uri: &str) -> Dashboard {
    let api = ApiClient::new(format!("{server_uri}/api"));
    Dashboard::new(api, "tok-1".to_string())
}

#[tokio::test]
async fn create_reloads_the_full_list() {
    let server = MockServer::start().await;
    // first load: empty
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/tasks"))
        .and(body_partial_json(json!({"title": "Buy milk"})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(task_json("t1", "Buy milk", "Pending")),
        )
        .expect(1)
        .mount(&server)
        .await;
    // reload after the create
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([task_json("t1", "Buy milk", "Pending")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    spawn_blocking(move || {
        let mut board = board(&uri);
        board.load().expect("load");
        assert!(board.tasks().is_empty());

        board.create("  Buy milk  ", "").expect("create");
        assert_eq!(board.tasks().len(), 1);
        assert_eq!(board.tasks()[0].id, "t1");
        assert_eq!(board.tasks()[0].status, TaskStatus::Pending);
    })
    .await
    .expect("join");
}

#[tokio::test]
async fn toggle_sends_opposite_status_and_reloads() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([task_json("t1", "Buy milk", "Pending")])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/tasks/t1"))
        .and(body_partial_json(json!({"status": "Completed"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(task_json("t1", "Buy milk", "Completed")),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([task_json("t1", "Buy milk", "Completed")])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    // toggling back
    Mock::given(method("PUT"))
        .and(path("/api/tasks/t1"))
        .and(body_partial_json(json!({"status": "Pending"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(task_json("t1", "Buy milk", "Pending")),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([task_json("t1", "Buy milk", "Pending")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    spawn_blocking(move || {
        let mut board = board(&uri);
        board.load().expect("load");
        board.toggle("t1").expect("toggle");
        assert_eq!(board.tasks()[0].status, TaskStatus::Completed);

        // toggling again restores the original status
        board.toggle("t1").expect("toggle back");
        assert_eq!(board.tasks()[0].status, TaskStatus::Pending);
    })
    .await
    .expect("join");
}

#[tokio::test]
async fn delete_reloads_without_the_removed_task() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([
                task_json("t1", "Buy milk", "Pending"),
                task_json("t2", "Walk dog", "Completed"),
            ])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/tasks/t1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([task_json("t2", "Walk dog", "Completed")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    spawn_blocking(move || {
        let mut board = board(&uri);
        board.load().expect("load");
        board.delete("t1").expect("delete");
        assert_eq!(board.tasks().len(), 1);
        assert!(board.task_by_id("t1").is_none());
    })
    .await
    .expect("join");
}

#[tokio::test]
async fn rejected_mutation_leaves_cache_and_edit_slot_intact() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([task_json("t1", "Buy milk", "Pending")])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/tasks/t1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    spawn_blocking(move || {
        let mut board = board(&uri);
        board.load().expect("load");
        board.start_edit("t1").expect("start edit");
        if let Some(slot) = board.edit_mut() {
            slot.title = "Buy oat milk".to_string();
        }

        let err = board.save_edit().unwrap_err();
        assert!(matches!(err, Error::Server(_)));
        assert_eq!(err.user_message(), "Server error. Please try again later.");

        // no reload happened and the draft is still there to retry
        assert_eq!(board.tasks()[0].title, "Buy milk");
        let slot = board.edit().expect("slot kept");
        assert_eq!(slot.title, "Buy oat milk");
    })
    .await
    .expect("join");
}

#[test]
fn unreachable_backend_maps_to_network_message() {
    let api = ApiClient::new("http://127.0.0.1:1/api");
    let mut board = Dashboard::new(api, "tok-1".to_string());
    let err = board.load().unwrap_err();
    assert!(matches!(err, Error::Network(_)));
    assert_eq!(
        err.user_message(),
        "Network error. Please check your connection."
    );
}
