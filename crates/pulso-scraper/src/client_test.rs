use super::*;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn run_body(id: &str, status: &str) -> serde_json::Value {
    json!({
        "data": {
            "id": id,
            "status": status,
            "defaultDatasetId": format!("ds-{id}")
        }
    })
}

async fn client_for(server: &MockServer) -> ApifyClient {
    ApifyClient::new(&server.uri(), "test-token", 5, 2, 0).unwrap()
}

#[tokio::test]
async fn run_actor_returns_completed_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/acts/actor-1/runs"))
        .respond_with(ResponseTemplate::new(201).set_body_json(run_body("r1", "SUCCEEDED")))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let run = client.run_actor("actor-1", &json!({})).await.unwrap();
    assert_eq!(run.id, "r1");
    assert_eq!(run.default_dataset_id, "ds-r1");
}

#[tokio::test]
async fn run_actor_polls_until_succeeded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/acts/actor-1/runs"))
        .respond_with(ResponseTemplate::new(201).set_body_json(run_body("r2", "RUNNING")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/actor-runs/r2"))
        .and(query_param("waitForFinish", "60"))
        .respond_with(ResponseTemplate::new(200).set_body_json(run_body("r2", "SUCCEEDED")))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let run = client.run_actor("actor-1", &json!({})).await.unwrap();
    assert_eq!(run.status, "SUCCEEDED");
}

#[tokio::test]
async fn run_actor_surfaces_failed_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/acts/actor-1/runs"))
        .respond_with(ResponseTemplate::new(201).set_body_json(run_body("r3", "FAILED")))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.run_actor("actor-1", &json!({})).await.unwrap_err();
    assert!(
        matches!(err, ScrapeError::RunFailed { ref status, .. } if status == "FAILED"),
        "expected RunFailed, got: {err:?}"
    );
}

#[tokio::test]
async fn unauthorized_maps_to_auth_error_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/acts/actor-1/runs"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.run_actor("actor-1", &json!({})).await.unwrap_err();
    assert!(matches!(err, ScrapeError::Auth(_)), "got: {err:?}");
}

#[tokio::test]
async fn transient_server_error_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/acts/actor-1/runs"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/acts/actor-1/runs"))
        .respond_with(ResponseTemplate::new(201).set_body_json(run_body("r4", "SUCCEEDED")))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let run = client.run_actor("actor-1", &json!({})).await.unwrap();
    assert_eq!(run.id, "r4");
}

#[tokio::test]
async fn slash_actor_ids_are_tilde_encoded_in_the_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/acts/apify~facebook-posts-scraper/runs"))
        .respond_with(ResponseTemplate::new(201).set_body_json(run_body("r5", "SUCCEEDED")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client
        .run_actor("apify/facebook-posts-scraper", &json!({}))
        .await
        .unwrap();
}

#[tokio::test]
async fn fetch_dataset_returns_raw_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/datasets/ds-r1/items"))
        .and(query_param("format", "json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": "p1"}, {"id": "p2"}])),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let run = ActorRun {
        id: "r1".to_owned(),
        status: "SUCCEEDED".to_owned(),
        default_dataset_id: "ds-r1".to_owned(),
    };
    let items = client.fetch_dataset(&run).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], "p1");
}

#[tokio::test]
async fn fetch_dataset_url_follows_absolute_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/external/comments.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"cid": "c1"}])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let items = client
        .fetch_dataset_url(&format!("{}/external/comments.json", server.uri()))
        .await
        .unwrap();
    assert_eq!(items.len(), 1);
}
