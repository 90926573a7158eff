mod common;

use axum::extract::State;
use marketplace_api::routes::health::health_check;

#[tokio::test]
async fn health_check_returns_ok() {
    let response = health_check(State(common::offline_state())).await;
    assert_eq!(response.message.as_deref(), Some("Health check"));
    assert_eq!(response.status_code, 200);

    let data = serde_json::to_value(response.data.expect("health data")).expect("json");
    assert_eq!(data["status"], "ok");
    assert_eq!(data["database"], "down");
}
