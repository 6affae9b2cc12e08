use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::post,
    Router,
};
use tower::ServiceExt;

use studyhub_backend::handlers;

fn ping_app() -> Router {
    Router::new().route("/api/ping", post(handlers::ping::ping))
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json")
}

#[tokio::test]
async fn ping_returns_the_envelope_shape() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/ping")
        .header("Content-Type", "application/json")
        .body(Body::from(r#"{"a":1}"#))
        .unwrap();

    let response = ping_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert!(json["success"].is_boolean());
    assert!(json["message"].is_string());
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["a"], 1);
}

#[tokio::test]
async fn ping_sanitizes_echoed_strings() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/ping")
        .header("Content-Type", "application/json")
        .body(Body::from(r#"{"note": " <b>hi</b> ", "nested": {"v": "1 < 2"}}"#))
        .unwrap();

    let response = ping_app().oneshot(request).await.unwrap();
    let json = response_json(response).await;
    assert_eq!(json["data"]["note"], "hi");
    assert_eq!(json["data"]["nested"]["v"], "1 &lt; 2");
}

#[tokio::test]
async fn ping_rejects_non_json_bodies() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/ping")
        .header("Content-Type", "application/json")
        .body(Body::from("not json"))
        .unwrap();

    let response = ping_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
