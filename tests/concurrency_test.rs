//! Concurrency tests for the URL shortener API
//!
//! These tests drive the real router from many concurrent tasks and
//! assert that the registry's atomicity guarantees hold:
//! - Click increments are never lost
//! - Racing submissions of the same URL collapse to a single entry

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use shortlink::registry::{AppState, Registry};
use shortlink::route::create_app;

fn setup_test_app() -> (axum::Router, Arc<Registry>) {
    let registry = Arc::new(Registry::new());
    let state = AppState {
        registry: Arc::clone(&registry),
        base_url: "http://localhost:8080".to_string(),
    };

    (create_app(state), registry)
}

async fn response_json(body: Body) -> Value {
    let bytes = body
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();

    serde_json::from_slice(&bytes).expect("Failed to parse JSON")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_redirects_lose_no_clicks() {
    let (app, registry) = setup_test_app();

    let (code, _) = registry
        .create_or_reuse("https://example.com/contended")
        .unwrap();
    let before = registry.stats(&code).unwrap().clicks;

    // 100 concurrent resolutions of the same code
    let num_requests = 100;
    let mut handles = Vec::new();

    for _ in 0..num_requests {
        let app = app.clone();
        let uri = format!("/{}", code);

        handles.push(tokio::spawn(async move {
            let response = app
                .oneshot(
                    Request::builder()
                        .method("GET")
                        .uri(uri)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    // Every increment was applied exactly once
    let after = registry.stats(&code).unwrap().clicks;
    assert_eq!(after, before + num_requests);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_submissions_of_the_same_url_create_one_entry() {
    let (app, registry) = setup_test_app();

    let num_requests = 50;
    let mut handles = Vec::new();

    for _ in 0..num_requests {
        let app = app.clone();

        handles.push(tokio::spawn(async move {
            let payload = json!({ "url": "https://example.com/raced" });

            let response = app
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/api/shorten")
                        .header("content-type", "application/json")
                        .body(Body::from(payload.to_string()))
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            response_json(response.into_body()).await
        }));
    }

    let mut bodies = Vec::new();
    for handle in handles {
        bodies.push(handle.await.unwrap());
    }

    // Exactly one submission created the entry; every response carries
    // the same code
    assert_eq!(registry.len(), 1);
    let created = bodies.iter().filter(|b| b["is_new"] == true).count();
    assert_eq!(created, 1);

    let code = bodies[0]["code"].as_str().unwrap();
    assert!(bodies.iter().all(|b| b["code"] == code));
}
