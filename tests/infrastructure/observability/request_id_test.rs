use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use introeval::infrastructure::observability::{REQUEST_ID_HEADER, RequestId};

use crate::create_test_app;

#[test]
fn given_request_id_when_cloned_then_equals_original() {
    let original = RequestId("abc".to_string());
    let cloned = original.clone();
    assert_eq!(original.0, cloned.0);
}

#[tokio::test]
async fn given_caller_request_id_when_responding_then_it_is_echoed() {
    let (app, _harness) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(REQUEST_ID_HEADER, "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-42");
}

#[tokio::test]
async fn given_no_request_id_when_responding_then_one_is_generated() {
    let (app, _harness) = create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let id = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());
}
