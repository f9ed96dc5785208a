use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use nutrilog::{build_app, AppState};

#[tokio::test]
async fn health_is_public() {
    let app = build_app(AppState::fake());
    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"ok");
}

#[tokio::test]
async fn api_rejects_missing_bearer_token() {
    for uri in [
        "/api/v1/summary/daily",
        "/api/v1/weight/latest",
        "/api/v1/water/day",
        "/api/v1/profile",
    ] {
        let res = build_app(AppState::fake())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}
