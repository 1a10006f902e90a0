//! Router-level tests for the zoo API.
//!
//! These drive the real router with `tower::ServiceExt::oneshot`. The driver
//! connects lazily, so every request exercised here is one that fails (or
//! routes) before any database I/O happens: geo parameter validation and
//! routing behavior.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use zoo_api::http::{create_router, AppState};

async fn app() -> axum::Router {
    let client = mongodb::Client::with_uri_str("mongodb://localhost:27017")
        .await
        .expect("parse test client uri");
    create_router(AppState::new(client.database("zoo_test")))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// =========================================================
// Box query parameter validation
// =========================================================

#[tokio::test]
async fn test_location_query_without_parameters_is_400() {
    let response = app().await.oneshot(get("/animals/location")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["message"], "Missing query parameters");
}

#[tokio::test]
async fn test_location_query_missing_one_corner_is_400() {
    let response = app()
        .await
        .oneshot(get("/animals/location?topRight=61.0,25.0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app()
        .await
        .oneshot(get("/animals/location?bottomLeft=60.0,24.0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_location_query_non_numeric_corner_is_400() {
    let response = app()
        .await
        .oneshot(get("/animals/location?topRight=abc,25.0&bottomLeft=60.0,24.0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid coordinate format, use lat,lon format");
}

#[tokio::test]
async fn test_location_query_wrong_arity_corner_is_400() {
    let response = app()
        .await
        .oneshot(get("/animals/location?topRight=61.0&bottomLeft=60.0,24.0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =========================================================
// Polygon body validation
// =========================================================

#[tokio::test]
async fn test_area_query_empty_body_is_400() {
    let response = app()
        .await
        .oneshot(post_json("/species/area", serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_area_query_wrong_geometry_type_is_400() {
    let body = serde_json::json!({
        "type": "Point",
        "coordinates": [[[24.0, 60.0], [25.0, 60.0], [25.0, 61.0], [24.0, 60.0]]],
    });
    let response = app()
        .await
        .oneshot(post_json("/species/area", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_area_query_missing_coordinates_is_400() {
    let body = serde_json::json!({ "type": "Polygon" });
    let response = app()
        .await
        .oneshot(post_json("/species/area", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_area_query_empty_coordinates_is_400() {
    let body = serde_json::json!({ "type": "Polygon", "coordinates": [] });
    let response = app()
        .await
        .oneshot(post_json("/species/area", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =========================================================
// Routing
// =========================================================

#[tokio::test]
async fn test_unknown_route_is_404() {
    let response = app().await.oneshot(get("/keepers")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wrong_method_is_405() {
    let response = app()
        .await
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
