use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use concurso_hub::auth::{auth_router, AuthStub};
use concurso_hub::listings::{listing_router, ConcursoCatalog, ListingState, DEFAULT_PAGE_SIZE};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    let catalog = Arc::new(ConcursoCatalog::bundled().expect("bundled dataset loads"));
    let auth = Arc::new(AuthStub::new(Duration::from_millis(0)));
    listing_router(ListingState::new(catalog, DEFAULT_PAGE_SIZE)).merge(auth_router(auth))
}

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::to_vec(&payload).expect("payload serializes"),
        ))
        .expect("request builds")
}

async fn read_json_body(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("body is JSON")
}

#[tokio::test]
async fn search_returns_the_first_page_by_default() {
    let response = app()
        .oneshot(post_json("/api/v1/concursos/search", json!({})))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;

    assert_eq!(payload["page"], 1);
    assert_eq!(payload["page_size"], 5);
    assert_eq!(payload["concursos"].as_array().expect("array").len(), 5);
    assert!(payload["total_filtered"].as_u64().expect("total") >= 5);
}

#[tokio::test]
async fn search_filters_by_status_and_reports_chips() {
    let response = app()
        .oneshot(post_json(
            "/api/v1/concursos/search",
            json!({ "statuses": ["open"], "today": "2025-08-20" }),
        ))
        .await
        .expect("router responds");

    let payload = read_json_body(response).await;
    assert_eq!(payload["total_filtered"], 3);
    assert_eq!(payload["total_pages"], 1);
    assert_eq!(payload["active_filters"][0]["label"], "Inscrições Abertas");
    for card in payload["concursos"].as_array().expect("array") {
        assert_eq!(card["status"], "open");
        assert!(card["days_remaining"].as_i64().expect("countdown") >= 0);
    }
}

#[tokio::test]
async fn search_combines_term_and_facets() {
    let response = app()
        .oneshot(post_json(
            "/api/v1/concursos/search",
            json!({
                "search_term": "Tribunal",
                "spheres": ["federal"],
                "radius_km": 10
            }),
        ))
        .await
        .expect("router responds");

    let payload = read_json_body(response).await;
    assert_eq!(payload["total_filtered"], 2);
    let cards = payload["concursos"].as_array().expect("array");
    assert!(cards.iter().all(|card| card["organization"]
        .as_str()
        .expect("organization")
        .contains("Tribunal")));
}

#[tokio::test]
async fn unknown_facet_values_yield_an_empty_result_not_an_error() {
    let response = app()
        .oneshot(post_json(
            "/api/v1/concursos/search",
            json!({ "areas": ["astronomia"] }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["total_filtered"], 0);
    assert!(payload["concursos"].as_array().expect("array").is_empty());
}

#[tokio::test]
async fn facets_expose_labeled_vocabularies() {
    let response = app()
        .oneshot(
            Request::get("/api/v1/concursos/facets")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["levels"].as_array().expect("levels").len(), 3);
    assert_eq!(payload["statuses"][0]["value"], "open");
    assert_eq!(payload["statuses"][0]["label"], "Inscrições Abertas");
    assert!(payload["areas"]
        .as_array()
        .expect("areas")
        .iter()
        .any(|option| option["value"] == "jurídica"));
}

#[tokio::test]
async fn login_round_trips_through_the_stub() {
    let response = app()
        .oneshot(post_json(
            "/api/v1/auth/login",
            json!({ "email": "ana@example.com", "password": "segredo" }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["email"], "ana@example.com");
}

#[tokio::test]
async fn signup_mismatch_surfaces_as_unprocessable() {
    let response = app()
        .oneshot(post_json(
            "/api/v1/auth/signup",
            json!({
                "email": "ana@example.com",
                "password": "segredo",
                "confirm_password": "diferente"
            }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("senhas"));
}
