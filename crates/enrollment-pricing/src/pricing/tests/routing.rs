use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::pricing::router::{expiry_handler, quote_handler};
use crate::pricing::QuoteEngine;

#[tokio::test]
async fn quote_route_returns_breakdown_and_display_total() {
    let response = router()
        .oneshot(json_post(
            "/api/v1/quotes",
            json!({ "level": "level2", "sessions": 24, "promoCode": "welcome10" }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["currency"], "USD");
    assert_eq!(body["totalCents"], 7_200);
    assert_eq!(body["expiryDays"], 90);
    assert_eq!(body["displayTotal"], "$72.00");
    assert_eq!(body["breakdown"]["baseCents"], 10_000);
    assert_eq!(body["breakdown"]["packageDiscountCents"], 2_000);
    assert_eq!(body["breakdown"]["timeAdjCents"], 0);
    assert_eq!(body["breakdown"]["promoCents"], 800);
}

#[tokio::test]
async fn quote_handler_rejects_negative_sessions() {
    let response = quote_handler(
        State(Arc::new(QuoteEngine::default())),
        axum::Json(request("level1", -1, None)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("negative"));
}

#[tokio::test]
async fn quote_route_rejects_fractional_sessions() {
    let response = router()
        .oneshot(json_post(
            "/api/v1/quotes",
            json!({ "level": "level1", "sessions": 8.5 }),
        ))
        .await
        .expect("router responds");

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn pricing_route_exposes_active_table() {
    let response = router()
        .oneshot(
            Request::get("/api/v1/pricing")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["fallbackLevel"], "level2");
    assert_eq!(body["basePrices"]["level3"], 12_000);
    assert_eq!(body["promoCodes"]["WELCOME10"], 10);
    assert_eq!(body["packages"][2]["sessions"], 24);
    assert_eq!(body["packages"][2]["expiryDays"], 90);
}

#[tokio::test]
async fn expiry_route_reports_window() {
    let response = router()
        .oneshot(
            Request::get("/api/v1/pricing/expiry/16")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body, json!({ "sessions": 16, "expiryDays": 60 }));
}

#[tokio::test]
async fn expiry_handler_rejects_negative_counts() {
    let response = expiry_handler(State(Arc::new(QuoteEngine::default())), Path(-24)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
