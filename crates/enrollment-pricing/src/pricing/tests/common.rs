use std::collections::BTreeMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use serde_json::Value;

use crate::pricing::{
    quote_router, PackageTerms, PricingTable, ProgramLevel, QuoteEngine, QuoteRequest,
    SessionPackage,
};

pub(super) fn engine() -> QuoteEngine {
    QuoteEngine::default()
}

pub(super) fn request(level: &str, sessions: i64, promo_code: Option<&str>) -> QuoteRequest {
    let request = QuoteRequest::new(level, sessions).with_currency("USD");
    match promo_code {
        Some(code) => request.with_promo_code(code),
        None => request,
    }
}

/// Small fixture table with steep discounts so clamping paths are reachable.
pub(super) fn steep_table() -> PricingTable {
    PricingTable {
        default_currency: "EUR".to_string(),
        fallback_level: ProgramLevel::Level1,
        base_prices: BTreeMap::from([(ProgramLevel::Level1, 5_005), (ProgramLevel::Level3, 999)]),
        packages: vec![
            SessionPackage {
                sessions: 4,
                terms: PackageTerms {
                    discount_pct: 50,
                    expiry_days: 14,
                },
            },
            SessionPackage {
                sessions: 40,
                terms: PackageTerms {
                    discount_pct: 100,
                    expiry_days: 180,
                },
            },
        ],
        default_package: PackageTerms {
            discount_pct: 5,
            expiry_days: 21,
        },
        promo_codes: BTreeMap::from([
            (" spring25 ".to_string(), 25),
            ("FREEBIE".to_string(), 100),
        ]),
    }
}

pub(super) fn router() -> axum::Router {
    quote_router(Arc::new(engine()))
}

pub(super) fn json_post(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
        .expect("request builds")
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}
