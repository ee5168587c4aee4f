use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use super::domain::{QuoteRequest, QuoteResult};
use super::engine::{QuoteEngine, QuoteError};

/// Quote payload returned to the checkout UI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteView {
    #[serde(flatten)]
    pub quote: QuoteResult,
    pub display_total: String,
}

impl From<QuoteResult> for QuoteView {
    fn from(quote: QuoteResult) -> Self {
        let display_total = quote.display_total();
        Self {
            quote,
            display_total,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryView {
    pub sessions: i64,
    pub expiry_days: u32,
}

/// Router builder exposing quote and pricing lookups over HTTP.
pub fn quote_router(engine: Arc<QuoteEngine>) -> Router {
    Router::new()
        .route("/api/v1/quotes", post(quote_handler))
        .route("/api/v1/pricing", get(pricing_table_handler))
        .route("/api/v1/pricing/expiry/:sessions", get(expiry_handler))
        .with_state(engine)
}

pub(crate) async fn quote_handler(
    State(engine): State<Arc<QuoteEngine>>,
    Json(request): Json<QuoteRequest>,
) -> Response {
    match engine.compute_quote(&request) {
        Ok(quote) => (StatusCode::OK, Json(QuoteView::from(quote))).into_response(),
        Err(error) => {
            warn!(
                %error,
                program_level = %request.level,
                sessions = request.sessions,
                "quote rejected"
            );
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn pricing_table_handler(State(engine): State<Arc<QuoteEngine>>) -> Response {
    (StatusCode::OK, Json(engine.table().clone())).into_response()
}

pub(crate) async fn expiry_handler(
    State(engine): State<Arc<QuoteEngine>>,
    Path(sessions): Path<i64>,
) -> Response {
    if sessions < 0 {
        let payload = json!({
            "error": QuoteError::NegativeSessions(sessions).to_string(),
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
    }

    let view = ExpiryView {
        sessions,
        expiry_days: engine.expiry_days(sessions),
    };
    (StatusCode::OK, Json(view)).into_response()
}
