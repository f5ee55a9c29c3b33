use crate::application::pipeline::Pipeline;
use crate::domain::delivery::{DeliveryOutcome, Headers, headers_from};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

pub const SERVICE_NAME: &str = "order-bridge";

/// Random 64-bit request id rendered as 16 lowercase hex digits.
pub fn generate_request_id() -> String {
    format!("{:016x}", rand::random::<u64>())
}

/// Acknowledgement returned once the ERP accepted the order.
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub status: &'static str,
    pub order_id: String,
    pub request_id: String,
    pub message: &'static str,
}

/// Routes:
///
/// - `POST /webhook` - accept an order webhook and forward it to the ERP
/// - `GET /health` - liveness check
/// - `GET /` - service description
pub fn router(pipeline: Arc<Pipeline>) -> Router {
    Router::new()
        .route("/", get(describe))
        .route("/webhook", post(receive_webhook))
        .route("/health", get(health))
        .with_state(pipeline)
}

fn header_pairs(map: &HeaderMap) -> Headers {
    headers_from(map.iter().map(|(name, value)| (name.as_str(), value.as_bytes())))
}

async fn receive_webhook(
    State(pipeline): State<Arc<Pipeline>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request_id = generate_request_id();
    let topic = headers
        .get("X-Shopify-Topic")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    info!(request_id = %request_id, topic, "Received webhook");

    let order = match pipeline
        .receive(&request_id, header_pairs(&headers), &body)
        .await
    {
        Ok(order) => order,
        Err(e) => {
            warn!(request_id = %request_id, error = %e, "Rejected webhook payload");
            return (StatusCode::BAD_REQUEST, "Invalid JSON").into_response();
        }
    };

    let order_id = order.id.to_string();
    match pipeline.deliver(&order, &request_id).await {
        DeliveryOutcome::Delivered { attempts, .. } => {
            info!(request_id = %request_id, order_id = %order_id, attempts, "Successfully processed order");
            let ack = WebhookAck {
                status: "success",
                order_id,
                request_id,
                message: "Order successfully sent to ERP",
            };
            (StatusCode::OK, Json(ack)).into_response()
        }
        DeliveryOutcome::Failed {
            last_error,
            attempts_made,
        } => {
            error!(
                request_id = %request_id,
                order_id = %order_id,
                attempts = attempts_made,
                error = %last_error,
                "Failed to send order to ERP"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        "service": SERVICE_NAME,
    }))
}

async fn describe() -> impl IntoResponse {
    Json(serde_json::json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Forwards commerce order webhooks to an ERP SOAP endpoint",
        "endpoints": "/webhook (POST) - order webhook handler, /health (GET) - health check",
    }))
}
