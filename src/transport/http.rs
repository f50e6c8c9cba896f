//! HTTP transport
//!
//! Maps the broker operations onto routes:
//! - `GET  /health`          queue depth, no auth
//! - `POST /enqueue`         admin key in `x-admin-key`
//! - `POST /poll`            request signature in `x-signature`
//! - `POST /ack`             request signature in `x-signature`
//! - `GET  /result/:job_id`  admin key in `x-admin-key`
//!
//! Handlers only move data between JSON and the broker; every rule lives in
//! the broker itself.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::broker::Broker;
use crate::broker::message::{AckRequest, EnqueueRequest, PollRequest};
use crate::transport::message::{
    AckResponse, EnqueueResponse, ErrorResponse, HealthResponse, PollResponse, ResultResponse,
};
use crate::utils::BrokerError;

pub const ADMIN_KEY_HEADER: &str = "x-admin-key";
pub const SIGNATURE_HEADER: &str = "x-signature";

pub fn router(broker: Arc<Broker>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/enqueue", post(enqueue))
        .route("/poll", post(poll))
        .route("/ack", post(ack))
        .route("/result/:job_id", get(fetch_result))
        .with_state(broker)
}

pub async fn start_http_server(addr: &str, broker: Arc<Broker>) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "HTTP server listening");
    serve(listener, broker).await
}

/// Serves on an already bound listener.
pub async fn serve(listener: TcpListener, broker: Arc<Broker>) -> std::io::Result<()> {
    axum::serve(listener, router(broker)).await
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

async fn health(State(broker): State<Arc<Broker>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        pending: broker.pending(),
    })
}

async fn enqueue(
    State(broker): State<Arc<Broker>>,
    headers: HeaderMap,
    Json(req): Json<EnqueueRequest>,
) -> Result<Json<EnqueueResponse>, BrokerError> {
    let receipt = broker.enqueue(header(&headers, ADMIN_KEY_HEADER), req)?;
    Ok(Json(EnqueueResponse {
        ok: true,
        job_id: receipt.job_id,
        sig: receipt.signature,
    }))
}

async fn poll(
    State(broker): State<Arc<Broker>>,
    headers: HeaderMap,
    Json(req): Json<PollRequest>,
) -> Result<Json<PollResponse>, BrokerError> {
    let signature = header(&headers, SIGNATURE_HEADER).ok_or(BrokerError::BadSignature)?;
    let response = match broker.poll(&req, signature)? {
        Some(signed) => PollResponse {
            job: Some(signed.job),
            sig: Some(signed.signature),
        },
        None => PollResponse {
            job: None,
            sig: None,
        },
    };
    Ok(Json(response))
}

async fn ack(
    State(broker): State<Arc<Broker>>,
    headers: HeaderMap,
    Json(req): Json<AckRequest>,
) -> Result<Json<AckResponse>, BrokerError> {
    let signature = header(&headers, SIGNATURE_HEADER).ok_or(BrokerError::BadSignature)?;
    broker.ack(req, signature)?;
    Ok(Json(AckResponse { ok: true }))
}

async fn fetch_result(
    State(broker): State<Arc<Broker>>,
    Path(job_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<ResultResponse>, BrokerError> {
    let response = match broker.fetch_result(header(&headers, ADMIN_KEY_HEADER), &job_id)? {
        Some(result) => ResultResponse::Found(result),
        None => ResultResponse::Missing { found: false },
    };
    Ok(Json(response))
}

impl IntoResponse for BrokerError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            BrokerError::BadSignature => (StatusCode::UNAUTHORIZED, "Bad signature"),
            BrokerError::BadAdminKey => (StatusCode::UNAUTHORIZED, "Bad admin key"),
            BrokerError::MachineNotAllowed(_) => (StatusCode::FORBIDDEN, "Machine not allowed"),
            BrokerError::MissingSecret | BrokerError::Encoding(_) => {
                error!(error = %self, "Internal broker error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
            }
        };
        let body = ErrorResponse {
            detail: detail.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
