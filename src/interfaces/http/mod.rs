//! HTTP interface for the payment gateway.
//!
//! A thin mapping between the wire and the application service: routing,
//! JSON shaping and status-code selection happen here, decisions do not.
//! Rejections come back as 400 with the validation message, bank decisions
//! as 201 with the stored record, bank failures as 502.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tracing::error;
use uuid::Uuid;

use crate::application::service::{PaymentService, ProcessOutcome};
use crate::domain::payment::{Payment, PaymentStatus};
use crate::domain::request::PaymentRequest;
use crate::error::PaymentError;

/// Shared state handed to every handler.
pub type AppState = Arc<PaymentService>;

/// Builds the router exposing the processing and retrieval operations.
pub fn router(service: AppState) -> Router {
    Router::new()
        .route("/api/payments", post(process_payment))
        .route("/api/payments/{id}", get(get_payment))
        .with_state(service)
}

/// A stored payment together with its status, as returned to callers.
#[derive(Debug, Serialize)]
struct PaymentEnvelope {
    payment: Payment,
    status: PaymentStatus,
}

impl PaymentEnvelope {
    fn new(payment: Payment) -> Self {
        let status = payment.status;
        Self { payment, status }
    }
}

/// Body of a 400 response for a request that failed validation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RejectionBody {
    status: PaymentStatus,
    error_message: String,
}

/// Plain message body used for 404 and failure responses.
#[derive(Debug, Serialize)]
struct MessageBody {
    message: String,
}

async fn process_payment(
    State(service): State<AppState>,
    Json(request): Json<PaymentRequest>,
) -> Response {
    match service.process(request).await {
        Ok(ProcessOutcome::Rejected(reason)) => (
            StatusCode::BAD_REQUEST,
            Json(RejectionBody {
                status: PaymentStatus::Rejected,
                error_message: reason.to_string(),
            }),
        )
            .into_response(),
        Ok(ProcessOutcome::Completed { payment, .. }) => {
            let location = format!("/api/payments/{}", payment.id);
            (
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(PaymentEnvelope::new(payment)),
            )
                .into_response()
        }
        Err(error) => bank_failure_response(error),
    }
}

async fn get_payment(State(service): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match service.get_by_id(id).await {
        Ok(Some(payment)) => {
            (StatusCode::OK, Json(PaymentEnvelope::new(payment))).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(MessageBody {
                message: "Payment not found".to_string(),
            }),
        )
            .into_response(),
        Err(error) => {
            error!("Payment lookup failed: {error}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageBody {
                    message: error.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// A failed bank attempt is a gateway problem from the caller's point of
/// view.
fn bank_failure_response(error: PaymentError) -> Response {
    error!("Payment processing failed: {error}");
    (
        StatusCode::BAD_GATEWAY,
        Json(MessageBody {
            message: error.to_string(),
        }),
    )
        .into_response()
}
