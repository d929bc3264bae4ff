//! Payment API handlers.
//!
//! # Endpoints
//!
//! - `GET  /orders/{order_id}/payment` – signed LiqPay checkout form for an order
//! - `POST /liqpay/callback/`          – LiqPay server callback (form-encoded)

use axum::{
    Json, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use petopia_core::payments::{OrderStoreError, PaymentError};
use serde::Serialize;

use crate::state::AppState;

mod liqpay;
mod payment;

/// Build the payment API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders/{order_id}/payment", get(payment::order_payment))
        .route("/liqpay/callback/", post(liqpay::liqpay_callback))
        .route("/liqpay/callback", post(liqpay::liqpay_callback))
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

/// Errors that can occur in payment API handlers.
///
/// Response bodies are fixed strings; details only go to the log.
#[derive(Debug)]
pub(crate) struct ApiError(PaymentError);

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        Self(err)
    }
}

impl From<OrderStoreError> for ApiError {
    fn from(err: OrderStoreError) -> Self {
        Self(PaymentError::Store(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match &self.0 {
            PaymentError::MalformedRequest(_) => (StatusCode::BAD_REQUEST, "invalid data"),
            PaymentError::SignatureMismatch => (StatusCode::BAD_REQUEST, "invalid signature"),
            PaymentError::AmountMismatch { .. } => (StatusCode::BAD_REQUEST, "amount mismatch"),
            PaymentError::OrderNotFound(_) => (StatusCode::NOT_FOUND, "order not found"),
            PaymentError::InvalidAmount(amount) => {
                tracing::warn!(%amount, "Refusing checkout for non-positive order total");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "order total is not payable",
                )
            }
            e @ (PaymentError::MissingConfig
            | PaymentError::Serialization(_)
            | PaymentError::Store(_)) => {
                tracing::error!(error = %e, "Payment API internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}
