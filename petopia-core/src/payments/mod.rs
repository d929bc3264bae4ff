//! LiqPay payment flow.
//!
//! - [`PaymentRequestBuilder`] signs the checkout payload the browser hands
//!   to LiqPay.
//! - [`CallbackVerifier`] authenticates LiqPay's server callback and marks
//!   the order paid through an [`OrderStore`].
//!
//! Both components read the same immutable [`LiqPayConfig`](crate::config::LiqPayConfig).

mod builder;
mod store;
mod verifier;

pub use builder::PaymentRequestBuilder;
pub use store::{InMemoryOrderStore, OrderStore, OrderStoreError};
pub use verifier::{CallbackOutcome, CallbackVerifier};

use petopia_sdk::signature::SignatureError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors of the payment flow.
///
/// `InvalidAmount` and `MissingConfig` are caller-side problems of the
/// builder. The remaining variants describe a bad callback and are answered
/// with a client error, except `Store`.
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    #[error("LiqPay public or private key is not configured")]
    MissingConfig,

    #[error("malformed callback: {0}")]
    MalformedRequest(&'static str),

    #[error("callback signature mismatch")]
    SignatureMismatch,

    #[error("order not found: {0:?}")]
    OrderNotFound(String),

    #[error("callback amount {reported} does not match order total {expected}")]
    AmountMismatch { expected: Decimal, reported: Decimal },

    #[error("payload serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("order store error: {0}")]
    Store(#[from] OrderStoreError),
}

impl From<SignatureError> for PaymentError {
    fn from(err: SignatureError) -> Self {
        match err {
            SignatureError::Missing => Self::MalformedRequest("missing data or signature"),
            SignatureError::InvalidBase64 => Self::MalformedRequest("data is not valid base64"),
            SignatureError::Json(_) => Self::MalformedRequest("data is not a valid payload"),
            SignatureError::SignatureMismatch => Self::SignatureMismatch,
        }
    }
}
