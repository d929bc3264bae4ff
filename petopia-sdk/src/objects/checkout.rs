use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::signature::SignedPayload;

/// LiqPay action for a one-off payment.
pub const CHECKOUT_ACTION: &str = "pay";

/// LiqPay API version the payload is written against.
pub const API_VERSION: &str = "3";

/// The field set encoded into the checkout `data` blob.
///
/// Field order is irrelevant to correctness: the signature covers the
/// encoded bytes as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutParams {
    pub action: String,
    /// Charge amount, sent as a JSON number (`19.99`).
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: String,
    pub description: String,
    pub order_id: String,
    pub version: String,
    pub public_key: String,
    pub result_url: String,
    pub server_url: String,
}

/// Response of the payment form endpoint, forwarded verbatim by the browser
/// to the LiqPay hosted checkout.
pub type PaymentForm = SignedPayload;
