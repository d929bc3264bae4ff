//! Application state shared across all request handlers.

use petopia_core::config::LiqPayConfig;
use petopia_core::payments::{CallbackVerifier, OrderStore, PaymentRequestBuilder};
use std::sync::Arc;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
#[derive(Clone)]
pub struct AppState {
    /// Order storage the payment flow reads and settles.
    pub orders: Arc<dyn OrderStore>,
    /// Signs checkout forms.
    pub payment_builder: PaymentRequestBuilder,
    /// Authenticates LiqPay callbacks.
    pub callback_verifier: CallbackVerifier,
}

impl AppState {
    /// Create a new AppState. The LiqPay configuration is frozen here and
    /// shared by both payment components.
    pub fn new(orders: Arc<dyn OrderStore>, liqpay: LiqPayConfig) -> Self {
        let liqpay = Arc::new(liqpay);
        Self {
            orders,
            payment_builder: PaymentRequestBuilder::new(liqpay.clone()),
            callback_verifier: CallbackVerifier::new(liqpay),
        }
    }
}
