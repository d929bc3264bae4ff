use super::{OrderStore, PaymentError};
use crate::config::LiqPayConfig;
use crate::entities::order_records::OrderId;
use petopia_sdk::objects::{CallbackPayload, PaymentStatus};
use petopia_sdk::signature::SignedPayload;
use rust_decimal::RoundingStrategy;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What a successfully processed callback did.
///
/// Every variant is acknowledged to LiqPay so it stops redelivering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// The order was unpaid and is now paid.
    Paid(OrderId),
    /// The order was already paid; nothing was written.
    AlreadyPaid(OrderId),
    /// The status is not `success`; nothing was looked up or written.
    Ignored(Option<PaymentStatus>),
}

/// Authenticates LiqPay callbacks and settles the referenced order.
#[derive(Debug, Clone)]
pub struct CallbackVerifier {
    config: Arc<LiqPayConfig>,
}

impl CallbackVerifier {
    pub fn new(config: Arc<LiqPayConfig>) -> Self {
        Self { config }
    }

    /// Verify a callback and apply it to `store`.
    ///
    /// The steps run strictly in order: presence check, signature check,
    /// decoding, then the order update. A callback that fails the signature
    /// check is never decoded and never reaches `store`.
    pub async fn verify_and_apply<S>(
        &self,
        data: &str,
        signature: &str,
        store: &S,
    ) -> Result<CallbackOutcome, PaymentError>
    where
        S: OrderStore + ?Sized,
    {
        let signed = SignedPayload::from_parts(data, signature)?;
        if self.config.private_key.is_empty() {
            return Err(PaymentError::MissingConfig);
        }

        let payload: CallbackPayload = signed
            .open(self.config.private_key_bytes())
            .map_err(PaymentError::from)
            .inspect_err(|e| warn!(error = %e, "Rejected LiqPay callback"))?;

        if !payload.is_success() {
            info!(
                order_id = %payload.order_id,
                status = ?payload.status,
                "Ignoring LiqPay callback without success status"
            );
            return Ok(CallbackOutcome::Ignored(payload.status));
        }

        // Ids that are not integers cannot exist in the store.
        let order_id: OrderId = payload
            .order_id
            .parse()
            .map_err(|_| PaymentError::OrderNotFound(payload.order_id.clone()))?;

        let order = store
            .get_order(order_id)
            .await?
            .ok_or_else(|| PaymentError::OrderNotFound(payload.order_id.clone()))?;

        if self.config.check_callback_amount {
            if let Some(reported) = payload.amount {
                let expected = order.total_amount;
                let round = |value: rust_decimal::Decimal| {
                    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
                };
                if round(reported) != round(expected) {
                    warn!(order_id, %reported, %expected, "LiqPay callback amount mismatch");
                    return Err(PaymentError::AmountMismatch { expected, reported });
                }
            }
        }

        if order.paid {
            debug!(order_id, "Order already paid, callback redelivered");
            return Ok(CallbackOutcome::AlreadyPaid(order_id));
        }

        let updated = store.set_paid(&order).await?;
        info!(order_id = updated.id, "Order marked as paid");
        Ok(CallbackOutcome::Paid(updated.id))
    }
}
