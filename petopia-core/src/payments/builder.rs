use super::PaymentError;
use crate::config::LiqPayConfig;
use petopia_sdk::objects::{API_VERSION, CHECKOUT_ACTION, CheckoutParams, PaymentForm};
use petopia_sdk::signature::SignedPayload;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Display;
use std::sync::Arc;

/// Builds the signed `{data, signature}` form for the LiqPay checkout.
///
/// Purely computational: the same inputs always give the same output, and
/// no order state is touched.
#[derive(Debug, Clone)]
pub struct PaymentRequestBuilder {
    config: Arc<LiqPayConfig>,
}

impl PaymentRequestBuilder {
    pub fn new(config: Arc<LiqPayConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LiqPayConfig {
        &self.config
    }

    /// Payer-visible description for an order, from the configured template.
    pub fn describe(&self, order_id: impl Display) -> String {
        self.config.description_for(&order_id.to_string())
    }

    /// Sign a checkout for `amount` on `order_id`.
    ///
    /// `amount` must come from the order's stored total, it is rounded to
    /// two decimal places and has to stay strictly positive.
    pub fn build(
        &self,
        order_id: impl Display,
        amount: Decimal,
        description: &str,
    ) -> Result<PaymentForm, PaymentError> {
        let amount = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        if amount <= Decimal::ZERO {
            return Err(PaymentError::InvalidAmount(amount));
        }
        if !self.config.has_keys() {
            return Err(PaymentError::MissingConfig);
        }

        let order_id = order_id.to_string();
        let params = CheckoutParams {
            action: CHECKOUT_ACTION.to_string(),
            amount,
            currency: self.config.currency.clone(),
            description: description.to_string(),
            result_url: self.config.result_url_for(&order_id),
            server_url: self.config.server_url.clone(),
            public_key: self.config.public_key.clone(),
            version: API_VERSION.to_string(),
            order_id,
        };

        Ok(SignedPayload::seal(
            &params,
            self.config.private_key_bytes(),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petopia_sdk::signature::{decode_base64, sign};
    use rust_decimal_macros::dec;
    use serde_json::{Value, json};

    fn builder() -> PaymentRequestBuilder {
        PaymentRequestBuilder::new(Arc::new(LiqPayConfig::new(
            "pub",
            "priv",
            "http://localhost:3000/order/success?order_id={order_id}",
            "https://shop.example.com/api/liqpay/callback/",
        )))
    }

    fn decode(data: &str) -> Value {
        serde_json::from_slice(&decode_base64(data).unwrap()).unwrap()
    }

    #[test]
    fn test_build_order_42() {
        let form = builder().build(42, dec!(19.99), "Order #42").unwrap();

        let fields = decode(&form.data);
        assert_eq!(fields["order_id"], "42");
        assert_eq!(fields["amount"], json!(19.99));
        assert_eq!(fields["version"], "3");
        assert_eq!(fields["action"], "pay");
        assert_eq!(fields["currency"], "UAH");
        assert_eq!(fields["description"], "Order #42");
        assert_eq!(fields["public_key"], "pub");
        assert_eq!(
            fields["result_url"],
            "http://localhost:3000/order/success?order_id=42"
        );
        assert_eq!(
            fields["server_url"],
            "https://shop.example.com/api/liqpay/callback/"
        );

        assert_eq!(form.signature, sign(b"priv", &form.data));
    }

    #[test]
    fn test_build_is_deterministic() {
        let builder = builder();
        let first = builder.build(42, dec!(19.99), "Order #42").unwrap();
        let second = builder.build(42, dec!(19.99), "Order #42").unwrap();
        assert_eq!(first, second);

        let other = builder.build(43, dec!(19.99), "Order #42").unwrap();
        assert_ne!(first.data, other.data);
        assert_ne!(first.signature, other.signature);
    }

    #[test]
    fn test_non_positive_amount_is_rejected() {
        let builder = builder();
        assert!(matches!(
            builder.build(1, Decimal::ZERO, "x"),
            Err(PaymentError::InvalidAmount(_))
        ));
        assert!(matches!(
            builder.build(1, dec!(-5.00), "x"),
            Err(PaymentError::InvalidAmount(_))
        ));
        // Rounds to zero at currency scale.
        assert!(matches!(
            builder.build(1, dec!(0.004), "x"),
            Err(PaymentError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_amount_rounded_to_currency_scale() {
        let form = builder().build(1, dec!(10.005), "x").unwrap();
        assert_eq!(decode(&form.data)["amount"], json!(10.01));
    }

    #[test]
    fn test_missing_keys() {
        let mut config = LiqPayConfig::new("pub", "", "http://a", "http://b");
        let no_private = PaymentRequestBuilder::new(Arc::new(config.clone()));
        assert!(matches!(
            no_private.build(1, dec!(1.00), "x"),
            Err(PaymentError::MissingConfig)
        ));

        config.private_key = b"priv".to_vec().into_boxed_slice();
        config.public_key = String::new();
        let no_public = PaymentRequestBuilder::new(Arc::new(config));
        assert!(matches!(
            no_public.build(1, dec!(1.00), "x"),
            Err(PaymentError::MissingConfig)
        ));
    }

    #[test]
    fn test_describe_uses_template() {
        assert_eq!(builder().describe(42), "Оплата замовлення #42 на Petopia");
    }
}
