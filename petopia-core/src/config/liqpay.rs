//! LiqPay merchant configuration.

/// Placeholder substituted with the order id in URL and description templates.
pub const ORDER_ID_PLACEHOLDER: &str = "{order_id}";

pub const DEFAULT_CURRENCY: &str = "UAH";

pub const DEFAULT_DESCRIPTION: &str = "Оплата замовлення #{order_id} на Petopia";

/// Merchant credentials and fixed URLs for the LiqPay checkout.
///
/// Built once at startup and shared read-only by the payment request
/// builder and the callback verifier.
#[derive(Clone)]
pub struct LiqPayConfig {
    /// Public key, sent in clear inside the checkout payload.
    pub public_key: String,
    /// Private key bytes used for signing. Never serialized or logged.
    pub private_key: Box<[u8]>,
    /// ISO currency code of every charge.
    pub currency: String,
    /// Where LiqPay redirects the payer. May contain `{order_id}`.
    pub result_url: String,
    /// Callback URL LiqPay posts payment results to.
    pub server_url: String,
    /// Payer-visible description template. May contain `{order_id}`.
    pub description: String,
    /// Reject success callbacks whose amount differs from the order total.
    pub check_callback_amount: bool,
}

impl LiqPayConfig {
    /// Create a config with the default currency and description.
    pub fn new(
        public_key: impl Into<String>,
        private_key: impl Into<String>,
        result_url: impl Into<String>,
        server_url: impl Into<String>,
    ) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into().into_bytes().into_boxed_slice(),
            currency: DEFAULT_CURRENCY.to_string(),
            result_url: result_url.into(),
            server_url: server_url.into(),
            description: DEFAULT_DESCRIPTION.to_string(),
            check_callback_amount: false,
        }
    }

    /// Get the private key bytes for signing.
    pub fn private_key_bytes(&self) -> &[u8] {
        &self.private_key
    }

    /// Whether both keys are present.
    pub fn has_keys(&self) -> bool {
        !self.public_key.is_empty() && !self.private_key.is_empty()
    }

    /// Result URL for a specific order.
    pub fn result_url_for(&self, order_id: &str) -> String {
        self.result_url.replace(ORDER_ID_PLACEHOLDER, order_id)
    }

    /// Payer-visible description for a specific order.
    pub fn description_for(&self, order_id: &str) -> String {
        self.description.replace(ORDER_ID_PLACEHOLDER, order_id)
    }
}

impl std::fmt::Debug for LiqPayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiqPayConfig")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .field("currency", &self.currency)
            .field("result_url", &self.result_url)
            .field("server_url", &self.server_url)
            .field("description", &self.description)
            .field("check_callback_amount", &self.check_callback_amount)
            .finish()
    }
}
