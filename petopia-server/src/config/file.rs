//! TOML file configuration structures.
//!
//! These structs directly map to the `petopia-config.toml` file format.

use petopia_core::config::{DEFAULT_CURRENCY, DEFAULT_DESCRIPTION};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub liqpay: LiqPayConfig,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:8000").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}

/// LiqPay merchant section.
///
/// Keys may be left empty here and supplied through `LIQPAY_PUBLIC_KEY`
/// and `LIQPAY_PRIVATE_KEY` instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiqPayConfig {
    #[serde(default)]
    pub public_key: String,
    #[serde(default)]
    pub private_key: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Payer redirect after checkout. `{order_id}` is substituted.
    pub result_url: String,
    /// Public URL of the callback endpoint.
    pub server_url: String,
    /// Payer-visible description. `{order_id}` is substituted.
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default)]
    pub check_callback_amount: bool,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}
