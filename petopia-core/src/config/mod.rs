//! Configuration types for the Petopia checkout.
//!
//! These types represent the validated runtime configuration shared by the
//! payment components. Loading and parsing is handled by the server crate.

mod liqpay;

pub use liqpay::{DEFAULT_CURRENCY, DEFAULT_DESCRIPTION, LiqPayConfig, ORDER_ID_PLACEHOLDER};
