//! Payloads of the LiqPay server-to-server callback.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Raw callback body as posted by LiqPay (form-encoded).
///
/// Both fields are optional here so that an incomplete request can be
/// rejected with a proper error instead of an extractor failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackForm {
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub signature: Option<String>,
}

/// Decoded callback `data`.
///
/// Only the fields the checkout reads are modeled; everything else LiqPay
/// sends is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackPayload {
    #[serde(default)]
    pub status: Option<PaymentStatus>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub order_id: String,
    /// `None` when absent or not representable as a [`Decimal`].
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float_option::serialize",
        deserialize_with = "lenient_amount"
    )]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub payment_id: Option<i64>,
}

impl CallbackPayload {
    pub fn is_success(&self) -> bool {
        self.status == Some(PaymentStatus::Success)
    }
}

/// Payment status reported by LiqPay.
///
/// Statuses this crate does not know about deserialize into
/// [`PaymentStatus::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Success,
    Failure,
    Error,
    Reversed,
    Sandbox,
    Processing,
    Prepared,
    WaitAccept,
    WaitSecure,
    #[serde(other)]
    Other,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Success => write!(f, "success"),
            PaymentStatus::Failure => write!(f, "failure"),
            PaymentStatus::Error => write!(f, "error"),
            PaymentStatus::Reversed => write!(f, "reversed"),
            PaymentStatus::Sandbox => write!(f, "sandbox"),
            PaymentStatus::Processing => write!(f, "processing"),
            PaymentStatus::Prepared => write!(f, "prepared"),
            PaymentStatus::WaitAccept => write!(f, "wait_accept"),
            PaymentStatus::WaitSecure => write!(f, "wait_secure"),
            PaymentStatus::Other => write!(f, "other"),
        }
    }
}

/// Body returned to LiqPay once a callback has been processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub status: String,
}

impl Acknowledgement {
    pub fn ok() -> Self {
        Self {
            status: "OK".to_string(),
        }
    }
}

/// LiqPay echoes `order_id` as a string, but JSON numbers are accepted too.
/// Integral floats such as `42.0` normalize to `"42"`.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawOrderId {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match RawOrderId::deserialize(deserializer)? {
        RawOrderId::Text(text) => text,
        RawOrderId::Integer(value) => value.to_string(),
        RawOrderId::Float(value) if value.fract() == 0.0 && value.abs() < 9.0e15 => {
            format!("{value:.0}")
        }
        RawOrderId::Float(value) => value.to_string(),
    })
}

/// The amount is informational, so a value `Decimal` cannot hold is
/// treated as not reported instead of failing the whole payload.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let text = match raw {
        Some(serde_json::Value::Number(number)) => number.to_string(),
        Some(serde_json::Value::String(text)) => text,
        _ => return Ok(None),
    };
    Ok(Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok())
}
