//! Signature algorithm and verification for the LiqPay protocol.
//!
//! Both the checkout form sent to LiqPay and the callbacks LiqPay sends back
//! use the same construction:
//!
//! ```text
//! data      = base64(json_payload)
//! signature = base64(SHA1(private_key + data + private_key))
//! ```
//!
//! This is a provider-mandated legacy scheme, not an HMAC. It has to match
//! LiqPay byte for byte, so SHA-1 and the double key wrapping stay as is.

use ring::digest;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Errors produced by signature operations.
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("missing data or signature")]
    Missing,
    #[error("invalid base64 encoding")]
    InvalidBase64,
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid signature")]
    SignatureMismatch,
}

/// Compute `base64(SHA1(private_key || data || private_key))`.
pub fn sign(private_key: &[u8], data: &str) -> String {
    let mut context = digest::Context::new(&digest::SHA1_FOR_LEGACY_USE_ONLY);
    context.update(private_key);
    context.update(data.as_bytes());
    context.update(private_key);
    encode_base64(context.finish().as_ref())
}

/// Recompute the signature of `data` and compare it with `signature`.
///
/// The comparison is an exact string match on the base64 text.
pub fn verify(private_key: &[u8], data: &str, signature: &str) -> Result<(), SignatureError> {
    if sign(private_key, data) == signature {
        Ok(())
    } else {
        Err(SignatureError::SignatureMismatch)
    }
}

/// Standard, padded base64.
pub fn encode_base64(bytes: &[u8]) -> String {
    fast32::base64::RFC4648.encode(bytes)
}

pub fn decode_base64(text: &str) -> Result<Vec<u8>, SignatureError> {
    fast32::base64::RFC4648
        .decode_str(text)
        .map_err(|_| SignatureError::InvalidBase64)
}

// ---------------------------------------------------------------------------
// SignedPayload: the `{data, signature}` pair
// ---------------------------------------------------------------------------

/// A base64 JSON payload together with its LiqPay signature.
///
/// This is the shape of the checkout form handed to the browser and of the
/// callback body LiqPay posts back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedPayload {
    pub data: String,
    pub signature: String,
}

impl SignedPayload {
    /// Serialize `body` to JSON, base64-encode it and sign the result.
    pub fn seal<T: Serialize>(body: &T, private_key: &[u8]) -> Result<Self, serde_json::Error> {
        let json = serde_json::to_vec(body)?;
        let data = encode_base64(&json);
        let signature = sign(private_key, &data);
        Ok(Self { data, signature })
    }

    /// Assemble a payload from untrusted parts.
    ///
    /// Fails with [`SignatureError::Missing`] if either part is empty. This
    /// does **not** verify anything, call [`open`](Self::open) for that.
    pub fn from_parts(
        data: impl Into<String>,
        signature: impl Into<String>,
    ) -> Result<Self, SignatureError> {
        let data = data.into();
        let signature = signature.into();
        if data.is_empty() || signature.is_empty() {
            return Err(SignatureError::Missing);
        }
        Ok(Self { data, signature })
    }

    /// Verify the signature and only then decode the payload.
    ///
    /// `data` is attacker-controlled until the signature check passes, so
    /// the base64 and JSON decoders never see it before that.
    pub fn open<T: DeserializeOwned>(self, private_key: &[u8]) -> Result<T, SignatureError> {
        verify(private_key, &self.data, &self.signature)?;
        let json = decode_base64(&self.data)?;
        Ok(serde_json::from_slice(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    const DATA: &str = "eyJvcmRlcl9pZCI6IjQyIiwic3RhdHVzIjoic3VjY2VzcyJ9";

    #[test]
    fn test_sign_known_answer() {
        // Reference values produced independently with Python's hashlib.
        assert_eq!(sign(b"priv", DATA), "Ui8ISYMVmvZxbqKtdtbsupwsOsA=");
        assert_eq!(sign(b"priv", ""), "43DOsmZPxkKjityCcx8pjwmOMNw=");
    }

    #[test]
    fn test_verify() {
        assert!(verify(b"priv", DATA, "Ui8ISYMVmvZxbqKtdtbsupwsOsA=").is_ok());
        assert!(matches!(
            verify(b"other", DATA, "Ui8ISYMVmvZxbqKtdtbsupwsOsA="),
            Err(SignatureError::SignatureMismatch)
        ));
    }

    #[test]
    fn test_base64_is_padded() {
        assert_eq!(encode_base64(b"a"), "YQ==");
        assert_eq!(decode_base64("YQ==").unwrap(), b"a");
        assert!(matches!(
            decode_base64("not base64!"),
            Err(SignatureError::InvalidBase64)
        ));
    }

    #[test]
    fn test_seal_and_open() {
        let body = json!({ "order_id": "42", "status": "success" });
        let sealed = SignedPayload::seal(&body, b"priv").unwrap();
        assert_eq!(sealed.signature, sign(b"priv", &sealed.data));

        let opened: Value = sealed.open(b"priv").unwrap();
        assert_eq!(opened, body);
    }

    #[test]
    fn test_open_checks_signature_before_decoding() {
        // Garbage data with a wrong signature must report the signature,
        // proving decoding never ran.
        let forged = SignedPayload::from_parts("%%% not base64 %%%", "AAAA").unwrap();
        assert!(matches!(
            forged.open::<Value>(b"priv"),
            Err(SignatureError::SignatureMismatch)
        ));

        // The same garbage correctly signed gets through to the decoder.
        let signature = sign(b"priv", "%%% not base64 %%%");
        let signed = SignedPayload::from_parts("%%% not base64 %%%", signature).unwrap();
        assert!(matches!(
            signed.open::<Value>(b"priv"),
            Err(SignatureError::InvalidBase64)
        ));
    }

    #[test]
    fn test_from_parts_rejects_empty() {
        assert!(matches!(
            SignedPayload::from_parts("", "sig"),
            Err(SignatureError::Missing)
        ));
        assert!(matches!(
            SignedPayload::from_parts(DATA, ""),
            Err(SignatureError::Missing)
        ));
    }
}
