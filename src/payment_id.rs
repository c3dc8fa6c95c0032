//! Payment identifiers
//!
//! A payment id is the 64-hex-character tag a depositor attaches to a
//! transfer. The receiving side derives it from its own order/account key
//! so an incoming transaction can be matched without looking at the sender.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PaymentIdError;

/// Width of a payment id on the wire, in hex characters.
pub const PAYMENT_ID_LEN: usize = 64;

/// A validated, lower-case, 64 hex character payment id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PaymentId(String);

impl PaymentId {
    /// Derive a payment id from arbitrary text.
    ///
    /// The raw bytes are hex-encoded and left-padded with `0` to 64
    /// characters. Text longer than 32 bytes cannot fit and is rejected
    /// rather than producing an id the network would refuse.
    pub fn generate(text: impl AsRef<[u8]>) -> Result<Self, PaymentIdError> {
        let bytes = text.as_ref();
        let encoded = hex::encode(bytes);
        if encoded.len() > PAYMENT_ID_LEN {
            return Err(PaymentIdError::TooLong { bytes: bytes.len() });
        }
        Ok(Self(format!("{encoded:0>width$}", width = PAYMENT_ID_LEN)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Recover the text an id was generated from.
    ///
    /// Leading zero bytes are indistinguishable from padding and are dropped,
    /// so this only round-trips text that does not start with NUL.
    pub fn decode_text(&self) -> Option<String> {
        let mut digits = self.0.as_str();
        while let Some(rest) = digits.strip_prefix("00") {
            digits = rest;
        }
        let bytes = hex::decode(digits).ok()?;
        String::from_utf8(bytes).ok()
    }
}

/// Free-function form of [`PaymentId::generate`].
pub fn generate_payment_id(text: impl AsRef<[u8]>) -> Result<PaymentId, PaymentIdError> {
    PaymentId::generate(text)
}

impl FromStr for PaymentId {
    type Err = PaymentIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() != PAYMENT_ID_LEN || !trimmed.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(PaymentIdError::Invalid(s.to_string()));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }
}

impl TryFrom<String> for PaymentId {
    type Error = PaymentIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PaymentId> for String {
    fn from(id: PaymentId) -> Self {
        id.0
    }
}

impl AsRef<str> for PaymentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
