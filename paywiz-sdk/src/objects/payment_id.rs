//! Synthetic payment identifiers.
//!
//! Format: `PAY-<unix_millis>-<9 uppercase base36 characters>`, for example
//! `PAY-1729332000000-K3J9Q0ZB1`. Nothing external consumes it, but receipts
//! printed by earlier versions use the same shape, so parsing stays strict.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Leading tag of every identifier.
pub const PAYMENT_ID_PREFIX: &str = "PAY";

/// Length of the random base36 suffix.
pub const PAYMENT_ID_SUFFIX_LEN: usize = 9;

const BASE36_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A client-side generated payment identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PaymentId(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentIdParseError {
    #[error("payment id must start with `PAY-`")]
    MissingPrefix,
    #[error("payment id timestamp is not a decimal number")]
    InvalidTimestamp,
    #[error("payment id suffix must be 9 uppercase base36 characters")]
    InvalidSuffix,
}

impl PaymentId {
    /// Generate an identifier for a payment completed at `unix_millis`.
    pub fn generate<R: Rng>(unix_millis: i64, rng: &mut R) -> Self {
        let suffix: String = (0..PAYMENT_ID_SUFFIX_LEN)
            .map(|_| char::from(BASE36_ALPHABET[rng.random_range(0..BASE36_ALPHABET.len())]))
            .collect();
        Self(format!("{PAYMENT_ID_PREFIX}-{unix_millis}-{suffix}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Millisecond timestamp embedded in the identifier.
    pub fn unix_millis(&self) -> i64 {
        // Only constructed through `generate` or a validated parse.
        self.0
            .split('-')
            .nth(1)
            .and_then(|millis| millis.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for PaymentId {
    type Err = PaymentIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix(PAYMENT_ID_PREFIX)
            .and_then(|rest| rest.strip_prefix('-'))
            .ok_or(PaymentIdParseError::MissingPrefix)?;
        let (millis, suffix) = rest
            .split_once('-')
            .ok_or(PaymentIdParseError::InvalidTimestamp)?;

        if millis.is_empty() || !millis.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PaymentIdParseError::InvalidTimestamp);
        }
        millis
            .parse::<i64>()
            .map_err(|_| PaymentIdParseError::InvalidTimestamp)?;

        let suffix_valid = suffix.len() == PAYMENT_ID_SUFFIX_LEN
            && suffix.bytes().all(|b| BASE36_ALPHABET.contains(&b));
        if !suffix_valid {
            return Err(PaymentIdParseError::InvalidSuffix);
        }

        Ok(Self(s.to_owned()))
    }
}

impl TryFrom<String> for PaymentId {
    type Error = PaymentIdParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PaymentId> for String {
    fn from(value: PaymentId) -> Self {
        value.0
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
