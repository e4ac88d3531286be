//! Decoded token types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered key→value mapping parsed from a token segment.
///
/// Keys are dynamic since tokens carry arbitrary claims. Insertion order is
/// preserved (`serde_json` is built with `preserve_order`).
pub type Claims = Map<String, Value>;

/// A successfully decoded token.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodeResult {
    pub header: Claims,
    pub payload: Claims,
    /// Raw third segment, carried verbatim and never interpreted.
    #[serde(skip)]
    pub signature: String,
    /// `true` iff the payload carries a numeric `exp` in the future.
    pub is_valid: bool,
}

/// Outcome of a decode attempt, as shown in badges and history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStatus {
    Valid,
    Invalid,
}

impl TokenStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Invalid => "invalid",
        }
    }
}

impl DecodeResult {
    /// The numeric `exp` claim, if present.
    pub fn expires_at(&self) -> Option<f64> {
        self.payload.get("exp").and_then(Value::as_f64)
    }

    /// Pretty-printed `{ header, payload, isValid }` object, two-space indented.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
