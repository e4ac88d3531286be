//! Compact token decoding.
//!
//! Splits a token into header, payload and signature, decodes the first two
//! segments from base64url and parses them as JSON objects. The signature is
//! carried verbatim; nothing here verifies it.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde_json::Value;

use crate::core::error::DecodeError;
use crate::models::{Claims, DecodeResult};
use crate::utils::time;

/// URL-safe alphabet, padding optional, lenient about trailing bits.
const BASE64URL: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decode a token against the current wall clock.
pub fn decode(token: &str) -> Result<DecodeResult, DecodeError> {
    decode_at(token, time::now_secs())
}

/// Decode a token, judging `exp` against `now` (epoch seconds).
pub fn decode_at(token: &str, now: f64) -> Result<DecodeResult, DecodeError> {
    let segments: Vec<&str> = token.split('.').collect();
    let [header, payload, signature] = segments.as_slice() else {
        return Err(DecodeError::MalformedStructure(format!(
            "expected 3 segments, found {}",
            segments.len()
        )));
    };
    if header.is_empty() || payload.is_empty() || signature.is_empty() {
        return Err(DecodeError::MalformedStructure(
            "empty segment".to_string(),
        ));
    }

    let header = decode_segment(header, "header")?;
    let payload = decode_segment(payload, "payload")?;
    let is_valid = payload
        .get("exp")
        .and_then(Value::as_f64)
        .is_some_and(|exp| exp > now);

    Ok(DecodeResult {
        header,
        payload,
        signature: signature.to_string(),
        is_valid,
    })
}

fn decode_segment(segment: &str, name: &'static str) -> Result<Claims, DecodeError> {
    let bytes = BASE64URL
        .decode(segment)
        .map_err(|e| DecodeError::InvalidEncoding {
            segment: name,
            reason: e.to_string(),
        })?;

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(DecodeError::InvalidJson {
            segment: name,
            reason: "not an object".to_string(),
        }),
        Err(e) => Err(DecodeError::InvalidJson {
            segment: name,
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use serde_json::json;

    const NOW: f64 = 1_700_000_000.0;

    fn segment(value: &Value) -> String {
        URL_SAFE_NO_PAD.encode(value.to_string())
    }

    fn token(header: Value, payload: Value) -> String {
        format!("{}.{}.signature", segment(&header), segment(&payload))
    }

    fn hs256() -> Value {
        json!({"alg": "HS256", "typ": "JWT"})
    }

    #[test]
    fn test_future_exp_is_valid() {
        let t = token(hs256(), json!({"sub": "1", "exp": NOW + 60.0}));
        let result = decode_at(&t, NOW).unwrap();

        assert!(result.is_valid);
        assert_eq!(result.header["alg"], "HS256");
        assert_eq!(result.payload["sub"], "1");
        assert_eq!(result.signature, "signature");
    }

    #[test]
    fn test_past_exp_is_not_valid() {
        let t = token(hs256(), json!({"exp": NOW - 1.0}));
        assert!(!decode_at(&t, NOW).unwrap().is_valid);
    }

    #[test]
    fn test_exp_equal_to_now_is_not_valid() {
        let t = token(hs256(), json!({"exp": NOW}));
        assert!(!decode_at(&t, NOW).unwrap().is_valid);
    }

    #[test]
    fn test_missing_exp_is_not_valid() {
        let t = token(hs256(), json!({"sub": "1"}));
        let result = decode_at(&t, NOW).unwrap();
        assert!(!result.is_valid);
        assert_eq!(result.expires_at(), None);
    }

    #[test]
    fn test_non_numeric_exp_is_not_valid() {
        let t = token(hs256(), json!({"exp": "9999999999"}));
        assert!(!decode_at(&t, NOW).unwrap().is_valid);
    }

    #[test]
    fn test_wrong_segment_count() {
        for bad in ["notadottedtoken", "a.b", "a.b.c.d", "", "..."] {
            assert!(
                matches!(decode_at(bad, NOW), Err(DecodeError::MalformedStructure(_))),
                "{bad:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_empty_segment() {
        let h = segment(&hs256());
        let t = format!("{h}.{h}.");
        assert!(matches!(
            decode_at(&t, NOW),
            Err(DecodeError::MalformedStructure(_))
        ));
    }

    #[test]
    fn test_character_outside_alphabet() {
        let p = segment(&json!({"sub": "1"}));
        for bad in ["ab+c", "ab/c", "a$bc", "a bc"] {
            let t = format!("{bad}.{p}.sig");
            assert!(
                matches!(
                    decode_at(&t, NOW),
                    Err(DecodeError::InvalidEncoding { segment: "header", .. })
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_character_outside_alphabet_in_payload() {
        let h = segment(&hs256());
        let t = format!("{h}.eyJz+dWIi.sig");
        assert!(matches!(
            decode_at(&t, NOW),
            Err(DecodeError::InvalidEncoding { segment: "payload", .. })
        ));
    }

    #[test]
    fn test_undecodable_length() {
        let p = segment(&json!({"sub": "1"}));
        let t = format!("abcde.{p}.sig");
        assert!(matches!(
            decode_at(&t, NOW),
            Err(DecodeError::InvalidEncoding { .. })
        ));
    }

    #[test]
    fn test_padding_is_optional() {
        let padded = base64::engine::general_purpose::URL_SAFE.encode(json!({"a": 1}).to_string());
        assert!(padded.ends_with('='));
        let t = format!("{padded}.{padded}.sig");
        assert!(decode_at(&t, NOW).is_ok());
    }

    #[test]
    fn test_non_object_json() {
        let h = segment(&hs256());
        for value in [json!([1, 2]), json!("text"), json!(42), json!(null)] {
            let t = format!("{h}.{}.sig", segment(&value));
            assert!(matches!(
                decode_at(&t, NOW),
                Err(DecodeError::InvalidJson { segment: "payload", .. })
            ));
        }
    }

    #[test]
    fn test_not_json_at_all() {
        let garbage = URL_SAFE_NO_PAD.encode("not json");
        let p = segment(&json!({}));
        let t = format!("{garbage}.{p}.sig");
        assert!(matches!(
            decode_at(&t, NOW),
            Err(DecodeError::InvalidJson { segment: "header", .. })
        ));
    }

    #[test]
    fn test_signature_never_decoded() {
        let t = token(hs256(), json!({})).replace("signature", "!!not-base64!!");
        let result = decode_at(&t, NOW).unwrap();
        assert_eq!(result.signature, "!!not-base64!!");
    }

    #[test]
    fn test_idempotent() {
        let t = token(hs256(), json!({"exp": NOW + 1.0}));
        assert_eq!(decode_at(&t, NOW), decode_at(&t, NOW));
    }

    #[test]
    fn test_real_world_token() {
        let t = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.\
                 eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiaWF0IjoxNTE2MjM5MDIyfQ.\
                 SflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c";
        let result = decode_at(t, NOW).unwrap();
        assert_eq!(result.payload["name"], "John Doe");
        assert!(!result.is_valid);
    }
}
