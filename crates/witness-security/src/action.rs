// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Action request signing — HMAC authentication of requests between the two
// local processes that share a symmetric key.
//
// Signing string:
//   "{id}|{timestamp}|{action}|{sha256hex(serialize(payload))}"
//
// `payload` is serialized with the canonical encoder: compact, key-sorted,
// `JSON.stringify` number forms.  The first three components are refused if
// they contain the separator, so no two distinct requests share a signing
// string.  Replay windows, ordering and key distribution belong to the
// transport that carries these requests.

use serde_json::Value;
use tracing::{debug, instrument, warn};
use witness_bridge::{CryptoProvider, RingCrypto};
use witness_core::ActionRequest;
use witness_core::error::{Result, WitnessError};

use crate::canonical::canonicalize;
use crate::compare::constant_time_str_eq;
use crate::integrity::{hash_bytes, hmac_hex};

/// Separator between signing-string components.
pub const SIGNING_FIELD_SEPARATOR: char = '|';

/// Build the signing string with the native provider.
pub fn build_signing_string(
    id: &str,
    timestamp: &str,
    action: &str,
    payload: &Value,
) -> Result<String> {
    ActionSigner::new().build_signing_string(id, timestamp, action, payload)
}

/// Hex HMAC-SHA256 of the signing string under `key`.
pub fn sign_action(
    key: &[u8],
    id: &str,
    timestamp: &str,
    action: &str,
    payload: &Value,
) -> Result<String> {
    ActionSigner::new().sign(key, id, timestamp, action, payload)
}

/// Recompute and compare in constant time.
pub fn verify_action(
    key: &[u8],
    signature: &str,
    id: &str,
    timestamp: &str,
    action: &str,
    payload: &Value,
) -> bool {
    ActionSigner::new().verify(key, signature, id, timestamp, action, payload)
}

/// Signs and verifies action requests over an injected [`CryptoProvider`].
#[derive(Debug, Clone, Default)]
pub struct ActionSigner<P = RingCrypto> {
    provider: P,
}

impl ActionSigner<RingCrypto> {
    pub fn new() -> Self {
        Self::with_provider(RingCrypto)
    }
}

impl<P: CryptoProvider> ActionSigner<P> {
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    pub fn build_signing_string(
        &self,
        id: &str,
        timestamp: &str,
        action: &str,
        payload: &Value,
    ) -> Result<String> {
        check_component("id", id)?;
        check_component("timestamp", timestamp)?;
        check_component("action", action)?;

        let body = canonicalize(payload)?;
        let digest = hash_bytes(&self.provider, &body);
        Ok(format!("{id}|{timestamp}|{action}|{digest}"))
    }

    #[instrument(skip_all, fields(%id, %action))]
    pub fn sign(
        &self,
        key: &[u8],
        id: &str,
        timestamp: &str,
        action: &str,
        payload: &Value,
    ) -> Result<String> {
        if key.is_empty() {
            return Err(WitnessError::InvalidKey("action signing key must not be empty".into()));
        }
        let signing_string = self.build_signing_string(id, timestamp, action, payload)?;
        debug!("action request signed");
        Ok(hmac_hex(&self.provider, key, signing_string.as_bytes()))
    }

    #[instrument(skip_all, fields(%id, %action))]
    pub fn verify(
        &self,
        key: &[u8],
        signature: &str,
        id: &str,
        timestamp: &str,
        action: &str,
        payload: &Value,
    ) -> bool {
        if key.is_empty() {
            warn!("empty action verification key");
            return false;
        }
        let signing_string = match self.build_signing_string(id, timestamp, action, payload) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "action request cannot be verified");
                return false;
            }
        };

        let expected = hmac_hex(&self.provider, key, signing_string.as_bytes());
        let valid = constant_time_str_eq(&expected, &signature.to_ascii_lowercase());
        if valid {
            debug!("action request verified");
        } else {
            warn!("action request signature mismatch");
        }
        valid
    }

    /// Sign `request` in place, replacing any previous signature.
    pub fn sign_request(&self, key: &[u8], request: &mut ActionRequest) -> Result<()> {
        let signature = self.sign(
            key,
            &request.id,
            &request.timestamp,
            &request.action,
            &request.payload,
        )?;
        request.signature = Some(signature);
        Ok(())
    }

    /// Check a received request.  Unsigned requests are never valid.
    pub fn verify_request(&self, key: &[u8], request: &ActionRequest) -> bool {
        let Some(signature) = request.signature.as_deref() else {
            warn!(id = %request.id, "action request carries no signature");
            return false;
        };
        self.verify(
            key,
            signature,
            &request.id,
            &request.timestamp,
            &request.action,
            &request.payload,
        )
    }
}

fn check_component(field: &'static str, value: &str) -> Result<()> {
    if value.contains(SIGNING_FIELD_SEPARATOR) {
        return Err(WitnessError::InvalidSigningField {
            field,
            value: value.to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const KEY: [u8; 32] = [0xAA; 32];
    const ID: &str = "req-1";
    const TS: &str = "2025-01-01T00:00:00.000Z";
    const ACTION: &str = "email.fetch";

    /// sha256hex(`{"folder":"INBOX"}`), computed independently.
    const INBOX_DIGEST: &str = "2304da4d2b514da88c48872252a78519ac6bc48a48e142ed86b5c523667ecd37";

    /// HMAC-SHA256(0xAA * 32, signing string), computed independently.
    const INBOX_SIGNATURE: &str =
        "739cf5a689c20a34244d32bf687de8a11629c2831e702b0ff98dda5706e95e15";

    fn inbox() -> Value {
        json!({"folder": "INBOX"})
    }

    #[test]
    fn signing_string_reference_vector() {
        let signing_string = build_signing_string(ID, TS, ACTION, &inbox()).unwrap();
        assert_eq!(
            signing_string,
            format!("req-1|2025-01-01T00:00:00.000Z|email.fetch|{INBOX_DIGEST}")
        );
        assert_eq!(
            signing_string,
            format!(
                "req-1|2025-01-01T00:00:00.000Z|email.fetch|{}",
                hash_bytes(&RingCrypto, br#"{"folder":"INBOX"}"#)
            )
        );
    }

    #[test]
    fn signature_reference_vector() {
        let signature = sign_action(&KEY, ID, TS, ACTION, &inbox()).unwrap();
        assert_eq!(signature, INBOX_SIGNATURE);

        let signing_string = build_signing_string(ID, TS, ACTION, &inbox()).unwrap();
        assert_eq!(signature, hmac_hex(&RingCrypto, &KEY, signing_string.as_bytes()));
    }

    #[test]
    fn round_trip() {
        let signature = sign_action(&KEY, ID, TS, ACTION, &inbox()).unwrap();
        assert!(verify_action(&KEY, &signature, ID, TS, ACTION, &inbox()));
    }

    #[test]
    fn changed_payload_fails() {
        let signature = sign_action(&KEY, ID, TS, ACTION, &inbox()).unwrap();
        assert!(!verify_action(
            &KEY,
            &signature,
            ID,
            TS,
            ACTION,
            &json!({"folder": "SENT"})
        ));
    }

    #[test]
    fn changed_envelope_fields_fail() {
        let signature = sign_action(&KEY, ID, TS, ACTION, &inbox()).unwrap();
        assert!(!verify_action(&KEY, &signature, "req-2", TS, ACTION, &inbox()));
        assert!(!verify_action(
            &KEY,
            &signature,
            ID,
            "2025-01-01T00:00:00.001Z",
            ACTION,
            &inbox()
        ));
        assert!(!verify_action(&KEY, &signature, ID, TS, "email.send", &inbox()));
        assert!(!verify_action(&[0xAB; 32], &signature, ID, TS, ACTION, &inbox()));
    }

    #[test]
    fn deterministic() {
        let a = sign_action(&KEY, ID, TS, ACTION, &inbox()).unwrap();
        let b = sign_action(&KEY, ID, TS, ACTION, &inbox()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn payload_key_order_does_not_matter() {
        let a = sign_action(&KEY, ID, TS, ACTION, &json!({"a": 1, "b": [1, 2]})).unwrap();
        let b = sign_action(&KEY, ID, TS, ACTION, &json!({"b": [1, 2], "a": 1})).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn separator_in_component_is_refused() {
        // Without the check these two would share "a|b|c|d|<digest>".
        let err = sign_action(&KEY, "a|b", "c", "d", &inbox()).unwrap_err();
        assert!(matches!(
            err,
            WitnessError::InvalidSigningField { field: "id", .. }
        ));
        assert!(sign_action(&KEY, "a", "b|c", "d", &inbox()).is_err());
        assert!(sign_action(&KEY, "a", "b", "c|d", &inbox()).is_err());

        let signature = sign_action(&KEY, "a", "b", "c", &inbox()).unwrap();
        assert!(!verify_action(&KEY, &signature, "a|", "b", "c", &inbox()));
    }

    #[test]
    fn empty_key() {
        assert!(matches!(
            sign_action(&[], ID, TS, ACTION, &inbox()),
            Err(WitnessError::InvalidKey(_))
        ));
        assert!(!verify_action(&[], INBOX_SIGNATURE, ID, TS, ACTION, &inbox()));
    }

    #[test]
    fn garbage_signature_is_false() {
        assert!(!verify_action(&KEY, "", ID, TS, ACTION, &inbox()));
        assert!(!verify_action(&KEY, "zz", ID, TS, ACTION, &inbox()));
        assert!(verify_action(
            &KEY,
            &INBOX_SIGNATURE.to_ascii_uppercase(),
            ID,
            TS,
            ACTION,
            &inbox()
        ));
    }

    #[test]
    fn request_envelope_round_trip() {
        let signer = ActionSigner::new();
        let mut request = ActionRequest::new(ACTION, inbox());
        assert!(!signer.verify_request(&KEY, &request));

        signer.sign_request(&KEY, &mut request).unwrap();
        assert!(signer.verify_request(&KEY, &request));

        let wire = serde_json::to_string(&request).unwrap();
        let mut received: ActionRequest = serde_json::from_str(&wire).unwrap();
        assert!(signer.verify_request(&KEY, &received));

        received.payload = json!({"folder": "SENT"});
        assert!(!signer.verify_request(&KEY, &received));
    }
}
