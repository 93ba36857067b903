// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Witness attestations.
//
// Field names and wire strings in this module are load-bearing: attestations
// produced by other implementations must deserialize and hash identically.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Prefix that marks a verification method as naming a local device.
pub const DEVICE_PREFIX: &str = "device:";

/// Render a timestamp the way every Witness wire field expects it:
/// RFC 3339, millisecond precision, `Z` suffix.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ---------------------------------------------------------------------------
// Proofs
// ---------------------------------------------------------------------------

/// Algorithm selector carried in `proof.type`.
///
/// Unrecognised tags are kept verbatim in [`ProofType::Unsupported`] rather
/// than failing deserialization, so that verifying an attestation from a
/// newer producer yields a clean "unsupported algorithm" result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProofType {
    /// Ed25519 detached signature over the canonical hash.
    AsymmetricDetachedSignature,
    /// HMAC-SHA256 over the canonical hash.
    SymmetricKeyedMac,
    /// Any tag this version does not implement.
    Unsupported(String),
}

impl ProofType {
    /// Wire string for this proof type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::AsymmetricDetachedSignature => "AsymmetricDetachedSignature",
            Self::SymmetricKeyedMac => "SymmetricKeyedMac",
            Self::Unsupported(tag) => tag,
        }
    }

    /// Human-facing primitive name (used in registry records).
    pub fn algorithm_name(&self) -> &str {
        match self {
            Self::AsymmetricDetachedSignature => "Ed25519",
            Self::SymmetricKeyedMac => "HMAC-SHA256",
            Self::Unsupported(tag) => tag,
        }
    }
}

impl From<String> for ProofType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "AsymmetricDetachedSignature" => Self::AsymmetricDetachedSignature,
            "SymmetricKeyedMac" => Self::SymmetricKeyedMac,
            _ => Self::Unsupported(tag),
        }
    }
}

impl From<ProofType> for String {
    fn from(proof_type: ProofType) -> Self {
        match proof_type {
            ProofType::Unsupported(tag) => tag,
            other => other.as_str().to_owned(),
        }
    }
}

impl std::fmt::Display for ProofType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The proof block attached to every attestation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proof {
    #[serde(rename = "type")]
    pub proof_type: ProofType,
    /// Hex-encoded signature or MAC.
    pub proof_value: String,
    /// `"device:<deviceId>"` for device-held keys.
    pub verification_method: String,
    /// ISO-8601 creation time claimed by the signer.
    pub created: String,
}

impl Proof {
    /// Device id named by `verification_method`, if it carries the
    /// `device:` prefix.  Pure string parse; nothing is resolved.
    pub fn signer_device(&self) -> Option<&str> {
        self.verification_method.strip_prefix(DEVICE_PREFIX)
    }
}

/// A structured payload together with the proof over its canonical hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedAttestation {
    pub payload: Value,
    pub proof: Proof,
}

// ---------------------------------------------------------------------------
// Devices
// ---------------------------------------------------------------------------

/// Opaque name of a signing device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceIdentity(String);

impl DeviceIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `"device:<id>"`, the form stored in `proof.verificationMethod`.
    pub fn verification_method(&self) -> String {
        format!("{DEVICE_PREFIX}{}", self.0)
    }

    /// Inverse of [`verification_method`](Self::verification_method).
    pub fn from_verification_method(method: &str) -> Option<Self> {
        method.strip_prefix(DEVICE_PREFIX).map(Self::new)
    }
}

impl std::fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Witness payloads
// ---------------------------------------------------------------------------

/// Field names of a witness payload, in schema order.
///
/// [`WitnessPayload::to_value`] is the only place these are turned into a
/// signable value, and both the builder and the verifier go through it.
pub const WITNESS_FIELDS: [&str; 7] = [
    "@context",
    "@type",
    "action",
    "autonomyTier",
    "device",
    "auditEntryId",
    "createdAt",
];

/// The fixed-schema payload wrapped by a witness attestation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessPayload {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@type")]
    pub type_tag: String,
    pub action: String,
    #[serde(rename = "autonomyTier")]
    pub autonomy_tier: String,
    pub device: String,
    #[serde(rename = "auditEntryId")]
    pub audit_entry_id: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl WitnessPayload {
    /// Field values in [`WITNESS_FIELDS`] order.
    pub fn field_values(&self) -> [&str; 7] {
        [
            &self.context,
            &self.type_tag,
            &self.action,
            &self.autonomy_tier,
            &self.device,
            &self.audit_entry_id,
            &self.created_at,
        ]
    }

    /// The structured value whose canonical hash is signed.
    pub fn to_value(&self) -> Value {
        let mut map = Map::with_capacity(WITNESS_FIELDS.len());
        for (name, value) in WITNESS_FIELDS.iter().zip(self.field_values()) {
            map.insert((*name).to_owned(), Value::String(value.to_owned()));
        }
        Value::Object(map)
    }
}

/// Wire form of a witness: the payload fields flattened alongside `proof`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessAttestation {
    #[serde(flatten)]
    pub payload: WitnessPayload,
    pub proof: Proof,
}

impl WitnessAttestation {
    /// Re-wrap as a generic [`SignedAttestation`] over the reconstructed
    /// payload.
    pub fn to_signed(&self) -> SignedAttestation {
        SignedAttestation {
            payload: self.payload.to_value(),
            proof: self.proof.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Verification outcome
// ---------------------------------------------------------------------------

/// Why a verification came back invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum VerificationFailure {
    #[error("unsupported proof type: {tag}")]
    UnsupportedProofType { tag: String },

    #[error("proof value is not well-formed")]
    MalformedProofValue,

    #[error("verification key is unusable for this proof type")]
    InvalidKey,

    #[error("payload could not be canonicalized: {reason}")]
    Canonicalization { reason: String },

    #[error("signature does not match payload")]
    Mismatch,
}

/// Result of checking an attestation.
///
/// `timestamp` always echoes `proof.created`, even when `valid` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub valid: bool,
    pub signer_device: Option<String>,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<VerificationFailure>,
}

impl VerificationResult {
    pub fn valid(proof: &Proof) -> Self {
        Self {
            valid: true,
            signer_device: proof.signer_device().map(str::to_owned),
            timestamp: proof.created.clone(),
            failure: None,
        }
    }

    pub fn invalid(proof: &Proof, failure: VerificationFailure) -> Self {
        Self {
            valid: false,
            signer_device: proof.signer_device().map(str::to_owned),
            timestamp: proof.created.clone(),
            failure: Some(failure),
        }
    }
}

// ---------------------------------------------------------------------------
// Inter-process action requests
// ---------------------------------------------------------------------------

/// A request envelope exchanged between the two local processes.
///
/// `signature` is the hex HMAC over the request's signing string; it is
/// `None` until the sender signs the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub id: String,
    pub timestamp: String,
    pub action: String,
    pub payload: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl ActionRequest {
    /// Create an unsigned request with a fresh UUIDv4 id and the current time.
    pub fn new(action: impl Into<String>, payload: Value) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: format_timestamp(Utc::now()),
            action: action.into(),
            payload,
            signature: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn proof(method: &str) -> Proof {
        Proof {
            proof_type: ProofType::SymmetricKeyedMac,
            proof_value: "00".into(),
            verification_method: method.into(),
            created: "2025-01-01T00:00:00.000Z".into(),
        }
    }

    #[test]
    fn signer_device_from_prefix() {
        assert_eq!(proof("device:abc123").signer_device(), Some("abc123"));
        assert_eq!(proof("not-a-device").signer_device(), None);
    }

    #[test]
    fn device_identity_round_trip() {
        let device = DeviceIdentity::new("dev1");
        assert_eq!(device.verification_method(), "device:dev1");
        assert_eq!(
            DeviceIdentity::from_verification_method("device:dev1"),
            Some(device)
        );
        assert_eq!(DeviceIdentity::from_verification_method("key:dev1"), None);
    }

    #[test]
    fn proof_wire_shape() {
        let json = serde_json::to_value(proof("device:d")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "SymmetricKeyedMac",
                "proofValue": "00",
                "verificationMethod": "device:d",
                "created": "2025-01-01T00:00:00.000Z",
            })
        );
    }

    #[test]
    fn unknown_proof_type_survives_deserialization() {
        let parsed: Proof = serde_json::from_value(serde_json::json!({
            "type": "BbsBlsSignature",
            "proofValue": "",
            "verificationMethod": "device:d",
            "created": "t",
        }))
        .unwrap();
        assert_eq!(
            parsed.proof_type,
            ProofType::Unsupported("BbsBlsSignature".into())
        );
        // Re-serializes verbatim.
        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["type"], "BbsBlsSignature");
    }

    #[test]
    fn witness_serde_matches_signed_value() {
        let payload = WitnessPayload {
            context: "ctx".into(),
            type_tag: "T".into(),
            action: "email.send".into(),
            autonomy_tier: "partner".into(),
            device: "device:dev1".into(),
            audit_entry_id: "audit-42".into(),
            created_at: "2025-01-01T00:00:00.000Z".into(),
        };
        // The serde field names and WITNESS_FIELDS must never drift apart.
        assert_eq!(serde_json::to_value(&payload).unwrap(), payload.to_value());

        let keys: Vec<_> = payload
            .to_value()
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        let mut expected: Vec<_> = WITNESS_FIELDS.iter().map(|s| s.to_string()).collect();
        expected.sort();
        let mut keys_sorted = keys;
        keys_sorted.sort();
        assert_eq!(keys_sorted, expected);
    }

    #[test]
    fn witness_attestation_is_flat_on_the_wire() {
        let attestation = WitnessAttestation {
            payload: WitnessPayload {
                context: "ctx".into(),
                type_tag: "T".into(),
                action: "a".into(),
                autonomy_tier: "guardian".into(),
                device: "device:d".into(),
                audit_entry_id: "1".into(),
                created_at: "t".into(),
            },
            proof: proof("device:d"),
        };
        let json = serde_json::to_value(&attestation).unwrap();
        assert_eq!(json["action"], "a");
        assert_eq!(json["@context"], "ctx");
        assert!(json.get("payload").is_none());
        assert_eq!(json["proof"]["type"], "SymmetricKeyedMac");

        let back: WitnessAttestation = serde_json::from_value(json).unwrap();
        assert_eq!(back, attestation);
    }

    #[test]
    fn timestamps_use_millis_and_z() {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_timestamp(at), "2025-01-01T00:00:00.000Z");
    }

    #[test]
    fn invalid_result_still_echoes_timestamp() {
        let p = proof("device:abc");
        let result = VerificationResult::invalid(&p, VerificationFailure::Mismatch);
        assert!(!result.valid);
        assert_eq!(result.timestamp, "2025-01-01T00:00:00.000Z");
        assert_eq!(result.signer_device.as_deref(), Some("abc"));
    }

    #[test]
    fn new_action_request_is_unsigned() {
        let request = ActionRequest::new("email.fetch", serde_json::json!({"folder": "INBOX"}));
        assert!(request.signature.is_none());
        assert!(Uuid::parse_str(&request.id).is_ok());
        assert!(request.timestamp.ends_with('Z'));
    }
}
