// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Signature verification — algorithm dispatch on `proof.type`.
//
// Both algorithms cover h = SHA-256(canonicalize(payload)):
//   AsymmetricDetachedSignature  Ed25519 over the 32 raw bytes of h
//   SymmetricKeyedMac            HMAC-SHA256(key, hex(h))
//
// Verification is total.  Bad hex, wrong key lengths, unknown proof types
// and genuine mismatches all come back as `valid: false` with a failure
// reason; nothing here returns an error or panics.

use serde_json::Value;
use tracing::{debug, instrument, warn};
use witness_bridge::traits::{DIGEST_LEN, ED25519_PUBLIC_KEY_LEN, ED25519_SIGNATURE_LEN};
use witness_bridge::{CryptoProvider, RingCrypto};
use witness_core::{ProofType, SignedAttestation, VerificationFailure, VerificationResult};

use crate::canonical::canonical_hash;
use crate::compare::constant_time_str_eq;
use crate::integrity::{decode_hex, hmac_hex};

/// The message a keyed-MAC proof authenticates: the lowercase hex of the
/// canonical hash.
pub(crate) fn mac_message(hash: &[u8; DIGEST_LEN]) -> String {
    hex::encode(hash)
}

/// Verify an attestation with the native crypto provider.
pub fn verify_attestation(attestation: &SignedAttestation, key: &[u8]) -> VerificationResult {
    SignatureVerifier::new(RingCrypto).verify(attestation, key)
}

/// Stateless verifier over an injected [`CryptoProvider`].
#[derive(Debug, Clone, Default)]
pub struct SignatureVerifier<P = RingCrypto> {
    provider: P,
}

impl<P: CryptoProvider> SignatureVerifier<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Check `attestation` against `key`.
    ///
    /// `key` is the 32-byte Ed25519 public key for asymmetric proofs, or the
    /// shared secret for keyed-MAC proofs.
    #[instrument(
        skip_all,
        fields(
            proof_type = %attestation.proof.proof_type,
            method = %attestation.proof.verification_method,
        )
    )]
    pub fn verify(&self, attestation: &SignedAttestation, key: &[u8]) -> VerificationResult {
        let proof = &attestation.proof;
        match self.check(attestation, key) {
            Ok(()) => {
                debug!("attestation verified");
                VerificationResult::valid(proof)
            }
            Err(failure) => {
                warn!(%failure, "attestation rejected");
                VerificationResult::invalid(proof, failure)
            }
        }
    }

    fn check(
        &self,
        attestation: &SignedAttestation,
        key: &[u8],
    ) -> Result<(), VerificationFailure> {
        let proof = &attestation.proof;
        match &proof.proof_type {
            ProofType::AsymmetricDetachedSignature => {
                let hash = self.payload_hash(&attestation.payload)?;
                self.check_signature(&hash, &proof.proof_value, key)
            }
            ProofType::SymmetricKeyedMac => {
                let hash = self.payload_hash(&attestation.payload)?;
                self.check_mac(&hash, &proof.proof_value, key)
            }
            ProofType::Unsupported(tag) => {
                Err(VerificationFailure::UnsupportedProofType { tag: tag.clone() })
            }
        }
    }

    fn payload_hash(&self, payload: &Value) -> Result<[u8; DIGEST_LEN], VerificationFailure> {
        canonical_hash(&self.provider, payload).map_err(|e| VerificationFailure::Canonicalization {
            reason: e.to_string(),
        })
    }

    fn check_signature(
        &self,
        hash: &[u8; DIGEST_LEN],
        proof_value: &str,
        public_key: &[u8],
    ) -> Result<(), VerificationFailure> {
        let signature = decode_hex(proof_value).ok_or(VerificationFailure::MalformedProofValue)?;
        if signature.len() != ED25519_SIGNATURE_LEN {
            return Err(VerificationFailure::MalformedProofValue);
        }
        if public_key.len() != ED25519_PUBLIC_KEY_LEN {
            return Err(VerificationFailure::InvalidKey);
        }
        if self.provider.verify_ed25519(hash, &signature, public_key) {
            Ok(())
        } else {
            Err(VerificationFailure::Mismatch)
        }
    }

    fn check_mac(
        &self,
        hash: &[u8; DIGEST_LEN],
        proof_value: &str,
        key: &[u8],
    ) -> Result<(), VerificationFailure> {
        if key.is_empty() {
            return Err(VerificationFailure::InvalidKey);
        }
        let expected = hmac_hex(&self.provider, key, mac_message(hash).as_bytes());
        let presented = proof_value.to_ascii_lowercase();
        if constant_time_str_eq(&expected, &presented) {
            Ok(())
        } else {
            Err(VerificationFailure::Mismatch)
        }
    }
}
