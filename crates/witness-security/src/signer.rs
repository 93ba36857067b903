// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Attestation signers — the producing side of the verifier.
//
// Key material is supplied by the caller.  Nothing here provisions, stores,
// or rotates keys; `Ed25519Signer` only parses a PKCS#8 document the host
// already holds (e.g. from the platform keychain).

use ring::signature::{Ed25519KeyPair, KeyPair};
use serde_json::Value;
use tracing::{debug, instrument};
use witness_bridge::traits::DIGEST_LEN;
use witness_bridge::{CryptoProvider, RingCrypto};
use witness_core::error::{Result, WitnessError};
use witness_core::{DeviceIdentity, Proof, ProofType, SignedAttestation};

use crate::canonical::canonical_hash;
use crate::verifier::mac_message;

/// Something that can produce a proof over a canonical hash.
pub trait AttestationSigner {
    /// The `proof.type` this signer produces.
    fn proof_type(&self) -> ProofType;

    /// Raw signature or MAC bytes over `hash`.
    fn sign_hash(&self, hash: &[u8; DIGEST_LEN]) -> Result<Vec<u8>>;
}

/// Canonicalize `payload`, sign its hash, and attach the proof.
///
/// `created` is copied into `proof.created` verbatim.
#[instrument(skip_all, fields(proof_type = %signer.proof_type(), device = %device))]
pub fn sign_attestation<P, S>(
    provider: &P,
    signer: &S,
    payload: Value,
    device: &DeviceIdentity,
    created: impl Into<String>,
) -> Result<SignedAttestation>
where
    P: CryptoProvider + ?Sized,
    S: AttestationSigner + ?Sized,
{
    let hash = canonical_hash(provider, &payload)?;
    let proof_value = hex::encode(signer.sign_hash(&hash)?);

    debug!("attestation signed");
    Ok(SignedAttestation {
        payload,
        proof: Proof {
            proof_type: signer.proof_type(),
            proof_value,
            verification_method: device.verification_method(),
            created: created.into(),
        },
    })
}

// ---------------------------------------------------------------------------
// Keyed MAC
// ---------------------------------------------------------------------------

/// HMAC-SHA256 signer holding a shared secret.
pub struct HmacSigner<P = RingCrypto> {
    key: Vec<u8>,
    provider: P,
}

impl HmacSigner<RingCrypto> {
    /// Create a signer with the native provider.  Empty keys are rejected.
    pub fn new(key: impl Into<Vec<u8>>) -> Result<Self> {
        Self::with_provider(key, RingCrypto)
    }
}

impl<P: CryptoProvider> HmacSigner<P> {
    pub fn with_provider(key: impl Into<Vec<u8>>, provider: P) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(WitnessError::InvalidKey("HMAC key must not be empty".into()));
        }
        Ok(Self { key, provider })
    }
}

impl<P: CryptoProvider> AttestationSigner for HmacSigner<P> {
    fn proof_type(&self) -> ProofType {
        ProofType::SymmetricKeyedMac
    }

    fn sign_hash(&self, hash: &[u8; DIGEST_LEN]) -> Result<Vec<u8>> {
        let message = mac_message(hash);
        Ok(self.provider.hmac_sha256(&self.key, message.as_bytes()).to_vec())
    }
}

impl<P> std::fmt::Debug for HmacSigner<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSigner")
            .field("key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Ed25519
// ---------------------------------------------------------------------------

/// Ed25519 signer backed by `ring`.
pub struct Ed25519Signer {
    key_pair: Ed25519KeyPair,
}

impl Ed25519Signer {
    /// Load a key pair from a PKCS#8 v2 DER document.
    pub fn from_pkcs8(pkcs8_der: &[u8]) -> Result<Self> {
        let key_pair = Ed25519KeyPair::from_pkcs8(pkcs8_der)
            .map_err(|e| WitnessError::InvalidKey(format!("Ed25519 PKCS#8 rejected: {e}")))?;
        Ok(Self { key_pair })
    }

    /// The 32-byte public key verifiers need.
    pub fn public_key(&self) -> &[u8] {
        self.key_pair.public_key().as_ref()
    }
}

impl AttestationSigner for Ed25519Signer {
    fn proof_type(&self) -> ProofType {
        ProofType::AsymmetricDetachedSignature
    }

    fn sign_hash(&self, hash: &[u8; DIGEST_LEN]) -> Result<Vec<u8>> {
        Ok(self.key_pair.sign(hash).as_ref().to_vec())
    }
}

impl std::fmt::Debug for Ed25519Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519Signer")
            .field("public_key", &hex::encode(self.public_key()))
            .finish_non_exhaustive()
    }
}
