// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the capabilities Witness consumes.

use witness_core::Proof;
use witness_core::error::Result;

/// Length of a SHA-256 digest and of an HMAC-SHA256 tag.
pub const DIGEST_LEN: usize = 32;

/// Length of an Ed25519 public key.
pub const ED25519_PUBLIC_KEY_LEN: usize = 32;

/// Length of an Ed25519 signature.
pub const ED25519_SIGNATURE_LEN: usize = 64;

/// Primitive hash, MAC, and signature operations.
///
/// Implementations must be stateless: every call depends only on its
/// arguments.
pub trait CryptoProvider: Send + Sync {
    /// SHA-256 of `data`.
    fn sha256(&self, data: &[u8]) -> [u8; DIGEST_LEN];

    /// HMAC-SHA256 of `data` under `key`.
    fn hmac_sha256(&self, key: &[u8], data: &[u8]) -> [u8; DIGEST_LEN];

    /// Check a detached Ed25519 signature.
    ///
    /// Wrong-length keys or signatures return `false`; this never panics.
    fn verify_ed25519(&self, message: &[u8], signature: &[u8], public_key: &[u8]) -> bool;
}

impl<P: CryptoProvider + ?Sized> CryptoProvider for &P {
    fn sha256(&self, data: &[u8]) -> [u8; DIGEST_LEN] {
        (**self).sha256(data)
    }

    fn hmac_sha256(&self, key: &[u8], data: &[u8]) -> [u8; DIGEST_LEN] {
        (**self).hmac_sha256(key, data)
    }

    fn verify_ed25519(&self, message: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
        (**self).verify_ed25519(message, signature, public_key)
    }
}

impl<P: CryptoProvider + ?Sized> CryptoProvider for Box<P> {
    fn sha256(&self, data: &[u8]) -> [u8; DIGEST_LEN] {
        (**self).sha256(data)
    }

    fn hmac_sha256(&self, key: &[u8], data: &[u8]) -> [u8; DIGEST_LEN] {
        (**self).hmac_sha256(key, data)
    }

    fn verify_ed25519(&self, message: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
        (**self).verify_ed25519(message, signature, public_key)
    }
}

/// An external trust registry that can vouch for attestations.
///
/// Registries only ever enrich an attestation after the fact.  Nothing in
/// verification may depend on one being reachable.
pub trait TrustRegistry: Send + Sync {
    /// Human-readable registry name.
    fn registry_name(&self) -> &str;

    /// Whether the registry can currently be queried.
    fn is_available(&self) -> bool;

    /// Reference under which the registry knows this proof, if any.
    fn registry_ref(&self, proof: &Proof) -> Result<Option<String>>;
}
