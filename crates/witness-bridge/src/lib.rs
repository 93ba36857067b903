// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Witness — platform capability abstractions.
//!
//! The attestation code never reaches for hash, MAC, or signature primitives
//! directly.  It receives a [`traits::CryptoProvider`] and, optionally, a
//! [`traits::TrustRegistry`], so that hosts can swap in hardware-backed or
//! deterministic test implementations.

pub mod native;
pub mod stub;
pub mod traits;

pub use native::RingCrypto;
pub use stub::UnavailableRegistry;
pub use traits::{CryptoProvider, TrustRegistry};

/// The crypto provider used when the caller does not inject one.
///
/// RETURNS: `sha2` for hashing and `ring` for HMAC and Ed25519.
pub fn crypto_provider() -> Box<dyn CryptoProvider> {
    Box::new(RingCrypto)
}

/// The trust registry for this build.
///
/// No registry service exists yet, so this is always the unavailable stub.
/// Callers must treat [`TrustRegistry::is_available`] as a capability flag.
pub fn trust_registry() -> Box<dyn TrustRegistry> {
    Box::new(UnavailableRegistry)
}
