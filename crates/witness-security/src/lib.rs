// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! witness-security — attestation and action-signing primitives.
//!
//! Everything here is a pure, synchronous function of its inputs: canonical
//! encoding, constant-time comparison, dual-algorithm proof verification,
//! the witness envelope round trip, and HMAC request signing between two
//! local processes.  Hash, MAC and signature primitives come from an
//! injected `witness_bridge::CryptoProvider`.

pub mod action;
pub mod canonical;
pub mod compare;
pub mod integrity;
pub mod registry;
pub mod signer;
pub mod verifier;
pub mod witness;

pub use action::{ActionSigner, build_signing_string, sign_action, verify_action};
pub use canonical::{
    canonical_hash, canonical_hash_hex, canonical_number, canonicalize, canonicalize_to_string,
};
pub use compare::{constant_time_eq, constant_time_str_eq};
pub use integrity::hash_bytes;
pub use registry::{RegistryRecord, RegistryStatus, format_for_registry, is_registry_available};
pub use signer::{AttestationSigner, Ed25519Signer, HmacSigner, sign_attestation};
pub use verifier::{SignatureVerifier, verify_attestation};
pub use witness::WitnessEnvelope;
