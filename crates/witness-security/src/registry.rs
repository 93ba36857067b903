// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Registry bridge — optional trust-registry metadata for witness attestations.
//
// Formatting for a registry is an enrichment step after the fact.  It is
// never consulted by verification.

use serde::Serialize;
use tracing::warn;
use witness_bridge::{TrustRegistry, trust_registry};
use witness_core::WitnessAttestation;

/// Registry standing of an attestation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryStatus {
    /// No registry could be asked.
    Unavailable,
    /// The registry knows the attestation.
    Registered,
    /// The registry was asked and does not know it.
    Unregistered,
}

/// An attestation plus the fields a trust registry expects.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryRecord {
    #[serde(flatten)]
    pub attestation: WitnessAttestation,
    pub registry_ref: Option<String>,
    pub registry_status: RegistryStatus,
    pub signature_algorithm: String,
}

/// Whether a trust registry is reachable in this build.
///
/// Always false until a real registry exists.  This is a capability flag,
/// not an error.
pub fn is_registry_available() -> bool {
    trust_registry().is_available()
}

/// Format `attestation` for the build's trust registry.
pub fn format_for_registry(attestation: &WitnessAttestation) -> RegistryRecord {
    format_with_registry(trust_registry().as_ref(), attestation)
}

/// Format `attestation` against a specific registry.
pub fn format_with_registry<R: TrustRegistry + ?Sized>(
    registry: &R,
    attestation: &WitnessAttestation,
) -> RegistryRecord {
    let (registry_ref, registry_status) = if !registry.is_available() {
        (None, RegistryStatus::Unavailable)
    } else {
        match registry.registry_ref(&attestation.proof) {
            Ok(Some(reference)) => (Some(reference), RegistryStatus::Registered),
            Ok(None) => (None, RegistryStatus::Unregistered),
            Err(e) => {
                warn!(registry = registry.registry_name(), error = %e, "registry lookup failed");
                (None, RegistryStatus::Unavailable)
            }
        }
    };

    RegistryRecord {
        attestation: attestation.clone(),
        registry_ref,
        registry_status,
        signature_algorithm: attestation.proof.proof_type.algorithm_name().to_owned(),
    }
}
