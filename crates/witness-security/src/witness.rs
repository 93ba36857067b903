// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Witness envelope — fixed-schema attestations of autonomous actions.
//
// The builder and the verifier both turn a `WitnessPayload` into the signed
// value through `WitnessPayload::to_value`, which walks the shared
// `WITNESS_FIELDS` schema.  Verification rebuilds the payload from the
// attestation's own stored fields, so any post-hoc edit to one of them
// changes the canonical hash and the proof no longer matches.

use chrono::{DateTime, Utc};
use tracing::{debug, instrument};
use witness_bridge::{CryptoProvider, RingCrypto};
use witness_core::error::{Result, WitnessError};
use witness_core::{
    DeviceIdentity, VerificationResult, WitnessAttestation, WitnessConfig, WitnessPayload,
    format_timestamp,
};

use crate::signer::{AttestationSigner, sign_attestation};
use crate::verifier::SignatureVerifier;

/// Builds, signs, and verifies witness attestations.
#[derive(Debug, Clone, Default)]
pub struct WitnessEnvelope<P = RingCrypto> {
    config: WitnessConfig,
    verifier: SignatureVerifier<P>,
}

impl WitnessEnvelope<RingCrypto> {
    pub fn new(config: WitnessConfig) -> Self {
        Self::with_provider(config, RingCrypto)
    }
}

impl<P: CryptoProvider> WitnessEnvelope<P> {
    pub fn with_provider(config: WitnessConfig, provider: P) -> Self {
        Self {
            config,
            verifier: SignatureVerifier::new(provider),
        }
    }

    pub fn config(&self) -> &WitnessConfig {
        &self.config
    }

    /// Assemble a payload stamped with the current time.
    ///
    /// The result is not reproducible; use [`build_at`](Self::build_at) when
    /// the creation time must be controlled.
    pub fn build(
        &self,
        action: &str,
        autonomy_tier: &str,
        device: &str,
        audit_entry_id: &str,
    ) -> Result<WitnessPayload> {
        self.build_at(action, autonomy_tier, device, audit_entry_id, Utc::now())
    }

    /// Assemble a payload with an explicit creation time.
    ///
    /// Empty `action`, `autonomy_tier`, `device` or `audit_entry_id` is a
    /// caller bug and fails with [`WitnessError::MissingField`].
    pub fn build_at(
        &self,
        action: &str,
        autonomy_tier: &str,
        device: &str,
        audit_entry_id: &str,
        created_at: DateTime<Utc>,
    ) -> Result<WitnessPayload> {
        let required = [
            ("action", action),
            ("autonomyTier", autonomy_tier),
            ("device", device),
            ("auditEntryId", audit_entry_id),
        ];
        if let Some((field, _)) = required.into_iter().find(|(_, value)| value.is_empty()) {
            return Err(WitnessError::MissingField(field));
        }

        Ok(WitnessPayload {
            context: self.config.context.clone(),
            type_tag: self.config.type_tag.clone(),
            action: action.to_owned(),
            autonomy_tier: autonomy_tier.to_owned(),
            device: device.to_owned(),
            audit_entry_id: audit_entry_id.to_owned(),
            created_at: format_timestamp(created_at),
        })
    }

    /// Sign `payload` as `device`.  The proof's `created` mirrors the
    /// payload's `createdAt`.
    #[instrument(skip_all, fields(action = %payload.action, audit_entry_id = %payload.audit_entry_id))]
    pub fn sign<S: AttestationSigner + ?Sized>(
        &self,
        payload: WitnessPayload,
        signer: &S,
        device: &DeviceIdentity,
    ) -> Result<WitnessAttestation> {
        let signed = sign_attestation(
            self.verifier.provider(),
            signer,
            payload.to_value(),
            device,
            payload.created_at.clone(),
        )?;
        debug!("witness signed");
        Ok(WitnessAttestation {
            payload,
            proof: signed.proof,
        })
    }

    /// Reconstruct the signed payload from `attestation` and verify it.
    #[instrument(skip_all, fields(action = %attestation.payload.action))]
    pub fn verify(&self, attestation: &WitnessAttestation, key: &[u8]) -> VerificationResult {
        self.verifier.verify(&attestation.to_signed(), key)
    }
}
