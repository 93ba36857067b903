// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub registry for builds where no trust-registry service exists.
//
// Every query returns `PlatformUnavailable`; `is_available` is always false.

use witness_core::Proof;
use witness_core::error::{Result, WitnessError};

use crate::traits::TrustRegistry;

/// No-op registry returned until a real registry is wired in.
pub struct UnavailableRegistry;

impl TrustRegistry for UnavailableRegistry {
    fn registry_name(&self) -> &str {
        "unavailable (stub)"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn registry_ref(&self, _proof: &Proof) -> Result<Option<String>> {
        tracing::warn!("TrustRegistry::registry_ref called on stub registry");
        Err(WitnessError::PlatformUnavailable)
    }
}
