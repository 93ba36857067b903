// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Witness envelope configuration.

use serde::{Deserialize, Serialize};

/// Default JSON-LD style context stamped into new witness payloads.
pub const DEFAULT_WITNESS_CONTEXT: &str = "https://semblance.run/witness/v1";

/// Default type tag stamped into new witness payloads.
pub const DEFAULT_WITNESS_TYPE: &str = "SemblanceWitness";

/// Settings for building witness payloads.
///
/// Only the builder reads these.  Verification always reconstructs the
/// payload from the values stored on the attestation itself, so changing the
/// configuration never invalidates previously issued attestations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WitnessConfig {
    /// Value written to the `@context` field.
    pub context: String,
    /// Value written to the `@type` field.
    pub type_tag: String,
}

impl Default for WitnessConfig {
    fn default() -> Self {
        Self {
            context: DEFAULT_WITNESS_CONTEXT.to_owned(),
            type_tag: DEFAULT_WITNESS_TYPE.to_owned(),
        }
    }
}
