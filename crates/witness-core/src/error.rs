// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Witness.
//
// Verification never returns these: a bad attestation is a normal `valid:
// false` outcome.  Errors are reserved for encoding failures and caller bugs
// on the producing side.

use thiserror::Error;

/// Top-level error type for all Witness operations.
#[derive(Debug, Error)]
pub enum WitnessError {
    // -- Canonical encoding --
    #[error("non-finite number cannot be canonicalized")]
    NonFiniteNumber,

    #[error("canonicalization failed: {0}")]
    Canonicalization(String),

    // -- Payload construction --
    #[error("required field `{0}` is missing or empty")]
    MissingField(&'static str),

    #[error("signing field `{field}` must not contain '|': {value:?}")]
    InvalidSigningField { field: &'static str, value: String },

    // -- Keys and signatures --
    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("invalid hex encoding: {0}")]
    InvalidHex(String),

    // -- Serialization --
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("capability not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, WitnessError>;
