// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Constant-time equality for MAC- and signature-derived values.
//
// Only a length mismatch returns early.  Content is compared with `subtle`
// so the running time does not depend on where the inputs first differ.
// Not for general string comparison.

use subtle::ConstantTimeEq;

/// Compare two secret-derived byte strings in constant time.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// [`constant_time_eq`] over the UTF-8 bytes of two strings (hex digests).
#[must_use]
pub fn constant_time_str_eq(a: &str, b: &str) -> bool {
    constant_time_eq(a.as_bytes(), b.as_bytes())
}
