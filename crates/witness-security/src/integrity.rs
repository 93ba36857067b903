// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Hex-facing digest helpers over an injected crypto provider.

use witness_bridge::CryptoProvider;

/// Compute the SHA-256 hash of `data` and return it as a lowercase hex string.
pub fn hash_bytes<P: CryptoProvider + ?Sized>(provider: &P, data: &[u8]) -> String {
    hex::encode(provider.sha256(data))
}

/// Compute HMAC-SHA256 of `data` under `key` as a lowercase hex string.
pub fn hmac_hex<P: CryptoProvider + ?Sized>(provider: &P, key: &[u8], data: &[u8]) -> String {
    hex::encode(provider.hmac_sha256(key, data))
}

/// Decode a hex string (either case, optional `0x` prefix).
///
/// Returns `None` for odd lengths or non-hex characters.
pub fn decode_hex(s: &str) -> Option<Vec<u8>> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use witness_bridge::RingCrypto;

    /// SHA-256 of the empty byte slice (well-known constant).
    const EMPTY_SHA256: &str =
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn hash_empty_input() {
        assert_eq!(hash_bytes(&RingCrypto, b""), EMPTY_SHA256);
    }

    #[test]
    fn hmac_hex_is_lowercase_64_chars() {
        let mac = hmac_hex(&RingCrypto, b"key", b"data");
        assert_eq!(mac.len(), 64);
        assert!(mac.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn decode_hex_variants() {
        assert_eq!(decode_hex("00ff"), Some(vec![0x00, 0xff]));
        assert_eq!(decode_hex("00FF"), Some(vec![0x00, 0xff]));
        assert_eq!(decode_hex("0x0a"), Some(vec![0x0a]));
        assert_eq!(decode_hex(""), Some(vec![]));
        assert_eq!(decode_hex("abc"), None);
        assert_eq!(decode_hex("zz"), None);
    }
}
