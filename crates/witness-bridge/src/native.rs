// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Native crypto provider — SHA-256 via `sha2`, HMAC-SHA256 and Ed25519
// verification via `ring`.

use ring::hmac;
use ring::signature::{ED25519, UnparsedPublicKey};
use sha2::{Digest, Sha256};

use crate::traits::{CryptoProvider, DIGEST_LEN, ED25519_PUBLIC_KEY_LEN, ED25519_SIGNATURE_LEN};

/// Software crypto provider available on every target.
#[derive(Debug, Clone, Copy, Default)]
pub struct RingCrypto;

impl CryptoProvider for RingCrypto {
    fn sha256(&self, data: &[u8]) -> [u8; DIGEST_LEN] {
        Sha256::digest(data).into()
    }

    fn hmac_sha256(&self, key: &[u8], data: &[u8]) -> [u8; DIGEST_LEN] {
        let key = hmac::Key::new(hmac::HMAC_SHA256, key);
        let tag = hmac::sign(&key, data);
        let mut out = [0u8; DIGEST_LEN];
        out.copy_from_slice(tag.as_ref());
        out
    }

    fn verify_ed25519(&self, message: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
        if public_key.len() != ED25519_PUBLIC_KEY_LEN || signature.len() != ED25519_SIGNATURE_LEN {
            return false;
        }
        UnparsedPublicKey::new(&ED25519, public_key)
            .verify(message, signature)
            .is_ok()
    }
}
