// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Random non-matching keys must never verify.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use ring::rand::{SecureRandom, SystemRandom};
use ring::signature::Ed25519KeyPair;
use serde_json::json;
use witness_bridge::RingCrypto;
use witness_core::DeviceIdentity;
use witness_security::{Ed25519Signer, HmacSigner, sign_attestation, verify_attestation};

const TRIALS: usize = 10_000;

fn random_key(rng: &SystemRandom) -> [u8; 32] {
    let mut key = [0u8; 32];
    rng.fill(&mut key).expect("rng");
    key
}

#[test]
fn random_mac_keys_never_verify() {
    let rng = SystemRandom::new();
    let key = random_key(&rng);
    let signer = HmacSigner::new(key.to_vec()).unwrap();
    let attestation = sign_attestation(
        &RingCrypto,
        &signer,
        json!({"action": "email.send", "recipients": 3}),
        &DeviceIdentity::new("dev1"),
        "2025-01-01T00:00:00.000Z",
    )
    .unwrap();
    assert!(verify_attestation(&attestation, &key).valid);

    let false_positives = (0..TRIALS)
        .map(|_| random_key(&rng))
        .filter(|candidate| candidate != &key)
        .filter(|candidate| verify_attestation(&attestation, candidate).valid)
        .count();
    assert_eq!(false_positives, 0);
}

#[test]
fn random_public_keys_never_verify() {
    let rng = SystemRandom::new();
    let pkcs8 = Ed25519KeyPair::generate_pkcs8(&rng).expect("keygen");
    let signer = Ed25519Signer::from_pkcs8(pkcs8.as_ref()).unwrap();
    let attestation = sign_attestation(
        &RingCrypto,
        &signer,
        json!({"action": "files.delete", "path": "/tmp/x"}),
        &DeviceIdentity::new("dev1"),
        "2025-01-01T00:00:00.000Z",
    )
    .unwrap();
    assert!(verify_attestation(&attestation, signer.public_key()).valid);

    let false_positives = (0..TRIALS)
        .map(|_| random_key(&rng))
        .filter(|candidate| candidate.as_slice() != signer.public_key())
        .filter(|candidate| verify_attestation(&attestation, candidate).valid)
        .count();
    assert_eq!(false_positives, 0);
}
