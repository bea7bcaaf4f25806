//! Shared key fixtures for unit tests
//!
//! RSA key generation is slow, so one 2048-bit key is generated per test
//! binary and reused.

use crate::error::Result;
use crate::keys::{EcdsaCurve, Key};
use crate::random::RandomSource;

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{
    ECDSA_P256_SHA256_FIXED_SIGNING, ECDSA_P384_SHA384_FIXED_SIGNING,
    ECDSA_P521_SHA512_FIXED_SIGNING, EcdsaKeyPair, EcdsaSigningAlgorithm, KeyPair, RsaKeyPair,
};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rsa::RsaPrivateKey;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey};
use std::sync::{Mutex, OnceLock};

pub(crate) struct RsaFixture {
    /// PKCS#8 private key
    pub pkcs8: Vec<u8>,
    /// PKCS#1 `RSAPublicKey` as exposed by the crypto backend
    pub public_der: Vec<u8>,
    /// SubjectPublicKeyInfo
    pub public_spki: Vec<u8>,
}

pub(crate) fn rsa_fixture() -> &'static RsaFixture {
    static FIXTURE: OnceLock<RsaFixture> = OnceLock::new();
    FIXTURE.get_or_init(|| {
        let private_key =
            RsaPrivateKey::new(&mut rand::thread_rng(), 2048).expect("Failed to generate key");
        let pkcs8 = private_key
            .to_pkcs8_der()
            .expect("Failed to encode key")
            .as_bytes()
            .to_vec();
        let public_spki = private_key
            .to_public_key()
            .to_public_key_der()
            .expect("Failed to encode public key")
            .as_bytes()
            .to_vec();
        let keypair = RsaKeyPair::from_pkcs8(&pkcs8).expect("Failed to parse key");
        let public_der = keypair.public_key().as_ref().to_vec();
        RsaFixture {
            pkcs8,
            public_der,
            public_spki,
        }
    })
}

fn signing_algorithm(curve: EcdsaCurve) -> &'static EcdsaSigningAlgorithm {
    match curve {
        EcdsaCurve::P256 => &ECDSA_P256_SHA256_FIXED_SIGNING,
        EcdsaCurve::P384 => &ECDSA_P384_SHA384_FIXED_SIGNING,
        EcdsaCurve::P521 => &ECDSA_P521_SHA512_FIXED_SIGNING,
    }
}

/// Generate an ECDSA key pair, returning `(private, public)` keys
pub(crate) fn ecdsa_keys(curve: EcdsaCurve) -> (Key, Key) {
    let rng = SystemRandom::new();
    let alg = signing_algorithm(curve);
    let pkcs8 = EcdsaKeyPair::generate_pkcs8(alg, &rng).expect("Failed to generate key");
    let keypair = EcdsaKeyPair::from_pkcs8(alg, pkcs8.as_ref()).expect("Failed to parse key");
    let public_point = keypair.public_key().as_ref().to_vec();
    (
        Key::ecdsa_private(pkcs8.as_ref().to_vec(), curve),
        Key::ecdsa_public(public_point, curve),
    )
}

/// Reproducible entropy: two sources with the same seed yield the same bytes
pub(crate) struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<()> {
        self.rng.lock().expect("rng lock poisoned").fill_bytes(dest);
        Ok(())
    }
}
