//! Shared fixtures for integration tests

#![allow(dead_code)]

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{
    ECDSA_P256_SHA256_FIXED_SIGNING, ECDSA_P384_SHA384_FIXED_SIGNING,
    ECDSA_P521_SHA512_FIXED_SIGNING, EcdsaKeyPair, KeyPair,
};
use jwtseal::{
    Claims, EcdsaCurve, Key, RandomSource, TokenAssembler, TokenInspector, VirtualClock,
};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rsa::RsaPrivateKey;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use std::sync::{Arc, Mutex, OnceLock};

pub const NOW: i64 = 1_700_000_000;

pub struct RsaFixture {
    pub pkcs8: Vec<u8>,
    pub public_spki: Vec<u8>,
    pub public_pem: String,
}

pub fn rsa_fixture() -> &'static RsaFixture {
    static FIXTURE: OnceLock<RsaFixture> = OnceLock::new();
    FIXTURE.get_or_init(|| {
        let private_key =
            RsaPrivateKey::new(&mut rand::thread_rng(), 2048).expect("Failed to generate key");
        let public_key = private_key.to_public_key();
        RsaFixture {
            pkcs8: private_key
                .to_pkcs8_der()
                .expect("Failed to encode key")
                .as_bytes()
                .to_vec(),
            public_spki: public_key
                .to_public_key_der()
                .expect("Failed to encode public key")
                .as_bytes()
                .to_vec(),
            public_pem: public_key
                .to_public_key_pem(LineEnding::LF)
                .expect("Failed to encode PEM"),
        }
    })
}

pub fn rsa_private() -> Key {
    Key::rsa_private(rsa_fixture().pkcs8.clone())
}

pub fn rsa_public() -> Key {
    Key::rsa_public(rsa_fixture().public_spki.clone())
}

/// Generate an ECDSA key pair, returning `(private, public)` keys
pub fn ecdsa_keys(curve: EcdsaCurve) -> (Key, Key) {
    let alg = match curve {
        EcdsaCurve::P256 => &ECDSA_P256_SHA256_FIXED_SIGNING,
        EcdsaCurve::P384 => &ECDSA_P384_SHA384_FIXED_SIGNING,
        EcdsaCurve::P521 => &ECDSA_P521_SHA512_FIXED_SIGNING,
    };
    let pkcs8 = EcdsaKeyPair::generate_pkcs8(alg, &SystemRandom::new()).expect("keygen");
    let keypair = EcdsaKeyPair::from_pkcs8(alg, pkcs8.as_ref()).expect("parse key");
    (
        Key::ecdsa_private(pkcs8.as_ref().to_vec(), curve),
        Key::ecdsa_public(keypair.public_key().as_ref().to_vec(), curve),
    )
}

/// Assembler and inspector sharing one virtual clock frozen at [`NOW`]
pub fn virtual_pair() -> (
    Arc<VirtualClock>,
    TokenAssembler<Arc<VirtualClock>>,
    TokenInspector<Arc<VirtualClock>>,
) {
    let clock = Arc::new(VirtualClock::new(NOW));
    let assembler = TokenAssembler::new(Arc::clone(&clock), Default::default());
    let inspector = TokenInspector::new(Arc::clone(&clock));
    (clock, assembler, inspector)
}

/// Reproducible entropy: two sources with the same seed yield the same bytes
pub struct SeededRandom {
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
    fn fill(&self, dest: &mut [u8]) -> jwtseal::Result<()> {
        self.rng.lock().expect("rng lock poisoned").fill_bytes(dest);
        Ok(())
    }
}

pub fn sample_claims() -> Claims {
    let mut claims = Claims::new();
    claims
        .set_string("iss", "https://issuer.example")
        .set_string("sub", "user-1")
        .set_bool("admin", false);
    claims
}

/// Replace one segment of a compact token
pub fn replace_segment(token: &str, index: usize, value: &str) -> String {
    let mut parts: Vec<&str> = token.split('.').collect();
    parts[index] = value;
    parts.join(".")
}
