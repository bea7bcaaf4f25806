use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::keys::{AsymmetricKey, EcdsaCurve, Key};

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{self, EcdsaKeyPair, KeyPair, UnparsedPublicKey};

/// ES256 algorithm (ECDSA with P-256 and SHA-256)
pub struct ES256;

/// ES384 algorithm (ECDSA with P-384 and SHA-384)
pub struct ES384;

/// ES512 algorithm (ECDSA with P-521 and SHA-512)
pub struct ES512;

impl Algorithm for ES256 {
    fn name(&self) -> &'static str {
        "ES256"
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        sign_ecdsa(
            self.name(),
            EcdsaCurve::P256,
            signing_input,
            key,
            &signature::ECDSA_P256_SHA256_FIXED_SIGNING,
        )
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()> {
        verify_ecdsa(
            self.name(),
            EcdsaCurve::P256,
            signing_input,
            signature,
            key,
            &signature::ECDSA_P256_SHA256_FIXED_SIGNING,
            &signature::ECDSA_P256_SHA256_FIXED,
        )
    }
}

impl Algorithm for ES384 {
    fn name(&self) -> &'static str {
        "ES384"
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        sign_ecdsa(
            self.name(),
            EcdsaCurve::P384,
            signing_input,
            key,
            &signature::ECDSA_P384_SHA384_FIXED_SIGNING,
        )
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()> {
        verify_ecdsa(
            self.name(),
            EcdsaCurve::P384,
            signing_input,
            signature,
            key,
            &signature::ECDSA_P384_SHA384_FIXED_SIGNING,
            &signature::ECDSA_P384_SHA384_FIXED,
        )
    }
}

impl Algorithm for ES512 {
    fn name(&self) -> &'static str {
        "ES512"
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        sign_ecdsa(
            self.name(),
            EcdsaCurve::P521,
            signing_input,
            key,
            &signature::ECDSA_P521_SHA512_FIXED_SIGNING,
        )
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()> {
        verify_ecdsa(
            self.name(),
            EcdsaCurve::P521,
            signing_input,
            signature,
            key,
            &signature::ECDSA_P521_SHA512_FIXED_SIGNING,
            &signature::ECDSA_P521_SHA512_FIXED,
        )
    }
}

fn check_curve(name: &str, expected: EcdsaCurve, actual: EcdsaCurve) -> Result<()> {
    if actual != expected {
        return Err(Error::KeyTypeMismatch {
            algorithm: name.to_string(),
            expected_key_type: format!("ECDSA {expected:?}"),
            actual_key_type: format!("ECDSA {actual:?}"),
        });
    }
    Ok(())
}

fn load_keypair(
    pkcs8: &[u8],
    signing: &'static signature::EcdsaSigningAlgorithm,
) -> Result<EcdsaKeyPair> {
    EcdsaKeyPair::from_pkcs8(signing, pkcs8)
        .map_err(|e| Error::KeyRejected(format!("ECDSA private key: {e}")))
}

/// Generic ECDSA signing producing fixed-length `R || S` signatures
fn sign_ecdsa(
    name: &str,
    curve: EcdsaCurve,
    signing_input: &[u8],
    key: &Key,
    signing: &'static signature::EcdsaSigningAlgorithm,
) -> Result<Vec<u8>> {
    let Key::Asymmetric(AsymmetricKey::EcdsaPrivate(private_key)) = key else {
        return Err(key.mismatch(name, "ECDSA private"));
    };
    check_curve(name, curve, private_key.curve())?;

    let keypair = load_keypair(private_key.as_pkcs8(), signing)?;
    let rng = SystemRandom::new();
    let signature = keypair
        .sign(&rng, signing_input)
        .map_err(|_| Error::SigningFailed(format!("{name} signing failed")))?;

    Ok(signature.as_ref().to_vec())
}

/// Generic ECDSA signature verification
fn verify_ecdsa(
    name: &str,
    curve: EcdsaCurve,
    signing_input: &[u8],
    signature: &[u8],
    key: &Key,
    signing: &'static signature::EcdsaSigningAlgorithm,
    algorithm: &'static dyn signature::VerificationAlgorithm,
) -> Result<()> {
    let public_key = match key {
        Key::Asymmetric(AsymmetricKey::EcdsaPublic(public_key)) => {
            check_curve(name, curve, public_key.curve())?;
            public_key.as_der().to_vec()
        }
        Key::Asymmetric(AsymmetricKey::EcdsaPrivate(private_key)) => {
            check_curve(name, curve, private_key.curve())?;
            let keypair = load_keypair(private_key.as_pkcs8(), signing)?;
            keypair.public_key().as_ref().to_vec()
        }
        _ => return Err(key.mismatch(name, "ECDSA")),
    };

    UnparsedPublicKey::new(algorithm, &public_key)
        .verify(signing_input, signature)
        .map_err(|_| Error::SignatureInvalid)
}
