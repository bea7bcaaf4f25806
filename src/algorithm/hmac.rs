use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::keys::Key;

use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

/// HS256 algorithm (HMAC with SHA-256)
pub struct HS256;

/// HS384 algorithm (HMAC with SHA-384)
pub struct HS384;

/// HS512 algorithm (HMAC with SHA-512)
pub struct HS512;

#[derive(Clone, Copy)]
enum HashFunction {
    Sha256,
    Sha384,
    Sha512,
}

impl Algorithm for HS256 {
    fn name(&self) -> &'static str {
        "HS256"
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        let secret = key.as_symmetric(self.name())?;
        compute_mac(HashFunction::Sha256, secret.as_bytes(), signing_input)
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()> {
        let secret = key.as_symmetric(self.name())?;
        verify_mac(HashFunction::Sha256, secret.as_bytes(), signing_input, signature)
    }
}

impl Algorithm for HS384 {
    fn name(&self) -> &'static str {
        "HS384"
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        let secret = key.as_symmetric(self.name())?;
        compute_mac(HashFunction::Sha384, secret.as_bytes(), signing_input)
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()> {
        let secret = key.as_symmetric(self.name())?;
        verify_mac(HashFunction::Sha384, secret.as_bytes(), signing_input, signature)
    }
}

impl Algorithm for HS512 {
    fn name(&self) -> &'static str {
        "HS512"
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        let secret = key.as_symmetric(self.name())?;
        compute_mac(HashFunction::Sha512, secret.as_bytes(), signing_input)
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()> {
        let secret = key.as_symmetric(self.name())?;
        verify_mac(HashFunction::Sha512, secret.as_bytes(), signing_input, signature)
    }
}

fn compute_mac(hash: HashFunction, secret: &[u8], signing_input: &[u8]) -> Result<Vec<u8>> {
    let rejected = |_| Error::KeyRejected("invalid HMAC key length".to_string());
    let tag = match hash {
        HashFunction::Sha256 => {
            let mut mac = Hmac::<Sha256>::new_from_slice(secret).map_err(rejected)?;
            mac.update(signing_input);
            mac.finalize().into_bytes().to_vec()
        }
        HashFunction::Sha384 => {
            let mut mac = Hmac::<Sha384>::new_from_slice(secret).map_err(rejected)?;
            mac.update(signing_input);
            mac.finalize().into_bytes().to_vec()
        }
        HashFunction::Sha512 => {
            let mut mac = Hmac::<Sha512>::new_from_slice(secret).map_err(rejected)?;
            mac.update(signing_input);
            mac.finalize().into_bytes().to_vec()
        }
    };
    Ok(tag)
}

/// Verify an HMAC tag with constant-time comparison
fn verify_mac(
    hash: HashFunction,
    secret: &[u8],
    signing_input: &[u8],
    provided_signature: &[u8],
) -> Result<()> {
    let expected_signature =
        compute_mac(hash, secret, signing_input).map_err(|_| Error::SignatureInvalid)?;

    if provided_signature.len() != expected_signature.len() {
        return Err(Error::SignatureInvalid);
    }

    if constant_time_eq(provided_signature, &expected_signature) {
        Ok(())
    } else {
        Err(Error::SignatureInvalid)
    }
}
