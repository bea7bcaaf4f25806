use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::keys::{AsymmetricKey, Key};

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{self, KeyPair, RsaKeyPair, UnparsedPublicKey};

/// Declares an RSA algorithm as a unit struct bound to its signing padding
/// and verification parameters.
macro_rules! rsa_algorithm {
    ($(#[$doc:meta])* $name:ident, $padding:ident, $verification:ident) => {
        $(#[$doc])*
        pub struct $name;

        impl Algorithm for $name {
            fn name(&self) -> &'static str {
                stringify!($name)
            }

            fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
                sign_rsa(self.name(), signing_input, key, &signature::$padding)
            }

            fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()> {
                verify_rsa(
                    self.name(),
                    signing_input,
                    signature,
                    key,
                    &signature::$verification,
                )
            }
        }
    };
}

rsa_algorithm!(
    /// RS256 algorithm (RSASSA-PKCS1-v1_5 with SHA-256)
    RS256,
    RSA_PKCS1_SHA256,
    RSA_PKCS1_2048_8192_SHA256
);
rsa_algorithm!(
    /// RS384 algorithm (RSASSA-PKCS1-v1_5 with SHA-384)
    RS384,
    RSA_PKCS1_SHA384,
    RSA_PKCS1_2048_8192_SHA384
);
rsa_algorithm!(
    /// RS512 algorithm (RSASSA-PKCS1-v1_5 with SHA-512)
    RS512,
    RSA_PKCS1_SHA512,
    RSA_PKCS1_2048_8192_SHA512
);
rsa_algorithm!(
    /// PS256 algorithm (RSASSA-PSS with SHA-256)
    PS256,
    RSA_PSS_SHA256,
    RSA_PSS_2048_8192_SHA256
);
rsa_algorithm!(
    /// PS384 algorithm (RSASSA-PSS with SHA-384)
    PS384,
    RSA_PSS_SHA384,
    RSA_PSS_2048_8192_SHA384
);
rsa_algorithm!(
    /// PS512 algorithm (RSASSA-PSS with SHA-512)
    PS512,
    RSA_PSS_SHA512,
    RSA_PSS_2048_8192_SHA512
);

fn load_keypair(pkcs8: &[u8]) -> Result<RsaKeyPair> {
    RsaKeyPair::from_pkcs8(pkcs8).map_err(|e| Error::KeyRejected(format!("RSA private key: {e}")))
}

/// Generic RSA signing; only private keys can sign
fn sign_rsa(
    name: &str,
    signing_input: &[u8],
    key: &Key,
    padding: &'static dyn signature::RsaEncoding,
) -> Result<Vec<u8>> {
    let Key::Asymmetric(AsymmetricKey::RsaPrivate(private_key)) = key else {
        return Err(key.mismatch(name, "RSA private"));
    };

    let keypair = load_keypair(private_key.as_pkcs8())?;
    let rng = SystemRandom::new();
    let mut signature = vec![0u8; keypair.public_modulus_len()];
    keypair
        .sign(padding, &rng, signing_input, &mut signature)
        .map_err(|_| Error::SigningFailed(format!("{name} signing failed")))?;

    Ok(signature)
}

/// Generic RSA signature verification
///
/// A private key verifies with its own public half.
fn verify_rsa(
    name: &str,
    signing_input: &[u8],
    signature: &[u8],
    key: &Key,
    algorithm: &'static dyn signature::VerificationAlgorithm,
) -> Result<()> {
    let public_key_der = match key {
        Key::Asymmetric(AsymmetricKey::RsaPublic(public_key)) => public_key.as_der().to_vec(),
        Key::Asymmetric(AsymmetricKey::RsaPrivate(private_key)) => {
            let keypair = load_keypair(private_key.as_pkcs8())?;
            keypair.public_key().as_ref().to_vec()
        }
        _ => return Err(key.mismatch(name, "RSA")),
    };

    UnparsedPublicKey::new(algorithm, &public_key_der)
        .verify(signing_input, signature)
        .map_err(|_| Error::SignatureInvalid)
}
