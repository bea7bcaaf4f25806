use crate::error::Result;
use crate::keys::Key;

use super::AlgorithmId;

/// Core algorithm trait that all JWT signature algorithms implement
///
/// Implementations operate on the exact signing input bytes
/// (`base64url(header) "." base64url(claims)`) and on raw, already decoded
/// signature bytes.
pub trait Algorithm {
    /// The algorithm identifier (e.g., "HS256", "RS256")
    fn name(&self) -> &'static str;

    /// Produce a detached signature over `signing_input`
    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>>;

    /// Verify a detached signature over `signing_input`
    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()>;
}

/// Type alias for boxed algorithm trait objects
pub type SignatureAlgorithm = Box<dyn Algorithm + Send + Sync>;

/// Get the signing implementation for an algorithm ID
///
/// Returns `None` for the unsigned `none` algorithm, which never signs or verifies.
pub fn get_algorithm(algorithm: &AlgorithmId) -> Option<SignatureAlgorithm> {
    let implementation: SignatureAlgorithm = match algorithm {
        AlgorithmId::HS256 => Box::new(super::hmac::HS256),
        AlgorithmId::HS384 => Box::new(super::hmac::HS384),
        AlgorithmId::HS512 => Box::new(super::hmac::HS512),

        AlgorithmId::RS256 => Box::new(super::rsa::RS256),
        AlgorithmId::RS384 => Box::new(super::rsa::RS384),
        AlgorithmId::RS512 => Box::new(super::rsa::RS512),
        AlgorithmId::PS256 => Box::new(super::rsa::PS256),
        AlgorithmId::PS384 => Box::new(super::rsa::PS384),
        AlgorithmId::PS512 => Box::new(super::rsa::PS512),

        AlgorithmId::ES256 => Box::new(super::ecdsa::ES256),
        AlgorithmId::ES384 => Box::new(super::ecdsa::ES384),
        AlgorithmId::ES512 => Box::new(super::ecdsa::ES512),

        AlgorithmId::None => return None,
    };
    Some(implementation)
}
