//! Key material for signing and verifying tokens
//!
//! This module provides a type-safe abstraction over the keys a token can be
//! generated or verified with:
//! - No key at all (unsigned `"none"` tokens)
//! - Symmetric secrets (for HMAC algorithms)
//! - Asymmetric key handles (for RSA/ECDSA algorithms)
//!
//! Key bytes are never inspected outside the algorithm implementations; the
//! token pipeline only asks whether a key is present.

use crate::error::{Error, Result};

/// A key that can be used to sign or verify a token
#[derive(Debug, Clone, Default)]
pub enum Key {
    /// No key: tokens are generated unsigned and verified only if `"none"` is allowed
    #[default]
    Absent,

    /// Symmetric key for HMAC algorithms
    Symmetric(SymmetricKey),

    /// Asymmetric key for RSA/ECDSA algorithms
    Asymmetric(AsymmetricKey),
}

impl Key {
    /// Create a symmetric key from bytes
    pub fn symmetric(secret: impl Into<Vec<u8>>) -> Self {
        Key::Symmetric(SymmetricKey::new(secret.into()))
    }

    /// Create an RSA private key from PKCS#8 DER bytes
    ///
    /// Private keys can both sign and verify.
    pub fn rsa_private(pkcs8: impl Into<Vec<u8>>) -> Self {
        Key::Asymmetric(AsymmetricKey::RsaPrivate(RsaPrivateKey::new(pkcs8.into())))
    }

    /// Create an RSA public key from DER bytes (PKCS#1 `RSAPublicKey` or SubjectPublicKeyInfo)
    pub fn rsa_public(der: impl Into<Vec<u8>>) -> Self {
        Key::Asymmetric(AsymmetricKey::RsaPublic(RsaPublicKey::new(der.into())))
    }

    /// Create an ECDSA private key from PKCS#8 DER bytes
    pub fn ecdsa_private(pkcs8: impl Into<Vec<u8>>, curve: EcdsaCurve) -> Self {
        Key::Asymmetric(AsymmetricKey::EcdsaPrivate(EcdsaPrivateKey::new(
            pkcs8.into(),
            curve,
        )))
    }

    /// Create an ECDSA public key from an uncompressed point or SubjectPublicKeyInfo DER
    pub fn ecdsa_public(der: impl Into<Vec<u8>>, curve: EcdsaCurve) -> Self {
        Key::Asymmetric(AsymmetricKey::EcdsaPublic(EcdsaPublicKey::new(
            der.into(),
            curve,
        )))
    }

    /// Whether any key material is present
    pub fn is_present(&self) -> bool {
        !matches!(self, Key::Absent)
    }

    /// Get key type name for error messages
    pub fn key_type(&self) -> &'static str {
        match self {
            Key::Absent => "Absent",
            Key::Symmetric(_) => "Symmetric",
            Key::Asymmetric(AsymmetricKey::RsaPrivate(_)) => "RSA private",
            Key::Asymmetric(AsymmetricKey::RsaPublic(_)) => "RSA public",
            Key::Asymmetric(AsymmetricKey::EcdsaPrivate(_)) => "ECDSA private",
            Key::Asymmetric(AsymmetricKey::EcdsaPublic(_)) => "ECDSA public",
        }
    }

    /// Get as symmetric key or return error
    pub fn as_symmetric(&self, algorithm: &str) -> Result<&SymmetricKey> {
        match self {
            Key::Symmetric(key) => Ok(key),
            _ => Err(self.mismatch(algorithm, "Symmetric")),
        }
    }

    pub(crate) fn mismatch(&self, algorithm: &str, expected: &str) -> Error {
        Error::KeyTypeMismatch {
            algorithm: algorithm.to_string(),
            expected_key_type: expected.to_string(),
            actual_key_type: self.key_type().to_string(),
        }
    }
}

impl From<SymmetricKey> for Key {
    fn from(key: SymmetricKey) -> Self {
        Key::Symmetric(key)
    }
}

impl From<AsymmetricKey> for Key {
    fn from(key: AsymmetricKey) -> Self {
        Key::Asymmetric(key)
    }
}

/// Symmetric key for HMAC algorithms
#[derive(Clone)]
pub struct SymmetricKey {
    secret: Vec<u8>,
}

impl SymmetricKey {
    /// Create a new symmetric key
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }

    /// Get the secret bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.secret
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("len", &self.secret.len())
            .finish_non_exhaustive()
    }
}

impl From<Vec<u8>> for SymmetricKey {
    fn from(secret: Vec<u8>) -> Self {
        Self::new(secret)
    }
}

impl From<&[u8]> for SymmetricKey {
    fn from(secret: &[u8]) -> Self {
        Self::new(secret.to_vec())
    }
}

impl From<String> for SymmetricKey {
    fn from(secret: String) -> Self {
        Self::new(secret.into_bytes())
    }
}

impl From<&str> for SymmetricKey {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes().to_vec())
    }
}

/// Asymmetric key handle for RSA/ECDSA algorithms
#[derive(Debug, Clone)]
pub enum AsymmetricKey {
    /// RSA private key (signs and verifies)
    RsaPrivate(RsaPrivateKey),

    /// RSA public key (verifies only)
    RsaPublic(RsaPublicKey),

    /// ECDSA private key (signs and verifies)
    EcdsaPrivate(EcdsaPrivateKey),

    /// ECDSA public key (verifies only)
    EcdsaPublic(EcdsaPublicKey),
}

/// RSA private key (PKCS#8 DER)
#[derive(Clone)]
pub struct RsaPrivateKey {
    pkcs8: Vec<u8>,
}

impl RsaPrivateKey {
    /// Create a new RSA private key from PKCS#8 DER bytes
    pub fn new(pkcs8: Vec<u8>) -> Self {
        Self { pkcs8 }
    }

    /// Get the PKCS#8 DER bytes
    pub fn as_pkcs8(&self) -> &[u8] {
        &self.pkcs8
    }
}

impl std::fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaPrivateKey").finish_non_exhaustive()
    }
}

/// RSA public key (DER)
#[derive(Debug, Clone)]
pub struct RsaPublicKey {
    der: Vec<u8>,
}

impl RsaPublicKey {
    /// Create a new RSA public key from DER bytes
    pub fn new(der: Vec<u8>) -> Self {
        Self { der }
    }

    /// Get the DER-encoded key bytes
    pub fn as_der(&self) -> &[u8] {
        &self.der
    }
}

/// ECDSA curve identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcdsaCurve {
    /// P-256 (secp256r1) curve
    P256,
    /// P-384 (secp384r1) curve
    P384,
    /// P-521 (secp521r1) curve
    P521,
}

/// ECDSA private key (PKCS#8 DER)
#[derive(Clone)]
pub struct EcdsaPrivateKey {
    pkcs8: Vec<u8>,
    curve: EcdsaCurve,
}

impl EcdsaPrivateKey {
    /// Create a new ECDSA private key from PKCS#8 DER bytes
    pub fn new(pkcs8: Vec<u8>, curve: EcdsaCurve) -> Self {
        Self { pkcs8, curve }
    }

    /// Get the PKCS#8 DER bytes
    pub fn as_pkcs8(&self) -> &[u8] {
        &self.pkcs8
    }

    /// Get the curve
    pub fn curve(&self) -> EcdsaCurve {
        self.curve
    }
}

impl std::fmt::Debug for EcdsaPrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcdsaPrivateKey")
            .field("curve", &self.curve)
            .finish_non_exhaustive()
    }
}

/// ECDSA public key
#[derive(Debug, Clone)]
pub struct EcdsaPublicKey {
    der: Vec<u8>,
    curve: EcdsaCurve,
}

impl EcdsaPublicKey {
    /// Create a new ECDSA public key
    pub fn new(der: Vec<u8>, curve: EcdsaCurve) -> Self {
        Self { der, curve }
    }

    /// Get the encoded key bytes
    pub fn as_der(&self) -> &[u8] {
        &self.der
    }

    /// Get the curve
    pub fn curve(&self) -> EcdsaCurve {
        self.curve
    }
}
