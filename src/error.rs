//! Error types for token generation and verification
//!
//! Every failure is terminal for the call that produced it. Variants carry the
//! offending header, claim or algorithm name so callers can act on them.

use thiserror::Error;

/// jwtseal errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Invalid JWT format: expected three Base64URL segments separated by '.'")]
    FormatInvalid,

    #[error("Base64URL decoding failed: {0}")]
    FormatInvalidBase64(String),

    #[error("JSON parsing failed: {0}")]
    FormatInvalidJson(String),

    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    // ============================================================================
    // Header Errors
    // ============================================================================
    #[error("alg header not present")]
    AlgorithmMissing,

    #[error("Algorithm '{found}' not allowed. Allowed: {allowed:?}")]
    AlgorithmNotAllowed { found: String, allowed: Vec<String> },

    #[error("Algorithm '{0}' is not supported")]
    AlgorithmUnsupported(String),

    #[error("Unknown header: {0}")]
    HeaderUnknown(String),

    #[error("Header not implemented: {0}")]
    HeaderNotImplemented(String),

    #[error("typ header not present")]
    HeaderTypeMissing,

    #[error("typ header is not JWT (found {0})")]
    HeaderTypeMismatch(String),

    #[error("Extra headers re-specify reserved headers: {0:?}")]
    HeaderConflict(Vec<String>),

    // ============================================================================
    // Signature Errors
    // ============================================================================
    #[error("Signature verification failed")]
    SignatureInvalid,

    #[error("No key supplied but the 'none' algorithm is not allowed")]
    NoKeyNoneNotAllowed,

    #[error(
        "Key type mismatch for algorithm '{algorithm}': expected {expected_key_type}, got {actual_key_type}"
    )]
    KeyTypeMismatch {
        algorithm: String,
        expected_key_type: String,
        actual_key_type: String,
    },

    #[error("Key rejected: {0}")]
    KeyRejected(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("jti size {size} exceeds the maximum of {max} bytes")]
    JtiTooLarge { size: usize, max: usize },

    #[error("Secure random source unavailable")]
    EntropyUnavailable,

    // ============================================================================
    // Claim Errors
    // ============================================================================
    #[error("{0} claim not present")]
    TokenMissingClaim(String),

    #[error("{0} claim is not a numeric date")]
    TokenInvalidClaim(String),

    #[error("Token issued in future at {issued_at} (now: {now}, skew: {skew}s)")]
    TokenIssuedInFuture { issued_at: i64, now: i64, skew: i64 },

    #[error("Token not valid until {not_before} (now: {now})")]
    TokenNotYetValid { not_before: i64, now: i64 },

    #[error("Token expired at {expired_at} (now: {now})")]
    TokenExpired { expired_at: i64, now: i64 },

    #[error("Integer overflow in timestamp arithmetic")]
    TimestampOverflow,
}

/// Result type alias for jwtseal operations
pub type Result<T> = std::result::Result<T, Error>;
