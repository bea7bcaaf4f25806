//! # jwtseal - Generate and Verify JSON Web Tokens
//!
//! > Signed, time-bounded claim sets with a strict verification pipeline.
//!
//! **jwtseal** issues and validates JSON Web Tokens in compact serialization
//! (`header.claims.signature`). Generation stamps the standard claims and signs;
//! verification refuses anything that is not exactly what the caller allowed.
//!
//! ## Overview
//!
//! The dangerous bugs in JWT libraries are not in the cryptography. They are a
//! skipped check, a token shape two parsers read differently, or a verifier
//! that lets the token pick its own algorithm. jwtseal runs every token
//! through the same fixed pipeline and stops at the first failure:
//!
//! ```text
//! token string
//!     │ format check: exactly three Base64URL segments, nothing else
//!     ▼
//! header (decoded alone)
//!     │ allow-list, registered parameters, typ == "JWT"
//!     ▼
//! signature
//!     │ key present: verify with the allowed algorithm
//!     │ no key: only an unsigned "none" token that the allow-list names
//!     ▼
//! claims
//!     │ iat <= now + skew, nbf <= now, exp > now
//!     ▼
//! (Header, Claims)
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use jwtseal::*;
//! use std::time::Duration;
//!
//! let key = Key::symmetric(b"your-256-bit-secret");
//!
//! let mut claims = Claims::new();
//! claims.set_string("sub", "user-1");
//!
//! let token = generate(
//!     &claims,
//!     &key,
//!     &GenerateOptions::new()
//!         .algorithm(AlgorithmId::HS256)
//!         .lifetime(Duration::from_secs(300)),
//! )?;
//!
//! let (header, verified) = verify(&token, &key, &VerifyOptions::new(AlgorithmPolicy::hs256_only()))?;
//! assert_eq!(header.algorithm(), Some("HS256"));
//! assert_eq!(verified.subject(), Some("user-1"));
//! # Ok::<(), jwtseal::Error>(())
//! ```
//!
//! ## Algorithm Support
//!
//! All algorithms implement the [`Algorithm`] trait over the exact signing
//! input bytes:
//!
//! - **HMAC**: HS256, HS384, HS512
//! - **RSA PKCS#1 v1.5**: RS256, RS384, RS512
//! - **RSA PSS**: PS256, PS384, PS512
//! - **ECDSA**: ES256, ES384, ES512 (fixed-length `R || S` signatures)
//! - **none**: unsigned tokens, only ever accepted when explicitly allowed
//!
//! ## Keys
//!
//! A [`Key`] is either absent, a symmetric secret, or an asymmetric handle
//! (RSA/ECDSA private keys as PKCS#8 DER, public keys as DER). Private keys
//! can sign and verify; public keys only verify. Passing a key of the wrong
//! family for the token's algorithm fails with [`Error::KeyTypeMismatch`].
//!
//! ## Time and Entropy
//!
//! [`TokenAssembler`] and [`TokenInspector`] read time through the [`Clock`]
//! trait and randomness through [`RandomSource`]. The free functions use the
//! wall clock and the operating system's secure random source; tests inject a
//! [`VirtualClock`] to hit expiry boundaries exactly.
//!
//! ## Security
//!
//! - The algorithm allow-list is required per call; the default policy is
//!   empty and rejects everything, and `"none"` is never implied
//! - Format is checked on the raw string before any decoding, so JSON-wrapped
//!   or otherwise reshaped tokens are rejected outright
//! - Known but unsupported header parameters (`jku`, `jwk`, `x5u`, `x5c`,
//!   `x5t`, `x5t#S256`, `crit`, `b64`) are refused unless explicitly ignored;
//!   `crit` is refused even then
//! - HMAC tags are compared in constant time
//! - Token and decoded segment sizes are bounded
//! - [`process`] performs no checks at all and must never be used as a trust
//!   boundary

pub mod algorithm;
pub mod claims;
pub mod clock;
pub mod error;
pub mod format;
pub mod header;
pub mod keys;
pub(crate) mod limits;
pub mod random;
pub mod token;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_helper;

pub use algorithm::{Algorithm, AlgorithmId, AlgorithmPolicy};
pub use claims::{Claims, check_claims};
pub use clock::{Clock, SystemClock, VirtualClock};
pub use error::{Error, Result};
pub use format::validate_format;
pub use header::{Header, check_header};
pub use keys::{EcdsaCurve, Key};
pub use random::{RandomSource, SystemRandomSource};
pub use token::{GenerateOptions, TokenAssembler, TokenInspector, VerifyOptions, process};

/// Generate a token using the wall clock and system entropy
///
/// See [`TokenAssembler::generate`].
pub fn generate(claims: &Claims, key: &Key, options: &GenerateOptions) -> Result<String> {
    TokenAssembler::system().generate(claims, key, options)
}

/// Verify a token against the wall clock
///
/// See [`TokenInspector::verify`].
pub fn verify(token: &str, key: &Key, options: &VerifyOptions) -> Result<(Header, Claims)> {
    TokenInspector::system().verify(token, key, options)
}
