//! Per-call configuration for generation and verification

use crate::algorithm::{AlgorithmId, AlgorithmPolicy};
use miniserde::json::{Object, Value};
use std::time::Duration;

/// Default number of random bytes in a generated `jti`
pub const DEFAULT_JTI_SIZE: usize = 16;

/// Options for [`TokenAssembler::generate`](super::TokenAssembler::generate)
///
/// ```
/// use jwtseal::{AlgorithmId, GenerateOptions};
/// use std::time::Duration;
///
/// let options = GenerateOptions::new()
///     .algorithm(AlgorithmId::HS256)
///     .lifetime(Duration::from_secs(300))
///     .key_id("signing-key-1");
/// ```
#[derive(Clone)]
pub struct GenerateOptions {
    pub(crate) algorithm: AlgorithmId,
    pub(crate) lifetime: Option<Duration>,
    pub(crate) expires: Option<i64>,
    pub(crate) not_before: Option<i64>,
    pub(crate) jti_size: usize,
    pub(crate) header: Object,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            algorithm: AlgorithmId::PS512,
            lifetime: None,
            expires: None,
            not_before: None,
            jti_size: DEFAULT_JTI_SIZE,
            header: Object::new(),
        }
    }
}

impl std::fmt::Debug for GenerateOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerateOptions")
            .field("algorithm", &self.algorithm)
            .field("lifetime", &self.lifetime)
            .field("expires", &self.expires)
            .field("not_before", &self.not_before)
            .field("jti_size", &self.jti_size)
            .field("header", &miniserde::json::to_string(&self.header))
            .finish()
    }
}

impl GenerateOptions {
    /// Create options with defaults: PS512, no expiry, 16-byte `jti`
    pub fn new() -> Self {
        Self::default()
    }

    /// Signing algorithm; ignored (the token is unsigned) when no key is given
    pub fn algorithm(mut self, algorithm: AlgorithmId) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set `exp` to the issue time plus `lifetime`
    ///
    /// Takes precedence over [`expires`](Self::expires) when both are set.
    /// A zero lifetime still sets `exp`, producing an already expired token.
    pub fn lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = Some(lifetime);
        self
    }

    /// Set `exp` to an absolute time in epoch seconds
    pub fn expires(mut self, expires: i64) -> Self {
        self.expires = Some(expires);
        self
    }

    /// Set `nbf` to an absolute time in epoch seconds instead of the issue time
    pub fn not_before(mut self, not_before: i64) -> Self {
        self.not_before = Some(not_before);
        self
    }

    /// Number of random bytes in `jti`; zero leaves `jti` out
    ///
    /// Generation fails with [`Error::JtiTooLarge`](crate::Error::JtiTooLarge)
    /// above 1024 bytes.
    pub fn jti_size(mut self, size: usize) -> Self {
        self.jti_size = size;
        self
    }

    /// Add a header parameter
    ///
    /// `typ` and `alg` are reserved; setting either makes generation fail.
    pub fn header(mut self, name: impl Into<String>, value: Value) -> Self {
        self.header.insert(name.into(), value);
        self
    }

    /// Set the `kid` header parameter
    pub fn key_id(self, kid: impl Into<String>) -> Self {
        self.header("kid", Value::String(kid.into()))
    }
}

/// Options for [`TokenInspector::verify`](super::TokenInspector::verify)
///
/// The algorithm allow-list is required: the default policy is empty and
/// rejects every token.
///
/// ```
/// use jwtseal::{AlgorithmPolicy, VerifyOptions};
///
/// let options = VerifyOptions::new(AlgorithmPolicy::rs256_only()).iat_skew(30);
/// ```
#[derive(Clone, Debug, Default)]
pub struct VerifyOptions {
    pub(crate) algorithms: AlgorithmPolicy,
    pub(crate) iat_skew: i64,
    pub(crate) checks_optional: bool,
    pub(crate) ignore_not_implemented: bool,
}

impl VerifyOptions {
    /// Create options accepting the algorithms in `policy`
    pub fn new(policy: AlgorithmPolicy) -> Self {
        Self {
            algorithms: policy,
            ..Self::default()
        }
    }

    /// Replace the algorithm allow-list
    pub fn algorithms(mut self, policy: AlgorithmPolicy) -> Self {
        self.algorithms = policy;
        self
    }

    /// Leeway in seconds between the issuer's clock and ours for `iat`
    ///
    /// May be negative to require tokens issued at least that long ago.
    pub fn iat_skew(mut self, seconds: i64) -> Self {
        self.iat_skew = seconds;
        self
    }

    /// Tolerate a missing `typ` header and missing `iat`, `nbf`, `exp` claims
    pub fn checks_optional(mut self, optional: bool) -> Self {
        self.checks_optional = optional;
        self
    }

    /// Skip the registered/implemented check on header parameters
    pub fn ignore_not_implemented(mut self, ignore: bool) -> Self {
        self.ignore_not_implemented = ignore;
        self
    }

    pub fn policy(&self) -> &AlgorithmPolicy {
        &self.algorithms
    }
}
