mod traits;

pub mod ecdsa;
pub mod hmac;
pub mod rsa;

pub use traits::{Algorithm, SignatureAlgorithm, get_algorithm};

use crate::error::{Error, Result};

/// Algorithm identifier from a token header
///
/// `None` is the unsigned algorithm. It is an ordinary identifier here: it is
/// only ever accepted when an [`AlgorithmPolicy`] lists it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmId {
    /// HMAC with SHA-256
    HS256,
    /// HMAC with SHA-384
    HS384,
    /// HMAC with SHA-512
    HS512,

    /// RSASSA-PKCS1-v1_5 with SHA-256
    RS256,
    /// RSASSA-PKCS1-v1_5 with SHA-384
    RS384,
    /// RSASSA-PKCS1-v1_5 with SHA-512
    RS512,

    /// RSASSA-PSS with SHA-256
    PS256,
    /// RSASSA-PSS with SHA-384
    PS384,
    /// RSASSA-PSS with SHA-512
    PS512,

    /// ECDSA with P-256 and SHA-256
    ES256,
    /// ECDSA with P-384 and SHA-384
    ES384,
    /// ECDSA with P-521 and SHA-512
    ES512,

    /// Unsigned token
    None,
}

impl AlgorithmId {
    /// Every signing algorithm, excluding `none`
    pub const SIGNING: [AlgorithmId; 12] = [
        AlgorithmId::HS256,
        AlgorithmId::HS384,
        AlgorithmId::HS512,
        AlgorithmId::RS256,
        AlgorithmId::RS384,
        AlgorithmId::RS512,
        AlgorithmId::PS256,
        AlgorithmId::PS384,
        AlgorithmId::PS512,
        AlgorithmId::ES256,
        AlgorithmId::ES384,
        AlgorithmId::ES512,
    ];

    /// Parse an algorithm identifier (case-sensitive)
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "HS256" => Ok(AlgorithmId::HS256),
            "HS384" => Ok(AlgorithmId::HS384),
            "HS512" => Ok(AlgorithmId::HS512),
            "RS256" => Ok(AlgorithmId::RS256),
            "RS384" => Ok(AlgorithmId::RS384),
            "RS512" => Ok(AlgorithmId::RS512),
            "PS256" => Ok(AlgorithmId::PS256),
            "PS384" => Ok(AlgorithmId::PS384),
            "PS512" => Ok(AlgorithmId::PS512),
            "ES256" => Ok(AlgorithmId::ES256),
            "ES384" => Ok(AlgorithmId::ES384),
            "ES512" => Ok(AlgorithmId::ES512),
            "none" => Ok(AlgorithmId::None),
            _ => Err(Error::AlgorithmUnsupported(s.to_string())),
        }
    }

    /// Convert to string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            AlgorithmId::HS256 => "HS256",
            AlgorithmId::HS384 => "HS384",
            AlgorithmId::HS512 => "HS512",
            AlgorithmId::RS256 => "RS256",
            AlgorithmId::RS384 => "RS384",
            AlgorithmId::RS512 => "RS512",
            AlgorithmId::PS256 => "PS256",
            AlgorithmId::PS384 => "PS384",
            AlgorithmId::PS512 => "PS512",
            AlgorithmId::ES256 => "ES256",
            AlgorithmId::ES384 => "ES384",
            AlgorithmId::ES512 => "ES512",
            AlgorithmId::None => "none",
        }
    }

    /// Check if algorithm is HMAC-based (symmetric)
    pub fn is_symmetric(&self) -> bool {
        matches!(
            self,
            AlgorithmId::HS256 | AlgorithmId::HS384 | AlgorithmId::HS512
        )
    }

    /// Check if this is the unsigned `none` algorithm
    pub fn is_none(&self) -> bool {
        matches!(self, AlgorithmId::None)
    }
}

impl std::fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for AlgorithmId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Policy for allowed algorithms
///
/// The allow-list is supplied by the caller for each verification. The
/// default policy is empty and rejects every token.
#[derive(Debug, Clone, Default)]
pub struct AlgorithmPolicy {
    allowed: Vec<AlgorithmId>,
}

impl AlgorithmPolicy {
    /// Create a policy that allows only specific algorithms
    pub fn allow_only(algorithms: Vec<AlgorithmId>) -> Self {
        Self {
            allowed: algorithms,
        }
    }

    /// Create a policy from algorithm names
    ///
    /// Unknown names are rejected rather than silently dropped.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed = names
            .into_iter()
            .map(|name| AlgorithmId::from_str(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { allowed })
    }

    /// Policy that allows every signing algorithm but never `none`
    pub fn allow_all() -> Self {
        Self::allow_only(AlgorithmId::SIGNING.to_vec())
    }

    /// Policy that allows only unsigned tokens
    pub fn none_only() -> Self {
        Self::allow_only(vec![AlgorithmId::None])
    }

    /// Policy that allows only HS256
    pub fn hs256_only() -> Self {
        Self::allow_only(vec![AlgorithmId::HS256])
    }

    /// Policy that allows only RS256
    pub fn rs256_only() -> Self {
        Self::allow_only(vec![AlgorithmId::RS256])
    }

    /// Policy that allows only PS256
    pub fn ps256_only() -> Self {
        Self::allow_only(vec![AlgorithmId::PS256])
    }

    /// Policy that allows only ES256
    pub fn es256_only() -> Self {
        Self::allow_only(vec![AlgorithmId::ES256])
    }

    /// Add an algorithm to the policy
    pub fn with(mut self, algorithm: AlgorithmId) -> Self {
        if !self.allowed.contains(&algorithm) {
            self.allowed.push(algorithm);
        }
        self
    }

    /// Check if an algorithm is allowed
    pub fn is_allowed(&self, algorithm: &AlgorithmId) -> bool {
        self.allowed.contains(algorithm)
    }

    /// Validate a header `alg` value against the policy
    ///
    /// Membership is an exact, case-sensitive string comparison: `"None"` or
    /// `"hs256"` never match anything.
    pub fn validate(&self, alg: &str) -> Result<AlgorithmId> {
        self.allowed
            .iter()
            .find(|allowed| allowed.as_str() == alg)
            .copied()
            .ok_or_else(|| Error::AlgorithmNotAllowed {
                found: alg.to_string(),
                allowed: self.allowed.iter().map(ToString::to_string).collect(),
            })
    }

    /// Get list of allowed algorithms
    pub fn allowed_algorithms(&self) -> &[AlgorithmId] {
        &self.allowed
    }
}
