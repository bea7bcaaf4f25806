//! Static table of registered header parameters
//!
//! A parameter is "known" when it appears in the table and "implemented" when
//! this crate honours it. Known but unimplemented parameters (key URLs,
//! embedded keys, certificate chains, `crit`, `b64`) change how a token must
//! be verified, so a verifier that ignores them must refuse the token.

/// A registered header parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderParameter {
    pub name: &'static str,
    pub implemented: bool,
}

const fn parameter(name: &'static str, implemented: bool) -> HeaderParameter {
    HeaderParameter { name, implemented }
}

/// Registered header parameters (RFC 7515 section 4.1 and RFC 7797)
pub const REGISTERED_HEADERS: &[HeaderParameter] = &[
    parameter("alg", true),
    parameter("jku", false),
    parameter("jwk", false),
    parameter("kid", true),
    parameter("x5u", false),
    parameter("x5c", false),
    parameter("x5t", false),
    parameter("x5t#S256", false),
    parameter("typ", true),
    parameter("cty", true),
    parameter("crit", false),
    parameter("b64", false),
];

/// Look up a header parameter by exact name
pub fn lookup(name: &str) -> Option<&'static HeaderParameter> {
    REGISTERED_HEADERS.iter().find(|entry| entry.name == name)
}
