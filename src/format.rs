//! Compact serialization shape check
//!
//! A token is exactly three Base64URL segments joined by `.`. The shape is
//! checked on the raw string before anything is decoded, so a JSON-wrapped
//! token (`{"header": ..., "payload": ..., "signature": ...}`) or any other
//! alternate serialization is a format error and never reaches a parser.

use crate::error::{Error, Result};
use crate::limits::MAX_TOKEN_LENGTH;

/// The three raw segments of a token that passed [`validate_format`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segments<'a> {
    pub header: &'a str,
    pub claims: &'a str,
    pub signature: &'a str,
}

impl Segments<'_> {
    /// The exact bytes covered by the signature: `header "." claims`
    pub fn signing_input(&self) -> String {
        format!("{}.{}", self.header, self.claims)
    }
}

fn is_base64url(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_'
}

/// Validate the shape of a compact token
///
/// Accepts only `H.C.S` where `H` and `C` are non-empty, `S` may be empty, and
/// every character is in `A-Za-z0-9-_`.
pub fn validate_format(token: &str) -> Result<()> {
    split(token).map(|_| ())
}

/// Validate the shape of a compact token and return its segments
pub fn split(token: &str) -> Result<Segments<'_>> {
    if token.len() > MAX_TOKEN_LENGTH {
        return Err(Error::TokenTooLarge {
            size: token.len(),
            max: MAX_TOKEN_LENGTH,
        });
    }

    if !token.bytes().all(|b| b == b'.' || is_base64url(b)) {
        return Err(Error::FormatInvalid);
    }

    let mut parts = token.split('.');
    let header = parts.next().ok_or(Error::FormatInvalid)?;
    let claims = parts.next().ok_or(Error::FormatInvalid)?;
    let signature = parts.next().ok_or(Error::FormatInvalid)?;
    if parts.next().is_some() || header.is_empty() || claims.is_empty() {
        return Err(Error::FormatInvalid);
    }

    Ok(Segments {
        header,
        claims,
        signature,
    })
}
