use super::VerifyOptions;
use crate::algorithm::{AlgorithmId, get_algorithm};
use crate::claims::{Claims, check_claims};
use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::format::{self, Segments};
use crate::header::{Header, check_header};
use crate::keys::Key;
use crate::limits::MAX_DECODED_SIGNATURE_SIZE;
use crate::utils::base64url;

/// Verifies tokens against a caller-supplied policy
///
/// Verification is a pipeline that stops at the first failure:
/// 1. shape check on the raw string
/// 2. header decode (the claims segment is not touched yet)
/// 3. header policy: allow-list, registered parameters, `typ`
/// 4. signature
/// 5. claims decode and temporal checks
#[derive(Debug, Clone, Default)]
pub struct TokenInspector<C = SystemClock> {
    clock: C,
}

impl TokenInspector {
    /// Inspector using the wall clock
    pub fn system() -> Self {
        Self::default()
    }
}

impl<C: Clock> TokenInspector<C> {
    /// Inspector with an injected time source
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Verify a token and return its header and claims
    ///
    /// With a key, the token must be signed with an allowed algorithm and the
    /// signature must verify under that key; an unsigned token is rejected.
    /// Without a key, the token must be unsigned, and `"none"` must be in the
    /// allow-list.
    pub fn verify(
        &self,
        token: &str,
        key: &Key,
        options: &VerifyOptions,
    ) -> Result<(Header, Claims)> {
        let result = self.run(token, key, options);
        match &result {
            Ok((header, claims)) => tracing::debug!(
                algorithm = header.algorithm().unwrap_or_default(),
                jti = claims.jwt_id().is_some(),
                "verified token"
            ),
            Err(error) => tracing::debug!(%error, "rejected token"),
        }
        result
    }

    fn run(&self, token: &str, key: &Key, options: &VerifyOptions) -> Result<(Header, Claims)> {
        let parsed = ParsedToken::parse(token)?;
        let algorithm = check_header(
            &parsed.header,
            &options.algorithms,
            options.ignore_not_implemented,
            options.checks_optional,
        )?;

        let verified = parsed.verify_signature(algorithm, key)?;
        let (header, claims) = verified.into_parts()?;

        check_claims(
            &claims,
            self.clock.now(),
            options.iat_skew,
            options.checks_optional,
        )?;

        Ok((header, claims))
    }
}

/// Decode a token without checking anything but its shape
///
/// Nothing returned here is trustworthy: no policy, signature or time check
/// runs. Use it to look at a token before verification, for example to pick a
/// key by issuer or `kid`, then call [`TokenInspector::verify`].
pub fn process(token: &str) -> Result<(Header, Claims)> {
    let parsed = ParsedToken::parse(token)?;
    let claims = Claims::decode(parsed.segments.claims)?;
    Ok((parsed.header, claims))
}

/// A well-formed token with a decoded header
///
/// Next step: [`VerifiedToken`] (after the signature check)
struct ParsedToken<'a> {
    segments: Segments<'a>,
    header: Header,
}

impl<'a> ParsedToken<'a> {
    fn parse(token: &'a str) -> Result<Self> {
        let segments = format::split(token)?;
        let header = Header::decode(segments.header)?;
        Ok(Self { segments, header })
    }

    /// Check the signature for an algorithm already accepted by the header policy
    fn verify_signature(self, algorithm: AlgorithmId, key: &Key) -> Result<VerifiedToken<'a>> {
        match get_algorithm(&algorithm) {
            Some(verifier) if key.is_present() => {
                let signature =
                    base64url::decode_bytes(self.segments.signature, MAX_DECODED_SIGNATURE_SIZE)?;
                verifier.verify(self.segments.signing_input().as_bytes(), &signature, key)?;
            }
            // Signed algorithm but nothing to check it with
            Some(_) => return Err(Error::NoKeyNoneNotAllowed),
            // A key holder never accepts an unsigned token
            None if key.is_present() => return Err(Error::SignatureInvalid),
            None if !self.segments.signature.is_empty() => return Err(Error::SignatureInvalid),
            None => {}
        }

        Ok(VerifiedToken {
            segments: self.segments,
            header: self.header,
        })
    }
}

/// A token whose signature matched (or that is legitimately unsigned)
struct VerifiedToken<'a> {
    segments: Segments<'a>,
    header: Header,
}

impl VerifiedToken<'_> {
    fn into_parts(self) -> Result<(Header, Claims)> {
        let claims = Claims::decode(self.segments.claims)?;
        Ok((self.header, claims))
    }
}
