use super::GenerateOptions;
use crate::algorithm::{AlgorithmId, get_algorithm};
use crate::claims::Claims;
use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::header::Header;
use crate::keys::Key;
use crate::limits::MAX_JTI_SIZE;
use crate::random::{RandomSource, SystemRandomSource};
use crate::utils::base64url;
use crate::utils::bounds::{duration_seconds, offset_timestamp};

/// Builds and signs new tokens
///
/// Holds only its time and entropy sources; every call to
/// [`generate`](Self::generate) is independent.
#[derive(Debug, Clone, Default)]
pub struct TokenAssembler<C = SystemClock, R = SystemRandomSource> {
    clock: C,
    random: R,
}

impl TokenAssembler {
    /// Assembler using the wall clock and the operating system's entropy
    pub fn system() -> Self {
        Self::default()
    }
}

impl<C: Clock, R: RandomSource> TokenAssembler<C, R> {
    /// Assembler with injected time and entropy sources
    pub fn new(clock: C, random: R) -> Self {
        Self { clock, random }
    }

    /// Generate a token for `claims`
    ///
    /// The header is `{"typ":"JWT","alg":...}` plus any extra header
    /// parameters, where `alg` is the configured algorithm when a key is
    /// present and `"none"` otherwise. The caller's claims are copied and
    /// stamped with:
    /// - `iat`: now
    /// - `nbf`: the configured not-before time, or now
    /// - `exp`: now plus the lifetime if one is set, else the explicit expiry
    ///   if one is set, else whatever `exp` the caller supplied
    /// - `jti`: `jti_size` random bytes, Base64URL encoded, unless the size is 0
    ///
    /// A `jti_size` above 1024 bytes is rejected before anything is allocated.
    ///
    /// Unsigned tokens have an empty signature segment.
    pub fn generate(
        &self,
        claims: &Claims,
        key: &Key,
        options: &GenerateOptions,
    ) -> Result<String> {
        let algorithm = if key.is_present() {
            options.algorithm
        } else {
            AlgorithmId::None
        };

        let header = Header::assemble(algorithm.as_str(), &options.header)?;
        let claims = self.stamp(claims, options)?;

        let signing_input = format!("{}.{}", header.encode(), claims.encode());
        let signature = match get_algorithm(&algorithm) {
            Some(signer) => base64url::encode_bytes(&signer.sign(signing_input.as_bytes(), key)?),
            None => String::new(),
        };

        tracing::debug!(
            algorithm = %algorithm,
            jti = claims.jwt_id().is_some(),
            "generated token"
        );

        Ok(format!("{signing_input}.{signature}"))
    }

    fn stamp(&self, claims: &Claims, options: &GenerateOptions) -> Result<Claims> {
        let now = self.clock.now();
        let mut stamped = claims.clone();

        stamped.set_i64("iat", now);
        stamped.set_i64("nbf", options.not_before.unwrap_or(now));

        if let Some(lifetime) = options.lifetime {
            stamped.set_i64("exp", offset_timestamp(now, duration_seconds(lifetime)?)?);
        } else if let Some(expires) = options.expires {
            stamped.set_i64("exp", expires);
        }

        if options.jti_size > MAX_JTI_SIZE {
            return Err(Error::JtiTooLarge {
                size: options.jti_size,
                max: MAX_JTI_SIZE,
            });
        }
        if options.jti_size > 0 {
            let mut bytes = vec![0u8; options.jti_size];
            self.random.fill(&mut bytes)?;
            stamped.set_string("jti", base64url::encode_bytes(&bytes));
        }

        Ok(stamped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::VirtualClock;
    use crate::test_helper::SeededRandom;
    use miniserde::json::Value;
    use std::time::Duration;

    const NOW: i64 = 1_700_000_000;

    fn assembler() -> TokenAssembler<VirtualClock, SeededRandom> {
        TokenAssembler::new(VirtualClock::new(NOW), SeededRandom::new(1))
    }

    fn decode(token: &str) -> (Header, Claims) {
        let mut parts = token.split('.');
        let header = Header::decode(parts.next().unwrap()).unwrap();
        let claims = Claims::decode(parts.next().unwrap()).unwrap();
        (header, claims)
    }

    #[test]
    fn test_stamps_standard_claims() {
        let mut claims = Claims::new();
        claims.set_string("sub", "user-1");
        let options = GenerateOptions::new()
            .algorithm(AlgorithmId::HS256)
            .lifetime(Duration::from_secs(60));

        let token = assembler()
            .generate(&claims, &Key::symmetric(b"secret"), &options)
            .unwrap();
        let (header, stamped) = decode(&token);

        assert_eq!(header.to_json(), r#"{"alg":"HS256","typ":"JWT"}"#);
        assert_eq!(stamped.subject(), Some("user-1"));
        assert_eq!(stamped.issued_at().unwrap(), Some(NOW));
        assert_eq!(stamped.not_before().unwrap(), Some(NOW));
        assert_eq!(stamped.expiration().unwrap(), Some(NOW + 60));
        assert_eq!(stamped.jwt_id().map(str::len), Some(22));

        // The caller's claims are untouched
        assert_eq!(claims.to_json(), r#"{"sub":"user-1"}"#);
    }

    #[test]
    fn test_no_key_produces_unsigned_token() {
        let token = assembler()
            .generate(&Claims::new(), &Key::Absent, &GenerateOptions::new())
            .unwrap();
        assert!(token.ends_with('.'));
        let (header, _) = decode(&token);
        assert_eq!(header.algorithm(), Some("none"));
    }

    #[test]
    fn test_explicit_none_with_key_is_unsigned() {
        let options = GenerateOptions::new().algorithm(AlgorithmId::None);
        let token = assembler()
            .generate(&Claims::new(), &Key::symmetric(b"secret"), &options)
            .unwrap();
        assert!(token.ends_with('.'));
    }

    #[test]
    fn test_lifetime_wins_over_expires() {
        let options = GenerateOptions::new()
            .lifetime(Duration::from_secs(10))
            .expires(NOW + 1000);
        let token = assembler()
            .generate(&Claims::new(), &Key::Absent, &options)
            .unwrap();
        assert_eq!(decode(&token).1.expiration().unwrap(), Some(NOW + 10));
    }

    #[test]
    fn test_zero_lifetime_still_sets_exp() {
        let options = GenerateOptions::new()
            .lifetime(Duration::ZERO)
            .expires(NOW + 1000);
        let token = assembler()
            .generate(&Claims::new(), &Key::Absent, &options)
            .unwrap();
        assert_eq!(decode(&token).1.expiration().unwrap(), Some(NOW));
    }

    #[test]
    fn test_expires_and_not_before() {
        let options = GenerateOptions::new().expires(NOW + 500).not_before(NOW + 5);
        let token = assembler()
            .generate(&Claims::new(), &Key::Absent, &options)
            .unwrap();
        let (_, claims) = decode(&token);
        assert_eq!(claims.expiration().unwrap(), Some(NOW + 500));
        assert_eq!(claims.not_before().unwrap(), Some(NOW + 5));
    }

    #[test]
    fn test_caller_exp_kept_without_lifetime() {
        let mut claims = Claims::new();
        claims.set_i64("exp", NOW + 42);
        let token = assembler()
            .generate(&claims, &Key::Absent, &GenerateOptions::new())
            .unwrap();
        assert_eq!(decode(&token).1.expiration().unwrap(), Some(NOW + 42));
    }

    #[test]
    fn test_caller_iat_is_overwritten() {
        let mut claims = Claims::new();
        claims.set_i64("iat", 1).set_i64("nbf", 1);
        let token = assembler()
            .generate(&claims, &Key::Absent, &GenerateOptions::new())
            .unwrap();
        let (_, stamped) = decode(&token);
        assert_eq!(stamped.issued_at().unwrap(), Some(NOW));
        assert_eq!(stamped.not_before().unwrap(), Some(NOW));
    }

    #[test]
    fn test_jti_size() {
        let token = assembler()
            .generate(&Claims::new(), &Key::Absent, &GenerateOptions::new().jti_size(0))
            .unwrap();
        assert!(!decode(&token).1.contains("jti"));

        let token = assembler()
            .generate(&Claims::new(), &Key::Absent, &GenerateOptions::new().jti_size(32))
            .unwrap();
        assert_eq!(decode(&token).1.jwt_id().map(str::len), Some(43));
    }

    #[test]
    fn test_oversized_jti_rejected() {
        let options = GenerateOptions::new().jti_size(MAX_JTI_SIZE);
        let token = assembler()
            .generate(&Claims::new(), &Key::Absent, &options)
            .unwrap();
        assert!(decode(&token).1.contains("jti"));

        for size in [MAX_JTI_SIZE + 1, usize::MAX / 2, usize::MAX] {
            let options = GenerateOptions::new().jti_size(size);
            let result = assembler().generate(&Claims::new(), &Key::Absent, &options);
            assert_eq!(
                result,
                Err(Error::JtiTooLarge {
                    size,
                    max: MAX_JTI_SIZE
                })
            );
        }
    }

    #[test]
    fn test_extra_headers() {
        let options = GenerateOptions::new()
            .key_id("k1")
            .header("cty", Value::String("example".to_string()));
        let token = assembler()
            .generate(&Claims::new(), &Key::Absent, &options)
            .unwrap();
        let (header, _) = decode(&token);
        assert_eq!(header.key_id(), Some("k1"));
        assert_eq!(header.content_type(), Some("example"));
    }

    #[test]
    fn test_header_conflict() {
        let options = GenerateOptions::new().header("typ", Value::String("JOSE".to_string()));
        let result = assembler().generate(&Claims::new(), &Key::Absent, &options);
        assert_eq!(result, Err(Error::HeaderConflict(vec!["typ".to_string()])));
    }

    #[test]
    fn test_lifetime_overflow() {
        let assembler =
            TokenAssembler::new(VirtualClock::new(i64::MAX - 1), SeededRandom::new(1));
        let options = GenerateOptions::new().lifetime(Duration::from_secs(10));
        let result = assembler.generate(&Claims::new(), &Key::Absent, &options);
        assert_eq!(result, Err(Error::TimestampOverflow));
    }

    #[test]
    fn test_key_type_mismatch_surfaces() {
        let options = GenerateOptions::new().algorithm(AlgorithmId::RS256);
        let result = assembler().generate(&Claims::new(), &Key::symmetric(b"secret"), &options);
        assert!(matches!(result, Err(Error::KeyTypeMismatch { .. })));
    }
}
