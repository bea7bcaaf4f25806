use super::Claims;
use crate::error::{Error, Result};
use crate::utils::bounds::offset_timestamp;

/// Check the temporal claims against `now`
///
/// Checks run in order `iat`, `nbf`, `exp` and the first failure wins:
/// - `iat` must not be later than `now + iat_skew`
/// - `nbf` must not be later than `now` (`nbf == now` is valid)
/// - `exp` must be later than `now` (`exp == now` is expired)
///
/// Fractional NumericDates are compared at full precision, so `nbf` half a
/// second after `now` is not yet valid and `exp` half a second after `now`
/// has not expired. A missing or `null` claim is an error unless `optional`
/// is set. `iat_skew` is signed:
/// a negative skew requires the token to have been issued at least that long
/// ago.
pub fn check_claims(claims: &Claims, now: i64, iat_skew: i64, optional: bool) -> Result<()> {
    match claims.numeric_date_rounded("iat", f64::ceil)? {
        Some(issued_at) => {
            if issued_at > offset_timestamp(now, iat_skew)? {
                return Err(Error::TokenIssuedInFuture {
                    issued_at,
                    now,
                    skew: iat_skew,
                });
            }
        }
        None => require(optional, "iat")?,
    }

    match claims.numeric_date_rounded("nbf", f64::ceil)? {
        Some(not_before) => {
            if not_before > now {
                return Err(Error::TokenNotYetValid { not_before, now });
            }
        }
        None => require(optional, "nbf")?,
    }

    match claims.numeric_date_rounded("exp", f64::floor)? {
        Some(expired_at) => {
            if expired_at <= now {
                return Err(Error::TokenExpired { expired_at, now });
            }
        }
        None => require(optional, "exp")?,
    }

    Ok(())
}

fn require(optional: bool, name: &str) -> Result<()> {
    if optional {
        Ok(())
    } else {
        Err(Error::TokenMissingClaim(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn make_claims(iat: Option<i64>, nbf: Option<i64>, exp: Option<i64>) -> Claims {
        let mut claims = Claims::new();
        if let Some(iat) = iat {
            claims.set_i64("iat", iat);
        }
        if let Some(nbf) = nbf {
            claims.set_i64("nbf", nbf);
        }
        if let Some(exp) = exp {
            claims.set_i64("exp", exp);
        }
        claims
    }

    #[test]
    fn test_valid_claims() {
        let claims = make_claims(Some(NOW), Some(NOW), Some(NOW + 60));
        assert!(check_claims(&claims, NOW, 0, false).is_ok());
    }

    #[test]
    fn test_expiry_boundary() {
        let claims = make_claims(Some(NOW - 60), Some(NOW - 60), Some(NOW));
        assert_eq!(
            check_claims(&claims, NOW, 0, false),
            Err(Error::TokenExpired {
                expired_at: NOW,
                now: NOW
            })
        );
        assert!(check_claims(&claims, NOW - 1, 0, false).is_ok());
    }

    #[test]
    fn test_not_before_boundary() {
        let claims = make_claims(Some(NOW), Some(NOW), Some(NOW + 60));
        assert!(check_claims(&claims, NOW, 0, false).is_ok());
        assert_eq!(
            check_claims(&claims, NOW - 1, 5, false),
            Err(Error::TokenNotYetValid {
                not_before: NOW,
                now: NOW - 1
            })
        );
    }

    #[test]
    fn test_issued_in_future() {
        let claims = make_claims(Some(NOW + 10), Some(NOW), Some(NOW + 60));
        assert!(matches!(
            check_claims(&claims, NOW, 0, false),
            Err(Error::TokenIssuedInFuture { .. })
        ));
        assert!(check_claims(&claims, NOW, 10, false).is_ok());
        assert!(check_claims(&claims, NOW, 9, false).is_err());
    }

    #[test]
    fn test_negative_skew() {
        let claims = make_claims(Some(NOW), Some(NOW), Some(NOW + 60));
        assert_eq!(
            check_claims(&claims, NOW, -1, false),
            Err(Error::TokenIssuedInFuture {
                issued_at: NOW,
                now: NOW,
                skew: -1
            })
        );
    }

    #[test]
    fn test_first_failure_wins() {
        // Every check fails; iat is reported
        let claims = make_claims(Some(NOW + 10), Some(NOW + 10), Some(NOW - 10));
        assert!(matches!(
            check_claims(&claims, NOW, 0, false),
            Err(Error::TokenIssuedInFuture { .. })
        ));

        let claims = make_claims(None, Some(NOW + 10), Some(NOW - 10));
        assert!(matches!(
            check_claims(&claims, NOW, 0, true),
            Err(Error::TokenNotYetValid { .. })
        ));
    }

    #[test]
    fn test_missing_claims() {
        let cases = [
            (make_claims(None, Some(NOW), Some(NOW + 1)), "iat"),
            (make_claims(Some(NOW), None, Some(NOW + 1)), "nbf"),
            (make_claims(Some(NOW), Some(NOW), None), "exp"),
        ];
        for (claims, name) in cases {
            assert_eq!(
                check_claims(&claims, NOW, 0, false),
                Err(Error::TokenMissingClaim(name.to_string()))
            );
            assert!(check_claims(&claims, NOW, 0, true).is_ok());
        }
    }

    #[test]
    fn test_empty_claims_optional() {
        assert!(check_claims(&Claims::new(), NOW, 0, true).is_ok());
        assert_eq!(
            check_claims(&Claims::new(), NOW, 0, false),
            Err(Error::TokenMissingClaim("iat".to_string()))
        );
    }

    #[test]
    fn test_invalid_claim_type() {
        let claims = Claims::from_json(r#"{"iat":"yesterday"}"#).unwrap();
        assert_eq!(
            check_claims(&claims, NOW, 0, true),
            Err(Error::TokenInvalidClaim("iat".to_string()))
        );
    }

    #[test]
    fn test_fractional_boundaries() {
        let half_past = format!("{NOW}.5");

        let claims = Claims::from_json(&format!(r#"{{"nbf":{half_past}}}"#)).unwrap();
        assert_eq!(
            check_claims(&claims, NOW, 0, true),
            Err(Error::TokenNotYetValid {
                not_before: NOW + 1,
                now: NOW
            })
        );
        assert!(check_claims(&claims, NOW + 1, 0, true).is_ok());

        let claims = Claims::from_json(&format!(r#"{{"exp":{half_past}}}"#)).unwrap();
        assert!(check_claims(&claims, NOW, 0, true).is_ok());
        assert_eq!(
            check_claims(&claims, NOW + 1, 0, true),
            Err(Error::TokenExpired {
                expired_at: NOW,
                now: NOW + 1
            })
        );

        let claims = Claims::from_json(&format!(r#"{{"iat":{half_past}}}"#)).unwrap();
        assert!(check_claims(&claims, NOW, 0, true).is_err());
        assert!(check_claims(&claims, NOW, 1, true).is_ok());
    }

    #[test]
    fn test_null_claims_are_absent() {
        let claims = Claims::from_json(r#"{"iat":null,"nbf":null,"exp":null}"#).unwrap();
        assert!(check_claims(&claims, NOW, 0, true).is_ok());
        assert_eq!(
            check_claims(&claims, NOW, 0, false),
            Err(Error::TokenMissingClaim("iat".to_string()))
        );
    }

    #[test]
    fn test_huge_float_expiry() {
        let claims = Claims::from_json(r#"{"exp":1e20}"#).unwrap();
        assert!(check_claims(&claims, NOW, 0, true).is_ok());
    }

    #[test]
    fn test_skew_overflow() {
        let claims = make_claims(Some(NOW), Some(NOW), Some(NOW + 60));
        assert_eq!(
            check_claims(&claims, i64::MAX, 1, false),
            Err(Error::TimestampOverflow)
        );
    }
}
