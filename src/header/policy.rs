use super::{Header, TOKEN_TYPE, registry};
use crate::algorithm::{AlgorithmId, AlgorithmPolicy};
use crate::error::{Error, Result};
use miniserde::json;

/// Check a decoded header against the caller's policy
///
/// Checks run in a fixed order and the first failure is returned:
/// 1. `alg` is present and not `null`
/// 2. `alg` is in the allow-list (exact string match; `"none"` included)
/// 3. every parameter is registered and implemented, unless
///    `ignore_not_implemented` is set; `crit` is refused either way since no
///    critical extension is understood
/// 4. `typ` is exactly `"JWT"`; it may only be absent (or `null`) when
///    `checks_optional`
///
/// Returns the accepted algorithm.
pub fn check_header(
    header: &Header,
    policy: &AlgorithmPolicy,
    ignore_not_implemented: bool,
    checks_optional: bool,
) -> Result<AlgorithmId> {
    let algorithm = match header.algorithm_value() {
        None | Some(json::Value::Null) => return Err(Error::AlgorithmMissing),
        Some(json::Value::String(name)) => policy.validate(name)?,
        // A non-string value can never match an allow-listed name
        Some(other) => {
            return Err(Error::AlgorithmNotAllowed {
                found: json::to_string(other),
                allowed: policy
                    .allowed_algorithms()
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            });
        }
    };

    if ignore_not_implemented {
        if header.contains("crit") {
            return Err(Error::HeaderNotImplemented("crit".to_string()));
        }
    } else {
        for name in header.names() {
            match registry::lookup(name) {
                None => return Err(Error::HeaderUnknown(name.to_string())),
                Some(entry) if !entry.implemented => {
                    return Err(Error::HeaderNotImplemented(name.to_string()));
                }
                Some(_) => {}
            }
        }
    }

    match header.get("typ") {
        None | Some(json::Value::Null) if checks_optional => {}
        None | Some(json::Value::Null) => return Err(Error::HeaderTypeMissing),
        Some(json::Value::String(typ)) if typ == TOKEN_TYPE => {}
        Some(other) => return Err(Error::HeaderTypeMismatch(json::to_string(other))),
    }

    Ok(algorithm)
}
