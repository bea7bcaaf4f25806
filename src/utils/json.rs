//! JSON object segments
//!
//! Header and claims are both JSON objects carried in a Base64URL segment.
//! `miniserde` keeps object keys in a `BTreeMap`, so encoding is canonical:
//! the same object always serializes to the same bytes.

use crate::error::{Error, Result};
use crate::utils::base64url;
use miniserde::json::{self, Object, Value};

/// Decode a Base64URL segment holding a JSON object
///
/// `what` names the segment in error messages ("header", "claims").
pub(crate) fn decode_object(segment: &str, max_size: usize, what: &str) -> Result<Object> {
    let text = base64url::decode_string(segment, max_size)?;
    match json::from_str::<Value>(&text) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(Error::FormatInvalidJson(format!(
            "{what} is not a JSON object"
        ))),
        Err(e) => Err(Error::FormatInvalidJson(format!(
            "Failed to parse {what}: {e}"
        ))),
    }
}

/// Encode a JSON object as an unpadded Base64URL segment
pub(crate) fn encode_object(object: &Object) -> String {
    base64url::encode(&json::to_string(object))
}
