//! Token header
//!
//! The header is kept as the raw JSON object it was decoded from (or
//! assembled into) so extension parameters survive untouched. Typed
//! accessors cover the parameters this crate acts on.

mod policy;
mod registry;

pub use policy::check_header;
pub use registry::{HeaderParameter, REGISTERED_HEADERS, lookup};

use crate::error::{Error, Result};
use crate::limits::MAX_DECODED_HEADER_SIZE;
use crate::utils::json;
use miniserde::json::{Object, Value};

/// Header value that every assembled token carries in `typ`
pub const TOKEN_TYPE: &str = "JWT";

/// Token header
#[derive(Clone)]
pub struct Header {
    fields: Object,
}

impl Header {
    /// Assemble the header of a new token
    ///
    /// `extensions` may add any parameter except `typ` and `alg`; redefining
    /// either is a [`Error::HeaderConflict`] listing the offending keys.
    pub(crate) fn assemble(algorithm: &str, extensions: &Object) -> Result<Self> {
        let conflicts: Vec<String> = extensions
            .keys()
            .filter(|key| key.as_str() == "typ" || key.as_str() == "alg")
            .cloned()
            .collect();
        if !conflicts.is_empty() {
            return Err(Error::HeaderConflict(conflicts));
        }

        let mut fields = extensions.clone();
        fields.insert("typ".to_string(), Value::String(TOKEN_TYPE.to_string()));
        fields.insert("alg".to_string(), Value::String(algorithm.to_string()));
        Ok(Self { fields })
    }

    /// Decode a header segment on its own, without touching the rest of the token
    pub(crate) fn decode(segment: &str) -> Result<Self> {
        json::decode_object(segment, MAX_DECODED_HEADER_SIZE, "header").map(Self::from)
    }

    pub(crate) fn encode(&self) -> String {
        json::encode_object(&self.fields)
    }

    /// Raw `alg` value, if present
    pub fn algorithm_value(&self) -> Option<&Value> {
        self.fields.get("alg")
    }

    /// `alg` as a string; `None` if absent or not a string
    pub fn algorithm(&self) -> Option<&str> {
        self.get_str("alg")
    }

    /// `typ` as a string
    pub fn token_type(&self) -> Option<&str> {
        self.get_str("typ")
    }

    /// `kid` as a string
    pub fn key_id(&self) -> Option<&str> {
        self.get_str("kid")
    }

    /// `cty` as a string
    pub fn content_type(&self) -> Option<&str> {
        self.get_str("cty")
    }

    /// Any header parameter
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    fn get_str(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(Value::String(value)) => Some(value),
            _ => None,
        }
    }

    /// Parameter names, in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn as_object(&self) -> &Object {
        &self.fields
    }

    /// Canonical JSON text of the header
    pub fn to_json(&self) -> String {
        miniserde::json::to_string(&self.fields)
    }
}

impl From<Object> for Header {
    fn from(fields: Object) -> Self {
        Self { fields }
    }
}

impl std::fmt::Debug for Header {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Header").field(&self.to_json()).finish()
    }
}
