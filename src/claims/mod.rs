//! Token claims
//!
//! Claims are an arbitrary JSON object. The registered claims (`iss`, `sub`,
//! `aud`, `exp`, `nbf`, `iat`, `jti`) get typed accessors; everything else is
//! reachable through [`Claims::get`].

mod validator;

pub use validator::check_claims;

use crate::error::{Error, Result};
use crate::limits::MAX_DECODED_PAYLOAD_SIZE;
use crate::utils::json;
use miniserde::json::{Number, Object, Value};

/// JWT claims set
#[derive(Clone, Default)]
pub struct Claims {
    fields: Object,
}

impl Claims {
    /// Create an empty claims set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse claims from JSON text; the text must be a JSON object
    pub fn from_json(text: &str) -> Result<Self> {
        match miniserde::json::from_str::<Value>(text) {
            Ok(Value::Object(fields)) => Ok(Self { fields }),
            Ok(_) => Err(Error::FormatInvalidJson(
                "claims is not a JSON object".to_string(),
            )),
            Err(e) => Err(Error::FormatInvalidJson(format!(
                "Failed to parse claims: {e}"
            ))),
        }
    }

    pub(crate) fn decode(segment: &str) -> Result<Self> {
        json::decode_object(segment, MAX_DECODED_PAYLOAD_SIZE, "claims").map(Self::from)
    }

    pub(crate) fn encode(&self) -> String {
        json::encode_object(&self.fields)
    }

    /// Set a claim to any JSON value, replacing an existing one
    pub fn set_value(&mut self, name: impl Into<String>, value: Value) -> &mut Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Set a string claim
    pub fn set_string(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.set_value(name, Value::String(value.into()))
    }

    /// Set an integer claim
    pub fn set_i64(&mut self, name: impl Into<String>, value: i64) -> &mut Self {
        let number = match u64::try_from(value) {
            Ok(unsigned) => Number::U64(unsigned),
            Err(_) => Number::I64(value),
        };
        self.set_value(name, Value::Number(number))
    }

    /// Set a boolean claim
    pub fn set_bool(&mut self, name: impl Into<String>, value: bool) -> &mut Self {
        self.set_value(name, Value::Bool(value))
    }

    /// Remove a claim, returning its previous value
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    /// Any claim
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// A claim as a string; `None` if absent or not a string
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(Value::String(value)) => Some(value),
            _ => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Claim names, in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Issuer (iss)
    pub fn issuer(&self) -> Option<&str> {
        self.get_str("iss")
    }

    /// Subject (sub)
    pub fn subject(&self) -> Option<&str> {
        self.get_str("sub")
    }

    /// Audience (aud), when given as a single string
    pub fn audience(&self) -> Option<&str> {
        self.get_str("aud")
    }

    /// JWT ID (jti)
    pub fn jwt_id(&self) -> Option<&str> {
        self.get_str("jti")
    }

    /// Expiration time (exp)
    pub fn expiration(&self) -> Result<Option<i64>> {
        self.numeric_date("exp")
    }

    /// Not before (nbf)
    pub fn not_before(&self) -> Result<Option<i64>> {
        self.numeric_date("nbf")
    }

    /// Issued at (iat)
    pub fn issued_at(&self) -> Result<Option<i64>> {
        self.numeric_date("iat")
    }

    /// Read a claim as a NumericDate in whole seconds
    ///
    /// Fractional values are truncated toward zero and out-of-range values
    /// saturate to the `i64` range. A missing or `null` claim is `None`; any
    /// other non-numeric value is [`Error::TokenInvalidClaim`].
    pub fn numeric_date(&self, name: &str) -> Result<Option<i64>> {
        self.numeric_date_rounded(name, f64::trunc)
    }

    /// Like [`numeric_date`](Self::numeric_date), with fractional values
    /// rounded by `round`
    ///
    /// Against an integer `now`, `ceil` keeps `value > now` exact and `floor`
    /// keeps `value <= now` exact.
    pub(crate) fn numeric_date_rounded(
        &self,
        name: &str,
        round: fn(f64) -> f64,
    ) -> Result<Option<i64>> {
        match self.fields.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(Number::I64(value))) => Ok(Some(*value)),
            Some(Value::Number(Number::U64(value))) => {
                Ok(Some(i64::try_from(*value).unwrap_or(i64::MAX)))
            }
            // `as` saturates and maps NaN to zero
            Some(Value::Number(Number::F64(value))) if !value.is_nan() => {
                Ok(Some(round(*value) as i64))
            }
            Some(_) => Err(Error::TokenInvalidClaim(name.to_string())),
        }
    }

    pub fn as_object(&self) -> &Object {
        &self.fields
    }

    /// Canonical JSON text of the claims
    pub fn to_json(&self) -> String {
        miniserde::json::to_string(&self.fields)
    }
}

impl From<Object> for Claims {
    fn from(fields: Object) -> Self {
        Self { fields }
    }
}

impl std::fmt::Debug for Claims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Claims").field(&self.to_json()).finish()
    }
}
