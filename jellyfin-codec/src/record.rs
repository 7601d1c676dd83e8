//! Traits implemented by every generated record, enumeration and builder.

use std::fmt::{Debug, Display};
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{DecodeError, DecodeErrorKind};
use crate::schema::{FieldSpec, WireType, WireValue, find_wire};
use crate::{json, query};

/// Single-use constructor for a record.
///
/// `build` takes the builder by value, so a builder cannot be used again
/// once it has produced its record:
///
/// ```compile_fail
/// use jellyfin_codec::{Builder, record};
///
/// record! {
///     pub struct Tag {
///         name: String => "Name",
///     }
/// }
///
/// let builder = Tag::builder().name("Alice");
/// let first = builder.build();
/// let second = builder.build();
/// ```
pub trait Builder {
    type Output;

    /// Produces the record, consuming the builder.
    fn build(self) -> Self::Output;
}

/// A typed DTO with a static wire layout.
pub trait Record:
    Serialize
    + DeserializeOwned
    + Debug
    + Clone
    + Default
    + PartialEq
    + WireType
    + WireValue
{
    /// Schema name of the record.
    const NAME: &'static str;

    /// Declared fields, in wire emission order.
    const FIELDS: &'static [FieldSpec];

    type Builder: Builder<Output = Self>;

    fn builder() -> Self::Builder;

    fn field(wire: &str) -> Option<&'static FieldSpec> {
        find_wire(Self::FIELDS, wire)
    }

    fn from_json(value: &Value) -> Result<Self, DecodeError> {
        json::from_value(value)
    }

    fn from_json_str(text: &str) -> Result<Self, DecodeError> {
        json::from_str(text)
    }

    /// JSON object with set fields only.
    fn to_json(&self) -> Value {
        match serde_json::to_value(self) {
            Ok(value) => value,
            // Records only hold string-keyed maps.
            Err(err) => panic!("{} is not JSON-encodable: {err}", Self::NAME),
        }
    }

    /// JSON text with set fields only, members in declared order.
    fn to_json_string(&self) -> String {
        match serde_json::to_string(self) {
            Ok(text) => text,
            Err(err) => panic!("{} is not JSON-encodable: {err}", Self::NAME),
        }
    }

    /// Flat (`None`) or deepObject (`Some(prefix)`) query string.
    fn to_query_string(&self, prefix: Option<&str>) -> String {
        match query::to_query_string(self, prefix) {
            Ok(query) => query,
            // Records are objects, which always have a key to sit under.
            Err(err) => panic!("{} is not query-encodable: {err}", Self::NAME),
        }
    }
}

/// A closed set of case-sensitive wire tokens.
pub trait WireEnum:
    Copy + Eq + Debug + Display + FromStr<Err = DecodeError> + 'static
{
    const NAME: &'static str;

    /// Every token, in declaration order.
    const TOKENS: &'static [&'static str];

    fn all() -> &'static [Self];

    fn as_str(&self) -> &'static str;

    fn from_token(token: &str) -> Option<Self>;

    /// Like [`WireEnum::from_token`], reporting the closed set on failure.
    fn decode_token(token: &str) -> Result<Self, DecodeError> {
        Self::from_token(token).ok_or_else(|| {
            DecodeError::new(DecodeErrorKind::UnknownEnumToken {
                token: token.to_owned(),
                expected: Self::TOKENS.to_vec(),
            })
        })
    }
}
