//! JSON decoding with wire-name paths in every error.
//!
//! Records derive `serde::Deserialize`, but `serde_json` flattens failures
//! into prose. Decoding here walks a borrowed [`serde_json::Value`] with a
//! deserializer whose error type is [`DecodeError`], so each failure keeps
//! its kind and the path of keys and indices that led to it.

use serde::de::{
    self, DeserializeOwned, DeserializeSeed, IntoDeserializer, MapAccess,
    SeqAccess, Unexpected, Visitor,
};
use serde::forward_to_deserialize_any;
use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::config::NullFields;
use crate::error::{DecodeError, DecodeErrorKind};

/// Decodes `T` from a parsed JSON value, treating `null` as unset.
pub fn from_value<T: DeserializeOwned>(value: &Value) -> Result<T, DecodeError> {
    from_value_with(value, NullFields::default())
}

/// Decodes `T` from a parsed JSON value with an explicit `null` policy.
pub fn from_value_with<T: DeserializeOwned>(
    value: &Value,
    nulls: NullFields,
) -> Result<T, DecodeError> {
    T::deserialize(ValueDeserializer { value, nulls }).map_err(|err| {
        debug!(
            target: "jellyfin_codec::json",
            type_name = std::any::type_name::<T>(),
            path = %err.path,
            "decode failed: {}",
            err.kind
        );
        err
    })
}

/// Parses JSON text and decodes `T` from it.
pub fn from_str<T: DeserializeOwned>(text: &str) -> Result<T, DecodeError> {
    from_str_with(text, NullFields::default())
}

pub fn from_str_with<T: DeserializeOwned>(
    text: &str,
    nulls: NullFields,
) -> Result<T, DecodeError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|err| DecodeError::syntax(err.to_string()))?;
    from_value_with(&value, nulls)
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Unexpected::Unsigned(u)
            } else if let Some(i) = n.as_i64() {
                Unexpected::Signed(i)
            } else {
                Unexpected::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

fn render_leaf(value: &Value) -> String {
    match value {
        Value::String(s) => format!("string {s:?}"),
        Value::Number(n) => format!("number `{n}`"),
        Value::Bool(b) => format!("boolean `{b}`"),
        Value::Null => "null".to_owned(),
        Value::Array(_) => "array".to_owned(),
        Value::Object(_) => "object".to_owned(),
    }
}

struct ValueDeserializer<'a> {
    value: &'a Value,
    nulls: NullFields,
}

impl ValueDeserializer<'_> {
    fn visit_number<'de, V: Visitor<'de>>(
        n: &Number,
        visitor: V,
    ) -> Result<V::Value, DecodeError> {
        if let Some(u) = n.as_u64() {
            visitor.visit_u64(u)
        } else if let Some(i) = n.as_i64() {
            visitor.visit_i64(i)
        } else {
            visitor.visit_f64(n.as_f64().unwrap_or(f64::NAN))
        }
    }

    fn mismatch<V>(&self, expected: &dyn de::Expected) -> Result<V, DecodeError> {
        Err(de::Error::invalid_type(unexpected(self.value), expected))
    }
}

impl<'de, 'a: 'de> de::Deserializer<'de> for ValueDeserializer<'a> {
    type Error = DecodeError;

    fn deserialize_any<V: Visitor<'de>>(
        self,
        visitor: V,
    ) -> Result<V::Value, DecodeError> {
        let value = self.value;
        let result = match value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(*b),
            Value::Number(n) => Self::visit_number(n, visitor),
            Value::String(s) => visitor.visit_borrowed_str(s),
            Value::Array(items) => visitor.visit_seq(SeqRef::new(&self, items)),
            Value::Object(map) => visitor.visit_map(MapRef::new(&self, map)),
        };
        result.map_err(|err| err.with_actual(|| render_leaf(value)))
    }

    fn deserialize_option<V: Visitor<'de>>(
        self,
        visitor: V,
    ) -> Result<V::Value, DecodeError> {
        match (self.value, self.nulls) {
            (Value::Null, NullFields::Unset) => visitor.visit_none(),
            (Value::Null, NullFields::Reject) => {
                Err(DecodeError::new(DecodeErrorKind::ShapeMismatch {
                    expected: "a value (null is rejected)".to_owned(),
                    actual: "null".to_owned(),
                }))
            }
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, DecodeError> {
        match self.value {
            Value::Object(map) => visitor.visit_map(MapRef::new(&self, map)),
            _ => self.mismatch(&visitor),
        }
    }

    fn deserialize_map<V: Visitor<'de>>(
        self,
        visitor: V,
    ) -> Result<V::Value, DecodeError> {
        match self.value {
            Value::Object(map) => visitor.visit_map(MapRef::new(&self, map)),
            _ => self.mismatch(&visitor),
        }
    }

    fn deserialize_seq<V: Visitor<'de>>(
        self,
        visitor: V,
    ) -> Result<V::Value, DecodeError> {
        match self.value {
            Value::Array(items) => visitor.visit_seq(SeqRef::new(&self, items)),
            _ => self.mismatch(&visitor),
        }
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, DecodeError> {
        match self.value {
            Value::String(token) => {
                visitor.visit_enum(token.as_str().into_deserializer())
            }
            _ => self.mismatch(&visitor),
        }
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, DecodeError> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(
        self,
        visitor: V,
    ) -> Result<V::Value, DecodeError> {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct tuple tuple_struct identifier
    }
}

struct SeqRef<'a> {
    items: std::slice::Iter<'a, Value>,
    index: usize,
    nulls: NullFields,
}

impl<'a> SeqRef<'a> {
    fn new(parent: &ValueDeserializer<'a>, items: &'a [Value]) -> Self {
        SeqRef {
            items: items.iter(),
            index: 0,
            nulls: parent.nulls,
        }
    }
}

impl<'de, 'a: 'de> SeqAccess<'de> for SeqRef<'a> {
    type Error = DecodeError;

    fn next_element_seed<T: DeserializeSeed<'de>>(
        &mut self,
        seed: T,
    ) -> Result<Option<T::Value>, DecodeError> {
        let Some(value) = self.items.next() else {
            return Ok(None);
        };
        let index = self.index;
        self.index += 1;
        seed.deserialize(ValueDeserializer {
            value,
            nulls: self.nulls,
        })
        .map(Some)
        .map_err(|err| err.within_index(index))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.items.len())
    }
}

struct MapRef<'a> {
    entries: serde_json::map::Iter<'a>,
    pending: Option<(&'a String, &'a Value)>,
    nulls: NullFields,
}

impl<'a> MapRef<'a> {
    fn new(parent: &ValueDeserializer<'a>, map: &'a Map<String, Value>) -> Self {
        MapRef {
            entries: map.iter(),
            pending: None,
            nulls: parent.nulls,
        }
    }
}

impl<'de, 'a: 'de> MapAccess<'de> for MapRef<'a> {
    type Error = DecodeError;

    fn next_key_seed<K: DeserializeSeed<'de>>(
        &mut self,
        seed: K,
    ) -> Result<Option<K::Value>, DecodeError> {
        let Some((key, value)) = self.entries.next() else {
            return Ok(None);
        };
        self.pending = Some((key, value));
        let name =
            de::value::BorrowedStrDeserializer::<DecodeError>::new(key.as_str());
        seed.deserialize(name)
            .map(Some)
            .map_err(|err| err.within_key(key))
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(
        &mut self,
        seed: V,
    ) -> Result<V::Value, DecodeError> {
        let Some((key, value)) = self.pending.take() else {
            return Err(de::Error::custom("map value requested before its key"));
        };
        seed.deserialize(ValueDeserializer {
            value,
            nulls: self.nulls,
        })
        .map_err(|err| err.within_key(key))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Stream {
        #[serde(rename = "Index", default)]
        index: Option<i32>,
        #[serde(rename = "Codec", default)]
        codec: Option<String>,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Source {
        #[serde(rename = "Id", default)]
        id: Option<uuid::Uuid>,
        #[serde(rename = "MediaStreams", default)]
        media_streams: Option<Vec<Stream>>,
        #[serde(rename = "RequiredHttpHeaders", default)]
        headers: Option<BTreeMap<String, String>>,
    }

    #[test]
    fn decodes_nested_values() {
        let source: Source = from_value(&json!({
            "Id": "7f3c1b4e-0000-4000-8000-00000000abcd",
            "MediaStreams": [{"Index": 0, "Codec": "h264"}, {"Index": 1}],
            "RequiredHttpHeaders": {"X-Token": "abc"},
            "Unrelated": [1, 2, 3]
        }))
        .expect("decode");

        let streams = source.media_streams.expect("streams");
        assert_eq!(streams.len(), 2);
        assert_eq!(streams[1].codec, None);
        assert_eq!(
            source.headers.expect("headers").get("X-Token").map(String::as_str),
            Some("abc")
        );
    }

    #[test]
    fn shape_mismatch_carries_path() {
        let err = from_value::<Source>(&json!({
            "MediaStreams": [{"Index": 0}, {"Index": "one"}]
        }))
        .expect_err("string index must fail");

        assert_eq!(err.path.to_string(), "MediaStreams[1].Index");
        assert!(err.is_shape_mismatch());
        match err.kind {
            DecodeErrorKind::ShapeMismatch { expected, actual } => {
                assert_eq!(expected, "i32");
                assert_eq!(actual, "string \"one\"");
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn malformed_uuid_reports_leaf_value() {
        let err = from_value::<Source>(&json!({"Id": "not-a-uuid"}))
            .expect_err("bad uuid");
        assert_eq!(err.path.to_string(), "Id");
        match err.kind {
            DecodeErrorKind::InvalidValue { actual, .. } => {
                assert_eq!(actual.as_deref(), Some("string \"not-a-uuid\""));
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn null_is_unset_unless_rejected() {
        let doc = json!({"Index": null, "Codec": "aac"});
        let stream: Stream = from_value(&doc).expect("null as unset");
        assert_eq!(stream.index, None);

        let err = from_value_with::<Stream>(&doc, NullFields::Reject)
            .expect_err("null rejected");
        assert_eq!(err.path.to_string(), "Index");
    }

    #[test]
    fn array_is_not_a_record() {
        let err = from_value::<Stream>(&json!([0, "h264"])).expect_err("array");
        assert!(err.path.is_root());
        assert!(err.is_shape_mismatch());
    }

    #[test]
    fn syntax_errors_are_reported() {
        let err = from_str::<Stream>("{\"Index\": ").expect_err("truncated");
        assert!(matches!(err.kind, DecodeErrorKind::Syntax { .. }));
    }
}
