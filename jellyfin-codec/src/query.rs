//! URL query-string encoding of serializable values.
//!
//! Without a prefix a record encodes in form style: `Name=Alice`, nested
//! records as `Item[Name]=...`, scalar sequences by repeating the key. With
//! a prefix every key is addressed deepObject style: `Filter[Name]=...`,
//! `Filter[Conditions][0][Property]=...`, `Filter[Headers][X-Token]=...`.
//!
//! Values and map keys are percent-encoded; wire names, the prefix and the
//! brackets are emitted as they are. Unset fields, `None`, `null` and empty
//! collections produce nothing.

use serde::Serialize;
use serde::ser::{self, Impossible};
use tracing::trace;

use crate::config::FlatSequences;
use crate::error::EncodeError;

/// Encodes `value` as a query string in flat (`None`) or deepObject
/// (`Some(prefix)`) mode.
pub fn to_query_string<T: Serialize + ?Sized>(
    value: &T,
    prefix: Option<&str>,
) -> Result<String, EncodeError> {
    to_query_string_with(value, prefix, FlatSequences::default())
}

pub fn to_query_string_with<T: Serialize + ?Sized>(
    value: &T,
    prefix: Option<&str>,
    sequences: FlatSequences,
) -> Result<String, EncodeError> {
    let pairs = to_query_pairs(value, prefix, sequences)?;
    Ok(join_pairs(&pairs))
}

/// Same addressing as [`to_query_string`], returning the `(key, value)`
/// pairs with values already percent-encoded.
pub fn to_query_pairs<T: Serialize + ?Sized>(
    value: &T,
    prefix: Option<&str>,
    sequences: FlatSequences,
) -> Result<Vec<(String, String)>, EncodeError> {
    let mut out = Vec::new();
    let slot = prefix.map(Slot::named);
    value.serialize(QuerySerializer {
        out: &mut out,
        slot,
        sequences,
    })?;
    trace!(
        target: "jellyfin_codec::query",
        prefix,
        pairs = out.len(),
        "encoded query string"
    );
    Ok(out)
}

pub(crate) fn join_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Renders one scalar the way it appears on the right of `=`, before
/// percent-encoding. Anything other than a single scalar is rejected.
pub fn scalar_text<T: Serialize + ?Sized>(
    value: &T,
) -> Result<Option<String>, EncodeError> {
    value.serialize(ScalarSerializer)
}

pub(crate) fn encode_component(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

fn float_text<F>(value: F, is_finite: bool) -> String
where
    F: Serialize + ToString,
{
    // JSON number spelling (`1.0`, `0.25`) when representable.
    if is_finite {
        serde_json::to_string(&value).unwrap_or_else(|_| value.to_string())
    } else {
        value.to_string()
    }
}

/// Where a value lands in the output.
///
/// `scalar_key` is the key a scalar is emitted under, `compound_key` the
/// prefix for anything nested below. They differ only for elements of a
/// scalar sequence in flat mode, which repeat their field's key.
#[derive(Debug, Clone)]
struct Slot {
    scalar_key: String,
    compound_key: String,
    /// Directly under an unprefixed root.
    flat: bool,
}

impl Slot {
    fn named(key: &str) -> Self {
        Slot {
            scalar_key: key.to_owned(),
            compound_key: key.to_owned(),
            flat: false,
        }
    }

    fn nested(key: String) -> Self {
        Slot {
            scalar_key: key.clone(),
            compound_key: key,
            flat: false,
        }
    }

    fn member(parent: Option<&Slot>, name: &str) -> Self {
        match parent {
            None => Slot {
                scalar_key: name.to_owned(),
                compound_key: name.to_owned(),
                flat: true,
            },
            Some(parent) => {
                Slot::nested(format!("{}[{}]", parent.compound_key, name))
            }
        }
    }

    fn element(&self, index: usize, sequences: FlatSequences) -> Self {
        let compound_key = format!("{}[{index}]", self.compound_key);
        let scalar_key = match (self.flat, sequences) {
            (true, FlatSequences::Repeat) => self.scalar_key.clone(),
            _ => compound_key.clone(),
        };
        Slot {
            scalar_key,
            compound_key,
            flat: false,
        }
    }
}

struct QuerySerializer<'o> {
    out: &'o mut Vec<(String, String)>,
    /// `None` at an unprefixed root.
    slot: Option<Slot>,
    sequences: FlatSequences,
}

impl<'o> QuerySerializer<'o> {
    fn emit(self, raw: &str) -> Result<(), EncodeError> {
        let slot = self.slot.ok_or(EncodeError::UnnamedValue("scalar"))?;
        self.out.push((slot.scalar_key, encode_component(raw)));
        Ok(())
    }

    fn compound(self) -> Compound<'o> {
        Compound {
            out: self.out,
            slot: self.slot,
            sequences: self.sequences,
            index: 0,
            pending_key: None,
        }
    }

    fn indexed(self, what: &'static str) -> Result<Compound<'o>, EncodeError> {
        if self.slot.is_none() {
            return Err(EncodeError::UnnamedValue(what));
        }
        Ok(self.compound())
    }

    fn variant_slot(self, variant: &str) -> QuerySerializer<'o> {
        let slot = Slot::member(self.slot.as_ref(), variant);
        QuerySerializer {
            out: self.out,
            slot: Some(slot),
            sequences: self.sequences,
        }
    }
}

impl<'o> ser::Serializer for QuerySerializer<'o> {
    type Ok = ();
    type Error = EncodeError;
    type SerializeSeq = Compound<'o>;
    type SerializeTuple = Compound<'o>;
    type SerializeTupleStruct = Compound<'o>;
    type SerializeTupleVariant = Compound<'o>;
    type SerializeMap = Compound<'o>;
    type SerializeStruct = Compound<'o>;
    type SerializeStructVariant = Compound<'o>;

    fn serialize_bool(self, v: bool) -> Result<(), EncodeError> {
        self.emit(if v { "true" } else { "false" })
    }

    fn serialize_i8(self, v: i8) -> Result<(), EncodeError> {
        self.emit(&v.to_string())
    }

    fn serialize_i16(self, v: i16) -> Result<(), EncodeError> {
        self.emit(&v.to_string())
    }

    fn serialize_i32(self, v: i32) -> Result<(), EncodeError> {
        self.emit(&v.to_string())
    }

    fn serialize_i64(self, v: i64) -> Result<(), EncodeError> {
        self.emit(&v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<(), EncodeError> {
        self.emit(&v.to_string())
    }

    fn serialize_u16(self, v: u16) -> Result<(), EncodeError> {
        self.emit(&v.to_string())
    }

    fn serialize_u32(self, v: u32) -> Result<(), EncodeError> {
        self.emit(&v.to_string())
    }

    fn serialize_u64(self, v: u64) -> Result<(), EncodeError> {
        self.emit(&v.to_string())
    }

    fn serialize_f32(self, v: f32) -> Result<(), EncodeError> {
        self.emit(&float_text(v, v.is_finite()))
    }

    fn serialize_f64(self, v: f64) -> Result<(), EncodeError> {
        self.emit(&float_text(v, v.is_finite()))
    }

    fn serialize_char(self, v: char) -> Result<(), EncodeError> {
        self.emit(v.encode_utf8(&mut [0; 4]))
    }

    fn serialize_str(self, v: &str) -> Result<(), EncodeError> {
        self.emit(v)
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<(), EncodeError> {
        Err(EncodeError::UnsupportedValue("byte array"))
    }

    fn serialize_none(self) -> Result<(), EncodeError> {
        Ok(())
    }

    fn serialize_some<T: Serialize + ?Sized>(
        self,
        value: &T,
    ) -> Result<(), EncodeError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), EncodeError> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<(), EncodeError> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
    ) -> Result<(), EncodeError> {
        self.emit(variant)
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<(), EncodeError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<(), EncodeError> {
        value.serialize(self.variant_slot(variant))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Compound<'o>, EncodeError> {
        self.indexed("sequence")
    }

    fn serialize_tuple(self, _len: usize) -> Result<Compound<'o>, EncodeError> {
        self.indexed("tuple")
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Compound<'o>, EncodeError> {
        self.indexed("tuple")
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Compound<'o>, EncodeError> {
        Ok(self.variant_slot(variant).compound())
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Compound<'o>, EncodeError> {
        Ok(self.compound())
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Compound<'o>, EncodeError> {
        Ok(self.compound())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Compound<'o>, EncodeError> {
        Ok(self.variant_slot(variant).compound())
    }
}

struct Compound<'o> {
    out: &'o mut Vec<(String, String)>,
    slot: Option<Slot>,
    sequences: FlatSequences,
    index: usize,
    pending_key: Option<String>,
}

impl Compound<'_> {
    fn element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EncodeError> {
        let slot = self
            .slot
            .as_ref()
            .map(|slot| slot.element(self.index, self.sequences));
        self.index += 1;
        value.serialize(QuerySerializer {
            out: &mut *self.out,
            slot,
            sequences: self.sequences,
        })
    }

    fn member<T: Serialize + ?Sized>(
        &mut self,
        name: &str,
        value: &T,
    ) -> Result<(), EncodeError> {
        let slot = Slot::member(self.slot.as_ref(), name);
        value.serialize(QuerySerializer {
            out: &mut *self.out,
            slot: Some(slot),
            sequences: self.sequences,
        })
    }
}

impl ser::SerializeSeq for Compound<'_> {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_element<T: Serialize + ?Sized>(
        &mut self,
        value: &T,
    ) -> Result<(), EncodeError> {
        self.element(value)
    }

    fn end(self) -> Result<(), EncodeError> {
        Ok(())
    }
}

impl ser::SerializeTuple for Compound<'_> {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_element<T: Serialize + ?Sized>(
        &mut self,
        value: &T,
    ) -> Result<(), EncodeError> {
        self.element(value)
    }

    fn end(self) -> Result<(), EncodeError> {
        Ok(())
    }
}

impl ser::SerializeTupleStruct for Compound<'_> {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        value: &T,
    ) -> Result<(), EncodeError> {
        self.element(value)
    }

    fn end(self) -> Result<(), EncodeError> {
        Ok(())
    }
}

impl ser::SerializeTupleVariant for Compound<'_> {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        value: &T,
    ) -> Result<(), EncodeError> {
        self.element(value)
    }

    fn end(self) -> Result<(), EncodeError> {
        Ok(())
    }
}

impl ser::SerializeMap for Compound<'_> {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_key<T: Serialize + ?Sized>(
        &mut self,
        key: &T,
    ) -> Result<(), EncodeError> {
        let key = key.serialize(KeySerializer)?;
        self.pending_key = Some(encode_component(&key));
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(
        &mut self,
        value: &T,
    ) -> Result<(), EncodeError> {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| EncodeError::Custom("map value without a key".into()))?;
        self.member(&key, value)
    }

    fn end(self) -> Result<(), EncodeError> {
        Ok(())
    }
}

impl ser::SerializeStruct for Compound<'_> {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), EncodeError> {
        self.member(key, value)
    }

    fn end(self) -> Result<(), EncodeError> {
        Ok(())
    }
}

impl ser::SerializeStructVariant for Compound<'_> {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), EncodeError> {
        self.member(key, value)
    }

    fn end(self) -> Result<(), EncodeError> {
        Ok(())
    }
}

macro_rules! reject_compounds {
    ($err:path) => {
        fn serialize_bytes(self, _v: &[u8]) -> Result<Self::Ok, EncodeError> {
            Err($err("byte array"))
        }

        fn serialize_unit_struct(
            self,
            _name: &'static str,
        ) -> Result<Self::Ok, EncodeError> {
            Err($err("unit struct"))
        }

        fn serialize_newtype_variant<T: Serialize + ?Sized>(
            self,
            _name: &'static str,
            _index: u32,
            _variant: &'static str,
            _value: &T,
        ) -> Result<Self::Ok, EncodeError> {
            Err($err("enum variant"))
        }

        fn serialize_seq(
            self,
            _len: Option<usize>,
        ) -> Result<Self::SerializeSeq, EncodeError> {
            Err($err("sequence"))
        }

        fn serialize_tuple(
            self,
            _len: usize,
        ) -> Result<Self::SerializeTuple, EncodeError> {
            Err($err("tuple"))
        }

        fn serialize_tuple_struct(
            self,
            _name: &'static str,
            _len: usize,
        ) -> Result<Self::SerializeTupleStruct, EncodeError> {
            Err($err("tuple"))
        }

        fn serialize_tuple_variant(
            self,
            _name: &'static str,
            _index: u32,
            _variant: &'static str,
            _len: usize,
        ) -> Result<Self::SerializeTupleVariant, EncodeError> {
            Err($err("enum variant"))
        }

        fn serialize_map(
            self,
            _len: Option<usize>,
        ) -> Result<Self::SerializeMap, EncodeError> {
            Err($err("map"))
        }

        fn serialize_struct(
            self,
            _name: &'static str,
            _len: usize,
        ) -> Result<Self::SerializeStruct, EncodeError> {
            Err($err("struct"))
        }

        fn serialize_struct_variant(
            self,
            _name: &'static str,
            _index: u32,
            _variant: &'static str,
            _len: usize,
        ) -> Result<Self::SerializeStructVariant, EncodeError> {
            Err($err("enum variant"))
        }
    };
}

/// Renders map keys; only scalars can sit inside a bracket segment.
struct KeySerializer;

impl ser::Serializer for KeySerializer {
    type Ok = String;
    type Error = EncodeError;
    type SerializeSeq = Impossible<String, EncodeError>;
    type SerializeTuple = Impossible<String, EncodeError>;
    type SerializeTupleStruct = Impossible<String, EncodeError>;
    type SerializeTupleVariant = Impossible<String, EncodeError>;
    type SerializeMap = Impossible<String, EncodeError>;
    type SerializeStruct = Impossible<String, EncodeError>;
    type SerializeStructVariant = Impossible<String, EncodeError>;

    reject_compounds!(EncodeError::UnsupportedKey);

    fn serialize_bool(self, v: bool) -> Result<String, EncodeError> {
        Ok(v.to_string())
    }

    fn serialize_i8(self, v: i8) -> Result<String, EncodeError> {
        Ok(v.to_string())
    }

    fn serialize_i16(self, v: i16) -> Result<String, EncodeError> {
        Ok(v.to_string())
    }

    fn serialize_i32(self, v: i32) -> Result<String, EncodeError> {
        Ok(v.to_string())
    }

    fn serialize_i64(self, v: i64) -> Result<String, EncodeError> {
        Ok(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<String, EncodeError> {
        Ok(v.to_string())
    }

    fn serialize_u16(self, v: u16) -> Result<String, EncodeError> {
        Ok(v.to_string())
    }

    fn serialize_u32(self, v: u32) -> Result<String, EncodeError> {
        Ok(v.to_string())
    }

    fn serialize_u64(self, v: u64) -> Result<String, EncodeError> {
        Ok(v.to_string())
    }

    fn serialize_f32(self, _v: f32) -> Result<String, EncodeError> {
        Err(EncodeError::UnsupportedKey("float"))
    }

    fn serialize_f64(self, _v: f64) -> Result<String, EncodeError> {
        Err(EncodeError::UnsupportedKey("float"))
    }

    fn serialize_char(self, v: char) -> Result<String, EncodeError> {
        Ok(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<String, EncodeError> {
        Ok(v.to_owned())
    }

    fn serialize_none(self) -> Result<String, EncodeError> {
        Err(EncodeError::UnsupportedKey("null"))
    }

    fn serialize_some<T: Serialize + ?Sized>(
        self,
        value: &T,
    ) -> Result<String, EncodeError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<String, EncodeError> {
        Err(EncodeError::UnsupportedKey("null"))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
    ) -> Result<String, EncodeError> {
        Ok(variant.to_owned())
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<String, EncodeError> {
        value.serialize(self)
    }
}

/// Renders a lone scalar for [`scalar_text`]; unset values yield `None`.
struct ScalarSerializer;

impl ser::Serializer for ScalarSerializer {
    type Ok = Option<String>;
    type Error = EncodeError;
    type SerializeSeq = Impossible<Option<String>, EncodeError>;
    type SerializeTuple = Impossible<Option<String>, EncodeError>;
    type SerializeTupleStruct = Impossible<Option<String>, EncodeError>;
    type SerializeTupleVariant = Impossible<Option<String>, EncodeError>;
    type SerializeMap = Impossible<Option<String>, EncodeError>;
    type SerializeStruct = Impossible<Option<String>, EncodeError>;
    type SerializeStructVariant = Impossible<Option<String>, EncodeError>;

    reject_compounds!(EncodeError::NotScalar);

    fn serialize_bool(self, v: bool) -> Result<Option<String>, EncodeError> {
        Ok(Some(v.to_string()))
    }

    fn serialize_i8(self, v: i8) -> Result<Option<String>, EncodeError> {
        Ok(Some(v.to_string()))
    }

    fn serialize_i16(self, v: i16) -> Result<Option<String>, EncodeError> {
        Ok(Some(v.to_string()))
    }

    fn serialize_i32(self, v: i32) -> Result<Option<String>, EncodeError> {
        Ok(Some(v.to_string()))
    }

    fn serialize_i64(self, v: i64) -> Result<Option<String>, EncodeError> {
        Ok(Some(v.to_string()))
    }

    fn serialize_u8(self, v: u8) -> Result<Option<String>, EncodeError> {
        Ok(Some(v.to_string()))
    }

    fn serialize_u16(self, v: u16) -> Result<Option<String>, EncodeError> {
        Ok(Some(v.to_string()))
    }

    fn serialize_u32(self, v: u32) -> Result<Option<String>, EncodeError> {
        Ok(Some(v.to_string()))
    }

    fn serialize_u64(self, v: u64) -> Result<Option<String>, EncodeError> {
        Ok(Some(v.to_string()))
    }

    fn serialize_f32(self, v: f32) -> Result<Option<String>, EncodeError> {
        Ok(Some(float_text(v, v.is_finite())))
    }

    fn serialize_f64(self, v: f64) -> Result<Option<String>, EncodeError> {
        Ok(Some(float_text(v, v.is_finite())))
    }

    fn serialize_char(self, v: char) -> Result<Option<String>, EncodeError> {
        Ok(Some(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Option<String>, EncodeError> {
        Ok(Some(v.to_owned()))
    }

    fn serialize_none(self) -> Result<Option<String>, EncodeError> {
        Ok(None)
    }

    fn serialize_some<T: Serialize + ?Sized>(
        self,
        value: &T,
    ) -> Result<Option<String>, EncodeError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Option<String>, EncodeError> {
        Ok(None)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
    ) -> Result<Option<String>, EncodeError> {
        Ok(Some(variant.to_owned()))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Option<String>, EncodeError> {
        value.serialize(self)
    }
}
