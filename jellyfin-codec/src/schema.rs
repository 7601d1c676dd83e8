//! Static field tables describing each record's wire layout.
//!
//! Every record declared through [`crate::record!`] publishes one
//! [`FieldSpec`] per field, in declaration order. The same macro input
//! produces the serde mapping, so the table and the wire behaviour cannot
//! drift apart.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Semantic type of a single wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Int32,
    Int64,
    Bool,
    Float32,
    Float64,
    DateTime,
    Uuid,
    /// Closed token set, by type name.
    Enum(&'static str),
    /// Nested record, by type name.
    Record(&'static str),
    /// Opaque JSON carried through untouched.
    Raw,
}

impl ValueKind {
    pub fn is_scalar(self) -> bool {
        !matches!(self, ValueKind::Record(_) | ValueKind::Raw)
    }

    pub fn label(self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Int32 => "int32",
            ValueKind::Int64 => "int64",
            ValueKind::Bool => "boolean",
            ValueKind::Float32 => "float",
            ValueKind::Float64 => "double",
            ValueKind::DateTime => "date-time",
            ValueKind::Uuid => "uuid",
            ValueKind::Enum(name) | ValueKind::Record(name) => name,
            ValueKind::Raw => "any",
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How many values a field holds and how they are addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldShape {
    Single(ValueKind),
    /// Ordered sequence, addressed by position.
    List(ValueKind),
    /// String-keyed mapping, addressed by key.
    Map(ValueKind),
}

impl FieldShape {
    pub fn kind(self) -> ValueKind {
        match self {
            FieldShape::Single(kind)
            | FieldShape::List(kind)
            | FieldShape::Map(kind) => kind,
        }
    }
}

impl Display for FieldShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldShape::Single(kind) => write!(f, "{kind}"),
            FieldShape::List(kind) => write!(f, "array<{kind}>"),
            FieldShape::Map(kind) => write!(f, "map<string, {kind}>"),
        }
    }
}

/// One declared field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSpec {
    /// In-memory (Rust) field name.
    pub name: &'static str,
    /// Name used in JSON objects and query strings.
    pub wire: &'static str,
    pub shape: FieldShape,
}

/// A type that can sit inside a sequence or map field.
pub trait WireValue {
    const KIND: ValueKind;
}

/// A type that can be the payload of a record field.
pub trait WireType {
    const SHAPE: FieldShape;

    /// A present value with no wire form. Such fields are encoded as if
    /// unset, so `null` never reaches the output.
    fn is_void(&self) -> bool {
        false
    }
}

/// Skip predicate for record fields: unset, or set to a void value.
pub fn is_unset<T: WireType>(value: &Option<T>) -> bool {
    value.as_ref().is_none_or(|value| value.is_void())
}

macro_rules! scalar_wire_types {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl WireValue for $ty {
                const KIND: ValueKind = ValueKind::$kind;
            }

            impl WireType for $ty {
                const SHAPE: FieldShape = FieldShape::Single(ValueKind::$kind);
            }
        )*
    };
}

scalar_wire_types! {
    String => String,
    i32 => Int32,
    i64 => Int64,
    bool => Bool,
    DateTime<Utc> => DateTime,
    Uuid => Uuid,
}

impl WireValue for f32 {
    const KIND: ValueKind = ValueKind::Float32;
}

impl WireType for f32 {
    const SHAPE: FieldShape = FieldShape::Single(ValueKind::Float32);

    // NaN and the infinities have no JSON number form.
    fn is_void(&self) -> bool {
        !self.is_finite()
    }
}

impl WireValue for f64 {
    const KIND: ValueKind = ValueKind::Float64;
}

impl WireType for f64 {
    const SHAPE: FieldShape = FieldShape::Single(ValueKind::Float64);

    fn is_void(&self) -> bool {
        !self.is_finite()
    }
}

impl WireValue for serde_json::Value {
    const KIND: ValueKind = ValueKind::Raw;
}

impl WireType for serde_json::Value {
    const SHAPE: FieldShape = FieldShape::Single(ValueKind::Raw);

    fn is_void(&self) -> bool {
        self.is_null()
    }
}

impl<T: WireValue> WireValue for Box<T> {
    const KIND: ValueKind = T::KIND;
}

impl<T: WireValue> WireType for Box<T> {
    const SHAPE: FieldShape = FieldShape::Single(T::KIND);
}

impl<T: WireValue> WireType for Vec<T> {
    const SHAPE: FieldShape = FieldShape::List(T::KIND);
}

impl<T: WireValue> WireType for BTreeMap<String, T> {
    const SHAPE: FieldShape = FieldShape::Map(T::KIND);
}

/// Looks a field up by wire name.
pub fn find_wire<'a>(
    fields: &'a [FieldSpec],
    wire: &str,
) -> Option<&'a FieldSpec> {
    fields.iter().find(|spec| spec.wire == wire)
}
