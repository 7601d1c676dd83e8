//! Decode and encode errors. Decode errors carry the wire-name path of the
//! value that failed.

use std::fmt::{self, Display};

use serde::de::{Expected, Unexpected};
use thiserror::Error;

/// One step on the way from a decoded document's root to a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object member, by wire name.
    Key(String),
    /// Array element, by position.
    Index(usize),
}

/// Wire-name path to the value a decode error is about, e.g.
/// `MediaStreams[1].Type`. An empty path is the document root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The last object key on the path, i.e. the field that failed.
    pub fn field(&self) -> Option<&str> {
        self.segments.iter().rev().find_map(|segment| match segment {
            PathSegment::Key(key) => Some(key.as_str()),
            PathSegment::Index(_) => None,
        })
    }

    fn push_front(&mut self, segment: PathSegment) {
        self.segments.insert(0, segment);
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("$");
        }
        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if position == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// What went wrong while decoding a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeErrorKind {
    #[error("expected {expected}, found {actual}")]
    ShapeMismatch { expected: String, actual: String },

    #[error("invalid value{}: {reason}", actual_suffix(actual))]
    InvalidValue {
        reason: String,
        actual: Option<String>,
    },

    #[error("unknown enum token `{token}`, expected one of {expected:?}")]
    UnknownEnumToken {
        token: String,
        expected: Vec<&'static str>,
    },

    #[error("missing field `{field}`")]
    MissingField { field: &'static str },

    #[error("malformed JSON: {message}")]
    Syntax { message: String },
}

/// A JSON document could not be turned into the requested record.
///
/// Decoding is all-or-nothing: no partially populated record is ever
/// returned alongside this error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {kind}")]
pub struct DecodeError {
    pub path: FieldPath,
    pub kind: DecodeErrorKind,
}

impl DecodeError {
    pub fn new(kind: DecodeErrorKind) -> Self {
        Self {
            path: FieldPath::root(),
            kind,
        }
    }

    pub fn syntax(message: impl Into<String>) -> Self {
        Self::new(DecodeErrorKind::Syntax {
            message: message.into(),
        })
    }

    /// JSON value present but not convertible to the declared type. Covers
    /// both wrong JSON shapes and well-shaped values that fail to parse
    /// (a malformed UUID, an out-of-range integer).
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(
            self.kind,
            DecodeErrorKind::ShapeMismatch { .. }
                | DecodeErrorKind::InvalidValue { .. }
        )
    }

    pub fn is_unknown_enum_token(&self) -> bool {
        matches!(self.kind, DecodeErrorKind::UnknownEnumToken { .. })
    }

    pub(crate) fn within_key(mut self, key: &str) -> Self {
        self.path.push_front(PathSegment::Key(key.to_owned()));
        self
    }

    pub(crate) fn within_index(mut self, index: usize) -> Self {
        self.path.push_front(PathSegment::Index(index));
        self
    }

    /// Records the offending leaf value on errors raised from a plain
    /// `custom` message, which carry no description of their input.
    pub(crate) fn with_actual(mut self, actual: impl FnOnce() -> String) -> Self {
        if let DecodeErrorKind::InvalidValue { actual: slot @ None, .. } =
            &mut self.kind
        {
            *slot = Some(actual());
        }
        self
    }
}

fn actual_suffix(actual: &Option<String>) -> String {
    actual.as_deref().map(|a| format!(" {a}")).unwrap_or_default()
}

fn describe(unexpected: &Unexpected<'_>) -> String {
    match unexpected {
        Unexpected::Bool(value) => format!("boolean `{value}`"),
        Unexpected::Unsigned(value) => format!("number `{value}`"),
        Unexpected::Signed(value) => format!("number `{value}`"),
        Unexpected::Float(value) => format!("number `{value}`"),
        Unexpected::Str(value) => format!("string {value:?}"),
        Unexpected::Seq => "array".to_owned(),
        Unexpected::Map => "object".to_owned(),
        Unexpected::Unit => "null".to_owned(),
        other => other.to_string(),
    }
}

impl serde::de::Error for DecodeError {
    fn custom<T: Display>(msg: T) -> Self {
        Self::new(DecodeErrorKind::InvalidValue {
            reason: msg.to_string(),
            actual: None,
        })
    }

    fn invalid_type(unexp: Unexpected<'_>, exp: &dyn Expected) -> Self {
        Self::new(DecodeErrorKind::ShapeMismatch {
            expected: exp.to_string(),
            actual: describe(&unexp),
        })
    }

    fn invalid_value(unexp: Unexpected<'_>, exp: &dyn Expected) -> Self {
        Self::new(DecodeErrorKind::InvalidValue {
            reason: format!("expected {exp}"),
            actual: Some(describe(&unexp)),
        })
    }

    fn invalid_length(len: usize, exp: &dyn Expected) -> Self {
        Self::new(DecodeErrorKind::ShapeMismatch {
            expected: exp.to_string(),
            actual: format!("array of length {len}"),
        })
    }

    fn unknown_variant(variant: &str, expected: &'static [&'static str]) -> Self {
        Self::new(DecodeErrorKind::UnknownEnumToken {
            token: variant.to_owned(),
            expected: expected.to_vec(),
        })
    }

    fn missing_field(field: &'static str) -> Self {
        Self::new(DecodeErrorKind::MissingField { field })
    }
}

/// A value could not be rendered as a query string.
///
/// Records never produce this; it is reachable only through the generic
/// [`crate::query::to_query_string`] entry point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("a bare {0} needs a prefix to become a query parameter")]
    UnnamedValue(&'static str),

    #[error("query string map keys must be scalars, found {0}")]
    UnsupportedKey(&'static str),

    #[error("{0} values cannot be carried by a query string")]
    UnsupportedValue(&'static str),

    #[error("expected a scalar value, found {0}")]
    NotScalar(&'static str),

    #[error("{0}")]
    Custom(String),
}

impl serde::ser::Error for EncodeError {
    fn custom<T: Display>(msg: T) -> Self {
        EncodeError::Custom(msg.to_string())
    }
}
