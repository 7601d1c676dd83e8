//! Record codec for Jellyfin API models.
//!
//! Records are declared once with [`record!`]; that single declaration
//! yields the struct, its serde mapping to PascalCase wire names, the static
//! [`FieldSpec`] table, and a single-use builder. Enumerations are declared
//! with [`wire_enum!`] as closed token sets.
//!
//! Two wire forms are supported:
//!
//! * JSON, decoded through [`json`] so that failures carry a [`FieldPath`]
//!   and a [`DecodeErrorKind`], and encoded with unset fields omitted.
//! * URL query strings, encoded through [`query`] in form style or, with a
//!   prefix, OpenAPI `deepObject` style.

#![allow(missing_docs)]

// Lets `record!` expand inside this crate too.
extern crate self as jellyfin_codec;

pub mod config;
pub mod error;
pub mod json;
mod macros;
pub mod params;
pub mod query;
pub mod record;
pub mod schema;

pub use config::{
    Codec, CodecConfig, DecodeConfig, FlatSequences, NullFields, QueryConfig,
};
pub use error::{
    DecodeError, DecodeErrorKind, EncodeError, FieldPath, PathSegment,
};
pub use params::{CollectionFormat, QueryParams};
pub use record::{Builder, Record, WireEnum};
pub use schema::{FieldShape, FieldSpec, ValueKind, WireType, WireValue};

#[doc(hidden)]
pub mod __private {
    pub use crate::schema::is_unset;
    pub use paste::paste;
}

/// Traits needed to call record and enum methods.
pub mod prelude {
    pub use super::record::{Builder, Record, WireEnum};
    pub use super::schema::{WireType, WireValue};
}
