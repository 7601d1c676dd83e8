//! Declarative generators for records and wire enumerations.
//!
//! Crates invoking these macros must depend on `serde` directly; the
//! generated items derive and implement its traits by absolute path. The
//! serde skip predicate is named as `::jellyfin_codec::__private::is_unset`,
//! so the crate must also be reachable under that name.

/// Declares a record: every field optional, renamed to its wire name,
/// omitted from output when unset, plus its field table and builder.
///
/// ```
/// use jellyfin_codec::{Builder, Record, record};
///
/// record! {
///     /// A named thing.
///     pub struct Tag {
///         name: String => "Name",
///         description: String => "Description",
///     }
/// }
///
/// let tag = Tag::builder().name("Alice").build();
/// assert_eq!(tag.to_query_string(None), "Name=Alice");
/// assert_eq!(Tag::FIELDS[1].wire, "Description");
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $ty:ty => $wire:literal
            ),* $(,)?
        }
    ) => {
        $crate::__private::paste! {
            $(#[$meta])*
            #[derive(
                Debug,
                Clone,
                Default,
                PartialEq,
                ::serde::Serialize,
                ::serde::Deserialize,
            )]
            $vis struct $name {
                $(
                    $(#[$field_meta])*
                    #[serde(
                        rename = $wire,
                        default,
                        skip_serializing_if = "::jellyfin_codec::__private::is_unset"
                    )]
                    pub $field: ::std::option::Option<$ty>,
                )*
            }

            impl $name {
                /// Starts an empty builder.
                pub fn builder() -> [<$name Builder>] {
                    [<$name Builder>]::default()
                }
            }

            impl $crate::WireValue for $name {
                const KIND: $crate::ValueKind =
                    $crate::ValueKind::Record(stringify!($name));
            }

            impl $crate::WireType for $name {
                const SHAPE: $crate::FieldShape = $crate::FieldShape::Single(
                    $crate::ValueKind::Record(stringify!($name)),
                );
            }

            impl $crate::Record for $name {
                const NAME: &'static str = stringify!($name);
                const FIELDS: &'static [$crate::FieldSpec] = &[
                    $(
                        $crate::FieldSpec {
                            name: stringify!($field),
                            wire: $wire,
                            shape: <$ty as $crate::WireType>::SHAPE,
                        },
                    )*
                ];

                type Builder = [<$name Builder>];

                fn builder() -> Self::Builder {
                    [<$name Builder>]::default()
                }
            }

            #[doc = concat!("Single-use builder for [`", stringify!($name), "`].")]
            #[derive(Debug, Default)]
            #[must_use]
            $vis struct [<$name Builder>] {
                inner: $name,
            }

            impl [<$name Builder>] {
                $(
                    #[doc = concat!("Sets `", $wire, "`.")]
                    pub fn $field(mut self, value: impl Into<$ty>) -> Self {
                        let value: $ty = value.into();
                        self.inner.$field =
                            (!$crate::WireType::is_void(&value)).then_some(value);
                        self
                    }
                )*
            }

            impl $crate::Builder for [<$name Builder>] {
                type Output = $name;

                fn build(self) -> $name {
                    self.inner
                }
            }
        }
    };
}

/// Declares a closed, string-backed enumeration with 1:1 wire tokens.
///
/// Unknown tokens fail to decode with
/// [`DecodeErrorKind::UnknownEnumToken`](crate::DecodeErrorKind).
///
/// ```
/// use jellyfin_codec::{WireEnum, wire_enum};
///
/// wire_enum! {
///     pub enum Shade {
///         Light => "Light",
///         Dark => "Dark",
///     }
/// }
///
/// assert_eq!(Shade::from_token("Dark"), Some(Shade::Dark));
/// assert!("dark".parse::<Shade>().is_err());
/// ```
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $token:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
        }

        impl $name {
            /// Wire token of this variant.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $token, )+
                }
            }

            /// Every variant, in declaration order.
            pub fn all() -> &'static [$name] {
                &[$( $name::$variant, )+]
            }
        }

        impl $crate::WireEnum for $name {
            const NAME: &'static str = stringify!($name);
            const TOKENS: &'static [&'static str] = &[$( $token, )+];

            fn all() -> &'static [Self] {
                $name::all()
            }

            fn as_str(&self) -> &'static str {
                $name::as_str(self)
            }

            fn from_token(token: &str) -> ::std::option::Option<Self> {
                match token {
                    $( $token => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl $crate::WireValue for $name {
            const KIND: $crate::ValueKind =
                $crate::ValueKind::Enum(stringify!($name));
        }

        impl $crate::WireType for $name {
            const SHAPE: $crate::FieldShape = $crate::FieldShape::Single(
                $crate::ValueKind::Enum(stringify!($name)),
            );
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::DecodeError;

            fn from_str(token: &str) -> ::std::result::Result<Self, Self::Err> {
                <$name as $crate::WireEnum>::decode_token(token)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                struct TokenVisitor;

                impl ::serde::de::Visitor<'_> for TokenVisitor {
                    type Value = $name;

                    fn expecting(
                        &self,
                        f: &mut ::std::fmt::Formatter<'_>,
                    ) -> ::std::fmt::Result {
                        write!(f, "a {} token", stringify!($name))
                    }

                    fn visit_str<E>(self, token: &str) -> ::std::result::Result<$name, E>
                    where
                        E: ::serde::de::Error,
                    {
                        <$name as $crate::WireEnum>::from_token(token).ok_or_else(|| {
                            E::unknown_variant(
                                token,
                                <$name as $crate::WireEnum>::TOKENS,
                            )
                        })
                    }
                }

                deserializer.deserialize_str(TokenVisitor)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use crate::{
        Builder, DecodeErrorKind, FieldShape, Record, ValueKind, WireEnum,
    };

    crate::wire_enum! {
        enum Mode {
            Direct => "DirectPlay",
            Transcode => "Transcode",
        }
    }

    crate::record! {
        struct Inner {
            mode: Mode => "Mode",
        }
    }

    crate::record! {
        /// Test fixture.
        struct Outer {
            name: String => "Name",
            description: String => "Description",
            inner: Inner => "Inner",
            items: Vec<Inner> => "Items",
            headers: BTreeMap<String, String> => "Headers",
        }
    }

    #[test]
    fn field_table_follows_declaration() {
        let wires: Vec<_> = Outer::FIELDS.iter().map(|f| f.wire).collect();
        assert_eq!(wires, ["Name", "Description", "Inner", "Items", "Headers"]);
        assert_eq!(
            Outer::field("Items").map(|f| f.shape),
            Some(FieldShape::List(ValueKind::Record("Inner")))
        );
        assert_eq!(Inner::FIELDS[0].shape, FieldShape::Single(ValueKind::Enum("Mode")));
    }

    #[test]
    fn builder_sets_fields() {
        let outer = Outer::builder()
            .name("Alice")
            .inner(Inner::builder().mode(Mode::Direct).build())
            .build();
        assert_eq!(outer.name.as_deref(), Some("Alice"));
        assert_eq!(outer.description, None);
        assert_eq!(outer.to_query_string(None), "Name=Alice&Inner[Mode]=DirectPlay");
    }

    #[test]
    fn enum_tokens_are_case_sensitive() {
        assert_eq!(Mode::TOKENS, ["DirectPlay", "Transcode"]);
        assert_eq!(Mode::from_token("Transcode"), Some(Mode::Transcode));
        assert_eq!(Mode::from_token("transcode"), None);
        assert_eq!(Mode::Direct.to_string(), "DirectPlay");
    }

    #[test]
    fn unknown_token_in_record() {
        let err = Outer::from_json(&json!({"Items": [{"Mode": "Remux"}]}))
            .expect_err("unknown token");
        assert_eq!(err.path.to_string(), "Items[0].Mode");
        assert_eq!(
            err.kind,
            DecodeErrorKind::UnknownEnumToken {
                token: "Remux".into(),
                expected: vec!["DirectPlay", "Transcode"],
            }
        );
    }
}
