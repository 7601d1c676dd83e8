//! Query parameters for API operations.
//!
//! Operations take a mix of scalars, arrays with an OpenAPI collection
//! format, and whole records. [`QueryParams`] collects them as encoded
//! `(name, value)` pairs in call order.

use std::fmt::{self, Display};

use serde::Serialize;
use url::Url;

use crate::config::FlatSequences;
use crate::error::EncodeError;
use crate::query::{self, encode_component, join_pairs, scalar_text};

/// How an array parameter is spelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CollectionFormat {
    /// `Ids=a%2Cb`
    #[default]
    Csv,
    /// `Ids=a%20b`
    Ssv,
    /// `Ids=a%09b`
    Tsv,
    /// `Ids=a%7Cb`
    Pipes,
    /// `Ids=a&Ids=b`
    Multi,
}

impl CollectionFormat {
    pub fn delimiter(self) -> Option<&'static str> {
        match self {
            CollectionFormat::Csv => Some(","),
            CollectionFormat::Ssv => Some(" "),
            CollectionFormat::Tsv => Some("\t"),
            CollectionFormat::Pipes => Some("|"),
            CollectionFormat::Multi => None,
        }
    }
}

/// Ordered, already-encoded query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `name=value`. Unset options add nothing; a record value is
    /// addressed deepObject style under `name`.
    pub fn param<T: Serialize + ?Sized>(
        &mut self,
        name: &str,
        value: &T,
    ) -> Result<&mut Self, EncodeError> {
        let pairs =
            query::to_query_pairs(value, Some(name), FlatSequences::Repeat)?;
        self.pairs.extend(pairs);
        Ok(self)
    }

    /// Adds an array parameter. Empty arrays add nothing.
    pub fn collection<T: Serialize>(
        &mut self,
        format: CollectionFormat,
        name: &str,
        values: &[T],
    ) -> Result<&mut Self, EncodeError> {
        let mut rendered = Vec::with_capacity(values.len());
        for value in values {
            if let Some(text) = scalar_text(value)? {
                rendered.push(encode_component(&text));
            }
        }
        if rendered.is_empty() {
            return Ok(self);
        }

        match format.delimiter() {
            None => {
                self.pairs.extend(
                    rendered.into_iter().map(|value| (name.to_owned(), value)),
                );
            }
            Some(delimiter) => {
                let separator = encode_component(delimiter);
                let joined = rendered.join(separator.as_str());
                self.pairs.push((name.to_owned(), joined));
            }
        }
        Ok(self)
    }

    /// Appends a record's own query encoding, flat or under `prefix`.
    pub fn record<T: Serialize + ?Sized>(
        &mut self,
        value: &T,
        prefix: Option<&str>,
    ) -> Result<&mut Self, EncodeError> {
        let pairs = query::to_query_pairs(value, prefix, FlatSequences::Repeat)?;
        self.pairs.extend(pairs);
        Ok(self)
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        join_pairs(&self.pairs)
    }

    /// Replaces the query of `url`; no parameters clears it.
    pub fn apply_to(&self, url: &mut Url) {
        if self.pairs.is_empty() {
            url.set_query(None);
        } else {
            url.set_query(Some(&self.to_query_string()));
        }
    }
}

impl Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}
