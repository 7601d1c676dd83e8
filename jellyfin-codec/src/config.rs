//! Codec settings and the [`Codec`] that applies them.

use std::fs;
use std::path::Path;

use anyhow::{Context, anyhow};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{DecodeError, EncodeError};
use crate::{json, query};

/// How a JSON `null` in an optional field is treated on decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullFields {
    /// `null` leaves the field unset, like an absent key.
    #[default]
    Unset,
    /// `null` is a shape mismatch.
    Reject,
}

/// How sequences of scalars are addressed in flat (unprefixed) query strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlatSequences {
    /// `Ids=a&Ids=b` (form style, explode).
    #[default]
    Repeat,
    /// `Ids[0]=a&Ids[1]=b`.
    Indexed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Policy for `null` members of JSON objects.
    pub null_fields: NullFields,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Addressing of scalar sequences when no prefix is supplied.
    pub flat_sequences: FlatSequences,
}

/// Tunables for the record codec.
///
/// Everything defaults to the behaviour Jellyfin servers expect; a file only
/// needs the keys it changes:
///
/// ```toml
/// [decode]
/// null_fields = "reject"
///
/// [query]
/// flat_sequences = "indexed"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub decode: DecodeConfig,
    pub query: QueryConfig,
}

impl CodecConfig {
    /// Loads a config file, picking the format from its extension.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read codec config from {}", path.display())
        })?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::parse_json(&contents).with_context(|| {
                format!("invalid codec config {}", path.display())
            })?,
            Some("toml") | Some("tml") => {
                toml::from_str(&contents).map_err(|err| {
                    anyhow!("invalid codec config {}: {}", path.display(), err)
                })?
            }
            _ => Self::parse_from_str(&contents, &path.display().to_string())?,
        };

        info!(path = %path.display(), ?config, "loaded codec config");
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        toml::from_str(contents).context("invalid codec config")
    }

    pub fn parse_from_str(contents: &str, origin: &str) -> anyhow::Result<Self> {
        // Try TOML first, then JSON for convenience.
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                anyhow!(
                    "failed to parse codec config {}: toml error: {}; json error: {}",
                    origin,
                    toml_err,
                    json_err
                )
            })
        })
    }

    pub fn parse_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).context("invalid codec config JSON")
    }
}

/// A configured entry point to the codec.
///
/// The [`crate::Record`] convenience methods use `Codec::default()`.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    pub fn new(config: CodecConfig) -> Self {
        debug!(?config, "codec configured");
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn decode<T: DeserializeOwned>(&self, value: &Value) -> Result<T, DecodeError> {
        json::from_value_with(value, self.config.decode.null_fields)
    }

    pub fn decode_str<T: DeserializeOwned>(&self, text: &str) -> Result<T, DecodeError> {
        json::from_str_with(text, self.config.decode.null_fields)
    }

    pub fn encode_query<T: Serialize + ?Sized>(
        &self,
        value: &T,
        prefix: Option<&str>,
    ) -> Result<String, EncodeError> {
        query::to_query_string_with(value, prefix, self.config.query.flat_sequences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config = CodecConfig::from_toml_str("").expect("parse");
        assert_eq!(config, CodecConfig::default());
        assert_eq!(config.decode.null_fields, NullFields::Unset);
        assert_eq!(config.query.flat_sequences, FlatSequences::Repeat);
    }

    #[test]
    fn partial_toml_overrides_one_knob() {
        let config = CodecConfig::from_toml_str(
            "[query]\nflat_sequences = \"indexed\"\n",
        )
        .expect("parse");
        assert_eq!(config.query.flat_sequences, FlatSequences::Indexed);
        assert_eq!(config.decode, DecodeConfig::default());
    }

    #[test]
    fn falls_back_to_json() {
        let config = CodecConfig::parse_from_str(
            r#"{"decode": {"null_fields": "reject"}}"#,
            "inline",
        )
        .expect("json fallback");
        assert_eq!(config.decode.null_fields, NullFields::Reject);
    }

    #[test]
    fn unknown_policy_is_an_error() {
        let err = CodecConfig::from_toml_str("[decode]\nnull_fields = \"drop\"\n")
            .expect_err("bad value");
        assert!(err.to_string().contains("invalid codec config"));
    }
}
