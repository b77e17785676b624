//! Message provider options
//!
//! [`ProviderOptions`] is the per-appender bundle the message builder reads:
//! facility, origin host, the stacktrace / extended-information / location
//! flags and the static additional fields.

use super::error::{GelfError, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Additional-field key whose value becomes the message host
pub const ORIGIN_HOST_KEY: &str = "originHost";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderOptions {
    pub facility: Option<String>,
    pub origin_host: Option<String>,
    pub extract_stacktrace: bool,
    pub add_extended_information: bool,
    pub include_location: bool,
    #[serde(deserialize_with = "deserialize_additional_fields")]
    pub additional_fields: BTreeMap<String, String>,
}

impl Default for ProviderOptions {
    fn default() -> Self {
        Self {
            facility: None,
            origin_host: None,
            extract_stacktrace: false,
            add_extended_information: false,
            include_location: true,
            additional_fields: BTreeMap::new(),
        }
    }
}

impl ProviderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_facility(mut self, facility: impl Into<String>) -> Self {
        self.facility = Some(facility.into());
        self
    }

    #[must_use]
    pub fn with_origin_host(mut self, origin_host: impl Into<String>) -> Self {
        self.origin_host = Some(origin_host.into());
        self
    }

    #[must_use]
    pub fn with_extract_stacktrace(mut self, enable: bool) -> Self {
        self.extract_stacktrace = enable;
        self
    }

    #[must_use]
    pub fn with_extended_information(mut self, enable: bool) -> Self {
        self.add_extended_information = enable;
        self
    }

    #[must_use]
    pub fn with_include_location(mut self, enable: bool) -> Self {
        self.include_location = enable;
        self
    }

    #[must_use]
    pub fn with_additional_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_fields.insert(key.into(), value.into());
        self
    }

    /// Replace the additional fields with those parsed from `text`.
    ///
    /// See [`parse_additional_fields`] for the accepted syntax.
    pub fn with_additional_fields_str(mut self, text: &str) -> Result<Self> {
        self.additional_fields = parse_additional_fields(text)?;
        Ok(self)
    }

    /// Fill in the origin host from the local hostname when none is configured.
    ///
    /// An `originHost` additional field counts as configured. On lookup
    /// failure the options are returned unchanged together with the error, so
    /// the caller can report it and carry on without a host.
    pub fn resolve_origin_host(mut self) -> (Self, Option<GelfError>) {
        if self.origin_host.as_deref().is_some_and(|h| !h.is_empty())
            || self.additional_fields.contains_key(ORIGIN_HOST_KEY)
        {
            return (self, None);
        }
        match local_hostname() {
            Ok(host) => {
                self.origin_host = Some(host);
                (self, None)
            }
            Err(err) => (self, Some(err)),
        }
    }
}

/// Hostname of the local machine.
pub fn local_hostname() -> Result<String> {
    let name = hostname::get().map_err(|e| GelfError::HostnameResolution(e.to_string()))?;
    let name = name.into_string().map_err(|raw| {
        GelfError::HostnameResolution(format!("hostname is not valid UTF-8: {:?}", raw))
    })?;
    if name.is_empty() {
        return Err(GelfError::HostnameResolution("hostname is empty".to_string()));
    }
    Ok(name)
}

/// Parse an additional-fields string into a field map.
///
/// The input must be a JSON object. For compatibility with older
/// configurations, an object written with single quotes
/// (`{'env':'prod'}`) is accepted by turning every `'` into `"` when strict
/// parsing fails. An empty or blank string yields no fields.
pub fn parse_additional_fields(text: &str) -> Result<BTreeMap<String, String>> {
    if text.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(strict_err) => serde_json::from_str(&text.replace('\'', "\"")).map_err(|_| {
            GelfError::config("additionalFields", format!("not a JSON object: {}", strict_err))
        })?,
    };

    match value {
        Value::Object(entries) => entries
            .into_iter()
            .map(|(key, value)| -> Result<(String, String)> {
                let value = field_value_to_string(&key, value)?;
                Ok((key, value))
            })
            .collect(),
        other => Err(GelfError::config(
            "additionalFields",
            format!("expected a JSON object, found {}", json_kind(&other)),
        )),
    }
}

fn field_value_to_string(key: &str, value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(GelfError::config(
            "additionalFields",
            format!("field '{}' must be a scalar, found {}", key, json_kind(&other)),
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Accept either a field-map string or an inline JSON object.
fn deserialize_additional_fields<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(BTreeMap::new()),
        Value::String(text) => parse_additional_fields(&text).map_err(D::Error::custom),
        value @ Value::Object(_) => {
            parse_additional_fields(&value.to_string()).map_err(D::Error::custom)
        }
        other => Err(D::Error::custom(format!(
            "additionalFields must be a string or an object, found {}",
            json_kind(&other)
        ))),
    }
}
