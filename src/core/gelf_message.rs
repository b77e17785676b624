//! GELF message value and its JSON wire form
//!
//! The wire form follows GELF 1.1:
//!
//! ```text
//! {"version":"1.1","host":"web-1","short_message":"...","full_message":"...",
//!  "timestamp":1736332245.123,"level":6,"facility":"billing",
//!  "line":"42","file":"src/main.rs","_thread":"main"}
//! ```
//!
//! Additional fields are written with a leading underscore.

use super::error::{GelfError, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

/// GELF specification version written on the wire
pub const GELF_VERSION: &str = "1.1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GelfMessage {
    version: String,
    host: Option<String>,
    short_message: String,
    full_message: String,
    timestamp_millis: i64,
    level: u8,
    facility: Option<String>,
    line: Option<String>,
    file: Option<String>,
    fields: BTreeMap<String, String>,
}

impl GelfMessage {
    pub fn new(
        short_message: impl Into<String>,
        full_message: impl Into<String>,
        timestamp_millis: i64,
        level: u8,
        line: Option<String>,
        file: Option<String>,
    ) -> Self {
        Self {
            version: GELF_VERSION.to_string(),
            host: None,
            short_message: short_message.into(),
            full_message: full_message.into(),
            timestamp_millis,
            level,
            facility: None,
            line,
            file,
            fields: BTreeMap::new(),
        }
    }

    pub fn set_host(&mut self, host: impl Into<String>) {
        self.host = Some(host.into());
    }

    pub fn set_facility(&mut self, facility: impl Into<String>) {
        self.facility = Some(facility.into());
    }

    /// Add an additional field; an existing value under `key` is replaced.
    pub fn add_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn short_message(&self) -> &str {
        &self.short_message
    }

    pub fn full_message(&self) -> &str {
        &self.full_message
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp_millis
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn facility(&self) -> Option<&str> {
        self.facility.as_deref()
    }

    pub fn line(&self) -> Option<&str> {
        self.line.as_deref()
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Check the message carries everything a GELF receiver requires.
    pub fn validate(&self) -> Result<()> {
        if self.version.is_empty() {
            return Err(GelfError::invalid_message("version is empty"));
        }
        if self.host.as_deref().map_or(true, str::is_empty) {
            return Err(GelfError::invalid_message("host is empty"));
        }
        if self.short_message.is_empty() && self.full_message.is_empty() {
            return Err(GelfError::invalid_message("message text is empty"));
        }
        Ok(())
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Serialize to the single-line JSON wire form
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to the JSON wire form as bytes
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Wire key for an additional field, or `None` for keys GELF reserves.
fn additional_field_key(key: &str) -> Option<String> {
    match key {
        "id" | "_id" => None,
        k if k.starts_with('_') => Some(k.to_string()),
        k => Some(format!("_{}", k)),
    }
}

impl Serialize for GelfMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("version", &self.version)?;
        if let Some(host) = &self.host {
            map.serialize_entry("host", host)?;
        }
        map.serialize_entry("short_message", &self.short_message)?;
        map.serialize_entry("full_message", &self.full_message)?;
        map.serialize_entry("timestamp", &(self.timestamp_millis as f64 / 1000.0))?;
        map.serialize_entry("level", &self.level)?;
        if let Some(facility) = &self.facility {
            map.serialize_entry("facility", facility)?;
        }
        if let Some(line) = &self.line {
            map.serialize_entry("line", line)?;
        }
        if let Some(file) = &self.file {
            map.serialize_entry("file", file)?;
        }
        for (key, value) in &self.fields {
            if let Some(wire_key) = additional_field_key(key) {
                map.serialize_entry(&wire_key, value)?;
            }
        }
        map.end()
    }
}
