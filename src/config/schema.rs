//! Schema identifiers and schema definitions
//!
//! # Overview
//!
//! A schema is a named set of typed keys. Each key declares:
//!
//! - its **type**: `boolean`, `int`, `string` or `strv` (ordered list of strings)
//! - its **default** value, returned while nothing has been written to the store
//! - an optional inclusive **range** (only meaningful for `int` keys)
//!
//! Schemas are identified by a dot-separated [`SchemaId`] such as
//! `org.gnome.shell.extensions.net.gfxmonk.shellshape.prefs`.
//!
//! ```rust
//! use shellshape_settings::config::{KeySchema, SchemaId, SettingsSchema};
//!
//! let id = SchemaId::parse("org.example.prefs").unwrap();
//! let schema = SettingsSchema::new(id)
//!     .with_key(KeySchema::boolean("show-indicator", true))
//!     .with_key(KeySchema::int("tile-padding", 1).range(0, 50));
//!
//! assert!(schema.validate_schema().is_ok());
//! assert_eq!(schema.list_keys(), vec!["show-indicator", "tile-padding"]);
//! ```
//!
//! Schema files on disk are the serialized form of [`SettingsSchema`]:
//!
//! ```json
//! {
//!   "id": "org.example.prefs",
//!   "keys": [
//!     { "name": "tile-padding", "type": "int", "default": 1, "range": { "min": 0, "max": 50 } }
//!   ]
//! }
//! ```

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

static SCHEMA_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9-]*(\.[A-Za-z0-9][A-Za-z0-9-]*)*$")
        .unwrap_or_else(|e| unreachable!("schema id pattern is a literal: {e}"))
});

// =============================================================================
// Schema Identifier
// =============================================================================

/// Dot-separated namespaced schema identifier
///
/// Identifiers known at compile time are built with [`SchemaId::from_static`]
/// so they can live in `const` items; runtime input goes through
/// [`SchemaId::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SchemaId(Cow<'static, str>);

impl SchemaId {
    /// Wrap a compile-time identifier without validation
    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// Parse and validate an identifier
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSchemaId`] for empty segments or characters
    /// outside `[A-Za-z0-9-]`.
    pub fn parse(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if !SCHEMA_ID_PATTERN.is_match(&id) {
            return Err(Error::InvalidSchemaId(id));
        }
        Ok(Self(Cow::Owned(id)))
    }

    /// Identifier of a nested schema (`self` + `.` + `name`)
    pub fn child(&self, name: &str) -> Result<Self> {
        Self::parse(format!("{}.{}", self.0, name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Dot-separated segments of the identifier
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Path form used by dconf (`org.example.prefs` -> `/org/example/prefs/`)
    pub fn to_path(&self) -> String {
        format!("/{}/", self.0.replace('.', "/"))
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SchemaId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SchemaId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<SchemaId> for String {
    fn from(id: SchemaId) -> Self {
        id.0.into_owned()
    }
}

// =============================================================================
// Setting Types
// =============================================================================

/// Declared type of a schema key
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SettingType {
    Boolean,
    /// 32-bit signed integer
    Int,
    #[default]
    String,
    /// Ordered list of strings
    Strv,
}

impl SettingType {
    pub fn name(self) -> &'static str {
        match self {
            SettingType::Boolean => "boolean",
            SettingType::Int => "int",
            SettingType::String => "string",
            SettingType::Strv => "strv",
        }
    }

    /// Whether `value` has this type
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            SettingType::Boolean => value.is_boolean(),
            SettingType::Int => value
                .as_i64()
                .is_some_and(|n| i32::try_from(n).is_ok()),
            SettingType::String => value.is_string(),
            SettingType::Strv => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }
}

impl fmt::Display for SettingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name of the JSON type of `value`, for error messages
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Key Schema
// =============================================================================

/// Inclusive bounds for an `int` key
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Range {
    pub min: i64,
    pub max: i64,
}

impl Range {
    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Definition of a single key within a schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeySchema {
    pub name: String,

    #[serde(rename = "type")]
    pub setting_type: SettingType,

    /// Value returned while the store holds nothing for this key
    pub default: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<Range>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl KeySchema {
    fn with(name: impl Into<String>, setting_type: SettingType, default: Value) -> Self {
        Self {
            name: name.into(),
            setting_type,
            default,
            range: None,
            summary: None,
        }
    }

    pub fn boolean(name: impl Into<String>, default: bool) -> Self {
        Self::with(name, SettingType::Boolean, Value::Bool(default))
    }

    pub fn int(name: impl Into<String>, default: i32) -> Self {
        Self::with(name, SettingType::Int, json!(default))
    }

    pub fn string(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self::with(name, SettingType::String, Value::String(default.into()))
    }

    pub fn strv<S: AsRef<str>>(name: impl Into<String>, default: &[S]) -> Self {
        let items: Vec<&str> = default.iter().map(AsRef::as_ref).collect();
        Self::with(name, SettingType::Strv, json!(items))
    }

    /// Restrict an `int` key to `min..=max`
    #[must_use]
    pub fn range(mut self, min: i64, max: i64) -> Self {
        self.range = Some(Range { min, max });
        self
    }

    #[must_use]
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Validate a value against this key's type and range
    pub fn validate(&self, value: &Value) -> std::result::Result<(), String> {
        if !self.setting_type.accepts(value) {
            return Err(format!(
                "Value must be of type {}, got {}",
                self.setting_type,
                value_type_name(value)
            ));
        }

        if let (Some(range), Some(n)) = (self.range, value.as_i64()) {
            if n < range.min {
                return Err(format!("Value must be at least {}", range.min));
            }
            if n > range.max {
                return Err(format!("Value must be at most {}", range.max));
            }
        }

        Ok(())
    }
}

// =============================================================================
// Settings Schema
// =============================================================================

/// A named schema: an ordered list of typed keys
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsSchema {
    pub id: SchemaId,

    #[serde(default)]
    pub keys: Vec<KeySchema>,
}

impl SettingsSchema {
    pub fn new(id: SchemaId) -> Self {
        Self {
            id,
            keys: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_key(mut self, key: KeySchema) -> Self {
        self.keys.push(key);
        self
    }

    pub fn id(&self) -> &SchemaId {
        &self.id
    }

    /// Look up a key definition by name
    pub fn key(&self, name: &str) -> Option<&KeySchema> {
        self.keys.iter().find(|k| k.name == name)
    }

    pub fn has_key(&self, name: &str) -> bool {
        self.key(name).is_some()
    }

    /// Names of all keys, in declaration order
    pub fn list_keys(&self) -> Vec<String> {
        self.keys.iter().map(|k| k.name.clone()).collect()
    }

    /// Validate the schema definition itself
    ///
    /// Checks:
    /// - Key names are unique and non-empty
    /// - Ranges are only set on `int` keys and have min <= max
    /// - Every default satisfies its key's type and range
    pub fn validate_schema(&self) -> std::result::Result<(), String> {
        let mut seen = HashSet::new();

        for key in &self.keys {
            if key.name.is_empty() {
                return Err("Key name cannot be empty".to_string());
            }
            if !seen.insert(key.name.as_str()) {
                return Err(format!("Duplicate key '{}'", key.name));
            }

            if let Some(range) = key.range {
                if key.setting_type != SettingType::Int {
                    return Err(format!(
                        "Key '{}': range is only allowed on int keys",
                        key.name
                    ));
                }
                if range.min > range.max {
                    return Err(format!(
                        "Key '{}': min ({}) cannot be greater than max ({})",
                        key.name, range.min, range.max
                    ));
                }
            }

            key.validate(&key.default)
                .map_err(|e| format!("Key '{}': default value is invalid: {e}", key.name))?;
        }

        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
