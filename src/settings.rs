//! Settings handle: a schema bound to a backing store
//!
//! [`Settings`] is a thin pass-through. Every read goes to the store and every
//! write is checked against the bound schema, then handed to the store at
//! once. Nothing is cached, so several handles for the same schema always
//! observe each other's writes.

use crate::config::{KeySchema, SchemaId, SettingType, SettingsSchema, value_type_name};
use crate::error::{Error, Result};
use crate::store::SettingsStore;

use log::warn;
use serde_json::{Value, json};
use std::sync::Arc;

/// Typed access to the keys of one schema
pub struct Settings {
    schema: Arc<SettingsSchema>,
    store: Arc<dyn SettingsStore>,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("schema", &self.schema.id)
            .finish_non_exhaustive()
    }
}

impl Settings {
    /// Bind `schema` to `store`
    pub fn new(schema: Arc<SettingsSchema>, store: Arc<dyn SettingsStore>) -> Self {
        Self { schema, store }
    }

    pub fn schema(&self) -> &SettingsSchema {
        &self.schema
    }

    pub fn schema_id(&self) -> &SchemaId {
        &self.schema.id
    }

    /// Names of the schema's keys, as they are right now
    pub fn list_keys(&self) -> Vec<String> {
        self.schema.list_keys()
    }

    fn key_schema(&self, key: &str) -> Result<&KeySchema> {
        self.schema.key(key).ok_or_else(|| Error::KeyNotFound {
            schema: self.schema.id.to_string(),
            key: key.to_string(),
        })
    }

    fn typed_key(&self, key: &str, expected: SettingType) -> Result<&KeySchema> {
        let key_schema = self.key_schema(key)?;
        if key_schema.setting_type != expected {
            return Err(Error::TypeMismatch {
                key: key.to_string(),
                expected: key_schema.setting_type.to_string(),
                actual: expected.to_string(),
            });
        }
        Ok(key_schema)
    }

    // =========================================================================
    // Untyped access
    // =========================================================================

    /// Current value of `key`, or its schema default if none is stored
    ///
    /// A stored value that no longer fits the key's type is ignored in favour
    /// of the default.
    pub fn get_value(&self, key: &str) -> Result<Value> {
        let key_schema = self.key_schema(key)?;
        self.read_checked(key_schema)
    }

    fn read_checked(&self, key_schema: &KeySchema) -> Result<Value> {
        if let Some(value) = self.store.read(&self.schema.id, &key_schema.name)? {
            if key_schema.setting_type.accepts(&value) {
                return Ok(value);
            }
            warn!(
                "Stored value for {}.{} is {}, expected {}; using default",
                self.schema.id,
                key_schema.name,
                value_type_name(&value),
                key_schema.setting_type
            );
        }

        // Trusted schemas are loaded unchecked, so the default may not fit
        if !key_schema.setting_type.accepts(&key_schema.default) {
            return Err(mismatch(key_schema, &key_schema.default));
        }
        Ok(key_schema.default.clone())
    }

    /// Write `value` to `key`
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreWrite`] if the value doesn't satisfy the key's
    /// type or range.
    pub fn set_value(&self, key: &str, value: Value) -> Result<()> {
        let key_schema = self.key_schema(key)?;
        self.write_checked(key_schema, value)
    }

    fn write_checked(&self, key_schema: &KeySchema, value: Value) -> Result<()> {
        key_schema
            .validate(&value)
            .map_err(|reason| Error::StoreWrite {
                key: key_schema.name.clone(),
                reason,
            })?;
        self.store.write(&self.schema.id, &key_schema.name, value)
    }

    /// Drop any stored value so `key` reads as its default again
    pub fn reset(&self, key: &str) -> Result<()> {
        let key_schema = self.key_schema(key)?;
        self.store.reset(&self.schema.id, &key_schema.name)
    }

    // =========================================================================
    // Typed access
    // =========================================================================

    pub fn get_boolean(&self, key: &str) -> Result<bool> {
        let key_schema = self.typed_key(key, SettingType::Boolean)?;
        let value = self.read_checked(key_schema)?;
        value.as_bool().ok_or_else(|| mismatch(key_schema, &value))
    }

    pub fn set_boolean(&self, key: &str, value: bool) -> Result<()> {
        let key_schema = self.typed_key(key, SettingType::Boolean)?;
        self.write_checked(key_schema, Value::Bool(value))
    }

    pub fn get_int(&self, key: &str) -> Result<i32> {
        let key_schema = self.typed_key(key, SettingType::Int)?;
        let value = self.read_checked(key_schema)?;
        value
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| mismatch(key_schema, &value))
    }

    pub fn set_int(&self, key: &str, value: i32) -> Result<()> {
        let key_schema = self.typed_key(key, SettingType::Int)?;
        self.write_checked(key_schema, json!(value))
    }

    pub fn get_string(&self, key: &str) -> Result<String> {
        let key_schema = self.typed_key(key, SettingType::String)?;
        match self.read_checked(key_schema)? {
            Value::String(s) => Ok(s),
            other => Err(mismatch(key_schema, &other)),
        }
    }

    pub fn set_string(&self, key: &str, value: &str) -> Result<()> {
        let key_schema = self.typed_key(key, SettingType::String)?;
        self.write_checked(key_schema, Value::String(value.to_string()))
    }

    pub fn get_strv(&self, key: &str) -> Result<Vec<String>> {
        let key_schema = self.typed_key(key, SettingType::Strv)?;
        let value = self.read_checked(key_schema)?;
        value
            .as_array()
            .and_then(|items| {
                items
                    .iter()
                    .map(|v| v.as_str().map(String::from))
                    .collect::<Option<Vec<_>>>()
            })
            .ok_or_else(|| mismatch(key_schema, &value))
    }

    pub fn set_strv<S: AsRef<str>>(&self, key: &str, value: &[S]) -> Result<()> {
        let key_schema = self.typed_key(key, SettingType::Strv)?;
        let items: Vec<&str> = value.iter().map(AsRef::as_ref).collect();
        self.write_checked(key_schema, json!(items))
    }
}

/// A value of the wrong type for `key_schema`
fn mismatch(key_schema: &KeySchema, value: &Value) -> Error {
    Error::TypeMismatch {
        key: key_schema.name.clone(),
        expected: key_schema.setting_type.to_string(),
        actual: value_type_name(value).to_string(),
    }
}
