//! Backing configuration store contract
//!
//! The store persists key values for every schema. How it does so (dconf,
//! a keyfile, a database) belongs to the host; the settings layer only needs
//! to read, write and reset a value addressed by schema and key name.
//!
//! Type and range checks happen in [`Settings`](crate::Settings) before a
//! write reaches the store, against the schema the handle was bound to.

use crate::config::SchemaId;
use crate::error::Result;
use crate::sync::RwLockExt;

use log::debug;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

/// Storage abstraction for key values
pub trait SettingsStore: Send + Sync {
    /// Stored value of `key`, or `None` if nothing was written
    fn read(&self, schema: &SchemaId, key: &str) -> Result<Option<Value>>;

    /// Store `value` for `key`
    fn write(&self, schema: &SchemaId, key: &str, value: Value) -> Result<()>;

    /// Forget the stored value, so reads fall back to the schema default
    fn reset(&self, schema: &SchemaId, key: &str) -> Result<()>;
}

/// dconf-style path of a key (`/org/example/prefs/tile-padding`)
pub fn key_path(schema: &SchemaId, key: &str) -> String {
    format!("{}{}", schema.to_path(), key)
}

// =============================================================================
// In-memory Store
// =============================================================================

/// Process-local store keyed by [`key_path`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys holding a stored (non-default) value
    pub fn len(&self) -> usize {
        self.values.read_recovered().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw stored value at a dconf-style path
    pub fn get_path(&self, path: &str) -> Option<Value> {
        self.values.read_recovered().get(path).cloned()
    }
}

impl SettingsStore for MemoryStore {
    fn read(&self, schema: &SchemaId, key: &str) -> Result<Option<Value>> {
        Ok(self.get_path(&key_path(schema, key)))
    }

    fn write(&self, schema: &SchemaId, key: &str, value: Value) -> Result<()> {
        let path = key_path(schema, key);
        debug!("Writing {path} = {value}");
        self.values.write_recovered().insert(path, value);
        Ok(())
    }

    fn reset(&self, schema: &SchemaId, key: &str) -> Result<()> {
        let path = key_path(schema, key);
        if self.values.write_recovered().remove(&path).is_some() {
            debug!("Reset {path}");
        }
        Ok(())
    }
}
