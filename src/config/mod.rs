//! Core configuration types
//!
//! This module contains the foundational types for the settings layer:
//! - `ExtensionConfig` - Where the extension lives and where system schemas are
//! - `EnvSource` - Read-only access to a process environment
//! - `SchemaId` / `SettingsSchema` - Schema identifiers and typed key definitions

mod schema;
mod types;

pub use schema::{KeySchema, Range, SchemaId, SettingType, SettingsSchema};
pub(crate) use schema::value_type_name;

pub(crate) use types::expand_home;
pub use types::{
    DEFAULT_LOCALE_DIR, DefaultEnvSource, EnvSource, ExtensionConfig, ExtensionConfigBuilder,
    MapEnvSource, default_schema_dirs,
};
