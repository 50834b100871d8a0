//! Common test utilities for shellshape-settings integration tests
//!
//! Provides the shellshape schemas and a fixture laying out an extension
//! directory and a system schema directory in a temporary location.

#![allow(dead_code)]

use shellshape_settings::{
    Extension, ExtensionConfig, JsonStorage, KEYBINDINGS, KeySchema, MapEnvSource, MemoryStore,
    PREFS, SchemaResolver, SettingsSchema, StorageBackend, keys,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

pub const UUID: &str = "shellshape@gfxmonk.net";

// =============================================================================
// Shellshape Schemas
// =============================================================================

pub fn prefs_schema() -> SettingsSchema {
    SettingsSchema::new(PREFS)
        .with_key(KeySchema::boolean(keys::SHOW_INDICATOR, true).summary("Show the panel indicator"))
        .with_key(KeySchema::int(keys::MAX_AUTOTILE, 8))
        .with_key(KeySchema::string(keys::DEFAULT_LAYOUT, "floating"))
        .with_key(KeySchema::int(keys::PADDING, 1))
        .with_key(KeySchema::int(keys::SCREEN_PADDING, 0))
}

pub fn keybindings_schema() -> SettingsSchema {
    SettingsSchema::new(KEYBINDINGS)
        .with_key(KeySchema::strv("toggle-tile", &["<Super>t"]))
        .with_key(KeySchema::strv("resize", &["<Super>r"]))
}

pub fn dconf_editor_schema() -> SettingsSchema {
    SettingsSchema::new(shellshape_settings::DCONF_EDITOR_SCHEMA)
        .with_key(KeySchema::string("saved-view", "/"))
}

/// Write `schema` as `<dir>/<id>.json`
pub fn write_schema(dir: &Path, schema: &SettingsSchema) {
    std::fs::create_dir_all(dir).expect("Failed to create schema dir");
    let content = JsonStorage::new()
        .serialize(schema)
        .expect("Failed to serialize schema");
    std::fs::write(dir.join(format!("{}.json", schema.id)), content)
        .expect("Failed to write schema");
}

// =============================================================================
// Test Fixtures
// =============================================================================

/// Route `log` output to the test harness (`RUST_LOG=info cargo test`)
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Temporary extension install plus a system schema directory
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub store: Arc<MemoryStore>,
}

impl TestFixture {
    /// Empty extension directory, nothing installed anywhere
    pub fn new() -> Self {
        init_logging();
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::create_dir_all(temp_dir.path().join("extension"))
            .expect("Failed to create extension dir");

        Self {
            temp_dir,
            store: Arc::new(MemoryStore::new()),
        }
    }

    /// Extension carrying its own schemas (a user-directory install)
    pub fn bundled() -> Self {
        let fixture = Self::new();
        fixture.install_bundled(&prefs_schema());
        fixture.install_bundled(&keybindings_schema());
        fixture
    }

    /// Schemas only in the system directory (a system-wide install)
    pub fn system_wide() -> Self {
        let fixture = Self::new();
        fixture.install_system(&prefs_schema());
        fixture.install_system(&keybindings_schema());
        fixture
    }

    pub fn extension_dir(&self) -> PathBuf {
        self.temp_dir.path().join("extension")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.extension_dir().join("data")
    }

    pub fn bundled_schema_dir(&self) -> PathBuf {
        self.data_dir().join("glib-2.0").join("schemas")
    }

    pub fn system_schema_dir(&self) -> PathBuf {
        self.temp_dir.path().join("system").join("glib-2.0").join("schemas")
    }

    pub fn install_bundled(&self, schema: &SettingsSchema) {
        write_schema(&self.bundled_schema_dir(), schema);
    }

    pub fn install_system(&self, schema: &SettingsSchema) {
        write_schema(&self.system_schema_dir(), schema);
    }

    pub fn config_with_env(&self, env: MapEnvSource) -> ExtensionConfig {
        ExtensionConfig::builder(UUID)
            .extension_dir(self.extension_dir())
            .system_schema_dir(self.system_schema_dir())
            .system_locale_dir(self.temp_dir.path().join("locale"))
            .env_source(Arc::new(env))
            .build()
    }

    pub fn config(&self) -> ExtensionConfig {
        self.config_with_env(MapEnvSource::new())
    }

    pub fn resolver(&self) -> SchemaResolver {
        SchemaResolver::new(self.config(), self.store.clone())
    }

    pub fn extension(&self) -> Extension {
        Extension::from_config(self.config())
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
