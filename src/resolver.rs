//! Schema resolution with bundled-first fallback
//!
//! An extension can either be installed system-wide (schemas compiled into
//! the system registry) or unpacked into a user directory with its schemas
//! under `data/glib-2.0/schemas`. [`SchemaResolver`] handles both: when the
//! bundled directory exists it is chained in front of the system default so
//! its schemas take precedence.

use crate::config::{ExtensionConfig, SchemaId};
use crate::error::{Error, Result};
use crate::schema_source::SchemaSource;
use crate::settings::Settings;
use crate::storage::{JsonStorage, StorageBackend};
use crate::store::SettingsStore;

use log::info;
use std::sync::Arc;

/// Produces [`Settings`] handles for schema identifiers
///
/// # Example
///
/// ```rust,no_run
/// use shellshape_settings::{ExtensionConfig, MemoryStore, PREFS, SchemaResolver};
/// use std::sync::Arc;
///
/// let config = ExtensionConfig::builder("shellshape@gfxmonk.net").build();
/// let resolver = SchemaResolver::new(config, Arc::new(MemoryStore::new()));
///
/// let prefs = resolver.resolve(&PREFS)?;
/// println!("padding: {}", prefs.get_int("tile-padding")?);
/// # Ok::<(), shellshape_settings::Error>(())
/// ```
pub struct SchemaResolver<S: StorageBackend = JsonStorage> {
    config: ExtensionConfig,
    storage: S,
    store: Arc<dyn SettingsStore>,
}

impl SchemaResolver<JsonStorage> {
    /// Resolver reading JSON schema files
    pub fn new(config: ExtensionConfig, store: Arc<dyn SettingsStore>) -> Self {
        Self::with_storage(config, JsonStorage::new(), store)
    }
}

impl<S: StorageBackend> SchemaResolver<S> {
    /// Resolver reading schema files in the format of `storage`
    pub fn with_storage(config: ExtensionConfig, storage: S, store: Arc<dyn SettingsStore>) -> Self {
        Self {
            config,
            storage,
            store,
        }
    }

    pub fn config(&self) -> &ExtensionConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn SettingsStore> {
        &self.store
    }

    /// Build the schema source lookups go through
    ///
    /// The bundled directory, if present, is chained in front of the system
    /// default source. Its absence is a normal system-wide install.
    pub fn schema_source(&self) -> Result<SchemaSource> {
        info!("initting schemas");
        let system = SchemaSource::system_default(&self.config.system_schema_dirs, &self.storage)?;

        let schema_dir = self.config.schema_dir();
        if !schema_dir.exists() {
            info!(
                "no directory at: {} - assuming schemas globally installed",
                schema_dir.display()
            );
            return Ok(system);
        }

        info!("loading schemas from: {}", schema_dir.display());
        SchemaSource::from_directory(&schema_dir, &self.storage, Some(Arc::new(system)), false)
    }

    /// Bind a new [`Settings`] to the schema `id`
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaNotFound`] if neither the bundled nor the system
    /// source defines `id`.
    pub fn resolve(&self, id: &SchemaId) -> Result<Settings> {
        let source = self.schema_source()?;
        let schema = source
            .lookup(id, true)
            .ok_or_else(|| Error::SchemaNotFound {
                schema: id.to_string(),
                extension: self.config.uuid.clone(),
            })?;

        Ok(Settings::new(schema, Arc::clone(&self.store)))
    }
}
