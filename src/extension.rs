//! Extension identity and metadata

use crate::config::{ExtensionConfig, ExtensionConfigBuilder, expand_home};
use crate::env::EnvironmentAugmenter;
use crate::error::Result;
use crate::resolver::SchemaResolver;
use crate::storage::{JsonStorage, StorageBackend};
use crate::store::SettingsStore;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Name of the metadata file at the root of every extension
pub const METADATA_FILE: &str = "metadata.json";

/// Contents of an extension's `metadata.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionMetadata {
    pub uuid: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(
        rename = "gettext-domain",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub gettext_domain: Option<String>,

    #[serde(
        rename = "settings-schema",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub settings_schema: Option<String>,

    #[serde(rename = "shell-version", default, skip_serializing_if = "Vec::is_empty")]
    pub shell_version: Vec<String>,
}

impl ExtensionMetadata {
    /// Minimal metadata carrying only a uuid
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: String::new(),
            description: String::new(),
            gettext_domain: None,
            settings_schema: None,
            shell_version: Vec::new(),
        }
    }

    /// Read `<dir>/metadata.json`
    pub fn load(dir: &Path) -> Result<Self> {
        JsonStorage::new().read(&dir.join(METADATA_FILE))
    }

    /// Translation domain, defaulting to the uuid
    pub fn gettext_domain(&self) -> &str {
        self.gettext_domain.as_deref().unwrap_or(&self.uuid)
    }
}

/// An installed extension: its metadata plus settings configuration
#[derive(Debug, Clone)]
pub struct Extension {
    metadata: ExtensionMetadata,
    config: ExtensionConfig,
}

impl Extension {
    pub fn new(metadata: ExtensionMetadata, config: ExtensionConfig) -> Self {
        Self { metadata, config }
    }

    /// Extension with no metadata file, identified by the config's uuid
    pub fn from_config(config: ExtensionConfig) -> Self {
        Self::new(ExtensionMetadata::new(config.uuid.clone()), config)
    }

    /// Load the extension installed in `dir`
    ///
    /// # Errors
    ///
    /// Returns an error if `metadata.json` is missing or malformed.
    pub fn load(dir: impl Into<PathBuf>) -> Result<Self> {
        Self::load_with(dir, |builder| builder)
    }

    /// Load the extension installed in `dir`, adjusting its configuration
    pub fn load_with<F>(dir: impl Into<PathBuf>, configure: F) -> Result<Self>
    where
        F: FnOnce(ExtensionConfigBuilder) -> ExtensionConfigBuilder,
    {
        let dir = expand_home(dir.into());
        let metadata = ExtensionMetadata::load(&dir)?;
        let builder = ExtensionConfig::builder(metadata.uuid.clone()).extension_dir(dir);
        let config = configure(builder).build();
        Ok(Self::new(metadata, config))
    }

    pub fn uuid(&self) -> &str {
        &self.metadata.uuid
    }

    pub fn dir(&self) -> &Path {
        &self.config.extension_dir
    }

    pub fn metadata(&self) -> &ExtensionMetadata {
        &self.metadata
    }

    pub fn config(&self) -> &ExtensionConfig {
        &self.config
    }

    /// Schema resolver for this extension backed by `store`
    pub fn resolver(&self, store: Arc<dyn SettingsStore>) -> SchemaResolver {
        SchemaResolver::new(self.config.clone(), store)
    }

    /// Environment augmenter for this extension's `data/` directory
    pub fn environment(&self) -> EnvironmentAugmenter {
        EnvironmentAugmenter::from_config(&self.config)
    }
}
