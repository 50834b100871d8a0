//! Core configuration types for the settings layer

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::sync::Arc;

use crate::env::{DEFAULT_XDG_DATA_DIRS, XDG_DATA_DIRS};

/// Default system locale directory, used when the extension ships no `locale/`
pub const DEFAULT_LOCALE_DIR: &str = "/usr/share/locale";

// =============================================================================
// Environment Sources
// =============================================================================

/// Read-only view of a process environment
///
/// The settings layer never mutates the live environment; it reads a snapshot
/// through this trait so callers (and tests) decide where variables come from.
/// Names and values are carried as [`OsString`] so nothing is lost on the way
/// to a child process.
pub trait EnvSource: Send + Sync {
    /// Value of a single variable
    fn var(&self, name: &str) -> Option<OsString>;

    /// Every variable, in the order the source reports them
    fn vars(&self) -> Vec<(OsString, OsString)>;
}

/// Environment source backed by the current process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEnvSource;

impl EnvSource for DefaultEnvSource {
    fn var(&self, name: &str) -> Option<OsString> {
        std::env::var_os(name)
    }

    fn vars(&self) -> Vec<(OsString, OsString)> {
        std::env::vars_os().collect()
    }
}

/// Fixed environment snapshot
///
/// Variables are reported in name order.
#[derive(Debug, Clone, Default)]
pub struct MapEnvSource {
    vars: BTreeMap<OsString, OsString>,
}

impl MapEnvSource {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_var(mut self, name: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl<K: Into<OsString>, V: Into<OsString>> FromIterator<(K, V)> for MapEnvSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvSource for MapEnvSource {
    fn var(&self, name: &str) -> Option<OsString> {
        self.vars.get(OsStr::new(name)).cloned()
    }

    fn vars(&self) -> Vec<(OsString, OsString)> {
        self.vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

// =============================================================================
// Extension Configuration
// =============================================================================

/// Configuration for the settings layer of one installed extension
#[derive(Clone)]
pub struct ExtensionConfig {
    /// Extension uuid (reported in "schema not found" errors)
    pub uuid: String,

    /// Directory the extension is installed in
    pub extension_dir: PathBuf,

    /// Directories searched for system-wide schemas, highest precedence first
    pub system_schema_dirs: Vec<PathBuf>,

    /// Locale directory used when the extension ships none of its own
    pub system_locale_dir: PathBuf,

    /// Environment the layer reads variables from
    pub env_source: Arc<dyn EnvSource>,
}

impl std::fmt::Debug for ExtensionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionConfig")
            .field("uuid", &self.uuid)
            .field("extension_dir", &self.extension_dir)
            .field("system_schema_dirs", &self.system_schema_dirs)
            .field("system_locale_dir", &self.system_locale_dir)
            .finish_non_exhaustive()
    }
}

impl ExtensionConfig {
    /// Create a new builder for `ExtensionConfig`
    ///
    /// # Example
    /// ```rust
    /// use shellshape_settings::ExtensionConfig;
    ///
    /// let config = ExtensionConfig::builder("shellshape@gfxmonk.net")
    ///     .extension_dir("~/.local/share/gnome-shell/extensions/shellshape@gfxmonk.net")
    ///     .build();
    /// assert_eq!(config.uuid, "shellshape@gfxmonk.net");
    /// ```
    pub fn builder(uuid: impl Into<String>) -> ExtensionConfigBuilder {
        ExtensionConfigBuilder::new(uuid)
    }

    /// `<extension>/data`, the extension's local XDG data directory
    pub fn data_dir(&self) -> PathBuf {
        self.extension_dir.join("data")
    }

    /// `<extension>/data/glib-2.0/schemas`, the bundled schema directory
    pub fn schema_dir(&self) -> PathBuf {
        self.data_dir().join("glib-2.0").join("schemas")
    }

    /// `<extension>/locale`, present in zip-file builds
    pub fn locale_dir(&self) -> PathBuf {
        self.extension_dir.join("locale")
    }
}

/// Builder for creating `ExtensionConfig` with a fluent API
#[derive(Clone)]
pub struct ExtensionConfigBuilder {
    uuid: String,
    extension_dir: Option<PathBuf>,
    system_schema_dirs: Option<Vec<PathBuf>>,
    system_locale_dir: Option<PathBuf>,
    env_source: Option<Arc<dyn EnvSource>>,
}

impl std::fmt::Debug for ExtensionConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionConfigBuilder")
            .field("uuid", &self.uuid)
            .field("extension_dir", &self.extension_dir)
            .field("system_schema_dirs", &self.system_schema_dirs)
            .field("system_locale_dir", &self.system_locale_dir)
            .field("env_source", &self.env_source.as_ref().map(|_| "Some(EnvSource)"))
            .finish()
    }
}

impl ExtensionConfigBuilder {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            extension_dir: None,
            system_schema_dirs: None,
            system_locale_dir: None,
            env_source: None,
        }
    }

    /// Set the extension install directory
    ///
    /// Supports `~` expansion for home directory.
    pub fn extension_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.extension_dir = Some(expand_home(path.into()));
        self
    }

    /// Replace the system schema search path
    pub fn system_schema_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.system_schema_dirs = Some(dirs.into_iter().map(Into::into).collect());
        self
    }

    /// Append one directory to the system schema search path
    pub fn system_schema_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.system_schema_dirs
            .get_or_insert_with(Vec::new)
            .push(dir.into());
        self
    }

    /// Set the fallback locale directory (default: `/usr/share/locale`)
    pub fn system_locale_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.system_locale_dir = Some(dir.into());
        self
    }

    /// Read variables from `source` instead of the process environment
    pub fn env_source(mut self, source: Arc<dyn EnvSource>) -> Self {
        self.env_source = Some(source);
        self
    }

    /// Build the `ExtensionConfig`
    ///
    /// Unset values fall back to:
    /// - `extension_dir`: `<user data dir>/gnome-shell/extensions/<uuid>`
    /// - `system_schema_dirs`: `<dir>/glib-2.0/schemas` for the user data dir
    ///   and each entry of `XDG_DATA_DIRS` (or its conventional default)
    pub fn build(self) -> ExtensionConfig {
        let env_source = self
            .env_source
            .unwrap_or_else(|| Arc::new(DefaultEnvSource));

        let extension_dir = self.extension_dir.unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("gnome-shell").join("extensions").join(&self.uuid))
                .unwrap_or_else(|| PathBuf::from("."))
        });

        let system_schema_dirs = self
            .system_schema_dirs
            .unwrap_or_else(|| default_schema_dirs(env_source.as_ref()));

        ExtensionConfig {
            uuid: self.uuid,
            extension_dir,
            system_schema_dirs,
            system_locale_dir: self
                .system_locale_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOCALE_DIR)),
            env_source,
        }
    }
}

/// Expand a leading `~` to the home directory
pub(crate) fn expand_home(path: PathBuf) -> PathBuf {
    if path.starts_with("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(path.strip_prefix("~").unwrap_or(&path));
        }
    }
    path
}

/// Schema directories glib would consult, user directory first
pub fn default_schema_dirs(env: &dyn EnvSource) -> Vec<PathBuf> {
    let data_dirs: Vec<PathBuf> = match env.var(XDG_DATA_DIRS) {
        Some(value) if !value.is_empty() => std::env::split_paths(&value)
            .filter(|entry| !entry.as_os_str().is_empty())
            .collect(),
        _ => DEFAULT_XDG_DATA_DIRS.iter().map(PathBuf::from).collect(),
    };

    dirs::data_dir()
        .into_iter()
        .chain(data_dirs)
        .map(|dir| dir.join("glib-2.0").join("schemas"))
        .collect()
}
