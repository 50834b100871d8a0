//! Environment for external tools that need the extension's data
//!
//! Tools spawned by the extension (such as a settings editor) find schemas
//! through `XDG_DATA_DIRS`. When the extension carries its own `data/`
//! directory, that directory has to be on the search path of the child
//! process. The child gets a complete replacement environment; the live
//! process environment is never modified.

use crate::config::{EnvSource, ExtensionConfig};

use log::{info, warn};
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Search-path variable consulted for schemas and other shared data
pub const XDG_DATA_DIRS: &str = "XDG_DATA_DIRS";

/// Value assumed for `XDG_DATA_DIRS` when it is unset
pub const DEFAULT_XDG_DATA_DIRS: [&str; 2] = ["/usr/local/share/", "/usr/share/"];

/// One `NAME=value` pair of an environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentEntry {
    pub name: OsString,
    pub value: OsString,
}

impl EnvironmentEntry {
    pub fn new(name: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for EnvironmentEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}",
            self.name.to_string_lossy(),
            self.value.to_string_lossy()
        )
    }
}

/// Computes the environment for child processes
pub struct EnvironmentAugmenter {
    data_dir: PathBuf,
    source: Arc<dyn EnvSource>,
}

impl EnvironmentAugmenter {
    pub fn new(data_dir: impl Into<PathBuf>, source: Arc<dyn EnvSource>) -> Self {
        Self {
            data_dir: data_dir.into(),
            source,
        }
    }

    /// Augmenter for the extension's `data/` directory
    pub fn from_config(config: &ExtensionConfig) -> Self {
        Self::new(config.data_dir(), Arc::clone(&config.env_source))
    }

    /// New value for `XDG_DATA_DIRS`, or `None` if no change is needed
    ///
    /// No change is needed when the extension has no `data/` directory or
    /// the variable already lists it. An unset (or empty) variable is seeded
    /// with [`DEFAULT_XDG_DATA_DIRS`] before the data directory is appended.
    pub fn search_path(&self) -> Option<OsString> {
        if !self.data_dir.exists() {
            info!("xdg dir doesn't exist - assuming global install");
            return None;
        }
        let data_dir = self.data_dir.as_os_str();

        let mut value = match self.source.var(XDG_DATA_DIRS) {
            Some(current) if !current.is_empty() => {
                let listed = current
                    .as_encoded_bytes()
                    .split(|b| *b == b':')
                    .any(|entry| entry == data_dir.as_encoded_bytes());
                if listed {
                    return None;
                }
                current
            }
            _ => OsString::from(DEFAULT_XDG_DATA_DIRS.join(":")),
        };
        value.push(":");
        value.push(data_dir);
        Some(value)
    }

    /// Full replacement environment, or `None` to inherit unchanged
    ///
    /// `XDG_DATA_DIRS` comes first; every other variable follows in source
    /// order with its value untouched.
    pub fn compute(&self) -> Option<Vec<EnvironmentEntry>> {
        let search_path = self.search_path()?;

        let mut entries = vec![EnvironmentEntry::new(XDG_DATA_DIRS, search_path)];
        entries.extend(
            self.source
                .vars()
                .into_iter()
                .filter(|(name, _)| name.as_os_str() != OsStr::new(XDG_DATA_DIRS))
                .map(|(name, value)| EnvironmentEntry { name, value }),
        );
        Some(entries)
    }

    /// [`compute`](Self::compute) rendered as `NAME=value` strings
    ///
    /// Non-unicode names and values are converted lossily; use `compute` to
    /// pass them on unchanged.
    pub fn envp(&self) -> Option<Vec<String>> {
        let entries = self.compute()?;
        Some(
            entries
                .iter()
                .inspect(|entry| {
                    if entry.name.to_str().is_none() || entry.value.to_str().is_none() {
                        warn!(
                            "{} is not valid unicode, converting lossily",
                            entry.name.to_string_lossy()
                        );
                    }
                })
                .map(ToString::to_string)
                .collect(),
        )
    }
}
