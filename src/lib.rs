//! # shellshape-settings
//!
//! Typed settings layer for the shellshape tiling extension.
//!
//! ## Features
//!
//! - **Schema Resolution**: Schemas bundled with the extension take precedence
//!   over the system registry; a missing bundle means a system-wide install
//! - **Typed Preferences**: Five named, typed descriptors instead of string keys
//! - **Keybindings**: Enumerate every keybinding action at runtime
//! - **Child Environments**: Compute an environment exposing the extension's
//!   data directory to external tools through `XDG_DATA_DIRS`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shellshape_settings::{Extension, Keybindings, MemoryStore, Prefs};
//! use std::sync::Arc;
//!
//! # fn example() -> shellshape_settings::Result<()> {
//! let extension = Extension::load("~/.local/share/gnome-shell/extensions/shellshape@gfxmonk.net")?;
//! let resolver = extension.resolver(Arc::new(MemoryStore::new()));
//!
//! let prefs = Prefs::resolve(&resolver)?;
//! prefs.padding.set(4)?;
//!
//! let keybindings = Keybindings::resolve(&resolver)?;
//! keybindings.for_each(|binding| {
//!     println!("{} => {:?}", binding.key(), binding.get());
//! });
//! # Ok(())
//! # }
//! ```
//!
//! ## Launching a Settings Editor
//!
//! ```rust,no_run
//! use shellshape_settings::Extension;
//! use std::process::Command;
//!
//! # fn example(extension: &Extension) {
//! let mut editor = Command::new("dconf-editor");
//! if let Some(env) = extension.environment().compute() {
//!     editor.env_clear();
//!     editor.envs(env.into_iter().map(|e| (e.name, e.value)));
//! }
//! # }
//! ```

// Core modules
mod error;
mod extension;
mod keybindings;
mod prefs;
mod resolver;
mod settings;
mod sync;
mod translations;

pub mod config;
pub mod env;
pub mod schema_source;
pub mod storage;
pub mod store;

// Re-exports from core
pub use env::{EnvironmentAugmenter, EnvironmentEntry};
pub use error::{Error, Result};
pub use extension::{Extension, ExtensionMetadata};
pub use keybindings::{DCONF_EDITOR_SCHEMA, Keybinding, Keybindings, set_dconf_view};
pub use prefs::{Pref, PrefValue, Prefs, keys};
pub use resolver::SchemaResolver;
pub use schema_source::SchemaSource;
pub use settings::Settings;
pub use storage::{JsonStorage, StorageBackend};
pub use store::{MemoryStore, SettingsStore};
pub use translations::{TranslationBinding, init_translations};

#[cfg(feature = "toml")]
pub use storage::TomlStorage;

// Re-exports from config
pub use config::{
    DefaultEnvSource, EnvSource, ExtensionConfig, ExtensionConfigBuilder, KeySchema, MapEnvSource, SchemaId,
    SettingType, SettingsSchema,
};

// =============================================================================
// Schema Identifiers
// =============================================================================

/// Root of every shellshape schema id
pub const SCHEMA_ROOT: SchemaId =
    SchemaId::from_static("org.gnome.shell.extensions.net.gfxmonk.shellshape");

/// Schema holding one key per keybinding action
pub const KEYBINDINGS: SchemaId =
    SchemaId::from_static("org.gnome.shell.extensions.net.gfxmonk.shellshape.keybindings");

/// Schema holding the extension's preferences
pub const PREFS: SchemaId =
    SchemaId::from_static("org.gnome.shell.extensions.net.gfxmonk.shellshape.prefs");
