//! Keybinding enumeration
//!
//! Unlike preferences, the set of keybindings isn't fixed in code: every key
//! of the keybindings schema is an action, and each holds the ordered list of
//! accelerators bound to it.

use crate::KEYBINDINGS;
use crate::config::SchemaId;
use crate::error::Result;
use crate::resolver::SchemaResolver;
use crate::settings::Settings;
use crate::storage::StorageBackend;

use log::info;

/// Schema of dconf-editor's own settings
pub const DCONF_EDITOR_SCHEMA: SchemaId = SchemaId::from_static("ca.desrt.dconf-editor.Settings");

/// The extension's keybindings
#[derive(Debug)]
pub struct Keybindings {
    settings: Settings,
}

impl Keybindings {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Resolve the keybindings schema
    pub fn resolve<S: StorageBackend>(resolver: &SchemaResolver<S>) -> Result<Self> {
        resolver.resolve(&KEYBINDINGS).map(Self::new)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Action names present right now, in store order
    pub fn keys(&self) -> Vec<String> {
        self.settings.list_keys()
    }

    /// Visit one entry per action
    ///
    /// The key list is captured before the first visit. Callers must not rely
    /// on the visiting order.
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(Keybinding<'_>),
    {
        for key in self.keys() {
            visit(Keybinding {
                key,
                settings: &self.settings,
            });
        }
    }

    /// Like [`for_each`](Self::for_each), stopping at the first error
    pub fn try_for_each<F, E>(&self, mut visit: F) -> std::result::Result<(), E>
    where
        F: FnMut(Keybinding<'_>) -> std::result::Result<(), E>,
    {
        for key in self.keys() {
            visit(Keybinding {
                key,
                settings: &self.settings,
            })?;
        }
        Ok(())
    }

    /// Entry for a single action, if the schema has it
    pub fn get(&self, key: &str) -> Option<Keybinding<'_>> {
        self.settings.schema().has_key(key).then(|| Keybinding {
            key: key.to_string(),
            settings: &self.settings,
        })
    }
}

/// One action and its accelerators
#[derive(Debug)]
pub struct Keybinding<'a> {
    key: String,
    settings: &'a Settings,
}

impl Keybinding<'_> {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Accelerators bound to this action, in order
    pub fn get(&self) -> Result<Vec<String>> {
        self.settings.get_strv(&self.key)
    }

    pub fn set<S: AsRef<str>>(&self, accelerators: &[S]) -> Result<()> {
        self.settings.set_strv(&self.key, accelerators)
    }

    /// Restore the schema default
    pub fn reset(&self) -> Result<()> {
        self.settings.reset(&self.key)
    }
}

/// Point dconf-editor at the keybindings schema
///
/// Sets dconf-editor's `saved-view` so it opens on the extension's
/// keybindings the next time it starts.
pub fn set_dconf_view<S: StorageBackend>(resolver: &SchemaResolver<S>) -> Result<()> {
    let editor = resolver.resolve(&DCONF_EDITOR_SCHEMA)?;
    let view = KEYBINDINGS.to_path();
    info!("setting dconf-editor view to {view}");
    editor.set_string("saved-view", &view)
}
