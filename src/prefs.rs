//! Fixed, typed preference descriptors
//!
//! Each preference is a [`Pref<T>`] naming one key of the prefs schema and
//! the Rust type it is read and written as. Call sites use the named fields
//! of [`Prefs`] rather than string keys:
//!
//! ```rust,no_run
//! # use shellshape_settings::{ExtensionConfig, MemoryStore, Prefs, SchemaResolver};
//! # use std::sync::Arc;
//! # let resolver = SchemaResolver::new(
//! #     ExtensionConfig::builder("shellshape@gfxmonk.net").build(),
//! #     Arc::new(MemoryStore::new()),
//! # );
//! let prefs = Prefs::resolve(&resolver)?;
//! if prefs.show_indicator.get()? {
//!     prefs.padding.set(4)?;
//! }
//! # Ok::<(), shellshape_settings::Error>(())
//! ```

use crate::PREFS;
use crate::config::SettingType;
use crate::error::Result;
use crate::resolver::SchemaResolver;
use crate::settings::Settings;
use crate::storage::StorageBackend;

use std::marker::PhantomData;
use std::sync::Arc;

/// Key names in the prefs schema
pub mod keys {
    pub const SHOW_INDICATOR: &str = "show-indicator";
    pub const MAX_AUTOTILE: &str = "max-autotiled-windows";
    pub const DEFAULT_LAYOUT: &str = "default-layout";
    pub const PADDING: &str = "tile-padding";
    pub const SCREEN_PADDING: &str = "screen-padding";
}

/// A Rust type a preference can be stored as
pub trait PrefValue: Sized {
    /// Schema type the key must be declared with
    const SETTING_TYPE: SettingType;

    fn read(settings: &Settings, key: &str) -> Result<Self>;

    fn write(settings: &Settings, key: &str, value: Self) -> Result<()>;
}

impl PrefValue for bool {
    const SETTING_TYPE: SettingType = SettingType::Boolean;

    fn read(settings: &Settings, key: &str) -> Result<Self> {
        settings.get_boolean(key)
    }

    fn write(settings: &Settings, key: &str, value: Self) -> Result<()> {
        settings.set_boolean(key, value)
    }
}

impl PrefValue for i32 {
    const SETTING_TYPE: SettingType = SettingType::Int;

    fn read(settings: &Settings, key: &str) -> Result<Self> {
        settings.get_int(key)
    }

    fn write(settings: &Settings, key: &str, value: Self) -> Result<()> {
        settings.set_int(key, value)
    }
}

impl PrefValue for String {
    const SETTING_TYPE: SettingType = SettingType::String;

    fn read(settings: &Settings, key: &str) -> Result<Self> {
        settings.get_string(key)
    }

    fn write(settings: &Settings, key: &str, value: Self) -> Result<()> {
        settings.set_string(key, &value)
    }
}

/// One named preference of type `T`
pub struct Pref<T: PrefValue> {
    key: &'static str,
    settings: Arc<Settings>,
    _type: PhantomData<fn() -> T>,
}

impl<T: PrefValue> Pref<T> {
    pub fn new(key: &'static str, settings: Arc<Settings>) -> Self {
        Self {
            key,
            settings,
            _type: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Current value, read from the store on every call
    pub fn get(&self) -> Result<T> {
        T::read(&self.settings, self.key)
    }

    /// Write `value` immediately
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreWrite`](crate::Error::StoreWrite) if the store
    /// rejects the value.
    pub fn set(&self, value: T) -> Result<()> {
        T::write(&self.settings, self.key, value)
    }

    /// Restore the schema default
    pub fn reset(&self) -> Result<()> {
        self.settings.reset(self.key)
    }
}

impl<T: PrefValue> std::fmt::Debug for Pref<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pref")
            .field("key", &self.key)
            .field("type", &T::SETTING_TYPE)
            .finish()
    }
}

/// The extension's preferences
#[derive(Debug)]
pub struct Prefs {
    settings: Arc<Settings>,
    pub show_indicator: Pref<bool>,
    pub max_autotile: Pref<i32>,
    pub default_layout: Pref<String>,
    pub padding: Pref<i32>,
    pub screen_padding: Pref<i32>,
}

impl Prefs {
    /// Wire the preference descriptors to `settings`
    pub fn new(settings: Settings) -> Self {
        let settings = Arc::new(settings);
        Self {
            show_indicator: Pref::new(keys::SHOW_INDICATOR, Arc::clone(&settings)),
            max_autotile: Pref::new(keys::MAX_AUTOTILE, Arc::clone(&settings)),
            default_layout: Pref::new(keys::DEFAULT_LAYOUT, Arc::clone(&settings)),
            padding: Pref::new(keys::PADDING, Arc::clone(&settings)),
            screen_padding: Pref::new(keys::SCREEN_PADDING, Arc::clone(&settings)),
            settings,
        }
    }

    /// Resolve the prefs schema and wire the descriptors to it
    pub fn resolve<S: StorageBackend>(resolver: &SchemaResolver<S>) -> Result<Self> {
        resolver.resolve(&PREFS).map(Self::new)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
