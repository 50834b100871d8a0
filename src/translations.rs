//! Translation domain setup

use crate::extension::Extension;

use log::info;
use std::path::PathBuf;

/// Where a gettext domain's catalogs live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationBinding {
    pub domain: String,
    pub locale_dir: PathBuf,
    /// Catalogs ship inside the extension (zip-file builds)
    pub bundled: bool,
}

/// Decide where translations for `domain` are loaded from
///
/// Uses the extension's `locale/` directory when present, otherwise assumes
/// the extension shares the system prefix. The caller binds the returned
/// domain in its gettext runtime.
pub fn init_translations(extension: &Extension, domain: Option<&str>) -> TranslationBinding {
    let domain = domain
        .unwrap_or_else(|| extension.metadata().gettext_domain())
        .to_string();

    let local = extension.config().locale_dir();
    let (locale_dir, bundled) = if local.exists() {
        (local, true)
    } else {
        (extension.config().system_locale_dir.clone(), false)
    };

    info!("translations initted for {domain}");
    TranslationBinding {
        domain,
        locale_dir,
        bundled,
    }
}
