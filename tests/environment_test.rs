//! Child Environment Integration Tests
//!
//! Tests for the environment handed to external tools:
//! - Seeding `XDG_DATA_DIRS` when it is unset
//! - Appending the extension's data directory exactly once
//! - Leaving every other variable untouched
//! - Translation directory selection

mod common;

use common::{TestFixture, UUID};
use shellshape_settings::env::XDG_DATA_DIRS;
use shellshape_settings::{EnvironmentEntry, Extension, MapEnvSource, init_translations};
use std::ffi::{OsStr, OsString};

fn extension_with_env(fixture: &TestFixture, env: MapEnvSource) -> Extension {
    Extension::from_config(fixture.config_with_env(env))
}

fn xdg_value(entries: &[EnvironmentEntry]) -> &OsStr {
    entries
        .iter()
        .find(|e| e.name.as_os_str() == OsStr::new(XDG_DATA_DIRS))
        .map(|e| e.value.as_os_str())
        .expect("XDG_DATA_DIRS missing")
}

// =============================================================================
// Search Path
// =============================================================================

#[test]
fn test_unset_variable_is_seeded() {
    let fixture = TestFixture::bundled();
    let env = MapEnvSource::new()
        .with_var("HOME", "/home/me")
        .with_var("LANG", "en_AU.UTF-8");
    let extension = extension_with_env(&fixture, env);

    let entries = extension.environment().compute().unwrap();

    assert_eq!(
        xdg_value(&entries),
        OsStr::new(&format!(
            "/usr/local/share/:/usr/share/:{}",
            fixture.data_dir().display()
        ))
    );
    assert_eq!(entries.len(), 3);
    assert!(entries.contains(&EnvironmentEntry::new("HOME", "/home/me")));
    assert!(entries.contains(&EnvironmentEntry::new("LANG", "en_AU.UTF-8")));
}

#[test]
fn test_existing_search_path_is_extended() {
    let fixture = TestFixture::bundled();
    let env = MapEnvSource::new()
        .with_var(XDG_DATA_DIRS, "/opt/share:/usr/share")
        .with_var("PATH", "/usr/bin");
    let extension = extension_with_env(&fixture, env);

    let entries = extension.environment().compute().unwrap();

    assert_eq!(entries[0].name, OsString::from(XDG_DATA_DIRS));
    assert_eq!(
        entries[0].value,
        OsString::from(format!("/opt/share:/usr/share:{}", fixture.data_dir().display()))
    );
    assert_eq!(
        entries
            .iter()
            .filter(|e| e.name.as_os_str() == OsStr::new(XDG_DATA_DIRS))
            .count(),
        1
    );
    assert!(entries.contains(&EnvironmentEntry::new("PATH", "/usr/bin")));
}

#[test]
fn test_augmentation_is_idempotent() {
    let fixture = TestFixture::bundled();
    let first = extension_with_env(&fixture, MapEnvSource::new().with_var("HOME", "/home/me"))
        .environment()
        .compute()
        .unwrap();

    // Feed the computed environment back in as the current one
    let second_env: MapEnvSource = first.iter().map(|e| (e.name.clone(), e.value.clone())).collect();
    let second = extension_with_env(&fixture, second_env).environment().compute();

    assert_eq!(second, None);
}

#[test]
fn test_system_wide_install_inherits_environment() {
    let fixture = TestFixture::system_wide();
    let extension = extension_with_env(&fixture, MapEnvSource::new().with_var("HOME", "/home/me"));

    assert_eq!(extension.environment().compute(), None);
    assert_eq!(extension.environment().envp(), None);
}

#[test]
fn test_envp_strings() {
    let fixture = TestFixture::bundled();
    let extension = extension_with_env(&fixture, MapEnvSource::new().with_var("TERM", "xterm"));

    let envp = extension.environment().envp().unwrap();

    assert_eq!(
        envp,
        vec![
            format!(
                "XDG_DATA_DIRS=/usr/local/share/:/usr/share/:{}",
                fixture.data_dir().display()
            ),
            "TERM=xterm".to_string(),
        ]
    );
}

#[cfg(unix)]
#[test]
fn test_non_unicode_variables_reach_child_environment() {
    use std::os::unix::ffi::OsStringExt;

    let fixture = TestFixture::bundled();
    let raw = OsString::from_vec(b"a\xffb".to_vec());
    let extension = extension_with_env(
        &fixture,
        MapEnvSource::new()
            .with_var("RAW_BYTES", raw.clone())
            .with_var("HOME", "/home/me"),
    );

    let entries = extension.environment().compute().unwrap();

    assert!(entries.contains(&EnvironmentEntry::new("RAW_BYTES", raw)));
    assert!(entries.contains(&EnvironmentEntry::new("HOME", "/home/me")));
    assert_eq!(entries.len(), 3);
}

// =============================================================================
// Translations
// =============================================================================

#[test]
fn test_translations_use_bundled_locale_dir() {
    let fixture = TestFixture::bundled();
    std::fs::create_dir_all(fixture.extension_dir().join("locale")).unwrap();

    let binding = init_translations(&fixture.extension(), None);

    assert_eq!(binding.domain, UUID);
    assert_eq!(binding.locale_dir, fixture.extension_dir().join("locale"));
    assert!(binding.bundled);
}

#[test]
fn test_translations_fall_back_to_system_locale_dir() {
    let fixture = TestFixture::system_wide();

    let binding = init_translations(&fixture.extension(), Some("shellshape"));

    assert_eq!(binding.domain, "shellshape");
    assert_eq!(binding.locale_dir, fixture.temp_dir.path().join("locale"));
    assert!(!binding.bundled);
}
