//! Preference Descriptor Integration Tests
//!
//! Tests for the five typed preference descriptors:
//! - Schema defaults before anything is written
//! - Values read back exactly as written
//! - Writes outside a key's range rejected without touching the store

mod common;

use common::{TestFixture, prefs_schema};
use shellshape_settings::{Error, KeySchema, PREFS, Prefs, SettingsSchema, keys};

fn prefs(fixture: &TestFixture) -> Prefs {
    Prefs::resolve(&fixture.resolver()).expect("Failed to resolve prefs")
}

// =============================================================================
// Defaults
// =============================================================================

#[test]
fn test_defaults_come_from_schema() {
    let fixture = TestFixture::bundled();
    let prefs = prefs(&fixture);

    assert!(prefs.show_indicator.get().unwrap());
    assert_eq!(prefs.max_autotile.get().unwrap(), 8);
    assert_eq!(prefs.default_layout.get().unwrap(), "floating");
    assert_eq!(prefs.padding.get().unwrap(), 1);
    assert_eq!(prefs.screen_padding.get().unwrap(), 0);
    assert!(fixture.store.is_empty());
}

#[test]
fn test_descriptor_keys() {
    let fixture = TestFixture::bundled();
    let prefs = prefs(&fixture);

    assert_eq!(prefs.show_indicator.key(), "show-indicator");
    assert_eq!(prefs.max_autotile.key(), "max-autotiled-windows");
    assert_eq!(prefs.default_layout.key(), "default-layout");
    assert_eq!(prefs.padding.key(), "tile-padding");
    assert_eq!(prefs.screen_padding.key(), "screen-padding");
}

// =============================================================================
// Type Fidelity
// =============================================================================

#[test]
fn test_boolean_descriptor_reads_back() {
    let fixture = TestFixture::bundled();
    let prefs = prefs(&fixture);

    for value in [false, true] {
        prefs.show_indicator.set(value).unwrap();
        assert_eq!(prefs.show_indicator.get().unwrap(), value);
    }
}

#[test]
fn test_integer_descriptors_read_back() {
    let fixture = TestFixture::bundled();
    let prefs = prefs(&fixture);

    for pref in [&prefs.max_autotile, &prefs.padding, &prefs.screen_padding] {
        for value in [0, 12, -3] {
            pref.set(value).unwrap();
            assert_eq!(pref.get().unwrap(), value, "key {}", pref.key());
        }
    }
}

#[test]
fn test_string_descriptor_reads_back() {
    let fixture = TestFixture::bundled();
    let prefs = prefs(&fixture);

    for value in ["", "vertical", "tiled layout ✓"] {
        prefs.default_layout.set(value.to_string()).unwrap();
        assert_eq!(prefs.default_layout.get().unwrap(), value);
    }
}

#[test]
fn test_writes_visible_through_raw_settings() {
    let fixture = TestFixture::bundled();
    let prefs = prefs(&fixture);
    let raw = fixture.resolver().resolve(&PREFS).unwrap();

    prefs.padding.set(6).unwrap();
    prefs.default_layout.set("vertical".into()).unwrap();

    assert_eq!(raw.get_int(keys::PADDING).unwrap(), 6);
    assert_eq!(raw.get_string(keys::DEFAULT_LAYOUT).unwrap(), "vertical");
}

#[test]
fn test_reset_restores_default() {
    let fixture = TestFixture::bundled();
    let prefs = prefs(&fixture);

    prefs.screen_padding.set(20).unwrap();
    prefs.screen_padding.reset().unwrap();

    assert_eq!(prefs.screen_padding.get().unwrap(), 0);
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_out_of_range_write_rejected() {
    let fixture = TestFixture::new();
    let ranged = SettingsSchema::new(PREFS)
        .with_key(KeySchema::boolean(keys::SHOW_INDICATOR, true))
        .with_key(KeySchema::int(keys::MAX_AUTOTILE, 8).range(0, 32))
        .with_key(KeySchema::string(keys::DEFAULT_LAYOUT, "floating"))
        .with_key(KeySchema::int(keys::PADDING, 1).range(0, 100))
        .with_key(KeySchema::int(keys::SCREEN_PADDING, 0).range(0, 100));
    fixture.install_bundled(&ranged);
    let prefs = prefs(&fixture);

    let err = prefs.max_autotile.set(64).unwrap_err();

    assert!(err.is_write_error());
    assert!(matches!(err, Error::StoreWrite { .. }));
    assert_eq!(prefs.max_autotile.get().unwrap(), 8);
    assert!(fixture.store.is_empty());
}

#[test]
fn test_descriptor_type_must_match_schema() {
    let fixture = TestFixture::new();
    // tile-padding declared as a string instead of an int
    let mistyped = SettingsSchema::new(PREFS).with_key(KeySchema::string(keys::PADDING, "1"));
    fixture.install_bundled(&mistyped);
    let prefs = prefs(&fixture);

    let err = prefs.padding.get().unwrap_err();

    assert!(matches!(err, Error::TypeMismatch { .. }));
    assert!(prefs.padding.set(1).is_err());
}

#[test]
fn test_extra_schema_keys_are_ignored() {
    let fixture = TestFixture::new();
    fixture.install_bundled(&prefs_schema().with_key(KeySchema::boolean("legacy-option", false)));
    let prefs = prefs(&fixture);

    assert_eq!(prefs.settings().list_keys().len(), 6);
    assert_eq!(prefs.padding.get().unwrap(), 1);
}

#[test]
fn test_mistyped_system_default_is_reported() {
    let fixture = TestFixture::new();
    std::fs::create_dir_all(fixture.system_schema_dir()).unwrap();
    std::fs::write(
        fixture.system_schema_dir().join("prefs.json"),
        format!(
            r#"{{
                "id": "{PREFS}",
                "keys": [
                    {{ "name": "max-autotiled-windows", "type": "int", "default": "eight" }},
                    {{ "name": "default-layout", "type": "string", "default": 3 }}
                ]
            }}"#
        ),
    )
    .unwrap();
    let prefs = prefs(&fixture);

    assert!(matches!(
        prefs.max_autotile.get(),
        Err(Error::TypeMismatch { .. })
    ));
    assert!(matches!(
        prefs.default_layout.get(),
        Err(Error::TypeMismatch { .. })
    ));
}
