use super::*;
use crate::document::MemoryDocument;
use crate::storage::MemoryStore;

fn stored(store: &MemoryStore) -> Option<String> {
    store.get_item(DARK_MODE_KEY).unwrap_or_default()
}

// =============================================================
// DisplayMode
// =============================================================

#[test]
fn display_mode_default_is_light() {
    assert_eq!(DisplayMode::default(), DisplayMode::Light);
}

#[test]
fn from_stored_requires_exact_true() {
    assert_eq!(DisplayMode::from_stored(Some("true")), DisplayMode::Dark);
    assert_eq!(DisplayMode::from_stored(Some("false")), DisplayMode::Light);
    assert_eq!(DisplayMode::from_stored(Some("TRUE")), DisplayMode::Light);
    assert_eq!(DisplayMode::from_stored(Some("1")), DisplayMode::Light);
    assert_eq!(DisplayMode::from_stored(None), DisplayMode::Light);
}

#[test]
fn as_stored_strings() {
    assert_eq!(DisplayMode::Dark.as_stored(), "true");
    assert_eq!(DisplayMode::Light.as_stored(), "false");
}

#[test]
fn theme_settings_defaults() {
    let settings = ThemeSettings::default();
    assert_eq!(settings.storage_key, "darkMode");
    assert_eq!(settings.dark_class, "dark-mode");
}

// =============================================================
// toggle
// =============================================================

#[test]
fn toggle_from_light_goes_dark_and_persists() {
    let doc = MemoryDocument::new();
    let store = MemoryStore::new();
    let mode = toggle(&doc, &store, &ThemeSettings::default());
    assert_eq!(mode, DisplayMode::Dark);
    assert!(doc.body_has_class("dark-mode"));
    assert_eq!(stored(&store), Some("true".to_owned()));
}

#[test]
fn toggle_twice_restores_starting_state() {
    let doc = MemoryDocument::new();
    let store = MemoryStore::with_item(DARK_MODE_KEY, "true");
    doc.add_body_class("dark-mode");
    let settings = ThemeSettings::default();

    assert_eq!(toggle(&doc, &store, &settings), DisplayMode::Light);
    assert_eq!(stored(&store), Some("false".to_owned()));
    assert_eq!(toggle(&doc, &store, &settings), DisplayMode::Dark);
    assert_eq!(stored(&store), Some("true".to_owned()));
    assert!(doc.body_has_class("dark-mode"));
}

#[test]
fn toggle_survives_rejected_write() {
    let doc = MemoryDocument::new();
    let store = MemoryStore::read_only();
    assert_eq!(toggle(&doc, &store, &ThemeSettings::default()), DisplayMode::Dark);
    assert!(doc.body_has_class("dark-mode"));
    assert!(store.is_empty());
}

#[test]
fn toggle_without_body_keeps_stored_mode() {
    let doc = MemoryDocument::without_body();
    let store = MemoryStore::with_item("darkMode", "true");
    assert_eq!(toggle(&doc, &store, &ThemeSettings::default()), DisplayMode::Light);
    assert_eq!(stored(&store), Some("true".to_owned()));
}

#[test]
fn toggle_uses_configured_names() {
    let doc = MemoryDocument::new();
    let store = MemoryStore::new();
    let settings = ThemeSettings { storage_key: "tema".to_owned(), dark_class: "escuro".to_owned() };
    toggle(&doc, &store, &settings);
    assert!(doc.body_has_class("escuro"));
    assert_eq!(store.get_item("tema"), Ok(Some("true".to_owned())));
    assert_eq!(current(&doc, &settings), DisplayMode::Dark);
}

// =============================================================
// restore
// =============================================================

#[test]
fn restore_true_applies_dark() {
    let doc = MemoryDocument::new();
    let store = MemoryStore::with_item(DARK_MODE_KEY, "true");
    assert_eq!(restore(&doc, &store, &ThemeSettings::default()), DisplayMode::Dark);
    assert!(doc.body_has_class("dark-mode"));
}

#[test]
fn restore_false_leaves_light() {
    let doc = MemoryDocument::new();
    let store = MemoryStore::with_item(DARK_MODE_KEY, "false");
    assert_eq!(restore(&doc, &store, &ThemeSettings::default()), DisplayMode::Light);
    assert!(!doc.body_has_class("dark-mode"));
}

#[test]
fn restore_absent_key_leaves_light() {
    let doc = MemoryDocument::new();
    let store = MemoryStore::new();
    assert_eq!(restore(&doc, &store, &ThemeSettings::default()), DisplayMode::Light);
    assert!(doc.body_classes().is_empty());
}

#[test]
fn restore_does_not_write_store() {
    let doc = MemoryDocument::new();
    let store = MemoryStore::new();
    restore(&doc, &store, &ThemeSettings::default());
    assert!(store.is_empty());
}

#[test]
fn current_reflects_body_class() {
    let doc = MemoryDocument::new();
    let settings = ThemeSettings::default();
    assert_eq!(current(&doc, &settings), DisplayMode::Light);
    doc.add_body_class("dark-mode");
    assert_eq!(current(&doc, &settings), DisplayMode::Dark);
}
