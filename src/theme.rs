//! Dark mode toggle and one-shot restore.
//!
//! Display mode is a class on `<body>` (default `dark-mode`) mirrored into
//! the persistent store under a fixed key (default `darkMode`) as the string
//! `"true"` or `"false"`. Toggle is the only writer; restore is the only
//! reader and runs once at page load.
//!
//! TRADE-OFFS
//! ==========
//! Persistence is best-effort. A failed store write is logged and the visual
//! change stands, so the page never refuses a toggle because storage is full
//! or disabled. The next successful toggle resynchronizes the stored value.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DARK_CLASS, DARK_MODE_KEY};
use crate::document::PageDocument;
use crate::error::describe;
use crate::storage::KeyValueStore;

/// Light/dark visual theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Light,
    Dark,
}

impl DisplayMode {
    #[must_use]
    pub fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    /// Parse a stored value. Only the exact string `"true"` means dark.
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        Self::from_dark(value == Some("true"))
    }

    /// String form written to the store.
    #[must_use]
    pub fn as_stored(self) -> &'static str {
        if self.is_dark() { "true" } else { "false" }
    }
}

/// Where the display mode lives in the document and the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    pub storage_key: String,
    pub dark_class: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self { storage_key: DARK_MODE_KEY.to_owned(), dark_class: DARK_CLASS.to_owned() }
    }
}

/// Current display mode as shown by the document.
#[must_use]
pub fn current<D: PageDocument>(doc: &D, settings: &ThemeSettings) -> DisplayMode {
    DisplayMode::from_dark(doc.body_has_class(&settings.dark_class))
}

/// Flip the dark class on `<body>` and persist the result.
///
/// Without a body nothing changes on screen, so the store is left alone and
/// the unchanged mode is returned.
pub fn toggle<D, S>(doc: &D, store: &S, settings: &ThemeSettings) -> DisplayMode
where
    D: PageDocument,
    S: KeyValueStore + ?Sized,
{
    let Some(dark) = doc.toggle_body_class(&settings.dark_class) else {
        log::debug!("no body; display mode unchanged");
        return current(doc, settings);
    };
    let mode = DisplayMode::from_dark(dark);
    if let Err(err) = store.set_item(&settings.storage_key, mode.as_stored()) {
        log::warn!("display mode not persisted: {}", describe(&err));
    }
    log::debug!("display mode toggled to {mode:?}");
    mode
}

/// Apply the persisted display mode to the document.
///
/// Adds the dark class only when the stored value is exactly `"true"`; never
/// removes it. Read failures leave the default light mode.
pub fn restore<D, S>(doc: &D, store: &S, settings: &ThemeSettings) -> DisplayMode
where
    D: PageDocument,
    S: KeyValueStore + ?Sized,
{
    let stored = match store.get_item(&settings.storage_key) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("display mode not restored: {}", describe(&err));
            None
        }
    };
    let mode = DisplayMode::from_stored(stored.as_deref());
    if mode.is_dark() {
        doc.add_body_class(&settings.dark_class);
    }
    mode
}
