//! Keyboard shortcut model: modifiers, key combos, and the binding table.
//!
//! This module defines the types consumed by the dispatcher. A
//! [`ShortcutBinding`] pairs a [`KeyCombo`] with a [`ShortcutAction`] and a
//! human label; a [`BindingTable`] is an ordered list of bindings where the
//! first match wins. The same table drives dispatch and the help listing.
//!
//! `Ctrl` in a combo means the platform primary modifier: either Ctrl or
//! Cmd/Meta held on the event satisfies it. Modifiers the combo does not
//! mention are ignored, and the key is compared against the DOM `key` string
//! exactly, so `Ctrl+D` does not fire for Ctrl+Shift+D (`key == "D"`).

#[cfg(test)]
#[path = "shortcut_test.rs"]
mod shortcut_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Only the primary modifier (Ctrl) held.
    #[must_use]
    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }

    /// Only the Command / Meta key held.
    #[must_use]
    pub fn meta() -> Self {
        Self { meta: true, ..Self::default() }
    }

    /// Ctrl or Cmd/Meta is held.
    #[must_use]
    pub fn primary(self) -> bool {
        self.ctrl || self.meta
    }
}

/// A keyboard key as reported by the browser's `KeyboardEvent.key`
/// (e.g. `"d"`, `"D"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Key {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

// =============================================================================
// KEY COMBO
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseComboError {
    #[error("empty key combination")]
    Empty,
    #[error("unknown modifier: {0}")]
    UnknownModifier(String),
    #[error("key must be a single character: {0:?}")]
    InvalidKey(String),
}

impl ErrorCode for ParseComboError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "E_COMBO_EMPTY",
            Self::UnknownModifier(_) => "E_COMBO_MODIFIER",
            Self::InvalidKey(_) => "E_COMBO_KEY",
        }
    }
}

/// A key plus the modifiers that must be held, written like `"Ctrl+D"`.
///
/// Letters are stored lowercase, matching the DOM `key` of an unshifted
/// press; combos that require Shift match the key case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyCombo {
    pub primary: bool,
    pub shift: bool,
    pub alt: bool,
    pub key: char,
}

impl KeyCombo {
    /// Primary modifier + `key`.
    #[must_use]
    pub fn ctrl(key: char) -> Self {
        Self { primary: true, shift: false, alt: false, key: key.to_ascii_lowercase() }
    }

    /// Whether a key-down of `key` with `modifiers` triggers this combo.
    #[must_use]
    pub fn matches(&self, key: &Key, modifiers: Modifiers) -> bool {
        if self.primary && !modifiers.primary() {
            return false;
        }
        if self.shift && !modifiers.shift {
            return false;
        }
        if self.alt && !modifiers.alt {
            return false;
        }
        let mut chars = key.as_str().chars();
        let (Some(pressed), None) = (chars.next(), chars.next()) else {
            return false;
        };
        if self.shift {
            pressed.to_lowercase().eq(self.key.to_lowercase())
        } else {
            pressed == self.key
        }
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.primary {
            f.write_str("Ctrl+")?;
        }
        if self.alt {
            f.write_str("Alt+")?;
        }
        if self.shift {
            f.write_str("Shift+")?;
        }
        write!(f, "{}", self.key.to_ascii_uppercase())
    }
}

impl FromStr for KeyCombo {
    type Err = ParseComboError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ParseComboError::Empty);
        }
        let mut parts: Vec<&str> = raw.split('+').map(str::trim).collect();
        let key_part = parts.pop().unwrap_or_default();
        let mut chars = key_part.chars();
        let key = match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_whitespace() => c.to_ascii_lowercase(),
            _ => return Err(ParseComboError::InvalidKey(key_part.to_owned())),
        };

        let mut combo = Self { primary: false, shift: false, alt: false, key };
        for part in parts {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" | "cmd" | "command" | "meta" | "mod" | "cmd/ctrl" | "ctrl/cmd" => {
                    combo.primary = true;
                }
                "shift" => combo.shift = true,
                "alt" | "option" => combo.alt = true,
                _ => return Err(ParseComboError::UnknownModifier(part.to_owned())),
            }
        }
        Ok(combo)
    }
}

impl TryFrom<String> for KeyCombo {
    type Error = ParseComboError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<KeyCombo> for String {
    fn from(combo: KeyCombo) -> Self {
        combo.to_string()
    }
}

// =============================================================================
// BINDINGS
// =============================================================================

/// What a shortcut does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortcutAction {
    /// Flip the display mode.
    ToggleTheme,
    /// Focus the page's search input.
    FocusSearch,
    /// Activate the page's "new item" trigger.
    NewItem,
}

/// One row of the binding table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutBinding {
    pub keys: KeyCombo,
    pub action: ShortcutAction,
    /// Human label shown in the help listing.
    pub label: String,
}

impl ShortcutBinding {
    #[must_use]
    pub fn new(keys: KeyCombo, action: ShortcutAction, label: &str) -> Self {
        Self { keys, action, label: label.to_owned() }
    }
}

/// Ordered shortcut bindings; the first matching binding wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindingTable(Vec<ShortcutBinding>);

impl Default for BindingTable {
    fn default() -> Self {
        Self(vec![
            ShortcutBinding::new(KeyCombo::ctrl('d'), ShortcutAction::ToggleTheme, "Ativar Dark Mode"),
            ShortcutBinding::new(KeyCombo::ctrl('k'), ShortcutAction::FocusSearch, "Focar em Busca"),
            ShortcutBinding::new(KeyCombo::ctrl('n'), ShortcutAction::NewItem, "Novo Item"),
        ])
    }
}

impl BindingTable {
    #[must_use]
    pub fn new(bindings: Vec<ShortcutBinding>) -> Self {
        Self(bindings)
    }

    /// First binding triggered by `key` with `modifiers`.
    #[must_use]
    pub fn resolve(&self, key: &Key, modifiers: Modifiers) -> Option<&ShortcutBinding> {
        self.0.iter().find(|b| b.keys.matches(key, modifiers))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShortcutBinding> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
