//! Shortcut help listing.
//!
//! The listing is derived from the same [`BindingTable`] the dispatcher uses,
//! so it can never drift from the active shortcuts. Callers get structured
//! [`HelpEntry`] rows and pick a presentation: [`render_html`] for an
//! `alert-info` block (shown as a toast or injected), or [`render_text`] for
//! a blocking `window.alert`.

#[cfg(test)]
#[path = "help_test.rs"]
mod help_test;

use serde::{Deserialize, Serialize};

use crate::shortcut::{BindingTable, ShortcutAction};

/// One row of the help listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpEntry {
    /// Combo as displayed, e.g. `"Ctrl+D"`.
    pub keys: String,
    pub label: String,
    pub action: ShortcutAction,
}

/// Help rows for every binding, in table order.
#[must_use]
pub fn entries(table: &BindingTable) -> Vec<HelpEntry> {
    table
        .iter()
        .map(|b| HelpEntry { keys: b.keys.to_string(), label: b.label.clone(), action: b.action })
        .collect()
}

/// `alert-info` block with a heading and one `<kbd>` row per entry.
#[must_use]
pub fn render_html(title: &str, entries: &[HelpEntry]) -> String {
    let mut html = format!("<div class=\"alert alert-info\"><h5>{title}</h5><ul>");
    for entry in entries {
        html.push_str(&format!("<li><kbd>{}</kbd> - {}</li>", entry.keys, entry.label));
    }
    html.push_str("</ul></div>");
    html
}

/// Plain-text listing for dialogs that cannot render markup.
#[must_use]
pub fn render_text(title: &str, entries: &[HelpEntry]) -> String {
    let mut text = title.to_owned();
    for entry in entries {
        text.push_str(&format!("\n{} - {}", entry.keys, entry.label));
    }
    text
}
