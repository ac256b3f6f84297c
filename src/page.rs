//! Host-agnostic page core: every feature, wired to injected seams.
//!
//! ARCHITECTURE
//! ============
//! `PageCore` owns the configuration, the document and store handles, and the
//! toast scheduler. The browser shell forwards DOM events into it and acts
//! on the returned [`Outcome`] (prevent default or not); native tests drive
//! it directly with [`MemoryDocument`](crate::document::MemoryDocument) and
//! [`MemoryStore`](crate::storage::MemoryStore).
//!
//! Focusing or clicking a page element runs the page's own handlers
//! synchronously, and those may call back into the core. So
//! [`PageCore::route_key_down`] only resolves the target and hands back an
//! [`Activation`] for the host to apply after releasing the core.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here fails from the page's point of view. Missing lookup targets
//! become [`Outcome::TargetMissing`]; storage problems are logged by the
//! theme functions and otherwise ignored.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use std::time::Duration;

use crate::config::PageConfig;
use crate::document::PageDocument;
use crate::help::{self, HelpEntry};
use crate::shortcut::{Key, Modifiers, ShortcutAction};
use crate::storage::KeyValueStore;
use crate::theme::{self, DisplayMode};
use crate::toast::{Severity, Toast, ToastId, ToastScheduler};

/// Result of handling one key-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No binding matched; the event must propagate untouched.
    Ignored,
    /// Display mode flipped to the carried mode.
    ThemeToggled(DisplayMode),
    /// Search input received focus.
    SearchFocused,
    /// "New item" trigger was clicked.
    NewItemActivated,
    /// A binding matched but its target element is absent.
    TargetMissing(ShortcutAction),
}

impl Outcome {
    /// Whether the browser's default handling must be suppressed.
    ///
    /// True for every matched binding, including ones whose target is
    /// missing: the native shortcut stays overridden either way.
    #[must_use]
    pub fn prevents_default(self) -> bool {
        self != Self::Ignored
    }

    /// Action of the matched binding, if any.
    #[must_use]
    pub fn action(self) -> Option<ShortcutAction> {
        match self {
            Self::Ignored => None,
            Self::ThemeToggled(_) => Some(ShortcutAction::ToggleTheme),
            Self::SearchFocused => Some(ShortcutAction::FocusSearch),
            Self::NewItemActivated => Some(ShortcutAction::NewItem),
            Self::TargetMissing(action) => Some(action),
        }
    }
}

/// Element work left for the host after routing a key-down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation<E> {
    Focus(E),
    Click(E),
}

impl<E> Activation<E> {
    /// Perform the focus or click on `doc`.
    pub fn apply<D: PageDocument<Element = E>>(&self, doc: &D) {
        match self {
            Self::Focus(element) => doc.focus(element),
            Self::Click(element) => doc.click(element),
        }
    }
}

/// A routed key-down: what matched and what is left to activate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRoute<E> {
    pub outcome: Outcome,
    pub activation: Option<Activation<E>>,
}

/// Every page feature over a document `D` and a store `S`.
pub struct PageCore<D: PageDocument, S> {
    pub doc: D,
    pub store: S,
    config: PageConfig,
    toasts: ToastScheduler<D::Element>,
    restored: bool,
}

impl<D: PageDocument, S: KeyValueStore> PageCore<D, S> {
    #[must_use]
    pub fn new(doc: D, store: S, config: PageConfig) -> Self {
        let toasts = ToastScheduler::new(config.toast.lifetime());
        Self { doc, store, config, toasts, restored: false }
    }

    #[must_use]
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    // --- Theme ---

    /// Flip the display mode and persist it.
    pub fn toggle_dark_mode(&mut self) -> DisplayMode {
        theme::toggle(&self.doc, &self.store, &self.config.theme)
    }

    /// Apply the persisted display mode. One shot: later calls return `None`
    /// without reading the store.
    pub fn restore_display_mode(&mut self) -> Option<DisplayMode> {
        if self.restored {
            return None;
        }
        self.restored = true;
        Some(theme::restore(&self.doc, &self.store, &self.config.theme))
    }

    /// Mode currently shown by the document.
    #[must_use]
    pub fn display_mode(&self) -> DisplayMode {
        theme::current(&self.doc, &self.config.theme)
    }

    // --- Shortcuts ---

    /// Handle one key-down completely, including the focus or click.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Outcome {
        let route = self.route_key_down(key, modifiers);
        if let Some(activation) = &route.activation {
            activation.apply(&self.doc);
        }
        route.outcome
    }

    /// Route one key-down through the binding table. The theme toggle runs
    /// here; focus and click targets are returned as an [`Activation`].
    pub fn route_key_down(&mut self, key: &Key, modifiers: Modifiers) -> KeyRoute<D::Element> {
        let Some(action) = self.config.bindings.resolve(key, modifiers).map(|b| b.action) else {
            return KeyRoute { outcome: Outcome::Ignored, activation: None };
        };
        log::debug!("shortcut {action:?} for key {:?}", key.as_str());
        let (outcome, activation) = match action {
            ShortcutAction::ToggleTheme => (Outcome::ThemeToggled(self.toggle_dark_mode()), None),
            ShortcutAction::FocusSearch => match self.find_search_input() {
                Some(input) => (Outcome::SearchFocused, Some(Activation::Focus(input))),
                None => (Outcome::TargetMissing(action), None),
            },
            ShortcutAction::NewItem => match self.doc.query_selector(&self.config.targets.new_item_selector) {
                Some(trigger) => (Outcome::NewItemActivated, Some(Activation::Click(trigger))),
                None => (Outcome::TargetMissing(action), None),
            },
        };
        KeyRoute { outcome, activation }
    }

    fn find_search_input(&self) -> Option<D::Element> {
        let targets = &self.config.targets;
        let by_id = if targets.search_id.is_empty() { None } else { self.doc.element_by_id(&targets.search_id) };
        by_id.or_else(|| self.doc.query_selector(&targets.search_selector))
    }

    // --- Help ---

    /// Structured listing of the active bindings.
    #[must_use]
    pub fn shortcut_help(&self) -> Vec<HelpEntry> {
        help::entries(&self.config.bindings)
    }

    /// HTML rendering of the listing.
    #[must_use]
    pub fn shortcut_help_html(&self) -> String {
        help::render_html(&self.config.help_title, &self.shortcut_help())
    }

    /// Plain-text rendering of the listing.
    #[must_use]
    pub fn shortcut_help_text(&self) -> String {
        help::render_text(&self.config.help_title, &self.shortcut_help())
    }

    /// Present the listing as a non-blocking `info` toast.
    pub fn show_shortcut_help(&mut self, now: Duration) -> Option<ToastId> {
        let html = self.shortcut_help_html();
        self.show_toast(&html, Severity::Info, now)
    }

    // --- Toasts ---

    /// Show a toast and schedule its removal after the configured lifetime.
    pub fn show_toast(&mut self, message: &str, severity: Severity, now: Duration) -> Option<ToastId> {
        let toast = Toast::new(message, severity);
        self.toasts.show(&self.doc, &toast, &self.config.toast.style, now)
    }

    /// Remove every toast whose lifetime has elapsed by `now`.
    pub fn advance(&mut self, now: Duration) -> usize {
        self.toasts.advance(&self.doc, now)
    }

    /// Keep toast `id` on screen; its removal will not run.
    pub fn cancel_toast(&mut self, id: ToastId) -> bool {
        self.toasts.cancel(id)
    }

    /// Remove toast `id` now.
    pub fn dismiss_toast(&mut self, id: ToastId) -> bool {
        self.toasts.dismiss(&self.doc, id)
    }

    /// Drop all pending removals ahead of page teardown.
    pub fn cancel_all_toasts(&mut self) -> usize {
        self.toasts.cancel_all()
    }

    /// Number of toasts waiting for removal.
    #[must_use]
    pub fn pending_toasts(&self) -> usize {
        self.toasts.pending()
    }
}
