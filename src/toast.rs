//! Toast notifications: model, severity, and the removal scheduler.
//!
//! A toast is a `div` pinned to the bottom-right of the viewport carrying the
//! classes `alert alert-{severity} fade-in`. It removes itself after a fixed
//! lifetime. Several toasts may be on screen at once; nothing coordinates
//! their layout, so later toasts can overlap earlier ones.
//!
//! DESIGN
//! ======
//! Removal is a cancellable scheduled task rather than a fire-and-forget
//! timer. [`ToastScheduler`] keeps one deadline per toast against a clock the
//! host advances explicitly, which keeps native tests deterministic. The
//! browser shell uses real timeouts but hands out the same cancel/dismiss
//! controls: each timeout dismisses its toast by id, so in the browser
//! [`ToastScheduler::advance`] is never called and the recorded deadlines
//! only matter to headless hosts.
//!
//! Severity is an open set: the four standard alert styles are named
//! variants, anything else passes through unchanged as [`Severity::Other`].

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{TOAST_FADE_CLASS, TOAST_LIFETIME_MS};
use crate::document::PageDocument;

/// Identifier handed out for each shown toast.
pub type ToastId = Uuid;

/// Alert style of a toast.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
    /// Any other category, used verbatim in the class name.
    Other(String),
}

impl Severity {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for Severity {
    fn from(name: &str) -> Self {
        match name {
            "info" => Self::Info,
            "success" => Self::Success,
            "warning" => Self::Warning,
            "danger" => Self::Danger,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for Severity {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        severity.as_str().to_owned()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification waiting to be shown.
///
/// `message` is inserted as HTML without sanitization; callers are trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub message: String,
    #[serde(default)]
    pub severity: Severity,
}

impl Toast {
    #[must_use]
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self { message: message.into(), severity }
    }

    /// Toast with the default `info` severity.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }

    /// Full class attribute for the toast element.
    #[must_use]
    pub fn class_name(&self) -> String {
        format!("alert alert-{} {TOAST_FADE_CLASS}", self.severity)
    }
}

// =============================================================================
// SCHEDULER
// =============================================================================

#[derive(Debug, Clone)]
struct PendingToast<E> {
    id: ToastId,
    element: E,
    deadline: Duration,
}

/// Tracks shown toasts and removes each once its lifetime has elapsed.
///
/// Time is host-driven: callers pass a monotonic `now` to [`Self::show`] and
/// [`Self::advance`]. A toast shown at `t` is removed by the first `advance`
/// with `now >= t + lifetime`.
#[derive(Debug, Clone)]
pub struct ToastScheduler<E> {
    lifetime: Duration,
    pending: Vec<PendingToast<E>>,
}

impl<E> Default for ToastScheduler<E> {
    fn default() -> Self {
        Self::new(Duration::from_millis(TOAST_LIFETIME_MS))
    }
}

impl<E> ToastScheduler<E> {
    #[must_use]
    pub fn new(lifetime: Duration) -> Self {
        Self { lifetime, pending: Vec::new() }
    }

    /// Number of toasts still waiting for removal.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Insert `toast` into `doc` and schedule its removal.
    ///
    /// Returns `None` when the document has nowhere to put it.
    pub fn show<D>(&mut self, doc: &D, toast: &Toast, style: &str, now: Duration) -> Option<ToastId>
    where
        D: PageDocument<Element = E>,
    {
        let element = doc.append_toast(toast, style)?;
        let id = Uuid::new_v4();
        self.pending.push(PendingToast { id, element, deadline: now.saturating_add(self.lifetime) });
        log::debug!("toast {id} shown ({})", toast.severity);
        Some(id)
    }

    /// Remove every toast whose deadline is at or before `now`.
    ///
    /// Returns the number removed.
    pub fn advance<D>(&mut self, doc: &D, now: Duration) -> usize
    where
        D: PageDocument<Element = E>,
    {
        let (expired, live): (Vec<_>, Vec<_>) = self.pending.drain(..).partition(|p| p.deadline <= now);
        self.pending = live;
        for toast in &expired {
            doc.remove(&toast.element);
        }
        expired.len()
    }

    /// Stop the pending removal of `id`. The element stays on the page.
    pub fn cancel(&mut self, id: ToastId) -> bool {
        self.take(id).is_some()
    }

    /// Remove `id` from the page now instead of waiting for its deadline.
    pub fn dismiss<D>(&mut self, doc: &D, id: ToastId) -> bool
    where
        D: PageDocument<Element = E>,
    {
        match self.take(id) {
            Some(toast) => {
                doc.remove(&toast.element);
                true
            }
            None => false,
        }
    }

    /// Drop every pending removal, e.g. before the host page is torn down.
    ///
    /// Returns the number of cancelled removals.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.pending.len();
        self.pending.clear();
        cancelled
    }

    fn take(&mut self, id: ToastId) -> Option<PendingToast<E>> {
        let index = self.pending.iter().position(|p| p.id == id)?;
        Some(self.pending.remove(index))
    }
}
