//! Browser shell: `web-sys` seams, DOM event wiring, and the JS exports.
//!
//! SYSTEM CONTEXT
//! ==============
//! The `#[wasm_bindgen(start)]` entry installs a default [`PageKit`] as soon
//! as the module loads, so a page that only includes the script gets the
//! shortcuts, the restored display mode, and the global functions
//! `toggleDarkMode`, `mostrarAtalhos`, and `mostrarNotificacao`. A page that
//! wants different names or bindings constructs its own `PageKit` from a JSON
//! config; that replaces the default instance so only one keydown listener is
//! ever active.
//!
//! DESIGN
//! ======
//! [`WebDocument`] and [`LocalStore`] implement the core seams over
//! `web_sys`. All state lives in one `Rc<RefCell<PageCore>>` per instance.
//! Event closures and toast timers hold only a `Weak` to it, so a destroyed
//! instance leaves nothing behind that can act on the page.
//!
//! Toast removal runs on a `gloo_timers` [`Timeout`] that dismisses the toast
//! through the core scheduler. Cancelling a toast both drops the timer and
//! forgets the pending entry, so a timer that already fired finds nothing.
//!
//! ERROR HANDLING
//! ==============
//! DOM and storage failures are logged and swallowed. The only thrown error is
//! a bad config passed to the `PageKit` constructor.
//!
//! Page code never runs while the core is borrowed: shortcut focus and click
//! targets are applied after the borrow ends, and `alert` is raised outside
//! it. A call that still finds the core busy (a nested event loop under a
//! modal dialog) is re-queued on a zero-delay timeout instead of failing.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Document, DocumentReadyState, Element, HtmlElement, KeyboardEvent, Storage, Window};

use crate::config::PageConfig;
use crate::consts::MAX_TOAST_LIFETIME_MS;
use crate::document::PageDocument;
use crate::error::{ErrorCode, describe};
use crate::page::PageCore;
use crate::shortcut::{Key, Modifiers};
use crate::storage::{KeyValueStore, StoreError};
use crate::toast::{Severity, Toast, ToastId};

type Core = PageCore<WebDocument, LocalStore>;
type SharedCore = Rc<RefCell<Core>>;
type WeakCore = Weak<RefCell<Core>>;

thread_local! {
    /// Core the global functions act on: the most recently installed kit.
    static ACTIVE: RefCell<WeakCore> = const { RefCell::new(Weak::new()) };
    /// Instance installed by the start entry, until a page replaces it.
    static DEFAULT_KIT: RefCell<Option<PageKit>> = const { RefCell::new(None) };
}

// =============================================================================
// HELPERS
// =============================================================================

fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| value.dyn_ref::<js_sys::Error>().map(|err| String::from(err.message())))
        .unwrap_or_else(|| format!("{value:?}"))
}

fn js_error(err: &impl ErrorCode) -> JsValue {
    js_sys::Error::new(&describe(err)).into()
}

/// Wall clock as the scheduler's `now`. Browser toasts are removed by their
/// own timers, so these deadlines are bookkeeping only.
fn now() -> Duration {
    Duration::from_secs_f64(js_sys::Date::now().max(0.0) / 1000.0)
}

fn modifiers_of(event: &KeyboardEvent) -> Modifiers {
    Modifiers { shift: event.shift_key(), ctrl: event.ctrl_key(), alt: event.alt_key(), meta: event.meta_key() }
}

fn alert(text: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(err) = window.alert_with_message(text) {
        log::warn!("alert failed: {}", js_message(&err));
    }
}

/// Run `op` on the active core, then `then` on its result once the core is
/// released. A busy core defers both to a zero-delay timeout.
fn with_active<R>(op: impl FnOnce(&mut Core, &WeakCore) -> R + 'static, then: impl FnOnce(R) + 'static) {
    let weak = ACTIVE.with(|active| active.borrow().clone());
    let Some(shared) = weak.upgrade() else {
        log::warn!("page features are not installed");
        return;
    };
    if let Ok(mut core) = shared.try_borrow_mut() {
        let result = op(&mut core, &weak);
        drop(core);
        then(result);
        return;
    }
    log::debug!("page busy; deferring call");
    Timeout::new(0, move || with_active(op, then)).forget();
}

/// Dismiss toast `id` when its timer fires, retrying while the core is busy.
fn dismiss_when_idle(weak: WeakCore, id: ToastId) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let Ok(mut core) = shared.try_borrow_mut() else {
        log::debug!("toast {id} removal deferred: page busy");
        Timeout::new(0, move || dismiss_when_idle(weak, id)).forget();
        return;
    };
    core.dismiss_toast(id);
}

/// Install console logging and the panic hook. Safe to call more than once.
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        log::debug!("logger already installed: {err}");
    }
}

// =============================================================================
// DOCUMENT
// =============================================================================

/// [`PageDocument`] over the live DOM.
pub struct WebDocument {
    document: Document,
}

impl WebDocument {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl PageDocument for WebDocument {
    type Element = Element;

    fn body_has_class(&self, class: &str) -> bool {
        self.document.body().is_some_and(|body| body.class_list().contains(class))
    }

    fn toggle_body_class(&self, class: &str) -> Option<bool> {
        let body = self.document.body()?;
        match body.class_list().toggle(class) {
            Ok(present) => Some(present),
            Err(err) => {
                log::warn!("toggle {class} failed: {}", js_message(&err));
                None
            }
        }
    }

    fn add_body_class(&self, class: &str) {
        let Some(body) = self.document.body() else {
            return;
        };
        if let Err(err) = body.class_list().add_1(class) {
            log::warn!("add {class} failed: {}", js_message(&err));
        }
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_selector(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(found) => found,
            Err(err) => {
                log::warn!("bad selector {selector:?}: {}", js_message(&err));
                None
            }
        }
    }

    fn focus(&self, element: &Element) {
        match element.dyn_ref::<HtmlElement>() {
            Some(html) => {
                if let Err(err) = html.focus() {
                    log::warn!("focus failed: {}", js_message(&err));
                }
            }
            None => log::debug!("<{}> cannot take focus", element.tag_name()),
        }
    }

    fn click(&self, element: &Element) {
        match element.dyn_ref::<HtmlElement>() {
            Some(html) => html.click(),
            None => log::debug!("<{}> cannot be clicked", element.tag_name()),
        }
    }

    fn append_toast(&self, toast: &Toast, style: &str) -> Option<Element> {
        let body = self.document.body()?;
        let element = match self.document.create_element("div") {
            Ok(element) => element,
            Err(err) => {
                log::warn!("toast element not created: {}", js_message(&err));
                return None;
            }
        };
        element.set_class_name(&toast.class_name());
        if let Err(err) = element.set_attribute("style", style) {
            log::warn!("toast style not applied: {}", js_message(&err));
        }
        element.set_inner_html(&toast.message);
        match body.append_child(&element) {
            Ok(_) => Some(element),
            Err(err) => {
                log::warn!("toast not attached: {}", js_message(&err));
                None
            }
        }
    }

    fn remove(&self, element: &Element) {
        element.remove();
    }
}

// =============================================================================
// STORAGE
// =============================================================================

/// [`KeyValueStore`] over `window.localStorage`.
///
/// Storage may be missing (privacy modes, sandboxed frames); every call then
/// reports [`StoreError::Unavailable`].
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    #[must_use]
    pub fn open(window: &Window) -> Self {
        let storage = match window.local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                log::warn!("localStorage denied: {}", js_message(&err));
                None
            }
        };
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StoreError> {
        self.storage.as_ref().ok_or_else(|| StoreError::Unavailable("localStorage is not available".to_owned()))
    }
}

impl KeyValueStore for LocalStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?.get_item(key).map_err(|err| StoreError::Unavailable(js_message(&err)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| StoreError::Rejected { key: key.to_owned(), reason: js_message(&err) })
    }
}

// =============================================================================
// TOAST HANDLE
// =============================================================================

/// Control over one shown toast.
///
/// Dropping the handle (or freeing it from JS) leaves the removal timer
/// running, same as [`ToastHandle::detach`].
#[wasm_bindgen]
pub struct ToastHandle {
    core: WeakCore,
    id: Option<ToastId>,
    timeout: Option<Timeout>,
}

impl ToastHandle {
    fn show(core: &mut Core, weak: &WeakCore, message: &str, severity: Severity) -> Self {
        let lifetime_ms = core.config().toast.lifetime_ms.min(MAX_TOAST_LIFETIME_MS);
        let lifetime_ms = u32::try_from(lifetime_ms).unwrap_or(u32::MAX);
        let id = core.show_toast(message, severity, now());
        let timeout = id.map(|id| {
            let weak = weak.clone();
            Timeout::new(lifetime_ms, move || dismiss_when_idle(weak, id))
        });
        Self { core: weak.clone(), id, timeout }
    }

    fn with_core<R>(&self, fallback: R, op: impl FnOnce(&mut Core, ToastId) -> R) -> R {
        let (Some(id), Some(shared)) = (self.id, self.core.upgrade()) else {
            return fallback;
        };
        match shared.try_borrow_mut() {
            Ok(mut core) => op(&mut core, id),
            Err(_) => fallback,
        }
    }
}

#[wasm_bindgen]
impl ToastHandle {
    /// Toast id, or `undefined` when the toast could not be shown.
    #[wasm_bindgen(getter)]
    pub fn id(&self) -> Option<String> {
        self.id.map(|id| id.to_string())
    }

    /// Keep the toast on screen; its removal will not run.
    pub fn cancel(&mut self) -> bool {
        drop(self.timeout.take());
        self.with_core(false, |core, id| core.cancel_toast(id))
    }

    /// Remove the toast now.
    pub fn dismiss(&mut self) -> bool {
        drop(self.timeout.take());
        self.with_core(false, |core, id| core.dismiss_toast(id))
    }

    /// Let the removal run unattended and release the handle.
    pub fn detach(mut self) {
        if let Some(timeout) = self.timeout.take() {
            timeout.forget();
        }
    }
}

impl Drop for ToastHandle {
    fn drop(&mut self) {
        if let Some(timeout) = self.timeout.take() {
            timeout.forget();
        }
    }
}

// =============================================================================
// PAGE KIT
// =============================================================================

struct Listeners {
    document: Document,
    key_down: Closure<dyn FnMut(KeyboardEvent)>,
    ready: Option<Closure<dyn FnMut()>>,
}

impl Listeners {
    fn detach(self) {
        let key_down = self.document.remove_event_listener_with_callback("keydown", self.key_down.as_ref().unchecked_ref());
        if let Err(err) = key_down {
            log::warn!("keydown listener not removed: {}", js_message(&err));
        }
        if let Some(ready) = &self.ready {
            let removed = self
                .document
                .remove_event_listener_with_callback("DOMContentLoaded", ready.as_ref().unchecked_ref());
            if let Err(err) = removed {
                log::warn!("DOMContentLoaded listener not removed: {}", js_message(&err));
            }
        }
    }
}

/// One installed set of page features.
#[wasm_bindgen]
pub struct PageKit {
    core: SharedCore,
    listeners: Option<Listeners>,
}

impl PageKit {
    fn install(config: PageConfig) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from(js_sys::Error::new("no window")))?;
        let document = window.document().ok_or_else(|| JsValue::from(js_sys::Error::new("no document")))?;
        let core = Rc::new(RefCell::new(PageCore::new(
            WebDocument::new(document.clone()),
            LocalStore::open(&window),
            config,
        )));

        let weak = Rc::downgrade(&core);
        let target_doc = WebDocument::new(document.clone());
        let key_down = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let route = match shared.try_borrow_mut() {
                Ok(mut core) => core.route_key_down(&Key(event.key()), modifiers_of(&event)),
                Err(_) => {
                    log::debug!("keydown ignored: page busy");
                    return;
                }
            };
            if route.outcome.prevents_default() {
                event.prevent_default();
            }
            if let Some(activation) = &route.activation {
                activation.apply(&target_doc);
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);
        document.add_event_listener_with_callback("keydown", key_down.as_ref().unchecked_ref())?;

        let ready = if matches!(document.ready_state(), DocumentReadyState::Loading) {
            let weak = Rc::downgrade(&core);
            let ready = Closure::wrap(Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    restore(&shared);
                }
            }) as Box<dyn FnMut()>);
            let options = AddEventListenerOptions::new();
            options.set_once(true);
            document.add_event_listener_with_callback_and_add_event_listener_options(
                "DOMContentLoaded",
                ready.as_ref().unchecked_ref(),
                &options,
            )?;
            Some(ready)
        } else {
            restore(&core);
            None
        };

        ACTIVE.with(|active| *active.borrow_mut() = Rc::downgrade(&core));
        log::debug!("page features installed");
        Ok(Self { core, listeners: Some(Listeners { document, key_down, ready }) })
    }

    fn with_core<R>(&self, fallback: R, op: impl FnOnce(&mut Core) -> R) -> R {
        match self.core.try_borrow_mut() {
            Ok(mut core) => op(&mut core),
            Err(_) => {
                log::warn!("page busy; call ignored");
                fallback
            }
        }
    }
}

fn restore(core: &SharedCore) {
    match core.try_borrow_mut() {
        Ok(mut core) => {
            if let Some(mode) = core.restore_display_mode() {
                log::debug!("display mode restored: {mode:?}");
            }
        }
        Err(_) => log::warn!("display mode not restored: page busy"),
    }
}

#[wasm_bindgen]
impl PageKit {
    /// Install page features configured by an optional JSON string.
    ///
    /// Replaces the default instance installed at module start.
    ///
    /// # Errors
    ///
    /// Throws when `config` is not a valid page configuration or the page
    /// has no document.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<PageKit, JsValue> {
        let config = match config.as_deref() {
            Some(raw) => PageConfig::from_json(raw).map_err(|err| js_error(&err))?,
            None => PageConfig::default(),
        };
        let replaced = DEFAULT_KIT.with(|slot| slot.borrow_mut().take());
        if replaced.is_some() {
            log::debug!("replacing default page features");
        }
        drop(replaced);
        Self::install(config)
    }

    /// Flip the display mode; returns whether dark mode is now on.
    #[wasm_bindgen(js_name = toggleDarkMode)]
    pub fn toggle_dark_mode(&self) -> bool {
        self.with_core(false, |core| core.toggle_dark_mode().is_dark())
    }

    /// `"light"` or `"dark"`.
    #[wasm_bindgen(js_name = displayMode)]
    pub fn display_mode(&self) -> String {
        self.with_core(String::new(), |core| if core.display_mode().is_dark() { "dark" } else { "light" }.to_owned())
    }

    /// Active bindings as a JSON array of `{ keys, label, action }`.
    ///
    /// # Errors
    ///
    /// Throws if the listing cannot be serialized.
    #[wasm_bindgen(js_name = shortcutHelp)]
    pub fn shortcut_help(&self) -> Result<String, JsValue> {
        let entries = self.with_core(Vec::new(), |core| core.shortcut_help());
        serde_json::to_string(&entries).map_err(|err| JsValue::from(js_sys::Error::new(&err.to_string())))
    }

    /// Show the shortcut listing in a blocking alert.
    #[wasm_bindgen(js_name = showShortcuts)]
    pub fn show_shortcuts(&self) {
        let text = self.with_core(String::new(), |core| core.shortcut_help_text());
        if !text.is_empty() {
            alert(&text);
        }
    }

    /// Show the shortcut listing as an `info` toast.
    #[wasm_bindgen(js_name = showShortcutHelp)]
    pub fn show_shortcut_help(&self) -> ToastHandle {
        let weak = Rc::downgrade(&self.core);
        let inert = ToastHandle { core: weak.clone(), id: None, timeout: None };
        self.with_core(inert, |core| {
            let html = core.shortcut_help_html();
            ToastHandle::show(core, &weak, &html, Severity::Info)
        })
    }

    /// Show a toast; `severity` defaults to `info`.
    pub fn notify(&self, message: &str, severity: Option<String>) -> ToastHandle {
        let severity = severity.map_or(Severity::Info, Severity::from);
        let weak = Rc::downgrade(&self.core);
        let inert = ToastHandle { core: weak.clone(), id: None, timeout: None };
        self.with_core(inert, |core| ToastHandle::show(core, &weak, message, severity))
    }

    /// Remove installed listeners and cancel pending toast removals.
    pub fn destroy(&mut self) {
        if let Some(listeners) = self.listeners.take() {
            listeners.detach();
            let cancelled = self.with_core(0, Core::cancel_all_toasts);
            log::debug!("page features removed; {cancelled} toast removals cancelled");
        }
    }
}

impl Drop for PageKit {
    fn drop(&mut self) {
        self.destroy();
    }
}

// =============================================================================
// GLOBAL FUNCTIONS
// =============================================================================

#[wasm_bindgen(start)]
pub fn start() {
    init_logging();
    match PageKit::install(PageConfig::default()) {
        Ok(kit) => DEFAULT_KIT.with(|slot| *slot.borrow_mut() = Some(kit)),
        Err(err) => log::warn!("page features not installed: {}", js_message(&err)),
    }
}

/// Flip the display mode on the active page.
#[wasm_bindgen(js_name = toggleDarkMode)]
pub fn toggle_dark_mode() {
    with_active(|core, _| core.toggle_dark_mode(), drop);
}

/// Show the shortcut listing in a blocking alert.
#[wasm_bindgen(js_name = mostrarAtalhos)]
pub fn mostrar_atalhos() {
    with_active(|core, _| core.shortcut_help_text(), |text| alert(&text));
}

/// Show a toast that removes itself after the configured lifetime.
#[wasm_bindgen(js_name = mostrarNotificacao)]
pub fn mostrar_notificacao(message: String, tipo: Option<String>) {
    let severity = tipo.map_or(Severity::Info, Severity::from);
    with_active(move |core, weak| ToastHandle::show(core, weak, &message, severity), ToastHandle::detach);
}
