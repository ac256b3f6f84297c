//! # pagekit
//!
//! Client-side page conveniences compiled to WebAssembly: a persisted dark-mode
//! toggle, global keyboard shortcuts, a shortcut help listing, and transient
//! toast notifications.
//!
//! All behaviour lives in [`page::PageCore`], which talks to the page through
//! two seams: [`document::PageDocument`] for the DOM and
//! [`storage::KeyValueStore`] for persistence. The browser shell (feature
//! `hydrate`) plugs `web-sys` implementations into those seams and wires DOM
//! events; native builds use the in-memory implementations for tests.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`page`] | `PageCore`: every operation, host-agnostic |
//! | [`theme`] | Display mode toggle and one-shot restore |
//! | [`shortcut`] | Key combos, modifiers, and the binding table |
//! | [`help`] | Shortcut help entries and their renderings |
//! | [`toast`] | Toast model, severity, and the cancellable scheduler |
//! | [`document`] | DOM seam and the in-memory document |
//! | [`storage`] | Persistent store seam and the in-memory store |
//! | [`error`] | `ErrorCode` trait shared by the module error enums |
//! | [`config`] | JSON-configurable names, selectors, and bindings |
//! | [`consts`] | Default contract values (keys, classes, selectors) |
//! | `browser` | `web-sys` shell and `wasm-bindgen` exports (`hydrate` only) |

pub mod config;
pub mod consts;
pub mod document;
pub mod error;
pub mod help;
pub mod page;
pub mod shortcut;
pub mod storage;
pub mod theme;
pub mod toast;

#[cfg(feature = "hydrate")]
pub mod browser;
