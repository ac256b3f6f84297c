//! Default contract values shared with the host page and its stylesheet.

// ── Persistence ─────────────────────────────────────────────────

/// Store key holding the display mode as `"true"` / `"false"`.
pub const DARK_MODE_KEY: &str = "darkMode";

// ── CSS contract ────────────────────────────────────────────────

/// Class toggled on `<body>` while dark mode is active.
pub const DARK_CLASS: &str = "dark-mode";

/// Entrance animation class added to every toast.
pub const TOAST_FADE_CLASS: &str = "fade-in";

/// Inline style pinning toasts to the bottom-right corner of the viewport.
pub const TOAST_STYLE: &str = "position: fixed; bottom: 20px; right: 20px; z-index: 9999; min-width: 300px;";

// ── DOM lookup hooks ────────────────────────────────────────────

/// Element id of the primary search input.
pub const SEARCH_ID: &str = "buscaVendas";

/// Fallback marker for any search input.
pub const SEARCH_SELECTOR: &str = "[data-search]";

/// Marker for the "new item" trigger.
pub const NEW_ITEM_SELECTOR: &str = "[data-novo]";

// ── Timing ──────────────────────────────────────────────────────

/// Toast lifetime before automatic removal, in milliseconds.
pub const TOAST_LIFETIME_MS: u64 = 3000;

/// Longest delay a browser timer honours (`i32::MAX` ms); longer ones fire
/// at once.
pub const MAX_TOAST_LIFETIME_MS: u64 = 2_147_483_647;

// ── Help ────────────────────────────────────────────────────────

/// Heading of the shortcut help listing.
pub const HELP_TITLE: &str = "Atalhos de Teclado";
