//! Shared error-reporting trait.
//!
//! Every module keeps its own `thiserror` enum; this trait gives them a
//! grepable code so console logs and JS-facing errors stay searchable.

/// Grepable error code and retryable flag for structured error reporting.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

/// Render an error as `CODE: message` for logs and thrown JS errors.
pub fn describe(err: &impl ErrorCode) -> String {
    format!("{}: {err}", err.error_code())
}
