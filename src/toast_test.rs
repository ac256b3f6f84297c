use std::time::Duration;

use super::*;
use crate::document::MemoryDocument;

const STYLE: &str = crate::consts::TOAST_STYLE;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

// =============================================================
// Severity
// =============================================================

#[test]
fn severity_default_is_info() {
    assert_eq!(Severity::default(), Severity::Info);
}

#[test]
fn severity_from_standard_names() {
    assert_eq!(Severity::from("info"), Severity::Info);
    assert_eq!(Severity::from("success"), Severity::Success);
    assert_eq!(Severity::from("warning"), Severity::Warning);
    assert_eq!(Severity::from("danger"), Severity::Danger);
}

#[test]
fn severity_passes_unknown_names_through() {
    let severity = Severity::from("primary");
    assert_eq!(severity, Severity::Other("primary".to_owned()));
    assert_eq!(severity.as_str(), "primary");
}

#[test]
fn severity_is_case_sensitive() {
    assert_eq!(Severity::from("Info"), Severity::Other("Info".to_owned()));
}

#[test]
fn severity_serializes_as_plain_string() {
    let json = serde_json::to_string(&Severity::Warning).unwrap_or_default();
    assert_eq!(json, "\"warning\"");
    let back: Severity = serde_json::from_str("\"dark\"").unwrap_or_default();
    assert_eq!(back, Severity::Other("dark".to_owned()));
}

// =============================================================
// Toast
// =============================================================

#[test]
fn toast_class_name_uses_severity() {
    assert_eq!(Toast::info("x").class_name(), "alert alert-info fade-in");
    assert_eq!(Toast::new("x", Severity::Danger).class_name(), "alert alert-danger fade-in");
    assert_eq!(Toast::new("x", Severity::from("light")).class_name(), "alert alert-light fade-in");
}

#[test]
fn toast_deserializes_with_default_severity() {
    let toast: Toast = serde_json::from_str(r#"{"message":"Oi"}"#).unwrap_or_else(|_| Toast::info("bad"));
    assert_eq!(toast, Toast::info("Oi"));
}

// =============================================================
// ToastScheduler
// =============================================================

#[test]
fn scheduler_default_lifetime_is_three_seconds() {
    let doc = MemoryDocument::new();
    let mut scheduler = ToastScheduler::default();
    assert_eq!(scheduler.pending(), 0);
    scheduler.show(&doc, &Toast::info("Olá"), STYLE, ms(0));
    assert_eq!(scheduler.advance(&doc, ms(2999)), 0);
    assert_eq!(scheduler.advance(&doc, ms(3000)), 1);
}

#[test]
fn show_inserts_one_element_and_schedules_removal() {
    let doc = MemoryDocument::new();
    let mut scheduler = ToastScheduler::default();
    let id = scheduler.show(&doc, &Toast::info("Olá"), STYLE, ms(100));
    assert!(id.is_some());
    assert_eq!(doc.len(), 1);
    assert_eq!(scheduler.pending(), 1);
    assert_eq!(scheduler.advance(&doc, ms(3099)), 0);
    assert_eq!(scheduler.advance(&doc, ms(3100)), 1);
}

#[test]
fn advance_before_deadline_keeps_toast() {
    let doc = MemoryDocument::new();
    let mut scheduler = ToastScheduler::default();
    scheduler.show(&doc, &Toast::info("Olá"), STYLE, ms(0));
    assert_eq!(scheduler.advance(&doc, ms(2999)), 0);
    assert_eq!(doc.len(), 1);
}

#[test]
fn advance_at_deadline_removes_toast() {
    let doc = MemoryDocument::new();
    let mut scheduler = ToastScheduler::default();
    scheduler.show(&doc, &Toast::info("Olá"), STYLE, ms(0));
    assert_eq!(scheduler.advance(&doc, ms(3000)), 1);
    assert!(doc.is_empty());
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn concurrent_toasts_expire_independently() {
    let doc = MemoryDocument::new();
    let mut scheduler = ToastScheduler::default();
    scheduler.show(&doc, &Toast::info("first"), STYLE, ms(0));
    scheduler.show(&doc, &Toast::info("second"), STYLE, ms(1000));
    assert_eq!(doc.len(), 2);
    assert_eq!(scheduler.advance(&doc, ms(3500)), 1);
    assert_eq!(doc.len(), 1);
    assert_eq!(scheduler.advance(&doc, ms(4000)), 1);
    assert!(doc.is_empty());
}

#[test]
fn each_toast_gets_a_distinct_id() {
    let doc = MemoryDocument::new();
    let mut scheduler = ToastScheduler::default();
    let a = scheduler.show(&doc, &Toast::info("a"), STYLE, ms(0));
    let b = scheduler.show(&doc, &Toast::info("b"), STYLE, ms(0));
    assert_ne!(a, b);
}

#[test]
fn cancel_keeps_element_on_page() {
    let doc = MemoryDocument::new();
    let mut scheduler = ToastScheduler::default();
    let Some(id) = scheduler.show(&doc, &Toast::info("stay"), STYLE, ms(0)) else {
        panic!("toast not shown");
    };
    assert!(scheduler.cancel(id));
    assert!(!scheduler.cancel(id));
    assert_eq!(scheduler.advance(&doc, ms(10_000)), 0);
    assert_eq!(doc.len(), 1);
}

#[test]
fn dismiss_removes_immediately() {
    let doc = MemoryDocument::new();
    let mut scheduler = ToastScheduler::default();
    let Some(id) = scheduler.show(&doc, &Toast::info("bye"), STYLE, ms(0)) else {
        panic!("toast not shown");
    };
    assert!(scheduler.dismiss(&doc, id));
    assert!(doc.is_empty());
    assert!(!scheduler.dismiss(&doc, id));
}

#[test]
fn cancel_all_clears_pending() {
    let doc = MemoryDocument::new();
    let mut scheduler = ToastScheduler::default();
    scheduler.show(&doc, &Toast::info("a"), STYLE, ms(0));
    scheduler.show(&doc, &Toast::info("b"), STYLE, ms(0));
    assert_eq!(scheduler.cancel_all(), 2);
    assert_eq!(scheduler.pending(), 0);
    assert_eq!(doc.len(), 2);
}

#[test]
fn custom_lifetime_is_respected() {
    let doc = MemoryDocument::new();
    let mut scheduler = ToastScheduler::new(ms(500));
    scheduler.show(&doc, &Toast::info("quick"), STYLE, ms(0));
    assert_eq!(scheduler.advance(&doc, ms(500)), 1);
    assert!(doc.is_empty());
}
