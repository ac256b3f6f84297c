use super::*;

// =============================================================
// MemoryStore
// =============================================================

#[test]
fn memory_store_starts_empty() {
    let store = MemoryStore::new();
    assert!(store.is_empty());
    assert_eq!(store.get_item("darkMode"), Ok(None));
}

#[test]
fn memory_store_set_then_get() {
    let store = MemoryStore::new();
    assert_eq!(store.set_item("darkMode", "true"), Ok(()));
    assert_eq!(store.get_item("darkMode"), Ok(Some("true".to_owned())));
    assert_eq!(store.len(), 1);
}

#[test]
fn memory_store_set_replaces_previous_value() {
    let store = MemoryStore::with_item("darkMode", "true");
    assert_eq!(store.set_item("darkMode", "false"), Ok(()));
    assert_eq!(store.get_item("darkMode"), Ok(Some("false".to_owned())));
    assert_eq!(store.len(), 1);
}

#[test]
fn read_only_store_rejects_writes() {
    let store = MemoryStore::read_only();
    let err = store.set_item("darkMode", "true");
    assert!(matches!(err, Err(StoreError::Rejected { ref key, .. }) if key == "darkMode"));
    assert!(store.is_empty());
}

#[test]
fn read_only_store_still_reads() {
    let store = MemoryStore::read_only();
    assert_eq!(store.get_item("anything"), Ok(None));
}

// =============================================================
// StoreError
// =============================================================

#[test]
fn store_error_codes_are_distinct() {
    let unavailable = StoreError::Unavailable("no window".to_owned());
    let rejected = StoreError::Rejected { key: "k".to_owned(), reason: "quota".to_owned() };
    assert_eq!(unavailable.error_code(), "E_STORE_UNAVAILABLE");
    assert_eq!(rejected.error_code(), "E_STORE_REJECTED");
}

#[test]
fn only_unavailable_is_retryable() {
    assert!(StoreError::Unavailable("x".to_owned()).retryable());
    assert!(!StoreError::Rejected { key: "k".to_owned(), reason: "r".to_owned() }.retryable());
}

#[test]
fn store_error_display_includes_key() {
    let err = StoreError::Rejected { key: "darkMode".to_owned(), reason: "quota exceeded".to_owned() };
    assert_eq!(err.to_string(), "write rejected for key darkMode: quota exceeded");
    assert_eq!(crate::error::describe(&err), "E_STORE_REJECTED: write rejected for key darkMode: quota exceeded");
}
