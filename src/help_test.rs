use super::*;
use crate::consts::HELP_TITLE;
use crate::shortcut::{KeyCombo, ShortcutBinding};

// =============================================================
// entries
// =============================================================

#[test]
fn entries_follow_table_order() {
    let rows = entries(&BindingTable::default());
    let keys: Vec<_> = rows.iter().map(|e| e.keys.as_str()).collect();
    assert_eq!(keys, vec!["Ctrl+D", "Ctrl+K", "Ctrl+N"]);
    assert_eq!(rows[0].action, ShortcutAction::ToggleTheme);
}

#[test]
fn entries_reflect_custom_table() {
    let table = BindingTable::new(vec![ShortcutBinding::new(
        KeyCombo::ctrl('b'),
        ShortcutAction::FocusSearch,
        "Buscar",
    )]);
    assert_eq!(
        entries(&table),
        vec![HelpEntry { keys: "Ctrl+B".to_owned(), label: "Buscar".to_owned(), action: ShortcutAction::FocusSearch }]
    );
}

#[test]
fn entries_serialize_to_json_objects() {
    let json = serde_json::to_value(entries(&BindingTable::default())).unwrap_or_default();
    assert_eq!(json[1], serde_json::json!({ "keys": "Ctrl+K", "label": "Focar em Busca", "action": "focus_search" }));
}

// =============================================================
// render_html
// =============================================================

#[test]
fn render_html_matches_alert_markup() {
    let html = render_html(HELP_TITLE, &entries(&BindingTable::default()));
    assert_eq!(
        html,
        "<div class=\"alert alert-info\"><h5>Atalhos de Teclado</h5><ul>\
         <li><kbd>Ctrl+D</kbd> - Ativar Dark Mode</li>\
         <li><kbd>Ctrl+K</kbd> - Focar em Busca</li>\
         <li><kbd>Ctrl+N</kbd> - Novo Item</li>\
         </ul></div>"
    );
}

#[test]
fn render_html_with_no_entries_keeps_frame() {
    assert_eq!(render_html("Help", &[]), "<div class=\"alert alert-info\"><h5>Help</h5><ul></ul></div>");
}

// =============================================================
// render_text
// =============================================================

#[test]
fn render_text_one_line_per_entry() {
    let text = render_text(HELP_TITLE, &entries(&BindingTable::default()));
    assert_eq!(text, "Atalhos de Teclado\nCtrl+D - Ativar Dark Mode\nCtrl+K - Focar em Busca\nCtrl+N - Novo Item");
}
