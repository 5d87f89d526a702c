use super::*;

// =============================================================
// MemoryView
// =============================================================

#[test]
fn memory_view_default_is_blank() {
    let view = MemoryView::new();
    assert!(view.messages.is_empty());
    assert_eq!(view.panel, ConfigPanel::Closed);
    assert!(view.alerts.is_empty());
    assert_eq!(view.input_text(), "");
}

#[test]
fn append_then_scroll_tracks_newest() {
    let mut view = MemoryView::new();
    view.append_message(Sender::User, "a");
    view.append_message(Sender::Bot, "b");
    assert_eq!(view.scrolled_to, 0);
    view.scroll_to_bottom();
    assert_eq!(view.scrolled_to, 2);
    assert_eq!(view.transcript(), vec![(Sender::User, "a"), (Sender::Bot, "b")]);
}

#[test]
fn clear_messages_resets_scroll() {
    let mut view = MemoryView::new();
    view.append_message(Sender::Bot, "x");
    view.scroll_to_bottom();
    view.clear_messages();
    assert!(view.messages.is_empty());
    assert_eq!(view.scrolled_to, 0);
}

#[test]
fn input_round_trip() {
    let mut view = MemoryView::new();
    view.type_input("hello");
    assert_eq!(view.input_text(), "hello");
    view.clear_input();
    assert_eq!(view.input_text(), "");
}
