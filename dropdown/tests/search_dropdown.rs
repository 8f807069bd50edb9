use std::sync::{Arc, Mutex};

use dropdown::filter::filter_options;
use dropdown::prelude::*;
use dropdown::widgets::option_id;

type Log = Arc<Mutex<Vec<String>>>;

fn station(document: &Document, options: &[&str], value: Option<&str>) -> (DropdownWithSearch, Log, Log) {
    let changes: Log = Arc::new(Mutex::new(Vec::new()));
    let queries: Log = Arc::new(Mutex::new(Vec::new()));
    let change_sink = Arc::clone(&changes);
    let query_sink = Arc::clone(&queries);

    let widget = DropdownWithSearch::builder("Станция")
        .options(options.iter().copied())
        .maybe_value(value.map(str::to_string))
        .on_change(move |v| change_sink.lock().unwrap().push(v.to_string()))
        .searchable()
        .placeholder("Поиск станции")
        .on_search_change(move |q| query_sink.lock().unwrap().push(q.to_string()))
        .build(document);
    widget.set_layout(DropdownLayout::new(Rect::new(0, 0, 40, 3)));
    (widget, changes, queries)
}

fn guarded(
    document: &Document,
    options: &[&str],
    disabled: &[&str],
    policy: DisabledPolicy,
) -> (DropdownWithSearch, Log) {
    let changes: Log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&changes);
    let widget = DropdownWithSearch::builder("Станция")
        .options(options.iter().copied())
        .disabled_options(disabled.iter().copied())
        .config(DropdownConfig::new().disabled_policy(policy))
        .on_change(move |v| sink.lock().unwrap().push(v.to_string()))
        .searchable()
        .on_search_change(|_| {})
        .build(document);
    (widget, changes)
}

// ============================================================================
// Candidates and query
// ============================================================================

#[test]
fn test_selected_value_excluded_from_candidates() {
    let document = Document::new();
    let (widget, _, _) = station(&document, &["A", "B", "C"], Some("B"));
    widget.click_trigger();

    assert_eq!(widget.candidates(), vec!["A".to_string(), "C".to_string()]);
    let rows: Vec<String> = widget
        .view()
        .panel
        .unwrap()
        .rows
        .into_iter()
        .map(|r| r.option)
        .collect();
    assert_eq!(rows, vec!["A".to_string(), "C".to_string()]);
}

#[test]
fn test_typing_opens_and_forwards_raw_text() {
    let document = Document::new();
    let (widget, changes, queries) = station(&document, &["Арбатская", "Смоленская"], None);

    assert_eq!(widget.input("См"), Transition::Opened);
    assert!(widget.is_open());
    assert_eq!(widget.input("Смо"), Transition::Unchanged);

    assert_eq!(*queries.lock().unwrap(), vec!["См".to_string(), "Смо".to_string()]);
    assert!(changes.lock().unwrap().is_empty());
    // No local filtering: both options are still candidates
    assert_eq!(widget.candidates().len(), 2);
    assert_eq!(widget.view().search.unwrap().value, "Смо");
}

#[test]
fn test_key_editing_goes_through_input() {
    let document = Document::new();
    let (widget, _, queries) = station(&document, &["A"], None);

    widget.on_key(&KeyEvent::key(Key::Char('a')));
    widget.on_key(&KeyEvent::key(Key::Char('b')));
    widget.on_key(&KeyEvent::key(Key::Backspace));

    assert_eq!(
        *queries.lock().unwrap(),
        vec!["a".to_string(), "ab".to_string(), "a".to_string()]
    );
    assert_eq!(
        widget.on_key(&KeyEvent::new(Key::Char('x'), Modifiers::ctrl())),
        EventResult::Ignored
    );
}

// ============================================================================
// Enter
// ============================================================================

#[test]
fn test_enter_accepts_top_suggestion() {
    let document = Document::new();
    let (widget, changes, _) = station(&document, &["A", "B"], None);
    widget.click_trigger();

    document.dispatch_key(&KeyEvent::key(Key::Enter));

    assert_eq!(*changes.lock().unwrap(), vec!["A".to_string()]);
    assert_eq!(widget.value().as_deref(), Some("A"));
    assert!(widget.is_open(), "Enter leaves the panel open");
    assert_eq!(document.listener_count(), 2);

    document.dispatch_key(&KeyEvent::key(Key::Escape));
    assert_eq!(document.listener_count(), 0);
}

#[test]
fn test_enter_accepts_first_option_even_when_current() {
    let document = Document::new();
    let (widget, changes, _) = station(&document, &["A", "B"], Some("A"));
    widget.click_trigger();

    document.dispatch_key(&KeyEvent::key(Key::Enter));

    assert_eq!(*changes.lock().unwrap(), vec!["A".to_string()]);
}

#[test]
fn test_enter_refuses_disabled_top_option() {
    let document = Document::new();
    let (widget, changes) = guarded(&document, &["A", "B"], &["A"], DisabledPolicy::Enforce);
    widget.click_trigger();

    assert_eq!(widget.accept_top(), Transition::Rejected("A".into()));
    document.dispatch_key(&KeyEvent::key(Key::Enter));

    assert!(changes.lock().unwrap().is_empty());
    assert_eq!(widget.value(), None);
    assert!(widget.is_open());
}

#[test]
fn test_enter_accepts_disabled_top_when_presentation_only() {
    let document = Document::new();
    let (widget, changes) = guarded(
        &document,
        &["A", "B"],
        &["A"],
        DisabledPolicy::PresentationOnly,
    );
    widget.click_trigger();

    document.dispatch_key(&KeyEvent::key(Key::Enter));

    assert_eq!(*changes.lock().unwrap(), vec!["A".to_string()]);
}

#[test]
fn test_enter_while_closed_does_nothing() {
    let document = Document::new();
    let (widget, changes, _) = station(&document, &["A", "B"], None);
    document.dispatch_key(&KeyEvent::key(Key::Enter));
    assert!(changes.lock().unwrap().is_empty());
    assert_eq!(widget.accept_top(), Transition::Unchanged);
}

#[test]
fn test_enter_with_no_options_does_nothing() {
    let document = Document::new();
    let (widget, changes, _) = station(&document, &[], None);
    widget.input("zzz");
    assert_eq!(widget.accept_top(), Transition::Unchanged);
    assert!(changes.lock().unwrap().is_empty());
}

// ============================================================================
// Pointer and dismissal
// ============================================================================


#[test]
fn test_escape_closes_without_commit() {
    let document = Document::new();
    let (widget, changes, _) = station(&document, &["A", "B"], None);
    widget.input("A");

    document.dispatch_key(&KeyEvent::key(Key::Escape));

    assert!(!widget.is_open());
    assert!(changes.lock().unwrap().is_empty());
    assert_eq!(document.listener_count(), 0);
}

#[test]
fn test_option_click_commits_without_reopening() {
    let document = Document::new();
    let (widget, changes, _) = station(&document, &["A", "B", "C"], Some("B"));
    let id = widget.id().to_string();
    widget.click_trigger();

    // Row 1 is "C": "B" is excluded
    let press = PointerEvent::on(option_id(&id, 1), 3, 5);
    widget.on_pointer(&press);
    document.dispatch_pointer(&press);

    assert_eq!(*changes.lock().unwrap(), vec!["C".to_string()]);
    assert!(!widget.is_open());
}

#[test]
fn test_trigger_click_only_opens() {
    let document = Document::new();
    let (widget, _, _) = station(&document, &["A"], None);
    assert_eq!(widget.click_trigger(), Transition::Opened);
    assert_eq!(widget.click_trigger(), Transition::Unchanged);
    assert!(widget.is_open());
}

#[test]
fn test_outside_press_closes() {
    let document = Document::new();
    let (widget, changes, _) = station(&document, &["A"], None);
    widget.input("x");

    document.dispatch_pointer(&PointerEvent::at(60, 10));

    assert!(!widget.is_open());
    assert!(changes.lock().unwrap().is_empty());
}

#[test]
fn test_empty_options_suppress_panel() {
    let document = Document::new();
    let (widget, _, _) = station(&document, &[], None);
    widget.input("zzz");

    let view = widget.view();
    assert!(view.open);
    assert!(view.panel.is_none());
}

// ============================================================================
// Disabled options
// ============================================================================

#[test]
fn test_disabled_row_click_refused_by_default() {
    let document = Document::new();
    let (widget, changes) = guarded(&document, &["A", "B"], &["B"], DisabledPolicy::Enforce);
    widget.click_trigger();

    let rows = widget.view().panel.unwrap().rows;
    assert!(!rows[0].disabled);
    assert!(rows[1].disabled);

    assert_eq!(widget.click_option("B").unwrap(), Transition::Rejected("B".into()));
    assert!(widget.is_open());
    assert!(changes.lock().unwrap().is_empty());
    assert_eq!(widget.value(), None);
}

#[test]
fn test_disabled_row_click_commits_when_presentation_only() {
    let document = Document::new();
    let (widget, changes) = guarded(
        &document,
        &["A", "B"],
        &["B"],
        DisabledPolicy::PresentationOnly,
    );
    widget.click_trigger();

    assert_eq!(
        widget.click_option("B").unwrap(),
        Transition::Committed("B".into())
    );
    assert_eq!(*changes.lock().unwrap(), vec!["B".to_string()]);
    assert!(!widget.is_open());
}

// ============================================================================
// Host filtering
// ============================================================================

#[test]
fn test_host_filtering_round_trip() {
    let document = Document::new();
    let all: Vec<String> = ["Арбатская", "Смоленская", "Киевская"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let (widget, _, queries) = station(&document, &["Арбатская", "Смоленская", "Киевская"], None);

    widget.input("Смол");
    let query = queries.lock().unwrap().last().cloned().unwrap();
    widget.set_options(filter_options(&query, &all));
    widget.set_search_value(query);

    assert_eq!(widget.candidates(), vec!["Смоленская".to_string()]);
    document.dispatch_key(&KeyEvent::key(Key::Enter));
    assert_eq!(widget.value().as_deref(), Some("Смоленская"));
}
