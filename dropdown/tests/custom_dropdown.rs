use std::sync::{Arc, Mutex};

use dropdown::prelude::*;
use dropdown::widgets::option_id;

fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) + Send + Sync + 'static) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    (calls, move |v: &str| sink.lock().unwrap().push(v.to_string()))
}

fn category(document: &Document, value: Option<&str>) -> (CustomDropdown, Arc<Mutex<Vec<String>>>) {
    let (calls, on_change) = recorder();
    let widget = CustomDropdown::builder("Категория")
        .options(["ИЗТ", "ИЗ", "ИК"])
        .maybe_value(value.map(str::to_string))
        .disabled_options(["ИК"])
        .on_change(on_change)
        .custom(document);
    widget.set_layout(
        DropdownLayout::new(Rect::new(0, 0, 30, 3)).with_panel(
            Rect::new(0, 3, 30, 3),
            vec![
                Rect::new(0, 3, 30, 1),
                Rect::new(0, 4, 30, 1),
                Rect::new(0, 5, 30, 1),
            ],
        ),
    );
    (widget, calls)
}

// ============================================================================
// Mount
// ============================================================================

#[test]
fn test_mount_echoes_host_value() {
    let document = Document::new();
    let (widget, calls) = category(&document, Some("ИЗ"));

    let view = widget.view();
    assert!(!view.open);
    assert!(view.panel.is_none());
    assert_eq!(view.display, Some(Display::Value("ИЗ".into())));
    assert!(calls.lock().unwrap().is_empty());
    assert_eq!(document.listener_count(), 0);
}

#[test]
fn test_mount_without_value_shows_placeholder() {
    let document = Document::new();
    let (widget, _) = category(&document, None);
    assert_eq!(
        widget.view().display,
        Some(Display::Placeholder("Не выбрано".into()))
    );
}

#[test]
fn test_value_not_offered_falls_back_to_placeholder() {
    let document = Document::new();
    let (widget, _) = category(&document, Some("Нет такой"));
    widget.click_trigger();

    let view = widget.view();
    assert!(view.display.as_ref().is_some_and(Display::is_placeholder));
    let panel = view.panel.expect("open panel");
    assert!(panel.rows.iter().all(|row| !row.selected));
}

#[test]
fn test_default_value_used_when_value_absent() {
    let document = Document::new();
    let widget = CustomDropdown::builder("Категория")
        .options(["ИЗТ", "ИЗ"])
        .default_value("ИЗТ")
        .on_change(|_| {})
        .custom(&document);
    assert_eq!(widget.value().as_deref(), Some("ИЗТ"));
}

// ============================================================================
// Toggle and commit
// ============================================================================

#[test]
fn test_trigger_toggles() {
    let document = Document::new();
    let (widget, calls) = category(&document, None);

    assert_eq!(widget.click_trigger(), Transition::Opened);
    assert!(widget.is_open());
    assert_eq!(document.listener_count(), 2);

    assert_eq!(widget.click_trigger(), Transition::Closed);
    assert!(!widget.is_open());
    assert_eq!(document.listener_count(), 0);
    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn test_option_click_commits_once_and_closes() {
    let document = Document::new();
    let (widget, calls) = category(&document, None);

    widget.click_trigger();
    let transition = widget.click_option("ИЗ").unwrap();

    assert_eq!(transition, Transition::Committed("ИЗ".into()));
    assert!(!widget.is_open());
    assert_eq!(*calls.lock().unwrap(), vec!["ИЗ".to_string()]);
    assert_eq!(widget.value().as_deref(), Some("ИЗ"));
    assert_eq!(document.listener_count(), 0);
}

#[test]
fn test_option_click_while_closed_is_ignored() {
    let document = Document::new();
    let (widget, calls) = category(&document, None);
    assert_eq!(widget.click_option("ИЗ").unwrap(), Transition::Unchanged);
    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn test_unknown_option_is_an_error() {
    let document = Document::new();
    let (widget, _) = category(&document, None);
    widget.click_trigger();
    assert!(matches!(
        widget.click_option("XYZ"),
        Err(DropdownError::UnknownOption { .. })
    ));
    assert!(matches!(
        widget.click_option_at(9),
        Err(DropdownError::IndexOutOfRange { index: 9, len: 3, .. })
    ));
    assert!(widget.is_open());
}

#[test]
fn test_pointer_routing_by_target_id() {
    let document = Document::new();
    let (widget, calls) = category(&document, None);
    let id = widget.id().to_string();

    let open = PointerEvent::on(format!("{id}-trigger"), 1, 1);
    assert!(widget.on_pointer(&open).is_consumed());
    document.dispatch_pointer(&open);
    assert!(widget.is_open(), "own trigger press must not count as outside");

    let pick = PointerEvent::on(option_id(&id, 1), 1, 4);
    widget.on_pointer(&pick);
    document.dispatch_pointer(&pick);
    assert_eq!(*calls.lock().unwrap(), vec!["ИЗ".to_string()]);
    assert!(!widget.is_open());

    let elsewhere = PointerEvent::on("some-table-row", 50, 50);
    assert_eq!(widget.on_pointer(&elsewhere), EventResult::Ignored);
}

#[test]
fn test_pointer_routing_by_layout() {
    let document = Document::new();
    let (widget, calls) = category(&document, None);

    widget.on_pointer(&PointerEvent::at(2, 1));
    assert!(widget.is_open());
    widget.on_pointer(&PointerEvent::at(2, 3));
    assert_eq!(*calls.lock().unwrap(), vec!["ИЗТ".to_string()]);
}

// ============================================================================
// Dismissal
// ============================================================================

#[test]
fn test_outside_press_closes_without_change() {
    let document = Document::new();
    let (widget, calls) = category(&document, Some("ИЗ"));
    widget.click_trigger();

    document.dispatch_pointer(&PointerEvent::at(80, 20));

    assert!(!widget.is_open());
    assert!(calls.lock().unwrap().is_empty());
    assert_eq!(widget.value().as_deref(), Some("ИЗ"));
    assert_eq!(document.listener_count(), 0);
}

#[test]
fn test_press_inside_panel_is_not_outside() {
    let document = Document::new();
    let (widget, _) = category(&document, None);
    widget.click_trigger();
    document.dispatch_pointer(&PointerEvent::at(5, 5));
    assert!(widget.is_open());
}

#[test]
fn test_enter_closes_without_change() {
    let document = Document::new();
    let (widget, calls) = category(&document, Some("ИЗТ"));
    widget.click_trigger();

    document.dispatch_key(&KeyEvent::key(Key::Enter));

    assert!(!widget.is_open());
    assert!(calls.lock().unwrap().is_empty());
    assert_eq!(widget.value().as_deref(), Some("ИЗТ"));
}

#[test]
fn test_keys_ignored_while_closed() {
    let document = Document::new();
    let (widget, _) = category(&document, None);
    assert_eq!(document.dispatch_key(&KeyEvent::key(Key::Enter)), 0);
    assert!(!widget.is_open());
}

// ============================================================================
// Disabled options
// ============================================================================

#[test]
fn test_disabled_option_flagged_in_view() {
    let document = Document::new();
    let (widget, _) = category(&document, Some("ИЗ"));
    widget.click_trigger();

    let rows = widget.view().panel.unwrap().rows;
    let flags: Vec<(bool, bool)> = rows.iter().map(|r| (r.selected, r.disabled)).collect();
    assert_eq!(flags, vec![(false, false), (true, false), (false, true)]);
    assert_eq!(rows[2].tab_index, 2);
}

#[test]
fn test_disabled_option_refused_by_default() {
    let document = Document::new();
    let (widget, calls) = category(&document, None);
    widget.click_trigger();

    assert_eq!(
        widget.click_option("ИК").unwrap(),
        Transition::Rejected("ИК".into())
    );
    assert!(widget.is_open());
    assert!(calls.lock().unwrap().is_empty());
    assert_eq!(widget.value(), None);
}

#[test]
fn test_disabled_option_commits_when_presentation_only() {
    let document = Document::new();
    let (calls, on_change) = recorder();
    let widget = CustomDropdown::builder("Категория")
        .options(["ИЗТ", "ИК"])
        .disabled_options(["ИК"])
        .config(DropdownConfig::new().disabled_policy(DisabledPolicy::PresentationOnly))
        .on_change(on_change)
        .custom(&document);

    widget.click_trigger();
    assert!(widget.view().panel.unwrap().rows[1].disabled);
    widget.click_option("ИК").unwrap();

    assert_eq!(*calls.lock().unwrap(), vec!["ИК".to_string()]);
}

// ============================================================================
// Host sync and notifications
// ============================================================================

#[test]
fn test_host_resync_updates_display() {
    let document = Document::new();
    let (widget, _) = category(&document, None);
    widget.set_value(Some("ИЗТ".into()));
    assert_eq!(widget.view().display, Some(Display::Value("ИЗТ".into())));
}

#[test]
fn test_changes_are_observable() {
    let document = Document::new();
    let (widget, _) = category(&document, None);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let _watch = widget
        .changes()
        .watch(move |s: &SelectionState| sink.lock().unwrap().push(s.is_open));

    widget.click_trigger();
    widget.click_option("ИЗ").unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![true, false]);
    assert!(widget.changes().is_dirty());
    assert_eq!(widget.changes().get().committed_value.as_deref(), Some("ИЗ"));
}

#[test]
fn test_on_change_may_read_widget() {
    let document = Document::new();
    let seen = Arc::new(Mutex::new(None));
    let slot: Arc<Mutex<Option<CustomDropdown>>> = Arc::new(Mutex::new(None));

    let slot_clone = Arc::clone(&slot);
    let seen_clone = Arc::clone(&seen);
    let widget = CustomDropdown::builder("Категория")
        .options(["ИЗТ"])
        .on_change(move |_| {
            if let Some(w) = slot_clone.lock().unwrap().as_ref() {
                *seen_clone.lock().unwrap() = Some(w.is_open());
            }
        })
        .custom(&document);
    *slot.lock().unwrap() = Some(widget.clone());

    widget.click_trigger();
    widget.click_option("ИЗТ").unwrap();
    assert_eq!(*seen.lock().unwrap(), Some(false));

    slot.lock().unwrap().take();
}
