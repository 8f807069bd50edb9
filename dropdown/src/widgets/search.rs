//! Filter-as-you-type combobox.

use std::sync::{Arc, RwLock, Weak};

use crate::config::DropdownConfig;
use crate::controller::{SelectionController, SelectionState, Transition};
use crate::document::Document;
use crate::error::DropdownError;
use crate::events::{EventResult, Key, KeyEvent, PointerEvent};
use crate::layout::DropdownLayout;
use crate::listener::Subscription;
use crate::options::{DisabledSet, candidates};
use crate::state::State;

use super::props::{ChangeHandler, DropdownBuilder, DropdownProps, NeedsHandler, SearchHandler};
use super::view::{DropdownView, OptionRow, PanelView, SearchFieldView};
use super::{label_view, next_widget_id, option_id, option_row, owns, search_id, trigger_id};

struct SearchInner {
    props: DropdownProps,
    config: DropdownConfig,
    placeholder: String,
    controller: SelectionController,
    layout: Option<DropdownLayout>,
    listeners: Vec<Subscription>,
}

impl SearchInner {
    /// Rendered rows: host options minus the current value.
    fn rows(&self) -> Vec<String> {
        candidates(&self.props.options, self.controller.committed_value())
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

struct Shared {
    id: String,
    document: Document,
    on_change: ChangeHandler,
    on_search_change: SearchHandler,
    inner: RwLock<SearchInner>,
    changes: State<SelectionState>,
}

/// A combobox: a query field over a host-filtered option list.
///
/// The widget never filters by the query. Every edit is forwarded through
/// `on_search_change` and the host answers with a new option list via
/// [`set_options`](Self::set_options). The only local derivation is that the
/// current value is never offered again as a candidate.
///
/// - Typing (or clicking the field) opens the panel.
/// - Enter accepts the first host option and keeps the panel open; Escape
///   closes.
/// - Option click commits and closes, without reopening.
/// - A press outside the widget closes without committing.
/// - With no candidates the panel is not shown at all.
#[derive(Clone)]
pub struct DropdownWithSearch {
    shared: Arc<Shared>,
}

impl DropdownWithSearch {
    pub fn builder(label: impl Into<String>) -> DropdownBuilder<NeedsHandler> {
        DropdownBuilder::new(label)
    }

    pub(crate) fn from_parts(
        props: DropdownProps,
        config: DropdownConfig,
        on_change: ChangeHandler,
        on_search_change: SearchHandler,
        placeholder: String,
        search_value: String,
        document: Document,
    ) -> Self {
        let id = props.id.clone().unwrap_or_else(next_widget_id);
        let mut controller = SelectionController::new(props.initial_value())
            .with_disabled(props.disabled_options.clone())
            .with_policy(config.disabled_policy);
        controller.sync_query(search_value);
        log::debug!(
            "DropdownWithSearch::mount id={} options={} value={:?}",
            id,
            props.options.len(),
            controller.committed_value()
        );

        let changes = State::new(controller.state().clone());
        Self {
            shared: Arc::new(Shared {
                id,
                document,
                on_change,
                on_search_change,
                inner: RwLock::new(SearchInner {
                    props,
                    config,
                    placeholder,
                    controller,
                    layout: None,
                    listeners: Vec::new(),
                }),
                changes,
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.shared.id
    }

    pub fn is_open(&self) -> bool {
        self.with_inner(|inner| inner.controller.is_open())
    }

    pub fn value(&self) -> Option<String> {
        self.with_inner(|inner| inner.controller.committed_value().map(str::to_string))
    }

    /// Query text as last typed or synced.
    pub fn query(&self) -> String {
        self.with_inner(|inner| inner.controller.pending_query().to_string())
    }

    pub fn state(&self) -> SelectionState {
        self.with_inner(|inner| inner.controller.state().clone())
    }

    /// Candidate rows currently offered.
    pub fn candidates(&self) -> Vec<String> {
        self.with_inner(SearchInner::rows)
    }

    /// Observable copy of the selection state, updated after every change.
    pub fn changes(&self) -> &State<SelectionState> {
        &self.shared.changes
    }

    // -------------------------------------------------------------------------
    // Host props
    // -------------------------------------------------------------------------

    pub fn set_value(&self, value: Option<String>) {
        self.mutate(|inner| {
            inner.controller.sync_value(value);
            Transition::Unchanged
        });
    }

    /// Replace the (host-filtered) option list.
    pub fn set_options(&self, options: Vec<String>) {
        self.mutate(|inner| {
            inner.props.options = options;
            Transition::Unchanged
        });
    }

    /// Sync the host-owned query text.
    pub fn set_search_value(&self, query: impl Into<String>) {
        let query = query.into();
        self.mutate(|inner| {
            inner.controller.sync_query(query);
            Transition::Unchanged
        });
    }

    pub fn set_disabled_options(&self, disabled: DisabledSet) {
        self.mutate(|inner| {
            inner.controller.set_disabled(disabled.clone());
            inner.props.disabled_options = disabled;
            Transition::Unchanged
        });
    }

    pub fn set_layout(&self, layout: DropdownLayout) {
        if let Ok(mut inner) = self.shared.inner.write() {
            inner.layout = Some(layout);
        }
    }

    // -------------------------------------------------------------------------
    // Interaction
    // -------------------------------------------------------------------------

    /// The query field changed. Opens the panel and forwards the raw text.
    pub fn input(&self, text: impl Into<String>) -> Transition {
        let text = text.into();
        let transition = self.mutate(|inner| inner.controller.set_query(text.clone()));
        log::trace!("DropdownWithSearch id={} query {:?}", self.shared.id, text);
        (self.shared.on_search_change)(&text);
        transition
    }

    /// Edit keys for the focused query field.
    ///
    /// Enter and Escape are not handled here; they reach the widget through
    /// its document listeners while open.
    pub fn on_key(&self, key: &KeyEvent) -> EventResult {
        if key.modifiers.ctrl || key.modifiers.alt {
            return EventResult::Ignored;
        }
        match key.key {
            Key::Char(c) => {
                let mut text = self.query();
                text.push(c);
                self.input(text);
                EventResult::Consumed
            }
            Key::Backspace => {
                let mut text = self.query();
                if text.pop().is_some() {
                    self.input(text);
                }
                EventResult::Consumed
            }
            Key::Down if !self.is_open() => {
                self.click_trigger();
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    /// Click on the wrapper or the query field: open.
    pub fn click_trigger(&self) -> Transition {
        self.mutate(|inner| inner.controller.open())
    }

    /// Click on a candidate row. Commits and closes; the click does not
    /// propagate to the wrapper, so the panel stays closed.
    pub fn click_option(&self, option: &str) -> Result<Transition, DropdownError> {
        let offered = self.with_inner(|inner| inner.rows().iter().any(|row| row == option));
        if !offered {
            return Err(DropdownError::UnknownOption {
                widget: self.shared.id.clone(),
                option: option.to_string(),
            });
        }
        Ok(self.mutate(|inner| {
            if !inner.controller.is_open() {
                return Transition::Unchanged;
            }
            inner.controller.commit(option)
        }))
    }

    /// Click on the candidate row at `index`.
    pub fn click_option_at(&self, index: usize) -> Result<Transition, DropdownError> {
        let rows = self.candidates();
        match rows.get(index) {
            Some(option) => self.click_option(option),
            None => Err(DropdownError::IndexOutOfRange {
                widget: self.shared.id.clone(),
                index,
                len: rows.len(),
            }),
        }
    }

    /// Accept the top suggestion: the first entry of the host-filtered
    /// option list.
    ///
    /// The panel stays open. A disabled top entry is refused under the
    /// enforcing policy and nothing further is tried.
    pub fn accept_top(&self) -> Transition {
        self.mutate(|inner| {
            if !inner.controller.is_open() {
                return Transition::Unchanged;
            }
            match inner.props.options.first().cloned() {
                Some(option) => inner.controller.accept(&option),
                None => Transition::Unchanged,
            }
        })
    }

    /// Route a pointer press that the host hit-tested to this widget.
    pub fn on_pointer(&self, event: &PointerEvent) -> EventResult {
        let id = &self.shared.id;
        let row = match &event.target {
            Some(target) if !owns(id, target) => return EventResult::Ignored,
            Some(target) => option_row(id, target),
            None => {
                let hit = self.with_inner(|inner| {
                    inner
                        .layout
                        .as_ref()
                        .filter(|layout| layout.contains(event.position))
                        .map(|layout| layout.row_at(event.position))
                });
                match hit {
                    None => return EventResult::Ignored,
                    Some(row) => row,
                }
            }
        };

        match row {
            Some(row) => {
                let _ = self.click_option_at(row);
            }
            None => {
                self.click_trigger();
            }
        }
        EventResult::Consumed
    }

    /// Close and release every document listener.
    pub fn unmount(&self) {
        self.mutate(|inner| inner.controller.close());
        self.release_listeners();
    }

    pub fn view(&self) -> DropdownView {
        self.with_inner(|inner| {
            let id = &self.shared.id;
            let controller = &inner.controller;
            let rows = inner.rows();

            let panel = (controller.is_open() && !rows.is_empty()).then(|| PanelView {
                rows: rows
                    .iter()
                    .enumerate()
                    .map(|(i, option)| OptionRow {
                        id: option_id(id, i),
                        option: option.clone(),
                        selected: controller.is_selected(option),
                        disabled: controller.is_disabled(option),
                        tab_index: i,
                    })
                    .collect(),
                max_visible: inner.config.max_visible_options,
            });

            DropdownView {
                id: id.clone(),
                label: label_view(&inner.props, &inner.config),
                trigger_id: trigger_id(id),
                display: None,
                search: Some(SearchFieldView {
                    id: search_id(id),
                    placeholder: inner.placeholder.clone(),
                    value: controller.pending_query().to_string(),
                }),
                open: controller.is_open(),
                panel,
            }
        })
    }

    pub fn listener_count(&self) -> usize {
        self.with_inner(|inner| inner.listeners.len())
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn with_inner<R>(&self, f: impl FnOnce(&SearchInner) -> R) -> R {
        match self.shared.inner.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    fn mutate(&self, f: impl FnOnce(&mut SearchInner) -> Transition) -> Transition {
        let (transition, snapshot) = match self.shared.inner.write() {
            Ok(mut guard) => {
                let before = guard.controller.state().clone();
                let transition = f(&mut guard);
                let after = guard.controller.state().clone();
                (transition, (before != after).then_some(after))
            }
            Err(_) => return Transition::Unchanged,
        };

        match &transition {
            Transition::Opened => self.acquire_listeners(),
            Transition::Closed | Transition::Committed(_) => self.release_listeners(),
            Transition::Rejected(option) => {
                log::debug!(
                    "DropdownWithSearch id={} refused disabled option {}",
                    self.shared.id,
                    option
                );
            }
            Transition::Accepted(_) | Transition::Unchanged => {}
        }

        if let Some(snapshot) = snapshot {
            self.shared.changes.set(snapshot);
        }

        if let Some(option) = transition.committed() {
            log::debug!("DropdownWithSearch id={} committed {}", self.shared.id, option);
            (self.shared.on_change)(option);
        }
        transition
    }

    fn acquire_listeners(&self) {
        let weak = Arc::downgrade(&self.shared);
        let pointer = self.shared.document.on_pointer(move |event| {
            if let Some(widget) = upgrade(&weak)
                && widget.is_outside(event)
            {
                log::debug!("DropdownWithSearch id={} outside press", widget.shared.id);
                widget.mutate(|inner| inner.controller.close());
            }
        });

        let weak = Arc::downgrade(&self.shared);
        let keys = self.shared.document.on_key(move |event| {
            let Some(widget) = upgrade(&weak) else { return };
            match event.key {
                Key::Escape => {
                    widget.mutate(|inner| inner.controller.close());
                }
                Key::Enter => {
                    widget.accept_top();
                }
                _ => {}
            }
        });

        let stale = match self.shared.inner.write() {
            Ok(mut inner) => std::mem::replace(&mut inner.listeners, vec![pointer, keys]),
            Err(_) => Vec::new(),
        };
        drop(stale);
        log::trace!("DropdownWithSearch id={} listeners acquired", self.shared.id);
    }

    fn release_listeners(&self) {
        let released = match self.shared.inner.write() {
            Ok(mut inner) => std::mem::take(&mut inner.listeners),
            Err(_) => return,
        };
        if !released.is_empty() {
            log::trace!("DropdownWithSearch id={} listeners released", self.shared.id);
        }
        drop(released);
    }

    fn is_outside(&self, event: &PointerEvent) -> bool {
        match &event.target {
            Some(target) => !owns(&self.shared.id, target),
            None => self.with_inner(|inner| {
                inner
                    .layout
                    .as_ref()
                    .is_none_or(|layout| !layout.contains(event.position))
            }),
        }
    }
}

fn upgrade(weak: &Weak<Shared>) -> Option<DropdownWithSearch> {
    weak.upgrade().map(|shared| DropdownWithSearch { shared })
}

impl std::fmt::Debug for DropdownWithSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DropdownWithSearch")
            .field("id", &self.shared.id)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
