//! Click-to-toggle dropdown.

use std::sync::{Arc, RwLock, Weak};

use crate::config::DropdownConfig;
use crate::controller::{SelectionController, SelectionState, Transition};
use crate::document::Document;
use crate::error::DropdownError;
use crate::events::{EventResult, Key, PointerEvent};
use crate::layout::DropdownLayout;
use crate::listener::Subscription;
use crate::options::{DisabledSet, is_offered};
use crate::state::State;

use super::props::{ChangeHandler, DropdownBuilder, DropdownProps, NeedsHandler};
use super::view::{Display, DropdownView, OptionRow, PanelView};
use super::{label_view, next_widget_id, option_id, option_row, owns, trigger_id};

struct CustomInner {
    props: DropdownProps,
    config: DropdownConfig,
    controller: SelectionController,
    layout: Option<DropdownLayout>,
    /// Document listeners, held only while open.
    listeners: Vec<Subscription>,
}

struct Shared {
    id: String,
    document: Document,
    on_change: ChangeHandler,
    inner: RwLock<CustomInner>,
    changes: State<SelectionState>,
}

/// A dropdown whose option panel toggles on trigger clicks.
///
/// - Closed + trigger click opens; open + trigger click closes.
/// - Option click commits (fires `on_change` once) and closes.
/// - Enter anywhere on the page closes without committing.
/// - A press outside the widget closes without committing.
///
/// Enter and outside presses are observed through [`Document`] listeners that
/// exist only while the panel is open. Dropping the last handle releases them.
///
/// The widget keeps a local copy of the committed value, updated on commit
/// and re-synced whenever the host calls [`set_value`](Self::set_value).
#[derive(Clone)]
pub struct CustomDropdown {
    shared: Arc<Shared>,
}

impl CustomDropdown {
    pub fn builder(label: impl Into<String>) -> DropdownBuilder<NeedsHandler> {
        DropdownBuilder::new(label)
    }

    pub(crate) fn from_parts(
        props: DropdownProps,
        config: DropdownConfig,
        on_change: ChangeHandler,
        document: Document,
    ) -> Self {
        let id = props.id.clone().unwrap_or_else(next_widget_id);
        let controller = SelectionController::new(props.initial_value())
            .with_disabled(props.disabled_options.clone())
            .with_policy(config.disabled_policy);
        log::debug!(
            "CustomDropdown::mount id={} options={} value={:?}",
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
                inner: RwLock::new(CustomInner {
                    props,
                    config,
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

    /// The locally committed value.
    pub fn value(&self) -> Option<String> {
        self.with_inner(|inner| inner.controller.committed_value().map(str::to_string))
    }

    pub fn state(&self) -> SelectionState {
        self.with_inner(|inner| inner.controller.state().clone())
    }

    /// Observable copy of the selection state, updated after every change.
    pub fn changes(&self) -> &State<SelectionState> {
        &self.shared.changes
    }

    // -------------------------------------------------------------------------
    // Host props
    // -------------------------------------------------------------------------

    /// Sync the host-owned value.
    pub fn set_value(&self, value: Option<String>) {
        self.mutate(|inner| {
            inner.controller.sync_value(value);
            Transition::Unchanged
        });
    }

    pub fn set_options(&self, options: Vec<String>) {
        self.mutate(|inner| {
            inner.props.options = options;
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

    /// Record where the widget was drawn (called by the renderer).
    pub fn set_layout(&self, layout: DropdownLayout) {
        if let Ok(mut inner) = self.shared.inner.write() {
            inner.layout = Some(layout);
        }
    }

    // -------------------------------------------------------------------------
    // Interaction
    // -------------------------------------------------------------------------

    /// Click on the trigger: toggle.
    pub fn click_trigger(&self) -> Transition {
        self.mutate(|inner| inner.controller.toggle())
    }

    /// Click on an option row.
    ///
    /// Options are only clickable while open; a closed dropdown ignores the
    /// click. Disabled options are refused under the enforcing policy.
    pub fn click_option(&self, option: &str) -> Result<Transition, DropdownError> {
        let offered = self.with_inner(|inner| is_offered(&inner.props.options, option));
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

    /// Click on the option at `index` in the option list.
    pub fn click_option_at(&self, index: usize) -> Result<Transition, DropdownError> {
        let option = self.with_inner(|inner| inner.props.options.get(index).cloned());
        match option {
            Some(option) => self.click_option(&option),
            None => Err(DropdownError::IndexOutOfRange {
                widget: self.shared.id.clone(),
                index,
                len: self.with_inner(|inner| inner.props.options.len()),
            }),
        }
    }

    /// Route a pointer press that the host hit-tested to this widget.
    ///
    /// Uses `event.target` when present, otherwise the last layout.
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
            let options = &inner.props.options;

            let display = match controller.committed_value() {
                Some(value) if is_offered(options, value) => Display::Value(value.to_string()),
                _ => Display::Placeholder(inner.config.placeholder.clone()),
            };

            let panel = controller.is_open().then(|| PanelView {
                rows: options
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
                display: Some(display),
                search: None,
                open: controller.is_open(),
                panel,
            }
        })
    }

    /// Live document listeners held by this widget.
    pub fn listener_count(&self) -> usize {
        self.with_inner(|inner| inner.listeners.len())
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn with_inner<R>(&self, f: impl FnOnce(&CustomInner) -> R) -> R {
        match self.shared.inner.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    /// Run a transition under the lock, then apply its effects with the lock
    /// released: listener scope, change notification and `on_change`.
    fn mutate(&self, f: impl FnOnce(&mut CustomInner) -> Transition) -> Transition {
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
                    "CustomDropdown id={} refused disabled option {}",
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
            log::debug!("CustomDropdown id={} committed {}", self.shared.id, option);
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
                log::debug!("CustomDropdown id={} outside press", widget.shared.id);
                widget.mutate(|inner| inner.controller.close());
            }
        });

        let weak = Arc::downgrade(&self.shared);
        let keys = self.shared.document.on_key(move |event| {
            if event.key == Key::Enter
                && let Some(widget) = upgrade(&weak)
            {
                widget.mutate(|inner| inner.controller.close());
            }
        });

        let stale = match self.shared.inner.write() {
            Ok(mut inner) => std::mem::replace(&mut inner.listeners, vec![pointer, keys]),
            Err(_) => Vec::new(),
        };
        drop(stale);
        log::trace!("CustomDropdown id={} listeners acquired", self.shared.id);
    }

    fn release_listeners(&self) {
        let released = match self.shared.inner.write() {
            Ok(mut inner) => std::mem::take(&mut inner.listeners),
            Err(_) => return,
        };
        if !released.is_empty() {
            log::trace!("CustomDropdown id={} listeners released", self.shared.id);
        }
        // Subscriptions deregister on drop, outside the widget lock
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

fn upgrade(weak: &Weak<Shared>) -> Option<CustomDropdown> {
    weak.upgrade().map(|shared| CustomDropdown { shared })
}

impl std::fmt::Debug for CustomDropdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomDropdown")
            .field("id", &self.shared.id)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
