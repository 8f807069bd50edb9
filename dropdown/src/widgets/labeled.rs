//! Plain native-list dropdown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::config::DropdownConfig;
use crate::error::DropdownError;
use crate::events::{EventResult, Key, KeyEvent};
use crate::options::is_offered;

use super::props::{ChangeHandler, DropdownBuilder, DropdownProps, NeedsHandler};
use super::view::{NativeEntry, NativeView};
use super::{label_view, next_widget_id};

#[derive(Debug)]
struct LabeledInner {
    props: DropdownProps,
    config: DropdownConfig,
}

/// A select rendered as an always-enumerable list.
///
/// Fully controlled: selecting an entry only proposes it through `on_change`.
/// The displayed value changes when the host calls [`set_value`](Self::set_value).
/// When there is no value (or the value is not offered) a placeholder entry
/// leads the list; it is the only disabled entry and cannot be selected.
#[derive(Clone)]
pub struct LabeledDropdown {
    id: String,
    inner: Arc<RwLock<LabeledInner>>,
    on_change: ChangeHandler,
    dirty: Arc<AtomicBool>,
}

impl LabeledDropdown {
    pub fn builder(label: impl Into<String>) -> DropdownBuilder<NeedsHandler> {
        DropdownBuilder::new(label)
    }

    pub(crate) fn from_parts(
        props: DropdownProps,
        config: DropdownConfig,
        on_change: ChangeHandler,
    ) -> Self {
        let id = props.id.clone().unwrap_or_else(next_widget_id);
        let mut props = props;
        props.value = props.initial_value();
        log::debug!(
            "LabeledDropdown::mount id={} options={} value={:?}",
            id,
            props.options.len(),
            props.value
        );
        Self {
            id,
            inner: Arc::new(RwLock::new(LabeledInner { props, config })),
            on_change,
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The host-owned value, as last synced.
    pub fn value(&self) -> Option<String> {
        self.inner
            .read()
            .map(|guard| guard.props.value.clone())
            .unwrap_or(None)
    }

    pub fn options(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|guard| guard.props.options.clone())
            .unwrap_or_default()
    }

    /// Sync the host-owned value.
    pub fn set_value(&self, value: Option<String>) {
        if let Ok(mut guard) = self.inner.write()
            && guard.props.value != value
        {
            guard.props.value = value;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Replace the option list.
    pub fn set_options(&self, options: Vec<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.props.options = options;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Propose an option. Fires `on_change` unless it is already the value.
    ///
    /// Returns whether `on_change` fired.
    pub fn select(&self, option: &str) -> Result<bool, DropdownError> {
        let current = {
            let guard = match self.inner.read() {
                Ok(guard) => guard,
                Err(_) => return Ok(false),
            };
            if !is_offered(&guard.props.options, option) {
                return Err(DropdownError::UnknownOption {
                    widget: self.id.clone(),
                    option: option.to_string(),
                });
            }
            guard.props.value.clone()
        };

        if current.as_deref() == Some(option) {
            return Ok(false);
        }
        log::debug!("LabeledDropdown::select id={} option={}", self.id, option);
        (self.on_change)(option);
        Ok(true)
    }

    /// Propose the option at `index` in the option list.
    pub fn select_index(&self, index: usize) -> Result<bool, DropdownError> {
        let option = {
            let options = self.options();
            match options.get(index) {
                Some(option) => option.clone(),
                None => {
                    return Err(DropdownError::IndexOutOfRange {
                        widget: self.id.clone(),
                        index,
                        len: options.len(),
                    });
                }
            }
        };
        self.select(&option)
    }

    /// Arrow keys step through the options while focused.
    pub fn on_key(&self, key: &KeyEvent) -> EventResult {
        if key.modifiers.ctrl || key.modifiers.alt {
            return EventResult::Ignored;
        }

        let options = self.options();
        if options.is_empty() {
            return EventResult::Ignored;
        }
        let current = self
            .value()
            .and_then(|value| options.iter().position(|o| *o == value));

        let next = match (key.key, current) {
            (Key::Down, None) => 0,
            (Key::Down, Some(i)) => (i + 1).min(options.len() - 1),
            (Key::Up, Some(i)) => i.saturating_sub(1),
            (Key::Home, _) => 0,
            (Key::End, _) => options.len() - 1,
            (Key::Up, None) => return EventResult::Consumed,
            _ => return EventResult::Ignored,
        };

        let _ = self.select_index(next);
        EventResult::Consumed
    }

    pub fn view(&self) -> NativeView {
        let guard = match self.inner.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let props = &guard.props;

        let selected = props
            .value
            .as_deref()
            .filter(|value| is_offered(&props.options, value));

        let mut entries = Vec::with_capacity(props.options.len() + 1);
        if selected.is_none() {
            entries.push(NativeEntry {
                option: None,
                label: guard.config.placeholder.clone(),
                selected: true,
                disabled: true,
            });
        }
        entries.extend(props.options.iter().map(|option| NativeEntry {
            option: Some(option.clone()),
            label: option.clone(),
            selected: selected == Some(option.as_str()),
            disabled: false,
        }));

        NativeView {
            id: self.id.clone(),
            label: label_view(props, &guard.config),
            entries,
        }
    }

    /// Check if the widget has changed since the last frame.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for LabeledDropdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabeledDropdown")
            .field("id", &self.id)
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}
