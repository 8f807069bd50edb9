//! The dropdown widget family.
//!
//! - [`LabeledDropdown`]: plain native-list select, no open state.
//! - [`CustomDropdown`]: click-to-toggle list.
//! - [`DropdownWithSearch`]: filter-as-you-type combobox; the host filters.

mod custom;
mod labeled;
pub mod props;
mod search;
pub mod view;

use std::sync::atomic::{AtomicUsize, Ordering};

pub use custom::CustomDropdown;
pub use labeled::LabeledDropdown;
pub use props::{ChangeHandler, DropdownBuilder, DropdownProps, SearchBuilder, SearchHandler};
pub use search::DropdownWithSearch;
pub use view::{
    Display, DropdownView, LabelView, NativeEntry, NativeView, OptionRow, PanelView,
    SearchFieldView,
};

use crate::config::DropdownConfig;

/// Generate a unique widget id.
pub(crate) fn next_widget_id() -> String {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    format!("__dropdown_{}", COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Element id of the trigger.
pub fn trigger_id(widget_id: &str) -> String {
    format!("{}-trigger", widget_id)
}

/// Element id of the search field.
pub fn search_id(widget_id: &str) -> String {
    format!("{}-search", widget_id)
}

/// Element id of an option row.
pub fn option_id(widget_id: &str, row: usize) -> String {
    format!("{}-opt-{}", widget_id, row)
}

/// Row index encoded in an option element id.
pub(crate) fn option_row(widget_id: &str, target: &str) -> Option<usize> {
    target
        .strip_prefix(widget_id)?
        .strip_prefix("-opt-")?
        .parse()
        .ok()
}

/// Whether an element id belongs to this widget.
pub(crate) fn owns(widget_id: &str, target: &str) -> bool {
    match target.strip_prefix(widget_id) {
        Some(rest) => rest.is_empty() || rest.starts_with('-'),
        None => false,
    }
}

pub(crate) fn label_view(props: &DropdownProps, config: &DropdownConfig) -> LabelView {
    LabelView {
        text: props.label.clone(),
        required_marker: props
            .is_required
            .then(|| config.required_marker.clone()),
    }
}
