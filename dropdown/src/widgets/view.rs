//! Render models produced by the widgets.
//!
//! A view is everything a renderer needs to draw one frame of a dropdown,
//! with no styling decisions baked in. Element ids are stable across frames
//! and are what a host puts into `PointerEvent::target` after hit-testing.

use serde::Serialize;

/// Field label with the optional required marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelView {
    pub text: String,
    /// `Some(marker)` when the field is required.
    pub required_marker: Option<String>,
}

/// What the closed trigger shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Display {
    /// The committed value.
    Value(String),
    /// Nothing (or nothing known) is selected.
    Placeholder(String),
}

impl Display {
    pub fn text(&self) -> &str {
        match self {
            Display::Value(text) | Display::Placeholder(text) => text,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Display::Placeholder(_))
    }
}

/// One row of the option panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionRow {
    /// Element id, `<widget>-opt-<row>`.
    pub id: String,
    pub option: String,
    /// `aria-selected`: equals the committed value.
    pub selected: bool,
    /// `aria-disabled`: member of the disabled set.
    pub disabled: bool,
    pub tab_index: usize,
}

/// The open option panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelView {
    pub rows: Vec<OptionRow>,
    /// Rows visible at once; the rest scroll.
    pub max_visible: usize,
}

/// The query field of the search variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchFieldView {
    pub id: String,
    pub placeholder: String,
    pub value: String,
}

/// One frame of a custom or search dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownView {
    pub id: String,
    pub label: LabelView,
    /// Element id of the clickable trigger.
    pub trigger_id: String,
    /// Trigger text; `None` for the search variant, which shows its query
    /// field instead.
    pub display: Option<Display>,
    pub search: Option<SearchFieldView>,
    pub open: bool,
    /// `None` when closed, or when open with nothing to show.
    pub panel: Option<PanelView>,
}

impl DropdownView {
    /// Open/closed chevron for the trigger.
    pub fn indicator(&self) -> &'static str {
        if self.open { "▲" } else { "▼" }
    }
}

/// One entry of the plain (native-list) dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NativeEntry {
    /// `None` for the placeholder entry.
    pub option: Option<String>,
    pub label: String,
    pub selected: bool,
    pub disabled: bool,
}

impl NativeEntry {
    pub fn is_placeholder(&self) -> bool {
        self.option.is_none()
    }
}

/// One frame of a plain dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NativeView {
    pub id: String,
    pub label: LabelView,
    pub entries: Vec<NativeEntry>,
}

impl NativeView {
    /// Text of the selected entry.
    pub fn selected_label(&self) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.selected)
            .map(|entry| entry.label.as_str())
    }
}
