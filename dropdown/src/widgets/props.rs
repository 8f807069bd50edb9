//! Dropdown properties and the typestate builder.

use std::fmt;
use std::sync::Arc;

use crate::config::DropdownConfig;
use crate::document::Document;
use crate::options::DisabledSet;

use super::{CustomDropdown, DropdownWithSearch, LabeledDropdown};

/// Host callback receiving a proposed new value.
pub type ChangeHandler = Arc<dyn Fn(&str) + Send + Sync>;

/// Host callback receiving the raw query text.
pub type SearchHandler = Arc<dyn Fn(&str) + Send + Sync>;

/// Inputs shared by every dropdown variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropdownProps {
    /// Element id; generated when absent.
    pub id: Option<String>,
    pub label: String,
    /// Host-owned selection.
    pub value: Option<String>,
    /// Used at mount when `value` is absent.
    pub default_value: Option<String>,
    /// Display order is host order.
    pub options: Vec<String>,
    pub disabled_options: DisabledSet,
    /// Presentation only: adds the required marker to the label.
    pub is_required: bool,
}

impl DropdownProps {
    pub(crate) fn initial_value(&self) -> Option<String> {
        self.value.clone().or_else(|| self.default_value.clone())
    }
}

/// Typestate marker: no change handler yet.
pub struct NeedsHandler;

/// Typestate marker: change handler supplied.
pub struct HasHandler(pub(crate) ChangeHandler);

/// Typestate marker: search handler supplied.
pub struct HasSearchHandler(pub(crate) SearchHandler);

/// Builder for every dropdown variant.
///
/// Uses the typestate pattern so a dropdown cannot be built without its
/// `on_change` handler (and, for the search variant, `on_search_change`).
///
/// # Example
///
/// ```
/// use dropdown::document::Document;
/// use dropdown::widgets::CustomDropdown;
///
/// let document = Document::new();
/// let category = CustomDropdown::builder("Категория")
///     .options(["ИЗТ", "ИЗ", "ИК"])
///     .required(true)
///     .on_change(|v| println!("picked {v}"))
///     .custom(&document);
/// assert!(!category.is_open());
/// ```
pub struct DropdownBuilder<H = NeedsHandler> {
    pub(crate) props: DropdownProps,
    pub(crate) config: DropdownConfig,
    pub(crate) handler: H,
}

impl DropdownBuilder<NeedsHandler> {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            props: DropdownProps {
                label: label.into(),
                ..Default::default()
            },
            config: DropdownConfig::default(),
            handler: NeedsHandler,
        }
    }

    /// Set the change handler. Required before building.
    pub fn on_change<F>(self, f: F) -> DropdownBuilder<HasHandler>
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        DropdownBuilder {
            props: self.props,
            config: self.config,
            handler: HasHandler(Arc::new(f)),
        }
    }
}

impl<H> DropdownBuilder<H> {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.props.id = Some(id.into());
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.props.value = Some(value.into());
        self
    }

    /// Set the value from a host field that may be empty.
    pub fn maybe_value(mut self, value: Option<String>) -> Self {
        self.props.value = value;
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.props.default_value = Some(value.into());
        self
    }

    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.props.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn disabled_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.props.disabled_options = options.into_iter().collect();
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.props.is_required = required;
        self
    }

    pub fn config(mut self, config: DropdownConfig) -> Self {
        self.config = config;
        self
    }
}

impl DropdownBuilder<HasHandler> {
    /// Build the plain native-list dropdown.
    pub fn labeled(self) -> LabeledDropdown {
        LabeledDropdown::from_parts(self.props, self.config, self.handler.0)
    }

    /// Build the click-to-toggle dropdown.
    pub fn custom(self, document: &Document) -> CustomDropdown {
        CustomDropdown::from_parts(self.props, self.config, self.handler.0, document.clone())
    }

    /// Continue into the search variant.
    pub fn searchable(self) -> SearchBuilder<NeedsHandler> {
        SearchBuilder {
            base: self,
            placeholder: String::new(),
            search_value: String::new(),
            handler: NeedsHandler,
        }
    }
}

/// Builder for [`DropdownWithSearch`].
pub struct SearchBuilder<S = NeedsHandler> {
    base: DropdownBuilder<HasHandler>,
    placeholder: String,
    search_value: String,
    handler: S,
}

impl<S> SearchBuilder<S> {
    /// Hint shown in the empty query field.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Host-owned query text.
    pub fn search_value(mut self, value: impl Into<String>) -> Self {
        self.search_value = value.into();
        self
    }
}

impl SearchBuilder<NeedsHandler> {
    /// Set the query handler. Required before building.
    pub fn on_search_change<F>(self, f: F) -> SearchBuilder<HasSearchHandler>
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        SearchBuilder {
            base: self.base,
            placeholder: self.placeholder,
            search_value: self.search_value,
            handler: HasSearchHandler(Arc::new(f)),
        }
    }
}

impl SearchBuilder<HasSearchHandler> {
    pub fn build(self, document: &Document) -> DropdownWithSearch {
        DropdownWithSearch::from_parts(
            self.base.props,
            self.base.config,
            self.base.handler.0,
            self.handler.0,
            self.placeholder,
            self.search_value,
            document.clone(),
        )
    }
}

impl<H> fmt::Debug for DropdownBuilder<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropdownBuilder")
            .field("props", &self.props)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
