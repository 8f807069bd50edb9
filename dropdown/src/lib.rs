//! Headless dropdown and combobox widgets.
//!
//! Three variants share one interaction contract: the host owns the value and
//! the option list, the widget owns only its open/closed state and proposes
//! new values through `on_change`.
//!
//! ```
//! use std::sync::{Arc, Mutex};
//!
//! use dropdown::prelude::*;
//!
//! let document = Document::new();
//! let picked = Arc::new(Mutex::new(None));
//! let sink = Arc::clone(&picked);
//!
//! let station = DropdownWithSearch::builder("Станция")
//!     .options(["Арбатская", "Библиотека им. Ленина"])
//!     .on_change(move |v| *sink.lock().unwrap() = Some(v.to_string()))
//!     .searchable()
//!     .on_search_change(|_query| {})
//!     .build(&document);
//!
//! station.input("Ар");
//! document.dispatch_key(&KeyEvent::key(Key::Enter));
//! assert_eq!(picked.lock().unwrap().as_deref(), Some("Арбатская"));
//! assert!(station.is_open());
//!
//! station.unmount();
//! assert_eq!(document.listener_count(), 0);
//! ```

pub mod config;
pub mod controller;
pub mod document;
pub mod error;
pub mod events;
pub mod filter;
pub mod layout;
pub mod listener;
pub mod options;
pub mod state;
pub mod widgets;

pub use error::DropdownError;

pub mod prelude {
    pub use crate::config::{DisabledPolicy, DropdownConfig};
    pub use crate::controller::{SelectionController, SelectionState, Transition};
    pub use crate::document::Document;
    pub use crate::error::DropdownError;
    pub use crate::events::{EventResult, Key, KeyEvent, Modifiers, MouseButton, PointerEvent};
    pub use crate::layout::{DropdownLayout, Point, Rect};
    pub use crate::listener::Subscription;
    pub use crate::options::DisabledSet;
    pub use crate::state::State;
    pub use crate::widgets::{
        CustomDropdown, Display, DropdownView, DropdownWithSearch, LabeledDropdown, NativeView,
    };
}
