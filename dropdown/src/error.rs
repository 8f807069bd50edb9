//! Widget error types.

use thiserror::Error;

/// Errors returned by direct selection calls.
///
/// Pointer and key handling never fails; these only come back from the
/// programmatic entry points (`select`, `select_index`, `click_option`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DropdownError {
    /// The option is not in the current option list.
    #[error("option '{option}' is not offered by dropdown '{widget}'")]
    UnknownOption { widget: String, option: String },

    /// The index is past the end of the current option list.
    #[error("option index {index} out of range for dropdown '{widget}' ({len} options)")]
    IndexOutOfRange {
        widget: String,
        index: usize,
        len: usize,
    },
}
