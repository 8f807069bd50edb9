//! Selection controller: the open/closed state machine shared by the
//! custom and search dropdowns.
//!
//! The controller is plain data. It decides transitions and reports them as
//! a [`Transition`]; the widgets turn a `Committed` transition into a host
//! `on_change` call and manage listeners on `Opened`/`Closed`.

use serde::Serialize;

use crate::config::DisabledPolicy;
use crate::options::DisabledSet;

/// Snapshot of a dropdown's interaction state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    /// Whether the option panel is open.
    pub is_open: bool,
    /// Mirror of the host-owned value.
    pub committed_value: Option<String>,
    /// Last query text typed into the search field.
    pub pending_query: String,
}

/// Outcome of a controller call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Nothing changed.
    Unchanged,
    /// Closed -> Open.
    Opened,
    /// Open -> Closed without a commit.
    Closed,
    /// The option was committed and the panel closed.
    Committed(String),
    /// The option was committed and the panel stayed open.
    Accepted(String),
    /// The option is disabled; nothing changed.
    Rejected(String),
}

impl Transition {
    /// The committed option, if this transition committed one.
    pub fn committed(&self) -> Option<&str> {
        match self {
            Transition::Committed(option) | Transition::Accepted(option) => Some(option),
            _ => None,
        }
    }
}

/// State machine behind the custom and search dropdowns.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    state: SelectionState,
    disabled: DisabledSet,
    policy: DisabledPolicy,
}

impl SelectionController {
    /// A closed controller mirroring the host's initial value.
    pub fn new(value: Option<String>) -> Self {
        Self {
            state: SelectionState {
                committed_value: value,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn with_disabled(mut self, disabled: DisabledSet) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_policy(mut self, policy: DisabledPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    pub fn committed_value(&self) -> Option<&str> {
        self.state.committed_value.as_deref()
    }

    pub fn pending_query(&self) -> &str {
        &self.state.pending_query
    }

    pub fn is_selected(&self, option: &str) -> bool {
        self.committed_value() == Some(option)
    }

    pub fn is_disabled(&self, option: &str) -> bool {
        self.disabled.contains(option)
    }

    /// Whether committing `option` would be refused.
    pub fn blocks(&self, option: &str) -> bool {
        self.policy == DisabledPolicy::Enforce && self.is_disabled(option)
    }

    pub fn disabled(&self) -> &DisabledSet {
        &self.disabled
    }

    pub fn set_disabled(&mut self, disabled: DisabledSet) {
        self.disabled = disabled;
    }

    pub fn open(&mut self) -> Transition {
        if self.state.is_open {
            return Transition::Unchanged;
        }
        self.state.is_open = true;
        Transition::Opened
    }

    pub fn close(&mut self) -> Transition {
        if !self.state.is_open {
            return Transition::Unchanged;
        }
        self.state.is_open = false;
        Transition::Closed
    }

    pub fn toggle(&mut self) -> Transition {
        if self.state.is_open {
            self.close()
        } else {
            self.open()
        }
    }

    /// Commit an option and close.
    ///
    /// Refused for disabled options under [`DisabledPolicy::Enforce`], in
    /// which case the state is left exactly as it was.
    pub fn commit(&mut self, option: &str) -> Transition {
        if self.blocks(option) {
            return Transition::Rejected(option.to_string());
        }
        self.state.committed_value = Some(option.to_string());
        self.state.is_open = false;
        Transition::Committed(option.to_string())
    }

    /// Commit an option without closing.
    ///
    /// Refused for disabled options exactly like [`commit`](Self::commit).
    pub fn accept(&mut self, option: &str) -> Transition {
        if self.blocks(option) {
            return Transition::Rejected(option.to_string());
        }
        self.state.committed_value = Some(option.to_string());
        Transition::Accepted(option.to_string())
    }

    /// Record query text. Typing always opens the panel.
    pub fn set_query(&mut self, query: impl Into<String>) -> Transition {
        self.state.pending_query = query.into();
        match self.open() {
            Transition::Opened => Transition::Opened,
            _ => Transition::Unchanged,
        }
    }

    /// Re-sync with the host-owned value.
    pub fn sync_value(&mut self, value: Option<String>) {
        self.state.committed_value = value;
    }

    /// Re-sync the query with the host-owned search text.
    pub fn sync_query(&mut self, query: impl Into<String>) {
        self.state.pending_query = query.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed_with_host_value() {
        let ctl = SelectionController::new(Some("B".into()));
        assert!(!ctl.is_open());
        assert_eq!(ctl.committed_value(), Some("B"));
        assert!(ctl.is_selected("B"));
    }

    #[test]
    fn toggle_round_trip() {
        let mut ctl = SelectionController::new(None);
        assert_eq!(ctl.toggle(), Transition::Opened);
        assert_eq!(ctl.toggle(), Transition::Closed);
        assert_eq!(ctl.close(), Transition::Unchanged);
    }

    #[test]
    fn enforced_disabled_commit_changes_nothing() {
        let mut ctl = SelectionController::new(Some("A".into()))
            .with_disabled(["B"].into_iter().collect());
        ctl.open();
        let before = ctl.state().clone();
        assert_eq!(ctl.commit("B"), Transition::Rejected("B".into()));
        assert_eq!(ctl.accept("B"), Transition::Rejected("B".into()));
        assert_eq!(ctl.state(), &before);
    }

    #[test]
    fn presentation_only_disabled_commits() {
        let mut ctl = SelectionController::new(None)
            .with_disabled(["B"].into_iter().collect())
            .with_policy(DisabledPolicy::PresentationOnly);
        ctl.open();
        assert_eq!(ctl.commit("B").committed(), Some("B"));
        assert!(!ctl.is_open());
    }

    #[test]
    fn query_opens() {
        let mut ctl = SelectionController::new(None);
        assert_eq!(ctl.set_query("мо"), Transition::Opened);
        assert_eq!(ctl.set_query("мос"), Transition::Unchanged);
        assert_eq!(ctl.pending_query(), "мос");
        assert!(ctl.is_open());
    }

    #[test]
    fn accept_keeps_panel_open() {
        let mut ctl = SelectionController::new(Some("A".into()));
        ctl.open();
        let transition = ctl.accept("A");
        assert_eq!(transition, Transition::Accepted("A".into()));
        assert_eq!(transition.committed(), Some("A"));
        assert!(ctl.is_open());
    }
}
