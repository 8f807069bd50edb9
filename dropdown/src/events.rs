//! Input events delivered to dropdown widgets.
//!
//! These are renderer-agnostic: a host translates whatever its backend
//! produces (crossterm conversions are provided) into [`KeyEvent`] and
//! [`PointerEvent`] and feeds them to the widgets and the shared
//! [`Document`](crate::document::Document).

use crate::layout::Point;

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    /// Anything the widgets have no use for
    Other,
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    /// Check if any modifier is active
    pub fn any(&self) -> bool {
        self.ctrl || self.shift || self.alt
    }
}

/// A key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// A key press without modifiers
    pub const fn key(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }
}

impl From<Key> for KeyEvent {
    fn from(key: Key) -> Self {
        Self::key(key)
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// A pointer press somewhere on the page.
///
/// `target` is the id of the element the host hit-tested the press to, if
/// any. Widget element ids are prefixed with the widget id, which is how a
/// widget recognises presses that originated on itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerEvent {
    pub position: Point,
    pub button: MouseButton,
    pub target: Option<String>,
}

impl PointerEvent {
    /// A left click at a position with no hit-test information.
    pub fn at(x: u16, y: u16) -> Self {
        Self {
            position: Point::new(x, y),
            button: MouseButton::Left,
            target: None,
        }
    }

    /// A left click that the host resolved to an element id.
    pub fn on(target: impl Into<String>, x: u16, y: u16) -> Self {
        Self {
            position: Point::new(x, y),
            button: MouseButton::Left,
            target: Some(target.into()),
        }
    }
}

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    pub fn is_consumed(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

// Conversion from crossterm types
impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            _ => Key::Other,
        }
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(ev: crossterm::event::KeyEvent) -> Self {
        Self {
            key: ev.code.into(),
            modifiers: ev.modifiers.into(),
        }
    }
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => MouseButton::Left,
            CtBtn::Right => MouseButton::Right,
            CtBtn::Middle => MouseButton::Middle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossterm_key_conversion() {
        use crossterm::event::{KeyCode, KeyModifiers};

        let ev = crossterm::event::KeyEvent::new(KeyCode::Esc, KeyModifiers::CONTROL);
        let ev: KeyEvent = ev.into();
        assert_eq!(ev.key, Key::Escape);
        assert!(ev.modifiers.ctrl);
        assert!(!ev.modifiers.shift);

        assert_eq!(Key::from(KeyCode::Insert), Key::Other);
    }
}
