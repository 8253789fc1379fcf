#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

/// A key press delivered while focus is in the message input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }

    pub fn ctrl_enter() -> Self {
        Self {
            key: Key::Enter,
            modifiers: Modifiers {
                ctrl: true,
                ..Modifiers::default()
            },
        }
    }

    pub fn meta_enter() -> Self {
        Self {
            key: Key::Enter,
            modifiers: Modifiers {
                meta: true,
                ..Modifiers::default()
            },
        }
    }

    /// Cmd+Enter on macOS, Ctrl+Enter elsewhere. Either is accepted everywhere.
    pub fn is_submit_chord(&self) -> bool {
        self.key == Key::Enter && (self.modifiers.ctrl || self.modifiers.meta)
    }
}
