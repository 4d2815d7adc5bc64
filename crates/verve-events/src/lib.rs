//! Key event model and canonical token translation.
//!
//! The engine consumes *tokens*, short canonical strings such as `"h"`,
//! `"<Esc>"`, or `"ctrl-d"`, rather than raw platform key events. This crate
//! defines the normalized event types a host feeds in and the stateless
//! translation from an event to its token. Hosts that already produce tokens
//! (tests, replay tooling) can bypass translation entirely.

use std::fmt;

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL  = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const SHIFT = 0b0000_0100;
    }
}

/// Normalized logical key representation. Printable keys arrive as `Char`
/// with Shift already folded into the character itself; named keys carry no
/// character payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    /// Plain printable key with no modifiers.
    pub fn ch(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::empty())
    }

    /// Printable key with the Control modifier held.
    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CTRL)
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.code, self.mods)
    }
}

/// Translate a key event into its canonical token.
///
/// Rules:
/// * Named keys map to bracketed tokens (`<CR>`, `<Tab>`, `<BS>`, `<Esc>`,
///   `<Left>`, `<Right>`, `<Up>`, `<Down>`).
/// * A held Control modifier on a printable key yields `ctrl-<lowercased>`.
/// * Plain printable characters map to themselves, case preserved.
/// * Control characters and unsupported keys produce no token; the engine
///   treats such events as unhandled.
pub fn token_for(event: &KeyEvent) -> Option<String> {
    let token = match event.code {
        KeyCode::Enter => "<CR>".to_string(),
        KeyCode::Tab => "<Tab>".to_string(),
        KeyCode::Backspace => "<BS>".to_string(),
        KeyCode::Esc => "<Esc>".to_string(),
        KeyCode::Left => "<Left>".to_string(),
        KeyCode::Right => "<Right>".to_string(),
        KeyCode::Up => "<Up>".to_string(),
        KeyCode::Down => "<Down>".to_string(),
        KeyCode::Char(c) => {
            if event.mods.contains(KeyModifiers::CTRL) {
                format!("ctrl-{}", c.to_lowercase())
            } else if c.is_control() {
                tracing::trace!(target: "events.translate", ch = ?c, "unmapped_control_char");
                return None;
            } else {
                c.to_string()
            }
        }
    };
    Some(token)
}
