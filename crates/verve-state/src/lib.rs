//! Engine-owned state: mode, pending input buffers, register, command line.
//!
//! One `EngineState` exists per editing session and is mutated only by the
//! engine in response to key events. Everything here is deliberately inert
//! (no buffer access, no callbacks) so the state container stays trivially
//! testable and the dispatcher remains the single writer.

use std::fmt;

/// Upper bound for accumulated counts; multiplicative composition saturates
/// here as well (`999999dd` and `999d999w` both clamp).
pub const COUNT_MAX: u32 = 999_999;

/// Current interpreter mode. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Command/navigation mode.
    Normal,
    /// Text entry; the host inserts printable keys itself.
    Insert,
    /// Characterwise selection anchored at `visual_anchor`.
    Visual,
    /// Linewise selection anchored at `visual_anchor`.
    VisualLine,
    /// Command-line entry (`:`, `/`, `?`).
    Command,
    /// An operator fired and awaits a motion or text object.
    OperatorPending,
}

impl Mode {
    pub const ALL: [Mode; 6] = [
        Mode::Normal,
        Mode::Insert,
        Mode::Visual,
        Mode::VisualLine,
        Mode::Command,
        Mode::OperatorPending,
    ];

    /// Status-bar indicator text for this mode.
    pub fn indicator(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
            Mode::Visual => "VISUAL",
            Mode::VisualLine => "V-LINE",
            Mode::Command => "COMMAND",
            Mode::OperatorPending => "OP-PENDING",
        }
    }

    /// Dense index used by per-mode tables.
    pub fn index(&self) -> usize {
        match self {
            Mode::Normal => 0,
            Mode::Insert => 1,
            Mode::Visual => 2,
            Mode::VisualLine => 3,
            Mode::Command => 4,
            Mode::OperatorPending => 5,
        }
    }

    pub fn is_visual(&self) -> bool {
        matches!(self, Mode::Visual | Mode::VisualLine)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.indicator())
    }
}

/// Accumulated count prefix digits. `take` resolves and clears in one step so
/// a count can never leak into the next dispatch.
#[derive(Debug, Default, Clone)]
pub struct CountBuffer {
    digits: String,
}

impl CountBuffer {
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn push(&mut self, digit: char) {
        debug_assert!(digit.is_ascii_digit());
        if self.digits.len() < 6 {
            self.digits.push(digit);
        }
        tracing::trace!(target: "state.count", digits = %self.digits, "count_extend");
    }

    /// Resolve the accumulated count, clearing the buffer. `None` when no
    /// digits were typed (callers default to 1).
    pub fn take(&mut self) -> Option<u32> {
        if self.digits.is_empty() {
            return None;
        }
        let value = self.digits.parse::<u32>().unwrap_or(COUNT_MAX).min(COUNT_MAX);
        self.digits.clear();
        Some(value)
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }
}

/// The single yank/delete slot. No named registers; the `linewise` flag
/// records whether the content came from a whole-line operation so paste can
/// reinsert below/above the current line instead of mid-line.
#[derive(Debug, Default, Clone)]
pub struct Register {
    text: String,
    linewise: bool,
}

impl Register {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn linewise(&self) -> bool {
        self.linewise
    }

    pub fn record_delete(&mut self, text: String, linewise: bool) {
        tracing::debug!(target: "state.register", kind = "delete", bytes = text.len(), linewise, "register_write");
        self.text = text;
        self.linewise = linewise;
    }

    pub fn record_yank(&mut self, text: String, linewise: bool) {
        tracing::debug!(target: "state.register", kind = "yank", bytes = text.len(), linewise, "register_write");
        self.text = text;
        self.linewise = linewise;
    }

    pub fn record_change(&mut self, text: String, linewise: bool) {
        tracing::debug!(target: "state.register", kind = "change", bytes = text.len(), linewise, "register_write");
        self.text = text;
        self.linewise = linewise;
    }
}

/// Command-line buffer. Always begins with its sigil (`:`, `/`, or `?`)
/// while active; an empty buffer means the command line is closed.
#[derive(Debug, Default, Clone)]
pub struct CommandLine {
    buf: String,
}

impl CommandLine {
    pub fn is_active(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Raw buffer including the sigil, for rendering.
    pub fn buffer(&self) -> &str {
        &self.buf
    }

    /// Open the command line with the given sigil, discarding prior content.
    pub fn begin(&mut self, sigil: char) {
        debug_assert!(matches!(sigil, ':' | '/' | '?'));
        self.buf.clear();
        self.buf.push(sigil);
    }

    /// Append a token verbatim.
    pub fn push_str(&mut self, token: &str) {
        self.buf.push_str(token);
    }

    /// Remove the last character. Returns false once only the sigil was left
    /// (the buffer closes and the caller should leave Command mode).
    pub fn backspace(&mut self) -> bool {
        if self.buf.chars().count() > 1 {
            self.buf.pop();
            true
        } else {
            self.buf.clear();
            false
        }
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

/// An operator waiting for its motion or text object, together with the
/// count captured when it fired. The final count is `count` multiplied by
/// whatever count precedes the motion (`2d3w` operates on 6 words).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pending<O> {
    pub op: O,
    pub count: u32,
}

/// All mutable engine state. Created once per editing session; the engine is
/// the only writer.
#[derive(Debug, Clone)]
pub struct EngineState<O> {
    pub mode: Mode,
    pub count: CountBuffer,
    pub pending_keys: String,
    pub pending_operator: Option<Pending<O>>,
    pub register: Register,
    pub visual_anchor: usize,
    /// Moving end of the visual selection. Tracked here because the adapter
    /// only exposes a collapsed-or-extended selection span, not which end the
    /// cursor is on.
    pub visual_cursor: usize,
    pub command_line: CommandLine,
    pub last_search: String,
    pub status: Option<String>,
}

impl<O> Default for EngineState<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> EngineState<O> {
    pub fn new() -> Self {
        Self {
            mode: Mode::Normal,
            count: CountBuffer::default(),
            pending_keys: String::new(),
            pending_operator: None,
            register: Register::default(),
            visual_anchor: 0,
            visual_cursor: 0,
            command_line: CommandLine::default(),
            last_search: String::new(),
            status: None,
        }
    }

    /// Drop partially-entered input (count digits, key sequence, pending
    /// operator). Used on cancellation and after every resolution.
    pub fn clear_pending(&mut self) {
        self.count.clear();
        self.pending_keys.clear();
        self.pending_operator = None;
    }

    /// Full reset back to Normal-mode defaults: pending input, command line,
    /// and status message. Register and last search survive.
    pub fn reset(&mut self) {
        self.clear_pending();
        self.command_line.clear();
        self.status = None;
        self.mode = Mode::Normal;
    }

    pub fn set_status<S: Into<String>>(&mut self, msg: S) {
        self.status = Some(msg.into());
    }
}
