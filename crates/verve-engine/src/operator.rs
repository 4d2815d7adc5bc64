//! Operators: delete, yank, change over a resolved span.
//!
//! Operators never compute their own range; they are handed one by the
//! dispatcher's composition step (motion, text object, or the doubled-key
//! linewise shortcut). A zero-length span performs no mutation and leaves
//! the register untouched, but `c` still enters Insert so `c` at the end of
//! the buffer lets the user type.

use verve_state::{EngineState, Mode};
use verve_text::{scan, Span, TextBuffer};

use crate::action::ActionResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `d`
    Delete,
    /// `y`
    Yank,
    /// `c`
    Change,
}

/// Whole lines covered by the doubled-operator shortcut: from the start of
/// the cursor's line through the `count`-th line terminator, inclusive of
/// the trailing newline (or the end of the buffer when fewer lines remain).
pub(crate) fn linewise_span(text: &str, cursor: usize, count: u32) -> Span {
    let start = scan::line_start(text, cursor);
    let mut end = start;
    let mut remaining = count.max(1);
    while let Some(c) = scan::char_at(text, end) {
        end += c.len_utf8();
        if c == '\n' {
            remaining -= 1;
            if remaining == 0 {
                break;
            }
        }
    }
    Span::between(start, end)
}

/// Apply `op` to `span`. Returns the requested mode transition and whether
/// the buffer was mutated (the dispatcher fires the content-change hook).
pub(crate) fn apply(
    op: Operator,
    span: Span,
    linewise: bool,
    state: &mut EngineState<Operator>,
    buf: &mut dyn TextBuffer,
) -> (ActionResult, bool) {
    let grabbed = buf
        .text()
        .get(span.start..span.end())
        .unwrap_or("")
        .to_string();
    let lines = grabbed.matches('\n').count().max(1);
    tracing::debug!(
        target: "engine.operator",
        op = ?op,
        at = span.start,
        bytes = span.len,
        linewise,
        "apply"
    );
    match op {
        Operator::Delete => {
            if span.is_empty() {
                return (ActionResult::SwitchMode(Mode::Normal), false);
            }
            state.register.record_delete(grabbed, linewise);
            buf.replace(span, "");
            if linewise {
                state.set_status(format!("{lines} line(s) deleted"));
            }
            (ActionResult::SwitchMode(Mode::Normal), true)
        }
        Operator::Yank => {
            if span.is_empty() {
                return (ActionResult::SwitchMode(Mode::Normal), false);
            }
            state.register.record_yank(grabbed, linewise);
            state.set_status(if linewise {
                format!("{lines} line(s) yanked")
            } else {
                "yanked".to_string()
            });
            buf.set_cursor(span.start);
            (ActionResult::SwitchMode(Mode::Normal), false)
        }
        Operator::Change => {
            if span.is_empty() {
                return (ActionResult::SwitchMode(Mode::Insert), false);
            }
            state.register.record_change(grabbed, linewise);
            buf.replace(span, "");
            (ActionResult::SwitchMode(Mode::Insert), true)
        }
    }
}
