//! Ex-command interpretation: the command-line buffer after `<CR>`.
//!
//! Parsing is pure classification; execution applies the few side effects
//! (search jump, line jump, host save/quit hooks) and always restores Normal
//! mode with a cleared buffer. Unknown commands surface only as a transient
//! status message.

use verve_text::{scan, Span, TextBuffer};

use crate::engine::Engine;
use verve_state::Mode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ExCommand {
    SearchForward(String),
    SearchBackward(String),
    GotoLine(usize),
    Write,
    Quit,
    WriteQuit,
    Empty,
    Unknown(String),
}

pub(crate) fn parse(raw: &str) -> ExCommand {
    if let Some(pat) = raw.strip_prefix('/') {
        return ExCommand::SearchForward(pat.to_string());
    }
    if let Some(pat) = raw.strip_prefix('?') {
        return ExCommand::SearchBackward(pat.to_string());
    }
    let body = raw.strip_prefix(':').unwrap_or(raw);
    if body.is_empty() {
        return ExCommand::Empty;
    }
    match body {
        "w" => ExCommand::Write,
        "q" | "q!" => ExCommand::Quit,
        "wq" | "x" => ExCommand::WriteQuit,
        _ => match body.parse::<usize>() {
            Ok(line) => ExCommand::GotoLine(line),
            Err(_) => ExCommand::Unknown(body.to_string()),
        },
    }
}

/// Execute the accumulated command line, then clear it and return to Normal.
pub(crate) fn execute(eng: &mut Engine, buf: &mut dyn TextBuffer) {
    let raw = eng.state.command_line.buffer().to_string();
    let parsed = parse(&raw);
    tracing::debug!(target: "engine.excmd", raw = %raw, parsed = ?parsed, "execute");
    match parsed {
        ExCommand::SearchForward(pat) => {
            eng.state.last_search = pat;
            search(eng, buf, true);
        }
        ExCommand::SearchBackward(pat) => {
            eng.state.last_search = pat;
            search(eng, buf, false);
        }
        ExCommand::GotoLine(line) => {
            let text = buf.text().into_owned();
            let dest = scan::start_of_line(&text, line);
            buf.set_cursor(dest);
            buf.scroll_into_view(Span::caret(dest));
        }
        ExCommand::Write => {
            eng.notify_save();
            eng.state.set_status("saved");
        }
        ExCommand::Quit => eng.notify_quit(),
        ExCommand::WriteQuit => {
            eng.notify_save();
            eng.notify_quit();
        }
        ExCommand::Empty => {}
        ExCommand::Unknown(cmd) => {
            eng.state.set_status(format!("Unknown command: {cmd}"));
        }
    }
    eng.state.command_line.clear();
    eng.set_mode(Mode::Normal);
}

/// Find-and-jump for the stored pattern. No wrap in either direction: a
/// search that reaches a buffer edge without a match leaves the cursor
/// unmoved.
pub(crate) fn search(eng: &mut Engine, buf: &mut dyn TextBuffer, forward: bool) {
    let pattern = eng.state.last_search.clone();
    if pattern.is_empty() {
        return;
    }
    let text = buf.text().into_owned();
    let cursor = buf.cursor().min(text.len());
    let found = if forward {
        let from = scan::next_grapheme(&text, cursor);
        text.get(from..)
            .and_then(|tail| tail.find(&pattern))
            .map(|i| from + i)
    } else {
        text.get(..cursor).and_then(|head| head.rfind(&pattern))
    };
    match found {
        Some(pos) => {
            buf.set_cursor(pos);
            buf.scroll_into_view(Span::new(pos, pattern.len()));
        }
        None => {
            tracing::debug!(target: "engine.excmd", pattern = %pattern, forward, "search_miss");
        }
    }
}
