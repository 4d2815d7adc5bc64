//! Immediately-executable commands: mode entries, simple edits, paste,
//! undo/redo, search repeat, and the visual-selection operators.
//!
//! Commands compose with nothing: no pending operator, no following motion.
//! The line-anchored `D`/`C` live here (computing their own range) precisely
//! so they never interact with operator-pending state.

use verve_state::Mode;
use verve_text::{scan, Span, TextBuffer};

use crate::action::{ActionContext, ActionResult};
use crate::engine::Engine;
use crate::operator::{self, Operator};
use crate::ex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `i`
    EnterInsert,
    /// `I`
    InsertFirstNonBlank,
    /// `a`
    Append,
    /// `A`
    AppendLineEnd,
    /// `o`
    OpenBelow,
    /// `O`
    OpenAbove,
    /// `v`
    EnterVisual,
    /// `V`
    EnterVisualLine,
    /// `:`, `/`, `?`: open the command line with the given sigil.
    EnterCommandLine(char),
    /// `x`: delete `count` characters into the register.
    DeleteChar,
    /// `s`
    Substitute,
    /// `S`: linewise change of `count` lines.
    SubstituteLine,
    /// `D`
    DeleteToLineEnd,
    /// `C`
    ChangeToLineEnd,
    /// `p`
    PasteAfter,
    /// `P`
    PasteBefore,
    /// `J`
    JoinLines,
    /// `u`
    Undo,
    /// `ctrl-r`
    Redo,
    /// `n`
    SearchNext,
    /// `N`
    SearchPrev,
    /// `r`: placeholder; posts a status message only.
    ReplaceChar,
    /// `d`/`x` on an active visual selection.
    VisualDelete,
    /// `y` on an active visual selection.
    VisualYank,
    /// `c` on an active visual selection.
    VisualChange,
}

pub(crate) fn run(
    cmd: Command,
    eng: &mut Engine,
    buf: &mut dyn TextBuffer,
    ctx: &ActionContext,
) -> ActionResult {
    match cmd {
        Command::EnterInsert => ActionResult::SwitchMode(Mode::Insert),
        Command::InsertFirstNonBlank => {
            let text = buf.text().into_owned();
            let dest = scan::first_non_blank(&text, buf.cursor());
            buf.set_cursor(dest);
            ActionResult::SwitchMode(Mode::Insert)
        }
        Command::Append => {
            let text = buf.text().into_owned();
            let dest = scan::next_grapheme(&text, buf.cursor());
            buf.set_cursor(dest);
            ActionResult::SwitchMode(Mode::Insert)
        }
        Command::AppendLineEnd => {
            let text = buf.text().into_owned();
            let dest = scan::line_end(&text, buf.cursor());
            buf.set_cursor(dest);
            ActionResult::SwitchMode(Mode::Insert)
        }
        Command::OpenBelow => {
            let text = buf.text().into_owned();
            let le = scan::line_end(&text, buf.cursor());
            buf.replace(Span::caret(le), "\n");
            eng.notify_content_change();
            ActionResult::SwitchMode(Mode::Insert)
        }
        Command::OpenAbove => {
            let text = buf.text().into_owned();
            let ls = scan::line_start(&text, buf.cursor());
            buf.replace(Span::caret(ls), "\n");
            buf.set_cursor(ls);
            eng.notify_content_change();
            ActionResult::SwitchMode(Mode::Insert)
        }
        Command::EnterVisual => {
            let pos = buf.cursor();
            eng.state.visual_anchor = pos;
            eng.state.visual_cursor = pos;
            ActionResult::SwitchMode(Mode::Visual)
        }
        Command::EnterVisualLine => {
            let pos = buf.cursor();
            eng.state.visual_anchor = pos;
            eng.state.visual_cursor = pos;
            ActionResult::SwitchMode(Mode::VisualLine)
        }
        Command::EnterCommandLine(sigil) => {
            eng.state.command_line.begin(sigil);
            ActionResult::SwitchMode(Mode::Command)
        }
        Command::DeleteChar => {
            let text = buf.text().into_owned();
            let cursor = buf.cursor();
            let mut end = cursor;
            for _ in 0..ctx.count.max(1) {
                end = scan::next_grapheme(&text, end);
            }
            let span = Span::between(cursor, end);
            if !span.is_empty() {
                eng.state
                    .register
                    .record_delete(text[span.start..span.end()].to_string(), false);
                buf.replace(span, "");
                eng.notify_content_change();
            }
            ActionResult::Handled
        }
        Command::Substitute => {
            let text = buf.text().into_owned();
            let cursor = buf.cursor();
            let end = scan::next_grapheme(&text, cursor);
            if end > cursor {
                eng.state
                    .register
                    .record_delete(text[cursor..end].to_string(), false);
                buf.replace(Span::between(cursor, end), "");
                eng.notify_content_change();
            }
            ActionResult::SwitchMode(Mode::Insert)
        }
        Command::SubstituteLine => {
            let text = buf.text().into_owned();
            let span = operator::linewise_span(&text, buf.cursor(), ctx.count);
            let (result, mutated) = operator::apply(Operator::Change, span, true, &mut eng.state, buf);
            if mutated {
                eng.notify_content_change();
            }
            result
        }
        Command::DeleteToLineEnd => {
            delete_to_line_end(eng, buf);
            ActionResult::Handled
        }
        Command::ChangeToLineEnd => {
            delete_to_line_end(eng, buf);
            ActionResult::SwitchMode(Mode::Insert)
        }
        Command::PasteAfter => paste(eng, buf, true),
        Command::PasteBefore => paste(eng, buf, false),
        Command::JoinLines => {
            let text = buf.text().into_owned();
            let le = scan::line_end(&text, buf.cursor());
            if le < text.len() {
                buf.replace(Span::new(le, 1), " ");
                buf.set_cursor(le);
                eng.notify_content_change();
            }
            ActionResult::Handled
        }
        Command::Undo => {
            buf.undo();
            eng.notify_content_change();
            ActionResult::Handled
        }
        Command::Redo => {
            buf.redo();
            eng.notify_content_change();
            ActionResult::Handled
        }
        Command::SearchNext => {
            ex::search(eng, buf, true);
            ActionResult::Handled
        }
        Command::SearchPrev => {
            ex::search(eng, buf, false);
            ActionResult::Handled
        }
        Command::ReplaceChar => {
            eng.state.set_status("replace...");
            ActionResult::Handled
        }
        Command::VisualDelete => {
            let span = buf.selection();
            if !span.is_empty() {
                let text = buf.text().into_owned();
                eng.state
                    .register
                    .record_delete(text[span.start..span.end()].to_string(), eng.state.mode == Mode::VisualLine);
                buf.replace(span, "");
                eng.notify_content_change();
            } else {
                buf.set_cursor(span.start);
            }
            ActionResult::SwitchMode(Mode::Normal)
        }
        Command::VisualYank => {
            let span = buf.selection();
            if !span.is_empty() {
                let text = buf.text().into_owned();
                eng.state
                    .register
                    .record_yank(text[span.start..span.end()].to_string(), eng.state.mode == Mode::VisualLine);
                eng.state.set_status("yanked");
            }
            buf.set_cursor(span.start);
            ActionResult::SwitchMode(Mode::Normal)
        }
        Command::VisualChange => {
            let span = buf.selection();
            if !span.is_empty() {
                let text = buf.text().into_owned();
                eng.state
                    .register
                    .record_change(text[span.start..span.end()].to_string(), eng.state.mode == Mode::VisualLine);
                buf.replace(span, "");
                eng.notify_content_change();
            } else {
                buf.set_cursor(span.start);
            }
            ActionResult::SwitchMode(Mode::Insert)
        }
    }
}

fn delete_to_line_end(eng: &mut Engine, buf: &mut dyn TextBuffer) {
    let text = buf.text().into_owned();
    let cursor = buf.cursor();
    let le = scan::line_end(&text, cursor);
    if le > cursor {
        eng.state
            .register
            .record_delete(text[cursor..le].to_string(), false);
        buf.replace(Span::between(cursor, le), "");
        eng.notify_content_change();
    }
}

fn paste(eng: &mut Engine, buf: &mut dyn TextBuffer, after: bool) -> ActionResult {
    let content = eng.state.register.text().to_string();
    if content.is_empty() {
        return ActionResult::Handled;
    }
    let text = buf.text().into_owned();
    let cursor = buf.cursor();
    if eng.state.register.linewise() {
        // Whole lines reinsert below (or above) the current line.
        if after {
            let le = scan::line_end(&text, cursor);
            if le < text.len() {
                buf.replace(Span::caret(le + 1), &content);
                buf.set_cursor(le + 1);
            } else {
                // Last line has no terminator; open one before the lines.
                let block = content.strip_suffix('\n').unwrap_or(&content);
                buf.replace(Span::caret(le), &format!("\n{block}"));
                buf.set_cursor((le + 1).min(buf.text().len()));
            }
        } else {
            let ls = scan::line_start(&text, cursor);
            buf.replace(Span::caret(ls), &content);
            buf.set_cursor(ls);
        }
    } else {
        let at = if after {
            scan::next_grapheme(&text, cursor)
        } else {
            cursor
        };
        buf.replace(Span::caret(at), &content);
    }
    eng.notify_content_change();
    ActionResult::Handled
}
