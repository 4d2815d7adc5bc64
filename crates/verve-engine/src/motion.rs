//! Motion resolution: cursor → span + destination caret.
//!
//! Every motion yields a [`MotionSpan`]: the half-open span an operator would
//! consume and the caret the cursor lands on when the motion runs standalone.
//! The two differ for backward motions (the span covers destination to cursor,
//! the caret is the destination), which is what lets `h` and `l` stay exact
//! inverses while `dh` and `dl` both delete toward the cursor.
//!
//! Horizontal and word motions are computed purely from the buffer text.
//! Vertical and page motions delegate to the adapter's line navigation (only
//! the host knows its display-line geometry) and report a zero-length span
//! at the destination.

use verve_text::{scan, Span, TextBuffer};

use crate::action::ActionContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// `h`: left by `count` characters, clamped at the buffer start.
    Left,
    /// `l`: right by `count` characters, clamped at the buffer end.
    Right,
    /// `k`: up by `count` display lines via the adapter.
    Up,
    /// `j`: down by `count` display lines via the adapter.
    Down,
    /// `w`
    WordForward,
    /// `b`
    WordBackward,
    /// `e`: lands on the last character of the word, not past it.
    WordEnd,
    /// `0`: absolute column zero.
    LineStart,
    /// `$`: the line terminator position, one past the last visible char.
    LineEnd,
    /// `^`
    FirstNonBlank,
    /// `gg`
    DocumentStart,
    /// `G`: end of buffer, or start of the 1-indexed `count` line when a
    /// count was typed.
    DocumentEnd,
    /// `ctrl-d`
    HalfPageDown,
    /// `ctrl-u`
    HalfPageUp,
    /// `ctrl-f`
    PageDown,
    /// `ctrl-b`
    PageUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionSpan {
    pub span: Span,
    /// Where the cursor lands when the motion executes standalone.
    pub caret: usize,
}

impl MotionSpan {
    fn to(cursor: usize, dest: usize) -> Self {
        Self {
            span: Span::between(cursor, dest),
            caret: dest,
        }
    }

    fn at(pos: usize) -> Self {
        Self {
            span: Span::caret(pos),
            caret: pos,
        }
    }
}

pub(crate) fn resolve(
    kind: Motion,
    buf: &mut dyn TextBuffer,
    cursor: usize,
    ctx: &ActionContext,
) -> MotionSpan {
    let count = ctx.count.max(1);
    match kind {
        Motion::Up => vertical(buf, cursor, count as usize, false),
        Motion::Down => vertical(buf, cursor, count as usize, true),
        Motion::HalfPageDown => {
            let lines = half_page(buf);
            vertical(buf, cursor, lines, true)
        }
        Motion::HalfPageUp => {
            let lines = half_page(buf);
            vertical(buf, cursor, lines, false)
        }
        Motion::PageDown => {
            let lines = full_page(buf);
            vertical(buf, cursor, lines, true)
        }
        Motion::PageUp => {
            let lines = full_page(buf);
            vertical(buf, cursor, lines, false)
        }
        _ => {
            let text = buf.text().into_owned();
            let cursor = cursor.min(text.len());
            resolve_in_text(kind, &text, cursor, count, ctx.explicit_count)
        }
    }
}

fn resolve_in_text(
    kind: Motion,
    text: &str,
    cursor: usize,
    count: u32,
    explicit_count: Option<u32>,
) -> MotionSpan {
    match kind {
        Motion::Left => {
            let mut pos = cursor;
            for _ in 0..count {
                pos = scan::prev_grapheme(text, pos);
            }
            MotionSpan::to(cursor, pos)
        }
        Motion::Right => {
            let mut pos = cursor;
            for _ in 0..count {
                pos = scan::next_grapheme(text, pos);
            }
            MotionSpan::to(cursor, pos)
        }
        Motion::WordForward => {
            let mut pos = cursor;
            for _ in 0..count {
                let start = pos;
                // Skip the current word run.
                while let Some(c) = scan::char_at(text, pos) {
                    if scan::is_word_boundary(c) {
                        break;
                    }
                    pos += c.len_utf8();
                }
                // On a boundary character the run loop makes no progress;
                // step over it so repeated `w` always advances.
                if pos == start {
                    if let Some(c) = scan::char_at(text, pos) {
                        pos += c.len_utf8();
                    }
                }
                // Skip following whitespace.
                while let Some(c) = scan::char_at(text, pos) {
                    if !c.is_whitespace() {
                        break;
                    }
                    pos += c.len_utf8();
                }
            }
            MotionSpan::to(cursor, pos)
        }
        Motion::WordBackward => {
            let mut pos = cursor;
            for _ in 0..count {
                if let Some((ps, _)) = scan::char_before(text, pos) {
                    pos = ps;
                }
                while let Some(c) = scan::char_at(text, pos) {
                    if !c.is_whitespace() || pos == 0 {
                        break;
                    }
                    match scan::char_before(text, pos) {
                        Some((ps, _)) => pos = ps,
                        None => break,
                    }
                }
                // Walk to the start of the word run.
                while let Some((ps, c)) = scan::char_before(text, pos) {
                    if scan::is_word_boundary(c) {
                        break;
                    }
                    pos = ps;
                }
            }
            MotionSpan::to(cursor, pos)
        }
        Motion::WordEnd => {
            let mut pos = cursor;
            for _ in 0..count {
                if let Some(c) = scan::char_at(text, pos) {
                    pos += c.len_utf8();
                }
                while let Some(c) = scan::char_at(text, pos) {
                    if !c.is_whitespace() {
                        break;
                    }
                    pos += c.len_utf8();
                }
                // Advance while the next character continues the word, so
                // the caret rests on the word's last character.
                while let Some(c) = scan::char_at(text, pos) {
                    let next = pos + c.len_utf8();
                    match scan::char_at(text, next) {
                        Some(nc) if !scan::is_word_boundary(nc) => pos = next,
                        _ => break,
                    }
                }
            }
            MotionSpan::to(cursor, pos)
        }
        Motion::LineStart => MotionSpan::to(cursor, scan::line_start(text, cursor)),
        Motion::LineEnd => MotionSpan::to(cursor, scan::line_end(text, cursor)),
        Motion::FirstNonBlank => MotionSpan::to(cursor, scan::first_non_blank(text, cursor)),
        Motion::DocumentStart => MotionSpan::to(cursor, 0),
        Motion::DocumentEnd => {
            let dest = match explicit_count {
                Some(line) => scan::start_of_line(text, line as usize),
                None => text.len(),
            };
            MotionSpan::to(cursor, dest)
        }
        // Vertical motions are resolved through the adapter in `resolve`.
        Motion::Up
        | Motion::Down
        | Motion::HalfPageDown
        | Motion::HalfPageUp
        | Motion::PageDown
        | Motion::PageUp => MotionSpan::at(cursor),
    }
}

fn vertical(buf: &mut dyn TextBuffer, cursor: usize, lines: usize, down: bool) -> MotionSpan {
    buf.set_cursor(cursor);
    for _ in 0..lines {
        if down {
            buf.move_line_down();
        } else {
            buf.move_line_up();
        }
    }
    MotionSpan::at(buf.cursor())
}

fn half_page(buf: &dyn TextBuffer) -> usize {
    (buf.visible_lines() / 2).max(1)
}

fn full_page(buf: &dyn TextBuffer) -> usize {
    buf.visible_lines().max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ctx(count: u32) -> ActionContext {
        ActionContext::new(Some(count))
    }

    fn span_of(kind: Motion, text: &str, cursor: usize, count: u32) -> MotionSpan {
        resolve_in_text(kind, text, cursor, count, Some(count))
    }

    #[test]
    fn left_right_inverse() {
        let t = "hello world";
        let right = span_of(Motion::Right, t, 2, 3);
        assert_eq!(right.caret, 5);
        assert_eq!(right.span, Span::new(2, 3));
        let left = span_of(Motion::Left, t, 5, 3);
        assert_eq!(left.caret, 2);
        assert_eq!(left.span, Span::new(2, 3));
    }

    #[test]
    fn horizontal_clamps_at_bounds() {
        let t = "ab";
        assert_eq!(span_of(Motion::Left, t, 1, 10).caret, 0);
        assert_eq!(span_of(Motion::Right, t, 1, 10).caret, 2);
    }

    #[test]
    fn word_forward_lands_on_next_word() {
        let t = "one two three";
        let m = span_of(Motion::WordForward, t, 0, 1);
        assert_eq!(m.caret, 4);
        let m2 = span_of(Motion::WordForward, t, 0, 2);
        assert_eq!(m2.caret, 8);
    }

    #[test]
    fn word_forward_advances_over_punctuation() {
        let t = "a. b";
        let m = span_of(Motion::WordForward, t, 0, 1);
        assert_eq!(m.caret, 1, "stops at the punctuation boundary");
        let m2 = span_of(Motion::WordForward, t, 1, 1);
        assert_eq!(m2.caret, 3, "steps over punctuation then whitespace");
    }

    #[test]
    fn word_backward_mirrors_forward() {
        let t = "one two three";
        let m = span_of(Motion::WordBackward, t, 8, 1);
        assert_eq!(m.caret, 4);
        assert_eq!(m.span, Span::new(4, 4));
        let m2 = span_of(Motion::WordBackward, t, 8, 2);
        assert_eq!(m2.caret, 0);
    }

    #[test]
    fn word_end_lands_on_last_char() {
        let t = "one two";
        let m = span_of(Motion::WordEnd, t, 0, 1);
        assert_eq!(m.caret, 2, "on the 'e' of one");
        let m2 = span_of(Motion::WordEnd, t, 2, 1);
        assert_eq!(m2.caret, 6, "on the 'o' of two");
    }

    #[test]
    fn line_motions() {
        let t = "  indent\nnext";
        assert_eq!(span_of(Motion::LineStart, t, 6, 1).caret, 0);
        assert_eq!(span_of(Motion::FirstNonBlank, t, 6, 1).caret, 2);
        assert_eq!(span_of(Motion::LineEnd, t, 3, 1).caret, 8);
    }

    #[test]
    fn document_motions() {
        let t = "a\nb\nc\n";
        assert_eq!(span_of(Motion::DocumentStart, t, 4, 1).caret, 0);
        let g = resolve_in_text(Motion::DocumentEnd, t, 0, 1, None);
        assert_eq!(g.caret, t.len());
        let g3 = resolve_in_text(Motion::DocumentEnd, t, 0, 3, Some(3));
        assert_eq!(g3.caret, 4, "3G jumps to the start of line 3");
    }

    #[test]
    fn vertical_delegates_to_adapter() {
        use verve_text::StringBuffer;
        let mut buf = StringBuffer::new("aa\nbb\ncc\n");
        let m = resolve(Motion::Down, &mut buf, 0, &ctx(2));
        assert_eq!(m.caret, 6);
        assert!(m.span.is_empty(), "adapter-delegated motions report a zero-length span");
    }
}
