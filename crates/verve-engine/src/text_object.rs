//! Text objects: the region around the cursor, never a cursor move.
//!
//! Each object resolves to a span from the buffer text and the cursor alone.
//! When the requested delimiters don't enclose the cursor the span
//! degenerates to zero length at the cursor, which makes any composed
//! operator a no-op, per the engine's blanket "invalid input degrades to
//! nothing" policy.

use verve_text::{scan, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextObject {
    /// `iw` / `aw`: the word-character run containing the cursor; `around`
    /// extends through trailing whitespace.
    Word { around: bool },
    /// `i"` `a"` `i'` `a'`: the nearest enclosing quoted span.
    Quote { quote: char, around: bool },
    /// `i(` `a(` ...: depth-balanced bracket pair enclosing the cursor.
    Bracket {
        open: char,
        close: char,
        around: bool,
    },
    /// `ip`: run of lines bounded by blank-line separators.
    Paragraph,
    /// `il`: the current line with surrounding blanks trimmed.
    Line,
}

pub(crate) fn resolve(obj: TextObject, text: &str, cursor: usize) -> Span {
    let cursor = cursor.min(text.len());
    let span = match obj {
        TextObject::Word { around } => word(text, cursor, around),
        TextObject::Quote { quote, around } => quoted(text, cursor, quote, around),
        TextObject::Bracket {
            open,
            close,
            around,
        } => bracketed(text, cursor, open, close, around),
        TextObject::Paragraph => paragraph(text, cursor),
        TextObject::Line => trimmed_line(text, cursor),
    };
    tracing::trace!(target: "engine.object", obj = ?obj, at = span.start, bytes = span.len, "resolve");
    span
}

fn word(text: &str, cursor: usize, around: bool) -> Span {
    if cursor >= text.len() {
        return Span::caret(cursor);
    }
    let mut start = cursor;
    while let Some((ps, c)) = scan::char_before(text, start) {
        if !scan::is_word_char(c) {
            break;
        }
        start = ps;
    }
    let mut end = cursor;
    while let Some(c) = scan::char_at(text, end) {
        if !scan::is_word_char(c) {
            break;
        }
        end += c.len_utf8();
    }
    if around {
        while let Some(c) = scan::char_at(text, end) {
            if !c.is_whitespace() {
                break;
            }
            end += c.len_utf8();
        }
    }
    Span::between(start, end)
}

fn quoted(text: &str, cursor: usize, quote: char, around: bool) -> Span {
    // Nearest quote at or left of the cursor opens the span.
    let mut open = None;
    let mut p = cursor;
    loop {
        if scan::char_at(text, p) == Some(quote) {
            open = Some(p);
            break;
        }
        match scan::char_before(text, p) {
            Some((ps, _)) => p = ps,
            None => break,
        }
    }
    let Some(open) = open else {
        return Span::caret(cursor);
    };
    let inner_start = open + quote.len_utf8();
    let Some(rel) = text.get(inner_start..).and_then(|s| s.find(quote)) else {
        return Span::caret(cursor);
    };
    let close = inner_start + rel;
    if around {
        Span::between(open, close + quote.len_utf8())
    } else {
        Span::between(inner_start, close)
    }
}

fn bracketed(text: &str, cursor: usize, open: char, close: char, around: bool) -> Span {
    // Scan left for the unbalanced opening bracket.
    let mut open_pos = None;
    let mut depth = 0u32;
    let mut p = cursor;
    loop {
        match scan::char_at(text, p) {
            Some(c) if c == close && p != cursor => depth += 1,
            Some(c) if c == open => {
                if depth == 0 {
                    open_pos = Some(p);
                    break;
                }
                depth -= 1;
            }
            _ => {}
        }
        match scan::char_before(text, p) {
            Some((ps, _)) => p = ps,
            None => break,
        }
    }
    let Some(op) = open_pos else {
        return Span::caret(cursor);
    };
    // Scan right for the matching close, starting inside the pair.
    let mut depth = 0u32;
    let mut q = cursor.max(op + open.len_utf8());
    let mut close_pos = None;
    while let Some(c) = scan::char_at(text, q) {
        if c == open {
            depth += 1;
        } else if c == close {
            if depth == 0 {
                close_pos = Some(q);
                break;
            }
            depth -= 1;
        }
        q += c.len_utf8();
    }
    let Some(cp) = close_pos else {
        return Span::caret(cursor);
    };
    if around {
        Span::between(op, cp + close.len_utf8())
    } else {
        Span::between(op + open.len_utf8(), cp)
    }
}

fn paragraph(text: &str, cursor: usize) -> Span {
    let b = text.as_bytes();
    let mut start = cursor;
    while start > 0 {
        if start >= 2 && b[start - 1] == b'\n' && b[start - 2] == b'\n' {
            break;
        }
        start -= 1;
    }
    let mut end = cursor;
    while end < b.len() {
        if b[end] == b'\n' && b.get(end + 1) == Some(&b'\n') {
            break;
        }
        end += 1;
    }
    Span::between(start, end)
}

fn trimmed_line(text: &str, cursor: usize) -> Span {
    let mut start = scan::line_start(text, cursor);
    while let Some(c) = scan::char_at(text, start) {
        if !scan::is_blank(c) {
            break;
        }
        start += c.len_utf8();
    }
    let mut end = scan::line_end(text, cursor);
    while end > start {
        match scan::char_before(text, end) {
            Some((ps, c)) if scan::is_blank(c) => end = ps,
            _ => break,
        }
    }
    Span::between(start, end)
}
