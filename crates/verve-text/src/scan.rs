//! Pure text scanning helpers.
//!
//! All functions take the buffer content and byte offsets on character
//! boundaries. Word classification follows the classic rule: a word
//! character is alphanumeric or `_`; a word boundary is whitespace or
//! punctuation.

use unicode_segmentation::{GraphemeCursor, UnicodeSegmentation};

/// Letter, digit, or underscore.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whitespace or (ASCII) punctuation: the transition class for `w`/`b`/`e`.
pub fn is_word_boundary(c: char) -> bool {
    c.is_whitespace() || c.is_ascii_punctuation()
}

/// Horizontal whitespace only (space and tab), as used by `^` and `il`.
pub fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Character starting at `pos`, if any.
pub fn char_at(text: &str, pos: usize) -> Option<char> {
    text.get(pos..).and_then(|s| s.chars().next())
}

/// Character ending at `pos` together with its start offset.
pub fn char_before(text: &str, pos: usize) -> Option<(usize, char)> {
    text.get(..pos).and_then(|s| s.char_indices().next_back())
}

/// Previous extended-grapheme-cluster boundary before `pos` (0 at the start).
pub fn prev_grapheme(text: &str, pos: usize) -> usize {
    let mut cursor = GraphemeCursor::new(pos.min(text.len()), text.len(), true);
    match cursor.prev_boundary(text, 0) {
        Ok(Some(b)) => b,
        _ => 0,
    }
}

/// Next extended-grapheme-cluster boundary after `pos` (clamped to the end).
pub fn next_grapheme(text: &str, pos: usize) -> usize {
    let mut cursor = GraphemeCursor::new(pos.min(text.len()), text.len(), true);
    match cursor.next_boundary(text, 0) {
        Ok(Some(b)) => b,
        _ => text.len(),
    }
}

/// Offset of the first character of the line containing `pos`.
pub fn line_start(text: &str, pos: usize) -> usize {
    text[..pos.min(text.len())]
        .rfind('\n')
        .map(|i| i + 1)
        .unwrap_or(0)
}

/// Offset of the line terminator of the line containing `pos` (or the end of
/// the buffer). One past the last visible character of the line.
pub fn line_end(text: &str, pos: usize) -> usize {
    let pos = pos.min(text.len());
    pos + text[pos..].find('\n').unwrap_or(text.len() - pos)
}

/// Offset of the first non-blank character of the line containing `pos`
/// (the line terminator for an all-blank line).
pub fn first_non_blank(text: &str, pos: usize) -> usize {
    let mut p = line_start(text, pos);
    while let Some(c) = char_at(text, p) {
        if !is_blank(c) {
            break;
        }
        p += c.len_utf8();
    }
    p
}

/// Start offset of the 1-indexed line `line`, clamped to the last line.
pub fn start_of_line(text: &str, line: usize) -> usize {
    if line <= 1 {
        return 0;
    }
    let mut current = 1usize;
    for (i, c) in text.char_indices() {
        if c == '\n' {
            current += 1;
            if current == line {
                return i + 1;
            }
        }
    }
    // Past the end: clamp to the start of the last line.
    text.rfind('\n').map(|i| i + 1).unwrap_or(0)
}

/// Number of grapheme clusters in `line_prefix` (content from line start to
/// the caret, no newline).
pub fn visual_col(line_prefix: &str) -> usize {
    line_prefix.graphemes(true).count()
}

/// Byte offset of the `col`-th grapheme in `line_content`, clamped to the
/// line length.
pub fn byte_for_col(line_content: &str, col: usize) -> usize {
    line_content
        .grapheme_indices(true)
        .nth(col)
        .map(|(i, _)| i)
        .unwrap_or(line_content.len())
}
