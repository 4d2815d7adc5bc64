//! In-memory reference adapter.
//!
//! Backs hosts that have no text widget of their own (and the engine's test
//! suites). Undo is whole-content snapshots pushed on every ranged
//! replacement; history is capped and the redo stack clears on new edits.

use std::borrow::Cow;

use crate::{Span, TextBuffer};

/// Maximum retained undo snapshots; the oldest is dropped beyond this.
pub const UNDO_HISTORY_MAX: usize = 100;

#[derive(Debug, Clone)]
struct Snapshot {
    content: String,
    selection: Span,
}

/// String-backed [`TextBuffer`] with snapshot undo/redo and scroll-request
/// recording.
#[derive(Debug, Default)]
pub struct StringBuffer {
    content: String,
    selection: Span,
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    last_scroll: Option<Span>,
}

impl StringBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            content: text.into(),
            ..Self::default()
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Most recent `scroll_into_view` request, if any.
    pub fn last_scroll(&self) -> Option<Span> {
        self.last_scroll
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            content: self.content.clone(),
            selection: self.selection,
        }
    }

    fn restore(&mut self, snap: Snapshot) {
        self.content = snap.content;
        self.selection = snap.selection;
    }

    /// Snap an offset onto a char boundary (towards the start) and clamp it
    /// to the content length.
    fn snap(&self, mut pos: usize) -> usize {
        pos = pos.min(self.content.len());
        while pos > 0 && !self.content.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }

    fn clamp_span(&self, span: Span) -> Span {
        let start = self.snap(span.start);
        let end = self.snap(span.end().max(start));
        Span::new(start, end - start)
    }
}

impl TextBuffer for StringBuffer {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.content)
    }

    fn selection(&self) -> Span {
        self.selection
    }

    fn set_selection(&mut self, span: Span) {
        self.selection = self.clamp_span(span);
    }

    fn replace(&mut self, span: Span, replacement: &str) {
        let span = self.clamp_span(span);
        self.undo_stack.push(self.snapshot());
        if self.undo_stack.len() > UNDO_HISTORY_MAX {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
        self.content
            .replace_range(span.start..span.end(), replacement);
        self.selection = Span::caret(span.start + replacement.len());
        tracing::trace!(
            target: "text.buffer",
            at = span.start,
            removed = span.len,
            inserted = replacement.len(),
            "replace"
        );
    }

    fn scroll_into_view(&mut self, span: Span) {
        self.last_scroll = Some(span);
    }

    fn undo(&mut self) {
        if let Some(snap) = self.undo_stack.pop() {
            let current = self.snapshot();
            self.redo_stack.push(current);
            self.restore(snap);
        }
    }

    fn redo(&mut self) {
        if let Some(snap) = self.redo_stack.pop() {
            let current = self.snapshot();
            self.undo_stack.push(current);
            self.restore(snap);
        }
    }
}
