//! The dispatcher: one key token in, fully-resolved effect out.
//!
//! `handle_key` is synchronous and re-entrancy free: every token is resolved,
//! including any buffer mutation, before the next one is accepted. The
//! host must not mutate the adapter while a call is in progress; a
//! multi-threaded host serializes key delivery itself.
//!
//! Resolution order per token: Escape routing, Command-mode capture, Insert
//! pass-through, then the shared Normal/Visual/OperatorPending pipeline
//! (count digits → pending-key accumulation → prefix wait → exact lookup →
//! composition).

use verve_events::{token_for, KeyEvent, KeyModifiers};
use verve_keymap::Keymap;
use verve_state::{EngineState, Mode, Pending, Register, COUNT_MAX};
use verve_text::{scan, Span, TextBuffer};

use crate::action::{Action, ActionContext, ActionResult};
use crate::bindings;
use crate::command;
use crate::ex;
use crate::motion;
use crate::operator::{self, Operator};
use crate::text_object;

#[derive(Default)]
struct Hooks {
    save: Option<Box<dyn FnMut()>>,
    quit: Option<Box<dyn FnMut()>>,
    content_change: Option<Box<dyn FnMut()>>,
    escape_in_normal: Option<Box<dyn FnMut()>>,
    mode_change: Option<Box<dyn FnMut(Mode)>>,
}

/// The stateful modal interpreter. One instance per editing session.
pub struct Engine {
    pub(crate) state: EngineState<Operator>,
    keymap: Keymap<Action>,
    hooks: Hooks,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Engine with the default Vim binding set installed.
    pub fn new() -> Self {
        let mut keymap = Keymap::new();
        bindings::install_defaults(&mut keymap);
        Self {
            state: EngineState::new(),
            keymap,
            hooks: Hooks::default(),
        }
    }

    // ---- host customization ---------------------------------------------

    pub fn bind(&mut self, seq: &str, mode: Mode, action: Action) {
        self.keymap.bind(seq, mode, action);
    }

    pub fn bind_in(&mut self, seq: &str, modes: &[Mode], action: Action) {
        self.keymap.bind_in(seq, modes, action);
    }

    pub fn unbind(&mut self, seq: &str, mode: Mode) {
        self.keymap.unbind(seq, mode);
    }

    pub fn on_save(&mut self, f: impl FnMut() + 'static) {
        self.hooks.save = Some(Box::new(f));
    }

    pub fn on_quit(&mut self, f: impl FnMut() + 'static) {
        self.hooks.quit = Some(Box::new(f));
    }

    pub fn on_content_change(&mut self, f: impl FnMut() + 'static) {
        self.hooks.content_change = Some(Box::new(f));
    }

    pub fn on_escape_in_normal_mode(&mut self, f: impl FnMut() + 'static) {
        self.hooks.escape_in_normal = Some(Box::new(f));
    }

    pub fn on_mode_change(&mut self, f: impl FnMut(Mode) + 'static) {
        self.hooks.mode_change = Some(Box::new(f));
    }

    // ---- host rendering accessors ---------------------------------------

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    /// Transient status-bar message, if any.
    pub fn status_message(&self) -> Option<&str> {
        self.state.status.as_deref()
    }

    /// Raw command-line buffer including its sigil (empty when closed).
    pub fn command_line(&self) -> &str {
        self.state.command_line.buffer()
    }

    pub fn register(&self) -> &Register {
        &self.state.register
    }

    pub fn last_search(&self) -> &str {
        &self.state.last_search
    }

    // ---- key handling ----------------------------------------------------

    /// Translate a raw key event and dispatch it.
    pub fn handle_event(&mut self, buf: &mut dyn TextBuffer, event: &KeyEvent) -> bool {
        match token_for(event) {
            Some(token) => self.handle_key(buf, &token, event.mods),
            None => false,
        }
    }

    /// Consume one key token. Returns whether the engine handled it; `false`
    /// tells the host to let the key fall through to ordinary text insertion
    /// (relevant in Insert mode).
    pub fn handle_key(&mut self, buf: &mut dyn TextBuffer, token: &str, _mods: KeyModifiers) -> bool {
        tracing::trace!(target: "engine.dispatch", token, mode = %self.state.mode, "key");
        if token == "<Esc>" {
            return self.handle_escape(buf);
        }
        if self.state.mode == Mode::Command {
            return self.handle_command_key(buf, token);
        }
        if self.state.mode == Mode::Insert {
            // Insertion is the host's job; the engine only intercepts Escape.
            return false;
        }

        // Count digits accumulate only while no multi-key sequence is in
        // flight; a bare '0' is the line-start motion, not a count.
        if self.state.pending_keys.is_empty() && token.len() == 1 {
            let c = token.chars().next().expect("single-byte token");
            if c.is_ascii_digit() && (c != '0' || !self.state.count.is_empty()) {
                self.state.count.push(c);
                return true;
            }
        }

        self.state.pending_keys.push_str(token);
        let effective = if self.state.pending_operator.is_some() {
            Mode::OperatorPending
        } else {
            self.state.mode
        };

        if self.keymap.has_prefix(&self.state.pending_keys, effective) {
            // Some longer binding could still match; wait for more keys.
            return true;
        }

        let Some(action) = self
            .keymap
            .lookup(&self.state.pending_keys, effective)
            .copied()
        else {
            tracing::debug!(
                target: "engine.dispatch",
                seq = %self.state.pending_keys,
                mode = %effective,
                "unbound_sequence"
            );
            self.state.pending_keys.clear();
            self.state.count.clear();
            return false;
        };

        self.state.pending_keys.clear();
        let ctx = ActionContext::new(self.state.count.take());
        self.execute(action, ctx, buf);
        true
    }

    // ---- escape & command-line routing -----------------------------------

    fn handle_escape(&mut self, buf: &mut dyn TextBuffer) -> bool {
        match self.state.mode {
            Mode::Normal => {
                // Already home: drop any partially-entered input, then let
                // the host interpret this as "leave the modal-editing
                // surface". The buffer is never touched.
                self.state.clear_pending();
                self.state.status = None;
                if let Some(f) = self.hooks.escape_in_normal.as_mut() {
                    f();
                }
                true
            }
            Mode::Insert => {
                let text = buf.text().into_owned();
                let pos = buf.cursor();
                if pos > 0 {
                    buf.set_cursor(scan::prev_grapheme(&text, pos));
                }
                self.state.status = None;
                self.set_mode(Mode::Normal);
                true
            }
            _ => {
                if self.state.mode.is_visual() {
                    let span = buf.selection();
                    buf.set_cursor(span.start);
                }
                self.state.clear_pending();
                self.state.command_line.clear();
                self.state.status = None;
                self.set_mode(Mode::Normal);
                true
            }
        }
    }

    fn handle_command_key(&mut self, buf: &mut dyn TextBuffer, token: &str) -> bool {
        match token {
            "<CR>" => ex::execute(self, buf),
            "<BS>" => {
                if !self.state.command_line.backspace() {
                    self.set_mode(Mode::Normal);
                }
            }
            _ => self.state.command_line.push_str(token),
        }
        true
    }

    // ---- execution & composition -----------------------------------------

    fn execute(&mut self, action: Action, ctx: ActionContext, buf: &mut dyn TextBuffer) {
        let cursor = if self.state.mode.is_visual() {
            self.state.visual_cursor
        } else {
            buf.cursor()
        };

        if let Some(pending) = self.state.pending_operator.take() {
            self.compose(pending, action, ctx, cursor, buf);
            return;
        }

        match action {
            Action::Motion(m) => {
                let resolved = motion::resolve(m, buf, cursor, &ctx);
                if self.state.mode.is_visual() {
                    self.state.visual_cursor = resolved.caret;
                } else {
                    buf.set_cursor(resolved.caret);
                }
                buf.scroll_into_view(Span::caret(resolved.caret));
                self.finish(ActionResult::Handled, buf);
            }
            // A text object outside operator composition defines a region
            // but never repositions the cursor.
            Action::Object(_) => self.finish(ActionResult::Handled, buf),
            Action::Operator(op) => {
                self.state.pending_operator = Some(Pending { op, count: ctx.count });
                self.set_mode(Mode::OperatorPending);
            }
            Action::Command(cmd) => {
                let result = command::run(cmd, self, buf, &ctx);
                self.finish(result, buf);
            }
        }
    }

    fn compose(
        &mut self,
        pending: Pending<Operator>,
        action: Action,
        ctx: ActionContext,
        cursor: usize,
        buf: &mut dyn TextBuffer,
    ) {
        match action {
            Action::Motion(m) => {
                let total = pending.count.saturating_mul(ctx.count).min(COUNT_MAX);
                let mctx = ActionContext {
                    count: total,
                    explicit_count: ctx.explicit_count,
                };
                let resolved = motion::resolve(m, buf, cursor, &mctx);
                self.apply_operator(pending.op, resolved.span, false, buf);
            }
            Action::Object(obj) => {
                let text = buf.text().into_owned();
                let span = text_object::resolve(obj, &text, cursor);
                self.apply_operator(pending.op, span, false, buf);
            }
            Action::Operator(op) if op == pending.op => {
                // Doubled operator key: linewise shortcut.
                let total = pending.count.saturating_mul(ctx.count).min(COUNT_MAX);
                let text = buf.text().into_owned();
                let span = operator::linewise_span(&text, cursor, total);
                self.apply_operator(pending.op, span, true, buf);
            }
            Action::Operator(op) => {
                // A different operator replaces the pending one; it never
                // auto-fires.
                self.state.pending_operator = Some(Pending { op, count: ctx.count });
                self.set_mode(Mode::OperatorPending);
            }
            Action::Command(cmd) => {
                // Composition abandoned; the command runs on its own.
                let result = command::run(cmd, self, buf, &ctx);
                self.finish(result, buf);
            }
        }
    }

    fn apply_operator(&mut self, op: Operator, span: Span, linewise: bool, buf: &mut dyn TextBuffer) {
        let (result, mutated) = operator::apply(op, span, linewise, &mut self.state, buf);
        if mutated {
            self.notify_content_change();
        }
        self.finish(result, buf);
    }

    fn finish(&mut self, result: ActionResult, buf: &mut dyn TextBuffer) {
        match result {
            ActionResult::Handled => {}
            ActionResult::SwitchMode(mode) => self.set_mode(mode),
            ActionResult::OperatorPending(op) => {
                self.state.pending_operator = Some(Pending { op, count: 1 });
                self.set_mode(Mode::OperatorPending);
            }
        }
        // An operator always resolves or cancels back out of OperatorPending.
        if self.state.mode == Mode::OperatorPending && self.state.pending_operator.is_none() {
            self.set_mode(Mode::Normal);
        }
        if self.state.mode.is_visual() {
            self.update_visual_selection(buf);
        }
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        if self.state.mode == mode {
            return;
        }
        tracing::debug!(target: "engine.dispatch", from = %self.state.mode, to = %mode, "mode_change");
        self.state.mode = mode;
        if mode == Mode::Normal {
            self.state.pending_operator = None;
        }
        if let Some(f) = self.hooks.mode_change.as_mut() {
            f(mode);
        }
    }

    fn update_visual_selection(&mut self, buf: &mut dyn TextBuffer) {
        let text = buf.text().into_owned();
        let anchor = self.state.visual_anchor;
        let cursor = self.state.visual_cursor;
        let span = match self.state.mode {
            Mode::Visual => {
                let mut span = Span::between(anchor, cursor);
                if span.is_empty() {
                    // Always cover at least the character under the cursor.
                    let end = scan::next_grapheme(&text, span.start);
                    span = Span::between(span.start, end);
                }
                span
            }
            Mode::VisualLine => {
                let start = scan::line_start(&text, anchor.min(cursor));
                let mut end = scan::line_end(&text, anchor.max(cursor));
                if end < text.len() {
                    end += 1; // include the line terminator
                }
                Span::between(start, end)
            }
            _ => return,
        };
        buf.set_selection(span);
    }

    // ---- host effect notifications ---------------------------------------

    pub(crate) fn notify_content_change(&mut self) {
        if let Some(f) = self.hooks.content_change.as_mut() {
            f();
        }
    }

    pub(crate) fn notify_save(&mut self) {
        if let Some(f) = self.hooks.save.as_mut() {
            f();
        }
    }

    pub(crate) fn notify_quit(&mut self) {
        if let Some(f) = self.hooks.quit.as_mut() {
            f();
        }
    }
}
