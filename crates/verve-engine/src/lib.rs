//! Modal command interpreter: Vim-grammar key handling over a host buffer.
//!
//! The engine sits between canonical key tokens and a [`TextBuffer`] adapter
//! owned by the host. It resolves `count` `operator` `motion-or-text-object`
//! sequences against a per-mode [`verve_keymap::Keymap`], applies the
//! resulting mutations through the adapter, and reports mode transitions and
//! host effects (save, quit, content changed) through installed hooks.
//!
//! The action taxonomy is a closed set of four behaviors ([`Motion`],
//! [`TextObject`], [`Operator`], [`Command`]) composed by exhaustive
//! matching in the dispatcher, so the "an operator consumes exactly one
//! range" rule is checked at compile time rather than by runtime type
//! inspection.

mod action;
mod bindings;
mod command;
mod engine;
mod ex;
mod motion;
mod operator;
mod text_object;

pub use action::{Action, ActionContext, ActionResult};
pub use command::Command;
pub use engine::Engine;
pub use motion::Motion;
pub use operator::Operator;
pub use text_object::TextObject;

pub use verve_events::{token_for, KeyCode, KeyEvent, KeyModifiers};
pub use verve_keymap::{split_tokens, Keymap};
pub use verve_state::Mode;
pub use verve_text::{Span, StringBuffer, TextBuffer};
