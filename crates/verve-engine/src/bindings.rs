//! Default binding table.
//!
//! Installed once at engine construction; hosts may layer their own
//! `bind`/`unbind` calls on top (later bindings win). Motions are shared
//! across Normal, the visual modes, and OperatorPending; operators are bound
//! in Normal and OperatorPending so a doubled key (`dd`) resolves through
//! the same lookup path as any other operator target.

use verve_keymap::Keymap;
use verve_state::Mode;

use crate::action::Action;
use crate::command::Command;
use crate::motion::Motion;
use crate::operator::Operator;
use crate::text_object::TextObject;

const MOTION_MODES: [Mode; 4] = [
    Mode::Normal,
    Mode::Visual,
    Mode::VisualLine,
    Mode::OperatorPending,
];
const OPERATOR_MODES: [Mode; 2] = [Mode::Normal, Mode::OperatorPending];
const VISUAL_MODES: [Mode; 2] = [Mode::Visual, Mode::VisualLine];

pub(crate) fn install_defaults(map: &mut Keymap<Action>) {
    use Mode::Normal;

    // Mode switching
    map.bind("i", Normal, Action::Command(Command::EnterInsert));
    map.bind("I", Normal, Action::Command(Command::InsertFirstNonBlank));
    map.bind("a", Normal, Action::Command(Command::Append));
    map.bind("A", Normal, Action::Command(Command::AppendLineEnd));
    map.bind("o", Normal, Action::Command(Command::OpenBelow));
    map.bind("O", Normal, Action::Command(Command::OpenAbove));
    map.bind("v", Normal, Action::Command(Command::EnterVisual));
    map.bind("V", Normal, Action::Command(Command::EnterVisualLine));
    map.bind(":", Normal, Action::Command(Command::EnterCommandLine(':')));

    // Motions
    map.bind_in("h", &MOTION_MODES, Action::Motion(Motion::Left));
    map.bind_in("j", &MOTION_MODES, Action::Motion(Motion::Down));
    map.bind_in("k", &MOTION_MODES, Action::Motion(Motion::Up));
    map.bind_in("l", &MOTION_MODES, Action::Motion(Motion::Right));
    map.bind_in("<Left>", &MOTION_MODES, Action::Motion(Motion::Left));
    map.bind_in("<Down>", &MOTION_MODES, Action::Motion(Motion::Down));
    map.bind_in("<Up>", &MOTION_MODES, Action::Motion(Motion::Up));
    map.bind_in("<Right>", &MOTION_MODES, Action::Motion(Motion::Right));
    map.bind_in("w", &MOTION_MODES, Action::Motion(Motion::WordForward));
    map.bind_in("b", &MOTION_MODES, Action::Motion(Motion::WordBackward));
    map.bind_in("e", &MOTION_MODES, Action::Motion(Motion::WordEnd));
    map.bind_in("0", &MOTION_MODES, Action::Motion(Motion::LineStart));
    map.bind_in("$", &MOTION_MODES, Action::Motion(Motion::LineEnd));
    map.bind_in("^", &MOTION_MODES, Action::Motion(Motion::FirstNonBlank));
    map.bind_in("gg", &MOTION_MODES, Action::Motion(Motion::DocumentStart));
    map.bind_in("G", &MOTION_MODES, Action::Motion(Motion::DocumentEnd));

    // Scroll
    map.bind("ctrl-d", Normal, Action::Motion(Motion::HalfPageDown));
    map.bind("ctrl-u", Normal, Action::Motion(Motion::HalfPageUp));
    map.bind("ctrl-f", Normal, Action::Motion(Motion::PageDown));
    map.bind("ctrl-b", Normal, Action::Motion(Motion::PageUp));

    // Operators
    map.bind_in("d", &OPERATOR_MODES, Action::Operator(Operator::Delete));
    map.bind_in("y", &OPERATOR_MODES, Action::Operator(Operator::Yank));
    map.bind_in("c", &OPERATOR_MODES, Action::Operator(Operator::Change));
    map.bind("D", Normal, Action::Command(Command::DeleteToLineEnd));
    map.bind("C", Normal, Action::Command(Command::ChangeToLineEnd));

    // Simple edits
    map.bind("x", Normal, Action::Command(Command::DeleteChar));
    map.bind("s", Normal, Action::Command(Command::Substitute));
    map.bind("S", Normal, Action::Command(Command::SubstituteLine));
    map.bind("p", Normal, Action::Command(Command::PasteAfter));
    map.bind("P", Normal, Action::Command(Command::PasteBefore));
    map.bind("J", Normal, Action::Command(Command::JoinLines));
    map.bind("r", Normal, Action::Command(Command::ReplaceChar));

    // Undo/Redo
    map.bind("u", Normal, Action::Command(Command::Undo));
    map.bind("ctrl-r", Normal, Action::Command(Command::Redo));

    // Search
    map.bind("/", Normal, Action::Command(Command::EnterCommandLine('/')));
    map.bind("?", Normal, Action::Command(Command::EnterCommandLine('?')));
    map.bind("n", Normal, Action::Command(Command::SearchNext));
    map.bind("N", Normal, Action::Command(Command::SearchPrev));

    // Text objects (operator-pending only)
    let pending = [Mode::OperatorPending];
    map.bind_in("iw", &pending, Action::Object(TextObject::Word { around: false }));
    map.bind_in("aw", &pending, Action::Object(TextObject::Word { around: true }));
    for quote in ['"', '\''] {
        map.bind_in(
            &format!("i{quote}"),
            &pending,
            Action::Object(TextObject::Quote { quote, around: false }),
        );
        map.bind_in(
            &format!("a{quote}"),
            &pending,
            Action::Object(TextObject::Quote { quote, around: true }),
        );
    }
    for (open, close) in [('(', ')'), ('[', ']'), ('{', '}')] {
        // Parens answer to both the open and close key; the others to open.
        let keys: &[char] = if open == '(' { &['(', ')'] } else { &[open] };
        for &key in keys {
            map.bind_in(
                &format!("i{key}"),
                &pending,
                Action::Object(TextObject::Bracket { open, close, around: false }),
            );
            map.bind_in(
                &format!("a{key}"),
                &pending,
                Action::Object(TextObject::Bracket { open, close, around: true }),
            );
        }
    }
    map.bind_in("ip", &pending, Action::Object(TextObject::Paragraph));
    map.bind_in("il", &pending, Action::Object(TextObject::Line));

    // Visual mode operators
    map.bind_in("d", &VISUAL_MODES, Action::Command(Command::VisualDelete));
    map.bind_in("x", &VISUAL_MODES, Action::Command(Command::VisualDelete));
    map.bind_in("y", &VISUAL_MODES, Action::Command(Command::VisualYank));
    map.bind_in("c", &VISUAL_MODES, Action::Command(Command::VisualChange));
}
