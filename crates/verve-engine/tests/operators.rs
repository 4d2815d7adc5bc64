//! Operator composition: `d`/`y`/`c` with motions, doubled linewise forms,
//! the self-contained `D`/`C`, and register/paste interaction.

mod common;

use common::{feed, fixture, line_count};
use pretty_assertions::assert_eq;
use std::cell::Cell;
use std::rc::Rc;
use verve_engine::{Mode, TextBuffer};

#[test]
fn dw_deletes_into_register() {
    let (mut engine, mut buf) = fixture("one two three\n");
    feed(&mut engine, &mut buf, "dw");
    assert_eq!(buf.content(), "two three\n");
    assert_eq!(engine.register().text(), "one ");
    assert_eq!(engine.mode(), Mode::Normal);
}

#[test]
fn d_dollar_deletes_to_line_end() {
    let (mut engine, mut buf) = fixture("alpha beta\nsecond\n");
    buf.set_cursor(6);
    feed(&mut engine, &mut buf, "d$");
    assert_eq!(buf.content(), "alpha \nsecond\n");
    assert_eq!(engine.register().text(), "beta");
}

#[test]
fn dd_removes_current_line_linewise() {
    let (mut engine, mut buf) = fixture("l1\nl2\nl3\n");
    feed(&mut engine, &mut buf, "dd");
    assert_eq!(buf.content(), "l2\nl3\n");
    assert_eq!(engine.register().text(), "l1\n");
    assert!(engine.register().linewise());
    assert_eq!(engine.status_message(), Some("1 line(s) deleted"));
}

#[test]
fn counted_dd_deletes_exactly_count_lines() {
    let (mut engine, mut buf) = fixture("a\nb\nc\nd\ne\n");
    let before = line_count(buf.content());
    feed(&mut engine, &mut buf, "3dd");
    assert_eq!(buf.content(), "d\ne\n");
    assert_eq!(line_count(buf.content()), before - 3);
    assert_eq!(engine.register().text(), "a\nb\nc\n");
    // The count buffer must be spent: a following dd takes one line only.
    feed(&mut engine, &mut buf, "dd");
    assert_eq!(buf.content(), "e\n");
}

#[test]
fn dd_clamps_to_remaining_lines() {
    let (mut engine, mut buf) = fixture("x\ny\n");
    feed(&mut engine, &mut buf, "9dd");
    assert_eq!(buf.content(), "");
}

#[test]
fn post_operator_count_d2w() {
    let (mut engine, mut buf) = fixture("w1 w2 w3 w4\n");
    feed(&mut engine, &mut buf, "d2w");
    assert_eq!(buf.content(), "w3 w4\n");
}

#[test]
fn multiplicative_counts_2d3w() {
    let (mut engine, mut buf) = fixture("a1 a2 a3 a4 a5 a6 a7\n");
    feed(&mut engine, &mut buf, "2d3w");
    assert_eq!(buf.content(), "a7\n");
}

#[test]
fn d2d_doubled_operator_with_post_count() {
    let (mut engine, mut buf) = fixture("a\nb\nc\nd\n");
    feed(&mut engine, &mut buf, "d2d");
    assert_eq!(buf.content(), "c\nd\n");
}

#[test]
fn yy_then_p_duplicates_line() {
    let (mut engine, mut buf) = fixture("l1\nl2\n");
    let before_len = buf.content().len();
    feed(&mut engine, &mut buf, "yy");
    assert_eq!(engine.register().text(), "l1\n");
    assert_eq!(engine.status_message(), Some("1 line(s) yanked"));
    feed(&mut engine, &mut buf, "p");
    assert_eq!(buf.content(), "l1\nl1\nl2\n");
    assert_eq!(buf.content().len(), before_len + 3);
    assert_eq!(line_count(buf.content()), 3);
}

#[test]
fn dd_then_p_reinserts_after_current_line() {
    let (mut engine, mut buf) = fixture("l1\nl2\n");
    feed(&mut engine, &mut buf, "dd");
    assert_eq!(buf.content(), "l2\n");
    feed(&mut engine, &mut buf, "p");
    assert_eq!(buf.content(), "l2\nl1\n");
}

#[test]
fn linewise_paste_before_with_capital_p() {
    let (mut engine, mut buf) = fixture("l1\nl2\n");
    feed(&mut engine, &mut buf, "yy");
    feed(&mut engine, &mut buf, "j");
    feed(&mut engine, &mut buf, "P");
    assert_eq!(buf.content(), "l1\nl1\nl2\n");
}

#[test]
fn yw_leaves_buffer_and_repositions_cursor() {
    let (mut engine, mut buf) = fixture("one two three\n");
    buf.set_cursor(4);
    feed(&mut engine, &mut buf, "yw");
    assert_eq!(buf.content(), "one two three\n");
    assert_eq!(engine.register().text(), "two ");
    assert_eq!(buf.cursor(), 4);
    assert_eq!(engine.status_message(), Some("yanked"));
}

#[test]
fn cw_changes_word_and_enters_insert() {
    let (mut engine, mut buf) = fixture("one two three\n");
    feed(&mut engine, &mut buf, "cw");
    assert_eq!(buf.content(), "two three\n");
    assert_eq!(engine.register().text(), "one ");
    assert_eq!(engine.mode(), Mode::Insert);
}

#[test]
fn change_on_empty_range_still_enters_insert() {
    let (mut engine, mut buf) = fixture("abc");
    buf.set_cursor(3);
    feed(&mut engine, &mut buf, "cl");
    assert_eq!(buf.content(), "abc", "no mutation at buffer end");
    assert_eq!(engine.mode(), Mode::Insert, "c still lets the user type");
    assert!(engine.register().is_empty(), "register untouched");
}

#[test]
fn cc_changes_whole_line() {
    let (mut engine, mut buf) = fixture("first\nsecond\n");
    feed(&mut engine, &mut buf, "cc");
    assert_eq!(buf.content(), "second\n");
    assert_eq!(engine.register().text(), "first\n");
    assert_eq!(engine.mode(), Mode::Insert);
}

#[test]
fn capital_d_deletes_to_eol_without_motion() {
    let (mut engine, mut buf) = fixture("alpha beta\nnext\n");
    buf.set_cursor(2);
    feed(&mut engine, &mut buf, "D");
    assert_eq!(buf.content(), "al\nnext\n");
    assert_eq!(engine.register().text(), "pha beta");
    assert_eq!(engine.mode(), Mode::Normal);
}

#[test]
fn capital_c_changes_to_eol() {
    let (mut engine, mut buf) = fixture("alpha beta\nnext\n");
    buf.set_cursor(2);
    feed(&mut engine, &mut buf, "C");
    assert_eq!(buf.content(), "al\nnext\n");
    assert_eq!(engine.mode(), Mode::Insert);
}

#[test]
fn x_deletes_count_characters() {
    let (mut engine, mut buf) = fixture("abcdef");
    feed(&mut engine, &mut buf, "3x");
    assert_eq!(buf.content(), "def");
    assert_eq!(engine.register().text(), "abc");
}

#[test]
fn x_clamps_at_buffer_end() {
    let (mut engine, mut buf) = fixture("ab");
    feed(&mut engine, &mut buf, "9x");
    assert_eq!(buf.content(), "");
    assert_eq!(engine.register().text(), "ab");
}

#[test]
fn substitute_deletes_char_and_enters_insert() {
    let (mut engine, mut buf) = fixture("abc");
    feed(&mut engine, &mut buf, "s");
    assert_eq!(buf.content(), "bc");
    assert_eq!(engine.register().text(), "a");
    assert_eq!(engine.mode(), Mode::Insert);
}

#[test]
fn substitute_line_is_linewise_change() {
    let (mut engine, mut buf) = fixture("  hello\nworld\n");
    feed(&mut engine, &mut buf, "S");
    assert_eq!(buf.content(), "world\n");
    assert_eq!(engine.mode(), Mode::Insert);
}

#[test]
fn join_replaces_terminator_with_space() {
    let (mut engine, mut buf) = fixture("one\ntwo");
    feed(&mut engine, &mut buf, "J");
    assert_eq!(buf.content(), "one two");
    // Last line: nothing to join.
    feed(&mut engine, &mut buf, "J");
    assert_eq!(buf.content(), "one two");
}

#[test]
fn undo_redo_delegate_to_adapter() {
    let (mut engine, mut buf) = fixture("l1\nl2\n");
    feed(&mut engine, &mut buf, "dd");
    assert_eq!(buf.content(), "l2\n");
    feed(&mut engine, &mut buf, "u");
    assert_eq!(buf.content(), "l1\nl2\n");
    feed(&mut engine, &mut buf, "ctrl-r");
    assert_eq!(buf.content(), "l2\n");
}

#[test]
fn content_change_fires_on_mutation_not_on_yank() {
    let (mut engine, mut buf) = fixture("one two\n");
    let changes = Rc::new(Cell::new(0u32));
    let changes2 = changes.clone();
    engine.on_content_change(move || changes2.set(changes2.get() + 1));
    feed(&mut engine, &mut buf, "yw");
    assert_eq!(changes.get(), 0, "yank does not mutate");
    feed(&mut engine, &mut buf, "dw");
    assert_eq!(changes.get(), 1);
    feed(&mut engine, &mut buf, "u");
    assert_eq!(changes.get(), 2, "undo re-synchronizes the host");
}

#[test]
fn charwise_paste_inserts_after_cursor() {
    let (mut engine, mut buf) = fixture("abc");
    feed(&mut engine, &mut buf, "x");
    assert_eq!(buf.content(), "bc");
    feed(&mut engine, &mut buf, "p");
    assert_eq!(buf.content(), "bac");
}

#[test]
fn paste_with_empty_register_is_a_noop() {
    let (mut engine, mut buf) = fixture("abc");
    feed(&mut engine, &mut buf, "p");
    assert_eq!(buf.content(), "abc");
}

#[test]
fn linewise_paste_at_unterminated_last_line() {
    let (mut engine, mut buf) = fixture("l1\nl2");
    feed(&mut engine, &mut buf, "yy");
    feed(&mut engine, &mut buf, "j");
    feed(&mut engine, &mut buf, "p");
    assert_eq!(buf.content(), "l1\nl2\nl1");
}
