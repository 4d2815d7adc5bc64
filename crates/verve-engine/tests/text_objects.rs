//! Operator + text-object composition (`ciw`, `di"`, `da(`, `dip`, `dil`).

mod common;

use common::{feed, fixture};
use pretty_assertions::assert_eq;
use verve_engine::{Mode, TextBuffer};

#[test]
fn ciw_changes_exactly_the_word() {
    let (mut engine, mut buf) = fixture("say hello world");
    buf.set_cursor(6); // inside "hello"
    feed(&mut engine, &mut buf, "ciw");
    assert_eq!(buf.content(), "say  world", "surrounding spaces survive");
    assert_eq!(engine.register().text(), "hello");
    assert_eq!(engine.mode(), Mode::Insert);
}

#[test]
fn diw_deletes_word_stays_normal() {
    let (mut engine, mut buf) = fixture("say hello world");
    buf.set_cursor(4);
    feed(&mut engine, &mut buf, "diw");
    assert_eq!(buf.content(), "say  world");
    assert_eq!(engine.mode(), Mode::Normal);
}

#[test]
fn daw_takes_trailing_whitespace() {
    let (mut engine, mut buf) = fixture("say hello world");
    buf.set_cursor(6);
    feed(&mut engine, &mut buf, "daw");
    assert_eq!(buf.content(), "say world");
}

#[test]
fn di_quote_spans_quoted_text_from_any_position() {
    for cursor in [5, 9, 15] {
        let (mut engine, mut buf) = fixture("say \"quoted text\" now");
        buf.set_cursor(cursor);
        feed(&mut engine, &mut buf, "di\"");
        assert_eq!(buf.content(), "say \"\" now", "cursor at {cursor}");
        assert_eq!(engine.register().text(), "quoted text");
    }
}

#[test]
fn da_quote_includes_delimiters() {
    let (mut engine, mut buf) = fixture("say \"quoted\" now");
    buf.set_cursor(7);
    feed(&mut engine, &mut buf, "da\"");
    assert_eq!(buf.content(), "say  now");
}

#[test]
fn single_quote_objects() {
    let (mut engine, mut buf) = fixture("x 'ab' y");
    buf.set_cursor(4);
    feed(&mut engine, &mut buf, "di'");
    assert_eq!(buf.content(), "x '' y");
    assert_eq!(engine.register().text(), "ab");
}

#[test]
fn unmatched_quote_is_a_noop() {
    let (mut engine, mut buf) = fixture("say \"unterminated");
    buf.set_cursor(7);
    feed(&mut engine, &mut buf, "di\"");
    assert_eq!(buf.content(), "say \"unterminated");
    assert!(engine.register().is_empty(), "register untouched by empty span");
    assert_eq!(engine.mode(), Mode::Normal);
}

#[test]
fn di_paren_respects_nesting() {
    let (mut engine, mut buf) = fixture("f(a(b)c)d");
    buf.set_cursor(6); // on 'c'
    feed(&mut engine, &mut buf, "di(");
    assert_eq!(buf.content(), "f()d");
    assert_eq!(engine.register().text(), "a(b)c");
}

#[test]
fn close_paren_key_selects_same_object() {
    let (mut engine, mut buf) = fixture("f(abc)d");
    buf.set_cursor(3);
    feed(&mut engine, &mut buf, "di)");
    assert_eq!(buf.content(), "f()d");
}

#[test]
fn da_bracket_includes_pair() {
    let (mut engine, mut buf) = fixture("x[y z]w");
    buf.set_cursor(3);
    feed(&mut engine, &mut buf, "da[");
    assert_eq!(buf.content(), "xw");
}

#[test]
fn di_brace() {
    let (mut engine, mut buf) = fixture("a{inner}b");
    buf.set_cursor(4);
    feed(&mut engine, &mut buf, "di{");
    assert_eq!(buf.content(), "a{}b");
}

#[test]
fn unmatched_bracket_is_a_noop() {
    let (mut engine, mut buf) = fixture("plain text");
    buf.set_cursor(3);
    feed(&mut engine, &mut buf, "di{");
    assert_eq!(buf.content(), "plain text");
    assert_eq!(engine.mode(), Mode::Normal);
}

#[test]
fn dip_deletes_paragraph() {
    let (mut engine, mut buf) = fixture("p1 a\np1 b\n\np2\n");
    buf.set_cursor(6);
    feed(&mut engine, &mut buf, "dip");
    assert_eq!(buf.content(), "\np2\n");
    assert_eq!(engine.register().text(), "p1 a\np1 b");
}

#[test]
fn dil_deletes_trimmed_line() {
    let (mut engine, mut buf) = fixture("  padded  \nnext\n");
    buf.set_cursor(4);
    feed(&mut engine, &mut buf, "dil");
    assert_eq!(buf.content(), "    \nnext\n");
    assert_eq!(engine.register().text(), "padded");
}

#[test]
fn yiw_yanks_without_mutation() {
    let (mut engine, mut buf) = fixture("alpha beta");
    buf.set_cursor(7);
    feed(&mut engine, &mut buf, "yiw");
    assert_eq!(buf.content(), "alpha beta");
    assert_eq!(engine.register().text(), "beta");
    assert_eq!(buf.cursor(), 6, "yank repositions to the span start");
}
