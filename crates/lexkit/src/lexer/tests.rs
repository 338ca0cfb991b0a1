use std::borrow::Cow;

use pretty_assertions::assert_eq;

use super::*;
use crate::cursor::{is_eof, is_invalid};

const DOT: TokenKind = TokenKind(0);
const INT: TokenKind = TokenKind(1);
const WORD: TokenKind = TokenKind(2);
const KW: TokenKind = TokenKind(3);
const LPAREN: TokenKind = TokenKind(4);
const LETTER: TokenKind = TokenKind(7);

/// Single-rune machine: accepts exactly one `.` and stops.
fn dot<'s>(lex: &mut Lexer<'s>) -> Option<StateFn<'s>> {
    let (c, width) = lex.advance();
    if is_eof(c, width) {
        return lex.errorf("unexpected end-of-input");
    }
    if is_invalid(c, width) {
        return lex.errorf("invalid utf-8 rune");
    }
    if c == '.' {
        lex.emit(DOT);
        return None;
    }
    lex.errorf(format!("unexpected rune {c:?}"))
}

// === Emit and terminate ===

#[test]
fn single_rune_scan_emits_then_ends() {
    let mut lex = Lexer::new(StateFn(dot), b".");
    assert_eq!(
        lex.next_token(),
        Token {
            kind: DOT,
            pos: 0,
            text: Cow::Borrowed("."),
        }
    );
    assert_eq!(lex.next_token().kind, TokenKind::EOF);
}

#[test]
fn empty_input_surfaces_the_state_functions_error() {
    // EOF detection is the state function's job; this one reports it.
    let mut lex = Lexer::new(StateFn(dot), b"");
    assert_eq!(
        lex.next_token(),
        Token {
            kind: TokenKind::ERROR,
            pos: 0,
            text: Cow::Borrowed("unexpected end-of-input"),
        }
    );
    assert_eq!(lex.next_token().kind, TokenKind::EOF);
}

#[test]
fn malformed_input_surfaces_the_state_functions_error() {
    let mut lex = Lexer::new(StateFn(dot), b"\xFF");
    let token = lex.next_token();
    assert_eq!(token.kind, TokenKind::ERROR);
    assert_eq!(token.text, "invalid utf-8 rune");
    assert_eq!(lex.next_token().kind, TokenKind::EOF);
}

#[test]
fn unexpected_rune_surfaces_the_state_functions_error() {
    let mut lex = Lexer::new(StateFn(dot), b"x");
    let token = lex.next_token();
    assert_eq!(token.kind, TokenKind::ERROR);
    assert_eq!(token.text, "unexpected rune 'x'");
}

// === FIFO ordering ===

/// Emits one token per rune, all within a single state invocation.
fn burst<'s>(lex: &mut Lexer<'s>) -> Option<StateFn<'s>> {
    while lex.accept_by(char::is_alphanumeric) {
        lex.emit(LETTER);
    }
    None
}

#[test]
fn tokens_are_delivered_oldest_first() {
    let mut lex = Lexer::new(StateFn(burst), b"abc");
    let expected = [("a", 0), ("b", 1), ("c", 2)];
    for (text, pos) in expected {
        let token = lex.next_token();
        assert_eq!(token.kind, LETTER);
        assert_eq!(token.text, text);
        assert_eq!(token.pos, pos);
    }
    assert_eq!(lex.next_token().kind, TokenKind::EOF);
}

// === Terminal behavior ===

#[test]
fn eof_token_repeats_at_a_stable_position() {
    let mut lex = Lexer::new(StateFn(dot), b".");
    lex.next_token();
    let first = lex.next_token();
    assert_eq!(first.kind, TokenKind::EOF);
    assert_eq!(first.text, "");
    for _ in 0..3 {
        let again = lex.next_token();
        assert_eq!(again.kind, TokenKind::EOF);
        assert_eq!(again.pos, first.pos);
    }
}

// === Multi-state machines ===

/// Dispatch state of a toy word/number lexer.
fn item<'s>(lex: &mut Lexer<'s>) -> Option<StateFn<'s>> {
    let (c, width) = lex.peek();
    if is_eof(c, width) {
        return None;
    }
    if c.is_ascii_digit() {
        return Some(StateFn(number));
    }
    if c.is_alphabetic() {
        return Some(StateFn(word));
    }
    if c == ' ' {
        lex.advance();
        lex.ignore();
        return Some(StateFn(item));
    }
    lex.errorf(format!("unexpected rune {c:?}"))
}

fn number<'s>(lex: &mut Lexer<'s>) -> Option<StateFn<'s>> {
    lex.accept_run("0123456789");
    lex.emit(INT);
    Some(StateFn(item))
}

fn word<'s>(lex: &mut Lexer<'s>) -> Option<StateFn<'s>> {
    lex.accept_run_by(char::is_alphabetic);
    lex.emit(WORD);
    Some(StateFn(item))
}

#[test]
fn states_hand_off_through_return_values() {
    let mut lex = Lexer::new(StateFn(item), b"abc 123 def");
    let expected = [(WORD, "abc", 0), (INT, "123", 4), (WORD, "def", 8)];
    for (kind, text, pos) in expected {
        let token = lex.next_token();
        assert_eq!(token.kind, kind);
        assert_eq!(token.text, text);
        assert_eq!(token.pos, pos);
    }
    assert_eq!(lex.next_token().kind, TokenKind::EOF);
}

#[test]
fn error_token_is_positioned_at_the_lexeme_start() {
    let mut lex = Lexer::new(StateFn(item), b"ab!");
    assert_eq!(lex.next_token().kind, WORD);
    let token = lex.next_token();
    assert_eq!(token.kind, TokenKind::ERROR);
    assert_eq!(token.pos, 2);
    assert_eq!(token.text, "unexpected rune '!'");
}

// === Soft errors ===

/// Reports non-letters as error tokens but keeps scanning.
fn skip_bad<'s>(lex: &mut Lexer<'s>) -> Option<StateFn<'s>> {
    let (c, width) = lex.advance();
    if is_eof(c, width) {
        return None;
    }
    if c.is_alphabetic() {
        lex.emit(LETTER);
        return Some(StateFn(skip_bad));
    }
    let _ = lex.errorf(format!("skipping {c:?}"));
    lex.ignore();
    Some(StateFn(skip_bad))
}

#[test]
fn a_state_may_continue_past_an_error_token() {
    let mut lex = Lexer::new(StateFn(skip_bad), b"a.b");

    let a = lex.next_token();
    assert_eq!((a.kind, a.pos), (LETTER, 0));

    let err = lex.next_token();
    assert_eq!(err.kind, TokenKind::ERROR);
    assert_eq!(err.text, "skipping '.'");
    assert_eq!(err.pos, 1);

    let b = lex.next_token();
    assert_eq!((b.kind, b.pos), (LETTER, 2));
    assert_eq!(lex.next_token().kind, TokenKind::EOF);
}

// === Literal matching through the driver ===

fn call<'s>(lex: &mut Lexer<'s>) -> Option<StateFn<'s>> {
    if lex.accept_str("func") {
        lex.emit(KW);
    }
    if lex.accept("(") {
        lex.emit(LPAREN);
    }
    None
}

#[test]
fn keyword_then_delimiter_via_accept_str() {
    let mut lex = Lexer::new(StateFn(call), b"func(");
    let kw = lex.next_token();
    assert_eq!((kw.kind, kw.pos), (KW, 0));
    assert_eq!(kw.text, "func");
    let paren = lex.next_token();
    assert_eq!((paren.kind, paren.pos), (LPAREN, 4));
    assert_eq!(paren.text, "(");
    assert_eq!(lex.next_token().kind, TokenKind::EOF);
}
