//! Toolkit for hand-rolling lexers out of composable state functions.
//!
//! A lexer built with this crate is a set of caller-written [`StateFn`]s
//! driven over a shared [`Cursor`] by a [`Lexer`]. Each state function
//! scans runes, emits zero or more [`Token`]s, and returns the next state;
//! the driver queues whatever gets emitted and hands tokens to the caller
//! one at a time, oldest first. The crate defines no grammar of its own —
//! what any rune means is entirely the state functions' business.
//!
//! # The two APIs
//!
//! **The parser API** is the single method a token consumer calls:
//! [`Lexer::next_token`]. It runs the state machine just far enough to
//! produce a token, and keeps returning a [`TokenKind::EOF`] token once
//! the machine has terminated.
//!
//! **The scanner API** is what state functions use: the `accept` family
//! ([`Cursor::accept`], [`Cursor::accept_run`], [`Cursor::accept_by`], ...)
//! advances the cursor when incoming runes belong to a caller-supplied set,
//! [`Cursor::accept_str`] matches known byte sequences such as keywords
//! without per-rune branching, and [`Lexer::emit`] / [`Lexer::errorf`] turn
//! the accumulated lexeme into tokens.
//!
//! # Example
//!
//! ```
//! use lexkit::{is_eof, Lexer, StateFn, TokenKind};
//!
//! const WORD: TokenKind = TokenKind(0);
//!
//! fn word<'s>(lex: &mut Lexer<'s>) -> Option<StateFn<'s>> {
//!     if lex.accept_run_by(char::is_alphabetic) > 0 {
//!         lex.emit(WORD);
//!     }
//!     let (c, width) = lex.advance();
//!     if is_eof(c, width) {
//!         return None;
//!     }
//!     if c.is_whitespace() {
//!         lex.ignore();
//!         return Some(StateFn(word));
//!     }
//!     lex.errorf(format!("unexpected rune {c:?}"))
//! }
//!
//! let mut lex = Lexer::new(StateFn(word), b"alpha beta");
//! assert_eq!(lex.next_token().text, "alpha");
//! assert_eq!(lex.next_token().text, "beta");
//! assert_eq!(lex.next_token().kind, TokenKind::EOF);
//! ```
//!
//! # Errors
//!
//! Scan-time errors are never fatal: a state function reports one by
//! returning `lex.errorf(...)`, which queues a [`TokenKind::ERROR`] token
//! and terminates the machine (or it keeps going with a fresh state, if it
//! prefers recovery). Malformed UTF-8 is surfaced the same way the state
//! function chooses — [`Cursor::advance`] pins itself to the bad offset and
//! keeps returning the [`INVALID_CHAR`] marker until the state function
//! reacts.

mod cursor;
mod lexer;
mod token;

pub use cursor::{is_eof, is_invalid, Cursor, EOF_CHAR, INVALID_CHAR};
pub use lexer::{Lexer, StateFn};
pub use token::{ScanError, Token, TokenKind};
