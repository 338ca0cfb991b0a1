//! State-machine driver that turns state functions into a token stream.
//!
//! The driver owns the [`Cursor`] and a FIFO queue of produced tokens. It
//! knows nothing about any particular grammar: the set of states is open,
//! defined entirely by the caller as functions that scan runes, emit
//! tokens, and hand back the next state. The driver only distinguishes
//! "has a state to run" from "terminal".
//!
//! # Concurrency
//!
//! Single-threaded and non-reentrant. A scan is a strictly sequential
//! series of [`next_token()`](Lexer::next_token) calls, and a state
//! function must not call `next_token` on the driver it was handed.

use std::borrow::Cow;
use std::collections::VecDeque;
use std::ops::{Deref, DerefMut};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// A unit of scanning logic: one state of the caller's state machine.
///
/// Each state function reads runes through the driver, emits zero or more
/// tokens, and returns the next state — or `None`, the terminal sentinel
/// meaning no further tokens will ever be produced. States are plain
/// function pointers, so transitions allocate nothing.
#[derive(Clone, Copy, Debug)]
pub struct StateFn<'s>(pub fn(&mut Lexer<'s>) -> Option<StateFn<'s>>);

/// Driver for a caller-defined scanning state machine.
///
/// Constructed from an initial [`StateFn`] and the full input; tokens are
/// pulled out one at a time with [`next_token()`](Self::next_token). The
/// driver derefs to its [`Cursor`], so state functions call the scanner
/// API (`advance`, `accept`, `ignore`, ...) directly on the `Lexer` they
/// receive.
pub struct Lexer<'s> {
    cursor: Cursor<'s>,
    /// Current state; `None` once the machine has terminated.
    state: Option<StateFn<'s>>,
    /// Tokens emitted but not yet delivered, oldest first.
    tokens: VecDeque<Token<'s>>,
}

impl<'s> Lexer<'s> {
    /// Create a lexer over `input`, starting in `start`.
    ///
    /// The start state is taken by value: a driver without an initial state
    /// is unrepresentable, so the classic construction-time misuse needs no
    /// runtime check.
    ///
    /// # Panics
    ///
    /// Panics if `input` is longer than `u32::MAX` bytes (see
    /// [`Cursor::new`]).
    pub fn new(start: StateFn<'s>, input: &'s [u8]) -> Self {
        Self {
            cursor: Cursor::new(input),
            state: Some(start),
            tokens: VecDeque::new(),
        }
    }

    /// Emit the current lexeme as a token of the given kind.
    ///
    /// Queues `input[start..pos]` with the lexeme's starting offset, then
    /// starts a fresh lexeme at `pos`.
    pub fn emit(&mut self, kind: TokenKind) {
        let token = Token {
            kind,
            pos: self.cursor.start(),
            text: self.cursor.current(),
        };
        self.cursor.ignore();
        self.tokens.push_back(token);
    }

    /// Queue an [`ERROR`](TokenKind::ERROR) token and return the terminal
    /// sentinel.
    ///
    /// The token carries `message` as its text and the current lexeme start
    /// as its position. Returning the result directly —
    /// `return lex.errorf(...)` — reports the error and halts the machine
    /// in one expression. A state function that wants to continue after a
    /// soft error can discard the return value and hand back a live state
    /// instead; error tokens are ordinary queue entries.
    pub fn errorf(&mut self, message: impl Into<String>) -> Option<StateFn<'s>> {
        self.tokens.push_back(Token {
            kind: TokenKind::ERROR,
            pos: self.cursor.start(),
            text: Cow::Owned(message.into()),
        });
        None
    }

    /// Retrieve the next token; the sole entry point for a parser.
    ///
    /// Delivers queued tokens strictly oldest-first. When the queue is
    /// empty, runs state functions one at a time until one of them emits
    /// or the machine terminates. Once terminal, every call returns an
    /// [`EOF`](TokenKind::EOF) token at the final lexeme start, forever.
    ///
    /// A state machine in which some path neither emits nor terminates
    /// will keep this loop spinning; guaranteeing progress is the state
    /// functions' obligation, not the driver's.
    pub fn next_token(&mut self) -> Token<'s> {
        loop {
            if let Some(token) = self.tokens.pop_front() {
                return token;
            }
            match self.state {
                Some(StateFn(state)) => self.state = state(self),
                None => {
                    return Token {
                        kind: TokenKind::EOF,
                        pos: self.cursor.start(),
                        text: Cow::Borrowed(""),
                    }
                }
            }
        }
    }
}

impl<'s> Deref for Lexer<'s> {
    type Target = Cursor<'s>;

    fn deref(&self) -> &Cursor<'s> {
        &self.cursor
    }
}

impl<'s> DerefMut for Lexer<'s> {
    fn deref_mut(&mut self) -> &mut Cursor<'s> {
        &mut self.cursor
    }
}

#[cfg(test)]
mod tests;
