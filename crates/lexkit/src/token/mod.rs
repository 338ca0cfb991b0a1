//! Token values produced by state functions.
//!
//! A token is a `(kind, position, text)` triple. Kinds are caller-assigned
//! `u16` values; the library reserves only the top two for end-of-input and
//! scan errors. Error tokens travel through the same queue as everything
//! else, so a parser handles them wherever it handles tokens.

use std::borrow::Cow;
use std::fmt;

use thiserror::Error;

/// Runes of token text shown by `Display` before truncating.
const DISPLAY_TEXT_LIMIT: usize = 10;

/// Caller-assigned classification of a token.
///
/// Wraps a `u16`. Every value except [`EOF`](Self::EOF) and
/// [`ERROR`](Self::ERROR) is free for the caller's grammar; the library
/// attaches no meaning to them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TokenKind(pub u16);

impl TokenKind {
    /// End of input. Returned by the driver once the state machine has
    /// terminated and the queue is drained.
    pub const EOF: TokenKind = TokenKind(u16::MAX);

    /// Scan error. The token's text is the diagnostic message rather than
    /// a lexeme.
    pub const ERROR: TokenKind = TokenKind(u16::MAX - 1);

    /// Returns `true` for the two library-reserved kinds.
    #[inline]
    pub fn is_reserved(self) -> bool {
        self == Self::EOF || self == Self::ERROR
    }
}

/// A single scanned token.
///
/// `text` borrows the input for emitted lexemes; error tokens own their
/// formatted message instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token<'s> {
    /// Classification; see [`TokenKind`].
    pub kind: TokenKind,
    /// Byte offset of the lexeme's start at the moment of emission.
    pub pos: u32,
    /// Lexeme text, or the diagnostic message for `ERROR` tokens.
    pub text: Cow<'s, str>,
}

impl Token<'_> {
    /// Convert an `ERROR` token into a [`ScanError`]; `None` for any other
    /// kind.
    ///
    /// Lets a parser loop end with `token.err().map_or(Ok(()), Err)?` style
    /// propagation instead of matching on the reserved kind by hand.
    pub fn err(&self) -> Option<ScanError> {
        (self.kind == TokenKind::ERROR).then(|| ScanError {
            pos: self.pos,
            message: self.text.clone().into_owned(),
        })
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::ERROR => f.write_str(&self.text),
            TokenKind::EOF => f.write_str("EOF"),
            _ => {
                if self.text.chars().count() > DISPLAY_TEXT_LIMIT {
                    let prefix: String = self.text.chars().take(DISPLAY_TEXT_LIMIT).collect();
                    write!(f, "{prefix:?}...")
                } else {
                    f.write_str(&self.text)
                }
            }
        }
    }
}

/// Lexical error surfaced through the token stream.
///
/// Produced from an `ERROR` token by [`Token::err`]; carries the message a
/// state function passed to [`Lexer::errorf`](crate::Lexer::errorf) and the
/// byte offset where the offending lexeme began.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message} (at byte {pos})")]
pub struct ScanError {
    /// Byte offset of the lexeme the error refers to.
    pub pos: u32,
    /// Human-readable diagnostic.
    pub message: String,
}
