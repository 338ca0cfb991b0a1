//! Rune-at-a-time cursor over an in-memory byte buffer.
//!
//! The cursor tracks two byte offsets into the input: `start`, where the
//! current lexeme begins, and `pos`, the next unread byte. Everything
//! consumed between `start` and `pos` is the lexeme that [`current()`]
//! returns and that the driver turns into the next token's text.
//!
//! # EOF and malformed input
//!
//! [`advance()`] never fails. At end of input it returns [`EOF_CHAR`] with
//! width 0; at a malformed UTF-8 sequence it returns [`INVALID_CHAR`] with
//! width 1 and holds its position, so repeated calls keep reporting the
//! same failure rather than misreading a partial multi-byte sequence as
//! progress. State functions are expected to check both cases with
//! [`is_eof`] and [`is_invalid`] and either error out or recover on their
//! own terms.
//!
//! [`advance()`]: Cursor::advance
//! [`current()`]: Cursor::current

use std::borrow::Cow;

/// Sentinel returned by [`Cursor::advance`] at end of input.
///
/// U+0004 (end-of-transmission), reported with width 0. A literal U+0004
/// in the input decodes with width 1, so the `(char, width)` pair is
/// unambiguous; check with [`is_eof`] rather than comparing the char alone.
pub const EOF_CHAR: char = '\u{0004}';

/// Marker returned by [`Cursor::advance`] at a malformed UTF-8 sequence.
///
/// U+FFFD (replacement character), reported with width 1. A literal
/// replacement character in the input decodes with width 3, so the
/// `(char, width)` pair is unambiguous; check with [`is_invalid`].
pub const INVALID_CHAR: char = char::REPLACEMENT_CHARACTER;

/// Returns `true` if a [`Cursor::advance`] or [`Cursor::peek`] result is
/// the end-of-input sentinel.
#[inline]
pub fn is_eof(c: char, width: u32) -> bool {
    c == EOF_CHAR && width == 0
}

/// Returns `true` if a [`Cursor::advance`] or [`Cursor::peek`] result is
/// the malformed-encoding marker.
#[inline]
pub fn is_invalid(c: char, width: u32) -> bool {
    c == INVALID_CHAR && width == 1
}

/// Number of bytes in the UTF-8 sequence introduced by `byte`.
///
/// ASCII, continuation, and invalid leading bytes all report 1; the decoder
/// validates the full sequence separately, so a bad leading byte simply
/// fails validation at width 1.
#[inline]
const fn utf8_seq_width(byte: u8) -> usize {
    match byte {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

/// Scanning cursor over a fixed byte buffer interpreted as UTF-8.
///
/// Exclusively owned by a [`Lexer`](crate::Lexer); state functions reach it
/// through the driver's `Deref` impl. All offsets are byte offsets.
///
/// # Invariant
///
/// `0 <= start <= pos <= input.len()` holds in every reachable state, as
/// long as the [`backup()`](Self::backup) contract is respected.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'s> {
    /// Input bytes, fixed for the cursor's lifetime.
    input: &'s [u8],
    /// Byte offset where the current lexeme begins.
    start: u32,
    /// Byte offset of the next unread byte.
    pos: u32,
    /// Most recently read rune.
    last: char,
    /// Consumed width of the most recent read; 0 if nothing was consumed
    /// (EOF, malformed sequence, or nothing read yet).
    last_width: u32,
}

/// Size assertion: Cursor should be <= 32 bytes on 64-bit platforms.
/// &[u8] = 16 (fat pointer), 3 x u32 = 12, char = 4 => 32 bytes.
const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 32);

impl<'s> Cursor<'s> {
    /// Create a cursor positioned at byte 0.
    ///
    /// # Panics
    ///
    /// Panics if `input` is longer than `u32::MAX` bytes. Offsets are `u32`;
    /// rejecting oversized input at construction keeps every later offset
    /// computation exact.
    pub fn new(input: &'s [u8]) -> Self {
        assert!(
            u32::try_from(input.len()).is_ok(),
            "input exceeds u32::MAX bytes"
        );
        Self {
            input,
            start: 0,
            pos: 0,
            last: EOF_CHAR,
            last_width: 0,
        }
    }

    /// Add one rune of the input to the current lexeme.
    ///
    /// Returns the decoded rune and its width in bytes, advancing `pos` by
    /// that width. At end of input, returns `(EOF_CHAR, 0)` without moving.
    /// At a malformed UTF-8 sequence, returns `(INVALID_CHAR, 1)` without
    /// moving, and keeps doing so on every subsequent call; callers must
    /// detect this with [`is_invalid`] and escape.
    pub fn advance(&mut self) -> (char, u32) {
        let pos = self.pos as usize;
        if pos >= self.input.len() {
            self.last_width = 0;
            return (EOF_CHAR, 0);
        }
        match decode_rune(&self.input[pos..]) {
            Some((c, width)) => {
                self.last = c;
                self.last_width = width;
                self.pos += width;
                (c, width)
            }
            None => {
                // Hold position: consuming garbage byte-by-byte would let a
                // state machine misinterpret the tail of a multi-byte
                // sequence as forward progress.
                self.last = INVALID_CHAR;
                self.last_width = 0;
                (INVALID_CHAR, 1)
            }
        }
    }

    /// Remove the most recently read rune from the current lexeme.
    ///
    /// Rewinds `pos` by the width recorded by the last [`advance()`]. After
    /// an advance that did not move (EOF, malformed sequence) this is a
    /// no-op.
    ///
    /// # Contract
    ///
    /// Valid at most once per [`advance()`]/[`peek()`]; a second consecutive
    /// call repeats the rewind and leaves the cursor in an unspecified
    /// position.
    ///
    /// [`advance()`]: Self::advance
    /// [`peek()`]: Self::peek
    pub fn backup(&mut self) {
        debug_assert!(self.pos >= self.last_width, "backup before a read");
        self.pos -= self.last_width;
    }

    /// Return the next rune without adding it to the current lexeme.
    ///
    /// Equivalent to [`advance()`](Self::advance) followed by
    /// [`backup()`](Self::backup): `pos` is unchanged net of the call, but
    /// the last-rune record is updated exactly as `advance` would.
    /// Consecutive calls return the same result.
    pub fn peek(&mut self) -> (char, u32) {
        let scanned = self.advance();
        self.backup();
        scanned
    }

    /// Advance iff the next rune is a member of `valid`.
    ///
    /// At end of input the sentinel never matches ordinary sets and the
    /// cursor stays put. Putting [`EOF_CHAR`] or [`INVALID_CHAR`] in `valid`
    /// makes this return `true` without consuming anything; don't.
    pub fn accept(&mut self, valid: &str) -> bool {
        let (c, _) = self.advance();
        if valid.contains(c) {
            true
        } else {
            self.backup();
            false
        }
    }

    /// Advance iff `pred` accepts the next rune.
    ///
    /// The predicate form of [`accept()`](Self::accept), for large rune
    /// classes (`char::is_alphabetic`, `char::is_ascii_digit`, ...) where a
    /// set string would be impractical. The predicate sees the sentinel
    /// runes at EOF and malformed input; standard classification predicates
    /// reject both.
    pub fn accept_by(&mut self, pred: impl FnOnce(char) -> bool) -> bool {
        let (c, _) = self.advance();
        if pred(c) {
            true
        } else {
            self.backup();
            false
        }
    }

    /// Advance as long as the next rune is a member of `valid`.
    ///
    /// Returns the number of runes consumed.
    pub fn accept_run(&mut self, valid: &str) -> u32 {
        let mut n = 0;
        while self.accept(valid) {
            n += 1;
        }
        n
    }

    /// Advance as long as `pred` accepts the next rune.
    ///
    /// Returns the number of runes consumed.
    pub fn accept_run_by(&mut self, pred: impl Fn(char) -> bool) -> u32 {
        let mut n = 0;
        while self.accept_by(&pred) {
            n += 1;
        }
        n
    }

    /// Advance `literal.len()` bytes iff the upcoming bytes equal `literal`.
    ///
    /// Byte-exact, not rune-aware; meant for fixed keywords and operators
    /// where per-rune set matching would branch needlessly. Does not update
    /// the last-rune record, so [`backup()`](Self::backup) afterwards
    /// rewinds the read before the match, not the match itself.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "a matching literal fits in the remaining input, which fits in u32"
    )]
    pub fn accept_str(&mut self, literal: &str) -> bool {
        if self.input[self.pos as usize..].starts_with(literal.as_bytes()) {
            self.pos += literal.len() as u32;
            true
        } else {
            false
        }
    }

    /// The lexeme accumulated so far: the input bytes from `start` to `pos`.
    ///
    /// Borrowed whenever the lexeme is valid UTF-8, which is always the case
    /// when `pos` only ever moved by whole decoded runes or matched
    /// literals.
    pub fn current(&self) -> Cow<'s, str> {
        String::from_utf8_lossy(&self.input[self.start as usize..self.pos as usize])
    }

    /// Discard the current lexeme without emitting a token.
    pub fn ignore(&mut self) {
        self.start = self.pos;
    }

    /// Byte offset where the current lexeme begins.
    #[inline]
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Byte offset of the next unread byte.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Length of the input in bytes.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "construction rejects inputs longer than u32::MAX"
    )]
    #[inline]
    pub fn source_len(&self) -> u32 {
        self.input.len() as u32
    }

    /// The most recently read rune and the width it consumed.
    ///
    /// The width is 0 if nothing has been read yet, or if the last read hit
    /// EOF or a malformed sequence (neither consumes input).
    #[inline]
    pub fn last(&self) -> (char, u32) {
        (self.last, self.last_width)
    }
}

/// Decode the first rune of `bytes`, returning `None` on any malformed
/// sequence (bad leading byte, bad continuation, overlong form, surrogate,
/// or a sequence truncated by end of input).
#[allow(
    clippy::cast_possible_truncation,
    reason = "UTF-8 sequences are at most 4 bytes wide"
)]
fn decode_rune(bytes: &[u8]) -> Option<(char, u32)> {
    let width = utf8_seq_width(bytes[0]);
    let seq = bytes.get(..width)?;
    let c = std::str::from_utf8(seq).ok()?.chars().next()?;
    Some((c, width as u32))
}
