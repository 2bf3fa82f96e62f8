//! Look-ahead character scanning with rollback.
//!
//! A [`Scanner`] reads characters from a [`CharSource`] and keeps a pushback stack of
//! characters it has read but not consumed. Every public scan is all-or-nothing: if it
//! does not match, every character it looked at is pushed back and [`Scanner::position`]
//! is unchanged.
//!
//! ## Examples
//!
//! ```rust
//! use feedkit::Scanner;
//!
//! let mut scanner = Scanner::from_str("key = value");
//! let key = scanner.scan_chars(char::is_alphanumeric).unwrap();
//! scanner.scan_chars(char::is_whitespace).unwrap();
//! assert!(!scanner.scan_seq("==").unwrap());
//! assert!(scanner.scan_char_eq('=').unwrap());
//! scanner.scan_chars(char::is_whitespace).unwrap();
//! let value = scanner.scan_to_eof().unwrap();
//!
//! assert_eq!((key.as_str(), value.as_str()), ("key", "value"));
//! assert_eq!(scanner.position(), 11);
//! ```
//!
//! ## Errors
//!
//! Failures of the underlying source are returned as [`Error::Io`] naming the scan
//! operation; nothing is retried. After [`Scanner::close`] every operation returns
//! [`Error::ScannerClosed`].

use std::io::{self, BufRead, BufReader, Read};

use crate::chars::CharPredicate;
use crate::error::{Error, Result};

/// A stream of characters.
pub trait CharSource {
    /// Reads the next character, or `None` at end of input.
    fn read_char(&mut self) -> io::Result<Option<char>>;

    /// Releases the underlying resource.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Characters of an in-memory string.
#[derive(Clone, Debug)]
pub struct StrSource {
    text: String,
    offset: usize,
}

impl StrSource {
    pub fn new<T: Into<String>>(text: T) -> Self {
        StrSource {
            text: text.into(),
            offset: 0,
        }
    }
}

impl CharSource for StrSource {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        let next = self.text[self.offset..].chars().next();
        if let Some(c) = next {
            self.offset += c.len_utf8();
        }
        Ok(next)
    }
}

/// UTF-8 decoded characters of a byte reader.
///
/// Malformed UTF-8 surfaces as an [`io::ErrorKind::InvalidData`] error. The bad sequence's
/// lead byte and any continuation bytes it did have are consumed; the first byte that
/// cannot continue it stays in the stream and is read next.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: BufReader<R>,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        ReaderSource {
            reader: BufReader::new(reader),
        }
    }

    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    /// Consumes the next byte only if it is a UTF-8 continuation byte.
    fn read_continuation(&mut self) -> io::Result<Option<u8>> {
        let next = loop {
            match self.reader.fill_buf() {
                Ok(buf) => break buf.first().copied(),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };
        match next {
            Some(b) if b & 0xC0 == 0x80 => {
                self.reader.consume(1);
                Ok(Some(b))
            }
            _ => Ok(None),
        }
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R: Read> CharSource for ReaderSource<R> {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        let Some(lead) = self.read_byte()? else {
            return Ok(None);
        };
        let width = utf8_width(lead).ok_or_else(|| invalid_utf8(lead))?;
        let mut bytes = [lead, 0, 0, 0];
        for byte in &mut bytes[1..width] {
            *byte = self
                .read_continuation()?
                .ok_or_else(|| invalid_utf8(lead))?;
        }
        let decoded = std::str::from_utf8(&bytes[..width]).map_err(|_| invalid_utf8(lead))?;
        Ok(decoded.chars().next())
    }
}

fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

fn invalid_utf8(lead: u8) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("invalid UTF-8 sequence starting with byte {lead:#04x}"),
    )
}

/// A look-ahead reader over a [`CharSource`].
#[derive(Debug)]
pub struct Scanner<S> {
    source: Option<S>,
    pushback: Vec<char>,
    position: usize,
}

impl Scanner<StrSource> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Self {
        Scanner::new(StrSource::new(text))
    }
}

impl<R: Read> Scanner<ReaderSource<R>> {
    pub fn from_reader(reader: R) -> Self {
        Scanner::new(ReaderSource::new(reader))
    }
}

impl<S: CharSource> Scanner<S> {
    pub fn new(source: S) -> Self {
        Scanner {
            source: Some(source),
            pushback: Vec::new(),
            position: 0,
        }
    }

    /// Number of characters consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_closed(&self) -> bool {
        self.source.is_none()
    }

    /// True if no character is left.
    pub fn is_eof(&mut self) -> Result<bool> {
        Ok(self.peek("is_eof")?.is_none())
    }

    /// The next character, without consuming it.
    pub fn peek_char(&mut self) -> Result<Option<char>> {
        self.peek("peek_char")
    }

    /// Consumes and returns the next character, or `None` at end of input.
    pub fn scan_char(&mut self) -> Result<Option<char>> {
        self.read("scan_char")
    }

    /// Consumes the next character if it is `expected`.
    pub fn scan_char_eq(&mut self, expected: char) -> Result<bool> {
        Ok(self.scan_one("scan_char_eq", &expected)?.is_some())
    }

    /// Consumes and returns the next character if `pred` accepts it.
    pub fn scan_char_if<P: CharPredicate>(&mut self, pred: P) -> Result<Option<char>> {
        self.scan_one("scan_char_if", &pred)
    }

    /// Consumes the longest run of characters accepted by `pred`, possibly empty.
    pub fn scan_chars<P: CharPredicate>(&mut self, pred: P) -> Result<String> {
        self.scan_while("scan_chars", |c| pred.test(c))
    }

    /// Consumes `literal` if the input continues with it exactly.
    pub fn scan_seq(&mut self, literal: &str) -> Result<bool> {
        self.match_seq("scan_seq", literal)
    }

    /// True if the input continues with `literal`. Consumes nothing.
    pub fn lookahead_seq(&mut self, literal: &str) -> Result<bool> {
        let matched = self.match_seq("lookahead_seq", literal)?;
        if matched {
            self.unread_str(literal);
        }
        Ok(matched)
    }

    /// Consumes everything that is left.
    pub fn scan_to_eof(&mut self) -> Result<String> {
        self.scan_while("scan_to_eof", |_| true)
    }

    /// Consumes up to, not including, the next `stop` character.
    pub fn scan_to_char(&mut self, stop: char) -> Result<String> {
        self.scan_while("scan_to_char", |c| c != stop)
    }

    /// Consumes up to, not including, the next character accepted by `stop`.
    pub fn scan_to_char_if<P: CharPredicate>(&mut self, stop: P) -> Result<String> {
        self.scan_while("scan_to_char_if", |c| !stop.test(c))
    }

    /// Consumes up to, not including, the first occurrence of `literal`.
    ///
    /// Without an occurrence this consumes the rest of the input.
    pub fn scan_to_seq(&mut self, literal: &str) -> Result<String> {
        const OP: &str = "scan_to_seq";
        let Some(first) = literal.chars().next() else {
            return Ok(String::new());
        };
        let mut run = String::new();
        loop {
            match self.scan_while(OP, |c| c != first) {
                Ok(part) => run.push_str(&part),
                Err(e) => return self.rollback(&run, e),
            }
            match self.match_seq(OP, literal) {
                Ok(true) => {
                    self.unread_str(literal);
                    break;
                }
                Ok(false) => {}
                Err(e) => return self.rollback(&run, e),
            }
            match self.read(OP) {
                Ok(Some(c)) => run.push(c),
                Ok(None) => break,
                Err(e) => return self.rollback(&run, e),
            }
        }
        Ok(run)
    }

    /// Closes the source. Any later call, including another `close`, fails.
    pub fn close(&mut self) -> Result<()> {
        let mut source = self
            .source
            .take()
            .ok_or_else(|| Error::scanner_closed("close"))?;
        tracing::trace!(
            position = self.position,
            unread = self.pushback.len(),
            "closing scanner"
        );
        self.pushback.clear();
        source.close().map_err(|e| Error::io("close", e))
    }

    fn read(&mut self, op: &'static str) -> Result<Option<char>> {
        let source = self
            .source
            .as_mut()
            .ok_or_else(|| Error::scanner_closed(op))?;
        let next = match self.pushback.pop() {
            Some(c) => Some(c),
            None => source.read_char().map_err(|e| {
                tracing::debug!(operation = op, error = %e, "character source failed");
                Error::io(op, e)
            })?,
        };
        if next.is_some() {
            self.position += 1;
        }
        Ok(next)
    }

    fn unread(&mut self, c: char) {
        self.pushback.push(c);
        self.position -= 1;
    }

    fn unread_str(&mut self, consumed: &str) {
        for c in consumed.chars().rev() {
            self.unread(c);
        }
    }

    fn rollback<T>(&mut self, consumed: &str, err: Error) -> Result<T> {
        self.unread_str(consumed);
        Err(err)
    }

    fn peek(&mut self, op: &'static str) -> Result<Option<char>> {
        let next = self.read(op)?;
        if let Some(c) = next {
            self.unread(c);
        }
        Ok(next)
    }

    fn scan_one<P>(&mut self, op: &'static str, pred: &P) -> Result<Option<char>>
    where
        P: CharPredicate + ?Sized,
    {
        match self.read(op)? {
            Some(c) if pred.test(c) => Ok(Some(c)),
            Some(c) => {
                self.unread(c);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn scan_while<F>(&mut self, op: &'static str, mut accept: F) -> Result<String>
    where
        F: FnMut(char) -> bool,
    {
        let mut run = String::new();
        loop {
            match self.read(op) {
                Ok(Some(c)) if accept(c) => run.push(c),
                Ok(Some(c)) => {
                    self.unread(c);
                    break;
                }
                Ok(None) => break,
                Err(e) => return self.rollback(&run, e),
            }
        }
        Ok(run)
    }

    fn match_seq(&mut self, op: &'static str, literal: &str) -> Result<bool> {
        let mut matched = String::with_capacity(literal.len());
        for expected in literal.chars() {
            match self.read(op) {
                Ok(Some(c)) if c == expected => matched.push(c),
                Ok(Some(c)) => {
                    self.unread(c);
                    self.unread_str(&matched);
                    return Ok(false);
                }
                Ok(None) => {
                    self.unread_str(&matched);
                    return Ok(false);
                }
                Err(e) => return self.rollback(&matched, e),
            }
        }
        Ok(true)
    }
}
