//! Delimiter location strategies for the [`Splitter`](crate::Splitter).
//!
//! A [`Delimiter`] answers one question: where is the next delimiter at or after a byte
//! offset? The answer is a half-open byte range `[start, end)` on char boundaries, or
//! `None` when the rest of the text holds no delimiter.
//!
//! | Strategy | Matches |
//! |----------|---------|
//! | [`CharDelimiter`] | one specific character |
//! | [`PredicateDelimiter`] | any character accepted by a [`CharPredicate`] |
//! | [`LiteralDelimiter`] | the first occurrence of a fixed string |
//! | [`FixedWidthDelimiter`] | a zero-width boundary every `n` characters |
//! | [`PatternDelimiter`] | the first non-empty regex match |

use regex::Regex;

use crate::chars::CharPredicate;
use crate::error::{Error, Result};

/// Finds the next delimiter in `text` at or after `offset`.
pub trait Delimiter {
    fn locate(&self, text: &str, offset: usize) -> Option<(usize, usize)>;
}

/// Splits on one character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharDelimiter(pub char);

impl Delimiter for CharDelimiter {
    fn locate(&self, text: &str, offset: usize) -> Option<(usize, usize)> {
        let start = offset + text[offset..].find(self.0)?;
        Some((start, start + self.0.len_utf8()))
    }
}

/// Splits on any character accepted by a predicate.
pub struct PredicateDelimiter<P> {
    predicate: P,
}

impl<P: CharPredicate> PredicateDelimiter<P> {
    pub fn new(predicate: P) -> Self {
        PredicateDelimiter { predicate }
    }
}

impl<P: CharPredicate> Delimiter for PredicateDelimiter<P> {
    fn locate(&self, text: &str, offset: usize) -> Option<(usize, usize)> {
        let (i, c) = text[offset..]
            .char_indices()
            .find(|&(_, c)| self.predicate.test(c))?;
        Some((offset + i, offset + i + c.len_utf8()))
    }
}

/// Splits on a literal string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiteralDelimiter {
    literal: String,
}

impl LiteralDelimiter {
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an empty literal.
    pub fn new(literal: &str) -> Result<Self> {
        if literal.is_empty() {
            return Err(Error::invalid_argument(
                "LiteralDelimiter::new",
                "delimiter literal must not be empty",
            ));
        }
        Ok(LiteralDelimiter {
            literal: literal.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.literal
    }
}

impl Delimiter for LiteralDelimiter {
    fn locate(&self, text: &str, offset: usize) -> Option<(usize, usize)> {
        let start = offset + text[offset..].find(self.literal.as_str())?;
        Some((start, start + self.literal.len()))
    }
}

/// Cuts the text into chunks of `width` characters.
///
/// The boundary after the final chunk is never reported, so text whose length is an
/// exact multiple of `width` does not end with an empty chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedWidthDelimiter {
    width: usize,
}

impl FixedWidthDelimiter {
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `width` is zero.
    pub fn new(width: usize) -> Result<Self> {
        if width == 0 {
            return Err(Error::invalid_argument(
                "FixedWidthDelimiter::new",
                "chunk width must be positive",
            ));
        }
        Ok(FixedWidthDelimiter { width })
    }

    pub fn width(&self) -> usize {
        self.width
    }
}

impl Delimiter for FixedWidthDelimiter {
    fn locate(&self, text: &str, offset: usize) -> Option<(usize, usize)> {
        let (i, _) = text[offset..].char_indices().nth(self.width)?;
        Some((offset + i, offset + i))
    }
}

/// Splits on regular expression matches. Empty matches are skipped, since they
/// would never advance the split.
#[derive(Clone, Debug)]
pub struct PatternDelimiter {
    regex: Regex,
}

impl PatternDelimiter {
    /// # Errors
    ///
    /// Returns [`Error::Pattern`] if `pattern` does not compile.
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(PatternDelimiter {
            regex: Regex::new(pattern)?,
        })
    }

    pub fn from_regex(regex: Regex) -> Self {
        PatternDelimiter { regex }
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl Delimiter for PatternDelimiter {
    fn locate(&self, text: &str, offset: usize) -> Option<(usize, usize)> {
        let mut from = offset;
        loop {
            let found = self.regex.find_at(text, from)?;
            if !found.is_empty() {
                return Some((found.start(), found.end()));
            }
            let skip = text[found.start()..].chars().next()?.len_utf8();
            from = found.start() + skip;
        }
    }
}
