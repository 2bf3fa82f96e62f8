//! Lazy delimiter-based splitting.
//!
//! A [`Splitter`] turns text into a [`Feed`] of [`Token`]s. Tokens are views into the
//! shared source text; trimming narrows the view and never copies or mutates the text.
//!
//! ## Examples
//!
//! ```rust
//! use feedkit::Splitter;
//!
//! let fields = Splitter::on_char(',').split_to_vec("a,,b,");
//! assert_eq!(fields, vec!["a", "", "b", ""]);
//!
//! let fields = Splitter::on_char(',')
//!     .trim_whitespace()
//!     .omit_empty()
//!     .split_to_vec(" a , ,b, ");
//! assert_eq!(fields, vec!["a", "b"]);
//! ```
//!
//! ## Edge cases
//!
//! - Empty input yields one empty token, unless empty tokens are omitted.
//! - A delimiter at the very start or end yields a leading or trailing empty token.
//! - With [`Splitter::include_delimiters`], each delimiter is emitted as its own token
//!   right after the token it ends.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, Range};
use std::rc::Rc;

use regex::Regex;

use crate::chars::{self, CharPredicate};
use crate::delimiter::{
    CharDelimiter, Delimiter, FixedWidthDelimiter, LiteralDelimiter, PatternDelimiter,
    PredicateDelimiter,
};
use crate::error::Result;
use crate::feed::Feed;
use crate::options::{DelimiterKind, SplitOptions};

/// A piece of split text: a byte range of a shared source string.
#[derive(Clone)]
pub struct Token {
    source: Rc<str>,
    start: usize,
    end: usize,
}

impl Token {
    fn new(source: Rc<str>, start: usize, end: usize) -> Self {
        Token { source, start, end }
    }

    pub fn as_str(&self) -> &str {
        &self.source[self.start..self.end]
    }

    /// Byte range of this token within the source text.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The whole text this token was split from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Narrows the view past leading and trailing characters accepted by `pred`.
    pub fn trim_matches<P>(&self, pred: &P) -> Token
    where
        P: CharPredicate + ?Sized,
    {
        let text = self.as_str();
        let start = text
            .char_indices()
            .find(|&(_, c)| !pred.test(c))
            .map_or(text.len(), |(i, _)| i);
        let end = text[start..]
            .char_indices()
            .rev()
            .find(|&(_, c)| !pred.test(c))
            .map_or(start, |(i, c)| start + i + c.len_utf8());
        Token::new(Rc::clone(&self.source), self.start + start, self.start + end)
    }
}

impl Deref for Token {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Token) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Token {}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({:?} @ {:?})", self.as_str(), self.range())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Token> for String {
    fn from(token: Token) -> String {
        token.as_str().to_string()
    }
}

/// Splits text on a [`Delimiter`], with optional trimming and empty-token removal.
///
/// Built with one of the `on_*` constructors and refined with the builder methods.
/// Cloning is cheap; a splitter can be reused for any number of texts.
#[derive(Clone)]
pub struct Splitter {
    delimiter: Rc<dyn Delimiter>,
    include_delimiters: bool,
    trim: Option<Rc<dyn CharPredicate>>,
    omit_empty: bool,
    limit: Option<usize>,
}

impl Splitter {
    pub fn new<D: Delimiter + 'static>(delimiter: D) -> Self {
        Splitter {
            delimiter: Rc::new(delimiter),
            include_delimiters: false,
            trim: None,
            omit_empty: false,
            limit: None,
        }
    }

    pub fn on_char(delimiter: char) -> Self {
        Splitter::new(CharDelimiter(delimiter))
    }

    /// Splits on any character accepted by `predicate`.
    pub fn on_matches<P: CharPredicate + 'static>(predicate: P) -> Self {
        Splitter::new(PredicateDelimiter::new(predicate))
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) for an empty literal.
    pub fn on_str(literal: &str) -> Result<Self> {
        Ok(Splitter::new(LiteralDelimiter::new(literal)?))
    }

    /// # Errors
    ///
    /// Returns [`Error::Pattern`](crate::Error::Pattern) if the pattern does not compile.
    pub fn on_pattern(pattern: &str) -> Result<Self> {
        Ok(Splitter::new(PatternDelimiter::new(pattern)?))
    }

    pub fn on_regex(regex: Regex) -> Self {
        Splitter::new(PatternDelimiter::from_regex(regex))
    }

    /// Cuts text into chunks of `width` characters; the last chunk may be shorter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if `width` is zero.
    pub fn fixed_width(width: usize) -> Result<Self> {
        Ok(Splitter::new(FixedWidthDelimiter::new(width)?))
    }

    /// Builds a splitter from plain configuration data.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use feedkit::{DelimiterKind, SplitOptions, Splitter};
    ///
    /// let options = SplitOptions::new()
    ///     .with_delimiter(DelimiterKind::Literal("->".to_string()))
    ///     .with_trim_whitespace(true);
    /// let splitter = Splitter::from_options(&options).unwrap();
    /// assert_eq!(splitter.split_to_vec("a -> b"), vec!["a", "b"]);
    /// ```
    ///
    /// # Errors
    ///
    /// Fails if the delimiter description is invalid (empty literal, zero width, bad pattern).
    pub fn from_options(options: &SplitOptions) -> Result<Self> {
        tracing::debug!(?options, "building splitter from options");
        let mut splitter = match &options.delimiter {
            DelimiterKind::Char(c) => Splitter::on_char(*c),
            DelimiterKind::AnyOf(set) => Splitter::on_matches(chars::one_of(set)),
            DelimiterKind::Whitespace => Splitter::on_matches(chars::WHITESPACE),
            DelimiterKind::Literal(literal) => Splitter::on_str(literal)?,
            DelimiterKind::FixedWidth(width) => Splitter::fixed_width(*width)?,
            DelimiterKind::Pattern(pattern) => Splitter::on_pattern(pattern)?,
        };
        splitter.include_delimiters = options.include_delimiters;
        splitter.omit_empty = options.omit_empty;
        splitter.limit = options.limit;
        if options.trim_whitespace {
            splitter = splitter.trim_whitespace();
        }
        Ok(splitter)
    }

    /// Emits every delimiter as a token of its own.
    #[must_use]
    pub fn include_delimiters(mut self) -> Self {
        self.include_delimiters = true;
        self
    }

    /// Strips leading and trailing characters accepted by `predicate` from every token.
    #[must_use]
    pub fn trim_with<P: CharPredicate + 'static>(mut self, predicate: P) -> Self {
        self.trim = Some(Rc::new(predicate));
        self
    }

    #[must_use]
    pub fn trim_whitespace(self) -> Self {
        self.trim_with(chars::WHITESPACE)
    }

    /// Drops tokens that are empty after trimming.
    #[must_use]
    pub fn omit_empty(mut self) -> Self {
        self.omit_empty = true;
        self
    }

    /// Stops after `limit` tokens.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Splits `text` lazily. Nothing is scanned until the feed is forced.
    pub fn split<T: Into<Rc<str>>>(&self, text: T) -> Feed<Token> {
        let raw = raw_split(
            text.into(),
            0,
            Rc::clone(&self.delimiter),
            self.include_delimiters,
        );
        let trimmed = match &self.trim {
            Some(trim) => {
                let trim = Rc::clone(trim);
                raw.map(move |token| token.trim_matches(&*trim))
            }
            None => raw,
        };
        let kept = if self.omit_empty {
            trimmed.filter(|token| !token.is_empty())
        } else {
            trimmed
        };
        match self.limit {
            Some(limit) => kept.take(limit),
            None => kept,
        }
    }

    /// Splits `text` and copies every token out.
    pub fn split_to_vec(&self, text: &str) -> Vec<String> {
        self.split(text).iter().map(String::from).collect()
    }
}

impl fmt::Debug for Splitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Splitter")
            .field("include_delimiters", &self.include_delimiters)
            .field("trim", &self.trim.is_some())
            .field("omit_empty", &self.omit_empty)
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

fn raw_split(
    text: Rc<str>,
    offset: usize,
    delimiter: Rc<dyn Delimiter>,
    include_delimiters: bool,
) -> Feed<Token> {
    Feed::lazy(move || match delimiter.locate(&text, offset) {
        Some((start, end)) => {
            let token = Token::new(Rc::clone(&text), offset, start);
            let delimiter_token = Token::new(Rc::clone(&text), start, end);
            let rest = raw_split(text, end, delimiter, include_delimiters);
            let rest = if include_delimiters {
                Feed::lazy(move || Some((delimiter_token, rest)))
            } else {
                rest
            };
            Some((token, rest))
        }
        None => {
            let len = text.len();
            Some((Token::new(text, offset, len), Feed::empty()))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keeps_empty_tokens() {
        assert_eq!(
            Splitter::on_char(',').split_to_vec("a,,b,"),
            vec!["a", "", "b", ""]
        );
        assert_eq!(Splitter::on_char(',').split_to_vec(",a"), vec!["", "a"]);
    }

    #[test]
    fn test_omit_empty() {
        let splitter = Splitter::on_char(',').omit_empty();
        assert_eq!(splitter.split_to_vec("a,,b,"), vec!["a", "b"]);
        assert!(splitter.split("").is_empty());
    }

    #[test]
    fn test_empty_input_yields_one_token() {
        assert_eq!(Splitter::on_char(';').split_to_vec(""), vec![""]);
        assert_eq!(Splitter::fixed_width(3).unwrap().split_to_vec(""), vec![""]);
    }

    #[test]
    fn test_tokens_are_views_into_source() {
        let tokens: Vec<Token> = Splitter::on_char('|')
            .trim_whitespace()
            .split("ab | cd")
            .iter()
            .collect();
        assert_eq!(tokens[1], "cd");
        assert_eq!(tokens[1].range(), 5..7);
        assert_eq!(tokens[1].source(), "ab | cd");
    }

    #[test]
    fn test_include_delimiters() {
        let splitter = Splitter::on_pattern(r"[+-]").unwrap().include_delimiters();
        assert_eq!(splitter.split_to_vec("1+2-3"), vec!["1", "+", "2", "-", "3"]);
    }

    #[test]
    fn test_fixed_width() {
        let splitter = Splitter::fixed_width(2).unwrap();
        assert_eq!(splitter.split_to_vec("abcdef"), vec!["ab", "cd", "ef"]);
        assert_eq!(splitter.split_to_vec("abcde"), vec!["ab", "cd", "e"]);
    }

    #[test]
    fn test_trim_with_predicate() {
        let splitter = Splitter::on_str("::").unwrap().trim_with('*');
        assert_eq!(splitter.split_to_vec("*a*::**::b"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_limit() {
        let splitter = Splitter::on_matches(chars::WHITESPACE).omit_empty().limit(2);
        assert_eq!(splitter.split_to_vec("  one two   three"), vec!["one", "two"]);
    }

    #[test]
    fn test_token_trim_matches_unicode() {
        let token = Token::new(Rc::from("  héllo\u{3000}"), 0, 11);
        let trimmed = token.trim_matches(&chars::WHITESPACE);
        assert_eq!(trimmed.as_str(), "héllo");

        let blank = Token::new(Rc::from("   "), 0, 3).trim_matches(&chars::WHITESPACE);
        assert!(blank.is_empty());
    }
}
