//! # feedkit
//!
//! Lazy, memoized sequences ("feeds") with a combinator library, and two text tools built
//! around them: a delimiter-based [`Splitter`] and a look-ahead [`Scanner`].
//!
//! ## What is a Feed?
//!
//! A [`Feed`] is a possibly infinite sequence computed on demand. Forcing a position yields
//! either nothing (the feed is exhausted) or one element plus the feed of what follows.
//! Positions built with [`Feed::lazy`] compute once and cache the result, so a recursively
//! defined infinite feed can be shared and traversed any number of times.
//!
//! ## Key Features
//!
//! - **Memoized**: one-shot sources such as iterators are pulled exactly once per element
//! - **Stack-safe**: `filter`, `drop`, `drop_while`, `group` and `flatten` skip arbitrarily
//!   long runs in constant stack, and long cached chains drop without recursion
//! - **Zero-copy splitting**: tokens are views into the shared source text
//! - **Atomic scanning**: every scanner call either matches or leaves the input untouched
//!
//! ## Quick Start
//!
//! ```rust
//! use feedkit::{Feed, Splitter, Scanner};
//!
//! // Infinite feed of primes, by trial division
//! let primes = Feed::integers_from(2).filter(|n| (2..*n).take_while(|d| d * d <= *n).all(|d| n % d != 0));
//! assert_eq!(primes.take(5).iter().collect::<Vec<_>>(), vec![2, 3, 5, 7, 11]);
//!
//! // Split, trim, drop empties
//! let fields = Splitter::on_char(',').trim_whitespace().omit_empty().split("a, b,, c");
//! assert_eq!(fields.count(), 3);
//!
//! // Scan with rollback
//! let mut scanner = Scanner::from_str("<!-- note -->rest");
//! assert!(scanner.scan_seq("<!--").unwrap());
//! assert_eq!(scanner.scan_to_seq("-->").unwrap(), " note ");
//! ```
//!
//! ## Threading
//!
//! Feeds, splitters and scanners are single-threaded values (`!Send`). Nothing blocks
//! except a scanner waiting on its source.

pub mod macros;

pub mod chars;
pub mod combinators;
pub mod delimiter;
pub mod error;
pub mod factory;
pub mod feed;
pub mod options;
pub mod scanner;
pub mod split;

pub use chars::CharPredicate;
pub use delimiter::Delimiter;
pub use error::{Error, Result};
pub use factory::CollectionFactory;
pub use feed::{Evaluate, Feed, FeedIter, Step};
pub use options::{DelimiterKind, SplitOptions};
pub use scanner::{CharSource, ReaderSource, Scanner, StrSource};
pub use split::{Splitter, Token};

/// Splits `text` on every `delimiter` character, keeping empty fields.
///
/// # Examples
///
/// ```rust
/// assert_eq!(feedkit::split("a:b::c", ':'), vec!["a", "b", "", "c"]);
/// ```
pub fn split(text: &str, delimiter: char) -> Vec<String> {
    Splitter::on_char(delimiter).split_to_vec(text)
}

/// Splits `text` as described by `options`.
///
/// # Examples
///
/// ```rust
/// use feedkit::{split_with_options, DelimiterKind, SplitOptions};
///
/// let options = SplitOptions::new()
///     .with_delimiter(DelimiterKind::Whitespace)
///     .with_omit_empty(true);
/// assert_eq!(split_with_options("  a  b ", &options).unwrap(), vec!["a", "b"]);
/// ```
///
/// # Errors
///
/// Returns an error if the delimiter described by `options` is invalid.
pub fn split_with_options(text: &str, options: &SplitOptions) -> Result<Vec<String>> {
    Ok(Splitter::from_options(options)?.split_to_vec(text))
}
