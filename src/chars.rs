//! Single-character predicates.
//!
//! Anything implementing [`CharPredicate`] can be used to trim tokens, pick delimiters or
//! drive a [`Scanner`](crate::Scanner). Closures `Fn(char) -> bool` and plain `char`s
//! (equality) qualify out of the box.
//!
//! Predicates may be asked about the same character more than once during look-ahead, so
//! they must not have observable side effects.
//!
//! ```rust
//! use feedkit::chars::{self, CharPredicate};
//!
//! let hex = chars::or(chars::in_range('0', '9'), chars::in_range('a', 'f'));
//! assert!(hex.test('c'));
//! assert!(!hex.test('g'));
//! assert!(chars::not(',').test(';'));
//! ```

/// A test on a single character.
pub trait CharPredicate {
    fn test(&self, c: char) -> bool;
}

impl<F> CharPredicate for F
where
    F: Fn(char) -> bool,
{
    #[inline]
    fn test(&self, c: char) -> bool {
        self(c)
    }
}

impl CharPredicate for char {
    #[inline]
    fn test(&self, c: char) -> bool {
        *self == c
    }
}

/// Accepts every character.
pub const ANY: fn(char) -> bool = |_| true;

/// Rejects every character.
pub const NONE: fn(char) -> bool = |_| false;

/// Unicode whitespace.
pub const WHITESPACE: fn(char) -> bool = char::is_whitespace;

pub fn and<A, B>(a: A, b: B) -> impl Fn(char) -> bool
where
    A: CharPredicate,
    B: CharPredicate,
{
    move |c| a.test(c) && b.test(c)
}

pub fn or<A, B>(a: A, b: B) -> impl Fn(char) -> bool
where
    A: CharPredicate,
    B: CharPredicate,
{
    move |c| a.test(c) || b.test(c)
}

pub fn not<A: CharPredicate>(a: A) -> impl Fn(char) -> bool {
    move |c| !a.test(c)
}

/// Accepts characters in `low..=high`.
pub fn in_range(low: char, high: char) -> impl Fn(char) -> bool {
    move |c| (low..=high).contains(&c)
}

/// Accepts any character of `set`.
pub fn one_of(set: &str) -> impl Fn(char) -> bool {
    let set: Vec<char> = set.chars().collect();
    move |c| set.contains(&c)
}
