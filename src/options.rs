//! Splitter configuration as plain data.
//!
//! [`SplitOptions`] describes a [`Splitter`](crate::Splitter) without building it, so it can
//! live in a config file and be deserialized with any serde format.
//!
//! ## Examples
//!
//! ```rust
//! use feedkit::{DelimiterKind, SplitOptions, Splitter};
//!
//! let options = SplitOptions::new()
//!     .with_delimiter(DelimiterKind::Char(';'))
//!     .with_omit_empty(true);
//! let splitter = Splitter::from_options(&options).unwrap();
//! assert_eq!(splitter.split_to_vec("a;;b"), vec!["a", "b"]);
//! ```

use serde::{Deserialize, Serialize};

/// Which delimiter strategy a splitter uses.
///
/// # Examples
///
/// ```rust
/// use feedkit::DelimiterKind;
///
/// assert_eq!(DelimiterKind::default(), DelimiterKind::Char(','));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelimiterKind {
    Char(char),
    /// Any one character of the set
    AnyOf(String),
    Whitespace,
    Literal(String),
    FixedWidth(usize),
    /// A regular expression
    Pattern(String),
}

impl Default for DelimiterKind {
    fn default() -> Self {
        DelimiterKind::Char(',')
    }
}

/// Configuration for a [`Splitter`](crate::Splitter).
///
/// Missing fields take their defaults when deserializing: split on `,`, keep delimiters
/// out, no trimming, keep empty tokens, no limit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitOptions {
    pub delimiter: DelimiterKind,
    pub include_delimiters: bool,
    pub trim_whitespace: bool,
    pub omit_empty: bool,
    pub limit: Option<usize>,
}

impl SplitOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: DelimiterKind) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_include_delimiters(mut self, include: bool) -> Self {
        self.include_delimiters = include;
        self
    }

    #[must_use]
    pub fn with_trim_whitespace(mut self, trim: bool) -> Self {
        self.trim_whitespace = trim;
        self
    }

    #[must_use]
    pub fn with_omit_empty(mut self, omit: bool) -> Self {
        self.omit_empty = omit;
        self
    }

    /// Caps the number of tokens produced.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
