//! Lazy, memoized sequences.
//!
//! A [`Feed`] is a possibly infinite sequence whose positions are computed on demand.
//! Each position, when forced with [`Feed::evaluate`], is either exhausted (`None`) or
//! one element plus the feed of the remaining elements (`Some((head, tail))`).
//!
//! ## Memoization
//!
//! Feeds built with [`Feed::lazy`] (and everything built on it: [`Feed::from_iterator`],
//! [`Feed::iterate`], [`Feed::unfold`], [`memoize`](crate::combinators::memoize)) run
//! their computation at most once per position and replay the cached step afterwards.
//! That makes recursively defined infinite feeds cheap to share and re-traverse, and
//! makes one-shot sources such as iterators safe to wrap.
//!
//! ```rust
//! use feedkit::Feed;
//!
//! let naturals = Feed::iterate(0u64, |n| n + 1);
//! let first: Vec<u64> = naturals.take(5).iter().collect();
//! assert_eq!(first, vec![0, 1, 2, 3, 4]);
//!
//! // Same positions, no recomputation
//! assert_eq!(naturals.head().unwrap(), 0);
//! ```
//!
//! ## Sharing
//!
//! A `Feed` is a reference-counted handle. Cloning it shares the logical position,
//! including any memoized state. Feeds are single-threaded (`!Send`).

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};

/// One forced position: the element and the feed that follows it.
pub type Step<E> = Option<(E, Feed<E>)>;

/// The single-method contract behind every feed position.
///
/// Implementors compute the next step of a sequence. Combinators implement this
/// for their own node types; most users only need [`Feed::lazy`].
pub trait Evaluate<E> {
    /// Forces this position.
    fn evaluate(&self) -> Step<E>;

    /// Hands over a cached successor so long chains can be dropped without recursion.
    ///
    /// Only called when the node is about to be dropped by its last owner.
    fn detach(&self) -> Option<Feed<E>> {
        None
    }

    /// Whether this position has already been computed and cached.
    fn is_forced(&self) -> bool {
        false
    }
}

/// A lazily produced, possibly infinite sequence of `E`.
pub struct Feed<E> {
    node: Rc<dyn Evaluate<E>>,
}

impl<E> Clone for Feed<E> {
    fn clone(&self) -> Self {
        Feed {
            node: Rc::clone(&self.node),
        }
    }
}

impl<E> Feed<E> {
    /// Wraps a custom position implementation.
    pub fn from_node<N>(node: N) -> Self
    where
        N: Evaluate<E> + 'static,
    {
        Feed {
            node: Rc::new(node),
        }
    }

    /// Forces this position.
    #[inline]
    pub fn evaluate(&self) -> Step<E> {
        self.node.evaluate()
    }

    /// Returns true if forcing this position finds no element.
    pub fn is_empty(&self) -> bool {
        self.evaluate().is_none()
    }

    /// Returns the first element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyFeed`] if the feed is exhausted.
    pub fn head(&self) -> Result<E> {
        self.evaluate()
            .map(|(head, _)| head)
            .ok_or_else(|| Error::empty_feed("head"))
    }

    /// Returns the feed after the first element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyFeed`] if the feed is exhausted.
    pub fn tail(&self) -> Result<Feed<E>> {
        self.evaluate()
            .map(|(_, tail)| tail)
            .ok_or_else(|| Error::empty_feed("tail"))
    }

    /// Whether this position has been forced and cached.
    ///
    /// Always false for positions that do not memoize.
    pub fn is_forced(&self) -> bool {
        self.node.is_forced()
    }

    /// Returns true if both handles refer to the same position.
    pub fn ptr_eq(&self, other: &Feed<E>) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }

    /// Iterates the elements from this position without consuming the feed.
    pub fn iter(&self) -> FeedIter<E> {
        FeedIter {
            current: self.clone(),
        }
    }

    fn detach_if_unique(&self) -> Option<Feed<E>> {
        if Rc::strong_count(&self.node) == 1 {
            self.node.detach()
        } else {
            None
        }
    }
}

impl<E: Clone + 'static> Feed<E> {
    /// The exhausted feed.
    pub fn empty() -> Self {
        Feed::from_node(Exhausted)
    }

    /// A feed with `head` in front of `tail`.
    pub fn cons(head: E, tail: Feed<E>) -> Self {
        Feed::from_node(Cons {
            head,
            tail: RefCell::new(Some(tail)),
        })
    }

    /// A feed of exactly one element.
    pub fn once(value: E) -> Self {
        Feed::cons(value, Feed::empty())
    }

    /// A memoizing position: `compute` runs the first time the position is forced
    /// and never again.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use feedkit::Feed;
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    ///
    /// let calls = Rc::new(Cell::new(0));
    /// let counter = Rc::clone(&calls);
    /// let feed = Feed::lazy(move || {
    ///     counter.set(counter.get() + 1);
    ///     Some(("x", Feed::empty()))
    /// });
    ///
    /// for _ in 0..5 {
    ///     assert_eq!(feed.head().unwrap(), "x");
    /// }
    /// assert_eq!(calls.get(), 1);
    /// ```
    pub fn lazy<F>(compute: F) -> Self
    where
        F: FnOnce() -> Step<E> + 'static,
    {
        Feed::from_node(Memo {
            state: RefCell::new(State::Unevaluated(Box::new(compute))),
        })
    }

    /// A memoizing position whose whole continuation is produced by `make`.
    pub fn defer<F>(make: F) -> Self
    where
        F: FnOnce() -> Feed<E> + 'static,
    {
        Feed::lazy(move || make().evaluate())
    }

    /// Wraps an iterator. Each item is pulled exactly once, when its position is
    /// first forced.
    pub fn from_iterator<I>(items: I) -> Self
    where
        I: IntoIterator<Item = E>,
        I::IntoIter: 'static,
    {
        pull(items.into_iter())
    }

    /// The infinite feed `seed, step(seed), step(step(seed)), ...`.
    ///
    /// The successor's seed is computed when a position is forced.
    pub fn iterate<F>(seed: E, step: F) -> Self
    where
        F: Fn(&E) -> E + 'static,
    {
        iterate_from(seed, Rc::new(step))
    }

    /// Builds a feed from a state machine: `f` yields an element and the next
    /// state, or `None` to stop.
    pub fn unfold<S, F>(state: S, f: F) -> Self
    where
        S: 'static,
        F: Fn(S) -> Option<(E, S)> + 'static,
    {
        unfold_from(state, Rc::new(f))
    }

    /// The infinite feed repeating `value`.
    pub fn repeat(value: E) -> Self {
        Feed::from_node(Repeat { value })
    }
}

impl Feed<i64> {
    /// The integers in `start..end`.
    pub fn range(start: i64, end: i64) -> Self {
        Feed::from_iterator(start..end)
    }

    /// The infinite feed of integers from `start`.
    pub fn integers_from(start: i64) -> Self {
        Feed::iterate(start, |n| n + 1)
    }
}

impl<E> Drop for Feed<E> {
    fn drop(&mut self) {
        let mut next = self.detach_if_unique();
        while let Some(feed) = next {
            next = feed.detach_if_unique();
        }
    }
}

impl<E> fmt::Debug for Feed<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Feed")
            .field("forced", &self.is_forced())
            .finish()
    }
}

impl<E> IntoIterator for Feed<E> {
    type Item = E;
    type IntoIter = FeedIter<E>;

    fn into_iter(self) -> FeedIter<E> {
        FeedIter { current: self }
    }
}

impl<'a, E> IntoIterator for &'a Feed<E> {
    type Item = E;
    type IntoIter = FeedIter<E>;

    fn into_iter(self) -> FeedIter<E> {
        self.iter()
    }
}

/// Collects eagerly into a vector-backed feed.
impl<E: Clone + 'static> FromIterator<E> for Feed<E> {
    fn from_iter<I: IntoIterator<Item = E>>(items: I) -> Self {
        let items: Rc<[E]> = items.into_iter().collect();
        Feed::from_node(Slice { items, index: 0 })
    }
}

/// Iterator over the elements of a feed, walking one position per item.
pub struct FeedIter<E> {
    current: Feed<E>,
}

impl<E> FeedIter<E> {
    /// The position the iterator will force next.
    pub fn remaining(&self) -> &Feed<E> {
        &self.current
    }
}

impl<E> Iterator for FeedIter<E> {
    type Item = E;

    fn next(&mut self) -> Option<E> {
        let (head, tail) = self.current.evaluate()?;
        self.current = tail;
        Some(head)
    }
}

impl<E> fmt::Debug for FeedIter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedIter")
            .field("current", &self.current)
            .finish()
    }
}

struct Exhausted;

impl<E> Evaluate<E> for Exhausted {
    fn evaluate(&self) -> Step<E> {
        None
    }
}

struct Cons<E> {
    head: E,
    // Only emptied by `detach`, once nothing else can reach this node.
    tail: RefCell<Option<Feed<E>>>,
}

impl<E: Clone> Evaluate<E> for Cons<E> {
    fn evaluate(&self) -> Step<E> {
        let tail = self.tail.borrow().clone()?;
        Some((self.head.clone(), tail))
    }

    fn detach(&self) -> Option<Feed<E>> {
        self.tail.try_borrow_mut().ok()?.take()
    }

    fn is_forced(&self) -> bool {
        true
    }
}

struct Repeat<E> {
    value: E,
}

impl<E: Clone + 'static> Evaluate<E> for Repeat<E> {
    fn evaluate(&self) -> Step<E> {
        Some((self.value.clone(), Feed::repeat(self.value.clone())))
    }
}

struct Slice<E> {
    items: Rc<[E]>,
    index: usize,
}

impl<E: Clone + 'static> Evaluate<E> for Slice<E> {
    fn evaluate(&self) -> Step<E> {
        let head = self.items.get(self.index)?.clone();
        let tail = Feed::from_node(Slice {
            items: Rc::clone(&self.items),
            index: self.index + 1,
        });
        Some((head, tail))
    }

    fn is_forced(&self) -> bool {
        true
    }
}

enum State<E> {
    Unevaluated(Box<dyn FnOnce() -> Step<E>>),
    // Left in place while computing; also what a panicking compute leaves behind.
    Forcing,
    Evaluated(Step<E>),
}

struct Memo<E> {
    state: RefCell<State<E>>,
}

impl<E: Clone> Evaluate<E> for Memo<E> {
    fn evaluate(&self) -> Step<E> {
        if let State::Evaluated(step) = &*self.state.borrow() {
            return step.clone();
        }
        match self.state.replace(State::Forcing) {
            State::Unevaluated(compute) => {
                let step = compute();
                *self.state.borrow_mut() = State::Evaluated(step.clone());
                step
            }
            _ => {
                tracing::warn!("memoized feed position forced while already forcing");
                panic!("feed position re-entered during its own computation or poisoned by an earlier panic")
            }
        }
    }

    fn detach(&self) -> Option<Feed<E>> {
        let mut state = self.state.try_borrow_mut().ok()?;
        match std::mem::replace(&mut *state, State::Forcing) {
            State::Evaluated(Some((_, tail))) => Some(tail),
            _ => None,
        }
    }

    fn is_forced(&self) -> bool {
        matches!(
            self.state.try_borrow().as_deref(),
            Ok(State::Evaluated(_))
        )
    }
}

fn pull<E, I>(mut items: I) -> Feed<E>
where
    E: Clone + 'static,
    I: Iterator<Item = E> + 'static,
{
    Feed::lazy(move || {
        let head = items.next()?;
        Some((head, pull(items)))
    })
}

fn iterate_from<E: Clone + 'static>(seed: E, step: Rc<dyn Fn(&E) -> E>) -> Feed<E> {
    Feed::lazy(move || {
        let next = step(&seed);
        Some((seed, iterate_from(next, step)))
    })
}

fn unfold_from<E, S>(state: S, f: Rc<dyn Fn(S) -> Option<(E, S)>>) -> Feed<E>
where
    E: Clone + 'static,
    S: 'static,
{
    Feed::lazy(move || {
        let (head, next) = f(state)?;
        Some((head, unfold_from(next, f)))
    })
}
