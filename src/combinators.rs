//! Operations over [`Feed`]s.
//!
//! Every function here is also available as a method on `Feed` for chaining:
//!
//! ```rust
//! use feedkit::Feed;
//!
//! let squares_of_odds: Vec<i64> = Feed::integers_from(1)
//!     .filter(|n| n % 2 == 1)
//!     .map(|n| n * n)
//!     .take(4)
//!     .iter()
//!     .collect();
//! assert_eq!(squares_of_odds, vec![1, 9, 25, 49]);
//! ```
//!
//! ## Laziness
//!
//! Transformations (`map`, `filter`, `take`, `zip`, ...) build new feeds without forcing
//! their source. Traversals (`foreach`, `fold`, `count`, ...) drain a feed with a loop and
//! return a plain value.
//!
//! ## Stack depth
//!
//! `filter`, `drop`, `drop_while`, `group` and `flatten` may have to skip an unbounded run
//! of source elements before they can produce one. They do that skipping in a loop inside a
//! single `evaluate`, so forcing them takes constant stack no matter how long the run is.
//! The remaining transformations produce at most one element per source element and
//! build one new node per step.
//!
//! Skipping never gives up: filtering an infinite feed with a predicate that never holds
//! again does not terminate.

use std::cmp::Ordering;
use std::rc::Rc;

use crate::factory::CollectionFactory;
use crate::feed::{Evaluate, Feed, Step};

type Predicate<E> = Rc<dyn Fn(&E) -> bool>;

/// Applies `f` to every element, when its position is forced.
pub fn map<E, T, F>(seq: &Feed<E>, f: F) -> Feed<T>
where
    E: 'static,
    T: 'static,
    F: Fn(E) -> T + 'static,
{
    map_with(seq.clone(), Rc::new(f))
}

fn map_with<E: 'static, T: 'static>(source: Feed<E>, f: Rc<dyn Fn(E) -> T>) -> Feed<T> {
    Feed::from_node(MapNode { source, f })
}

struct MapNode<E, T> {
    source: Feed<E>,
    f: Rc<dyn Fn(E) -> T>,
}

impl<E: 'static, T: 'static> Evaluate<T> for MapNode<E, T> {
    fn evaluate(&self) -> Step<T> {
        let (head, tail) = self.source.evaluate()?;
        Some(((self.f)(head), map_with(tail, Rc::clone(&self.f))))
    }
}

/// Keeps the elements satisfying `pred`.
pub fn filter<E, P>(seq: &Feed<E>, pred: P) -> Feed<E>
where
    E: 'static,
    P: Fn(&E) -> bool + 'static,
{
    filter_with(seq.clone(), Rc::new(pred))
}

fn filter_with<E: 'static>(source: Feed<E>, pred: Predicate<E>) -> Feed<E> {
    Feed::from_node(FilterNode { source, pred })
}

struct FilterNode<E> {
    source: Feed<E>,
    pred: Predicate<E>,
}

impl<E: 'static> Evaluate<E> for FilterNode<E> {
    fn evaluate(&self) -> Step<E> {
        let mut current = self.source.clone();
        loop {
            let (head, tail) = current.evaluate()?;
            if (self.pred)(&head) {
                return Some((head, filter_with(tail, Rc::clone(&self.pred))));
            }
            current = tail;
        }
    }
}

/// Yields all of `first`, then all of `second`.
pub fn append<E: 'static>(first: &Feed<E>, second: &Feed<E>) -> Feed<E> {
    append_owned(first.clone(), second.clone())
}

fn append_owned<E: 'static>(first: Feed<E>, second: Feed<E>) -> Feed<E> {
    Feed::from_node(AppendNode { first, second })
}

struct AppendNode<E> {
    first: Feed<E>,
    second: Feed<E>,
}

impl<E: 'static> Evaluate<E> for AppendNode<E> {
    fn evaluate(&self) -> Step<E> {
        match self.first.evaluate() {
            Some((head, tail)) => Some((head, append_owned(tail, self.second.clone()))),
            None => self.second.evaluate(),
        }
    }
}

/// Appends every feed of `feeds` in order.
pub fn concat<E, I>(feeds: I) -> Feed<E>
where
    E: Clone + 'static,
    I: IntoIterator<Item = Feed<E>>,
{
    flatten(&feeds.into_iter().collect())
}

/// Flattens a feed of feeds. Runs of empty inner feeds are skipped in a loop.
pub fn flatten<E: 'static>(seqs: &Feed<Feed<E>>) -> Feed<E> {
    flatten_owned(seqs.clone())
}

fn flatten_owned<E: 'static>(outer: Feed<Feed<E>>) -> Feed<E> {
    Feed::from_node(FlattenNode { outer })
}

struct FlattenNode<E> {
    outer: Feed<Feed<E>>,
}

impl<E: 'static> Evaluate<E> for FlattenNode<E> {
    fn evaluate(&self) -> Step<E> {
        let mut outer = self.outer.clone();
        loop {
            let (inner, rest) = outer.evaluate()?;
            if let Some((head, tail)) = inner.evaluate() {
                return Some((head, append_owned(tail, flatten_owned(rest))));
            }
            outer = rest;
        }
    }
}

/// Maps every element to a feed and flattens the results.
pub fn flat_map<E, T, F>(seq: &Feed<E>, f: F) -> Feed<T>
where
    E: 'static,
    T: 'static,
    F: Fn(E) -> Feed<T> + 'static,
{
    flatten_owned(map(seq, f))
}

/// The first `n` elements.
pub fn take<E: 'static>(seq: &Feed<E>, n: usize) -> Feed<E> {
    take_owned(seq.clone(), n)
}

fn take_owned<E: 'static>(source: Feed<E>, remaining: usize) -> Feed<E> {
    if remaining == 0 {
        return Feed::from_node(Nothing);
    }
    Feed::from_node(TakeNode { source, remaining })
}

struct Nothing;

impl<E> Evaluate<E> for Nothing {
    fn evaluate(&self) -> Step<E> {
        None
    }
}

struct TakeNode<E> {
    source: Feed<E>,
    remaining: usize,
}

impl<E: 'static> Evaluate<E> for TakeNode<E> {
    fn evaluate(&self) -> Step<E> {
        let (head, tail) = self.source.evaluate()?;
        Some((head, take_owned(tail, self.remaining - 1)))
    }
}

/// Skips the first `n` elements. `drop(seq, 0)` is `seq` itself.
pub fn drop<E: 'static>(seq: &Feed<E>, n: usize) -> Feed<E> {
    if n == 0 {
        return seq.clone();
    }
    Feed::from_node(DropNode {
        source: seq.clone(),
        count: n,
    })
}

struct DropNode<E> {
    source: Feed<E>,
    count: usize,
}

impl<E: 'static> Evaluate<E> for DropNode<E> {
    fn evaluate(&self) -> Step<E> {
        let mut current = self.source.clone();
        for _ in 0..self.count {
            let (_, tail) = current.evaluate()?;
            current = tail;
        }
        current.evaluate()
    }
}

/// Elements up to, not including, the first one failing `pred`.
pub fn take_while<E, P>(seq: &Feed<E>, pred: P) -> Feed<E>
where
    E: 'static,
    P: Fn(&E) -> bool + 'static,
{
    take_while_with(seq.clone(), Rc::new(pred))
}

fn take_while_with<E: 'static>(source: Feed<E>, pred: Predicate<E>) -> Feed<E> {
    Feed::from_node(TakeWhileNode { source, pred })
}

struct TakeWhileNode<E> {
    source: Feed<E>,
    pred: Predicate<E>,
}

impl<E: 'static> Evaluate<E> for TakeWhileNode<E> {
    fn evaluate(&self) -> Step<E> {
        let (head, tail) = self.source.evaluate()?;
        if (self.pred)(&head) {
            Some((head, take_while_with(tail, Rc::clone(&self.pred))))
        } else {
            None
        }
    }
}

/// Skips elements while `pred` holds. The first element failing it is the new head.
pub fn drop_while<E, P>(seq: &Feed<E>, pred: P) -> Feed<E>
where
    E: 'static,
    P: Fn(&E) -> bool + 'static,
{
    Feed::from_node(DropWhileNode {
        source: seq.clone(),
        pred: Box::new(pred),
    })
}

struct DropWhileNode<E> {
    source: Feed<E>,
    pred: Box<dyn Fn(&E) -> bool>,
}

impl<E: 'static> Evaluate<E> for DropWhileNode<E> {
    fn evaluate(&self) -> Step<E> {
        let mut current = self.source.clone();
        loop {
            let (head, tail) = current.evaluate()?;
            if !(self.pred)(&head) {
                return Some((head, tail));
            }
            current = tail;
        }
    }
}

/// Batches consecutive elements into collections of `size` built by `factory`.
///
/// Every batch holds exactly `size` elements except possibly the last, which is never
/// empty. A `size` of zero produces no batches.
///
/// # Examples
///
/// ```rust
/// use feedkit::Feed;
/// use feedkit::factory::VecFactory;
///
/// let batches: Vec<Vec<i64>> = Feed::range(0, 5).group(2, VecFactory).iter().collect();
/// assert_eq!(batches, vec![vec![0, 1], vec![2, 3], vec![4]]);
/// ```
pub fn group<E, F>(seq: &Feed<E>, size: usize, factory: F) -> Feed<F::Collection>
where
    E: 'static,
    F: CollectionFactory<E> + 'static,
    F::Collection: 'static,
{
    if size == 0 {
        return Feed::from_node(Nothing);
    }
    group_with(seq.clone(), size, Rc::new(factory))
}

fn group_with<E, F>(source: Feed<E>, size: usize, factory: Rc<F>) -> Feed<F::Collection>
where
    E: 'static,
    F: CollectionFactory<E> + 'static,
    F::Collection: 'static,
{
    Feed::from_node(GroupNode {
        source,
        size,
        factory,
    })
}

struct GroupNode<E, F> {
    source: Feed<E>,
    size: usize,
    factory: Rc<F>,
}

impl<E, F> Evaluate<F::Collection> for GroupNode<E, F>
where
    E: 'static,
    F: CollectionFactory<E> + 'static,
    F::Collection: 'static,
{
    fn evaluate(&self) -> Step<F::Collection> {
        let mut batch = self.factory.with_capacity(self.size);
        let mut current = self.source.clone();
        let mut taken = 0;
        while taken < self.size {
            let Some((head, tail)) = current.evaluate() else {
                break;
            };
            self.factory.insert(&mut batch, head);
            taken += 1;
            current = tail;
        }
        if taken == 0 {
            return None;
        }
        let rest = if taken < self.size {
            Feed::from_node(Nothing)
        } else {
            group_with(current, self.size, Rc::clone(&self.factory))
        };
        Some((batch, rest))
    }
}

/// Pairs elements positionally, stopping at the shorter feed.
pub fn zip<A: 'static, B: 'static>(a: &Feed<A>, b: &Feed<B>) -> Feed<(A, B)> {
    zip_owned(a.clone(), b.clone())
}

fn zip_owned<A: 'static, B: 'static>(a: Feed<A>, b: Feed<B>) -> Feed<(A, B)> {
    Feed::from_node(ZipNode { a, b })
}

struct ZipNode<A, B> {
    a: Feed<A>,
    b: Feed<B>,
}

impl<A: 'static, B: 'static> Evaluate<(A, B)> for ZipNode<A, B> {
    fn evaluate(&self) -> Step<(A, B)> {
        let (head_a, tail_a) = self.a.evaluate()?;
        let (head_b, tail_b) = self.b.evaluate()?;
        Some(((head_a, head_b), zip_owned(tail_a, tail_b)))
    }
}

/// Pairs each element with its index.
pub fn enumerate<E: 'static>(seq: &Feed<E>) -> Feed<(usize, E)> {
    zip_owned(Feed::iterate(0usize, |i| i + 1), seq.clone())
}

/// Running accumulation: yields `f(init, e0)`, `f(f(init, e0), e1)`, ...
pub fn scan<E, A, F>(seq: &Feed<E>, init: A, f: F) -> Feed<A>
where
    E: 'static,
    A: Clone + 'static,
    F: Fn(A, E) -> A + 'static,
{
    scan_with(seq.clone(), init, Rc::new(f))
}

fn scan_with<E, A>(source: Feed<E>, acc: A, f: Rc<dyn Fn(A, E) -> A>) -> Feed<A>
where
    E: 'static,
    A: Clone + 'static,
{
    Feed::from_node(ScanNode { source, acc, f })
}

struct ScanNode<E, A> {
    source: Feed<E>,
    acc: A,
    f: Rc<dyn Fn(A, E) -> A>,
}

impl<E: 'static, A: Clone + 'static> Evaluate<A> for ScanNode<E, A> {
    fn evaluate(&self) -> Step<A> {
        let (head, tail) = self.source.evaluate()?;
        let acc = (self.f)(self.acc.clone(), head);
        Some((acc.clone(), scan_with(tail, acc, Rc::clone(&self.f))))
    }
}

/// Caches every position of `seq` the first time it is forced through the result.
///
/// Use this before handing a non-memoizing chain to several consumers.
pub fn memoize<E: Clone + 'static>(seq: &Feed<E>) -> Feed<E> {
    memoize_owned(seq.clone())
}

fn memoize_owned<E: Clone + 'static>(source: Feed<E>) -> Feed<E> {
    Feed::lazy(move || {
        let (head, tail) = source.evaluate()?;
        Some((head, memoize_owned(tail)))
    })
}

/// Calls `f` on every element.
pub fn foreach<E, F>(seq: &Feed<E>, mut f: F)
where
    F: FnMut(E),
{
    let mut current = seq.clone();
    while let Some((head, tail)) = current.evaluate() {
        f(head);
        current = tail;
    }
}

/// Folds every element into an accumulator.
pub fn fold<E, A, F>(seq: &Feed<E>, init: A, mut f: F) -> A
where
    F: FnMut(A, E) -> A,
{
    let mut acc = init;
    let mut current = seq.clone();
    while let Some((head, tail)) = current.evaluate() {
        acc = f(acc, head);
        current = tail;
    }
    acc
}

/// The first element satisfying `pred`. Stops forcing once found.
pub fn first<E, P>(seq: &Feed<E>, pred: P) -> Option<E>
where
    P: Fn(&E) -> bool,
{
    let mut current = seq.clone();
    while let Some((head, tail)) = current.evaluate() {
        if pred(&head) {
            return Some(head);
        }
        current = tail;
    }
    None
}

/// Number of elements. Forces the whole feed.
pub fn count<E>(seq: &Feed<E>) -> usize {
    fold(seq, 0, |n, _| n + 1)
}

/// True if some element satisfies `pred`. Stops at the first one.
pub fn any<E, P>(seq: &Feed<E>, pred: P) -> bool
where
    P: Fn(&E) -> bool,
{
    first(seq, pred).is_some()
}

/// True if every element satisfies `pred`. Stops at the first one that does not.
pub fn all<E, P>(seq: &Feed<E>, pred: P) -> bool
where
    P: Fn(&E) -> bool,
{
    first(seq, |e| !pred(e)).is_none()
}

/// The element at index `n`, if the feed is that long.
pub fn nth<E>(seq: &Feed<E>, n: usize) -> Option<E> {
    let mut current = seq.clone();
    for _ in 0..n {
        let (_, tail) = current.evaluate()?;
        current = tail;
    }
    current.evaluate().map(|(head, _)| head)
}

/// The final element, or `None` for an empty feed.
pub fn last<E>(seq: &Feed<E>) -> Option<E> {
    fold(seq, None, |_, e| Some(e))
}

/// True if some element equals `value`.
pub fn contains<E: PartialEq>(seq: &Feed<E>, value: &E) -> bool {
    any(seq, |e| e == value)
}

/// The smallest element under `compare`; the earliest one on ties.
pub fn least_by<E, C>(seq: &Feed<E>, compare: C) -> Option<E>
where
    C: Fn(&E, &E) -> Ordering,
{
    fold(seq, None, |best: Option<E>, e| match best {
        Some(b) if compare(&e, &b) != Ordering::Less => Some(b),
        _ => Some(e),
    })
}

/// The largest element under `compare`; the earliest one on ties.
pub fn greatest_by<E, C>(seq: &Feed<E>, compare: C) -> Option<E>
where
    C: Fn(&E, &E) -> Ordering,
{
    least_by(seq, |a, b| compare(b, a))
}

/// The smallest element; the earliest one on ties. `None` for an empty feed.
pub fn least<E: Ord>(seq: &Feed<E>) -> Option<E> {
    least_by(seq, E::cmp)
}

/// The largest element; the earliest one on ties. `None` for an empty feed.
pub fn greatest<E: Ord>(seq: &Feed<E>) -> Option<E> {
    greatest_by(seq, E::cmp)
}

/// Drains the feed into a collection built by `factory`.
pub fn collect_into<E, F>(seq: &Feed<E>, factory: &F) -> F::Collection
where
    F: CollectionFactory<E>,
{
    factory.build_from(seq.iter())
}

/// Chaining forms of the functions in this module.
impl<E: Clone + 'static> Feed<E> {
    /// See [`map`].
    pub fn map<T, F>(&self, f: F) -> Feed<T>
    where
        T: 'static,
        F: Fn(E) -> T + 'static,
    {
        map(self, f)
    }

    /// See [`filter`].
    pub fn filter<P>(&self, pred: P) -> Feed<E>
    where
        P: Fn(&E) -> bool + 'static,
    {
        filter(self, pred)
    }

    /// See [`flat_map`].
    pub fn flat_map<T, F>(&self, f: F) -> Feed<T>
    where
        T: 'static,
        F: Fn(E) -> Feed<T> + 'static,
    {
        flat_map(self, f)
    }

    /// See [`append`].
    pub fn append(&self, other: &Feed<E>) -> Feed<E> {
        append(self, other)
    }

    /// See [`take`].
    pub fn take(&self, n: usize) -> Feed<E> {
        take(self, n)
    }

    /// See [`drop()`].
    pub fn drop(&self, n: usize) -> Feed<E> {
        drop(self, n)
    }

    /// See [`take_while`].
    pub fn take_while<P>(&self, pred: P) -> Feed<E>
    where
        P: Fn(&E) -> bool + 'static,
    {
        take_while(self, pred)
    }

    /// See [`drop_while`].
    pub fn drop_while<P>(&self, pred: P) -> Feed<E>
    where
        P: Fn(&E) -> bool + 'static,
    {
        drop_while(self, pred)
    }

    /// See [`group`].
    pub fn group<F>(&self, size: usize, factory: F) -> Feed<F::Collection>
    where
        F: CollectionFactory<E> + 'static,
        F::Collection: 'static,
    {
        group(self, size, factory)
    }

    /// See [`zip`].
    pub fn zip<B: 'static>(&self, other: &Feed<B>) -> Feed<(E, B)> {
        zip(self, other)
    }

    /// See [`enumerate`].
    pub fn enumerate(&self) -> Feed<(usize, E)> {
        enumerate(self)
    }

    /// See [`scan`].
    pub fn scan<A, F>(&self, init: A, f: F) -> Feed<A>
    where
        A: Clone + 'static,
        F: Fn(A, E) -> A + 'static,
    {
        scan(self, init, f)
    }

    /// See [`memoize`].
    pub fn memoize(&self) -> Feed<E> {
        memoize(self)
    }

    /// See [`foreach`].
    pub fn foreach<F: FnMut(E)>(&self, f: F) {
        foreach(self, f)
    }

    /// See [`fold`].
    pub fn fold<A, F: FnMut(A, E) -> A>(&self, init: A, f: F) -> A {
        fold(self, init, f)
    }

    /// See [`first`].
    pub fn first<P: Fn(&E) -> bool>(&self, pred: P) -> Option<E> {
        first(self, pred)
    }

    /// See [`count`].
    pub fn count(&self) -> usize {
        count(self)
    }

    /// See [`any`].
    pub fn any<P: Fn(&E) -> bool>(&self, pred: P) -> bool {
        any(self, pred)
    }

    /// See [`all`].
    pub fn all<P: Fn(&E) -> bool>(&self, pred: P) -> bool {
        all(self, pred)
    }

    /// See [`nth`].
    pub fn nth(&self, n: usize) -> Option<E> {
        nth(self, n)
    }

    /// See [`last`].
    pub fn last(&self) -> Option<E> {
        last(self)
    }

    /// See [`collect_into`].
    pub fn collect_into<F: CollectionFactory<E>>(&self, factory: &F) -> F::Collection {
        collect_into(self, factory)
    }
}

impl<E: Clone + 'static> Feed<Feed<E>> {
    /// See [`flatten`].
    pub fn flatten(&self) -> Feed<E> {
        flatten(self)
    }
}

impl<E: Ord + Clone + 'static> Feed<E> {
    /// See [`least`].
    pub fn least(&self) -> Option<E> {
        least(self)
    }

    /// See [`greatest`].
    pub fn greatest(&self) -> Option<E> {
        greatest(self)
    }
}
