//! Collection factories.
//!
//! [`group`](crate::combinators::group) and [`collect_into`](crate::combinators::collect_into)
//! do not care which container they fill. They take a [`CollectionFactory`], which knows
//! how to create an empty container and insert into it.
//!
//! | Factory | Collection | Notes |
//! |---------|-----------|-------|
//! | [`VecFactory`] | `Vec<T>` | default for batching |
//! | [`DequeFactory`] | `VecDeque<T>` | |
//! | [`OrderedSetFactory`] | `IndexSet<T>` | insertion order, duplicates collapse |
//! | [`SortedSetFactory`] | `BTreeSet<T>` | sorted, duplicates collapse |
//!
//! ## Examples
//!
//! ```rust
//! use feedkit::factory::{CollectionFactory, OrderedSetFactory};
//!
//! let set = OrderedSetFactory.build_from(vec!["b", "a", "b"]);
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec!["b", "a"]);
//! ```

use indexmap::IndexSet;
use std::collections::{BTreeSet, VecDeque};
use std::hash::Hash;
use std::rc::Rc;

/// Builds containers of `T`.
pub trait CollectionFactory<T> {
    type Collection;

    /// Creates an empty container sized for about `capacity` elements.
    fn with_capacity(&self, capacity: usize) -> Self::Collection;

    /// Adds one element.
    fn insert(&self, collection: &mut Self::Collection, item: T);

    /// Creates an empty container.
    fn build(&self) -> Self::Collection {
        self.with_capacity(0)
    }

    /// Creates a container holding `items`.
    fn build_from<I>(&self, items: I) -> Self::Collection
    where
        I: IntoIterator<Item = T>,
    {
        let items = items.into_iter();
        let mut collection = self.with_capacity(items.size_hint().0);
        for item in items {
            self.insert(&mut collection, item);
        }
        collection
    }
}

/// Builds `Vec<T>`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VecFactory;

impl VecFactory {
    /// Turns a built vector into an immutable shared slice.
    pub fn freeze<T>(items: Vec<T>) -> Rc<[T]> {
        items.into()
    }
}

impl<T> CollectionFactory<T> for VecFactory {
    type Collection = Vec<T>;

    fn with_capacity(&self, capacity: usize) -> Vec<T> {
        Vec::with_capacity(capacity)
    }

    fn insert(&self, collection: &mut Vec<T>, item: T) {
        collection.push(item);
    }
}

/// Builds `VecDeque<T>`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DequeFactory;

impl<T> CollectionFactory<T> for DequeFactory {
    type Collection = VecDeque<T>;

    fn with_capacity(&self, capacity: usize) -> VecDeque<T> {
        VecDeque::with_capacity(capacity)
    }

    fn insert(&self, collection: &mut VecDeque<T>, item: T) {
        collection.push_back(item);
    }
}

/// Builds insertion-ordered sets.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrderedSetFactory;

impl<T: Hash + Eq> CollectionFactory<T> for OrderedSetFactory {
    type Collection = IndexSet<T>;

    fn with_capacity(&self, capacity: usize) -> IndexSet<T> {
        IndexSet::with_capacity(capacity)
    }

    fn insert(&self, collection: &mut IndexSet<T>, item: T) {
        collection.insert(item);
    }
}

/// Builds sorted sets.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SortedSetFactory;

impl<T: Ord> CollectionFactory<T> for SortedSetFactory {
    type Collection = BTreeSet<T>;

    fn with_capacity(&self, _capacity: usize) -> BTreeSet<T> {
        BTreeSet::new()
    }

    fn insert(&self, collection: &mut BTreeSet<T>, item: T) {
        collection.insert(item);
    }
}
