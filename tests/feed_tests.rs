use std::cell::{Cell, RefCell};
use std::rc::Rc;

use feedkit::combinators::{self, least, greatest};
use feedkit::factory::{DequeFactory, VecFactory};
use feedkit::{feed, Error, Evaluate, Feed, Step};

#[test]
fn test_memoized_compute_runs_once_across_many_forces() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let feed = Feed::lazy(move || {
        counter.set(counter.get() + 1);
        Some((1, Feed::empty()))
    });

    for _ in 0..5 {
        feed.evaluate();
    }
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_recursive_infinite_definition() {
    fn fibs(a: u64, b: u64) -> Feed<u64> {
        Feed::lazy(move || Some((a, fibs(b, a + b))))
    }

    let fib = fibs(0, 1);
    let first: Vec<u64> = fib.take(10).iter().collect();
    assert_eq!(first, vec![0, 1, 1, 2, 3, 5, 8, 13, 21, 34]);
    assert_eq!(fib.nth(50), Some(12_586_269_025));
}

#[test]
fn test_shared_feed_traversed_by_two_consumers() {
    let pulls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&pulls);
    let source = Feed::from_iterator((1..=4).inspect(move |_| seen.set(seen.get() + 1)));

    let evens = source.filter(|n| n % 2 == 0);
    let odds = source.filter(|n| n % 2 == 1);
    assert_eq!(evens.iter().collect::<Vec<_>>(), vec![2, 4]);
    assert_eq!(odds.iter().collect::<Vec<_>>(), vec![1, 3]);
    assert_eq!(pulls.get(), 4);
}

#[test]
fn test_head_tail_on_exhausted() {
    let feed = Feed::range(0, 1).tail().unwrap();
    assert!(matches!(feed.head(), Err(Error::EmptyFeed { .. })));
    assert!(matches!(feed.tail(), Err(Error::EmptyFeed { .. })));
}

#[test]
fn test_errors_surface_only_when_forced() {
    let chain = Feed::<i64>::empty().map(|n| n + 1).filter(|n| *n > 0).take(3);
    assert!(chain.head().is_err());
}

#[test]
fn test_zip_example() {
    let zipped = feed![1, 2, 3].zip(&feed!["a", "b"]);
    assert_eq!(zipped.iter().collect::<Vec<_>>(), vec![(1, "a"), (2, "b")]);
}

#[test]
fn test_stack_safety_of_skipping_combinators() {
    let source = Feed::integers_from(0);
    let target = 1_000_000;

    assert_eq!(source.filter(move |n| *n == target).head().unwrap(), target);
    assert_eq!(source.drop_while(move |n| *n < target).head().unwrap(), target);
    assert_eq!(source.drop(target as usize).head().unwrap(), target);

    let sparse = source.map(move |n| if n == target { Feed::once(n) } else { Feed::empty() });
    assert_eq!(sparse.flatten().head().unwrap(), target);
}

#[test]
fn test_long_drains_are_iterative() {
    let source = Feed::range(0, 2_000_000);
    assert_eq!(source.count(), 2_000_000);
    assert_eq!(source.fold(0i64, |acc, n| acc + n), 1_999_999_000_000);
    assert_eq!(least(&source), Some(0));
    assert_eq!(greatest(&source), Some(1_999_999));
    assert!(source.all(|n| *n >= 0));
}

#[test]
fn test_group_into_deques() {
    let batches: Vec<_> = Feed::range(0, 5).group(2, DequeFactory).iter().collect();
    assert_eq!(batches.len(), 3);
    assert_eq!(batches[2].front(), Some(&4));
}

#[test]
fn test_group_exact_multiple_has_no_trailing_batch() {
    let batches = Feed::range(0, 9).group(3, VecFactory);
    assert_eq!(batches.count(), 3);
    assert!(batches.drop(3).is_empty());
}

#[test]
fn test_take_while_excludes_boundary_and_drop_while_keeps_it() {
    let words = feed!["a", "bb", "c", "dd"];
    let short: Vec<_> = words.take_while(|w| w.len() == 1).iter().collect();
    let rest: Vec<_> = words.drop_while(|w| w.len() == 1).iter().collect();
    assert_eq!(short, vec!["a"]);
    assert_eq!(rest, vec!["bb", "c", "dd"]);
}

#[test]
fn test_foreach_visits_in_order() {
    let visited = RefCell::new(Vec::new());
    combinators::foreach(&feed!['x', 'y'], |c| visited.borrow_mut().push(c));
    assert_eq!(visited.into_inner(), vec!['x', 'y']);
}

struct Countdown(u32);

impl Evaluate<u32> for Countdown {
    fn evaluate(&self) -> Step<u32> {
        if self.0 == 0 {
            None
        } else {
            Some((self.0, Feed::from_node(Countdown(self.0 - 1))))
        }
    }
}

#[test]
fn test_custom_node() {
    let feed = Feed::from_node(Countdown(3));
    assert_eq!(feed.iter().collect::<Vec<_>>(), vec![3, 2, 1]);
    assert!(!feed.is_forced());

    let cached = feed.memoize();
    assert_eq!(cached.count(), 3);
    assert!(cached.is_forced());
}

#[test]
fn test_concat_and_scan() {
    let joined = combinators::concat(vec![feed![1, 2], Feed::empty(), feed![3]]);
    let running: Vec<i32> = joined.scan(0, |acc, n| acc + n).iter().collect();
    assert_eq!(running, vec![1, 3, 6]);
}
