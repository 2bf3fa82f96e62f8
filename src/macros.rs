/// Builds a [`Feed`](crate::Feed) from literal elements.
///
/// ```rust
/// use feedkit::{feed, Feed};
///
/// let empty: Feed<i32> = feed![];
/// assert!(empty.is_empty());
///
/// let numbers = feed![1, 2, 3];
/// assert_eq!(numbers.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
///
/// let zeros = feed![0; 4];
/// assert_eq!(zeros.count(), 4);
/// ```
#[macro_export]
macro_rules! feed {
    // Handle empty feed
    () => {
        $crate::Feed::empty()
    };

    // Handle repeated element
    ($elem:expr; $n:expr) => {
        $crate::Feed::repeat($elem).take($n)
    };

    // Handle element list
    ($($elem:expr),+ $(,)?) => {
        <$crate::Feed<_> as ::std::iter::FromIterator<_>>::from_iter([$($elem),+])
    };
}
