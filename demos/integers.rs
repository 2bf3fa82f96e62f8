//! Infinite, memoized feeds and combinators.
//!
//! Run with: cargo run --example integers

use feedkit::factory::VecFactory;
use feedkit::Feed;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let naturals = Feed::integers_from(1);

    // Transform lazily; nothing is computed until printed
    let squares = naturals.map(|n| n * n);
    println!("first squares: {:?}", squares.take(6).iter().collect::<Vec<_>>());

    // Primes by trial division
    let primes = naturals
        .drop(1)
        .filter(|n| (2..).take_while(|d| d * d <= *n).all(|d| n % d != 0));
    println!("primes: {:?}", primes.take(10).iter().collect::<Vec<_>>());

    // Batches of three
    for batch in naturals.take(8).group(3, VecFactory) {
        println!("batch: {:?}", batch);
    }

    // Running totals until they pass 50
    let totals = naturals.scan(0, |acc, n| acc + n).take_while(|t| *t <= 50);
    println!("running totals: {:?}", totals.iter().collect::<Vec<_>>());

    println!("first position forced: {}", naturals.is_forced());
    Ok(())
}
