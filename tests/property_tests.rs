//! Property-based tests for the feed algebra, batching, splitting and scanning.

use feedkit::factory::VecFactory;
use feedkit::{Feed, Scanner, Splitter};
use proptest::prelude::*;

fn feed_of(v: &[i32]) -> Feed<i32> {
    Feed::from_iterator(v.to_vec())
}

fn items(feed: &Feed<i32>) -> Vec<i32> {
    feed.iter().collect()
}

proptest! {
    #[test]
    fn prop_map_identity(v in prop::collection::vec(any::<i32>(), 0..40)) {
        let mapped = feed_of(&v).map(|x| x);
        prop_assert_eq!(mapped.count(), v.len());
        prop_assert_eq!(items(&mapped), v);
    }

    #[test]
    fn prop_append_empty_is_identity(v in prop::collection::vec(any::<i32>(), 0..40)) {
        let feed = feed_of(&v);
        prop_assert_eq!(items(&feed.append(&Feed::empty())), v.clone());
        prop_assert_eq!(items(&Feed::empty().append(&feed)), v);
    }

    #[test]
    fn prop_drop_composes(
        v in prop::collection::vec(any::<i32>(), 0..40),
        m in 0usize..30,
        n in 0usize..30,
    ) {
        let feed = feed_of(&v);
        prop_assert_eq!(items(&feed.drop(m).drop(n)), items(&feed.drop(m + n)));
    }

    #[test]
    fn prop_filter_fuses(v in prop::collection::vec(-100i32..100, 0..40)) {
        let feed = feed_of(&v);
        let twice = feed.filter(|x| x % 2 == 0).filter(|x| *x > 0);
        let once = feed.filter(|x| x % 2 == 0 && *x > 0);
        prop_assert_eq!(items(&twice), items(&once));
    }

    #[test]
    fn prop_take_then_drop_partitions(v in prop::collection::vec(any::<i32>(), 0..40), k in 0usize..50) {
        let feed = feed_of(&v);
        let mut joined = items(&feed.take(k));
        joined.extend(items(&feed.drop(k)));
        prop_assert_eq!(joined, v);
    }

    #[test]
    fn prop_group_partitions(v in prop::collection::vec(any::<i32>(), 0..60), n in 1usize..9) {
        let batches: Vec<Vec<i32>> = feed_of(&v).group(n, VecFactory).iter().collect();
        prop_assert_eq!(batches.len(), (v.len() + n - 1) / n);
        if let Some((last, full)) = batches.split_last() {
            prop_assert!(full.iter().all(|b| b.len() == n));
            prop_assert!(!last.is_empty() && last.len() <= n);
        }
        prop_assert_eq!(batches.concat(), v);
    }

    #[test]
    fn prop_zip_length_is_min(a in prop::collection::vec(any::<i32>(), 0..30), b in prop::collection::vec(any::<i32>(), 0..30)) {
        let zipped = feed_of(&a).zip(&feed_of(&b));
        prop_assert_eq!(zipped.count(), a.len().min(b.len()));
    }

    #[test]
    fn prop_split_then_join_restores_text(text in "[ab,]{0,30}") {
        let tokens = Splitter::on_char(',').split_to_vec(&text);
        prop_assert_eq!(tokens.len(), text.matches(',').count() + 1);
        prop_assert_eq!(tokens.join(","), text);
    }

    #[test]
    fn prop_omit_empty_matches_filtering(text in "[ab,]{0,30}") {
        let all = Splitter::on_char(',').split_to_vec(&text);
        let kept = Splitter::on_char(',').omit_empty().split_to_vec(&text);
        let expected: Vec<String> = all.into_iter().filter(|t| !t.is_empty()).collect();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn prop_fixed_width_chunks(text in "[a-z]{0,30}", width in 1usize..7) {
        let chunks = Splitter::fixed_width(width).unwrap().split_to_vec(&text);
        prop_assert_eq!(chunks.concat(), text.clone());
        if !text.is_empty() {
            prop_assert_eq!(chunks.len(), (text.len() + width - 1) / width);
            prop_assert!(chunks.iter().all(|c| !c.is_empty() && c.len() <= width));
        }
    }

    #[test]
    fn prop_failed_scan_seq_keeps_position(text in "[ab]{0,12}", literal in "[ab]{1,4}", skip in 0usize..4) {
        let mut scanner = Scanner::from_str(&text);
        for _ in 0..skip {
            scanner.scan_char().unwrap();
        }
        let before = scanner.position();
        let matched = scanner.scan_seq(&literal).unwrap();
        let rest: String = text.chars().skip(before).collect();
        if matched {
            prop_assert!(rest.starts_with(literal.as_str()));
            prop_assert_eq!(scanner.position(), before + literal.len());
        } else {
            prop_assert!(!rest.starts_with(literal.as_str()));
            prop_assert_eq!(scanner.position(), before);
            prop_assert_eq!(scanner.scan_to_eof().unwrap(), rest);
        }
    }

    #[test]
    fn prop_scan_to_seq_stops_at_first_occurrence(text in "[ab]{0,20}", literal in "[ab]{1,3}") {
        let mut scanner = Scanner::from_str(&text);
        let prefix = scanner.scan_to_seq(&literal).unwrap();
        match text.find(literal.as_str()) {
            Some(i) => {
                prop_assert_eq!(prefix.as_str(), &text[..i]);
                prop_assert!(scanner.lookahead_seq(&literal).unwrap());
            }
            None => {
                prop_assert_eq!(prefix, text);
                prop_assert!(scanner.is_eof().unwrap());
            }
        }
    }
}
