//! Grouping Module
//! Partitions items by one or two categorical keys, preserving source order.

use indexmap::{Equivalent, IndexMap};
use std::hash::Hash;

/// One-level grouping result: key to the items sharing it, in source order.
/// Keys iterate in first-seen order.
pub type Grouped<K, T> = IndexMap<K, Vec<T>>;

/// Two-level grouping result.
pub type Grouped2<K1, K2, T> = IndexMap<K1, Grouped<K2, T>>;

/// Lookup of one group that treats an absent key as an empty group.
pub trait GroupSlice<K, T> {
    fn group<Q>(&self, key: &Q) -> &[T]
    where
        Q: ?Sized + Hash + Equivalent<K>;
}

impl<K: Hash + Eq, T> GroupSlice<K, T> for Grouped<K, T> {
    fn group<Q>(&self, key: &Q) -> &[T]
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.get(key).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Partition `items` by `key_fn`.
///
/// No sorting and no deduplication: groups appear in first-seen key order and
/// items keep their source order inside each group.
pub fn group<I, K, F>(items: I, mut key_fn: F) -> Grouped<K, I::Item>
where
    I: IntoIterator,
    K: Eq + Hash,
    F: FnMut(&I::Item) -> K,
{
    let mut grouped = Grouped::new();
    for item in items {
        grouped.entry(key_fn(&item)).or_default().push(item);
    }
    grouped
}

/// Partition `items` by `key1`, then each group by `key2`.
pub fn group2<I, K1, K2, F1, F2>(items: I, mut key1: F1, mut key2: F2) -> Grouped2<K1, K2, I::Item>
where
    I: IntoIterator,
    K1: Eq + Hash,
    K2: Eq + Hash,
    F1: FnMut(&I::Item) -> K1,
    F2: FnMut(&I::Item) -> K2,
{
    let mut grouped = Grouped2::new();
    for item in items {
        let outer = key1(&item);
        let inner = key2(&item);
        grouped
            .entry(outer)
            .or_default()
            .entry(inner)
            .or_default()
            .push(item);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn groups_follow_first_seen_order() {
        let words = ["judo", "swim", "judo", "box", "swim"];
        let grouped = group(words.iter().enumerate(), |(_, w)| **w);

        let keys: Vec<_> = grouped.keys().copied().collect();
        assert_eq!(keys, vec!["judo", "swim", "box"]);

        let judo: Vec<usize> = grouped.group("judo").iter().map(|(i, _)| *i).collect();
        assert_eq!(judo, vec![0, 2]);
        assert!(grouped.group("fencing").is_empty());
        assert_eq!(grouped.keys().next(), Some(&"judo"));
    }

    #[test]
    fn two_level_grouping() {
        let rows = [("Judo", "USA"), ("Judo", "JPN"), ("Swim", "USA"), ("Judo", "USA")];
        let grouped = group2(rows.iter(), |r| r.0, |r| r.1);

        assert_eq!(grouped.len(), 2);
        let judo = grouped.get("Judo").unwrap();
        assert_eq!(judo.keys().copied().collect::<Vec<_>>(), vec!["USA", "JPN"]);
        assert_eq!(judo.group("USA").len(), 2);
        assert!(grouped.get("Fencing").is_none());
    }

    proptest! {
        #[test]
        fn prop_group_is_a_partition(values in proptest::collection::vec(0u8..6, 0..64)) {
            let grouped = group(values.iter().copied().enumerate(), |(_, v)| *v);

            let mut seen: Vec<usize> = grouped
                .values()
                .flat_map(|items| items.iter().map(|(i, _)| *i))
                .collect();
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..values.len()).collect::<Vec<_>>());

            for (key, items) in grouped.iter() {
                prop_assert!(!items.is_empty());
                prop_assert!(items.iter().all(|(_, v)| v == key));
                // Source order within a group
                prop_assert!(items.windows(2).all(|w| w[0].0 < w[1].0));
            }
        }

        #[test]
        fn prop_group2_is_a_partition(
            rows in proptest::collection::vec((0u8..4, 0u8..4), 0..64)
        ) {
            let grouped = group2(rows.iter().copied().enumerate(), |(_, r)| r.0, |(_, r)| r.1);

            let mut seen: Vec<usize> = Vec::new();
            for (outer, inner) in &grouped {
                prop_assert!(!inner.is_empty());
                for (key, items) in inner {
                    prop_assert!(!items.is_empty());
                    prop_assert!(items.iter().all(|(_, r)| r.0 == *outer && r.1 == *key));
                    prop_assert!(items.windows(2).all(|w| w[0].0 < w[1].0));
                    seen.extend(items.iter().map(|(i, _)| *i));
                }
            }
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..rows.len()).collect::<Vec<_>>());
        }
    }
}
