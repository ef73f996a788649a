//! General-purpose sort strategies keyed by an arbitrary extraction function.
//!
//! Every strategy sorts ascending by key and works on one index array
//! with explicit `[lo, hi)` ranges; keys are extracted once up front.
//!
//! | Strategy | Stable | Notes |
//! |----------|--------|-------|
//! | Merge | yes | top-down, one scratch buffer |
//! | Quick | no | middle-element pivot, three-way partition |
//! | Heap | no | in-place binary max-heap |
//!
//! Quick and heap sort may reorder items with equal keys; when keys are
//! unique all three agree exactly.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 2.3, 6, 7;
//! Bentley & McIlroy (1993), "Engineering a Sort Function"

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DispatchError, Result};

/// Sort algorithm selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortStrategy {
    /// Stable merge sort.
    #[default]
    Merge,
    /// Three-way quick sort.
    Quick,
    /// Heap sort.
    Heap,
}

impl SortStrategy {
    /// Every strategy.
    pub const ALL: [SortStrategy; 3] = [SortStrategy::Merge, SortStrategy::Quick, SortStrategy::Heap];

    /// Strategy name as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            SortStrategy::Merge => "merge",
            SortStrategy::Quick => "quick",
            SortStrategy::Heap => "heap",
        }
    }

    /// Whether equal keys keep their input order.
    pub fn is_stable(&self) -> bool {
        matches!(self, SortStrategy::Merge)
    }

    /// Returns indices into `items`, ordered ascending by `key`.
    pub fn sort_indices<'a, T, K, F>(&self, items: &'a [T], key: F) -> Vec<usize>
    where
        K: Ord,
        F: Fn(&'a T) -> K,
    {
        let keys: Vec<K> = items.iter().map(key).collect();
        let mut order: Vec<usize> = (0..items.len()).collect();
        match self {
            SortStrategy::Merge => merge_sort(&mut order, &keys),
            SortStrategy::Quick => quick_sort(&mut order, &keys),
            SortStrategy::Heap => heap_sort(&mut order, &keys),
        }
        order
    }

    /// References to `items`, ordered ascending by `key`.
    ///
    /// # Example
    ///
    /// ```
    /// use std::cmp::Reverse;
    /// use u_dispatch::scheduler::SortStrategy;
    ///
    /// let calls = [("I1", 3), ("I2", 5), ("I3", 3)];
    /// let by_urgency = SortStrategy::Merge.sorted(&calls, |c| Reverse(c.1));
    /// let ids: Vec<&str> = by_urgency.iter().map(|c| c.0).collect();
    /// assert_eq!(ids, vec!["I2", "I1", "I3"]);
    /// ```
    pub fn sorted<'a, T, K, F>(&self, items: &'a [T], key: F) -> Vec<&'a T>
    where
        K: Ord,
        F: Fn(&'a T) -> K,
    {
        self.sort_indices(items, key)
            .into_iter()
            .map(|i| &items[i])
            .collect()
    }
}

impl FromStr for SortStrategy {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "merge" => Ok(SortStrategy::Merge),
            "quick" => Ok(SortStrategy::Quick),
            "heap" => Ok(SortStrategy::Heap),
            _ => Err(DispatchError::UnknownSortStrategy(s.to_string())),
        }
    }
}

impl TryFrom<String> for SortStrategy {
    type Error = DispatchError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<SortStrategy> for String {
    fn from(value: SortStrategy) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ======================== Merge sort ========================

fn merge_sort<K: Ord>(order: &mut [usize], keys: &[K]) {
    let mut scratch = order.to_vec();
    merge_sort_range(order, &mut scratch, 0, order.len(), keys);
}

fn merge_sort_range<K: Ord>(
    order: &mut [usize],
    scratch: &mut [usize],
    lo: usize,
    hi: usize,
    keys: &[K],
) {
    if hi - lo <= 1 {
        return;
    }
    let mid = lo + (hi - lo) / 2;
    merge_sort_range(order, scratch, lo, mid, keys);
    merge_sort_range(order, scratch, mid, hi, keys);

    let (mut i, mut j, mut k) = (lo, mid, lo);
    while i < mid && j < hi {
        // `<=` keeps the left run first on ties: stability.
        if keys[order[i]] <= keys[order[j]] {
            scratch[k] = order[i];
            i += 1;
        } else {
            scratch[k] = order[j];
            j += 1;
        }
        k += 1;
    }
    while i < mid {
        scratch[k] = order[i];
        i += 1;
        k += 1;
    }
    while j < hi {
        scratch[k] = order[j];
        j += 1;
        k += 1;
    }
    order[lo..hi].copy_from_slice(&scratch[lo..hi]);
}

// ======================== Quick sort ========================

fn quick_sort<K: Ord>(order: &mut [usize], keys: &[K]) {
    quick_sort_range(order, 0, order.len(), keys);
}

fn quick_sort_range<K: Ord>(order: &mut [usize], mut lo: usize, mut hi: usize, keys: &[K]) {
    while hi - lo > 1 {
        let pivot = order[lo + (hi - lo) / 2];
        let (mut lt, mut i, mut gt) = (lo, lo, hi);
        while i < gt {
            match keys[order[i]].cmp(&keys[pivot]) {
                Ordering::Less => {
                    order.swap(lt, i);
                    lt += 1;
                    i += 1;
                }
                Ordering::Greater => {
                    gt -= 1;
                    order.swap(i, gt);
                }
                Ordering::Equal => i += 1,
            }
        }
        // Recurse into the smaller side, loop on the larger: O(log n) stack.
        if lt - lo < hi - gt {
            quick_sort_range(order, lo, lt, keys);
            lo = gt;
        } else {
            quick_sort_range(order, gt, hi, keys);
            hi = lt;
        }
    }
}

// ======================== Heap sort ========================

fn heap_sort<K: Ord>(order: &mut [usize], keys: &[K]) {
    let n = order.len();
    for root in (0..n / 2).rev() {
        sift_down(order, root, n, keys);
    }
    for end in (1..n).rev() {
        order.swap(0, end);
        sift_down(order, 0, end, keys);
    }
}

fn sift_down<K: Ord>(order: &mut [usize], mut root: usize, end: usize, keys: &[K]) {
    loop {
        let mut child = 2 * root + 1;
        if child >= end {
            break;
        }
        if child + 1 < end && keys[order[child]] < keys[order[child + 1]] {
            child += 1;
        }
        if keys[order[root]] >= keys[order[child]] {
            break;
        }
        order.swap(root, child);
        root = child;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use std::cmp::Reverse;

    #[test]
    fn test_all_strategies_sort_ascending() {
        let mut rng = SmallRng::seed_from_u64(1);
        for len in [0, 1, 2, 3, 10, 57, 200] {
            let items: Vec<i32> = (0..len).map(|_| rng.random_range(-50..50)).collect();
            let mut expected = items.clone();
            expected.sort();
            for strategy in SortStrategy::ALL {
                let sorted: Vec<i32> = strategy.sorted(&items, |&x| x).into_iter().copied().collect();
                assert_eq!(sorted, expected, "{strategy} len={len}");
            }
        }
    }

    #[test]
    fn test_unique_keys_same_order_everywhere() {
        let items = vec![("d", 4), ("a", 1), ("e", 5), ("c", 3), ("b", 2)];
        let baseline = SortStrategy::Merge.sort_indices(&items, |x| x.1);
        assert_eq!(baseline, vec![1, 4, 3, 0, 2]);
        for strategy in SortStrategy::ALL {
            assert_eq!(strategy.sort_indices(&items, |x| x.1), baseline);
        }
    }

    #[test]
    fn test_merge_sort_is_stable() {
        // (key, input position)
        let items: Vec<(u8, usize)> = [2, 1, 2, 0, 1, 2, 0]
            .into_iter()
            .enumerate()
            .map(|(pos, key)| (key, pos))
            .collect();
        let sorted = SortStrategy::Merge.sorted(&items, |x| x.0);
        for pair in sorted.windows(2) {
            if pair[0].0 == pair[1].0 {
                assert!(pair[0].1 < pair[1].1);
            }
        }
    }

    #[test]
    fn test_unstable_strategies_keep_the_same_set() {
        let mut rng = SmallRng::seed_from_u64(9);
        let items: Vec<(u8, usize)> = (0..100).map(|i| (rng.random_range(0..5), i)).collect();

        let merge = SortStrategy::Merge.sorted(&items, |x| x.0);
        for strategy in [SortStrategy::Quick, SortStrategy::Heap] {
            let other = strategy.sorted(&items, |x| x.0);
            let keys_a: Vec<u8> = merge.iter().map(|x| x.0).collect();
            let keys_b: Vec<u8> = other.iter().map(|x| x.0).collect();
            assert_eq!(keys_a, keys_b);

            let mut ids_a: Vec<usize> = merge.iter().map(|x| x.1).collect();
            let mut ids_b: Vec<usize> = other.iter().map(|x| x.1).collect();
            ids_a.sort();
            ids_b.sort();
            assert_eq!(ids_a, ids_b);
        }
    }

    #[test]
    fn test_reverse_key_for_descending() {
        let priorities = [3, 5, 1, 4];
        for strategy in SortStrategy::ALL {
            let sorted: Vec<i32> = strategy
                .sorted(&priorities, |&p| Reverse(p))
                .into_iter()
                .copied()
                .collect();
            assert_eq!(sorted, vec![5, 4, 3, 1]);
        }
    }

    #[test]
    fn test_borrowed_string_keys() {
        let locations = vec!["D".to_string(), "HQ".to_string(), "A".to_string()];
        let sorted = SortStrategy::Heap.sorted(&locations, |s| s.as_str());
        assert_eq!(sorted, vec!["A", "D", "HQ"]);
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("merge".parse::<SortStrategy>().unwrap(), SortStrategy::Merge);
        assert_eq!("Quick".parse::<SortStrategy>().unwrap(), SortStrategy::Quick);
        assert_eq!("HEAP".parse::<SortStrategy>().unwrap(), SortStrategy::Heap);
        assert_eq!(
            "bubble".parse::<SortStrategy>(),
            Err(DispatchError::UnknownSortStrategy("bubble".into()))
        );
        assert!(SortStrategy::Merge.is_stable());
        assert!(!SortStrategy::Heap.is_stable());
    }
}
