//! Size-weighted list selection

use crate::model::ListMetadata;
use crate::random::RandomSource;
use crate::{Error, Result};

/// An ordered pool of resolved lists and their combined film count.
///
/// Zero-count lists never enter the pool, so `total >= len` holds and a
/// non-empty pool always has at least one pickable film.
#[derive(Debug, Default)]
pub struct SelectionPool {
    entries: Vec<ListMetadata>,
    total: u64,
}

impl SelectionPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resolved list to the pool.
    ///
    /// Returns `false` without adding when the list declares zero films;
    /// such a list can never win a weighted draw and would only distort
    /// the reported pool size.
    pub fn push(&mut self, meta: ListMetadata) -> bool {
        if meta.count == 0 {
            return false;
        }
        // Counts are scraped, so the sum saturates rather than wraps.
        self.total = self.total.saturating_add(meta.count);
        self.entries.push(meta);
        true
    }

    /// Combined film count across all pooled lists.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pick one list with probability `count / total`.
    ///
    /// Draws a target in `[0, total)` and walks the entries with a running
    /// cumulative sum. Entry `i` owns the half-open interval
    /// `[sum_before_i, sum_before_i + count_i)`, so each list wins in
    /// proportion to its size and every film across every list carries the
    /// same `1 / total` chance.
    pub fn select(&self, rng: &mut dyn RandomSource) -> Result<&ListMetadata> {
        if self.entries.is_empty() || self.total == 0 {
            return Err(Error::InvalidInput("selection pool is empty".to_string()));
        }
        let target = rng.draw(self.total);
        let mut cumulative = 0u64;
        for entry in &self.entries {
            cumulative = cumulative.saturating_add(entry.count);
            if target < cumulative {
                return Ok(entry);
            }
        }
        // Only reachable when `total` disagrees with the entry counts.
        // Failing loudly beats silently handing back the last entry.
        Err(Error::Integrity(format!(
            "weighted walk exhausted: target {target} beyond cumulative {cumulative}"
        )))
    }

    #[cfg(test)]
    pub(crate) fn force_total(&mut self, total: u64) {
        self.total = total;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ListRef;
    use crate::random::{EntropyRandom, SequenceRandom};

    fn meta(owner: &str, slug: &str, count: u64) -> ListMetadata {
        ListMetadata {
            list: ListRef {
                owner: owner.to_string(),
                slug: slug.to_string(),
                source_url: format!("https://letterboxd.com/{owner}/list/{slug}/"),
            },
            title: slug.to_string(),
            count,
        }
    }

    #[test]
    fn zero_count_lists_are_rejected() {
        let mut pool = SelectionPool::new();
        assert!(!pool.push(meta("alice", "empty", 0)));
        assert!(pool.push(meta("alice", "faves", 12)));
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.total(), 12);
    }

    #[test]
    fn selecting_from_empty_pool_is_invalid_input() {
        let pool = SelectionPool::new();
        let mut rng = SequenceRandom::new([0]);
        let err = pool.select(&mut rng).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn interval_boundaries_split_between_lists() {
        let mut pool = SelectionPool::new();
        pool.push(meta("alice", "a", 3));
        pool.push(meta("bob", "b", 4));

        // Targets 0..=2 belong to the first list, 3..=6 to the second.
        for (target, slug) in [(0, "a"), (2, "a"), (3, "b"), (6, "b")] {
            let mut rng = SequenceRandom::new([target]);
            let winner = pool.select(&mut rng).unwrap();
            assert_eq!(winner.list.slug, slug, "target {target}");
        }
    }

    #[test]
    fn selection_frequency_tracks_list_size() {
        let mut pool = SelectionPool::new();
        pool.push(meta("alice", "small", 10));
        pool.push(meta("bob", "large", 90));

        let mut rng = EntropyRandom::seeded(7);
        let trials = 100_000;
        let mut small_wins = 0u32;
        for _ in 0..trials {
            if pool.select(&mut rng).unwrap().list.slug == "small" {
                small_wins += 1;
            }
        }
        let share = f64::from(small_wins) / f64::from(trials);
        assert!(
            (share - 0.10).abs() < 0.01,
            "10% list won {share} of draws"
        );
    }

    #[test]
    fn huge_counts_saturate_the_total() {
        let mut pool = SelectionPool::new();
        pool.push(meta("alice", "everything", u64::MAX));
        pool.push(meta("bob", "more", u64::MAX));
        assert_eq!(pool.total(), u64::MAX);

        // The saturated first entry covers the whole range.
        let mut rng = SequenceRandom::new([u64::MAX - 1]);
        let winner = pool.select(&mut rng).unwrap();
        assert_eq!(winner.list.slug, "everything");
    }

    #[test]
    fn exhausted_walk_is_an_integrity_error() {
        let mut pool = SelectionPool::new();
        pool.push(meta("alice", "a", 3));
        pool.push(meta("bob", "b", 4));
        // Forge a pool total larger than the entries actually cover.
        pool.force_total(10);

        let mut rng = SequenceRandom::new([9]);
        let err = pool.select(&mut rng).unwrap_err();
        assert!(matches!(err, Error::Integrity(_)), "got {err:?}");
    }
}
