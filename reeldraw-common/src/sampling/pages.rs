//! Page arithmetic for within-list sampling

use crate::random::RandomSource;

/// Number of pages a list spans at `page_size` films per page.
///
/// `page_size` must be non-zero; a zero `count` yields zero pages.
pub fn page_count(count: u64, page_size: u64) -> u64 {
    debug_assert!(page_size > 0);
    count.saturating_add(page_size - 1) / page_size
}

/// Uniform 1-based page draw over a list of `count` films.
///
/// Exposes the full page range `[1, page_count]` to the draw. `count`
/// must be at least 1.
pub fn draw_page(count: u64, page_size: u64, rng: &mut dyn RandomSource) -> u64 {
    1 + rng.draw(page_count(count, page_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{EntropyRandom, SequenceRandom};

    #[test]
    fn page_count_rounds_up() {
        for (count, expected) in [(1, 1), (5, 1), (99, 1), (100, 1), (101, 2), (250, 3)] {
            assert_eq!(page_count(count, 100), expected, "count {count}");
        }
    }

    #[test]
    fn huge_counts_do_not_overflow() {
        assert_eq!(page_count(u64::MAX, 100), u64::MAX / 100);
        let mut rng = SequenceRandom::new([0]);
        assert_eq!(draw_page(u64::MAX, 100, &mut rng), 1);
    }

    #[test]
    fn draw_page_is_one_based() {
        let mut rng = SequenceRandom::new([0, 2]);
        assert_eq!(draw_page(250, 100, &mut rng), 1);
        assert_eq!(draw_page(250, 100, &mut rng), 3);
    }

    #[test]
    fn single_page_lists_always_draw_page_one() {
        let mut rng = EntropyRandom::seeded(11);
        for _ in 0..1000 {
            assert_eq!(draw_page(5, 100, &mut rng), 1);
        }
    }

    #[test]
    fn every_page_of_a_long_list_is_reachable() {
        let mut rng = EntropyRandom::seeded(23);
        let mut seen = [0u32; 3];
        for _ in 0..3000 {
            let page = draw_page(250, 100, &mut rng);
            assert!((1..=3).contains(&page));
            seen[(page - 1) as usize] += 1;
        }
        for (index, hits) in seen.iter().enumerate() {
            assert!(*hits > 800, "page {} drawn {hits} times", index + 1);
        }
    }
}
