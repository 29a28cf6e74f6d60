//! Read-time rating aggregation.
//!
//! The shipped seed dataset carries a fixed rating and review count per
//! facility. User comments accumulate in the store. Effective stats are
//! always computed at read time by merging the two, so seed records are
//! never rewritten and nothing is cached at write time.

use rusqlite::params;

use crate::store::ToiletStore;
use crate::types::Review;

/// Round to one decimal place, half-up at the tenths digit.
fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl ToiletStore {
    /// Count and mean of user-submitted ratings for a facility.
    /// Returns `(0, 0.0)` when no comments exist or the query fails.
    fn user_rating_stats(&self, toilet_id: i64) -> (u32, f64) {
        let result = self.conn().query_row(
            "SELECT AVG(rating), COUNT(*) FROM comments WHERE toiletId = ?1",
            params![toilet_id],
            |row| {
                let mean: Option<f64> = row.get(0)?;
                let count: u32 = row.get(1)?;
                Ok((count, mean.unwrap_or(0.0)))
            },
        );

        result.unwrap_or_else(|e| {
            log::warn!("[ToiletStore] rating stats query failed: {}", e);
            (0, 0.0)
        })
    }

    /// Effective average rating for a facility: the seed rating merged
    /// with live user ratings.
    ///
    /// The seed reviews are modelled as a fixed block of `seed_count`
    /// prior ratings averaging `seed_rating`, so the combination is the
    /// exact weighted mean
    /// `(seed_rating * seed_count + user_mean * user_count) / (seed_count + user_count)`,
    /// rounded to one decimal place. With zero user comments the seed
    /// rating is returned unchanged.
    pub fn combined_rating(&self, toilet_id: i64, seed_rating: f64, seed_count: u32) -> f64 {
        let (user_count, user_mean) = self.user_rating_stats(toilet_id);
        if user_count == 0 {
            return seed_rating;
        }

        let total = seed_rating * seed_count as f64 + user_mean * user_count as f64;
        round_tenths(total / (seed_count + user_count) as f64)
    }

    /// Effective review count: stored comments plus the seed review
    /// slice length. Only the seed slice's length is consulted, never
    /// its contents.
    pub fn total_review_count(&self, toilet_id: i64, seed_reviews: &[Review]) -> u32 {
        self.comment_count(toilet_id) + seed_reviews.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_review(id: i64, rating: u8) -> Review {
        Review {
            id,
            user_name: "Seed".to_string(),
            rating,
            comment: "seed review".to_string(),
            timestamp: None,
            user_id: None,
        }
    }

    #[test]
    fn test_no_comments_returns_seed_rating() {
        let store = ToiletStore::in_memory().unwrap();
        assert_eq!(store.combined_rating(1, 3.2, 24), 3.2);
        // Unrounded seed values pass through untouched.
        assert_eq!(store.combined_rating(1, 4.25, 10), 4.25);
    }

    #[test]
    fn test_weighted_combination() {
        let store = ToiletStore::in_memory().unwrap();
        assert!(store.post_comment(7, "A", 5, "great", None));

        // (4.0 * 10 + 5 * 1) / 11 = 4.0909... -> 4.1
        assert_eq!(store.combined_rating(7, 4.0, 10), 4.1);
    }

    #[test]
    fn test_combination_only_counts_matching_facility() {
        let store = ToiletStore::in_memory().unwrap();
        assert!(store.post_comment(7, "A", 5, "great", None));
        assert!(store.post_comment(8, "B", 1, "awful", None));

        assert_eq!(store.combined_rating(7, 4.0, 10), 4.1);
        // (4.0 * 10 + 1 * 1) / 11 = 3.727... -> 3.7
        assert_eq!(store.combined_rating(8, 4.0, 10), 3.7);
    }

    #[test]
    fn test_rounding_half_up_at_tenths() {
        let store = ToiletStore::in_memory().unwrap();
        // Two ratings averaging 3.5 against seed (3.0, 1):
        // (3.0 + 3.5 * 2) / 3 = 10/3 = 3.333... -> 3.3
        assert!(store.post_comment(9, "A", 3, "ok", None));
        assert!(store.post_comment(9, "B", 4, "good", None));
        assert_eq!(store.combined_rating(9, 3.0, 1), 3.3);

        // (0 * 0 + 5 + 4) / 2 = 4.5 stays 4.5 (exact tenth)
        assert!(store.post_comment(10, "A", 5, "top", None));
        assert!(store.post_comment(10, "B", 4, "good", None));
        assert_eq!(store.combined_rating(10, 0.0, 0), 4.5);

        // Midpoint rounds up: seed (4.0, 1) + one 5 -> 4.5 exactly;
        // seed (4.2, 2) + one 5 -> (8.4 + 5)/3 = 4.4666... -> 4.5
        assert!(store.post_comment(11, "A", 5, "top", None));
        assert_eq!(store.combined_rating(11, 4.2, 2), 4.5);
    }

    #[test]
    fn test_total_review_count() {
        let store = ToiletStore::in_memory().unwrap();
        let seed = vec![seed_review(101, 3), seed_review(102, 4)];

        // No stored comments, no seed reviews.
        assert_eq!(store.total_review_count(1, &[]), 0);
        // Seed only.
        assert_eq!(store.total_review_count(1, &seed), 2);

        assert!(store.post_comment(1, "A", 5, "great", None));
        assert_eq!(store.total_review_count(1, &seed), 3);
        // Other facilities are unaffected.
        assert_eq!(store.total_review_count(2, &seed), 2);
    }
}
