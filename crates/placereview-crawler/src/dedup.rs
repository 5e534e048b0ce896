//! Merge repeated extraction snapshots into one ordered, unique collection.

use std::collections::HashSet;

use crate::model::Review;

/// Accumulates reviews across scroll steps; the first occurrence of an
/// identity wins and keeps its position.
#[derive(Debug, Default)]
pub struct ReviewDeduplicator {
    seen: HashSet<String>,
    reviews: Vec<Review>,
}

impl ReviewDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a batch in. Returns how many reviews were new.
    pub fn merge(&mut self, batch: impl IntoIterator<Item = Review>) -> usize {
        let before = self.reviews.len();
        for review in batch {
            if self.seen.insert(review.identity.clone()) {
                self.reviews.push(review);
            }
        }
        self.reviews.len() - before
    }

    /// Current accumulated reviews in first-seen order.
    pub fn snapshot(&self) -> &[Review] {
        &self.reviews
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    pub fn into_reviews(self) -> Vec<Review> {
        self.reviews
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(identity: &str, text: &str) -> Review {
        Review {
            identity: identity.to_string(),
            author: "kim".to_string(),
            rating: None,
            text: text.to_string(),
            posted_at: None,
            images: Vec::new(),
        }
    }

    #[test]
    fn test_overlapping_batches_keep_first_seen() {
        let mut dedup = ReviewDeduplicator::new();
        assert_eq!(dedup.merge(vec![review("a", "first"), review("b", "b")]), 2);
        assert_eq!(dedup.merge(vec![review("b", "b"), review("a", "changed"), review("c", "c")]), 1);

        let ids: Vec<_> = dedup.snapshot().iter().map(|r| r.identity.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(dedup.snapshot()[0].text, "first");
    }

    #[test]
    fn test_duplicates_within_one_batch() {
        let mut dedup = ReviewDeduplicator::new();
        assert_eq!(dedup.merge(vec![review("a", "1"), review("a", "2")]), 1);
        assert_eq!(dedup.len(), 1);
        assert_eq!(dedup.snapshot()[0].text, "1");
    }

    #[test]
    fn test_empty() {
        let mut dedup = ReviewDeduplicator::new();
        assert!(dedup.is_empty());
        assert_eq!(dedup.merge(Vec::new()), 0);
        assert!(dedup.into_reviews().is_empty());
    }
}
