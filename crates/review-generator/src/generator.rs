//! Main generator for producing review records.

use crate::numeric::generate_int_range;
use chrono::Utc;
use loader_core::{
    ConfigError, ReviewRanges, ReviewRecord, DEFAULT_COMMENT, RATING_MAX, RATING_MIN,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Generator that produces review records.
///
/// Every row draws its fields from an RNG seeded with the base seed and the
/// row index, so row N has the same ids and rating whether it is reached by
/// generating from zero or by starting at N.
#[derive(Debug, Clone)]
pub struct ReviewGenerator {
    /// Bounds for product and user ids
    ranges: ReviewRanges,
    /// Placeholder comment copied into every record
    comment: String,
    /// Base seed
    seed: u64,
    /// Index of the next row to generate
    index: u64,
}

impl ReviewGenerator {
    /// Create a new generator with the given ranges and seed.
    ///
    /// Fails if either id range is empty.
    pub fn new(ranges: ReviewRanges, seed: u64) -> Result<Self, ConfigError> {
        ranges.validate()?;
        Ok(Self {
            ranges,
            comment: DEFAULT_COMMENT.to_string(),
            seed,
            index: 0,
        })
    }

    /// Create a generator seeded from entropy. The chosen seed is available
    /// through [`ReviewGenerator::seed`] so a run can be reproduced.
    pub fn from_entropy(ranges: ReviewRanges) -> Result<Self, ConfigError> {
        Self::new(ranges, rand::random())
    }

    /// Replace the placeholder comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Continue generation from row `index`.
    ///
    /// The rows produced are the same as rows `index..` of a generator that
    /// started at zero with the same seed.
    pub fn with_start_index(mut self, index: u64) -> Self {
        self.index = index;
        self
    }

    /// Compute the RNG seed for a specific row.
    fn rng_seed_for_index(&self, index: u64) -> u64 {
        self.seed.wrapping_add(index.wrapping_mul(0x9E3779B97F4A7C15))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn ranges(&self) -> &ReviewRanges {
        &self.ranges
    }

    /// Index of the next row, i.e. rows generated so far including the start offset.
    pub fn current_index(&self) -> u64 {
        self.index
    }

    /// Generate the next review record.
    pub fn next_record(&mut self) -> ReviewRecord {
        let mut rng = StdRng::seed_from_u64(self.rng_seed_for_index(self.index));

        let product_id = generate_int_range(&mut rng, 1, self.ranges.max_product_id);
        let user_id = generate_int_range(&mut rng, 1, self.ranges.max_user_id);
        let rating = generate_int_range(&mut rng, RATING_MIN, RATING_MAX);

        self.index += 1;

        ReviewRecord {
            product_id,
            user_id,
            rating,
            comment: self.comment.clone(),
            created_at: Utc::now(),
        }
    }

    /// Generate `count` records lazily.
    pub fn records(&mut self, count: usize) -> ReviewIterator<'_> {
        ReviewIterator {
            generator: self,
            remaining: count,
        }
    }
}

/// Iterator that lazily generates review records.
pub struct ReviewIterator<'a> {
    generator: &'a mut ReviewGenerator,
    remaining: usize,
}

impl Iterator for ReviewIterator<'_> {
    type Item = ReviewRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        Some(self.generator.next_record())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ReviewIterator<'_> {}
