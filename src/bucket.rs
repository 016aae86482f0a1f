//! Score-to-bucket classification.
//!
//! [`SentimentBucket::contains`] is the single interval-membership rule; both
//! [`classify`] and the filter go through it.

use crate::error::{Error, Result};
use crate::model::SentimentBucket;

impl SentimentBucket {
    /// Lower and upper bound of the bucket's score interval.
    pub fn range(self) -> (f64, f64) {
        match self {
            SentimentBucket::Disgusted => (0.0, 0.2),
            SentimentBucket::Dissatisfied => (0.2, 0.4),
            SentimentBucket::Indifferent => (0.4, 0.6),
            SentimentBucket::Satisfied => (0.6, 0.8),
            SentimentBucket::Delighted => (0.8, 1.0),
        }
    }

    /// Half-open `[lo, hi)` membership, except the top bucket which also
    /// includes 1.0.
    pub fn contains(self, score: f64) -> bool {
        let (lo, hi) = self.range();
        if self == SentimentBucket::Delighted {
            score >= lo && score <= hi
        } else {
            score >= lo && score < hi
        }
    }

    /// Interval in math notation, e.g. `[0.2, 0.4)`.
    pub fn interval(self) -> String {
        let (lo, hi) = self.range();
        let close = if self == SentimentBucket::Delighted { ']' } else { ')' };
        format!("[{lo:.1}, {hi:.1}{close}")
    }
}

/// Map a sentiment score to its bucket.
///
/// No clamping: anything non-finite or outside `[0, 1]` is an
/// [`Error::InvalidScore`].
pub fn classify(score: f64) -> Result<SentimentBucket> {
    SentimentBucket::all()
        .iter()
        .copied()
        .find(|b| b.contains(score))
        .ok_or(Error::InvalidScore { id: None, score })
}
