use serde::{Deserialize, Serialize};

use crate::bucket::classify;
use crate::error::{Error, Result};
use crate::filter::FilterSelection;
use crate::model::{Comment, Gender, ProvinceSummary, SentimentBucket};

/// Number of comments observed for one gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderCount {
    pub gender: Gender,
    pub count: usize,
}

/// Group comments by gender, in order of first appearance.
///
/// Unrecognised gender codes are folded into [`Gender::Other`].
pub fn count_by_gender(rows: &[Comment]) -> Vec<GenderCount> {
    let mut counts: Vec<GenderCount> = Vec::new();
    for row in rows {
        let gender = row.gender();
        match counts.iter_mut().find(|c| c.gender == gender) {
            Some(entry) => entry.count += 1,
            None => counts.push(GenderCount { gender, count: 1 }),
        }
    }
    counts
}

/// Histogram of comments per sentiment bucket.
///
/// Fails on the first comment whose sentiment cannot be classified; such
/// rows are never skipped.
pub fn count_by_sentiment_bucket(rows: &[Comment]) -> Result<[usize; SentimentBucket::COUNT]> {
    let mut counts = [0usize; SentimentBucket::COUNT];
    for row in rows {
        let bucket = classify(row.sentiment).map_err(|_| Error::InvalidScore {
            id: Some(row.id),
            score: row.sentiment,
        })?;
        counts[bucket.index()] += 1;
    }
    Ok(counts)
}

/// The number a province contributes to the map under `selection`: its
/// average sentiment in the general view, otherwise the share of its
/// comments that fall in the selected bucket.
pub fn province_value(summary: &ProvinceSummary, selection: FilterSelection) -> f64 {
    match selection {
        FilterSelection::General => summary.avg_sentiment,
        FilterSelection::Bucket(bucket) => {
            let count = summary.sentiment_counts[bucket.index()];
            count as f64 / summary.total_comments.max(1) as f64
        }
    }
}
