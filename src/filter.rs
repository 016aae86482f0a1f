use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{Comment, SentimentBucket};

/// Which slice of the data the dashboard is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "bucket")]
pub enum FilterSelection {
    /// Unfiltered view.
    #[default]
    General,
    Bucket(SentimentBucket),
}

impl FilterSelection {
    pub fn bucket(self) -> Option<SentimentBucket> {
        match self {
            FilterSelection::General => None,
            FilterSelection::Bucket(b) => Some(b),
        }
    }

    /// Caption shown above the charts.
    pub fn label(self) -> &'static str {
        match self {
            FilterSelection::General => "General",
            FilterSelection::Bucket(b) => b.label(),
        }
    }
}

impl std::fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Restrict `rows` to the selection.
///
/// The general view borrows the input untouched. A bucket selection keeps
/// exactly the rows [`SentimentBucket::contains`] accepts; an empty result
/// is normal output.
pub fn apply(rows: &[Comment], selection: FilterSelection) -> Cow<'_, [Comment]> {
    match selection {
        FilterSelection::General => {
            debug!(rows = rows.len(), "general view, no filter applied");
            Cow::Borrowed(rows)
        }
        FilterSelection::Bucket(bucket) => {
            let kept: Vec<Comment> = rows
                .iter()
                .filter(|r| bucket.contains(r.sentiment))
                .cloned()
                .collect();
            debug!(
                bucket = %bucket,
                interval = %bucket.interval(),
                kept = kept.len(),
                total = rows.len(),
                "filtered comments by sentiment bucket"
            );
            Cow::Owned(kept)
        }
    }
}

/// Selection as driven by the UI slider.
///
/// Starts in the general view. Once a bucket has been picked the state only
/// moves between buckets; there is no transition back to general.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
    selection: FilterSelection,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(self, bucket: SentimentBucket) -> Self {
        Self {
            selection: FilterSelection::Bucket(bucket),
        }
    }

    pub fn selection(&self) -> FilterSelection {
        self.selection
    }

    pub fn has_filtered(&self) -> bool {
        self.selection != FilterSelection::General
    }
}
