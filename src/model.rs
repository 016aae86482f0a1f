use serde::{Deserialize, Serialize};

/// The five ordered sentiment categories a score can fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentBucket {
    Disgusted,
    Dissatisfied,
    Indifferent,
    Satisfied,
    Delighted,
}

impl SentimentBucket {
    pub const COUNT: usize = 5;

    pub fn all() -> &'static [SentimentBucket] {
        &[
            SentimentBucket::Disgusted,
            SentimentBucket::Dissatisfied,
            SentimentBucket::Indifferent,
            SentimentBucket::Satisfied,
            SentimentBucket::Delighted,
        ]
    }

    /// Position of this bucket in ascending score order (0..=4).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<SentimentBucket> {
        Self::all().get(index).copied()
    }

    /// Case-insensitive lookup by label, e.g. `"satisfied"`.
    pub fn from_label(label: &str) -> Option<SentimentBucket> {
        Self::all()
            .iter()
            .copied()
            .find(|b| b.label().eq_ignore_ascii_case(label.trim()))
    }

    pub fn label(self) -> &'static str {
        match self {
            SentimentBucket::Disgusted => "Disgusted",
            SentimentBucket::Dissatisfied => "Dissatisfied",
            SentimentBucket::Indifferent => "Indifferent",
            SentimentBucket::Satisfied => "Satisfied",
            SentimentBucket::Delighted => "Delighted",
        }
    }
}

impl std::fmt::Display for SentimentBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Reviewer gender as reported by the source data.
///
/// Codes outside `0..=2` are kept as [`Gender::Other`] so they still show up
/// in counts instead of vanishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Unknown,
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn from_code(code: i64) -> Gender {
        match code {
            0 => Gender::Unknown,
            1 => Gender::Male,
            2 => Gender::Female,
            _ => Gender::Other,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Unknown => write!(f, "Unknown"),
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
            Gender::Other => write!(f, "Other"),
        }
    }
}

/// A single review comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(alias = "comment_id")]
    pub id: i64,
    /// Star rating from the source table. Carried through, never aggregated.
    #[serde(default)]
    pub score: f64,
    /// Sentiment in `[0, 1]`.
    pub sentiment: f64,
    /// Raw gender code; see [`Gender::from_code`].
    pub gender: i64,
}

impl Comment {
    pub fn new(id: i64, sentiment: f64, gender: i64) -> Self {
        Self {
            id,
            score: 0.0,
            sentiment,
            gender,
        }
    }

    pub fn gender(&self) -> Gender {
        Gender::from_code(self.gender)
    }
}

/// Precomputed sentiment statistics for one province.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvinceSummary {
    pub province: String,
    pub avg_sentiment: f64,
    /// Comment counts per bucket, indexed by [`SentimentBucket::index`].
    pub sentiment_counts: [u64; SentimentBucket::COUNT],
    /// May exceed the bucket sum when some comments could not be geolocated.
    pub total_comments: u64,
}

impl ProvinceSummary {
    /// Sum of the bucket counts, saturating at `u64::MAX`.
    pub fn counted(&self) -> u64 {
        self.sentiment_counts
            .iter()
            .fold(0u64, |acc, &n| acc.saturating_add(n))
    }
}
