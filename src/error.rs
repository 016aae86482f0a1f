//! Error types for the aggregation pipeline.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Sentiment outside `[0, 1]` or not finite. `id` is `None` when the
    /// score was classified on its own rather than as part of a comment.
    #[error("invalid sentiment score {score} (comment id: {})", display_id(.id))]
    InvalidScore { id: Option<i64>, score: f64 },

    /// Province whose bucket counts add up to more than its comment total.
    #[error("province {province}: bucket counts sum to {counted} but total is {total}")]
    InconsistentProvince {
        province: String,
        counted: u64,
        total: u64,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn display_id(id: &Option<i64>) -> String {
    match id {
        Some(id) => id.to_string(),
        None => "n/a".to_string(),
    }
}
