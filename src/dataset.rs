//! Loading and validating the immutable input snapshot.
//!
//! A [`Dataset`] only exists once every comment and province has passed
//! validation, so the pipeline never sees a score it cannot classify.

use std::path::Path;

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::model::{Comment, ProvinceSummary};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    comments: Vec<Comment>,
    provinces: Vec<ProvinceSummary>,
}

impl Dataset {
    pub fn new(comments: Vec<Comment>, provinces: Vec<ProvinceSummary>) -> Result<Self> {
        for c in &comments {
            validate_comment(c)?;
        }
        for p in &provinces {
            validate_province(p)?;
        }
        Ok(Self {
            comments,
            provinces,
        })
    }

    pub fn from_json(comments_json: &str, provinces_json: Option<&str>) -> Result<Self> {
        let comments: Vec<Comment> = serde_json::from_str(comments_json)?;
        let provinces: Vec<ProvinceSummary> = match provinces_json {
            Some(json) => serde_json::from_str(json)?,
            None => Vec::new(),
        };
        Self::new(comments, provinces)
    }

    /// Read comments (and optionally province summaries) from JSON files.
    pub fn load(comments_path: &Path, provinces_path: Option<&Path>) -> Result<Self> {
        let comments_json = std::fs::read_to_string(comments_path)?;
        let provinces_json = provinces_path.map(std::fs::read_to_string).transpose()?;
        let dataset = Self::from_json(&comments_json, provinces_json.as_deref())?;
        info!(
            comments = dataset.comments.len(),
            provinces = dataset.provinces.len(),
            path = %comments_path.display(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn provinces(&self) -> &[ProvinceSummary] {
        &self.provinces
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty() && self.provinces.is_empty()
    }
}

fn validate_comment(c: &Comment) -> Result<()> {
    if c.sentiment.is_finite() && (0.0..=1.0).contains(&c.sentiment) {
        return Ok(());
    }
    warn!(id = c.id, sentiment = c.sentiment, "rejecting comment with invalid sentiment");
    Err(Error::InvalidScore {
        id: Some(c.id),
        score: c.sentiment,
    })
}

fn validate_province(p: &ProvinceSummary) -> Result<()> {
    let counted = p.counted();
    if counted <= p.total_comments {
        return Ok(());
    }
    warn!(province = %p.province, counted, total = p.total_comments, "rejecting inconsistent province");
    Err(Error::InconsistentProvince {
        province: p.province.clone(),
        counted,
        total: p.total_comments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const COMMENTS: &str = r#"[
        {"comment_id": 1, "score": 5, "sentiment": 0.92, "gender": 1},
        {"comment_id": 2, "score": 1, "sentiment": 0.05, "gender": 2},
        {"comment_id": 3, "score": 3, "sentiment": 1.0, "gender": 0}
    ]"#;

    const PROVINCES: &str = r#"[
        {"province": "Beijing", "avgSentiment": 0.66,
         "sentimentCounts": [1, 0, 0, 0, 2], "totalComments": 4}
    ]"#;

    #[test]
    fn parses_both_tables() {
        let ds = Dataset::from_json(COMMENTS, Some(PROVINCES)).unwrap();
        assert_eq!(ds.comments().len(), 3);
        assert_eq!(ds.provinces().len(), 1);
        assert_eq!(ds.provinces()[0].province, "Beijing");
    }

    #[test]
    fn provinces_are_optional() {
        let ds = Dataset::from_json(COMMENTS, None).unwrap();
        assert!(ds.provinces().is_empty());
        assert!(!ds.is_empty());
    }

    #[test]
    fn empty_tables_are_fine() {
        let ds = Dataset::from_json("[]", Some("[]")).unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn out_of_range_sentiment_is_rejected() {
        let json = r#"[{"comment_id": 8, "sentiment": 1.3, "gender": 1}]"#;
        match Dataset::from_json(json, None) {
            Err(Error::InvalidScore { id: Some(8), .. }) => {}
            other => panic!("expected InvalidScore, got {other:?}"),
        }
    }

    #[test]
    fn negative_sentiment_is_rejected() {
        let err = Dataset::new(vec![Comment::new(4, -0.2, 1)], vec![]).unwrap_err();
        assert!(matches!(err, Error::InvalidScore { id: Some(4), .. }));
    }

    #[test]
    fn over_counted_province_is_rejected() {
        let p = ProvinceSummary {
            province: "Tibet".into(),
            avg_sentiment: 0.5,
            sentiment_counts: [3, 3, 0, 0, 0],
            total_comments: 5,
        };
        match Dataset::new(vec![], vec![p]) {
            Err(Error::InconsistentProvince { province, counted, total }) => {
                assert_eq!(province, "Tibet");
                assert_eq!(counted, 6);
                assert_eq!(total, 5);
            }
            other => panic!("expected InconsistentProvince, got {other:?}"),
        }
    }

    #[test]
    fn huge_bucket_counts_are_rejected_not_panicking() {
        let provinces = r#"[{"province": "X", "avgSentiment": 0.5,
            "sentimentCounts": [18446744073709551615, 1, 0, 0, 0], "totalComments": 3}]"#;
        match Dataset::from_json("[]", Some(provinces)) {
            Err(Error::InconsistentProvince { province, counted, total }) => {
                assert_eq!(province, "X");
                assert_eq!(counted, u64::MAX);
                assert_eq!(total, 3);
            }
            other => panic!("expected InconsistentProvince, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_surfaces_as_json_error() {
        let err = Dataset::from_json("{not json", None).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn loads_from_files() {
        let mut comments = tempfile::NamedTempFile::new().unwrap();
        comments.write_all(COMMENTS.as_bytes()).unwrap();
        let mut provinces = tempfile::NamedTempFile::new().unwrap();
        provinces.write_all(PROVINCES.as_bytes()).unwrap();

        let ds = Dataset::load(comments.path(), Some(provinces.path())).unwrap();
        assert_eq!(ds.comments().len(), 3);
        assert_eq!(ds.provinces().len(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Dataset::load(&dir.path().join("absent.json"), None).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
