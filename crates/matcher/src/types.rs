use records::{Record, ValidationError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tuning knobs for the match index.
///
/// `MatchConfig` is cheap to clone and serde-friendly so it can be embedded in
/// higher-level configs (the umbrella YAML file, server state).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchConfig {
    /// Maximum score a match may have and still be accepted, in `[0.0, 1.0]`.
    #[serde(default = "MatchConfig::default_threshold")]
    pub threshold: f64,
    /// How far from `location` (in characters) a match may begin before its
    /// proximity penalty alone reaches `1.0`. `0` demands an exact location.
    #[serde(default = "MatchConfig::default_distance")]
    pub distance: usize,
    /// Character offset where a match is expected to begin.
    #[serde(default)]
    pub location: usize,
    /// Shortest run of matched characters that counts as a highlight.
    #[serde(default = "MatchConfig::default_min_match_char_length")]
    pub min_match_char_length: usize,
    /// Result count used by callers that do not pass an explicit limit.
    #[serde(default = "MatchConfig::default_limit")]
    pub default_limit: usize,
    #[serde(default)]
    pub is_case_sensitive: bool,
    /// Score on error count alone; `location` and `distance` are ignored.
    #[serde(default)]
    pub ignore_location: bool,
    /// Keep scanning the whole description even after a good match.
    #[serde(default)]
    pub find_all_matches: bool,
    /// Populate [`SearchHit::matches`].
    #[serde(default = "MatchConfig::default_include_matches")]
    pub include_matches: bool,
}

impl MatchConfig {
    pub(crate) fn default_threshold() -> f64 {
        0.4
    }

    pub(crate) fn default_distance() -> usize {
        100
    }

    pub(crate) fn default_min_match_char_length() -> usize {
        2
    }

    pub(crate) fn default_limit() -> usize {
        5
    }

    pub(crate) fn default_include_matches() -> bool {
        true
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(MatchError::InvalidConfig(
                "threshold must be between 0.0 and 1.0".into(),
            ));
        }
        if self.min_match_char_length == 0 {
            return Err(MatchError::InvalidConfig(
                "min_match_char_length must be greater than zero".into(),
            ));
        }
        if self.default_limit == 0 {
            return Err(MatchError::InvalidConfig(
                "default_limit must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: Self::default_threshold(),
            distance: Self::default_distance(),
            location: 0,
            min_match_char_length: Self::default_min_match_char_length(),
            default_limit: Self::default_limit(),
            is_case_sensitive: false,
            ignore_location: false,
            find_all_matches: false,
            include_matches: Self::default_include_matches(),
        }
    }
}

/// Inclusive character range of a description that lined up with the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

/// An accepted match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Position of the record in the record set it was loaded from.
    pub index: usize,
    pub record: Record,
    /// Distance score: `0.0` is the whole description, higher is worse.
    pub score: f64,
    /// Highlight spans over the description; empty unless `include_matches`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<MatchSpan>,
}

/// Outcome of [`search`](crate::search): the best record or an explicit miss.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult {
    Found(SearchHit),
    NoMatch,
}

impl SearchResult {
    pub fn is_match(&self) -> bool {
        matches!(self, SearchResult::Found(_))
    }

    pub fn hit(&self) -> Option<&SearchHit> {
        match self {
            SearchResult::Found(hit) => Some(hit),
            SearchResult::NoMatch => None,
        }
    }

    pub fn into_hit(self) -> Option<SearchHit> {
        match self {
            SearchResult::Found(hit) => Some(hit),
            SearchResult::NoMatch => None,
        }
    }
}

impl From<Option<SearchHit>> for SearchResult {
    fn from(value: Option<SearchHit>) -> Self {
        value.map_or(SearchResult::NoMatch, SearchResult::Found)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum MatchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
    #[error("no record set loaded")]
    NoRecordSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = MatchConfig::default();
        assert_eq!(cfg.threshold, 0.4);
        assert_eq!(cfg.distance, 100);
        assert_eq!(cfg.location, 0);
        assert_eq!(cfg.min_match_char_length, 2);
        assert_eq!(cfg.default_limit, 5);
        assert!(!cfg.is_case_sensitive);
        assert!(cfg.include_matches);
        cfg.validate().expect("defaults are valid");
    }

    #[test]
    fn empty_document_deserializes_to_defaults() {
        let cfg: MatchConfig = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(cfg, MatchConfig::default());

        let cfg: MatchConfig =
            serde_json::from_str(r#"{"threshold":0.2,"distance":0}"#).expect("deserialize");
        assert_eq!(cfg.threshold, 0.2);
        assert_eq!(cfg.distance, 0);
        assert_eq!(cfg.min_match_char_length, 2);
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let cases = [
            MatchConfig {
                threshold: 1.5,
                ..Default::default()
            },
            MatchConfig {
                threshold: f64::NAN,
                ..Default::default()
            },
            MatchConfig {
                min_match_char_length: 0,
                ..Default::default()
            },
            MatchConfig {
                default_limit: 0,
                ..Default::default()
            },
        ];
        for cfg in cases {
            assert!(matches!(cfg.validate(), Err(MatchError::InvalidConfig(_))));
        }
    }

    #[test]
    fn search_result_helpers() {
        let hit = SearchHit {
            index: 3,
            record: Record::new("t", "d", "a", "o"),
            score: 0.0,
            matches: Vec::new(),
        };
        let found = SearchResult::from(Some(hit.clone()));
        assert!(found.is_match());
        assert_eq!(found.hit().map(|h| h.index), Some(3));
        assert_eq!(found.into_hit(), Some(hit));

        let miss = SearchResult::from(None);
        assert!(!miss.is_match());
        assert!(miss.hit().is_none());
    }

    #[test]
    fn hit_serializes_without_empty_spans() {
        let hit = SearchHit {
            index: 0,
            record: Record::new("Tea", "Boil water", "boil", "kettle"),
            score: 0.25,
            matches: Vec::new(),
        };
        let json = serde_json::to_value(&hit).expect("serialize");
        assert_eq!(json["record"]["Description"], "Boil water");
        assert!(json.get("matches").is_none());
    }
}
