use serde::{Deserialize, Serialize};

use crate::feed::seed::INITIAL_BLOCKED_KEYWORDS;

/// Filter and display configuration for the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionSettings {
    pub filter_expired: bool,
    /// Lowercase substrings; duplicates are allowed.
    pub blocked_keywords: Vec<String>,
    pub show_match_score: bool,
    /// Set semantics, insertion order kept for display.
    pub saved_job_ids: Vec<String>,
}

impl Default for ExtensionSettings {
    fn default() -> Self {
        Self {
            filter_expired: true,
            blocked_keywords: INITIAL_BLOCKED_KEYWORDS
                .iter()
                .map(|kw| kw.to_string())
                .collect(),
            show_match_score: true,
            saved_job_ids: Vec::new(),
        }
    }
}

impl ExtensionSettings {
    pub fn is_saved(&self, job_id: &str) -> bool {
        self.saved_job_ids.iter().any(|id| id == job_id)
    }
}
