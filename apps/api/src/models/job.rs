use serde::{Deserialize, Serialize};

/// Where a listing originated: posted on the board itself or syndicated from an external board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobSource {
    Native,
    ThirdParty,
}

/// AI-derived compatibility annotation. Score and reason always travel together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchAnnotation {
    #[serde(rename = "matchScore")]
    pub score: u8, // 0 – 100
    #[serde(rename = "matchReason")]
    pub reason: String,
}

impl MatchAnnotation {
    pub fn tier(&self) -> MatchTier {
        MatchTier::from_score(self.score)
    }
}

/// Display bucket for a match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    High,
    Medium,
    Low,
}

impl MatchTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => MatchTier::High,
            50..=79 => MatchTier::Medium,
            _ => MatchTier::Low,
        }
    }
}

/// One listing in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub posted_date: String,
    pub is_expired: bool,
    pub source: JobSource,
    pub logo_url: String,
    pub keywords: Vec<String>,
    #[serde(flatten)]
    pub annotation: Option<MatchAnnotation>,
}

impl Job {
    /// Lowercased `title description keywords...` text that blocked keywords are matched against.
    pub fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.title,
            self.description,
            self.keywords.join(" ")
        )
        .to_lowercase()
    }
}

/// Transient result of one match analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: u8,
    pub reason: String,
}

impl From<AnalysisResult> for MatchAnnotation {
    fn from(result: AnalysisResult) -> Self {
        MatchAnnotation {
            score: result.score,
            reason: result.reason,
        }
    }
}
