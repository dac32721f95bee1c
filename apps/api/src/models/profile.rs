use serde::{Deserialize, Serialize};

/// The viewer the feed is scored against. Read-only for the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub headline: String,
    pub skills: Vec<String>,
    pub experience_level: String,
}
