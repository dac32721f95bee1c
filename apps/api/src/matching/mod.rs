//! Match scoring — pluggable, trait-based annotator that rates a job against the viewer profile.
//!
//! `LlmJobMatcher` asks Gemini for `{ score, reason }`. `SimulatedJobMatcher` is the offline
//! stand-in used when no API key is configured. Neither ever fails: every error path collapses
//! into a displayable `AnalysisResult`.
//!
//! `AppState` holds an `Arc<dyn JobMatcher>`, chosen at startup from config.

pub mod prompts;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::llm_client::prompts::object_schema;
use crate::llm_client::{LlmClient, LlmError, MODEL};
use crate::matching::prompts::MATCH_PROMPT_TEMPLATE;
use crate::models::job::{AnalysisResult, Job};
use crate::models::profile::UserProfile;

pub const SIMULATED_REASON: &str = "API Key missing: Simulated analysis based on keywords.";
pub const UNAVAILABLE_SCORE: u8 = 50;
pub const UNAVAILABLE_REASON: &str = "AI Analysis unavailable";
pub const MISSING_REASON: &str = "Analysis failed";

/// The match annotator trait. Implementations must always resolve to a result.
#[async_trait]
pub trait JobMatcher: Send + Sync {
    async fn analyze(&self, job: &Job, profile: &UserProfile) -> AnalysisResult;

    /// "llm" | "simulated" — for logs and the health endpoint.
    fn backend(&self) -> &'static str;
}

/// Picks the Gemini-backed matcher when an API key is configured, the simulated one otherwise.
pub fn build_matcher(config: &Config) -> Result<Arc<dyn JobMatcher>, LlmError> {
    match &config.gemini_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone(), &config.gemini_base_url)?;
            info!("Match scoring via Gemini (model: {})", MODEL);
            Ok(Arc::new(LlmJobMatcher::new(llm)))
        }
        None => {
            warn!("No Gemini API key configured; match scores will be simulated");
            Ok(Arc::new(SimulatedJobMatcher))
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// SimulatedJobMatcher
// ────────────────────────────────────────────────────────────────────────────

/// Offline matcher: a pseudo-random score in [60, 100) with a fixed notice.
pub struct SimulatedJobMatcher;

#[async_trait]
impl JobMatcher for SimulatedJobMatcher {
    async fn analyze(&self, job: &Job, _profile: &UserProfile) -> AnalysisResult {
        warn!("No API key provided. Returning simulated score for job {}", job.id);
        AnalysisResult {
            score: simulated_score(),
            reason: SIMULATED_REASON.to_string(),
        }
    }

    fn backend(&self) -> &'static str {
        "simulated"
    }
}

fn simulated_score() -> u8 {
    // v4 UUIDs carry 122 random bits
    60 + (Uuid::new_v4().as_u128() % 40) as u8
}

// ────────────────────────────────────────────────────────────────────────────
// LlmJobMatcher
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmJobMatcher {
    llm: LlmClient,
    schema: Value,
}

impl LlmJobMatcher {
    pub fn new(llm: LlmClient) -> Self {
        Self {
            llm,
            schema: object_schema(&[("score", "INTEGER"), ("reason", "STRING")]),
        }
    }
}

#[async_trait]
impl JobMatcher for LlmJobMatcher {
    async fn analyze(&self, job: &Job, profile: &UserProfile) -> AnalysisResult {
        let prompt = build_match_prompt(job, profile);
        match self.llm.call_json(&prompt, &self.schema).await {
            Ok(value) => result_from_json(&value),
            Err(e) => {
                error!("Gemini analysis failed for job {}: {e}", job.id);
                AnalysisResult {
                    score: UNAVAILABLE_SCORE,
                    reason: UNAVAILABLE_REASON.to_string(),
                }
            }
        }
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

fn build_match_prompt(job: &Job, profile: &UserProfile) -> String {
    MATCH_PROMPT_TEMPLATE
        .replace("{headline}", &profile.headline)
        .replace("{skills}", &profile.skills.join(", "))
        .replace("{level}", &profile.experience_level)
        .replace("{title}", &job.title)
        .replace("{company}", &job.company)
        .replace("{description}", &job.description)
        .replace("{keywords}", &job.keywords.join(", "))
}

/// Reads `score` and `reason` independently; each missing, zero/empty or mistyped field falls
/// back to its own default.
fn result_from_json(value: &Value) -> AnalysisResult {
    let score = value
        .get("score")
        .and_then(Value::as_f64)
        .filter(|s| s.is_finite() && *s != 0.0)
        .map(|s| s.round().clamp(0.0, 100.0) as u8)
        .unwrap_or(0);

    let reason = value
        .get("reason")
        .and_then(Value::as_str)
        .filter(|r| !r.is_empty())
        .unwrap_or(MISSING_REASON)
        .to_string();

    AnalysisResult { score, reason }
}
