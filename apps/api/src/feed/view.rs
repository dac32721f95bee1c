//! Presentation view models for the feed.

use serde::Serialize;

use crate::models::job::{Job, JobSource, MatchTier};
use crate::models::settings::ExtensionSettings;

/// One rendered job card.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCardView {
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
    pub match_score: Option<u8>,
    pub match_reason: Option<String>,
    pub match_tier: Option<MatchTier>,
    pub is_saved: bool,
    pub is_analyzing: bool,
}

impl JobCardView {
    /// Match fields are only surfaced while `show_match_score` is on.
    pub fn project(job: &Job, settings: &ExtensionSettings, is_analyzing: bool) -> Self {
        let annotation = job
            .annotation
            .as_ref()
            .filter(|_| settings.show_match_score);

        Self {
            id: job.id.clone(),
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            description: job.description.clone(),
            posted_date: job.posted_date.clone(),
            is_expired: job.is_expired,
            source: job.source,
            logo_url: job.logo_url.clone(),
            keywords: job.keywords.clone(),
            match_score: annotation.map(|a| a.score),
            match_reason: annotation.map(|a| a.reason.clone()),
            match_tier: annotation.map(|a| a.tier()),
            is_saved: settings.is_saved(&job.id),
            is_analyzing,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedView {
    pub jobs: Vec<JobCardView>,
    pub blocked_count: usize,
    pub saved_count: usize,
    pub blocked_keywords: Vec<String>,
    pub settings_version: u64,
}
