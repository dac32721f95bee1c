//! Versioned in-memory containers for the job sequence and the extension settings.
//!
//! Each container bumps a version counter on every effective mutation so derived views can be
//! memoized. The settings store keeps a second counter that only moves when a field the filter
//! pipeline reads changes.

use crate::feed::seed::seed_jobs;
use crate::models::job::{AnalysisResult, Job};
use crate::models::settings::ExtensionSettings;

#[derive(Debug, Clone)]
pub struct JobStore {
    jobs: Vec<Job>,
    version: u64,
}

impl JobStore {
    pub fn seeded() -> Self {
        Self {
            jobs: seed_jobs(),
            version: 0,
        }
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn get(&self, job_id: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == job_id)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Replaces the annotation of `job_id`. Returns `false` if no such job exists.
    pub fn annotate(&mut self, job_id: &str, result: AnalysisResult) -> bool {
        match self.jobs.iter_mut().find(|j| j.id == job_id) {
            Some(job) => {
                job.annotation = Some(result.into());
                self.version += 1;
                true
            }
            None => false,
        }
    }

    /// Restores the seed listings with every annotation cleared.
    pub fn reset(&mut self) {
        self.jobs = seed_jobs();
        self.version += 1;
    }
}

#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    settings: ExtensionSettings,
    version: u64,
    filter_version: u64,
}

impl SettingsStore {
    pub fn settings(&self) -> &ExtensionSettings {
        &self.settings
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Moves only when `filter_expired` or `blocked_keywords` change.
    pub fn filter_version(&self) -> u64 {
        self.filter_version
    }

    pub fn set_filter_expired(&mut self, value: bool) {
        if self.settings.filter_expired != value {
            self.settings.filter_expired = value;
            self.bump_filter();
        }
    }

    pub fn set_show_match_score(&mut self, value: bool) {
        if self.settings.show_match_score != value {
            self.settings.show_match_score = value;
            self.version += 1;
        }
    }

    /// Trims and lowercases `keyword` before appending it. Blank input is ignored and
    /// duplicates are kept. Returns whether the blocklist changed.
    pub fn add_blocked_keyword(&mut self, keyword: &str) -> bool {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return false;
        }
        self.settings.blocked_keywords.push(keyword);
        self.bump_filter();
        true
    }

    /// Removes every entry exactly equal to `keyword`. Returns how many were removed.
    pub fn remove_blocked_keyword(&mut self, keyword: &str) -> usize {
        let before = self.settings.blocked_keywords.len();
        self.settings.blocked_keywords.retain(|k| k != keyword);
        let removed = before - self.settings.blocked_keywords.len();
        if removed > 0 {
            self.bump_filter();
        }
        removed
    }

    /// Adds `job_id` to the saved set if absent, removes it otherwise. Returns the new state.
    pub fn toggle_saved(&mut self, job_id: &str) -> bool {
        let saved = &mut self.settings.saved_job_ids;
        let now_saved = match saved.iter().position(|id| id == job_id) {
            Some(idx) => {
                saved.remove(idx);
                false
            }
            None => {
                saved.push(job_id.to_string());
                true
            }
        };
        self.version += 1;
        now_saved
    }

    fn bump_filter(&mut self) {
        self.version += 1;
        self.filter_version += 1;
    }
}
