//! The single in-memory feed session.
//!
//! Owns the job store, the settings store and the set of job ids with an analysis in flight.
//! Every critical section is synchronous; the only await that spans real time, the matcher
//! call, runs with no lock held.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::anyhow;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::feed::filter::{filter_jobs, FeedOutcome};
use crate::feed::store::{JobStore, SettingsStore};
use crate::feed::view::{FeedView, JobCardView};
use crate::matching::JobMatcher;
use crate::models::job::{AnalysisResult, Job};
use crate::models::profile::UserProfile;
use crate::models::settings::ExtensionSettings;

struct CachedOutcome {
    job_version: u64,
    filter_version: u64,
    outcome: FeedOutcome,
}

pub struct Session {
    jobs: RwLock<JobStore>,
    settings: RwLock<SettingsStore>,
    analyzing: RwLock<HashSet<String>>,
    outcome_cache: Mutex<Option<CachedOutcome>>,
    pipeline_runs: AtomicU64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            jobs: RwLock::new(JobStore::seeded()),
            settings: RwLock::new(SettingsStore::default()),
            analyzing: RwLock::new(HashSet::new()),
            outcome_cache: Mutex::new(None),
            pipeline_runs: AtomicU64::new(0),
        }
    }

    pub async fn job(&self, job_id: &str) -> Option<Job> {
        self.jobs.read().await.get(job_id).cloned()
    }

    pub async fn settings(&self) -> ExtensionSettings {
        self.settings.read().await.settings().clone()
    }

    /// Applies a settings mutation and returns its result.
    pub async fn update_settings<R>(&self, f: impl FnOnce(&mut SettingsStore) -> R) -> R {
        let mut settings = self.settings.write().await;
        f(&mut *settings)
    }

    /// Restores the seed listings and clears every annotation. In-flight analyses still land.
    pub async fn reset_feed(&self) {
        self.jobs.write().await.reset();
        info!("Feed reset to seed listings");
    }

    /// Filter pipeline output, recomputed only when the jobs or the filter settings moved.
    #[cfg(test)]
    pub async fn outcome(&self) -> FeedOutcome {
        let jobs = self.jobs.read().await;
        let settings = self.settings.read().await;
        self.cached_outcome(&jobs, &settings).await
    }

    pub async fn feed_view(&self) -> FeedView {
        let jobs = self.jobs.read().await;
        let settings = self.settings.read().await;
        let outcome = self.cached_outcome(&jobs, &settings).await;
        let analyzing = self.analyzing.read().await;

        let current = settings.settings();
        FeedView {
            jobs: outcome
                .displayed
                .iter()
                .map(|job| JobCardView::project(job, current, analyzing.contains(&job.id)))
                .collect(),
            blocked_count: outcome.blocked_count,
            saved_count: current.saved_job_ids.len(),
            blocked_keywords: current.blocked_keywords.clone(),
            settings_version: settings.version(),
        }
    }

    #[cfg(test)]
    pub async fn analyzing_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.analyzing.read().await.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Scores `job_id` against `profile` and writes the annotation back.
    ///
    /// The lookup covers every job, not just the displayed ones. The analysis runs on its own
    /// task so it completes and lands even if the caller goes away. Concurrent calls for the
    /// same id are not merged: each issues a request and the last to finish wins.
    pub async fn analyze_job(
        self: &Arc<Self>,
        job_id: &str,
        matcher: Arc<dyn JobMatcher>,
        profile: Arc<UserProfile>,
    ) -> Result<AnalysisResult, AppError> {
        let job = self
            .job(job_id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

        self.analyzing.write().await.insert(job.id.clone());
        debug!("Analyzing job {} with {} matcher", job.id, matcher.backend());

        let session = Arc::clone(self);
        let task = tokio::spawn(async move {
            let result = matcher.analyze(&job, &profile).await;

            if !session.jobs.write().await.annotate(&job.id, result.clone()) {
                warn!("Job {} vanished before its analysis landed", job.id);
            }
            session.analyzing.write().await.remove(&job.id);

            info!(
                "Job {} analyzed: score={} reason={:?}",
                job.id, result.score, result.reason
            );
            result
        });

        match task.await {
            Ok(result) => Ok(result),
            Err(e) => {
                // the task never reached its own cleanup
                self.analyzing.write().await.remove(job_id);
                Err(AppError::Internal(anyhow!("analysis task failed: {e}")))
            }
        }
    }

    async fn cached_outcome(&self, jobs: &JobStore, settings: &SettingsStore) -> FeedOutcome {
        let mut cache = self.outcome_cache.lock().await;
        if let Some(cached) = cache.as_ref() {
            if cached.job_version == jobs.version()
                && cached.filter_version == settings.filter_version()
            {
                return cached.outcome.clone();
            }
        }

        let outcome = filter_jobs(jobs.jobs(), settings.settings());
        let run = self.pipeline_runs.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(
            "Filter pipeline run #{run}: {} shown, {} blocked",
            outcome.displayed.len(),
            outcome.blocked_count
        );

        *cache = Some(CachedOutcome {
            job_version: jobs.version(),
            filter_version: settings.filter_version(),
            outcome: outcome.clone(),
        });
        outcome
    }

    #[cfg(test)]
    pub fn pipeline_runs(&self) -> u64 {
        self.pipeline_runs.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::seed::{demo_profile, seed_jobs};
    use crate::matching::{SimulatedJobMatcher, SIMULATED_REASON};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    fn ids(outcome: &FeedOutcome) -> Vec<&str> {
        outcome.displayed.iter().map(|j| j.id.as_str()).collect()
    }

    /// Matcher that parks until released, so tests can observe in-flight state.
    struct GatedMatcher {
        gate: Arc<Notify>,
        score: u8,
    }

    #[async_trait]
    impl JobMatcher for GatedMatcher {
        async fn analyze(&self, _job: &Job, _profile: &UserProfile) -> AnalysisResult {
            self.gate.notified().await;
            AnalysisResult {
                score: self.score,
                reason: format!("gated {}", self.score),
            }
        }

        fn backend(&self) -> &'static str {
            "gated"
        }
    }

    /// Matcher whose n-th call parks on the n-th gate and answers with the n-th score.
    struct SequencedMatcher {
        calls: AtomicUsize,
        gates: Vec<Arc<Notify>>,
        scores: Vec<u8>,
    }

    #[async_trait]
    impl JobMatcher for SequencedMatcher {
        async fn analyze(&self, _job: &Job, _profile: &UserProfile) -> AnalysisResult {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            self.gates[call].notified().await;
            AnalysisResult {
                score: self.scores[call],
                reason: format!("call {call}"),
            }
        }

        fn backend(&self) -> &'static str {
            "sequenced"
        }
    }

    struct PanickingMatcher;

    #[async_trait]
    impl JobMatcher for PanickingMatcher {
        async fn analyze(&self, _job: &Job, _profile: &UserProfile) -> AnalysisResult {
            panic!("matcher blew up")
        }

        fn backend(&self) -> &'static str {
            "panicking"
        }
    }

    #[tokio::test]
    async fn test_default_session_shows_seed_view() {
        let session = Session::new();
        let outcome = session.outcome().await;
        assert_eq!(ids(&outcome), vec!["1", "2", "5"]);
        assert_eq!(outcome.blocked_count, 1);
    }

    #[tokio::test]
    async fn test_display_settings_do_not_rerun_pipeline() {
        let session = Session::new();
        session.feed_view().await;
        session
            .update_settings(|s| {
                s.set_show_match_score(false);
                s.toggle_saved("1");
            })
            .await;
        session.feed_view().await;
        assert_eq!(session.pipeline_runs(), 1);

        session.update_settings(|s| s.add_blocked_keyword("figma")).await;
        let outcome = session.outcome().await;
        assert_eq!(session.pipeline_runs(), 2);
        assert_eq!(ids(&outcome), vec!["1", "2"]);
        assert_eq!(outcome.blocked_count, 2);
    }

    #[tokio::test]
    async fn test_analyze_writes_annotation_back() {
        let session = Arc::new(Session::new());
        let result = session
            .analyze_job("1", Arc::new(SimulatedJobMatcher), Arc::new(demo_profile()))
            .await
            .unwrap();

        assert!((60..100).contains(&result.score));
        assert_eq!(result.reason, SIMULATED_REASON);
        let annotation = session.job("1").await.unwrap().annotation.unwrap();
        assert_eq!(annotation.score, result.score);
        assert!(session.analyzing_ids().await.is_empty());
    }

    #[tokio::test]
    async fn test_analyze_unknown_job_is_not_found() {
        let session = Arc::new(Session::new());
        let err = session
            .analyze_job("nope", Arc::new(SimulatedJobMatcher), Arc::new(demo_profile()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_hidden_job_can_still_be_analyzed() {
        let session = Arc::new(Session::new());
        session
            .analyze_job("3", Arc::new(SimulatedJobMatcher), Arc::new(demo_profile()))
            .await
            .unwrap();
        assert!(session.job("3").await.unwrap().annotation.is_some());
        assert!(!ids(&session.outcome().await).contains(&"3"));
    }

    #[tokio::test]
    async fn test_in_flight_analysis_marks_job_as_analyzing() {
        let session = Arc::new(Session::new());
        let gate = Arc::new(Notify::new());
        let matcher: Arc<dyn JobMatcher> = Arc::new(GatedMatcher {
            gate: gate.clone(),
            score: 77,
        });

        let handle = {
            let session = session.clone();
            let matcher = matcher.clone();
            tokio::spawn(async move {
                session
                    .analyze_job("5", matcher, Arc::new(demo_profile()))
                    .await
            })
        };

        while session.analyzing_ids().await.is_empty() {
            tokio::task::yield_now().await;
        }
        let view = session.feed_view().await;
        let card = view.jobs.iter().find(|c| c.id == "5").unwrap();
        assert!(card.is_analyzing);
        assert_eq!(card.match_score, None);

        gate.notify_one();
        let result = handle.await.unwrap().unwrap();
        assert_eq!(result.score, 77);

        let view = session.feed_view().await;
        let card = view.jobs.iter().find(|c| c.id == "5").unwrap();
        assert!(!card.is_analyzing);
        assert_eq!(card.match_score, Some(77));
    }

    #[tokio::test]
    async fn test_analysis_lands_after_reset() {
        let session = Arc::new(Session::new());
        let gate = Arc::new(Notify::new());
        let matcher: Arc<dyn JobMatcher> = Arc::new(GatedMatcher {
            gate: gate.clone(),
            score: 64,
        });

        let handle = {
            let session = session.clone();
            tokio::spawn(async move {
                session
                    .analyze_job("1", matcher, Arc::new(demo_profile()))
                    .await
            })
        };
        while session.analyzing_ids().await.is_empty() {
            tokio::task::yield_now().await;
        }

        session.reset_feed().await;
        gate.notify_one();
        handle.await.unwrap().unwrap();

        assert_eq!(session.job("1").await.unwrap().annotation.unwrap().score, 64);
    }

    #[tokio::test]
    async fn test_reset_reproduces_seed_view() {
        let session = Arc::new(Session::new());
        let before = session.outcome().await;
        session
            .analyze_job("1", Arc::new(SimulatedJobMatcher), Arc::new(demo_profile()))
            .await
            .unwrap();
        session.reset_feed().await;

        let after = session.outcome().await;
        assert_eq!(before, after);
        assert!(after.displayed.iter().all(|j| j.annotation.is_none()));
        assert_eq!(session.job("3").await.unwrap(), seed_jobs()[2]);
    }

    #[tokio::test]
    async fn test_overlapping_analyses_of_same_job_are_not_merged() {
        let session = Arc::new(Session::new());
        let first_gate = Arc::new(Notify::new());
        let second_gate = Arc::new(Notify::new());
        let sequenced = Arc::new(SequencedMatcher {
            calls: AtomicUsize::new(0),
            gates: vec![first_gate.clone(), second_gate.clone()],
            scores: vec![61, 93],
        });

        let spawn_analysis = |session: Arc<Session>, matcher: Arc<dyn JobMatcher>| {
            tokio::spawn(async move {
                session
                    .analyze_job("1", matcher, Arc::new(demo_profile()))
                    .await
            })
        };

        let matcher: Arc<dyn JobMatcher> = sequenced.clone();

        let first = spawn_analysis(session.clone(), matcher.clone());
        while sequenced.calls.load(Ordering::SeqCst) < 1 {
            tokio::task::yield_now().await;
        }
        let second = spawn_analysis(session.clone(), matcher.clone());
        while sequenced.calls.load(Ordering::SeqCst) < 2 {
            tokio::task::yield_now().await;
        }
        assert_eq!(session.analyzing_ids().await, vec!["1".to_string()]);

        first_gate.notify_one();
        assert_eq!(first.await.unwrap().unwrap().score, 61);
        // first completion clears the marker even though the second is still in flight
        assert!(session.analyzing_ids().await.is_empty());
        assert_eq!(session.job("1").await.unwrap().annotation.unwrap().score, 61);

        second_gate.notify_one();
        assert_eq!(second.await.unwrap().unwrap().score, 93);
        assert_eq!(session.job("1").await.unwrap().annotation.unwrap().score, 93);
        assert_eq!(sequenced.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_panicking_matcher_clears_analyzing_marker() {
        let session = Arc::new(Session::new());
        let err = session
            .analyze_job("5", Arc::new(PanickingMatcher), Arc::new(demo_profile()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal(_)));
        assert!(session.analyzing_ids().await.is_empty());
        assert!(session.job("5").await.unwrap().annotation.is_none());
        let view = session.feed_view().await;
        assert!(view.jobs.iter().all(|card| !card.is_analyzing));
    }
}
