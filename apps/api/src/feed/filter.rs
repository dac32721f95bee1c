//! Filter pipeline: expired suppression followed by keyword blocking.
//!
//! Algorithm:
//! 1. If `filter_expired`, drop every expired job. `n1` = survivors.
//! 2. Drop every remaining job whose lowercased `title description keywords` text contains any
//!    blocked keyword as a substring. `n2` = survivors.
//! 3. `blocked_count = n1 - n2`, so expired drops never count as blocked.
//!
//! Order is preserved. Blocked keywords are expected to be lowercase already; an empty keyword
//! matches every job.

use serde::Serialize;

use crate::models::job::Job;
use crate::models::settings::ExtensionSettings;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedOutcome {
    pub displayed: Vec<Job>,
    /// Jobs hidden by the blocklist alone.
    pub blocked_count: usize,
}

pub fn filter_jobs(jobs: &[Job], settings: &ExtensionSettings) -> FeedOutcome {
    let unexpired: Vec<&Job> = jobs
        .iter()
        .filter(|job| !(settings.filter_expired && job.is_expired))
        .collect();
    let pre_keyword_count = unexpired.len();

    let displayed: Vec<Job> = unexpired
        .into_iter()
        .filter(|job| !is_blocked(job, &settings.blocked_keywords))
        .cloned()
        .collect();

    FeedOutcome {
        blocked_count: pre_keyword_count - displayed.len(),
        displayed,
    }
}

fn is_blocked(job: &Job, blocked_keywords: &[String]) -> bool {
    if blocked_keywords.is_empty() {
        return false;
    }
    let text = job.search_text();
    blocked_keywords.iter().any(|kw| text.contains(kw.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::seed::seed_jobs;
    use crate::models::job::JobSource;

    fn make_job(id: &str, expired: bool, description: &str, keywords: &[&str]) -> Job {
        Job {
            id: id.to_string(),
            title: format!("Role {id}"),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            description: description.to_string(),
            posted_date: "today".to_string(),
            is_expired: expired,
            source: JobSource::Native,
            logo_url: String::new(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            annotation: None,
        }
    }

    fn settings(filter_expired: bool, blocked: &[&str]) -> ExtensionSettings {
        ExtensionSettings {
            filter_expired,
            blocked_keywords: blocked.iter().map(|k| k.to_string()).collect(),
            ..ExtensionSettings::default()
        }
    }

    fn ids(outcome: &FeedOutcome) -> Vec<&str> {
        outcome.displayed.iter().map(|j| j.id.as_str()).collect()
    }

    #[test]
    fn test_seed_feed_with_default_settings() {
        let outcome = filter_jobs(&seed_jobs(), &ExtensionSettings::default());
        // 3 is expired and 4 lists "Unpaid"; 2 says "commission-only", which the
        // space-separated "commission only" entry does not match
        assert_eq!(ids(&outcome), vec!["1", "2", "5"]);
        assert_eq!(outcome.blocked_count, 1);
    }

    #[test]
    fn test_default_blocklist_hides_commission_only_and_unpaid_listings() {
        let jobs = vec![
            make_job("1", false, "React dashboard work", &["React"]),
            make_job("2", false, "This is a commission only sales role", &["Sales"]),
            make_job("3", true, "Mobile app rewrite", &["iOS"]),
            make_job("4", false, "Equity until funding", &["Full Stack", "Unpaid"]),
            make_job("5", false, "Design web interfaces", &["Figma"]),
        ];
        let outcome = filter_jobs(&jobs, &ExtensionSettings::default());
        assert_eq!(ids(&outcome), vec!["1", "5"]);
        assert_eq!(outcome.blocked_count, 2);
    }

    #[test]
    fn test_expired_drops_are_not_counted_as_blocked() {
        let jobs = vec![
            make_job("a", true, "unpaid internship", &[]),
            make_job("b", false, "paid role", &[]),
        ];
        let outcome = filter_jobs(&jobs, &settings(true, &["unpaid"]));
        assert_eq!(ids(&outcome), vec!["b"]);
        assert_eq!(outcome.blocked_count, 0);
    }

    #[test]
    fn test_expired_jobs_pass_when_filter_disabled() {
        let jobs = vec![
            make_job("a", true, "fine", &[]),
            make_job("b", false, "fine", &[]),
        ];
        let outcome = filter_jobs(&jobs, &settings(false, &[]));
        assert_eq!(ids(&outcome), vec!["a", "b"]);
    }

    #[test]
    fn test_expired_job_counts_as_blocked_once_filter_disabled() {
        let jobs = vec![make_job("a", true, "volunteer work", &[])];
        let outcome = filter_jobs(&jobs, &settings(false, &["volunteer"]));
        assert!(outcome.displayed.is_empty());
        assert_eq!(outcome.blocked_count, 1);
    }

    #[test]
    fn test_keyword_match_is_case_insensitive_on_job_text() {
        let jobs = vec![make_job("a", false, "nothing here", &["VOLUNTEER"])];
        let outcome = filter_jobs(&jobs, &settings(true, &["volunteer"]));
        assert!(outcome.displayed.is_empty());
        assert_eq!(outcome.blocked_count, 1);
    }

    #[test]
    fn test_uppercase_blocked_keyword_never_matches() {
        let jobs = vec![make_job("a", false, "volunteer", &[])];
        let outcome = filter_jobs(&jobs, &settings(true, &["Volunteer"]));
        assert_eq!(ids(&outcome), vec!["a"]);
    }

    #[test]
    fn test_empty_blocklist_blocks_nothing() {
        let outcome = filter_jobs(&seed_jobs(), &settings(true, &[]));
        assert_eq!(outcome.blocked_count, 0);
        assert_eq!(outcome.displayed.len(), 4);
    }

    #[test]
    fn test_empty_keyword_hides_everything() {
        let outcome = filter_jobs(&seed_jobs(), &settings(true, &[""]));
        assert!(outcome.displayed.is_empty());
        assert_eq!(outcome.blocked_count, 4);
    }

    #[test]
    fn test_keyword_can_span_title_and_description() {
        // combined text is "role a equity only ..." so the join space is searchable
        let jobs = vec![make_job("a", false, "equity only", &[])];
        let outcome = filter_jobs(&jobs, &settings(true, &["a equity"]));
        assert!(outcome.displayed.is_empty());
    }

    #[test]
    fn test_filtering_is_stable_and_idempotent() {
        let jobs = seed_jobs();
        let settings = settings(false, &["figma"]);
        let first = filter_jobs(&jobs, &settings);
        let second = filter_jobs(&jobs, &settings);
        assert_eq!(first, second);
        assert_eq!(ids(&first), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_displayed_jobs_never_contain_blocked_keywords() {
        let jobs = seed_jobs();
        let settings = settings(true, &["react", "sales"]);
        let outcome = filter_jobs(&jobs, &settings);
        for job in &outcome.displayed {
            let text = job.search_text();
            assert!(settings
                .blocked_keywords
                .iter()
                .all(|kw| !text.contains(kw.as_str())));
            assert!(!job.is_expired);
        }
        let unexpired = jobs.iter().filter(|j| !j.is_expired).count();
        assert_eq!(outcome.blocked_count, unexpired - outcome.displayed.len());
    }
}
