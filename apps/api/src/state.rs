use std::sync::Arc;

use crate::config::Config;
use crate::feed::session::Session;
use crate::matching::JobMatcher;
use crate::models::profile::UserProfile;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single in-memory feed session: jobs, settings and in-flight analyses.
    pub session: Arc<Session>,
    /// Pluggable matcher. Gemini when a key is configured, simulated otherwise.
    pub matcher: Arc<dyn JobMatcher>,
    pub profile: Arc<UserProfile>,
    pub config: Config,
}
