//! Axum route handlers for the feed, analysis and settings API.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::feed::view::FeedView;
use crate::models::job::AnalysisResult;
use crate::models::profile::UserProfile;
use crate::models::settings::ExtensionSettings;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    pub job_id: String,
    pub saved: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub filter_expired: Option<bool>,
    pub show_match_score: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct KeywordRequest {
    pub keyword: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/profile
pub async fn handle_get_profile(State(state): State<AppState>) -> Json<UserProfile> {
    Json(state.profile.as_ref().clone())
}

/// GET /api/v1/feed
///
/// Filtered job cards plus the blocked/saved counters.
pub async fn handle_get_feed(State(state): State<AppState>) -> Json<FeedView> {
    Json(state.session.feed_view().await)
}

/// POST /api/v1/feed/reset
pub async fn handle_reset_feed(State(state): State<AppState>) -> Json<FeedView> {
    state.session.reset_feed().await;
    Json(state.session.feed_view().await)
}

/// POST /api/v1/jobs/:id/analyze
///
/// Always answers with a usable score; matcher failures are folded into the result.
pub async fn handle_analyze_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<AnalysisResult>, AppError> {
    let result = state
        .session
        .analyze_job(&job_id, Arc::clone(&state.matcher), Arc::clone(&state.profile))
        .await?;
    Ok(Json(result))
}

/// POST /api/v1/jobs/:id/save
pub async fn handle_toggle_saved(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<SaveResponse>, AppError> {
    if state.session.job(&job_id).await.is_none() {
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }
    let saved = state
        .session
        .update_settings(|s| s.toggle_saved(&job_id))
        .await;
    Ok(Json(SaveResponse { job_id, saved }))
}

/// GET /api/v1/settings
pub async fn handle_get_settings(State(state): State<AppState>) -> Json<ExtensionSettings> {
    Json(state.session.settings().await)
}

/// PATCH /api/v1/settings
pub async fn handle_patch_settings(
    State(state): State<AppState>,
    Json(patch): Json<SettingsPatch>,
) -> Json<ExtensionSettings> {
    state
        .session
        .update_settings(|s| {
            if let Some(value) = patch.filter_expired {
                s.set_filter_expired(value);
            }
            if let Some(value) = patch.show_match_score {
                s.set_show_match_score(value);
            }
        })
        .await;
    Json(state.session.settings().await)
}

/// POST /api/v1/settings/keywords
pub async fn handle_add_keyword(
    State(state): State<AppState>,
    Json(req): Json<KeywordRequest>,
) -> Result<(StatusCode, Json<ExtensionSettings>), AppError> {
    let added = state
        .session
        .update_settings(|s| s.add_blocked_keyword(&req.keyword))
        .await;
    if !added {
        return Err(AppError::Validation("keyword cannot be empty".to_string()));
    }
    Ok((StatusCode::CREATED, Json(state.session.settings().await)))
}

/// DELETE /api/v1/settings/keywords/:keyword
pub async fn handle_remove_keyword(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
) -> Json<ExtensionSettings> {
    state
        .session
        .update_settings(|s| s.remove_blocked_keyword(&keyword))
        .await;
    Json(state.session.settings().await)
}
