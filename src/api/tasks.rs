//! Internal task endpoints (invoked by CI schedulers)
//!
//! These endpoints are intentionally small and secured by a shared
//! secret token (WEEKLY_TASK_TOKEN). Store the token as a repository
//! secret if you trigger the endpoint from a scheduled workflow.

use axum::{extract::State, http::HeaderMap, Json};

use crate::{
    error::{AppError, AppResult},
    services::notifications::WeeklyRunSummary,
    AppState,
};

/// Header carrying the shared secret
pub const TASK_TOKEN_HEADER: &str = "X-Task-Token";

/// A request is authorized only when a non-empty token is configured
/// and the header matches it exactly.
fn token_is_valid(expected: Option<&str>, provided: Option<&str>) -> bool {
    match (expected.filter(|t| !t.is_empty()), provided) {
        (Some(expected), Some(provided)) => expected == provided,
        _ => false,
    }
}

/// Run the weekly expiration notifications.
///
/// Requires header `X-Task-Token` matching the configured task token.
/// With no token configured, every request is rejected.
#[utoipa::path(
    post,
    path = "/internal/tasks/weekly-expirations",
    tag = "tasks",
    responses(
        (status = 200, description = "All checks ran", body = WeeklyRunSummary),
        (status = 403, description = "Missing or invalid task token"),
        (status = 500, description = "Unexpected error during the run")
    )
)]
pub async fn weekly_expirations(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<WeeklyRunSummary>> {
    let expected = state.config.tasks.token.as_deref();
    let provided = headers
        .get(TASK_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());

    if !token_is_valid(expected, provided) {
        tracing::warn!("Unauthorized attempt to run weekly expirations");
        return Err(AppError::Authorization(
            "Invalid or missing task token".to_string(),
        ));
    }

    // Each check absorbs its own anticipated failures; an error
    // escaping here is unexpected and surfaces as a 500.
    let summary = state
        .services
        .notifications
        .run_weekly_checks()
        .await
        .map_err(|e| {
            tracing::error!("Error while running weekly expirations task: {}", e);
            AppError::Internal("Weekly expirations task failed".to_string())
        })?;

    Ok(Json(summary))
}
