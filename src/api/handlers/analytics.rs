//! Handler for the analytics summary.

use axum::{Json, extract::State};

use crate::api::middleware::AccountId;
use crate::application::services::AnalyticsReport;
use crate::error::AppError;
use crate::state::AppState;

/// Returns totals and top links for the caller.
///
/// # Endpoint
///
/// `GET /api/analytics`
///
/// # Response
///
/// ```json
/// {
///   "plan": "free",
///   "planLabel": "Free Plan",
///   "advanced": false,
///   "totalLinks": 3,
///   "activeLinks": 2,
///   "totalClicks": 10,
///   "averageClicksPerLink": 3,
///   "topPerformingLinks": [{ "id": "…", "title": "Blog", "url": "…", "click_count": 7 }]
/// }
/// ```
pub async fn analytics_handler(
    State(state): State<AppState>,
    AccountId(account_id): AccountId,
) -> Result<Json<AnalyticsReport>, AppError> {
    let report = state.analytics_service.report(account_id).await?;
    Ok(Json(report))
}
