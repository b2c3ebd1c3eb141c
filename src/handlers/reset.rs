use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::reset::{self, ResetSummary};
use crate::AppState;

/// Delete every fortune, diary entry and the profile. Photos are left in
/// the blob store.
pub async fn reset_all(State(state): State<AppState>) -> AppResult<Json<ResetSummary>> {
    let summary = reset::reset_all(
        state.fortunes.as_ref(),
        state.diary.as_ref(),
        state.profiles.as_ref(),
    )
    .await?;
    Ok(Json(summary))
}
