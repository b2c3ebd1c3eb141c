use serde::Serialize;

use crate::ports::{DiaryStore, FortuneStore, ProfileStore, StoreError};

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ResetSummary {
    pub fortunes_deleted: u64,
    pub diary_entries_deleted: u64,
}

/// Delete every fortune, every diary entry and the profile.
///
/// The three deletes run concurrently and are not atomic: when one fails the
/// others may still have been applied.
pub async fn reset_all(
    fortunes: &dyn FortuneStore,
    diary: &dyn DiaryStore,
    profiles: &dyn ProfileStore,
) -> Result<ResetSummary, StoreError> {
    let (fortunes_deleted, diary_entries_deleted, profile_cleared) =
        tokio::join!(fortunes.delete_all(), diary.delete_all(), profiles.clear());
    profile_cleared?;

    let summary = ResetSummary {
        fortunes_deleted: fortunes_deleted?,
        diary_entries_deleted: diary_entries_deleted?,
    };

    tracing::warn!(
        fortunes = summary.fortunes_deleted,
        diary_entries = summary.diary_entries_deleted,
        "All data reset"
    );
    Ok(summary)
}
