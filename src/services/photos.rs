//! Diary photo blob paths and the upload/delete flows.
//!
//! Objects live at `<YYYY-MM-DD>/<upload-millis>.<ext>` inside the photo
//! bucket, so the date and file name can be recovered from a public URL.

use chrono::{NaiveDate, Utc};

use crate::ports::{PhotoStore, PhotoStoreError};

const DEFAULT_EXTENSION: &str = "jpg";

pub fn object_path(date: NaiveDate, uploaded_at_millis: i64, file_name: Option<&str>) -> String {
    format!(
        "{}/{}.{}",
        date.format("%Y-%m-%d"),
        uploaded_at_millis,
        extension(file_name)
    )
}

fn extension(file_name: Option<&str>) -> String {
    file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}

/// The `<date>/<file>` object path named by the last two segments of a
/// public photo URL. `None` unless the first of them is a date key.
pub fn path_from_url(url: &str) -> Option<String> {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let mut segments = without_query
        .trim_end_matches('/')
        .rsplit('/')
        .filter(|s| !s.is_empty());
    let file_name = segments.next()?;
    let date_key = segments.next()?;
    NaiveDate::parse_from_str(date_key, "%Y-%m-%d").ok()?;
    Some(format!("{date_key}/{file_name}"))
}

/// Store the photo and return its public URL.
pub async fn upload(
    store: &dyn PhotoStore,
    date: NaiveDate,
    file_name: Option<&str>,
    content_type: &str,
    bytes: Vec<u8>,
) -> Result<String, PhotoStoreError> {
    let path = object_path(date, Utc::now().timestamp_millis(), file_name);
    let stored = store.upload(&path, bytes, content_type).await?;
    tracing::info!(%date, path = %stored, "Photo uploaded");
    Ok(store.public_url(&stored))
}

/// Remove the object a public URL points at. Returns the removed path.
pub async fn delete_by_url(store: &dyn PhotoStore, url: &str) -> Result<Option<String>, PhotoStoreError> {
    let Some(path) = path_from_url(url) else {
        return Ok(None);
    };
    store.remove(&path).await?;
    tracing::info!(path = %path, "Photo deleted");
    Ok(Some(path))
}
