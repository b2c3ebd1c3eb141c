use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use validator::Validate;

use super::parse_date_key;
use crate::dto::{DeletePhotoRequest, DeletePhotoResponse, PhotoUploadResponse};
use crate::error::{AppError, AppResult};
use crate::services::photos;
use crate::AppState;

const FILE_FIELD: &str = "file";

/// Store an image from the `file` multipart field and return its public URL.
/// The diary entry is not touched; the client upserts it with the URL.
pub async fn upload_photo(
    State(state): State<AppState>,
    Path(date): Path<String>,
    mut multipart: Multipart,
) -> AppResult<Json<PhotoUploadResponse>> {
    let date = parse_date_key(&date)?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_owned);
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_owned();
        if !content_type.starts_with("image/") {
            return Err(AppError::Validation(format!(
                "Unsupported photo content type: {content_type}"
            )));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        if bytes.is_empty() {
            return Err(AppError::Validation("Photo file is empty".into()));
        }

        let url = photos::upload(
            state.photos.as_ref(),
            date,
            file_name.as_deref(),
            &content_type,
            bytes.to_vec(),
        )
        .await?;
        return Ok(Json(PhotoUploadResponse { url }));
    }

    Err(AppError::Validation(format!(
        "Missing multipart field '{FILE_FIELD}'"
    )))
}

pub async fn delete_photo(
    State(state): State<AppState>,
    Json(body): Json<DeletePhotoRequest>,
) -> AppResult<Json<DeletePhotoResponse>> {
    body.validate()?;
    let path = photos::delete_by_url(state.photos.as_ref(), &body.url).await?;
    Ok(Json(DeletePhotoResponse {
        deleted: path.is_some(),
        path,
    }))
}
