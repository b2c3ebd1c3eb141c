use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::dto::{ErrorBody, ErrorResponse};
use crate::ports::{PhotoStoreError, StoreError};
use crate::services::fortune::{FortuneError, GenerationParseError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Fortune(#[from] FortuneError),

    #[error("Database error: {0}")]
    Store(#[from] StoreError),

    #[error("Photo storage error: {0}")]
    Photo(#[from] PhotoStoreError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

struct Rendered {
    status: StatusCode,
    code: &'static str,
    message: String,
    details: Option<Value>,
}

impl Rendered {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            details: None,
        }
    }

    fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

fn render_fortune(err: &FortuneError) -> Rendered {
    match err {
        FortuneError::StorageRead { what, source } => {
            tracing::error!(what, error = %source, "Fortune flow read failed");
            Rendered::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage_read_failed",
                format!("Failed to fetch {what}"),
            )
            .with_details(json!({ "detail": source.to_string() }))
        }
        FortuneError::ProfileNotFound => Rendered::new(
            StatusCode::BAD_REQUEST,
            "profile_not_found",
            "Saju profile has not been configured yet",
        ),
        FortuneError::Generation(GenerationParseError::Empty) => Rendered::new(
            StatusCode::BAD_GATEWAY,
            "generation_empty_output",
            "Fortune generation returned no text",
        ),
        FortuneError::Generation(GenerationParseError::InvalidFormat {
            raw_excerpt,
            parse_error,
        }) => Rendered::new(
            StatusCode::BAD_GATEWAY,
            "generation_invalid_format",
            "Fortune generation output is not valid JSON",
        )
        .with_details(json!({ "raw_text": raw_excerpt, "parse_error": parse_error })),
        FortuneError::Generation(GenerationParseError::Incomplete { missing, parsed }) => {
            Rendered::new(
                StatusCode::BAD_GATEWAY,
                "generation_incomplete_data",
                "Fortune generation output is missing required fields",
            )
            .with_details(json!({ "missing": missing, "parsed": parsed }))
        }
        FortuneError::StorageWrite(source) => {
            tracing::error!(error = %source, "Fortune insert failed");
            Rendered::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage_write_failed",
                "Failed to save fortune",
            )
            .with_details(json!({ "detail": source.to_string() }))
        }
        FortuneError::Request(source) => Rendered::new(
            StatusCode::BAD_GATEWAY,
            "request_failed",
            "Fortune generation failed",
        )
        .with_details(json!({ "detail": source.to_string() })),
    }
}

impl AppError {
    fn render(&self) -> Rendered {
        match self {
            AppError::NotFound(msg) => Rendered::new(StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::Validation(msg) => Rendered::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                msg.clone(),
            ),
            AppError::Fortune(e) => render_fortune(e),
            AppError::Store(e) => {
                tracing::error!(error = %e, "Database error");
                Rendered::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "Internal server error",
                )
            }
            AppError::Photo(e) => {
                tracing::error!(error = %e, "Photo storage error");
                Rendered::new(StatusCode::BAD_GATEWAY, "storage_error", e.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
                Rendered::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let rendered = self.render();
        let body = ErrorResponse {
            error: ErrorBody {
                code: rendered.code.to_string(),
                message: rendered.message,
                status: rendered.status.as_u16(),
                details: rendered.details,
            },
        };

        (rendered.status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
