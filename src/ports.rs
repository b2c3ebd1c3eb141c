//! Seams between the request flows and the external services they delegate to.
//!
//! Production adapters live in `db` (Postgres) and `clients` (OpenAI, Supabase
//! Storage). Each port reports failures through its own typed error so callers
//! can tell a read failure from a write failure without inspecting strings.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::models::diary::{DiaryEntry, DiaryUpsert};
use crate::models::fortune::{DailyFortune, NewFortune};
use crate::models::profile::{ProfileInput, SajuProfile};

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique or primary key constraint rejected the write.
    #[error("duplicate row: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Query(String),
}

#[derive(Debug, Error)]
pub enum PhotoStoreError {
    #[error("storage request failed: {0}")]
    Transport(String),

    #[error("storage rejected {operation} with status {status}: {body}")]
    Rejected {
        operation: &'static str,
        status: u16,
        body: String,
    },
}

#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("text generation request failed: {0}")]
    Transport(String),

    #[error("text generation API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed text generation response: {0}")]
    Decode(String),
}

/// The singleton birth-chart profile. There is never more than one record,
/// so the store exposes no key.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn load(&self) -> Result<Option<SajuProfile>, StoreError>;

    /// Create or replace the profile, returning the stored record.
    async fn save(&self, input: &ProfileInput) -> Result<SajuProfile, StoreError>;

    async fn clear(&self) -> Result<(), StoreError>;
}

#[async_trait]
pub trait FortuneStore: Send + Sync {
    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<DailyFortune>, StoreError>;

    /// Plain insert. A row that already exists for the date is a
    /// [`StoreError::Conflict`], never an overwrite.
    async fn insert(&self, fortune: &NewFortune) -> Result<DailyFortune, StoreError>;

    /// Rows with `start <= fortune_date <= end`, newest first.
    async fn list_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyFortune>, StoreError>;

    async fn delete_all(&self) -> Result<u64, StoreError>;
}

#[async_trait]
pub trait DiaryStore: Send + Sync {
    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<DiaryEntry>, StoreError>;

    async fn upsert(&self, entry: &DiaryUpsert) -> Result<DiaryEntry, StoreError>;

    /// Rows with `start <= entry_date <= end`, newest first.
    async fn list_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DiaryEntry>, StoreError>;

    async fn delete_all(&self) -> Result<u64, StoreError>;
}

#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Blob storage for diary photos, addressed by `<date>/<file>` paths.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Store `bytes` at `path` without overwriting; returns the stored path.
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, PhotoStoreError>;

    fn public_url(&self, path: &str) -> String;

    async fn remove(&self, path: &str) -> Result<(), PhotoStoreError>;
}

/// One prompt-completion round trip. No streaming, no conversation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPrompt {
    pub system: String,
    pub developer: String,
    pub user: String,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the raw output text, which may be empty.
    async fn generate(&self, prompt: &GenerationPrompt) -> Result<String, GenerationError>;
}
