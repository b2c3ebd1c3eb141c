//! Daily fortune fetch-or-generate flow.
//!
//! A fortune is generated at most once per date: a cached row is returned as
//! is, otherwise the profile's chart is sent to the text generator, the reply
//! is parsed and validated, and the result is inserted. Nothing is retried and
//! nothing is written on any failure path.

pub mod parse;
pub mod prompt;

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::fortune::DailyFortune;
use crate::ports::{FortuneStore, GenerationError, ProfileStore, StoreError, TextGenerator};

pub use parse::{parse_generation, GenerationParseError};

#[derive(Debug, Error)]
pub enum FortuneError {
    #[error("failed to read {what}: {source}")]
    StorageRead {
        what: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("saju profile is not configured")]
    ProfileNotFound,

    #[error(transparent)]
    Generation(#[from] GenerationParseError),

    #[error("failed to save fortune: {0}")]
    StorageWrite(#[source] StoreError),

    #[error("fortune generation request failed: {0}")]
    Request(#[from] GenerationError),
}

#[derive(Clone)]
pub struct FortuneService {
    fortunes: Arc<dyn FortuneStore>,
    profiles: Arc<dyn ProfileStore>,
    generator: Arc<dyn TextGenerator>,
}

impl FortuneService {
    pub fn new(
        fortunes: Arc<dyn FortuneStore>,
        profiles: Arc<dyn ProfileStore>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            fortunes,
            profiles,
            generator,
        }
    }

    pub async fn fetch_or_generate(&self, date: NaiveDate) -> Result<DailyFortune, FortuneError> {
        let cached = self
            .fortunes
            .find_by_date(date)
            .await
            .map_err(|source| FortuneError::StorageRead {
                what: "fortune",
                source,
            })?;
        if let Some(fortune) = cached {
            tracing::debug!(%date, "Fortune cache hit");
            return Ok(fortune);
        }

        let profile = self
            .profiles
            .load()
            .await
            .map_err(|source| FortuneError::StorageRead {
                what: "profile",
                source,
            })?
            .ok_or(FortuneError::ProfileNotFound)?;

        tracing::info!(%date, "Generating fortune");
        let request = prompt::build_prompt(date, &profile.saju_data);
        let raw = self.generator.generate(&request).await.map_err(|e| {
            tracing::error!(%date, error = %e, "Fortune generation request failed");
            e
        })?;

        let generated = parse_generation(&raw).map_err(|e| {
            tracing::warn!(%date, error = %e, raw_len = raw.len(), "Unusable generation output");
            e
        })?;

        let inserted = self
            .fortunes
            .insert(&generated.for_date(date))
            .await
            .map_err(FortuneError::StorageWrite)?;

        tracing::info!(%date, "Fortune saved");
        Ok(inserted)
    }
}
