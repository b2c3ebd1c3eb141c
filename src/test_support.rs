//! In-memory port doubles and fixtures shared by the unit and router tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{NaiveDate, NaiveTime, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::config::Config;
use crate::models::diary::{DiaryEntry, DiaryUpsert};
use crate::models::fortune::{DailyFortune, NewFortune};
use crate::models::profile::{ProfileInput, SajuProfile, PROFILE_ID};
use crate::ports::{
    DiaryStore, FortuneStore, GenerationError, GenerationPrompt, HealthProbe, PhotoStore,
    PhotoStoreError, ProfileStore, StoreError, TextGenerator,
};
use crate::services::fortune::FortuneService;
use crate::AppState;

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/fortune_diary_test".into(),
        host: "127.0.0.1".into(),
        port: 8080,
        frontend_url: "http://localhost:3000".into(),
        cors_extra_origins: vec![],
        run_migrations: false,
        openai_api_key: "sk-test".into(),
        openai_model: "gpt-test".into(),
        openai_base_url: "http://localhost:9/v1".into(),
        llm_timeout_secs: None,
        supabase_url: "https://demo.supabase.co".into(),
        supabase_service_key: "service-key".into(),
        photo_bucket: "diary-photos".into(),
        max_photo_bytes: 1024 * 1024,
    }
}

pub fn sample_profile_input() -> ProfileInput {
    ProfileInput {
        birth_date: NaiveDate::from_ymd_opt(1990, 3, 14).unwrap(),
        birth_time: NaiveTime::from_hms_opt(7, 30, 0).unwrap(),
        saju_data: json!({ "birthDate": "1990-03-14", "birthTime": "07:30" }),
    }
}

/// Table-level ports backed by ordered maps, mirroring the Postgres
/// constraints: one fortune and one diary row per date, one profile.
#[derive(Default)]
pub struct MemoryStore {
    profile: Mutex<Option<SajuProfile>>,
    fortunes: Mutex<BTreeMap<NaiveDate, DailyFortune>>,
    diary: Mutex<BTreeMap<NaiveDate, DiaryEntry>>,
    fail_reads: AtomicBool,
    stale_fortune_reads: AtomicBool,
}

impl MemoryStore {
    /// Make every lookup fail with a query error.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make fortune lookups miss even when a row exists.
    pub fn stale_fortune_reads(&self, stale: bool) {
        self.stale_fortune_reads.store(stale, Ordering::SeqCst);
    }

    pub async fn fortune_count(&self) -> usize {
        self.fortunes.lock().await.len()
    }

    pub async fn diary_count(&self) -> usize {
        self.diary.lock().await.len()
    }

    fn check_read(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Query("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn load(&self) -> Result<Option<SajuProfile>, StoreError> {
        self.check_read()?;
        Ok(self.profile.lock().await.clone())
    }

    async fn save(&self, input: &ProfileInput) -> Result<SajuProfile, StoreError> {
        let profile = SajuProfile {
            id: PROFILE_ID,
            birth_date: input.birth_date,
            birth_time: input.birth_time,
            saju_data: input.saju_data.clone(),
            updated_at: Utc::now(),
        };
        *self.profile.lock().await = Some(profile.clone());
        Ok(profile)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.profile.lock().await = None;
        Ok(())
    }
}

#[async_trait]
impl FortuneStore for MemoryStore {
    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<DailyFortune>, StoreError> {
        self.check_read()?;
        if self.stale_fortune_reads.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(self.fortunes.lock().await.get(&date).cloned())
    }

    async fn insert(&self, fortune: &NewFortune) -> Result<DailyFortune, StoreError> {
        let mut fortunes = self.fortunes.lock().await;
        if fortunes.contains_key(&fortune.fortune_date) {
            return Err(StoreError::Conflict(format!(
                "daily_fortunes_pkey: {}",
                fortune.fortune_date
            )));
        }
        let row = DailyFortune {
            fortune_date: fortune.fortune_date,
            fortune_content: fortune.fortune_content.clone(),
            lucky_color: fortune.lucky_color.clone(),
            lucky_number: fortune.lucky_number,
            daily_tip: fortune.daily_tip.clone(),
            created_at: Utc::now(),
        };
        fortunes.insert(row.fortune_date, row.clone());
        Ok(row)
    }

    async fn list_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyFortune>, StoreError> {
        self.check_read()?;
        if start > end {
            return Ok(vec![]);
        }
        let fortunes = self.fortunes.lock().await;
        Ok(fortunes
            .range(start..=end)
            .rev()
            .map(|(_, f)| f.clone())
            .collect())
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let mut fortunes = self.fortunes.lock().await;
        let count = fortunes.len() as u64;
        fortunes.clear();
        Ok(count)
    }
}

#[async_trait]
impl DiaryStore for MemoryStore {
    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<DiaryEntry>, StoreError> {
        self.check_read()?;
        Ok(self.diary.lock().await.get(&date).cloned())
    }

    async fn upsert(&self, entry: &DiaryUpsert) -> Result<DiaryEntry, StoreError> {
        let mut diary = self.diary.lock().await;
        let now = Utc::now();
        let created_at = diary
            .get(&entry.entry_date)
            .map(|existing| existing.created_at)
            .unwrap_or(now);
        let row = DiaryEntry {
            entry_date: entry.entry_date,
            emotion: entry.emotion,
            photo_url: entry.photo_url.clone(),
            created_at,
            updated_at: now,
        };
        diary.insert(row.entry_date, row.clone());
        Ok(row)
    }

    async fn list_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DiaryEntry>, StoreError> {
        self.check_read()?;
        if start > end {
            return Ok(vec![]);
        }
        let diary = self.diary.lock().await;
        Ok(diary.range(start..=end).rev().map(|(_, e)| e.clone()).collect())
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let mut diary = self.diary.lock().await;
        let count = diary.len() as u64;
        diary.clear();
        Ok(count)
    }
}

#[async_trait]
impl HealthProbe for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.check_read()
    }
}

#[derive(Default)]
pub struct MemoryPhotoStore {
    objects: Mutex<BTreeMap<String, (Vec<u8>, String)>>,
}

impl MemoryPhotoStore {
    pub async fn paths(&self) -> Vec<String> {
        self.objects.lock().await.keys().cloned().collect()
    }
}

#[async_trait]
impl PhotoStore for MemoryPhotoStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, PhotoStoreError> {
        let mut objects = self.objects.lock().await;
        if objects.contains_key(path) {
            return Err(PhotoStoreError::Rejected {
                operation: "upload",
                status: 409,
                body: "The resource already exists".into(),
            });
        }
        objects.insert(path.to_string(), (bytes, content_type.to_string()));
        Ok(path.to_string())
    }

    fn public_url(&self, path: &str) -> String {
        format!("https://demo.supabase.co/storage/v1/object/public/diary-photos/{path}")
    }

    async fn remove(&self, path: &str) -> Result<(), PhotoStoreError> {
        self.objects.lock().await.remove(path);
        Ok(())
    }
}

/// Text generator that answers every prompt with one canned result.
pub struct ScriptedGenerator {
    reply: Result<String, GenerationError>,
    calls: AtomicUsize,
    last_prompt: StdMutex<Option<GenerationPrompt>>,
}

impl ScriptedGenerator {
    pub fn replying(text: &str) -> Self {
        Self::with(Ok(text.to_string()))
    }

    pub fn failing(error: GenerationError) -> Self {
        Self::with(Err(error))
    }

    fn with(reply: Result<String, GenerationError>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_prompt: StdMutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<GenerationPrompt> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &GenerationPrompt) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.clone());
        self.reply.clone()
    }
}

pub struct TestHarness {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub photos: Arc<MemoryPhotoStore>,
    pub generator: Arc<ScriptedGenerator>,
}

pub fn harness(generator: ScriptedGenerator) -> TestHarness {
    let store = Arc::new(MemoryStore::default());
    let photos = Arc::new(MemoryPhotoStore::default());
    let generator = Arc::new(generator);

    let state = AppState {
        config: Arc::new(test_config()),
        profiles: store.clone(),
        fortunes: store.clone(),
        diary: store.clone(),
        health: store.clone(),
        photos: photos.clone(),
        fortune_service: FortuneService::new(store.clone(), store.clone(), generator.clone()),
    };

    TestHarness {
        state,
        store,
        photos,
        generator,
    }
}

/// Run one request through the full router and decode the JSON body
/// (`Value::Null` for an empty or non-JSON body).
pub async fn send(harness: &TestHarness, request: Request<Body>) -> (StatusCode, Value) {
    let response = crate::app(harness.state.clone())
        .oneshot(request)
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
