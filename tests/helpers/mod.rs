use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};

use introeval::application::ports::{
    ArtifactStore, ExtractionError, FieldExtractor, IntroRater, ProfileRater, RatingError,
    TranscriptionEngine, TranscriptionError,
};
use introeval::application::services::{Collaborators, Scheduler, SchedulerConfig};
use introeval::domain::{ArtifactPath, JobId, JobState};
use introeval::infrastructure::storage::ObjectArtifactStore;

/// Media stems that make the scripted collaborators misbehave.
pub const FAIL_TRANSCRIBE: &str = "fail-transcribe";
pub const FAIL_EXTRACT: &str = "fail-extract";
pub const PANIC: &str = "panic";

/// Watches the model endpoint: counts calls that overlap another call and
/// records the order media reached transcription.
#[derive(Default)]
pub struct EndpointTracker {
    in_use: AtomicBool,
    overlaps: AtomicUsize,
    calls: AtomicUsize,
    transcribed: Mutex<Vec<String>>,
}

impl EndpointTracker {
    pub fn overlaps(&self) -> usize {
        self.overlaps.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn transcribed(&self) -> Vec<String> {
        self.transcribed.lock().clone()
    }

    fn enter(&self) -> EndpointCall<'_> {
        if self.in_use.swap(true, Ordering::SeqCst) {
            self.overlaps.fetch_add(1, Ordering::SeqCst);
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        EndpointCall { tracker: self }
    }
}

struct EndpointCall<'a> {
    tracker: &'a EndpointTracker,
}

impl Drop for EndpointCall<'_> {
    fn drop(&mut self) {
        self.tracker.in_use.store(false, Ordering::SeqCst);
    }
}

const CALL_TIME: Duration = Duration::from_millis(15);

struct ScriptedTranscription {
    endpoint: Arc<EndpointTracker>,
}

#[async_trait]
impl TranscriptionEngine for ScriptedTranscription {
    async fn transcribe(&self, media_path: &Path) -> Result<String, TranscriptionError> {
        let _call = self.endpoint.enter();
        let stem = stem(media_path);
        self.endpoint.transcribed.lock().push(stem.clone());
        tokio::time::sleep(CALL_TIME).await;

        if stem.starts_with(PANIC) {
            panic!("transcription engine crashed on {}", stem);
        }
        if stem.starts_with(FAIL_TRANSCRIBE) {
            return Err(TranscriptionError::TranscriptionFailed(
                "engine rejected audio".to_string(),
            ));
        }
        Ok(format!("Transcript of {}", stem))
    }
}

struct ScriptedExtractor {
    endpoint: Arc<EndpointTracker>,
}

#[async_trait]
impl FieldExtractor for ScriptedExtractor {
    async fn extract_fields(
        &self,
        transcript: &str,
        group_key: &str,
    ) -> Result<Value, ExtractionError> {
        let _call = self.endpoint.enter();
        tokio::time::sleep(CALL_TIME).await;
        if transcript.contains(FAIL_EXTRACT) {
            return Err(ExtractionError::UnparseableResponse("not json".to_string()));
        }
        Ok(json!({ "group_key": group_key, "fields": { "name": transcript } }))
    }
}

struct ScriptedRaters {
    endpoint: Arc<EndpointTracker>,
}

#[async_trait]
impl ProfileRater for ScriptedRaters {
    async fn rate_profile(&self, _form: &ArtifactPath) -> Result<Value, RatingError> {
        let _call = self.endpoint.enter();
        tokio::time::sleep(CALL_TIME).await;
        Ok(json!({ "profile_rating": 7.5 }))
    }
}

#[async_trait]
impl IntroRater for ScriptedRaters {
    async fn rate_intro(&self, _transcript: &ArtifactPath) -> Result<Value, RatingError> {
        let _call = self.endpoint.enter();
        tokio::time::sleep(CALL_TIME).await;
        Ok(json!({ "intro_rating": 8.0 }))
    }
}

pub fn fast_config() -> SchedulerConfig {
    SchedulerConfig {
        autostart: true,
        dequeue_timeout: Duration::from_millis(100),
        monitor_interval: Duration::from_millis(50),
        monitor_backoff: Duration::from_millis(100),
        switch_wait: Duration::from_millis(500),
        shutdown_wait: Duration::from_secs(1),
        media_wait: Duration::from_millis(300),
        media_poll: Duration::from_millis(20),
        stats_window: 20,
        default_processing_time: Duration::from_secs(45),
    }
}

/// A scheduler wired to scripted collaborators, an in-memory artifact store
/// and a temporary media directory.
pub struct TestScheduler {
    pub scheduler: Scheduler,
    pub endpoint: Arc<EndpointTracker>,
    pub artifacts: Arc<dyn ArtifactStore>,
    media_dir: tempfile::TempDir,
}

impl TestScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        let endpoint = Arc::new(EndpointTracker::default());
        let raters = Arc::new(ScriptedRaters {
            endpoint: Arc::clone(&endpoint),
        });
        let artifacts: Arc<dyn ArtifactStore> = Arc::new(ObjectArtifactStore::in_memory());
        let collaborators = Collaborators {
            transcription: Arc::new(ScriptedTranscription {
                endpoint: Arc::clone(&endpoint),
            }),
            extractor: Arc::new(ScriptedExtractor {
                endpoint: Arc::clone(&endpoint),
            }),
            profile_rater: raters.clone(),
            intro_rater: raters,
            artifacts: Arc::clone(&artifacts),
        };

        Self {
            scheduler: Scheduler::new(collaborators, config),
            endpoint,
            artifacts,
            media_dir: tempfile::TempDir::new().unwrap(),
        }
    }

    pub fn started() -> Self {
        Self::new(fast_config())
    }

    pub fn stopped() -> Self {
        Self::new(SchedulerConfig {
            autostart: false,
            ..fast_config()
        })
    }

    /// Writes a small media file and returns its path.
    pub fn media(&self, stem: &str) -> PathBuf {
        let path = self.media_dir.path().join(format!("{}.wav", stem));
        std::fs::write(&path, b"RIFF----WAVEfmt ").unwrap();
        path
    }

    pub fn media_root(&self) -> &Path {
        self.media_dir.path()
    }

    pub fn missing_media(&self, stem: &str) -> PathBuf {
        self.media_dir.path().join(format!("{}.wav", stem))
    }

    pub async fn submit(&self, user_id: &str, stem: &str) -> JobId {
        self.scheduler
            .submit(user_id, "cs101", self.media(stem))
            .await
            .unwrap()
    }

    pub fn state(&self, id: &JobId) -> JobState {
        self.scheduler.status(id).unwrap().state
    }

    /// Waits until every job reached a terminal state.
    pub async fn settle(&self, ids: &[JobId]) -> bool {
        self.settle_within(ids, Duration::from_secs(10)).await
    }

    pub async fn settle_within(&self, ids: &[JobId], timeout: Duration) -> bool {
        wait_for(timeout, || ids.iter().all(|id| self.state(id).is_terminal())).await
    }
}

pub async fn wait_for(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if condition() {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}
