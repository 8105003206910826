use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::scheduler::SchedulerCore;
use crate::domain::{ArtifactPath, Job, JobId, JobState, Phase, PhaseMark, ProcessingTimes};

/// Caller-facing view of one job.
#[derive(Debug, Clone, Serialize)]
pub struct JobStatusReport {
    pub job_id: JobId,
    pub user_id: String,
    pub group_key: String,
    pub state: JobState,
    pub current_phase: Phase,
    pub queue_position: usize,
    pub progress_percent: u8,
    pub progress_message: &'static str,
    pub estimated_wait_seconds: u64,
    pub created_at: DateTime<Utc>,
    pub phase_timestamps: BTreeMap<PhaseMark, DateTime<Utc>>,
    pub error_message: Option<String>,
    pub transcript_path: Option<ArtifactPath>,
    pub form_path: Option<ArtifactPath>,
    pub profile_rating_path: Option<ArtifactPath>,
    pub intro_rating_path: Option<ArtifactPath>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SchedulerStats {
    pub current_phase: Phase,
    pub phase_started_at: DateTime<Utc>,
    pub transcription_queue_size: usize,
    pub evaluation_queue_size: usize,
    pub queue_length: usize,
    pub active_jobs: usize,
    pub total_jobs: u64,
    pub completed_jobs: u64,
    pub failed_jobs: u64,
    pub phase_switch_count: u64,
    pub processing_active: bool,
    pub average_processing_seconds: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobResults {
    Complete(Box<ResultBundle>),
    NotReady {
        job_id: JobId,
        state: JobState,
        current_phase: Phase,
        error_message: Option<String>,
    },
}

/// Everything a finished job produced, with artifact contents loaded.
/// A content field is `None` when its artifact could not be read back.
#[derive(Debug, Clone, Serialize)]
pub struct ResultBundle {
    pub job_id: JobId,
    pub user_id: String,
    pub group_key: String,
    pub media_path: PathBuf,
    pub transcript_path: ArtifactPath,
    pub form_path: ArtifactPath,
    pub profile_rating_path: ArtifactPath,
    pub intro_rating_path: ArtifactPath,
    pub phase_timestamps: BTreeMap<PhaseMark, DateTime<Utc>>,
    pub processing_times: ProcessingTimesReport,
    pub transcript: Option<String>,
    pub form: Option<Value>,
    pub profile_rating: Option<Value>,
    pub intro_rating: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProcessingTimesReport {
    pub total_seconds: f64,
    pub transcription_seconds: Option<f64>,
    pub evaluation_seconds: Option<f64>,
}

impl From<ProcessingTimes> for ProcessingTimesReport {
    fn from(times: ProcessingTimes) -> Self {
        Self {
            total_seconds: times.total.as_secs_f64(),
            transcription_seconds: times.transcription.map(|d| d.as_secs_f64()),
            evaluation_seconds: times.evaluation.map(|d| d.as_secs_f64()),
        }
    }
}

/// Read-only aggregation over the registry and queues.
pub(crate) struct StatusReporter<'a> {
    core: &'a SchedulerCore,
}

impl<'a> StatusReporter<'a> {
    pub(crate) fn new(core: &'a SchedulerCore) -> Self {
        Self { core }
    }

    pub(crate) fn queue_position(&self, job_id: &JobId) -> usize {
        self.core
            .transcription_queue
            .position(job_id)
            .or_else(|| self.core.evaluation_queue.position(job_id))
            .unwrap_or(0)
    }

    pub(crate) fn status(&self, job_id: &JobId) -> Option<JobStatusReport> {
        let job = self.core.registry.get(job_id)?;
        Some(self.report(job))
    }

    pub(crate) fn user_jobs(&self, user_id: &str, group_key: Option<&str>) -> Vec<JobStatusReport> {
        self.core
            .registry
            .list_for_user(user_id, group_key)
            .into_iter()
            .map(|job| self.report(job))
            .collect()
    }

    pub(crate) fn stats(&self) -> SchedulerStats {
        let core = self.core;
        let phase = core.controller.snapshot();
        let transcription_queue_size = core.transcription_queue.len();
        let evaluation_queue_size = core.evaluation_queue.len();

        SchedulerStats {
            current_phase: phase.phase,
            phase_started_at: phase.since,
            transcription_queue_size,
            evaluation_queue_size,
            queue_length: transcription_queue_size + evaluation_queue_size,
            active_jobs: core.registry.count_where(|job| {
                matches!(job.state(), JobState::Pending | JobState::Processing)
            }),
            total_jobs: core.stats.total(),
            completed_jobs: core.stats.completed(),
            failed_jobs: core.stats.failed(),
            phase_switch_count: core.stats.phase_switches(),
            processing_active: core.is_processing(),
            average_processing_seconds: core.stats.average_processing_time().as_secs_f64(),
        }
    }

    pub(crate) async fn results(&self, job_id: &JobId) -> Option<JobResults> {
        let job = self.core.registry.get(job_id)?;
        let current_phase = self.core.controller.current();

        let paths = match (
            job.state(),
            job.transcript_path(),
            job.form_path(),
            job.profile_rating_path(),
            job.intro_rating_path(),
        ) {
            (JobState::Complete, Some(t), Some(f), Some(p), Some(i)) => {
                (t.clone(), f.clone(), p.clone(), i.clone())
            }
            _ => {
                return Some(JobResults::NotReady {
                    job_id: job.id.clone(),
                    state: job.state(),
                    current_phase,
                    error_message: job.error_message().map(str::to_string),
                });
            }
        };
        Some(JobResults::Complete(Box::new(self.bundle(&job, paths).await)))
    }

    async fn bundle(
        &self,
        job: &Job,
        (transcript_path, form_path, profile_rating_path, intro_rating_path): (
            ArtifactPath,
            ArtifactPath,
            ArtifactPath,
            ArtifactPath,
        ),
    ) -> ResultBundle {
        let store = &self.core.collaborators.artifacts;
        let transcript = loaded(&transcript_path, store.read_text(&transcript_path).await);
        let form = loaded(&form_path, store.read_json(&form_path).await);
        let profile_rating = loaded(
            &profile_rating_path,
            store.read_json(&profile_rating_path).await,
        );
        let intro_rating = loaded(&intro_rating_path, store.read_json(&intro_rating_path).await);

        ResultBundle {
            job_id: job.id.clone(),
            user_id: job.user_id.clone(),
            group_key: job.group_key.clone(),
            media_path: job.media_path.clone(),
            transcript_path,
            form_path,
            profile_rating_path,
            intro_rating_path,
            phase_timestamps: job.phase_timestamps().clone(),
            processing_times: job.processing_times(Utc::now()).into(),
            transcript,
            form,
            profile_rating,
            intro_rating,
        }
    }

    fn report(&self, job: Job) -> JobStatusReport {
        let state = job.state();
        let progress = state.progress();
        let queue_position = self.queue_position(&job.id);
        let average = self.core.stats.average_processing_time();

        JobStatusReport {
            estimated_wait_seconds: estimated_wait(state, queue_position, average),
            current_phase: self.core.controller.current(),
            progress_percent: progress.percent,
            progress_message: progress.message,
            queue_position,
            state,
            created_at: job.created_at,
            phase_timestamps: job.phase_timestamps().clone(),
            error_message: job.error_message().map(str::to_string),
            transcript_path: job.transcript_path().cloned(),
            form_path: job.form_path().cloned(),
            profile_rating_path: job.profile_rating_path().cloned(),
            intro_rating_path: job.intro_rating_path().cloned(),
            job_id: job.id,
            user_id: job.user_id,
            group_key: job.group_key,
        }
    }
}

fn loaded<T, E: std::fmt::Display>(path: &ArtifactPath, result: Result<T, E>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "Could not load artifact for results");
            None
        }
    }
}

pub(crate) fn estimated_wait(state: JobState, position: usize, average: Duration) -> u64 {
    if state.is_terminal() {
        return 0;
    }
    let average = average.as_secs_f64();
    let seconds = if position > 0 {
        position as f64 * average
    } else {
        average * f64::from(100 - state.progress().percent) / 100.0
    };
    seconds.round() as u64
}
