use std::path::Path;

use async_trait::async_trait;
use tokio::time::Instant;

use super::scheduler::SchedulerCore;
use super::worker_loop::StageProcessor;
use super::{JobFailure, StepError};
use crate::domain::{Artifact, ArtifactPath, Job, Stage};

/// Turns submitted media into a persisted transcript and hands the job to
/// the evaluation queue.
pub(crate) struct TranscriptionWorker;

#[async_trait]
impl StageProcessor for TranscriptionWorker {
    fn stage(&self) -> Stage {
        Stage::Transcription
    }

    async fn process(&self, core: &SchedulerCore, job: &Job) -> Result<(), JobFailure> {
        core.transition(&job.id, Job::start_transcription)?;
        wait_for_media(core, &job.media_path).await?;

        tracing::info!(media = %job.media_path.display(), "Starting transcription");
        let transcript = transcribe(core, job)
            .await
            .map_err(JobFailure::Transcription)?;

        core.transition(&job.id, |j| j.complete_transcription(transcript.clone()))?;
        core.evaluation_queue.push(job.id.clone());

        tracing::info!(
            transcript = %transcript,
            evaluation_queue = core.evaluation_queue.len(),
            "Transcription complete"
        );
        Ok(())
    }
}

async fn transcribe(core: &SchedulerCore, job: &Job) -> Result<ArtifactPath, StepError> {
    let collaborators = &core.collaborators;
    let text = collaborators.transcription.transcribe(&job.media_path).await?;
    let path = collaborators
        .artifacts
        .persist(&Artifact::Transcript(text), &job.group_key)
        .await?;
    Ok(path)
}

/// Uploads may still be in flight when the job is dequeued.
async fn wait_for_media(core: &SchedulerCore, path: &Path) -> Result<(), JobFailure> {
    let waited = core.config.media_wait;
    let deadline = Instant::now() + waited;
    loop {
        if media_ready(path).await {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(JobFailure::MediaUnavailable {
                path: path.to_path_buf(),
                waited,
            });
        }
        tracing::debug!(media = %path.display(), "Waiting for media file");
        tokio::time::sleep(core.config.media_poll).await;
    }
}

async fn media_ready(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}
