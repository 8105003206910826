use async_trait::async_trait;

use super::scheduler::SchedulerCore;
use super::worker_loop::StageProcessor;
use super::{JobFailure, StepError};
use crate::domain::{Artifact, ArtifactPath, Job, Stage};

/// Extracts the introduction form from a transcript, then produces the
/// profile and introduction ratings.
pub(crate) struct EvaluationWorker;

#[async_trait]
impl StageProcessor for EvaluationWorker {
    fn stage(&self) -> Stage {
        Stage::Evaluation
    }

    async fn process(&self, core: &SchedulerCore, job: &Job) -> Result<(), JobFailure> {
        core.transition(&job.id, Job::start_evaluation)?;

        let transcript = job
            .transcript_path()
            .cloned()
            .ok_or(JobFailure::Extraction(StepError::MissingArtifact("transcript")))?;

        tracing::info!("Extracting introduction form");
        let form = extract(core, job, &transcript)
            .await
            .map_err(JobFailure::Extraction)?;
        core.transition(&job.id, |j| j.complete_extraction(form.clone()))?;
        tracing::debug!(form = %form, "Form extracted");

        tracing::info!("Generating ratings");
        let (profile, intro) = rate(core, job, &form, &transcript)
            .await
            .map_err(JobFailure::Rating)?;
        let processing_time = core.transition(&job.id, |j| j.complete(profile, intro))?;
        core.stats.record_completion(processing_time);

        tracing::info!(
            processing_secs = processing_time.as_secs_f32(),
            "Job complete"
        );
        Ok(())
    }
}

async fn extract(
    core: &SchedulerCore,
    job: &Job,
    transcript: &ArtifactPath,
) -> Result<ArtifactPath, StepError> {
    let collaborators = &core.collaborators;
    let text = collaborators.artifacts.read_text(transcript).await?;
    let form = collaborators
        .extractor
        .extract_fields(&text, &job.group_key)
        .await?;
    let path = collaborators
        .artifacts
        .persist(&Artifact::Form(form), &job.group_key)
        .await?;
    Ok(path)
}

/// Both raters run before either result is checked, one after the other so
/// the endpoint only ever sees a single caller.
async fn rate(
    core: &SchedulerCore,
    job: &Job,
    form: &ArtifactPath,
    transcript: &ArtifactPath,
) -> Result<(ArtifactPath, ArtifactPath), StepError> {
    let collaborators = &core.collaborators;
    let profile = collaborators.profile_rater.rate_profile(form).await;
    let intro = collaborators.intro_rater.rate_intro(transcript).await;
    let (profile, intro) = (profile?, intro?);

    let profile_path = collaborators
        .artifacts
        .persist(&Artifact::ProfileRating(profile), &job.group_key)
        .await?;
    let intro_path = collaborators
        .artifacts
        .persist(&Artifact::IntroRating(intro), &job.group_key)
        .await?;
    Ok((profile_path, intro_path))
}
