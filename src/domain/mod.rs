mod artifact;
mod artifact_path;
mod job;
mod job_id;
mod job_state;
mod phase;
mod phase_mark;

pub use artifact::{Artifact, ArtifactCategory};
pub use artifact_path::{ArtifactPath, sanitize_segment};
pub use job::{Job, JobTransitionError, ProcessingTimes};
pub use job_id::JobId;
pub use job_state::{JobState, Progress};
pub use phase::{Phase, Stage};
pub use phase_mark::PhaseMark;
