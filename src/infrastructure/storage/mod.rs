mod local_media_store;
mod object_artifact_store;

pub use local_media_store::LocalMediaStore;
pub use object_artifact_store::ObjectArtifactStore;
