use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::MediaStore;
use crate::application::services::Scheduler;

#[derive(Clone)]
pub struct AppState {
    pub scheduler: Scheduler,
    pub media_store: Arc<dyn MediaStore>,
    /// Canonical directory JSON submissions must point into.
    pub media_root: PathBuf,
}
