mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    CollaboratorProvider, CollaboratorSettings, LlmSettings, LoggingSettings, ServerSettings,
    Settings, StorageSettings, TranscriptionSettings,
};
