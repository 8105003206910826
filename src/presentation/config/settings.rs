use std::path::PathBuf;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;
use crate::application::services::SchedulerConfig;
use crate::infrastructure::audio::TranscriptionProvider;

/// Application settings. Every section has defaults, so an empty
/// configuration starts a server with mock collaborators.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub scheduler: SchedulerConfig,
    pub collaborators: CollaboratorSettings,
    pub transcription: TranscriptionSettings,
    pub llm: LlmSettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Layers `appsettings.<environment>` (optional) under `APP_*`
    /// environment variables. Sections are split with a double underscore:
    /// `APP_SERVER__PORT=8080`, `APP_SCHEDULER__DEQUEUE_TIMEOUT=2.5`.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollaboratorProvider {
    #[default]
    Mock,
    #[serde(rename = "openai")]
    OpenAi,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CollaboratorSettings {
    pub provider: CollaboratorProvider,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    pub provider: Option<TranscriptionProvider>,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub model: String,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            provider: None,
            base_url: None,
            api_key: None,
            model: "whisper-1".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: usize,
    pub temperature: f32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 2048,
            temperature: 0.1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub artifact_root: PathBuf,
    pub media_root: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            artifact_root: PathBuf::from("data/artifacts"),
            media_root: PathBuf::from("data/media"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub json: bool,
}
