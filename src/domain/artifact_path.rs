use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ArtifactCategory;

/// Location of a persisted artifact, relative to the artifact store root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactPath(String);

impl ArtifactPath {
    /// `<category dir>/<group key>/<prefix>_<YYYYmmdd_HHMMSS_micros>.<ext>`
    pub fn new(category: ArtifactCategory, group_key: &str, at: DateTime<Utc>) -> Self {
        Self(format!(
            "{}/{}/{}_{}.{}",
            category.directory(),
            sanitize_segment(group_key),
            category.file_prefix(),
            at.format("%Y%m%d_%H%M%S_%6f"),
            category.extension()
        ))
    }

    pub fn from_raw(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keeps a group key usable as a single directory name.
pub fn sanitize_segment(segment: &str) -> String {
    let cleaned: String = segment
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "unassigned".to_string()
    } else {
        cleaned
    }
}
