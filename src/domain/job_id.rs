use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a submitted introduction.
///
/// Generated ids read as `<user>_<group>_<unix seconds>_<microseconds>`; the
/// registry appends `_<n>` when two submissions land on the same microsecond.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn generate(user_id: &str, group_key: &str, at: DateTime<Utc>) -> Self {
        Self(format!(
            "{}_{}_{}_{:06}",
            user_id,
            group_key,
            at.timestamp(),
            at.timestamp_subsec_micros()
        ))
    }

    pub fn from_raw(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn with_suffix(&self, counter: u32) -> Self {
        Self(format!("{}_{}", self.0, counter))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
