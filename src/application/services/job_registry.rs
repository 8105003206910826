use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::domain::{Job, JobId};

/// In-memory store of every job ever submitted. Jobs are never removed so
/// results stay retrievable after processing.
#[derive(Default)]
pub struct JobRegistry {
    jobs: Mutex<HashMap<JobId, Job>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_new(&self, user_id: &str, group_key: &str, media_path: PathBuf) -> JobId {
        self.insert_at(user_id, group_key, media_path, Utc::now())
    }

    /// Creates a job stamped with `at`. An id already taken gets the first
    /// free `_<n>` suffix rather than replacing the existing job.
    pub fn insert_at(
        &self,
        user_id: &str,
        group_key: &str,
        media_path: PathBuf,
        at: DateTime<Utc>,
    ) -> JobId {
        let base = JobId::generate(user_id, group_key, at);
        let mut jobs = self.jobs.lock();

        let mut id = base.clone();
        let mut counter = 1;
        while jobs.contains_key(&id) {
            id = base.with_suffix(counter);
            counter += 1;
        }

        let job = Job::new(
            id.clone(),
            user_id.to_string(),
            group_key.to_string(),
            media_path,
            at,
        );
        jobs.insert(id.clone(), job);
        id
    }

    pub fn get(&self, id: &JobId) -> Option<Job> {
        self.jobs.lock().get(id).cloned()
    }

    pub fn contains(&self, id: &JobId) -> bool {
        self.jobs.lock().contains_key(id)
    }

    /// Applies `mutation` under the registry lock. Returns `None` for an
    /// unknown id.
    pub fn update<R>(&self, id: &JobId, mutation: impl FnOnce(&mut Job) -> R) -> Option<R> {
        self.jobs.lock().get_mut(id).map(mutation)
    }

    pub fn len(&self) -> usize {
        self.jobs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.lock().is_empty()
    }

    pub fn count_where(&self, predicate: impl Fn(&Job) -> bool) -> usize {
        self.jobs.lock().values().filter(|job| predicate(job)).count()
    }

    /// Jobs of one user, newest first, optionally narrowed to a group key.
    pub fn list_for_user(&self, user_id: &str, group_key: Option<&str>) -> Vec<Job> {
        let mut jobs: Vec<Job> = self
            .jobs
            .lock()
            .values()
            .filter(|job| job.user_id == user_id)
            .filter(|job| group_key.is_none_or(|key| job.group_key == key))
            .cloned()
            .collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        jobs
    }
}
