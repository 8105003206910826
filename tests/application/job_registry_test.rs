use std::path::PathBuf;

use chrono::{DateTime, TimeDelta};

use introeval::application::services::JobRegistry;
use introeval::domain::JobState;

fn media() -> PathBuf {
    PathBuf::from("/media/intro.wav")
}

#[test]
fn given_same_microsecond_when_inserting_twice_then_second_id_gets_a_suffix() {
    let registry = JobRegistry::new();
    let at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();

    let first = registry.insert_at("alice", "cs101", media(), at);
    let second = registry.insert_at("alice", "cs101", media(), at);
    let third = registry.insert_at("alice", "cs101", media(), at);

    assert_eq!(second.as_str(), format!("{}_1", first));
    assert_eq!(third.as_str(), format!("{}_2", first));
    assert_eq!(registry.len(), 3);
}

#[test]
fn given_new_job_when_fetching_then_it_is_pending() {
    let registry = JobRegistry::new();
    let id = registry.insert_new("alice", "cs101", media());

    let job = registry.get(&id).unwrap();
    assert_eq!(job.state(), JobState::Pending);
    assert_eq!(job.user_id, "alice");
    assert!(registry.contains(&id));
}

#[test]
fn given_unknown_id_when_updating_then_none_is_returned() {
    let registry = JobRegistry::new();
    let id = introeval::domain::JobId::from_raw("nobody_x_0_000000");
    assert!(registry.update(&id, |job| job.start_transcription()).is_none());
}

#[test]
fn given_jobs_of_several_users_when_listing_then_only_own_jobs_newest_first() {
    let registry = JobRegistry::new();
    let t0 = DateTime::from_timestamp(1_700_000_000, 0).unwrap();

    let old = registry.insert_at("alice", "cs101", media(), t0);
    let new = registry.insert_at("alice", "cs102", media(), t0 + TimeDelta::seconds(5));
    registry.insert_at("bob", "cs101", media(), t0 + TimeDelta::seconds(9));

    let ids: Vec<_> = registry
        .list_for_user("alice", None)
        .into_iter()
        .map(|job| job.id)
        .collect();
    assert_eq!(ids, vec![new, old.clone()]);

    let filtered = registry.list_for_user("alice", Some("cs101"));
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, old);
}
