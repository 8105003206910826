use chrono::DateTime;

use introeval::domain::JobId;

#[test]
fn given_submission_time_when_generating_then_id_encodes_user_group_and_micros() {
    let at = DateTime::from_timestamp(1_700_000_000, 42_000).unwrap();
    let id = JobId::generate("alice", "cs101", at);
    assert_eq!(id.as_str(), "alice_cs101_1700000000_000042");
}

#[test]
fn given_taken_id_when_adding_suffix_then_counter_is_appended() {
    let id = JobId::from_raw("alice_cs101_1700000000_000042");
    assert_eq!(id.with_suffix(2).as_str(), "alice_cs101_1700000000_000042_2");
}

#[test]
fn given_job_id_when_serialized_then_it_is_a_plain_string() {
    let id = JobId::from_raw("bob_g1_1_000000");
    assert_eq!(serde_json::to_string(&id).unwrap(), r#""bob_g1_1_000000""#);
    assert_eq!(id.to_string(), "bob_g1_1_000000");
}
