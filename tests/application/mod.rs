mod job_registry_test;
mod phase_queue_test;
mod stats_recorder_test;
