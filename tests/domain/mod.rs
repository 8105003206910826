mod artifact_path_test;
mod job_id_test;
mod job_state_test;
mod job_test;
