use std::time::Duration;

use introeval::presentation::config::CollaboratorProvider;
use introeval::presentation::{Environment, Settings};

#[test]
fn given_environment_names_when_parsing_then_aliases_are_accepted() {
    assert_eq!(
        Environment::try_from("PROD".to_string()).unwrap(),
        Environment::Prod
    );
    assert_eq!(
        Environment::try_from("production".to_string()).unwrap(),
        Environment::Prod
    );
    assert_eq!(
        Environment::try_from(" test ".to_string()).unwrap(),
        Environment::Test
    );
    assert!(Environment::try_from("staging".to_string()).is_err());
}

#[test]
fn given_no_settings_file_when_loading_then_defaults_run_in_mock_mode() {
    let settings = Settings::load(Environment::Test).unwrap();

    assert_eq!(settings.collaborators.provider, CollaboratorProvider::Mock);
    assert_eq!(settings.server.port, 3000);
    assert!(settings.scheduler.autostart);
    assert_eq!(settings.scheduler.dequeue_timeout, Duration::from_secs(5));
    assert_eq!(settings.scheduler.media_poll, Duration::from_millis(500));
    assert_eq!(settings.scheduler.stats_window, 20);
    assert_eq!(settings.transcription.model, "whisper-1");
}
