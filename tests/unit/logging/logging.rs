//! Unit tests for log format selection

use crowdscan::logging::{init_logging, LogFormat};

#[test]
fn test_production_logs_as_json() {
    assert_eq!(LogFormat::for_environment("production"), LogFormat::Json);
    assert_eq!(LogFormat::for_environment("prod"), LogFormat::Json);
}

#[test]
fn test_other_environments_log_pretty() {
    assert_eq!(LogFormat::for_environment("development"), LogFormat::Pretty);
    assert_eq!(LogFormat::for_environment("staging"), LogFormat::Pretty);
    assert_eq!(LogFormat::for_environment(""), LogFormat::Pretty);
}

#[test]
fn test_init_logging_twice_is_harmless() {
    init_logging();
    init_logging();
}
