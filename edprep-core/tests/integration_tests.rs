//! Integration tests for edprep-core infrastructure

use chrono::Utc;
use edprep_core::{
    init_logging, Connection, ConnectionStatus, EdprepError, LogFormat, LoggingConfig,
    MentorProfile, User, Role,
};

#[test]
fn test_error_handling() {
    let error = EdprepError::config("token_ttl_minutes must be positive");

    match &error {
        EdprepError::Config { message, context } => {
            assert_eq!(message, "token_ttl_minutes must be positive");
            assert_eq!(context.component, "config");
            assert!(!context.error_id.is_empty());
        }
        _ => panic!("Expected Config error"),
    }

    // Should not panic without a subscriber
    error.log();
}

#[test]
fn test_logging_initialization() {
    let config = LoggingConfig {
        level: "debug".to_string(),
        format: LogFormat::Json,
        include_location: true,
        span_timings: false,
        filter_directives: vec!["edprep_core=debug".to_string()],
    };

    // The first call may only fail if RUST_LOG is garbage; the second always
    // fails because the global subscriber is already set.
    let _ = init_logging(&config);
    assert!(init_logging(&config).is_err());
}

#[test]
fn test_invalid_directive_is_rejected() {
    std::env::remove_var("RUST_LOG");
    let config = LoggingConfig {
        filter_directives: vec!["edprep_core=loud".to_string()],
        ..LoggingConfig::default()
    };
    assert!(init_logging(&config).is_err());
}

#[test]
fn test_records_serialize_without_secrets() {
    let user = User {
        id: 3,
        email: "student1@edprep.ai".to_string(),
        full_name: "Alex Chen".to_string(),
        password_hash: "$argon2id$...".to_string(),
        role: Role::Student,
        target_band_score: Some(6.5),
        current_level: None,
        created_at: Utc::now(),
    };
    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["role"], "student");
    assert!(json.get("password_hash").is_none());

    let profile = MentorProfile {
        user_id: 2,
        bio: String::new(),
        specializations: vec!["Writing".to_string()],
        years_experience: 8,
        rating: 4.9,
        is_available: true,
    };
    assert!(profile.specializes_in(" writing "));

    let connection = Connection {
        id: 1,
        mentor_id: 2,
        mentee_id: 3,
        status: ConnectionStatus::Pending,
        connection_message: String::new(),
        goals: vec![],
        target_band_score: None,
        focus_areas: vec![],
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    assert_eq!(serde_json::to_value(&connection).unwrap()["status"], "pending");
    assert!(connection.is_party(3));
}
