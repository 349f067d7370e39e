// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use guardia_domain::LeaveType;
use guardia_persistence::Persistence;

use crate::{ApiError, ConfigError, EngineConfig, EngineContext, list_brigades};

#[test]
fn test_default_config_names_every_leave_type() {
    let config: EngineConfig = EngineConfig::default();

    assert_eq!(config.leave_brigades.len(), 8);
    assert!(config.auto_provision);
    assert!(config.unavailable_brigades.is_empty());
    assert_eq!(config.brigade_name(LeaveType::Vacation), "Vacaciones");
    assert_eq!(
        config.brigade_name(LeaveType::PersonalAffairs),
        "Asuntos Propios"
    );
}

#[test]
fn test_partial_config_falls_back_per_leave_type() {
    let config: EngineConfig = EngineConfig::from_json_str(
        r#"{"leave_brigades": {"Vacation": "Vacaciones 2024"}, "unavailable_brigades": ["Retén"]}"#,
    )
    .unwrap();

    assert_eq!(config.brigade_name(LeaveType::Vacation), "Vacaciones 2024");
    assert_eq!(config.brigade_name(LeaveType::Module), "Modulo");
    assert_eq!(config.unavailable_brigades, vec![String::from("Retén")]);
    assert!(config.auto_provision);
}

#[test]
fn test_invalid_documents_are_rejected() {
    assert!(matches!(
        EngineConfig::from_json_str("{ not json"),
        Err(ConfigError::Parse(_))
    ));
    assert_eq!(
        EngineConfig::from_json_str(r#"{"leave_brigades": {"Vacation": "  "}}"#),
        Err(ConfigError::EmptyBrigadeName(String::from("Vacation")))
    );
    assert!(matches!(
        EngineConfig::from_json_str(r#"{"leave_brigades": {"Holiday": "X"}}"#),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_missing_file_reports_its_path() {
    let result = EngineConfig::from_path("/nonexistent/guardia.json");

    assert!(matches!(
        result,
        Err(ConfigError::Read { ref path, .. }) if path == "/nonexistent/guardia.json"
    ));
}

#[test]
fn test_provisioning_creates_special_brigades() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let config: EngineConfig = EngineConfig {
        unavailable_brigades: vec![String::from("Retén")],
        ..EngineConfig::default()
    };

    let context: EngineContext = config.resolve(&mut persistence).unwrap();

    let brigades = list_brigades(&mut persistence).unwrap().brigades;
    assert_eq!(brigades.len(), 8);
    assert!(brigades.iter().all(|brigade| brigade.is_special));
    assert_eq!(context.excluded_brigades.len(), 9);
    assert!(context.excluded_brigades.contains("Vacaciones"));
    assert!(context.excluded_brigades.contains("Retén"));
    assert_eq!(context.leave_brigades.iter().count(), 8);
}

#[test]
fn test_resolving_twice_is_idempotent() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let config: EngineConfig = EngineConfig::default();

    let first: EngineContext = config.resolve(&mut persistence).unwrap();
    let second: EngineContext = config.resolve(&mut persistence).unwrap();

    assert_eq!(first, second);
    assert_eq!(list_brigades(&mut persistence).unwrap().brigades.len(), 8);
}

#[test]
fn test_without_provisioning_missing_brigade_is_a_configuration_error() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let config: EngineConfig = EngineConfig {
        auto_provision: false,
        ..EngineConfig::default()
    };

    let result = config.resolve(&mut persistence);

    assert!(matches!(result, Err(ApiError::Configuration { .. })));
    assert!(list_brigades(&mut persistence).unwrap().brigades.is_empty());
}

#[test]
fn test_config_error_converts_to_api_error() {
    let api: ApiError = ConfigError::Parse(String::from("bad")).into();

    assert_eq!(
        api,
        ApiError::Configuration {
            message: String::from("Invalid configuration: bad"),
        }
    );
}
