use std::time::Duration;

use photobot::ai::config::{AiConfig, DEFAULT_MODEL, DEFAULT_TIMEOUT};
use photobot::config::{PlacesConfig, DEFAULT_BIND_ADDR, DEFAULT_PLACES_RADIUS};
use photobot::{build_state, Config};
use serial_test::serial;

const VARS: [&str; 10] = [
    "GOOGLE_API_KEY",
    "PLACES_API_KEY",
    "LLM_MODEL",
    "LLM_CHAT_URL",
    "LLM_TIMEOUT_SECS",
    "PLACES_URL",
    "PLACES_RADIUS",
    "SEARCH_URL",
    "BIND_ADDR",
    "RATE_LIMIT_PER_SECOND",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn ai_config_missing_key() {
    clear_env();
    assert!(AiConfig::from_env().is_none());
    std::env::set_var("GOOGLE_API_KEY", "  ");
    assert!(AiConfig::from_env().is_none());
}

#[test]
#[serial]
fn ai_config_defaults_and_overrides() {
    clear_env();
    std::env::set_var("GOOGLE_API_KEY", "g");
    let cfg = AiConfig::from_env().unwrap();
    assert_eq!(cfg.api_key, "g");
    assert_eq!(cfg.model, DEFAULT_MODEL);
    assert!(cfg.chat_url.is_none());
    assert_eq!(cfg.timeout, DEFAULT_TIMEOUT);

    std::env::set_var("LLM_MODEL", "other-model");
    std::env::set_var("LLM_CHAT_URL", "http://localhost/chat");
    std::env::set_var("LLM_TIMEOUT_SECS", "7");
    let cfg = AiConfig::from_env().unwrap();
    assert_eq!(cfg.model, "other-model");
    assert_eq!(cfg.chat_url.as_deref(), Some("http://localhost/chat"));
    assert_eq!(cfg.timeout, Duration::from_secs(7));

    std::env::set_var("LLM_TIMEOUT_SECS", "0");
    assert_eq!(AiConfig::from_env().unwrap().timeout, DEFAULT_TIMEOUT);
}

#[test]
#[serial]
fn places_config_radius() {
    clear_env();
    std::env::set_var("PLACES_API_KEY", "p");
    assert_eq!(PlacesConfig::from_env().unwrap().radius, DEFAULT_PLACES_RADIUS);
    std::env::set_var("PLACES_RADIUS", "120");
    assert_eq!(PlacesConfig::from_env().unwrap().radius, 120);
    std::env::set_var("PLACES_RADIUS", "far");
    assert_eq!(PlacesConfig::from_env().unwrap().radius, DEFAULT_PLACES_RADIUS);
}

#[test]
#[serial]
fn config_without_keys_disables_agent() {
    clear_env();
    let cfg = Config::from_env();
    assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR);
    assert_eq!(cfg.rate_limit_per_second, None);
    assert_eq!(cfg.missing_keys(), vec!["GOOGLE_API_KEY", "PLACES_API_KEY"]);

    let state = build_state(&cfg);
    assert!(state.agent.is_none());
    assert_eq!(
        state.initialization_error.as_deref(),
        Some("Missing required API keys: GOOGLE_API_KEY, PLACES_API_KEY")
    );
}

#[test]
#[serial]
fn config_with_keys_enables_agent() {
    clear_env();
    std::env::set_var("GOOGLE_API_KEY", "g");
    std::env::set_var("PLACES_API_KEY", "p");
    std::env::set_var("BIND_ADDR", "127.0.0.1:9000");
    std::env::set_var("RATE_LIMIT_PER_SECOND", "3");
    let cfg = Config::from_env();
    assert_eq!(cfg.bind_addr, "127.0.0.1:9000");
    assert_eq!(cfg.rate_limit_per_second, Some(3));
    assert!(cfg.missing_keys().is_empty());

    let state = build_state(&cfg);
    assert!(state.agent.is_some());
    assert!(state.initialization_error.is_none());
    clear_env();
}
