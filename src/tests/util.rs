use crate::ai::config::AiConfig;
use crate::config::PlacesConfig;
use crate::places::PlacesClient;
use crate::{AppState, PhotoReminderAgent, ReminderStore};

pub const CHAT_PATH: &str = "/v1beta/openai/chat/completions";
pub const PLACES_PATH: &str = "/maps/api/place/nearbysearch/json";
pub const SEARCH_PATH: &str = "/html/";

pub fn test_ai_config(base_url: &str) -> AiConfig {
    AiConfig {
        api_key: "test-key".to_string(),
        model: "test-model".to_string(),
        chat_url: Some(format!("{base_url}{CHAT_PATH}")),
        timeout: crate::ai::config::DEFAULT_TIMEOUT,
    }
}

pub fn test_places_config(base_url: &str) -> PlacesConfig {
    PlacesConfig {
        api_key: "places-key".to_string(),
        url: Some(format!("{base_url}{PLACES_PATH}")),
        radius: 50,
    }
}

/// App state whose agent talks to a mock server at `base_url`.
pub fn test_state(base_url: &str) -> AppState {
    let places = PlacesClient::new(test_places_config(base_url))
        .expect("failed to build places client");
    AppState {
        store: ReminderStore::new(),
        agent: Some(PhotoReminderAgent::new(test_ai_config(base_url), places)),
        initialization_error: None,
    }
}

/// Wrap `content` the way a chat completions endpoint would.
pub fn chat_body(content: &str) -> String {
    serde_json::json!({ "choices": [ { "message": { "content": content } } ] }).to_string()
}
