use std::env;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug)]
pub struct AiConfig {
    pub api_key: String,
    pub model: String,
    pub chat_url: Option<String>,
    /// Upper bound for a whole chat completion request.
    pub timeout: Duration,
}

impl AiConfig {
    pub fn from_env() -> Option<Self> {
        let api_key = match env::var("GOOGLE_API_KEY") {
            Ok(k) if !k.trim().is_empty() => k,
            _ => return None,
        };
        let timeout = env::var("LLM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|s| *s > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        Some(Self {
            api_key,
            model: env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            chat_url: env::var("LLM_CHAT_URL").ok(),
            timeout,
        })
    }
}
