use std::env;

use crate::ai::config::AiConfig;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_PLACES_RADIUS: u32 = 50;

#[derive(Clone, Debug)]
pub struct PlacesConfig {
    pub api_key: String,
    pub url: Option<String>,
    pub radius: u32,
}

impl PlacesConfig {
    pub fn from_env() -> Option<Self> {
        let api_key = match env::var("PLACES_API_KEY") {
            Ok(k) if !k.trim().is_empty() => k,
            _ => return None,
        };
        let radius = env::var("PLACES_RADIUS")
            .ok()
            .and_then(|r| r.parse().ok())
            .unwrap_or(DEFAULT_PLACES_RADIUS);
        Some(Self {
            api_key,
            url: env::var("PLACES_URL").ok(),
            radius,
        })
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: String,
    pub search_url: Option<String>,
    pub rate_limit_per_second: Option<u64>,
    pub ai: Option<AiConfig>,
    pub places: Option<PlacesConfig>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            search_url: env::var("SEARCH_URL").ok(),
            rate_limit_per_second: env::var("RATE_LIMIT_PER_SECOND")
                .ok()
                .and_then(|r| r.parse().ok())
                .filter(|r| *r > 0),
            ai: AiConfig::from_env(),
            places: PlacesConfig::from_env(),
        }
    }

    /// Names of the credentials the server needs but could not find.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.ai.is_none() {
            missing.push("GOOGLE_API_KEY");
        }
        if self.places.is_none() {
            missing.push("PLACES_API_KEY");
        }
        missing
    }
}
