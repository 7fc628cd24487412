use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, instrument, trace, warn};

use crate::ai::config::AiConfig;

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

/// Gemini's OpenAI-compatible chat completions endpoint.
pub const DEFAULT_CHAT_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions";

pub fn build_chat_body(model: &str, system: Option<&str>, user: &str, json_mode: bool) -> Value {
    let mut messages = Vec::new();
    if let Some(system) = system {
        messages.push(json!({ "role": "system", "content": system }));
    }
    messages.push(json!({ "role": "user", "content": user }));

    let mut body = json!({ "model": model, "messages": messages });
    if json_mode {
        body["response_format"] = json!({ "type": "json_object" });
    }
    body
}

/// Extract the first choice's text from a raw chat completions response.
pub fn parse_chat_content(raw: &str) -> Result<String> {
    let chat: ChatResponse = serde_json::from_str(raw)?;
    let content = chat
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("missing chat choice"))?
        .message
        .content
        .ok_or_else(|| anyhow!("chat choice has no content"))?;
    Ok(content.trim().to_string())
}

#[instrument(level = "trace", skip(api_key, body))]
pub async fn send_chat_request(
    api_key: &str,
    body: &Value,
    url: &str,
    timeout: Duration,
) -> Result<String> {
    debug!(url, timeout_secs = timeout.as_secs(), "sending chat completion request");

    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let resp = client
        .post(url)
        .bearer_auth(api_key)
        .json(body)
        .send()
        .await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let err_text = resp.text().await.unwrap_or_default();
        warn!(%status, "LLM API error");
        return Err(anyhow!("LLM API error {status}: {err_text}"));
    }

    let raw = resp.text().await?;
    let snippet: String = raw.chars().take(200).collect();
    debug!(snippet = %snippet, "chat response body");
    trace!(raw = %raw, "chat response");
    parse_chat_content(&raw)
}

/// Run a single-turn chat completion against the configured model.
#[instrument(level = "trace", skip(config, system, user))]
pub async fn chat_completion(
    config: &AiConfig,
    system: Option<&str>,
    user: &str,
    json_mode: bool,
) -> Result<String> {
    let url = config.chat_url.as_deref().unwrap_or(DEFAULT_CHAT_URL);
    let body = build_chat_body(&config.model, system, user, json_mode);
    send_chat_request(&config.api_key, &body, url, config.timeout).await
}
