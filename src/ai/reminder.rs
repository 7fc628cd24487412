use anyhow::Result;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::ai::common::chat_completion;
use crate::ai::config::AiConfig;
use crate::ai::prompts::{reminder_prompt, REMINDER_SYSTEM_PROMPT};
use crate::messages::{place_fallback_reminder, GENERIC_FALLBACK_REMINDER, NOT_WORTH_FALLBACK};
use crate::places::PlaceInfo;
use crate::text_utils::sounds_not_worth_it;

/// The model's verdict for one location.
#[derive(Clone, Debug, PartialEq)]
pub struct ReminderDraft {
    pub worth_it: bool,
    pub message: String,
}

#[derive(Deserialize)]
struct DraftJson {
    worth_it: Option<bool>,
    message: Option<String>,
}

/// Interpret the model's reply, accepting either the requested JSON object
/// or plain text.
///
/// A JSON reply is never shown verbatim: without a usable message the
/// verdict picks one of the fixed texts.
pub fn parse_draft(content: &str) -> ReminderDraft {
    if let Ok(json) = serde_json::from_str::<DraftJson>(content) {
        let message = json
            .message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());
        return match (json.worth_it, message) {
            (worth_it, Some(message)) => ReminderDraft {
                worth_it: worth_it.unwrap_or_else(|| !sounds_not_worth_it(&message)),
                message,
            },
            (Some(false), None) => ReminderDraft {
                worth_it: false,
                message: NOT_WORTH_FALLBACK.to_string(),
            },
            (_, None) => ReminderDraft {
                worth_it: true,
                message: GENERIC_FALLBACK_REMINDER.to_string(),
            },
        };
    }

    ReminderDraft {
        worth_it: !sounds_not_worth_it(content),
        message: content.to_string(),
    }
}

/// Ask the model whether the place deserves a photo and how to say so.
///
/// Never fails: a missing place yields the generic reminder and a model
/// error yields a reminder naming the place.
#[instrument(level = "debug", skip(config, place))]
pub async fn generate_reminder(
    config: &AiConfig,
    place: Result<PlaceInfo>,
    preferences: &[String],
) -> ReminderDraft {
    let place = match place {
        Ok(place) => place,
        Err(err) => {
            warn!(error = %err, "using fallback reminder due to place info error");
            return ReminderDraft {
                worth_it: true,
                message: GENERIC_FALLBACK_REMINDER.to_string(),
            };
        }
    };

    info!(name = %place.name, "generating photo reminder");
    let prompt = reminder_prompt(&place, preferences);
    match chat_completion(config, Some(REMINDER_SYSTEM_PROMPT), &prompt, true).await {
        Ok(content) => {
            let draft = parse_draft(&content);
            info!(worth_it = draft.worth_it, message = %draft.message, "generated reminder");
            draft
        }
        Err(err) => {
            warn!(error = %err, "failed to generate reminder");
            ReminderDraft {
                worth_it: true,
                message: place_fallback_reminder(&place.name),
            }
        }
    }
}
