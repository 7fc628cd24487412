use tracing::{info, instrument, warn};

use crate::ai::common::chat_completion;
use crate::ai::config::AiConfig;
use crate::ai::prompts::spot_evaluation_prompt;
use crate::messages::EVALUATION_FAILED;

/// Ask the model whether `place_name` makes a good photo spot and for theme ideas.
///
/// `place_info` is the text gathered from web search. Model failures turn
/// into an apology string rather than an error.
#[instrument(level = "debug", skip(config, place_info))]
pub async fn evaluate_spot(config: &AiConfig, place_name: &str, place_info: &str) -> String {
    let prompt = spot_evaluation_prompt(place_name, place_info);
    match chat_completion(config, None, &prompt, false).await {
        Ok(text) => {
            info!(place_name, "generated recommendations");
            text
        }
        Err(err) => {
            warn!(place_name, error = %err, "error generating recommendations");
            EVALUATION_FAILED.to_string()
        }
    }
}
