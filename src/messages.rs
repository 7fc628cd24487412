//! User-facing strings.
//!
//! Keep them here so the server, the CLI and the tests agree on wording.

pub const GENERIC_FALLBACK_REMINDER: &str = "📸 Don't forget to capture this moment!";

pub fn place_fallback_reminder(place_name: &str) -> String {
    format!("📸 Don't miss taking a photo at {place_name}!")
}

pub const NOT_WORTH_FALLBACK: &str = "This spot isn't worth a photo right now.";

pub const AGENT_NOT_INITIALIZED: &str = "Photo agent not initialized. Check API keys.";
pub const REMINDER_NOT_FOUND: &str = "Reminder not found";
pub const UNKNOWN_ERROR: &str = "Unknown error";
pub const TEST_REMINDER_MESSAGE: &str = "📸 Test reminder! This is how notifications will look.";

pub fn missing_keys_error(keys: &[&str]) -> String {
    format!("Missing required API keys: {}", keys.join(", "))
}

pub const NO_SEARCH_RESULTS: &str = "No information found about this place.";

pub fn search_failed(err: &anyhow::Error) -> String {
    format!("Failed to search for information about this place: {err}")
}

pub const EVALUATION_FAILED: &str =
    "Sorry, I couldn't evaluate this place right now due to an error. Please try again later.";

pub const SPOT_RULE: &str =
    "============================================================";
pub const SPOT_BANNER_TITLE: &str = "\n🌟 SNAPCHAT PHOTO SPOT EVALUATOR 🌟";
pub const SPOT_BANNER_LINES: [&str; 2] = [
    "Tell me a place, and I'll tell you if it's Snapchat-worthy!",
    "I'll search for information about the place and suggest themes, filters, and creative ideas for your snaps.",
];
pub const SPOT_PROMPT: &str = "\n📍 Enter a place name (or 'exit' to quit): ";
pub const SPOT_EMPTY_INPUT: &str = "Please enter a valid place name.";
pub const SPOT_FAREWELL: &str =
    "\nThanks for using the Snapchat Photo Spot Evaluator! Happy snapping! 📸✨";
pub const SPOT_RESULT_HEADER: &str = "\n📱 SNAPCHAT SPOT EVALUATION 📱";
pub const SPOT_MISSING_KEY: &str =
    "Make sure you have set the GOOGLE_API_KEY environment variable in your .env file.";
