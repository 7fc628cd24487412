//! Prompt text sent to the model.
//!
//! Keeping the wording here makes it easy to tune how places are judged
//! without touching the request plumbing.

use crate::places::PlaceInfo;

/// System prompt for the location reminder.
pub const REMINDER_SYSTEM_PROMPT: &str = "You decide whether the user's current location is worth a photo and, if so, write a short reminder. Respond with a JSON object like {\"worth_it\": true, \"message\": \"🌳 Don't miss the beautiful scenery at this park!\"}. Set worth_it to false and explain briefly in message when the place is not worth a photo.";

pub fn reminder_prompt(place: &PlaceInfo, preferences: &[String]) -> String {
    format!(
        "Create a friendly photo reminder for this location:\n\
         \n\
         Name: {name}\n\
         Type: {kind}\n\
         Address: {address}\n\
         Rating: {rating}\n\
         Is Popular: {popular}\n\
         User Preferences: {prefs}\n\
         \n\
         Requirements:\n\
         - Include 1-2 relevant emojis that match the place type\n\
         - Max 15 words\n\
         - Friendly and encouraging tone\n\
         - Consider place type and user preferences\n\
         - If it's a highly-rated place, emphasize its quality\n\
         \n\
         Examples:\n\
         - \"🌳 Don't miss the beautiful scenery at this park!\"\n\
         - \"🏛️ Capture this impressive museum architecture!\"\n\
         - \"☕ This coffee shop has perfect lighting for your food photos!\"",
        name = place.name,
        kind = place.kind,
        address = place.address,
        rating = place.rating,
        popular = place.is_popular,
        prefs = preferences.join(", "),
    )
}

pub fn spot_evaluation_prompt(place_name: &str, place_info: &str) -> String {
    format!(
        "I need to evaluate if \"{place_name}\" is photo-worthy for Snapchat, focusing ONLY on entertainment, self-enjoyment, or creating memories.\n\
         \n\
         Here's information I found about this place:\n\
         {place_info}\n\
         \n\
         Based on this information, follow these steps:\n\
         1. Identify what type of place this is (beach, museum, restaurant, landmark, etc.).\n\
         2. Determine if this place is likely a good spot for photos that are fun, entertaining, or memory-worthy.\n\
         3. If it IS photo-worthy, suggest:\n\
            - 3 specific Snapchat themes or filters that would work well there based on the type of place\n\
            - What specific elements to focus on in photos\n\
            - Best type of shots (selfies, panoramas, close-ups, etc.)\n\
            - Creative caption ideas for sharing\n\
         4. If it is NOT photo-worthy for entertainment/enjoyment/memories, explain briefly why in a single sentence.\n\
         \n\
         Important guidelines:\n\
         - Focus ONLY on entertainment value, fun factor, and memory creation\n\
         - Keep your response concise and enthusiastic (use emojis!)\n\
         - Be specific to this exact location and its characteristics, not generic\n\
         - Prioritize uniqueness and \"shareability\" on social media"
    )
}
