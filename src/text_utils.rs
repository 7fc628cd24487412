use tracing::trace;

const NOT_WORTH_MARKERS: [&str; 2] = ["not worth", "wouldn't recommend"];

/// Split the comma separated preference field into trimmed, non-empty entries.
pub fn parse_preferences(raw: &str) -> Vec<String> {
    let prefs: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();
    trace!(?prefs, "parsed preferences");
    prefs
}

/// Whether free-form model text declines to recommend a photo.
pub fn sounds_not_worth_it(text: &str) -> bool {
    let lower = text.to_lowercase();
    NOT_WORTH_MARKERS.iter().any(|m| lower.contains(m))
}

/// Whether the CLI input asks to leave the loop.
pub fn is_exit_command(input: &str) -> bool {
    matches!(
        input.trim().to_lowercase().as_str(),
        "exit" | "quit" | "q"
    )
}
