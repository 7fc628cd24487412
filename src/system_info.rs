use git_version::git_version;

// include -modified if the working tree has uncommitted changes
const COMMIT: &str = git_version!(
    args = ["--abbrev=10", "--always", "--dirty=-modified"],
    fallback = "unknown"
);

fn describe_version(release: Option<&str>, latest: &str, ahead: &str) -> String {
    match release {
        Some(tag) if !tag.is_empty() => format!("release {tag}"),
        _ if !latest.is_empty() && !ahead.is_empty() => {
            format!("development branch {ahead} commits ahead of {latest}")
        }
        _ if !latest.is_empty() => format!("development branch ahead of {latest}"),
        _ => "development".to_string(),
    }
}

/// Build information shown by `GET /info` and the `spot` banner.
pub fn get_system_info() -> String {
    let profile = if cfg!(debug_assertions) {
        "Dev"
    } else {
        "Release"
    };

    let version = describe_version(
        option_env!("RELEASE_VERSION"),
        option_env!("LATEST_TAG").unwrap_or(""),
        option_env!("COMMITS_AHEAD").unwrap_or(""),
    );

    format!(
        "{} {} - {}\nCommit: {}\n{} build",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        version,
        COMMIT,
        profile
    )
}
