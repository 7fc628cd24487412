use anyhow::Result;
use tokio::net::TcpListener;

pub mod agent;
pub mod ai;
pub mod api;
pub mod cli;
pub mod config;
pub mod html;
pub mod messages;
pub mod places;
pub mod search;
pub mod store;
pub mod system_info;
mod text_utils;

pub use agent::{LocationOutcome, PhotoReminderAgent};
pub use api::{router as api_router, ApiConfig, AppState};
pub use config::Config;
pub use store::{Reminder, ReminderStore};
pub use text_utils::{is_exit_command, parse_preferences, sounds_not_worth_it};

pub mod tests {
    pub mod util;
}

pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Build the shared state, disabling location processing when credentials are missing.
pub fn build_state(config: &Config) -> AppState {
    let (agent, initialization_error) = match PhotoReminderAgent::from_config(config) {
        Ok(agent) => {
            tracing::info!("PhotoReminderAgent initialized successfully");
            (Some(agent), None)
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to initialize PhotoReminderAgent");
            tracing::error!("Please set these environment variables or add them to a .env file");
            (None, Some(err.to_string()))
        }
    };

    AppState {
        store: ReminderStore::new(),
        agent,
        initialization_error,
    }
}

// ──────────────────────────────────────────────────────────────
// Server setup
// ──────────────────────────────────────────────────────────────

pub async fn run() -> Result<()> {
    let config = Config::from_env();
    init_tracing();

    tracing::info!("Starting photo reminder server...");

    let state = build_state(&config);
    let app = api_router(
        state,
        ApiConfig {
            rate_limit_per_second: config.rate_limit_per_second,
        },
    );

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(bind_addr = %config.bind_addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
        })
        .await?;

    Ok(())
}

// ──────────────────────────────────────────────────────────────
// Spot evaluator
// ──────────────────────────────────────────────────────────────

pub async fn run_spot() -> Result<()> {
    let config = Config::from_env();
    init_tracing();

    let evaluator = match cli::SpotEvaluator::from_config(&config) {
        Ok(evaluator) => evaluator,
        Err(err) => {
            tracing::error!(error = %err, "Failed to initialize spot evaluator");
            eprintln!("\n❌ An error occurred: {err}");
            eprintln!("{}", messages::SPOT_MISSING_KEY);
            return Err(err);
        }
    };

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    cli::run_repl(&evaluator, stdin, &mut stdout).await
}
