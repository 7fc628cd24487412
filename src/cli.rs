//! Interactive "is this place worth a snap?" loop behind the `spot` binary.

use std::io::Write;

use anyhow::{anyhow, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::info;

use crate::ai::config::AiConfig;
use crate::ai::spot::evaluate_spot;
use crate::config::Config;
use crate::messages::{
    SPOT_BANNER_LINES, SPOT_BANNER_TITLE, SPOT_EMPTY_INPUT, SPOT_FAREWELL, SPOT_PROMPT,
    SPOT_RESULT_HEADER, SPOT_RULE,
};
use crate::search::{search_place_info, SearchClient};
use crate::text_utils::is_exit_command;

/// Searches the web for a place and asks the model to rate it as a photo spot.
#[derive(Clone)]
pub struct SpotEvaluator {
    ai: AiConfig,
    search: SearchClient,
}

impl SpotEvaluator {
    pub fn new(ai: AiConfig, search: SearchClient) -> Self {
        Self { ai, search }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let ai = config
            .ai
            .clone()
            .ok_or_else(|| anyhow!("GOOGLE_API_KEY environment variable is not set"))?;
        let search = SearchClient::new(config.search_url.as_deref())?;
        Ok(Self::new(ai, search))
    }

    pub async fn evaluate(&self, place_name: &str) -> String {
        info!(place_name, "evaluating photo worthiness");
        let place_info = search_place_info(&self.search, place_name).await;
        evaluate_spot(&self.ai, place_name, &place_info).await
    }
}

pub fn print_banner<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "{SPOT_BANNER_TITLE}")?;
    writeln!(out, "{SPOT_RULE}")?;
    for line in SPOT_BANNER_LINES {
        writeln!(out, "{line}")?;
    }
    writeln!(out, "{SPOT_RULE}")?;
    Ok(())
}

/// Read place names from `input` until an exit command or end of input.
pub async fn run_repl<R, W>(evaluator: &SpotEvaluator, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    print_banner(out)?;
    let mut lines = input.lines();
    loop {
        write!(out, "{SPOT_PROMPT}")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };
        let place_name = line.trim();

        if is_exit_command(place_name) {
            writeln!(out, "{SPOT_FAREWELL}")?;
            break;
        }
        if place_name.is_empty() {
            writeln!(out, "{SPOT_EMPTY_INPUT}")?;
            continue;
        }

        writeln!(out, "\n🔍 Searching for information about {place_name}...")?;
        writeln!(out, "🔍 Evaluating {place_name} as a Snapchat photo spot...")?;
        out.flush()?;

        let result = evaluator.evaluate(place_name).await;

        writeln!(out, "{SPOT_RESULT_HEADER}")?;
        writeln!(out, "{SPOT_RULE}")?;
        writeln!(out, "{result}")?;
        writeln!(out, "{SPOT_RULE}")?;
    }
    Ok(())
}
