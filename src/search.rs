//! Web search through DuckDuckGo's HTML endpoint.

use std::time::Duration;

use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, trace, warn};

use crate::messages::{search_failed, NO_SEARCH_RESULTS};

pub const DUCKDUCKGO_HTML_URL: &str = "https://html.duckduckgo.com/html/";
pub const PLACE_RESULTS: usize = 5;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    pub title: String,
    pub body: String,
    pub url: String,
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector {css}: {e}"))
}

fn element_text(element: ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extract organic results from a DuckDuckGo HTML results page. Ads are skipped.
pub fn parse_results(html: &str, max_results: usize) -> Result<Vec<SearchResult>> {
    let document = Html::parse_document(html);
    let result_sel = selector("div.result")?;
    let title_sel = selector("a.result__a")?;
    let snippet_sel = selector(".result__snippet")?;

    let mut results = Vec::new();
    for node in document.select(&result_sel) {
        if node.value().classes().any(|c| c == "result--ad") {
            continue;
        }
        let Some(link) = node.select(&title_sel).next() else {
            continue;
        };
        let title = element_text(link);
        if title.is_empty() {
            continue;
        }
        let body = node
            .select(&snippet_sel)
            .next()
            .map(element_text)
            .unwrap_or_default();
        let url = link.value().attr("href").unwrap_or_default().to_string();
        results.push(SearchResult { title, body, url });
        if results.len() >= max_results {
            break;
        }
    }
    Ok(results)
}

#[derive(Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    url: String,
}

impl SearchClient {
    pub fn new(url: Option<&str>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            http,
            url: url.unwrap_or(DUCKDUCKGO_HTML_URL).to_string(),
        })
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>> {
        debug!(url = %self.url, "sending search request");
        let resp = self
            .http
            .post(&self.url)
            .form(&[("q", query)])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            warn!(%status, "search request failed");
            return Err(anyhow!("search request failed with {status}"));
        }

        let raw = resp.text().await?;
        trace!(raw = %raw, "search response");
        let results = parse_results(&raw, max_results)?;
        debug!(count = results.len(), "parsed search results");
        Ok(results)
    }
}

pub fn format_results(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| format!("Title: {}\nDescription: {}", r.title, r.body))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Gather background text about a place for the evaluation prompt.
///
/// Always returns text: failures and empty searches are described in words
/// so the model can still answer.
pub async fn search_place_info(client: &SearchClient, place_name: &str) -> String {
    info!(place_name, "searching for place information");
    let query = format!("{place_name} location type tourist information");
    match client.search(&query, PLACE_RESULTS).await {
        Ok(results) if results.is_empty() => NO_SEARCH_RESULTS.to_string(),
        Ok(results) => {
            info!(place_name, count = results.len(), "found place information");
            format_results(&results)
        }
        Err(err) => {
            warn!(place_name, error = %err, "error searching for place information");
            search_failed(&err)
        }
    }
}
