use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use crate::utils::error::Result;

/// Browser fingerprints rotated per request to dodge trivial UA filtering.
pub const DEFAULT_USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
];

/// Title fragments that identify an anti-automation challenge page.
const BLOCK_MARKERS: [&str; 2] = ["Robot Check", "Captcha"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    pub request_timeout_secs: u64,
    /// Pool the per-request User-Agent is drawn from. Tests inject a
    /// single-entry pool to stay deterministic.
    pub user_agents: Vec<String>,
    /// Bounded pre-request jitter in milliseconds, inclusive. `(0, 0)`
    /// disables the delay entirely.
    pub delay_range_ms: (u64, u64),
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 10,
            user_agents: DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect(),
            delay_range_ms: (500, 2500),
        }
    }
}

impl FetcherConfig {
    /// Zeroes the anti-fingerprint delay, leaving everything else intact.
    pub fn without_delay(mut self) -> Self {
        self.delay_range_ms = (0, 0);
        self
    }
}

/// Outcome of a single page retrieval. Produced and consumed within one
/// pipeline invocation.
#[derive(Debug, Clone)]
pub enum FetchResult {
    /// Raw markup of what looks like a real product page.
    Document(String),
    /// The page title matched a known challenge marker; carries the title.
    Blocked(String),
    /// Transport-level failure: timeout, DNS, refused connection.
    NetworkFailure(String),
}

pub struct Fetcher {
    client: reqwest::Client,
    config: FetcherConfig,
}

impl Fetcher {
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Retrieves `url` once, with stealth headers and an optional jitter
    /// delay beforehand. Never errors: every failure mode is classified
    /// into a [`FetchResult`] variant. Retry policy belongs to callers.
    pub async fn fetch(&self, url: &str) -> FetchResult {
        let delay = self.jitter();
        if !delay.is_zero() {
            tracing::debug!("delaying {}ms before request", delay.as_millis());
            tokio::time::sleep(delay).await;
        }

        let request = self
            .client
            .get(url)
            .header("User-Agent", self.pick_user_agent())
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
            )
            .header("Accept-Language", "en-US,en;q=0.9")
            .header("Referer", "https://www.google.com/")
            .header("Upgrade-Insecure-Requests", "1");

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return FetchResult::NetworkFailure(e.to_string()),
        };

        match response.text().await {
            Ok(body) => classify_markup(body),
            Err(e) => FetchResult::NetworkFailure(e.to_string()),
        }
    }

    fn pick_user_agent(&self) -> &str {
        self.config
            .user_agents
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
            .unwrap_or(DEFAULT_USER_AGENTS[0])
    }

    fn jitter(&self) -> Duration {
        let (min, max) = self.config.delay_range_ms;
        let millis = if max > min {
            rand::thread_rng().gen_range(min..=max)
        } else {
            min
        };
        Duration::from_millis(millis)
    }
}

/// Classifies fetched markup: a challenge page by title, or a document
/// worth handing to the extractor.
pub fn classify_markup(markup: String) -> FetchResult {
    if let Some(title) = page_title(&markup) {
        if BLOCK_MARKERS.iter().any(|marker| title.contains(marker)) {
            return FetchResult::Blocked(title);
        }
    }
    FetchResult::Document(markup)
}

fn page_title(markup: &str) -> Option<String> {
    let document = Html::parse_document(markup);
    let selector = Selector::parse("title").ok()?;
    let element = document.select(&selector).next()?;
    Some(element.text().collect::<String>().trim().to_string())
}
