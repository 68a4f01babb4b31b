use std::path::PathBuf;

use scraper::Html;

use crate::extract::{self, ExtractionCandidate};
use crate::fetch::{FetchResult, Fetcher};
use crate::models::{CheckStatus, PriceReading, Product};
use crate::normalize;

/// Composes fetch → extract → normalize into one per-product check.
///
/// Every stage outcome maps onto a terminal [`CheckStatus`]; a check never
/// retries and never errors out. Beyond the network call (and the debug
/// dump on a selector miss) the pipeline has no side effects — history and
/// notification belong to the caller.
pub struct PriceChecker {
    fetcher: Fetcher,
    candidates: Vec<ExtractionCandidate>,
    debug_dump_path: Option<PathBuf>,
}

impl PriceChecker {
    pub fn new(fetcher: Fetcher, candidates: Vec<ExtractionCandidate>) -> Self {
        Self {
            fetcher,
            candidates,
            debug_dump_path: None,
        }
    }

    /// Persist raw markup to `path` whenever no selector matches, to aid
    /// manual diagnosis of layout changes. Overwritten on each failure.
    pub fn with_debug_dump(mut self, path: impl Into<PathBuf>) -> Self {
        self.debug_dump_path = Some(path.into());
        self
    }

    pub async fn check(&self, product: &Product) -> PriceReading {
        match self.fetcher.fetch(&product.url).await {
            FetchResult::Blocked(title) => {
                tracing::warn!("{}: request blocked ({})", product.name, title);
                PriceReading::failure(&product.name, CheckStatus::Blocked)
            }
            FetchResult::NetworkFailure(cause) => {
                tracing::warn!("{}: network failure: {}", product.name, cause);
                PriceReading::failure(&product.name, CheckStatus::NetworkFailure)
            }
            FetchResult::Document(markup) => self.parse_stage(product, &markup),
        }
    }

    fn parse_stage(&self, product: &Product, markup: &str) -> PriceReading {
        let raw_text = {
            let document = Html::parse_document(markup);
            extract::extract(&document, &self.candidates)
        };

        let Some(raw_text) = raw_text else {
            tracing::warn!("{}: no selector matched, page layout may have changed", product.name);
            self.dump_markup(markup);
            return PriceReading::failure(&product.name, CheckStatus::SelectorMiss);
        };

        match normalize::normalize(&raw_text) {
            Ok(price) => PriceReading::success(&product.name, price),
            Err(e) => {
                tracing::warn!("{}: {}", product.name, e);
                PriceReading::failure(&product.name, CheckStatus::ParseFailure)
            }
        }
    }

    fn dump_markup(&self, markup: &str) {
        let Some(path) = &self.debug_dump_path else {
            return;
        };
        match std::fs::write(path, markup) {
            Ok(()) => tracing::info!("raw page saved to {}", path.display()),
            Err(e) => tracing::warn!("failed to write debug page to {}: {}", path.display(), e),
        }
    }
}
