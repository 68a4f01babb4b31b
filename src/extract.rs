use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use crate::utils::error::{AppError, Result};

/// One locator in the fallback chain, tried in priority order.
///
/// Modeled as data rather than cascading conditionals so that the chain
/// can be reordered, extended, or loaded from configuration without
/// touching control flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "by", rename_all = "snake_case")]
pub enum ExtractionCandidate {
    /// Match a tag carrying a CSS class, e.g. `span.a-price-whole`.
    Class { tag: String, class: String },
    /// Match any element by id, e.g. `#priceblock_ourprice`.
    Id { id: String },
}

impl ExtractionCandidate {
    pub fn by_class(tag: impl Into<String>, class: impl Into<String>) -> Self {
        Self::Class {
            tag: tag.into(),
            class: class.into(),
        }
    }

    pub fn by_id(id: impl Into<String>) -> Self {
        Self::Id { id: id.into() }
    }

    fn to_selector(&self) -> Result<Selector> {
        let css = match self {
            Self::Class { tag, class } => format!("{}.{}", tag, class),
            Self::Id { id } => format!("#{}", id),
        };
        let parsed = Selector::parse(&css).ok();
        parsed.ok_or(AppError::Selector(css))
    }
}

/// The chain observed on Amazon product pages: visible price first, the
/// offscreen copy second, then the legacy priceblock ids.
pub fn default_candidates() -> Vec<ExtractionCandidate> {
    vec![
        ExtractionCandidate::by_class("span", "a-price-whole"),
        ExtractionCandidate::by_class("span", "a-offscreen"),
        ExtractionCandidate::by_id("priceblock_ourprice"),
        ExtractionCandidate::by_id("priceblock_dealprice"),
    ]
}

/// Walks the ordered candidate list and returns the text of the first
/// element match anywhere in the document.
///
/// Iteration stops at the first hit even if the matched text later fails
/// to parse; parse failure is not grounds for falling back further down
/// the chain. `None` means no candidate matched at all.
pub fn extract(document: &Html, candidates: &[ExtractionCandidate]) -> Option<String> {
    for candidate in candidates {
        let selector = match candidate.to_selector() {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("skipping unparsable candidate: {}", e);
                continue;
            }
        };

        if let Some(element) = document.select(&selector).next() {
            let text = element.text().collect::<Vec<_>>().join(" ").trim().to_string();
            return Some(text);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(markup: &str) -> Html {
        Html::parse_document(markup)
    }

    #[test]
    fn test_first_candidate_wins() {
        let doc = parse(
            r#"<html><body>
                <span class="a-offscreen">₹1,399.00</span>
                <span class="a-price-whole">1,299</span>
            </body></html>"#,
        );

        // a-price-whole is first in the chain regardless of document order.
        let text = extract(&doc, &default_candidates()).unwrap();
        assert_eq!(text, "1,299");
    }

    #[test]
    fn test_falls_back_to_second_candidate() {
        let doc = parse(
            r#"<html><body>
                <span class="a-offscreen">₹1,399.00</span>
            </body></html>"#,
        );

        let text = extract(&doc, &default_candidates()).unwrap();
        assert_eq!(text, "₹1,399.00");
    }

    #[test]
    fn test_falls_back_to_legacy_ids() {
        let doc = parse(
            r#"<html><body>
                <div id="priceblock_dealprice">₹999.00</div>
            </body></html>"#,
        );

        let text = extract(&doc, &default_candidates()).unwrap();
        assert_eq!(text, "₹999.00");
    }

    #[test]
    fn test_no_candidate_matches() {
        let doc = parse(r#"<html><body><p>Out of stock</p></body></html>"#);
        assert_eq!(extract(&doc, &default_candidates()), None);
    }

    #[test]
    fn test_first_hit_wins_even_when_unparsable() {
        // The visible price element exists but holds junk; the chain must
        // NOT continue to the parsable offscreen copy.
        let doc = parse(
            r#"<html><body>
                <span class="a-price-whole">See options</span>
                <span class="a-offscreen">₹1,299.00</span>
            </body></html>"#,
        );

        let text = extract(&doc, &default_candidates()).unwrap();
        assert_eq!(text, "See options");
    }

    #[test]
    fn test_nested_text_is_joined_and_trimmed() {
        let doc = parse(
            r#"<html><body>
                <span class="a-price-whole"> 1,299 <span>00</span></span>
            </body></html>"#,
        );

        let text = extract(&doc, &default_candidates()).unwrap();
        assert_eq!(text, "1,299  00");
    }

    #[test]
    fn test_candidate_serde_round_trip() {
        let chain = default_candidates();
        let json = serde_json::to_string(&chain).unwrap();
        let parsed: Vec<ExtractionCandidate> = serde_json::from_str(&json).unwrap();
        assert_eq!(chain, parsed);
    }

    #[test]
    fn test_candidate_json_shape() {
        let candidate = ExtractionCandidate::by_id("priceblock_ourprice");
        let json = serde_json::to_value(&candidate).unwrap();
        assert_eq!(json["by"], "id");
        assert_eq!(json["id"], "priceblock_ourprice");
    }
}
