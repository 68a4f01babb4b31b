use std::path::{Path, PathBuf};

use url::Url;

use crate::extract::{default_candidates, ExtractionCandidate};
use crate::fetch::FetcherConfig;
use crate::models::Product;
use crate::notify::SmtpConfig;
use crate::utils::error::{AppError, Result};

/// Everything loaded at process start. Immutable for the rest of the run.
#[derive(Debug)]
pub struct AppConfig {
    pub products_path: PathBuf,
    pub history_path: PathBuf,
    pub debug_dump_path: PathBuf,
    pub fetcher: FetcherConfig,
    pub candidates: Vec<ExtractionCandidate>,
    pub smtp: Option<SmtpConfig>,
}

impl AppConfig {
    /// Defaults plus SMTP credentials from the environment. Missing
    /// credentials disable notification; they never abort the run.
    pub fn from_env() -> Self {
        Self {
            products_path: PathBuf::from("products.json"),
            history_path: PathBuf::from("price_history.csv"),
            debug_dump_path: PathBuf::from("debug_page.html"),
            fetcher: FetcherConfig::default(),
            candidates: default_candidates(),
            smtp: SmtpConfig::from_env(),
        }
    }
}

/// Loads the tracked products. A missing file is a non-fatal condition
/// yielding an empty list; malformed JSON is an error.
pub fn load_products(path: &Path) -> Result<Vec<Product>> {
    if !path.exists() {
        tracing::warn!("products file {} not found, nothing to check", path.display());
        return Ok(Vec::new());
    }

    let contents = std::fs::read_to_string(path)?;
    let products: Vec<Product> = serde_json::from_str(&contents)?;

    for product in &products {
        if Url::parse(&product.url).is_err() {
            return Err(AppError::Validation(format!(
                "product '{}' has an invalid URL: {}",
                product.name, product.url
            )));
        }
    }

    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::AppError;
    use std::io::Write;

    #[test]
    fn test_missing_products_file_yields_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let products = load_products(&dir.path().join("products.json")).unwrap();
        assert!(products.is_empty());
    }

    #[test]
    fn test_load_products_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"[
                {{"name": "Cable", "url": "https://example.com/cable", "target_price": 500.0}},
                {{"name": "Headphones", "url": "https://example.com/hp", "target_price": 1299.0}}
            ]"#
        )
        .unwrap();

        let products = load_products(&path).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Cable");
        assert_eq!(products[1].target_price, 1299.0);
    }

    #[test]
    fn test_invalid_product_url_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(
            &path,
            r#"[{"name": "Cable", "url": "not-a-url", "target_price": 500.0}]"#,
        )
        .unwrap();

        let err = load_products(&path).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("Cable"));
    }

    #[test]
    fn test_malformed_products_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_products(&path).unwrap_err();
        assert!(matches!(err, AppError::Serialization(_)));
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig {
            products_path: PathBuf::from("products.json"),
            history_path: PathBuf::from("price_history.csv"),
            debug_dump_path: PathBuf::from("debug_page.html"),
            fetcher: FetcherConfig::default(),
            candidates: default_candidates(),
            smtp: None,
        };

        assert_eq!(config.fetcher.request_timeout_secs, 10);
        assert_eq!(config.candidates.len(), 4);
    }
}
