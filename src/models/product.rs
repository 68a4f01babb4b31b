use serde::{Deserialize, Serialize};

/// A tracked item, loaded once per run and read-only thereafter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub name: String,
    pub url: String,
    pub target_price: f64,
}

impl Product {
    pub fn new(name: impl Into<String>, url: impl Into<String>, target_price: f64) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            target_price,
        }
    }

    /// Whether an observed price is at or below the alert threshold.
    pub fn meets_target(&self, price: f64) -> bool {
        price <= self.target_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserialization() {
        let json = r#"{"name": "Cable", "url": "https://example.com/cable", "target_price": 500.0}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.name, "Cable");
        assert_eq!(product.url, "https://example.com/cable");
        assert_eq!(product.target_price, 500.0);
    }

    #[test]
    fn test_meets_target() {
        let product = Product::new("Cable", "https://example.com/cable", 500.0);

        assert!(product.meets_target(450.0));
        assert!(product.meets_target(500.0)); // At threshold counts
        assert!(!product.meets_target(600.0));
    }

    #[test]
    fn test_serialization_round_trip() {
        let product = Product::new("Headphones", "https://example.com/hp", 1299.0);
        let serialized = serde_json::to_string(&product).unwrap();
        let deserialized: Product = serde_json::from_str(&serialized).unwrap();

        assert_eq!(product, deserialized);
    }
}
