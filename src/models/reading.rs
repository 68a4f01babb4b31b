use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::CheckStatus;

/// One price observation, handed straight to the history sink and/or
/// notifier and then discarded. Durability lives in the history file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceReading {
    pub product_name: String,
    pub numeric_price: Option<f64>,
    pub status: CheckStatus,
    pub timestamp: DateTime<Utc>,
}

impl PriceReading {
    /// A successful reading. The only constructor that sets a price, which
    /// keeps `numeric_price` and `status` in lockstep.
    pub fn success(product_name: impl Into<String>, price: f64) -> Self {
        Self {
            product_name: product_name.into(),
            numeric_price: Some(price),
            status: CheckStatus::Success,
            timestamp: Utc::now(),
        }
    }

    /// A terminal failure reading. Panics in debug builds if called with
    /// `Success`, which must go through [`PriceReading::success`].
    pub fn failure(product_name: impl Into<String>, status: CheckStatus) -> Self {
        debug_assert!(status != CheckStatus::Success);
        Self {
            product_name: product_name.into(),
            numeric_price: None,
            status,
            timestamp: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == CheckStatus::Success
    }
}
