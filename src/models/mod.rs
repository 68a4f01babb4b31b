use serde::{Deserialize, Serialize};

pub mod product;
pub mod reading;

// Re-exports for convenience
pub use product::*;
pub use reading::*;

/// Terminal outcome of a single product check.
///
/// Every check ends in exactly one of these states; there are no retries
/// or loops back within a run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Success,
    Blocked,
    SelectorMiss,
    ParseFailure,
    NetworkFailure,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CheckStatus::Success => "success",
            CheckStatus::Blocked => "blocked",
            CheckStatus::SelectorMiss => "selector_miss",
            CheckStatus::ParseFailure => "parse_failure",
            CheckStatus::NetworkFailure => "network_failure",
        };
        write!(f, "{}", s)
    }
}
