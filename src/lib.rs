pub mod config;
pub mod extract;
pub mod fetch;
pub mod history;
pub mod models;
pub mod normalize;
pub mod notify;
pub mod pipeline;
pub mod utils;

// Re-export commonly used types
pub use config::AppConfig;
pub use models::{CheckStatus, PriceReading, Product};
pub use utils::error::AppError;

pub type Result<T> = std::result::Result<T, AppError>;
