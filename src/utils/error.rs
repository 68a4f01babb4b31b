use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parsing error: {message}")]
    Parse { message: String },

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("Mail error: {0}")]
    Mail(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_parse_error_display() {
        let err = AppError::Parse {
            message: "could not convert 'N/A' to a number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Parsing error: could not convert 'N/A' to a number"
        );
    }

    #[test]
    fn test_selector_error_display() {
        let err = AppError::Selector(">>>".to_string());
        assert_eq!(err.to_string(), "Invalid selector: >>>");
    }
}
