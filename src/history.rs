use std::fs::OpenOptions;
use std::path::PathBuf;

use chrono::{DateTime, Local, Utc};

use crate::utils::error::Result;

const HEADER: [&str; 4] = ["Date", "Time", "Product", "Price"];

/// Append-only CSV log of price observations, one row per successful
/// check. Prior rows are never rewritten.
pub struct HistorySink {
    path: PathBuf,
}

impl HistorySink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn append(&self, product_name: &str, price: f64, timestamp: DateTime<Utc>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let is_new_file = !self.path.exists();
        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if is_new_file {
            writer.write_record(HEADER)?;
        }

        let local = timestamp.with_timezone(&Local);
        writer.write_record([
            local.format("%Y-%m-%d").to_string(),
            local.format("%H:%M:%S").to_string(),
            product_name.to_string(),
            price.to_string(),
        ])?;
        writer.flush()?;

        Ok(())
    }
}
