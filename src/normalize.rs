use crate::utils::error::{AppError, Result};

/// Currency symbols stripped before numeric parsing.
const CURRENCY_SYMBOLS: [char; 3] = ['₹', '$', '€'];

/// Converts a raw, locale-formatted price string into its numeric value.
///
/// Strips known currency symbols and thousands separators, keeps only the
/// first line when the text carries trailing notation after a line break,
/// and parses the remainder as a decimal number. `"₹1,299.00"` and
/// `"1299.00"` both come out as `1299.0`.
///
/// Comparison is the only arithmetic this system does with money, so a
/// plain `f64` is sufficient.
pub fn normalize(raw_text: &str) -> Result<f64> {
    let mut cleaned: String = raw_text
        .chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c) && *c != ',')
        .collect();

    // Some listings append a per-unit suffix on a second line; only the
    // first segment is the price.
    if let Some(first_line) = cleaned.lines().next() {
        cleaned = first_line.to_string();
    }

    let cleaned = cleaned.trim();

    let value: f64 = cleaned.parse().map_err(|_| AppError::Parse {
        message: format!("could not convert '{}' to a number", cleaned),
    })?;

    if !value.is_finite() {
        return Err(AppError::Parse {
            message: format!("'{}' is not a finite price", cleaned),
        });
    }

    Ok(value)
}
