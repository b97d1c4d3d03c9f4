//! Price labels as rendered by the storefront (`"$29.99"`).

use crate::error::CheckError;

/// Parses a price label into a number.
///
/// Surrounding whitespace and a single leading `$` are ignored. The rest must
/// be a finite decimal; partial matches such as `"29.99 USD"` are rejected.
///
/// ```
/// use structeq::price::parse_price;
///
/// assert_eq!(parse_price("$29.99").unwrap(), 29.99);
/// assert_eq!(parse_price(" 7.99 ").unwrap(), 7.99);
/// assert!(parse_price("free").is_err());
/// ```
pub fn parse_price(label: &str) -> Result<f64, CheckError> {
    let trimmed = label.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed).trim_start();
    let looks_numeric = digits
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    match digits.parse::<f64>() {
        Ok(price) if looks_numeric && price.is_finite() => Ok(price),
        _ => Err(CheckError::InvalidPrice(label.to_owned())),
    }
}
