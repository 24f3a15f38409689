use crate::error::ScreenerError;

pub const MAX_CODE_LENGTH: usize = 20;

/// Validate a stock code: trim, uppercase, enforce length and the characters
/// exchange symbols use (ASCII letters, digits, `-`, `&`, `_`, `.`).
pub fn validate_stock_code(input: &str) -> Result<String, ScreenerError> {
    let code = input.trim().to_uppercase();
    if code.is_empty() {
        return Err(ScreenerError::InvalidInput(
            "stock code is empty".to_string(),
        ));
    }
    if code.len() > MAX_CODE_LENGTH {
        return Err(ScreenerError::InvalidInput(format!(
            "stock code '{}' exceeds maximum length of {} characters",
            input.trim(),
            MAX_CODE_LENGTH
        )));
    }
    if let Some(bad) = code
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '&' | '_' | '.')))
    {
        return Err(ScreenerError::InvalidInput(format!(
            "stock code '{}' contains invalid character '{}'",
            input.trim(),
            bad
        )));
    }
    Ok(code)
}

/// Split a comma-separated code list, dropping blank entries.
pub fn split_codes(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
