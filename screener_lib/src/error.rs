//! Error types for the library layer.

use std::fmt;

use crate::watchlist::WatchlistError;

/// Errors raised while turning user input into a runnable watchlist.
#[derive(Debug)]
pub enum ScreenerError {
    /// The watchlist could not be loaded or is inconsistent.
    Watchlist(WatchlistError),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl fmt::Display for ScreenerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Watchlist(e) => write!(f, "Watchlist error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for ScreenerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Watchlist(e) => Some(e),
            Self::InvalidInput(_) => None,
        }
    }
}

impl From<WatchlistError> for ScreenerError {
    fn from(e: WatchlistError) -> Self {
        Self::Watchlist(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn watchlist_error_is_the_source() {
        let err = ScreenerError::from(WatchlistError::NoStockCodes);
        assert_eq!(err.to_string(), "Watchlist error: Watchlist has no stock codes");
        assert!(err.source().is_some());
    }

    #[test]
    fn invalid_input_has_no_source() {
        let err = ScreenerError::InvalidInput("bad".into());
        assert_eq!(err.to_string(), "Invalid input: bad");
        assert!(err.source().is_none());
    }
}
