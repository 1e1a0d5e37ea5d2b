//! Error type for fetch operations.

use thiserror::Error;

/// Errors surfaced by the remote basket service.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Non-2xx status, any code.
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    /// Could not reach the service at all.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The response body did not match the contract.
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        let err = FetchError::Http {
            status: 503,
            url: "/api/products".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error: 503 for /api/products");
    }
}
