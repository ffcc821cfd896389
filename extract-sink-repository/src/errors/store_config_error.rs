use thiserror::Error;

/// Errors raised while constructing a store client.
#[derive(Debug, Error)]
pub enum StoreConfigError {
    /// The configured URL could not be parsed or joined.
    #[error("Invalid store URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl StoreConfigError {
    pub fn invalid_url(msg: impl Into<String>) -> Self {
        Self::InvalidUrl(msg.into())
    }

    pub fn client(msg: impl Into<String>) -> Self {
        Self::Client(msg.into())
    }
}

impl From<url::ParseError> for StoreConfigError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}
