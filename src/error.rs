use thiserror::Error;

/// Errors raised while retrieving search results or recipes from the remote API
#[derive(Error, Debug)]
pub enum FetchError {
    /// The HTTP request itself failed (connection, timeout, body decoding)
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// The API reported an error in its response body
    #[error("API error: {0}")]
    Api(String),

    /// The request URL could not be built from the configured base URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The response did not have the expected shape
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Errors raised by the durable key/value store
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored value under `key` is not valid JSON for the expected type
    #[error("Stored value for '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Serializing a value before writing it failed
    #[error("Failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Top-level error for the application
#[derive(Error, Debug)]
pub enum ForkifyError {
    /// Failed to fetch data from the recipe API
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Failed to read or write persisted state
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A command was given input it cannot act on
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),
}
