use thiserror::Error;

#[derive(Error, Debug)]
pub enum FarmError {
    #[error("API request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Read-side failures are logged and degraded by the services; this
    // variant never crosses a public service boundary.
    #[error("Fetch failed: {message}")]
    FetchFailed { message: String },

    // Write-side failures carry the store's message verbatim so the caller
    // sees exactly what the envelope said.
    #[error("{message}")]
    CreationFailed { message: String },

    #[error("{message}")]
    UpdateFailed { message: String },

    #[error("{message}")]
    DeletionFailed { message: String },

    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("Missing configuration value: {field}")]
    MissingConfig { field: String },
}

pub type Result<T> = std::result::Result<T, FarmError>;
