use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("invalid response from {backend}: {details}")]
    BackendResponse { backend: String, details: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("serialize error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("lookup request failed: {0}")]
    Request(String),
}

#[derive(Debug, Error)]
#[error("location unavailable: {0}")]
pub struct LocationError(pub String);

#[derive(Debug, Error)]
#[error("{target} handoff failed: {details}")]
pub struct HandoffError {
    pub target: String,
    pub details: String,
}

/// Terminal outcome of a search attempt or a contact action. Nothing here is retried; the user
/// re-triggers the action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchFailure {
    #[error("current location is unavailable: {0}")]
    LocationUnavailable(String),

    #[error("no restaurants matched \"{query}\"")]
    NoResults { query: String },

    #[error("{name} has no phone number on file")]
    NoPhoneOnFile { name: String },

    #[error("phone number {raw:?} cannot be dialed")]
    InvalidDialTarget { raw: String },

    #[error("a search is already in progress")]
    SearchInProgress,

    #[error("{target} hand-off failed: {details}")]
    HandoffFailed { target: String, details: String },
}

impl From<HandoffError> for SearchFailure {
    fn from(error: HandoffError) -> Self {
        SearchFailure::HandoffFailed {
            target: error.target,
            details: error.details,
        }
    }
}

impl From<LocationError> for SearchFailure {
    fn from(error: LocationError) -> Self {
        SearchFailure::LocationUnavailable(error.0)
    }
}

pub type Result<T, E = SearchFailure> = std::result::Result<T, E>;
