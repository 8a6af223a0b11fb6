use reqwest::StatusCode;

/// Message shown for every failed lookup, whatever the underlying cause.
pub const FETCH_FAILED_MESSAGE: &str = "City not found. Please try again.";

/// Message shown when the user submits an empty place name.
pub const EMPTY_PLACE_MESSAGE: &str = "Please Enter a Valid Location";

/// Failure of a single weather lookup.
///
/// The variants keep the detail for logs; the user only ever sees
/// [`FetchError::user_message`].
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to weather provider failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("weather provider responded with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("unexpected weather payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    pub fn user_message(&self) -> &'static str {
        FETCH_FAILED_MESSAGE
    }
}

/// Input rejected before any lookup is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{}", EMPTY_PLACE_MESSAGE)]
    EmptyPlaceName,
}
