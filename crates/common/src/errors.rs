use thiserror::Error;

/// Every way a signal request can fail. All variants are terminal for the
/// request that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalError {
    #[error("API key is not provided")]
    MissingCredential,

    #[error("stock ticker is empty")]
    EmptyTicker,

    /// Transport failure, non-success status, or an error reported by the provider.
    #[error("Gemini API error: {0}")]
    NetworkOrService(String),

    #[error("malformed response from API: {0}")]
    MalformedResponse(String),

    /// Carries the name of the first required field that was missing or empty.
    #[error("received incomplete data structure from API: missing `{0}`")]
    IncompleteData(&'static str),

    #[error("received invalid signal type: {0}. Expected BUY, SELL, or HOLD")]
    InvalidSignalValue(String),
}
