use thiserror::Error;

/// Result type alias for the notification center
pub type Result<T> = std::result::Result<T, PanelError>;

/// Errors raised on the fetch, clear-all and live-feed paths.
///
/// Callers on the panel's best-effort paths swallow these after logging;
/// they surface to the caller only from the low-level api/transport seams.
#[derive(Error, Debug)]
pub enum PanelError {
    /// HTTP transport or body decoding failed
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered but not with the shape we expect
    #[error("unexpected API response: {0}")]
    UnexpectedResponse(String),

    /// WebSocket connection failed
    #[error("socket error: {0}")]
    Socket(#[from] tokio_tungstenite::tungstenite::Error),

    /// A payload did not parse as JSON
    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}
