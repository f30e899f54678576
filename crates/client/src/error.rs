/// Errors surfaced by the client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server has no such resource (unknown login identifier, missing
    /// entry or user).
    #[error("{0} not found")]
    NotFound(String),

    /// The logged-in user's role does not allow the action. Checked on the
    /// client only.
    #[error("Not permitted: {0}")]
    NotPermitted(&'static str),

    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("API error ({status}) {code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
}
