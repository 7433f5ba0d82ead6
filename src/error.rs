use thiserror::Error;

/// Errors raised while fetching indicators or assembling the entity mapping.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure (DNS, connect, timeout, TLS, ...).
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered, but not with a success status.
    #[error("request failed with HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// The body was not valid JSON, or an entry did not match the expected shape.
    #[error("decode json: {0}")]
    Decode(#[from] serde_json::Error),

    /// The World Bank API reported an error payload in position 0.
    #[error("world bank api error: {0}")]
    Api(String),

    #[error("unexpected response shape: {0}")]
    Shape(&'static str),

    /// Identifier already bound to another display name.
    #[error("identifier {code} is already used by {existing}")]
    DuplicateIdentifier { code: String, existing: String },

    /// Malformed `Name=CODE` pair.
    #[error("invalid entity {0:?}, expected Name=CODE")]
    InvalidEntity(String),
}

pub type Result<T> = std::result::Result<T, Error>;
