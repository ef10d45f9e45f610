use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced by the wire codec and the navigation seam.
///
/// The core encode/decode paths are infallible: malformed dotted keys
/// degrade to partial [`ParsedKey`](crate::ParsedKey) values rather than
/// erroring, and absent state simply contributes no keys.
#[derive(Debug, Error)]
pub enum Error {
    /// A percent-encoded querystring decoded to invalid UTF-8.
    #[error("invalid UTF-8 in querystring: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The navigation layer rejected a location replace.
    #[error("navigation replace failed: {0}")]
    Navigation(String),
}

impl Error {
    /// Builds a [`Error::Navigation`] from any displayable reason.
    ///
    /// Intended for [`Router`](crate::Router) implementors wrapping their
    /// own navigation failures.
    pub fn navigation<T: std::fmt::Display>(reason: T) -> Self {
        Error::Navigation(reason.to_string())
    }
}
