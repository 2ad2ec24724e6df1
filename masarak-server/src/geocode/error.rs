//! Geocoding error types.

/// Errors from the external geocoding service.
///
/// All of these are recoverable: the resolver degrades to its local area
/// fallback instead of failing the query.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// The upstream geocoder did not answer within its deadline
    #[error("geocoding request timed out")]
    Timeout,

    /// HTTP transport failure
    #[error("geocoding HTTP error: {0}")]
    Http(reqwest::Error),

    /// The geocoder answered but found nothing
    #[error("geocoding returned no result for '{0}'")]
    NoResult(String),

    /// The geocoder's response could not be interpreted
    #[error("failed to parse geocoding response: {message}")]
    Malformed { message: String },
}

impl From<reqwest::Error> for GeocodeError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GeocodeError::Timeout
        } else {
            GeocodeError::Http(e)
        }
    }
}

/// A name could not be matched to any station above the confidence floor.
///
/// Surfaced to the caller as "no route found", never as a system error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no station matches '{0}' above the confidence floor")]
pub struct NoMatch(pub String);
