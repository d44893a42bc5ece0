mod client;

pub use client::AlgodClient;

use algokit_http_client::HttpError;
use snafu::Snafu;

/// Errors returned by [`AlgodClient`].
#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("HTTP error: {source}"))]
    Http { source: HttpError },

    #[snafu(display("Serialization error: {message}"))]
    Serde { message: String },
}

impl Error {
    /// True when algod answered 404, e.g. for a transaction it has not seen yet.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Http { source } if source.is_not_found())
    }
}

impl From<HttpError> for Error {
    fn from(source: HttpError) -> Self {
        Error::Http { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serde {
            message: e.to_string(),
        }
    }
}

impl From<rmp_serde::encode::Error> for Error {
    fn from(e: rmp_serde::encode::Error) -> Self {
        Error::Serde {
            message: e.to_string(),
        }
    }
}
