pub mod client;

use algokit_http_client::HttpError;
use snafu::Snafu;

/// Errors returned by [`client::KmdClient`].
#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("HTTP error: {source}"))]
    Http { source: HttpError },

    #[snafu(display("Serialization error: {message}"))]
    Serde { message: String },

    #[snafu(display("KMD response is missing {field}"))]
    MissingField { field: String },
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
