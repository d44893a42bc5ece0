//! Error types for the AlgoKit transact crate.
//!
//! Covers the failures that can occur while building, encoding or decoding the
//! transactions the sandbox harness submits.

use snafu::Snafu;

/// Represents errors that can occur during Algorand transaction operations.
#[derive(Debug, Snafu)]
pub enum AlgoKitTransactError {
    #[snafu(display("Error ocurred during encoding: {source}"))]
    EncodingError { source: rmp_serde::encode::Error },

    #[snafu(display("Error ocurred during decoding: {source}"))]
    DecodingError { source: rmp_serde::decode::Error },

    #[snafu(display("Error ocurred during msgpack encoding: {source}"))]
    MsgpackEncodingError { source: rmpv::encode::Error },

    #[snafu(display("Error ocurred during msgpack decoding: {source}"))]
    MsgpackDecodingError { source: rmpv::decode::Error },

    #[snafu(display("{message}"))]
    InputError { message: String },

    #[snafu(display("{message}"))]
    InvalidAddress { message: String },
}

impl From<rmp_serde::encode::Error> for AlgoKitTransactError {
    fn from(source: rmp_serde::encode::Error) -> Self {
        AlgoKitTransactError::EncodingError { source }
    }
}

impl From<rmp_serde::decode::Error> for AlgoKitTransactError {
    fn from(source: rmp_serde::decode::Error) -> Self {
        AlgoKitTransactError::DecodingError { source }
    }
}

impl From<rmpv::encode::Error> for AlgoKitTransactError {
    fn from(source: rmpv::encode::Error) -> Self {
        AlgoKitTransactError::MsgpackEncodingError { source }
    }
}

impl From<rmpv::decode::Error> for AlgoKitTransactError {
    fn from(source: rmpv::decode::Error) -> Self {
        AlgoKitTransactError::MsgpackDecodingError { source }
    }
}
