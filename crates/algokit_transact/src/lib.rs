mod address;
pub mod constants;
mod error;
mod traits;
mod transactions;
mod utils;

// Re-export all the public items
pub use address::Address;
pub use constants::*;
pub use error::AlgoKitTransactError;
pub use traits::{AlgorandMsgpack, EstimateTransactionSize, TransactionId};
pub use transactions::{
    ApplicationCallTransactionBuilder, ApplicationCallTransactionBuilderError,
    ApplicationCallTransactionFields, FeeParams, OnApplicationComplete, PaymentTransactionBuilder,
    PaymentTransactionBuilderError, PaymentTransactionFields, SignedTransaction, StateSchema,
    Transaction, TransactionHeader, TransactionHeaderBuilder, TransactionHeaderBuilderError,
};


#[cfg(feature = "test_utils")]
pub mod test_utils;
