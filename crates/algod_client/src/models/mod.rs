pub mod account;
pub mod application;
pub mod compile_response;
pub mod dryrun;
pub mod eval_delta;
pub mod node_status;
pub mod pending_transaction_response;
pub mod raw_transaction_response;
pub mod transaction_params;

pub use account::Account;
pub use application::{
    Application, ApplicationParams, ApplicationStateSchema, TealKeyValue, TealValue,
};
pub use compile_response::CompileResponse;
pub use dryrun::{
    DryrunApplication, DryrunApplicationParams, DryrunRequest, DryrunResponse, DryrunTxnResult,
};
pub use eval_delta::{EvalDelta, EvalDeltaKeyValue};
pub use node_status::NodeStatus;
pub use pending_transaction_response::PendingTransactionResponse;
pub use raw_transaction_response::RawTransactionResponse;
pub use transaction_params::TransactionParams;
