use crate::models::EvalDeltaKeyValue;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Details of a transaction in the pool or recently confirmed.
#[skip_serializing_none]
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PendingTransactionResponse {
    /// The application index if the transaction created one.
    pub application_index: Option<u64>,
    /// Rewards in microALGO applied to the close remainder to account.
    pub close_rewards: Option<u64>,
    /// Closing amount for the transaction.
    pub closing_amount: Option<u64>,
    /// The round where this transaction was confirmed, if present.
    pub confirmed_round: Option<u64>,
    /// Global state key/value changes for the application being executed.
    pub global_state_delta: Option<Vec<EvalDeltaKeyValue>>,
    /// Logs emitted by the application.
    pub logs: Option<Vec<String>>,
    /// Non-empty when the transaction was removed from the pool.
    #[serde(default)]
    pub pool_error: String,
    /// The signed transaction as algod reports it, `sig` and `txn` objects included.
    pub txn: Option<serde_json::Value>,
}
