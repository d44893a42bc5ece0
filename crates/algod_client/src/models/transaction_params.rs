use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};

/// Suggested parameters for building a new transaction.
#[serde_as]
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TransactionParams {
    /// The consensus protocol version as of the last round.
    pub consensus_version: String,
    /// Suggested fee per byte, in microALGO. Zero when the network is not congested.
    pub fee: u64,
    /// The genesis hash, base64 decoded.
    #[serde_as(as = "Base64")]
    pub genesis_hash: Vec<u8>,
    pub genesis_id: String,
    /// The last round seen.
    pub last_round: u64,
    /// The minimum transaction fee (not per byte) required for the transaction to be accepted.
    pub min_fee: u64,
}
