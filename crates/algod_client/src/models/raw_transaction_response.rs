use serde::{Deserialize, Serialize};

#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawTransactionResponse {
    /// Encoding of the transaction hash.
    #[serde(rename = "txId")]
    pub tx_id: String,
}
