use serde::{Deserialize, Serialize};

/// Account information at a given round, trimmed to balances and status.
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Account {
    pub address: String,
    /// Total number of microALGO in the account.
    pub amount: u64,
    /// The minimum balance the account must keep, in microALGO.
    #[serde(default)]
    pub min_balance: u64,
    /// The round for which this information is relevant.
    #[serde(default)]
    pub round: u64,
    /// Delegation status: `Offline`, `Online` or `NotParticipating`.
    #[serde(default)]
    pub status: String,
    /// Number of applications this account has created.
    #[serde(default)]
    pub total_created_apps: u64,
}
