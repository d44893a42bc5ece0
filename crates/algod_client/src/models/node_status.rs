use serde::{Deserialize, Serialize};

/// The subset of `/v2/status` the harness reads.
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NodeStatus {
    /// The current catchup time in nanoseconds.
    #[serde(default)]
    pub catchup_time: u64,
    /// The last round seen.
    pub last_round: u64,
    /// The last consensus version supported.
    #[serde(default)]
    pub last_version: String,
    /// Nanoseconds since the last round was seen.
    #[serde(default)]
    pub time_since_last_round: u64,
}
