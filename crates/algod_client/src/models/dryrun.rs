use crate::models::{Application, ApplicationStateSchema, EvalDeltaKeyValue, TealKeyValue};
use serde::{Deserialize, Serialize};
use serde_with::{Bytes, serde_as, skip_serializing_none};

/// Ledger state and transactions for `/v2/teal/dryrun`.
///
/// Sent as msgpack so the signed transactions can be embedded as-is. The request only carries
/// the applications the transactions touch; account balances are not needed to evaluate an
/// approval program that reads global fields and writes global state.
#[skip_serializing_none]
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DryrunRequest {
    pub apps: Vec<DryrunApplication>,
    /// The `global LatestTimestamp` seen by the programs, in seconds since the epoch.
    pub latest_timestamp: u64,
    pub protocol_version: Option<String>,
    pub round: Option<u64>,
    /// Signed transactions, each a decoded msgpack value.
    pub txns: Vec<rmpv::Value>,
}

#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct DryrunApplication {
    pub id: u64,
    pub params: DryrunApplicationParams,
}

/// [`crate::models::ApplicationParams`] with programs as raw bytes, the msgpack form.
#[serde_as]
#[skip_serializing_none]
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DryrunApplicationParams {
    #[serde_as(as = "Bytes")]
    pub approval_program: Vec<u8>,
    #[serde_as(as = "Bytes")]
    pub clear_state_program: Vec<u8>,
    pub creator: String,
    pub global_state: Option<Vec<TealKeyValue>>,
    pub global_state_schema: Option<ApplicationStateSchema>,
    pub local_state_schema: Option<ApplicationStateSchema>,
}

impl From<Application> for DryrunApplication {
    fn from(app: Application) -> Self {
        DryrunApplication {
            id: app.id,
            params: DryrunApplicationParams {
                approval_program: app.params.approval_program,
                clear_state_program: app.params.clear_state_program,
                creator: app.params.creator,
                global_state: app.params.global_state,
                global_state_schema: app.params.global_state_schema,
                local_state_schema: app.params.local_state_schema,
            },
        }
    }
}

/// Evaluation result of a single transaction in a dry run.
#[skip_serializing_none]
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DryrunTxnResult {
    /// `PASS` or `REJECT` followed by any evaluation messages.
    pub app_call_messages: Option<Vec<String>>,
    pub budget_consumed: Option<u64>,
    #[serde(default)]
    pub disassembly: Vec<String>,
    pub global_delta: Option<Vec<EvalDeltaKeyValue>>,
    pub logs: Option<Vec<String>>,
}

impl DryrunTxnResult {
    /// True when the approval program approved the transaction.
    pub fn passed(&self) -> bool {
        self.app_call_messages
            .as_ref()
            .is_some_and(|messages| messages.iter().any(|m| m == "PASS"))
    }
}

#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DryrunResponse {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub protocol_version: String,
    pub txns: Vec<DryrunTxnResult>,
}
