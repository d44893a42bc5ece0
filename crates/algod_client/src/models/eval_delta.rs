use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// A state change made by a program.
///
/// `action` is 1 for set bytes, 2 for set uint and 3 for delete. `bytes` is base64 encoded.
/// algod omits zero values, so a set uint of 0 arrives with neither `bytes` nor `uint`.
#[skip_serializing_none]
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvalDelta {
    pub action: u64,
    pub bytes: Option<String>,
    pub uint: Option<u64>,
}

/// A key (base64 encoded) and the change made to its value.
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvalDeltaKeyValue {
    pub key: String,
    pub value: EvalDelta,
}
