use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as, skip_serializing_none};

/// Represents a TEAL value: `type` 1 is bytes (base64 encoded), 2 is uint.
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct TealValue {
    #[serde(rename = "type")]
    pub r#type: u64,
    #[serde(default)]
    pub bytes: String,
    #[serde(default)]
    pub uint: u64,
}

#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct TealKeyValue {
    pub key: String,
    pub value: TealValue,
}

#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ApplicationStateSchema {
    #[serde(default)]
    pub num_uint: u64,
    #[serde(default)]
    pub num_byte_slice: u64,
}

#[serde_as]
#[skip_serializing_none]
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ApplicationParams {
    #[serde_as(as = "Base64")]
    pub approval_program: Vec<u8>,
    #[serde_as(as = "Base64")]
    pub clear_state_program: Vec<u8>,
    /// The address that created this application.
    pub creator: String,
    pub global_state: Option<Vec<TealKeyValue>>,
    pub global_state_schema: Option<ApplicationStateSchema>,
    pub local_state_schema: Option<ApplicationStateSchema>,
}

/// An application's index and its parameters.
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: u64,
    pub params: ApplicationParams,
}
