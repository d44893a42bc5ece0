//! Application call transactions create and invoke Algorand smart contracts.

use crate::address::Address;
use crate::utils::{is_empty_schema_opt, is_empty_vec_opt, is_zero, is_zero_opt};
use crate::{Transaction, TransactionHeader};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use serde_with::{Bytes, serde_as, skip_serializing_none};

/// On-completion actions for application transactions.
#[derive(Serialize_repr, Deserialize_repr, Debug, PartialEq, Clone, Copy, Default)]
#[repr(u8)]
pub enum OnApplicationComplete {
    /// Only runs the approval program.
    #[default]
    NoOp = 0,
    /// Allocates local state for the sender.
    OptIn = 1,
    /// Deallocates local state for the sender.
    CloseOut = 2,
    /// Runs the clear state program; cannot fail.
    ClearState = 3,
    /// Replaces the approval and clear state programs.
    UpdateApplication = 4,
    /// Deletes the application.
    DeleteApplication = 5,
}

/// Maximum number of values an application may keep in a key/value store.
#[serde_as]
#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
pub struct StateSchema {
    #[serde(rename = "nui")]
    #[serde(skip_serializing_if = "is_zero")]
    #[serde(default)]
    pub num_uints: u64,

    #[serde(rename = "nbs")]
    #[serde(skip_serializing_if = "is_zero")]
    #[serde(default)]
    pub num_byte_slices: u64,
}

/// Represents an application call transaction.
///
/// With `app_id` 0 the transaction creates a new application from the supplied programs and
/// schemas; otherwise it invokes the existing application.
#[serde_as]
#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Builder)]
#[builder(
    name = ApplicationCallTransactionBuilder,
    setter(strip_option),
    build_fn(name = "build_fields")
)]
pub struct ApplicationCallTransactionFields {
    /// Common transaction header fields.
    #[serde(flatten)]
    pub header: TransactionHeader,

    /// ID of the application being called, 0 for creation.
    #[serde(rename = "apid")]
    #[serde(skip_serializing_if = "is_zero")]
    #[serde(default)]
    #[builder(default)]
    pub app_id: u64,

    #[serde(rename = "apan")]
    #[serde(skip_serializing_if = "is_default_on_complete")]
    #[serde(default)]
    #[builder(default)]
    pub on_complete: OnApplicationComplete,

    /// Approval program bytecode. Only used on creation and update.
    #[serde(rename = "apap")]
    #[serde_as(as = "Option<Bytes>")]
    #[serde(skip_serializing_if = "is_empty_vec_opt")]
    #[serde(default)]
    #[builder(default)]
    pub approval_program: Option<Vec<u8>>,

    /// Clear state program bytecode. Only used on creation and update.
    #[serde(rename = "apsu")]
    #[serde_as(as = "Option<Bytes>")]
    #[serde(skip_serializing_if = "is_empty_vec_opt")]
    #[serde(default)]
    #[builder(default)]
    pub clear_state_program: Option<Vec<u8>>,

    /// Immutable after creation.
    #[serde(rename = "apgs")]
    #[serde(skip_serializing_if = "is_empty_schema_opt")]
    #[serde(default)]
    #[builder(default)]
    pub global_state_schema: Option<StateSchema>,

    /// Immutable after creation.
    #[serde(rename = "apls")]
    #[serde(skip_serializing_if = "is_empty_schema_opt")]
    #[serde(default)]
    #[builder(default)]
    pub local_state_schema: Option<StateSchema>,

    #[serde(rename = "apep")]
    #[serde(skip_serializing_if = "is_zero_opt")]
    #[serde(default)]
    #[builder(default)]
    pub extra_program_pages: Option<u64>,

    #[serde(rename = "apaa")]
    #[serde_as(as = "Option<Vec<Bytes>>")]
    #[serde(skip_serializing_if = "is_empty_vec_opt")]
    #[serde(default)]
    #[builder(default)]
    pub args: Option<Vec<Vec<u8>>>,

    #[serde(rename = "apat")]
    #[serde(skip_serializing_if = "is_empty_vec_opt")]
    #[serde(default)]
    #[builder(default)]
    pub account_references: Option<Vec<Address>>,

    #[serde(rename = "apfa")]
    #[serde(skip_serializing_if = "is_empty_vec_opt")]
    #[serde(default)]
    #[builder(default)]
    pub app_references: Option<Vec<u64>>,

    #[serde(rename = "apas")]
    #[serde(skip_serializing_if = "is_empty_vec_opt")]
    #[serde(default)]
    #[builder(default)]
    pub asset_references: Option<Vec<u64>>,
}

impl ApplicationCallTransactionBuilder {
    pub fn build(&self) -> Result<Transaction, ApplicationCallTransactionBuilderError> {
        self.build_fields().map(Transaction::ApplicationCall)
    }
}

fn is_default_on_complete(on_complete: &OnApplicationComplete) -> bool {
    matches!(on_complete, OnApplicationComplete::NoOp)
}
