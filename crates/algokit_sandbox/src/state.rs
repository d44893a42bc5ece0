//! Decoding of the global state deltas algod reports after evaluating an application call.

use std::collections::HashMap;
use std::fmt;

use algod_client::models::EvalDeltaKeyValue;
use algokit_transact::Address;
use base64::{Engine, prelude::BASE64_STANDARD};
use log::debug;

use crate::error::{Result, SandboxError};

/// A global state value in its most readable form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateValue {
    /// 32 bytes, shown as an address.
    Address(String),
    Text(String),
    Uint(u64),
    /// The delta carries neither a byte string nor an integer, as for a deleted key.
    Unset,
}

impl StateValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StateValue::Address(s) | StateValue::Text(s) => Some(s),
            StateValue::Uint(_) | StateValue::Unset => None,
        }
    }

    pub fn as_uint(&self) -> Option<u64> {
        match self {
            StateValue::Uint(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateValue::Address(s) | StateValue::Text(s) => f.write_str(s),
            StateValue::Uint(n) => write!(f, "{}", n),
            StateValue::Unset => Ok(()),
        }
    }
}

pub type ReadableGlobalState = HashMap<String, StateValue>;

/// Maps each changed key to its decoded value.
///
/// Byte values that are exactly 32 bytes long render as addresses, so a 32-character text
/// value is indistinguishable from an address and comes back as one. An empty byte string
/// counts as no bytes. Values without bytes take their `uint` as is, and an entry with neither
/// (a delete) decodes as `Unset`.
pub fn readable_global_state(delta: &[EvalDeltaKeyValue]) -> Result<ReadableGlobalState> {
    let mut state = ReadableGlobalState::with_capacity(delta.len());

    for entry in delta {
        let key_bytes = decode_base64(&entry.key)?;
        let key = String::from_utf8_lossy(&key_bytes).into_owned();

        let value = match entry.value.bytes.as_deref().filter(|b| !b.is_empty()) {
            Some(bytes) => {
                let raw = decode_base64(bytes)?;
                match Address::try_from(raw.as_slice()) {
                    Ok(address) => StateValue::Address(address.to_string()),
                    Err(_) => StateValue::Text(String::from_utf8_lossy(&raw).into_owned()),
                }
            }
            None => match entry.value.uint {
                Some(uint) => StateValue::Uint(uint),
                None => StateValue::Unset,
            },
        };

        debug!("Global state {} = {:?}", key, value);
        state.insert(key, value);
    }

    Ok(state)
}

fn decode_base64(value: &str) -> Result<Vec<u8>> {
    BASE64_STANDARD
        .decode(value)
        .map_err(|e| SandboxError::StateDecode {
            message: format!("'{}' is not valid base64: {}", value, e),
        })
}
