//! Algorand addresses are base32-encoded strings that represent 32 bytes plus a checksum.
//!
//! This module provides the [`Address`] type, which encapsulates the logic for parsing,
//! validating, and displaying Algorand addresses. An address is a 58-character base32 string
//! encoding 32 bytes of data and a 4-byte checksum.

use crate::constants::Byte32;
use crate::error::AlgoKitTransactError;
use crate::utils::pub_key_to_checksum;
use crate::{
    ALGORAND_ADDRESS_LENGTH, ALGORAND_CHECKSUM_BYTE_LENGTH, ALGORAND_PUBLIC_KEY_BYTE_LENGTH,
};
use serde::{Deserialize, Serialize};
use serde_with::{Bytes, serde_as};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Represents an Algorand address as decoded bytes without the checksum from a 58-character base32 string.
///
/// The checksum is calculated when formatting and validated when parsing.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Address(#[serde_as(as = "Bytes")] pub Byte32);

impl Address {
    /// Wraps a 32-byte ed25519 public key.
    pub fn from_pubkey(pub_key: &Byte32) -> Self {
        Address(*pub_key)
    }

    /// Returns the 32 bytes of the address as a byte array reference.
    pub fn as_bytes(&self) -> &Byte32 {
        &self.0
    }

    /// Returns the base32-encoded string representation of the address, including the checksum.
    pub fn as_str(&self) -> String {
        let mut buffer = [0u8; ALGORAND_PUBLIC_KEY_BYTE_LENGTH + ALGORAND_CHECKSUM_BYTE_LENGTH];
        buffer[..ALGORAND_PUBLIC_KEY_BYTE_LENGTH].copy_from_slice(&self.0);

        let checksum = self.checksum();
        buffer[ALGORAND_PUBLIC_KEY_BYTE_LENGTH..].copy_from_slice(&checksum);

        base32::encode(base32::Alphabet::Rfc4648 { padding: false }, &buffer)
    }

    /// Computes the 4-byte checksum for the address.
    pub fn checksum(&self) -> [u8; ALGORAND_CHECKSUM_BYTE_LENGTH] {
        pub_key_to_checksum(&self.0)
    }

    /// Returns true when `s` is a well formed, correctly checksummed address string.
    pub fn is_valid(s: &str) -> bool {
        s.parse::<Address>().is_ok()
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = AlgoKitTransactError;

    /// Interprets raw bytes as an address. Only 32-byte inputs are accepted.
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let pub_key: Byte32 = bytes
            .try_into()
            .map_err(|_| AlgoKitTransactError::InvalidAddress {
                message: format!(
                    "Address must be {} bytes, got {} bytes",
                    ALGORAND_PUBLIC_KEY_BYTE_LENGTH,
                    bytes.len()
                ),
            })?;
        Ok(Address(pub_key))
    }
}

impl FromStr for Address {
    type Err = AlgoKitTransactError;

    /// Parses a 58-character base32 Algorand address string into an [`Address`] instance.
    ///
    /// Returns an error if the string is not exactly 58 characters, is not valid base32,
    /// or if the checksum does not match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != ALGORAND_ADDRESS_LENGTH {
            return Err(AlgoKitTransactError::InvalidAddress {
                message: "Algorand address must be exactly 58 characters".into(),
            });
        }
        let decoded_address = base32::decode(base32::Alphabet::Rfc4648 { padding: false }, s)
            .ok_or_else(|| AlgoKitTransactError::InvalidAddress {
                message: "Invalid base32 encoding for Algorand address".into(),
            })?;

        if decoded_address.len() != ALGORAND_PUBLIC_KEY_BYTE_LENGTH + ALGORAND_CHECKSUM_BYTE_LENGTH
        {
            return Err(AlgoKitTransactError::InvalidAddress {
                message: "Decoded address has an unexpected length".into(),
            });
        }

        let (pub_key, checksum) = decoded_address.split_at(ALGORAND_PUBLIC_KEY_BYTE_LENGTH);
        let address = Address::try_from(pub_key)?;

        if address.checksum() != checksum {
            return Err(AlgoKitTransactError::InvalidAddress {
                message: "Checksum is invalid".to_string(),
            });
        }
        Ok(address)
    }
}

impl Display for Address {
    /// Formats the address as a base32-encoded string.
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
