//! Encoding and identification behaviour shared by transactions and signed transactions.

use crate::constants::{HASH_BYTES_LENGTH, Byte32};
use crate::error::AlgoKitTransactError;
use crate::utils::{hash, sort_msgpack_value};
use serde::{Deserialize, Serialize};

/// Canonical Algorand msgpack encoding.
///
/// Keys are sorted and zero values omitted (via the `skip_serializing_if` attributes on each
/// field). `PREFIX` is the domain separator prepended by [`AlgorandMsgpack::encode`], e.g. `TX`
/// for the bytes that get signed.
pub trait AlgorandMsgpack: Serialize + for<'de> Deserialize<'de> {
    const PREFIX: &'static [u8] = b"";

    fn decode(bytes: &[u8]) -> Result<Self, AlgoKitTransactError> {
        if bytes.is_empty() {
            return Err(AlgoKitTransactError::InputError {
                message: "attempted to decode 0 bytes".to_string(),
            });
        }

        let bytes = if !Self::PREFIX.is_empty() && bytes.starts_with(Self::PREFIX) {
            &bytes[Self::PREFIX.len()..]
        } else {
            bytes
        };

        Ok(rmp_serde::from_slice(bytes)?)
    }

    fn encode(&self) -> Result<Vec<u8>, AlgoKitTransactError> {
        let raw = self.encode_raw()?;
        let mut buf = Vec::with_capacity(Self::PREFIX.len() + raw.len());
        buf.extend_from_slice(Self::PREFIX);
        buf.extend_from_slice(&raw);
        Ok(buf)
    }

    /// Encodes without the domain separator prefix.
    fn encode_raw(&self) -> Result<Vec<u8>, AlgoKitTransactError> {
        let mut unsorted = Vec::new();
        let mut serializer = rmp_serde::Serializer::new(&mut unsorted).with_struct_map();
        self.serialize(&mut serializer)?;

        let value = rmpv::decode::read_value(&mut unsorted.as_slice())?;
        let mut buf = Vec::new();
        rmpv::encode::write_value(&mut buf, &sort_msgpack_value(value))?;
        Ok(buf)
    }
}

pub trait TransactionId: AlgorandMsgpack {
    /// The SHA-512/256 digest of the prefixed encoding.
    fn id_raw(&self) -> Result<Byte32, AlgoKitTransactError> {
        let id: [u8; HASH_BYTES_LENGTH] = hash(&self.encode()?);
        Ok(id)
    }

    /// The base32 (unpadded) form of [`TransactionId::id_raw`], as shown by algod.
    fn id(&self) -> Result<String, AlgoKitTransactError> {
        Ok(base32::encode(
            base32::Alphabet::Rfc4648 { padding: false },
            &self.id_raw()?,
        ))
    }
}

pub trait EstimateTransactionSize {
    fn estimate_size(&self) -> Result<usize, AlgoKitTransactError>;
}
