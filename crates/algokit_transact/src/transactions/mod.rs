//! The transaction types the sandbox harness submits: payments (including account closure)
//! and application calls (including creation), plus their signed wrapper.

mod application_call;
mod common;
mod payment;

pub use application_call::{
    ApplicationCallTransactionBuilder, ApplicationCallTransactionBuilderError,
    ApplicationCallTransactionFields, OnApplicationComplete, StateSchema,
};
pub use common::{TransactionHeader, TransactionHeaderBuilder, TransactionHeaderBuilderError};
pub use payment::{
    PaymentTransactionBuilder, PaymentTransactionBuilderError, PaymentTransactionFields,
};

use crate::Address;
use crate::constants::{
    ALGORAND_SIGNATURE_BYTE_LENGTH, ALGORAND_SIGNATURE_ENCODING_INCR, Byte32,
};
use crate::error::AlgoKitTransactError;
use crate::traits::{AlgorandMsgpack, EstimateTransactionSize, TransactionId};
use crate::utils::is_zero_addr_opt;
use serde::{Deserialize, Serialize};
use serde_with::{Bytes, serde_as};

/// Enumeration of the supported transaction types.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(tag = "type")]
pub enum Transaction {
    #[serde(rename = "pay")]
    Payment(PaymentTransactionFields),

    #[serde(rename = "appl")]
    ApplicationCall(ApplicationCallTransactionFields),
}

/// Inputs for [`Transaction::assign_fee`], normally taken from algod's suggested params.
#[derive(Debug, Clone, Default)]
pub struct FeeParams {
    pub fee_per_byte: u64,
    pub min_fee: u64,
}

impl Transaction {
    pub fn header(&self) -> &TransactionHeader {
        match self {
            Transaction::Payment(p) => &p.header,
            Transaction::ApplicationCall(a) => &a.header,
        }
    }

    pub fn header_mut(&mut self) -> &mut TransactionHeader {
        match self {
            Transaction::Payment(p) => &mut p.header,
            Transaction::ApplicationCall(a) => &mut a.header,
        }
    }

    /// Returns a copy of the transaction with the fee set from `request`.
    ///
    /// The fee is `fee_per_byte * estimated size`, raised to `min_fee`.
    pub fn assign_fee(&self, request: FeeParams) -> Result<Transaction, AlgoKitTransactError> {
        let mut tx = self.clone();
        let mut calculated_fee: u64 = 0;

        if request.fee_per_byte > 0 {
            let estimated_size = tx.estimate_size()?;
            calculated_fee = request.fee_per_byte * estimated_size as u64;
        }

        if calculated_fee < request.min_fee {
            calculated_fee = request.min_fee;
        }

        tx.header_mut().fee = Some(calculated_fee);

        Ok(tx)
    }
}

impl AlgorandMsgpack for Transaction {
    const PREFIX: &'static [u8] = b"TX";
}

impl TransactionId for Transaction {}

impl EstimateTransactionSize for Transaction {
    fn estimate_size(&self) -> Result<usize, AlgoKitTransactError> {
        Ok(self.encode_raw()?.len() + ALGORAND_SIGNATURE_ENCODING_INCR)
    }
}

/// A signed transaction.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct SignedTransaction {
    /// The transaction that has been signed.
    #[serde(rename = "txn")]
    pub transaction: Transaction,

    /// Ed25519 signature over the `TX` prefixed transaction bytes.
    #[serde(rename = "sig")]
    #[serde_as(as = "Option<Bytes>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub signature: Option<[u8; ALGORAND_SIGNATURE_BYTE_LENGTH]>,

    /// Set when the sender account has been rekeyed to another signer.
    #[serde(rename = "sgnr")]
    #[serde(skip_serializing_if = "is_zero_addr_opt")]
    #[serde(default)]
    pub auth_address: Option<Address>,
}

impl AlgorandMsgpack for SignedTransaction {
    // Every transaction field has a default, so serde cannot tell which transaction type the
    // inner map belongs to; decode it on its own through Transaction::decode and splice it in.
    fn decode(bytes: &[u8]) -> Result<Self, AlgoKitTransactError> {
        let value = rmpv::decode::read_value(&mut &bytes[..])?;

        let rmpv::Value::Map(map) = value else {
            return Err(AlgoKitTransactError::InputError {
                message: "expected signed transaction to be a msgpack map".to_string(),
            });
        };

        let txn_value = map
            .iter()
            .find(|(k, _)| k.as_str() == Some("txn"))
            .map(|(_, v)| v)
            .ok_or_else(|| AlgoKitTransactError::InputError {
                message: "signed transaction is missing the txn field".to_string(),
            })?;

        let mut txn_buf = Vec::new();
        rmpv::encode::write_value(&mut txn_buf, txn_value)?;

        Ok(SignedTransaction {
            transaction: Transaction::decode(&txn_buf)?,
            ..rmp_serde::from_slice(bytes)?
        })
    }
}

impl TransactionId for SignedTransaction {
    fn id_raw(&self) -> Result<Byte32, AlgoKitTransactError> {
        self.transaction.id_raw()
    }
}
