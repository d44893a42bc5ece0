//! Request and response bodies of the KMD v1 API.
//!
//! Every response also carries `error` and `message`, which KMD only fills in on failure;
//! failures arrive as non-2xx statuses, so those fields are not modelled.

use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as, skip_serializing_none};

#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct APIV1Wallet {
    pub id: Option<String>,
    pub name: Option<String>,
    pub driver_name: Option<String>,
    pub driver_version: Option<u32>,
    pub mnemonic_ux: Option<bool>,
    pub supported_txs: Option<Vec<String>>,
}

#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListWalletsResponse {
    pub wallets: Option<Vec<APIV1Wallet>>,
}

#[skip_serializing_none]
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct InitWalletHandleTokenRequest {
    pub wallet_id: Option<String>,
    pub wallet_password: Option<String>,
}

#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct InitWalletHandleTokenResponse {
    pub wallet_handle_token: Option<String>,
}

#[skip_serializing_none]
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReleaseWalletHandleTokenRequest {
    pub wallet_handle_token: Option<String>,
}

#[skip_serializing_none]
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListKeysRequest {
    pub wallet_handle_token: Option<String>,
}

#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListKeysResponse {
    pub addresses: Option<Vec<String>>,
}

#[skip_serializing_none]
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportKeyRequest {
    pub address: Option<String>,
    pub wallet_handle_token: Option<String>,
    pub wallet_password: Option<String>,
}

#[serde_as]
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportKeyResponse {
    /// The 64-byte ed25519 private key: the 32-byte seed followed by the public key.
    #[serde_as(as = "Option<Base64>")]
    pub private_key: Option<Vec<u8>>,
}
