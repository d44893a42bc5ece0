//! Development accounts: the funded ones held by KMD and fresh ones generated for a run.

use std::sync::Arc;

use algokit_transact::{Address, AlgorandMsgpack, SignedTransaction, Transaction};
use ed25519_dalek::{Signer, SigningKey};
use futures::future::try_join_all;
use kmd_client::KmdClient;
use kmd_client::KmdError;
use kmd_client::models::{ExportKeyRequest, ListKeysRequest};
use log::{debug, info};
use rand::rngs::OsRng;

use crate::error::{Result, SandboxError};

/// An address paired with the ed25519 key that signs for it.
#[derive(Debug, Clone)]
pub struct SigningAccount {
    signing_key: SigningKey,
}

impl SigningAccount {
    /// Generate a new random account.
    pub fn generate() -> Self {
        SigningAccount {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Builds an account from a 64-byte secret key (seed followed by public key), the form KMD
    /// exports, or from a bare 32-byte seed.
    pub fn from_secret_key(secret_key: &[u8]) -> Result<Self> {
        let signing_key = match secret_key.len() {
            64 => {
                let keypair: &[u8; 64] = secret_key.try_into().map_err(|_| SandboxError::Signing {
                    message: "secret key must be 64 bytes".to_string(),
                })?;
                SigningKey::from_keypair_bytes(keypair).map_err(|e| SandboxError::Signing {
                    message: format!("public key does not match seed: {}", e),
                })?
            }
            32 => {
                let seed: &[u8; 32] = secret_key.try_into().map_err(|_| SandboxError::Signing {
                    message: "seed must be 32 bytes".to_string(),
                })?;
                SigningKey::from_bytes(seed)
            }
            len => {
                return Err(SandboxError::Signing {
                    message: format!("expected a 32 or 64 byte secret key, got {} bytes", len),
                });
            }
        };

        Ok(SigningAccount { signing_key })
    }

    pub fn address(&self) -> Address {
        Address::from_pubkey(&self.signing_key.verifying_key().to_bytes())
    }

    /// Signs the `TX` prefixed encoding of `transaction`.
    pub fn sign(&self, transaction: &Transaction) -> Result<SignedTransaction> {
        let signature = self.signing_key.sign(&transaction.encode()?);

        Ok(SignedTransaction {
            transaction: transaction.clone(),
            signature: Some(signature.to_bytes()),
            auth_address: None,
        })
    }
}

/// Loads the accounts of one KMD wallet.
pub struct KmdAccountProvider {
    kmd: Arc<KmdClient>,
    wallet_name: String,
    wallet_password: String,
}

impl KmdAccountProvider {
    pub fn new(kmd: Arc<KmdClient>, wallet_name: &str, wallet_password: &str) -> Self {
        KmdAccountProvider {
            kmd,
            wallet_name: wallet_name.to_string(),
            wallet_password: wallet_password.to_string(),
        }
    }

    /// Every account in the wallet, in the order KMD lists them.
    ///
    /// Keys are exported concurrently while a wallet handle is held; the handle is released
    /// whether or not the exports succeed.
    pub async fn get_accounts(&self) -> Result<Vec<SigningAccount>> {
        let wallets = self.kmd.list_wallets().await?.wallets.unwrap_or_default();

        let wallet_id = wallets
            .iter()
            .find(|wallet| wallet.name.as_deref() == Some(self.wallet_name.as_str()))
            .and_then(|wallet| wallet.id.clone())
            .ok_or_else(|| SandboxError::WalletNotFound {
                name: self.wallet_name.clone(),
            })?;

        let kmd = self.kmd.as_ref();
        let password = self.wallet_password.as_str();

        let exported = kmd
            .with_wallet_handle(&wallet_id, password, |handle| async move {
                let addresses = kmd
                    .list_keys_in_wallet(ListKeysRequest {
                        wallet_handle_token: Some(handle.clone()),
                    })
                    .await?
                    .addresses
                    .unwrap_or_default();
                debug!("Exporting {} keys", addresses.len());

                try_join_all(addresses.into_iter().map(|address| {
                    kmd.export_key(ExportKeyRequest {
                        address: Some(address),
                        wallet_handle_token: Some(handle.clone()),
                        wallet_password: Some(password.to_string()),
                    })
                }))
                .await
            })
            .await?;

        let accounts = exported
            .into_iter()
            .map(|response| {
                let private_key = response.private_key.ok_or_else(|| KmdError::MissingField {
                    field: "private_key".to_string(),
                })?;
                SigningAccount::from_secret_key(&private_key)
            })
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Loaded {} accounts from wallet {}",
            accounts.len(),
            self.wallet_name
        );
        Ok(accounts)
    }

    /// The account that pays for everything else: the first one in the wallet.
    pub async fn get_funder(&self) -> Result<SigningAccount> {
        self.get_accounts()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| SandboxError::NoAccountsInWallet {
                name: self.wallet_name.clone(),
            })
    }
}
