use algod_client::AlgodError;
use algokit_transact::AlgoKitTransactError;
use kmd_client::KmdError;
use snafu::Snafu;
use std::path::PathBuf;

/// Everything that can abort the harness. Nothing is retried; the first error ends the run.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SandboxError {
    #[snafu(display("No wallet named: {name}"))]
    WalletNotFound { name: String },

    #[snafu(display("Wallet {name} does not contain any accounts"))]
    NoAccountsInWallet { name: String },

    #[snafu(display("Invalid configuration: {message}"))]
    InvalidConfig { message: String },

    #[snafu(display("Transaction {tx_id} unconfirmed after {rounds} rounds"))]
    ConfirmationTimeout { tx_id: String, rounds: u64 },

    #[snafu(display("Transaction {tx_id} was rejected; pool error: {message}"))]
    PoolError { tx_id: String, message: String },

    #[snafu(display("algod request failed: {source}"))]
    Algod { source: AlgodError },

    #[snafu(display("kmd request failed: {source}"))]
    Kmd { source: KmdError },

    #[snafu(display("Transaction error: {source}"))]
    Transact { source: AlgoKitTransactError },

    #[snafu(display("Signing error: {message}"))]
    Signing { message: String },

    #[snafu(display("Failed to read program {}: {source}", path.display()))]
    ProgramFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Failed to decode state: {message}"))]
    StateDecode { message: String },

    #[snafu(display("Dry run failed: {message}"))]
    DryRun { message: String },

    #[snafu(display("Transaction {tx_id} did not return an application id"))]
    MissingApplicationId { tx_id: String },
}

impl From<AlgodError> for SandboxError {
    fn from(source: AlgodError) -> Self {
        SandboxError::Algod { source }
    }
}

impl From<KmdError> for SandboxError {
    fn from(source: KmdError) -> Self {
        SandboxError::Kmd { source }
    }
}

impl From<AlgoKitTransactError> for SandboxError {
    fn from(source: AlgoKitTransactError) -> Self {
        SandboxError::Transact { source }
    }
}

pub type Result<T, E = SandboxError> = std::result::Result<T, E>;
