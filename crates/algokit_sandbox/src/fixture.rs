//! One-time setup and teardown around the hello world contract.

use std::sync::Arc;

use algod_client::AlgodClient;
use algod_client::models::PendingTransactionResponse;
use chrono::{Datelike, Utc};
use kmd_client::KmdClient;
use log::info;

use crate::accounts::{KmdAccountProvider, SigningAccount};
use crate::config::SandboxConfig;
use crate::error::Result;
use crate::programs::ProgramCompiler;
use crate::state::{ReadableGlobalState, readable_global_state};
use crate::transactions::TransactionSender;

/// microALGO given to the account that deploys and calls the contract.
pub const TEST_ACCOUNT_FUNDING: u64 = 10_000_000;

/// The contract's notion of a year.
pub const SECONDS_PER_YEAR: u64 = 60 * 60 * 24 * 365;

/// The current calendar year, UTC.
///
/// UTC rather than local time: the contract derives its year from the block's Unix
/// timestamp, which has no time zone.
pub fn current_year() -> u64 {
    u64::try_from(Utc::now().year()).unwrap_or_default()
}

fn now_unix_seconds() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or_default()
}

/// A deployed and called hello world application, along with the accounts involved.
pub struct HelloWorldFixture {
    pub algod: Arc<AlgodClient>,
    pub sender: TransactionSender,
    pub funder: SigningAccount,
    pub test_account: SigningAccount,
    pub app_id: u64,
    /// Global state written by the real call.
    pub state: ReadableGlobalState,
    /// Global state the same call produces when dry run one year from now.
    pub next_year_state: ReadableGlobalState,
}

impl HelloWorldFixture {
    #[cfg(feature = "default_http_client")]
    pub async fn setup(config: &SandboxConfig) -> Result<Self> {
        let algod = Arc::new(config.algod_client()?);
        let kmd = Arc::new(config.kmd_client()?);
        Self::setup_with_clients(config, algod, kmd).await
    }

    /// Funds a fresh account, deploys the contract from it, dry runs a call one year ahead,
    /// then makes the real call.
    pub async fn setup_with_clients(
        config: &SandboxConfig,
        algod: Arc<AlgodClient>,
        kmd: Arc<KmdClient>,
    ) -> Result<Self> {
        let provider = KmdAccountProvider::new(kmd, &config.wallet_name, &config.wallet_password);
        let sender = TransactionSender::new(algod.clone());
        let compiler = ProgramCompiler::new(algod.clone());

        let funder = provider.get_funder().await?;
        info!("Using funder {}", funder.address());

        // A fresh creator keeps the funder clear of the per-account application limit
        let test_account = SigningAccount::generate();
        sender
            .fund_account(&funder, &test_account.address(), TEST_ACCOUNT_FUNDING)
            .await?;

        let approval = compiler.compile_file(&config.approval_program_path).await?;
        let clear = compiler.compile_file(&config.clear_program_path).await?;
        let app_id = sender.create_app(&test_account, approval, clear).await?.app_id;

        let app_call = sender.app_call_transaction(&test_account, app_id).await?;

        let next_year = now_unix_seconds() + SECONDS_PER_YEAR;
        info!("Dry running call to {} at timestamp {}", app_id, next_year);
        let dry_run = sender.dry_run(&app_call, next_year).await?;
        let next_year_state = readable_global_state(&dry_run.global_delta.unwrap_or_default())?;

        let confirmation = sender.submit(&app_call).await?;
        let state = readable_global_state(&confirmation.global_state_delta.unwrap_or_default())?;
        info!("Called application {}", app_id);

        Ok(HelloWorldFixture {
            algod,
            sender,
            funder,
            test_account,
            app_id,
            state,
            next_year_state,
        })
    }

    /// Deletes the application and closes the test account, returning its remaining balance
    /// to the funder.
    pub async fn teardown(&self) -> Result<PendingTransactionResponse> {
        self.sender
            .delete_app(&self.test_account, self.app_id)
            .await?;
        self.sender
            .close_account(&self.test_account, &self.funder.address())
            .await
    }
}
