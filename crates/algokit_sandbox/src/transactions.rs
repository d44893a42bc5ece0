//! Building, signing, submitting and confirming the harness's transactions.
//!
//! Every transaction goes through the same steps: fetch suggested params, build a header,
//! let the caller fill in the type specific fields, assign the fee, sign. Submission then waits
//! a bounded number of rounds for confirmation.

use std::fmt::Display;
use std::sync::Arc;

use algod_client::AlgodClient;
use algod_client::models::{
    DryrunApplication, DryrunRequest, DryrunTxnResult, PendingTransactionResponse,
};
use algokit_transact::{
    Address, AlgoKitTransactError, AlgorandMsgpack, ApplicationCallTransactionBuilder, FeeParams,
    OnApplicationComplete, PaymentTransactionBuilder, SignedTransaction, StateSchema, Transaction,
    TransactionHeader, TransactionHeaderBuilder, TransactionId,
};
use log::{debug, info};

use crate::accounts::SigningAccount;
use crate::error::{Result, SandboxError};

/// Rounds to wait for a submitted transaction before giving up.
pub const DEFAULT_MAX_ROUNDS_TO_WAIT: u64 = 3;

/// How many rounds after the suggested first round a transaction stays valid.
pub const VALIDITY_WINDOW: u64 = 1000;

/// Global state of the hello world contract: `Year`, plus `Caller` and `Message`.
pub const HELLO_WORLD_GLOBAL_SCHEMA: StateSchema = StateSchema {
    num_uints: 1,
    num_byte_slices: 2,
};

/// A signed transaction ready to be sent.
#[derive(Debug, Clone)]
pub struct PreparedTransaction {
    pub tx_id: String,
    pub signed: SignedTransaction,
    /// The msgpack encoding of `signed`, as posted to algod.
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct AppCreateResult {
    pub app_id: u64,
    pub confirmation: PendingTransactionResponse,
}

/// Maps a builder failure (a required field left unset) into the harness error.
pub fn build_error(e: impl Display) -> SandboxError {
    SandboxError::Transact {
        source: AlgoKitTransactError::InputError {
            message: e.to_string(),
        },
    }
}

pub struct TransactionSender {
    algod: Arc<AlgodClient>,
    max_rounds_to_wait: u64,
}

impl TransactionSender {
    pub fn new(algod: Arc<AlgodClient>) -> Self {
        TransactionSender {
            algod,
            max_rounds_to_wait: DEFAULT_MAX_ROUNDS_TO_WAIT,
        }
    }

    pub fn with_max_rounds_to_wait(mut self, max_rounds_to_wait: u64) -> Self {
        self.max_rounds_to_wait = max_rounds_to_wait;
        self
    }

    /// Builds a transaction from fresh suggested params and signs it with `signer`.
    ///
    /// `build` receives a header for the signer's address and turns it into the transaction.
    pub async fn prepare<F>(&self, signer: &SigningAccount, build: F) -> Result<PreparedTransaction>
    where
        F: FnOnce(TransactionHeader) -> Result<Transaction>,
    {
        let params = self.algod.transaction_params().await?;

        let genesis_hash: [u8; 32] =
            params
                .genesis_hash
                .try_into()
                .map_err(|v: Vec<u8>| SandboxError::Transact {
                    source: AlgoKitTransactError::InputError {
                        message: format!("Genesis hash must be 32 bytes, got {} bytes", v.len()),
                    },
                })?;

        let header = TransactionHeaderBuilder::default()
            .sender(signer.address())
            .first_valid(params.last_round)
            .last_valid(params.last_round + VALIDITY_WINDOW)
            .genesis_id(params.genesis_id)
            .genesis_hash(genesis_hash)
            .build()
            .map_err(build_error)?;

        let transaction = build(header)?.assign_fee(FeeParams {
            fee_per_byte: params.fee,
            min_fee: params.min_fee,
        })?;

        let signed = signer.sign(&transaction)?;
        let tx_id = signed.id()?;
        let bytes = signed.encode()?;
        debug!("Prepared transaction {} from {}", tx_id, signer.address());

        Ok(PreparedTransaction {
            tx_id,
            signed,
            bytes,
        })
    }

    /// Sends a prepared transaction and waits for it to be confirmed.
    pub async fn submit(
        &self,
        prepared: &PreparedTransaction,
    ) -> Result<PendingTransactionResponse> {
        let response = self.algod.raw_transaction(prepared.bytes.clone()).await?;
        info!("Submitted transaction {}", response.tx_id);

        let confirmation = self
            .wait_for_confirmation(&response.tx_id, self.max_rounds_to_wait)
            .await?;
        info!(
            "Transaction {} confirmed in round {}",
            response.tx_id,
            confirmation.confirmed_round.unwrap_or_default()
        );
        Ok(confirmation)
    }

    /// Polls the pending transaction endpoint, one round at a time, until the transaction is
    /// confirmed, rejected from the pool, or `max_rounds` have passed.
    pub async fn wait_for_confirmation(
        &self,
        tx_id: &str,
        max_rounds: u64,
    ) -> Result<PendingTransactionResponse> {
        let status = self.algod.get_status().await?;

        let start_round = status.last_round + 1;
        let mut current_round = start_round;

        while current_round < start_round + max_rounds {
            match self.algod.pending_transaction_information(tx_id).await {
                Ok(response) => {
                    if !response.pool_error.is_empty() {
                        return Err(SandboxError::PoolError {
                            tx_id: tx_id.to_string(),
                            message: response.pool_error,
                        });
                    }

                    if response.confirmed_round.is_some_and(|round| round > 0) {
                        return Ok(response);
                    }
                }
                // Not in the pool yet
                Err(error) if error.is_not_found() => {
                    debug!("Transaction {} not found in round {}", tx_id, current_round);
                }
                Err(error) => return Err(error.into()),
            }

            self.algod.wait_for_block(current_round).await?;
            current_round += 1;
        }

        Err(SandboxError::ConfirmationTimeout {
            tx_id: tx_id.to_string(),
            rounds: max_rounds,
        })
    }

    pub async fn fund_account(
        &self,
        from: &SigningAccount,
        to: &Address,
        amount: u64,
    ) -> Result<PendingTransactionResponse> {
        let prepared = self
            .prepare(from, |header| {
                PaymentTransactionBuilder::default()
                    .header(header)
                    .receiver(to.clone())
                    .amount(amount)
                    .build()
                    .map_err(build_error)
            })
            .await?;

        info!("Funding {} with {} µALGO", to, amount);
        self.submit(&prepared).await
    }

    /// Sends the whole balance of `account` to `close_to` and closes it.
    pub async fn close_account(
        &self,
        account: &SigningAccount,
        close_to: &Address,
    ) -> Result<PendingTransactionResponse> {
        let address = account.address();
        let prepared = self
            .prepare(account, |header| {
                PaymentTransactionBuilder::default()
                    .header(header)
                    .receiver(address.clone())
                    .amount(0)
                    .close_remainder_to(close_to.clone())
                    .build()
                    .map_err(build_error)
            })
            .await?;

        info!("Closing {} to {}", address, close_to);
        self.submit(&prepared).await
    }

    /// Deploys the hello world contract from `creator`.
    pub async fn create_app(
        &self,
        creator: &SigningAccount,
        approval_program: Vec<u8>,
        clear_state_program: Vec<u8>,
    ) -> Result<AppCreateResult> {
        let prepared = self
            .prepare(creator, |header| {
                ApplicationCallTransactionBuilder::default()
                    .header(header)
                    .app_id(0)
                    .on_complete(OnApplicationComplete::NoOp)
                    .approval_program(approval_program)
                    .clear_state_program(clear_state_program)
                    .global_state_schema(HELLO_WORLD_GLOBAL_SCHEMA)
                    .local_state_schema(StateSchema::default())
                    .build()
                    .map_err(build_error)
            })
            .await?;

        let confirmation = self.submit(&prepared).await?;
        let app_id = confirmation
            .application_index
            .ok_or_else(|| SandboxError::MissingApplicationId {
                tx_id: prepared.tx_id.clone(),
            })?;
        info!("Created application {}", app_id);

        Ok(AppCreateResult {
            app_id,
            confirmation,
        })
    }

    /// Deletes `app_id`. Accounts that still hold created applications cannot be closed.
    pub async fn delete_app(
        &self,
        creator: &SigningAccount,
        app_id: u64,
    ) -> Result<PendingTransactionResponse> {
        let prepared = self
            .prepare(creator, |header| {
                ApplicationCallTransactionBuilder::default()
                    .header(header)
                    .app_id(app_id)
                    .on_complete(OnApplicationComplete::DeleteApplication)
                    .build()
                    .map_err(build_error)
            })
            .await?;

        info!("Deleting application {}", app_id);
        self.submit(&prepared).await
    }

    /// A signed NoOp call of `app_id`. It is not sent; pass it to [`TransactionSender::submit`]
    /// or [`TransactionSender::dry_run`].
    pub async fn app_call_transaction(
        &self,
        caller: &SigningAccount,
        app_id: u64,
    ) -> Result<PreparedTransaction> {
        self.prepare(caller, |header| {
            ApplicationCallTransactionBuilder::default()
                .header(header)
                .app_id(app_id)
                .on_complete(OnApplicationComplete::NoOp)
                .build()
                .map_err(build_error)
        })
        .await
    }

    /// Evaluates a prepared transaction against the current state of the application it
    /// calls, with `global LatestTimestamp` set to `latest_timestamp`.
    pub async fn dry_run(
        &self,
        prepared: &PreparedTransaction,
        latest_timestamp: u64,
    ) -> Result<DryrunTxnResult> {
        let mut apps = Vec::new();
        if let Transaction::ApplicationCall(call) = &prepared.signed.transaction {
            if call.app_id != 0 {
                let app = self.algod.get_application_by_id(call.app_id).await?;
                apps.push(DryrunApplication::from(app));
            }
        }

        let status = self.algod.get_status().await?;
        let txn = rmpv::decode::read_value(&mut prepared.bytes.as_slice())
            .map_err(AlgoKitTransactError::from)?;

        let request = DryrunRequest {
            apps,
            latest_timestamp,
            protocol_version: None,
            round: Some(status.last_round),
            txns: vec![txn],
        };
        debug!(
            "Dry running {} at timestamp {}",
            prepared.tx_id, latest_timestamp
        );

        let response = self.algod.teal_dryrun(&request).await?;
        if !response.error.is_empty() {
            return Err(SandboxError::DryRun {
                message: response.error,
            });
        }

        let result = response
            .txns
            .into_iter()
            .next()
            .ok_or_else(|| SandboxError::DryRun {
                message: "no transaction results returned".to_string(),
            })?;

        if !result.passed() {
            return Err(SandboxError::DryRun {
                message: result.app_call_messages.unwrap_or_default().join("; "),
            });
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algokit_http_client::HttpMethod;
    use algokit_http_client::test_utils::MockHttpClient;
    use pretty_assertions::assert_eq;

    const PARAMS: &str = r#"{
        "consensus-version": "future",
        "fee": 0,
        "genesis-hash": "R4ZGJ8m36vYb6qo6HwKKqb4ZRjP8IZNOCgdp42uJ2So=",
        "genesis-id": "dockernet-v1",
        "last-round": 20,
        "min-fee": 1000
    }"#;
    const STATUS: &str = r#"{"last-round": 20}"#;

    fn sender(mock: MockHttpClient) -> (TransactionSender, Arc<MockHttpClient>) {
        let mock = Arc::new(mock);
        (
            TransactionSender::new(Arc::new(AlgodClient::new(mock.clone()))),
            mock,
        )
    }

    fn with_rounds(mock: MockHttpClient, rounds: std::ops::Range<u64>) -> MockHttpClient {
        rounds.fold(mock, |mock, round| {
            mock.with_response(
                HttpMethod::Get,
                &format!("/v2/status/wait-for-block-after/{}", round),
                STATUS,
            )
        })
    }

    fn decode_sent(mock: &MockHttpClient) -> SignedTransaction {
        let sent = &mock.requests_to("/v2/transactions")[0];
        SignedTransaction::decode(sent.body.as_deref().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_prepare_uses_suggested_params() {
        let (sender, _) = sender(MockHttpClient::new().with_response(
            HttpMethod::Get,
            "/v2/transactions/params",
            PARAMS,
        ));
        let account = SigningAccount::generate();
        let receiver = SigningAccount::generate().address();

        let prepared = sender
            .prepare(&account, |header| {
                PaymentTransactionBuilder::default()
                    .header(header)
                    .receiver(receiver.clone())
                    .amount(5)
                    .build()
                    .map_err(build_error)
            })
            .await
            .unwrap();

        let header = prepared.signed.transaction.header();
        assert_eq!(header.sender, account.address());
        assert_eq!(header.first_valid, 20);
        assert_eq!(header.last_valid, 1020);
        assert_eq!(header.genesis_id.as_deref(), Some("dockernet-v1"));
        assert_eq!(header.fee, Some(1000));
        assert!(prepared.signed.signature.is_some());
        assert_eq!(prepared.tx_id, prepared.signed.transaction.id().unwrap());
        assert_eq!(
            SignedTransaction::decode(&prepared.bytes).unwrap(),
            prepared.signed
        );
    }

    #[tokio::test]
    async fn test_wait_for_confirmation_after_not_found() {
        let mock = MockHttpClient::new()
            .with_response(HttpMethod::Get, "/v2/status", STATUS)
            .with_status(HttpMethod::Get, "/v2/transactions/pending/TX1", 404, "txn does not exist")
            .with_response(
                HttpMethod::Get,
                "/v2/transactions/pending/TX1",
                r#"{"pool-error": ""}"#,
            )
            .with_response(
                HttpMethod::Get,
                "/v2/transactions/pending/TX1",
                r#"{"confirmed-round": 23, "pool-error": ""}"#,
            );
        let (sender, mock) = sender(with_rounds(mock, 21..24));

        let confirmation = sender.wait_for_confirmation("TX1", 3).await.unwrap();

        assert_eq!(confirmation.confirmed_round, Some(23));
        assert_eq!(mock.requests_to("/v2/transactions/pending/TX1").len(), 3);
        assert_eq!(
            mock.requests_to("/v2/status/wait-for-block-after/21").len(),
            1
        );
        assert_eq!(
            mock.requests_to("/v2/status/wait-for-block-after/22").len(),
            1
        );
    }

    #[tokio::test]
    async fn test_wait_for_confirmation_times_out() {
        let mock = MockHttpClient::new()
            .with_response(HttpMethod::Get, "/v2/status", STATUS)
            .with_response(
                HttpMethod::Get,
                "/v2/transactions/pending/TX2",
                r#"{"pool-error": ""}"#,
            );
        let (sender, mock) = sender(with_rounds(mock, 21..24));

        let result = sender.wait_for_confirmation("TX2", 3).await;

        assert!(matches!(
            result,
            Err(SandboxError::ConfirmationTimeout { tx_id, rounds: 3 }) if tx_id == "TX2"
        ));
        assert_eq!(mock.requests_to("/v2/transactions/pending/TX2").len(), 3);
    }

    #[tokio::test]
    async fn test_wait_for_confirmation_pool_error() {
        let (sender, _) = sender(
            MockHttpClient::new()
                .with_response(HttpMethod::Get, "/v2/status", STATUS)
                .with_response(
                    HttpMethod::Get,
                    "/v2/transactions/pending/TX3",
                    r#"{"pool-error": "overspend"}"#,
                ),
        );

        let result = sender.wait_for_confirmation("TX3", 3).await;

        assert!(matches!(
            result,
            Err(SandboxError::PoolError { message, .. }) if message == "overspend"
        ));
    }

    #[tokio::test]
    async fn test_wait_for_confirmation_propagates_other_errors() {
        let (sender, _) = sender(
            MockHttpClient::new()
                .with_response(HttpMethod::Get, "/v2/status", STATUS)
                .with_status(HttpMethod::Get, "/v2/transactions/pending/TX4", 401, "unauthorized"),
        );

        let result = sender.wait_for_confirmation("TX4", 3).await;

        assert!(matches!(result, Err(SandboxError::Algod { .. })));
    }

    fn submit_mock(tx_path: &str, confirmation: &str) -> MockHttpClient {
        MockHttpClient::new()
            .with_response(HttpMethod::Get, "/v2/transactions/params", PARAMS)
            .with_response(HttpMethod::Get, "/v2/status", STATUS)
            .with_response(HttpMethod::Post, "/v2/transactions", r#"{"txId": "TX"}"#)
            .with_response(HttpMethod::Get, tx_path, confirmation)
    }

    #[tokio::test]
    async fn test_close_account_sets_close_remainder_to() {
        let (sender, mock) = sender(submit_mock(
            "/v2/transactions/pending/TX",
            r#"{"confirmed-round": 21}"#,
        ));
        let account = SigningAccount::generate();
        let funder = SigningAccount::generate().address();

        sender.close_account(&account, &funder).await.unwrap();

        let Transaction::Payment(payment) = decode_sent(&mock).transaction else {
            panic!("expected a payment");
        };
        assert_eq!(payment.header.sender, account.address());
        assert_eq!(payment.receiver, account.address());
        assert_eq!(payment.amount, 0);
        assert_eq!(payment.close_remainder_to, Some(funder));
    }

    #[tokio::test]
    async fn test_fund_account() {
        let (sender, mock) = sender(submit_mock(
            "/v2/transactions/pending/TX",
            r#"{"confirmed-round": 21}"#,
        ));
        let funder = SigningAccount::generate();
        let receiver = SigningAccount::generate().address();

        sender
            .fund_account(&funder, &receiver, 10_000_000)
            .await
            .unwrap();

        let Transaction::Payment(payment) = decode_sent(&mock).transaction else {
            panic!("expected a payment");
        };
        assert_eq!(payment.receiver, receiver);
        assert_eq!(payment.amount, 10_000_000);
        assert_eq!(payment.close_remainder_to, None);
    }

    #[tokio::test]
    async fn test_create_app_returns_application_index() {
        let (sender, mock) = sender(submit_mock(
            "/v2/transactions/pending/TX",
            r#"{"confirmed-round": 21, "application-index": 1001}"#,
        ));
        let creator = SigningAccount::generate();

        let result = sender
            .create_app(&creator, vec![0x05, 0x81, 0x01, 0x43], vec![0x05, 0x81, 0x01, 0x43])
            .await
            .unwrap();

        assert_eq!(result.app_id, 1001);
        let Transaction::ApplicationCall(call) = decode_sent(&mock).transaction else {
            panic!("expected an application call");
        };
        assert_eq!(call.app_id, 0);
        assert_eq!(call.global_state_schema, Some(HELLO_WORLD_GLOBAL_SCHEMA));
        assert_eq!(call.local_state_schema, None);
        assert_eq!(call.approval_program, Some(vec![0x05, 0x81, 0x01, 0x43]));
    }

    #[tokio::test]
    async fn test_create_app_without_application_index() {
        let (sender, _) = sender(submit_mock(
            "/v2/transactions/pending/TX",
            r#"{"confirmed-round": 21}"#,
        ));

        let result = sender
            .create_app(&SigningAccount::generate(), vec![1], vec![1])
            .await;

        assert!(matches!(
            result,
            Err(SandboxError::MissingApplicationId { .. })
        ));
    }

    #[tokio::test]
    async fn test_app_call_transaction_is_not_sent() {
        let (sender, mock) = sender(MockHttpClient::new().with_response(
            HttpMethod::Get,
            "/v2/transactions/params",
            PARAMS,
        ));
        let caller = SigningAccount::generate();

        let prepared = sender.app_call_transaction(&caller, 1001).await.unwrap();

        let Transaction::ApplicationCall(call) = &prepared.signed.transaction else {
            panic!("expected an application call");
        };
        assert_eq!(call.app_id, 1001);
        assert_eq!(call.on_complete, OnApplicationComplete::NoOp);
        assert!(mock.requests_to("/v2/transactions").is_empty());
    }

    #[tokio::test]
    async fn test_delete_app() {
        let (sender, mock) = sender(submit_mock(
            "/v2/transactions/pending/TX",
            r#"{"confirmed-round": 21}"#,
        ));

        sender
            .delete_app(&SigningAccount::generate(), 1001)
            .await
            .unwrap();

        let Transaction::ApplicationCall(call) = decode_sent(&mock).transaction else {
            panic!("expected an application call");
        };
        assert_eq!(call.app_id, 1001);
        assert_eq!(call.on_complete, OnApplicationComplete::DeleteApplication);
    }

    fn dry_run_mock(response: &str) -> MockHttpClient {
        MockHttpClient::new()
            .with_response(HttpMethod::Get, "/v2/transactions/params", PARAMS)
            .with_response(HttpMethod::Get, "/v2/status", STATUS)
            .with_response(
                HttpMethod::Get,
                "/v2/applications/1001",
                r#"{
                    "id": 1001,
                    "params": {
                        "approval-program": "BYEBQw==",
                        "clear-state-program": "BYEBQw==",
                        "creator": "RIMARGKZU46OZ77OLPDHHPUJ7YBSHRTCYMQUC64KZCCMESQAFQMYU6SL2Q",
                        "global-state-schema": {"num-byte-slice": 2, "num-uint": 1}
                    }
                }"#,
            )
            .with_response(HttpMethod::Post, "/v2/teal/dryrun", response)
    }

    #[tokio::test]
    async fn test_dry_run_embeds_signed_transaction() {
        let (sender, mock) = sender(dry_run_mock(
            r#"{"error": "", "txns": [{"app-call-messages": ["PASS"], "global-delta": [
                {"key": "WWVhcg==", "value": {"action": 2, "uint": 2027}}
            ]}]}"#,
        ));
        let prepared = sender
            .app_call_transaction(&SigningAccount::generate(), 1001)
            .await
            .unwrap();

        let result = sender.dry_run(&prepared, 1_830_000_000).await.unwrap();

        assert_eq!(result.global_delta.unwrap()[0].value.uint, Some(2027));

        let body = mock.requests_to("/v2/teal/dryrun")[0].body.clone().unwrap();
        let request = rmpv::decode::read_value(&mut body.as_slice()).unwrap();
        let field = |name: &str| {
            request
                .as_map()
                .unwrap()
                .iter()
                .find(|(k, _)| k.as_str() == Some(name))
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(field("latest-timestamp").as_u64(), Some(1_830_000_000));
        assert_eq!(field("round").as_u64(), Some(20));
        assert_eq!(field("apps").as_array().unwrap().len(), 1);

        let mut txn_bytes = Vec::new();
        rmpv::encode::write_value(&mut txn_bytes, &field("txns").as_array().unwrap()[0]).unwrap();
        assert_eq!(txn_bytes, prepared.bytes);
    }

    #[tokio::test]
    async fn test_dry_run_rejection() {
        let (sender, _) = sender(dry_run_mock(
            r#"{"error": "", "txns": [{"app-call-messages": ["REJECT", "logic eval error"]}]}"#,
        ));
        let prepared = sender
            .app_call_transaction(&SigningAccount::generate(), 1001)
            .await
            .unwrap();

        let result = sender.dry_run(&prepared, 0).await;

        assert!(matches!(
            result,
            Err(SandboxError::DryRun { message }) if message.contains("REJECT")
        ));
    }
}
