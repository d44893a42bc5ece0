use std::collections::HashMap;
use std::sync::Arc;

use algokit_http_client::{HttpClient, HttpMethod};
use serde::de::DeserializeOwned;

use super::Error;
use crate::models::{
    Account, Application, CompileResponse, DryrunRequest, DryrunResponse, NodeStatus,
    PendingTransactionResponse, RawTransactionResponse, TransactionParams,
};

/// The algod endpoints the sandbox harness talks to.
///
/// Authentication lives in the [`HttpClient`], which is expected to send the
/// `X-Algo-API-Token` header on every request.
pub struct AlgodClient {
    http_client: Arc<dyn HttpClient>,
}

impl AlgodClient {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        AlgodClient { http_client }
    }

    /// Get parameters for constructing a new transaction.
    pub async fn transaction_params(&self) -> Result<TransactionParams, Error> {
        self.get("/v2/transactions/params".to_string()).await
    }

    /// Compile TEAL source code to binary, producing its hash.
    pub async fn teal_compile(&self, source: &[u8]) -> Result<CompileResponse, Error> {
        self.post("/v2/teal/compile".to_string(), source.to_vec(), "text/plain")
            .await
    }

    /// Broadcasts a raw, msgpack encoded signed transaction to the network.
    pub async fn raw_transaction(
        &self,
        signed_transaction: Vec<u8>,
    ) -> Result<RawTransactionResponse, Error> {
        self.post(
            "/v2/transactions".to_string(),
            signed_transaction,
            "application/x-binary",
        )
        .await
    }

    /// Get a specific pending transaction. A 404 means the node has not seen it (yet).
    pub async fn pending_transaction_information(
        &self,
        tx_id: &str,
    ) -> Result<PendingTransactionResponse, Error> {
        self.get(format!("/v2/transactions/pending/{}", tx_id))
            .await
    }

    /// Gets the current node status.
    pub async fn get_status(&self) -> Result<NodeStatus, Error> {
        self.get("/v2/status".to_string()).await
    }

    /// Waits for a block to appear after the given round and returns the node status at that time.
    pub async fn wait_for_block(&self, round: u64) -> Result<NodeStatus, Error> {
        self.get(format!("/v2/status/wait-for-block-after/{}", round))
            .await
    }

    /// Get account information.
    pub async fn account_information(&self, address: &str) -> Result<Account, Error> {
        self.get(format!("/v2/accounts/{}", address)).await
    }

    /// Get application information.
    pub async fn get_application_by_id(&self, application_id: u64) -> Result<Application, Error> {
        self.get(format!("/v2/applications/{}", application_id))
            .await
    }

    /// Executes the request's transactions against the supplied ledger state without
    /// submitting them.
    pub async fn teal_dryrun(&self, request: &DryrunRequest) -> Result<DryrunResponse, Error> {
        let body = rmp_serde::to_vec_named(request)?;
        self.post("/v2/teal/dryrun".to_string(), body, "application/msgpack")
            .await
    }

    async fn get<T: DeserializeOwned>(&self, path: String) -> Result<T, Error> {
        let response = self
            .http_client
            .request(HttpMethod::Get, path, None, None, None)
            .await?;

        Ok(serde_json::from_slice(&response.body)?)
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: String,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<T, Error> {
        let headers = HashMap::from([("Content-Type".to_string(), content_type.to_string())]);
        let response = self
            .http_client
            .request(HttpMethod::Post, path, None, Some(body), Some(headers))
            .await?;

        Ok(serde_json::from_slice(&response.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DryrunApplication, DryrunApplicationParams};
    use algokit_http_client::test_utils::MockHttpClient;
    use pretty_assertions::assert_eq;

    fn client(mock: MockHttpClient) -> (AlgodClient, Arc<MockHttpClient>) {
        let mock = Arc::new(mock);
        (AlgodClient::new(mock.clone()), mock)
    }

    #[tokio::test]
    async fn test_transaction_params_decodes_genesis_hash() {
        let (algod, _) = client(MockHttpClient::new().with_response(
            HttpMethod::Get,
            "/v2/transactions/params",
            r#"{
                "consensus-version": "future",
                "fee": 0,
                "genesis-hash": "R4ZGJ8m36vYb6qo6HwKKqb4ZRjP8IZNOCgdp42uJ2So=",
                "genesis-id": "dockernet-v1",
                "last-round": 12,
                "min-fee": 1000
            }"#,
        ));

        let params = algod.transaction_params().await.unwrap();

        assert_eq!(params.genesis_id, "dockernet-v1");
        assert_eq!(params.genesis_hash.len(), 32);
        assert_eq!(params.last_round, 12);
        assert_eq!(params.min_fee, 1000);
    }

    #[tokio::test]
    async fn test_raw_transaction_posts_binary() {
        let (algod, mock) = client(MockHttpClient::new().with_response(
            HttpMethod::Post,
            "/v2/transactions",
            r#"{"txId": "6Y644M5SGTKNBH7ZX6D7QAAHDF6YL6FDJPRAGSUHNZLR4IKGVSPQ"}"#,
        ));

        let response = algod.raw_transaction(vec![0x82, 0xa3]).await.unwrap();

        assert_eq!(
            response.tx_id,
            "6Y644M5SGTKNBH7ZX6D7QAAHDF6YL6FDJPRAGSUHNZLR4IKGVSPQ"
        );
        let request = &mock.requests_to("/v2/transactions")[0];
        assert_eq!(request.body, Some(vec![0x82, 0xa3]));
        assert_eq!(request.headers["Content-Type"], "application/x-binary");
    }

    #[tokio::test]
    async fn test_pending_transaction_information() {
        let (algod, _) = client(MockHttpClient::new().with_response(
            HttpMethod::Get,
            "/v2/transactions/pending/TXID",
            r#"{
                "application-index": 1001,
                "confirmed-round": 15,
                "global-state-delta": [
                    {"key": "WWVhcg==", "value": {"action": 2, "uint": 2026}}
                ],
                "pool-error": "",
                "txn": {"sig": "AA==", "txn": {"close": "RIMARGKZU46OZ77OLPDHHPUJ7YBSHRTCYMQUC64KZCCMESQAFQMYU6SL2Q", "type": "pay"}}
            }"#,
        ));

        let pending = algod.pending_transaction_information("TXID").await.unwrap();

        assert_eq!(pending.application_index, Some(1001));
        assert_eq!(pending.confirmed_round, Some(15));
        let delta = pending.global_state_delta.unwrap();
        assert_eq!(delta[0].key, "WWVhcg==");
        assert_eq!(delta[0].value.uint, Some(2026));
        assert_eq!(delta[0].value.bytes, None);
        assert_eq!(
            pending.txn.unwrap()["txn"]["close"],
            "RIMARGKZU46OZ77OLPDHHPUJ7YBSHRTCYMQUC64KZCCMESQAFQMYU6SL2Q"
        );
    }

    #[tokio::test]
    async fn test_not_found_is_reported() {
        let (algod, _) = client(MockHttpClient::new());

        let error = algod
            .pending_transaction_information("UNKNOWN")
            .await
            .unwrap_err();

        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn test_malformed_body_is_serde_error() {
        let (algod, _) = client(MockHttpClient::new().with_response(
            HttpMethod::Get,
            "/v2/status",
            "not json",
        ));

        let error = algod.get_status().await.unwrap_err();

        assert!(matches!(error, Error::Serde { .. }));
        assert!(!error.is_not_found());
    }

    #[tokio::test]
    async fn test_teal_dryrun_sends_msgpack() {
        let (algod, mock) = client(MockHttpClient::new().with_response(
            HttpMethod::Post,
            "/v2/teal/dryrun",
            r##"{
                "error": "",
                "protocol-version": "future",
                "txns": [{
                    "app-call-messages": ["PASS"],
                    "disassembly": ["#pragma version 5"],
                    "global-delta": [
                        {"key": "TWVzc2FnZQ==", "value": {"action": 1, "bytes": "SGVsbG8gV29ybGQh"}}
                    ]
                }]
            }"##,
        ));

        let request = DryrunRequest {
            apps: vec![DryrunApplication {
                id: 1001,
                params: DryrunApplicationParams {
                    approval_program: vec![0x05, 0x81, 0x01, 0x43],
                    clear_state_program: vec![0x05, 0x81, 0x01, 0x43],
                    creator: "RIMARGKZU46OZ77OLPDHHPUJ7YBSHRTCYMQUC64KZCCMESQAFQMYU6SL2Q"
                        .to_string(),
                    ..Default::default()
                },
            }],
            latest_timestamp: 1_800_000_000,
            ..Default::default()
        };

        let response = algod.teal_dryrun(&request).await.unwrap();
        assert!(response.txns[0].passed());
        assert_eq!(
            response.txns[0].global_delta.as_ref().unwrap()[0].value.bytes,
            Some("SGVsbG8gV29ybGQh".to_string())
        );

        let sent = &mock.requests_to("/v2/teal/dryrun")[0];
        assert_eq!(sent.headers["Content-Type"], "application/msgpack");
        let decoded = rmpv::decode::read_value(&mut sent.body.as_deref().unwrap()).unwrap();
        let timestamp = decoded
            .as_map()
            .unwrap()
            .iter()
            .find(|(k, _)| k.as_str() == Some("latest-timestamp"))
            .map(|(_, v)| v.as_u64())
            .unwrap();
        assert_eq!(timestamp, Some(1_800_000_000));
    }

    #[tokio::test]
    async fn test_get_application_by_id_decodes_programs() {
        let (algod, _) = client(MockHttpClient::new().with_response(
            HttpMethod::Get,
            "/v2/applications/1001",
            r#"{
                "id": 1001,
                "params": {
                    "approval-program": "BYEBQw==",
                    "clear-state-program": "BYEBQw==",
                    "creator": "RIMARGKZU46OZ77OLPDHHPUJ7YBSHRTCYMQUC64KZCCMESQAFQMYU6SL2Q",
                    "global-state-schema": {"num-byte-slice": 2, "num-uint": 1},
                    "local-state-schema": {}
                }
            }"#,
        ));

        let app = algod.get_application_by_id(1001).await.unwrap();
        let dryrun_app = DryrunApplication::from(app);

        assert_eq!(dryrun_app.id, 1001);
        assert_eq!(dryrun_app.params.approval_program, vec![0x05, 0x81, 0x01, 0x43]);
        assert_eq!(
            dryrun_app.params.global_state_schema.unwrap().num_byte_slice,
            2
        );
    }
}
