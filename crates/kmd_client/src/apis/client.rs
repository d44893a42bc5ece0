use std::future::Future;
use std::sync::Arc;

use algokit_http_client::{HttpClient, HttpMethod};
use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::Error;
use crate::models::{
    ExportKeyRequest, ExportKeyResponse, InitWalletHandleTokenRequest,
    InitWalletHandleTokenResponse, ListKeysRequest, ListKeysResponse, ListWalletsResponse,
    ReleaseWalletHandleTokenRequest,
};

/// Client for the key management daemon.
///
/// Authentication lives in the [`HttpClient`], which is expected to send the
/// `X-KMD-API-Token` header on every request.
pub struct KmdClient {
    http_client: Arc<dyn HttpClient>,
}

impl KmdClient {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        KmdClient { http_client }
    }

    /// Lists all of the wallets that kmd is aware of.
    pub async fn list_wallets(&self) -> Result<ListWalletsResponse, Error> {
        let response = self
            .http_client
            .request(HttpMethod::Get, "/v1/wallets".to_string(), None, None, None)
            .await?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// Unlocks the wallet and returns a wallet handle token that can be used for subsequent
    /// operations.
    pub async fn init_wallet_handle_token(
        &self,
        request: InitWalletHandleTokenRequest,
    ) -> Result<InitWalletHandleTokenResponse, Error> {
        self.post("/v1/wallet/init", &request).await
    }

    /// Invalidates the passed wallet handle token.
    pub async fn release_wallet_handle_token(
        &self,
        request: ReleaseWalletHandleTokenRequest,
    ) -> Result<(), Error> {
        self.post::<_, serde_json::Value>("/v1/wallet/release", &request)
            .await?;
        Ok(())
    }

    /// Lists all of the public keys in this wallet.
    pub async fn list_keys_in_wallet(
        &self,
        request: ListKeysRequest,
    ) -> Result<ListKeysResponse, Error> {
        self.post("/v1/key/list", &request).await
    }

    /// Export the secret key associated with the passed public key.
    pub async fn export_key(&self, request: ExportKeyRequest) -> Result<ExportKeyResponse, Error> {
        self.post("/v1/key/export", &request).await
    }

    /// Runs `body` with a wallet handle token for `wallet_id` and releases the handle afterwards,
    /// whether or not `body` succeeded.
    ///
    /// An error from `body` takes precedence over an error releasing the handle.
    pub async fn with_wallet_handle<T, E, F, Fut>(
        &self,
        wallet_id: &str,
        wallet_password: &str,
        body: F,
    ) -> Result<T, E>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<Error>,
    {
        let wallet_handle_token = self
            .init_wallet_handle_token(InitWalletHandleTokenRequest {
                wallet_id: Some(wallet_id.to_string()),
                wallet_password: Some(wallet_password.to_string()),
            })
            .await?
            .wallet_handle_token
            .ok_or_else(|| Error::MissingField {
                field: "wallet_handle_token".to_string(),
            })?;
        debug!("Acquired handle for wallet {}", wallet_id);

        let result = body(wallet_handle_token.clone()).await;

        let released = self
            .release_wallet_handle_token(ReleaseWalletHandleTokenRequest {
                wallet_handle_token: Some(wallet_handle_token),
            })
            .await;

        match (result, released) {
            (Err(e), Err(release_error)) => {
                warn!(
                    "Failed to release handle for wallet {}: {}",
                    wallet_id, release_error
                );
                Err(e)
            }
            (Err(e), Ok(())) => Err(e),
            (Ok(_), Err(release_error)) => Err(release_error.into()),
            (Ok(value), Ok(())) => {
                debug!("Released handle for wallet {}", wallet_id);
                Ok(value)
            }
        }
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        request: &B,
    ) -> Result<T, Error> {
        let body = serde_json::to_vec(request)?;
        let response = self
            .http_client
            .request(HttpMethod::Post, path.to_string(), None, Some(body), None)
            .await?;
        Ok(serde_json::from_slice(&response.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algokit_http_client::test_utils::MockHttpClient;
    use pretty_assertions::assert_eq;

    const INIT_RESPONSE: &str = r#"{"wallet_handle_token": "handle-1"}"#;

    fn client(mock: MockHttpClient) -> (KmdClient, Arc<MockHttpClient>) {
        let mock = Arc::new(mock);
        (KmdClient::new(mock.clone()), mock)
    }

    fn body_json(body: &Option<Vec<u8>>) -> serde_json::Value {
        serde_json::from_slice(body.as_deref().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_list_wallets() {
        let (kmd, _) = client(MockHttpClient::new().with_response(
            HttpMethod::Get,
            "/v1/wallets",
            r#"{"wallets": [{"id": "w1", "name": "unencrypted-default-wallet", "driver_name": "sqlite"}]}"#,
        ));

        let wallets = kmd.list_wallets().await.unwrap().wallets.unwrap();

        assert_eq!(wallets.len(), 1);
        assert_eq!(wallets[0].name.as_deref(), Some("unencrypted-default-wallet"));
        assert_eq!(wallets[0].id.as_deref(), Some("w1"));
    }

    #[tokio::test]
    async fn test_export_key_decodes_private_key() {
        let (kmd, mock) = client(MockHttpClient::new().with_response(
            HttpMethod::Post,
            "/v1/key/export",
            r#"{"private_key": "AQID"}"#,
        ));

        let response = kmd
            .export_key(ExportKeyRequest {
                address: Some("ADDR".to_string()),
                wallet_handle_token: Some("handle-1".to_string()),
                wallet_password: Some(String::new()),
            })
            .await
            .unwrap();

        assert_eq!(response.private_key, Some(vec![1, 2, 3]));
        let sent = body_json(&mock.requests_to("/v1/key/export")[0].body);
        assert_eq!(sent["address"], "ADDR");
        assert_eq!(sent["wallet_handle_token"], "handle-1");
        assert_eq!(sent["wallet_password"], "");
    }

    #[tokio::test]
    async fn test_with_wallet_handle_releases_after_success() {
        let (kmd, mock) = client(
            MockHttpClient::new()
                .with_response(HttpMethod::Post, "/v1/wallet/init", INIT_RESPONSE)
                .with_response(HttpMethod::Post, "/v1/wallet/release", "{}"),
        );

        let result: Result<String, Error> = kmd
            .with_wallet_handle("w1", "", |handle| async move { Ok(handle) })
            .await;

        assert_eq!(result.unwrap(), "handle-1");
        let released = mock.requests_to("/v1/wallet/release");
        assert_eq!(released.len(), 1);
        assert_eq!(
            body_json(&released[0].body)["wallet_handle_token"],
            "handle-1"
        );
        let init = body_json(&mock.requests_to("/v1/wallet/init")[0].body);
        assert_eq!(init["wallet_id"], "w1");
        assert_eq!(init["wallet_password"], "");
    }

    #[tokio::test]
    async fn test_with_wallet_handle_releases_after_failure() {
        let (kmd, mock) = client(
            MockHttpClient::new()
                .with_response(HttpMethod::Post, "/v1/wallet/init", INIT_RESPONSE)
                .with_response(HttpMethod::Post, "/v1/wallet/release", "{}"),
        );

        let result: Result<(), Error> = kmd
            .with_wallet_handle("w1", "", |_| async {
                Err(Error::MissingField {
                    field: "addresses".to_string(),
                })
            })
            .await;

        assert!(matches!(result, Err(Error::MissingField { field }) if field == "addresses"));
        assert_eq!(mock.requests_to("/v1/wallet/release").len(), 1);
    }

    #[tokio::test]
    async fn test_body_error_wins_over_release_error() {
        let (kmd, _) = client(
            MockHttpClient::new()
                .with_response(HttpMethod::Post, "/v1/wallet/init", INIT_RESPONSE)
                .with_status(HttpMethod::Post, "/v1/wallet/release", 500, "boom"),
        );

        let result: Result<(), Error> = kmd
            .with_wallet_handle("w1", "", |_| async {
                Err(Error::Serde {
                    message: "bad key".to_string(),
                })
            })
            .await;

        assert!(matches!(result, Err(Error::Serde { .. })));
    }

    #[tokio::test]
    async fn test_release_error_surfaces_after_success() {
        let (kmd, _) = client(
            MockHttpClient::new()
                .with_response(HttpMethod::Post, "/v1/wallet/init", INIT_RESPONSE)
                .with_status(HttpMethod::Post, "/v1/wallet/release", 500, "boom"),
        );

        let result: Result<u8, Error> = kmd
            .with_wallet_handle("w1", "", |_| async { Ok(1) })
            .await;

        assert!(matches!(result, Err(Error::Http { .. })));
    }

    #[tokio::test]
    async fn test_missing_handle_token_skips_body() {
        let (kmd, mock) = client(MockHttpClient::new().with_response(
            HttpMethod::Post,
            "/v1/wallet/init",
            "{}",
        ));

        let result: Result<(), Error> = kmd
            .with_wallet_handle("w1", "", |_| async { Ok(()) })
            .await;

        assert!(matches!(result, Err(Error::MissingField { .. })));
        assert!(mock.requests_to("/v1/wallet/release").is_empty());
    }
}
