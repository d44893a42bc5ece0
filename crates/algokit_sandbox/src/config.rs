//! Connection settings for the sandbox node and its key management daemon.
//!
//! A [`SandboxConfig`] is built once and handed to every collaborator at construction time.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

#[cfg(feature = "default_http_client")]
use {
    algod_client::AlgodClient,
    algokit_http_client::{DefaultHttpClient, HttpClient},
    kmd_client::KmdClient,
    log::debug,
    std::sync::Arc,
};

use crate::error::{Result, SandboxError};

pub const DEFAULT_LOCALNET_SERVER: &str = "http://localhost";
pub const DEFAULT_ALGOD_PORT: u16 = 4001;
pub const DEFAULT_KMD_PORT: u16 = 4002;
pub const DEFAULT_LOCALNET_TOKEN: &str =
    "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
pub const DEFAULT_WALLET_NAME: &str = "unencrypted-default-wallet";

const ALGOD_TOKEN_HEADER: &str = "X-Algo-API-Token";
const KMD_TOKEN_HEADER: &str = "X-KMD-API-Token";

#[derive(Debug, Clone, PartialEq)]
pub enum TokenHeader {
    /// Sent under the service's default token header.
    String(String),
    /// A custom header name and value, e.g. for a proxy in front of the node.
    Headers(HashMap<String, String>),
}

/// Config for an algod or kmd client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the server e.g. http://localhost
    pub server: String,
    /// Optional port to use e.g. 4001
    pub port: Option<u16>,
    /// Optional token to use for API authentication
    pub token: Option<TokenHeader>,
}

impl ClientConfig {
    pub fn base_url(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{}", self.server.trim_end_matches('/'), port),
            None => self.server.clone(),
        }
    }

    /// Header name and value to authenticate with, if any.
    fn auth_header<'a>(&'a self, default_header: &'a str) -> Option<(&'a str, &'a str)> {
        match &self.token {
            Some(TokenHeader::String(token)) => Some((default_header, token.as_str())),
            Some(TokenHeader::Headers(headers)) => headers
                .iter()
                .next()
                .map(|(name, value)| (name.as_str(), value.as_str())),
            None => None,
        }
    }

    #[cfg(feature = "default_http_client")]
    fn http_client(&self, default_header: &str) -> Result<Arc<dyn HttpClient>> {
        let base_url = self.base_url();
        debug!("Connecting to {}", base_url);

        match self.auth_header(default_header) {
            Some((name, value)) => DefaultHttpClient::with_header(&base_url, name, value)
                .map(|client| Arc::new(client) as Arc<dyn HttpClient>)
                .map_err(|e| SandboxError::InvalidConfig {
                    message: e.to_string(),
                }),
            None => Ok(Arc::new(DefaultHttpClient::new(&base_url))),
        }
    }
}

/// Everything the harness needs to reach the sandbox and find its funding wallet.
#[derive(Debug, Clone, PartialEq)]
pub struct SandboxConfig {
    pub algod: ClientConfig,
    pub kmd: ClientConfig,
    pub wallet_name: String,
    pub wallet_password: String,
    pub approval_program_path: PathBuf,
    pub clear_program_path: PathBuf,
}

impl SandboxConfig {
    /// The defaults of a LocalNet sandbox.
    pub fn localnet() -> Self {
        let contracts = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("contracts");

        SandboxConfig {
            algod: ClientConfig {
                server: DEFAULT_LOCALNET_SERVER.to_string(),
                port: Some(DEFAULT_ALGOD_PORT),
                token: Some(TokenHeader::String(DEFAULT_LOCALNET_TOKEN.to_string())),
            },
            kmd: ClientConfig {
                server: DEFAULT_LOCALNET_SERVER.to_string(),
                port: Some(DEFAULT_KMD_PORT),
                token: Some(TokenHeader::String(DEFAULT_LOCALNET_TOKEN.to_string())),
            },
            wallet_name: DEFAULT_WALLET_NAME.to_string(),
            wallet_password: String::new(),
            approval_program_path: contracts.join("approval.teal"),
            clear_program_path: contracts.join("clear.teal"),
        }
    }

    /// LocalNet defaults overridden by `ALGOD_*`, `KMD_*` variables from the environment or a
    /// `.env` file.
    pub fn from_environment_or_localnet() -> Result<Self> {
        // A missing .env file is fine; the process environment still applies.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Applies overrides read through `lookup` on top of [`SandboxConfig::localnet`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::localnet();

        if let Some(server) = lookup("ALGOD_SERVER") {
            config.algod.server = server;
        }
        if let Some(port) = lookup("ALGOD_PORT") {
            config.algod.port = Some(parse_port("ALGOD_PORT", &port)?);
        }
        if let Some(token) = lookup("ALGOD_TOKEN") {
            config.algod.token = Some(TokenHeader::String(token));
        }
        if let Some(server) = lookup("KMD_SERVER") {
            config.kmd.server = server;
        }
        if let Some(port) = lookup("KMD_PORT") {
            config.kmd.port = Some(parse_port("KMD_PORT", &port)?);
        }
        if let Some(token) = lookup("KMD_TOKEN") {
            config.kmd.token = Some(TokenHeader::String(token));
        }
        if let Some(wallet) = lookup("KMD_WALLET") {
            config.wallet_name = wallet;
        }
        if let Some(password) = lookup("KMD_PASSWORD") {
            config.wallet_password = password;
        }

        Ok(config)
    }

    #[cfg(feature = "default_http_client")]
    pub fn algod_client(&self) -> Result<AlgodClient> {
        Ok(AlgodClient::new(self.algod.http_client(ALGOD_TOKEN_HEADER)?))
    }

    #[cfg(feature = "default_http_client")]
    pub fn kmd_client(&self) -> Result<KmdClient> {
        Ok(KmdClient::new(self.kmd.http_client(KMD_TOKEN_HEADER)?))
    }
}

fn parse_port(name: &str, value: &str) -> Result<u16> {
    value.trim().parse().map_err(|_| SandboxError::InvalidConfig {
        message: format!("{} must be a port number, got '{}'", name, value),
    })
}
