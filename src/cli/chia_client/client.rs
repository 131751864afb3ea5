use std::path::Path;

use chia_wallet_sdk::coinset::ChiaRpcClient;
use reqwest::{Client, Identity};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to load certificate: {0}")]
    CertificateError(String),
    #[error("Request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("RPC error: {0}")]
    Rpc(String),
}

/// JSON-over-HTTP(S) client for a single Chia service (full node, wallet).
///
/// Full node endpoints come from [`ChiaRpcClient`]; the wallet uses [`RpcClient::call`].
#[derive(Debug, Clone)]
pub struct RpcClient {
    base_url: String,
    client: Client,
}

impl RpcClient {
    pub fn new(base_url: &str, identity: Option<Identity>) -> Result<Self, ClientError> {
        let mut builder = Client::builder()
            .use_rustls_tls()
            .danger_accept_invalid_certs(true);
        if let Some(identity) = identity {
            builder = builder.identity(identity);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    /// Authenticates with the service's private certificate and key, like the
    /// Chia daemon does.
    pub fn with_certificate(
        base_url: &str,
        cert_file: &Path,
        key_file: &Path,
    ) -> Result<Self, ClientError> {
        let cert = std::fs::read(cert_file).map_err(|e| {
            ClientError::CertificateError(format!("{}: {}", cert_file.display(), e))
        })?;
        let key = std::fs::read(key_file).map_err(|e| {
            ClientError::CertificateError(format!("{}: {}", key_file.display(), e))
        })?;

        let identity = Identity::from_pem(&[cert, key].concat())
            .map_err(|e| ClientError::CertificateError(e.to_string()))?;

        Self::new(base_url, Some(identity))
    }

    /// Like `make_post_request`, but a response with `"success": false` becomes
    /// [`ClientError::Rpc`].
    pub async fn call<B, R>(&self, endpoint: &str, body: B) -> Result<R, ClientError>
    where
        B: Serialize + Send,
        R: DeserializeOwned,
    {
        let response_body: Value = self.make_post_request(endpoint, body).await?;
        if response_body.get("success").and_then(Value::as_bool) != Some(true) {
            let error = response_body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(ClientError::Rpc(error));
        }

        serde_json::from_value(response_body)
            .map_err(|e| ClientError::InvalidResponse(format!("{endpoint}: {e}")))
    }
}

impl ChiaRpcClient for RpcClient {
    type Error = ClientError;

    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn make_post_request<R, B>(&self, endpoint: &str, body: B) -> Result<R, Self::Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("POST {}", url);

        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::InvalidResponse(format!(
                "Status: {}, Body: {:?}",
                response.status(),
                response.text().await?
            )));
        }

        Ok(response.json::<R>().await?)
    }
}
