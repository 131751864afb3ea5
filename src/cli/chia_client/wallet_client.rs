use reqwest::Identity;
use serde_json::json;

use super::{
    ClientError, GetPrivateKeyResponse, GetPublicKeysResponse, GetWalletsResponse, LogInResponse,
    PrivateKeyRecord, RpcClient, WalletRecord,
};

#[derive(Debug, Clone)]
pub struct WalletClient {
    rpc: RpcClient,
}

impl WalletClient {
    pub fn new(base_url: &str, identity: Option<Identity>) -> Result<Self, ClientError> {
        Ok(Self {
            rpc: RpcClient::new(base_url, identity)?,
        })
    }

    pub fn from_rpc(rpc: RpcClient) -> Self {
        Self { rpc }
    }

    pub async fn get_public_keys(&self) -> Result<Vec<u32>, ClientError> {
        let response: GetPublicKeysResponse =
            self.rpc.call("get_public_keys", json!({})).await?;
        Ok(response.public_key_fingerprints)
    }

    pub async fn log_in(&self, fingerprint: u32) -> Result<u32, ClientError> {
        let response: LogInResponse = self
            .rpc
            .call("log_in", json!({ "fingerprint": fingerprint }))
            .await?;
        Ok(response.fingerprint)
    }

    pub async fn get_private_key(&self, fingerprint: u32) -> Result<PrivateKeyRecord, ClientError> {
        let response: GetPrivateKeyResponse = self
            .rpc
            .call("get_private_key", json!({ "fingerprint": fingerprint }))
            .await?;
        Ok(response.private_key)
    }

    pub async fn get_wallets(&self) -> Result<Vec<WalletRecord>, ClientError> {
        let response: GetWalletsResponse = self.rpc.call("get_wallets", json!({})).await?;
        Ok(response.wallets)
    }
}
