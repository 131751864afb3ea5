use chia::bls::SecretKey;
use serde::Deserialize;

use super::hex_string_to_secret_key;

#[derive(Deserialize, Debug)]
pub struct GetPublicKeysResponse {
    pub public_key_fingerprints: Vec<u32>,
}

#[derive(Deserialize, Debug)]
pub struct LogInResponse {
    pub fingerprint: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PrivateKeyRecord {
    pub fingerprint: u32,
    #[serde(with = "hex_string_to_secret_key")]
    pub sk: SecretKey,
}

#[derive(Deserialize, Debug)]
pub struct GetPrivateKeyResponse {
    pub private_key: PrivateKeyRecord,
}

#[derive(Deserialize, Debug, Clone)]
pub struct WalletRecord {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub wallet_type: u8,
}

#[derive(Deserialize, Debug)]
pub struct GetWalletsResponse {
    pub wallets: Vec<WalletRecord>,
}
