use chia::{
    bls::{self, PublicKey},
    consensus::consensus_constants::ConsensusConstants,
    protocol::Bytes32,
};
use chia_wallet_sdk::{
    driver::DriverError,
    types::{MAINNET_CONSTANTS, TESTNET11_CONSTANTS},
    utils::AddressError,
};
use hex::FromHex;
use thiserror::Error;

use super::ClientError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("driver: {0}")]
    Driver(#[from] DriverError),

    #[error("address: {0}")]
    Address(#[from] AddressError),

    #[error("couldn't parse hex: {0}")]
    ParseHex(#[from] hex::FromHexError),

    #[error("invalid public key (or other BLS object): {0}")]
    InvalidPublicKey(#[from] bls::Error),

    #[error("home directory not found")]
    HomeDirectoryNotFound,

    #[error("config: {0}")]
    Config(String),

    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("client error: {0}")]
    Client(#[from] ClientError),

    #[error("launcher id must start with 0x and be 66 characters long, got '{0}'")]
    InvalidLauncherId(String),

    #[error("no keys found in the wallet")]
    NoFingerprints,

    #[error("couldn't log in with fingerprint {0}")]
    LoginFailed(u32),

    #[error("the wallet has no wallets")]
    NoWallets,

    #[error("coin not found: 0x{}", hex::encode(.0))]
    CoinNotFound(Bytes32),

    #[error("coin not spent: 0x{}", hex::encode(.0))]
    CoinNotSpent(Bytes32),

    #[error("not a reai NFT: 0x{}", hex::encode(.0))]
    NotReaiNft(Bytes32),

    #[error("this wallet doesn't own the reai NFT")]
    NotOwner,

    #[error("the reai NFT is frozen")]
    Frozen,

    #[error("index {index} is out of range ({len} pairs)")]
    InvalidIndex { index: usize, len: usize },

    #[error("no coin can cover a fee of {0} mojos")]
    NoFeeCoin(u64),

    #[error("no usable coin holds at least {0} mojos")]
    InsufficientFunds(u64),
}

pub fn get_prefix(testnet11: bool) -> String {
    if testnet11 {
        "txch".to_string()
    } else {
        "xch".to_string()
    }
}

pub fn get_constants(testnet11: bool) -> &'static ConsensusConstants {
    if testnet11 {
        &TESTNET11_CONSTANTS
    } else {
        &MAINNET_CONSTANTS
    }
}

/// Launcher ids are given as `0x`-prefixed, 64-digit hex strings.
pub fn parse_launcher_id(launcher_id: &str) -> Result<Bytes32, CliError> {
    if !launcher_id.starts_with("0x") || launcher_id.len() != 66 {
        return Err(CliError::InvalidLauncherId(launcher_id.to_string()));
    }

    hex_string_to_bytes32(launcher_id)
}

pub fn hex_string_to_bytes32(hex: &str) -> Result<Bytes32, CliError> {
    let bytes = <[u8; 32]>::from_hex(hex.trim_start_matches("0x")).map_err(CliError::ParseHex)?;
    Ok(Bytes32::from(bytes))
}

pub fn hex_string_to_pubkey(hex: &str) -> Result<PublicKey, CliError> {
    let bytes = <[u8; 48]>::from_hex(hex.trim_start_matches("0x")).map_err(CliError::ParseHex)?;
    PublicKey::from_bytes(&bytes).map_err(CliError::InvalidPublicKey)
}
