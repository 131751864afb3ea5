use std::{
    fs,
    path::{Path, PathBuf},
};

use chia::consensus::consensus_constants::ConsensusConstants;
use serde::Deserialize;
use tracing::debug;

use super::{get_constants, get_prefix, CliError, RpcClient, WalletClient};

const DEFAULT_SELF_HOSTNAME: &str = "localhost";
const DEFAULT_FULL_NODE_RPC_PORT: u16 = 8555;
const DEFAULT_WALLET_RPC_PORT: u16 = 9256;

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct RawConfig {
    self_hostname: Option<String>,
    selected_network: Option<String>,
    full_node: RawServiceConfig,
    wallet: RawServiceConfig,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct RawServiceConfig {
    rpc_port: Option<u16>,
    ssl: RawSslConfig,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct RawSslConfig {
    private_crt: Option<String>,
    private_key: Option<String>,
}

/// RPC endpoint and client certificate of one local Chia service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub host: String,
    pub rpc_port: u16,
    pub cert_file: PathBuf,
    pub key_file: PathBuf,
}

impl ServiceConfig {
    fn from_raw(
        root: &Path,
        host: &str,
        service: &str,
        default_port: u16,
        raw: RawServiceConfig,
    ) -> Self {
        let cert = raw
            .ssl
            .private_crt
            .unwrap_or_else(|| format!("config/ssl/{service}/private_{service}.crt"));
        let key = raw
            .ssl
            .private_key
            .unwrap_or_else(|| format!("config/ssl/{service}/private_{service}.key"));

        Self {
            host: host.to_string(),
            rpc_port: raw.rpc_port.unwrap_or(default_port),
            cert_file: root.join(cert),
            key_file: root.join(key),
        }
    }

    pub fn url(&self) -> String {
        format!("https://{}:{}", self.host, self.rpc_port)
    }

    pub fn rpc_client(&self) -> Result<RpcClient, CliError> {
        Ok(RpcClient::with_certificate(&self.url(), &self.cert_file, &self.key_file)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChiaConfig {
    pub root: PathBuf,
    pub selected_network: String,
    pub full_node: ServiceConfig,
    pub wallet: ServiceConfig,
}

impl ChiaConfig {
    pub fn default_root() -> Result<PathBuf, CliError> {
        let home = dirs::home_dir().ok_or(CliError::HomeDirectoryNotFound)?;
        Ok(home.join(".chia").join("mainnet"))
    }

    /// Reads `config/config.yaml` under `root` (or the default Chia root).
    pub fn load(root: Option<PathBuf>) -> Result<Self, CliError> {
        let root = match root {
            Some(root) => root,
            None => Self::default_root()?,
        };

        let path = root.join("config").join("config.yaml");
        debug!("loading Chia config from {}", path.display());
        let contents = fs::read_to_string(&path)
            .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))?;

        Self::parse(root, &contents)
    }

    pub fn parse(root: PathBuf, contents: &str) -> Result<Self, CliError> {
        let raw: RawConfig = serde_yaml::from_str(contents)?;
        let host = raw
            .self_hostname
            .unwrap_or_else(|| DEFAULT_SELF_HOSTNAME.to_string());

        Ok(Self {
            selected_network: raw.selected_network.unwrap_or_else(|| "mainnet".to_string()),
            full_node: ServiceConfig::from_raw(
                &root,
                &host,
                "full_node",
                DEFAULT_FULL_NODE_RPC_PORT,
                raw.full_node,
            ),
            wallet: ServiceConfig::from_raw(
                &root,
                &host,
                "wallet",
                DEFAULT_WALLET_RPC_PORT,
                raw.wallet,
            ),
            root,
        })
    }

    pub fn is_testnet(&self) -> bool {
        self.selected_network != "mainnet"
    }

    pub fn address_prefix(&self) -> String {
        get_prefix(self.is_testnet())
    }

    pub fn constants(&self) -> &'static ConsensusConstants {
        get_constants(self.is_testnet())
    }

    pub fn full_node_client(&self) -> Result<RpcClient, CliError> {
        self.full_node.rpc_client()
    }

    pub fn wallet_client(&self) -> Result<WalletClient, CliError> {
        Ok(WalletClient::from_rpc(self.wallet.rpc_client()?))
    }
}
