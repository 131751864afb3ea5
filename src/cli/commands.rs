use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;

use crate::MAX_SPLIT_COINS;

use super::{
    coins_available, coins_split_largest, nft_add_pair, nft_change_owner, nft_freeze,
    nft_get_data, nft_mint, nft_mint_k, nft_remove_pair, ChiaConfig, CliError, ReaiWallet,
};

#[derive(Parser)]
#[command(
    name = "reai-nft",
    version,
    about = "Mint and update reai NFTs (versioned key/value singletons) using a local Chia node and wallet"
)]
struct Cli {
    /// Chia root directory (defaults to ~/.chia/mainnet)
    #[arg(long, env = "CHIA_ROOT", global = true)]
    config_path: Option<PathBuf>,

    /// Fingerprint of the wallet key to use (defaults to the first key)
    #[arg(long, global = true)]
    fingerprint: Option<u32>,

    /// Print debug output
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mint a new reai NFT
    Mint {
        /// Fee to use, in mojos
        #[arg(long, default_value_t = 0)]
        fee: u64,
    },
    /// Mint k reai NFTs in one transaction, one per coin
    Mk {
        /// Fee to use, in mojos
        #[arg(long, default_value_t = 0)]
        fee: u64,

        /// Number of NFTs to mint
        #[arg(short, default_value_t = 50)]
        k: usize,
    },
    /// Print the number of coins available for minting
    GetNumberOfAvailableCoins,
    /// Split the wallet's largest coin into k coins
    SplitLargestCoinIntoK {
        /// Number of coins to create
        #[arg(
            short,
            default_value_t = 10,
            value_parser = clap::value_parser!(u64).range(1..=MAX_SPLIT_COINS)
        )]
        k: u64,

        /// Fee to use, in mojos
        #[arg(long, default_value_t = 0)]
        fee: u64,
    },
    /// Add a key/value pair to a reai NFT
    AddPair {
        /// Launcher id of the NFT (0x-prefixed)
        launcher_id: String,

        /// Key to add
        key: String,

        /// Value to add
        value: String,

        /// Fee to use, in mojos
        #[arg(long, default_value_t = 0)]
        fee: u64,
    },
    /// Remove the key/value pair at a given index
    RemovePair {
        /// Launcher id of the NFT (0x-prefixed)
        launcher_id: String,

        /// Zero-based index of the pair, as shown by get-data
        index: usize,

        /// Fee to use, in mojos
        #[arg(long, default_value_t = 0)]
        fee: u64,
    },
    /// Freeze a reai NFT; its data can't change afterwards
    Freeze {
        /// Launcher id of the NFT (0x-prefixed)
        launcher_id: String,

        /// Fee to use, in mojos
        #[arg(long, default_value_t = 0)]
        fee: u64,
    },
    /// Transfer a reai NFT to a new owner public key
    ChangeOwner {
        /// Launcher id of the NFT (0x-prefixed)
        launcher_id: String,

        /// New owner's BLS public key (hex)
        new_pub_key: String,

        /// Fee to use, in mojos
        #[arg(long, default_value_t = 0)]
        fee: u64,
    },
    /// Print the latest version and data of a reai NFT as JSON
    GetData {
        /// Launcher id of the NFT (0x-prefixed)
        launcher_id: String,
    },
}

/// Global options shared by every command.
#[derive(Debug, Clone)]
pub struct WalletOptions {
    pub config_path: Option<PathBuf>,
    pub fingerprint: Option<u32>,
}

impl WalletOptions {
    pub fn config(&self) -> Result<ChiaConfig, CliError> {
        ChiaConfig::load(self.config_path.clone())
    }

    pub async fn connect(&self) -> Result<ReaiWallet, CliError> {
        ReaiWallet::connect(&self.config()?, self.fingerprint).await
    }
}

pub async fn run_cli() {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    let options = WalletOptions {
        config_path: args.config_path,
        fingerprint: args.fingerprint,
    };

    let res = match args.command {
        Commands::Mint { fee } => nft_mint(options, fee).await,
        Commands::Mk { fee, k } => nft_mint_k(options, fee, k).await,
        Commands::GetNumberOfAvailableCoins => coins_available(options).await,
        Commands::SplitLargestCoinIntoK { k, fee } => coins_split_largest(options, k, fee).await,
        Commands::AddPair {
            launcher_id,
            key,
            value,
            fee,
        } => nft_add_pair(options, launcher_id, key, value, fee).await,
        Commands::RemovePair {
            launcher_id,
            index,
            fee,
        } => nft_remove_pair(options, launcher_id, index, fee).await,
        Commands::Freeze { launcher_id, fee } => nft_freeze(options, launcher_id, fee).await,
        Commands::ChangeOwner {
            launcher_id,
            new_pub_key,
            fee,
        } => nft_change_owner(options, launcher_id, new_pub_key, fee).await,
        Commands::GetData { launcher_id } => nft_get_data(options, launcher_id).await,
    };

    if let Err(err) = res {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
