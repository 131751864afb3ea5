mod chia_client;
mod coins;
mod commands;
mod config;
mod nft;
mod sync;
mod utils;
mod wallet;

pub use chia_client::*;
pub use coins::*;
pub use commands::*;
pub use config::*;
pub use nft::*;
pub use sync::*;
pub use utils::*;
pub use wallet::*;
