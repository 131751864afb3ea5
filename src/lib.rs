use chia_wallet_sdk::driver::{DriverError, SpendContext};
use clvmr::NodePtr;

mod cli;
mod drivers;
mod layers;
mod primitives;

pub use cli::*;
pub use drivers::*;
pub use layers::*;
pub use primitives::*;

pub trait SpendContextExt {
    fn reai_nft_puzzle(&mut self) -> Result<NodePtr, DriverError>;
}

impl SpendContextExt for SpendContext {
    /// Allocate the reai NFT inner puzzle and return its pointer.
    fn reai_nft_puzzle(&mut self) -> Result<NodePtr, DriverError> {
        self.puzzle(REAI_NFT_PUZZLE_HASH, &REAI_NFT_PUZZLE)
    }
}
