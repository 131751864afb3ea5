mod reai_nft;
mod reai_nft_info;

pub use reai_nft::*;
pub use reai_nft_info::*;
