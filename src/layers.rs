mod reai_nft_layer;

pub use reai_nft_layer::*;
