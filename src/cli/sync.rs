use chia::protocol::Bytes32;
use chia_wallet_sdk::coinset::ChiaRpcClient;
use clvmr::Allocator;
use tracing::debug;

use crate::ReaiNft;

use super::{CliError, RpcClient};

/// Follows the singleton from its launcher to the latest (unspent) reai NFT coin.
///
/// Every coin derived from a parent spend must show up among that parent's
/// children on chain; otherwise the lineage is broken.
pub async fn sync_reai_nft(client: &RpcClient, launcher_id: Bytes32) -> Result<ReaiNft, CliError> {
    let mut allocator = Allocator::new();

    let Some(launcher_record) = client
        .get_coin_record_by_name(launcher_id)
        .await?
        .coin_record
    else {
        return Err(CliError::CoinNotFound(launcher_id));
    };
    if !launcher_record.spent {
        return Err(CliError::CoinNotSpent(launcher_id));
    }

    let mut parent_id = launcher_id;
    let mut spent_block_index = launcher_record.spent_block_index;
    loop {
        let Some(parent_spend) = client
            .get_puzzle_and_solution(parent_id, Some(spent_block_index))
            .await?
            .coin_solution
        else {
            return Err(CliError::CoinNotSpent(parent_id));
        };

        let nft = ReaiNft::from_parent_spend(&mut allocator, &parent_spend)?
            .ok_or(CliError::NotReaiNft(parent_id))?;
        let coin_id = nft.coin.coin_id();

        let children = client
            .get_coin_records_by_parent_ids(vec![parent_id], None, None, Some(true))
            .await?
            .coin_records
            .unwrap_or_default();
        let Some(record) = children.into_iter().find(|record| record.coin == nft.coin) else {
            return Err(CliError::CoinNotFound(coin_id));
        };

        if !record.spent {
            debug!(
                "latest reai NFT coin is 0x{} (version {})",
                hex::encode(coin_id),
                nft.info.version
            );
            return Ok(nft);
        }

        parent_id = coin_id;
        spent_block_index = record.spent_block_index;
    }
}
