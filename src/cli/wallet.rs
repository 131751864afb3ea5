use chia::{
    bls::{PublicKey, SecretKey},
    consensus::consensus_constants::ConsensusConstants,
    protocol::{Bytes32, Coin, SpendBundle},
    puzzles::{standard::StandardArgs, DeriveSynthetic},
};
use chia_wallet_sdk::{
    coinset::ChiaRpcClient,
    driver::{SpendContext, StandardLayer},
    utils::Address,
};
use tracing::{debug, info, warn};

use crate::{
    mint_reai_nft, mint_reai_nfts, select_coins_for_mint, sign_coin_spends, spend_fee_coin,
    split_amounts, split_coin, ReaiNft, ReaiNftInfo, ReaiPair,
};

use super::{
    get_constants, get_prefix, sync_reai_nft, ChiaConfig, CliError, ClientError, RpcClient,
    WalletClient,
};

/// Derivation path of the first hardened wallet key: `m/12381/8444/2/0`.
pub fn master_sk_to_wallet_sk(master_sk: &SecretKey, index: u32) -> SecretKey {
    master_sk
        .derive_hardened(12381)
        .derive_hardened(8444)
        .derive_hardened(2)
        .derive_hardened(index)
}

/// A logged in Chia wallet key, able to mint and update reai NFTs.
pub struct ReaiWallet {
    pub node: RpcClient,
    pub fingerprint: u32,
    pub wallet_id: u32,

    wallet_sk: SecretKey,
    synthetic_sk: SecretKey,
    pub owner: PublicKey,
    pub p2: StandardLayer,
    pub puzzle_hash: Bytes32,
    pub address: String,

    constants: &'static ConsensusConstants,
}

impl ReaiWallet {
    pub fn new(
        node: RpcClient,
        fingerprint: u32,
        wallet_id: u32,
        master_sk: &SecretKey,
        testnet11: bool,
    ) -> Result<Self, CliError> {
        let wallet_sk = master_sk_to_wallet_sk(master_sk, 0);
        let synthetic_sk = wallet_sk.derive_synthetic();
        let synthetic_pk = synthetic_sk.public_key();

        let puzzle_hash: Bytes32 = StandardArgs::curry_tree_hash(synthetic_pk).into();
        let address = Address::new(puzzle_hash, get_prefix(testnet11)).encode()?;

        Ok(Self {
            node,
            fingerprint,
            wallet_id,
            owner: wallet_sk.public_key(),
            wallet_sk,
            synthetic_sk,
            p2: StandardLayer::new(synthetic_pk),
            puzzle_hash,
            address,
            constants: get_constants(testnet11),
        })
    }

    /// Logs into `fingerprint` (or the wallet's first key) and derives the wallet keys.
    pub async fn login(
        node: RpcClient,
        wallet: &WalletClient,
        fingerprint: Option<u32>,
        testnet11: bool,
    ) -> Result<Self, CliError> {
        let fingerprint = match fingerprint {
            Some(fingerprint) => fingerprint,
            None => *wallet
                .get_public_keys()
                .await?
                .first()
                .ok_or(CliError::NoFingerprints)?,
        };

        let logged_in = wallet.log_in(fingerprint).await?;
        if logged_in != fingerprint {
            return Err(CliError::LoginFailed(fingerprint));
        }

        let private_key = wallet.get_private_key(fingerprint).await?;
        let wallets = wallet.get_wallets().await?;
        let wallet_id = wallets.first().ok_or(CliError::NoWallets)?.id;

        let wallet = Self::new(node, fingerprint, wallet_id, &private_key.sk, testnet11)?;
        info!(
            "logged in with fingerprint {}, address {}",
            fingerprint, wallet.address
        );

        Ok(wallet)
    }

    pub async fn connect(config: &ChiaConfig, fingerprint: Option<u32>) -> Result<Self, CliError> {
        let node = config.full_node_client()?;
        let wallet = config.wallet_client()?;

        match node.get_blockchain_state().await {
            Ok(response) => match response.blockchain_state {
                Some(state) => debug!("full node peak height: {}", state.peak.height),
                None => warn!("full node didn't report its blockchain state"),
            },
            Err(err) => warn!("couldn't get blockchain state: {}", err),
        }

        Self::login(node, &wallet, fingerprint, config.is_testnet()).await
    }

    /// Unspent coins with a non-zero amount at the wallet's puzzle hash.
    pub async fn usable_coins(&self) -> Result<Vec<Coin>, CliError> {
        let records = self
            .node
            .get_coin_records_by_puzzle_hash(self.puzzle_hash, None, None, Some(false))
            .await?
            .coin_records
            .unwrap_or_default();

        Ok(records
            .into_iter()
            .filter(|record| !record.spent && record.coin.amount > 0)
            .map(|record| record.coin)
            .collect())
    }

    pub async fn number_of_available_coins(&self) -> Result<usize, CliError> {
        Ok(self.usable_coins().await?.len())
    }

    async fn submit(&self, ctx: &mut SpendContext) -> Result<Bytes32, CliError> {
        let coin_spends = ctx.take();
        let signature = sign_coin_spends(
            &coin_spends,
            &[self.wallet_sk.clone(), self.synthetic_sk.clone()],
            self.constants,
        )?;

        let spend_bundle = SpendBundle::new(coin_spends, signature);
        let tx_id = spend_bundle.name();

        let response = self.node.push_tx(spend_bundle).await?;
        if !response.success {
            return Err(ClientError::Rpc(
                response
                    .error
                    .unwrap_or_else(|| "push_tx failed".to_string()),
            )
            .into());
        }
        info!("pushed spend bundle 0x{}: {}", hex::encode(tx_id), response.status);

        Ok(tx_id)
    }

    async fn add_fee(&self, ctx: &mut SpendContext, fee: u64) -> Result<(), CliError> {
        if fee == 0 {
            return Ok(());
        }

        let coin = self
            .usable_coins()
            .await?
            .into_iter()
            .find(|coin| coin.amount >= fee)
            .ok_or(CliError::NoFeeCoin(fee))?;
        debug!("paying fee with coin 0x{}", hex::encode(coin.coin_id()));

        spend_fee_coin(ctx, &self.p2, coin, fee)?;
        Ok(())
    }

    /// Returns the transaction id and the new NFT's launcher id.
    pub async fn mint(&self, fee: u64) -> Result<(Bytes32, Bytes32), CliError> {
        let coin = self
            .usable_coins()
            .await?
            .into_iter()
            .find(|coin| coin.amount > fee)
            .ok_or(CliError::InsufficientFunds(fee.saturating_add(1)))?;

        let ctx = &mut SpendContext::new();
        let nft = mint_reai_nft(ctx, &self.p2, coin, self.owner, fee)?;
        let tx_id = self.submit(ctx).await?;

        Ok((tx_id, nft.info.launcher_id))
    }

    /// Mints one NFT from each of `k` coins. `None` if the wallet has fewer coins.
    pub async fn mint_k(
        &self,
        fee: u64,
        k: usize,
    ) -> Result<Option<(Bytes32, Vec<Bytes32>)>, CliError> {
        let coins = self.usable_coins().await?;
        let Some(coins) = select_coins_for_mint(&coins, k) else {
            debug!("only {} usable coins, need {}", coins.len(), k);
            return Ok(None);
        };

        let ctx = &mut SpendContext::new();
        let nfts = mint_reai_nfts(ctx, &self.p2, &coins, self.owner, fee)?;
        let tx_id = self.submit(ctx).await?;

        Ok(Some((
            tx_id,
            nfts.into_iter().map(|nft| nft.info.launcher_id).collect(),
        )))
    }

    /// Splits the largest usable coin into `k` coins. `None` when there is no coin
    /// or the largest one is too small.
    pub async fn split_largest_coin_into_k(
        &self,
        k: u64,
        fee: u64,
    ) -> Result<Option<Bytes32>, CliError> {
        let Some(largest) = self
            .usable_coins()
            .await?
            .into_iter()
            .max_by_key(|coin| coin.amount)
        else {
            return Ok(None);
        };

        if split_amounts(largest.amount, k, fee).is_none() {
            debug!("largest coin ({} mojos) is too small to split", largest.amount);
            return Ok(None);
        }

        let ctx = &mut SpendContext::new();
        split_coin(ctx, &self.p2, largest, k, fee)?;

        Ok(Some(self.submit(ctx).await?))
    }

    async fn owned_nft(&self, launcher_id: Bytes32) -> Result<ReaiNft, CliError> {
        let nft = sync_reai_nft(&self.node, launcher_id).await?;
        if nft.info.owner != self.owner {
            return Err(CliError::NotOwner);
        }

        Ok(nft)
    }

    async fn mutable_nft(&self, launcher_id: Bytes32) -> Result<ReaiNft, CliError> {
        let nft = self.owned_nft(launcher_id).await?;
        if nft.info.is_frozen() {
            return Err(CliError::Frozen);
        }

        Ok(nft)
    }

    pub async fn add_pair(
        &self,
        launcher_id: Bytes32,
        key: &str,
        value: &str,
        fee: u64,
    ) -> Result<Bytes32, CliError> {
        let nft = self.mutable_nft(launcher_id).await?;

        let ctx = &mut SpendContext::new();
        let _child = nft.add_pair(
            ctx,
            ReaiPair::new(key.as_bytes().to_vec(), value.as_bytes().to_vec()),
        )?;
        self.add_fee(ctx, fee).await?;

        self.submit(ctx).await
    }

    pub async fn remove_pair_at(
        &self,
        launcher_id: Bytes32,
        index: usize,
        fee: u64,
    ) -> Result<Bytes32, CliError> {
        let nft = self.mutable_nft(launcher_id).await?;
        if index >= nft.info.data.len() {
            return Err(CliError::InvalidIndex {
                index,
                len: nft.info.data.len(),
            });
        }

        let ctx = &mut SpendContext::new();
        let _child = nft.remove_pair_at(ctx, index)?;
        self.add_fee(ctx, fee).await?;

        self.submit(ctx).await
    }

    pub async fn freeze(&self, launcher_id: Bytes32, fee: u64) -> Result<Bytes32, CliError> {
        let nft = self.mutable_nft(launcher_id).await?;

        let ctx = &mut SpendContext::new();
        let _child = nft.freeze(ctx)?;
        self.add_fee(ctx, fee).await?;

        self.submit(ctx).await
    }

    pub async fn set_ownership(
        &self,
        launcher_id: Bytes32,
        new_owner: PublicKey,
        fee: u64,
    ) -> Result<Bytes32, CliError> {
        let nft = self.owned_nft(launcher_id).await?;

        let ctx = &mut SpendContext::new();
        let _child = nft.transfer(ctx, new_owner)?;
        self.add_fee(ctx, fee).await?;

        self.submit(ctx).await
    }

    pub async fn get_data(&self, launcher_id: Bytes32) -> Result<ReaiNftInfo, CliError> {
        Ok(sync_reai_nft(&self.node, launcher_id).await?.info)
    }
}
