use std::collections::HashMap;

use chia::{
    bls::{sign, PublicKey, SecretKey, Signature},
    consensus::consensus_constants::ConsensusConstants,
    protocol::{Coin, CoinSpend},
    puzzles::{EveProof, Proof},
};
use chia_puzzle_types::Memos;
use chia_wallet_sdk::{
    driver::{DriverError, Launcher, SpendContext, StandardLayer},
    signer::{AggSigConstants, RequiredSignature},
    types::Conditions,
};
use clvmr::Allocator;

use crate::{ReaiNft, ReaiNftInfo, ReaiNftLaunchHint};

fn custom_err<T>(e: T) -> DriverError
where
    T: ToString,
{
    DriverError::Custom(e.to_string())
}

/// Spends `coin` to launch a reai NFT owned by `owner`. The remainder of the coin
/// (minus the launcher mojo and `fee`) goes back to the coin's puzzle hash.
pub fn mint_reai_nft(
    ctx: &mut SpendContext,
    p2: &StandardLayer,
    coin: Coin,
    owner: PublicKey,
    fee: u64,
) -> Result<ReaiNft, DriverError> {
    let Some(change) = coin.amount.checked_sub(1).and_then(|a| a.checked_sub(fee)) else {
        return Err(DriverError::Custom(format!(
            "Insufficient funds: coin has {} mojos, need {}",
            coin.amount,
            fee.saturating_add(1)
        )));
    };

    let launcher = Launcher::new(coin.coin_id(), 1);
    let info = ReaiNftInfo::eve(launcher.coin().coin_id(), owner);

    let (mut conditions, eve_coin) = launcher.spend(
        ctx,
        info.inner_puzzle_hash().into(),
        ReaiNftLaunchHint { owner },
    )?;

    if change > 0 {
        conditions = conditions.create_coin(coin.puzzle_hash, change, Memos::None);
    }
    if fee > 0 {
        conditions = conditions.reserve_fee(fee);
    }
    p2.spend(ctx, coin, conditions)?;

    Ok(ReaiNft::new(
        eve_coin,
        Proof::Eve(EveProof {
            parent_parent_coin_info: coin.coin_id(),
            parent_amount: 1,
        }),
        info,
    ))
}

/// Launches one reai NFT per coin. The fee is paid by the first coin that can cover it.
pub fn mint_reai_nfts(
    ctx: &mut SpendContext,
    p2: &StandardLayer,
    coins: &[Coin],
    owner: PublicKey,
    fee: u64,
) -> Result<Vec<ReaiNft>, DriverError> {
    let fee_payer = if fee > 0 {
        coins
            .iter()
            .position(|coin| coin.amount > fee)
            .ok_or_else(|| custom_err("No coin can cover the fee"))?
    } else {
        0
    };

    coins
        .iter()
        .enumerate()
        .map(|(i, coin)| {
            let coin_fee = if i == fee_payer { fee } else { 0 };
            mint_reai_nft(ctx, p2, *coin, owner, coin_fee)
        })
        .collect()
}

/// Most coins a single split may create. Keeps the spend well under the block
/// cost limit.
pub const MAX_SPLIT_COINS: u64 = 500;

/// Amounts of the `k` coins a coin of `total` mojos splits into, after `fee`.
///
/// All amounts are distinct so the outputs (same parent, same puzzle hash) get
/// distinct coin ids.
pub fn split_amounts(total: u64, k: u64, fee: u64) -> Option<Vec<u64>> {
    if k == 0 || k > MAX_SPLIT_COINS || total <= k.checked_add(fee)? {
        return None;
    }

    let spendable = total - fee;
    let per = spendable / k;
    if per <= k {
        return None;
    }

    let mut amounts: Vec<u64> = (0..k - 1).map(|x| per - k + x).collect();
    let allocated: u64 = amounts.iter().sum();
    amounts.push(spendable - allocated);

    Some(amounts)
}

pub fn split_coin(
    ctx: &mut SpendContext,
    p2: &StandardLayer,
    coin: Coin,
    k: u64,
    fee: u64,
) -> Result<Vec<Coin>, DriverError> {
    let Some(amounts) = split_amounts(coin.amount, k, fee) else {
        return Err(DriverError::Custom(format!(
            "Can't split {} mojos into {} coins with a fee of {}",
            coin.amount, k, fee
        )));
    };

    let mut conditions = Conditions::new();
    for amount in &amounts {
        conditions = conditions.create_coin(coin.puzzle_hash, *amount, Memos::None);
    }
    if fee > 0 {
        conditions = conditions.reserve_fee(fee);
    }
    p2.spend(ctx, coin, conditions)?;

    Ok(amounts
        .into_iter()
        .map(|amount| Coin::new(coin.coin_id(), coin.puzzle_hash, amount))
        .collect())
}

/// Spends `coin` back to itself minus `fee`, reserving the fee.
pub fn spend_fee_coin(
    ctx: &mut SpendContext,
    p2: &StandardLayer,
    coin: Coin,
    fee: u64,
) -> Result<(), DriverError> {
    let Some(change) = coin.amount.checked_sub(fee) else {
        return Err(DriverError::Custom(format!(
            "Insufficient funds: coin has {} mojos, fee is {}",
            coin.amount, fee
        )));
    };

    let mut conditions = Conditions::new().reserve_fee(fee);
    if change > 0 {
        conditions = conditions.create_coin(coin.puzzle_hash, change, Memos::None);
    }

    p2.spend(ctx, coin, conditions)
}

/// Aggregates the BLS signatures `coin_spends` require. Every required public key
/// must belong to one of `secret_keys`.
pub fn sign_coin_spends(
    coin_spends: &[CoinSpend],
    secret_keys: &[SecretKey],
    constants: &ConsensusConstants,
) -> Result<Signature, DriverError> {
    let mut allocator = Allocator::new();
    let required = RequiredSignature::from_coin_spends(
        &mut allocator,
        coin_spends,
        &AggSigConstants::from(constants),
    )
    .map_err(custom_err)?;

    let keys: HashMap<PublicKey, &SecretKey> = secret_keys
        .iter()
        .map(|sk| (sk.public_key(), sk))
        .collect();

    let mut signature = Signature::default();
    for required in required {
        let RequiredSignature::Bls(required) = required else {
            return Err(custom_err("Only BLS signatures are supported"));
        };

        let Some(sk) = keys.get(&required.public_key) else {
            return Err(DriverError::Custom(format!(
                "Missing secret key for public key {}",
                hex::encode(required.public_key.to_bytes())
            )));
        };

        signature = signature + &sign(sk, required.message());
    }

    Ok(signature)
}

/// Picks `k` coins to launch reai NFTs from, largest first.
pub fn select_coins_for_mint(coins: &[Coin], k: usize) -> Option<Vec<Coin>> {
    let mut candidates: Vec<Coin> = coins.iter().copied().filter(|c| c.amount > 0).collect();
    if candidates.len() < k {
        return None;
    }

    candidates.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.coin_id().cmp(&b.coin_id()))
    });
    candidates.truncate(k);

    Some(candidates)
}
