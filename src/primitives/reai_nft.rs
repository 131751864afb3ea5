use chia::{
    bls::PublicKey,
    protocol::{Bytes32, Coin, CoinSpend},
    puzzles::{
        singleton::{LauncherSolution, SingletonSolution},
        EveProof, LineageProof, Proof,
    },
};
use chia_puzzles::SINGLETON_LAUNCHER_HASH;
use chia_wallet_sdk::driver::{DriverError, Layer, Puzzle, Spend, SpendContext};
use clvm_traits::{FromClvm, ToClvm};
use clvmr::{Allocator, NodePtr};

use crate::{ReaiNftSolution, ReaiOperation, ReaiPair};

use super::{ReaiNftInfo, ReaiNftLaunchHint, ReaiNftLayers};

#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct ReaiNft {
    pub coin: Coin,
    pub proof: Proof,

    pub info: ReaiNftInfo,
}

impl ReaiNft {
    pub fn new(coin: Coin, proof: Proof, info: ReaiNftInfo) -> Self {
        Self { coin, proof, info }
    }

    pub fn after_mint(launcher_parent: Bytes32, info: ReaiNftInfo) -> Self {
        Self {
            coin: Coin::new(info.launcher_id, info.puzzle_hash().into(), 1),
            proof: Proof::Eve(EveProof {
                parent_parent_coin_info: launcher_parent,
                parent_amount: 1,
            }),
            info,
        }
    }

    pub fn from_launcher_spend(
        allocator: &mut Allocator,
        launcher_spend: &CoinSpend,
    ) -> Result<Option<Self>, DriverError> {
        if launcher_spend.coin.puzzle_hash != SINGLETON_LAUNCHER_HASH.into() {
            return Ok(None);
        }

        let solution = launcher_spend.solution.to_clvm(allocator)?;
        let solution = LauncherSolution::<NodePtr>::from_clvm(&*allocator, solution)?;

        let Ok(hint) = ReaiNftLaunchHint::from_clvm(&*allocator, solution.key_value_list) else {
            return Ok(None);
        };

        let nft = Self::after_mint(
            launcher_spend.coin.parent_coin_info,
            ReaiNftInfo::eve(launcher_spend.coin.coin_id(), hint.owner),
        );

        if launcher_spend.coin.amount != nft.coin.amount
            || solution.amount != nft.coin.amount
            || nft.coin.puzzle_hash != solution.singleton_puzzle_hash
        {
            return Ok(None);
        }

        Ok(Some(nft))
    }

    /// Rebuilds the NFT created by `parent_spend`, which may be the launcher spend
    /// or the spend of a previous reai singleton.
    pub fn from_parent_spend(
        allocator: &mut Allocator,
        parent_spend: &CoinSpend,
    ) -> Result<Option<Self>, DriverError> {
        if parent_spend.coin.puzzle_hash == SINGLETON_LAUNCHER_HASH.into() {
            return Self::from_launcher_spend(allocator, parent_spend);
        }

        let puzzle = parent_spend.puzzle_reveal.to_clvm(allocator)?;
        let puzzle = Puzzle::parse(allocator, puzzle);
        let Some(parent_layers) = ReaiNftLayers::parse_puzzle(allocator, puzzle)? else {
            return Ok(None);
        };

        let solution = parent_spend.solution.to_clvm(allocator)?;
        let solution = ReaiNftLayers::parse_solution(allocator, solution)?;

        let parent_info = ReaiNftInfo::from_layers(parent_layers);
        let child_info = parent_info.apply(allocator, &solution.inner_solution)?;

        let parent = Self::new(parent_spend.coin, solution.lineage_proof, parent_info);
        Ok(Some(parent.child(child_info)))
    }

    pub fn child_lineage_proof(&self) -> LineageProof {
        LineageProof {
            parent_parent_coin_info: self.coin.parent_coin_info,
            parent_inner_puzzle_hash: self.info.inner_puzzle_hash().into(),
            parent_amount: self.coin.amount,
        }
    }

    pub fn child(&self, child_info: ReaiNftInfo) -> Self {
        Self {
            coin: Coin::new(self.coin.coin_id(), child_info.puzzle_hash().into(), 1),
            proof: Proof::Lineage(self.child_lineage_proof()),
            info: child_info,
        }
    }

    /// Spends the NFT with `solution` and returns the NFT it creates.
    pub fn spend(
        self,
        ctx: &mut SpendContext,
        solution: ReaiNftSolution,
    ) -> Result<Self, DriverError> {
        let child = self.child(self.info.apply(ctx, &solution)?);

        let layers = self.info.into_layers();
        let puzzle = layers.construct_puzzle(ctx)?;
        let solution = layers.construct_solution(
            ctx,
            SingletonSolution {
                lineage_proof: self.proof,
                amount: self.coin.amount,
                inner_solution: solution,
            },
        )?;

        ctx.spend(self.coin, Spend::new(puzzle, solution))?;

        Ok(child)
    }

    fn mutate(self, ctx: &mut SpendContext, operation: ReaiOperation) -> Result<Self, DriverError> {
        let Some(new_version) = self.info.version.checked_add(1) else {
            return Err(DriverError::Custom("Version overflow".to_string()));
        };
        self.info.apply_operation(new_version, &operation)?;

        let commit = operation.commit(ctx)?;
        self.spend(ctx, ReaiNftSolution::mutate(new_version, commit))
    }

    pub fn add_pair(self, ctx: &mut SpendContext, pair: ReaiPair) -> Result<Self, DriverError> {
        self.mutate(ctx, ReaiOperation::Add(pair))
    }

    pub fn remove_pair_at(self, ctx: &mut SpendContext, index: usize) -> Result<Self, DriverError> {
        self.mutate(ctx, ReaiOperation::Remove(index as u64))
    }

    pub fn freeze(self, ctx: &mut SpendContext) -> Result<Self, DriverError> {
        self.spend(ctx, ReaiNftSolution::freeze())
    }

    pub fn transfer(
        self,
        ctx: &mut SpendContext,
        new_owner: PublicKey,
    ) -> Result<Self, DriverError> {
        let version = self.info.version;
        self.spend(ctx, ReaiNftSolution::transfer(version, new_owner))
    }
}
