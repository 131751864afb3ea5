use chia::{
    bls::PublicKey,
    clvm_utils::{ToTreeHash, TreeHash},
    protocol::Bytes32,
    puzzles::singleton::SingletonArgs,
};
use chia_wallet_sdk::driver::{DriverError, SingletonLayer};
use clvm_traits::{FromClvm, ToClvm};
use clvmr::Allocator;

use crate::{ReaiNftArgs, ReaiNftLayer, ReaiNftSolution, ReaiOperation, ReaiPair};

pub type ReaiNftLayers = SingletonLayer<ReaiNftLayer>;

/// Version of a freshly minted reai NFT. Version 0 marks a frozen one.
pub const REAI_NFT_EVE_VERSION: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaiNftInfo {
    pub launcher_id: Bytes32,

    pub data: Vec<ReaiPair>,
    pub version: u64,
    pub owner: PublicKey,
}

impl ReaiNftInfo {
    pub fn new(launcher_id: Bytes32, data: Vec<ReaiPair>, version: u64, owner: PublicKey) -> Self {
        Self {
            launcher_id,
            data,
            version,
            owner,
        }
    }

    pub fn eve(launcher_id: Bytes32, owner: PublicKey) -> Self {
        Self::new(launcher_id, vec![], REAI_NFT_EVE_VERSION, owner)
    }

    pub fn from_layers(layers: ReaiNftLayers) -> Self {
        Self::new(
            layers.launcher_id,
            layers.inner_puzzle.data,
            layers.inner_puzzle.version,
            layers.inner_puzzle.owner,
        )
    }

    pub fn is_frozen(&self) -> bool {
        self.version == 0
    }

    pub fn inner_puzzle_hash(&self) -> TreeHash {
        ReaiNftArgs::curry_tree_hash(self.data.tree_hash(), self.version, self.owner)
    }

    pub fn puzzle_hash(&self) -> TreeHash {
        SingletonArgs::curry_tree_hash(self.launcher_id, self.inner_puzzle_hash())
    }

    pub fn into_layers(self) -> ReaiNftLayers {
        SingletonLayer::new(
            self.launcher_id,
            ReaiNftLayer::new(self.data, self.version, self.owner),
        )
    }

    /// State of the child coin created when this NFT is spent with `solution`.
    pub fn apply(
        &self,
        allocator: &Allocator,
        solution: &ReaiNftSolution,
    ) -> Result<Self, DriverError> {
        if let Some(new_owner) = solution.new_pub_key {
            return Ok(Self {
                owner: new_owner,
                ..self.clone()
            });
        }

        if solution.new_version == 0 {
            return Ok(Self {
                version: 0,
                ..self.clone()
            });
        }

        let Some(commit) = solution.commit else {
            return Err(DriverError::Custom(
                "Mutation spend is missing its commit".to_string(),
            ));
        };
        let operation = ReaiOperation::from_commit(allocator, &commit)?;

        self.apply_operation(solution.new_version, &operation)
    }

    pub fn apply_operation(
        &self,
        new_version: u64,
        operation: &ReaiOperation,
    ) -> Result<Self, DriverError> {
        if self.is_frozen() {
            return Err(DriverError::Custom("reai NFT is frozen".to_string()));
        }

        if self.version.checked_add(1) != Some(new_version) {
            return Err(DriverError::Custom(format!(
                "Expected version {}, got {}",
                self.version.saturating_add(1),
                new_version
            )));
        }

        let mut data = self.data.clone();
        match operation {
            ReaiOperation::Add(pair) => data.insert(0, pair.clone()),
            ReaiOperation::Remove(index) => {
                let Some(index) = usize::try_from(*index).ok().filter(|i| *i < data.len()) else {
                    return Err(DriverError::Custom(format!(
                        "Index {} out of range ({} pairs)",
                        index,
                        data.len()
                    )));
                };
                data.remove(index);
            }
        }

        Ok(Self {
            data,
            version: new_version,
            ..self.clone()
        })
    }
}

/// Key/value list of the launcher solution. Identifies the eve owner.
#[derive(ToClvm, FromClvm, Debug, Clone, Copy, PartialEq, Eq)]
#[clvm(list)]
pub struct ReaiNftLaunchHint {
    pub owner: PublicKey,
}

#[cfg(test)]
mod tests {
    use chia::bls::SecretKey;
    use chia_wallet_sdk::driver::SpendContext;

    use crate::ReaiCommit;

    use super::*;

    fn owner(seed: u8) -> PublicKey {
        SecretKey::from_seed(&[seed; 32]).public_key()
    }

    fn add(key: &str, value: &str) -> ReaiOperation {
        ReaiOperation::Add(ReaiPair::new(key.as_bytes().to_vec(), value.as_bytes().to_vec()))
    }

    #[test]
    fn test_apply_add_and_remove() -> anyhow::Result<()> {
        let info = ReaiNftInfo::eve(Bytes32::new([1; 32]), owner(1));

        let info = info.apply_operation(2, &add("a", "1"))?;
        let info = info.apply_operation(3, &add("b", "2"))?;
        assert_eq!(info.version, 3);
        assert_eq!(
            info.data,
            vec![
                ReaiPair::new(b"b".to_vec(), b"2".to_vec()),
                ReaiPair::new(b"a".to_vec(), b"1".to_vec()),
            ]
        );

        let info = info.apply_operation(4, &ReaiOperation::Remove(1))?;
        assert_eq!(info.data, vec![ReaiPair::new(b"b".to_vec(), b"2".to_vec())]);

        // out of range, then wrong version
        assert!(info.apply_operation(5, &ReaiOperation::Remove(1)).is_err());
        assert!(info.apply_operation(6, &ReaiOperation::Remove(0)).is_err());

        Ok(())
    }

    #[test]
    fn test_apply_solutions() -> anyhow::Result<()> {
        let ctx = &mut SpendContext::new();
        let info = ReaiNftInfo::eve(Bytes32::new([1; 32]), owner(1));

        let commit = add("k", "v").commit(ctx)?;
        let added = info.apply(ctx, &ReaiNftSolution::mutate(2, commit))?;
        assert_eq!(added.data.len(), 1);
        assert_eq!(added.version, 2);

        let frozen = added.apply(ctx, &ReaiNftSolution::freeze())?;
        assert!(frozen.is_frozen());
        assert_eq!(frozen.data, added.data);
        assert!(frozen
            .apply(ctx, &ReaiNftSolution::mutate(1, commit))
            .is_err());

        let transferred = frozen.apply(ctx, &ReaiNftSolution::transfer(0, owner(2)))?;
        assert_eq!(transferred.owner, owner(2));
        assert!(transferred.is_frozen());

        let value = ctx.alloc(&5u64)?;
        let unknown = ReaiCommit {
            operation: 18,
            value,
        };
        assert!(added
            .apply(ctx, &ReaiNftSolution::mutate(3, unknown))
            .is_err());

        Ok(())
    }

    #[test]
    fn test_puzzle_hash_tracks_state() -> anyhow::Result<()> {
        let info = ReaiNftInfo::eve(Bytes32::new([1; 32]), owner(1));
        let child = info.apply_operation(2, &add("k", "v"))?;

        assert_ne!(info.inner_puzzle_hash(), child.inner_puzzle_hash());
        assert_ne!(info.puzzle_hash(), child.puzzle_hash());

        let expected = child.inner_puzzle_hash();
        assert_eq!(child.into_layers().inner_puzzle.puzzle_hash(), expected);

        Ok(())
    }
}
