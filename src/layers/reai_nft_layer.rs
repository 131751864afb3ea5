use chia::{
    bls::PublicKey,
    clvm_utils::{CurriedProgram, ToTreeHash, TreeHash},
    protocol::{Bytes, Bytes32},
};
use chia_wallet_sdk::driver::{DriverError, Layer, Puzzle, SpendContext};
use clvm_traits::{FromClvm, ToClvm};
use clvmr::{Allocator, NodePtr};
use hex_literal::hex;

use crate::SpendContextExt;

/// Inner puzzle of a reai NFT. Curried with `(MOD_HASH DATA VERSION PUB_KEY)` and
/// solved with `(new_version commit new_pub_key)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct ReaiNftLayer {
    pub data: Vec<ReaiPair>,
    pub version: u64,
    pub owner: PublicKey,
}

impl ReaiNftLayer {
    pub fn new(data: Vec<ReaiPair>, version: u64, owner: PublicKey) -> Self {
        Self {
            data,
            version,
            owner,
        }
    }

    pub fn puzzle_hash(&self) -> TreeHash {
        ReaiNftArgs::curry_tree_hash(self.data.tree_hash(), self.version, self.owner)
    }
}

impl Layer for ReaiNftLayer {
    type Solution = ReaiNftSolution;

    fn parse_puzzle(allocator: &Allocator, puzzle: Puzzle) -> Result<Option<Self>, DriverError> {
        let Some(puzzle) = puzzle.as_curried() else {
            return Ok(None);
        };

        if puzzle.mod_hash != REAI_NFT_PUZZLE_HASH {
            return Ok(None);
        }

        let args = ReaiNftArgs::<Vec<ReaiPair>>::from_clvm(allocator, puzzle.args)?;
        if args.mod_hash != Bytes32::from(REAI_NFT_PUZZLE_HASH) {
            return Ok(None);
        }

        Ok(Some(Self {
            data: args.data,
            version: args.version,
            owner: args.pub_key,
        }))
    }

    fn parse_solution(
        allocator: &Allocator,
        solution: NodePtr,
    ) -> Result<Self::Solution, DriverError> {
        ReaiNftSolution::from_clvm(allocator, solution).map_err(DriverError::FromClvm)
    }

    fn construct_puzzle(&self, ctx: &mut SpendContext) -> Result<NodePtr, DriverError> {
        let program = ctx.reai_nft_puzzle()?;

        ctx.alloc(&CurriedProgram {
            program,
            args: ReaiNftArgs::new(self.data.clone(), self.version, self.owner),
        })
    }

    fn construct_solution(
        &self,
        ctx: &mut SpendContext,
        solution: Self::Solution,
    ) -> Result<NodePtr, DriverError> {
        ctx.alloc(&solution)
    }
}

pub const REAI_NFT_PUZZLE: [u8; 1100] = hex!("ff02ffff01ff02ffff03ff82017fffff01ff04ffff04ffff0132ffff04ff2fffff04ffff0bffff0101ff82017f80ff80808080ffff04ffff04ffff0133ffff04ffff02ff16ffff04ff02ffff04ff05ffff04ffff02ff04ffff04ff02ffff04ff0bff80808080ffff04ff17ffff04ff82017fff80808080808080ffff04ffff0101ff80808080ff808080ffff01ff02ffff03ff5fffff01ff02ffff03ffff03ff17ffff09ff5fffff10ff17ffff01018080ff8080ffff01ff04ffff04ffff0132ffff04ff2fffff04ffff02ff04ffff04ff02ffff04ff81bfff80808080ff80808080ffff04ffff04ffff0133ffff04ffff02ff16ffff04ff02ffff04ff05ffff04ffff02ff04ffff04ff02ffff04ffff02ffff03ffff09ffff05ff81bf80ffff011080ffff01ff04ffff05ffff06ff81bf8080ff0b80ffff01ff02ffff03ffff09ffff05ff81bf80ffff011180ffff01ff02ff0affff04ff02ffff04ff0bffff04ffff05ffff06ff81bf8080ff8080808080ffff01ff088080ff018080ff0180ff80808080ffff04ff5fffff04ff2fff80808080808080ffff04ffff0101ff80808080ff808080ffff01ff088080ff0180ffff01ff04ffff04ffff0132ffff04ff2fffff04ff82017eff80808080ffff04ffff04ffff0133ffff04ffff02ff16ffff04ff02ffff04ff05ffff04ffff02ff04ffff04ff02ffff04ff0bff80808080ffff04ff80ffff04ff2fff80808080808080ffff04ffff0101ff80808080ff80808080ff018080ff0180ffff04ffff01ffff02ffff03ffff07ff0580ffff01ff0bffff0102ffff02ff04ffff04ff02ffff04ffff05ff0580ff80808080ffff02ff04ffff04ff02ffff04ffff06ff0580ff8080808080ffff01ff0bffff0101ff058080ff0180ffff02ffff03ff0bffff01ff04ffff05ff0580ffff02ff0affff04ff02ffff04ffff06ff0580ffff04ffff11ff0bffff010180ff808080808080ffff01ff06ff058080ff0180ffff0bffff0102ff2effff0bffff0102ffff0bffff0102ff81beff0580ffff0bffff0102ffff0bffff0102ff5effff0bffff0102ffff0bffff0102ff81beffff0bffff0101ff058080ffff0bffff0102ffff0bffff0102ff5effff0bffff0102ffff0bffff0102ff81beff0b80ffff0bffff0102ffff0bffff0102ff5effff0bffff0102ffff0bffff0102ff81beffff0bffff0101ff178080ffff0bffff0102ffff0bffff0102ff5effff0bffff0102ffff0bffff0102ff81beffff0bffff0101ff2f8080ffff0bffff0102ff81beff82017e808080ff82017e808080ff82017e808080ff82017e808080ff82017e808080ffa0a12871fee210fb8619291eaea194581cbd2531e4b23759d225f6806923f63222ffa0a8d5dd63fba471ebcb1f3e8f7c1e1879b7152a6e7298a91ce119a63400ade7c5ffa09dcf97a184f32623d11a73124ceb99a5709b083721e878a16d78f596718ba7b2ffa04bf5122f344554c53bde2ebb8cd2b7e3d1600ad631c385a5d7cce23c7785459a80ff018080");

pub const REAI_NFT_PUZZLE_HASH: TreeHash = TreeHash::new(hex!(
    "
    0a711e063437d0c13015560a1f2eb08d52c265a6d5977f37fd6eb9e5f2921777
    "
));

pub const REAI_OP_ADD: u8 = 16;
pub const REAI_OP_REMOVE: u8 = 17;

#[derive(ToClvm, FromClvm, Debug, Clone, PartialEq, Eq)]
#[clvm(curry)]
pub struct ReaiNftArgs<T = Vec<ReaiPair>> {
    pub mod_hash: Bytes32,
    pub data: T,
    pub version: u64,
    pub pub_key: PublicKey,
}

impl<T> ReaiNftArgs<T> {
    pub fn new(data: T, version: u64, pub_key: PublicKey) -> Self {
        Self {
            mod_hash: REAI_NFT_PUZZLE_HASH.into(),
            data,
            version,
            pub_key,
        }
    }
}

impl ReaiNftArgs<TreeHash> {
    pub fn curry_tree_hash(data_hash: TreeHash, version: u64, pub_key: PublicKey) -> TreeHash {
        CurriedProgram {
            program: REAI_NFT_PUZZLE_HASH,
            args: ReaiNftArgs::new(data_hash, version, pub_key),
        }
        .tree_hash()
    }
}

/// A `(key . value)` entry of the data list.
#[derive(ToClvm, FromClvm, Debug, Clone, PartialEq, Eq, Hash)]
#[clvm(list)]
pub struct ReaiPair {
    pub key: Bytes,
    #[clvm(rest)]
    pub value: Bytes,
}

impl ReaiPair {
    pub fn new(key: impl Into<Bytes>, value: impl Into<Bytes>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(ToClvm, FromClvm, Debug, Clone, Copy, PartialEq, Eq)]
#[clvm(list)]
pub struct ReaiCommit<T = NodePtr> {
    pub operation: u8,
    pub value: T,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReaiOperation {
    Add(ReaiPair),
    Remove(u64),
}

impl ReaiOperation {
    pub fn commit(&self, ctx: &mut SpendContext) -> Result<ReaiCommit, DriverError> {
        Ok(match self {
            Self::Add(pair) => ReaiCommit {
                operation: REAI_OP_ADD,
                value: ctx.alloc(pair)?,
            },
            Self::Remove(index) => ReaiCommit {
                operation: REAI_OP_REMOVE,
                value: ctx.alloc(index)?,
            },
        })
    }

    pub fn from_commit(
        allocator: &Allocator,
        commit: &ReaiCommit,
    ) -> Result<Self, DriverError> {
        match commit.operation {
            REAI_OP_ADD => Ok(Self::Add(ReaiPair::from_clvm(allocator, commit.value)?)),
            REAI_OP_REMOVE => Ok(Self::Remove(u64::from_clvm(allocator, commit.value)?)),
            op => Err(DriverError::Custom(format!("unknown reai operation {op}"))),
        }
    }
}

#[derive(ToClvm, FromClvm, Debug, Clone, Copy, PartialEq, Eq)]
#[clvm(list)]
pub struct ReaiNftSolution<T = NodePtr> {
    pub new_version: u64,
    pub commit: Option<ReaiCommit<T>>,
    pub new_pub_key: Option<PublicKey>,
}

impl ReaiNftSolution {
    pub fn mutate(new_version: u64, commit: ReaiCommit) -> Self {
        Self {
            new_version,
            commit: Some(commit),
            new_pub_key: None,
        }
    }

    pub fn freeze() -> Self {
        Self {
            new_version: 0,
            commit: None,
            new_pub_key: None,
        }
    }

    pub fn transfer(version: u64, new_pub_key: PublicKey) -> Self {
        Self {
            new_version: version,
            commit: None,
            new_pub_key: Some(new_pub_key),
        }
    }
}
