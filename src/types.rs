//! Re-exported types from external crates for convenience.
//!
//! These types are commonly used in this crate and are re-exported here
//! so users don't need to add these dependencies to their `Cargo.toml`.

/// Ethereum address type and the [`address!`] macro for compile-time address literals.
/// [`ChainId`] is a type alias for `u64` representing EVM chain IDs.
pub use alloy::primitives::{Address, ChainId, address};
/// 32-byte digests (condition, question and collection IDs) and the [`b256!`] macro.
pub use alloy::primitives::{B256, b256};
/// ABI-encoded calldata.
pub use alloy::primitives::Bytes;
/// 256-bit unsigned integers: index sets, position IDs, balances, outcome slot counts.
pub use alloy::primitives::U256;

pub use crate::client::types::{
    CollectionIdRequest, CollectionIdResponse, ConditionIdRequest, ConditionIdResponse,
    ConditionState, MergePositionsRequest, PositionIdRequest, PositionIdResponse,
    PrepareConditionRequest, PrepareConditionResponse, RedeemPositionsRequest,
    SplitPositionRequest, TransactionResponse, TransferPositionRequest,
};
pub use crate::logs::ConditionLog;
