//! Response types for ConditionalTokens operations.

use alloy::primitives::{B256, U256};
use bon::Builder;
use serde::Serialize;

/// Response from calculating a condition ID.
#[non_exhaustive]
#[derive(Debug, Clone, Builder)]
pub struct ConditionIdResponse {
    /// The calculated condition ID
    pub condition_id: B256,
}

/// Response from calculating a collection ID.
#[non_exhaustive]
#[derive(Debug, Clone, Builder)]
pub struct CollectionIdResponse {
    /// The collection ID returned by the contract
    pub collection_id: B256,
}

/// Response from calculating a position ID.
#[non_exhaustive]
#[derive(Debug, Clone, Builder)]
pub struct PositionIdResponse {
    /// The position ID (ERC1155 token ID) returned by the contract
    pub position_id: U256,
}

/// Response from a confirmed `prepareCondition` transaction.
#[non_exhaustive]
#[derive(Debug, Clone, Builder)]
pub struct PrepareConditionResponse {
    /// Locally derived ID of the prepared condition
    pub condition_id: B256,
    /// Transaction hash
    pub transaction_hash: B256,
    /// Block number where the transaction was mined
    pub block_number: u64,
}

/// Confirmation of a mined, successful transaction.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct TransactionResponse {
    /// Transaction hash
    pub transaction_hash: B256,
    /// Block number where the transaction was mined
    pub block_number: u64,
}

/// Lifecycle of a condition as observed on-chain at the time of the query.
///
/// Observations are never cached: every query re-reads the chain.
#[non_exhaustive]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ConditionState {
    /// No `ConditionPreparation` event exists for the condition on this network
    Unprepared,
    /// Prepared, and the oracle has not reported yet
    Prepared,
    /// The payout denominator is set
    Resolved,
}
