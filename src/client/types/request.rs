//! Request types for ConditionalTokens operations.

use alloy::primitives::{B256, Bytes, U256};
use bon::Builder;

use crate::Result;
use crate::encode::ConditionalTokensCall;
use crate::error::Error;
use crate::index_set::{
    BINARY_PARTITION, MAX_OUTCOME_SLOT_COUNT, index_sets, is_valid_outcome_slot_count,
};
use crate::types::Address;

/// Request to calculate a condition ID.
///
/// The condition ID is derived from the oracle address, question hash, and number of outcome slots.
#[non_exhaustive]
#[derive(Debug, Clone, Builder)]
pub struct ConditionIdRequest {
    /// The oracle address that will report the outcome
    pub oracle: Address,
    /// Hash of the question being resolved
    pub question_id: B256,
    /// Number of outcome slots (typically 2 for binary markets)
    pub outcome_slot_count: U256,
}

/// Request to prepare a new condition on-chain.
#[non_exhaustive]
#[derive(Debug, Clone, Builder)]
pub struct PrepareConditionRequest {
    /// Opaque question identifier chosen by the caller
    pub question_id: B256,
    /// The oracle address that will report the outcome
    pub oracle: Address,
    /// Number of outcome slots, between 2 and 256
    #[builder(default = 2)]
    pub outcome_slot_count: usize,
}

impl PrepareConditionRequest {
    /// Calldata for `prepareCondition`, for callers that batch or relay transactions.
    /// The outcome slot count is not validated.
    #[must_use]
    pub fn calldata(&self) -> Bytes {
        ConditionalTokensCall::from(self).encode()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        validate_outcome_slot_count(self.outcome_slot_count)
    }
}

impl From<&PrepareConditionRequest> for ConditionalTokensCall {
    fn from(request: &PrepareConditionRequest) -> Self {
        Self::PrepareCondition {
            oracle: request.oracle,
            question_id: request.question_id,
            outcome_slot_count: U256::from(request.outcome_slot_count),
        }
    }
}

/// Request to calculate a collection ID.
///
/// Creates collection identifiers using parent collection, condition ID, and index set.
#[non_exhaustive]
#[derive(Debug, Clone, Builder)]
pub struct CollectionIdRequest {
    /// Parent collection ID (zero for top-level positions)
    #[builder(default)]
    pub parent_collection_id: B256,
    /// The condition ID
    pub condition_id: B256,
    /// Index set representing outcome slots (e.g., 0b01 = 1, 0b10 = 2)
    pub index_set: U256,
}

/// Request to calculate a position ID.
///
/// Generates final ERC1155 token IDs from collateral token and collection ID.
#[non_exhaustive]
#[derive(Debug, Clone, Builder)]
pub struct PositionIdRequest {
    /// The collateral token address
    pub collateral_token: Address,
    /// The collection ID
    pub collection_id: B256,
}

/// Request to move outcome tokens of one position to another account.
#[non_exhaustive]
#[derive(Debug, Clone, Builder)]
pub struct TransferPositionRequest {
    /// Current holder; the signer must be this account or an approved operator
    pub from: Address,
    pub to: Address,
    /// ERC1155 token ID of the position
    pub position_id: U256,
    pub amount: U256,
}

impl TransferPositionRequest {
    /// Calldata for `safeTransferFrom` with empty data.
    #[must_use]
    pub fn calldata(&self) -> Bytes {
        ConditionalTokensCall::from(self).encode()
    }
}

impl From<&TransferPositionRequest> for ConditionalTokensCall {
    fn from(request: &TransferPositionRequest) -> Self {
        Self::TransferPosition {
            from: request.from,
            to: request.to,
            position_id: request.position_id,
            amount: request.amount,
        }
    }
}

/// Request to split collateral into outcome tokens.
#[non_exhaustive]
#[derive(Debug, Clone, Builder)]
pub struct SplitPositionRequest {
    /// The collateral token address
    pub collateral_token: Address,
    /// Parent collection ID (zero for top-level positions)
    #[builder(default)]
    pub parent_collection_id: B256,
    /// The condition ID to split on
    pub condition_id: B256,
    /// Array of disjoint index sets representing outcome slots.
    /// For binary markets: [1, 2] where 1 = 0b01 and 2 = 0b10
    pub partition: Vec<U256>,
    /// Amount of collateral to split
    pub amount: U256,
}

/// Request to merge outcome tokens back into collateral.
#[non_exhaustive]
#[derive(Debug, Clone, Builder)]
pub struct MergePositionsRequest {
    /// The collateral token address
    pub collateral_token: Address,
    /// Parent collection ID (zero for top-level positions)
    #[builder(default)]
    pub parent_collection_id: B256,
    /// The condition ID to merge on
    pub condition_id: B256,
    /// Array of disjoint index sets representing outcome slots
    pub partition: Vec<U256>,
    /// Amount of full sets to merge
    pub amount: U256,
}

/// Request to redeem resolved outcome tokens for collateral.
#[non_exhaustive]
#[derive(Debug, Clone, Builder)]
pub struct RedeemPositionsRequest {
    /// The collateral token address
    pub collateral_token: Address,
    /// Parent collection ID (zero for top-level positions)
    #[builder(default)]
    pub parent_collection_id: B256,
    /// The condition ID to redeem
    pub condition_id: B256,
    /// Array of disjoint index sets representing outcome slots to redeem
    pub index_sets: Vec<U256>,
}

impl From<&RedeemPositionsRequest> for ConditionalTokensCall {
    fn from(request: &RedeemPositionsRequest) -> Self {
        Self::RedeemPositions {
            collateral_token: request.collateral_token,
            parent_collection_id: request.parent_collection_id,
            condition_id: request.condition_id,
            index_sets: request.index_sets.clone(),
        }
    }
}

// Convenience methods for binary markets
impl SplitPositionRequest {
    /// Creates a split request for a binary market using the partition [1, 2].
    #[must_use]
    pub fn for_binary_market(collateral_token: Address, condition_id: B256, amount: U256) -> Self {
        Self {
            collateral_token,
            parent_collection_id: B256::default(),
            condition_id,
            partition: binary_partition(),
            amount,
        }
    }
}

impl MergePositionsRequest {
    /// Creates a merge request for a binary market using the partition [1, 2].
    #[must_use]
    pub fn for_binary_market(collateral_token: Address, condition_id: B256, amount: U256) -> Self {
        Self {
            collateral_token,
            parent_collection_id: B256::default(),
            condition_id,
            partition: binary_partition(),
            amount,
        }
    }
}

impl RedeemPositionsRequest {
    /// Creates a redeem request for a binary market using the index sets [1, 2].
    #[must_use]
    pub fn for_binary_market(collateral_token: Address, condition_id: B256) -> Self {
        Self {
            collateral_token,
            parent_collection_id: B256::default(),
            condition_id,
            index_sets: binary_partition(),
        }
    }

    /// Creates a request redeeming every single-outcome position of a top-level condition
    /// with `outcome_slot_count` outcomes, over the index sets `[1, 2, ..., 2^(n-1)]`.
    ///
    /// # Example
    ///
    /// ```
    /// # use conditional_tokens_client::types::{B256, RedeemPositionsRequest, U256, address};
    /// let request = RedeemPositionsRequest::for_outcome_count(
    ///     address!("0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174"),
    ///     B256::ZERO,
    ///     4,
    /// )?;
    /// assert_eq!(request.index_sets, [1_u64, 2, 4, 8].map(U256::from).to_vec());
    /// # Ok::<(), conditional_tokens_client::error::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a validation error if `outcome_slot_count` is outside `2..=256`.
    pub fn for_outcome_count(
        collateral_token: Address,
        condition_id: B256,
        outcome_slot_count: usize,
    ) -> Result<Self> {
        validate_outcome_slot_count(outcome_slot_count)?;

        Ok(Self {
            collateral_token,
            parent_collection_id: B256::default(),
            condition_id,
            index_sets: index_sets(outcome_slot_count),
        })
    }

    /// Calldata for `redeemPositions`.
    #[must_use]
    pub fn calldata(&self) -> Bytes {
        ConditionalTokensCall::from(self).encode()
    }
}

fn binary_partition() -> Vec<U256> {
    BINARY_PARTITION.iter().map(|&i| U256::from(i)).collect()
}

fn validate_outcome_slot_count(outcome_slot_count: usize) -> Result<()> {
    if is_valid_outcome_slot_count(outcome_slot_count) {
        Ok(())
    } else {
        Err(Error::validation(format!(
            "outcome slot count must be between 2 and {MAX_OUTCOME_SLOT_COUNT}, got {outcome_slot_count}"
        )))
    }
}
