//! Reconciliation of conditions with their on-chain `ConditionPreparation` events.
//!
//! A condition exists on-chain once the contract has emitted `ConditionPreparation` for its
//! ID. The resolver scans a bounded block range for that event and enforces one-match
//! semantics: no match is [`Kind::NotFound`](crate::error::Kind::NotFound), several matches
//! are tolerated with a warning and the oldest one wins.

use alloy::eips::BlockNumberOrTag;
use alloy::primitives::{B256, U256};
use alloy::rpc::types::{Filter, Log};
use alloy::sol_types::SolEvent as _;
use bon::Builder;
use serde::Serialize;

use crate::Result;
use crate::contract::IConditionalTokens::ConditionPreparation;
use crate::error::{Error, MalformedLog};
use crate::types::Address;

/// Parsed `ConditionPreparation` event.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct ConditionLog {
    pub condition_id: B256,
    /// Account allowed to report the outcome
    pub oracle: Address,
    pub question_id: B256,
    pub outcome_slot_count: U256,
}

impl From<ConditionPreparation> for ConditionLog {
    fn from(event: ConditionPreparation) -> Self {
        Self {
            condition_id: event.conditionId,
            oracle: event.oracle,
            question_id: event.questionId,
            outcome_slot_count: event.outcomeSlotCount,
        }
    }
}

/// Builds the `eth_getLogs` filter for the preparation event of `condition_id`, from
/// `from_block` up to the chain head.
#[must_use]
pub fn condition_preparation_filter(
    contract: Address,
    condition_id: B256,
    from_block: u64,
) -> Filter {
    Filter::new()
        .address(contract)
        .event_signature(ConditionPreparation::SIGNATURE_HASH)
        .topic1(condition_id)
        .from_block(from_block)
        .to_block(BlockNumberOrTag::Latest)
}

/// Picks the authoritative preparation log for `condition_id` out of `logs` and decodes it.
///
/// Logs are ordered by block number then log index; logs without a position (pending) sort
/// last and ties keep the order the provider returned. Duplicate preparations are harmless
/// since equal inputs give an equal condition, so more than one match only logs a warning.
///
/// # Errors
///
/// - [`Kind::NotFound`](crate::error::Kind::NotFound) when `logs` is empty
/// - [`Kind::MalformedLog`](crate::error::Kind::MalformedLog) when the selected log does not
///   decode as `ConditionPreparation`, or decodes to another condition
pub fn resolve_condition_log(condition_id: B256, logs: &[Log]) -> Result<ConditionLog> {
    let log = logs
        .iter()
        .min_by_key(|log| {
            (
                log.block_number.unwrap_or(u64::MAX),
                log.log_index.unwrap_or(u64::MAX),
            )
        })
        .ok_or_else(|| Error::condition_not_found(condition_id))?;

    if logs.len() > 1 {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            %condition_id,
            matches = logs.len(),
            block_number = ?log.block_number,
            "There should be only one ConditionPreparation event for this condition, using the oldest"
        );
    }

    let malformed = |reason: String| MalformedLog {
        condition_id,
        transaction_hash: log.transaction_hash,
        reason,
    };

    let event = ConditionPreparation::decode_log_data_validate(log.data())
        .map_err(|e| malformed(e.to_string()))?;

    if event.conditionId != condition_id {
        return Err(malformed(format!(
            "log is for condition id {}",
            event.conditionId
        ))
        .into());
    }

    Ok(event.into())
}
