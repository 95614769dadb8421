//! Calldata encoding for ConditionalTokens entry points.
//!
//! Encoding is pure: it never touches the network, so the payload can be sent directly or
//! embedded in another transaction (a multisend batch, a market-maker factory call). No
//! semantic validation happens here; callers check outcome counts and amounts.

use alloy::primitives::{B256, Bytes, U256};
use alloy::sol_types::SolCall as _;

use crate::contract::IConditionalTokens;
use crate::types::Address;

/// One ConditionalTokens operation with its typed arguments.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionalTokensCall {
    /// `safeTransferFrom(from, to, positionId, amount, "")`
    TransferPosition {
        from: Address,
        to: Address,
        position_id: U256,
        amount: U256,
    },
    /// `setApprovalForAll(operator, approved)`
    SetApprovalForAll { operator: Address, approved: bool },
    /// `prepareCondition(oracle, questionId, outcomeSlotCount)`
    PrepareCondition {
        oracle: Address,
        question_id: B256,
        outcome_slot_count: U256,
    },
    /// `redeemPositions(collateralToken, parentCollectionId, conditionId, indexSets)`
    RedeemPositions {
        collateral_token: Address,
        parent_collection_id: B256,
        condition_id: B256,
        index_sets: Vec<U256>,
    },
}

impl ConditionalTokensCall {
    /// ABI-encodes the call: 4-byte selector followed by the arguments.
    #[must_use]
    pub fn encode(&self) -> Bytes {
        let calldata = match self {
            Self::TransferPosition {
                from,
                to,
                position_id,
                amount,
            } => IConditionalTokens::safeTransferFromCall {
                from: *from,
                to: *to,
                id: *position_id,
                value: *amount,
                data: Bytes::new(),
            }
            .abi_encode(),
            Self::SetApprovalForAll { operator, approved } => {
                IConditionalTokens::setApprovalForAllCall {
                    operator: *operator,
                    approved: *approved,
                }
                .abi_encode()
            }
            Self::PrepareCondition {
                oracle,
                question_id,
                outcome_slot_count,
            } => IConditionalTokens::prepareConditionCall {
                oracle: *oracle,
                questionId: *question_id,
                outcomeSlotCount: *outcome_slot_count,
            }
            .abi_encode(),
            Self::RedeemPositions {
                collateral_token,
                parent_collection_id,
                condition_id,
                index_sets,
            } => IConditionalTokens::redeemPositionsCall {
                collateralToken: *collateral_token,
                parentCollectionId: *parent_collection_id,
                conditionId: *condition_id,
                indexSets: index_sets.clone(),
            }
            .abi_encode(),
        };

        calldata.into()
    }

    /// The 4-byte function selector this call is dispatched on.
    #[must_use]
    pub const fn selector(&self) -> [u8; 4] {
        match self {
            Self::TransferPosition { .. } => IConditionalTokens::safeTransferFromCall::SELECTOR,
            Self::SetApprovalForAll { .. } => IConditionalTokens::setApprovalForAllCall::SELECTOR,
            Self::PrepareCondition { .. } => IConditionalTokens::prepareConditionCall::SELECTOR,
            Self::RedeemPositions { .. } => IConditionalTokens::redeemPositionsCall::SELECTOR,
        }
    }
}

/// Encodes an ERC1155 `safeTransferFrom` of `amount` units of `position_id`, with empty data.
#[must_use]
pub fn encode_safe_transfer_from(
    from: Address,
    to: Address,
    position_id: U256,
    amount: U256,
) -> Bytes {
    ConditionalTokensCall::TransferPosition {
        from,
        to,
        position_id,
        amount,
    }
    .encode()
}

/// Encodes `setApprovalForAll(operator, approved)`.
#[must_use]
pub fn encode_set_approval_for_all(operator: Address, approved: bool) -> Bytes {
    ConditionalTokensCall::SetApprovalForAll { operator, approved }.encode()
}

/// Encodes `prepareCondition(oracle, question_id, outcome_slot_count)`.
#[must_use]
pub fn encode_prepare_condition(
    question_id: B256,
    oracle: Address,
    outcome_slot_count: U256,
) -> Bytes {
    ConditionalTokensCall::PrepareCondition {
        oracle,
        question_id,
        outcome_slot_count,
    }
    .encode()
}

#[cfg(test)]
mod tests {
    use alloy::hex;
    use alloy::primitives::b256;

    use super::*;
    use crate::types::address;

    const ALICE: Address = address!("0x1111111111111111111111111111111111111111");
    const BOB: Address = address!("0x2222222222222222222222222222222222222222");

    fn word(value: u64) -> [u8; 32] {
        U256::from(value).to_be_bytes::<32>()
    }

    fn address_word(address: Address) -> [u8; 32] {
        let mut padded = [0_u8; 32];
        padded[12..].copy_from_slice(address.as_slice());
        padded
    }

    #[test]
    fn selectors_should_match_contract() {
        let transfer = ConditionalTokensCall::TransferPosition {
            from: ALICE,
            to: BOB,
            position_id: U256::ZERO,
            amount: U256::ZERO,
        };
        let approval = ConditionalTokensCall::SetApprovalForAll {
            operator: BOB,
            approved: true,
        };
        let prepare = ConditionalTokensCall::PrepareCondition {
            oracle: ALICE,
            question_id: B256::ZERO,
            outcome_slot_count: U256::from(2),
        };
        let redeem = ConditionalTokensCall::RedeemPositions {
            collateral_token: ALICE,
            parent_collection_id: B256::ZERO,
            condition_id: B256::ZERO,
            index_sets: vec![U256::from(1)],
        };

        assert_eq!(transfer.selector(), hex!("f242432a"));
        assert_eq!(approval.selector(), hex!("a22cb465"));
        assert_eq!(prepare.selector(), hex!("d96ee754"));
        assert_eq!(redeem.selector(), hex!("01b7037c"));

        for call in [transfer, approval, prepare, redeem] {
            assert_eq!(call.encode()[..4], call.selector(), "{call:?}");
        }
    }

    #[test]
    fn set_approval_for_all_layout() {
        let encoded = encode_set_approval_for_all(BOB, true);

        let mut expected = hex!("a22cb465").to_vec();
        expected.extend_from_slice(&address_word(BOB));
        expected.extend_from_slice(&word(1));
        assert_eq!(&encoded[..], expected.as_slice());

        let revoked = encode_set_approval_for_all(BOB, false);
        assert_eq!(revoked[36..], word(0));
    }

    #[test]
    fn prepare_condition_layout() {
        let question_id =
            b256!("0x0101010101010101010101010101010101010101010101010101010101010101");
        let encoded = encode_prepare_condition(question_id, ALICE, U256::from(3));

        let mut expected = hex!("d96ee754").to_vec();
        expected.extend_from_slice(&address_word(ALICE));
        expected.extend_from_slice(question_id.as_slice());
        expected.extend_from_slice(&word(3));
        assert_eq!(&encoded[..], expected.as_slice());
    }

    #[test]
    fn safe_transfer_from_should_append_empty_bytes() {
        let encoded = encode_safe_transfer_from(ALICE, BOB, U256::from(0xff), U256::from(500));

        let mut expected = hex!("f242432a").to_vec();
        expected.extend_from_slice(&address_word(ALICE));
        expected.extend_from_slice(&address_word(BOB));
        expected.extend_from_slice(&word(0xff));
        expected.extend_from_slice(&word(500));
        // offset of the dynamic `data` argument, then its zero length
        expected.extend_from_slice(&word(0xa0));
        expected.extend_from_slice(&word(0));
        assert_eq!(&encoded[..], expected.as_slice());
    }

    #[test]
    fn redeem_positions_should_carry_index_sets() {
        let condition_id =
            b256!("0x49729a02b74a16b9b7203c79b6630655ea98550d13a474e2e46d7414d7a5752e");
        let encoded = ConditionalTokensCall::RedeemPositions {
            collateral_token: ALICE,
            parent_collection_id: B256::ZERO,
            condition_id,
            index_sets: vec![U256::from(1), U256::from(2), U256::from(4), U256::from(8)],
        }
        .encode();

        let mut expected = hex!("01b7037c").to_vec();
        expected.extend_from_slice(&address_word(ALICE));
        expected.extend_from_slice(B256::ZERO.as_slice());
        expected.extend_from_slice(condition_id.as_slice());
        expected.extend_from_slice(&word(0x80));
        expected.extend_from_slice(&word(4));
        for set in [1, 2, 4, 8] {
            expected.extend_from_slice(&word(set));
        }
        assert_eq!(&encoded[..], expected.as_slice());
    }
}
