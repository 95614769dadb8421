//! Local identifier derivation.
//!
//! Only condition IDs are derived here. Collection and position IDs are owned by the
//! contract and are always read from the chain (see [`crate::Client::collection_id`] and
//! [`crate::Client::position_id`]).

use alloy::primitives::{B256, U256, keccak256};
use alloy::sol_types::SolValue as _;

use crate::types::Address;

/// Computes the ID of the condition `oracle` will report on for `question_id`.
///
/// This is `keccak256(oracle ‖ question_id ‖ outcome_slot_count)` with the fields packed at
/// 20, 32 and 32 bytes, the same digest the contract's `getConditionId` returns. Equal inputs
/// always give equal IDs, so anyone can name a condition without querying the chain.
///
/// # Example
///
/// ```
/// use conditional_tokens_client::ids::condition_id;
/// use conditional_tokens_client::types::{B256, U256, address};
///
/// let oracle = address!("0x0000000000000000000000000000000000000001");
/// let id = condition_id(oracle, B256::ZERO, U256::from(2));
/// assert_eq!(id, condition_id(oracle, B256::ZERO, U256::from(2)));
/// ```
#[must_use]
pub fn condition_id(oracle: Address, question_id: B256, outcome_slot_count: U256) -> B256 {
    keccak256((oracle, question_id, outcome_slot_count).abi_encode_packed())
}

#[cfg(test)]
mod tests {
    use alloy::primitives::b256;

    use super::*;
    use crate::types::address;

    const ORACLE: Address = address!("0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA");
    const QUESTION_ID: B256 =
        b256!("0x0101010101010101010101010101010101010101010101010101010101010101");

    #[test]
    fn known_vectors() {
        assert_eq!(
            condition_id(ORACLE, QUESTION_ID, U256::from(2)),
            b256!("0x49729a02b74a16b9b7203c79b6630655ea98550d13a474e2e46d7414d7a5752e")
        );
        assert_eq!(
            condition_id(ORACLE, QUESTION_ID, U256::from(3)),
            b256!("0x94b6f94c34656ec56d43f0c9b934bd112fd961f27bd1c0a65bb7f52871cd3227")
        );
        assert_eq!(
            condition_id(
                address!("0x0000000000000000000000000000000000000001"),
                B256::ZERO,
                U256::from(2)
            ),
            b256!("0x8bfbeaab2e8fcea4b97db75c3b23d40d50d7ce89a1935d00ca59e53bf02a765f")
        );
    }

    #[test]
    fn repeated_derivation_should_be_identical() {
        let first = condition_id(ORACLE, QUESTION_ID, U256::from(2));
        let second = condition_id(ORACLE, QUESTION_ID, U256::from(2));
        assert_eq!(first, second);
    }

    #[test]
    fn packing_should_use_fixed_widths() {
        let mut packed = Vec::with_capacity(84);
        packed.extend_from_slice(ORACLE.as_slice());
        packed.extend_from_slice(QUESTION_ID.as_slice());
        packed.extend_from_slice(&U256::from(2).to_be_bytes::<32>());

        assert_eq!(packed.len(), 84);
        assert_eq!(
            condition_id(ORACLE, QUESTION_ID, U256::from(2)),
            keccak256(&packed)
        );
    }

    #[test]
    fn any_input_change_should_change_id() {
        let base = condition_id(ORACLE, QUESTION_ID, U256::from(2));

        let other_oracle = condition_id(
            address!("0xBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBB"),
            QUESTION_ID,
            U256::from(2),
        );
        let other_question = condition_id(ORACLE, B256::ZERO, U256::from(2));
        let other_count = condition_id(ORACLE, QUESTION_ID, U256::from(3));

        assert_ne!(base, other_oracle);
        assert_ne!(base, other_question);
        assert_ne!(base, other_count);
        assert_ne!(other_question, other_count);
    }
}
