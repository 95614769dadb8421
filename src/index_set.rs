//! Index sets: bitmasks over the outcome slots of a condition.
//!
//! Bit `i` of an index set selects outcome slot `i`. The ConditionalTokens contract
//! accepts at most 256 outcome slots, one per bit of a `uint256`.

use alloy::primitives::U256;

/// Largest outcome slot count the contract accepts.
pub const MAX_OUTCOME_SLOT_COUNT: usize = 256;

/// Standard partition for binary markets (YES/NO).
/// Index 1 (0b01) represents the first outcome.
/// Index 2 (0b10) represents the second outcome.
pub const BINARY_PARTITION: [u64; 2] = [1, 2];

/// Returns the single-outcome index set `2^outcome_index`, or `None` when the index does not
/// fit in a `uint256`.
#[must_use]
pub fn outcome_index_set(outcome_index: usize) -> Option<U256> {
    (outcome_index < MAX_OUTCOME_SLOT_COUNT).then(|| U256::from(1) << outcome_index)
}

/// Returns the maximal partition of a condition with `outcome_slot_count` outcomes:
/// `[1, 2, 4, ..., 2^(n-1)]`, one single-outcome index set per slot, in slot order.
///
/// Redeeming over this partition pays out every single-outcome position the holder has in
/// one call. A count above [`MAX_OUTCOME_SLOT_COUNT`] is clamped to it, since no condition
/// can have more slots; callers that need to reject such counts validate them first.
///
/// # Example
///
/// ```
/// use conditional_tokens_client::index_set::index_sets;
/// use conditional_tokens_client::types::U256;
///
/// let sets = index_sets(3);
/// assert_eq!(sets, vec![U256::from(1), U256::from(2), U256::from(4)]);
/// ```
#[must_use]
pub fn index_sets(outcome_slot_count: usize) -> Vec<U256> {
    (0..outcome_slot_count.min(MAX_OUTCOME_SLOT_COUNT))
        .map(|slot| U256::from(1) << slot)
        .collect()
}

/// Checks that an outcome slot count can be prepared or redeemed on-chain.
pub(crate) fn is_valid_outcome_slot_count(outcome_slot_count: usize) -> bool {
    (2..=MAX_OUTCOME_SLOT_COUNT).contains(&outcome_slot_count)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn three_outcomes_should_be_one_two_four() {
        assert_eq!(
            index_sets(3),
            vec![U256::from(1), U256::from(2), U256::from(4)]
        );
    }

    #[test]
    fn binary_partition_should_match_two_outcomes() {
        let binary: Vec<U256> = BINARY_PARTITION.iter().map(|&i| U256::from(i)).collect();
        assert_eq!(index_sets(2), binary);
    }

    #[test]
    fn index_sets_should_be_single_bits() {
        for n in 2..=MAX_OUTCOME_SLOT_COUNT {
            let sets = index_sets(n);
            assert_eq!(sets.len(), n, "expected one index set per outcome");

            let distinct: HashSet<U256> = sets.iter().copied().collect();
            assert_eq!(distinct.len(), n, "index sets must be pairwise distinct");

            for (i, set) in sets.iter().enumerate() {
                assert!(!set.is_zero(), "index set {i} of {n} is zero");
                assert_eq!(set.count_ones(), 1, "index set {i} of {n} is not a single bit");
                assert!(set.bit(i), "index set {i} of {n} selects the wrong slot");
            }
        }
    }

    #[test]
    fn highest_slot_should_be_top_bit() {
        let sets = index_sets(MAX_OUTCOME_SLOT_COUNT);
        assert_eq!(sets.last(), Some(&(U256::from(1) << 255_usize)));
    }

    #[test]
    fn oversized_count_should_clamp_to_max() {
        let sets = index_sets(MAX_OUTCOME_SLOT_COUNT + 44);

        assert_eq!(sets.len(), MAX_OUTCOME_SLOT_COUNT);
        assert!(
            sets.iter().all(|set| !set.is_zero()),
            "no index set may wrap to zero"
        );
        assert_eq!(sets, index_sets(MAX_OUTCOME_SLOT_COUNT));
    }

    #[test]
    fn outcome_index_set_bounds() {
        assert_eq!(outcome_index_set(0), Some(U256::from(1)));
        assert_eq!(outcome_index_set(3), Some(U256::from(8)));
        assert_eq!(outcome_index_set(MAX_OUTCOME_SLOT_COUNT), None);
    }

    #[test]
    fn outcome_slot_count_validation() {
        assert!(!is_valid_outcome_slot_count(0));
        assert!(!is_valid_outcome_slot_count(1));
        assert!(is_valid_outcome_slot_count(2));
        assert!(is_valid_outcome_slot_count(MAX_OUTCOME_SLOT_COUNT));
        assert!(!is_valid_outcome_slot_count(MAX_OUTCOME_SLOT_COUNT + 1));
    }
}
