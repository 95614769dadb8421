//! Solidity interface of the Gnosis ConditionalTokens contract.
//!
//! Only the entry points and events this crate uses are declared. Selectors and
//! argument layouts are generated from these signatures, so every encoded call and
//! decoded log follows the deployed contract's ABI.
//!
//! Source: <https://github.com/gnosis/conditional-tokens-contracts>

#![allow(
    clippy::exhaustive_structs,
    clippy::exhaustive_enums,
    reason = "Alloy sol! macro generates code that triggers these lints"
)]

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IConditionalTokens {
        /// Emitted once per `prepareCondition` call.
        event ConditionPreparation(
            bytes32 indexed conditionId,
            address indexed oracle,
            bytes32 indexed questionId,
            uint256 outcomeSlotCount
        );

        /// Prepares a condition by initializing it with an oracle, question hash, and outcome slot count.
        function prepareCondition(
            address oracle,
            bytes32 questionId,
            uint256 outcomeSlotCount
        ) external;

        function setApprovalForAll(address operator, bool approved) external;

        function isApprovedForAll(address owner, address operator) external view returns (bool);

        function payoutNumerators(bytes32 conditionId, uint256 index) external view returns (uint256);

        /// Non-zero once the oracle has reported.
        function payoutDenominator(bytes32 conditionId) external view returns (uint256);

        /// Calculates the collection ID from parent collection, condition ID, and index set.
        function getCollectionId(
            bytes32 parentCollectionId,
            bytes32 conditionId,
            uint256 indexSet
        ) external view returns (bytes32);

        /// Calculates the position ID (ERC1155 token ID) from collateral token and collection ID.
        function getPositionId(
            address collateralToken,
            bytes32 collectionId
        ) external pure returns (uint256);

        function balanceOf(address owner, uint256 id) external view returns (uint256);

        function safeTransferFrom(
            address from,
            address to,
            uint256 id,
            uint256 value,
            bytes data
        ) external;

        /// Splits collateral into outcome tokens.
        function splitPosition(
            address collateralToken,
            bytes32 parentCollectionId,
            bytes32 conditionId,
            uint256[] calldata partition,
            uint256 amount
        ) external;

        /// Merges outcome tokens back into collateral.
        function mergePositions(
            address collateralToken,
            bytes32 parentCollectionId,
            bytes32 conditionId,
            uint256[] calldata partition,
            uint256 amount
        ) external;

        /// Redeems resolved outcome tokens for collateral.
        function redeemPositions(
            address collateralToken,
            bytes32 parentCollectionId,
            bytes32 conditionId,
            uint256[] calldata indexSets
        ) external;
    }
}
