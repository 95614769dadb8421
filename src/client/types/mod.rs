//! Request and response types for [`Client`](super::Client) operations.

mod request;
mod response;

pub use request::{
    CollectionIdRequest, ConditionIdRequest, MergePositionsRequest, PositionIdRequest,
    PrepareConditionRequest, RedeemPositionsRequest, SplitPositionRequest,
    TransferPositionRequest,
};
pub use response::{
    CollectionIdResponse, ConditionIdResponse, ConditionState, PositionIdResponse,
    PrepareConditionResponse, TransactionResponse,
};
