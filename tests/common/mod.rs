#![allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    reason = "Do not need additional syntax for setting up tests, and https://github.com/rust-lang/rust-clippy/issues/13981"
)]
#![allow(
    unused,
    reason = "Each test binary only uses part of the shared helpers"
)]

use std::str::FromStr as _;

use alloy::primitives::{B256, U256};
use alloy::rpc::types::Log;
use alloy::signers::local::PrivateKeySigner;
use alloy::sol_types::SolEvent as _;
use conditional_tokens_client::contract::IConditionalTokens::ConditionPreparation;
use conditional_tokens_client::ids::condition_id;
use conditional_tokens_client::types::{Address, address};
use httpmock::{Method::POST, Mock, MockServer};
use serde_json::{Value, json};

// publicly known private key
pub const PRIVATE_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

pub const ORACLE: Address = address!("0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA");
pub const USDC: Address = address!("0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174");
pub const POLYGON_CONDITIONAL_TOKENS: Address =
    address!("0x4D97DCd97eC945f40cF65F87097ACe5EA0476045");

/// `0x89`, i.e. Polygon
pub const POLYGON_CHAIN_ID_HEX: &str = "0x89";

pub const TX_HASH: B256 = B256::repeat_byte(0x42);

#[must_use]
pub fn signer_address() -> Address {
    PrivateKeySigner::from_str(PRIVATE_KEY).unwrap().address()
}

#[must_use]
pub fn rpc_result(result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": result,
    })
}

/// 32-byte ABI word holding `value`, as returned by `eth_call`.
#[must_use]
pub fn word(value: u64) -> String {
    format!("0x{value:064x}")
}

/// Mocks the JSON-RPC method named in `method`, answering with `result`.
pub fn mock_rpc<'a>(server: &'a MockServer, method: &str, result: Value) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(POST)
            .path("/")
            .body_includes(format!("\"{method}\""));
        then.json_body(rpc_result(result));
    })
}

#[must_use]
pub fn receipt(transaction_hash: B256, from: Address, success: bool) -> Value {
    json!({
        "transactionHash": transaction_hash,
        "blockHash": B256::repeat_byte(0x0b),
        "blockNumber": "0x3d6600",
        "logsBloom": format!("0x{}", "00".repeat(256)),
        "gasUsed": "0xbde1",
        "contractAddress": null,
        "cumulativeGasUsed": "0xa42aec",
        "transactionIndex": "0x7",
        "from": from,
        "to": POLYGON_CONDITIONAL_TOKENS,
        "type": "0x0",
        "effectiveGasPrice": "0xfb0f6e8c9",
        "logs": [],
        "status": if success { "0x1" } else { "0x0" },
    })
}

/// A `ConditionPreparation` log as `eth_getLogs` returns it.
#[must_use]
pub fn preparation_log(
    oracle: Address,
    question_id: B256,
    outcome_slot_count: u64,
    block_number: u64,
    log_index: u64,
) -> Value {
    let outcome_slot_count = U256::from(outcome_slot_count);
    let event = ConditionPreparation {
        conditionId: condition_id(oracle, question_id, outcome_slot_count),
        oracle,
        questionId: question_id,
        outcomeSlotCount: outcome_slot_count,
    };

    let log = Log {
        inner: alloy::primitives::Log {
            address: POLYGON_CONDITIONAL_TOKENS,
            data: event.encode_log_data(),
        },
        block_hash: Some(B256::repeat_byte(0x0b)),
        block_number: Some(block_number),
        transaction_hash: Some(B256::repeat_byte(0x0c)),
        transaction_index: Some(0),
        log_index: Some(log_index),
        ..Log::default()
    };

    serde_json::to_value(log).unwrap()
}
