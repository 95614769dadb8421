//! Conditional Tokens walkthrough against Polygon.
//!
//! Read-only by default: derives a condition ID locally, looks up its preparation event and
//! lifecycle state, and reads the collection and position IDs of each outcome.
//!
//! ## Usage
//!
//! ```sh
//! cargo run --example ctf
//! ```
//!
//! To also prepare the condition and redeem it, pass `--write` with a funded key:
//! ```sh
//! export CTF_PRIVATE_KEY="your_private_key"
//! cargo run --example ctf -- --write
//! ```

use std::env;
use std::str::FromStr as _;

use alloy::primitives::{B256, U256};
use alloy::providers::ProviderBuilder;
use alloy::signers::Signer as _;
use alloy::signers::local::LocalSigner;
use anyhow::{Context as _, Result};
use conditional_tokens_client::error::Kind;
use conditional_tokens_client::types::{
    ConditionIdRequest, ConditionState, PositionIdRequest, PrepareConditionRequest,
    RedeemPositionsRequest, address,
};
use conditional_tokens_client::{Client, POLYGON};
use tracing::{error, info, warn};

const RPC_URL: &str = "https://polygon-rpc.com";
const PRIVATE_KEY_VAR: &str = "CTF_PRIVATE_KEY";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let write_mode = env::args().any(|arg| arg == "--write");
    let chain = POLYGON;

    let provider = ProviderBuilder::new().connect(RPC_URL).await?;
    let client = Client::new(provider, chain)?;
    info!(contract = %client.address(), "connected to Polygon {chain}");

    let oracle = address!("0x0000000000000000000000000000000000000001");
    let question_id = B256::ZERO;
    let outcome_slot_count = 3;

    let condition = client
        .condition_id(
            &ConditionIdRequest::builder()
                .oracle(oracle)
                .question_id(question_id)
                .outcome_slot_count(U256::from(outcome_slot_count))
                .build(),
        )
        .condition_id;
    info!(%oracle, %question_id, outcome_slot_count, %condition, "derived condition ID");

    match client.condition_log(condition).await {
        Ok(log) => info!(question_id = %log.question_id, "found ConditionPreparation event"),
        Err(e) if e.kind() == Kind::NotFound => warn!("condition has not been prepared"),
        Err(e) => return Err(e.into()),
    }

    let state = client.condition_state(condition).await?;
    info!(%state, "condition state");

    let usdc = address!("0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174");
    for outcome_index in 0..outcome_slot_count {
        let collection = client
            .collection_id_for_outcome(condition, outcome_index)
            .await?;
        let position = client
            .position_id(
                &PositionIdRequest::builder()
                    .collateral_token(usdc)
                    .collection_id(collection.collection_id)
                    .build(),
            )
            .await?;
        info!(
            outcome_index,
            collection_id = %collection.collection_id,
            position_id = %position.position_id,
            "outcome position"
        );
    }

    if !write_mode {
        return Ok(());
    }

    let private_key = env::var(PRIVATE_KEY_VAR)
        .with_context(|| format!("{PRIVATE_KEY_VAR} is required with --write"))?;
    let signer = LocalSigner::from_str(&private_key)?.with_chain_id(Some(chain));
    let wallet_address = signer.address();

    let provider = ProviderBuilder::new()
        .wallet(signer)
        .connect(RPC_URL)
        .await?;
    let client = Client::with_signer(provider, chain, wallet_address)?;
    info!(%wallet_address, "using wallet");

    if state == ConditionState::Unprepared {
        let request = PrepareConditionRequest::builder()
            .question_id(question_id)
            .oracle(oracle)
            .outcome_slot_count(outcome_slot_count)
            .build();

        let prepared = client.prepare_condition(&request).await?;
        info!(
            condition_id = %prepared.condition_id,
            transaction_hash = %prepared.transaction_hash,
            block_number = prepared.block_number,
            "prepared condition"
        );
    }

    let redeem = RedeemPositionsRequest::for_outcome_count(usdc, condition, outcome_slot_count)?;
    match client.redeem_positions(&redeem).await {
        Ok(response) => info!(
            transaction_hash = %response.transaction_hash,
            block_number = response.block_number,
            "redeemed positions"
        ),
        Err(e) => error!("redeem failed, the condition may not be resolved yet: {e}"),
    }

    Ok(())
}
