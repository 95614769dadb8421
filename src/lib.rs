#![cfg_attr(doc, doc = include_str!("../README.md"))]

pub mod client;
pub mod contract;
pub mod encode;
pub mod error;
pub mod ids;
pub mod index_set;
pub mod logs;
pub mod types;

use alloy::primitives::ChainId;
use bon::Builder;
use phf::phf_map;

pub use client::Client;

use crate::error::Error;
use crate::types::{Address, address};

pub type Result<T> = std::result::Result<T, Error>;

/// [`ChainId`] for Ethereum mainnet
pub const MAINNET: ChainId = 1;

/// [`ChainId`] for Polygon mainnet
pub const POLYGON: ChainId = 137;

/// [`ChainId`] for Polygon testnet <https://polygon.technology/blog/introducing-the-amoy-testnet-for-polygon-pos>
pub const AMOY: ChainId = 80002;

// Lower bounds for `ConditionPreparation` log scans. Each value is at or before the block
// the ConditionalTokens contract was deployed in on that network.
static CONFIG: phf::Map<ChainId, NetworkConfig> = phf_map! {
    1_u64 => NetworkConfig {
        chain_id: MAINNET,
        conditional_tokens: address!("0xC59b0e4De5F1248C1140964E0fF287B192407E0C"),
        earliest_block: 9_000_000,
    },
    137_u64 => NetworkConfig {
        chain_id: POLYGON,
        conditional_tokens: address!("0x4D97DCd97eC945f40cF65F87097ACe5EA0476045"),
        earliest_block: 4_023_686,
    },
    // Amoy went public at the end of 2023; the contract was deployed after this block
    80002_u64 => NetworkConfig {
        chain_id: AMOY,
        conditional_tokens: address!("0x69308FB512518e39F9b16112fA8d994F4e2Bf8bB"),
        earliest_block: 2_000_000,
    },
};

/// Where the ConditionalTokens contract lives on one network.
///
/// The built-in networks are available through [`network_config`]. Custom deployments
/// (local dev chains, forks) can be described with [`NetworkConfig::builder`] and passed to
/// [`Client::with_config`].
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct NetworkConfig {
    /// Chain the contract is deployed on
    pub chain_id: ChainId,
    /// Address of the ConditionalTokens contract
    pub conditional_tokens: Address,
    /// Earliest block the contract could have emitted events in
    #[builder(default)]
    pub earliest_block: u64,
}

/// Given a `chain_id`, return the relevant [`NetworkConfig`]
#[must_use]
pub fn network_config(chain_id: ChainId) -> Option<&'static NetworkConfig> {
    CONFIG.get(&chain_id)
}

/// Returns the first block to scan for `ConditionPreparation` events on `chain_id`.
///
/// # Errors
///
/// Returns an error if the chain has no known ConditionalTokens deployment. There is no
/// fallback to scanning from genesis.
pub fn earliest_block_to_check(chain_id: ChainId) -> Result<u64> {
    network_config(chain_id)
        .map(|config| config.earliest_block)
        .ok_or_else(|| Error::missing_network_config(chain_id))
}
