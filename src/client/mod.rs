//! Client for the Gnosis ConditionalTokens contract.
//!
//! The client owns one provider connection and re-reads the chain on every call: approval
//! state, payout state and preparation events are never cached. Writes block until the
//! transaction is mined, one confirmation wait per transaction. Nothing is retried and no
//! timeout is applied; a provider call that never completes blocks its caller.
//!
//! # Example
//!
//! ```no_run
//! use conditional_tokens_client::{Client, POLYGON};
//! use conditional_tokens_client::types::{B256, PrepareConditionRequest, address};
//! use alloy::providers::ProviderBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = ProviderBuilder::new()
//!     .connect("https://polygon-rpc.com")
//!     .await?;
//!
//! let signer = address!("0x0000000000000000000000000000000000000001");
//! let client = Client::with_signer(provider, POLYGON, signer)?;
//!
//! let request = PrepareConditionRequest::builder()
//!     .question_id(B256::repeat_byte(0x01))
//!     .oracle(signer)
//!     .build();
//! let prepared = client.prepare_condition(&request).await?;
//!
//! assert!(!client.is_condition_resolved(prepared.condition_id).await?);
//! # Ok(())
//! # }
//! ```

pub mod types;

use alloy::contract::Error as ContractError;
use alloy::network::Ethereum;
use alloy::primitives::{B256, Bytes, ChainId, U256};
use alloy::providers::{PendingTransactionBuilder, PendingTransactionError, Provider};
use alloy::transports::RpcError;

use self::types::{
    CollectionIdRequest, CollectionIdResponse, ConditionIdRequest, ConditionIdResponse,
    ConditionState, MergePositionsRequest, PositionIdRequest, PositionIdResponse,
    PrepareConditionRequest, PrepareConditionResponse, RedeemPositionsRequest,
    SplitPositionRequest, TransactionResponse, TransferPositionRequest,
};
use crate::contract::IConditionalTokens;
use crate::error::{Error, Kind};
use crate::index_set::outcome_index_set;
use crate::logs::{ConditionLog, condition_preparation_filter, resolve_condition_log};
use crate::types::Address;
use crate::{NetworkConfig, Result, ids, network_config};

/// Gas limit attached to `prepareCondition`, which writes a fresh payout vector.
pub const PREPARE_CONDITION_GAS_LIMIT: u64 = 750_000;

/// Client for interacting with the ConditionalTokens contract.
///
/// Created read-only with [`Client::new`], or able to submit transactions with
/// [`Client::with_signer`]. The provider is responsible for signing transactions sent from
/// the signer address, either through a wallet filler or an unlocked node account.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct Client<P: Provider> {
    contract: IConditionalTokens::IConditionalTokensInstance<P>,
    config: NetworkConfig,
    signer: Option<Address>,
    provider: P,
}

impl<P: Provider + Clone> Client<P> {
    /// Creates a read-only client for the ConditionalTokens deployment on `chain_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no known deployment for the given chain.
    pub fn new(provider: P, chain_id: ChainId) -> Result<Self> {
        let config = network_config(chain_id).ok_or_else(|| Error::missing_network_config(chain_id))?;

        Ok(Self::with_config(provider, *config, None))
    }

    /// Creates a client that submits transactions from `signer`.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no known deployment for the given chain.
    pub fn with_signer(provider: P, chain_id: ChainId, signer: Address) -> Result<Self> {
        let config = network_config(chain_id).ok_or_else(|| Error::missing_network_config(chain_id))?;

        Ok(Self::with_config(provider, *config, Some(signer)))
    }

    /// Creates a client for a deployment that is not in the built-in network table, such
    /// as a local development chain.
    #[must_use]
    pub fn with_config(provider: P, config: NetworkConfig, signer: Option<Address>) -> Self {
        let contract = IConditionalTokens::new(config.conditional_tokens, provider.clone());

        Self {
            contract,
            config,
            signer,
            provider,
        }
    }

    /// Derives a condition ID locally, without a contract call. See [`ids::condition_id`].
    #[must_use]
    pub fn condition_id(&self, request: &ConditionIdRequest) -> ConditionIdResponse {
        ConditionIdResponse {
            condition_id: ids::condition_id(
                request.oracle,
                request.question_id,
                request.outcome_slot_count,
            ),
        }
    }

    /// Prepares a condition and waits for the transaction to be mined.
    ///
    /// The returned condition ID is derived locally from the request rather than read back
    /// from the chain. Preparing the same condition twice sends two transactions; the
    /// contract rejects the second one.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The client has no signer, or the outcome slot count is outside `2..=256`
    /// - The transaction fails to send or its receipt cannot be fetched
    /// - The transaction reverts
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self), fields(
            oracle = %request.oracle,
            question_id = %request.question_id,
            outcome_slot_count = request.outcome_slot_count
        ))
    )]
    pub async fn prepare_condition(
        &self,
        request: &PrepareConditionRequest,
    ) -> Result<PrepareConditionResponse> {
        request.validate()?;
        let signer = self.signer()?;
        let outcome_slot_count = U256::from(request.outcome_slot_count);

        let pending_tx = self
            .contract
            .prepareCondition(request.oracle, request.question_id, outcome_slot_count)
            .from(signer)
            .value(U256::ZERO)
            .gas(PREPARE_CONDITION_GAS_LIMIT)
            .send()
            .await
            .map_err(|e| send_error("prepare condition", &e))?;

        let confirmation = confirm(pending_tx, "prepare condition").await?;

        Ok(PrepareConditionResponse {
            condition_id: ids::condition_id(request.oracle, request.question_id, outcome_slot_count),
            transaction_hash: confirmation.transaction_hash,
            block_number: confirmation.block_number,
        })
    }

    /// Reads a collection ID from the contract.
    ///
    /// # Errors
    ///
    /// Returns an error if the contract call fails.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self), fields(
            parent_collection_id = %request.parent_collection_id,
            condition_id = %request.condition_id,
            index_set = %request.index_set
        ))
    )]
    pub async fn collection_id(
        &self,
        request: &CollectionIdRequest,
    ) -> Result<CollectionIdResponse> {
        let collection_id = self
            .contract
            .getCollectionId(
                request.parent_collection_id,
                request.condition_id,
                request.index_set,
            )
            .call()
            .await
            .map_err(|e| Error::network("failed to get collection ID", &e))?;

        Ok(CollectionIdResponse { collection_id })
    }

    /// Reads the top-level collection ID holding only outcome `outcome_index`, i.e. index set
    /// `2^outcome_index` under the root collection.
    ///
    /// # Errors
    ///
    /// Returns an error if `outcome_index` is 256 or more, or if the contract call fails.
    pub async fn collection_id_for_outcome(
        &self,
        condition_id: B256,
        outcome_index: usize,
    ) -> Result<CollectionIdResponse> {
        let index_set = outcome_index_set(outcome_index).ok_or_else(|| {
            Error::validation(format!("outcome index {outcome_index} does not fit an index set"))
        })?;

        let request = CollectionIdRequest::builder()
            .condition_id(condition_id)
            .index_set(index_set)
            .build();

        self.collection_id(&request).await
    }

    /// Reads a position ID (ERC1155 token ID) from the contract.
    ///
    /// # Errors
    ///
    /// Returns an error if the contract call fails.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self), fields(
            collateral_token = %request.collateral_token,
            collection_id = %request.collection_id
        ))
    )]
    pub async fn position_id(&self, request: &PositionIdRequest) -> Result<PositionIdResponse> {
        let position_id = self
            .contract
            .getPositionId(request.collateral_token, request.collection_id)
            .call()
            .await
            .map_err(|e| Error::network("failed to get position ID", &e))?;

        Ok(PositionIdResponse { position_id })
    }

    /// Reads `owner`'s balance of a position.
    ///
    /// # Errors
    ///
    /// Returns an error if the contract call fails.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self), fields(%owner, %position_id))
    )]
    pub async fn balance_of(&self, owner: Address, position_id: U256) -> Result<U256> {
        self.contract
            .balanceOf(owner, position_id)
            .call()
            .await
            .map_err(|e| Error::network("failed to get position balance", &e))
    }

    /// Finds and decodes the `ConditionPreparation` event of a condition.
    ///
    /// Scans from the network's earliest block to the chain head. More than one matching
    /// event is logged as a warning and the oldest one is used.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The provider is connected to another chain than the client's configuration
    /// - The log query fails
    /// - No event exists ([`Kind::NotFound`])
    /// - The event cannot be decoded ([`Kind::MalformedLog`])
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self), fields(%condition_id))
    )]
    pub async fn condition_log(&self, condition_id: B256) -> Result<ConditionLog> {
        let from_block = self.earliest_block().await?;
        let filter = condition_preparation_filter(*self.address(), condition_id, from_block);

        let logs = self
            .provider
            .get_logs(&filter)
            .await
            .map_err(|e| Error::network("failed to get ConditionPreparation logs", &e))?;

        resolve_condition_log(condition_id, &logs)
    }

    /// Returns the question ID a prepared condition was created with.
    ///
    /// # Errors
    ///
    /// Fails the same way as [`Client::condition_log`].
    pub async fn question_id(&self, condition_id: B256) -> Result<B256> {
        Ok(self.condition_log(condition_id).await?.question_id)
    }

    /// Lets `operator` move all of the signer's positions, and waits for the transaction to
    /// be mined.
    ///
    /// # Errors
    ///
    /// Returns an error if the client has no signer, the transaction fails to send or its
    /// receipt cannot be fetched, or the transaction reverts.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self), fields(%operator))
    )]
    pub async fn set_approval_for_all(&self, operator: Address) -> Result<TransactionResponse> {
        let signer = self.signer()?;

        let pending_tx = self
            .contract
            .setApprovalForAll(operator, true)
            .from(signer)
            .send()
            .await
            .map_err(|e| send_error("approval", &e))?;

        confirm(pending_tx, "approval").await
    }

    /// Whether `operator` may move the signer's positions.
    ///
    /// # Errors
    ///
    /// Returns an error if the client has no signer or the contract call fails.
    pub async fn is_approved_for_all(&self, operator: Address) -> Result<bool> {
        let owner = self.signer()?;

        self.is_approved_for_all_by(owner, operator).await
    }

    /// Whether `operator` may move `owner`'s positions.
    ///
    /// # Errors
    ///
    /// Returns an error if the contract call fails.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self), fields(%owner, %operator))
    )]
    pub async fn is_approved_for_all_by(&self, owner: Address, operator: Address) -> Result<bool> {
        self.contract
            .isApprovedForAll(owner, operator)
            .call()
            .await
            .map_err(|e| Error::network("failed to get approval state", &e))
    }

    /// Reads the payout denominator of a condition; zero until the oracle reports.
    ///
    /// # Errors
    ///
    /// Returns an error if the contract call fails.
    pub async fn payout_denominator(&self, condition_id: B256) -> Result<U256> {
        self.contract
            .payoutDenominator(condition_id)
            .call()
            .await
            .map_err(|e| Error::network("failed to get payout denominator", &e))
    }

    /// Reads the payout numerator reported for outcome slot `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the contract call fails.
    pub async fn payout_numerator(&self, condition_id: B256, index: usize) -> Result<U256> {
        self.contract
            .payoutNumerators(condition_id, U256::from(index))
            .call()
            .await
            .map_err(|e| Error::network("failed to get payout numerator", &e))
    }

    /// Whether the oracle has reported on the condition, i.e. its payout denominator is not
    /// zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the contract call fails.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self), fields(%condition_id))
    )]
    pub async fn is_condition_resolved(&self, condition_id: B256) -> Result<bool> {
        let payout_denominator = self.payout_denominator(condition_id).await?;

        Ok(!payout_denominator.is_zero())
    }

    /// Observes where a condition is in its lifecycle.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Client::condition_log`] other than [`Kind::NotFound`], or
    /// from [`Client::is_condition_resolved`].
    pub async fn condition_state(&self, condition_id: B256) -> Result<ConditionState> {
        match self.condition_log(condition_id).await {
            Ok(_) => {}
            Err(e) if e.kind() == Kind::NotFound => return Ok(ConditionState::Unprepared),
            Err(e) => return Err(e),
        }

        if self.is_condition_resolved(condition_id).await? {
            Ok(ConditionState::Resolved)
        } else {
            Ok(ConditionState::Prepared)
        }
    }

    /// Redeems positions over `request.index_sets` in one transaction and waits for it to be
    /// mined. Use [`RedeemPositionsRequest::for_outcome_count`] to redeem every outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The client has no signer
    /// - The transaction fails to send or its receipt cannot be fetched
    /// - The transaction reverts, e.g. because the condition is not resolved
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self), fields(
            collateral_token = %request.collateral_token,
            condition_id = %request.condition_id,
            index_sets_len = request.index_sets.len()
        ))
    )]
    pub async fn redeem_positions(
        &self,
        request: &RedeemPositionsRequest,
    ) -> Result<TransactionResponse> {
        let signer = self.signer()?;

        let pending_tx = self
            .contract
            .redeemPositions(
                request.collateral_token,
                request.parent_collection_id,
                request.condition_id,
                request.index_sets.clone(),
            )
            .from(signer)
            .send()
            .await
            .map_err(|e| send_error("redeem", &e))?;

        confirm(pending_tx, "redeem").await
    }

    /// Splits collateral into outcome tokens and waits for the transaction to be mined.
    ///
    /// # Errors
    ///
    /// Returns an error if the client has no signer, the transaction fails to send or its
    /// receipt cannot be fetched, or the transaction reverts.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self), fields(
            collateral_token = %request.collateral_token,
            condition_id = %request.condition_id,
            amount = %request.amount
        ))
    )]
    pub async fn split_position(
        &self,
        request: &SplitPositionRequest,
    ) -> Result<TransactionResponse> {
        let signer = self.signer()?;

        let pending_tx = self
            .contract
            .splitPosition(
                request.collateral_token,
                request.parent_collection_id,
                request.condition_id,
                request.partition.clone(),
                request.amount,
            )
            .from(signer)
            .send()
            .await
            .map_err(|e| send_error("split", &e))?;

        confirm(pending_tx, "split").await
    }

    /// Merges outcome tokens back into collateral and waits for the transaction to be mined.
    ///
    /// # Errors
    ///
    /// Returns an error if the client has no signer, the transaction fails to send or its
    /// receipt cannot be fetched, or the transaction reverts.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self), fields(
            collateral_token = %request.collateral_token,
            condition_id = %request.condition_id,
            amount = %request.amount
        ))
    )]
    pub async fn merge_positions(
        &self,
        request: &MergePositionsRequest,
    ) -> Result<TransactionResponse> {
        let signer = self.signer()?;

        let pending_tx = self
            .contract
            .mergePositions(
                request.collateral_token,
                request.parent_collection_id,
                request.condition_id,
                request.partition.clone(),
                request.amount,
            )
            .from(signer)
            .send()
            .await
            .map_err(|e| send_error("merge", &e))?;

        confirm(pending_tx, "merge").await
    }

    /// Transfers outcome tokens of one position and waits for the transaction to be mined.
    ///
    /// # Errors
    ///
    /// Returns an error if the client has no signer, the transaction fails to send or its
    /// receipt cannot be fetched, or the transaction reverts.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self), fields(
            from = %request.from,
            to = %request.to,
            position_id = %request.position_id,
            amount = %request.amount
        ))
    )]
    pub async fn safe_transfer_from(
        &self,
        request: &TransferPositionRequest,
    ) -> Result<TransactionResponse> {
        let signer = self.signer()?;

        let pending_tx = self
            .contract
            .safeTransferFrom(
                request.from,
                request.to,
                request.position_id,
                request.amount,
                Bytes::new(),
            )
            .from(signer)
            .send()
            .await
            .map_err(|e| send_error("transfer", &e))?;

        confirm(pending_tx, "transfer").await
    }

    /// Address of the ConditionalTokens contract this client talks to.
    #[must_use]
    pub fn address(&self) -> &Address {
        self.contract.address()
    }

    #[must_use]
    pub const fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// The account transactions are sent from, if the client can send any.
    #[must_use]
    pub const fn signer_address(&self) -> Option<Address> {
        self.signer
    }

    /// Returns a reference to the underlying provider.
    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    fn signer(&self) -> Result<Address> {
        self.signer.ok_or_else(|| {
            Error::validation(
                "this client is read-only; create it with Client::with_signer to send transactions",
            )
        })
    }

    /// Lower bound of the log scan for the network the provider is connected to.
    async fn earliest_block(&self) -> Result<u64> {
        let chain_id = self
            .provider
            .get_chain_id()
            .await
            .map_err(|e| Error::network("failed to get chain ID", &e))?;

        if chain_id != self.config.chain_id {
            return Err(Error::validation(format!(
                "provider is connected to chain {chain_id}, but the client is configured for chain {}",
                self.config.chain_id
            )));
        }

        Ok(self.config.earliest_block)
    }
}

/// Classifies a failed submission. A JSON-RPC error answer means the node refused the
/// transaction (typically a revert during gas estimation), which retrying will not change;
/// rate limits and transport failures stay [`Kind::NetworkUnavailable`].
fn send_error(action: &str, err: &ContractError) -> Error {
    match err {
        ContractError::TransportError(RpcError::ErrorResp(payload)) if !payload.is_retry_err() => {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                code = payload.code,
                message = %payload.message,
                "{action} transaction refused"
            );
            Error::transaction_rejected(None, Some(payload.message.to_string()))
        }
        _ => Error::network(format!("failed to send {action} transaction"), err),
    }
}

/// Waits for a sent transaction to be mined and checks that it succeeded.
async fn confirm(
    pending_tx: PendingTransactionBuilder<Ethereum>,
    action: &str,
) -> Result<TransactionResponse> {
    let transaction_hash = *pending_tx.tx_hash();

    #[cfg(feature = "tracing")]
    tracing::debug!(%transaction_hash, "{action} transaction sent");

    let receipt = match pending_tx.get_receipt().await {
        Ok(receipt) => receipt,
        Err(PendingTransactionError::TransportError(RpcError::NullResp)) => {
            return Err(Error::transaction_rejected(
                Some(transaction_hash),
                Some("no receipt available, the transaction was dropped".to_owned()),
            ));
        }
        Err(e) => return Err(Error::network(format!("failed to get {action} receipt"), &e)),
    };

    if !receipt.status() {
        #[cfg(feature = "tracing")]
        tracing::warn!(%transaction_hash, "{action} transaction reverted");
        return Err(Error::transaction_rejected(Some(transaction_hash), None));
    }

    let block_number = receipt.block_number.ok_or_else(|| {
        Error::network(
            format!("failed to get {action} receipt"),
            &"block number not available in receipt",
        )
    })?;

    Ok(TransactionResponse {
        transaction_hash,
        block_number,
    })
}
