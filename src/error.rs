use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt;

use alloy::primitives::{B256, ChainId};

#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// An expected on-chain event does not exist within the searched block range
    NotFound,
    /// A matched event could not be decoded with the declared event layout
    MalformedLog,
    /// A transaction was refused by the node, mined but reverted, or dropped
    TransactionRejected,
    /// The underlying provider could not complete a call
    NetworkUnavailable,
    /// Error related to invalid input or client state within conditional-tokens-client
    Validation,
    /// Internal error from dependencies
    Internal,
}

#[derive(Debug)]
pub struct Error {
    kind: Kind,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    backtrace: Backtrace,
}

impl Error {
    pub fn with_source<S: StdError + Send + Sync + 'static>(kind: Kind, source: S) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
            backtrace: Backtrace::capture(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    #[must_use]
    pub fn inner(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    #[must_use]
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        let e = self.source.as_deref()?;
        e.downcast_ref::<E>()
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Validation {
            reason: message.into(),
        }
        .into()
    }

    pub fn network<S: Into<String>, E: fmt::Display>(context: S, source: &E) -> Self {
        NetworkUnavailable {
            context: context.into(),
            message: source.to_string(),
        }
        .into()
    }

    #[must_use]
    pub fn condition_not_found(condition_id: B256) -> Self {
        ConditionNotFound { condition_id }.into()
    }

    #[must_use]
    pub fn transaction_rejected(transaction_hash: Option<B256>, reason: Option<String>) -> Self {
        TransactionRejected {
            transaction_hash,
            reason,
        }
        .into()
    }

    #[must_use]
    pub fn missing_network_config(chain_id: ChainId) -> Self {
        MissingNetworkConfig { chain_id }.into()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(src) => write!(f, "{:?}: {}", self.kind, src),
            None => write!(f, "{:?}", self.kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

/// No `ConditionPreparation` event exists for the condition on the connected network.
#[non_exhaustive]
#[derive(Debug, Clone, Copy)]
pub struct ConditionNotFound {
    pub condition_id: B256,
}

impl fmt::Display for ConditionNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no ConditionPreparation event found for condition id {}",
            self.condition_id
        )
    }
}

impl StdError for ConditionNotFound {}

/// A log matched the `ConditionPreparation` filter but its payload does not follow the
/// event's layout. This points at an ABI mismatch between client and contract.
#[non_exhaustive]
#[derive(Debug)]
pub struct MalformedLog {
    pub condition_id: B256,
    pub transaction_hash: Option<B256>,
    pub reason: String,
}

impl fmt::Display for MalformedLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "malformed ConditionPreparation log for condition id {}",
            self.condition_id
        )?;
        if let Some(hash) = self.transaction_hash {
            write!(f, " in transaction {hash}")?;
        }
        write!(f, ": {}", self.reason)
    }
}

impl StdError for MalformedLog {}

/// The network refused a transaction, either when it was submitted or by reverting it.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct TransactionRejected {
    /// `None` when the node refused the transaction before it got a hash
    pub transaction_hash: Option<B256>,
    /// Diagnostic reported by the network, when there is one
    pub reason: Option<String>,
}

impl fmt::Display for TransactionRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.transaction_hash, &self.reason) {
            (Some(hash), Some(reason)) => write!(f, "transaction {hash} was rejected: {reason}"),
            (Some(hash), None) => write!(f, "transaction {hash} reverted"),
            (None, Some(reason)) => write!(f, "transaction was rejected: {reason}"),
            (None, None) => write!(f, "transaction was rejected"),
        }
    }
}

impl StdError for TransactionRejected {}

#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct NetworkUnavailable {
    /// What the client was doing when the provider failed
    pub context: String,
    pub message: String,
}

impl fmt::Display for NetworkUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.context, self.message)
    }
}

impl StdError for NetworkUnavailable {}

#[non_exhaustive]
#[derive(Debug)]
pub struct Validation {
    pub reason: String,
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid: {}", self.reason)
    }
}

impl StdError for Validation {}

#[non_exhaustive]
#[derive(Debug, Clone, Copy)]
pub struct MissingNetworkConfig {
    pub chain_id: ChainId,
}

impl fmt::Display for MissingNetworkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "missing conditional tokens network config for chain id {}",
            self.chain_id
        )
    }
}

impl StdError for MissingNetworkConfig {}

impl From<ConditionNotFound> for Error {
    fn from(err: ConditionNotFound) -> Self {
        Error::with_source(Kind::NotFound, err)
    }
}

impl From<MalformedLog> for Error {
    fn from(err: MalformedLog) -> Self {
        Error::with_source(Kind::MalformedLog, err)
    }
}

impl From<TransactionRejected> for Error {
    fn from(err: TransactionRejected) -> Self {
        Error::with_source(Kind::TransactionRejected, err)
    }
}

impl From<NetworkUnavailable> for Error {
    fn from(err: NetworkUnavailable) -> Self {
        Error::with_source(Kind::NetworkUnavailable, err)
    }
}

impl From<Validation> for Error {
    fn from(err: Validation) -> Self {
        Error::with_source(Kind::Validation, err)
    }
}

impl From<MissingNetworkConfig> for Error {
    fn from(err: MissingNetworkConfig) -> Self {
        Error::with_source(Kind::Internal, err)
    }
}
