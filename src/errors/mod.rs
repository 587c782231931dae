/// Error types surfaced by the trading engine
///
/// Lower layers (`RpcError`, `PoolError`, `ConfigError`) convert into
/// `TradeError`, which is what the trader façade returns.
use crate::config::ConfigError;
use crate::pools::PoolError;
use crate::rpc::RpcError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TradeError {
    /// Rejected before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// No venue, coin record or pool found for the mint
    #[error("Discovery failed: {0}")]
    Discovery(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    #[error("Instruction build error: {0}")]
    Build(String),

    /// Transaction never reached the cluster
    #[error("Dispatch failed: {0}")]
    Dispatch(String),

    /// Transaction landed and the program rejected it
    #[error("On-chain error for {signature}: {error}")]
    OnChain { signature: String, error: String },

    /// Transaction never became visible within the retry budget
    #[error("Confirmation timeout for {signature} after {attempts} attempts")]
    ConfirmationTimeout { signature: String, attempts: u32 },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Wallet error: {0}")]
    Wallet(String),
}

impl TradeError {
    /// Whether retrying the same request from scratch can succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TradeError::Rpc(_) | TradeError::Dispatch(_) | TradeError::ConfirmationTimeout { .. }
        )
    }

    /// Short machine-readable reason, stable across message wording
    pub fn kind(&self) -> &'static str {
        match self {
            TradeError::Validation(_) => "validation",
            TradeError::Discovery(_) => "discovery",
            TradeError::Decode(_) => "decode",
            TradeError::Rpc(_) => "rpc",
            TradeError::Build(_) => "build",
            TradeError::Dispatch(_) => "dispatch",
            TradeError::OnChain { .. } => "onchain",
            TradeError::ConfirmationTimeout { .. } => "timeout",
            TradeError::Config(_) => "config",
            TradeError::Wallet(_) => "wallet",
        }
    }
}

impl From<PoolError> for TradeError {
    fn from(err: PoolError) -> Self {
        match err {
            PoolError::Rpc(e) => TradeError::Rpc(e),
            other => TradeError::Discovery(other.to_string()),
        }
    }
}

pub type TradeResult<T> = Result<T, TradeError>;
