/// Chain access used by the trading engine
///
/// `ChainRpc` is the seam between the engine and the network. `SolanaRpc`
/// implements it over the nonblocking solana-client; tests use `mock::MockRpc`.
pub mod client;
#[cfg(test)]
pub mod mock;

pub use client::SolanaRpc;

use async_trait::async_trait;
use solana_sdk::{
    account::Account, hash::Hash, pubkey::Pubkey, signature::Signature,
    transaction::VersionedTransaction,
};
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum RpcError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl From<solana_client::client_error::ClientError> for RpcError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        RpcError::RequestFailed(err.to_string())
    }
}

pub type RpcResult<T> = Result<T, RpcError>;

/// Token account balance in raw and UI units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenAmount {
    pub raw: u64,
    pub decimals: u8,
}

impl TokenAmount {
    pub fn ui_amount(&self) -> f64 {
        self.raw as f64 / 10f64.powi(self.decimals as i32)
    }
}

/// Result of one status poll for a signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureLookup {
    /// Unknown to the node or below the required commitment
    NotVisible,
    /// Landed with no error
    Succeeded,
    /// Landed and the program returned an error
    Failed(String),
}

#[async_trait]
pub trait ChainRpc: Send + Sync {
    async fn get_account(&self, address: &Pubkey) -> RpcResult<Option<Account>>;

    /// Accounts owned by `program` whose data matches `bytes` at `offset`
    async fn get_program_accounts_by_memcmp(
        &self,
        program: &Pubkey,
        offset: usize,
        bytes: &[u8],
    ) -> RpcResult<Vec<(Pubkey, Account)>>;

    /// None when the token account does not exist
    async fn get_token_account_balance(&self, token_account: &Pubkey) -> RpcResult<Option<TokenAmount>>;

    /// Native balance in lamports
    async fn get_balance(&self, address: &Pubkey) -> RpcResult<u64>;

    async fn get_latest_blockhash(&self) -> RpcResult<Hash>;

    async fn send_transaction(&self, transaction: &VersionedTransaction) -> RpcResult<Signature>;

    async fn get_signature_status(&self, signature: &Signature) -> RpcResult<SignatureLookup>;

    /// Release held network resources
    async fn close(&self) {}
}
