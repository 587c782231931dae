/// Core types for pool decoding and discovery
use crate::rpc::RpcError;
use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Pool account layout variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolSchema {
    /// No trailing coin-creator field
    Legacy,
    /// Adds `coin_creator` after `lp_supply`
    Current,
}

impl PoolSchema {
    pub fn as_str(&self) -> &'static str {
        match self {
            PoolSchema::Legacy => "legacy",
            PoolSchema::Current => "current",
        }
    }

    /// Body length after the 8-byte account tag
    pub fn body_len(&self) -> usize {
        // bump + index + 6 pubkeys + lp_supply
        let legacy = 1 + 2 + 32 * 6 + 8;
        match self {
            PoolSchema::Legacy => legacy,
            PoolSchema::Current => legacy + 32,
        }
    }
}

impl std::fmt::Display for PoolSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decoded AMM pool account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolRecord {
    pub address: Pubkey,
    pub schema: PoolSchema,
    pub pool_bump: u8,
    pub index: u16,
    pub creator: Pubkey,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub lp_mint: Pubkey,
    pub pool_base_token_account: Pubkey,
    pub pool_quote_token_account: Pubkey,
    pub lp_supply: u64,
    /// Present only in the current schema
    pub coin_creator: Option<Pubkey>,
}

/// Result of decoding one blob against one schema
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
    Decoded(PoolRecord),
    /// Blob is too short for this layout
    NotThisSchema,
    /// Blob cannot be a pool account at all
    Corrupt(String),
}

/// Live reserves read from the pool's two token accounts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolQuote {
    /// Base token balance in UI units
    pub base_reserve: f64,
    /// SOL balance in UI units
    pub quote_reserve: f64,
    /// SOL per base token; infinite when the base side is empty
    pub price: f64,
    pub base_decimals: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPool {
    pub record: PoolRecord,
    pub quote: PoolQuote,
    pub score: f64,
}

impl ScoredPool {
    pub fn pool_type(&self) -> PoolSchema {
        self.record.schema
    }

    pub fn address(&self) -> Pubkey {
        self.record.address
    }

    /// SOL-side liquidity
    pub fn liquidity_sol(&self) -> f64 {
        self.quote.quote_reserve
    }
}

#[derive(Error, Debug)]
pub enum PoolError {
    #[error("No usable pool found for {mint}")]
    NotFound { mint: String },

    #[error("Invalid pool {address}: {reason}")]
    InvalidPool { address: String, reason: String },

    #[error(transparent)]
    Rpc(#[from] RpcError),
}

pub type PoolResult<T> = Result<T, PoolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_lengths() {
        assert_eq!(PoolSchema::Legacy.body_len(), 203);
        assert_eq!(PoolSchema::Current.body_len(), 235);
    }
}
