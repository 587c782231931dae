/// Shared handles passed explicitly to every trading flow
use crate::config::{Config, ProtocolConstants};
use crate::rpc::ChainRpc;
use crate::swaps::types::{SwapOptions, SwapParams};
use solana_sdk::{pubkey::Pubkey, signature::Keypair, signer::Signer};
use std::sync::Arc;

#[derive(Clone)]
pub struct TradingContext {
    pub rpc: Arc<dyn ChainRpc>,
    pub signer: Arc<Keypair>,
    pub protocol: ProtocolConstants,
    pub config: Config,
}

impl TradingContext {
    pub fn new(rpc: Arc<dyn ChainRpc>, signer: Arc<Keypair>, protocol: ProtocolConstants, config: Config) -> Self {
        Self {
            rpc,
            signer,
            protocol,
            config,
        }
    }

    /// Wallet address; pays fees and signs every swap
    pub fn user(&self) -> Pubkey {
        self.signer.pubkey()
    }

    /// Merge per-call overrides onto the `[trading]` defaults
    pub fn swap_params(&self, slippage_pct: f64, options: &SwapOptions) -> SwapParams {
        SwapParams {
            slippage_pct,
            priority_fee_sol: options
                .priority_fee_sol
                .unwrap_or(self.config.trading.priority_fee_sol),
            compute_unit_limit: options
                .compute_unit_limit
                .unwrap_or(self.config.trading.compute_unit_limit),
        }
    }
}
