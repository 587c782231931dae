/// Coin records: the bonding curve account that decides a token's venue
///
/// The completion flag is read fresh on every lookup; only the façade's
/// venue cache remembers it.
use crate::config::ProtocolConstants;
use crate::errors::{TradeError, TradeResult};
use crate::logger::{self, LogTag};
use crate::pools::decoders::decode_bonding_curve;
use crate::rpc::ChainRpc;
use crate::swaps::pda;
use crate::swaps::pricing::curve_price;
use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;

/// Launch-platform view of a token
#[derive(Debug, Clone, PartialEq)]
pub struct TokenState {
    pub mint: Pubkey,
    /// True once the token has graduated to the AMM
    pub complete: bool,
    pub virtual_sol_reserves: u64,
    pub virtual_token_reserves: u64,
    pub real_sol_reserves: u64,
    pub real_token_reserves: u64,
    pub token_total_supply: u64,
    pub bonding_curve: Pubkey,
    pub associated_bonding_curve: Pubkey,
    /// Absent on curve accounts created before creator fees
    pub creator: Option<Pubkey>,
}

impl TokenState {
    pub fn is_on_bonding_curve(&self) -> bool {
        !self.complete
    }

    /// Curve spot price in SOL per token
    pub fn price_sol(&self) -> f64 {
        curve_price(self.virtual_sol_reserves, self.virtual_token_reserves)
    }
}

#[async_trait]
pub trait CoinRecordSource: Send + Sync {
    /// Current state for `mint`. A missing record is a discovery error.
    async fn fetch_token_state(&self, mint: &Pubkey) -> TradeResult<TokenState>;
}

/// Reads the bonding curve PDA directly from chain
pub struct OnChainCoinRecords {
    rpc: Arc<dyn ChainRpc>,
    protocol: ProtocolConstants,
}

impl OnChainCoinRecords {
    pub fn new(rpc: Arc<dyn ChainRpc>, protocol: ProtocolConstants) -> Self {
        Self { rpc, protocol }
    }
}

#[async_trait]
impl CoinRecordSource for OnChainCoinRecords {
    async fn fetch_token_state(&self, mint: &Pubkey) -> TradeResult<TokenState> {
        let bonding_curve = pda::bonding_curve_address(&self.protocol, mint);
        let associated_bonding_curve = pda::associated_bonding_curve_address(&self.protocol, &bonding_curve, mint);

        let account = self.rpc.get_account(&bonding_curve).await?.ok_or_else(|| {
            TradeError::Discovery(format!("No coin record for {} (bonding curve {} missing)", mint, bonding_curve))
        })?;

        if account.owner != self.protocol.pump_fun_program {
            return Err(TradeError::Discovery(format!(
                "Bonding curve {} is owned by {}, not the launch program",
                bonding_curve, account.owner
            )));
        }

        let curve = decode_bonding_curve(&account.data)
            .map_err(|e| TradeError::Decode(format!("Bonding curve {}: {}", bonding_curve, e)))?;

        logger::debug(
            LogTag::Tokens,
            &format!(
                "{} complete={} vsol={} vtok={}",
                mint, curve.complete, curve.virtual_sol_reserves, curve.virtual_token_reserves
            ),
        );

        Ok(TokenState {
            mint: *mint,
            complete: curve.complete,
            virtual_sol_reserves: curve.virtual_sol_reserves,
            virtual_token_reserves: curve.virtual_token_reserves,
            real_sol_reserves: curve.real_sol_reserves,
            real_token_reserves: curve.real_token_reserves,
            token_total_supply: curve.token_total_supply,
            bonding_curve,
            associated_bonding_curve,
            creator: curve.creator,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::add_curve;
    use super::*;
    use crate::rpc::mock::MockRpc;

    fn source(rpc: &Arc<MockRpc>) -> OnChainCoinRecords {
        OnChainCoinRecords::new(rpc.clone(), ProtocolConstants::mainnet().unwrap())
    }

    #[tokio::test]
    async fn test_reads_curve_state() {
        let rpc = Arc::new(MockRpc::new());
        let protocol = ProtocolConstants::mainnet().unwrap();
        let mint = Pubkey::new_unique();
        let creator = add_curve(&rpc, &protocol, &mint, false);

        let state = source(&rpc).fetch_token_state(&mint).await.unwrap();
        assert!(state.is_on_bonding_curve());
        assert_eq!(state.creator, Some(creator));
        assert_eq!(state.virtual_sol_reserves, 30_000_000_000);
        assert_eq!(state.bonding_curve, pda::bonding_curve_address(&protocol, &mint));
        assert!((state.price_sol() - 30.0 / 1_073_000_000.0).abs() < 1e-15);
    }

    #[tokio::test]
    async fn test_missing_record_is_discovery_error() {
        let rpc = Arc::new(MockRpc::new());
        let err = source(&rpc).fetch_token_state(&Pubkey::new_unique()).await.unwrap_err();
        assert_eq!(err.kind(), "discovery");
    }

    #[tokio::test]
    async fn test_corrupt_record_is_decode_error() {
        let rpc = Arc::new(MockRpc::new());
        let protocol = ProtocolConstants::mainnet().unwrap();
        let mint = Pubkey::new_unique();
        rpc.add_account(
            pda::bonding_curve_address(&protocol, &mint),
            protocol.pump_fun_program,
            vec![0u8; 16],
        );

        let err = source(&rpc).fetch_token_state(&mint).await.unwrap_err();
        assert_eq!(err.kind(), "decode");
    }
}
