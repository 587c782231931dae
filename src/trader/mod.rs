/// Unified trading façade
///
/// Resolves which venue prices a token, remembers that decision and the
/// selected AMM pool per mint, and dispatches buys and sells. `try_buy` and
/// `try_sell` return the typed error; `buy` and `sell` log it and return a
/// plain success flag.
pub mod context;
pub mod info;

pub use context::TradingContext;
pub use info::TokenInfo;

use crate::cache::{CacheConfig, CacheManager};
use crate::errors::{TradeError, TradeResult};
use crate::logger::{self, LogTag};
use crate::pools::{fetch_pool_quote, find_best_pool, score_pool, PoolError, PoolQuote, PoolRecord, ScoredPool};
use crate::swaps::{SwapOptions, SwapOutcome, Venue, VenueRoute};
use crate::tokens::{fetch_mint_decimals, CoinRecordSource, OnChainCoinRecords};
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;

pub struct UnifiedTrader {
    ctx: TradingContext,
    coin_records: Arc<dyn CoinRecordSource>,
    venue_cache: CacheManager<Pubkey, Venue>,
    pool_cache: CacheManager<Pubkey, PoolRecord>,
}

impl UnifiedTrader {
    /// Coin records from chain, cache policies from `[cache]`
    pub fn new(ctx: TradingContext) -> Self {
        let coin_records = Arc::new(OnChainCoinRecords::new(ctx.rpc.clone(), ctx.protocol.clone()));
        let venue_cache = CacheConfig::venue_detection(&ctx.config.cache);
        let pool_cache = CacheConfig::pool_selection(&ctx.config.cache);
        Self::with_components(ctx, coin_records, venue_cache, pool_cache)
    }

    pub fn with_components(
        ctx: TradingContext,
        coin_records: Arc<dyn CoinRecordSource>,
        venue_cache: CacheConfig,
        pool_cache: CacheConfig,
    ) -> Self {
        Self {
            ctx,
            coin_records,
            venue_cache: CacheManager::new(venue_cache),
            pool_cache: CacheManager::new(pool_cache),
        }
    }

    pub fn context(&self) -> &TradingContext {
        &self.ctx
    }

    /// Drop cached venue and pool for `mint`; the next call re-detects
    pub fn invalidate(&self, mint: &Pubkey) {
        self.venue_cache.remove(mint);
        self.pool_cache.remove(mint);
        logger::debug(LogTag::Cache, &format!("Invalidated cached venue and pool for {}", mint));
    }

    /// Release network resources held by the RPC client
    pub async fn close(&self) {
        let venues = self.venue_cache.metrics();
        let pools = self.pool_cache.metrics();
        logger::debug(
            LogTag::Cache,
            &format!(
                "Venue cache hit rate {:.0}%, pool cache hit rate {:.0}%",
                venues.hit_rate() * 100.0,
                pools.hit_rate() * 100.0
            ),
        );
        self.venue_cache.clear();
        self.pool_cache.clear();
        self.ctx.rpc.close().await;
    }

    pub async fn try_buy(
        &self,
        mint: &Pubkey,
        sol_in: f64,
        slippage_pct: f64,
        options: &SwapOptions,
    ) -> TradeResult<SwapOutcome> {
        if !sol_in.is_finite() || sol_in <= 0.0 {
            return Err(TradeError::Validation(format!("SOL amount must be positive, got {}", sol_in)));
        }
        validate_slippage(slippage_pct)?;
        let params = self.ctx.swap_params(slippage_pct, options);

        let route = self.resolve_route(mint).await?;
        logger::info(
            LogTag::Trader,
            &format!("Buying {} SOL of {} on {}", sol_in, mint, route.venue()),
        );
        route.buy(&self.ctx, sol_in, &params).await
    }

    pub async fn try_sell(
        &self,
        mint: &Pubkey,
        percentage: u8,
        slippage_pct: f64,
        options: &SwapOptions,
    ) -> TradeResult<SwapOutcome> {
        if !(1..=100).contains(&percentage) {
            return Err(TradeError::Validation(format!(
                "Percentage must be between 1 and 100, got {}",
                percentage
            )));
        }
        validate_slippage(slippage_pct)?;
        let params = self.ctx.swap_params(slippage_pct, options);

        let route = self.resolve_route(mint).await?;
        logger::info(
            LogTag::Trader,
            &format!("Selling {}% of {} on {}", percentage, mint, route.venue()),
        );
        route.sell(&self.ctx, percentage, &params).await
    }

    /// `try_buy` reduced to a success flag
    pub async fn buy(&self, mint: &Pubkey, sol_in: f64, slippage_pct: f64, options: &SwapOptions) -> bool {
        let result = self.try_buy(mint, sol_in, slippage_pct, options).await;
        report("Buy", mint, result)
    }

    /// `try_sell` reduced to a success flag
    pub async fn sell(&self, mint: &Pubkey, percentage: u8, slippage_pct: f64, options: &SwapOptions) -> bool {
        let result = self.try_sell(mint, percentage, slippage_pct, options).await;
        report("Sell", mint, result)
    }

    /// Venue and market summary. Never fails; errors land in `TokenInfo::error`.
    pub async fn get_token_info(&self, mint: &Pubkey) -> TokenInfo {
        let mint_str = mint.to_string();

        let state = match self.coin_records.fetch_token_state(mint).await {
            Ok(state) => state,
            Err(e) => return TokenInfo::invalid(&mint_str, e.to_string()),
        };

        let venue = Venue::from_completion(state.complete);
        let mut info = TokenInfo {
            valid: true,
            mint: mint_str,
            venue: Some(venue.name().to_string()),
            is_on_bonding_curve: Some(state.is_on_bonding_curve()),
            creator: state.creator.map(|c| c.to_string()),
            ..Default::default()
        };

        match venue {
            Venue::BondingCurve => {
                info.virtual_sol_reserves = Some(state.virtual_sol_reserves);
                info.virtual_token_reserves = Some(state.virtual_token_reserves);
                info.price_sol = Some(state.price_sol());
                match fetch_mint_decimals(self.ctx.rpc.as_ref(), mint).await {
                    Ok(decimals) => info.token_decimals = Some(decimals),
                    Err(e) => logger::debug(LogTag::Tokens, &format!("No decimals for {}: {}", mint, e)),
                }
            }
            Venue::AmmPool => match self.peek_pool(mint).await {
                Ok(pool) => {
                    info.pool_available = Some(true);
                    info.pool_address = Some(pool.address().to_string());
                    info.pool_type = Some(pool.pool_type().to_string());
                    info.liquidity_sol = Some(pool.liquidity_sol());
                    info.price_sol = Some(pool.quote.price);
                    info.token_decimals = Some(pool.quote.base_decimals);
                }
                Err(e) => {
                    info.pool_available = Some(false);
                    info.error = Some(e.to_string());
                }
            },
        }

        info
    }

    /// Venue for `mint` with fresh state to trade against
    async fn resolve_route(&self, mint: &Pubkey) -> TradeResult<VenueRoute> {
        let (venue, state) = match self.venue_cache.get(mint) {
            Some(venue) => {
                logger::debug(LogTag::Cache, &format!("Venue cache hit for {}: {}", mint, venue));
                (venue, None)
            }
            None => {
                let state = self.coin_records.fetch_token_state(mint).await?;
                let venue = Venue::from_completion(state.complete);
                self.venue_cache.insert(*mint, venue);
                (venue, Some(state))
            }
        };

        match venue {
            Venue::BondingCurve => {
                // curve reserves move every trade; always re-read
                let state = match state {
                    Some(state) => state,
                    None => self.coin_records.fetch_token_state(mint).await?,
                };
                if state.complete {
                    logger::warning(
                        LogTag::Trader,
                        &format!("{} graduated since venue detection, switching to AMM", mint),
                    );
                    self.venue_cache.insert(*mint, Venue::AmmPool);
                    return Ok(VenueRoute::AmmPool(self.amm_route(mint).await?));
                }
                Ok(VenueRoute::BondingCurve(state))
            }
            Venue::AmmPool => Ok(VenueRoute::AmmPool(self.amm_route(mint).await?)),
        }
    }

    /// Best pool for `mint` with reserves read now
    async fn amm_route(&self, mint: &Pubkey) -> TradeResult<ScoredPool> {
        let record = match self.pool_cache.get(mint) {
            Some(record) => record,
            None => {
                let best = find_best_pool(self.ctx.rpc.as_ref(), &self.ctx.protocol, mint).await?;
                self.pool_cache.insert(*mint, best.record.clone());
                return Ok(best);
            }
        };

        match fetch_pool_quote(self.ctx.rpc.as_ref(), &record).await {
            Ok(quote) => Ok(rescore(record, quote)),
            Err(e) => {
                if matches!(e, PoolError::InvalidPool { .. }) {
                    self.pool_cache.remove(mint);
                }
                Err(e.into())
            }
        }
    }

    /// Pool for read-only lookups. Uses a cached selection when present but never stores one.
    async fn peek_pool(&self, mint: &Pubkey) -> TradeResult<ScoredPool> {
        match self.pool_cache.peek(mint) {
            Some(record) => {
                let quote = fetch_pool_quote(self.ctx.rpc.as_ref(), &record).await?;
                Ok(rescore(record, quote))
            }
            None => Ok(find_best_pool(self.ctx.rpc.as_ref(), &self.ctx.protocol, mint).await?),
        }
    }
}

fn rescore(record: PoolRecord, quote: PoolQuote) -> ScoredPool {
    ScoredPool {
        score: score_pool(record.schema, quote.quote_reserve),
        record,
        quote,
    }
}

fn validate_slippage(slippage_pct: f64) -> TradeResult<()> {
    if !slippage_pct.is_finite() || slippage_pct < 0.0 {
        return Err(TradeError::Validation(format!(
            "Slippage must be a non-negative percentage, got {}",
            slippage_pct
        )));
    }
    Ok(())
}

fn report(action: &str, mint: &Pubkey, result: TradeResult<SwapOutcome>) -> bool {
    match result {
        Ok(outcome) => {
            logger::info(
                LogTag::Trader,
                &format!("{} of {} confirmed on {}: {}", action, mint, outcome.venue, outcome.signature),
            );
            true
        }
        Err(e @ TradeError::ConfirmationTimeout { .. }) => {
            logger::warning(LogTag::Trader, &format!("{} of {} unresolved: {}", action, mint, e));
            false
        }
        Err(e) => {
            logger::error(
                LogTag::Trader,
                &format!("{} of {} failed [{}]: {}", action, mint, e.kind(), e),
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ProtocolConstants};
    use crate::pools::discovery::test_support::add_pool;
    use crate::pools::PoolSchema;
    use crate::rpc::mock::MockRpc;
    use crate::rpc::SignatureLookup;
    use crate::swaps::pda::associated_token_address;
    use crate::tokens::coin_record::test_support::add_curve;
    use solana_sdk::signature::Keypair;
    use std::sync::atomic::Ordering;

    fn trader(rpc: &Arc<MockRpc>) -> UnifiedTrader {
        let mut config = Config::default();
        config.confirmation.poll_interval_ms = 1;
        config.confirmation.max_retries = 3;
        let ctx = TradingContext::new(
            rpc.clone(),
            Arc::new(Keypair::new()),
            ProtocolConstants::mainnet().unwrap(),
            config,
        );
        UnifiedTrader::new(ctx)
    }

    fn sent_keys(rpc: &MockRpc, index: usize) -> Vec<Pubkey> {
        rpc.sent_transactions()[index].message.static_account_keys().to_vec()
    }

    #[tokio::test]
    async fn test_bonding_curve_token_never_scans_pools() {
        let rpc = Arc::new(MockRpc::new());
        let trader = trader(&rpc);
        let protocol = trader.context().protocol.clone();
        let mint = Pubkey::new_unique();
        add_curve(&rpc, &protocol, &mint, false);
        rpc.push_status(SignatureLookup::Succeeded);

        let outcome = trader
            .try_buy(&mint, 0.01, 15.0, &SwapOptions::default())
            .await
            .unwrap();

        assert_eq!(outcome.venue, "BondingCurve");
        assert!(outcome.amount_in.abs_diff(11_500_000) <= 1);
        assert_eq!(rpc.scan_count(), 0);

        let keys = sent_keys(&rpc, 0);
        assert!(keys.contains(&protocol.pump_fun_program));
        assert!(!keys.contains(&protocol.pump_amm_program));
    }

    #[tokio::test]
    async fn test_graduated_token_uses_best_pool_and_caches_it() {
        let rpc = Arc::new(MockRpc::new());
        let trader = trader(&rpc);
        let protocol = trader.context().protocol.clone();
        let mint = Pubkey::new_unique();
        add_curve(&rpc, &protocol, &mint, true);
        let shallow = add_pool(&rpc, &protocol, &mint, PoolSchema::Current, 0, 1_000_000_000_000, 5_000_000_000);
        let deep = add_pool(&rpc, &protocol, &mint, PoolSchema::Current, 1, 1_000_000_000_000, 10_000_000_000);

        rpc.push_status(SignatureLookup::Succeeded);
        rpc.push_status(SignatureLookup::Succeeded);

        assert!(trader.buy(&mint, 0.1, 10.0, &SwapOptions::default()).await);
        assert!(trader.buy(&mint, 0.1, 10.0, &SwapOptions::default()).await);

        assert_eq!(rpc.scan_count(), 1);
        for index in 0..2 {
            let keys = sent_keys(&rpc, index);
            assert!(keys.contains(&deep.address));
            assert!(!keys.contains(&shallow.address));
        }

        trader.invalidate(&mint);
        rpc.push_status(SignatureLookup::Succeeded);
        assert!(trader.buy(&mint, 0.1, 10.0, &SwapOptions::default()).await);
        assert_eq!(rpc.scan_count(), 2);
    }

    #[tokio::test]
    async fn test_graduated_token_without_pool_fails() {
        let rpc = Arc::new(MockRpc::new());
        let trader = trader(&rpc);
        let protocol = trader.context().protocol.clone();
        let mint = Pubkey::new_unique();
        add_curve(&rpc, &protocol, &mint, true);

        let err = trader
            .try_buy(&mint, 0.1, 10.0, &SwapOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "discovery");
        assert!(rpc.sent_transactions().is_empty());
    }

    #[tokio::test]
    async fn test_percentage_out_of_range_is_rejected_before_network() {
        let rpc = Arc::new(MockRpc::new());
        let trader = trader(&rpc);
        let mint = Pubkey::new_unique();

        for pct in [0u8, 101] {
            let err = trader
                .try_sell(&mint, pct, 15.0, &SwapOptions::default())
                .await
                .unwrap_err();
            assert!(matches!(err, TradeError::Validation(_)));
        }
        assert!(!trader.sell(&mint, 0, 15.0, &SwapOptions::default()).await);

        let err = trader
            .try_buy(&mint, 0.0, 15.0, &SwapOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "validation");

        assert_eq!(rpc.scan_count(), 0);
        assert!(rpc.sent_transactions().is_empty());
        assert_eq!(trader.venue_cache.metrics().misses, 0);
    }

    #[tokio::test]
    async fn test_confirmation_timeout_is_reported() {
        let rpc = Arc::new(MockRpc::new());
        let trader = trader(&rpc);
        let protocol = trader.context().protocol.clone();
        let mint = Pubkey::new_unique();
        add_curve(&rpc, &protocol, &mint, false);

        let err = trader
            .try_buy(&mint, 0.01, 15.0, &SwapOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, TradeError::ConfirmationTimeout { attempts: 3, .. }));
        assert_eq!(rpc.status_polls.load(Ordering::SeqCst), 3);

        assert!(!trader.buy(&mint, 0.01, 15.0, &SwapOptions::default()).await);
    }

    #[tokio::test]
    async fn test_curve_sell_full_position() {
        let rpc = Arc::new(MockRpc::new());
        let trader = trader(&rpc);
        let protocol = trader.context().protocol.clone();
        let mint = Pubkey::new_unique();
        add_curve(&rpc, &protocol, &mint, false);
        let ata = associated_token_address(&protocol, &trader.context().user(), &mint);
        rpc.set_token_balance(ata, 5_000_000_000, 6);
        rpc.push_status(SignatureLookup::Succeeded);

        let outcome = trader
            .try_sell(&mint, 100, 15.0, &SwapOptions::default())
            .await
            .unwrap();
        assert_eq!(outcome.amount_in, 5_000_000_000);
        assert!(outcome.amount_out_bound > 0);
    }

    #[tokio::test]
    async fn test_token_info_for_both_venues() {
        let rpc = Arc::new(MockRpc::new());
        let trader = trader(&rpc);
        let protocol = trader.context().protocol.clone();

        let curve_mint = Pubkey::new_unique();
        add_curve(&rpc, &protocol, &curve_mint, false);
        let mut mint_data = vec![0u8; 82];
        mint_data[44] = 6;
        rpc.add_account(curve_mint, protocol.token_program, mint_data);
        let info = trader.get_token_info(&curve_mint).await;
        assert!(info.valid);
        assert_eq!(info.is_on_bonding_curve, Some(true));
        assert_eq!(info.virtual_sol_reserves, Some(30_000_000_000));
        assert_eq!(info.token_decimals, Some(6));
        assert!(info.pool_address.is_none());

        let amm_mint = Pubkey::new_unique();
        add_curve(&rpc, &protocol, &amm_mint, true);
        let pool = add_pool(&rpc, &protocol, &amm_mint, PoolSchema::Legacy, 0, 1_000_000_000, 2_000_000_000);
        let info = trader.get_token_info(&amm_mint).await;
        assert_eq!(info.pool_available, Some(true));
        assert_eq!(info.pool_address, Some(pool.address.to_string()));
        assert_eq!(info.pool_type.as_deref(), Some("legacy"));
        assert_eq!(info.token_decimals, Some(6));

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["venue"], "PumpSwap");
        assert!(json.get("virtual_sol_reserves").is_none());

        let missing = trader.get_token_info(&Pubkey::new_unique()).await;
        assert!(!missing.valid);
        assert!(missing.error.is_some());
    }

    #[tokio::test]
    async fn test_token_info_leaves_pool_cache_alone() {
        let rpc = Arc::new(MockRpc::new());
        let trader = trader(&rpc);
        let protocol = trader.context().protocol.clone();
        let mint = Pubkey::new_unique();
        add_curve(&rpc, &protocol, &mint, true);
        add_pool(&rpc, &protocol, &mint, PoolSchema::Current, 0, 1_000_000_000_000, 5_000_000_000);

        let info = trader.get_token_info(&mint).await;
        assert_eq!(info.pool_available, Some(true));
        assert!(trader.pool_cache.is_empty());
        assert_eq!(rpc.scan_count(), 1);

        // the trade still does its own discovery
        rpc.push_status(SignatureLookup::Succeeded);
        assert!(trader.buy(&mint, 0.1, 10.0, &SwapOptions::default()).await);
        assert_eq!(rpc.scan_count(), 2);
        assert_eq!(trader.pool_cache.len(), 1);

        // a cached selection is read without rescanning or counting as a hit
        let hits = trader.pool_cache.metrics().hits;
        let info = trader.get_token_info(&mint).await;
        assert_eq!(info.pool_available, Some(true));
        assert_eq!(rpc.scan_count(), 2);
        assert_eq!(trader.pool_cache.metrics().hits, hits);
    }

    #[tokio::test]
    async fn test_close_releases_rpc() {
        let rpc = Arc::new(MockRpc::new());
        let trader = trader(&rpc);
        trader.venue_cache.insert(Pubkey::new_unique(), Venue::BondingCurve);
        trader.close().await;
        assert_eq!(rpc.closed.load(Ordering::SeqCst), 1);
        assert!(trader.venue_cache.is_empty());
    }
}
