/// Pool discovery and ranking
///
/// Scans every account owned by the AMM program whose base-mint field
/// matches the token, decodes each candidate, reads live vault balances
/// and keeps the highest-scored pool.
///
/// The scan and the balance reads are separate requests; balances may move
/// between them. No attempt is made to make the snapshot atomic.
use super::decoders::{decode_pool_account, derive_pool_address};
use super::types::{DecodeOutcome, PoolError, PoolQuote, PoolRecord, PoolResult, PoolSchema, ScoredPool};
use crate::config::ProtocolConstants;
use crate::constants::{CURRENT_SCHEMA_SCORE_FACTOR, PUMP_AMM_BASE_MINT_OFFSET};
use crate::logger::{self, LogTag};
use crate::rpc::ChainRpc;
use crate::swaps::pricing::pool_price;
use solana_sdk::pubkey::Pubkey;

/// Liquidity score: 2 × SOL side, with a bonus for current-schema pools
pub fn score_pool(schema: PoolSchema, sol_balance: f64) -> f64 {
    let factor = match schema {
        PoolSchema::Current => CURRENT_SCHEMA_SCORE_FACTOR,
        PoolSchema::Legacy => 1.0,
    };
    2.0 * sol_balance * factor
}

/// Sort by descending score. Stable, so equal scores keep scan order.
pub fn rank_pools(mut pools: Vec<ScoredPool>) -> Vec<ScoredPool> {
    pools.sort_by(|a, b| b.score.total_cmp(&a.score));
    pools
}

/// Top-ranked pool with a positive score
pub fn select_best(pools: Vec<ScoredPool>) -> Option<ScoredPool> {
    rank_pools(pools).into_iter().next().filter(|p| p.score > 0.0)
}

/// Read both vault balances for a decoded pool
pub async fn fetch_pool_quote(rpc: &dyn ChainRpc, record: &PoolRecord) -> PoolResult<PoolQuote> {
    let base = rpc
        .get_token_account_balance(&record.pool_base_token_account)
        .await?
        .ok_or_else(|| PoolError::InvalidPool {
            address: record.address.to_string(),
            reason: "base vault account missing".to_string(),
        })?;
    let quote = rpc
        .get_token_account_balance(&record.pool_quote_token_account)
        .await?
        .ok_or_else(|| PoolError::InvalidPool {
            address: record.address.to_string(),
            reason: "quote vault account missing".to_string(),
        })?;

    let base_reserve = base.ui_amount();
    let quote_reserve = quote.ui_amount();

    Ok(PoolQuote {
        base_reserve,
        quote_reserve,
        price: pool_price(base_reserve, quote_reserve),
        base_decimals: base.decimals,
    })
}

/// Decode, verify and score every candidate pool for `mint`, ranked
pub async fn discover_pools(
    rpc: &dyn ChainRpc,
    protocol: &ProtocolConstants,
    mint: &Pubkey,
) -> PoolResult<Vec<ScoredPool>> {
    let candidates = rpc
        .get_program_accounts_by_memcmp(
            &protocol.pump_amm_program,
            PUMP_AMM_BASE_MINT_OFFSET,
            mint.as_ref(),
        )
        .await?;

    logger::debug(
        LogTag::PoolDiscovery,
        &format!("{} candidate accounts for {}", candidates.len(), mint),
    );

    let mut scored = Vec::new();

    for (address, account) in candidates {
        let record = match decode_pool_account(&address, &account.data) {
            DecodeOutcome::Decoded(record) => record,
            DecodeOutcome::NotThisSchema => {
                logger::debug(
                    LogTag::PoolDiscovery,
                    &format!("{}: matches neither pool schema, skipped", address),
                );
                continue;
            }
            DecodeOutcome::Corrupt(reason) => {
                logger::debug(
                    LogTag::PoolDiscovery,
                    &format!("{}: not a pool account ({}), skipped", address, reason),
                );
                continue;
            }
        };

        // memcmp is a prefix filter; re-check after decode
        if record.base_mint != *mint {
            logger::debug(
                LogTag::PoolDiscovery,
                &format!("{}: base mint {} does not match, skipped", address, record.base_mint),
            );
            continue;
        }
        if record.quote_mint != protocol.sol_mint {
            logger::debug(
                LogTag::PoolDiscovery,
                &format!("{}: quote mint {} is not SOL, skipped", address, record.quote_mint),
            );
            continue;
        }

        let expected = derive_pool_address(
            &protocol.pump_amm_program,
            record.index,
            &record.creator,
            &record.base_mint,
            &record.quote_mint,
        );
        if expected != address {
            logger::debug(
                LogTag::PoolDiscovery,
                &format!("{}: derived pool address is {}", address, expected),
            );
        }

        let quote = match fetch_pool_quote(rpc, &record).await {
            Ok(quote) => quote,
            Err(PoolError::InvalidPool { address, reason }) => {
                logger::warning(
                    LogTag::PoolDiscovery,
                    &format!("Skipping pool {}: {}", address, reason),
                );
                continue;
            }
            Err(e) => return Err(e),
        };

        let score = score_pool(record.schema, quote.quote_reserve);
        logger::debug(
            LogTag::PoolDiscovery,
            &format!(
                "{} [{}] sol={:.4} base={:.2} price={:.10} score={:.4}",
                address, record.schema, quote.quote_reserve, quote.base_reserve, quote.price, score
            ),
        );

        scored.push(ScoredPool { record, quote, score });
    }

    Ok(rank_pools(scored))
}

/// Best pool for `mint`, or `PoolError::NotFound`
pub async fn find_best_pool(
    rpc: &dyn ChainRpc,
    protocol: &ProtocolConstants,
    mint: &Pubkey,
) -> PoolResult<ScoredPool> {
    let pools = discover_pools(rpc, protocol, mint).await?;
    let total = pools.len();

    match select_best(pools) {
        Some(best) => {
            logger::info(
                LogTag::PoolDiscovery,
                &format!(
                    "Selected {} pool {} for {} (liquidity {:.4} SOL, {} candidates)",
                    best.pool_type(),
                    best.address(),
                    mint,
                    best.liquidity_sol(),
                    total
                ),
            );
            Ok(best)
        }
        None => Err(PoolError::NotFound {
            mint: mint.to_string(),
        }),
    }
}
