/// AMM venue: swaps against a discovered pump AMM pool
///
/// SOL enters and leaves through a temporary wSOL account that is closed
/// at the end of every transaction.
use super::instructions::{
    build_amm_swap_instruction, close_account_instruction, compute_budget_instructions,
    create_ata_instruction, wrap_sol_instructions, AmmUserAccounts,
};
use super::pda::associated_token_address;
use super::pricing::{priority_fee_micro_lamports, size_buy, size_sell};
use super::transaction::submit_and_confirm;
use super::types::{SwapOutcome, SwapParams, SwapPlan, SwapSide};
use crate::errors::{TradeError, TradeResult};
use crate::logger::{self, LogTag};
use crate::pools::{PoolQuote, PoolRecord};
use crate::tokens::get_user_token_balance;
use crate::trader::TradingContext;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey};

pub const VENUE_NAME: &str = "PumpSwap";

fn user_accounts(ctx: &TradingContext, pool: &PoolRecord) -> AmmUserAccounts {
    let user = ctx.user();
    AmmUserAccounts {
        user,
        user_base_ata: associated_token_address(&ctx.protocol, &user, &pool.base_mint),
        user_quote_ata: associated_token_address(&ctx.protocol, &user, &pool.quote_mint),
    }
}

fn budget(ctx: &TradingContext, params: &SwapParams) -> [Instruction; 2] {
    let micro_lamports = priority_fee_micro_lamports(
        params.priority_fee_sol,
        params.compute_unit_limit,
        ctx.protocol.lamports_per_sol,
    );
    compute_budget_instructions(params.compute_unit_limit, micro_lamports)
}

/// Create-ATA instruction when `ata` does not exist yet
async fn ensure_ata(
    ctx: &TradingContext,
    ata: &Pubkey,
    owner: &Pubkey,
    mint: &Pubkey,
) -> TradeResult<Option<Instruction>> {
    if ctx.rpc.get_account(ata).await?.is_some() {
        return Ok(None);
    }
    logger::debug(LogTag::Swap, &format!("Creating token account {} for mint {}", ata, mint));
    Ok(Some(create_ata_instruction(&ctx.protocol, owner, owner, mint)))
}

pub async fn plan_buy(
    ctx: &TradingContext,
    pool: &PoolRecord,
    quote: &PoolQuote,
    sol_in: f64,
    params: &SwapParams,
) -> TradeResult<SwapPlan> {
    let sizing = size_buy(
        sol_in,
        quote.base_reserve,
        quote.quote_reserve,
        quote.base_decimals,
        params.slippage_pct,
        ctx.protocol.lamports_per_sol,
    );
    if !sizing.is_usable() {
        return Err(TradeError::Validation(format!(
            "Pool {} cannot price a {} SOL buy (price {}, out {})",
            pool.address, sol_in, sizing.price, sizing.base_out
        )));
    }

    let accounts = user_accounts(ctx, pool);
    let mut instructions = budget(ctx, params).to_vec();

    if let Some(ix) = ensure_ata(ctx, &accounts.user_quote_ata, &accounts.user, &pool.quote_mint).await? {
        instructions.push(ix);
    }
    instructions.extend(
        wrap_sol_instructions(&ctx.protocol, &accounts.user, &accounts.user_quote_ata, sizing.max_quote_in)
            .map_err(TradeError::Build)?,
    );
    if let Some(ix) = ensure_ata(ctx, &accounts.user_base_ata, &accounts.user, &pool.base_mint).await? {
        instructions.push(ix);
    }

    instructions.push(
        build_amm_swap_instruction(
            &ctx.protocol,
            SwapSide::Buy,
            pool,
            &accounts,
            sizing.base_out,
            sizing.max_quote_in,
        )
        .map_err(TradeError::Build)?,
    );
    instructions.push(
        close_account_instruction(&ctx.protocol, &accounts.user_quote_ata, &accounts.user)
            .map_err(TradeError::Build)?,
    );

    Ok(SwapPlan {
        instructions,
        amount: sizing.base_out,
        bound: sizing.max_quote_in,
    })
}

pub async fn plan_sell(
    ctx: &TradingContext,
    pool: &PoolRecord,
    quote: &PoolQuote,
    percentage: u8,
    params: &SwapParams,
) -> TradeResult<SwapPlan> {
    let accounts = user_accounts(ctx, pool);

    let balance = get_user_token_balance(ctx.rpc.as_ref(), &ctx.protocol, &accounts.user, &pool.base_mint)
        .await?
        .filter(|b| b.raw > 0)
        .ok_or_else(|| TradeError::Validation(format!("No {} balance to sell", pool.base_mint)))?;

    let sell_ui = balance.ui_amount() * (percentage as f64 / 100.0);
    let base_amount_in = (sell_ui * 10f64.powi(quote.base_decimals as i32)).floor();
    if !(base_amount_in > 0.0) {
        return Err(TradeError::Validation(format!(
            "Nothing to sell after applying {}%",
            percentage
        )));
    }
    let base_amount_in = (base_amount_in as u64).min(balance.raw);

    let min_quote_out = size_sell(
        sell_ui,
        quote.base_reserve,
        quote.quote_reserve,
        params.slippage_pct,
        ctx.protocol.lamports_per_sol,
    );
    if min_quote_out <= 0 {
        return Err(TradeError::Validation(format!(
            "Minimum SOL out is {} for pool {}; slippage too wide or no liquidity",
            min_quote_out, pool.address
        )));
    }
    let min_quote_out = min_quote_out as u64;

    let mut instructions = budget(ctx, params).to_vec();
    if let Some(ix) = ensure_ata(ctx, &accounts.user_quote_ata, &accounts.user, &pool.quote_mint).await? {
        instructions.push(ix);
    }
    instructions.push(
        build_amm_swap_instruction(
            &ctx.protocol,
            SwapSide::Sell,
            pool,
            &accounts,
            base_amount_in,
            min_quote_out,
        )
        .map_err(TradeError::Build)?,
    );
    instructions.push(
        close_account_instruction(&ctx.protocol, &accounts.user_quote_ata, &accounts.user)
            .map_err(TradeError::Build)?,
    );

    Ok(SwapPlan {
        instructions,
        amount: base_amount_in,
        bound: min_quote_out,
    })
}

pub async fn buy(
    ctx: &TradingContext,
    pool: &PoolRecord,
    quote: &PoolQuote,
    sol_in: f64,
    params: &SwapParams,
) -> TradeResult<SwapOutcome> {
    let plan = plan_buy(ctx, pool, quote, sol_in, params).await?;

    logger::info(
        LogTag::Swap,
        &format!(
            "AMM buy via {} pool {}: {} base units for at most {} lamports",
            pool.schema, pool.address, plan.amount, plan.bound
        ),
    );

    let signature =
        submit_and_confirm(ctx.rpc.as_ref(), &ctx.signer, &plan.instructions, &ctx.config.confirmation).await?;

    Ok(SwapOutcome {
        signature,
        venue: VENUE_NAME,
        side: SwapSide::Buy,
        amount_in: plan.bound,
        amount_out_bound: plan.amount,
    })
}

pub async fn sell(
    ctx: &TradingContext,
    pool: &PoolRecord,
    quote: &PoolQuote,
    percentage: u8,
    params: &SwapParams,
) -> TradeResult<SwapOutcome> {
    let plan = plan_sell(ctx, pool, quote, percentage, params).await?;

    logger::info(
        LogTag::Swap,
        &format!(
            "AMM sell via {} pool {}: {} base units ({}%) for at least {} lamports",
            pool.schema, pool.address, plan.amount, percentage, plan.bound
        ),
    );

    let signature =
        submit_and_confirm(ctx.rpc.as_ref(), &ctx.signer, &plan.instructions, &ctx.config.confirmation).await?;

    Ok(SwapOutcome {
        signature,
        venue: VENUE_NAME,
        side: SwapSide::Sell,
        amount_in: plan.amount,
        amount_out_bound: plan.bound,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ProtocolConstants};
    use crate::pools::discovery::test_support::add_pool;
    use crate::pools::{fetch_pool_quote, PoolSchema};
    use crate::rpc::mock::MockRpc;
    use solana_sdk::signature::Keypair;
    use std::sync::Arc;

    fn params(slippage_pct: f64) -> SwapParams {
        SwapParams {
            slippage_pct,
            priority_fee_sol: 0.0005,
            compute_unit_limit: 120_000,
        }
    }

    async fn setup(schema: PoolSchema) -> (Arc<MockRpc>, TradingContext, PoolRecord, PoolQuote) {
        let rpc = Arc::new(MockRpc::new());
        let protocol = ProtocolConstants::mainnet().unwrap();
        let mint = Pubkey::new_unique();
        // 1,000,000 tokens against 50 SOL
        let pool = add_pool(&rpc, &protocol, &mint, schema, 0, 1_000_000_000_000, 50_000_000_000);
        let quote = fetch_pool_quote(rpc.as_ref(), &pool).await.unwrap();
        let ctx = TradingContext::new(rpc.clone(), Arc::new(Keypair::new()), protocol, Config::default());
        (rpc, ctx, pool, quote)
    }

    #[tokio::test]
    async fn test_buy_instruction_sequence() {
        let (_rpc, ctx, pool, quote) = setup(PoolSchema::Current).await;
        let plan = plan_buy(&ctx, &pool, &quote, 0.5, &params(10.0)).await.unwrap();
        let ixs = &plan.instructions;

        // budget x2, create wSOL, transfer, sync, create base, swap, close
        assert_eq!(ixs.len(), 8);
        assert_eq!(ixs[2].program_id, ctx.protocol.associated_token_program);
        assert_eq!(ixs[3].program_id, ctx.protocol.system_program);
        assert_eq!(ixs[4].program_id, ctx.protocol.token_program);
        assert_eq!(ixs[5].program_id, ctx.protocol.associated_token_program);
        assert_eq!(ixs[6].program_id, ctx.protocol.pump_amm_program);
        assert_eq!(ixs[6].accounts.len(), 21);
        assert_eq!(ixs[7].program_id, ctx.protocol.token_program);

        assert!(plan.amount.abs_diff(10_000_000_000) <= 1);
        assert!(plan.bound.abs_diff(550_000_000) <= 1);
    }

    #[tokio::test]
    async fn test_buy_with_existing_accounts() {
        let (rpc, ctx, pool, quote) = setup(PoolSchema::Legacy).await;
        let user = ctx.user();
        for mint in [pool.base_mint, pool.quote_mint] {
            rpc.add_account(associated_token_address(&ctx.protocol, &user, &mint), ctx.protocol.token_program, vec![0u8; 165]);
        }

        let plan = plan_buy(&ctx, &pool, &quote, 0.5, &params(10.0)).await.unwrap();
        assert_eq!(plan.instructions.len(), 6);
        assert_eq!(plan.instructions[4].accounts.len(), 17);
    }

    #[tokio::test]
    async fn test_sell_instruction_sequence() {
        let (rpc, ctx, pool, quote) = setup(PoolSchema::Current).await;
        let ata = associated_token_address(&ctx.protocol, &ctx.user(), &pool.base_mint);
        rpc.set_token_balance(ata, 2_000_000_000, 6);

        let plan = plan_sell(&ctx, &pool, &quote, 50, &params(5.0)).await.unwrap();
        let ixs = &plan.instructions;

        // budget x2, create wSOL, swap, close
        assert_eq!(ixs.len(), 5);
        assert_eq!(ixs[3].accounts.len(), 19);
        assert_eq!(plan.amount, 1_000_000_000);
        // 1000 tokens at 0.00005 SOL less 5%
        assert!(plan.bound.abs_diff(47_500_000) <= 1);
    }

    #[tokio::test]
    async fn test_sell_aborts_on_empty_balance_or_full_slippage() {
        let (rpc, ctx, pool, quote) = setup(PoolSchema::Current).await;
        assert_eq!(plan_sell(&ctx, &pool, &quote, 100, &params(5.0)).await.unwrap_err().kind(), "validation");

        let ata = associated_token_address(&ctx.protocol, &ctx.user(), &pool.base_mint);
        rpc.set_token_balance(ata, 2_000_000_000, 6);
        assert_eq!(plan_sell(&ctx, &pool, &quote, 100, &params(100.0)).await.unwrap_err().kind(), "validation");
    }

    #[tokio::test]
    async fn test_buy_rejects_empty_pool() {
        let (_rpc, ctx, pool, mut quote) = setup(PoolSchema::Current).await;
        quote.base_reserve = 0.0;
        quote.price = f64::INFINITY;
        assert_eq!(plan_buy(&ctx, &pool, &quote, 0.5, &params(10.0)).await.unwrap_err().kind(), "validation");
    }
}
