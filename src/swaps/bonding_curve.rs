/// Bonding curve venue: buy and sell against the launch program
///
/// Sizing uses the curve's virtual reserves, never live pool balances.
use super::instructions::{
    build_curve_swap_instruction, close_account_instruction, compute_budget_instructions,
    create_ata_instruction, CurveAccounts,
};
use super::pda;
use super::pricing::{portion_of, priority_fee_micro_lamports, size_curve_buy, size_curve_sell};
use super::transaction::submit_and_confirm;
use super::types::{SwapOutcome, SwapParams, SwapPlan, SwapSide};
use crate::errors::{TradeError, TradeResult};
use crate::logger::{self, LogTag};
use crate::tokens::{get_user_token_balance, TokenState};
use crate::trader::TradingContext;
use solana_sdk::instruction::Instruction;

pub const VENUE_NAME: &str = "BondingCurve";

fn curve_accounts(ctx: &TradingContext, state: &TokenState) -> TradeResult<CurveAccounts> {
    if state.complete {
        return Err(TradeError::Discovery(format!(
            "{} has graduated and trades only on the AMM",
            state.mint
        )));
    }
    let creator = state.creator.ok_or_else(|| {
        TradeError::Decode(format!("Bonding curve {} has no creator field", state.bonding_curve))
    })?;

    let user = ctx.user();
    Ok(CurveAccounts {
        mint: state.mint,
        bonding_curve: state.bonding_curve,
        associated_bonding_curve: state.associated_bonding_curve,
        creator_vault: pda::curve_creator_vault(&ctx.protocol, &creator),
        user,
        user_token_ata: pda::associated_token_address(&ctx.protocol, &user, &state.mint),
    })
}

fn budget(ctx: &TradingContext, params: &SwapParams) -> [Instruction; 2] {
    let micro_lamports = priority_fee_micro_lamports(
        params.priority_fee_sol,
        params.compute_unit_limit,
        ctx.protocol.lamports_per_sol,
    );
    compute_budget_instructions(params.compute_unit_limit, micro_lamports)
}

/// Instructions for spending `sol_in` SOL on the curve
pub async fn plan_buy(
    ctx: &TradingContext,
    state: &TokenState,
    sol_in: f64,
    params: &SwapParams,
) -> TradeResult<SwapPlan> {
    let accounts = curve_accounts(ctx, state)?;

    let sizing = size_curve_buy(
        sol_in,
        state.virtual_sol_reserves,
        state.virtual_token_reserves,
        params.slippage_pct,
        ctx.protocol.lamports_per_sol,
    );
    if sizing.token_amount == 0 || sizing.max_sol_cost == 0 {
        return Err(TradeError::Validation(format!(
            "Buy of {} SOL sizes to {} tokens / {} lamports",
            sol_in, sizing.token_amount, sizing.max_sol_cost
        )));
    }

    let mut instructions = budget(ctx, params).to_vec();

    if ctx.rpc.get_account(&accounts.user_token_ata).await?.is_none() {
        logger::debug(
            LogTag::Swap,
            &format!("Creating token account {}", accounts.user_token_ata),
        );
        instructions.push(create_ata_instruction(&ctx.protocol, &accounts.user, &accounts.user, &state.mint));
    }

    instructions.push(
        build_curve_swap_instruction(
            &ctx.protocol,
            SwapSide::Buy,
            &accounts,
            sizing.token_amount,
            sizing.max_sol_cost,
        )
        .map_err(TradeError::Build)?,
    );

    Ok(SwapPlan {
        instructions,
        amount: sizing.token_amount,
        bound: sizing.max_sol_cost,
    })
}

/// Instructions for selling `percentage` of the wallet's holding
pub async fn plan_sell(
    ctx: &TradingContext,
    state: &TokenState,
    percentage: u8,
    params: &SwapParams,
) -> TradeResult<SwapPlan> {
    let accounts = curve_accounts(ctx, state)?;

    let balance = get_user_token_balance(ctx.rpc.as_ref(), &ctx.protocol, &accounts.user, &state.mint)
        .await?
        .filter(|b| b.raw > 0)
        .ok_or_else(|| TradeError::Validation(format!("No {} balance to sell", state.mint)))?;

    let amount = portion_of(balance.raw, percentage);
    let sizing = size_curve_sell(
        amount,
        state.virtual_sol_reserves,
        state.virtual_token_reserves,
        params.slippage_pct,
        ctx.protocol.lamports_per_sol,
    );
    if sizing.token_amount == 0 || sizing.min_sol_output <= 0 {
        return Err(TradeError::Validation(format!(
            "Sell of {}% sizes to {} tokens / min {} lamports",
            percentage, sizing.token_amount, sizing.min_sol_output
        )));
    }
    let min_sol_output = sizing.min_sol_output as u64;

    let mut instructions = budget(ctx, params).to_vec();
    instructions.push(
        build_curve_swap_instruction(&ctx.protocol, SwapSide::Sell, &accounts, amount, min_sol_output)
            .map_err(TradeError::Build)?,
    );

    if percentage == 100 {
        instructions.push(
            close_account_instruction(&ctx.protocol, &accounts.user_token_ata, &accounts.user)
                .map_err(TradeError::Build)?,
        );
    }

    Ok(SwapPlan {
        instructions,
        amount,
        bound: min_sol_output,
    })
}

pub async fn buy(
    ctx: &TradingContext,
    state: &TokenState,
    sol_in: f64,
    params: &SwapParams,
) -> TradeResult<SwapOutcome> {
    let plan = plan_buy(ctx, state, sol_in, params).await?;

    logger::info(
        LogTag::Swap,
        &format!(
            "Curve buy {}: {} tokens for at most {} lamports",
            state.mint, plan.amount, plan.bound
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
    state: &TokenState,
    percentage: u8,
    params: &SwapParams,
) -> TradeResult<SwapOutcome> {
    let plan = plan_sell(ctx, state, percentage, params).await?;

    logger::info(
        LogTag::Swap,
        &format!(
            "Curve sell {}: {} tokens ({}%) for at least {} lamports",
            state.mint, plan.amount, percentage, plan.bound
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
