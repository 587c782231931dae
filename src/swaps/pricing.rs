/// Swap sizing and slippage bounds
///
/// Pure functions. AMM sizing works on live vault balances in UI units;
/// bonding curve sizing works on the curve's virtual reserves.
use crate::constants::{BONDING_CURVE_SOL_SCALE, BONDING_CURVE_TOKEN_SCALE};

/// SOL per base token. Infinite when the base side is empty.
pub fn pool_price(base_reserve: f64, quote_reserve: f64) -> f64 {
    if base_reserve <= 0.0 {
        f64::INFINITY
    } else {
        quote_reserve / base_reserve
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuySizing {
    pub price: f64,
    /// Base tokens out, smallest units
    pub base_out: u64,
    /// Lamports the swap may spend at most
    pub max_quote_in: u64,
}

impl BuySizing {
    /// False when the pool cannot be priced or the output rounds to zero
    pub fn is_usable(&self) -> bool {
        self.price.is_finite() && self.price > 0.0 && self.base_out > 0 && self.max_quote_in > 0
    }
}

pub fn size_buy(
    sol_in: f64,
    base_reserve: f64,
    quote_reserve: f64,
    base_decimals: u8,
    slippage_pct: f64,
    lamports_per_sol: u64,
) -> BuySizing {
    let price = pool_price(base_reserve, quote_reserve);
    let base_out = (sol_in / price * 10f64.powi(base_decimals as i32)).floor();
    let max_quote_in = (sol_in * (1.0 + slippage_pct / 100.0) * lamports_per_sol as f64).floor();

    BuySizing {
        price,
        base_out: to_amount(base_out),
        max_quote_in: to_amount(max_quote_in),
    }
}

/// Minimum lamports out for selling `token_amount` (UI units).
/// A result <= 0 means the swap must not be sent.
pub fn size_sell(
    token_amount: f64,
    base_reserve: f64,
    quote_reserve: f64,
    slippage_pct: f64,
    lamports_per_sol: u64,
) -> i64 {
    let price = pool_price(base_reserve, quote_reserve);
    if !price.is_finite() || quote_reserve <= 0.0 {
        return 0;
    }
    let raw_sol = token_amount * price;
    (raw_sol * (1.0 - slippage_pct / 100.0) * lamports_per_sol as f64).floor() as i64
}

/// Per-CU price in micro-lamports for a total fee spread over `compute_units`
pub fn priority_fee_micro_lamports(fee_sol: f64, compute_units: u32, lamports_per_sol: u64) -> u64 {
    if compute_units == 0 || fee_sol <= 0.0 {
        return 0;
    }
    let fee_lamports = to_amount((fee_sol * lamports_per_sol as f64).floor());
    to_amount((fee_lamports as f64 / compute_units as f64 * 1_000_000.0).floor())
}

// ============================================================================
// BONDING CURVE
// ============================================================================

/// Tokens received for `sol_in` SOL against virtual reserves (both UI units)
pub fn curve_tokens_out(sol_in: f64, sol_reserves: f64, token_reserves: f64) -> f64 {
    let new_sol_reserves = sol_reserves + sol_in;
    if new_sol_reserves <= 0.0 {
        return 0.0;
    }
    token_reserves - (sol_reserves * token_reserves) / new_sol_reserves
}

/// SOL received for `tokens_in` tokens against virtual reserves (both UI units)
pub fn curve_sol_out(tokens_in: f64, sol_reserves: f64, token_reserves: f64) -> f64 {
    let new_token_reserves = token_reserves + tokens_in;
    if new_token_reserves <= 0.0 {
        return 0.0;
    }
    sol_reserves - (sol_reserves * token_reserves) / new_token_reserves
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveBuySizing {
    /// Tokens out, smallest units
    pub token_amount: u64,
    pub max_sol_cost: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSellSizing {
    /// Tokens in, smallest units
    pub token_amount: u64,
    /// <= 0 means the swap must not be sent
    pub min_sol_output: i64,
}

pub fn size_curve_buy(
    sol_in: f64,
    virtual_sol_reserves: u64,
    virtual_token_reserves: u64,
    slippage_pct: f64,
    lamports_per_sol: u64,
) -> CurveBuySizing {
    let sol_reserves = virtual_sol_reserves as f64 / BONDING_CURVE_SOL_SCALE;
    let token_reserves = virtual_token_reserves as f64 / BONDING_CURVE_TOKEN_SCALE;

    let tokens_out = curve_tokens_out(sol_in, sol_reserves, token_reserves);
    let max_sol_cost = (sol_in * (1.0 + slippage_pct / 100.0) * lamports_per_sol as f64).floor();

    CurveBuySizing {
        token_amount: to_amount((tokens_out * BONDING_CURVE_TOKEN_SCALE).floor()),
        max_sol_cost: to_amount(max_sol_cost),
    }
}

/// `token_amount` is already in smallest units
pub fn size_curve_sell(
    token_amount: u64,
    virtual_sol_reserves: u64,
    virtual_token_reserves: u64,
    slippage_pct: f64,
    lamports_per_sol: u64,
) -> CurveSellSizing {
    let sol_reserves = virtual_sol_reserves as f64 / BONDING_CURVE_SOL_SCALE;
    let token_reserves = virtual_token_reserves as f64 / BONDING_CURVE_TOKEN_SCALE;
    let tokens_in = token_amount as f64 / BONDING_CURVE_TOKEN_SCALE;

    let sol_out = curve_sol_out(tokens_in, sol_reserves, token_reserves);
    let min_sol_output =
        (sol_out * (1.0 - slippage_pct / 100.0) * lamports_per_sol as f64).floor() as i64;

    CurveSellSizing {
        token_amount,
        min_sol_output,
    }
}

/// Spot price of the curve in SOL per token
pub fn curve_price(virtual_sol_reserves: u64, virtual_token_reserves: u64) -> f64 {
    pool_price(
        virtual_token_reserves as f64 / BONDING_CURVE_TOKEN_SCALE,
        virtual_sol_reserves as f64 / BONDING_CURVE_SOL_SCALE,
    )
}

/// `percentage` of `balance`, in integer units
pub fn portion_of(balance: u64, percentage: u8) -> u64 {
    ((balance as u128 * percentage as u128) / 100) as u64
}

/// Floor a non-negative finite amount into u64; anything else becomes 0
fn to_amount(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value as u64
    } else {
        0
    }
}
