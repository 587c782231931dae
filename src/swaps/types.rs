/// Shared swap types
use serde::Serialize;
use solana_sdk::{instruction::Instruction, signature::Signature};

/// Direction of a swap relative to SOL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SwapSide {
    /// SOL in, token out
    Buy,
    /// Token in, SOL out
    Sell,
}

impl SwapSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwapSide::Buy => "buy",
            SwapSide::Sell => "sell",
        }
    }
}

impl std::fmt::Display for SwapSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-call overrides of the `[trading]` defaults
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SwapOptions {
    /// Total priority fee in SOL, spread over the compute unit limit
    pub priority_fee_sol: Option<f64>,
    pub compute_unit_limit: Option<u32>,
}

/// Everything a venue flow needs besides chain access
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapParams {
    pub slippage_pct: f64,
    pub priority_fee_sol: f64,
    pub compute_unit_limit: u32,
}

/// Result of a confirmed swap
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwapOutcome {
    #[serde(serialize_with = "serialize_signature")]
    pub signature: Signature,
    pub venue: &'static str,
    pub side: SwapSide,
    /// Lamports (buy) or token units (sell) committed
    pub amount_in: u64,
    /// Slippage bound sent with the swap: token units out (buy) or minimum lamports out (sell)
    pub amount_out_bound: u64,
}

fn serialize_signature<S: serde::Serializer>(sig: &Signature, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&sig.to_string())
}

/// Instructions ready to sign, with the amounts they commit to
#[derive(Debug, Clone)]
pub struct SwapPlan {
    pub instructions: Vec<Instruction>,
    /// Swap payload amount: tokens out (buy) or tokens in (sell)
    pub amount: u64,
    /// Swap payload bound: max lamports in (buy) or min lamports out (sell)
    pub bound: u64,
}
