/// Swap execution for both venues
///
/// - `pricing`: sizing and slippage bounds
/// - `pda`, `instructions`: account derivation and instruction encoding
/// - `bonding_curve`, `pump_amm`: per-venue flows
/// - `strategy`: venue selection and dispatch
/// - `transaction`: signing, submission and confirmation
pub mod bonding_curve;
pub mod instructions;
pub mod pda;
pub mod pricing;
pub mod pump_amm;
pub mod strategy;
pub mod transaction;
pub mod types;

pub use strategy::{Venue, VenueRoute};
pub use transaction::{submit_and_confirm, FailureReason, TxState};
pub use types::{SwapOptions, SwapOutcome, SwapParams, SwapPlan, SwapSide};
