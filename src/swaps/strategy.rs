/// Venue selection and dispatch
///
/// Exactly two venues exist. The completion flag on the coin record picks
/// one; a graduated token never falls back to the curve.
use super::types::{SwapOutcome, SwapParams};
use super::{bonding_curve, pump_amm};
use crate::errors::TradeResult;
use crate::pools::ScoredPool;
use crate::tokens::TokenState;
use crate::trader::TradingContext;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Venue {
    BondingCurve,
    AmmPool,
}

impl Venue {
    pub fn from_completion(complete: bool) -> Self {
        if complete {
            Venue::AmmPool
        } else {
            Venue::BondingCurve
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Venue::BondingCurve => bonding_curve::VENUE_NAME,
            Venue::AmmPool => pump_amm::VENUE_NAME,
        }
    }
}

impl std::fmt::Display for Venue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A venue with the on-chain state needed to trade on it
#[derive(Debug, Clone)]
pub enum VenueRoute {
    BondingCurve(TokenState),
    AmmPool(ScoredPool),
}

impl VenueRoute {
    pub fn venue(&self) -> Venue {
        match self {
            VenueRoute::BondingCurve(_) => Venue::BondingCurve,
            VenueRoute::AmmPool(_) => Venue::AmmPool,
        }
    }

    pub async fn buy(&self, ctx: &TradingContext, sol_in: f64, params: &SwapParams) -> TradeResult<SwapOutcome> {
        match self {
            VenueRoute::BondingCurve(state) => bonding_curve::buy(ctx, state, sol_in, params).await,
            VenueRoute::AmmPool(pool) => pump_amm::buy(ctx, &pool.record, &pool.quote, sol_in, params).await,
        }
    }

    pub async fn sell(&self, ctx: &TradingContext, percentage: u8, params: &SwapParams) -> TradeResult<SwapOutcome> {
        match self {
            VenueRoute::BondingCurve(state) => bonding_curve::sell(ctx, state, percentage, params).await,
            VenueRoute::AmmPool(pool) => pump_amm::sell(ctx, &pool.record, &pool.quote, percentage, params).await,
        }
    }
}
