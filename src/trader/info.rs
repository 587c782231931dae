/// Read-only token summary returned by `UnifiedTrader::get_token_info`
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TokenInfo {
    pub valid: bool,
    pub mint: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_on_bonding_curve: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_sol: Option<f64>,

    // bonding curve
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_sol_reserves: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_token_reserves: Option<u64>,

    // AMM
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liquidity_sol: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_decimals: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TokenInfo {
    pub fn invalid(mint: &str, error: impl Into<String>) -> Self {
        Self {
            valid: false,
            mint: mint.to_string(),
            error: Some(error.into()),
            ..Default::default()
        }
    }
}
