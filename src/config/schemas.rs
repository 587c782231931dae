/// Configuration schemas
///
/// Every section is declared with `config_struct!`, so each field carries
/// its default next to its type.
use crate::config_struct;
use crate::constants::*;

// ============================================================================
// RPC CONFIGURATION
// ============================================================================

config_struct! {
    /// RPC endpoint configuration
    pub struct RpcConfig {
        url: String = "https://api.mainnet-beta.solana.com".to_string(),
        /// processed | confirmed | finalized
        commitment: String = "confirmed".to_string(),
        timeout_secs: u64 = 30,
    }
}

// ============================================================================
// WALLET CONFIGURATION
// ============================================================================

config_struct! {
    /// Signing key. Base58, JSON byte array or base64.
    /// The ACC_PRIVATE_KEY environment variable takes precedence.
    pub struct WalletConfig {
        private_key: String = String::new(),
    }
}

// ============================================================================
// TRADING CONFIGURATION
// ============================================================================

config_struct! {
    pub struct TradingConfig {
        default_slippage_pct: f64 = DEFAULT_SLIPPAGE_PCT,
        /// Total priority fee per transaction, converted to a per-CU price
        priority_fee_sol: f64 = DEFAULT_PRIORITY_FEE_SOL,
        compute_unit_limit: u32 = DEFAULT_COMPUTE_UNIT_LIMIT,
        default_buy_sol: f64 = 0.01,
        round_trip_settle_secs: u64 = ROUND_TRIP_SETTLE_SECS,
    }
}

// ============================================================================
// CONFIRMATION CONFIGURATION
// ============================================================================

config_struct! {
    /// Fixed-interval confirmation polling
    pub struct ConfirmationConfig {
        max_retries: u32 = CONFIRMATION_MAX_RETRIES,
        poll_interval_ms: u64 = CONFIRMATION_POLL_INTERVAL_MS,
    }
}

// ============================================================================
// CACHE CONFIGURATION
// ============================================================================

config_struct! {
    /// Venue and pool caches. A TTL of 0 keeps entries for the process lifetime.
    pub struct CacheSettings {
        enabled: bool = true,
        venue_ttl_secs: u64 = 0,
        pool_ttl_secs: u64 = 0,
        capacity: usize = 1000,
    }
}

// ============================================================================
// PROTOCOL CONFIGURATION
// ============================================================================

config_struct! {
    /// Program ids, fixed accounts and instruction discriminators
    pub struct ProtocolConfig {
        sol_mint: String = SOL_MINT.to_string(),
        system_program: String = SYSTEM_PROGRAM_ID.to_string(),
        token_program: String = TOKEN_PROGRAM_ID.to_string(),
        associated_token_program: String = ASSOCIATED_TOKEN_PROGRAM_ID.to_string(),

        pump_fun_program: String = PUMP_FUN_PROGRAM_ID.to_string(),
        pump_fun_global: String = PUMP_FUN_GLOBAL.to_string(),
        pump_fun_fee_recipient: String = PUMP_FUN_FEE_RECIPIENT.to_string(),
        pump_fun_event_authority: String = PUMP_FUN_EVENT_AUTHORITY.to_string(),
        pump_fun_buy_discriminator: Vec<u8> = PUMP_FUN_BUY_DISCRIMINATOR.to_vec(),
        pump_fun_sell_discriminator: Vec<u8> = PUMP_FUN_SELL_DISCRIMINATOR.to_vec(),

        pump_amm_program: String = PUMP_AMM_PROGRAM_ID.to_string(),
        pump_amm_global_config: String = PUMP_AMM_GLOBAL_CONFIG.to_string(),
        pump_amm_event_authority: String = PUMP_AMM_EVENT_AUTHORITY.to_string(),
        protocol_fee_recipient: String = PUMP_AMM_PROTOCOL_FEE_RECIPIENT.to_string(),
        protocol_fee_recipient_ata: String = PUMP_AMM_PROTOCOL_FEE_RECIPIENT_ATA.to_string(),
        pump_amm_buy_discriminator: Vec<u8> = PUMP_AMM_BUY_DISCRIMINATOR.to_vec(),
        pump_amm_sell_discriminator: Vec<u8> = PUMP_AMM_SELL_DISCRIMINATOR.to_vec(),

        lamports_per_sol: u64 = LAMPORTS_PER_SOL,
    }
}

// ============================================================================
// LOGGING CONFIGURATION
// ============================================================================

config_struct! {
    pub struct LoggingConfig {
        /// Empty disables the file mirror
        file_path: String = String::new(),
    }
}

// ============================================================================
// ROOT CONFIGURATION
// ============================================================================

config_struct! {
    pub struct Config {
        rpc: RpcConfig = RpcConfig::default(),
        wallet: WalletConfig = WalletConfig::default(),
        trading: TradingConfig = TradingConfig::default(),
        confirmation: ConfirmationConfig = ConfirmationConfig::default(),
        cache: CacheSettings = CacheSettings::default(),
        protocol: ProtocolConfig = ProtocolConfig::default(),
        logging: LoggingConfig = LoggingConfig::default(),
    }
}
