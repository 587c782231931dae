/// Protocol and chain constants
///
/// String forms are the defaults for the `[protocol]` config section;
/// the resolved typed values live in `config::ProtocolConstants`.

// ============================================================================
// SOLANA BLOCKCHAIN CONSTANTS
// ============================================================================

/// Wrapped SOL mint
pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";

/// Lamports per SOL (10^9)
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

pub const SYSTEM_PROGRAM_ID: &str = "11111111111111111111111111111111";
pub const TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
pub const ASSOCIATED_TOKEN_PROGRAM_ID: &str = "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL";

// ============================================================================
// BONDING CURVE (pump.fun) CONSTANTS
// ============================================================================

pub const PUMP_FUN_PROGRAM_ID: &str = "6EF8rrecthR5Dkzon8Nwu78hRvfCKubJ14M5uBEwF6P";
pub const PUMP_FUN_GLOBAL: &str = "4wTV1YmiEkRvAtNtsSGPtUrqRYQMe5SKy2uB4Jjaxnjf";
pub const PUMP_FUN_FEE_RECIPIENT: &str = "CebN5WGQ4jvEPvsVU4EoHEpgzq1VV7AbicfhtW4xC9iM";
pub const PUMP_FUN_EVENT_AUTHORITY: &str = "Ce6TQqeHC9p8KetsN6JsjHK7UTZk7nasjjnr7XxXp9F1";

pub const PUMP_FUN_BUY_DISCRIMINATOR: [u8; 8] = [0x66, 0x06, 0x3d, 0x12, 0x01, 0xda, 0xeb, 0xea];
pub const PUMP_FUN_SELL_DISCRIMINATOR: [u8; 8] = [0x33, 0xe6, 0x85, 0xa4, 0x01, 0x7f, 0x83, 0xad];

/// Bonding curve account tag
pub const BONDING_CURVE_DISCRIMINATOR: [u8; 8] = [0x17, 0xb7, 0xf8, 0x37, 0x60, 0xd8, 0xac, 0x60];

/// Virtual reserve scales used by bonding curve math
pub const BONDING_CURVE_SOL_SCALE: f64 = 1e9;
pub const BONDING_CURVE_TOKEN_SCALE: f64 = 1e6;

// ============================================================================
// PUMP AMM CONSTANTS
// ============================================================================

pub const PUMP_AMM_PROGRAM_ID: &str = "pAMMBay6oceH9fJKBRHGP5D4bD4sWpmSwMn52FMfXEA";
pub const PUMP_AMM_GLOBAL_CONFIG: &str = "ADyA8hdefvWN2dbGGWFotbzWxrAvLW83WG6QCVXvJKqw";
pub const PUMP_AMM_PROTOCOL_FEE_RECIPIENT: &str = "62qc2CNXwrYqQScmEdiZFFAnJR262PxWEuNQtxfafNgV";
pub const PUMP_AMM_PROTOCOL_FEE_RECIPIENT_ATA: &str = "94qWNrtmfn42h3ZjUZwWvK1MEo9uVmmrBPd2hpNjYDjb";
pub const PUMP_AMM_EVENT_AUTHORITY: &str = "GS4CU59F31iL7aR2Q8zVS8DRrcRnXX1yjQ66TqNVQnaR";

pub const PUMP_AMM_BUY_DISCRIMINATOR: [u8; 8] = [0x66, 0x06, 0x3d, 0x12, 0x01, 0xda, 0xeb, 0xea];
pub const PUMP_AMM_SELL_DISCRIMINATOR: [u8; 8] = [0x33, 0xe6, 0x85, 0xa4, 0x01, 0x7f, 0x83, 0xad];

/// Pool account tag
pub const PUMP_AMM_POOL_DISCRIMINATOR: [u8; 8] = [0xf1, 0x9a, 0x6d, 0x04, 0x11, 0xb1, 0x6d, 0xbc];

/// Byte offset of `base_mint` in a pool account (tag + bump + index + creator)
pub const PUMP_AMM_BASE_MINT_OFFSET: usize = 8 + 1 + 2 + 32;

/// Liquidity score bonus for current-schema pools
pub const CURRENT_SCHEMA_SCORE_FACTOR: f64 = 1.1;

// ============================================================================
// TRANSACTION DEFAULTS
// ============================================================================

pub const DEFAULT_COMPUTE_UNIT_LIMIT: u32 = 120_000;
pub const DEFAULT_PRIORITY_FEE_SOL: f64 = 0.0005;
pub const DEFAULT_SLIPPAGE_PCT: f64 = 15.0;

pub const CONFIRMATION_MAX_RETRIES: u32 = 20;
pub const CONFIRMATION_POLL_INTERVAL_MS: u64 = 3_000;

/// Pause between buy and sell in the round-trip command
pub const ROUND_TRIP_SETTLE_SECS: u64 = 15;
