/// Log tags identify the subsystem a message comes from.
///
/// Each tag maps to a `--debug-<key>` command-line flag which enables
/// debug output for that subsystem only.

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Wallet,
    Rpc,
    Cache,
    Tokens,
    Pool,
    PoolDecoder,
    PoolDiscovery,
    Swap,
    Transactions,
    Trader,
    Test,
    Other(String),
}

impl LogTag {
    /// Key used in `--debug-<key>` / `--verbose-<key>` flags
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system".to_string(),
            LogTag::Config => "config".to_string(),
            LogTag::Wallet => "wallet".to_string(),
            LogTag::Rpc => "rpc".to_string(),
            LogTag::Cache => "cache".to_string(),
            LogTag::Tokens => "tokens".to_string(),
            LogTag::Pool => "pool".to_string(),
            LogTag::PoolDecoder => "pool-decoder".to_string(),
            LogTag::PoolDiscovery => "pool-discovery".to_string(),
            LogTag::Swap => "swap".to_string(),
            LogTag::Transactions => "transactions".to_string(),
            LogTag::Trader => "trader".to_string(),
            LogTag::Test => "test".to_string(),
            LogTag::Other(s) => s.to_lowercase(),
        }
    }

    /// Uncolored label written to the log file
    pub fn to_plain_string(&self) -> String {
        match self {
            LogTag::System => "SYSTEM".to_string(),
            LogTag::Config => "CONFIG".to_string(),
            LogTag::Wallet => "WALLET".to_string(),
            LogTag::Rpc => "RPC".to_string(),
            LogTag::Cache => "CACHE".to_string(),
            LogTag::Tokens => "TOKENS".to_string(),
            LogTag::Pool => "POOL".to_string(),
            LogTag::PoolDecoder => "POOLDEC".to_string(),
            LogTag::PoolDiscovery => "POOLDISC".to_string(),
            LogTag::Swap => "SWAP".to_string(),
            LogTag::Transactions => "TX".to_string(),
            LogTag::Trader => "TRADER".to_string(),
            LogTag::Test => "TEST".to_string(),
            LogTag::Other(s) => s.to_uppercase(),
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}
