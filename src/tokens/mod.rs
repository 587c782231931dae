/// Token state lookups: bonding curve coin records, balances and decimals
pub mod balances;
pub mod coin_record;

pub use balances::{fetch_mint_decimals, get_user_token_balance};
pub use coin_record::{CoinRecordSource, OnChainCoinRecords, TokenState};
