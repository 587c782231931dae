/// AMM pool decoding, discovery and ranking
pub mod decoders;
pub mod discovery;
pub mod types;
pub mod utils;

pub use discovery::{discover_pools, fetch_pool_quote, find_best_pool, rank_pools, score_pool, select_best};
pub use types::{DecodeOutcome, PoolError, PoolQuote, PoolRecord, PoolResult, PoolSchema, ScoredPool};
