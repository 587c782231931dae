pub mod cache;
pub mod config;
pub mod constants;
pub mod errors; // Structured error handling
pub mod logger;
pub mod pools;
pub mod rpc;
pub mod swaps;
pub mod tokens;
pub mod trader;
