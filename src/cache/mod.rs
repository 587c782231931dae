/// In-memory caches owned by the trader façade
pub mod config;
pub mod manager;

pub use config::{CacheConfig, CachePolicy};
pub use manager::{CacheManager, CacheMetrics};
