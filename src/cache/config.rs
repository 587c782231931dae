/// Cache eviction policy and sizing
///
/// - Venue detection: process lifetime by default
/// - Pool selection: process lifetime by default
/// Both become time-bounded when a TTL is configured.
use crate::config::CacheSettings;
use std::time::Duration;

/// When a cached entry stops being served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Entries live until removed or evicted by capacity
    Never,
    /// Entries expire after the given duration
    Ttl(Duration),
    /// Every lookup misses and inserts are dropped
    Disabled,
}

impl CachePolicy {
    /// 0 seconds means no expiry
    pub fn from_ttl_secs(ttl_secs: u64) -> Self {
        if ttl_secs == 0 {
            CachePolicy::Never
        } else {
            CachePolicy::Ttl(Duration::from_secs(ttl_secs))
        }
    }

    pub fn is_expired(&self, age: Duration) -> bool {
        match self {
            CachePolicy::Never => false,
            CachePolicy::Ttl(ttl) => age > *ttl,
            CachePolicy::Disabled => true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub policy: CachePolicy,

    /// Maximum number of entries (LRU eviction when exceeded)
    pub capacity: usize,
}

impl CacheConfig {
    /// Mint -> venue detection result
    pub fn venue_detection(settings: &CacheSettings) -> Self {
        Self::from_settings(settings, settings.venue_ttl_secs)
    }

    /// Mint -> best pool
    pub fn pool_selection(settings: &CacheSettings) -> Self {
        Self::from_settings(settings, settings.pool_ttl_secs)
    }

    pub fn custom(policy: CachePolicy, capacity: usize) -> Self {
        Self { policy, capacity }
    }

    fn from_settings(settings: &CacheSettings, ttl_secs: u64) -> Self {
        let policy = if settings.enabled {
            CachePolicy::from_ttl_secs(ttl_secs)
        } else {
            CachePolicy::Disabled
        };
        Self {
            policy,
            capacity: settings.capacity.max(1),
        }
    }
}
