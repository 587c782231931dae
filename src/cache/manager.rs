/// Generic in-memory cache with a pluggable expiry policy and LRU eviction
///
/// Thread-safe; concurrent writers for the same key resolve as last writer wins.
use super::config::{CacheConfig, CachePolicy};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::time::Instant;

struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

struct CacheState<K, V> {
    data: HashMap<K, CacheEntry<V>>,
    access_order: VecDeque<K>, // front = least recently used
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheMetrics {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub inserts: u64,
}

impl CacheMetrics {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

pub struct CacheManager<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    config: CacheConfig,
    state: Mutex<CacheState<K, V>>,
    metrics: Mutex<CacheMetrics>,
}

impl<K, V> CacheManager<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            state: Mutex::new(CacheState {
                data: HashMap::new(),
                access_order: VecDeque::new(),
            }),
            metrics: Mutex::new(CacheMetrics::default()),
        }
    }

    /// Returns None if missing or expired under the policy
    pub fn get(&self, key: &K) -> Option<V> {
        let mut state = self.state.lock();

        let expired = match state.data.get(key) {
            Some(entry) => self.config.policy.is_expired(entry.inserted_at.elapsed()),
            None => {
                self.metrics.lock().misses += 1;
                return None;
            }
        };

        if expired {
            state.data.remove(key);
            state.access_order.retain(|k| k != key);
            let mut metrics = self.metrics.lock();
            metrics.misses += 1;
            metrics.expirations += 1;
            return None;
        }

        state.access_order.retain(|k| k != key);
        state.access_order.push_back(key.clone());
        self.metrics.lock().hits += 1;

        state.data.get(key).map(|entry| entry.value.clone())
    }

    /// Like `get` but leaves recency, expiry and metrics untouched
    pub fn peek(&self, key: &K) -> Option<V> {
        let state = self.state.lock();
        state
            .data
            .get(key)
            .filter(|entry| !self.config.policy.is_expired(entry.inserted_at.elapsed()))
            .map(|entry| entry.value.clone())
    }

    /// Insert, evicting the least recently used entry when full
    pub fn insert(&self, key: K, value: V) {
        if self.config.policy == CachePolicy::Disabled {
            return;
        }

        let mut state = self.state.lock();

        if state.data.len() >= self.config.capacity && !state.data.contains_key(&key) {
            if let Some(lru_key) = state.access_order.pop_front() {
                state.data.remove(&lru_key);
                self.metrics.lock().evictions += 1;
            }
        }

        state.data.insert(
            key.clone(),
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
        state.access_order.retain(|k| k != &key);
        state.access_order.push_back(key);

        self.metrics.lock().inserts += 1;
    }

    pub fn remove(&self, key: &K) {
        let mut state = self.state.lock();
        state.data.remove(key);
        state.access_order.retain(|k| k != key);
    }

    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.data.clear();
        state.access_order.clear();
    }

    pub fn metrics(&self) -> CacheMetrics {
        self.metrics.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.state.lock().data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
