//! Caching layer for geocoder lookups.
//!
//! Riders plan the same landmarks over and over ("pdx", "ohsu"). Successful
//! lookups are memoised by normalised text so repeat trips skip the
//! geocoder round trip. Failures are never cached.

use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::Coordinate;
use crate::geocoder::{GeocodeError, Geocoder};

/// Configuration for the geocode cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Cache key: trimmed, lower-cased query text.
fn cache_key(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Geocoder with caching.
///
/// Wraps any [`Geocoder`] and caches successful resolutions.
pub struct CachedGeocoder<G> {
    inner: G,
    cache: MokaCache<String, Coordinate>,
}

impl<G: Geocoder> CachedGeocoder<G> {
    /// Create a new cached geocoder.
    pub fn new(inner: G, config: &CacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, cache }
    }

    /// Access the underlying geocoder for lookups that bypass cache.
    pub fn inner(&self) -> &G {
        &self.inner
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}

impl<G: Geocoder> Geocoder for CachedGeocoder<G> {
    async fn resolve(&self, text: &str) -> Result<Coordinate, GeocodeError> {
        let key = cache_key(text);

        if let Some(cached) = self.cache.get(&key).await {
            return Ok(cached);
        }

        let coord = self.inner.resolve(text).await?;
        self.cache.insert(key, coord).await;
        Ok(coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Geocoder that counts calls and knows one place.
    struct CountingGeocoder {
        calls: AtomicUsize,
    }

    impl Geocoder for CountingGeocoder {
        async fn resolve(&self, text: &str) -> Result<Coordinate, GeocodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if text.trim().eq_ignore_ascii_case("pdx") {
                Ok(Coordinate::new(45.5887, -122.5975).unwrap())
            } else {
                Err(GeocodeError::NotFound(text.to_string()))
            }
        }
    }

    fn cached() -> CachedGeocoder<CountingGeocoder> {
        CachedGeocoder::new(
            CountingGeocoder {
                calls: AtomicUsize::new(0),
            },
            &CacheConfig::default(),
        )
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(3600));
        assert_eq!(config.max_capacity, 10_000);
    }

    #[test]
    fn key_normalisation() {
        assert_eq!(cache_key("  PDX "), "pdx");
    }

    #[tokio::test]
    async fn repeat_lookup_hits_cache() {
        let geo = cached();

        let a = geo.resolve("pdx").await.unwrap();
        let b = geo.resolve(" PDX").await.unwrap();

        assert_eq!(a, b);
        assert_eq!(geo.inner().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failures_not_cached() {
        let geo = cached();

        assert!(geo.resolve("nowhere").await.is_err());
        assert!(geo.resolve("nowhere").await.is_err());

        assert_eq!(geo.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let geo = cached();

        geo.resolve("pdx").await.unwrap();
        geo.invalidate_cache();
        geo.resolve("pdx").await.unwrap();

        assert_eq!(geo.inner().calls.load(Ordering::SeqCst), 2);
    }
}
