//! Caching layer for geocoder lookups.
//!
//! Place names repeat heavily (home, office, the same few landmarks), and
//! public geocoders are rate limited. Successful lookups are cached by
//! normalized name; misses and errors are not, so a transient failure or a
//! newly-added place is retried on the next request.

use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::geocode::{GeocodedPlace, normalize};
use crate::pipeline::Geocoder;

/// Configuration for the cache.
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
            ttl: Duration::from_secs(24 * 60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Geocoder with caching.
///
/// Wraps any [`Geocoder`] and caches its successful answers.
pub struct CachedGeocoder<G> {
    inner: G,
    places: MokaCache<String, GeocodedPlace>,
}

impl<G> CachedGeocoder<G> {
    /// Create a new cached geocoder.
    pub fn new(inner: G, config: &CacheConfig) -> Self {
        let places = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, places }
    }

    #[cfg(test)]
    pub(crate) fn inner(&self) -> &G {
        &self.inner
    }

    /// Invalidate all cached entries.
    #[cfg(test)]
    pub(crate) fn invalidate_all(&self) {
        self.places.invalidate_all();
    }
}

impl<G> Geocoder for CachedGeocoder<G>
where
    G: Geocoder + Sync,
{
    type Error = G::Error;

    async fn geocode(&self, name: &str) -> Result<Option<GeocodedPlace>, G::Error> {
        let key = normalize(name);

        // Try cache first
        if let Some(cached) = self.places.get(&key).await {
            return Ok(Some(cached));
        }

        let found = self.inner.geocode(name).await?;
        if let Some(place) = &found {
            self.places.insert(key, place.clone()).await;
        }

        Ok(found)
    }
}
