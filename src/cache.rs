use std::time::Duration;

use crate::metrics::{CACHE_HITS, CACHE_MISSES};
use crate::models::WeatherReport;
use crate::store::TtlStore;

const CACHE_TTL: Duration = Duration::from_secs(300);
const CACHE_CAPACITY: usize = 100;

// Short-lived cache of normalized upstream results, keyed by location
pub struct WeatherCache {
    store: TtlStore<String, WeatherReport>,
}

impl WeatherCache {
    pub fn new() -> Self {
        Self::with_limits(CACHE_TTL, CACHE_CAPACITY)
    }

    fn with_limits(ttl: Duration, capacity: usize) -> Self {
        Self {
            store: TtlStore::new(ttl, capacity),
        }
    }

    // Case-fold so "London" and "london" share an entry
    pub fn key_for(location: &str) -> String {
        location.to_lowercase()
    }

    pub fn lookup(&self, key: &str) -> Option<WeatherReport> {
        match self.store.get(key) {
            Some(report) => {
                CACHE_HITS.inc();
                Some(report)
            }
            None => {
                CACHE_MISSES.inc();
                None
            }
        }
    }

    pub fn store(&self, key: String, report: WeatherReport) {
        self.store.insert(key, report);
    }
}

impl Default for WeatherCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn report() -> WeatherReport {
        WeatherReport {
            temperature: 11.5,
            conditions: "light rain".to_string(),
            humidity: 72,
            wind_speed: 4.1,
        }
    }

    #[test]
    fn key_is_case_folded() {
        assert_eq!(WeatherCache::key_for("LoNdOn"), "london");
    }

    #[test]
    fn store_then_lookup_returns_the_report() {
        let cache = WeatherCache::new();
        cache.store("london".to_string(), report());
        assert_eq!(cache.lookup("london"), Some(report()));
    }

    #[test]
    fn entry_expires_after_ttl() {
        let cache = WeatherCache::with_limits(Duration::from_millis(50), 100);
        cache.store("london".to_string(), report());
        sleep(Duration::from_millis(80));
        assert_eq!(cache.lookup("london"), None);
    }
}
