use dashmap::DashMap;
use std::borrow::Borrow;
use std::hash::Hash;
use std::time::{Duration, Instant};

// Entries examined per eviction
const EVICTION_SAMPLE: usize = 8;

// Entry with last-write timestamp
#[derive(Clone)]
struct Entry<V> {
    value: V,
    written_at: Instant,
}

// Keyed store whose entries expire a fixed duration after their last write.
// Expired entries read as absent whether or not they have been removed yet.
pub struct TtlStore<K, V> {
    map: DashMap<K, Entry<V>>,
    ttl: Duration,
    capacity: usize,
}

impl<K, V> TtlStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            map: DashMap::new(),
            ttl,
            capacity,
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let entry = self.map.get(key)?;
        if entry.written_at.elapsed() < self.ttl {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    pub fn insert(&self, key: K, value: V) {
        self.map.insert(
            key.clone(),
            Entry {
                value,
                written_at: Instant::now(),
            },
        );
        self.trim_to_capacity(&key);
    }

    // Evict until the store is back within capacity. Runs after every write,
    // so a momentary overshoot from racing first-time writes is corrected by
    // whichever writer trims last. The just-written key is never the victim.
    fn trim_to_capacity(&self, protected: &K) {
        while self.map.len() > self.capacity {
            match self.pick_victim(protected) {
                Some(victim) => {
                    self.map.remove(&victim);
                }
                None => break,
            }
        }
    }

    // Bounded-sample victim selection: an expired entry if the sample holds
    // one, otherwise the stalest sampled entry. Keeps eviction O(1) per
    // write instead of scanning the whole store.
    fn pick_victim(&self, protected: &K) -> Option<K> {
        let mut victim: Option<(K, Instant)> = None;
        for entry in self.map.iter().take(EVICTION_SAMPLE) {
            if entry.key() == protected {
                continue;
            }
            if entry.written_at.elapsed() >= self.ttl {
                return Some(entry.key().clone());
            }
            if victim
                .as_ref()
                .map_or(true, |(_, oldest)| entry.written_at < *oldest)
            {
                victim = Some((entry.key().clone(), entry.written_at));
            }
        }
        victim.map(|(key, _)| key)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.map.len()
    }
}

impl<K> TtlStore<K, u32>
where
    K: Eq + Hash + Clone,
{
    // Increment the counter for key and return the new count. A missing or
    // expired entry restarts at 1. The read-modify-write happens under the
    // map's entry lock, so concurrent bumps for one key never lose updates.
    // The entry lock is released before trimming.
    pub fn bump(&self, key: K) -> u32 {
        let now = Instant::now();
        let count = {
            let mut entry = self.map.entry(key.clone()).or_insert(Entry {
                value: 0,
                written_at: now,
            });
            if entry.written_at.elapsed() >= self.ttl {
                entry.value = 0;
            }
            entry.value += 1;
            entry.written_at = now;
            entry.value
        };
        self.trim_to_capacity(&key);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn get_returns_live_value() {
        let store: TtlStore<String, u32> = TtlStore::new(Duration::from_secs(60), 10);
        store.insert("a".to_string(), 7);
        assert_eq!(store.get("a"), Some(7));
    }

    #[test]
    fn expired_entry_reads_as_absent() {
        let store: TtlStore<String, u32> = TtlStore::new(Duration::from_millis(50), 10);
        store.insert("a".to_string(), 7);
        sleep(Duration::from_millis(80));
        assert_eq!(store.get("a"), None);
    }

    #[test]
    fn bump_counts_up_from_one() {
        let store: TtlStore<String, u32> = TtlStore::new(Duration::from_secs(60), 10);
        assert_eq!(store.bump("a".to_string()), 1);
        assert_eq!(store.bump("a".to_string()), 2);
        assert_eq!(store.bump("a".to_string()), 3);
        assert_eq!(store.bump("b".to_string()), 1);
    }

    #[test]
    fn bump_restarts_after_expiry() {
        let store: TtlStore<String, u32> = TtlStore::new(Duration::from_millis(50), 10);
        store.bump("a".to_string());
        store.bump("a".to_string());
        sleep(Duration::from_millis(80));
        assert_eq!(store.bump("a".to_string()), 1);
    }

    #[test]
    fn capacity_bound_holds() {
        let store: TtlStore<String, u32> = TtlStore::new(Duration::from_secs(60), 3);
        for key in ["a", "b", "c", "d"] {
            store.insert(key.to_string(), 1);
            sleep(Duration::from_millis(2));
        }
        assert_eq!(store.len(), 3);
        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("d"), Some(1));
    }

    #[test]
    fn eviction_prefers_expired_entries() {
        let store: TtlStore<String, u32> = TtlStore::new(Duration::from_millis(50), 2);
        store.insert("a".to_string(), 1);
        sleep(Duration::from_millis(80));
        store.insert("b".to_string(), 2);
        store.insert("c".to_string(), 3);
        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b"), Some(2));
        assert_eq!(store.get("c"), Some(3));
    }

    #[test]
    fn bound_holds_under_sustained_inserts() {
        let store: TtlStore<String, u32> = TtlStore::new(Duration::from_secs(60), 3);
        for n in 0..50 {
            store.insert(format!("key-{n}"), n);
            assert!(store.len() <= 3);
        }
        assert_eq!(store.get("key-49"), Some(49));
    }

    #[test]
    fn bound_recovers_after_concurrent_inserts() {
        use std::sync::Arc;

        let store: Arc<TtlStore<String, u32>> = Arc::new(TtlStore::new(Duration::from_secs(60), 10));
        let handles: Vec<_> = (0..8)
            .map(|thread| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for n in 0..50 {
                        store.insert(format!("t{thread}-k{n}"), n);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(store.len() <= 10);
    }

    #[test]
    fn concurrent_bumps_never_lose_updates() {
        use std::sync::Arc;

        let store: Arc<TtlStore<String, u32>> = Arc::new(TtlStore::new(Duration::from_secs(60), 10));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        store.bump("shared".to_string());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.bump("shared".to_string()), 1001);
    }

    #[test]
    fn write_to_live_key_refreshes_expiry() {
        let store: TtlStore<String, u32> = TtlStore::new(Duration::from_millis(100), 10);
        store.insert("a".to_string(), 1);
        sleep(Duration::from_millis(60));
        store.insert("a".to_string(), 2);
        sleep(Duration::from_millis(60));
        assert_eq!(store.get("a"), Some(2));
    }
}
