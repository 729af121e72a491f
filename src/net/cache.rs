//! Page cache keyed by absolute URL.
//!
//! Entries are raw HTML document text, written by preload threads and read
//! at click time. An entry, once present, is authoritative for the rest of
//! the session: no TTL, no eviction, no freshness check. The whole cache is
//! dropped with the navigator (a full page reload in browser terms).

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub struct PageCache {
    entries: Mutex<HashMap<String, String>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl PageCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Look up the HTML stored for a URL.
    pub fn get(&self, url: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        match entries.get(url) {
            Some(html) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                log::debug!("Cache HIT: {}", url);
                Some(html.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                log::debug!("Cache MISS: {}", url);
                None
            }
        }
    }

    /// Store HTML under a URL key. Re-fetching overwrites.
    pub fn put(&self, url: impl Into<String>, html: impl Into<String>) {
        let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        entries.insert(url.into(), html.into());
    }

    /// Whether a URL is cached, without touching the hit/miss counters.
    pub fn has(&self, url: &str) -> bool {
        let entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        entries.contains_key(url)
    }

    /// Number of cached pages.
    pub fn len(&self) -> usize {
        let entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cache hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}

impl Default for PageCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_has() {
        let cache = PageCache::new();
        assert!(!cache.has("https://example.com/a"));
        cache.put("https://example.com/a", "<html>a</html>");
        assert!(cache.has("https://example.com/a"));
        assert_eq!(cache.get("https://example.com/a").as_deref(), Some("<html>a</html>"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn overwrite_keeps_single_entry() {
        let cache = PageCache::new();
        cache.put("https://example.com/a", "v1");
        cache.put("https://example.com/a", "v2");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("https://example.com/a").as_deref(), Some("v2"));
    }

    #[test]
    fn hit_rate_counts_gets_only() {
        let cache = PageCache::new();
        cache.put("https://example.com/a", "a");
        cache.get("https://example.com/a");
        cache.get("https://example.com/missing");
        cache.has("https://example.com/missing");
        assert!((cache.hit_rate() - 0.5).abs() < f64::EPSILON);
    }
}
