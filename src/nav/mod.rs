//! The instant-navigation engine.
//!
//! `Navigator` owns the current document, the page cache, and the session
//! history. The host (shell binary, tests) routes browser-level events in —
//! hover, click, back, forward — and acts on the returned [`NavOutcome`]:
//! a completed in-place swap, or an instruction to perform a native load.
//!
//! - `filter`  — which anchors get handlers
//! - `history` — session history entries
//! - `swap`    — region/title substitution and script activation

pub mod filter;
pub mod history;
pub mod swap;

use std::collections::HashSet;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use url::Url;

use crate::dom::Document;
use crate::net::cache::PageCache;
use crate::net::fetch::Fetch;

use history::History;
use swap::Swap;

/// Host-supplied configuration.
#[derive(Debug, Clone)]
pub struct NavConfig {
    /// User agent: sent with fetches and matched for the mobile gate.
    pub user_agent: String,
    /// Fallback id of the content region when no `<main>` exists.
    pub content_id: String,
    /// Path prefix that always stays on native navigation.
    pub admin_prefix: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) swapdash/0.1".to_string(),
            content_id: "content".to_string(),
            admin_prefix: "/admin".to_string(),
        }
    }
}

/// What the host must do after routing an event in.
pub enum NavOutcome {
    /// Content and title were swapped in place; the host resets the
    /// viewport scroll and executes the activated scripts.
    Swapped(Swap),
    /// Perform a native full load of this URL.
    FullLoad(String),
}

pub struct Navigator<F: Fetch + 'static> {
    fetcher: Arc<F>,
    cache: Arc<PageCache>,
    doc: Document,
    history: History,
    config: NavConfig,
    /// Absolute URLs with handlers attached.
    bound: HashSet<String>,
    /// Bound URLs whose one-shot hover listener already fired.
    hovered: HashSet<String>,
    /// In-flight preload threads, drained by the host or on drop.
    preloads: Vec<JoinHandle<()>>,
}

impl<F: Fetch + 'static> Navigator<F> {
    /// Install the enhancement on an already-loaded document.
    ///
    /// Returns `None` on mobile user agents: without hover there is nothing
    /// to preload, so the mechanism never activates and the page keeps its
    /// native navigation. The host owns the once-per-document guard by
    /// holding at most one navigator.
    pub fn install(doc: Document, fetcher: F, config: NavConfig) -> Option<Self> {
        if filter::is_mobile_agent(&config.user_agent) {
            log::info!("mobile user agent, instant navigation disabled");
            return None;
        }

        let mut nav = Self {
            fetcher: Arc::new(fetcher),
            cache: Arc::new(PageCache::new()),
            history: History::new(),
            config,
            bound: HashSet::new(),
            hovered: HashSet::new(),
            preloads: Vec::new(),
            doc,
        };
        nav.history.push(nav.doc.url.clone(), nav.doc.title.clone());
        nav.bind_links();
        Some(nav)
    }

    /// Discover and bind anchors in the current document.
    ///
    /// Rebuilds the bound set wholesale, so it is safe to call repeatedly
    /// and must be re-run after every swap: links injected by new content
    /// get the same rules, and replaced nodes get fresh one-shot hovers.
    pub fn bind_links(&mut self) {
        self.bound.clear();
        self.hovered.clear();

        let base = match Url::parse(&self.doc.url) {
            Ok(u) => u,
            Err(e) => {
                log::warn!("document URL {} unparseable: {}", self.doc.url, e);
                return;
            }
        };

        for href in self.doc.root.collect_hrefs() {
            match filter::evaluate(&base, &href, &self.config.admin_prefix) {
                Ok(abs) => {
                    self.bound.insert(abs);
                }
                Err(reason) => {
                    log::debug!("skip link {:?}: {}", href, reason);
                }
            }
        }
    }

    /// First mouse-enter on a bound link: trigger its preload. The listener
    /// is one-shot; later hovers on the same link are ignored until a
    /// rebind replaces the node.
    pub fn hover(&mut self, url: &str) {
        if !self.bound.contains(url) {
            return;
        }
        if !self.hovered.insert(url.to_string()) {
            return;
        }
        self.preload(url);
    }

    /// Speculative background fetch of a page. No-op when the URL is
    /// already cached or carries a fragment. Failures only log: the cache
    /// entry stays absent and a later hover retries.
    pub fn preload(&mut self, url: &str) {
        if self.cache.has(url) || url.contains('#') {
            return;
        }

        let fetcher = Arc::clone(&self.fetcher);
        let cache = Arc::clone(&self.cache);
        let url = url.to_string();

        self.preloads.push(thread::spawn(move || {
            match fetcher.fetch(&url) {
                Ok(result) => cache.put(url, result.html),
                Err(e) => log::warn!("preload of {} failed: {}", url, e),
            }
        }));
    }

    /// Wait for every in-flight preload to land in the cache.
    pub fn drain_preloads(&mut self) {
        for handle in self.preloads.drain(..) {
            let _ = handle.join();
        }
    }

    /// Click on a link. Serves the swap from cache when the preload
    /// completed, fetches synchronously otherwise, and degrades to
    /// [`NavOutcome::FullLoad`] on any miss, fetch error, or structural
    /// mismatch.
    pub fn click(&mut self, url: &str) -> NavOutcome {
        if !self.bound.contains(url) {
            // No handler was ever attached to this link.
            return NavOutcome::FullLoad(url.to_string());
        }

        let html = match self.cache.get(url) {
            Some(html) => html,
            None => match self.fetcher.fetch(url) {
                Ok(result) => {
                    self.cache.put(url, result.html.clone());
                    result.html
                }
                Err(e) => {
                    log::warn!("click-time fetch of {} failed: {}", url, e);
                    return NavOutcome::FullLoad(url.to_string());
                }
            },
        };

        match swap::apply(&mut self.doc, &html, url, &self.config.content_id) {
            Ok(swapped) => {
                self.history.push(url, swapped.title.clone());
                self.bind_links();
                NavOutcome::Swapped(swapped)
            }
            Err(e) => {
                log::warn!("instant swap aborted, falling back: {}", e);
                NavOutcome::FullLoad(url.to_string())
            }
        }
    }

    /// History pop towards older entries. A pop always forces a native
    /// reload: the cache may be stale or absent for that entry.
    pub fn back(&mut self) -> Option<NavOutcome> {
        self.history
            .back()
            .map(|entry| NavOutcome::FullLoad(entry.url.clone()))
    }

    /// History pop towards newer entries; same full-reload policy.
    pub fn forward(&mut self) -> Option<NavOutcome> {
        self.history
            .forward()
            .map(|entry| NavOutcome::FullLoad(entry.url.clone()))
    }

    /// Adopt a document the host loaded natively (after a `FullLoad`
    /// outcome, or any server-rendered navigation).
    pub fn replace_document(&mut self, doc: Document) {
        self.doc = doc;
        self.history.push(self.doc.url.clone(), self.doc.title.clone());
        self.bind_links();
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    /// Bound URLs, sorted for stable display.
    pub fn bound_links(&self) -> Vec<String> {
        let mut links: Vec<String> = self.bound.iter().cloned().collect();
        links.sort();
        links
    }

    pub fn is_bound(&self, url: &str) -> bool {
        self.bound.contains(url)
    }
}

impl<F: Fetch + 'static> Drop for Navigator<F> {
    fn drop(&mut self) {
        self.drain_preloads();
    }
}
