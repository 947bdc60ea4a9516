use fnv::FnvHashSet;

/// Issues passive, best-effort image preloads.
///
/// Implementations must not block and have no way to report failure; a
/// failed preload only costs latency when the renderer loads the image later.
pub trait ResourceHints {
    fn preload_image(&self, url: &str);
}

/// Hints that go nowhere. Useful for headless engines.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHints;

impl ResourceHints for NoHints {
    fn preload_image(&self, _url: &str) {}
}

/// Deduplicating, fire-and-forget preload tracker.
///
/// Each URL is hinted at most once for the lifetime of the cache. The record
/// only grows; tours are small enough that eviction is not worth it.
pub struct PrefetchCache<H: ResourceHints> {
    hints: H,
    seen: FnvHashSet<String>,
}

impl<H: ResourceHints> PrefetchCache<H> {
    pub fn new(hints: H) -> Self {
        Self {
            hints,
            seen: FnvHashSet::default(),
        }
    }

    /// Hint `url` unless it is empty or was hinted before.
    ///
    /// Returns whether a hint was issued.
    pub fn prefetch(&mut self, url: &str) -> bool {
        if url.is_empty() || self.seen.contains(url) {
            return false;
        }
        self.hints.preload_image(url);
        self.seen.insert(url.to_string());
        log::debug!("[prefetch] {}", url);
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn hints(&self) -> &H {
        &self.hints
    }
}
