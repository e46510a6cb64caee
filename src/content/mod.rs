//! Readable-content registration
//!
//! Pages register a provider callback for each readable region at mount
//! and deregister it at unmount, instead of the hub scanning the render
//! tree. An optional page-level reader takes precedence over the region
//! scan. The registry is a cheap cloneable handle over shared state, so
//! pages and the hub can hold it concurrently.

use std::sync::{Arc, Mutex};

/// Spoken when a read command finds nothing to read
pub const NO_READABLE_CONTENT: &str = "No readable content found on this page.";

/// Handle identifying one registered readable region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionId(u64);

/// Callback producing the current text of one readable region
pub type ContentProvider = Arc<dyn Fn() -> String + Send + Sync>;

/// Callback producing the whole page's readable text, preferred over regions
pub type PageReader = Arc<dyn Fn() -> String + Send + Sync>;

struct Inner {
    next_id: u64,
    regions: Vec<(RegionId, ContentProvider)>,
    page_reader: Option<PageReader>,
}

/// Shared registry of readable content for the current page
#[derive(Clone)]
pub struct ContentRegistry {
    inner: Arc<Mutex<Inner>>,
}

impl ContentRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                next_id: 0,
                regions: Vec::new(),
                page_reader: None,
            })),
        }
    }

    /// Register a readable region; call at page mount
    pub fn register_region(
        &self,
        provider: impl Fn() -> String + Send + Sync + 'static,
    ) -> RegionId {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = RegionId(inner.next_id);
        inner.regions.push((id, Arc::new(provider)));
        id
    }

    /// Remove a previously registered region; call at page unmount
    pub fn deregister_region(&self, id: RegionId) {
        let mut inner = self.inner.lock().unwrap();
        inner.regions.retain(|(region, _)| *region != id);
    }

    /// Install the page-level reader, replacing any previous one
    pub fn set_page_reader(&self, reader: impl Fn() -> String + Send + Sync + 'static) {
        self.inner.lock().unwrap().page_reader = Some(Arc::new(reader));
    }

    /// Remove the page-level reader
    pub fn clear_page_reader(&self) {
        self.inner.lock().unwrap().page_reader = None;
    }

    /// Collect the page's readable text
    ///
    /// The page reader is preferred when installed; otherwise region
    /// providers are concatenated in registration order with separating
    /// spaces. Returns `None` when the result is empty or whitespace.
    ///
    /// Callbacks run against a snapshot taken outside the registry lock,
    /// so they may register or deregister content themselves; such
    /// changes are visible from the next collect on.
    pub fn collect(&self) -> Option<String> {
        let (regions, page_reader) = {
            let inner = self.inner.lock().unwrap();
            let regions: Vec<ContentProvider> = inner
                .regions
                .iter()
                .map(|(_, provider)| Arc::clone(provider))
                .collect();
            (regions, inner.page_reader.clone())
        };

        let text = match page_reader {
            Some(reader) => reader(),
            None => regions
                .iter()
                .map(|provider| provider())
                .collect::<Vec<_>>()
                .join(" "),
        };

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl Default for ContentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_registry_collects_nothing() {
        let registry = ContentRegistry::new();
        assert_eq!(registry.collect(), None);
    }

    #[test]
    fn test_regions_concatenate_in_registration_order() {
        let registry = ContentRegistry::new();
        registry.register_region(|| "Newton's laws.".to_string());
        registry.register_region(|| "Thermodynamics.".to_string());

        assert_eq!(
            registry.collect(),
            Some("Newton's laws. Thermodynamics.".to_string())
        );
    }

    #[test]
    fn test_deregister_removes_region() {
        let registry = ContentRegistry::new();
        let id = registry.register_region(|| "gone".to_string());
        registry.register_region(|| "kept".to_string());

        registry.deregister_region(id);
        assert_eq!(registry.collect(), Some("kept".to_string()));
    }

    #[test]
    fn test_page_reader_preferred_over_regions() {
        let registry = ContentRegistry::new();
        registry.register_region(|| "region text".to_string());
        registry.set_page_reader(|| "page summary".to_string());

        assert_eq!(registry.collect(), Some("page summary".to_string()));

        registry.clear_page_reader();
        assert_eq!(registry.collect(), Some("region text".to_string()));
    }

    #[test]
    fn test_whitespace_only_content_is_none() {
        let registry = ContentRegistry::new();
        registry.register_region(|| "   ".to_string());
        registry.register_region(String::new);
        assert_eq!(registry.collect(), None);
    }

    #[test]
    fn test_clones_share_state() {
        let registry = ContentRegistry::new();
        let page_view = registry.clone();
        page_view.register_region(|| "shared".to_string());

        assert_eq!(registry.collect(), Some("shared".to_string()));
    }

    #[test]
    fn test_provider_may_call_back_into_registry() {
        let registry = ContentRegistry::new();
        let reentrant = registry.clone();
        let id = registry.register_region(move || {
            // A page mounting content from within a read must not deadlock
            reentrant.register_region(|| "added during read".to_string());
            "first".to_string()
        });

        assert_eq!(registry.collect(), Some("first".to_string()));

        // The registration is visible from the next collect on
        registry.deregister_region(id);
        assert_eq!(registry.collect(), Some("added during read".to_string()));
    }

    #[test]
    fn test_provider_may_deregister_itself() {
        let registry = ContentRegistry::new();
        let reentrant = registry.clone();
        let slot: Arc<Mutex<Option<RegionId>>> = Arc::new(Mutex::new(None));
        let shared_slot = Arc::clone(&slot);

        let id = registry.register_region(move || {
            if let Some(id) = shared_slot.lock().unwrap().take() {
                reentrant.deregister_region(id);
            }
            "once".to_string()
        });
        *slot.lock().unwrap() = Some(id);

        assert_eq!(registry.collect(), Some("once".to_string()));
        assert_eq!(registry.collect(), None);
    }
}
