//! HTML Element Semantics Registry
//!
//! Two physically separate tables:
//! - the standard set, built once and immutable, read without any lock
//! - a growable cache of plain descriptors for non-standard names seen at
//!   runtime, behind a reader-writer lock
//!
//! Lookups are case-insensitive; the lower-case name is the key.

use super::descriptor::ElementDescriptor;
use super::elements::standard_elements;
use log::debug;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

static GLOBAL: LazyLock<ElementRegistry> = LazyLock::new(ElementRegistry::new);

/// The process-wide registry shared by every parse
pub fn global() -> &'static ElementRegistry {
    &GLOBAL
}

/// Element name to descriptor lookup
pub struct ElementRegistry {
    standard: HashMap<&'static [u8], Arc<ElementDescriptor>>,
    dynamic: RwLock<HashMap<Box<[u8]>, Arc<ElementDescriptor>>>,
}

impl ElementRegistry {
    /// Build the standard table
    pub fn new() -> Self {
        let standard = standard_elements()
            .into_iter()
            .filter_map(|descriptor| match descriptor.name {
                Cow::Borrowed(name) => Some((name, Arc::new(descriptor))),
                Cow::Owned(_) => None,
            })
            .collect();
        ElementRegistry {
            standard,
            dynamic: RwLock::new(HashMap::new()),
        }
    }

    /// Descriptor for `name`, creating and caching a plain one for names
    /// outside the standard set
    pub fn lookup(&self, name: &[u8]) -> Arc<ElementDescriptor> {
        let key: Cow<'_, [u8]> = if name.iter().any(u8::is_ascii_uppercase) {
            Cow::Owned(name.to_ascii_lowercase())
        } else {
            Cow::Borrowed(name)
        };

        if let Some(descriptor) = self.standard.get(key.as_ref()) {
            return Arc::clone(descriptor);
        }

        {
            let dynamic = self.dynamic.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(descriptor) = dynamic.get(key.as_ref()) {
                return Arc::clone(descriptor);
            }
        }

        // Another thread may have inserted the same name between the two
        // locks: the entry API keeps whichever descriptor got there first
        let mut dynamic = self.dynamic.write().unwrap_or_else(PoisonError::into_inner);
        let descriptor = dynamic
            .entry(key.clone().into_owned().into_boxed_slice())
            .or_insert_with(|| {
                debug!(
                    "registering non-standard element {:?}",
                    String::from_utf8_lossy(&key)
                );
                Arc::new(ElementDescriptor::plain(&key))
            });
        Arc::clone(descriptor)
    }

    /// Number of standard descriptors
    pub fn standard_len(&self) -> usize {
        self.standard.len()
    }

    /// Number of cached non-standard descriptors
    pub fn dynamic_len(&self) -> usize {
        self.dynamic.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Default for ElementRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::descriptor::ContentModel;
    use std::thread;

    #[test]
    fn test_standard_lookup_is_case_insensitive() {
        let registry = ElementRegistry::new();
        let lower = registry.lookup(b"br");
        let upper = registry.lookup(b"BR");
        assert!(Arc::ptr_eq(&lower, &upper));
        assert_eq!(lower.content, ContentModel::Void);
        assert_eq!(registry.dynamic_len(), 0);
    }

    #[test]
    fn test_unknown_name_is_cached_once() {
        let registry = ElementRegistry::new();
        let first = registry.lookup(b"my-widget");
        let second = registry.lookup(b"My-Widget");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.name.as_ref(), b"my-widget");
        assert_eq!(first.content, ContentModel::Normal);
        assert_eq!(registry.dynamic_len(), 1);
        assert!(Arc::ptr_eq(&registry.lookup(b"DIV"), &registry.lookup(b"div")));
        assert_eq!(registry.dynamic_len(), 1);
    }

    #[test]
    fn test_concurrent_inserts_share_one_descriptor() {
        let registry = Arc::new(ElementRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.lookup(b"x-race"))
            })
            .collect();
        let descriptors: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for d in &descriptors[1..] {
            assert!(Arc::ptr_eq(&descriptors[0], d));
        }
        assert_eq!(registry.dynamic_len(), 1);
    }

    #[test]
    fn test_global_registry() {
        assert!(global().standard_len() >= 120);
    }
}
