//! Name Repository
//!
//! Interns element and attribute names copied out of the (reused) buffer.
//! Entries are kept sorted for binary search, and every lookup of equal
//! text returns the same allocation, so interned names can be compared by
//! pointer.

use std::rc::Rc;

/// Per-parse interning pool for names
#[derive(Debug, Default)]
pub struct NameRepository {
    /// Sorted, deduplicated canonical names
    names: Vec<Rc<[u8]>>,
    /// Reusable buffer for case folding
    scratch: Vec<u8>,
}

impl NameRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        NameRepository {
            names: Vec::with_capacity(64),
            scratch: Vec::with_capacity(32),
        }
    }

    /// Canonical copy of `name`, lower-cased first when `fold_case` is set
    pub fn intern(&mut self, name: &[u8], fold_case: bool) -> Rc<[u8]> {
        let key: &[u8] = if fold_case && name.iter().any(u8::is_ascii_uppercase) {
            self.scratch.clear();
            self.scratch.extend(name.iter().map(u8::to_ascii_lowercase));
            &self.scratch
        } else {
            name
        };

        match self.names.binary_search_by(|probe| probe.as_ref().cmp(key)) {
            Ok(index) => Rc::clone(&self.names[index]),
            Err(index) => {
                let canonical: Rc<[u8]> = Rc::from(key);
                self.names.insert(index, Rc::clone(&canonical));
                canonical
            }
        }
    }

    /// Number of distinct names stored
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the repository is empty
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
