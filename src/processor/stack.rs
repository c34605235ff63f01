//! Open element stack
//!
//! Holds interned copies of element names, outermost first. Names come from
//! the parse's `NameRepository`, so equal names share one allocation and
//! are matched by pointer.

use std::rc::Rc;

#[derive(Debug, Default)]
pub struct ElementStack {
    elements: Vec<Rc<[u8]>>,
}

impl ElementStack {
    pub fn new() -> Self {
        ElementStack {
            elements: Vec::with_capacity(32),
        }
    }

    #[inline]
    pub fn push(&mut self, name: Rc<[u8]>) {
        self.elements.push(name);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Rc<[u8]>> {
        self.elements.pop()
    }

    #[inline]
    pub fn top(&self) -> Option<&Rc<[u8]>> {
        self.elements.last()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Depth of the innermost element named `name`
    pub fn position_of(&self, name: &Rc<[u8]>) -> Option<usize> {
        self.elements.iter().rposition(|open| Rc::ptr_eq(open, name))
    }

    /// Drop everything at `depth` and above without reporting it
    pub fn truncate(&mut self, depth: usize) {
        self.elements.truncate(depth);
    }

    /// Names from the outermost element inwards
    pub fn names(&self) -> impl DoubleEndedIterator<Item = &[u8]> + '_ {
        self.elements.iter().map(|name| name.as_ref())
    }

    /// Comma-separated names, innermost first, for error messages
    pub fn describe(&self) -> String {
        self.elements
            .iter()
            .rev()
            .map(|name| String::from_utf8_lossy(name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
