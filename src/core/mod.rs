//! Core markup scanning primitives
//!
//! The building blocks every parse pass is made of:
//! - Span/Position: located references into the working buffer
//! - Locator: line and column bookkeeping
//! - Scanner: memchr-accelerated delimiter search over a buffer window
//! - Classifier: what structure starts at a '<', and where it ends
//! - Splitters: named sub-spans of a complete structure
//! - Attributes: attribute sequence splitting
//! - Names: per-parse interning of element and attribute names

pub mod attributes;
pub mod classifier;
pub mod locator;
pub mod names;
pub mod parts;
pub mod scanner;
pub mod span;
pub mod splitter;
