//! Owned event lists
//!
//! Handler callbacks receive spans into a buffer that is compacted and
//! refilled between passes. This module copies events out so they outlive
//! the parse:
//!
//! ```text
//! MarkupParser ---> EventCollector ---> Vec<MarkupEvent>
//! ```
//!
//! Used by the parallel batch strategy and by callers that want the whole
//! event sequence instead of callbacks.

pub mod collector;
pub mod events;

pub use collector::EventCollector;
pub use events::MarkupEvent;
