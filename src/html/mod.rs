//! HTML Element Semantics
//!
//! Maps element names to the behavior the Event Processor applies:
//! - Descriptor: void / CDATA-bodied / auto-open / auto-close rules
//! - Elements: the standard HTML table
//! - Registry: lock-free standard lookups plus a locked cache for
//!   non-standard names

pub mod descriptor;
pub mod elements;
pub mod registry;

pub use descriptor::{ContentModel, ElementDescriptor};
pub use registry::ElementRegistry;
