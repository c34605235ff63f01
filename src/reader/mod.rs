//! Pull-mode input
//!
//! - BufferManager: refills, compacts and grows the working buffer
//! - BufferPool: bounded, non-blocking reuse of default-size buffers

pub mod buffered;
pub mod pool;

pub use buffered::BufferManager;
pub use pool::{BufferPool, DEFAULT_BUFFER_SIZE};
