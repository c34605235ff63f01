//! Working buffer pool
//!
//! A small fixed set of default-size buffers reused across parses. Access
//! never blocks: if the lock is contended, the pool is empty, or the size
//! is not the default, the caller gets a fresh unpooled buffer that is
//! simply dropped when done.

use log::debug;
use std::ops::{Deref, DerefMut};
use std::sync::{LazyLock, Mutex, MutexGuard, TryLockError};

/// Default pull-mode buffer size
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Buffers kept by the process-wide pool
const POOL_CAPACITY: usize = 8;

static GLOBAL: LazyLock<BufferPool> =
    LazyLock::new(|| BufferPool::new(DEFAULT_BUFFER_SIZE, POOL_CAPACITY));

/// The process-wide pool of default-size buffers
pub fn global() -> &'static BufferPool {
    &GLOBAL
}

pub struct BufferPool {
    buffer_size: usize,
    capacity: usize,
    free: Mutex<Vec<Vec<u8>>>,
}

impl BufferPool {
    /// A pool holding `capacity` buffers of `buffer_size` bytes, allocated
    /// up front
    pub fn new(buffer_size: usize, capacity: usize) -> Self {
        let free = (0..capacity).map(|_| vec![0u8; buffer_size]).collect();
        BufferPool {
            buffer_size,
            capacity,
            free: Mutex::new(free),
        }
    }

    /// Size of the buffers this pool hands out
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// A buffer of `size` bytes, pooled when possible
    pub fn acquire(&self, size: usize) -> PooledBuffer<'_> {
        if size == self.buffer_size {
            if let Some(data) = self.try_free().and_then(|mut free| free.pop()) {
                return PooledBuffer {
                    data,
                    home: Some(self),
                };
            }
            debug!("buffer pool miss, allocating {} bytes", size);
        }
        PooledBuffer::unpooled(size)
    }

    /// Number of buffers currently available (0 while the lock is held)
    pub fn available(&self) -> usize {
        self.try_free().map_or(0, |free| free.len())
    }

    fn release(&self, data: Vec<u8>) {
        if data.len() != self.buffer_size {
            return;
        }
        if let Some(mut free) = self.try_free() {
            if free.len() < self.capacity {
                free.push(data);
            }
        }
    }

    fn try_free(&self) -> Option<MutexGuard<'_, Vec<Vec<u8>>>> {
        match self.free.try_lock() {
            Ok(guard) => Some(guard),
            Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => None,
        }
    }
}

/// A working buffer that returns to its pool when dropped
pub struct PooledBuffer<'p> {
    data: Vec<u8>,
    home: Option<&'p BufferPool>,
}

impl<'p> PooledBuffer<'p> {
    /// A buffer owned by nobody but the caller
    pub fn unpooled(size: usize) -> Self {
        PooledBuffer {
            data: vec![0u8; size],
            home: None,
        }
    }

    pub fn is_pooled(&self) -> bool {
        self.home.is_some()
    }

    /// Swap in an unpooled buffer of `size` bytes carrying over the first
    /// `keep` bytes. The old buffer goes back to its pool.
    pub fn grow(&mut self, size: usize, keep: usize) {
        let mut bigger = vec![0u8; size.max(keep)];
        bigger[..keep].copy_from_slice(&self.data[..keep]);
        let old = std::mem::replace(&mut self.data, bigger);
        if let Some(pool) = self.home.take() {
            pool.release(old);
        }
    }
}

impl Deref for PooledBuffer<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        if let Some(pool) = self.home.take() {
            pool.release(std::mem::take(&mut self.data));
        }
    }
}
