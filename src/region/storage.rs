//! Backing storage shared between region handles.

use std::fmt;
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard, TryLockError};

use bytes::Bytes;

use crate::error::BufferError;

/// Callback run when externally owned memory is released.
pub(crate) type ReleaseHook = Box<dyn FnOnce() + Send>;

/// One owned, lock-guarded contiguous allocation.
///
/// The lock turns conflicting map access (undefined behavior in the scheme
/// this models) into a recoverable [`BufferError::Busy`].
pub(crate) struct Block {
    data: RwLock<Box<[u8]>>,
    len: usize,
    release: Mutex<Option<ReleaseHook>>,
}

impl Block {
    pub(crate) fn new(data: Box<[u8]>, release: Option<ReleaseHook>) -> Self {
        let len = data.len();
        Self {
            data: RwLock::new(data),
            len,
            release: Mutex::new(release),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Acquires shared read access, without blocking.
    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, Box<[u8]>>, BufferError> {
        match self.data.try_read() {
            Ok(guard) => Ok(guard),
            // A poisoned lock still holds intact bytes; writes hold the
            // lock for their whole duration, so a panicked writer cannot
            // have left a torn slice.
            Err(TryLockError::Poisoned(poisoned)) => Ok(poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => Err(BufferError::Busy),
        }
    }

    /// Acquires exclusive write access, without blocking.
    pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, Box<[u8]>>, BufferError> {
        match self.data.try_write() {
            Ok(guard) => Ok(guard),
            Err(TryLockError::Poisoned(poisoned)) => Ok(poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => Err(BufferError::Busy),
        }
    }
}

impl Drop for Block {
    fn drop(&mut self) {
        if let Ok(hook) = self.release.get_mut() {
            if let Some(hook) = hook.take() {
                hook();
            }
        }
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block").field("len", &self.len).finish()
    }
}

/// The storage kinds a region handle can point at.
#[derive(Clone, Debug)]
pub(crate) enum Storage {
    /// Owned allocation, writable unless the handle is flagged read-only.
    Heap(Arc<Block>),
    /// Immutable reference-counted bytes, always read-only.
    Shared(Bytes),
}

impl Storage {
    /// Total bytes physically available in the allocation.
    pub(crate) fn alloc_size(&self) -> usize {
        match self {
            Storage::Heap(block) => block.len(),
            Storage::Shared(bytes) => bytes.len(),
        }
    }
}
