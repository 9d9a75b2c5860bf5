//! Fallible allocation helpers.
//!
//! Both tables copy keys, and the hash table reserves binding slots and
//! allocates bucket arrays, through these functions so that exhaustion
//! surfaces as an error value instead of aborting. Under `cfg(test)` each
//! helper can be told to fail once.

use crate::error::{AllocError, PutError};
use slotmap::{Key, SlotMap};

/// Copies `key` into owned storage sized exactly to it.
pub(crate) fn copy_key(key: &str) -> Result<Box<str>, PutError> {
    #[cfg(test)]
    if failpoint::KEY.with(|f| f.replace(false)) {
        return Err(PutError::OutOfMemory);
    }
    let mut owned = String::new();
    owned
        .try_reserve_exact(key.len())
        .map_err(|_| PutError::OutOfMemory)?;
    owned.push_str(key);
    Ok(owned.into_boxed_str())
}

/// Makes room for one more binding so the following insert cannot allocate.
pub(crate) fn reserve_binding<K: Key, T>(arena: &mut SlotMap<K, T>) -> Result<(), PutError> {
    #[cfg(test)]
    if failpoint::BINDING.with(|f| f.replace(false)) {
        return Err(PutError::OutOfMemory);
    }
    arena.try_reserve(1).map_err(|_| PutError::OutOfMemory)
}

/// Allocates `len` empty chain heads.
pub(crate) fn empty_buckets<T>(len: usize) -> Result<Vec<Option<T>>, AllocError> {
    #[cfg(test)]
    if failpoint::BUCKETS.with(|f| f.replace(false)) {
        return Err(AllocError { buckets: len });
    }
    let mut buckets = Vec::new();
    buckets
        .try_reserve_exact(len)
        .map_err(|_| AllocError { buckets: len })?;
    buckets.extend((0..len).map(|_| None));
    Ok(buckets)
}
