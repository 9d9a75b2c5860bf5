//! Debug-only reentrancy detection for table operations.
//!
//! A table calls into user code (its `KeyHasher`) while it walks or relinks
//! chains. If that code reaches back into the same table, the table would
//! observe itself half-updated. Each operation holds a `Section` for the
//! duration of that window; opening a second one panics in debug builds.
//! Release builds compile the whole thing away.

#[cfg(debug_assertions)]
use core::cell::Cell;
use core::marker::PhantomData;

#[derive(Debug)]
pub(crate) struct DebugReentrancy {
    #[cfg(debug_assertions)]
    open: Cell<bool>,
    // The tables are single-threaded; keep them !Send + !Sync.
    _single_thread: PhantomData<*mut ()>,
}

impl DebugReentrancy {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            open: Cell::new(false),
            _single_thread: PhantomData,
        }
    }

    /// Opens a critical section, closed when the returned value drops.
    #[inline]
    pub(crate) fn enter(&self) -> Section<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.open.replace(true),
                "reentrancy detected: table entered from inside its own operation"
            );
            Section { owner: self }
        }

        #[cfg(not(debug_assertions))]
        {
            Section { _owner: PhantomData }
        }
    }
}

impl Default for DebugReentrancy {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) struct Section<'a> {
    #[cfg(debug_assertions)]
    owner: &'a DebugReentrancy,
    #[cfg(not(debug_assertions))]
    _owner: PhantomData<&'a ()>,
}

impl Drop for Section<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.owner.open.set(false);
    }
}
