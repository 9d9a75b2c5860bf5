//! SymTable: separately chained hash table that grows through a fixed
//! schedule of prime bucket counts.

use crate::alloc::{copy_key, empty_buckets, reserve_binding};
use crate::error::{AllocError, PutError};
use crate::hash::{KeyHasher, Polynomial65599};
use crate::reentrancy::DebugReentrancy;
use crate::schedule::{next_capacity, INITIAL_CAPACITY, MAX_CAPACITY};
use crate::table::SymbolTable;
use core::fmt;
use log::{debug, trace, warn};
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug)]
struct Binding<V> {
    key: Box<str>,
    value: V,
    next: Option<DefaultKey>,
}

/// String-keyed table with unique keys.
///
/// Bindings live in an arena and are chained per bucket through arena keys.
/// The bucket count starts at 509 and steps through
/// [`CAPACITY_SCHEDULE`](crate::CAPACITY_SCHEDULE) each time an insert finds
/// the table holding as many bindings as it has buckets. It never shrinks.
///
/// The table owns its copy of every key and whatever `V` is. Use
/// `SymTable<&T>` when the values belong to someone else.
pub struct SymTable<V, H = Polynomial65599> {
    hasher: H,
    buckets: Vec<Option<DefaultKey>>,
    bindings: SlotMap<DefaultKey, Binding<V>>, // chain nodes
    reentrancy: DebugReentrancy,
}

impl<V> SymTable<V> {
    /// Creates an empty table at the initial capacity.
    pub fn new() -> Self {
        Self::with_hasher(Polynomial65599)
    }

    /// Like `new`, but reports a failed bucket-array allocation.
    pub fn try_new() -> Result<Self, AllocError> {
        Self::try_with_hasher(Polynomial65599)
    }
}

impl<V> Default for SymTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, H: KeyHasher> SymTable<V, H> {
    /// Creates an empty table that places keys with `hasher`.
    pub fn with_hasher(hasher: H) -> Self {
        Self {
            hasher,
            buckets: vec![None; INITIAL_CAPACITY],
            bindings: SlotMap::with_key(),
            reentrancy: DebugReentrancy::new(),
        }
    }

    /// Like `with_hasher`, but reports a failed bucket-array allocation.
    pub fn try_with_hasher(hasher: H) -> Result<Self, AllocError> {
        Ok(Self {
            hasher,
            buckets: empty_buckets(INITIAL_CAPACITY)?,
            bindings: SlotMap::with_key(),
            reentrancy: DebugReentrancy::new(),
        })
    }

    /// Number of live bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True when the table holds no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Current number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// The hasher used to place keys.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    fn bucket_of(&self, key: &str) -> usize {
        let n = self.buckets.len();
        let i = self.hasher.bucket(key, n);
        assert!(i < n, "hasher returned bucket {} for {} buckets", i, n);
        i
    }

    fn find(&self, key: &str) -> Option<DefaultKey> {
        let _g = self.reentrancy.enter();
        let mut cur = self.buckets[self.bucket_of(key)];
        while let Some(k) = cur {
            let b = &self.bindings[k];
            if &*b.key == key {
                return Some(k);
            }
            cur = b.next;
        }
        None
    }

    /// True if a binding for `key` exists.
    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// The value bound to `key`, or `None` if absent.
    pub fn get(&self, key: &str) -> Option<&V> {
        let k = self.find(key)?;
        Some(&self.bindings[k].value)
    }

    /// Mutable access to the value bound to `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let k = self.find(key)?;
        Some(&mut self.bindings[k].value)
    }

    /// Inserts `key -> value` if `key` is not present.
    ///
    /// A full table grows to the next capacity first. If the bigger bucket
    /// array cannot be allocated the insert still goes ahead at the current
    /// capacity, and the next insert tries to grow again.
    pub fn put(&mut self, key: &str, value: V) -> Result<(), PutError> {
        if self.contains(key) {
            return Err(PutError::DuplicateKey);
        }
        // Allocate before growing so a failure leaves the table untouched.
        let owned = copy_key(key)?;
        reserve_binding(&mut self.bindings)?;
        self.grow_if_full();

        let _g = self.reentrancy.enter();
        let i = self.bucket_of(key);
        let next = self.buckets[i];
        let k = self.bindings.insert(Binding {
            key: owned,
            value,
            next,
        });
        self.buckets[i] = Some(k);
        Ok(())
    }

    /// Swaps in `value` for an existing binding and returns the old value;
    /// `None` and no change if `key` is absent.
    pub fn replace(&mut self, key: &str, value: V) -> Option<V> {
        let slot = self.get_mut(key)?;
        Some(core::mem::replace(slot, value))
    }

    /// Unlinks the binding for `key`, releases its key copy and returns the
    /// value; `None` and no change if `key` is absent.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let _g = self.reentrancy.enter();
        let i = self.bucket_of(key);
        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.buckets[i];
        while let Some(k) = cur {
            let b = &self.bindings[k];
            if &*b.key == key {
                let next = b.next;
                match prev {
                    None => self.buckets[i] = next,
                    Some(p) => self.bindings[p].next = next,
                }
                return self.bindings.remove(k).map(|b| b.value);
            }
            prev = cur;
            cur = b.next;
        }
        None
    }

    fn grow_if_full(&mut self) {
        let capacity = self.buckets.len();
        if self.bindings.len() < capacity {
            return;
        }
        let Some(new_capacity) = next_capacity(capacity) else {
            return;
        };
        let new_buckets = match empty_buckets(new_capacity) {
            Ok(b) => b,
            Err(e) => {
                warn!(
                    "symtable: {}; staying at {} buckets with {} bindings",
                    e,
                    capacity,
                    self.bindings.len()
                );
                return;
            }
        };

        let _g = self.reentrancy.enter();
        let old = core::mem::replace(&mut self.buckets, new_buckets);
        for head in old {
            let mut cur = head;
            while let Some(k) = cur {
                let i = self.bucket_of(&self.bindings[k].key);
                let b = &mut self.bindings[k];
                cur = b.next;
                b.next = self.buckets[i];
                self.buckets[i] = Some(k);
            }
        }

        debug!(
            "symtable: rehashed {} bindings from {} to {} buckets",
            self.bindings.len(),
            capacity,
            new_capacity
        );
        if new_capacity == MAX_CAPACITY {
            trace!("symtable: reached largest capacity {}", MAX_CAPACITY);
        }
    }

    /// Calls `visit` on each binding: buckets in index order, newest first
    /// within a bucket.
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &V),
    {
        for (k, v) in self.iter() {
            visit(k, v);
        }
    }

    /// Same order as `for_each`, with each value mutable.
    pub fn for_each_mut<F>(&mut self, mut visit: F)
    where
        F: FnMut(&str, &mut V),
    {
        for &head in &self.buckets {
            let mut cur = head;
            while let Some(k) = cur {
                let b = &mut self.bindings[k];
                visit(&*b.key, &mut b.value);
                cur = b.next;
            }
        }
    }

    /// Number of bindings in each chain, in bucket order.
    pub fn chain_lengths(&self) -> Vec<usize> {
        self.buckets
            .iter()
            .map(|&head| {
                let mut n = 0;
                let mut cur = head;
                while let Some(k) = cur {
                    n += 1;
                    cur = self.bindings[k].next;
                }
                n
            })
            .collect()
    }
}

impl<V, H> SymTable<V, H> {
    /// Iterates in `for_each` order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            buckets: self.buckets.iter(),
            bindings: &self.bindings,
            cur: None,
            remaining: self.bindings.len(),
        }
    }

    /// Iterates with mutable values. The order is unspecified and may differ
    /// from `iter`; use `for_each_mut` when chain order matters.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            it: self.bindings.iter_mut(),
        }
    }

    /// Keys in `for_each` order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Values in `for_each` order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }
}

/// Iterator over bindings in bucket order.
pub struct Iter<'a, V> {
    buckets: core::slice::Iter<'a, Option<DefaultKey>>,
    bindings: &'a SlotMap<DefaultKey, Binding<V>>,
    cur: Option<DefaultKey>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(k) = self.cur {
                let bindings: &'a SlotMap<DefaultKey, Binding<V>> = self.bindings;
                let b = &bindings[k];
                self.cur = b.next;
                self.remaining -= 1;
                return Some((&*b.key, &b.value));
            }
            self.cur = *self.buckets.next()?;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

/// Iterator over bindings with mutable values.
pub struct IterMut<'a, V> {
    it: slotmap::basic::IterMut<'a, DefaultKey, Binding<V>>,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (&'a str, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(_, b)| (&*b.key, &mut b.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, V, H> IntoIterator for &'a SymTable<V, H> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: fmt::Debug, H> fmt::Debug for SymTable<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V, H: KeyHasher> SymbolTable<V> for SymTable<V, H> {
    fn len(&self) -> usize {
        SymTable::len(self)
    }

    fn contains(&self, key: &str) -> bool {
        SymTable::contains(self, key)
    }

    fn get(&self, key: &str) -> Option<&V> {
        SymTable::get(self, key)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        SymTable::get_mut(self, key)
    }

    fn put(&mut self, key: &str, value: V) -> Result<(), PutError> {
        SymTable::put(self, key, value)
    }

    fn replace(&mut self, key: &str, value: V) -> Option<V> {
        SymTable::replace(self, key, value)
    }

    fn remove(&mut self, key: &str) -> Option<V> {
        SymTable::remove(self, key)
    }

    fn for_each<F>(&self, visit: F)
    where
        F: FnMut(&str, &V),
    {
        SymTable::for_each(self, visit)
    }

    fn for_each_mut<F>(&mut self, visit: F)
    where
        F: FnMut(&str, &mut V),
    {
        SymTable::for_each_mut(self, visit)
    }
}

#[cfg(test)]
impl<V, H: KeyHasher> SymTable<V, H> {
    /// Panics unless every binding sits in the chain its key hashes to and
    /// the chains hold exactly `len` bindings.
    pub(crate) fn assert_invariants(&self) {
        assert!(crate::CAPACITY_SCHEDULE.contains(&self.buckets.len()));
        let mut reachable = 0;
        for (i, &head) in self.buckets.iter().enumerate() {
            let mut cur = head;
            while let Some(k) = cur {
                let b = &self.bindings[k];
                assert_eq!(self.bucket_of(&b.key), i, "{:?} misfiled", b.key);
                reachable += 1;
                cur = b.next;
            }
        }
        assert_eq!(reachable, self.bindings.len());
    }
}
