//! SymTableList: the whole table as one unordered singly-linked chain.
//!
//! Every operation is a linear scan. Useful for tables that stay small, and
//! as a reference for the bucketed table's semantics.

use crate::alloc::copy_key;
use crate::error::PutError;
use crate::table::SymbolTable;
use core::fmt;

struct Node<V> {
    key: Box<str>,
    value: V,
    next: Option<Box<Node<V>>>,
}

pub struct SymTableList<V> {
    first: Option<Box<Node<V>>>,
    len: usize,
}

impl<V> SymTableList<V> {
    pub const fn new() -> Self {
        Self {
            first: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn find(&self, key: &str) -> Option<&Node<V>> {
        let mut cur = self.first.as_deref();
        while let Some(n) = cur {
            if &*n.key == key {
                return Some(n);
            }
            cur = n.next.as_deref();
        }
        None
    }

    fn find_mut(&mut self, key: &str) -> Option<&mut Node<V>> {
        let mut cur = self.first.as_deref_mut();
        while let Some(n) = cur {
            if &*n.key == key {
                return Some(n);
            }
            cur = n.next.as_deref_mut();
        }
        None
    }

    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.find(key).map(|n| &n.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.find_mut(key).map(|n| &mut n.value)
    }

    /// Links a new binding at the front of the list.
    pub fn put(&mut self, key: &str, value: V) -> Result<(), PutError> {
        if self.contains(key) {
            return Err(PutError::DuplicateKey);
        }
        let key = copy_key(key)?;
        let next = self.first.take();
        self.first = Some(Box::new(Node { key, value, next }));
        self.len += 1;
        Ok(())
    }

    pub fn replace(&mut self, key: &str, value: V) -> Option<V> {
        let slot = self.get_mut(key)?;
        Some(core::mem::replace(slot, value))
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        let mut link = &mut self.first;
        while link.as_deref().is_some_and(|n| &*n.key != key) {
            if let Some(n) = link {
                link = &mut n.next;
            }
        }
        let node = link.take()?;
        let Node { value, next, .. } = *node;
        *link = next;
        self.len -= 1;
        Some(value)
    }

    /// Visits bindings newest first.
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &V),
    {
        for (k, v) in self.iter() {
            visit(k, v);
        }
    }

    pub fn for_each_mut<F>(&mut self, mut visit: F)
    where
        F: FnMut(&str, &mut V),
    {
        let mut cur = self.first.as_deref_mut();
        while let Some(n) = cur {
            visit(&*n.key, &mut n.value);
            cur = n.next.as_deref_mut();
        }
    }

    pub fn iter(&self) -> ListIter<'_, V> {
        ListIter {
            cur: self.first.as_deref(),
            remaining: self.len,
        }
    }
}

impl<V> Default for SymTableList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Drop for SymTableList<V> {
    // Unlink node by node; the default recursive drop can overflow the stack
    // on long lists.
    fn drop(&mut self) {
        let mut cur = self.first.take();
        while let Some(mut n) = cur {
            cur = n.next.take();
        }
    }
}

/// Iterator over a list table, newest binding first.
pub struct ListIter<'a, V> {
    cur: Option<&'a Node<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for ListIter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.cur?;
        self.cur = n.next.as_deref();
        self.remaining -= 1;
        Some((&*n.key, &n.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for ListIter<'_, V> {}

impl<'a, V> IntoIterator for &'a SymTableList<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = ListIter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: fmt::Debug> fmt::Debug for SymTableList<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V> SymbolTable<V> for SymTableList<V> {
    fn len(&self) -> usize {
        SymTableList::len(self)
    }

    fn contains(&self, key: &str) -> bool {
        SymTableList::contains(self, key)
    }

    fn get(&self, key: &str) -> Option<&V> {
        SymTableList::get(self, key)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        SymTableList::get_mut(self, key)
    }

    fn put(&mut self, key: &str, value: V) -> Result<(), PutError> {
        SymTableList::put(self, key, value)
    }

    fn replace(&mut self, key: &str, value: V) -> Option<V> {
        SymTableList::replace(self, key, value)
    }

    fn remove(&mut self, key: &str) -> Option<V> {
        SymTableList::remove(self, key)
    }

    fn for_each<F>(&self, visit: F)
    where
        F: FnMut(&str, &V),
    {
        SymTableList::for_each(self, visit)
    }

    fn for_each_mut<F>(&mut self, visit: F)
    where
        F: FnMut(&str, &mut V),
    {
        SymTableList::for_each_mut(self, visit)
    }
}
