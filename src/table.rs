//! Operation set shared by every symbol table variant.

use crate::error::PutError;

/// A string-keyed table with unique keys.
///
/// Implemented by [`SymTable`](crate::SymTable) (bucketed, growing) and
/// [`SymTableList`](crate::SymTableList) (single chain). Absence is always
/// reported as `None` or [`PutError::DuplicateKey`], never as a stored value.
pub trait SymbolTable<V> {
    /// Number of live bindings.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, key: &str) -> bool;

    fn get(&self, key: &str) -> Option<&V>;

    fn get_mut(&mut self, key: &str) -> Option<&mut V>;

    /// Inserts a binding for a key not yet present. On `DuplicateKey` the
    /// existing binding is left untouched.
    fn put(&mut self, key: &str, value: V) -> Result<(), PutError>;

    /// Swaps the value of an existing binding, returning the old one.
    fn replace(&mut self, key: &str, value: V) -> Option<V>;

    /// Unlinks the binding for `key` and returns its value.
    fn remove(&mut self, key: &str) -> Option<V>;

    /// Visits every live binding exactly once.
    fn for_each<F>(&self, visit: F)
    where
        F: FnMut(&str, &V);

    /// Like `for_each`, with mutable access to each value.
    fn for_each_mut<F>(&mut self, visit: F)
    where
        F: FnMut(&str, &mut V);
}
