//! symtable: a string-keyed symbol table for compilers, interpreters and
//! other programs that need fast key-value storage with unique keys.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a separately chained hash table whose bucket count grows through
//!   a fixed schedule of primes, with a single-chain list table sharing the
//!   same operations.
//! - Layers:
//!   - `hash`: `KeyHasher` maps a key to a bucket index; the default is a
//!     polynomial rolling hash with multiplier 65599.
//!   - `schedule`: the bucket counts 509, 1021, ..., 65521.
//!   - `SymTable<V, H>`: bucket array of chain heads over an arena of
//!     bindings. Grows on insert when `len == capacity`.
//!   - `SymTableList<V>`: one boxed singly-linked chain, no hashing.
//!   - `SymbolTable<V>`: the operation set both tables implement.
//!
//! Constraints
//! - Single-threaded: `SymTable` is neither `Send` nor `Sync`; no
//!   operation blocks or yields.
//! - Keys are unique; a duplicate `put` fails and leaves the old binding.
//! - Keys are copied into table-owned storage on insert.
//! - Capacity never shrinks and stops growing at 65521; chains keep
//!   lengthening past that.
//!
//! Ownership
//! - Bindings live in a `slotmap::SlotMap`; chains link arena keys, so a
//!   rehash relinks keys instead of moving or copying bindings.
//! - Values are a type parameter. The table owns what it is given; callers
//!   that keep ownership of their values store references (`SymTable<&T>`)
//!   and the borrow checker keeps those values alive for as long as the
//!   table holds them. `remove` and `replace` hand the old value back.
//! - Dropping a table releases every binding, every key copy and the bucket
//!   array.
//!
//! Growth
//! - Checked once per successful `put`, after the duplicate check and key
//!   copy. Every binding is rehashed from scratch at the new capacity and
//!   pushed onto the head of its new chain.
//! - If the new bucket array cannot be allocated the table logs a warning,
//!   keeps its current capacity and inserts anyway; the next insert retries.
//!
//! Errors
//! - Absence is `None`; a duplicate key is `PutError::DuplicateKey`.
//! - A failed key copy is `PutError::OutOfMemory` and leaves the table as it
//!   was. `try_new` reports a failed bucket allocation as `AllocError`.
//! - Contract violations (a hasher returning an index out of range, a zero
//!   bucket count) panic.
//!
//! Reentrancy policy
//! - `SymTable` calls user code only through `H: KeyHasher`, and only while
//!   it holds a debug-only reentrancy guard. Re-entering the same table from
//!   the hasher panics in debug builds.
//! - Visitors passed to `for_each` run outside the guard and may read the
//!   table; the borrow checker rules out structural changes during a visit.

mod alloc;
pub mod error;
pub mod hash;
pub mod hash_table;
mod hash_table_proptest;
pub mod list_table;
mod reentrancy;
pub mod schedule;
pub mod table;

// Public surface
pub use error::{AllocError, PutError};
pub use hash::{KeyHasher, Polynomial65599};
pub use hash_table::{Iter, IterMut, SymTable};
pub use list_table::{ListIter, SymTableList};
pub use schedule::{CAPACITY_SCHEDULE, INITIAL_CAPACITY, MAX_CAPACITY};
pub use table::SymbolTable;
