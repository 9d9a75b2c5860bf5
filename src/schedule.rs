//! Fixed bucket-count schedule used by the hash table's growth policy.

/// Bucket counts the hash table moves through, smallest first.
pub const CAPACITY_SCHEDULE: [usize; 8] = [509, 1021, 2039, 4093, 8191, 16381, 32749, 65521];

/// Capacity a fresh table starts at.
pub const INITIAL_CAPACITY: usize = CAPACITY_SCHEDULE[0];

/// Largest capacity; growth stops here.
pub const MAX_CAPACITY: usize = CAPACITY_SCHEDULE[CAPACITY_SCHEDULE.len() - 1];

/// Returns the schedule entry after `current`, or `None` if `current` is the
/// last entry or not a schedule entry at all.
pub(crate) fn next_capacity(current: usize) -> Option<usize> {
    let pos = CAPACITY_SCHEDULE.iter().position(|&c| c == current)?;
    CAPACITY_SCHEDULE.get(pos + 1).copied()
}
