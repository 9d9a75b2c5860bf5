use thiserror::Error;

/// Why `put` did not insert a binding.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutError {
    #[error("key is already present in the table")]
    DuplicateKey,
    #[error("out of memory while copying the key")]
    OutOfMemory,
}

/// The bucket array for a new table could not be allocated.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("failed to allocate bucket array of {buckets} chains")]
pub struct AllocError {
    pub buckets: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_render() {
        assert_eq!(
            PutError::DuplicateKey.to_string(),
            "key is already present in the table"
        );
        assert_eq!(
            AllocError { buckets: 509 }.to_string(),
            "failed to allocate bucket array of 509 chains"
        );
    }
}
