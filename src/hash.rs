//! Key hashing: maps a string key onto a bucket index.

/// Maps a key to a bucket index in `[0, bucket_count)`.
///
/// Implementations must be deterministic: the same key and bucket count
/// always produce the same index. No relationship between indices at
/// different bucket counts is assumed; the table recomputes every index
/// from scratch when it grows.
pub trait KeyHasher {
    fn bucket(&self, key: &str, bucket_count: usize) -> usize;
}

/// Polynomial rolling hash with multiplier 65599 over the key bytes.
///
/// Arithmetic wraps at `usize` width. The empty key maps to bucket 0. Bytes
/// are taken as unsigned values, so bytes at or above 0x80 contribute
/// 128..=255 rather than a sign-extended amount; keys containing them may
/// land in different buckets than a `signed char` implementation would put
/// them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Polynomial65599;

impl Polynomial65599 {
    pub const MULTIPLIER: usize = 65599;

    /// Full-width hash before reduction.
    #[inline]
    pub fn raw(key: &str) -> usize {
        key.bytes().fold(0usize, |h, b| {
            h.wrapping_mul(Self::MULTIPLIER).wrapping_add(b as usize)
        })
    }
}

impl KeyHasher for Polynomial65599 {
    #[inline]
    fn bucket(&self, key: &str, bucket_count: usize) -> usize {
        assert!(bucket_count > 0, "bucket count must be positive");
        Self::raw(key) % bucket_count
    }
}

impl<H: KeyHasher + ?Sized> KeyHasher for &H {
    #[inline]
    fn bucket(&self, key: &str, bucket_count: usize) -> usize {
        (**self).bucket(key, bucket_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_lands_in_bucket_zero() {
        assert_eq!(Polynomial65599.bucket("", 509), 0);
        assert_eq!(Polynomial65599.bucket("", 65521), 0);
    }

    #[test]
    fn single_byte_is_its_own_value() {
        assert_eq!(Polynomial65599::raw("a"), 97);
        assert_eq!(Polynomial65599.bucket("a", 509), 97);
        assert_eq!(Polynomial65599.bucket("a", 50), 97 % 50);
    }

    #[test]
    fn two_bytes_follow_the_recurrence() {
        // 'a' * 65599 + 'b'
        let expected = 97usize * 65599 + 98;
        assert_eq!(Polynomial65599::raw("ab"), expected);
        assert_eq!(Polynomial65599.bucket("ab", 1021), expected % 1021);
    }

    #[test]
    fn high_bytes_are_unsigned() {
        // "é" is 0xC3 0xA9
        assert_eq!(Polynomial65599::raw("é"), 0xC3 * 65599 + 0xA9);
    }

    #[test]
    fn long_keys_wrap_instead_of_overflowing() {
        let key = "z".repeat(4096);
        let h = Polynomial65599.bucket(&key, 32749);
        assert!(h < 32749);
        assert_eq!(h, Polynomial65599.bucket(&key, 32749));
    }

    #[test]
    fn index_is_always_in_range() {
        for n in [1usize, 2, 509, 1021, 65521] {
            for key in ["", "x", "symbol", "another_symbol", "\u{1F600}"] {
                assert!(Polynomial65599.bucket(key, n) < n);
            }
        }
    }

    #[test]
    #[should_panic(expected = "bucket count must be positive")]
    fn zero_bucket_count_panics() {
        let _ = Polynomial65599.bucket("k", 0);
    }
}
