//! FNV-1a hashing and slot index math.

pub const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
pub const FNV_PRIME: u64 = 0x100000001b3;

/// 64 bit FNV-1a over the bytes of `key`.
///
/// Starts from [`FNV_OFFSET_BASIS`], and for every byte xors it into the
/// hash then multiplies by [`FNV_PRIME`] (wrapping).
///
/// # Note
///
/// The hash is unkeyed, anyone who can choose the keys can also choose
/// their slots, so it offers no protection against hash flooding.
pub fn fnv1a(key: &str) -> u64 {
    key.as_bytes().iter().fold(FNV_OFFSET_BASIS, |hash, &b| {
        (hash ^ b as u64).wrapping_mul(FNV_PRIME)
    })
}

/// Maps a hash onto a slot, `capacity` has to be a power of two
#[inline]
pub fn home_index(hash: u64, capacity: usize) -> usize {
    debug_assert!(is_valid_capacity(capacity));
    hash as usize & (capacity - 1)
}

/// Shorthand for `home_index(fnv1a(key), capacity)`
#[inline]
pub fn home_index_of(key: &str, capacity: usize) -> usize {
    home_index(fnv1a(key), capacity)
}

#[inline]
pub fn is_valid_capacity(capacity: usize) -> bool {
    capacity.is_power_of_two()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn known_vectors() {
        assert_eq!(fnv1a(""), FNV_OFFSET_BASIS);
        assert_eq!(fnv1a("a"), 0xaf63dc4c8601ec8c);
        assert_eq!(fnv1a("abc"), 0xe71fa2190541574b);
        assert_eq!(fnv1a("foobar"), 0x85944171f73967e8);
    }

    #[test]
    fn deterministic() {
        let first = fnv1a("abc");
        for _ in 0..16 {
            assert_eq!(fnv1a("abc"), first);
        }
    }

    #[test]
    fn bytes_are_unsigned() {
        // a sign extended 0xc3 would flip the upper bits before the multiply
        let expected = ((FNV_OFFSET_BASIS ^ 0xc3).wrapping_mul(FNV_PRIME) ^ 0xa9)
            .wrapping_mul(FNV_PRIME);
        assert_eq!(fnv1a("é"), expected);
    }

    #[test]
    fn index_masks_low_bits() {
        assert_eq!(home_index(0xe71fa2190541574b, 1), 0);
        assert_eq!(home_index(0xe71fa2190541574b, 16), 0xb);
        assert_eq!(home_index(0xe71fa2190541574b, 256), 0x4b);
        assert_eq!(home_index_of("abc", 256), 0x4b);
    }

    #[test]
    fn capacities() {
        assert!(!is_valid_capacity(0));
        assert!(is_valid_capacity(1));
        assert!(is_valid_capacity(2));
        assert!(!is_valid_capacity(3));
        assert!(!is_valid_capacity(12));
        assert!(is_valid_capacity(1 << 20));
    }
}
