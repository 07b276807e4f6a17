//! The keyed hash used by the login exchange.
//!
//! Both sides derive a 16-bit value from the robot's name and a shared key:
//! the server proves knowledge of [`SERVER_KEY`] by sending its hash first,
//! and the robot answers with the [`CLIENT_KEY`] hash, which the server
//! verifies. All arithmetic is unsigned 16-bit with natural wraparound.

/// Key mixed into the hash the server sends.
pub const SERVER_KEY: u16 = 54621;

/// Key mixed into the hash the robot must answer with.
pub const CLIENT_KEY: u16 = 45328;

/// Compute `(Σ bytes(name) · 1000 + key) mod 2^16`.
///
/// The sum is over the raw bytes of the name, so the result depends only on
/// the byte string, not on any character encoding.
#[must_use]
pub fn keyed_hash(key: u16, name: &[u8]) -> u16 {
    let sum = name
        .iter()
        .fold(0u16, |acc, &byte| acc.wrapping_add(u16::from(byte)));
    sum.wrapping_mul(1000).wrapping_add(key)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn empty_name_hashes_to_key() {
        assert_eq!(keyed_hash(SERVER_KEY, b""), SERVER_KEY);
        assert_eq!(keyed_hash(CLIENT_KEY, b""), CLIENT_KEY);
    }

    #[test]
    fn single_byte_name() {
        // 65 * 1000 + 54621 = 119621 ≡ 54085 (mod 65536)
        assert_eq!(keyed_hash(SERVER_KEY, b"A"), 54085);
        // 65 * 1000 + 45328 = 110328 ≡ 44792 (mod 65536)
        assert_eq!(keyed_hash(CLIENT_KEY, b"A"), 44792);
    }

    #[test]
    fn high_bytes_are_unsigned() {
        // 0xFF sums as 255, never sign-extended.
        assert_eq!(
            keyed_hash(0, &[0xFF]),
            ((255u32 * 1000) % 65536) as u16,
        );
    }

    proptest! {
        #[test]
        fn matches_wide_arithmetic(key in any::<u16>(), name in proptest::collection::vec(any::<u8>(), 0..64)) {
            let wide_sum: u64 = name.iter().map(|&b| u64::from(b)).sum();
            let expected = ((wide_sum * 1000 + u64::from(key)) % 65536) as u16;
            prop_assert_eq!(keyed_hash(key, &name), expected);
        }

        #[test]
        fn server_and_client_hashes_differ_by_key_delta(name in proptest::collection::vec(any::<u8>(), 0..32)) {
            let delta = keyed_hash(SERVER_KEY, &name).wrapping_sub(keyed_hash(CLIENT_KEY, &name));
            prop_assert_eq!(delta, SERVER_KEY.wrapping_sub(CLIENT_KEY));
        }
    }
}
