//! This module contains the pure, stateless hash-bucket kernel: canonical
//! byte encodings per logical type, the 32-bit Murmur3 hash over them, and
//! the mask-then-modulo bucket index.
//!
//! The hash function, its seed and the encodings are fixed by the public
//! table-format specification (Appendix B of the reference spec) and are
//! pinned below against its published vectors. Two representations of the
//! same logical value — a timestamp stored in any unit or offset, a decimal
//! at any display scale — must collide, which is why every encoding first
//! normalizes to a canonical form. This module is PURE RUST and panic-free.

use mur3::murmurhash3_x86_32;

//==================================================================================
// 1. Constants
//==================================================================================

/// The hash seed is fixed by the external specification; it is deliberately
/// a compile-time constant rather than anything configurable.
const BUCKET_HASH_SEED: u32 = 0;

//==================================================================================
// 2. Canonical Hashing
//==================================================================================

/// Hashes a canonical byte encoding with Murmur3 (x86, 32-bit), seed 0.
///
/// The result is interpreted as a signed 32-bit quantity: the published
/// vectors are negative for roughly half of all inputs.
pub fn hash_bytes(bytes: &[u8]) -> i32 {
    murmurhash3_x86_32(bytes, BUCKET_HASH_SEED) as i32
}

/// Hashes a 64-bit integer via its little-endian 8-byte encoding.
///
/// Narrower integers, day counts and normalized microsecond instants all
/// widen to `i64` first, so equal logical values hash identically across
/// widths.
pub fn hash_long(value: i64) -> i32 {
    hash_bytes(&value.to_le_bytes())
}

/// Hashes a decimal via the minimal-length big-endian two's-complement
/// encoding of its unscaled value. Scale never participates: `14.20` at
/// scale 2 and `1.420` at scale 3 are different logical values, but `14.20`
/// hashes the same regardless of how many trailing zeros its column type
/// carries.
pub fn hash_decimal_unscaled(unscaled: i128) -> i32 {
    hash_bytes(&minimal_twos_complement_be(unscaled))
}

/// Encodes an `i128` as the shortest big-endian two's-complement byte string
/// that still round-trips, i.e. with redundant sign-extension bytes removed
/// but the sign bit of the first retained byte intact.
pub(crate) fn minimal_twos_complement_be(value: i128) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let mut start = 0;
    while start < bytes.len() - 1 {
        let redundant_zero = bytes[start] == 0x00 && bytes[start + 1] & 0x80 == 0;
        let redundant_ones = bytes[start] == 0xFF && bytes[start + 1] & 0x80 != 0;
        if redundant_zero || redundant_ones {
            start += 1;
        } else {
            break;
        }
    }
    bytes[start..].to_vec()
}

//==================================================================================
// 3. Bucket Index
//==================================================================================

/// Maps a hash to a bucket index in `[0, n)`.
///
/// The hash is masked into the non-negative 31-bit space BEFORE the modulo,
/// so a negative hash still produces an in-range index. Callers validate
/// `n >= 1`.
pub fn bucket_index(hash: i32, n: u32) -> i32 {
    (((hash as u32) & 0x7FFF_FFFF) % n) as i32
}

//==================================================================================
// 4. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Published 32-bit hash vectors of the reference table-format
    /// specification. These pins are the whole point of the kernel: a writer
    /// that diverges here scatters rows into the wrong partitions for every
    /// conforming reader.
    #[test]
    fn test_published_integer_vectors() {
        assert_eq!(hash_long(34), 2017239379); // int and long 34
    }

    #[test]
    fn test_published_decimal_vector() {
        assert_eq!(hash_decimal_unscaled(1420), -500754589); // 14.20
    }

    #[test]
    fn test_published_date_vector() {
        assert_eq!(hash_long(17486), -653330422); // 2017-11-16 as day count
    }

    #[test]
    fn test_published_time_vector() {
        assert_eq!(hash_long(81_068_000_000), -662762989); // 22:31:08 in us
    }

    #[test]
    fn test_published_timestamp_vectors() {
        // 2017-11-16T22:31:08 and ...08.000001, as microsecond instants.
        assert_eq!(hash_long(1_510_871_468_000_000), -2047944441);
        assert_eq!(hash_long(1_510_871_468_000_001), -1207196810);
    }

    #[test]
    fn test_published_string_and_binary_vectors() {
        assert_eq!(hash_bytes("iceberg".as_bytes()), 1210000089);
        assert_eq!(hash_bytes(&[0x00, 0x01, 0x02, 0x03]), -188683207);
    }

    #[test]
    fn test_minimal_twos_complement_be() {
        assert_eq!(minimal_twos_complement_be(0), vec![0x00]);
        assert_eq!(minimal_twos_complement_be(1), vec![0x01]);
        assert_eq!(minimal_twos_complement_be(-1), vec![0xFF]);
        assert_eq!(minimal_twos_complement_be(127), vec![0x7F]);
        // 128 needs a leading zero byte to keep the sign bit clear.
        assert_eq!(minimal_twos_complement_be(128), vec![0x00, 0x80]);
        assert_eq!(minimal_twos_complement_be(-128), vec![0x80]);
        assert_eq!(minimal_twos_complement_be(-129), vec![0xFF, 0x7F]);
        assert_eq!(minimal_twos_complement_be(1420), vec![0x05, 0x8C]);
        assert_eq!(
            minimal_twos_complement_be(i128::MIN),
            {
                let mut expected = vec![0x80];
                expected.extend_from_slice(&[0x00; 15]);
                expected
            }
        );
    }

    #[test]
    fn test_bucket_index_masks_before_modulo() {
        // A negative hash must still land in [0, n).
        assert_eq!(bucket_index(-1, 16), (0x7FFF_FFFF % 16) as i32);
        assert_eq!(bucket_index(i32::MIN, 7), 0); // MIN & 0x7FFFFFFF == 0
        for hash in [i32::MIN, -500754589, -1, 0, 1, i32::MAX] {
            for n in [1u32, 4, 9, 1000] {
                let b = bucket_index(hash, n);
                assert!(b >= 0 && (b as u32) < n);
            }
        }
    }

    #[test]
    fn test_single_bucket_collapses_everything() {
        for hash in [i32::MIN, -1, 0, 42, i32::MAX] {
            assert_eq!(bucket_index(hash, 1), 0);
        }
    }
}
