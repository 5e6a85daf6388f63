//! NIST P-256 domain parameters and compressed-point arithmetic.
//!
//! Point decompression is carried out with `num-bigint` directly on the
//! curve equation `y^2 = x^3 - 3x + b (mod p)`. Because `p = 3 (mod 4)`
//! the square root is a single exponentiation by `(p + 1) / 4`.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::PrimitivesError;

/// Byte width of a field element and of a scalar.
pub const FIELD_BYTES: usize = 32;

/// Length of a compressed SEC1 point.
pub const COMPRESSED_LEN: usize = 33;

/// Length of an uncompressed SEC1 point.
pub const UNCOMPRESSED_LEN: usize = 65;

/// The field prime `p`.
pub const CURVE_P: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff,
];

/// The curve coefficient `b`.
pub const CURVE_B: [u8; 32] = [
    0x5a, 0xc6, 0x35, 0xd8, 0xaa, 0x3a, 0x93, 0xe7, 0xb3, 0xeb, 0xbd, 0x55, 0x76, 0x98, 0x86,
    0xbc, 0x65, 0x1d, 0x06, 0xb0, 0xcc, 0x53, 0xb0, 0xf6, 0x3b, 0xce, 0x3c, 0x3e, 0x27, 0xd2,
    0x60, 0x4b,
];

/// The group order `n`.
pub const CURVE_N: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xbc, 0xe6, 0xfa, 0xad, 0xa7, 0x17, 0x9e, 0x84, 0xf3, 0xb9, 0xca, 0xc2, 0xfc, 0x63,
    0x25, 0x51,
];

/// Left-pad a big integer to a fixed 32-byte big-endian array.
///
/// Values wider than 32 bytes keep their low-order 32 bytes.
pub fn to_fixed_bytes(value: &BigUint) -> [u8; FIELD_BYTES] {
    let raw = value.to_bytes_be();
    let mut out = [0u8; FIELD_BYTES];
    if raw.len() >= FIELD_BYTES {
        out.copy_from_slice(&raw[raw.len() - FIELD_BYTES..]);
    } else {
        out[FIELD_BYTES - raw.len()..].copy_from_slice(&raw);
    }
    out
}

/// Evaluate the right-hand side of the curve equation, `x^3 - 3x + b mod p`.
fn curve_rhs(x: &BigUint, p: &BigUint) -> BigUint {
    let b = BigUint::from_bytes_be(&CURVE_B);
    let x3 = x.modpow(&BigUint::from(3u32), p);
    let three_x = (x * 3u32) % p;
    // add p before subtracting so the intermediate stays non-negative
    ((x3 + p - three_x) + b) % p
}

/// Check whether an affine point satisfies the curve equation.
pub fn is_on_curve(x: &[u8; FIELD_BYTES], y: &[u8; FIELD_BYTES]) -> bool {
    let p = BigUint::from_bytes_be(&CURVE_P);
    let x = BigUint::from_bytes_be(x);
    let y = BigUint::from_bytes_be(y);
    if x >= p || y >= p {
        return false;
    }
    (&y * &y) % &p == curve_rhs(&x, &p)
}

/// Recover the affine coordinates of a compressed point.
///
/// # Arguments
/// * `compressed` - 33 bytes: parity selector (0x02 even, 0x03 odd) then `x`.
///
/// # Returns
/// `Ok((x, y))` as fixed 32-byte big-endian arrays. Fails with
/// `InvalidKeyLength` for a wrong length, `InvalidPublicKey` for a bad
/// parity byte or `x >= p`, and `PointNotOnCurve` when `x` has no square
/// root on the curve.
pub fn decompress_point(
    compressed: &[u8],
) -> Result<([u8; FIELD_BYTES], [u8; FIELD_BYTES]), PrimitivesError> {
    if compressed.len() != COMPRESSED_LEN {
        return Err(PrimitivesError::InvalidKeyLength {
            expected: COMPRESSED_LEN,
            got: compressed.len(),
        });
    }
    let want_odd = match compressed[0] {
        0x02 => false,
        0x03 => true,
        other => {
            return Err(PrimitivesError::InvalidPublicKey(format!(
                "invalid compressed point prefix 0x{:02x}",
                other
            )))
        }
    };

    let p = BigUint::from_bytes_be(&CURVE_P);
    let x = BigUint::from_bytes_be(&compressed[1..]);
    if x >= p {
        return Err(PrimitivesError::InvalidPublicKey(
            "x coordinate is not a field element".to_string(),
        ));
    }

    let rhs = curve_rhs(&x, &p);
    let exp = (&p + BigUint::one()) >> 2;
    let mut y = rhs.modpow(&exp, &p);
    if (&y * &y) % &p != rhs {
        return Err(PrimitivesError::PointNotOnCurve);
    }

    let is_odd = y.bit(0);
    if is_odd != want_odd && !y.is_zero() {
        y = &p - &y;
    }

    Ok((to_fixed_bytes(&x), to_fixed_bytes(&y)))
}

/// Compress an affine point into its 33-byte form.
///
/// # Arguments
/// * `x` - The x coordinate, 32 bytes big-endian.
/// * `y` - The y coordinate, 32 bytes big-endian.
///
/// # Returns
/// The parity byte (0x02 for even `y`, 0x03 for odd) followed by `x`.
pub fn compress_point(x: &[u8; FIELD_BYTES], y: &[u8; FIELD_BYTES]) -> [u8; COMPRESSED_LEN] {
    let mut out = [0u8; COMPRESSED_LEN];
    out[0] = if y[FIELD_BYTES - 1] & 1 == 1 { 0x03 } else { 0x02 };
    out[1..].copy_from_slice(x);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const GX: &str = "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296";
    const GY: &str = "4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5";

    fn arr(hex_str: &str) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&hex::decode(hex_str).unwrap());
        out
    }

    #[test]
    fn test_generator_is_on_curve() {
        assert!(is_on_curve(&arr(GX), &arr(GY)));
    }

    #[test]
    fn test_decompress_generator() {
        let compressed = compress_point(&arr(GX), &arr(GY));
        // Gy ends in 0xf5, odd
        assert_eq!(compressed[0], 0x03);
        let (x, y) = decompress_point(&compressed).unwrap();
        assert_eq!(x, arr(GX));
        assert_eq!(y, arr(GY));
    }

    #[test]
    fn test_decompress_picks_requested_parity() {
        let mut compressed = compress_point(&arr(GX), &arr(GY));
        compressed[0] = 0x02;
        let (_, y) = decompress_point(&compressed).unwrap();
        let p = BigUint::from_bytes_be(&CURVE_P);
        let expected = &p - BigUint::from_bytes_be(&arr(GY));
        assert_eq!(y, to_fixed_bytes(&expected));
        assert_eq!(y[31] & 1, 0);
    }

    #[test]
    fn test_decompress_rejects_bad_input() {
        assert!(matches!(
            decompress_point(&[0x02; 32]),
            Err(PrimitivesError::InvalidKeyLength { expected: 33, got: 32 })
        ));

        let mut bad_prefix = compress_point(&arr(GX), &arr(GY));
        bad_prefix[0] = 0x04;
        assert!(matches!(
            decompress_point(&bad_prefix),
            Err(PrimitivesError::InvalidPublicKey(_))
        ));

        let mut too_big = [0xffu8; 33];
        too_big[0] = 0x02;
        assert!(decompress_point(&too_big).is_err());
    }

    #[test]
    fn test_some_x_values_are_not_on_curve() {
        let mut rejected = 0;
        for i in 1u8..=32 {
            let mut compressed = [0u8; 33];
            compressed[0] = 0x02;
            compressed[32] = i;
            match decompress_point(&compressed) {
                Ok((x, y)) => assert!(is_on_curve(&x, &y)),
                Err(PrimitivesError::PointNotOnCurve) => rejected += 1,
                Err(e) => panic!("unexpected error {:?}", e),
            }
        }
        assert!(rejected > 0);
    }

    #[test]
    fn test_to_fixed_bytes_pads_small_values() {
        let small = BigUint::from(0x0102u32);
        let fixed = to_fixed_bytes(&small);
        assert_eq!(&fixed[..30], &[0u8; 30]);
        assert_eq!(&fixed[30..], &[0x01, 0x02]);
    }
}
