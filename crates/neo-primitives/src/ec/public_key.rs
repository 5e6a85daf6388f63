//! P-256 public key.
//!
//! Compressed keys are decoded with the explicit modular square root in
//! [`crate::ec::curve`]; uncompressed keys go straight to the p256 parser.

use p256::ecdsa::VerifyingKey;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use std::fmt;

use crate::ec::curve::{
    compress_point, decompress_point, COMPRESSED_LEN, FIELD_BYTES, UNCOMPRESSED_LEN,
};
use crate::ec::signature::Signature;
use crate::hash::hash160;
use crate::PrimitivesError;

/// A P-256 public key.
#[derive(Clone, Copy, Debug)]
pub struct PublicKey {
    /// The underlying p256 verifying key.
    inner: VerifyingKey,
}

impl PublicKey {
    /// Create a PublicKey from SEC1 encoded bytes.
    ///
    /// Accepts both compressed (33-byte) and uncompressed (65-byte) formats.
    ///
    /// # Arguments
    /// * `bytes` - SEC1-encoded public key bytes.
    ///
    /// # Returns
    /// `Ok(PublicKey)` on success, or an error if the bytes don't represent a valid point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        match bytes.len() {
            0 => Err(PrimitivesError::InvalidPublicKey(
                "pubkey bytes are empty".to_string(),
            )),
            COMPRESSED_LEN => Self::from_compressed(bytes),
            UNCOMPRESSED_LEN if bytes[0] == 0x04 => Self::from_sec1(bytes),
            UNCOMPRESSED_LEN => Err(PrimitivesError::InvalidPublicKey(format!(
                "invalid uncompressed point prefix 0x{:02x}",
                bytes[0]
            ))),
            n => Err(PrimitivesError::InvalidKeyLength {
                expected: COMPRESSED_LEN,
                got: n,
            }),
        }
    }

    /// Decode a 33-byte compressed public key.
    ///
    /// # Arguments
    /// * `bytes` - Parity byte (0x02/0x03) followed by the 32-byte `x` coordinate.
    ///
    /// # Returns
    /// `Ok(PublicKey)` on success, `PointNotOnCurve` if `x` has no matching
    /// `y`, or a length/prefix error.
    pub fn from_compressed(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let (x, y) = decompress_point(bytes)?;
        let mut sec1 = [0u8; UNCOMPRESSED_LEN];
        sec1[0] = 0x04;
        sec1[1..1 + FIELD_BYTES].copy_from_slice(&x);
        sec1[1 + FIELD_BYTES..].copy_from_slice(&y);
        Self::from_sec1(&sec1)
    }

    /// Create a PublicKey from a hex-encoded SEC1 string.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string of a compressed (66 chars) or uncompressed (130 chars) key.
    ///
    /// # Returns
    /// `Ok(PublicKey)` on success, or an error if the hex or point is invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize the public key in compressed form (33 bytes).
    ///
    /// The first byte is 0x02 (even Y) or 0x03 (odd Y), followed by the
    /// 32-byte big-endian X coordinate, zero-padded on the left.
    pub fn to_compressed(&self) -> [u8; COMPRESSED_LEN] {
        compress_point(&self.x(), &self.y())
    }

    /// Serialize the public key in uncompressed SEC1 format (65 bytes).
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(false);
        let mut out = [0u8; UNCOMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// The affine X coordinate as a fixed 32-byte big-endian array.
    pub fn x(&self) -> [u8; FIELD_BYTES] {
        let uncompressed = self.to_uncompressed();
        let mut out = [0u8; FIELD_BYTES];
        out.copy_from_slice(&uncompressed[1..1 + FIELD_BYTES]);
        out
    }

    /// The affine Y coordinate as a fixed 32-byte big-endian array.
    pub fn y(&self) -> [u8; FIELD_BYTES] {
        let uncompressed = self.to_uncompressed();
        let mut out = [0u8; FIELD_BYTES];
        out.copy_from_slice(&uncompressed[1 + FIELD_BYTES..]);
        out
    }

    /// Serialize the public key as a lowercase hex string (compressed format).
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_compressed())
    }

    /// Compute the Hash160 of the compressed public key.
    ///
    /// This is not the script hash; addresses hash the verification
    /// script that wraps the key.
    pub fn hash160(&self) -> [u8; 20] {
        hash160(&self.to_compressed())
    }

    /// Verify a signature over a message using this public key.
    ///
    /// # Arguments
    /// * `message` - The raw message; it is SHA-256 hashed before verification.
    /// * `sig` - The signature to check.
    ///
    /// # Returns
    /// `true` if the signature is valid for this message and key, `false` otherwise.
    pub fn verify(&self, message: &[u8], sig: &Signature) -> bool {
        sig.verify(message, self)
    }

    fn from_sec1(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let vk = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|e| PrimitivesError::InvalidPublicKey(e.to_string()))?;
        Ok(PublicKey { inner: vk })
    }

    pub(crate) fn from_verifying_key(vk: &VerifyingKey) -> Self {
        PublicKey { inner: *vk }
    }

    pub(crate) fn verifying_key(&self) -> &VerifyingKey {
        &self.inner
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_compressed() == other.to_compressed()
    }
}

impl Eq for PublicKey {}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
