//! ECDSA signature in the fixed 64-byte `r || s` form.
//!
//! Signing hashes the message with SHA-256 and uses a fresh random nonce
//! for every call. Public key recovery works from the signing equation
//! `Q = r^-1 (sR - eG)`.

use p256::ecdsa::signature::hazmat::{PrehashVerifier, RandomizedPrehashSigner};
use p256::ecdsa::Signature as EcdsaSignature;
use p256::elliptic_curve::group::Curve;
use p256::elliptic_curve::ops::Reduce;
use p256::elliptic_curve::{Field, PrimeField};
use p256::{FieldBytes, ProjectivePoint, Scalar, U256};
use rand::rngs::OsRng;

use crate::ec::curve::FIELD_BYTES;
use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::PublicKey;
use crate::hash::sha256;
use crate::PrimitivesError;

/// Length of a serialized signature.
pub const SIGNATURE_LEN: usize = 2 * FIELD_BYTES;

/// An ECDSA signature with R and S components.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// The R component of the signature (32 bytes, big-endian).
    r: [u8; 32],
    /// The S component of the signature (32 bytes, big-endian).
    s: [u8; 32],
}

impl Signature {
    /// Create a signature from raw R and S 32-byte arrays.
    pub fn new(r: [u8; 32], s: [u8; 32]) -> Self {
        Signature { r, s }
    }

    /// Access the R component of the signature.
    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    /// Access the S component of the signature.
    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// Parse a 64-byte `r || s` signature.
    ///
    /// # Arguments
    /// * `bytes` - Exactly 64 bytes, each half a big-endian integer.
    ///
    /// # Returns
    /// `Ok(Signature)` or `InvalidSignature` when the length is wrong.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != SIGNATURE_LEN {
            return Err(PrimitivesError::InvalidSignature(format!(
                "expected {} bytes, got {}",
                SIGNATURE_LEN,
                bytes.len()
            )));
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..FIELD_BYTES]);
        s.copy_from_slice(&bytes[FIELD_BYTES..]);
        Ok(Signature { r, s })
    }

    /// Parse a signature from a 128-character hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize as `r || s`, each half left-padded to 32 bytes.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        let mut out = [0u8; SIGNATURE_LEN];
        out[..FIELD_BYTES].copy_from_slice(&self.r);
        out[FIELD_BYTES..].copy_from_slice(&self.s);
        out
    }

    /// Serialize as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Sign a message with a private key.
    ///
    /// # Arguments
    /// * `message` - The raw message bytes, hashed with SHA-256 before signing.
    /// * `key` - The signing key.
    ///
    /// # Returns
    /// `Ok(Signature)` on success, or an error if the signer fails.
    pub fn sign(message: &[u8], key: &PrivateKey) -> Result<Self, PrimitivesError> {
        let digest = sha256(message);
        let sig: EcdsaSignature = key
            .signing_key()
            .sign_prehash_with_rng(&mut OsRng, &digest)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;
        let (r, s) = sig.split_bytes();
        let mut out_r = [0u8; 32];
        let mut out_s = [0u8; 32];
        out_r.copy_from_slice(&r);
        out_s.copy_from_slice(&s);
        Ok(Signature { r: out_r, s: out_s })
    }

    /// Verify this signature over a message.
    ///
    /// # Arguments
    /// * `message` - The raw message; it is SHA-256 hashed before verification.
    /// * `pub_key` - The expected signer.
    ///
    /// # Returns
    /// `true` if valid. A mismatched key or message, or an `r`/`s` that is
    /// zero or not below the group order, gives `false`.
    pub fn verify(&self, message: &[u8], pub_key: &PublicKey) -> bool {
        let sig = match EcdsaSignature::from_slice(&self.to_bytes()) {
            Ok(sig) => sig,
            Err(_) => return false,
        };
        let digest = sha256(message);
        pub_key
            .verifying_key()
            .verify_prehash(&digest, &sig)
            .is_ok()
    }

    /// Recover the candidate public keys that could have produced this signature.
    ///
    /// For each parity of the nonce point `R` whose `x` equals `r`, computes
    /// `Q = r^-1 (sR - eG)` with `e` the SHA-256 digest of the message
    /// reduced modulo `n`. The true signer is always among the candidates.
    ///
    /// # Arguments
    /// * `message` - The raw message that was signed.
    ///
    /// # Returns
    /// Up to two candidate keys, or `InvalidSignature` if `r` or `s` is out of range.
    pub fn recover_public_keys(&self, message: &[u8]) -> Result<Vec<PublicKey>, PrimitivesError> {
        let r = scalar_from_repr(&self.r)?;
        let s = scalar_from_repr(&self.s)?;
        let r_inv = Option::<Scalar>::from(Field::invert(&r)).ok_or_else(|| {
            PrimitivesError::InvalidSignature("r has no inverse".to_string())
        })?;
        let digest = sha256(message);
        let e = <Scalar as Reduce<U256>>::reduce(U256::from_be_slice(&digest));

        let mut candidates = Vec::with_capacity(2);
        for prefix in [0x02u8, 0x03] {
            let mut compressed = [0u8; 33];
            compressed[0] = prefix;
            compressed[1..].copy_from_slice(&self.r);
            let nonce_point = match PublicKey::from_compressed(&compressed) {
                Ok(pk) => ProjectivePoint::from(*pk.verifying_key().as_affine()),
                Err(PrimitivesError::PointNotOnCurve) => continue,
                Err(err) => return Err(err),
            };
            let q = (nonce_point * s - ProjectivePoint::GENERATOR * e) * r_inv;
            let affine = q.to_affine();
            if let Ok(vk) = p256::ecdsa::VerifyingKey::from_affine(affine) {
                candidates.push(PublicKey::from_verifying_key(&vk));
            }
        }
        Ok(candidates)
    }
}

/// Interpret 32 bytes as a non-zero scalar strictly below the group order.
fn scalar_from_repr(bytes: &[u8; 32]) -> Result<Scalar, PrimitivesError> {
    if bytes.iter().all(|b| *b == 0) {
        return Err(PrimitivesError::InvalidSignature(
            "component is zero".to_string(),
        ));
    }
    let repr = *FieldBytes::from_slice(bytes);
    Option::<Scalar>::from(Scalar::from_repr(repr)).ok_or_else(|| {
        PrimitivesError::InvalidSignature("component not below group order".to_string())
    })
}
