//! P-256 private key with WIF support.
//!
//! Wraps the p256 signing key. The public point is always recomputed from
//! the scalar, so a decoded key can never be paired with a foreign point.

use p256::ecdsa::SigningKey;
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::base58;
use crate::ec::public_key::PublicKey;
use crate::ec::signature::Signature;
use crate::{PrimitivesError, WIF_COMPRESSED_FLAG, WIF_VERSION};

/// Length of a serialized private key in bytes.
const PRIVATE_KEY_BYTES_LEN: usize = 32;

/// A P-256 private key used to sign transactions.
#[derive(Clone)]
pub struct PrivateKey {
    /// The underlying p256 signing key.
    inner: SigningKey,
}

impl PrivateKey {
    /// Generate a new random private key using the OS random number generator.
    ///
    /// The scalar is uniform in `[1, n-1]`.
    ///
    /// # Returns
    /// A new randomly generated `PrivateKey`.
    pub fn new() -> Self {
        PrivateKey {
            inner: SigningKey::random(&mut OsRng),
        }
    }

    /// Create a private key from a raw 32-byte scalar.
    ///
    /// # Arguments
    /// * `bytes` - A 32-byte big-endian scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` if the scalar is in `[1, n-1]`, `InvalidKeyLength`
    /// if the input is not 32 bytes, or `InvalidPrivateKey` otherwise.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PRIVATE_KEY_BYTES_LEN {
            return Err(PrimitivesError::InvalidKeyLength {
                expected: PRIVATE_KEY_BYTES_LEN,
                got: bytes.len(),
            });
        }
        let signing_key = SigningKey::from_slice(bytes)
            .map_err(|e| PrimitivesError::InvalidPrivateKey(e.to_string()))?;
        Ok(PrivateKey { inner: signing_key })
    }

    /// Create a private key from a hexadecimal string.
    ///
    /// # Arguments
    /// * `hex_str` - A 64-character hex string representing the 32-byte scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` on success, or an error if the hex or the scalar is invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.is_empty() {
            return Err(PrimitivesError::InvalidPrivateKey(
                "private key hex is empty".to_string(),
            ));
        }
        let bytes = Zeroizing::new(hex::decode(hex_str)?);
        Self::from_bytes(&bytes)
    }

    /// Create a private key from a WIF (Wallet Import Format) string.
    ///
    /// The payload after the 0x80 version byte is either the bare 32-byte
    /// scalar or the scalar followed by the 0x01 compression flag.
    ///
    /// # Arguments
    /// * `wif` - A Base58Check-encoded WIF string.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` on success. Fails with `InvalidWifVersion` for a
    /// foreign version byte, `UnknownWifSuffix` when a 33-byte payload does
    /// not end in 0x01, and `InvalidWif` for any other payload length.
    pub fn from_wif(wif: &str) -> Result<Self, PrimitivesError> {
        let (version, payload) = base58::check_decode_versioned(wif)?;
        let payload = Zeroizing::new(payload);
        if version != WIF_VERSION {
            return Err(PrimitivesError::InvalidWifVersion(version));
        }
        match payload.len() {
            PRIVATE_KEY_BYTES_LEN => Self::from_bytes(&payload),
            33 => {
                let suffix = payload[PRIVATE_KEY_BYTES_LEN];
                if suffix != WIF_COMPRESSED_FLAG {
                    return Err(PrimitivesError::UnknownWifSuffix(suffix));
                }
                Self::from_bytes(&payload[..PRIVATE_KEY_BYTES_LEN])
            }
            n => Err(PrimitivesError::InvalidWif(format!(
                "malformed private key: invalid payload length {}",
                n
            ))),
        }
    }

    /// Encode the private key as a WIF string.
    ///
    /// Always marks the key as compressed.
    ///
    /// # Returns
    /// A Base58Check-encoded WIF string.
    pub fn to_wif(&self) -> String {
        let mut payload = Zeroizing::new(Vec::with_capacity(PRIVATE_KEY_BYTES_LEN + 1));
        payload.extend_from_slice(&self.to_bytes());
        payload.push(WIF_COMPRESSED_FLAG);
        base58::check_encode_versioned(WIF_VERSION, &payload)
    }

    /// Serialize the private key as a 32-byte big-endian array.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.inner.to_bytes());
        out
    }

    /// Serialize the private key as a lowercase hexadecimal string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Derive the public key for this private key.
    pub fn pub_key(&self) -> PublicKey {
        PublicKey::from_verifying_key(self.inner.verifying_key())
    }

    /// Sign a message.
    ///
    /// The message is SHA-256 hashed before signing and every call draws a
    /// fresh random nonce.
    ///
    /// # Arguments
    /// * `message` - The raw message bytes, typically an unsigned transaction.
    ///
    /// # Returns
    /// `Ok(Signature)` on success, or an error if signing fails.
    pub fn sign(&self, message: &[u8]) -> Result<Signature, PrimitivesError> {
        Signature::sign(message, self)
    }

    /// Access the underlying p256 `SigningKey`.
    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.inner
    }
}

impl Default for PrivateKey {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PrivateKey {}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("pub_key", &self.pub_key().to_hex())
            .finish()
    }
}
