//! NEO VM script - an opaque byte sequence with helpers for the standard
//! single-signature verification script.

use std::fmt;

use neo_primitives::ec::PublicKey;
use neo_primitives::hash::hash160;
use neo_primitives::SCRIPT_HASH_LEN;

use crate::opcodes::OP_CHECKSIG;
use crate::ScriptError;

/// Length of a standard single-signature verification script:
/// one push byte, a 33-byte compressed key and CHECKSIG.
pub const SINGLE_SIG_SCRIPT_LEN: usize = 35;

/// A VM script, represented as a byte vector newtype.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Script(Vec<u8>);

impl Script {
    /// Create a new empty script.
    pub fn new() -> Self {
        Script(Vec::new())
    }

    /// Create a script from a hex-encoded string.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string such as "21<pubkey>ac".
    ///
    /// # Returns
    /// A `Script` wrapping the decoded bytes, or an error if the hex is invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        Ok(Script(hex::decode(hex_str)?))
    }

    /// Create a script from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Script(bytes.to_vec())
    }

    /// Build the standard single-signature verification script for a key.
    ///
    /// Layout: `[0x21][33-byte compressed key][CHECKSIG]`.
    ///
    /// # Arguments
    /// * `pub_key` - The signer's public key.
    ///
    /// # Returns
    /// A 35-byte `Script`.
    pub fn from_public_key(pub_key: &PublicKey) -> Self {
        let compressed = pub_key.to_compressed();
        let mut bytes = Vec::with_capacity(SINGLE_SIG_SCRIPT_LEN);
        bytes.push(compressed.len() as u8);
        bytes.extend_from_slice(&compressed);
        bytes.push(OP_CHECKSIG);
        Script(bytes)
    }

    /// Encode the script as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Return a reference to the underlying bytes.
    pub fn to_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the script and return its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Return the length of the script in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the script is empty (zero bytes).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compute the script hash, RIPEMD-160(SHA-256(script)).
    pub fn script_hash(&self) -> [u8; SCRIPT_HASH_LEN] {
        hash160(&self.0)
    }

    /// Check whether this is a plain single-signature verification script.
    ///
    /// True only if the script is 35 bytes long, its first byte equals
    /// `len - 2` and its last byte is CHECKSIG.
    pub fn is_standard_single_sig(&self) -> bool {
        let b = &self.0;
        b.len() == SINGLE_SIG_SCRIPT_LEN
            && b[0] as usize == b.len() - 2
            && b[b.len() - 1] == OP_CHECKSIG
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<u8>> for Script {
    fn from(bytes: Vec<u8>) -> Self {
        Script(bytes)
    }
}

impl AsRef<[u8]> for Script {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Script {
    /// Display the script as a lowercase hex string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", self.to_hex())
    }
}

impl serde::Serialize for Script {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Script {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Script::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
