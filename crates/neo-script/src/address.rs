//! NEO address handling.
//!
//! An address is the Base58Check encoding, under version byte 0x17, of the
//! 20-byte script hash of a verification script. The same pipeline is used
//! to identify a signer and to turn a recipient address into the hash a
//! transaction output carries.

use std::fmt;

use neo_primitives::base58;
use neo_primitives::ec::PublicKey;
use neo_primitives::{PrimitivesError, ADDRESS_VERSION, SCRIPT_HASH_LEN};

use crate::script::Script;
use crate::ScriptError;

/// A NEO address.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    /// The human-readable Base58Check address string.
    pub address_string: String,
    /// The 20-byte script hash the address encodes.
    pub script_hash: [u8; SCRIPT_HASH_LEN],
}

impl Address {
    /// Parse a Base58Check-encoded address string.
    ///
    /// # Arguments
    /// * `addr` - The address string.
    ///
    /// # Returns
    /// An `Address`, or an error if the alphabet, checksum, version byte or
    /// payload length is wrong.
    pub fn from_string(addr: &str) -> Result<Self, ScriptError> {
        let (version, payload) = base58::check_decode_versioned(addr).map_err(|e| match e {
            PrimitivesError::ChecksumMismatch => ScriptError::ChecksumFailed,
            other => ScriptError::InvalidAddress(format!("'{}': {}", addr, other)),
        })?;

        if version != ADDRESS_VERSION {
            return Err(ScriptError::UnsupportedAddressVersion(version));
        }
        if payload.len() != SCRIPT_HASH_LEN {
            return Err(ScriptError::InvalidAddressLength(addr.to_string()));
        }

        let mut script_hash = [0u8; SCRIPT_HASH_LEN];
        script_hash.copy_from_slice(&payload);
        Ok(Address {
            address_string: addr.to_string(),
            script_hash,
        })
    }

    /// Create an address from a 20-byte script hash.
    pub fn from_script_hash(hash: &[u8; SCRIPT_HASH_LEN]) -> Self {
        Address {
            address_string: base58::check_encode_versioned(ADDRESS_VERSION, hash),
            script_hash: *hash,
        }
    }

    /// Create the address of an arbitrary verification script.
    pub fn from_script(script: &Script) -> Self {
        Self::from_script_hash(&script.script_hash())
    }

    /// Create the address of a public key's single-signature verification script.
    ///
    /// # Arguments
    /// * `pub_key` - The account's public key.
    ///
    /// # Returns
    /// The account address.
    pub fn from_public_key(pub_key: &PublicKey) -> Self {
        Self::from_script(&Script::from_public_key(pub_key))
    }
}

impl fmt::Display for Address {
    /// Display the address as its Base58Check string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address_string)
    }
}

impl std::str::FromStr for Address {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::from_string(s)
    }
}

/// Decode an address string into its 20-byte script hash.
pub fn address_to_script_hash(addr: &str) -> Result<[u8; SCRIPT_HASH_LEN], ScriptError> {
    Ok(Address::from_string(addr)?.script_hash)
}

/// Encode a 20-byte script hash as an address string.
pub fn script_hash_to_address(hash: &[u8; SCRIPT_HASH_LEN]) -> String {
    Address::from_script_hash(hash).address_string
}
