//! Base58 encoding and decoding with optional checksum support.
//!
//! Provides raw Base58 encode/decode and the versioned Base58Check codec
//! (double-SHA-256 checksum) used for WIF private keys and NEO addresses.

use crate::hash::sha256d;
use crate::PrimitivesError;

/// Length of the Base58Check checksum suffix.
const CHECKSUM_LEN: usize = 4;

/// Encode a byte slice to a Base58 string.
///
/// Leading zero bytes are encoded as leading '1' characters.
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data).with_alphabet(bs58::Alphabet::BITCOIN).into_string()
}

/// Decode a Base58 string to a byte vector.
///
/// # Returns
/// `Ok(Vec<u8>)` on success, or an error for invalid characters.
pub fn decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    bs58::decode(s)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|e| PrimitivesError::InvalidBase58(e.to_string()))
}

/// Encode a byte slice with a 4-byte double-SHA-256 checksum appended (Base58Check).
///
/// The result is `encode(data || sha256d(data)[..4])`.
pub fn check_encode(data: &[u8]) -> String {
    let checksum = sha256d(data);
    let mut payload = Vec::with_capacity(data.len() + CHECKSUM_LEN);
    payload.extend_from_slice(data);
    payload.extend_from_slice(&checksum[..CHECKSUM_LEN]);
    encode(&payload)
}

/// Decode a Base58Check string, verifying the 4-byte checksum.
///
/// # Returns
/// `Ok(Vec<u8>)` of the payload (without checksum) on success, or an
/// error for invalid encoding or checksum mismatch.
pub fn check_decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    let decoded = decode(s)?;
    if decoded.len() < CHECKSUM_LEN {
        return Err(PrimitivesError::InvalidBase58(
            "data too short for checksum".to_string(),
        ));
    }
    let (payload, checksum) = decoded.split_at(decoded.len() - CHECKSUM_LEN);
    let expected = sha256d(payload);
    if checksum != &expected[..CHECKSUM_LEN] {
        return Err(PrimitivesError::ChecksumMismatch);
    }
    Ok(payload.to_vec())
}

/// Base58Check-encode a payload under a one-byte version prefix.
///
/// # Arguments
/// * `version` - The version byte (0x17 for addresses, 0x80 for WIF).
/// * `payload` - The payload following the version byte.
///
/// # Returns
/// The Base58Check string of `version || payload`.
pub fn check_encode_versioned(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(1 + payload.len());
    data.push(version);
    data.extend_from_slice(payload);
    check_encode(&data)
}

/// Decode a Base58Check string into its version byte and payload.
///
/// # Returns
/// `Ok((version, payload))`, or an error if the alphabet or checksum is
/// invalid or the decoded data has no version byte.
pub fn check_decode_versioned(s: &str) -> Result<(u8, Vec<u8>), PrimitivesError> {
    let data = check_decode(s)?;
    match data.split_first() {
        Some((version, payload)) => Ok((*version, payload.to_vec())),
        None => Err(PrimitivesError::InvalidBase58(
            "missing version byte".to_string(),
        )),
    }
}
