//! NEO thin SDK - cryptographic primitives, hashing, and byte codec.
//!
//! This crate provides the foundational building blocks for the SDK:
//! - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
//! - Base58 and versioned Base58Check encoding
//! - The NEO wire codec (VarInt, little-endian reader and writer, hex helpers)
//! - Elliptic curve cryptography on P-256 (keys, WIF, signatures, recovery)

pub mod base58;
pub mod ec;
pub mod hash;
pub mod util;

mod error;
pub use error::PrimitivesError;

/// Base58Check version byte of an address.
pub const ADDRESS_VERSION: u8 = 0x17;

/// Base58Check version byte of a WIF private key.
pub const WIF_VERSION: u8 = 0x80;

/// Trailing WIF payload byte marking a compressed public key.
pub const WIF_COMPRESSED_FLAG: u8 = 0x01;

/// Length of a script hash in bytes.
pub const SCRIPT_HASH_LEN: usize = 20;
