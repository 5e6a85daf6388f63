//! Elliptic curve cryptography on NIST P-256.
//!
//! Provides private keys with WIF support, public keys with explicit
//! point compression, and fixed-width ECDSA signatures with key recovery.

pub mod curve;
pub mod private_key;
pub mod public_key;
pub mod signature;

pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use signature::Signature;
