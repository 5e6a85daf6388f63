/// Unified error type for all primitives operations.
///
/// Covers errors from hashing, EC key handling, Base58Check and the byte codec.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("invalid WIF format: {0}")]
    InvalidWif(String),

    #[error("invalid WIF version 0x{0:02x}, expected 0x80")]
    InvalidWifVersion(u8),

    #[error("invalid private key, unknown suffix byte 0x{0:02x}")]
    UnknownWifSuffix(u8),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("point not on curve")]
    PointNotOnCurve,

    #[error("invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    #[error("length {value} exceeds maximum {max}")]
    LengthExceeded { value: u64, max: u64 },

    #[error("unexpected end of data")]
    UnexpectedEof,
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}
