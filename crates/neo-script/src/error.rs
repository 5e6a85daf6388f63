/// Error types for script operations.
///
/// Covers address decoding, hex decoding and the typed-string parameter
/// encoding. Programmer errors in the builder (bad script-hash length,
/// bad syscall name, non-jump opcode) panic instead of returning here.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Invalid address string.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Decoded address payload is not a 20-byte script hash.
    #[error("invalid address length for '{0}'")]
    InvalidAddressLength(String),

    /// Address version byte is not 0x17.
    #[error("unsupported address version 0x{0:02x}")]
    UnsupportedAddressVersion(u8),

    /// Base58Check checksum does not match.
    #[error("checksum failed")]
    ChecksumFailed,

    /// A typed-string parameter could not be decoded.
    #[error("invalid parameter '{0}'")]
    InvalidParam(String),

    /// A typed-string parameter carries a tag outside the known set.
    #[error("unknown parameter tag '{0}'")]
    UnknownParamTag(String),

    /// A fixed-width typed-string parameter decoded to the wrong length.
    #[error("parameter '{tag}' must be {expected} bytes, got {got}")]
    InvalidParamLength {
        tag: String,
        expected: usize,
        got: usize,
    },

    /// A structured value has no parameter encoding (null, float, bare string).
    #[error("unsupported parameter value: {0}")]
    UnsupportedParamValue(String),

    /// Invalid hex string.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Error from primitives crate.
    #[error("primitives error: {0}")]
    Primitives(#[from] neo_primitives::PrimitivesError),
}

impl From<hex::FromHexError> for ScriptError {
    fn from(e: hex::FromHexError) -> Self {
        ScriptError::InvalidHex(e.to_string())
    }
}
