/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The type byte is not a transaction kind this SDK can build or decode.
    #[error("unsupported transaction type 0x{0:02x}")]
    UnsupportedType(u8),
    /// An attribute usage is unknown or its data does not fit the usage.
    #[error("invalid attribute: {0}")]
    InvalidAttribute(String),
    /// An error occurred during binary/hex serialization or deserialization.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// The signature does not verify over the unsigned payload.
    #[error("signature does not verify against the transaction")]
    InvalidSignature,
    /// The signer's key does not derive the expected address.
    #[error("address mismatch: expected {expected}, key derives {actual}")]
    AddressMismatch { expected: String, actual: String },
    /// The supplied UTXOs cannot cover the requested amount.
    #[error("insufficient funds: available {available}, required {required}")]
    InsufficientFunds { available: u64, required: u64 },
    /// No UTXO value was supplied.
    #[error("no funds supplied")]
    NoFunds,
    /// The UTXO values overflow a 64-bit amount.
    #[error("utxo amounts overflow")]
    AmountOverflow,
    /// An underlying script error (forwarded from `neo-script`).
    #[error("script error: {0}")]
    Script(#[from] neo_script::ScriptError),
    /// An underlying primitives error (forwarded from `neo-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] neo_primitives::PrimitivesError),
}
