//! Transaction input referencing a previous output.

use neo_primitives::util::{ByteReader, ByteWriter};

use crate::TransactionError;

/// A reference to a spendable output of an earlier transaction.
///
/// # Wire format
///
/// | Field      | Size          |
/// |------------|---------------|
/// | prev_hash  | 32 bytes      |
/// | prev_index | 2 bytes (LE)  |
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransactionInput {
    /// Hash of the transaction holding the output, in wire byte order.
    pub prev_hash: [u8; 32],

    /// Index of the output within that transaction.
    pub prev_index: u16,
}

impl TransactionInput {
    /// Create an input from a previous transaction hash and output index.
    pub fn new(prev_hash: [u8; 32], prev_index: u16) -> Self {
        TransactionInput {
            prev_hash,
            prev_index,
        }
    }

    /// Deserialize a `TransactionInput` from a `ByteReader`.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of an encoded input.
    ///
    /// # Returns
    /// `Ok(TransactionInput)` on success, or a `TransactionError` if the
    /// data is truncated.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let prev_hash = reader.read_array::<32>().map_err(|e| {
            TransactionError::Serialization(format!("reading input hash: {}", e))
        })?;
        let prev_index = reader.read_u16_le().map_err(|e| {
            TransactionError::Serialization(format!("reading input index: {}", e))
        })?;
        Ok(TransactionInput {
            prev_hash,
            prev_index,
        })
    }

    /// Serialize this input into a `ByteWriter`.
    pub fn write_to(&self, writer: &mut ByteWriter) {
        writer.write_bytes(&self.prev_hash);
        writer.write_u16_le(self.prev_index);
    }
}
