//! Transaction output: an asset amount paid to a script hash.

use neo_primitives::util::{ByteReader, ByteWriter};
use neo_primitives::SCRIPT_HASH_LEN;
use neo_script::Address;

use crate::fixed8::Fixed8;
use crate::TransactionError;

/// A single output of a transaction.
///
/// # Wire format
///
/// | Field       | Size          |
/// |-------------|---------------|
/// | asset_id    | 32 bytes      |
/// | value       | 8 bytes (LE)  |
/// | script_hash | 20 bytes      |
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransactionOutput {
    /// Asset identifier in wire byte order (the reverse of its display hex).
    pub asset_id: [u8; 32],

    /// Amount paid, in Fixed8 units.
    pub value: Fixed8,

    /// Script hash of the recipient.
    pub script_hash: [u8; SCRIPT_HASH_LEN],
}

impl TransactionOutput {
    /// Create an output.
    pub fn new(asset_id: [u8; 32], value: Fixed8, script_hash: [u8; SCRIPT_HASH_LEN]) -> Self {
        TransactionOutput {
            asset_id,
            value,
            script_hash,
        }
    }

    /// Return the recipient as an address.
    pub fn address(&self) -> Address {
        Address::from_script_hash(&self.script_hash)
    }

    /// Deserialize a `TransactionOutput` from a `ByteReader`.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of an encoded output.
    ///
    /// # Returns
    /// `Ok(TransactionOutput)` on success, or a `TransactionError` if the
    /// data is truncated.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let asset_id = reader.read_array::<32>().map_err(|e| {
            TransactionError::Serialization(format!("reading asset id: {}", e))
        })?;
        let value = reader.read_u64_le().map_err(|e| {
            TransactionError::Serialization(format!("reading output value: {}", e))
        })?;
        let script_hash = reader.read_array::<SCRIPT_HASH_LEN>().map_err(|e| {
            TransactionError::Serialization(format!("reading output script hash: {}", e))
        })?;
        Ok(TransactionOutput {
            asset_id,
            value: Fixed8(value),
            script_hash,
        })
    }

    /// Serialize this output into a `ByteWriter`.
    pub fn write_to(&self, writer: &mut ByteWriter) {
        writer.write_bytes(&self.asset_id);
        writer.write_u64_le(self.value.raw());
        writer.write_bytes(&self.script_hash);
    }
}
