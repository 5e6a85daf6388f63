//! Witnesses: the invocation and verification script pair proving
//! authorization for a transaction.

use neo_primitives::util::{ByteReader, ByteWriter, MAX_VAR_LENGTH};
use neo_primitives::SCRIPT_HASH_LEN;
use neo_script::{Address, Script};

use crate::TransactionError;

/// An (invocation script, verification script) pair.
///
/// The verification script identifies the signer; the invocation script
/// pushes the data that script consumes (for a single-signature account,
/// the 64-byte signature).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Witness {
    /// Script supplying signatures or other arguments.
    pub invocation_script: Script,
    /// Script whose hash is the signer's address.
    pub verification_script: Script,
}

impl Witness {
    /// Create a witness from its two scripts.
    pub fn new(invocation_script: Script, verification_script: Script) -> Self {
        Witness {
            invocation_script,
            verification_script,
        }
    }

    /// True unless the verification script is a plain single-signature script.
    pub fn is_smart_contract(&self) -> bool {
        !self.verification_script.is_standard_single_sig()
    }

    /// Script hash of the verification script.
    pub fn script_hash(&self) -> [u8; SCRIPT_HASH_LEN] {
        self.verification_script.script_hash()
    }

    /// Address of the signer.
    pub fn address(&self) -> Address {
        Address::from_script(&self.verification_script)
    }

    /// Deserialize a `Witness` from a `ByteReader`.
    ///
    /// Both scripts are VarInt-length prefixed and bounded by 65535 bytes.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let invocation = reader.read_var_bytes(MAX_VAR_LENGTH).map_err(|e| {
            TransactionError::Serialization(format!("reading invocation script: {}", e))
        })?;
        let verification = reader.read_var_bytes(MAX_VAR_LENGTH).map_err(|e| {
            TransactionError::Serialization(format!("reading verification script: {}", e))
        })?;
        Ok(Witness {
            invocation_script: Script::from_bytes(invocation),
            verification_script: Script::from_bytes(verification),
        })
    }

    /// Serialize this witness into a `ByteWriter`.
    pub fn write_to(&self, writer: &mut ByteWriter) {
        writer.write_var_bytes(self.invocation_script.to_bytes());
        writer.write_var_bytes(self.verification_script.to_bytes());
    }
}
