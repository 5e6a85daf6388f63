//! Core transaction type.
//!
//! A transaction carries a kind (with its kind-specific payload), a
//! version, attributes, inputs, outputs and witnesses. The unsigned
//! serialization covers everything except the witnesses and is exactly
//! the byte string that signers sign and that is hashed into the
//! transaction id.

use std::fmt;

use neo_primitives::ec::{PrivateKey, PublicKey, Signature};
use neo_primitives::hash::sha256d;
use neo_primitives::util::{ByteReader, ByteWriter, VarInt, MAX_VAR_LENGTH};
use neo_script::{Address, Script, ScriptBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::attribute::TransactionAttribute;
use crate::fixed8::Fixed8;
use crate::input::TransactionInput;
use crate::output::TransactionOutput;
use crate::witness::Witness;
use crate::TransactionError;

/// Every transaction type byte known to the ledger.
///
/// Only `Contract` and `Invocation` can be built or decoded here; the
/// rest are named so that diagnostics can say what was received.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Miner,
    Issue,
    Claim,
    Enrollment,
    Register,
    Contract,
    Publish,
    Invocation,
}

impl TransactionType {
    /// Return the wire byte of this type.
    pub fn to_byte(self) -> u8 {
        match self {
            TransactionType::Miner => 0x00,
            TransactionType::Issue => 0x01,
            TransactionType::Claim => 0x02,
            TransactionType::Enrollment => 0x20,
            TransactionType::Register => 0x40,
            TransactionType::Contract => 0x80,
            TransactionType::Publish => 0xd0,
            TransactionType::Invocation => 0xd1,
        }
    }

    /// Look up a type by its wire byte.
    pub fn from_byte(b: u8) -> Option<Self> {
        let t = match b {
            0x00 => TransactionType::Miner,
            0x01 => TransactionType::Issue,
            0x02 => TransactionType::Claim,
            0x20 => TransactionType::Enrollment,
            0x40 => TransactionType::Register,
            0x80 => TransactionType::Contract,
            0xd0 => TransactionType::Publish,
            0xd1 => TransactionType::Invocation,
            _ => return None,
        };
        Some(t)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransactionType::Miner => "MinerTransaction",
            TransactionType::Issue => "IssueTransaction",
            TransactionType::Claim => "ClaimTransaction",
            TransactionType::Enrollment => "EnrollmentTransaction",
            TransactionType::Register => "RegisterTransaction",
            TransactionType::Contract => "ContractTransaction",
            TransactionType::Publish => "PublishTransaction",
            TransactionType::Invocation => "InvocationTransaction",
        };
        f.write_str(name)
    }
}

/// Payload of an invocation transaction: the script to run and the gas
/// allowance paid for it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InvocationPayload {
    /// Script executed by the VM.
    pub script: Script,
    /// Gas allowance. Only serialized for version 1 and above.
    pub gas: Fixed8,
}

/// The kind of a transaction together with its kind-specific payload.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    /// A plain asset transfer; no payload.
    Contract,
    /// A smart contract call.
    Invocation(InvocationPayload),
}

impl TransactionKind {
    /// Return the transaction type of this kind.
    pub fn tx_type(&self) -> TransactionType {
        match self {
            TransactionKind::Contract => TransactionType::Contract,
            TransactionKind::Invocation(_) => TransactionType::Invocation,
        }
    }
}

/// A NEO transaction.
///
/// # Wire format
///
/// | Field            | Size                                  |
/// |------------------|---------------------------------------|
/// | type             | 1 byte                                |
/// | version          | 1 byte                                |
/// | payload          | invocation only: var script (+ gas)   |
/// | attributes       | VarInt count + attributes             |
/// | inputs           | VarInt count + 34 bytes each          |
/// | outputs          | VarInt count + 60 bytes each          |
/// | witnesses        | signed form only: VarInt count + each |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    /// Kind and kind-specific payload.
    kind: TransactionKind,

    /// Format version. Invocation transactions carry gas from version 1.
    version: u8,

    /// Ordered list of attributes.
    pub attributes: Vec<TransactionAttribute>,

    /// Ordered list of inputs.
    pub inputs: Vec<TransactionInput>,

    /// Ordered list of outputs.
    pub outputs: Vec<TransactionOutput>,

    /// Witnesses, at most one per signer address. Not covered by the hash.
    pub witnesses: Vec<Witness>,
}

impl Transaction {
    /// Create an empty transaction of the given kind and version.
    ///
    /// An invocation below version 1 has no gas on the wire, so its gas is
    /// reset to zero.
    pub fn new(kind: TransactionKind, version: u8) -> Self {
        let mut tx = Transaction {
            kind,
            version,
            attributes: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            witnesses: Vec::new(),
        };
        tx.clear_unserialized_gas();
        tx
    }

    /// Create an empty contract transaction, version 0.
    pub fn new_contract() -> Self {
        Self::new(TransactionKind::Contract, 0)
    }

    /// Create an empty invocation transaction, version 1.
    ///
    /// # Arguments
    /// * `script` - The script to execute.
    /// * `gas` - The gas allowance.
    pub fn new_invocation(script: Script, gas: Fixed8) -> Self {
        Self::new(
            TransactionKind::Invocation(InvocationPayload { script, gas }),
            1,
        )
    }

    /// Return the transaction type.
    pub fn tx_type(&self) -> TransactionType {
        self.kind.tx_type()
    }

    /// Return the kind and its payload.
    pub fn kind(&self) -> &TransactionKind {
        &self.kind
    }

    /// Return the format version.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Set the format version. Dropping an invocation below version 1
    /// zeroes its gas.
    pub fn set_version(&mut self, version: u8) {
        self.version = version;
        self.clear_unserialized_gas();
    }

    fn clear_unserialized_gas(&mut self) {
        if self.version < 1 {
            if let TransactionKind::Invocation(payload) = &mut self.kind {
                payload.gas = Fixed8::ZERO;
            }
        }
    }

    // -----------------------------------------------------------------
    // Deserialization
    // -----------------------------------------------------------------

    /// Parse a signed transaction from a hex-encoded string.
    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let bytes = hex::decode(hex_str)
            .map_err(|e| TransactionError::Serialization(format!("invalid hex: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    /// Parse a signed transaction from raw bytes.
    ///
    /// The slice must contain exactly one transaction with no trailing data.
    ///
    /// # Arguments
    /// * `bytes` - The raw transaction bytes.
    ///
    /// # Returns
    /// `Ok(Transaction)` on success, or a `TransactionError` if the data is
    /// truncated, malformed, of an unsupported type, or has trailing bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = ByteReader::new(bytes);
        let tx = Self::read_from(&mut reader)?;
        check_consumed(&reader)?;
        Ok(tx)
    }

    /// Parse an unsigned payload (no witness section) from raw bytes.
    pub fn from_unsigned_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = ByteReader::new(bytes);
        let tx = Self::read_unsigned_from(&mut reader)?;
        check_consumed(&reader)?;
        Ok(tx)
    }

    /// Deserialize a signed transaction from a `ByteReader`.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let mut tx = Self::read_unsigned_from(reader)?;
        let witness_count = read_count(reader, "witness count")?;
        let mut witnesses = Vec::with_capacity(witness_count);
        for _ in 0..witness_count {
            witnesses.push(Witness::read_from(reader)?);
        }
        tx.witnesses = witnesses;
        Ok(tx)
    }

    /// Deserialize the unsigned part of a transaction from a `ByteReader`.
    ///
    /// Every count is bounded by 65535.
    pub fn read_unsigned_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let type_byte = reader.read_u8().map_err(|e| {
            TransactionError::Serialization(format!("reading type: {}", e))
        })?;
        let version = reader.read_u8().map_err(|e| {
            TransactionError::Serialization(format!("reading version: {}", e))
        })?;

        let kind = match TransactionType::from_byte(type_byte) {
            Some(TransactionType::Contract) => TransactionKind::Contract,
            Some(TransactionType::Invocation) => {
                let script = reader.read_var_bytes(MAX_VAR_LENGTH).map_err(|e| {
                    TransactionError::Serialization(format!("reading invocation script: {}", e))
                })?;
                let gas = if version >= 1 {
                    let raw = reader.read_u64_le().map_err(|e| {
                        TransactionError::Serialization(format!("reading gas: {}", e))
                    })?;
                    Fixed8(raw)
                } else {
                    Fixed8::ZERO
                };
                TransactionKind::Invocation(InvocationPayload {
                    script: Script::from_bytes(script),
                    gas,
                })
            }
            _ => return Err(TransactionError::UnsupportedType(type_byte)),
        };

        let attribute_count = read_count(reader, "attribute count")?;
        let mut attributes = Vec::with_capacity(attribute_count);
        for _ in 0..attribute_count {
            attributes.push(TransactionAttribute::read_from(reader)?);
        }

        let input_count = read_count(reader, "input count")?;
        let mut inputs = Vec::with_capacity(input_count);
        for _ in 0..input_count {
            inputs.push(TransactionInput::read_from(reader)?);
        }

        let output_count = read_count(reader, "output count")?;
        let mut outputs = Vec::with_capacity(output_count);
        for _ in 0..output_count {
            outputs.push(TransactionOutput::read_from(reader)?);
        }

        Ok(Transaction {
            kind,
            version,
            attributes,
            inputs,
            outputs,
            witnesses: Vec::new(),
        })
    }

    // -----------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------

    /// Serialize everything except the witnesses into a `ByteWriter`.
    pub fn write_unsigned_to(&self, writer: &mut ByteWriter) {
        writer.write_u8(self.tx_type().to_byte());
        writer.write_u8(self.version);

        if let TransactionKind::Invocation(payload) = &self.kind {
            writer.write_var_bytes(payload.script.to_bytes());
            if self.version >= 1 {
                writer.write_u64_le(payload.gas.raw());
            }
        }

        writer.write_varint(VarInt::from(self.attributes.len()));
        for attribute in &self.attributes {
            attribute.write_to(writer);
        }

        writer.write_varint(VarInt::from(self.inputs.len()));
        for input in &self.inputs {
            input.write_to(writer);
        }

        writer.write_varint(VarInt::from(self.outputs.len()));
        for output in &self.outputs {
            output.write_to(writer);
        }
    }

    /// Serialize the unsigned payload: the bytes that are signed and hashed.
    pub fn serialize_unsigned(&self) -> Vec<u8> {
        let mut writer = ByteWriter::with_capacity(256);
        self.write_unsigned_to(&mut writer);
        writer.into_bytes()
    }

    /// Serialize the full signed transaction to raw bytes.
    ///
    /// # Returns
    /// The unsigned payload followed by the witness count and each witness.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::with_capacity(256);
        self.write_unsigned_to(&mut writer);
        writer.write_varint(VarInt::from(self.witnesses.len()));
        for witness in &self.witnesses {
            witness.write_to(&mut writer);
        }
        writer.into_bytes()
    }

    /// Serialize the signed transaction to a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    // -----------------------------------------------------------------
    // Transaction ID
    // -----------------------------------------------------------------

    /// Compute the transaction hash, double SHA-256 of the unsigned payload.
    ///
    /// The hash bytes are in internal order. Use `tx_id_hex()` for the
    /// display string.
    pub fn hash(&self) -> [u8; 32] {
        sha256d(&self.serialize_unsigned())
    }

    /// Compute the transaction id as a byte-reversed hex string.
    pub fn tx_id_hex(&self) -> String {
        let mut id = self.hash();
        id.reverse();
        hex::encode(id)
    }

    // -----------------------------------------------------------------
    // Builders
    // -----------------------------------------------------------------

    /// Append an attribute.
    pub fn add_attribute(&mut self, attribute: TransactionAttribute) {
        self.attributes.push(attribute);
    }

    /// Append an input.
    pub fn add_input(&mut self, input: TransactionInput) {
        self.inputs.push(input);
    }

    /// Append an output.
    pub fn add_output(&mut self, output: TransactionOutput) {
        self.outputs.push(output);
    }

    /// Sum of all output values.
    ///
    /// # Returns
    /// `None` if the sum overflows.
    pub fn total_output_value(&self) -> Option<Fixed8> {
        self.outputs
            .iter()
            .try_fold(Fixed8::ZERO, |acc, o| acc.checked_add(o.value))
    }

    // -----------------------------------------------------------------
    // Witnesses
    // -----------------------------------------------------------------

    /// Attach a single-signature witness.
    ///
    /// The signature is checked against the current unsigned payload and
    /// the key must derive `expected_address`. The verification script is
    /// the key's standard single-signature script and the invocation script
    /// pushes the 64-byte signature.
    ///
    /// # Arguments
    /// * `signature` - Signature over the unsigned payload.
    /// * `pub_key` - The signer's public key.
    /// * `expected_address` - The address the signer must control.
    ///
    /// # Returns
    /// `Ok(true)` if attached, `Ok(false)` if a witness for the same signer
    /// address is already present, or an error if the signature does not
    /// verify or the address does not match.
    pub fn add_witness(
        &mut self,
        signature: &Signature,
        pub_key: &PublicKey,
        expected_address: &str,
    ) -> Result<bool, TransactionError> {
        if !pub_key.verify(&self.serialize_unsigned(), signature) {
            return Err(TransactionError::InvalidSignature);
        }

        let address = Address::from_public_key(pub_key);
        if address.address_string != expected_address {
            return Err(TransactionError::AddressMismatch {
                expected: expected_address.to_string(),
                actual: address.address_string,
            });
        }

        let mut invocation = ScriptBuilder::new();
        invocation.emit_push_bytes(&signature.to_bytes());
        Ok(self.add_witness_script(
            Script::from_public_key(pub_key),
            invocation.into_script(),
        ))
    }

    /// Attach a witness built from pre-made scripts.
    ///
    /// # Returns
    /// `false` if a witness with the same verification script hash is
    /// already attached.
    pub fn add_witness_script(&mut self, verification: Script, invocation: Script) -> bool {
        let witness = Witness::new(invocation, verification);
        let signer = witness.address();
        if self.witnesses.iter().any(|w| w.script_hash() == signer.script_hash) {
            debug!(signer = %signer, "witness for signer already attached");
            return false;
        }
        self.witnesses.push(witness);
        true
    }

    /// Sign the unsigned payload with a key and attach the witness.
    ///
    /// # Returns
    /// Same as `add_witness`, with the key's own address as the expected one.
    pub fn sign(&mut self, key: &PrivateKey) -> Result<bool, TransactionError> {
        let signature = key.sign(&self.serialize_unsigned())?;
        let pub_key = key.pub_key();
        let address = Address::from_public_key(&pub_key);
        self.add_witness(&signature, &pub_key, &address.address_string)
    }
}

impl fmt::Display for Transaction {
    /// Display the transaction as its hex-encoded signed serialization.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

fn read_count(reader: &mut ByteReader, what: &str) -> Result<usize, TransactionError> {
    reader
        .read_varint_max(MAX_VAR_LENGTH)
        .map(|n| n as usize)
        .map_err(|e| TransactionError::Serialization(format!("reading {}: {}", what, e)))
}

fn check_consumed(reader: &ByteReader) -> Result<(), TransactionError> {
    if reader.remaining() != 0 {
        return Err(TransactionError::Serialization(format!(
            "trailing {} bytes after transaction",
            reader.remaining()
        )));
    }
    Ok(())
}
