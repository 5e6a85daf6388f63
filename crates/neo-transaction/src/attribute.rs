//! Transaction attributes.
//!
//! An attribute is a usage byte plus data. The usage decides the wire
//! encoding of the data:
//!
//! | usage | encoding |
//! |---|---|
//! | `CONTRACT_HASH`, `VOTE`, `HASH1..=HASH15` | 32 bytes |
//! | `ECDH02`, `ECDH03` | 33-byte key whose prefix is the usage; 32 bytes on the wire |
//! | `SCRIPT` | 20 bytes |
//! | `DESCRIPTION_URL` | 1-byte length + data |
//! | `DESCRIPTION`, `REMARK..` | VarInt length + data |

use neo_primitives::util::{ByteReader, ByteWriter, VarInt, MAX_VAR_LENGTH};

use crate::TransactionError;

/// Attribute usage bytes.
pub mod usage {
    pub const CONTRACT_HASH: u8 = 0x00;
    pub const ECDH02: u8 = 0x02;
    pub const ECDH03: u8 = 0x03;
    pub const SCRIPT: u8 = 0x20;
    pub const VOTE: u8 = 0x30;
    pub const DESCRIPTION_URL: u8 = 0x81;
    pub const DESCRIPTION: u8 = 0x90;
    pub const HASH1: u8 = 0xa1;
    pub const HASH15: u8 = 0xaf;
    pub const REMARK: u8 = 0xf0;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Encoding {
    Fixed(usize),
    Ecdh,
    ShortVar,
    Var,
}

fn encoding_for(usage_byte: u8) -> Option<Encoding> {
    match usage_byte {
        usage::CONTRACT_HASH | usage::VOTE | usage::HASH1..=usage::HASH15 => {
            Some(Encoding::Fixed(32))
        }
        usage::ECDH02 | usage::ECDH03 => Some(Encoding::Ecdh),
        usage::SCRIPT => Some(Encoding::Fixed(20)),
        usage::DESCRIPTION_URL => Some(Encoding::ShortVar),
        usage::DESCRIPTION | usage::REMARK..=0xff => Some(Encoding::Var),
        _ => None,
    }
}

/// A single transaction attribute.
///
/// Fields are private so that every attribute in a transaction has data
/// matching its usage and always serializes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionAttribute {
    usage: u8,
    data: Vec<u8>,
}

impl TransactionAttribute {
    /// Create an attribute, checking the data against the usage.
    ///
    /// For `ECDH02`/`ECDH03` the data is the full 33-byte compressed key and
    /// its first byte must equal the usage.
    ///
    /// # Arguments
    /// * `usage` - The usage byte.
    /// * `data` - The attribute data.
    ///
    /// # Returns
    /// The attribute, or `InvalidAttribute` if the usage is unknown or the
    /// data length does not fit it.
    pub fn new(usage: u8, data: Vec<u8>) -> Result<Self, TransactionError> {
        let encoding = encoding_for(usage).ok_or_else(|| {
            TransactionError::InvalidAttribute(format!("unknown usage 0x{:02x}", usage))
        })?;
        let ok = match encoding {
            Encoding::Fixed(n) => data.len() == n,
            Encoding::Ecdh => data.len() == 33 && data[0] == usage,
            Encoding::ShortVar => data.len() <= u8::MAX as usize,
            Encoding::Var => data.len() as u64 <= MAX_VAR_LENGTH,
        };
        if !ok {
            return Err(TransactionError::InvalidAttribute(format!(
                "usage 0x{:02x} cannot carry {} bytes",
                usage,
                data.len()
            )));
        }
        Ok(TransactionAttribute { usage, data })
    }

    /// Return the usage byte.
    pub fn usage(&self) -> u8 {
        self.usage
    }

    /// Return the attribute data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Deserialize an attribute from a `ByteReader`.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let usage = reader.read_u8().map_err(|e| {
            TransactionError::Serialization(format!("reading attribute usage: {}", e))
        })?;
        let encoding = encoding_for(usage).ok_or_else(|| {
            TransactionError::InvalidAttribute(format!("unknown usage 0x{:02x}", usage))
        })?;

        let data = match encoding {
            Encoding::Fixed(n) => reader.read_bytes(n).map(<[u8]>::to_vec),
            Encoding::Ecdh => reader.read_bytes(32).map(|x| {
                let mut key = Vec::with_capacity(33);
                key.push(usage);
                key.extend_from_slice(x);
                key
            }),
            Encoding::ShortVar => reader
                .read_u8()
                .and_then(|len| reader.read_bytes(len as usize))
                .map(<[u8]>::to_vec),
            Encoding::Var => reader.read_var_bytes(MAX_VAR_LENGTH).map(<[u8]>::to_vec),
        }
        .map_err(|e| {
            TransactionError::Serialization(format!(
                "reading attribute 0x{:02x} data: {}",
                usage, e
            ))
        })?;

        Ok(TransactionAttribute { usage, data })
    }

    /// Serialize this attribute into a `ByteWriter`.
    pub fn write_to(&self, writer: &mut ByteWriter) {
        writer.write_u8(self.usage);
        match encoding_for(self.usage) {
            Some(Encoding::Fixed(_)) => writer.write_bytes(&self.data),
            Some(Encoding::Ecdh) => writer.write_bytes(&self.data[1..]),
            Some(Encoding::ShortVar) => {
                writer.write_u8(self.data.len() as u8);
                writer.write_bytes(&self.data);
            }
            Some(Encoding::Var) => {
                writer.write_varint(VarInt::from(self.data.len()));
                writer.write_bytes(&self.data);
            }
            None => unreachable!("attribute usage validated at construction"),
        }
    }
}
