//! Binary codec helpers for the NEO wire format.
//!
//! Provides the variable-length integer, a cursor-based `ByteReader`, a
//! buffer-based `ByteWriter` and the hex/byte-order helpers used when
//! moving between display form (reversed hex) and wire form.

use crate::PrimitivesError;

/// Upper bound applied to every length prefix read from untrusted data.
pub const MAX_VAR_LENGTH: u64 = 65535;

// ---------------------------------------------------------------------------
// VarInt
// ---------------------------------------------------------------------------

/// A NEO variable-length integer.
///
/// Values up to 0xFC take one byte. Larger values are written as a marker
/// byte (0xFD, 0xFE, 0xFF) followed by a 2, 4 or 8 byte little-endian value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarInt(pub u64);

impl VarInt {
    /// Decode a VarInt from the start of a byte slice.
    ///
    /// # Arguments
    /// * `data` - Byte slice starting with a VarInt encoding.
    ///
    /// # Returns
    /// A tuple of `(VarInt, bytes_consumed)`, or `UnexpectedEof` if the
    /// slice is shorter than the encoding requires.
    pub fn from_bytes(data: &[u8]) -> Result<(Self, usize), PrimitivesError> {
        let mut reader = ByteReader::new(data);
        let value = reader.read_varint()?;
        Ok((value, data.len() - reader.remaining()))
    }

    /// Return the wire-format byte length of this VarInt.
    ///
    /// # Returns
    /// 1, 3, 5, or 9 depending on the value.
    pub fn length(&self) -> usize {
        if self.0 <= 0xfc {
            1
        } else if self.0 <= 0xffff {
            3
        } else if self.0 <= 0xffff_ffff {
            5
        } else {
            9
        }
    }

    /// Encode the VarInt into a new byte vector.
    ///
    /// # Returns
    /// A `Vec<u8>` of 1, 3, 5, or 9 bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let v = self.0;
        let mut buf = Vec::with_capacity(self.length());
        if v <= 0xfc {
            buf.push(v as u8);
        } else if v <= 0xffff {
            buf.push(0xfd);
            buf.extend_from_slice(&(v as u16).to_le_bytes());
        } else if v <= 0xffff_ffff {
            buf.push(0xfe);
            buf.extend_from_slice(&(v as u32).to_le_bytes());
        } else {
            buf.push(0xff);
            buf.extend_from_slice(&v.to_le_bytes());
        }
        buf
    }

    /// Return the underlying u64 value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VarInt {
    fn from(v: u64) -> Self {
        VarInt(v)
    }
}

impl From<usize> for VarInt {
    fn from(v: usize) -> Self {
        VarInt(v as u64)
    }
}

// ---------------------------------------------------------------------------
// ByteReader
// ---------------------------------------------------------------------------

/// A cursor-based reader over NEO wire-format data.
///
/// Every read advances the position and fails with `UnexpectedEof` when
/// the underlying slice runs out.
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a new reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        ByteReader { data, pos: 0 }
    }

    /// Read `n` bytes and advance the position.
    ///
    /// # Arguments
    /// * `n` - Number of bytes to read.
    ///
    /// # Returns
    /// A byte slice of length `n`, or an error if insufficient data remains.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], PrimitivesError> {
        if n > self.remaining() {
            return Err(PrimitivesError::UnexpectedEof);
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read exactly `N` bytes into a fixed-size array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], PrimitivesError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Read a single byte and advance the position.
    pub fn read_u8(&mut self) -> Result<u8, PrimitivesError> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Read a little-endian u16 and advance the position by 2 bytes.
    pub fn read_u16_le(&mut self) -> Result<u16, PrimitivesError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u32 and advance the position by 4 bytes.
    pub fn read_u32_le(&mut self) -> Result<u32, PrimitivesError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u64 and advance the position by 8 bytes.
    pub fn read_u64_le(&mut self) -> Result<u64, PrimitivesError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Read a VarInt without any bound on its value.
    ///
    /// # Returns
    /// The decoded `VarInt`, or an error if insufficient data.
    pub fn read_varint(&mut self) -> Result<VarInt, PrimitivesError> {
        let value = match self.read_u8()? {
            0xff => self.read_u64_le()?,
            0xfe => self.read_u32_le()? as u64,
            0xfd => self.read_u16_le()? as u64,
            b => b as u64,
        };
        Ok(VarInt(value))
    }

    /// Read a VarInt and reject values above `max`.
    ///
    /// # Arguments
    /// * `max` - The largest accepted value.
    ///
    /// # Returns
    /// The decoded value, or `LengthExceeded` when it is larger than `max`.
    pub fn read_varint_max(&mut self, max: u64) -> Result<u64, PrimitivesError> {
        let value = self.read_varint()?.value();
        if value > max {
            return Err(PrimitivesError::LengthExceeded { value, max });
        }
        Ok(value)
    }

    /// Read a VarInt length prefix (bounded by `max`) followed by that many bytes.
    ///
    /// # Arguments
    /// * `max` - The largest accepted length.
    ///
    /// # Returns
    /// The payload bytes, or an error if the prefix exceeds `max` or the
    /// data is truncated.
    pub fn read_var_bytes(&mut self, max: u64) -> Result<&'a [u8], PrimitivesError> {
        let len = self.read_varint_max(max)?;
        self.read_bytes(len as usize)
    }

    /// Return the number of bytes remaining.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Check whether the reader has consumed all of its input.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

// ---------------------------------------------------------------------------
// ByteWriter
// ---------------------------------------------------------------------------

/// A buffer-based writer for NEO wire-format data.
///
/// Wraps a `Vec<u8>` and appends fixed-size integers in little-endian
/// order, VarInts and length-prefixed byte strings.
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Create a new empty writer.
    pub fn new() -> Self {
        ByteWriter { buf: Vec::new() }
    }

    /// Create a new writer with a pre-allocated capacity.
    ///
    /// # Arguments
    /// * `capacity` - Initial byte capacity of the internal buffer.
    pub fn with_capacity(capacity: usize) -> Self {
        ByteWriter {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Append raw bytes to the buffer.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append a single byte to the buffer.
    pub fn write_u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    /// Append a little-endian u16 (2 bytes) to the buffer.
    pub fn write_u16_le(&mut self, val: u16) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian u32 (4 bytes) to the buffer.
    pub fn write_u32_le(&mut self, val: u32) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian u64 (8 bytes) to the buffer.
    pub fn write_u64_le(&mut self, val: u64) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a VarInt to the buffer.
    pub fn write_varint(&mut self, varint: VarInt) {
        self.buf.extend_from_slice(&varint.to_bytes());
    }

    /// Append a VarInt length prefix followed by the bytes themselves.
    ///
    /// # Arguments
    /// * `bytes` - The payload to write.
    pub fn write_var_bytes(&mut self, bytes: &[u8]) {
        self.write_varint(VarInt::from(bytes.len()));
        self.write_bytes(bytes);
    }

    /// Consume the writer and return the accumulated bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Return a reference to the current buffer contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Return the current length of the buffer.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Default for ByteWriter {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Hex and byte-order helpers
// ---------------------------------------------------------------------------

/// Return a copy of `data` with the byte order reversed.
///
/// Hashes are displayed in the reverse of their wire order; this converts
/// between the two.
pub fn reverse_bytes(data: &[u8]) -> Vec<u8> {
    data.iter().rev().copied().collect()
}

/// Decode a hex string into bytes.
///
/// # Returns
/// The decoded bytes, or `InvalidHex` for odd length or non-hex characters.
pub fn hex_to_bytes(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    Ok(hex::decode(s)?)
}

/// Encode bytes as a lowercase hex string.
pub fn bytes_to_hex(data: &[u8]) -> String {
    hex::encode(data)
}

/// Decode a display-order hex string and reverse it into wire order.
///
/// # Arguments
/// * `s` - Hex string in display (big-endian) order.
///
/// # Returns
/// The bytes in wire (little-endian) order.
pub fn reversed_hex_to_bytes(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    let mut bytes = hex_to_bytes(s)?;
    bytes.reverse();
    Ok(bytes)
}
