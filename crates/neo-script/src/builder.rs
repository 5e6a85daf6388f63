//! Bytecode builder for the NEO VM.
//!
//! `ScriptBuilder` appends instructions to a growable buffer. Misuse that
//! can only come from the calling code (a script hash that is not 20
//! bytes, an empty or oversized syscall name, a non-jump opcode passed to
//! `emit_jump`) panics. Malformed parameter data is returned as an error.

use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

use neo_primitives::SCRIPT_HASH_LEN;

use crate::opcodes::*;
use crate::param::{decode_typed_string, magnitude_bytes, ParamValue};
use crate::script::Script;
use crate::ScriptError;

/// Longest accepted syscall name in bytes.
pub const MAX_SYSCALL_NAME_LEN: usize = 252;

/// An append-only VM script builder.
#[derive(Clone, Debug, Default)]
pub struct ScriptBuilder {
    buf: Vec<u8>,
}

impl ScriptBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        ScriptBuilder { buf: Vec::new() }
    }

    /// Append an opcode followed by its operand bytes verbatim.
    ///
    /// # Arguments
    /// * `opcode` - The instruction byte.
    /// * `operand` - Operand bytes, possibly empty.
    pub fn emit(&mut self, opcode: u8, operand: &[u8]) -> &mut Self {
        self.buf.push(opcode);
        self.buf.extend_from_slice(operand);
        self
    }

    /// Push an integer.
    ///
    /// -1 becomes PUSHM1, 0 becomes PUSH0 and 1..=15 map onto PUSH1..PUSH15.
    /// Any other value is pushed as the minimal big-endian bytes of its
    /// magnitude.
    ///
    /// # Arguments
    /// * `number` - The value to push.
    pub fn emit_push_number(&mut self, number: &BigInt) -> &mut Self {
        if *number == -BigInt::one() {
            return self.emit(OP_PUSHM1, &[]);
        }
        if number.is_zero() {
            return self.emit(OP_PUSH0, &[]);
        }
        if number.is_positive() && *number < BigInt::from(16) {
            if let Some(n) = number.to_u8() {
                return self.emit(OP_PUSH1 - 1 + n, &[]);
            }
        }
        self.emit_push_bytes(&magnitude_bytes(number))
    }

    /// Push a machine integer through the same rules as [`Self::emit_push_number`].
    pub fn emit_push_int(&mut self, number: i64) -> &mut Self {
        self.emit_push_number(&BigInt::from(number))
    }

    /// Push a boolean as PUSHT or PUSHF.
    pub fn emit_push_bool(&mut self, value: bool) -> &mut Self {
        self.emit(if value { OP_PUSHT } else { OP_PUSHF }, &[])
    }

    /// Push raw bytes with the shortest length framing.
    ///
    /// Up to 75 bytes take a single length byte; below 0x100 PUSHDATA1,
    /// below 0x10000 PUSHDATA2 with a 2-byte little-endian length,
    /// otherwise PUSHDATA4 with a 4-byte little-endian length.
    ///
    /// # Arguments
    /// * `data` - The bytes to push.
    pub fn emit_push_bytes(&mut self, data: &[u8]) -> &mut Self {
        let len = data.len();
        if len <= OP_PUSHBYTES75 as usize {
            self.buf.push(len as u8);
        } else if len < 0x100 {
            self.buf.push(OP_PUSHDATA1);
            self.buf.push(len as u8);
        } else if len < 0x10000 {
            self.buf.push(OP_PUSHDATA2);
            self.buf.extend_from_slice(&(len as u16).to_le_bytes());
        } else {
            self.buf.push(OP_PUSHDATA4);
            self.buf.extend_from_slice(&(len as u32).to_le_bytes());
        }
        self.buf.extend_from_slice(data);
        self
    }

    /// Push the UTF-8 bytes of a string.
    pub fn emit_push_string(&mut self, s: &str) -> &mut Self {
        self.emit_push_bytes(s.as_bytes())
    }

    /// Emit a SYSCALL to an interop service.
    ///
    /// # Arguments
    /// * `api` - The service name, e.g. "Neo.Runtime.CheckWitness".
    ///
    /// # Panics
    /// If the name is empty or longer than 252 bytes.
    pub fn emit_syscall(&mut self, api: &str) -> &mut Self {
        let name = api.as_bytes();
        assert!(
            !name.is_empty() && name.len() <= MAX_SYSCALL_NAME_LEN,
            "syscall name must be 1..={} bytes, got {}",
            MAX_SYSCALL_NAME_LEN,
            name.len()
        );
        let mut operand = Vec::with_capacity(name.len() + 1);
        operand.push(name.len() as u8);
        operand.extend_from_slice(name);
        self.emit(OP_SYSCALL, &operand)
    }

    /// Emit a call into another contract.
    ///
    /// # Arguments
    /// * `script_hash` - The 20-byte hash of the target contract, wire order.
    /// * `tail_call` - Emit TAILCALL instead of APPCALL.
    ///
    /// # Panics
    /// If `script_hash` is not exactly 20 bytes.
    pub fn emit_app_call(&mut self, script_hash: &[u8], tail_call: bool) -> &mut Self {
        assert_eq!(
            script_hash.len(),
            SCRIPT_HASH_LEN,
            "app call script hash must be {} bytes",
            SCRIPT_HASH_LEN
        );
        let opcode = if tail_call { OP_TAILCALL } else { OP_APPCALL };
        self.emit(opcode, script_hash)
    }

    /// Emit a jump with a signed 16-bit little-endian offset.
    ///
    /// # Panics
    /// If `opcode` is not JMP, JMPIF, JMPIFNOT or CALL.
    pub fn emit_jump(&mut self, opcode: u8, offset: i16) -> &mut Self {
        assert!(
            is_jump_opcode(opcode),
            "{} is not a jump opcode",
            opcode_to_string(opcode)
        );
        self.emit(opcode, &offset.to_le_bytes())
    }

    /// Push a structured parameter.
    ///
    /// Booleans and integers use their push rules. Lists are pushed last
    /// element first so the first element ends up on top of the stack.
    /// Maps push their values in key order. Typed strings are decoded and
    /// then pushed as bytes.
    ///
    /// # Arguments
    /// * `param` - The parameter tree.
    ///
    /// # Returns
    /// `Ok(&mut Self)`, or the first decoding error of a typed string. On
    /// error the buffer may hold the pushes made before the failing leaf.
    pub fn emit_push_param(&mut self, param: &ParamValue) -> Result<&mut Self, ScriptError> {
        match param {
            ParamValue::Bool(b) => {
                self.emit_push_bool(*b);
            }
            ParamValue::Integer(n) => {
                self.emit_push_number(n);
            }
            ParamValue::List(items) => {
                for item in items.iter().rev() {
                    self.emit_push_param(item)?;
                }
            }
            ParamValue::Map(entries) => {
                for value in entries.values() {
                    self.emit_push_param(value)?;
                }
            }
            ParamValue::TypedString(s) => {
                let bytes = decode_typed_string(s)?;
                self.emit_push_bytes(&bytes);
            }
        }
        Ok(self)
    }

    /// Return the bytes emitted so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Return a copy of the bytes emitted so far.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buf.clone()
    }

    /// Consume the builder and return the script.
    pub fn into_script(self) -> Script {
        Script::from(self.buf)
    }

    /// Number of bytes emitted so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if nothing has been emitted.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}
