//! NEO VM opcode table.
//!
//! Flat constant definitions for every instruction the builder can emit,
//! plus a name lookup used in diagnostics.

// Constants
pub const OP_PUSH0: u8 = 0x00;
pub const OP_PUSHF: u8 = OP_PUSH0;
pub const OP_PUSHBYTES1: u8 = 0x01;
pub const OP_PUSHBYTES75: u8 = 0x4b;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
pub const OP_PUSHM1: u8 = 0x4f;
pub const OP_PUSH1: u8 = 0x51;
pub const OP_PUSHT: u8 = OP_PUSH1;
pub const OP_PUSH2: u8 = 0x52;
pub const OP_PUSH3: u8 = 0x53;
pub const OP_PUSH4: u8 = 0x54;
pub const OP_PUSH5: u8 = 0x55;
pub const OP_PUSH6: u8 = 0x56;
pub const OP_PUSH7: u8 = 0x57;
pub const OP_PUSH8: u8 = 0x58;
pub const OP_PUSH9: u8 = 0x59;
pub const OP_PUSH10: u8 = 0x5a;
pub const OP_PUSH11: u8 = 0x5b;
pub const OP_PUSH12: u8 = 0x5c;
pub const OP_PUSH13: u8 = 0x5d;
pub const OP_PUSH14: u8 = 0x5e;
pub const OP_PUSH15: u8 = 0x5f;
pub const OP_PUSH16: u8 = 0x60;

// Flow control
pub const OP_NOP: u8 = 0x61;
pub const OP_JMP: u8 = 0x62;
pub const OP_JMPIF: u8 = 0x63;
pub const OP_JMPIFNOT: u8 = 0x64;
pub const OP_CALL: u8 = 0x65;
pub const OP_RET: u8 = 0x66;
pub const OP_APPCALL: u8 = 0x67;
pub const OP_SYSCALL: u8 = 0x68;
pub const OP_TAILCALL: u8 = 0x69;

// Stack
pub const OP_DUPFROMALTSTACK: u8 = 0x6a;
pub const OP_TOALTSTACK: u8 = 0x6b;
pub const OP_FROMALTSTACK: u8 = 0x6c;
pub const OP_XDROP: u8 = 0x6d;
pub const OP_XSWAP: u8 = 0x72;
pub const OP_XTUCK: u8 = 0x73;
pub const OP_DEPTH: u8 = 0x74;
pub const OP_DROP: u8 = 0x75;
pub const OP_DUP: u8 = 0x76;
pub const OP_NIP: u8 = 0x77;
pub const OP_OVER: u8 = 0x78;
pub const OP_PICK: u8 = 0x79;
pub const OP_ROLL: u8 = 0x7a;
pub const OP_ROT: u8 = 0x7b;
pub const OP_SWAP: u8 = 0x7c;
pub const OP_TUCK: u8 = 0x7d;

// Splice
pub const OP_CAT: u8 = 0x7e;
pub const OP_SUBSTR: u8 = 0x7f;
pub const OP_LEFT: u8 = 0x80;
pub const OP_RIGHT: u8 = 0x81;
pub const OP_SIZE: u8 = 0x82;

// Bitwise logic
pub const OP_INVERT: u8 = 0x83;
pub const OP_AND: u8 = 0x84;
pub const OP_OR: u8 = 0x85;
pub const OP_XOR: u8 = 0x86;
pub const OP_EQUAL: u8 = 0x87;

// Arithmetic
pub const OP_INC: u8 = 0x8b;
pub const OP_DEC: u8 = 0x8c;
pub const OP_SIGN: u8 = 0x8d;
pub const OP_NEGATE: u8 = 0x8f;
pub const OP_ABS: u8 = 0x90;
pub const OP_NOT: u8 = 0x91;
pub const OP_NZ: u8 = 0x92;
pub const OP_ADD: u8 = 0x93;
pub const OP_SUB: u8 = 0x94;
pub const OP_MUL: u8 = 0x95;
pub const OP_DIV: u8 = 0x96;
pub const OP_MOD: u8 = 0x97;
pub const OP_SHL: u8 = 0x98;
pub const OP_SHR: u8 = 0x99;
pub const OP_BOOLAND: u8 = 0x9a;
pub const OP_BOOLOR: u8 = 0x9b;
pub const OP_NUMEQUAL: u8 = 0x9c;
pub const OP_NUMNOTEQUAL: u8 = 0x9e;
pub const OP_LT: u8 = 0x9f;
pub const OP_GT: u8 = 0xa0;
pub const OP_LTE: u8 = 0xa1;
pub const OP_GTE: u8 = 0xa2;
pub const OP_MIN: u8 = 0xa3;
pub const OP_MAX: u8 = 0xa4;
pub const OP_WITHIN: u8 = 0xa5;

// Crypto
pub const OP_SHA1: u8 = 0xa7;
pub const OP_SHA256: u8 = 0xa8;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_HASH256: u8 = 0xaa;
pub const OP_CSHARPSTRHASH32: u8 = 0xab;
pub const OP_CHECKSIG: u8 = 0xac;
pub const OP_JAVAHASH32: u8 = 0xad;
pub const OP_CHECKMULTISIG: u8 = 0xae;

// Array
pub const OP_ARRAYSIZE: u8 = 0xc0;
pub const OP_PACK: u8 = 0xc1;
pub const OP_UNPACK: u8 = 0xc2;
pub const OP_PICKITEM: u8 = 0xc3;
pub const OP_SETITEM: u8 = 0xc4;
pub const OP_NEWARRAY: u8 = 0xc5;
pub const OP_NEWSTRUCT: u8 = 0xc6;
pub const OP_SWITCH: u8 = 0xd0;

// Exceptions
pub const OP_THROW: u8 = 0xf0;
pub const OP_THROWIFNOT: u8 = 0xf1;

/// Return the mnemonic of an opcode.
///
/// Direct pushes (0x01..=0x4b) are reported as `OP_PUSHBYTES<n>`; unassigned
/// bytes as `OP_UNKNOWN`.
pub fn opcode_to_string(op: u8) -> String {
    let name = match op {
        OP_PUSH0 => "OP_PUSH0",
        OP_PUSHBYTES1..=OP_PUSHBYTES75 => return format!("OP_PUSHBYTES{}", op),
        OP_PUSHDATA1 => "OP_PUSHDATA1",
        OP_PUSHDATA2 => "OP_PUSHDATA2",
        OP_PUSHDATA4 => "OP_PUSHDATA4",
        OP_PUSHM1 => "OP_PUSHM1",
        OP_PUSH1..=OP_PUSH16 => return format!("OP_PUSH{}", op - OP_PUSH1 + 1),
        OP_NOP => "OP_NOP",
        OP_JMP => "OP_JMP",
        OP_JMPIF => "OP_JMPIF",
        OP_JMPIFNOT => "OP_JMPIFNOT",
        OP_CALL => "OP_CALL",
        OP_RET => "OP_RET",
        OP_APPCALL => "OP_APPCALL",
        OP_SYSCALL => "OP_SYSCALL",
        OP_TAILCALL => "OP_TAILCALL",
        OP_DUPFROMALTSTACK => "OP_DUPFROMALTSTACK",
        OP_TOALTSTACK => "OP_TOALTSTACK",
        OP_FROMALTSTACK => "OP_FROMALTSTACK",
        OP_XDROP => "OP_XDROP",
        OP_XSWAP => "OP_XSWAP",
        OP_XTUCK => "OP_XTUCK",
        OP_DEPTH => "OP_DEPTH",
        OP_DROP => "OP_DROP",
        OP_DUP => "OP_DUP",
        OP_NIP => "OP_NIP",
        OP_OVER => "OP_OVER",
        OP_PICK => "OP_PICK",
        OP_ROLL => "OP_ROLL",
        OP_ROT => "OP_ROT",
        OP_SWAP => "OP_SWAP",
        OP_TUCK => "OP_TUCK",
        OP_CAT => "OP_CAT",
        OP_SUBSTR => "OP_SUBSTR",
        OP_LEFT => "OP_LEFT",
        OP_RIGHT => "OP_RIGHT",
        OP_SIZE => "OP_SIZE",
        OP_INVERT => "OP_INVERT",
        OP_AND => "OP_AND",
        OP_OR => "OP_OR",
        OP_XOR => "OP_XOR",
        OP_EQUAL => "OP_EQUAL",
        OP_INC => "OP_INC",
        OP_DEC => "OP_DEC",
        OP_SIGN => "OP_SIGN",
        OP_NEGATE => "OP_NEGATE",
        OP_ABS => "OP_ABS",
        OP_NOT => "OP_NOT",
        OP_NZ => "OP_NZ",
        OP_ADD => "OP_ADD",
        OP_SUB => "OP_SUB",
        OP_MUL => "OP_MUL",
        OP_DIV => "OP_DIV",
        OP_MOD => "OP_MOD",
        OP_SHL => "OP_SHL",
        OP_SHR => "OP_SHR",
        OP_BOOLAND => "OP_BOOLAND",
        OP_BOOLOR => "OP_BOOLOR",
        OP_NUMEQUAL => "OP_NUMEQUAL",
        OP_NUMNOTEQUAL => "OP_NUMNOTEQUAL",
        OP_LT => "OP_LT",
        OP_GT => "OP_GT",
        OP_LTE => "OP_LTE",
        OP_GTE => "OP_GTE",
        OP_MIN => "OP_MIN",
        OP_MAX => "OP_MAX",
        OP_WITHIN => "OP_WITHIN",
        OP_SHA1 => "OP_SHA1",
        OP_SHA256 => "OP_SHA256",
        OP_HASH160 => "OP_HASH160",
        OP_HASH256 => "OP_HASH256",
        OP_CSHARPSTRHASH32 => "OP_CSHARPSTRHASH32",
        OP_CHECKSIG => "OP_CHECKSIG",
        OP_JAVAHASH32 => "OP_JAVAHASH32",
        OP_CHECKMULTISIG => "OP_CHECKMULTISIG",
        OP_ARRAYSIZE => "OP_ARRAYSIZE",
        OP_PACK => "OP_PACK",
        OP_UNPACK => "OP_UNPACK",
        OP_PICKITEM => "OP_PICKITEM",
        OP_SETITEM => "OP_SETITEM",
        OP_NEWARRAY => "OP_NEWARRAY",
        OP_NEWSTRUCT => "OP_NEWSTRUCT",
        OP_SWITCH => "OP_SWITCH",
        OP_THROW => "OP_THROW",
        OP_THROWIFNOT => "OP_THROWIFNOT",
        _ => "OP_UNKNOWN",
    };
    name.to_string()
}

/// Check whether an opcode takes a signed 16-bit jump offset.
pub fn is_jump_opcode(op: u8) -> bool {
    matches!(op, OP_JMP | OP_JMPIF | OP_JMPIFNOT | OP_CALL)
}
