//! NEO thin SDK - VM scripts, addresses and the script builder.
//!
//! Provides the VM opcode table, the `Script` type with the standard
//! single-signature verification script, address encoding, the
//! `ScriptBuilder` bytecode emitter and the structured parameter type
//! with its typed-string mini-language.

pub mod address;
pub mod builder;
pub mod opcodes;
pub mod param;
pub mod script;

mod error;
pub use address::{address_to_script_hash, script_hash_to_address, Address};
pub use builder::ScriptBuilder;
pub use error::ScriptError;
pub use param::ParamValue;
pub use script::Script;
