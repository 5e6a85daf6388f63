//! NEO thin SDK - transaction model, wire codec, signing and builders.
//!
//! Provides the `Transaction` type with its attributes, inputs, outputs
//! and witnesses, the binary/hex wire format, single-signature witness
//! attachment, and the contract/invocation transaction builders.

pub mod attribute;
pub mod builder;
pub mod fixed8;
pub mod input;
pub mod output;
pub mod transaction;
pub mod witness;

mod error;
pub use attribute::TransactionAttribute;
pub use builder::{
    build_transfer_invocation, create_contract_transaction, create_invocation_transaction,
    create_transaction, CreateSignParams, Utxo, DEFAULT_INVOCATION_GAS,
};
pub use error::TransactionError;
pub use fixed8::Fixed8;
pub use input::TransactionInput;
pub use output::TransactionOutput;
pub use transaction::{InvocationPayload, Transaction, TransactionKind, TransactionType};
pub use witness::Witness;

#[cfg(test)]
mod tests;
