#![deny(missing_docs)]

//! NEO thin SDK - Complete SDK.
//!
//! Re-exports all SDK components for convenient single-crate usage.

pub use neo_primitives as primitives;
pub use neo_script as script;
pub use neo_transaction as transaction;
