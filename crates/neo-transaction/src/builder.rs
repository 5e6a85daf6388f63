//! Transaction builder entry points.
//!
//! These take a [`CreateSignParams`] record (typically loaded from JSON),
//! assemble a contract or invocation transaction from caller-supplied
//! UTXOs, sign it with the sender's WIF key and return the signed hex.
//! UTXOs are not checked against any ledger state.

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use neo_primitives::ec::PrivateKey;
use neo_primitives::util::{hex_to_bytes, reversed_hex_to_bytes};
use neo_script::opcodes::OP_PACK;
use neo_script::{address_to_script_hash, ParamValue, Script, ScriptBuilder};

use crate::fixed8::Fixed8;
use crate::input::TransactionInput;
use crate::output::TransactionOutput;
use crate::transaction::{Transaction, TransactionType};
use crate::TransactionError;

/// Gas allowance attached to every invocation transaction (1 GAS).
pub const DEFAULT_INVOCATION_GAS: Fixed8 = Fixed8(1_0000_0000);

/// A spendable output supplied by the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
    /// Hex hash of the transaction holding the output, in wire byte order.
    pub hash: String,
    /// Value of the output in Fixed8 units.
    pub value: u64,
    /// Index of the output.
    pub index: u16,
}

/// Parameters for building and signing a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSignParams {
    /// Which kind of transaction to build.
    pub transaction_type: TransactionType,
    /// Transaction version byte.
    pub version: u8,
    /// Sender's private key in WIF.
    #[serde(rename = "privateKeyWIF")]
    pub private_key_wif: String,
    /// Sender's address; must match the key.
    pub from_address: String,
    /// Recipient address.
    pub to_address: String,
    /// Asset id as display hex (big-endian); reversed into wire order.
    pub asset_id: String,
    /// Amount to transfer in Fixed8 units.
    pub amount: u64,
    /// Script for invocation transactions, hex in JSON.
    #[serde(default)]
    pub extension_script: Script,
    /// Outputs to spend.
    pub utxos: Vec<Utxo>,
}

/// Build, sign and serialize a transaction of the requested type.
///
/// # Returns
/// The signed transaction as lowercase hex, or `UnsupportedType` for
/// types other than contract and invocation.
pub fn create_transaction(params: &CreateSignParams) -> Result<String, TransactionError> {
    match params.transaction_type {
        TransactionType::Contract => create_contract_transaction(params),
        TransactionType::Invocation => create_invocation_transaction(params),
        other => Err(TransactionError::UnsupportedType(other.to_byte())),
    }
}

/// Build and sign a contract (asset transfer) transaction.
///
/// One output pays `amount` to the recipient. When the UTXOs exceed the
/// amount a second output carries the difference, and it is paid to the
/// recipient as well, not back to the sender.
///
/// # Arguments
/// * `params` - Builder parameters; `extension_script` is ignored.
///
/// # Returns
/// The signed transaction hex, or `InsufficientFunds` if the UTXOs do not
/// cover the amount.
pub fn create_contract_transaction(params: &CreateSignParams) -> Result<String, TransactionError> {
    let total = sum_utxos(&params.utxos)?;
    if total < params.amount {
        warn!(
            available = total,
            required = params.amount,
            "refusing contract transaction: insufficient funds"
        );
        return Err(TransactionError::InsufficientFunds {
            available: total,
            required: params.amount,
        });
    }

    let asset_id = parse_asset_id(&params.asset_id)?;
    let recipient = address_to_script_hash(&params.to_address)?;

    let mut tx = Transaction::new_contract();
    tx.set_version(params.version);
    add_inputs(&mut tx, &params.utxos)?;
    tx.add_output(TransactionOutput::new(asset_id, Fixed8(params.amount), recipient));

    let change = total - params.amount;
    if change > 0 {
        tx.add_output(TransactionOutput::new(asset_id, Fixed8(change), recipient));
    }

    sign_and_serialize(tx, params)
}

/// Build and sign an invocation transaction.
///
/// The whole UTXO sum is returned to the sender in a single output; the
/// transaction's effect is the execution of `extension_script`, funded
/// with [`DEFAULT_INVOCATION_GAS`].
///
/// # Returns
/// The signed transaction hex, or `NoFunds` if the UTXOs sum to zero.
pub fn create_invocation_transaction(
    params: &CreateSignParams,
) -> Result<String, TransactionError> {
    let total = sum_utxos(&params.utxos)?;
    if total == 0 {
        warn!(utxos = params.utxos.len(), "refusing invocation transaction: no funds");
        return Err(TransactionError::NoFunds);
    }

    let asset_id = parse_asset_id(&params.asset_id)?;
    let sender = address_to_script_hash(&params.from_address)?;

    let mut tx =
        Transaction::new_invocation(params.extension_script.clone(), DEFAULT_INVOCATION_GAS);
    tx.set_version(params.version);
    add_inputs(&mut tx, &params.utxos)?;
    tx.add_output(TransactionOutput::new(asset_id, Fixed8(total), sender));

    sign_and_serialize(tx, params)
}

/// Build the script of a token `transfer(from, to, amount)` call.
///
/// Arguments are pushed as a packed array followed by the method name and
/// an application call to the token contract.
///
/// # Arguments
/// * `contract_hash_hex` - Token contract script hash, display hex (reversed to wire order).
/// * `from` - Sender address.
/// * `to` - Recipient address.
/// * `amount` - Amount in the token's smallest unit.
///
/// # Returns
/// The invocation script, or an error if the hash or an address is invalid.
pub fn build_transfer_invocation(
    contract_hash_hex: &str,
    from: &str,
    to: &str,
    amount: &BigInt,
) -> Result<Script, TransactionError> {
    let contract_hash = reversed_hex_to_bytes(contract_hash_hex)?;
    if contract_hash.len() != neo_primitives::SCRIPT_HASH_LEN {
        return Err(TransactionError::Serialization(format!(
            "contract hash must be 20 bytes, got {}",
            contract_hash.len()
        )));
    }

    let args = ParamValue::List(vec![
        ParamValue::typed("address", from),
        ParamValue::typed("address", to),
        ParamValue::typed("integer", &amount.to_string()),
    ]);

    let mut sb = ScriptBuilder::new();
    sb.emit_push_param(&args)?
        .emit_push_int(3)
        .emit(OP_PACK, &[])
        .emit_push_string("transfer")
        .emit_app_call(&contract_hash, false);
    Ok(sb.into_script())
}

fn sum_utxos(utxos: &[Utxo]) -> Result<u64, TransactionError> {
    utxos.iter().try_fold(0u64, |acc, u| {
        acc.checked_add(u.value).ok_or(TransactionError::AmountOverflow)
    })
}

fn parse_asset_id(display_hex: &str) -> Result<[u8; 32], TransactionError> {
    let bytes = reversed_hex_to_bytes(display_hex)?;
    <[u8; 32]>::try_from(bytes.as_slice()).map_err(|_| {
        TransactionError::Serialization(format!(
            "asset id must be 32 bytes, got {}",
            bytes.len()
        ))
    })
}

fn add_inputs(tx: &mut Transaction, utxos: &[Utxo]) -> Result<(), TransactionError> {
    for utxo in utxos {
        let bytes = hex_to_bytes(&utxo.hash)?;
        let prev_hash = <[u8; 32]>::try_from(bytes.as_slice()).map_err(|_| {
            TransactionError::Serialization(format!(
                "utxo hash must be 32 bytes, got {}",
                bytes.len()
            ))
        })?;
        tx.add_input(TransactionInput::new(prev_hash, utxo.index));
    }
    Ok(())
}

fn sign_and_serialize(
    mut tx: Transaction,
    params: &CreateSignParams,
) -> Result<String, TransactionError> {
    let key = PrivateKey::from_wif(&params.private_key_wif)?;
    let signature = key.sign(&tx.serialize_unsigned())?;
    tx.add_witness(&signature, &key.pub_key(), &params.from_address)?;

    debug!(
        tx_type = %tx.tx_type(),
        inputs = tx.inputs.len(),
        outputs = tx.outputs.len(),
        hash = %tx.tx_id_hex(),
        "built signed transaction"
    );
    Ok(tx.to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo_script::opcodes::{OP_APPCALL, OP_PUSH3};

    const NEP5_HASH: &str = "c88acaae8a0362cdbdedddf0083c452a3a8bb7b8";
    const SAMPLE_ADDRESS: &str = "ARbjp1wPh5XJchZpSjqHzGVQnnpTxNR1x7";
    const OTHER_ADDRESS: &str = "APxpKoFCfBk8RjkRdKwyUnsBntDRXLYAZc";

    #[test]
    fn test_transfer_invocation_layout() {
        let script =
            build_transfer_invocation(NEP5_HASH, SAMPLE_ADDRESS, OTHER_ADDRESS, &BigInt::from(5))
                .unwrap();
        let bytes = script.to_bytes();

        let from = address_to_script_hash(SAMPLE_ADDRESS).unwrap();
        let to = address_to_script_hash(OTHER_ADDRESS).unwrap();
        let mut expected = vec![0x01, 0x05, 0x14];
        expected.extend_from_slice(&to);
        expected.push(0x14);
        expected.extend_from_slice(&from);
        expected.extend_from_slice(&[OP_PUSH3, OP_PACK, 0x08]);
        expected.extend_from_slice(b"transfer");
        expected.push(OP_APPCALL);
        let mut hash = hex::decode(NEP5_HASH).unwrap();
        hash.reverse();
        expected.extend_from_slice(&hash);

        assert_eq!(bytes, expected.as_slice());
    }

    #[test]
    fn test_transfer_invocation_rejects_bad_inputs() {
        assert!(build_transfer_invocation("c88a", SAMPLE_ADDRESS, OTHER_ADDRESS, &BigInt::from(1))
            .is_err());
        assert!(build_transfer_invocation(NEP5_HASH, "nope", OTHER_ADDRESS, &BigInt::from(1))
            .is_err());
    }

    #[test]
    fn test_sum_utxos_overflow() {
        let utxos = vec![
            Utxo { hash: String::new(), value: u64::MAX, index: 0 },
            Utxo { hash: String::new(), value: 1, index: 1 },
        ];
        assert!(matches!(sum_utxos(&utxos), Err(TransactionError::AmountOverflow)));
    }

    #[test]
    fn test_parse_asset_id_reverses() {
        let display = format!("{}ff", "00".repeat(31));
        let wire = parse_asset_id(&display).unwrap();
        assert_eq!(wire[0], 0xff);
        assert!(parse_asset_id("abcd").is_err());
    }
}
