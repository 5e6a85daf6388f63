//! Tests for the neo-transaction crate.
//!
//! Covers the wire format byte-for-byte, decode/encode round trips with
//! every attribute class, witness attachment rules, and the end-to-end
//! builder scenarios.

use num_bigint::{BigInt, Sign};

use neo_primitives::ec::PrivateKey;
use neo_script::opcodes::{OP_APPCALL, OP_TAILCALL};
use neo_script::{address_to_script_hash, Address, ParamValue, Script, ScriptBuilder};

use crate::attribute::{usage, TransactionAttribute};
use crate::builder::{
    build_transfer_invocation, create_contract_transaction, create_invocation_transaction,
    create_transaction, CreateSignParams, Utxo, DEFAULT_INVOCATION_GAS,
};
use crate::fixed8::Fixed8;
use crate::input::TransactionInput;
use crate::output::TransactionOutput;
use crate::transaction::{InvocationPayload, Transaction, TransactionKind, TransactionType};
use crate::TransactionError;

const SAMPLE_WIF: &str = "L4RmQvd6PVzBTgYLpYagknNjhZxsHBbJq4ky7Zd3vB7AguSM7gF1";
const SAMPLE_ADDRESS: &str = "ARbjp1wPh5XJchZpSjqHzGVQnnpTxNR1x7";
const OTHER_ADDRESS: &str = "APxpKoFCfBk8RjkRdKwyUnsBntDRXLYAZc";
const NEO_ASSET_ID: &str = "c56f33fc6ecfcd0c225c4ab356fee59390af8560be0e930faebe74a6daff7c9b";
const UTXO_HASH: &str = "b80f65fc5c0cc9a24ae2d613770202aae95dfa598f6541f75987b747eb5ca830";
const NEP5_HASH: &str = "c88acaae8a0362cdbdedddf0083c452a3a8bb7b8";

fn params(
    transaction_type: TransactionType,
    key: &PrivateKey,
    to: &str,
    amount: u64,
    utxos: Vec<Utxo>,
) -> CreateSignParams {
    CreateSignParams {
        transaction_type,
        version: 0,
        private_key_wif: key.to_wif(),
        from_address: Address::from_public_key(&key.pub_key()).address_string,
        to_address: to.to_string(),
        asset_id: NEO_ASSET_ID.to_string(),
        amount,
        extension_script: Script::new(),
        utxos,
    }
}

fn utxo(value: u64) -> Utxo {
    Utxo {
        hash: UTXO_HASH.to_string(),
        value,
        index: 0,
    }
}

fn sample_contract_tx() -> Transaction {
    let mut tx = Transaction::new_contract();
    tx.add_input(TransactionInput::new([0x11; 32], 1));
    tx.add_output(TransactionOutput::new([0x22; 32], Fixed8(1), [0x33; 20]));
    tx
}

// -----------------------------------------------------------------------
// Wire format
// -----------------------------------------------------------------------

#[test]
fn test_contract_wire_layout() {
    let tx = sample_contract_tx();
    // type, version, no attributes, one input, one output
    let expected_unsigned = format!(
        "80000001{}010001{}0100000000000000{}",
        "11".repeat(32),
        "22".repeat(32),
        "33".repeat(20)
    );
    assert_eq!(hex::encode(tx.serialize_unsigned()), expected_unsigned);
    assert_eq!(tx.to_hex(), format!("{}00", expected_unsigned));
}

#[test]
fn test_invocation_wire_layout() {
    let tx = Transaction::new_invocation(Script::from_hex("51").unwrap(), Fixed8(1_0000_0000));
    assert_eq!(
        hex::encode(tx.serialize_unsigned()),
        "d101015100e1f50500000000000000"
    );
}

#[test]
fn test_invocation_version_zero_omits_gas() {
    let mut tx =
        Transaction::new_invocation(Script::from_hex("51").unwrap(), Fixed8(1_0000_0000));
    tx.set_version(0);
    let bytes = tx.serialize_unsigned();
    assert_eq!(hex::encode(&bytes), "d1000151000000");

    let decoded = Transaction::from_unsigned_bytes(&bytes).unwrap();
    assert_eq!(decoded, tx);
    match decoded.kind() {
        TransactionKind::Invocation(payload) => {
            assert_eq!(payload.script.to_hex(), "51");
            assert_eq!(payload.gas, Fixed8::ZERO);
        }
        other => panic!("expected invocation, got {:?}", other),
    }
}

#[test]
fn test_version_zero_invocation_with_gas_roundtrips() {
    let mut tx =
        Transaction::new_invocation(Script::from_hex("51").unwrap(), Fixed8(1_0000_0000));
    tx.set_version(0);
    tx.add_input(TransactionInput::new([0x11; 32], 0));
    tx.add_output(TransactionOutput::new([0x22; 32], Fixed8(5), [0x33; 20]));

    let decoded = Transaction::from_bytes(&tx.to_bytes()).unwrap();
    assert_eq!(decoded, tx);
    assert_eq!(decoded.to_bytes(), tx.to_bytes());

    let direct = Transaction::new(
        TransactionKind::Invocation(InvocationPayload {
            script: Script::from_hex("51").unwrap(),
            gas: Fixed8(7),
        }),
        0,
    );
    assert_eq!(
        Transaction::from_unsigned_bytes(&direct.serialize_unsigned()).unwrap(),
        direct
    );
}

#[test]
fn test_raising_version_keeps_zeroed_gas() {
    let mut tx =
        Transaction::new_invocation(Script::from_hex("51").unwrap(), Fixed8(1_0000_0000));
    tx.set_version(0);
    tx.set_version(1);
    assert_eq!(tx.version(), 1);
    match tx.kind() {
        TransactionKind::Invocation(payload) => assert_eq!(payload.gas, Fixed8::ZERO),
        other => panic!("expected invocation, got {:?}", other),
    }
}

// -----------------------------------------------------------------------
// Round trips
// -----------------------------------------------------------------------

fn every_attribute_class() -> Vec<TransactionAttribute> {
    let mut ecdh02 = vec![usage::ECDH02];
    ecdh02.extend_from_slice(&[0x02; 32]);
    let mut ecdh03 = vec![usage::ECDH03];
    ecdh03.extend_from_slice(&[0x03; 32]);

    vec![
        TransactionAttribute::new(usage::CONTRACT_HASH, vec![0xc0; 32]).unwrap(),
        TransactionAttribute::new(usage::ECDH02, ecdh02).unwrap(),
        TransactionAttribute::new(usage::ECDH03, ecdh03).unwrap(),
        TransactionAttribute::new(usage::SCRIPT, vec![0x5c; 20]).unwrap(),
        TransactionAttribute::new(usage::VOTE, vec![0x70; 32]).unwrap(),
        TransactionAttribute::new(usage::DESCRIPTION_URL, b"https://example.org".to_vec())
            .unwrap(),
        TransactionAttribute::new(usage::DESCRIPTION, b"payment".to_vec()).unwrap(),
        TransactionAttribute::new(usage::HASH1, vec![0xa1; 32]).unwrap(),
        TransactionAttribute::new(usage::HASH15, vec![0xaf; 32]).unwrap(),
        TransactionAttribute::new(usage::REMARK, b"remark".to_vec()).unwrap(),
        TransactionAttribute::new(0xff, vec![0xee; 300]).unwrap(),
    ]
}

#[test]
fn test_roundtrip_with_every_attribute_class() {
    let mut tx = sample_contract_tx();
    for attribute in every_attribute_class() {
        tx.add_attribute(attribute);
    }
    tx.add_output(TransactionOutput::new([0x44; 32], Fixed8(u64::MAX), [0x55; 20]));

    let decoded = Transaction::from_bytes(&tx.to_bytes()).unwrap();
    assert_eq!(decoded, tx);
    assert_eq!(decoded.attributes.len(), 11);
    assert_eq!(decoded.outputs.len(), 2);
    assert!(decoded.witnesses.is_empty());

    let from_unsigned = Transaction::from_unsigned_bytes(&tx.serialize_unsigned()).unwrap();
    assert_eq!(from_unsigned, tx);
}

#[test]
fn test_hex_roundtrip_signed() {
    let key = PrivateKey::from_wif(SAMPLE_WIF).unwrap();
    let mut tx = sample_contract_tx();
    assert!(tx.sign(&key).unwrap());

    let decoded = Transaction::from_hex(&tx.to_hex()).unwrap();
    assert_eq!(decoded, tx);
    assert_eq!(decoded.witnesses[0].address().address_string, SAMPLE_ADDRESS);
    assert_eq!(format!("{}", decoded), tx.to_hex());
}

// -----------------------------------------------------------------------
// Decoding errors
// -----------------------------------------------------------------------

#[test]
fn test_decode_rejects_unsupported_types() {
    for type_byte in [0x00u8, 0x01, 0x02, 0x20, 0x40, 0xd0, 0x99] {
        let bytes = [type_byte, 0x00, 0x00, 0x00, 0x00, 0x00];
        assert!(matches!(
            Transaction::from_bytes(&bytes),
            Err(TransactionError::UnsupportedType(b)) if b == type_byte
        ));
    }
}

#[test]
fn test_decode_rejects_trailing_bytes() {
    let mut bytes = sample_contract_tx().to_bytes();
    bytes.push(0x00);
    assert!(matches!(
        Transaction::from_bytes(&bytes),
        Err(TransactionError::Serialization(msg)) if msg.contains("trailing 1 bytes")
    ));
}

#[test]
fn test_decode_rejects_oversized_counts() {
    // attribute count 0x10000
    let bytes = [0x80, 0x00, 0xfe, 0x00, 0x00, 0x01, 0x00];
    assert!(matches!(
        Transaction::from_bytes(&bytes),
        Err(TransactionError::Serialization(_))
    ));
}

#[test]
fn test_decode_truncated() {
    let bytes = sample_contract_tx().to_bytes();
    for cut in [0, 1, 3, 20, bytes.len() - 1] {
        assert!(Transaction::from_bytes(&bytes[..cut]).is_err(), "cut at {}", cut);
    }
    assert!(Transaction::from_hex("80zz").is_err());
}

// -----------------------------------------------------------------------
// Witnesses
// -----------------------------------------------------------------------

#[test]
fn test_witness_is_additive() {
    let key = PrivateKey::new();
    let mut tx = sample_contract_tx();
    let unsigned = tx.serialize_unsigned();
    let hash = tx.hash();

    assert!(tx.sign(&key).unwrap());

    assert_eq!(tx.serialize_unsigned(), unsigned);
    assert_eq!(tx.hash(), hash);
    let signed = tx.to_bytes();
    assert_eq!(&signed[..unsigned.len()], unsigned.as_slice());
    assert_eq!(signed[unsigned.len()], 0x01);
}

#[test]
fn test_add_witness_scripts() {
    let key = PrivateKey::new();
    let pub_key = key.pub_key();
    let mut tx = sample_contract_tx();
    let signature = key.sign(&tx.serialize_unsigned()).unwrap();
    let address = Address::from_public_key(&pub_key);

    assert!(tx.add_witness(&signature, &pub_key, &address.address_string).unwrap());

    let witness = &tx.witnesses[0];
    assert_eq!(witness.verification_script, Script::from_public_key(&pub_key));
    let invocation = witness.invocation_script.to_bytes();
    assert_eq!(invocation.len(), 65);
    assert_eq!(invocation[0], 0x40);
    assert_eq!(&invocation[1..], &signature.to_bytes()[..]);
    assert!(!witness.is_smart_contract());
}

#[test]
fn test_add_witness_rejects_bad_signature() {
    let key = PrivateKey::new();
    let other = PrivateKey::new();
    let mut tx = sample_contract_tx();
    let signature = other.sign(&tx.serialize_unsigned()).unwrap();
    let address = Address::from_public_key(&key.pub_key());

    assert!(matches!(
        tx.add_witness(&signature, &key.pub_key(), &address.address_string),
        Err(TransactionError::InvalidSignature)
    ));
    assert!(tx.witnesses.is_empty());
}

#[test]
fn test_add_witness_rejects_address_mismatch() {
    let key = PrivateKey::new();
    let mut tx = sample_contract_tx();
    let signature = key.sign(&tx.serialize_unsigned()).unwrap();

    assert!(matches!(
        tx.add_witness(&signature, &key.pub_key(), OTHER_ADDRESS),
        Err(TransactionError::AddressMismatch { expected, .. }) if expected == OTHER_ADDRESS
    ));
    assert!(tx.witnesses.is_empty());
}

#[test]
fn test_duplicate_signer_not_added() {
    let key = PrivateKey::new();
    let mut tx = sample_contract_tx();
    assert!(tx.sign(&key).unwrap());
    assert!(!tx.sign(&key).unwrap());
    assert_eq!(tx.witnesses.len(), 1);

    // a second signer is accepted
    assert!(tx.sign(&PrivateKey::new()).unwrap());
    assert_eq!(tx.witnesses.len(), 2);
}

#[test]
fn test_add_witness_script_duplicate() {
    let mut tx = sample_contract_tx();
    let verification = Script::from_hex("51").unwrap();
    assert!(tx.add_witness_script(verification.clone(), Script::new()));
    assert!(!tx.add_witness_script(verification, Script::from_hex("00").unwrap()));
    assert!(tx.witnesses[0].is_smart_contract());
}

// -----------------------------------------------------------------------
// Scenario A: exact spend, no change
// -----------------------------------------------------------------------

#[test]
fn test_contract_transaction_exact_amount() {
    let key = PrivateKey::new();
    let p = params(TransactionType::Contract, &key, OTHER_ADDRESS, 500, vec![utxo(500)]);

    let hex_str = create_contract_transaction(&p).unwrap();
    assert_eq!(hex_str, hex_str.to_lowercase());

    let tx = Transaction::from_hex(&hex_str).unwrap();
    assert_eq!(tx.tx_type(), TransactionType::Contract);
    assert_eq!(tx.outputs.len(), 1);
    assert_eq!(tx.witnesses.len(), 1);
    assert_eq!(tx.outputs[0].value, Fixed8(500));
    assert_eq!(
        tx.outputs[0].script_hash,
        address_to_script_hash(OTHER_ADDRESS).unwrap()
    );

    let mut asset = hex::decode(NEO_ASSET_ID).unwrap();
    asset.reverse();
    assert_eq!(tx.outputs[0].asset_id.as_slice(), asset.as_slice());

    assert_eq!(tx.inputs.len(), 1);
    assert_eq!(hex::encode(tx.inputs[0].prev_hash), UTXO_HASH);
    assert_eq!(tx.witnesses[0].address().address_string, p.from_address);
}

// -----------------------------------------------------------------------
// Scenario B: change goes to the destination
// -----------------------------------------------------------------------

#[test]
fn test_contract_transaction_change_output_to_destination() {
    let key = PrivateKey::from_wif(SAMPLE_WIF).unwrap();
    let p = params(
        TransactionType::Contract,
        &key,
        OTHER_ADDRESS,
        1_0000_0000,
        vec![utxo(100_0000_0000)],
    );
    assert_eq!(p.from_address, SAMPLE_ADDRESS);

    let tx = Transaction::from_hex(&create_contract_transaction(&p).unwrap()).unwrap();
    let to = address_to_script_hash(OTHER_ADDRESS).unwrap();
    assert_eq!(tx.outputs.len(), 2);
    assert_eq!(tx.outputs[0].value, Fixed8(1_0000_0000));
    assert_eq!(tx.outputs[1].value, Fixed8(99_0000_0000));
    assert_eq!(tx.outputs[0].script_hash, to);
    assert_eq!(tx.outputs[1].script_hash, to);
}

#[test]
fn test_contract_transaction_insufficient_funds() {
    let key = PrivateKey::new();
    let p = params(TransactionType::Contract, &key, OTHER_ADDRESS, 501, vec![utxo(200), utxo(300)]);
    assert!(matches!(
        create_contract_transaction(&p),
        Err(TransactionError::InsufficientFunds { available: 500, required: 501 })
    ));
}

#[test]
fn test_contract_transaction_wrong_sender() {
    let key = PrivateKey::new();
    let mut p = params(TransactionType::Contract, &key, OTHER_ADDRESS, 1, vec![utxo(1)]);
    p.from_address = SAMPLE_ADDRESS.to_string();
    assert!(matches!(
        create_contract_transaction(&p),
        Err(TransactionError::AddressMismatch { .. })
    ));
}

#[test]
fn test_contract_transaction_bad_inputs() {
    let key = PrivateKey::new();

    let mut p = params(TransactionType::Contract, &key, "notanaddress", 1, vec![utxo(1)]);
    assert!(matches!(create_contract_transaction(&p), Err(TransactionError::Script(_))));

    p.to_address = OTHER_ADDRESS.to_string();
    p.private_key_wif = "L4RmQvd6PVzBTgYLpYagknNjhZxsHBbJq4ky7Zd3vB7AguSM7gF2".to_string();
    assert!(create_contract_transaction(&p).is_err());

    let mut p = params(TransactionType::Contract, &key, OTHER_ADDRESS, 1, vec![utxo(1)]);
    p.utxos[0].hash = "abcd".to_string();
    assert!(matches!(
        create_contract_transaction(&p),
        Err(TransactionError::Serialization(_))
    ));
}

// -----------------------------------------------------------------------
// Invocation transactions
// -----------------------------------------------------------------------

#[test]
fn test_invocation_transaction_returns_funds_to_sender() {
    let key = PrivateKey::from_wif(SAMPLE_WIF).unwrap();
    let script =
        build_transfer_invocation(NEP5_HASH, SAMPLE_ADDRESS, OTHER_ADDRESS, &BigInt::from(10))
            .unwrap();
    let mut p = params(
        TransactionType::Invocation,
        &key,
        OTHER_ADDRESS,
        0,
        vec![utxo(700), utxo(300)],
    );
    p.version = 1;
    p.extension_script = script.clone();

    let tx = Transaction::from_hex(&create_invocation_transaction(&p).unwrap()).unwrap();
    assert_eq!(tx.version(), 1);
    assert_eq!(tx.inputs.len(), 2);
    assert_eq!(tx.outputs.len(), 1);
    assert_eq!(tx.outputs[0].value, Fixed8(1000));
    assert_eq!(
        tx.outputs[0].script_hash,
        address_to_script_hash(SAMPLE_ADDRESS).unwrap()
    );
    match tx.kind() {
        TransactionKind::Invocation(payload) => {
            assert_eq!(payload.script, script);
            assert_eq!(payload.gas, DEFAULT_INVOCATION_GAS);
        }
        other => panic!("expected invocation, got {:?}", other),
    }
    assert_eq!(tx.witnesses.len(), 1);
}

#[test]
fn test_version_zero_invocation_transaction_decodes_to_itself() {
    let key = PrivateKey::from_wif(SAMPLE_WIF).unwrap();
    let mut p = params(
        TransactionType::Invocation,
        &key,
        OTHER_ADDRESS,
        0,
        vec![utxo(1000)],
    );
    p.version = 0;
    p.extension_script = Script::from_hex("51").unwrap();

    let hex_str = create_invocation_transaction(&p).unwrap();
    let tx = Transaction::from_hex(&hex_str).unwrap();
    assert_eq!(tx.version(), 0);
    match tx.kind() {
        TransactionKind::Invocation(payload) => assert_eq!(payload.gas, Fixed8::ZERO),
        other => panic!("expected invocation, got {:?}", other),
    }
    assert_eq!(tx.to_hex(), hex_str);
    assert_eq!(tx.witnesses.len(), 1);
    assert_eq!(tx.witnesses[0].address().address_string, SAMPLE_ADDRESS);
}

#[test]
fn test_invocation_transaction_requires_funds() {
    let key = PrivateKey::new();
    let p = params(TransactionType::Invocation, &key, OTHER_ADDRESS, 0, vec![]);
    assert!(matches!(
        create_invocation_transaction(&p),
        Err(TransactionError::NoFunds)
    ));
    let p = params(TransactionType::Invocation, &key, OTHER_ADDRESS, 0, vec![utxo(0)]);
    assert!(matches!(
        create_invocation_transaction(&p),
        Err(TransactionError::NoFunds)
    ));
}

// -----------------------------------------------------------------------
// Dispatch and JSON parameters
// -----------------------------------------------------------------------

#[test]
fn test_create_transaction_from_json() {
    let json = format!(
        r#"{{
            "transactionType": "contract",
            "version": 0,
            "privateKeyWIF": "{}",
            "fromAddress": "{}",
            "toAddress": "{}",
            "assetId": "{}",
            "amount": 100000000,
            "utxos": [{{"hash": "{}", "value": 10000000000, "index": 0}}]
        }}"#,
        SAMPLE_WIF, SAMPLE_ADDRESS, OTHER_ADDRESS, NEO_ASSET_ID, UTXO_HASH
    );
    let p: CreateSignParams = serde_json::from_str(&json).unwrap();
    assert!(p.extension_script.is_empty());

    let tx = Transaction::from_hex(&create_transaction(&p).unwrap()).unwrap();
    assert_eq!(tx.tx_type(), TransactionType::Contract);
    assert_eq!(tx.outputs.len(), 2);
}

#[test]
fn test_params_json_roundtrip() {
    let key = PrivateKey::new();
    let mut p = params(TransactionType::Invocation, &key, OTHER_ADDRESS, 0, vec![utxo(1)]);
    p.extension_script = Script::from_hex("51c1").unwrap();

    let json = serde_json::to_string(&p).unwrap();
    assert!(json.contains(r#""extensionScript":"51c1""#));
    assert!(json.contains(r#""transactionType":"invocation""#));
    assert!(json.contains("privateKeyWIF"));
    let back: CreateSignParams = serde_json::from_str(&json).unwrap();
    assert_eq!(back, p);
}

#[test]
fn test_create_transaction_unsupported_type() {
    let key = PrivateKey::new();
    let p = params(TransactionType::Claim, &key, OTHER_ADDRESS, 0, vec![utxo(1)]);
    assert!(matches!(
        create_transaction(&p),
        Err(TransactionError::UnsupportedType(0x02))
    ));
}

// -----------------------------------------------------------------------
// Scenario C: application call hash length
// -----------------------------------------------------------------------

#[test]
fn test_app_call_with_20_byte_hash() {
    let hash = [0x7au8; 20];

    let mut sb = ScriptBuilder::new();
    sb.emit_app_call(&hash, false);
    assert_eq!(sb.as_bytes()[0], OP_APPCALL);
    assert_eq!(&sb.as_bytes()[1..], &hash);

    let mut sb = ScriptBuilder::new();
    sb.emit_app_call(&hash, true);
    assert_eq!(sb.as_bytes()[0], OP_TAILCALL);
    assert_eq!(&sb.as_bytes()[1..], &hash);
}

#[test]
#[should_panic(expected = "app call script hash must be 20 bytes")]
fn test_app_call_with_19_byte_hash_panics() {
    ScriptBuilder::new().emit_app_call(&[0x7a; 19], false);
}

// -----------------------------------------------------------------------
// Scenario D: typed integer parameter
// -----------------------------------------------------------------------

#[test]
fn test_typed_integer_param_pushes_magnitude() {
    let mut sb = ScriptBuilder::new();
    sb.emit_push_param(&ParamValue::typed("integer", "255")).unwrap();
    let bytes = sb.as_bytes();

    assert_eq!(bytes[0] as usize, bytes.len() - 1);
    let value = BigInt::from_bytes_be(Sign::Plus, &bytes[1..]);
    assert_eq!(value, BigInt::from(255));
}
