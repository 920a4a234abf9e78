//! Tests for the chainsig-transaction crate.
//!
//! Wire-format vectors are real transactions. Digest vectors use the
//! unsigned transaction of the BIP143 native P2WPKH example, whose
//! midstates and input-1 digest are published, and whose input 0 is a
//! legacy pay-to-pubkey spend.

use chainsig_primitives::chainhash::Hash;
use chainsig_script::{Chain, Script};

use crate::input::{TransactionInput, DEFAULT_SEQUENCE_NUMBER};
use crate::output::TransactionOutput;
use crate::sighash::{self, BaseMode, SigHashes, SighashCache, SighashFlags};
use crate::transaction::Transaction;
use crate::TransactionError;

// -----------------------------------------------------------------------
// Vectors
// -----------------------------------------------------------------------

/// A signed one-input, two-output transaction.
const SOURCE_RAW_TX: &str = "010000000138c7c61c14ffb063c3bb2664041a3e29ea6ea0412a0c18ff725ba4e9e12afae2030000006a47304402203e9ab8e4c14addf3b4741540b556cfb0e0efb67dc1a7b5ce84c3ac56b3fd447802203c9f49f7bd893ebd7060176dfc36bcaff9d2c443d9a0dd6cd2d59b372c024d20412102798913bc057b344de675dac34faafe3dc2f312c758cd9068209f810877306d66ffffffff02dc050000000000002076a914eb0bd5edba389198e73f8efabddfc61666969ff788ac6a0568656c6c6faa0d0000000000001976a914eb0bd5edba389198e73f8efabddfc61666969ff788ac00000000";

/// A three-input transaction with a non-zero lock time.
const MULTI_INPUT_TX_HEX: &str = "0200000003a9bc457fdc6a54d99300fb137b23714d860c350a9d19ff0f571e694a419ff3a0010000006b48304502210086c83beb2b2663e4709a583d261d75be538aedcafa7766bd983e5c8db2f8b2fc02201a88b178624ab0ad1748b37c875f885930166237c88f5af78ee4e61d337f935f412103e8be830d98bb3b007a0343ee5c36daa48796ae8bb57946b1e87378ad6e8a090dfeffffff0092bb9a47e27bf64fc98f557c530c04d9ac25e2f2a8b600e92a0b1ae7c89c20010000006b483045022100f06b3db1c0a11af348401f9cebe10ae2659d6e766a9dcd9e3a04690ba10a160f02203f7fbd7dfcfc70863aface1a306fcc91bbadf6bc884c21a55ef0d32bd6b088c8412103e8be830d98bb3b007a0343ee5c36daa48796ae8bb57946b1e87378ad6e8a090dfeffffff9d0d4554fa692420a0830ca614b6c60f1bf8eaaa21afca4aa8c99fb052d9f398000000006b483045022100d920f2290548e92a6235f8b2513b7f693a64a0d3fa699f81a034f4b4608ff82f0220767d7d98025aff3c7bd5f2a66aab6a824f5990392e6489aae1e1ae3472d8dffb412103e8be830d98bb3b007a0343ee5c36daa48796ae8bb57946b1e87378ad6e8a090dfeffffff02807c814a000000001976a9143a6bf34ebfcf30e8541bbb33a7882845e5a29cb488ac76b0e60e000000001976a914bd492b67f90cb85918494767ebb23102c4f06b7088ac67000000";

/// Unsigned two-input transaction from the BIP143 native P2WPKH example.
const BIP143_TX: &str = "0100000002fff7f7881a8099afa6940d42d1e7f6362bec38171ea3edf433541db4e4ad969f0000000000eeffffffef51e1b804cc89d182d279655c3aa89e815b1b309fe287d9b2b55d57b90ec68a0100000000ffffffff02202cb206000000001976a9148280b37df378db99f66f85c95a783a76ac7a6d5988ac9093510d000000001976a9143bde42dbee7e4dbe6a21b2d50ce2f0167faa815988ac11000000";

/// Script code of BIP143 input 0 (pay-to-pubkey).
const BIP143_P2PK: &str = "2103c9f4836b9a4f77fc0d81f7bcb01b7f1b35916864b9476c241ce9fc198bd25432ac";

/// Script code of BIP143 input 1 (P2PKH form of the witness key hash).
const BIP143_SCRIPT_CODE: &str = "76a9141d0f172a0ecb48aee1be1f2687d2963ae33f71a188ac";

/// Value spent by BIP143 input 1.
const BIP143_VALUE: i64 = 600_000_000;

/// Key hash used by the single-input vectors.
const PKH: &str = "00ac6144c4db7b5790f343cf0477a65fb8a02eb7";

fn script(hex_str: &str) -> Script {
    Script::from_hex(hex_str).expect("valid script hex")
}

fn bip143_tx() -> Transaction {
    Transaction::from_hex(BIP143_TX).expect("valid BIP143 tx")
}

/// One input spending `9f96...:0`, one 90000-satoshi P2PKH output.
fn single_input_tx(with_output: bool) -> Transaction {
    let prev = Hash::from_hex("fff7f7881a8099afa6940d42d1e7f6362bec38171ea3edf433541db4e4ad969f")
        .expect("valid hash");
    let mut tx = Transaction::new();
    tx.add_input(TransactionInput::new(prev, 0));
    if with_output {
        tx.add_output(TransactionOutput::new(90_000, p2pkh_script()));
    }
    tx
}

fn p2pkh_script() -> Script {
    script(&format!("76a914{}88ac", PKH))
}

fn flags(raw: u32) -> SighashFlags {
    SighashFlags::from_raw(raw).expect("valid sighash type")
}

// -----------------------------------------------------------------------
// Transaction parsing and serialization
// -----------------------------------------------------------------------

/// Parse and re-serialize a signed transaction byte-for-byte.
#[test]
fn test_from_hex_roundtrip() {
    let tx = Transaction::from_hex(SOURCE_RAW_TX).expect("should parse source tx hex");
    assert_eq!(tx.version, 1);
    assert_eq!(tx.input_count(), 1);
    assert_eq!(tx.output_count(), 2);
    assert_eq!(tx.outputs[0].value, 1500);
    assert_eq!(tx.inputs[0].sequence_number, DEFAULT_SEQUENCE_NUMBER);
    assert_eq!(tx.to_hex(), SOURCE_RAW_TX);
}

/// Parse and re-serialize a three-input transaction.
#[test]
fn test_multi_input_roundtrip() {
    let tx = Transaction::from_hex(MULTI_INPUT_TX_HEX).expect("should parse multi-input tx");
    assert_eq!(tx.version, 2);
    assert_eq!(tx.input_count(), 3);
    assert_eq!(tx.lock_time, 103);
    assert_eq!(tx.inputs[0].sequence_number, 0xffff_fffe);
    assert_eq!(tx.to_hex(), MULTI_INPUT_TX_HEX);
}

/// Building the single-input vector by hand gives the expected wire bytes.
#[test]
fn test_built_transaction_serialization() {
    let tx = single_input_tx(true);
    assert_eq!(
        tx.to_hex(),
        "01000000019f96ade4b41d5433f4eda31e1738ec2b36f6e7d1420d94a6af99801a88f7f7ff0000000000ffffffff01905f0100000000001976a91400ac6144c4db7b5790f343cf0477a65fb8a02eb788ac00000000"
    );
    assert_eq!(
        tx.tx_id().to_string(),
        "bf36917ab770ca3782f31fa01aca2940b6a8f2e4afe182a980e4644b846f2330"
    );
    assert_eq!(tx.size(), tx.to_bytes().len());
}

#[test]
fn test_trailing_bytes_error() {
    let extended = format!("{}deadbeef", SOURCE_RAW_TX);
    assert!(matches!(
        Transaction::from_hex(&extended),
        Err(TransactionError::SerializationError(_))
    ));
}

#[test]
fn test_invalid_input_errors() {
    assert!(Transaction::from_hex("not_valid_hex").is_err());
    assert!(Transaction::from_bytes(&[]).is_err());
    // Claims 0xfc inputs with nothing behind the count.
    assert!(Transaction::from_hex("01000000fc").is_err());
}

/// A script length prefix larger than the data is rejected, not truncated.
#[test]
fn test_oversized_script_length_errors() {
    let outpoint = format!("01{}00000000", "00".repeat(32));
    let huge = format!("ff{}", "ff".repeat(8));

    let input_script = format!("01000000{}{}", outpoint, huge);
    assert!(matches!(
        Transaction::from_hex(&input_script),
        Err(TransactionError::SerializationError(_))
    ));

    let output_script = format!("01000000{}00ffffffff01{}{}", outpoint, "00".repeat(8), huge);
    assert!(matches!(
        Transaction::from_hex(&output_script),
        Err(TransactionError::SerializationError(_))
    ));
}

/// Transactions serialize as their hex form.
#[test]
fn test_serde_hex() {
    let tx = bip143_tx();
    let json = serde_json::to_string(&tx).expect("serializes");
    assert_eq!(json, format!("\"{}\"", BIP143_TX));
    let back: Transaction = serde_json::from_str(&json).expect("deserializes");
    assert_eq!(back, tx);
}

// -----------------------------------------------------------------------
// Midstates
// -----------------------------------------------------------------------

/// Midstates match the values published with the BIP143 example.
#[test]
fn test_sighashes_published_values() {
    let hashes = SigHashes::new(&bip143_tx());
    assert_eq!(
        hex::encode(hashes.hash_prevouts),
        "96b827c8483d4e9b96712b6713a7b68d6e8003a781feba36c31143470b4efd37"
    );
    assert_eq!(
        hex::encode(hashes.hash_sequence),
        "52b0a642eea2fb7ae638c36f6252b6750293dbe574a806984b8e4d8548339a3b"
    );
    assert_eq!(
        hex::encode(hashes.hash_outputs),
        "863ef3e1a92afbfdb97f31ad0fc7683ee943e9abcf2501590ff8f6551f47e5e5"
    );
}

/// hashPrevouts and hashSequence appear unchanged in the pre-image of every input.
#[test]
fn test_midstates_shared_across_inputs() {
    let tx = bip143_tx();
    let cache = SighashCache::new(&tx);
    let code = script(BIP143_SCRIPT_CODE);
    let first = cache.fork_id_preimage(0, &code, SighashFlags::ALL, 1).unwrap();
    let second = cache.fork_id_preimage(1, &code, SighashFlags::ALL, 1).unwrap();
    assert_eq!(&first[4..36], &cache.hashes().hash_prevouts);
    assert_eq!(&first[4..68], &second[4..68]);
    assert_ne!(first, second);
}

// -----------------------------------------------------------------------
// Fork-id digest
// -----------------------------------------------------------------------

/// With the plain flag word the pre-image is the BIP143 one.
#[test]
fn test_bip143_published_digest() {
    let tx = bip143_tx();
    let preimage = sighash::bip143_preimage(
        &tx,
        1,
        &script(BIP143_SCRIPT_CODE),
        SighashFlags::ALL,
        BIP143_VALUE,
    );
    assert_eq!(
        hex::encode(chainsig_primitives::hash::sha256d(&preimage)),
        "c37af31116d1b27caf68aae9e3ac82f1477929014d5b917657d0eb49478cb670"
    );
}

/// Fork-id digests of BIP143 input 1 across every flag combination.
#[test]
fn test_fork_id_flag_vectors() {
    let tx = bip143_tx();
    let cache = SighashCache::new(&tx);
    let code = script(BIP143_SCRIPT_CODE);
    let vectors = [
        (0x01, "467f411d178762db122a6aced76370a1c8324355bf0796502bf82eeaeda86a35"),
        (0x02, "c0876aa9dfd131ac207be062e389741416a87a5d1b28e4857c178990454dd498"),
        (0x03, "abb61ba86e14313425d25846ed3a30904de1f081e013d80c385e165c2af1e020"),
        (0x81, "a5890ce40dc95a89717ae6fa3c9d60bcf9372539058c7e9a0cd8ff7909723326"),
        (0x82, "e58ebfd50f957a45c5f68439e55c6ae6054a3310ff2a116efa07d2bda2527bd3"),
        (0x83, "4e303851715b6ee36582740f43cc288c969e88afc641f14e3e8e68d32c406c1b"),
    ];
    for (raw, expected) in vectors {
        let digest = cache
            .fork_id_digest(1, &code, flags(raw), BIP143_VALUE)
            .expect("digest");
        assert_eq!(hex::encode(digest), expected, "flags {:#x}", raw);
    }
}

/// The fork-id bit always lands in the serialized flag word.
#[test]
fn test_fork_id_flag_word() {
    let tx = single_input_tx(true);
    let preimage =
        sighash::calc_preimage(&tx, 0, &p2pkh_script(), SighashFlags::ALL, 100_000).unwrap();
    assert_eq!(&preimage[preimage.len() - 4..], &[0x41, 0, 0, 0]);
    assert_eq!(
        hex::encode(&preimage),
        "0100000075c9120ddf7d487b87a76e96e36b1d573a7561d529725f4d613dc631b9bc0e083bb13029ce7b1f559ef5e747fcac439f1455a2ec7c5f09b72290795e706650449f96ade4b41d5433f4eda31e1738ec2b36f6e7d1420d94a6af99801a88f7f7ff000000001976a91400ac6144c4db7b5790f343cf0477a65fb8a02eb788aca086010000000000ffffffff7fdad1d8e0a38acb141975179c7741f2390411b7f1669c3646e69db122f0d8010000000041000000"
    );
}

/// SINGLE with no matching output zero-fills hashOutputs instead of failing.
#[test]
fn test_fork_id_single_without_outputs() {
    let tx = single_input_tx(false);
    let preimage =
        sighash::calc_preimage(&tx, 0, &p2pkh_script(), SighashFlags::SINGLE, 100_000)
            .expect("no error for missing output");
    let hash_outputs_at = preimage.len() - 4 - 4 - 32;
    assert_eq!(&preimage[hash_outputs_at..hash_outputs_at + 32], &[0u8; 32]);
    let digest = sighash::signature_hash(
        &tx,
        0,
        &p2pkh_script(),
        SighashFlags::SINGLE,
        Chain::Bch,
        100_000,
    )
    .unwrap();
    assert_eq!(
        hex::encode(digest),
        "5a1ece31c6dcf7fc91158e60bc6d06fcd1ea70fd578f82f882b7a0a3d063c522"
    );
}

/// The spent value is committed to on fork-id chains.
#[test]
fn test_fork_id_commits_to_value() {
    let tx = bip143_tx();
    let cache = SighashCache::new(&tx);
    let code = script(BIP143_SCRIPT_CODE);
    let a = cache.fork_id_digest(1, &code, SighashFlags::ALL, BIP143_VALUE).unwrap();
    let b = cache.fork_id_digest(1, &code, SighashFlags::ALL, BIP143_VALUE + 1).unwrap();
    assert_ne!(a, b);
}

// -----------------------------------------------------------------------
// Legacy digest
// -----------------------------------------------------------------------

/// Input 0 of the BIP143 example is signed with this legacy digest.
#[test]
fn test_legacy_p2pk_input_digest() {
    let tx = bip143_tx();
    let digest = sighash::legacy_signature_hash(&tx, 0, &script(BIP143_P2PK), SighashFlags::ALL)
        .expect("digest");
    assert_eq!(
        hex::encode(digest),
        "63cec688ee06a91e913875356dd4dea2f8e0f2a2659885372da2a37e32c7532e"
    );
}

/// Legacy digests of both BIP143 inputs across every flag combination.
#[test]
fn test_legacy_flag_vectors() {
    let tx = bip143_tx();
    let p2pk = script(BIP143_P2PK);
    let code = script(BIP143_SCRIPT_CODE);
    let vectors = [
        (0, 0x02, "b5b85036f284c90e641fc6b6fd25fbe29f632a75051e05b0b006a6fbfedd0af2"),
        (0, 0x03, "0be090c73eb6bac7b789bb553a2a9775e8d5bcbe292f359f57fd0a13363de709"),
        (0, 0x81, "1f948bed57a053e52f7bcaf5767ded39306b9168b0e204a76f087f2059d63088"),
        (0, 0x82, "9c2e24bbc68a0797be5f31c6894a6d611f7a0136b3637fc759dc95c25e7ae2c2"),
        (0, 0x83, "8cac7d2ba39a9b5787185c70e7b1a3dc597f1a180cab558b1c40b69757826296"),
        (1, 0x01, "c46030820cbc48402a47cc5b5d3d41648f4e3a711f56b804d601d09dc112a6a4"),
        (1, 0x02, "ffbbcf554debe55f76a79db7d205edc891f194184a93a660366bb8f7facb89e2"),
        (1, 0x03, "33cd468bd6b82f04bcef180b748c521d6fdee3b11711a2f27b2e465915afaec2"),
        (1, 0x81, "8cfeea8cfe3a35332ec31f53900716682d964e0c16372b1f7689ed93f3a40756"),
        (1, 0x82, "bd8ca4cb1ab60a8db8451bd58bc068a9abd5ea20a08029b38934c9d50c1d6721"),
        (1, 0x83, "865c7791b88917498a4c402176c302f146c53a6c2f50ecda08548f515237dca6"),
    ];
    for (index, raw, expected) in vectors {
        let code = if index == 0 { &p2pk } else { &code };
        let digest = sighash::legacy_signature_hash(&tx, index, code, flags(raw)).expect("digest");
        assert_eq!(hex::encode(digest), expected, "input {} flags {:#x}", index, raw);
    }
}

/// Separators are stripped from the script code before hashing.
#[test]
fn test_legacy_strips_codeseparator() {
    let tx = bip143_tx();
    let with_separators = script("ab76a914ab1d0f172a0ecb48aee1be1f2687d2963ae33f71a188ac");
    let digest =
        sighash::legacy_signature_hash(&tx, 1, &with_separators, SighashFlags::ALL).unwrap();
    assert_eq!(
        hex::encode(digest),
        "95424de6a4eca1bb60223a8efa8f08533ba9c4ae045c49c659aa4b944e7be4af"
    );
}

/// SINGLE past the last output yields the constant 0x01 digest.
#[test]
fn test_legacy_single_without_outputs() {
    let tx = single_input_tx(false);
    let digest =
        sighash::legacy_signature_hash(&tx, 0, &p2pkh_script(), SighashFlags::SINGLE).unwrap();
    assert_eq!(digest, sighash::SINGLE_OUT_OF_RANGE_DIGEST);
    assert_eq!(digest[0], 0x01);
    assert!(digest[1..].iter().all(|&b| b == 0));
}

/// A script code that does not parse is reported, not hashed.
#[test]
fn test_legacy_malformed_script_code() {
    let tx = bip143_tx();
    let err = sighash::legacy_signature_hash(&tx, 1, &script("4c05"), SighashFlags::ALL)
        .unwrap_err();
    assert!(matches!(err, TransactionError::Script(_)));
}

// -----------------------------------------------------------------------
// Chain dispatch
// -----------------------------------------------------------------------

/// The same single-input transaction digests differently per chain.
#[test]
fn test_chain_dispatch_vectors() {
    let tx = single_input_tx(true);
    let code = p2pkh_script();
    let btc = sighash::signature_hash(&tx, 0, &code, SighashFlags::ALL, Chain::Btc, 100_000)
        .unwrap();
    let bch = sighash::signature_hash(&tx, 0, &code, SighashFlags::ALL, Chain::Bch, 100_000)
        .unwrap();
    assert_eq!(
        hex::encode(btc),
        "0a68ef3aa307e62968fe771bea31345d159880a9e0c4d3da1bc1f9fe69e93336"
    );
    assert_eq!(
        hex::encode(bch),
        "57600326c42b11783f821dfceebbb114c4dd16c15e18fa56ebac14dc72eaafd8"
    );
}

/// The legacy path ignores the spent value.
#[test]
fn test_legacy_ignores_value() {
    let tx = single_input_tx(true);
    let code = p2pkh_script();
    let a = sighash::signature_hash(&tx, 0, &code, SighashFlags::ALL, Chain::Btc, 1).unwrap();
    let b = sighash::signature_hash(&tx, 0, &code, SighashFlags::ALL, Chain::Btc, 2).unwrap();
    assert_eq!(a, b);
}

/// Cached and one-shot digests agree for every input.
#[test]
fn test_cache_matches_one_shot() {
    let tx = Transaction::from_hex(MULTI_INPUT_TX_HEX).unwrap();
    let cache = SighashCache::new(&tx);
    let code = p2pkh_script();
    for chain in [Chain::Btc, Chain::Bch] {
        for index in 0..tx.input_count() {
            let cached = cache
                .signature_hash(index, &code, SighashFlags::ALL, chain, 5_000)
                .unwrap();
            let direct =
                sighash::signature_hash(&tx, index, &code, SighashFlags::ALL, chain, 5_000)
                    .unwrap();
            assert_eq!(cached, direct);
        }
    }
}

/// An index equal to the input count is rejected with its context.
#[test]
fn test_input_index_out_of_range() {
    let tx = bip143_tx();
    let code = script(BIP143_SCRIPT_CODE);
    for chain in [Chain::Btc, Chain::Bch] {
        let err = sighash::signature_hash(&tx, 2, &code, SighashFlags::ALL, chain, 0).unwrap_err();
        assert!(matches!(
            err,
            TransactionError::InvalidInputIndex { index: 2, inputs: 2 }
        ));
    }
    assert!(sighash::calc_preimage(&tx, 5, &code, SighashFlags::ALL, 0).is_err());
    let cache = SighashCache::new(&tx);
    assert!(cache.legacy_digest(2, &code, SighashFlags::ALL).is_err());
}

/// The transaction is never modified by digest computation.
#[test]
fn test_digest_leaves_transaction_untouched() {
    let tx = bip143_tx();
    let before = tx.clone();
    let code = script(BIP143_SCRIPT_CODE);
    for raw in [0x01, 0x02, 0x03, 0x81, 0x82, 0x83] {
        sighash::legacy_signature_hash(&tx, 1, &code, flags(raw)).unwrap();
    }
    assert_eq!(tx, before);
    assert_eq!(SighashFlags::default().base, BaseMode::All);
}
