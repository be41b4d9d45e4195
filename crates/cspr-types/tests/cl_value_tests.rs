//! CLValue integration tests
//!
//! Covers binary framing, JSON round-trips, the generic decoder and the
//! conversion accessors across nested types.

use cspr_crypto::PublicKey;
use cspr_primitives::{U128, U256, U512};
use cspr_types::cl::{decode_as, CLType, CLValue, ConversionError, ParsedValue};
use cspr_types::key::{AccessRights, AccountHash, Key, KeyTag, URef};
use indexmap::IndexMap;
use proptest::prelude::*;
use serde_json::json;

fn sample_public_key() -> PublicKey {
    PublicKey::from_hex("012bac1d0ff9240ff0b7b06d555815640497861619ca12583ddef434885416e69b")
        .unwrap()
}

fn samples() -> Vec<CLValue> {
    let uref = URef::new([0x5a; 32], AccessRights::READ_ADD_WRITE);
    vec![
        CLValue::bool(false),
        CLValue::i32(i32::MIN),
        CLValue::i64(-1),
        CLValue::u8(255),
        CLValue::u32(0xdead_beef),
        CLValue::u64(0),
        CLValue::u128(U128::MAX),
        CLValue::u256(U256::exp10(60)),
        CLValue::u512(U512::from(1_000_000_000u64)),
        CLValue::unit(),
        CLValue::string("Casper").unwrap(),
        CLValue::string("").unwrap(),
        CLValue::key(Key::EraInfo(2034)),
        CLValue::key(Key::Account(AccountHash::from_public_key(&sample_public_key()))),
        CLValue::uref(uref),
        CLValue::public_key(sample_public_key()),
        CLValue::byte_array([0x11; 32]).unwrap(),
        CLValue::option(CLValue::string("inner").unwrap()).unwrap(),
        CLValue::option_none(CLType::list(CLType::U8)).unwrap(),
        CLValue::ok(CLValue::u64(9), CLType::String).unwrap(),
        CLValue::err(CLValue::string("Failure").unwrap(), CLType::I32).unwrap(),
        CLValue::list(vec![
            CLValue::option(CLValue::u8(1)).unwrap(),
            CLValue::option_none(CLType::U8).unwrap(),
        ])
        .unwrap(),
        CLValue::map(vec![
            (CLValue::key(Key::Hash([1; 32])), CLValue::u512(U512::from(10u64))),
            (CLValue::key(Key::Hash([2; 32])), CLValue::u512(U512::from(20u64))),
        ])
        .unwrap(),
        CLValue::tuple1(CLValue::bool(true)).unwrap(),
        CLValue::tuple2(CLValue::uref(uref), CLValue::i32(-1)).unwrap(),
        CLValue::tuple3(
            CLValue::u8(1),
            CLValue::list(vec![CLValue::string("a").unwrap()]).unwrap(),
            CLValue::empty_map(CLType::String, CLType::U8).unwrap(),
        )
        .unwrap(),
        CLValue::any(vec![1, 2, 3]),
    ]
}

// ==================== Scenarios ====================

#[test]
fn test_bool_true_bytes_and_json() {
    let value = CLValue::bool(true);
    assert_eq!(value.to_bytes().unwrap(), vec![0x01, 0x00, 0x00, 0x00, 0x01, 0x00]);
    assert_eq!(
        serde_json::to_string(&value).unwrap(),
        r#"{"cl_type":"Bool","bytes":"01","parsed":true}"#
    );
}

#[test]
fn test_i32_minus_ten_bytes() {
    assert_eq!(
        CLValue::i32(-10).to_bytes().unwrap(),
        vec![0x04, 0x00, 0x00, 0x00, 0xf6, 0xff, 0xff, 0xff, 0x01]
    );
}

#[test]
fn test_option_none_u8_bytes() {
    assert_eq!(
        CLValue::option_none(CLType::U8).unwrap().to_bytes().unwrap(),
        vec![0x01, 0x00, 0x00, 0x00, 0x00, 0x0d, 0x03]
    );
}

#[test]
fn test_result_err_failure() {
    let mut framed = vec![0x0c, 0x00, 0x00, 0x00, 0x00, 0x07, 0x00, 0x00, 0x00];
    framed.extend_from_slice(b"Failure");
    framed.extend_from_slice(&[0x10, 0x01, 0x0a]);

    let value = CLValue::from_bytes(&framed).unwrap();
    assert_eq!(value.cl_type(), &CLType::result(CLType::I32, CLType::String));
    assert_eq!(
        value.parsed(),
        Some(&ParsedValue::err(ParsedValue::String("Failure".into())))
    );
    assert_eq!(value.to_result::<i32, String>().unwrap(), Err("Failure".to_string()));

    let err = value.to_i32().unwrap_err();
    assert!(err.to_string().contains("Result(ok: I32, err: String)"));
    assert!(matches!(err, ConversionError::ResultErr { .. }));
}

#[test]
fn test_lenient_u512_payloads_agree() {
    let minimal = [0x09, 0x00, 0x00, 0x00, 0x08, 0xfe, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f, 0x08];
    let padded = [
        0x0a, 0x00, 0x00, 0x00, 0x09, 0xfe, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f, 0x00, 0x08,
    ];
    let a = CLValue::from_bytes(&minimal).unwrap();
    let b = CLValue::from_bytes(&padded).unwrap();
    assert_eq!(a.to_u512().unwrap(), b.to_u512().unwrap());
    // Re-encoding always produces the minimal form
    assert_eq!(CLValue::u512(b.to_u512().unwrap()).to_bytes().unwrap(), minimal.to_vec());
}

// ==================== Round-trips ====================

#[test]
fn test_binary_roundtrip_all_samples() {
    for value in samples() {
        let bytes = value.to_bytes().unwrap();
        let back = CLValue::from_bytes(&bytes).unwrap();
        assert_eq!(back, value, "binary round-trip of {}", value.cl_type());
    }
}

#[test]
fn test_json_roundtrip_all_samples() {
    for value in samples() {
        let text = serde_json::to_string(&value).unwrap();
        let back: CLValue = serde_json::from_str(&text).unwrap();
        assert_eq!(back, value, "JSON round-trip of {}", value.cl_type());
        assert_eq!(back.cl_type(), value.cl_type());
    }
}

#[test]
fn test_json_parsed_only_roundtrip() {
    for value in samples().into_iter().filter(|v| v.cl_type() != &CLType::Any) {
        let json = value.to_json();
        let stripped = json!({ "cl_type": json["cl_type"].clone(), "parsed": json["parsed"].clone() });
        let back = CLValue::from_json(&stripped).unwrap();
        assert_eq!(back, value, "parsed-only JSON of {}", value.cl_type());
    }
}

#[test]
fn test_json_parsed_forms() {
    let map = CLValue::map(vec![(CLValue::string("k").unwrap(), CLValue::u128(U128::from(5u8)))])
        .unwrap();
    assert_eq!(map.to_json()["parsed"], json!([{ "key": "k", "value": "5" }]));

    let key = CLValue::key(Key::EraInfo(2034));
    assert_eq!(key.to_json()["parsed"], json!("era-2034"));

    let uref = CLValue::uref(URef::new([0; 32], AccessRights::READ));
    assert_eq!(
        uref.to_json()["parsed"],
        json!(format!("uref-{}-001", "00".repeat(32)))
    );

    let pk = CLValue::public_key(sample_public_key());
    assert_eq!(pk.to_json()["parsed"], json!(sample_public_key().to_hex()));
}

// ==================== Generic decoder ====================

#[test]
fn test_decode_as_nested_native_shapes() {
    let value = CLValue::map(vec![
        (
            CLValue::string("alice").unwrap(),
            CLValue::list(vec![CLValue::u64(1), CLValue::u64(2)]).unwrap(),
        ),
        (CLValue::string("bob").unwrap(), CLValue::empty_list(CLType::U64).unwrap()),
    ])
    .unwrap();

    let native: IndexMap<String, Vec<u64>> = decode_as(value.bytes(), value.cl_type()).unwrap();
    assert_eq!(native["alice"], vec![1, 2]);
    assert!(native["bob"].is_empty());

    let untyped: ParsedValue = decode_as(value.bytes(), value.cl_type()).unwrap();
    assert_eq!(Some(&untyped), value.parsed());
}

#[test]
fn test_decode_as_tuple_with_key() {
    let value = CLValue::tuple3(
        CLValue::key(Key::Hash([9; 32])),
        CLValue::option(CLValue::byte_array([1u8, 2, 3, 4]).unwrap()).unwrap(),
        CLValue::ok(CLValue::unit(), CLType::String).unwrap(),
    )
    .unwrap();
    let (key, bytes, result): (Key, Option<[u8; 4]>, Result<(), String>) =
        decode_as(value.bytes(), value.cl_type()).unwrap();
    assert_eq!(key.tag(), KeyTag::Hash);
    assert_eq!(bytes, Some([1, 2, 3, 4]));
    assert_eq!(result, Ok(()));
}

// ==================== Malformed input ====================

#[test]
fn test_malformed_frames_fail() {
    // Declared payload longer than the input
    assert!(CLValue::from_bytes(&[0x05, 0x00, 0x00, 0x00, 0x01]).is_err());
    // Unknown type tag
    assert!(CLValue::from_bytes(&[0x00, 0x00, 0x00, 0x00, 0x30]).is_err());
    // Bool payload that is neither 0 nor 1
    assert!(CLValue::from_bytes(&[0x01, 0x00, 0x00, 0x00, 0x02, 0x00]).is_err());
    // Key payload with an unknown key tag
    let mut bad_key = vec![0x21, 0x00, 0x00, 0x00, 0x63];
    bad_key.extend_from_slice(&[0; 32]);
    bad_key.push(0x0b);
    assert!(CLValue::from_bytes(&bad_key).is_err());
}

// ==================== Construction limits ====================

#[test]
fn test_leading_any_cannot_be_built() {
    let any = CLValue::any(vec![0xaa, 0xbb]);
    assert!(CLValue::tuple2(any.clone(), CLValue::u8(1)).is_err());
    assert!(CLValue::list(vec![CLValue::any(vec![1]), CLValue::any(vec![2])]).is_err());

    // Every value that can be built decodes back to itself
    let trailing = CLValue::tuple2(CLValue::u8(1), any).unwrap();
    let back = CLValue::from_bytes(&trailing.to_bytes().unwrap()).unwrap();
    assert_eq!(back, trailing);
    let json: CLValue = serde_json::from_value(trailing.to_json()).unwrap();
    assert_eq!(json, trailing);
}

#[test]
fn test_nesting_stops_at_decodable_depth() {
    let mut value = CLValue::bool(true);
    let mut built = 0;
    while let Ok(wrapped) = CLValue::option(value.clone()) {
        value = wrapped;
        built += 1;
        assert!(built <= 64, "nesting was never rejected");
    }
    assert_eq!(built, 50);
    let back = CLValue::from_bytes(&value.to_bytes().unwrap()).unwrap();
    assert_eq!(back.cl_type().depth(), 50);
}

proptest! {
    #[test]
    fn prop_u512_roundtrip(limbs in proptest::array::uniform8(any::<u64>())) {
        let value = CLValue::u512(U512(limbs));
        let back = CLValue::from_bytes(&value.to_bytes().unwrap()).unwrap();
        prop_assert_eq!(back.to_u512().unwrap(), U512(limbs));
    }

    #[test]
    fn prop_string_list_roundtrip(items in proptest::collection::vec(".*", 1..8)) {
        let values = items
            .iter()
            .map(|s| CLValue::string(s.as_str()).unwrap())
            .collect::<Vec<_>>();
        let list = CLValue::list(values).unwrap();
        let back = CLValue::from_bytes(&list.to_bytes().unwrap()).unwrap();
        prop_assert_eq!(back.to_list::<String>().unwrap(), items);
    }

    #[test]
    fn prop_from_bytes_never_panics(data in proptest::collection::vec(any::<u8>(), 0..64)) {
        let _ = CLValue::from_bytes(&data);
    }
}
