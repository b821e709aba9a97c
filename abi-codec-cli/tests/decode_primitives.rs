//! Primitive decoding, including the top-level vs nested layout rules.

mod common;

use abi_codec_cli::AbiCodec;
use abi_codec_core::error::CodecError;
use abi_codec_core::types::{Primitive, TypeExpr};
use abi_codec_core::value::DecodedValue;
use common::{address, market, prefixed, pubkey};
use serde_json::json;

fn codec() -> AbiCodec {
    AbiCodec::with_defaults(&market())
}

fn decode_one(bytes: &[u8], type_name: &str) -> serde_json::Value {
    codec().decode(&[bytes], type_name).unwrap().to_json()
}

#[test]
fn fixed_width_integers_are_big_endian() {
    assert_eq!(decode_one(&[7], "u8"), json!(7));
    assert_eq!(decode_one(&[0xff], "i8"), json!(-1));
    assert_eq!(decode_one(&[1, 0], "u16"), json!(256));
    assert_eq!(decode_one(&[0xff, 0xfe], "i16"), json!(-2));
    assert_eq!(decode_one(&[0, 0, 1, 0], "u32"), json!(256));
    assert_eq!(decode_one(&[0xff, 0xff, 0xff, 0xff], "i32"), json!(-1));
}

#[test]
fn sixty_four_bit_integers_are_decimal_strings() {
    assert_eq!(decode_one(&[0, 0, 0, 0, 0, 0, 1, 0], "u64"), json!("256"));
    assert_eq!(decode_one(&[0xff; 8], "u64"), json!("18446744073709551615"));
    assert_eq!(decode_one(&[0xff; 8], "i64"), json!("-1"));
}

#[test]
fn bool_is_any_nonzero_byte() {
    assert_eq!(decode_one(&[0], "bool"), json!(false));
    assert_eq!(decode_one(&[1], "bool"), json!(true));
    assert_eq!(decode_one(&[2], "bool"), json!(true));
}

#[test]
fn top_level_big_uint_is_decimal() {
    assert_eq!(decode_one(&[0, 0, 0, 0, 0, 0, 0, 5], "BigUint"), json!("5"));
    assert_eq!(
        decode_one(&[0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], "BigUint"),
        json!("18446744073709551616")
    );
}

#[test]
fn nested_big_uint_is_hex() {
    let codec = codec();
    let ty = TypeExpr::Primitive(Primitive::BigUint);
    let decoded = codec.read_one(&[0, 0, 0, 1, 0x05], &ty, false).unwrap();
    assert_eq!(decoded.value, DecodedValue::text("05"));
    assert_eq!(decoded.bytes_read, 5);

    assert_eq!(decode_one(&[0, 0, 0, 1, 0x05], "List<BigUint>"), json!(["05"]));
}

#[test]
fn top_level_big_int_is_signed_decimal() {
    assert_eq!(decode_one(&[0xff, 0x38], "BigInt"), json!("-200"));
}

#[test]
fn top_level_strings_take_the_whole_buffer() {
    assert_eq!(decode_one(b"hello", "bytes"), json!("hello"));
    assert_eq!(decode_one(b"WEGLD-bd4d79", "TokenIdentifier"), json!("WEGLD-bd4d79"));
    assert_eq!(decode_one(b"EGLD", "EgldOrEsdtTokenIdentifier"), json!("EGLD"));
}

#[test]
fn nested_tokens_are_length_prefixed_ascii() {
    let mut buf = prefixed(b"ABCD");
    buf.extend(prefixed(b"USDC-c76f1f"));
    assert_eq!(decode_one(&buf, "List<TokenIdentifier>"), json!(["ABCD", "USDC-c76f1f"]));
}

#[test]
fn nested_bytes_unwrap_base64_json() {
    let buf = prefixed(b"eyJhIjoxfQ==");
    assert_eq!(decode_one(&buf, "tuple<bytes>"), json!([{"a": 1}]));
}

#[test]
fn nested_bytes_that_are_not_base64_stay_raw() {
    let buf = prefixed(b"hello");
    assert_eq!(decode_one(&buf, "tuple<bytes>"), json!(["hello"]));
}

#[test]
fn empty_buffer_policy() {
    assert_eq!(decode_one(&[], "u32"), json!(0));
    assert_eq!(decode_one(&[], "u64"), json!(0));
    assert_eq!(decode_one(&[], "BigUint"), json!("0"));
    assert_eq!(decode_one(&[], "variadic<BigUint>"), json!("0"));
    assert_eq!(decode_one(&[], "bool"), json!(null));
    assert_eq!(decode_one(&[], "bytes"), json!(null));
    assert_eq!(decode_one(&[], "Pair"), json!(null));
    assert_eq!(decode_one(&[], "Option<u8>"), json!(null));

    let codec = codec();
    let nested = codec
        .read_one(&[], &TypeExpr::Primitive(Primitive::U32), false)
        .unwrap();
    assert_eq!(nested.value, DecodedValue::Null);
    assert_eq!(nested.bytes_read, 0);
}

#[test]
fn address_renders_as_bech32() {
    let codec = codec();
    let decoded = codec.read_one(&pubkey(3), &TypeExpr::Address, true).unwrap();
    assert_eq!(decoded.value, DecodedValue::Text(address(3)));
    assert_eq!(decoded.bytes_read, 32);
}

#[test]
fn address_prefix_is_configurable() {
    let options = abi_codec_cli::CodecOptions {
        address_hrp: "test".to_string(),
        ..Default::default()
    };
    let codec = AbiCodec::new(&market(), options);
    let value = codec.decode(&[pubkey(1)], "Address").unwrap();
    assert!(value.as_str().unwrap().starts_with("test1"));
}

#[test]
fn short_fixed_width_reads_underrun() {
    let err = codec().decode(&[[0u8, 1]], "u32").unwrap_err();
    assert!(matches!(
        err.root_cause(),
        CodecError::BufferUnderrun { needed: 4, available: 2 }
    ));
    assert_eq!(err.error_code(), 3000);
    assert!(err.to_string().contains("u32"));
}
