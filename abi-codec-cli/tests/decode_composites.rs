//! Collections, options, custom structs/enums and multi-buffer decoding.

mod common;

use abi_codec_cli::{AbiCodec, CodecOptions};
use abi_codec_core::error::CodecError;
use abi_codec_core::types::TypeExpr;
use common::{address, market, prefixed, pubkey};
use serde_json::json;

fn codec() -> AbiCodec {
    AbiCodec::with_defaults(&market())
}

fn read(bytes: &[u8], type_name: &str) -> (serde_json::Value, usize) {
    let ty = TypeExpr::parse(type_name).unwrap();
    let decoded = codec().read_one(bytes, &ty, ty.is_top_level_primitive()).unwrap();
    (decoded.value.to_json(), decoded.bytes_read)
}

#[test]
fn list_consumes_the_whole_buffer() {
    let buf = [0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3];
    assert_eq!(read(&buf, "List<u32>"), (json!([1, 2, 3]), 12));
    assert_eq!(read(&buf, "vec<u32>"), (json!([1, 2, 3]), 12));
}

#[test]
fn option_flag_byte() {
    assert_eq!(read(&[0], "Option<u32>"), (json!(null), 1));
    assert_eq!(read(&[0], "Option<Pair>"), (json!(null), 1));
    assert_eq!(read(&[1, 0, 0, 0, 5], "Option<u32>"), (json!(5), 5));
    assert_eq!(read(&[1, 0, 0, 0, 1, 5], "Option<BigUint>"), (json!("05"), 6));
}

#[test]
fn list_of_options() {
    let buf = [0, 1, 0, 0, 0, 1, 7, 0];
    assert_eq!(read(&buf, "List<Option<BigUint>>"), (json!([null, "07", null]), 8));
}

#[test]
fn fixed_arrays_read_exactly_n_items() {
    assert_eq!(read(&[1, 2, 3, 9], "array3<u8>"), (json!([1, 2, 3]), 3));
    assert_eq!(read(&[0, 1, 0, 2], "array<2><u16>"), (json!([1, 2]), 4));
}

#[test]
fn array_count_beyond_the_buffer_underruns() {
    let err = codec().decode(&[[1u8]], "array4000000000000<u8>").unwrap_err();
    assert!(matches!(
        err.root_cause(),
        CodecError::BufferUnderrun { needed: 2, available: 1 }
    ));
    assert_eq!(err.error_code(), 3000);

    let err = codec().decode(&[[1u8, 2]], "array3<u8>").unwrap_err();
    assert_eq!(err.error_code(), 3000);
}

#[test]
fn multi_and_tuple_read_in_order() {
    assert_eq!(read(&[1, 0, 2], "multi<u8,u16>"), (json!([1, 2]), 3));
    let mut buf = pubkey(9);
    buf.extend([0, 0, 0, 1, 0xff]);
    assert_eq!(read(&buf, "tuple<Address,BigUint>"), (json!([address(9), "ff"]), 37));
}

#[test]
fn struct_fields_in_declaration_order() {
    let mut buf = pubkey(4);
    buf.extend([0, 0, 0, 0, 0, 0, 0, 7]);
    let (value, read_len) = read(&buf, "Account");
    assert_eq!(value, json!({"a": address(4), "b": "7"}));
    assert_eq!(serde_json::to_string(&value).unwrap(), format!(r#"{{"a":"{}","b":"7"}}"#, address(4)));
    assert_eq!(read_len, 40);
}

#[test]
fn enum_variants_by_discriminant() {
    assert_eq!(read(&[0], "Status"), (json!("Idle"), 1));
    assert_eq!(read(&[2], "Status"), (json!("Closed"), 1));

    let mut buf = vec![1, 0, 0, 0, 0, 0, 0, 0, 12];
    buf.extend(pubkey(5));
    assert_eq!(
        read(&buf, "Status"),
        (json!({"Active": {"since": "12", "owner": address(5)}}), 41)
    );
}

#[test]
fn unknown_discriminant_fails() {
    let err = codec().decode(&[[5u8]], "Status").unwrap_err();
    assert!(matches!(
        err.root_cause(),
        CodecError::UnknownVariant { discriminant: 5, .. }
    ));
}

#[test]
fn nested_struct_with_every_layout() {
    let mut buf = vec![0, 0, 0, 0, 0, 0, 0, 1];
    buf.extend(prefixed(&[0x03, 0xe8]));
    buf.extend(prefixed(b"USDC-c76f1f"));
    buf.push(0);
    buf.push(1);
    buf.extend(prefixed(b"hello"));

    let (value, read_len) = read(&buf, "Order");
    assert_eq!(
        value,
        json!({
            "id": "1",
            "amount": "03e8",
            "token": "USDC-c76f1f",
            "status": "Idle",
            "memo": "hello"
        })
    );
    assert_eq!(read_len, buf.len());
}

#[test]
fn recursive_struct_decodes_until_none() {
    assert_eq!(
        read(&[1, 1, 2, 0], "Node"),
        (json!({"value": 1, "next": {"value": 2, "next": null}}), 4)
    );
}

#[test]
fn nesting_limit_stops_runaway_types() {
    let options = CodecOptions { max_depth: 4, ..Default::default() };
    let codec = AbiCodec::new(&market(), options);
    let err = codec.decode(&[[1u8; 20]], "Node").unwrap_err();
    assert!(matches!(err.root_cause(), CodecError::InvalidType { .. }));
    assert_eq!(err.error_code(), 1000);
}

#[test]
fn unknown_and_unsupported_types_fail() {
    let err = codec().decode(&[[1u8]], "Mystery").unwrap_err();
    assert_eq!(err.error_code(), 1000);
    assert!(err.to_string().contains("Mystery"));

    let err = codec().decode(&[[0u8]], "Flags").unwrap_err();
    assert!(err.to_string().contains("explicit-enum"));
}

#[test]
fn nested_failures_name_the_outer_type() {
    // y is cut short: two bytes of a u32
    let err = codec().decode(&[[0u8, 0, 0, 1, 0, 0]], "Pair").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Pair"), "{}", message);
    assert!(message.contains("u32"), "{}", message);
    assert!(matches!(err.root_cause(), CodecError::BufferUnderrun { .. }));
}

#[test]
fn bytes_read_never_exceeds_buffer() {
    let cases: Vec<(Vec<u8>, &str)> = vec![
        (vec![0, 0, 0, 1, 0, 0, 0, 2], "Pair"),
        (vec![1, 0, 0, 0, 2], "Option<u32>"),
        (vec![0, 0, 0, 2, 1, 2, 0, 0, 0, 0], "List<BigUint>"),
        (vec![0, 0, 0, 0, 0, 0, 0, 9], "BigUint"),
        (vec![2], "Status"),
    ];
    for (buf, type_name) in cases {
        let (_, read_len) = read(&buf, type_name);
        assert!(read_len <= buf.len(), "{} read {} of {}", type_name, read_len, buf.len());
    }
}

#[test]
fn several_buffers_give_a_list() {
    let value = codec()
        .decode(&[vec![0, 0, 0, 0, 0, 0, 0, 1], vec![0, 0, 0, 0, 0, 0, 0, 2]], "variadic<u64>")
        .unwrap();
    assert_eq!(value.to_json(), json!(["1", "2"]));

    let value = codec().decode(&[vec![5], vec![1, 0]], "variadic<BigUint>").unwrap();
    assert_eq!(value.to_json(), json!(["5", "256"]));
}

#[test]
fn no_buffers_give_an_empty_list() {
    let buffers: Vec<Vec<u8>> = vec![];
    assert_eq!(codec().decode(&buffers, "u32").unwrap().to_json(), json!([]));
}

#[test]
fn variadic_multi_regroups_buffers() {
    let buffers = vec![pubkey(1), vec![0x0a], pubkey(2), vec![0x01, 0x00]];
    let value = codec()
        .decode(&buffers, "variadic<multi<Address,BigUint>>")
        .unwrap();
    assert_eq!(
        value.to_json(),
        json!([[address(1), "10"], [address(2), "256"]])
    );
}

#[test]
fn variadic_multi_rejects_incomplete_groups() {
    let buffers = vec![pubkey(1), vec![0x0a], pubkey(2)];
    let err = codec()
        .decode(&buffers, "variadic<multi<Address,BigUint>>")
        .unwrap_err();
    assert_eq!(err.error_code(), 2000);
}
