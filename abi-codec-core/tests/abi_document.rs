//! Test ABI document serialization and registry lookups.
//! Verifies the JSON round-trip and the optional-field defaults.

use abi_codec_core::abi::{AbiDocument, AbiEndpoint, AbiEnumVariant, AbiInput, AbiOutput, AbiRegistry, CustomType};

const ABI: &str = r#"{
    "name": "Lottery",
    "endpoints": [
        {"name": "buy", "mutability": "mutable", "payableInTokens": ["EGLD"], "onlyOwner": true,
         "inputs": [{"name": "ticket", "type": "u32"}], "outputs": []},
        {"name": "status", "mutability": "readonly", "inputs": [],
         "outputs": [{"type": "Status"}]},
        {"name": "winners", "inputs": [],
         "outputs": [{"type": "u32"}, {"type": "variadic<Address>", "multi_result": true}]}
    ],
    "types": {
        "Status": {"type": "enum", "variants": [
            {"name": "Open"},
            {"name": "Closed"}
        ]},
        "Gapped": {"type": "enum", "variants": [
            {"name": "Low", "discriminant": 1},
            {"name": "High", "discriminant": 9}
        ]},
        "Ticket": {"type": "struct", "fields": [{"name": "id", "type": "u32"}]}
    }
}"#;

fn doc() -> AbiDocument {
    AbiDocument::from_json(ABI).unwrap()
}

#[test]
fn test_endpoint_fields_deserialize() {
    let abi = doc();
    let buy = abi.endpoint("buy").unwrap();
    assert!(buy.only_owner);
    assert_eq!(buy.payable_in_tokens, vec!["EGLD"]);
    assert_eq!(buy.inputs[0].type_name, "u32");
    assert!(!buy.inputs[0].multi_arg);
    assert!(abi.endpoint("missing").is_none());
}

#[test]
fn test_false_flags_are_omitted() {
    let ep = AbiEndpoint {
        name: "noop".to_string(),
        ..Default::default()
    };
    let json = serde_json::to_string(&ep).unwrap();
    assert!(!json.contains("onlyOwner"), "JSON: {}", json);
    assert!(!json.contains("payableInTokens"), "JSON: {}", json);

    let input = AbiInput {
        name: "x".to_string(),
        type_name: "u8".to_string(),
        multi_arg: false,
        docs: vec![],
    };
    let json = serde_json::to_string(&input).unwrap();
    assert_eq!(json, r#"{"name":"x","type":"u8"}"#);
}

#[test]
fn test_document_round_trip() {
    let abi = doc();
    let text = abi.to_json_pretty().unwrap();
    let back = AbiDocument::from_json(&text).unwrap();
    assert_eq!(back.name, "Lottery");
    assert_eq!(back.endpoints.len(), 3);
    assert_eq!(back.endpoints[0].payable_in_tokens, vec!["EGLD"]);
    assert_eq!(back.types.len(), 3);
}

#[test]
fn test_output_type_name() {
    let abi = doc();
    assert_eq!(abi.endpoint("status").unwrap().output_type_name().unwrap(), "Status");
    assert_eq!(
        abi.endpoint("winners").unwrap().output_type_name().unwrap(),
        "multi<u32,variadic<Address>>"
    );
    let err = abi.endpoint("buy").unwrap().output_type_name().unwrap_err();
    assert_eq!(err.error_code(), 2000);
}

#[test]
fn test_multi_result_flag() {
    let out: AbiOutput = serde_json::from_str(r#"{"type":"variadic<u8>","multi_result":true}"#).unwrap();
    assert!(out.multi_result);
    assert!(out.name.is_none());
}

#[test]
fn test_variant_lookup_defaults_to_position() {
    let registry = doc().registry();
    let variants = match registry.resolve("Status") {
        Some(CustomType::Enum(v)) => v,
        other => panic!("expected enum, got {:?}", other),
    };
    assert_eq!(AbiRegistry::variant(variants, 0).unwrap().name, "Open");
    assert_eq!(AbiRegistry::variant(variants, 1).unwrap().name, "Closed");
    assert!(AbiRegistry::variant(variants, 2).is_none());
}

#[test]
fn test_variant_lookup_uses_explicit_discriminant() {
    let registry = doc().registry();
    let Some(CustomType::Enum(variants)) = registry.resolve("Gapped") else {
        panic!("expected enum");
    };
    assert_eq!(AbiRegistry::variant(variants, 9).unwrap().name, "High");
    assert!(AbiRegistry::variant(variants, 0).is_none());

    let v = AbiEnumVariant {
        name: "X".to_string(),
        discriminant: None,
        fields: vec![],
        docs: vec![],
    };
    assert_eq!(v.discriminant_or(4), 4);
}

#[test]
fn test_registry_names_are_sorted() {
    let registry = doc().registry();
    assert_eq!(registry.names(), vec!["Gapped", "Status", "Ticket"]);
    assert!(registry.contains("Ticket"));
    assert!(matches!(registry.resolve("Ticket"), Some(CustomType::Struct(f)) if f.len() == 1));
    assert!(registry.resolve("Nope").is_none());
}

#[test]
fn test_malformed_document_is_rejected() {
    let err = AbiDocument::from_json("{\"endpoints\": 3}").unwrap_err();
    assert_eq!(err.error_code(), 4000);
}
