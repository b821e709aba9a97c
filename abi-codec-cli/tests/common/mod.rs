#![allow(dead_code)]

use abi_codec_cli::address::encode_address;
use abi_codec_core::abi::AbiDocument;

pub const MARKET_ABI: &str = r#"{
    "name": "Market",
    "endpoints": [
        {"name": "getPair", "mutability": "readonly", "inputs": [], "outputs": [{"type": "Pair"}]},
        {"name": "getStats", "mutability": "readonly", "inputs": [],
         "outputs": [{"type": "u64"}, {"type": "BigUint"}, {"type": "variadic<Address>", "multi_result": true}]},
        {"name": "getOrders", "mutability": "readonly", "inputs": [],
         "outputs": [{"type": "variadic<multi<Address,BigUint>>", "multi_result": true}]},
        {"name": "getBook", "mutability": "readonly", "inputs": [],
         "outputs": [{"type": "u32"}, {"type": "variadic<multi<u8,u16>>", "multi_result": true}]},
        {"name": "deposit", "mutability": "mutable", "payableInTokens": ["EGLD"], "inputs": [], "outputs": []},
        {"name": "swap", "docs": ["Swap tokens."], "mutability": "mutable",
         "payableInTokens": ["USDC-c76f1f", "WEGLD-bd4d79"],
         "inputs": [
            {"name": "token_out", "type": "TokenIdentifier"},
            {"name": "min_amount_out", "type": "BigUint"},
            {"name": "recipient", "type": "optional<Address>", "multi_arg": true}
         ],
         "outputs": []},
        {"name": "anything", "mutability": "mutable", "payableInTokens": ["*"],
         "inputs": [
            {"name": "note", "type": "bytes"},
            {"name": "status", "type": "Status"},
            {"name": "limits", "type": "List<Option<BigUint>>"}
         ],
         "outputs": []}
    ],
    "types": {
        "Pair": {"type": "struct", "fields": [
            {"name": "x", "type": "u32"},
            {"name": "y", "type": "u32"}
        ]},
        "Account": {"type": "struct", "fields": [
            {"name": "a", "type": "Address"},
            {"name": "b", "type": "u64"}
        ]},
        "Status": {"type": "enum", "variants": [
            {"name": "Idle", "discriminant": 0},
            {"name": "Active", "discriminant": 1, "fields": [
                {"name": "since", "type": "u64"},
                {"name": "owner", "type": "Address"}
            ]},
            {"name": "Closed", "discriminant": 2}
        ]},
        "Order": {"type": "struct", "fields": [
            {"name": "id", "type": "u64"},
            {"name": "amount", "type": "BigUint"},
            {"name": "token", "type": "TokenIdentifier"},
            {"name": "status", "type": "Status"},
            {"name": "memo", "type": "Option<bytes>"}
        ]},
        "Node": {"type": "struct", "fields": [
            {"name": "value", "type": "u8"},
            {"name": "next", "type": "Option<Node>"}
        ]},
        "Flags": {"type": "explicit-enum", "variants": [{"name": "A"}]}
    }
}"#;

pub fn market() -> AbiDocument {
    AbiDocument::from_json(MARKET_ABI).unwrap()
}

pub fn pubkey(seed: u8) -> Vec<u8> {
    vec![seed; 32]
}

pub fn address(seed: u8) -> String {
    encode_address("erd", &pubkey(seed)).unwrap()
}

/// 4-byte big-endian length prefix followed by the payload.
pub fn prefixed(payload: &[u8]) -> Vec<u8> {
    let mut out = (payload.len() as u32).to_be_bytes().to_vec();
    out.extend_from_slice(payload);
    out
}
