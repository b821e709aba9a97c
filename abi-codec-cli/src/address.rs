//! Account address rendering (bech32).

use abi_codec_core::error::{CodecError, CodecResult};
use bech32::{FromBase32, ToBase32, Variant};

/// Length of an account public key.
pub const PUBKEY_LEN: usize = 32;

/// Default human-readable prefix for account addresses.
pub const DEFAULT_HRP: &str = "erd";

/// Render a 32-byte public key as a bech32 address.
pub fn encode_address(hrp: &str, pubkey: &[u8]) -> CodecResult<String> {
    if pubkey.len() != PUBKEY_LEN {
        return Err(CodecError::invalid_input(format!(
            "address public key must be {} bytes, got {}",
            PUBKEY_LEN,
            pubkey.len()
        )));
    }
    bech32::encode(hrp, pubkey.to_base32(), Variant::Bech32)
        .map_err(|e| CodecError::invalid_input(format!("cannot encode address with prefix '{}': {}", hrp, e)))
}

/// Decode a bech32 address back into its prefix and public key.
pub fn decode_address(address: &str) -> CodecResult<(String, [u8; PUBKEY_LEN])> {
    let (hrp, data, _variant) = bech32::decode(address)
        .map_err(|e| CodecError::invalid_input(format!("invalid address '{}': {}", address, e)))?;
    let bytes = Vec::<u8>::from_base32(&data)
        .map_err(|e| CodecError::invalid_input(format!("invalid address '{}': {}", address, e)))?;
    let pubkey: [u8; PUBKEY_LEN] = bytes.as_slice().try_into().map_err(|_| {
        CodecError::invalid_input(format!(
            "address '{}' decodes to {} bytes, expected {}",
            address,
            bytes.len(),
            PUBKEY_LEN
        ))
    })?;
    Ok((hrp, pubkey))
}
