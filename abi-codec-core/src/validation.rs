//! Call-site input validation.
//!
//! These checks run before an endpoint is transformed into an action, so
//! malformed requests fail with `InvalidInput` instead of producing a
//! half-built descriptor.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::abi::AbiInput;
use crate::error::CodecError;

/// Fungible token identifier: ticker, dash, six hex characters.
pub const TOKEN_PATTERN: &str = "^[A-Z0-9]{3,10}-[a-f0-9]{6}$";

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(TOKEN_PATTERN).expect("valid token regex"));

/// Bech32 account address with the given human-readable prefix.
pub fn address_pattern(hrp: &str) -> String {
    format!("^{}1[0-9a-z]{{58}}$", regex::escape(hrp))
}

/// The native currency ticker or a token identifier.
pub fn native_or_token_pattern(native_token: &str) -> String {
    format!("^({}|[A-Z0-9]{{3,10}}-[a-f0-9]{{6}})$", regex::escape(native_token))
}

/// Exactly one of the listed values.
pub fn one_of_pattern(values: &[&str]) -> String {
    let escaped: Vec<String> = values.iter().map(|v| regex::escape(v)).collect();
    format!("^({})$", escaped.join("|"))
}

/// Validate that an endpoint name was provided.
pub fn validate_endpoint_name(name: &str) -> Result<(), CodecError> {
    if name.trim().is_empty() {
        return Err(CodecError::invalid_input("endpoint name is missing"));
    }
    Ok(())
}

/// Validate that a contract address is a well-formed bech32 address on `hrp`.
pub fn validate_contract_address(address: &str, hrp: &str) -> Result<(), CodecError> {
    let pattern = address_pattern(hrp);
    let re = Regex::new(&pattern)
        .map_err(|e| CodecError::invalid_input(format!("invalid address prefix '{}': {}", hrp, e)))?;
    if !re.is_match(address) {
        return Err(CodecError::invalid_input(format!(
            "contract address '{}' does not match {}",
            address, pattern
        )));
    }
    Ok(())
}

/// Validate a declared input list: every input needs a name and a type.
pub fn validate_inputs(inputs: &[AbiInput]) -> Result<(), CodecError> {
    for (i, input) in inputs.iter().enumerate() {
        if input.name.trim().is_empty() {
            return Err(CodecError::invalid_input(format!("input {} has no name", i + 1)));
        }
        if input.type_name.trim().is_empty() {
            return Err(CodecError::invalid_input(format!(
                "input '{}' has no type",
                input.name
            )));
        }
    }
    Ok(())
}

/// Whether `s` looks like a fungible token identifier.
pub fn is_token_identifier(s: &str) -> bool {
    TOKEN_RE.is_match(s)
}
