//! Endpoint → action definition.
//!
//! Builds per-input descriptors (type descriptor, position in the call,
//! required flag, validation hints) for a contract endpoint. Payment inputs
//! come first, then one input per declared argument in declaration order.

use abi_codec_core::abi::{AbiDocument, AbiEndpoint, AbiInput};
use abi_codec_core::action::{ActionDefinition, ActionInput, InputPosition};
use abi_codec_core::error::{CodecError, CodecResult};
use abi_codec_core::types::{Primitive, TypeExpr};
use abi_codec_core::validation::{
    address_pattern, is_token_identifier, native_or_token_pattern, one_of_pattern,
    validate_contract_address, validate_endpoint_name, validate_inputs, TOKEN_PATTERN,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::address::{decode_address, DEFAULT_HRP};
use crate::cli::to_label;
use crate::convert::TypeNameConverter;

/// Accepts any token, native currency included.
pub const WILDCARD_TOKEN: &str = "*";

/// Descriptor of a token transfer slot.
pub const TRANSFER_DESCRIPTOR: &str = "composite(token:token|amount:biguint)";

/// Action builder settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformOptions {
    /// Ticker of the chain's native currency in `payableInTokens`.
    pub native_token: String,
    /// Decimals used for the native amount's scale modifier.
    pub native_decimals: u8,
    /// Human-readable prefix contract and argument addresses must carry.
    pub address_hrp: String,
    /// Gas limit written into every action.
    pub gas_limit: u64,
    /// Add a `scale:<decimals>` modifier to big-integer arguments.
    pub scale_big_integers: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            native_token: "EGLD".to_string(),
            native_decimals: 18,
            address_hrp: DEFAULT_HRP.to_string(),
            gas_limit: 60_000_000,
            scale_big_integers: true,
        }
    }
}

/// Turns endpoints of one ABI into action definitions.
#[derive(Debug, Clone)]
pub struct ActionTransformer {
    converter: TypeNameConverter,
    endpoints: Vec<AbiEndpoint>,
    options: TransformOptions,
}

impl ActionTransformer {
    pub fn new(abi: &AbiDocument, options: TransformOptions) -> Self {
        Self {
            converter: TypeNameConverter::new(abi),
            endpoints: abi.endpoints.clone(),
            options,
        }
    }

    pub fn with_defaults(abi: &AbiDocument) -> Self {
        Self::new(abi, TransformOptions::default())
    }

    /// Build the action for a named endpoint of the contract at `contract`.
    pub fn transform(&self, contract: &str, endpoint: &str) -> CodecResult<ActionDefinition> {
        validate_endpoint_name(endpoint)?;
        let ep = self
            .endpoints
            .iter()
            .find(|e| e.name == endpoint)
            .ok_or_else(|| CodecError::invalid_input(format!("unknown endpoint '{}'", endpoint)))?;
        self.transform_endpoint(contract, ep)
    }

    /// Build actions for every endpoint that is not read-only.
    pub fn transform_all(&self, contract: &str) -> CodecResult<Vec<ActionDefinition>> {
        self.endpoints
            .iter()
            .filter(|e| e.mutability.as_deref() != Some("readonly"))
            .map(|e| self.transform_endpoint(contract, e))
            .collect()
    }

    pub fn transform_endpoint(&self, contract: &str, ep: &AbiEndpoint) -> CodecResult<ActionDefinition> {
        validate_endpoint_name(&ep.name)?;
        validate_contract_address(contract, &self.options.address_hrp)?;
        decode_address(contract)?;
        validate_inputs(&ep.inputs)?;

        let mut inputs = self.payment_inputs(&ep.payable_in_tokens);
        for (i, input) in ep.inputs.iter().enumerate() {
            inputs.push(self.argument_input(i + 1, input)?);
        }
        debug!(endpoint = %ep.name, inputs = inputs.len(), "built action");

        Ok(ActionDefinition {
            contract: contract.to_string(),
            func: ep.name.clone(),
            label: to_label(&ep.name),
            description: ep.description(),
            gas_limit: self.options.gas_limit,
            inputs,
        })
    }

    /// Native amount and token transfer slots for the accepted payments.
    pub fn payment_inputs(&self, payable: &[String]) -> Vec<ActionInput> {
        let native = self.options.native_token.as_str();
        let wildcard = payable.iter().any(|t| t == WILDCARD_TOKEN);
        let accepts_native = wildcard || payable.iter().any(|t| t == native);
        let tokens: Vec<&str> = payable
            .iter()
            .map(String::as_str)
            .filter(|t| *t != WILDCARD_TOKEN && *t != native)
            .collect();
        for token in tokens.iter().filter(|t| !is_token_identifier(t)) {
            warn!(token = %token, "payable token is not a token identifier");
        }
        let accepts_tokens = wildcard || !tokens.is_empty();
        let single_option = accepts_native != accepts_tokens;

        let mut inputs = Vec::new();
        if accepts_native {
            let mut amount = ActionInput::new(
                "Amount",
                "biguint",
                InputPosition::Value,
                format!("Amount of {} to send", native),
            );
            amount.required = single_option;
            amount.min = Some(0);
            amount.modifier = Some(format!("scale:{}", self.options.native_decimals));
            inputs.push(amount);
        }
        if accepts_tokens {
            let mut transfer = ActionInput::new(
                "Token",
                TRANSFER_DESCRIPTOR,
                InputPosition::Transfer,
                "Token and amount to send",
            );
            transfer.required = single_option;
            if wildcard {
                transfer.pattern = Some(TOKEN_PATTERN.to_string());
                transfer.pattern_description = Some("Must be a valid token identifier".to_string());
            } else {
                transfer.pattern = Some(one_of_pattern(&tokens));
                transfer.pattern_description = Some(format!("One of: {}", tokens.join(", ")));
            }
            inputs.push(transfer);
        }
        inputs
    }

    /// Descriptor for the `index`-th (1-based) declared argument.
    pub fn argument_input(&self, index: usize, input: &AbiInput) -> CodecResult<ActionInput> {
        let ty = TypeExpr::parse(&input.type_name)?;
        let descriptor = self.converter.convert_expr(&ty)?;
        let description = input
            .description()
            .unwrap_or_else(|| to_label(&input.name));

        let mut action = ActionInput::new(&input.name, descriptor, InputPosition::Arg(index), description);
        action.required = !input.type_name.trim_start().starts_with("optional<");

        match ty.strip_optionals() {
            TypeExpr::Primitive(p) if p.is_big_integer() => {
                if *p == Primitive::BigUint {
                    action.min = Some(0);
                }
                if self.options.scale_big_integers {
                    action.modifier = Some(format!("scale:{}", self.options.native_decimals));
                }
            }
            TypeExpr::Address => {
                let hrp = &self.options.address_hrp;
                action.pattern = Some(address_pattern(hrp));
                action.pattern_description = Some(format!("Must be a valid address ({}1...)", hrp));
            }
            TypeExpr::Primitive(Primitive::TokenIdentifier) => {
                action.pattern = Some(TOKEN_PATTERN.to_string());
                action.pattern_description =
                    Some("Must be a valid token identifier (e.g. USDC-c76f1f)".to_string());
            }
            TypeExpr::Primitive(Primitive::EgldOrEsdtTokenIdentifier) => {
                let native = &self.options.native_token;
                action.pattern = Some(native_or_token_pattern(native));
                action.pattern_description =
                    Some(format!("Must be {} or a valid token identifier", native));
            }
            _ => {}
        }
        Ok(action)
    }
}
