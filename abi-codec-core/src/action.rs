//! Action descriptors built from contract endpoints.
//!
//! An action describes one contract call for a downstream consumer: which
//! function to call and, per input, its simplified type descriptor, where
//! the value goes in the call, and how it should be validated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Where an input's value is placed in the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum InputPosition {
    /// Native-currency amount sent with the call.
    Value,
    /// Token transfer attached to the call.
    Transfer,
    /// Positional endpoint argument, 1-based.
    Arg(usize),
}

impl fmt::Display for InputPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputPosition::Value => write!(f, "value"),
            InputPosition::Transfer => write!(f, "transfer"),
            InputPosition::Arg(n) => write!(f, "arg:{}", n),
        }
    }
}

impl FromStr for InputPosition {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "value" => Ok(InputPosition::Value),
            "transfer" => Ok(InputPosition::Transfer),
            other => other
                .strip_prefix("arg:")
                .and_then(|n| n.parse::<usize>().ok())
                .filter(|n| *n > 0)
                .map(InputPosition::Arg)
                .ok_or_else(|| CodecError::invalid_input(format!("invalid input position '{}'", s))),
        }
    }
}

impl From<InputPosition> for String {
    fn from(p: InputPosition) -> Self {
        p.to_string()
    }
}

impl TryFrom<String> for InputPosition {
    type Error = CodecError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// One call parameter or payment slot of an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionInput {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub position: InputPosition,
    pub required: bool,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<String>,
}

impl ActionInput {
    /// An input with no validation hints.
    pub fn new(
        name: impl Into<String>,
        type_: impl Into<String>,
        position: InputPosition,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            type_: type_.into(),
            position,
            required: true,
            description: description.into(),
            min: None,
            pattern: None,
            pattern_description: None,
            modifier: None,
        }
    }
}

/// A complete contract-call action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDefinition {
    pub contract: String,
    pub func: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub gas_limit: u64,
    pub inputs: Vec<ActionInput>,
}

impl ActionDefinition {
    /// Serialize the action to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
