//! ABI document types and the custom-type registry.
//!
//! A contract's ABI is a JSON document describing its endpoints and the
//! custom structs/enums their parameters refer to by name. This module
//! defines the serializable document format and the read-only registry the
//! codec resolves custom type names against.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult};

/// Top-level ABI document of a contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AbiDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constructor: Option<AbiConstructor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<AbiEndpoint>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub types: HashMap<String, AbiTypeDef>,
}

/// The contract constructor (deploy/upgrade arguments).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AbiConstructor {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<String>,
    #[serde(default)]
    pub inputs: Vec<AbiInput>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<AbiOutput>,
}

/// A callable contract endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiEndpoint {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutability: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub only_owner: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub payable_in_tokens: Vec<String>,
    #[serde(default)]
    pub inputs: Vec<AbiInput>,
    #[serde(default)]
    pub outputs: Vec<AbiOutput>,
}

fn is_false(v: &bool) -> bool { !v }

/// A declared endpoint parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbiInput {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub multi_arg: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<String>,
}

/// A declared endpoint result slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbiOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub multi_result: bool,
}

/// Custom type definition (struct or enum).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbiTypeDef {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<AbiField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<AbiEnumVariant>,
}

/// A named, typed field of a struct or enum variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbiField {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<String>,
}

/// An enum variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbiEnumVariant {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminant: Option<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<AbiField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<String>,
}

impl AbiDocument {
    /// Parse an ABI document from its JSON text.
    pub fn from_json(json: &str) -> CodecResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the ABI to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Find an endpoint by name.
    pub fn endpoint(&self, name: &str) -> Option<&AbiEndpoint> {
        self.endpoints.iter().find(|e| e.name == name)
    }

    /// Build the custom-type registry for this document.
    pub fn registry(&self) -> AbiRegistry {
        AbiRegistry::new(self.types.clone())
    }
}

impl AbiEndpoint {
    /// The ABI type name describing this endpoint's results as a whole.
    ///
    /// A single output is returned as-is; several outputs are grouped as
    /// `multi<T1,T2,...>`.
    pub fn output_type_name(&self) -> CodecResult<String> {
        match self.outputs.as_slice() {
            [] => Err(CodecError::invalid_input(format!(
                "endpoint `{}` declares no outputs",
                self.name
            ))),
            [single] => Ok(single.type_name.clone()),
            many => {
                let names: Vec<&str> = many.iter().map(|o| o.type_name.as_str()).collect();
                Ok(format!("multi<{}>", names.join(",")))
            }
        }
    }

    /// Docs joined into a single line, if any.
    pub fn description(&self) -> Option<String> {
        join_docs(&self.docs)
    }
}

impl AbiInput {
    /// Docs joined into a single line, if any.
    pub fn description(&self) -> Option<String> {
        join_docs(&self.docs)
    }
}

fn join_docs(docs: &[String]) -> Option<String> {
    let joined = docs
        .iter()
        .map(|d| d.trim())
        .filter(|d| !d.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if joined.is_empty() { None } else { Some(joined) }
}

impl AbiEnumVariant {
    /// The discriminant byte, defaulting to the variant's declaration position.
    pub fn discriminant_or(&self, position: usize) -> usize {
        self.discriminant.map(usize::from).unwrap_or(position)
    }
}

/// A resolved view of a registry entry.
#[derive(Debug, Clone, Copy)]
pub enum CustomType<'a> {
    Struct(&'a [AbiField]),
    Enum(&'a [AbiEnumVariant]),
    Unsupported(&'a str),
}

/// Read-only lookup of custom type definitions by name.
///
/// Built once per ABI and shared by every decode/convert call against it.
#[derive(Debug, Clone, Default)]
pub struct AbiRegistry {
    types: HashMap<String, AbiTypeDef>,
}

impl AbiRegistry {
    pub fn new(types: HashMap<String, AbiTypeDef>) -> Self {
        Self { types }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Resolve a custom type name to its struct/enum view.
    pub fn resolve(&self, name: &str) -> Option<CustomType<'_>> {
        self.types.get(name).map(|def| match def.kind.as_str() {
            "struct" => CustomType::Struct(&def.fields),
            "enum" => CustomType::Enum(&def.variants),
            other => CustomType::Unsupported(other),
        })
    }

    /// Find the variant of an enum selected by a discriminant byte.
    pub fn variant<'a>(
        variants: &'a [AbiEnumVariant],
        discriminant: u8,
    ) -> Option<&'a AbiEnumVariant> {
        variants
            .iter()
            .enumerate()
            .find(|(i, v)| v.discriminant_or(*i) == usize::from(discriminant))
            .map(|(_, v)| v)
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
