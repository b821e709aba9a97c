//! CLI helpers: config and ABI loading, summaries, string utilities.

use std::fs;
use std::path::Path;

use abi_codec_core::abi::{AbiDocument, AbiEndpoint, CustomType};
use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::action::TransformOptions;
use crate::convert::TypeNameConverter;
use crate::decode::CodecOptions;

/// Settings file accepted by `--config`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub codec: CodecOptions,
    pub transform: TransformOptions,
}

/// Load settings from a JSON file, or defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<CliConfig> {
    let Some(path) = path else {
        return Ok(CliConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

/// Load an ABI JSON document.
pub fn load_abi(path: &Path) -> anyhow::Result<AbiDocument> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading ABI {}", path.display()))?;
    AbiDocument::from_json(&text).with_context(|| format!("parsing ABI {}", path.display()))
}

/// Print endpoints and custom types with their type descriptors.
pub fn print_abi_summary(abi: &AbiDocument, converter: &TypeNameConverter) {
    println!("{}: {} endpoint(s), {} custom type(s)", abi.name, abi.endpoints.len(), abi.types.len());
    println!();
    println!("ENDPOINTS:");
    for ep in &abi.endpoints {
        print_endpoint(ep, converter);
    }
    println!();
    println!("TYPES:");
    let registry = abi.registry();
    for name in registry.names() {
        let kind = match registry.resolve(name) {
            Some(CustomType::Struct(_)) => "struct",
            Some(CustomType::Enum(_)) => "enum",
            Some(CustomType::Unsupported(kind)) => kind,
            None => continue,
        };
        println!("  {:<24} {:<8} {}", name, kind, describe(converter, name));
    }
}

fn print_endpoint(ep: &AbiEndpoint, converter: &TypeNameConverter) {
    let mut flags = vec![];
    if let Some(m) = &ep.mutability { flags.push(m.as_str()); }
    if ep.only_owner { flags.push("owner"); }
    if !ep.payable_in_tokens.is_empty() { flags.push("payable"); }
    let flags_str = if flags.is_empty() { String::new() } else { format!(" [{}]", flags.join(", ")) };
    println!("  {}{}", ep.name, flags_str);
    for input in &ep.inputs {
        println!("    in  {:<20} {:<28} {}", input.name, input.type_name, describe(converter, &input.type_name));
    }
    for output in &ep.outputs {
        println!("    out {:<20} {:<28} {}", output.name.as_deref().unwrap_or("-"), output.type_name, describe(converter, &output.type_name));
    }
}

fn describe(converter: &TypeNameConverter, type_name: &str) -> String {
    converter
        .convert(type_name)
        .unwrap_or_else(|e| format!("<{}>", e))
}

// ─── String utilities ────────────────────────────────────────────

/// Human label from a camelCase or snake_case identifier.
pub fn to_label(s: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    for c in s.chars() {
        if c == '_' || c == '-' || c == ' ' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else if c.is_uppercase() && current.chars().last().is_some_and(|p| p.is_lowercase()) {
            words.push(std::mem::take(&mut current));
            current.push(c);
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
        .iter()
        .map(|w| {
            let mut c = w.chars();
            match c.next() {
                None => String::new(),
                Some(ch) => ch.to_uppercase().collect::<String>() + c.as_str(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
