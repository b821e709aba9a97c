//! ABI type name → action type descriptor.
//!
//! Descriptors are a simplified type language used by action inputs:
//! base keywords (`address`, `biguint`, `uint32`, ...), `wrapper:Inner`
//! (`option`, `optional`, `list`, `variadic`) and
//! `composite(name:type|...)` for structs or `composite(type|...)` for
//! anonymous multi-values.

use abi_codec_core::abi::{AbiDocument, AbiField, AbiRegistry, CustomType};
use abi_codec_core::error::{CodecError, CodecResult};
use abi_codec_core::types::TypeExpr;

/// Base ABI type names and their descriptors.
pub const BASE_TYPES: &[(&str, &str)] = &[
    ("Address", "address"),
    ("BigUint", "biguint"),
    ("BigInt", "bigint"),
    ("u8", "uint8"),
    ("u16", "uint16"),
    ("u32", "uint32"),
    ("u64", "uint64"),
    ("i8", "int8"),
    ("i16", "int16"),
    ("i32", "int32"),
    ("i64", "int64"),
    ("bool", "bool"),
    ("bytes", "string"),
    ("TokenIdentifier", "token"),
    ("EgldOrEsdtTokenIdentifier", "token"),
];

/// Descriptor every enum collapses to: a plain integer selector.
pub const ENUM_DESCRIPTOR: &str = "uint64";

/// Look up the descriptor of a base type name.
pub fn base_descriptor(type_name: &str) -> Option<&'static str> {
    BASE_TYPES
        .iter()
        .find(|(abi, _)| *abi == type_name)
        .map(|(_, descriptor)| *descriptor)
}

/// Rewrites ABI type names into type descriptors.
#[derive(Debug, Clone)]
pub struct TypeNameConverter {
    registry: AbiRegistry,
}

impl TypeNameConverter {
    pub fn new(abi: &AbiDocument) -> Self {
        Self::from_registry(abi.registry())
    }

    pub fn from_registry(registry: AbiRegistry) -> Self {
        Self { registry }
    }

    /// Convert an ABI type name.
    ///
    /// Names that are neither built in nor registered pass through
    /// unchanged, as do `array`/`tuple` types.
    pub fn convert(&self, type_name: &str) -> CodecResult<String> {
        let ty = TypeExpr::parse(type_name)?;
        self.convert_expr(&ty)
    }

    pub fn convert_expr(&self, ty: &TypeExpr) -> CodecResult<String> {
        let mut visiting = Vec::new();
        self.convert_with(ty, &mut visiting)
    }

    fn convert_with(&self, ty: &TypeExpr, visiting: &mut Vec<String>) -> CodecResult<String> {
        match ty {
            TypeExpr::Custom(name) if self.registry.contains(name) => {
                self.convert_custom(name, visiting)
            }
            TypeExpr::Multi(items) => self.convert_multi(items, visiting),
            TypeExpr::Option(inner) => Ok(format!("option:{}", self.convert_with(inner, visiting)?)),
            TypeExpr::Optional(inner) => Ok(format!("optional:{}", self.convert_with(inner, visiting)?)),
            TypeExpr::List(inner) => Ok(format!("list:{}", self.convert_with(inner, visiting)?)),
            TypeExpr::Variadic(inner) => Ok(format!("variadic:{}", self.convert_with(inner, visiting)?)),
            other => {
                let name = other.to_string();
                Ok(base_descriptor(&name).map(str::to_string).unwrap_or(name))
            }
        }
    }

    fn convert_multi(&self, items: &[TypeExpr], visiting: &mut Vec<String>) -> CodecResult<String> {
        let parts = items
            .iter()
            .map(|t| self.convert_with(t, visiting))
            .collect::<CodecResult<Vec<_>>>()?;
        Ok(format!("composite({})", parts.join("|")))
    }

    fn convert_custom(&self, name: &str, visiting: &mut Vec<String>) -> CodecResult<String> {
        match self.registry.resolve(name) {
            Some(CustomType::Enum(_)) => Ok(ENUM_DESCRIPTOR.to_string()),
            Some(CustomType::Struct(fields)) => {
                if visiting.iter().any(|v| v == name) {
                    return Err(CodecError::invalid_type(
                        name,
                        format!("recursive struct ({} -> {})", visiting.join(" -> "), name),
                    ));
                }
                visiting.push(name.to_string());
                let result = self.convert_struct_fields(fields, visiting);
                visiting.pop();
                Ok(format!("composite({})", result?))
            }
            Some(CustomType::Unsupported(kind)) => Err(CodecError::invalid_type(
                name,
                format!("unsupported custom type kind '{}'", kind),
            )),
            None => Err(CodecError::invalid_type(name, "unknown custom type")),
        }
    }

    fn convert_struct_fields(&self, fields: &[AbiField], visiting: &mut Vec<String>) -> CodecResult<String> {
        let parts = fields
            .iter()
            .map(|f| {
                let ty = TypeExpr::parse(&f.type_name)?;
                Ok(format!("{}:{}", f.name, self.convert_with(&ty, visiting)?))
            })
            .collect::<CodecResult<Vec<_>>>()?;
        Ok(parts.join("|"))
    }
}
