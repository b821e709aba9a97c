//! ABI type-driven decoding of contract call data.
//!
//! Buffers come from contract query responses (one buffer per result
//! slot). A buffer holding exactly one primitive is a bare value with no
//! length prefix; the same primitive nested inside a composite or
//! collection is length-prefixed. That flag (`top_level`) is threaded
//! through every read.

use abi_codec_core::abi::{AbiDocument, AbiEndpoint, AbiField, AbiRegistry, CustomType};
use abi_codec_core::error::{CodecError, CodecResult};
use abi_codec_core::types::{Primitive, TypeExpr};
use abi_codec_core::value::{Decoded, DecodedValue, Fields};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use num_bigint::{BigInt, BigUint};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::address::{encode_address, DEFAULT_HRP, PUBKEY_LEN};

const LENGTH_PREFIX: usize = 4;

/// Decoder behaviour switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    /// Parse JSON found inside base64 byte-string payloads.
    pub parse_json: bool,
    /// Base64-decode nested byte-string payloads when they are valid base64.
    pub decode_base64: bool,
    /// Human-readable prefix used when rendering addresses.
    pub address_hrp: String,
    /// Maximum type nesting; also stops cyclic custom types.
    pub max_depth: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            parse_json: true,
            decode_base64: true,
            address_hrp: DEFAULT_HRP.to_string(),
            max_depth: 64,
        }
    }
}

/// Decoder for one contract's ABI.
///
/// Holds only read-only data, so a single codec can be shared between
/// threads and used for any number of concurrent decode calls.
#[derive(Debug, Clone)]
pub struct AbiCodec {
    registry: AbiRegistry,
    endpoints: Vec<AbiEndpoint>,
    options: CodecOptions,
}

impl AbiCodec {
    pub fn new(abi: &AbiDocument, options: CodecOptions) -> Self {
        let registry = abi.registry();
        warn_on_inner_lists(&registry);
        Self {
            registry,
            endpoints: abi.endpoints.clone(),
            options,
        }
    }

    pub fn with_defaults(abi: &AbiDocument) -> Self {
        Self::new(abi, CodecOptions::default())
    }

    /// Decode one or more buffers against an ABI type name.
    ///
    /// A single buffer yields its bare value; several buffers yield a list
    /// in input order. `variadic<multi<T1,T2,...>>` regroups the buffers
    /// into chunks of one buffer per subtype and yields a list of lists.
    pub fn decode<B: AsRef<[u8]>>(&self, buffers: &[B], type_name: &str) -> CodecResult<DecodedValue> {
        let ty = TypeExpr::parse(type_name)?;
        debug!(type_name, buffers = buffers.len(), "decoding");

        if let Some(slots) = grouped_slots(&ty) {
            return self.decode_grouped(buffers, slots);
        }

        let top_level = ty.is_top_level_primitive();
        let mut values = buffers
            .iter()
            .map(|b| self.read_one(b.as_ref(), &ty, top_level).map(|d| d.value))
            .collect::<CodecResult<Vec<_>>>()?;

        if values.len() == 1 {
            Ok(values.remove(0))
        } else {
            Ok(DecodedValue::List(values))
        }
    }

    /// Decode a query response for a named endpoint using its declared outputs.
    ///
    /// One output decodes like [`AbiCodec::decode`]. Several outputs take one
    /// buffer each; missing trailing buffers decode to null and a final
    /// `variadic<...>` output absorbs all remaining buffers.
    pub fn decode_endpoint_output<B: AsRef<[u8]>>(
        &self,
        endpoint: &str,
        buffers: &[B],
    ) -> CodecResult<DecodedValue> {
        let ep = self
            .endpoints
            .iter()
            .find(|e| e.name == endpoint)
            .ok_or_else(|| CodecError::invalid_input(format!("unknown endpoint '{}'", endpoint)))?;

        if ep.outputs.len() <= 1 {
            return self.decode(buffers, &ep.output_type_name()?);
        }

        let slots = ep
            .outputs
            .iter()
            .map(|o| TypeExpr::parse(&o.type_name))
            .collect::<CodecResult<Vec<_>>>()?;
        let last = slots.len() - 1;

        let mut values = Vec::with_capacity(slots.len());
        for (i, slot) in slots.iter().enumerate() {
            if i == last && matches!(slot, TypeExpr::Variadic(_)) {
                let rest = buffers.get(i..).unwrap_or(&[]);
                if let Some(group) = grouped_slots(slot) {
                    values.push(self.decode_grouped(rest, group)?);
                    return Ok(DecodedValue::List(values));
                }
                let top_level = slot.is_top_level_primitive();
                let items = rest
                    .iter()
                    .map(|b| self.read_one(b.as_ref(), slot, top_level).map(|d| d.value))
                    .collect::<CodecResult<Vec<_>>>()?;
                values.push(DecodedValue::List(items));
                return Ok(DecodedValue::List(values));
            }
            values.push(self.decode_slot(buffers.get(i).map(|b| b.as_ref()), slot)?);
        }

        if buffers.len() > slots.len() {
            return Err(CodecError::invalid_input(format!(
                "endpoint '{}' returns {} values, got {} buffers",
                endpoint,
                slots.len(),
                buffers.len()
            )));
        }
        Ok(DecodedValue::List(values))
    }

    fn decode_grouped<B: AsRef<[u8]>>(&self, buffers: &[B], slots: &[TypeExpr]) -> CodecResult<DecodedValue> {
        if buffers.len() % slots.len() != 0 {
            return Err(CodecError::invalid_input(format!(
                "{} buffers cannot be grouped into units of {}",
                buffers.len(),
                slots.len()
            )));
        }
        let groups = buffers
            .chunks(slots.len())
            .map(|chunk| {
                chunk
                    .iter()
                    .zip(slots)
                    .map(|(buf, slot)| self.decode_slot(Some(buf.as_ref()), slot))
                    .collect::<CodecResult<Vec<_>>>()
                    .map(DecodedValue::List)
            })
            .collect::<CodecResult<Vec<_>>>()?;
        Ok(DecodedValue::List(groups))
    }

    fn decode_slot(&self, buffer: Option<&[u8]>, slot: &TypeExpr) -> CodecResult<DecodedValue> {
        match buffer {
            Some(data) => Ok(self.read_one(data, slot, slot.is_top_level_primitive())?.value),
            None => Ok(DecodedValue::Null),
        }
    }

    /// Decode a single value from the start of `data`.
    ///
    /// Returns the value and the number of bytes it occupied, which never
    /// exceeds `data.len()`.
    pub fn read_one(&self, data: &[u8], ty: &TypeExpr, top_level: bool) -> CodecResult<Decoded> {
        self.read(data, ty, top_level, 0)
    }

    fn read(&self, data: &[u8], ty: &TypeExpr, top_level: bool, depth: usize) -> CodecResult<Decoded> {
        if depth > self.options.max_depth {
            return Err(CodecError::invalid_type(
                ty.to_string(),
                format!("nesting exceeds {} levels (recursive type?)", self.options.max_depth),
            ));
        }
        trace!(type_name = %ty, len = data.len(), top_level, depth, "read");
        self.read_inner(data, ty, top_level, depth)
            .map_err(|e| annotate(e, ty))
    }

    fn read_inner(&self, data: &[u8], ty: &TypeExpr, top_level: bool, depth: usize) -> CodecResult<Decoded> {
        if data.is_empty() {
            return Ok(empty_value(ty, top_level));
        }

        match ty {
            TypeExpr::Optional(inner) => self.read(data, inner, top_level, depth + 1),
            TypeExpr::Primitive(p) => self.read_primitive(data, *p, top_level),
            TypeExpr::Address => {
                let key = take(data, 0, PUBKEY_LEN)?;
                let address = encode_address(&self.options.address_hrp, key)?;
                Ok(Decoded::new(DecodedValue::Text(address), PUBKEY_LEN))
            }
            TypeExpr::List(inner) => {
                let mut items = Vec::new();
                let mut offset = 0;
                while offset < data.len() {
                    let item = self.read(&data[offset..], inner, false, depth + 1)?;
                    if item.bytes_read == 0 {
                        return Err(CodecError::invalid_type(
                            inner.to_string(),
                            "list element occupies no bytes",
                        ));
                    }
                    offset += item.bytes_read;
                    items.push(item.value);
                }
                Ok(Decoded::new(DecodedValue::List(items), offset))
            }
            TypeExpr::Option(inner) => {
                if data[0] == 0 {
                    return Ok(Decoded::null(1));
                }
                let item = self.read(&data[1..], inner, false, depth + 1)?;
                Ok(Decoded::new(item.value, 1 + item.bytes_read))
            }
            TypeExpr::Array(count, inner) => {
                let mut items = Vec::with_capacity((*count).min(data.len()));
                let mut offset = 0;
                for _ in 0..*count {
                    if offset >= data.len() {
                        return Err(CodecError::BufferUnderrun {
                            needed: offset + 1,
                            available: data.len(),
                        });
                    }
                    let item = self.read(&data[offset..], inner, false, depth + 1)?;
                    if item.bytes_read == 0 {
                        return Err(CodecError::invalid_type(
                            inner.to_string(),
                            "array element occupies no bytes",
                        ));
                    }
                    offset += item.bytes_read;
                    items.push(item.value);
                }
                Ok(Decoded::new(DecodedValue::List(items), offset))
            }
            TypeExpr::Variadic(inner) => self.read(data, inner, top_level, depth + 1),
            TypeExpr::Multi(items) | TypeExpr::Tuple(items) => {
                let refs: Vec<&TypeExpr> = items.iter().collect();
                debug_assert_list_is_last(&refs);
                let (values, read) = self.read_sequence(data, &refs, depth)?;
                Ok(Decoded::new(DecodedValue::List(values), read))
            }
            TypeExpr::Custom(name) => self.read_custom(data, name, depth),
        }
    }

    fn read_custom(&self, data: &[u8], name: &str, depth: usize) -> CodecResult<Decoded> {
        match self.registry.resolve(name) {
            Some(CustomType::Enum(variants)) => {
                let discriminant = data[0];
                let variant = AbiRegistry::variant(variants, discriminant).ok_or_else(|| {
                    CodecError::UnknownVariant {
                        enum_name: name.to_string(),
                        discriminant,
                    }
                })?;
                if variant.fields.is_empty() {
                    return Ok(Decoded::new(
                        DecodedValue::Variant { name: variant.name.clone(), fields: None },
                        1,
                    ));
                }
                let (fields, read) = self.read_fields(&data[1..], &variant.fields, depth)?;
                Ok(Decoded::new(
                    DecodedValue::Variant { name: variant.name.clone(), fields: Some(fields) },
                    1 + read,
                ))
            }
            Some(CustomType::Struct(fields)) => {
                let (fields, read) = self.read_fields(data, fields, depth)?;
                Ok(Decoded::new(DecodedValue::Record(fields), read))
            }
            Some(CustomType::Unsupported(kind)) => Err(CodecError::invalid_type(
                name,
                format!("unsupported custom type kind '{}'", kind),
            )),
            None => Err(CodecError::invalid_type(name, "unknown type")),
        }
    }

    fn read_fields(&self, data: &[u8], fields: &[AbiField], depth: usize) -> CodecResult<(Fields, usize)> {
        let types = fields
            .iter()
            .map(|f| TypeExpr::parse(&f.type_name))
            .collect::<CodecResult<Vec<_>>>()?;
        let refs: Vec<&TypeExpr> = types.iter().collect();
        debug_assert_list_is_last(&refs);
        let (values, read) = self.read_sequence(data, &refs, depth)?;
        let named = fields.iter().map(|f| f.name.clone()).zip(values).collect();
        Ok((named, read))
    }

    /// Read consecutive nested values, each from the tail left by the previous one.
    fn read_sequence(&self, data: &[u8], types: &[&TypeExpr], depth: usize) -> CodecResult<(Vec<DecodedValue>, usize)> {
        let mut values = Vec::with_capacity(types.len());
        let mut offset = 0;
        for ty in types {
            let item = self.read(&data[offset..], ty, false, depth + 1)?;
            offset += item.bytes_read;
            values.push(item.value);
        }
        Ok((values, offset))
    }

    fn read_primitive(&self, data: &[u8], prim: Primitive, top_level: bool) -> CodecResult<Decoded> {
        let decoded = match prim {
            Primitive::U8 => Decoded::new(DecodedValue::Number(i64::from(data[0])), 1),
            Primitive::I8 => Decoded::new(DecodedValue::Number(i64::from(data[0] as i8)), 1),
            Primitive::U16 => {
                let b = fixed::<2>(data)?;
                Decoded::new(DecodedValue::Number(i64::from(u16::from_be_bytes(b))), 2)
            }
            Primitive::I16 => {
                let b = fixed::<2>(data)?;
                Decoded::new(DecodedValue::Number(i64::from(i16::from_be_bytes(b))), 2)
            }
            Primitive::U32 => {
                let b = fixed::<4>(data)?;
                Decoded::new(DecodedValue::Number(i64::from(u32::from_be_bytes(b))), 4)
            }
            Primitive::I32 => {
                let b = fixed::<4>(data)?;
                Decoded::new(DecodedValue::Number(i64::from(i32::from_be_bytes(b))), 4)
            }
            Primitive::U64 => {
                let b = fixed::<8>(data)?;
                Decoded::new(DecodedValue::Text(u64::from_be_bytes(b).to_string()), 8)
            }
            Primitive::I64 => {
                let b = fixed::<8>(data)?;
                Decoded::new(DecodedValue::Text(i64::from_be_bytes(b).to_string()), 8)
            }
            Primitive::Bool => Decoded::new(DecodedValue::Bool(data[0] != 0), 1),
            Primitive::Bytes => {
                if top_level {
                    Decoded::new(lossy_text(data), data.len())
                } else {
                    let (payload, read) = length_prefixed(data)?;
                    let raw = String::from_utf8_lossy(payload).into_owned();
                    Decoded::new(self.embedded_payload(raw), read)
                }
            }
            Primitive::BigUint => {
                if top_level {
                    let n = BigUint::from_bytes_be(data);
                    Decoded::new(DecodedValue::Text(n.to_string()), data.len())
                } else {
                    let (payload, read) = length_prefixed(data)?;
                    Decoded::new(DecodedValue::Text(hex::encode(payload)), read)
                }
            }
            Primitive::BigInt => {
                if top_level {
                    let n = BigInt::from_signed_bytes_be(data);
                    Decoded::new(DecodedValue::Text(n.to_string()), data.len())
                } else {
                    let (payload, read) = length_prefixed(data)?;
                    Decoded::new(DecodedValue::Text(hex::encode(payload)), read)
                }
            }
            Primitive::TokenIdentifier | Primitive::EgldOrEsdtTokenIdentifier => {
                if top_level {
                    Decoded::new(lossy_text(data), data.len())
                } else {
                    let (payload, read) = length_prefixed(data)?;
                    Decoded::new(lossy_text(payload), read)
                }
            }
        };
        Ok(decoded)
    }

    /// Unwrap base64 (and JSON inside it) carried by a nested byte-string.
    fn embedded_payload(&self, raw: String) -> DecodedValue {
        if !self.options.decode_base64 || raw.is_empty() {
            return DecodedValue::Text(raw);
        }
        let decoded = match STANDARD.decode(raw.as_bytes()).map(String::from_utf8) {
            Ok(Ok(decoded)) => decoded,
            _ => return DecodedValue::Text(raw),
        };
        if self.options.parse_json {
            let trimmed = decoded.trim_start();
            if trimmed.starts_with('{') || trimmed.starts_with('[') {
                if let Ok(json) = serde_json::from_str::<serde_json::Value>(&decoded) {
                    return DecodedValue::Json(json);
                }
            }
        }
        DecodedValue::Text(decoded)
    }
}

/// Subtypes of a `variadic<multi<T1,T2,...>>`, whose buffers come in units of one per subtype.
fn grouped_slots(ty: &TypeExpr) -> Option<&[TypeExpr]> {
    match ty {
        TypeExpr::Variadic(inner) => match inner.as_ref() {
            TypeExpr::Multi(slots) if slots.len() > 1 => Some(slots),
            _ => None,
        },
        _ => None,
    }
}

/// Value for an empty buffer: zero for top-level numeric primitives, null otherwise.
fn empty_value(ty: &TypeExpr, top_level: bool) -> Decoded {
    match ty.strip_multi_value().as_primitive() {
        Some(p) if top_level && p.is_big_integer() => Decoded::new(DecodedValue::text("0"), 0),
        Some(p) if top_level && p.is_numeric() => Decoded::new(DecodedValue::Number(0), 0),
        _ => Decoded::null(0),
    }
}

/// Attach the type name to an error unless it already names that type.
fn annotate(err: CodecError, ty: &TypeExpr) -> CodecError {
    let name = ty.to_string();
    let already_named = match &err {
        CodecError::InvalidType { type_name, .. } | CodecError::Decode { type_name, .. } => {
            *type_name == name
        }
        _ => false,
    };
    if already_named { err } else { err.within(name) }
}

fn take(data: &[u8], offset: usize, len: usize) -> CodecResult<&[u8]> {
    offset
        .checked_add(len)
        .and_then(|end| data.get(offset..end))
        .ok_or(CodecError::BufferUnderrun {
            needed: offset.saturating_add(len),
            available: data.len(),
        })
}

fn fixed<const N: usize>(data: &[u8]) -> CodecResult<[u8; N]> {
    let mut out = [0u8; N];
    out.copy_from_slice(take(data, 0, N)?);
    Ok(out)
}

/// A 4-byte big-endian length followed by that many bytes.
fn length_prefixed(data: &[u8]) -> CodecResult<(&[u8], usize)> {
    let len = u32::from_be_bytes(fixed::<LENGTH_PREFIX>(data)?) as usize;
    let payload = take(data, LENGTH_PREFIX, len)?;
    Ok((payload, LENGTH_PREFIX + len))
}

fn lossy_text(bytes: &[u8]) -> DecodedValue {
    DecodedValue::Text(String::from_utf8_lossy(bytes).into_owned())
}

/// `List` reads to the end of its buffer, so it can only be the last of
/// several consecutive values.
fn debug_assert_list_is_last(types: &[&TypeExpr]) {
    if let Some((_, init)) = types.split_last() {
        debug_assert!(
            init.iter().all(|t| !t.is_list()),
            "List must be the last field of a composite: {:?}",
            types.iter().map(|t| t.to_string()).collect::<Vec<_>>()
        );
    }
}

fn warn_on_inner_lists(registry: &AbiRegistry) {
    for name in registry.names() {
        if let Some(CustomType::Struct(fields)) = registry.resolve(name) {
            let Some((_, init)) = fields.split_last() else { continue };
            for field in init {
                if TypeExpr::parse(&field.type_name).map(|t| t.is_list()).unwrap_or(false) {
                    warn!(
                        type_name = name,
                        field = %field.name,
                        "List field is not last; it will consume the bytes of the fields after it"
                    );
                }
            }
        }
    }
}
