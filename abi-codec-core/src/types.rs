//! Parsed ABI type names.
//!
//! ABI type names form a small recursive grammar (`List<Option<BigUint>>`,
//! `multi<Address,u32>`, `array32<u8>`, custom names...). A name is parsed
//! once into a [`TypeExpr`] tree and the decoder and converter recurse on
//! that tree instead of re-slicing strings.

use std::fmt;
use std::str::FromStr;

use crate::error::{CodecError, CodecResult};

/// Built-in scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    BigUint,
    BigInt,
    Bool,
    Bytes,
    TokenIdentifier,
    EgldOrEsdtTokenIdentifier,
}

impl Primitive {
    pub const ALL: [Primitive; 14] = [
        Primitive::U8,
        Primitive::U16,
        Primitive::U32,
        Primitive::U64,
        Primitive::I8,
        Primitive::I16,
        Primitive::I32,
        Primitive::I64,
        Primitive::BigUint,
        Primitive::BigInt,
        Primitive::Bool,
        Primitive::Bytes,
        Primitive::TokenIdentifier,
        Primitive::EgldOrEsdtTokenIdentifier,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Primitive::U8 => "u8",
            Primitive::U16 => "u16",
            Primitive::U32 => "u32",
            Primitive::U64 => "u64",
            Primitive::I8 => "i8",
            Primitive::I16 => "i16",
            Primitive::I32 => "i32",
            Primitive::I64 => "i64",
            Primitive::BigUint => "BigUint",
            Primitive::BigInt => "BigInt",
            Primitive::Bool => "bool",
            Primitive::Bytes => "bytes",
            Primitive::TokenIdentifier => "TokenIdentifier",
            Primitive::EgldOrEsdtTokenIdentifier => "EgldOrEsdtTokenIdentifier",
        }
    }

    /// Integer kinds, fixed-width or arbitrary precision.
    pub fn is_numeric(&self) -> bool {
        !matches!(
            self,
            Primitive::Bool
                | Primitive::Bytes
                | Primitive::TokenIdentifier
                | Primitive::EgldOrEsdtTokenIdentifier
        )
    }

    pub fn is_big_integer(&self) -> bool {
        matches!(self, Primitive::BigUint | Primitive::BigInt)
    }
}

/// A parsed ABI type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Primitive(Primitive),
    /// 32-byte account public key.
    Address,
    /// `Option<T>`: one flag byte, then `T` when the flag is set.
    Option(Box<TypeExpr>),
    /// `optional<T>`: a multi-value that is either absent or a bare `T`.
    Optional(Box<TypeExpr>),
    /// `List<T>` (also spelled `vec<T>`/`Vec<T>`).
    List(Box<TypeExpr>),
    /// `arrayN<T>`: exactly N consecutive `T` values.
    Array(usize, Box<TypeExpr>),
    Variadic(Box<TypeExpr>),
    Multi(Vec<TypeExpr>),
    Tuple(Vec<TypeExpr>),
    /// A struct/enum name resolved against the registry.
    Custom(String),
}

impl TypeExpr {
    /// Parse a type name.
    pub fn parse(type_name: &str) -> CodecResult<Self> {
        let trimmed = type_name.trim();
        check_balance(trimmed)?;
        parse_expr(trimmed)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeExpr::Primitive(_))
    }

    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            TypeExpr::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    /// Whether a single buffer declared with this type holds one bare
    /// primitive value, ignoring outer `variadic<...>`/`optional<...>`.
    pub fn is_top_level_primitive(&self) -> bool {
        self.strip_multi_value().is_primitive()
    }

    /// Peel outer `variadic<...>`/`optional<...>` wrappers.
    pub fn strip_multi_value(&self) -> &TypeExpr {
        match self {
            TypeExpr::Variadic(inner) | TypeExpr::Optional(inner) => inner.strip_multi_value(),
            other => other,
        }
    }

    /// Peel any `Option<...>`/`optional<...>` wrappers.
    pub fn strip_optionals(&self) -> &TypeExpr {
        match self {
            TypeExpr::Option(inner) | TypeExpr::Optional(inner) => inner.strip_optionals(),
            other => other,
        }
    }

    /// `List<T>` consumes the rest of its buffer.
    pub fn is_list(&self) -> bool {
        matches!(self, TypeExpr::List(_))
    }
}

impl FromStr for TypeExpr {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeExpr::parse(s)
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Primitive(p) => write!(f, "{}", p.name()),
            TypeExpr::Address => write!(f, "Address"),
            TypeExpr::Option(inner) => write!(f, "Option<{}>", inner),
            TypeExpr::Optional(inner) => write!(f, "optional<{}>", inner),
            TypeExpr::List(inner) => write!(f, "List<{}>", inner),
            TypeExpr::Array(n, inner) => write!(f, "array{}<{}>", n, inner),
            TypeExpr::Variadic(inner) => write!(f, "variadic<{}>", inner),
            TypeExpr::Multi(items) => write!(f, "multi<{}>", join(items)),
            TypeExpr::Tuple(items) => write!(f, "tuple<{}>", join(items)),
            TypeExpr::Custom(name) => write!(f, "{}", name),
        }
    }
}

fn join(items: &[TypeExpr]) -> String {
    items.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(",")
}

// ─── Parsing ─────────────────────────────────────────────────────

fn check_balance(s: &str) -> CodecResult<()> {
    let mut depth: usize = 0;
    for (i, c) in s.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    CodecError::invalid_type(s, format!("unmatched '>' at position {}", i))
                })?;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(CodecError::invalid_type(s, format!("{} unclosed '<'", depth)));
    }
    Ok(())
}

/// Index of the `>` closing the `<` at `open`.
fn matching_close(s: &str, open: usize) -> CodecResult<usize> {
    let mut depth = 0usize;
    for (i, c) in s[open..].char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(open + i);
                }
            }
            _ => {}
        }
    }
    Err(CodecError::invalid_type(s, "unclosed '<'"))
}

/// Split a comma-separated type list at bracket depth 0.
pub fn split_top_level(list: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in list.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(list[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(list[start..].trim());
    parts
}

fn parse_list(whole: &str, inner: &str) -> CodecResult<Vec<TypeExpr>> {
    split_top_level(inner)
        .into_iter()
        .map(|item| {
            if item.is_empty() {
                Err(CodecError::invalid_type(whole, "empty item in type list"))
            } else {
                parse_expr(item)
            }
        })
        .collect()
}

fn parse_expr(s: &str) -> CodecResult<TypeExpr> {
    let s = s.trim();
    if s.is_empty() {
        return Err(CodecError::invalid_type(s, "empty type name"));
    }

    let Some(open) = s.find('<') else {
        return parse_leaf(s);
    };

    let head = s[..open].trim();
    let close = matching_close(s, open)?;
    let inner = &s[open + 1..close];
    let rest = &s[close + 1..];

    // `array<N><T>` spelling
    if head == "array" {
        let count = parse_count(s, inner.trim())?;
        let elem = rest
            .trim()
            .strip_prefix('<')
            .and_then(|r| r.strip_suffix('>'))
            .ok_or_else(|| CodecError::invalid_type(s, "expected array<N><T>"))?;
        return Ok(TypeExpr::Array(count, Box::new(parse_expr(elem)?)));
    }

    if !rest.trim().is_empty() {
        return Err(CodecError::invalid_type(
            s,
            format!("unexpected trailing input '{}'", rest),
        ));
    }

    let boxed = || parse_expr(inner).map(Box::new);
    match head {
        "Option" => Ok(TypeExpr::Option(boxed()?)),
        "optional" => Ok(TypeExpr::Optional(boxed()?)),
        "List" | "vec" | "Vec" => Ok(TypeExpr::List(boxed()?)),
        "variadic" => Ok(TypeExpr::Variadic(boxed()?)),
        "multi" => Ok(TypeExpr::Multi(parse_list(s, inner)?)),
        "tuple" => Ok(TypeExpr::Tuple(parse_list(s, inner)?)),
        h if h.starts_with("array") => {
            let count = parse_count(s, &h["array".len()..])?;
            Ok(TypeExpr::Array(count, boxed()?))
        }
        other => Err(CodecError::invalid_type(
            s,
            format!("unknown type wrapper '{}'", other),
        )),
    }
}

fn parse_count(whole: &str, digits: &str) -> CodecResult<usize> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(CodecError::invalid_type(
            whole,
            format!("invalid array length '{}'", digits),
        ));
    }
    digits
        .parse::<usize>()
        .map_err(|e| CodecError::invalid_type(whole, format!("invalid array length: {}", e)))
}

fn parse_leaf(s: &str) -> CodecResult<TypeExpr> {
    if s.contains(['>', ',']) {
        return Err(CodecError::invalid_type(s, "unexpected ',' or '>'"));
    }
    if let Some(p) = Primitive::from_name(s) {
        return Ok(TypeExpr::Primitive(p));
    }
    if s == "Address" {
        return Ok(TypeExpr::Address);
    }
    Ok(TypeExpr::Custom(s.to_string()))
}
