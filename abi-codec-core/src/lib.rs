//! # ABI Codec Core
//!
//! Core types for decoding smart-contract call data against a contract ABI:
//! the ABI document and its custom-type registry, the parsed type grammar,
//! decoded values, action descriptors and the error taxonomy.

pub mod abi;
pub mod action;
pub mod error;
pub mod types;
pub mod validation;
pub mod value;

pub mod prelude {
    pub use crate::abi::{AbiDocument, AbiEndpoint, AbiRegistry, CustomType};
    pub use crate::action::{ActionDefinition, ActionInput, InputPosition};
    pub use crate::error::{CodecError, CodecResult};
    pub use crate::types::{Primitive, TypeExpr};
    pub use crate::value::{Decoded, DecodedValue};
}
