//! ABI-driven codec library for smart-contract call data.
//!
//! Provides:
//! - Binary decoding of query results against an ABI type name
//! - ABI type name → action type descriptor conversion
//! - Endpoint → action definition building
//! - Address rendering and buffer input helpers
//!
//! Use this as a library, or use the `abi-codec` binary to decode and
//! inspect from the command line.

pub mod action;
pub mod address;
pub mod buffer;
pub mod cli;
pub mod convert;
pub mod decode;

pub use action::{ActionTransformer, TransformOptions};
pub use convert::TypeNameConverter;
pub use decode::{AbiCodec, CodecOptions};
