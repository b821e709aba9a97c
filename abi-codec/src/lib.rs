//! # ABI Codec
//!
//! Decode smart-contract call data against a contract ABI, convert ABI
//! type names into action type descriptors, and build action definitions
//! for contract endpoints.
//!
//! ```rust
//! use abi_codec::prelude::*;
//!
//! let abi = AbiDocument::from_json(r#"{
//!     "name": "pairs",
//!     "types": {
//!         "Pair": {"type": "struct", "fields": [
//!             {"name": "x", "type": "u32"},
//!             {"name": "y", "type": "u32"}
//!         ]}
//!     }
//! }"#).unwrap();
//!
//! let codec = AbiCodec::with_defaults(&abi);
//! let value = codec.decode(&[[0u8, 0, 0, 1, 0, 0, 0, 2]], "Pair").unwrap();
//! assert_eq!(value.to_json(), serde_json::json!({"x": 1, "y": 2}));
//!
//! let converter = TypeNameConverter::new(&abi);
//! assert_eq!(converter.convert("Pair").unwrap(), "composite(x:uint32|y:uint32)");
//! ```

// Re-export core types
pub use abi_codec_core::*;

// Re-export the codec library (`action` stays the core descriptor module)
pub use abi_codec_cli::{address, buffer, convert, decode};
pub use abi_codec_cli::{AbiCodec, ActionTransformer, CodecOptions, TransformOptions, TypeNameConverter};

pub mod prelude {
    pub use abi_codec_core::prelude::*;
    pub use abi_codec_cli::{AbiCodec, ActionTransformer, CodecOptions, TransformOptions, TypeNameConverter};
}
